//! Reformatting, cursor repositioning and completeness classification.

use crate::pattern::{MaskPattern, PLACEHOLDER};

/// How filled-in a masked value is, judged by data-character count
/// against the pattern's slot count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completeness {
    /// No data characters at all.
    Empty,
    /// Every slot is filled.
    Complete,
    /// Strictly more than half of the slots are filled.
    Partial,
    /// Half or fewer of the slots are filled.
    Incomplete,
}

/// Fraction of the expected slot count a value must *exceed* to count as
/// `Partial` rather than `Incomplete`. The boundary is strict: exactly
/// half full is still `Incomplete` (see the boundary tests).
pub const PARTIAL_FRACTION: (usize, usize) = (1, 2);

impl MaskPattern {
    /// Reformat `raw` through the template.
    ///
    /// The filter-accepted characters of `raw` are collected in order
    /// into a clean buffer, then the template is scanned left to right:
    /// each slot consumes the next buffer character, each literal is
    /// emitted as-is. The scan stops as soon as the buffer is exhausted,
    /// so a literal directly following the last data character is
    /// withheld, and buffer characters beyond the last slot are dropped.
    #[must_use]
    pub fn apply(&self, raw: &str) -> String {
        let clean: Vec<char> = raw.chars().filter(|&c| self.filter().accepts(c)).collect();
        let mut out = String::with_capacity(self.len());
        let mut next = 0;
        for &tc in self.template_chars() {
            if next >= clean.len() {
                break;
            }
            if tc == PLACEHOLDER {
                out.push(clean[next]);
                next += 1;
            } else {
                out.push(tc);
            }
        }
        out
    }

    /// Reformat after a forward keystroke and reposition the caret.
    ///
    /// `cursor` is the caret position (in characters) after the host
    /// inserted the keystroke into the raw text. The returned caret is
    /// advanced past any run of literal separators so it lands on the
    /// next slot, or at the end of the formatted text.
    #[must_use]
    pub fn apply_with_cursor(&self, raw: &str, cursor: usize) -> (String, usize) {
        let out = self.apply(raw);
        let out_len = out.chars().count();
        let mut caret = cursor.min(out_len);
        while caret < out_len && self.is_literal_at(caret) {
            caret += 1;
        }
        (out, caret)
    }

    /// Delete backwards from `cursor` over an already-formatted value.
    ///
    /// When the character before the caret is a literal separator, the
    /// deletion skips backward over the literal run and removes the
    /// nearest preceding data character instead, then the value is
    /// reformatted. The returned caret sits where the removal happened.
    #[must_use]
    pub fn backspace(&self, text: &str, cursor: usize) -> (String, usize) {
        let chars: Vec<char> = text.chars().collect();
        let cursor = cursor.min(chars.len());
        if cursor == 0 {
            return (self.apply(text), 0);
        }

        let remove_at = if self.is_literal_at(cursor - 1) {
            let mut pos = cursor - 1;
            while pos > 0 && self.is_literal_at(pos - 1) {
                pos -= 1;
            }
            if pos == 0 {
                // Only literals before the caret; nothing to delete.
                return (self.apply(text), 0);
            }
            pos - 1
        } else {
            cursor - 1
        };

        let mut edited = String::with_capacity(chars.len().saturating_sub(1));
        edited.extend(&chars[..remove_at]);
        edited.extend(&chars[remove_at + 1..]);
        (self.apply(&edited), remove_at)
    }

    /// Count of filter-accepted characters in `text`.
    #[must_use]
    pub fn data_len(&self, text: &str) -> usize {
        text.chars().filter(|&c| self.filter().accepts(c)).count()
    }

    /// Classify how filled-in `text` is.
    #[must_use]
    pub fn completeness(&self, text: &str) -> Completeness {
        let expected = self.placeholder_count();
        let actual = self.data_len(text);
        let (num, den) = PARTIAL_FRACTION;
        if actual == 0 {
            Completeness::Empty
        } else if actual >= expected {
            Completeness::Complete
        } else if actual * den > expected * num {
            Completeness::Partial
        } else {
            Completeness::Incomplete
        }
    }
}
