//! Built-in validation predicates.
//!
//! Every function here is total: any string input yields `true` or
//! `false`, never a panic. Formats that tolerate separators (phones,
//! cards, SSNs, ZIP codes) strip non-digits before matching; strict
//! formats (dates, times, addresses) match the string as given.

use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex"));
static EMAIL_STRICT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("emailStrict regex")
});
static PHONE_US: Lazy<Regex> = Lazy::new(|| Regex::new(r"^1?\d{10}$").expect("phoneUS regex"));
static PHONE_INTL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[1-9]\d{1,14}$").expect("phoneInternational regex"));
static ZIP_CANADA: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z]\d[A-Za-z][ -]?\d[A-Za-z]\d$").expect("zipCanada regex"));
static ZIP_UK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^[A-Z]{1,2}\d{1,2}[A-Z]?\s?\d[A-Z]{2}$").expect("zipUK regex"));
static DATE_ISO: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{4}-(0[1-9]|1[0-2])-(0[1-9]|[12]\d|3[01])$").expect("dateISO regex")
});
static DATE_US: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(0[1-9]|1[0-2])/(0[1-9]|[12]\d|3[01])/\d{4}$").expect("dateUS regex")
});
static TIME_12: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(0?[1-9]|1[0-2]):[0-5]\d\s?(AM|PM|am|pm)$").expect("time12 regex"));
static TIME_24: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([01]\d|2[0-3]):[0-5]\d$").expect("time24 regex"));
static IPV6: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9a-fA-F]{1,4}:){7}[0-9a-fA-F]{1,4}$").expect("ipv6 regex"));
static ALPHANUMERIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9]+$").expect("alphanumeric regex"));
static ALPHABETIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z]+$").expect("alphabetic regex"));
static NUMERIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+$").expect("numeric regex"));
static DECIMAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+(\.\d+)?$").expect("decimal regex"));
static HEX_COLOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#([A-Fa-f0-9]{6}|[A-Fa-f0-9]{3})$").expect("hexColor regex"));
static USERNAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9_-]{3,20}$").expect("username regex"));

/// Punctuation accepted as the "symbol" component of a strong password.
pub const PASSWORD_SYMBOLS: &str = "!@#$%^&*(),.?\":{}|<>";

fn digits_of(value: &str) -> String {
    value.chars().filter(char::is_ascii_digit).collect()
}

/// Non-empty after trimming whitespace.
#[must_use]
pub fn required(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Loose email shape: something@something.something, no whitespace.
#[must_use]
pub fn email(value: &str) -> bool {
    EMAIL.is_match(value)
}

/// Conservative email shape with a restricted character set and a
/// two-letter-minimum TLD.
#[must_use]
pub fn email_strict(value: &str) -> bool {
    EMAIL_STRICT.is_match(value)
}

/// US phone number: ten digits, optionally prefixed with a country 1.
/// Separators are ignored.
#[must_use]
pub fn phone_us(value: &str) -> bool {
    PHONE_US.is_match(&digits_of(value))
}

/// E.164-style international number; spaces, hyphens and parentheses are
/// ignored.
#[must_use]
pub fn phone_international(value: &str) -> bool {
    let compact: String = value
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '(' | ')'))
        .collect();
    PHONE_INTL.is_match(&compact)
}

/// HTTP or HTTPS URL with a non-empty host. Anything that does not parse
/// is simply false.
#[must_use]
pub fn url(value: &str) -> bool {
    let rest = value
        .strip_prefix("http://")
        .or_else(|| value.strip_prefix("https://"));
    match rest {
        Some(after_scheme) => {
            let host = after_scheme
                .split(['/', '?', '#'])
                .next()
                .unwrap_or_default();
            !host.is_empty() && !host.contains(char::is_whitespace)
        }
        None => false,
    }
}

/// US ZIP: exactly 5 or exactly 9 digits once separators are stripped.
#[must_use]
pub fn zip_us(value: &str) -> bool {
    let digits = digits_of(value);
    digits.len() == 5 || digits.len() == 9
}

/// Canadian postal code (A1A 1A1, with optional space or hyphen).
#[must_use]
pub fn zip_canada(value: &str) -> bool {
    ZIP_CANADA.is_match(value)
}

/// UK postcode, case-insensitive.
#[must_use]
pub fn zip_uk(value: &str) -> bool {
    ZIP_UK.is_match(value)
}

/// Payment card number: 13–19 digits passing the Luhn checksum.
/// Separators anywhere in the input are ignored, so formatted card
/// numbers ("4532 0151 1283 0366") validate identically to bare ones.
#[must_use]
pub fn credit_card(value: &str) -> bool {
    let digits = digits_of(value);
    if digits.len() < 13 || digits.len() > 19 {
        return false;
    }
    let mut sum = 0u32;
    let mut double = false;
    for c in digits.chars().rev() {
        let mut d = c.to_digit(10).unwrap_or(0);
        if double {
            d *= 2;
            if d > 9 {
                d -= 9;
            }
        }
        sum += d;
        double = !double;
    }
    sum % 10 == 0
}

/// Card verification value: 3 or 4 digits.
#[must_use]
pub fn cvv(value: &str) -> bool {
    let digits = digits_of(value);
    digits.len() == 3 || digits.len() == 4
}

/// US Social Security number: exactly 9 digits once separators are
/// stripped.
#[must_use]
pub fn ssn(value: &str) -> bool {
    digits_of(value).len() == 9
}

/// ISO date, YYYY-MM-DD with calendar-shaped month/day ranges.
#[must_use]
pub fn date_iso(value: &str) -> bool {
    DATE_ISO.is_match(value)
}

/// US date, MM/DD/YYYY.
#[must_use]
pub fn date_us(value: &str) -> bool {
    DATE_US.is_match(value)
}

/// 12-hour clock time with AM/PM suffix.
#[must_use]
pub fn time_12(value: &str) -> bool {
    TIME_12.is_match(value)
}

/// 24-hour clock time, HH:MM.
#[must_use]
pub fn time_24(value: &str) -> bool {
    TIME_24.is_match(value)
}

/// Dotted-quad IPv4: exactly four base-10 groups, each in 0..=255,
/// digits only.
#[must_use]
pub fn ipv4(value: &str) -> bool {
    let groups: Vec<&str> = value.split('.').collect();
    if groups.len() != 4 {
        return false;
    }
    groups.iter().all(|g| {
        !g.is_empty()
            && g.len() <= 3
            && g.chars().all(|c| c.is_ascii_digit())
            && g.parse::<u16>().is_ok_and(|n| n <= 255)
    })
}

/// Full-form IPv6: eight colon-separated hex groups (no `::` shorthand).
#[must_use]
pub fn ipv6(value: &str) -> bool {
    IPV6.is_match(value)
}

/// Letters and digits only, non-empty.
#[must_use]
pub fn alphanumeric(value: &str) -> bool {
    ALPHANUMERIC.is_match(value)
}

/// ASCII letters only, non-empty.
#[must_use]
pub fn alphabetic(value: &str) -> bool {
    ALPHABETIC.is_match(value)
}

/// Digits only, non-empty.
#[must_use]
pub fn numeric(value: &str) -> bool {
    NUMERIC.is_match(value)
}

/// Unsigned decimal number with an optional fractional part.
#[must_use]
pub fn decimal(value: &str) -> bool {
    DECIMAL.is_match(value)
}

/// Hex color: `#RGB` or `#RRGGBB`.
#[must_use]
pub fn hex_color(value: &str) -> bool {
    HEX_COLOR.is_match(value)
}

/// Username: 3–20 characters from letters, digits, underscore, hyphen.
#[must_use]
pub fn username(value: &str) -> bool {
    USERNAME.is_match(value)
}

/// Composite strength rule: at least 8 characters with an uppercase
/// letter, a lowercase letter, a digit, and one symbol from
/// [`PASSWORD_SYMBOLS`].
#[must_use]
pub fn strong_password(value: &str) -> bool {
    value.chars().count() >= 8
        && value.chars().any(|c| c.is_ascii_uppercase())
        && value.chars().any(|c| c.is_ascii_lowercase())
        && value.chars().any(|c| c.is_ascii_digit())
        && value.chars().any(|c| PASSWORD_SYMBOLS.contains(c))
}
