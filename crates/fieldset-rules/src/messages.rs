//! Default failure messages per built-in rule.

use crate::id;

/// Message shown when a rule fails and no override is configured.
/// Unknown identifiers get the generic fallback.
#[must_use]
pub fn default_message(rule_id: &str) -> &'static str {
    match rule_id {
        id::EMAIL | id::EMAIL_STRICT => "Please enter a valid email address",
        id::PHONE_US => "Please enter a valid US phone number",
        id::PHONE_INTERNATIONAL => "Please enter a valid international phone number",
        id::URL => "Please enter a valid URL",
        id::ZIP_US => "Please enter a valid US ZIP code",
        id::ZIP_CANADA => "Please enter a valid Canadian postal code",
        id::ZIP_UK => "Please enter a valid UK postcode",
        id::CREDIT_CARD => "Please enter a valid credit card number",
        id::CVV => "Please enter a valid CVV code",
        id::SSN => "Please enter a valid SSN",
        id::DATE_ISO => "Please enter date in YYYY-MM-DD format",
        id::DATE_US => "Please enter date in MM/DD/YYYY format",
        id::TIME_12 => "Please enter time in 12-hour format",
        id::TIME_24 => "Please enter time in 24-hour format",
        id::IPV4 => "Please enter a valid IPv4 address",
        id::IPV6 => "Please enter a valid IPv6 address",
        id::ALPHANUMERIC => "Only letters and numbers allowed",
        id::ALPHABETIC => "Only letters allowed",
        id::NUMERIC => "Only numbers allowed",
        id::DECIMAL => "Please enter a valid decimal number",
        id::HEX_COLOR => "Please enter a valid hex color code",
        id::USERNAME => "Username must be 3-20 characters (letters, numbers, _ or -)",
        id::STRONG_PASSWORD => {
            "Password must be 8+ characters with uppercase, lowercase, number, and special character"
        }
        _ => "Invalid input",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_rules_have_specific_messages() {
        assert_eq!(
            default_message(id::EMAIL),
            "Please enter a valid email address"
        );
        assert_eq!(
            default_message(id::CREDIT_CARD),
            "Please enter a valid credit card number"
        );
    }

    #[test]
    fn unknown_rule_gets_fallback() {
        assert_eq!(default_message("made-up"), "Invalid input");
    }
}
