//! Phone-number normalization
//!
//! Kenyan subscriber numbers arrive in several shapes; signup stores one
//! canonical `254`-prefixed form so the uniqueness constraint on
//! `phone_number` actually deduplicates subscribers.

/// Normalize a phone number into the canonical `254`-prefixed form.
///
/// Recognized input shapes:
/// - `+254712345678` -> `254712345678` (leading `+` stripped)
/// - `254712345678`  -> unchanged
/// - `0712345678`    -> `254712345678` (leading `0` replaced)
/// - `712345678` / `110345678` -> `254`-prefixed
///
/// Anything else passes through unchanged.
pub fn format_phone_number(phone_number: &str) -> String {
    if let Some(rest) = phone_number.strip_prefix('+') {
        rest.to_string()
    } else if phone_number.starts_with("254") {
        phone_number.to_string()
    } else if let Some(rest) = phone_number.strip_prefix('0') {
        format!("254{}", rest)
    } else if phone_number.starts_with('7') || phone_number.starts_with('1') {
        format!("254{}", phone_number)
    } else {
        phone_number.to_string()
    }
}
