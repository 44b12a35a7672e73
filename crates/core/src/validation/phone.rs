//! Phone number validation seam.

use std::sync::LazyLock;

use regex::Regex;

/// Decides whether a string is a dialable phone number.
pub trait PhoneValidator: Send + Sync {
    fn is_valid(&self, number: &str) -> bool;
}

/// Optional `+`, then 8 to 15 digits with a non-zero lead (E.164 length).
static E164_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[1-9]\d{7,14}$").expect("valid regex"));

/// Default validator: accepts E.164-shaped numbers after dropping common
/// formatting characters (spaces, dashes, dots, parentheses).
#[derive(Debug, Clone, Copy, Default)]
pub struct E164PhoneValidator;

impl PhoneValidator for E164PhoneValidator {
    fn is_valid(&self, number: &str) -> bool {
        let compact: String = number
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '.' | '(' | ')'))
            .collect();
        E164_RE.is_match(&compact)
    }
}
