//! Language and currency code validation.
//!
//! Only the shape of the code is checked; codes are not looked up in the
//! BCP-47 or ISO 4217 registries.

use std::sync::LazyLock;

use regex::Regex;

/// Two lowercase letters with an optional uppercase region, e.g. `en`, `en-US`.
static LANGUAGE_CODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z]{2}(-[A-Z]{2})?$").expect("Invalid language code regex"));

/// Three uppercase letters, e.g. `USD`.
static CURRENCY_CODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{3}$").expect("Invalid currency code regex"));

/// Return the language code unchanged when it has a BCP-47 shape.
pub fn validate_language_code(value: &str) -> Option<String> {
    LANGUAGE_CODE_REGEX
        .is_match(value)
        .then(|| value.to_string())
}

/// Return the uppercased currency code when it has an ISO 4217 shape.
pub fn validate_currency_code(value: &str) -> Option<String> {
    let upper = value.to_uppercase();
    CURRENCY_CODE_REGEX.is_match(&upper).then_some(upper)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_codes() {
        assert_eq!(validate_language_code("en").as_deref(), Some("en"));
        assert_eq!(validate_language_code("pt-BR").as_deref(), Some("pt-BR"));
        assert_eq!(validate_language_code("EN"), None);
        assert_eq!(validate_language_code("en-us"), None);
        assert_eq!(validate_language_code("eng"), None);
        assert_eq!(validate_language_code(" en"), None);
    }

    #[test]
    fn test_currency_codes() {
        assert_eq!(validate_currency_code("usd").as_deref(), Some("USD"));
        assert_eq!(validate_currency_code("EUR").as_deref(), Some("EUR"));
        assert_eq!(validate_currency_code("US"), None);
        assert_eq!(validate_currency_code("US$"), None);
        assert_eq!(validate_currency_code(""), None);
    }
}
