//! CSS selector parsing utilities.

use scraper::Selector;

use crate::error_handling::ConfigError;

/// Parses a user-supplied CSS selector.
///
/// # Errors
///
/// Returns `ConfigError::InvalidSelector` carrying the parser's message.
pub fn parse_selector(selector_str: &str) -> Result<Selector, ConfigError> {
    Selector::parse(selector_str).map_err(|e| ConfigError::InvalidSelector {
        selector: selector_str.to_string(),
        detail: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_selector() {
        assert!(parse_selector("table.wikitable").is_ok());
        assert!(parse_selector("#content table:nth-of-type(2)").is_ok());
    }

    #[test]
    fn test_invalid_selector_is_config_error() {
        let err = parse_selector("table[").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidSelector { ref selector, .. } if selector == "table["));
    }
}
