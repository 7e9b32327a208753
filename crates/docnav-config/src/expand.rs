//! Environment variable expansion for configuration strings.

use crate::ConfigError;

/// Expand environment variable references in a string.
///
/// Supports:
/// - `${VAR}` - expands to the value of VAR, errors if unset
/// - `${VAR:-default}` - expands to VAR if set, otherwise uses default
///
/// Bare `$VAR` is left alone.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(value, |var| -> Result<Option<String>, LookupError> {
        std::env::var(var).map(Some).map_err(|_| LookupError {
            var_name: var.to_owned(),
        })
    })
    .map(std::borrow::Cow::into_owned)
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{0}}} not set", e.cause.var_name),
    })
}

/// Unset variable reported by the lookup closure.
struct LookupError {
    var_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_simple_var() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::set_var("DOCNAV_TEST_SIMPLE", "Handbook");
        }
        let result = expand_env("${DOCNAV_TEST_SIMPLE}", "site.title").unwrap();
        assert_eq!(result, "Handbook");
        unsafe {
            std::env::remove_var("DOCNAV_TEST_SIMPLE");
        }
    }

    #[test]
    fn test_expand_with_default_uses_default() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::remove_var("DOCNAV_TEST_UNSET");
        }
        let result = expand_env("${DOCNAV_TEST_UNSET:-/docs/}", "site.base_url").unwrap();
        assert_eq!(result, "/docs/");
    }

    #[test]
    fn test_expand_missing_var_error() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::remove_var("DOCNAV_TEST_MISSING");
        }
        let err = expand_env("${DOCNAV_TEST_MISSING}", "site.title").unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("DOCNAV_TEST_MISSING"));
        assert!(err.to_string().contains("site.title"));
    }

    #[test]
    fn test_expand_embedded_var() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::set_var("DOCNAV_TEST_REPO", "handbook");
        }
        let result = expand_env("https://example.github.io/${DOCNAV_TEST_REPO}/", "site.base_url")
            .unwrap();
        assert_eq!(result, "https://example.github.io/handbook/");
        unsafe {
            std::env::remove_var("DOCNAV_TEST_REPO");
        }
    }

    #[test]
    fn test_bare_dollar_not_expanded() {
        assert_eq!(expand_env("$VAR", "site.title").unwrap(), "$VAR");
        assert_eq!(expand_env("Costs in $", "site.title").unwrap(), "Costs in $");
    }
}
