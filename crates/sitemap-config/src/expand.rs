//! Environment variable expansion for configuration strings.

use crate::ConfigError;

/// Expand `${VAR}` and `${VAR:-default}` references in `value`.
///
/// `field` is the dotted config path, used in error messages.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    shellexpand::env(value)
        .map(std::borrow::Cow::into_owned)
        .map_err(|e| ConfigError::EnvVar {
            field: field.to_owned(),
            message: format!("${{{}}} not set", e.var_name),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_value_unchanged() {
        assert_eq!(
            expand_env("https://example.com", "app.url").unwrap(),
            "https://example.com"
        );
    }

    #[test]
    fn test_default_used_when_unset() {
        let value = expand_env(
            "${SITEMAP_TEST_SURELY_UNSET_VAR:-https://fallback.test}",
            "app.url",
        )
        .unwrap();
        assert_eq!(value, "https://fallback.test");
    }

    #[test]
    fn test_missing_var_is_error() {
        let err = expand_env("${SITEMAP_TEST_SURELY_UNSET_VAR}", "app.url").unwrap_err();
        match err {
            ConfigError::EnvVar { field, message } => {
                assert_eq!(field, "app.url");
                assert_eq!(message, "${SITEMAP_TEST_SURELY_UNSET_VAR} not set");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
