//! Environment variable expansion for site metadata strings.
//!
//! Lets one `docnav.toml` serve several deployments, e.g. an asset prefix
//! that differs between staging and production.

use crate::ConfigError;

/// Expand environment variable references in a string.
///
/// Supports:
/// - `${VAR}` - expands to the value of VAR, errors if unset
/// - `${VAR:-default}` - expands to VAR if set, otherwise uses default
///
/// Bare `$VAR` outside braces is left alone so paths and URLs containing `$`
/// pass through, even next to a `${VAR}` reference.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    let mut expanded = String::with_capacity(value.len());
    let mut rest = value;

    while let Some(start) = rest.find("${") {
        expanded.push_str(&rest[..start]);
        rest = &rest[start..];
        // Unterminated reference, keep it verbatim
        let Some(len) = braced_len(rest) else {
            break;
        };
        expanded.push_str(&expand_token(&rest[..len], field)?);
        rest = &rest[len..];
    }
    expanded.push_str(rest);

    Ok(expanded)
}

/// Length of the `${...}` reference at the start of `s`, including nested
/// references in its default value.
fn braced_len(s: &str) -> Option<usize> {
    let mut depth = 0usize;
    let bytes = s.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'$' if bytes.get(i + 1) == Some(&b'{') => {
                depth += 1;
                i += 1;
            }
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i + 1);
                }
            }
            _ => {}
        }
        i += 1;
    }
    None
}

/// Expand a single `${...}` reference.
fn expand_token(token: &str, field: &str) -> Result<String, ConfigError> {
    shellexpand::env_with_context(token, |var| -> Result<Option<String>, LookupError> {
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

/// Error returned when environment variable lookup fails.
struct LookupError {
    var_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_simple_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("DOCNAV_EXPAND_SIMPLE", "DesignPush");
        }
        let result = expand_env("${DOCNAV_EXPAND_SIMPLE}", "site.title").unwrap();
        assert_eq!(result, "DesignPush");
        unsafe {
            std::env::remove_var("DOCNAV_EXPAND_SIMPLE");
        }
    }

    #[test]
    fn test_expand_with_default_uses_default() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("DOCNAV_EXPAND_UNSET");
        }
        let result =
            expand_env("${DOCNAV_EXPAND_UNSET:-/assets}/logo.svg", "site.logo.src").unwrap();
        assert_eq!(result, "/assets/logo.svg");
    }

    #[test]
    fn test_expand_missing_var_error() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("DOCNAV_EXPAND_MISSING");
        }
        let err = expand_env("${DOCNAV_EXPAND_MISSING}", "site.favicon").unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("DOCNAV_EXPAND_MISSING"));
        assert!(err.to_string().contains("site.favicon"));
    }

    #[test]
    fn test_expand_literal_unchanged() {
        let result = expand_env("./src/styles/custom.css", "site.custom_css[0]").unwrap();
        assert_eq!(result, "./src/styles/custom.css");
    }

    #[test]
    fn test_bare_dollar_not_expanded() {
        let result = expand_env("/assets/$logo.svg", "site.logo.src").unwrap();
        assert_eq!(result, "/assets/$logo.svg");
    }

    #[test]
    fn test_bare_dollar_kept_next_to_braced_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("DOCNAV_EXPAND_ASSETS", "/static");
        }
        let result = expand_env("${DOCNAV_EXPAND_ASSETS}/$logo.svg", "site.logo.src").unwrap();
        assert_eq!(result, "/static/$logo.svg");
        unsafe {
            std::env::remove_var("DOCNAV_EXPAND_ASSETS");
        }
    }

    #[test]
    fn test_unterminated_reference_unchanged() {
        let result = expand_env("/assets/${logo.svg", "site.logo.src").unwrap();
        assert_eq!(result, "/assets/${logo.svg");
    }
}
