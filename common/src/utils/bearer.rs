//! Bearer token header helpers.

const BEARER_PREFIX: &str = "Bearer ";

/// Builds the `Authorization` header value for a token.
pub fn bearer_value(token: &str) -> String {
    format!("{}{}", BEARER_PREFIX, token)
}

/// Extracts the token from an `Authorization` header value.
pub fn strip_bearer(header: &str) -> Option<&str> {
    header
        .strip_prefix(BEARER_PREFIX)
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        assert_eq!(strip_bearer(&bearer_value("abc")), Some("abc"));
    }

    #[test]
    fn test_rejects_other_schemes() {
        assert_eq!(strip_bearer("Basic dXNlcjpwdw=="), None);
        assert_eq!(strip_bearer("Bearer "), None);
    }
}
