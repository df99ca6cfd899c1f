//! Internal service authentication.
//!
//! Callers are trusted internal services that present a pre-shared key in
//! `X-Internal-Key` and tag every call with an `X-Request-ID`.

use axum::http::HeaderMap;
use tracing::warn;

use crate::error::RelayError;

/// Header carrying the pre-shared internal key.
pub const INTERNAL_KEY_HEADER: &str = "x-internal-key";

/// Header carrying the caller's opaque request id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Authenticate an inbound request.
///
/// Returns the request id on success. Fails with [`RelayError::Unauthorized`]
/// when the key is missing, empty or wrong, when no key is configured, or
/// when the request id is missing or empty.
pub fn authenticate(headers: &HeaderMap, expected_key: Option<&str>) -> Result<String, RelayError> {
    let provided_key = header_value(headers, INTERNAL_KEY_HEADER);
    let request_id = header_value(headers, REQUEST_ID_HEADER);

    let key_valid = match (provided_key, expected_key) {
        (Some(provided), Some(expected)) => constant_time_compare(provided, expected),
        _ => false,
    };

    match request_id {
        Some(id) if key_valid => Ok(id.to_string()),
        _ => {
            warn!(
                has_internal_key = provided_key.is_some(),
                internal_key_configured = expected_key.is_some(),
                key_valid = key_valid,
                has_request_id = request_id.is_some(),
                "internal_auth_failed"
            );
            Err(RelayError::Unauthorized)
        }
    }
}

/// Header value as a non-empty string.
fn header_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
}

/// Constant-time string comparison to prevent timing attacks.
fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (x, y) in a.bytes().zip(b.bytes()) {
        result |= x ^ y;
    }
    result == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(key: Option<&str>, request_id: Option<&str>) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Some(key) = key {
            headers.insert(INTERNAL_KEY_HEADER, HeaderValue::from_str(key).unwrap());
        }
        if let Some(id) = request_id {
            headers.insert(REQUEST_ID_HEADER, HeaderValue::from_str(id).unwrap());
        }
        headers
    }

    #[test]
    fn test_authenticate_valid() {
        let result = authenticate(&headers(Some("K"), Some("R1")), Some("K"));
        assert_eq!(result.unwrap(), "R1");
    }

    #[test]
    fn test_authenticate_wrong_key() {
        let result = authenticate(&headers(Some("wrong"), Some("R1")), Some("K"));
        assert!(matches!(result, Err(RelayError::Unauthorized)));
    }

    #[test]
    fn test_authenticate_missing_key() {
        let result = authenticate(&headers(None, Some("R1")), Some("K"));
        assert!(matches!(result, Err(RelayError::Unauthorized)));
    }

    #[test]
    fn test_authenticate_missing_request_id() {
        assert!(authenticate(&headers(Some("K"), None), Some("K")).is_err());
        assert!(authenticate(&headers(Some("K"), Some("")), Some("K")).is_err());
    }

    #[test]
    fn test_authenticate_without_configured_key() {
        assert!(authenticate(&headers(Some("K"), Some("R1")), None).is_err());
        assert!(authenticate(&headers(Some(""), Some("R1")), None).is_err());
    }

    #[test]
    fn test_header_names_case_insensitive() {
        let request = axum::http::Request::builder()
            .header("X-Internal-Key", "K")
            .header("X-REQUEST-ID", "R1")
            .body(())
            .unwrap();

        assert_eq!(authenticate(request.headers(), Some("K")).unwrap(), "R1");
    }

    #[test]
    fn test_constant_time_compare() {
        assert!(constant_time_compare("abc", "abc"));
        assert!(!constant_time_compare("abc", "abd"));
        assert!(!constant_time_compare("abc", "abcd"));
    }
}
