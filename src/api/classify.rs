//! Failure classification
//!
//! Maps a failed HTTP exchange onto the closed [`ErrorKind`] taxonomy.
//! Nothing here performs I/O.

use crate::config::api;
use crate::error::{ClientError, ErrorDetail, ErrorKind};

/// Body fields that may carry a retry-after value (checked in order)
const RETRY_AFTER_FIELDS: &[&str] = &["retryAfter", "retry_after", "retry-after"];

/// Body fields that may carry validation detail (checked in order)
const VALIDATION_FIELDS: &[&str] = &["errors", "details", "detail", "message"];

/// What came back from a single request attempt
#[derive(Debug, Clone, Copy)]
pub enum Outcome<'a> {
    /// A response was received
    Response {
        status: u16,
        /// Raw `Retry-After` header value, if any
        retry_after: Option<&'a str>,
        body: &'a str,
    },
    /// No response: connection failure, timeout, aborted body
    Transport { message: &'a str },
}

/// Classify a failed outcome.
///
/// Only non-success responses should be passed in; a 2xx status falls
/// through to `Unknown`.
pub fn classify(outcome: Outcome<'_>) -> ClientError {
    match outcome {
        Outcome::Transport { message } => {
            ClientError::new(ErrorKind::NetworkError, "no response received from the service")
                .with_detail(ErrorDetail::Transport(message.to_string()))
        }
        Outcome::Response {
            status,
            retry_after,
            body,
        } => classify_status(status, retry_after, body),
    }
}

fn classify_status(status: u16, retry_after_header: Option<&str>, body: &str) -> ClientError {
    match status {
        400 => {
            let err = ClientError::new(ErrorKind::BadRequest, "the service rejected the request");
            match validation_detail(body) {
                Some(detail) => err.with_detail(ErrorDetail::Validation(detail)),
                None => err,
            }
        }
        401 => ClientError::new(ErrorKind::Unauthorized, "authentication failed"),
        403 => ClientError::new(
            ErrorKind::Forbidden,
            "the credentials are not allowed to access this resource",
        ),
        404 => ClientError::new(ErrorKind::NotFound, "resource not found"),
        429 => {
            let err = ClientError::new(ErrorKind::RateLimited, "rate limit exceeded");
            let wait = retry_after_from_body(body).or_else(|| {
                retry_after_header
                    .and_then(parse_seconds)
                    .map(serde_json::Value::from)
            });
            match wait {
                Some(wait) => err.with_detail(ErrorDetail::RetryAfter(wait)),
                None => err,
            }
        }
        500 | 502 | 503 => ClientError::new(
            ErrorKind::ServerError,
            format!("the service failed with status {}", status),
        ),
        _ => ClientError::new(
            ErrorKind::Unknown,
            format!("unexpected response status {}", status),
        )
        .with_detail(ErrorDetail::Status {
            status,
            body: excerpt(body),
        }),
    }
}

/// Classify a success body that is not valid structured data
pub fn classify_unparseable(body: &str, reason: &str) -> ClientError {
    ClientError::new(
        ErrorKind::SerializationError,
        format!("response body is not valid JSON: {}", reason),
    )
    .with_detail(ErrorDetail::Body(excerpt(body)))
}

/// Reject an endpoint before anything is sent.
///
/// Endpoints are paths under the base URL; anything resolving to another
/// origin is a caller mistake, reported as `BadRequest`.
pub fn classify_invalid_endpoint(endpoint: &str, reason: &str) -> ClientError {
    ClientError::new(
        ErrorKind::BadRequest,
        format!("endpoint '{}' was not sent: {}", endpoint, reason),
    )
    .with_detail(ErrorDetail::Validation(serde_json::json!({
        "endpoint": endpoint,
        "reason": reason,
    })))
}

/// First [`api::BODY_EXCERPT_CHARS`] characters of a body
pub fn excerpt(body: &str) -> String {
    body.chars().take(api::BODY_EXCERPT_CHARS).collect()
}

fn parse_body(body: &str) -> Option<serde_json::Map<String, serde_json::Value>> {
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(serde_json::Value::Object(map)) => Some(map),
        _ => None,
    }
}

fn validation_detail(body: &str) -> Option<serde_json::Value> {
    let map = parse_body(body)?;
    VALIDATION_FIELDS
        .iter()
        .find_map(|key| map.get(*key))
        .filter(|v| !v.is_null())
        .cloned()
}

/// Numeric body value carried as received, including fractions and numeric strings
fn retry_after_from_body(body: &str) -> Option<serde_json::Value> {
    let mut map = parse_body(body)?;
    let value = RETRY_AFTER_FIELDS.iter().find_map(|key| map.remove(*key))?;
    match &value {
        serde_json::Value::Number(_) => Some(value),
        serde_json::Value::String(s) if s.trim().parse::<f64>().is_ok() => Some(value),
        _ => None,
    }
}

/// Delta-seconds form only; HTTP-date values are ignored
fn parse_seconds(raw: &str) -> Option<u64> {
    raw.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16, body: &str) -> ClientError {
        classify(Outcome::Response {
            status,
            retry_after: None,
            body,
        })
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(response(400, "").kind, ErrorKind::BadRequest);
        assert_eq!(response(401, "").kind, ErrorKind::Unauthorized);
        assert_eq!(response(403, "").kind, ErrorKind::Forbidden);
        assert_eq!(response(404, "").kind, ErrorKind::NotFound);
        assert_eq!(response(429, "").kind, ErrorKind::RateLimited);
        assert_eq!(response(500, "").kind, ErrorKind::ServerError);
        assert_eq!(response(502, "").kind, ErrorKind::ServerError);
        assert_eq!(response(503, "").kind, ErrorKind::ServerError);
        assert_eq!(response(418, "").kind, ErrorKind::Unknown);
        assert_eq!(response(504, "").kind, ErrorKind::Unknown);
    }

    #[test]
    fn test_bad_request_carries_validation_detail() {
        let err = response(400, r#"{"errors":[{"field":"dueDate","message":"required"}]}"#);
        assert_eq!(
            err.detail,
            Some(ErrorDetail::Validation(serde_json::json!([
                {"field": "dueDate", "message": "required"}
            ])))
        );
    }

    #[test]
    fn test_bad_request_without_detail() {
        let err = response(400, "not json");
        assert_eq!(err.kind, ErrorKind::BadRequest);
        assert!(err.detail.is_none());
    }

    #[test]
    fn test_unauthorized_has_no_detail() {
        let err = response(401, r#"{"errors":["token expired"]}"#);
        assert_eq!(err.kind, ErrorKind::Unauthorized);
        assert!(err.detail.is_none());
        assert!(!err.to_string().contains("token expired"));
    }

    #[test]
    fn test_rate_limited_body_value_unchanged() {
        for secs in [0u64, 1, 17, 3600] {
            let body = format!(r#"{{"retryAfter": {}}}"#, secs);
            let err = response(429, &body);
            assert_eq!(err.kind, ErrorKind::RateLimited);
            assert_eq!(err.retry_after(), Some(&serde_json::json!(secs)));
        }
    }

    #[test]
    fn test_rate_limited_string_body_value() {
        let err = response(429, r#"{"retry_after": "45"}"#);
        assert_eq!(err.retry_after(), Some(&serde_json::json!("45")));
        assert_eq!(err.retry_after_secs(), Some(45.0));
    }

    #[test]
    fn test_rate_limited_fractional_body_value_unchanged() {
        let err = response(429, r#"{"retryAfter": 1.5}"#);
        assert_eq!(err.kind, ErrorKind::RateLimited);
        assert_eq!(err.retry_after(), Some(&serde_json::json!(1.5)));
        assert_eq!(err.retry_after_secs(), Some(1.5));

        let err = classify(Outcome::Response {
            status: 429,
            retry_after: Some("99"),
            body: r#"{"retry-after": "2.5"}"#,
        });
        assert_eq!(err.retry_after(), Some(&serde_json::json!("2.5")));
        assert_eq!(err.retry_after_secs(), Some(2.5));
    }

    #[test]
    fn test_rate_limited_non_numeric_body_value_falls_back_to_header() {
        let err = classify(Outcome::Response {
            status: 429,
            retry_after: Some("7"),
            body: r#"{"retryAfter": "soon"}"#,
        });
        assert_eq!(err.retry_after_secs(), Some(7.0));
    }

    #[test]
    fn test_rate_limited_header_fallback() {
        let err = classify(Outcome::Response {
            status: 429,
            retry_after: Some("12"),
            body: "",
        });
        assert_eq!(err.retry_after(), Some(&serde_json::json!(12)));
    }

    #[test]
    fn test_rate_limited_body_wins_over_header() {
        let err = classify(Outcome::Response {
            status: 429,
            retry_after: Some("99"),
            body: r#"{"retryAfter": 5}"#,
        });
        assert_eq!(err.retry_after(), Some(&serde_json::json!(5)));
    }

    #[test]
    fn test_rate_limited_http_date_header_ignored() {
        let err = classify(Outcome::Response {
            status: 429,
            retry_after: Some("Wed, 21 Oct 2015 07:28:00 GMT"),
            body: "",
        });
        assert_eq!(err.kind, ErrorKind::RateLimited);
        assert_eq!(err.retry_after(), None);
    }

    #[test]
    fn test_unknown_carries_status_and_body() {
        let err = response(409, "conflict!");
        assert_eq!(
            err.detail,
            Some(ErrorDetail::Status {
                status: 409,
                body: "conflict!".to_string()
            })
        );
    }

    #[test]
    fn test_transport_failure() {
        let err = classify(Outcome::Transport {
            message: "operation timed out",
        });
        assert_eq!(err.kind, ErrorKind::NetworkError);
        assert_eq!(
            err.detail,
            Some(ErrorDetail::Transport("operation timed out".to_string()))
        );
    }

    #[test]
    fn test_unparseable_body_excerpt_is_capped() {
        let body = "x".repeat(1000);
        let err = classify_unparseable(&body, "expected value");
        assert_eq!(err.kind, ErrorKind::SerializationError);
        match err.detail {
            Some(ErrorDetail::Body(b)) => assert_eq!(b.len(), api::BODY_EXCERPT_CHARS),
            other => panic!("Expected body excerpt, got {:?}", other),
        }
    }

    #[test]
    fn test_classification_is_deterministic() {
        let body = r#"{"message":"bad"}"#;
        assert_eq!(response(400, body), response(400, body));
    }
}
