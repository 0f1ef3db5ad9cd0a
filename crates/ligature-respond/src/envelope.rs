//! Error envelopes.
//!
//! Transports that fail a request during binding or resolution finish it
//! with [`error_response`]: a JSON `{code, message}` envelope carrying the
//! error's status code.

use bytes::Bytes;
use http::{header, Response};
use ligature_core::BindError;
use serde::Serialize;

#[derive(Serialize)]
struct ErrorEnvelope<'a> {
    code: &'static str,
    message: &'a str,
}

/// Builds the client-facing error response for a binding failure.
///
/// # Example
///
/// ```rust
/// use ligature_core::{BindError, ValueSource};
/// use ligature_respond::error_response;
///
/// let response = error_response(&BindError::missing(ValueSource::Query, "age"));
/// assert_eq!(response.status(), http::StatusCode::BAD_REQUEST);
/// ```
#[must_use]
pub fn error_response(error: &BindError) -> Response<Bytes> {
    let message = error.to_string();
    let envelope = ErrorEnvelope {
        code: error.error_code(),
        message: &message,
    };
    let body = serde_json::to_vec(&envelope).expect("error envelope serialization failed");

    Response::builder()
        .status(error.status_code())
        .header(header::CONTENT_TYPE, "application/json")
        .body(Bytes::from(body))
        .expect("failed to build response")
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::StatusCode;
    use ligature_core::ValueSource;

    #[test]
    fn test_envelope_status_and_content_type() {
        let response = error_response(&BindError::missing(ValueSource::Query, "age"));

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
    }

    #[test]
    fn test_envelope_body_shape() {
        let response = error_response(&BindError::parse("expected value at line 1"));
        let body: serde_json::Value = serde_json::from_slice(response.body()).unwrap();

        assert_eq!(body["code"], "MALFORMED_PAYLOAD");
        assert!(body["message"]
            .as_str()
            .unwrap()
            .contains("expected value"));
    }

    #[test]
    fn test_schema_mismatch_maps_to_422() {
        let response =
            error_response(&BindError::mismatch("age", "expected integer, found string"));
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
