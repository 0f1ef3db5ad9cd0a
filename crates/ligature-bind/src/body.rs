//! Body decoding.
//!
//! [`decode_json`] maps a fully buffered JSON payload onto a
//! [`BindingSchema`], keeping malformed text
//! ([`Parse`](ligature_core::BindError::Parse)) strictly separate from
//! well-formed-but-wrongly-shaped payloads
//! ([`SchemaMismatch`](ligature_core::BindError::SchemaMismatch)).
//! [`RawBody`] and [`BodyString`] are the uncooked pass-through
//! extractors for handlers that read the payload themselves.

use crate::context::BindingContext;
use crate::from_request::FromRequest;
use crate::params::coerce;
use bytes::Bytes;
use ligature_core::{
    BindError, BindResult, BindingSchema, FieldPolicy, FieldType, FieldValue, RequestRecord,
    ValueSource,
};
use std::ops::Deref;

/// Maximum accepted payload size (1 MiB).
pub(crate) const MAX_BODY_SIZE: usize = 1024 * 1024;

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

/// Decodes a JSON payload against a schema, producing a typed record.
///
/// The whole payload is read eagerly as UTF-8 (serde_json rejects invalid
/// UTF-8 as a parse failure). Tree fields map to schema fields by exact
/// name; unknown payload fields are ignored. Body values are already
/// typed, so a JSON string where an integer is declared is a
/// [`SchemaMismatch`](BindError::SchemaMismatch), never a coercion.
/// Same bytes and same schema always yield the same record or the same
/// error.
///
/// # Example
///
/// ```rust
/// use ligature_bind::decode_json;
/// use ligature_core::{BindingSchema, FieldType};
///
/// let schema = BindingSchema::builder()
///     .required("username", FieldType::Str)
///     .required("age", FieldType::Int)
///     .build();
///
/// let record = decode_json(br#"{"username":"amy","age":20}"#, &schema).unwrap();
/// assert_eq!(record.get_str("username"), Some("amy"));
/// assert_eq!(record.get_int("age"), Some(20));
/// ```
pub fn decode_json(payload: &[u8], schema: &BindingSchema) -> BindResult<RequestRecord> {
    if payload.len() > MAX_BODY_SIZE {
        return Err(BindError::parse(format!(
            "payload too large: max {MAX_BODY_SIZE} bytes, got {} bytes",
            payload.len()
        )));
    }
    if payload.is_empty() {
        return Err(BindError::parse("empty request body"));
    }

    let tree: serde_json::Value =
        serde_json::from_slice(payload).map_err(|e| BindError::parse(e.to_string()))?;

    let serde_json::Value::Object(fields) = tree else {
        return Err(BindError::mismatch(
            "$",
            format!("expected object, found {}", json_type_name(&tree)),
        ));
    };

    let mut record = RequestRecord::new();
    for spec in schema.iter() {
        let value = match fields.get(spec.name()) {
            Some(found) => decode_field(spec.name(), spec.field_type(), found)?,
            None => match spec.policy() {
                FieldPolicy::Default(default) => {
                    coerce(ValueSource::Body, spec.name(), spec.field_type(), default)?
                }
                FieldPolicy::Required => {
                    return Err(BindError::missing(ValueSource::Body, spec.name()));
                }
            },
        };
        record.insert(spec.name(), value);
    }
    Ok(record)
}

fn decode_field(
    name: &str,
    expected: FieldType,
    found: &serde_json::Value,
) -> BindResult<FieldValue> {
    match (expected, found) {
        (FieldType::Str, serde_json::Value::String(s)) => Ok(FieldValue::Str(s.clone())),
        (FieldType::Int, serde_json::Value::Number(n)) => n.as_i64().map(FieldValue::Int).ok_or_else(|| {
            BindError::mismatch(name, format!("expected {expected}, found number {n}"))
        }),
        (_, other) => Err(BindError::mismatch(
            name,
            format!("expected {expected}, found {}", json_type_name(other)),
        )),
    }
}

/// Extractor for the raw request payload bytes.
///
/// The uncooked boundary contract: handlers that parse the payload
/// themselves (the pre-binding style) read it from here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawBody(pub Bytes);

impl RawBody {
    /// Returns the payload as a byte slice.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Consumes the extractor and returns the inner bytes.
    #[must_use]
    pub fn into_inner(self) -> Bytes {
        self.0
    }

    /// Returns the payload length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the payload is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Deref for RawBody {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequest for RawBody {
    fn from_request(ctx: &BindingContext) -> BindResult<Self> {
        Ok(RawBody(ctx.body().clone()))
    }
}

impl From<RawBody> for Bytes {
    fn from(body: RawBody) -> Self {
        body.0
    }
}

/// Extractor for the request payload as UTF-8 text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BodyString(pub String);

impl BodyString {
    /// Consumes the extractor and returns the text.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Deref for BodyString {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequest for BodyString {
    fn from_request(ctx: &BindingContext) -> BindResult<Self> {
        let text = std::str::from_utf8(ctx.body())
            .map_err(|e| BindError::parse(format!("body is not valid UTF-8: {e}")))?;
        Ok(BodyString(text.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::BindingContextBuilder;
    use http::{Method, Uri};

    fn hello_schema() -> BindingSchema {
        BindingSchema::builder()
            .required("username", FieldType::Str)
            .required("age", FieldType::Int)
            .build()
    }

    fn make_ctx(body: &str) -> BindingContext {
        BindingContextBuilder::new()
            .method(Method::POST)
            .uri(Uri::from_static("/request-body-json-v1"))
            .body(body.as_bytes().to_vec())
            .build()
    }

    #[test]
    fn test_decode_well_typed_body() {
        let record = decode_json(br#"{"username":"amy","age":20}"#, &hello_schema()).unwrap();

        assert_eq!(record.get_str("username"), Some("amy"));
        assert_eq!(record.get_int("age"), Some(20));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = decode_json(b"{not json", &hello_schema()).unwrap_err();

        assert!(matches!(err, BindError::Parse { .. }));
        assert_eq!(err.error_code(), "MALFORMED_PAYLOAD");
    }

    #[test]
    fn test_empty_body_is_parse_error() {
        let err = decode_json(b"", &hello_schema()).unwrap_err();
        assert!(matches!(err, BindError::Parse { .. }));
    }

    #[test]
    fn test_string_where_integer_expected_is_schema_mismatch() {
        let err =
            decode_json(br#"{"username":"amy","age":"20"}"#, &hello_schema()).unwrap_err();

        assert!(matches!(err, BindError::SchemaMismatch { .. }));
        assert!(err.to_string().contains("age"));
        assert!(err.to_string().contains("string"));
    }

    #[test]
    fn test_number_where_string_expected_is_schema_mismatch() {
        let err = decode_json(br#"{"username":7,"age":20}"#, &hello_schema()).unwrap_err();

        assert!(matches!(err, BindError::SchemaMismatch { .. }));
        assert!(err.to_string().contains("username"));
    }

    #[test]
    fn test_float_never_rounds_into_integer() {
        let err =
            decode_json(br#"{"username":"amy","age":20.5}"#, &hello_schema()).unwrap_err();
        assert!(matches!(err, BindError::SchemaMismatch { .. }));
    }

    #[test]
    fn test_non_object_top_level() {
        let err = decode_json(b"[1,2,3]", &hello_schema()).unwrap_err();

        assert_eq!(
            err,
            BindError::mismatch("$", "expected object, found array")
        );
    }

    #[test]
    fn test_missing_required_body_field() {
        let err = decode_json(br#"{"username":"amy"}"#, &hello_schema()).unwrap_err();
        assert_eq!(err, BindError::missing(ValueSource::Body, "age"));
    }

    #[test]
    fn test_default_applied_for_absent_body_field() {
        let schema = BindingSchema::builder()
            .required("username", FieldType::Str)
            .with_default("age", FieldType::Int, "-1")
            .build();

        let record = decode_json(br#"{"username":"amy"}"#, &schema).unwrap();
        assert_eq!(record.get_int("age"), Some(-1));
    }

    #[test]
    fn test_unknown_body_fields_ignored() {
        let record = decode_json(
            br#"{"username":"amy","age":20,"unrelated":true}"#,
            &hello_schema(),
        )
        .unwrap();

        assert_eq!(record.len(), 2);
        assert!(!record.contains("unrelated"));
    }

    #[test]
    fn test_decode_is_deterministic() {
        let payload = br#"{"age":20,"username":"amy"}"#;
        let a = decode_json(payload, &hello_schema()).unwrap();
        let b = decode_json(payload, &hello_schema()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_record_json_round_trip() {
        let record = decode_json(br#"{"username":"amy","age":20}"#, &hello_schema()).unwrap();

        let encoded = serde_json::to_vec(&record.to_json()).unwrap();
        let back = decode_json(&encoded, &hello_schema()).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_oversized_payload_rejected() {
        let mut payload = Vec::with_capacity(MAX_BODY_SIZE + 16);
        payload.extend_from_slice(br#"{"username":""#);
        payload.resize(MAX_BODY_SIZE + 8, b'a');
        payload.extend_from_slice(br#"","age":20}"#);

        let err = decode_json(&payload, &hello_schema()).unwrap_err();
        assert!(matches!(err, BindError::Parse { .. }));
        assert!(err.to_string().contains("too large"));
    }

    #[test]
    fn test_raw_body_pass_through() {
        let ctx = make_ctx(r#"{"username":"amy","age":20}"#);
        let RawBody(bytes) = RawBody::from_request(&ctx).unwrap();

        assert_eq!(&*bytes, ctx.body().as_ref());
    }

    #[test]
    fn test_body_string_pass_through() {
        let ctx = make_ctx("hello");
        let BodyString(text) = BodyString::from_request(&ctx).unwrap();

        assert_eq!(text, "hello");
    }

    #[test]
    fn test_body_string_rejects_invalid_utf8() {
        let ctx = BindingContextBuilder::new()
            .method(Method::POST)
            .uri(Uri::from_static("/raw"))
            .body(vec![0xff, 0xfe])
            .build();

        let err = BodyString::from_request(&ctx).unwrap_err();
        assert!(matches!(err, BindError::Parse { .. }));
    }
}
