//! Parameter extraction.
//!
//! [`RawParams`] is the raw multi-valued name → value mapping as supplied
//! by the transport layer (query string or urlencoded form body), and the
//! pass-through mode for callers that want every value under one key.
//! [`bind_params`] coerces it against a [`BindingSchema`] into a typed
//! [`RequestRecord`].

use crate::body::MAX_BODY_SIZE;
use crate::context::BindingContext;
use ligature_core::{
    BindError, BindResult, BindingSchema, FieldPolicy, FieldType, FieldValue, RequestRecord,
    ValueSource,
};

/// Raw multi-valued parameter mapping, in arrival order.
///
/// Lookup by exact, case-sensitive name. [`first`](Self::first) returns
/// the first value under a name (what schema binding coerces);
/// [`get_all`](Self::get_all) returns every value, for keys that appear
/// more than once (`id=1&id=2`).
///
/// # Example
///
/// ```rust
/// use ligature_bind::RawParams;
///
/// let raw = RawParams::parse("id=1&name=amy&id=2").unwrap();
///
/// assert_eq!(raw.first("id"), Some("1"));
/// assert_eq!(raw.get_all("id"), vec!["1", "2"]);
/// assert_eq!(raw.first("missing"), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawParams {
    inner: Vec<(String, String)>,
}

impl RawParams {
    /// Creates an empty parameter set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses urlencoded text (a query string or form body) into a raw
    /// parameter mapping, percent-decoding names and values.
    pub fn parse(text: &str) -> BindResult<Self> {
        let inner: Vec<(String, String)> = serde_urlencoded::from_str(text)
            .map_err(|e| BindError::parse(format!("invalid urlencoded text: {e}")))?;
        Ok(Self { inner })
    }

    /// Adds a parameter.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.inner.push((name.into(), value.into()));
    }

    /// Returns the first value under a name.
    #[must_use]
    pub fn first(&self, name: &str) -> Option<&str> {
        self.inner
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Returns every value under a name, in arrival order.
    #[must_use]
    pub fn get_all(&self, name: &str) -> Vec<&str> {
        self.inner
            .iter()
            .filter(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    /// Returns true if there are no parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Returns the number of name/value pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Iterates all pairs in arrival order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.inner.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }
}

impl FromIterator<(String, String)> for RawParams {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            inner: iter.into_iter().collect(),
        }
    }
}

/// Coerces parameter text to the declared field type.
pub(crate) fn coerce(
    source: ValueSource,
    name: &str,
    ty: FieldType,
    text: &str,
) -> BindResult<FieldValue> {
    match ty {
        FieldType::Str => Ok(FieldValue::Str(text.to_string())),
        FieldType::Int => text
            .parse::<i64>()
            .map(FieldValue::Int)
            .map_err(|_| BindError::coercion(source, name, ty, text)),
    }
}

fn bind_with_source(
    raw: &RawParams,
    schema: &BindingSchema,
    source: ValueSource,
) -> BindResult<RequestRecord> {
    let mut record = RequestRecord::new();
    for spec in schema.iter() {
        // An empty-string value is present; the default never replaces it.
        let value = match (raw.first(spec.name()), spec.policy()) {
            (Some(text), _) => coerce(source, spec.name(), spec.field_type(), text)?,
            (None, FieldPolicy::Default(default)) => {
                coerce(source, spec.name(), spec.field_type(), default)?
            }
            (None, FieldPolicy::Required) => {
                return Err(BindError::missing(source, spec.name()));
            }
        };
        record.insert(spec.name(), value);
    }
    Ok(record)
}

/// Binds raw parameters against a schema, producing a typed record.
///
/// For each declared field, in declaration order: a present value is
/// coerced to the declared type (non-numeric text for an integer field is
/// a [`TypeCoercion`](BindError::TypeCoercion) failure); an absent field
/// falls back to its default, or fails with
/// [`MissingParameter`](BindError::MissingParameter) if required.
/// Raw parameters with no declared counterpart are ignored.
///
/// # Example
///
/// ```rust
/// use ligature_bind::{bind_params, RawParams};
/// use ligature_core::{BindingSchema, FieldType};
///
/// let schema = BindingSchema::builder()
///     .with_default("username", FieldType::Str, "guest")
///     .with_default("age", FieldType::Int, "-1")
///     .build();
///
/// let record = bind_params(&RawParams::new(), &schema).unwrap();
/// assert_eq!(record.get_str("username"), Some("guest"));
/// assert_eq!(record.get_int("age"), Some(-1));
/// ```
pub fn bind_params(raw: &RawParams, schema: &BindingSchema) -> BindResult<RequestRecord> {
    bind_with_source(raw, schema, ValueSource::Query)
}

/// Binds the request's query string against a schema.
pub fn bind_query(ctx: &BindingContext, schema: &BindingSchema) -> BindResult<RequestRecord> {
    let raw = RawParams::parse(ctx.query_string().unwrap_or(""))?;
    bind_with_source(&raw, schema, ValueSource::Query)
}

/// Binds a urlencoded form body against a schema.
///
/// The body is decoded eagerly as UTF-8 text; oversized payloads are
/// rejected before decoding. Errors carry [`ValueSource::Form`].
pub fn bind_form(ctx: &BindingContext, schema: &BindingSchema) -> BindResult<RequestRecord> {
    let body = ctx.body();
    if body.len() > MAX_BODY_SIZE {
        return Err(BindError::parse(format!(
            "payload too large: max {MAX_BODY_SIZE} bytes, got {} bytes",
            body.len()
        )));
    }
    let text = std::str::from_utf8(body)
        .map_err(|e| BindError::parse(format!("form body is not valid UTF-8: {e}")))?;
    let raw = RawParams::parse(text)?;
    bind_with_source(&raw, schema, ValueSource::Form)
}
