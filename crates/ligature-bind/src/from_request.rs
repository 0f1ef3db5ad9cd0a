//! Typed extraction.
//!
//! The [`FromRequest`] trait and its wrappers bind whole caller-owned
//! structs from a request, the declarative counterpart to schema-driven
//! binding. Where a [`BindingSchema`](ligature_core::BindingSchema)
//! carries the binding rule as a value, these extractors carry it in the
//! target type's serde definition.

use crate::body::MAX_BODY_SIZE;
use crate::context::BindingContext;
use ligature_core::{BindError, BindResult};
use serde::de::DeserializeOwned;
use std::ops::Deref;

/// Trait for types that can be extracted from a request.
///
/// # Implementing `FromRequest`
///
/// ```rust
/// use ligature_bind::{BindingContext, FromRequest};
/// use ligature_core::{BindError, BindResult};
///
/// struct ApiVersion(u32);
///
/// impl FromRequest for ApiVersion {
///     fn from_request(ctx: &BindingContext) -> BindResult<Self> {
///         let raw = ctx
///             .header("x-api-version")
///             .ok_or_else(|| BindError::parse("missing x-api-version header"))?;
///         let version = raw
///             .parse()
///             .map_err(|_| BindError::parse("x-api-version is not an integer"))?;
///         Ok(ApiVersion(version))
///     }
/// }
/// ```
pub trait FromRequest: Sized {
    /// Extracts this type from the binding context.
    ///
    /// # Errors
    ///
    /// Returns a [`BindError`] if extraction fails; the request fails
    /// before handler logic runs.
    fn from_request(ctx: &BindingContext) -> BindResult<Self>;
}

// Option<T> makes extraction optional (None if it fails).
impl<T: FromRequest> FromRequest for Option<T> {
    fn from_request(ctx: &BindingContext) -> BindResult<Self> {
        Ok(T::from_request(ctx).ok())
    }
}

// Result<T, BindError> allows handling extraction errors inline.
impl<T: FromRequest> FromRequest for Result<T, BindError> {
    fn from_request(ctx: &BindingContext) -> BindResult<Self> {
        Ok(T::from_request(ctx))
    }
}

macro_rules! impl_from_request_for_tuple {
    ($($T:ident),*) => {
        impl<$($T: FromRequest),*> FromRequest for ($($T,)*) {
            fn from_request(ctx: &BindingContext) -> BindResult<Self> {
                Ok(($($T::from_request(ctx)?,)*))
            }
        }
    };
}

impl_from_request_for_tuple!(T1);
impl_from_request_for_tuple!(T1, T2);
impl_from_request_for_tuple!(T1, T2, T3);
impl_from_request_for_tuple!(T1, T2, T3, T4);

impl FromRequest for () {
    fn from_request(_ctx: &BindingContext) -> BindResult<Self> {
        Ok(())
    }
}

/// Extractor for query string parameters into a typed struct.
///
/// # Example
///
/// ```rust
/// use ligature_bind::{BindingContext, FromRequest, Query};
/// use http::{HeaderMap, Method, Uri};
/// use bytes::Bytes;
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct HelloData {
///     username: String,
///     age: i64,
/// }
///
/// let ctx = BindingContext::new(
///     Method::GET,
///     Uri::from_static("/model-attribute-v1?username=amy&age=20"),
///     HeaderMap::new(),
///     Bytes::new(),
/// );
///
/// let Query(data) = Query::<HelloData>::from_request(&ctx).unwrap();
/// assert_eq!(data.username, "amy");
/// assert_eq!(data.age, 20);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query<T>(pub T);

impl<T> Query<T> {
    /// Consumes the Query and returns the inner value.
    #[must_use]
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for Query<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T: DeserializeOwned> FromRequest for Query<T> {
    fn from_request(ctx: &BindingContext) -> BindResult<Self> {
        let query_string = ctx.query_string().unwrap_or("");
        let value: T = serde_urlencoded::from_str(query_string)
            .map_err(|e| BindError::parse(format!("query binding failed: {e}")))?;
        Ok(Query(value))
    }
}

/// Raw query string pass-through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawQuery(pub Option<String>);

impl FromRequest for RawQuery {
    fn from_request(ctx: &BindingContext) -> BindResult<Self> {
        Ok(RawQuery(ctx.query_string().map(String::from)))
    }
}

/// Extractor for urlencoded form bodies into a typed struct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Form<T>(pub T);

impl<T> Form<T> {
    /// Consumes the Form and returns the inner value.
    #[must_use]
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for Form<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T: DeserializeOwned> FromRequest for Form<T> {
    fn from_request(ctx: &BindingContext) -> BindResult<Self> {
        let body = ctx.body();
        if body.len() > MAX_BODY_SIZE {
            return Err(BindError::parse(format!(
                "payload too large: max {MAX_BODY_SIZE} bytes, got {} bytes",
                body.len()
            )));
        }
        let text = std::str::from_utf8(body)
            .map_err(|e| BindError::parse(format!("form body is not valid UTF-8: {e}")))?;
        let value: T = serde_urlencoded::from_str(text)
            .map_err(|e| BindError::parse(format!("form binding failed: {e}")))?;
        Ok(Form(value))
    }
}

/// Extractor for JSON bodies into a typed struct.
///
/// An empty body is an error; use `Option<Json<T>>` for endpoints where
/// the payload may legitimately be absent.
///
/// # Example
///
/// ```rust
/// use ligature_bind::{BindingContext, FromRequest, Json};
/// use http::{HeaderMap, Method, Uri};
/// use bytes::Bytes;
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct HelloData {
///     username: String,
///     age: i64,
/// }
///
/// let ctx = BindingContext::new(
///     Method::POST,
///     Uri::from_static("/request-body-json-v3"),
///     HeaderMap::new(),
///     Bytes::from_static(br#"{"username":"amy","age":20}"#),
/// );
///
/// let Json(data) = Json::<HelloData>::from_request(&ctx).unwrap();
/// assert_eq!(data.username, "amy");
/// assert_eq!(data.age, 20);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Json<T>(pub T);

impl<T> Json<T> {
    /// Consumes the Json and returns the inner value.
    #[must_use]
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for Json<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T: DeserializeOwned> FromRequest for Json<T> {
    fn from_request(ctx: &BindingContext) -> BindResult<Self> {
        let body = ctx.body();
        if body.len() > MAX_BODY_SIZE {
            return Err(BindError::parse(format!(
                "payload too large: max {MAX_BODY_SIZE} bytes, got {} bytes",
                body.len()
            )));
        }
        if body.is_empty() {
            return Err(BindError::parse("empty request body"));
        }
        let value: T = serde_json::from_slice(body)
            .map_err(|e| BindError::parse(format!("json binding failed: {e}")))?;
        Ok(Json(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::BindingContextBuilder;
    use http::{Method, Uri};
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct HelloData {
        username: String,
        age: i64,
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct OptionalData {
        #[serde(default)]
        username: Option<String>,
    }

    fn get_ctx(uri: &'static str) -> BindingContext {
        BindingContextBuilder::new()
            .method(Method::GET)
            .uri(Uri::from_static(uri))
            .build()
    }

    fn post_ctx(body: &[u8]) -> BindingContext {
        BindingContextBuilder::new()
            .method(Method::POST)
            .uri(Uri::from_static("/request-body"))
            .body(body.to_vec())
            .build()
    }

    #[test]
    fn test_query_binds_struct() {
        let ctx = get_ctx("/model-attribute-v1?username=amy&age=20");
        let Query(data) = Query::<HelloData>::from_request(&ctx).unwrap();

        assert_eq!(data.username, "amy");
        assert_eq!(data.age, 20);
    }

    #[test]
    fn test_query_missing_required_field_fails() {
        let ctx = get_ctx("/model-attribute-v1?username=amy");
        let result = Query::<HelloData>::from_request(&ctx);

        assert!(result.is_err());
    }

    #[test]
    fn test_query_optional_field_absent() {
        let ctx = get_ctx("/model-attribute-v1");
        let Query(data) = Query::<OptionalData>::from_request(&ctx).unwrap();

        assert_eq!(data.username, None);
    }

    #[test]
    fn test_raw_query_pass_through() {
        let ctx = get_ctx("/request-param-map?username=amy&age=20");
        let RawQuery(raw) = RawQuery::from_request(&ctx).unwrap();

        assert_eq!(raw, Some("username=amy&age=20".to_string()));
    }

    #[test]
    fn test_raw_query_absent() {
        let ctx = get_ctx("/request-param-map");
        let RawQuery(raw) = RawQuery::from_request(&ctx).unwrap();

        assert_eq!(raw, None);
    }

    #[test]
    fn test_form_binds_struct() {
        let ctx = post_ctx(b"username=amy&age=20");
        let Form(data) = Form::<HelloData>::from_request(&ctx).unwrap();

        assert_eq!(data.username, "amy");
        assert_eq!(data.age, 20);
    }

    #[test]
    fn test_json_binds_struct() {
        let ctx = post_ctx(br#"{"username":"amy","age":20}"#);
        let Json(data) = Json::<HelloData>::from_request(&ctx).unwrap();

        assert_eq!(data.username, "amy");
        assert_eq!(data.age, 20);
    }

    #[test]
    fn test_json_empty_body_fails() {
        let ctx = post_ctx(b"");
        let err = Json::<HelloData>::from_request(&ctx).unwrap_err();

        assert!(matches!(err, BindError::Parse { .. }));
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn test_json_malformed_body_fails() {
        let ctx = post_ctx(b"{not json");
        let result = Json::<HelloData>::from_request(&ctx);

        assert!(result.is_err());
    }

    #[test]
    fn test_option_json_none_on_empty_body() {
        let ctx = post_ctx(b"");
        let result = Option::<Json<HelloData>>::from_request(&ctx).unwrap();

        assert!(result.is_none());
    }

    #[test]
    fn test_tuple_extraction() {
        let ctx = BindingContextBuilder::new()
            .method(Method::POST)
            .uri(Uri::from_static("/combined?username=amy&age=20"))
            .body(&br#"{"username":"amy","age":20}"#[..])
            .build();

        let (Query(q), Json(j)) =
            <(Query<HelloData>, Json<HelloData>)>::from_request(&ctx).unwrap();
        assert_eq!(q, j);
    }

    #[test]
    fn test_result_extraction_captures_error() {
        let ctx = post_ctx(b"");
        let inner = <Result<Json<HelloData>, BindError>>::from_request(&ctx).unwrap();

        assert!(inner.is_err());
    }

    #[test]
    fn test_deref_and_into_inner() {
        let ctx = get_ctx("/model-attribute-v1?username=amy&age=20");
        let query: Query<HelloData> = Query::from_request(&ctx).unwrap();

        assert_eq!(query.username, "amy");
        assert_eq!(query.into_inner().age, 20);
    }
}
