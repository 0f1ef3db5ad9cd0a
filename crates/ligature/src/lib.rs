//! # Ligature
//!
//! **Request binding and response resolution for HTTP handlers**
//!
//! Ligature sits between a transport (server, router) and handler logic.
//! On the way in it binds raw request input -- query parameters, form
//! bodies, JSON payloads -- into typed records or caller-owned structs.
//! On the way out it resolves a handler's return value into either a
//! direct body payload or a logical view reference for an external
//! renderer, according to the intent the handler declared.
//!
//! ## Request lifecycle
//!
//! ```text
//! Received → Bound (ligature-bind) → Handled → Resolved (ligature-respond) → Sent
//! ```
//!
//! Every stage is per-request and stateless; binding either fully
//! succeeds or fails before handler logic runs.
//!
//! ## Quick start
//!
//! ```rust
//! use ligature::prelude::*;
//!
//! let schema = BindingSchema::builder()
//!     .required("username", FieldType::Str)
//!     .with_default("age", FieldType::Int, "-1")
//!     .build();
//!
//! let raw = RawParams::parse("username=amy&age=20").unwrap();
//! let record = bind_params(&raw, &schema).unwrap();
//!
//! let resolved = resolve(
//!     HandlerIntent::BodyProducing,
//!     HandlerOutput::Record(record),
//!     Attributes::new(),
//!     "/request-param-v2",
//! )
//! .unwrap();
//! assert!(resolved.as_view().is_none());
//! ```

#![doc(html_root_url = "https://docs.rs/ligature/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use ligature_core as core;

// Re-export binding types
pub use ligature_bind as bind;

// Re-export response resolution types
pub use ligature_respond as respond;

/// Prelude module for convenient imports.
///
/// # Example
///
/// ```rust
/// use ligature::prelude::*;
///
/// let schema = BindingSchema::builder()
///     .required("username", FieldType::Str)
///     .build();
/// assert_eq!(schema.len(), 1);
/// ```
pub mod prelude {
    pub use ligature_core::{
        BindError, BindResult, BindingSchema, FieldPolicy, FieldSpec, FieldType, FieldValue,
        RequestRecord, ValueSource,
    };

    // Binding: schema-driven and typed extraction
    pub use ligature_bind::{
        bind_form, bind_params, bind_query, decode_json, BindingContext, BindingContextBuilder,
        BodyString, Form, FromRequest, Json, Query, RawBody, RawParams, RawQuery,
    };

    // Response resolution
    pub use ligature_respond::{
        error_response, resolve, Attributes, HandlerIntent, HandlerOutput, RenderError,
        ResponseValue, ViewReference, ViewRenderer,
    };
}
