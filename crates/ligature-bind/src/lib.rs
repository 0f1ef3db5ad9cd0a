//! # Ligature Bind
//!
//! Request binding for the Ligature toolkit: pulling named values out of
//! query/form parameters and decoding structured payloads, driven by an
//! explicit [`BindingSchema`](ligature_core::BindingSchema).
//!
//! ## Two binding styles
//!
//! **Schema-driven** binding takes a [`BindingSchema`] value and produces a
//! [`RequestRecord`](ligature_core::RequestRecord):
//!
//! ```rust
//! use ligature_bind::{bind_params, RawParams};
//! use ligature_core::{BindingSchema, FieldType};
//!
//! let schema = BindingSchema::builder()
//!     .required("username", FieldType::Str)
//!     .required("age", FieldType::Int)
//!     .build();
//!
//! let raw = RawParams::parse("username=amy&age=20").unwrap();
//! let record = bind_params(&raw, &schema).unwrap();
//!
//! assert_eq!(record.get_str("username"), Some("amy"));
//! assert_eq!(record.get_int("age"), Some(20));
//! ```
//!
//! **Typed** extraction deserializes straight into a caller-owned struct
//! via [`FromRequest`] wrappers ([`Query`], [`Form`], [`Json`]), the
//! declarative counterpart for handlers that want their own types.
//!
//! Binding never logs and has no side effects: it either produces a full
//! record or fails with a [`BindError`](ligature_core::BindError) before
//! handler logic runs.

#![doc(html_root_url = "https://docs.rs/ligature-bind/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod body;
mod context;
mod from_request;
mod params;

pub use body::{decode_json, BodyString, RawBody};
pub use context::{BindingContext, BindingContextBuilder};
pub use from_request::{Form, FromRequest, Json, Query, RawQuery};
pub use params::{bind_form, bind_params, bind_query, RawParams};
