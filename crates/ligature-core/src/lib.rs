//! # Ligature Core
//!
//! Core types for the Ligature request-binding toolkit.
//!
//! This crate provides the foundational values shared by the binding and
//! response-resolution crates:
//!
//! - [`RequestRecord`] - an ordered, typed field map produced by binding
//! - [`BindingSchema`] - the first-class description of what to bind
//! - [`BindError`] - the binding/resolution error taxonomy
//!
//! Binding is always driven by an explicit [`BindingSchema`] value rather
//! than reflection or annotations: the rule that maps raw transport input
//! to a [`RequestRecord`] is data that can be constructed, inspected, and
//! tested on its own.

#![doc(html_root_url = "https://docs.rs/ligature-core/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod record;
mod schema;

pub use error::{BindError, BindResult, ValueSource};
pub use record::{FieldType, FieldValue, RequestRecord};
pub use schema::{BindingSchema, BindingSchemaBuilder, FieldPolicy, FieldSpec};
