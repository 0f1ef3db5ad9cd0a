//! # Ligature Respond
//!
//! Response resolution for the Ligature toolkit: deciding whether a
//! handler's return value is a raw body payload to serialize directly or
//! a logical view name to hand to an external view renderer.
//!
//! Every handler declares a [`HandlerIntent`] up front. The two intents
//! are mutually exclusive: a body-producing handler that returns a view
//! reference (or the reverse) fails fast with
//! [`IntentMismatch`](ligature_core::BindError::IntentMismatch) instead
//! of silently rendering the wrong thing.
//!
//! ```rust
//! use ligature_respond::{resolve, Attributes, HandlerIntent, HandlerOutput, ResponseValue};
//!
//! let resolved = resolve(
//!     HandlerIntent::BodyProducing,
//!     HandlerOutput::Text("ok".into()),
//!     Attributes::new(),
//!     "/request-param-v2",
//! )
//! .unwrap();
//!
//! match resolved {
//!     ResponseValue::DirectBody(response) => {
//!         assert_eq!(response.status(), http::StatusCode::OK);
//!     }
//!     ResponseValue::ViewReference(_) => unreachable!("body-producing intent"),
//! }
//! ```

#![doc(html_root_url = "https://docs.rs/ligature-respond/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod envelope;
mod model;
mod resolve;
mod view;

pub use envelope::error_response;
pub use model::Attributes;
pub use resolve::{resolve, HandlerIntent, HandlerOutput, ResponseValue};
pub use view::{RenderError, ViewReference, ViewRenderer};
