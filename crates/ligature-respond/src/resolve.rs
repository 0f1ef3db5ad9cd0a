//! Response resolution.
//!
//! [`resolve`] takes a handler's declared [`HandlerIntent`] and its
//! [`HandlerOutput`] and produces a [`ResponseValue`]: either a finished
//! direct-body response, or a [`ViewReference`] for the external renderer.

use crate::model::Attributes;
use crate::view::{RenderError, ViewReference, ViewRenderer};
use bytes::Bytes;
use http::{header, Response, StatusCode};
use ligature_core::{BindError, BindResult, RequestRecord};
use std::fmt;

/// What a handler declares about its return value, fixed per handler
/// definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerIntent {
    /// The return value is serialized directly as the response payload.
    BodyProducing,
    /// The return value names a view to be rendered externally.
    ViewProducing,
}

impl fmt::Display for HandlerIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BodyProducing => write!(f, "body-producing"),
            Self::ViewProducing => write!(f, "view-producing"),
        }
    }
}

/// A handler's return value, as seen by the resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerOutput {
    /// Plain text. A body under body-producing intent; a logical view
    /// name under view-producing intent.
    Text(String),
    /// An arbitrary JSON value.
    JsonValue(serde_json::Value),
    /// A bound record, serialized back out as JSON.
    Record(RequestRecord),
    /// A prebuilt view-plus-attributes bundle.
    View(ViewReference),
    /// No return value.
    Empty,
}

impl HandlerOutput {
    /// Short description used in intent-mismatch diagnostics.
    #[must_use]
    pub fn describe(&self) -> &'static str {
        match self {
            Self::Text(_) => "plain text",
            Self::JsonValue(_) => "a JSON value",
            Self::Record(_) => "a bound record",
            Self::View(_) => "a view reference",
            Self::Empty => "nothing",
        }
    }
}

impl From<RequestRecord> for HandlerOutput {
    fn from(record: RequestRecord) -> Self {
        Self::Record(record)
    }
}

impl From<ViewReference> for HandlerOutput {
    fn from(view: ViewReference) -> Self {
        Self::View(view)
    }
}

/// The resolver's verdict for one request.
#[derive(Debug)]
pub enum ResponseValue {
    /// A finished response; no view lookup occurred.
    DirectBody(Response<Bytes>),
    /// A view reference to hand to the external renderer.
    ViewReference(ViewReference),
}

impl ResponseValue {
    /// Finishes either branch into a response, delegating view rendering
    /// to the given collaborator.
    ///
    /// # Errors
    ///
    /// Returns the renderer's [`RenderError`] for the view branch.
    pub fn into_response(self, renderer: &dyn ViewRenderer) -> Result<Response<Bytes>, RenderError> {
        match self {
            Self::DirectBody(response) => Ok(response),
            Self::ViewReference(view) => renderer.render(&view),
        }
    }

    /// Returns the view reference if this is the view branch.
    #[must_use]
    pub fn as_view(&self) -> Option<&ViewReference> {
        match self {
            Self::ViewReference(view) => Some(view),
            Self::DirectBody(_) => None,
        }
    }
}

fn text_body(text: String) -> Response<Bytes> {
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "text/plain; charset=utf-8")
        .body(Bytes::from(text))
        .expect("failed to build response")
}

fn json_body(value: &serde_json::Value) -> BindResult<Response<Bytes>> {
    let body = serde_json::to_vec(value)
        .map_err(|e| BindError::parse(format!("response serialization failed: {e}")))?;
    Ok(Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Bytes::from(body))
        .expect("failed to build response"))
}

fn empty_body() -> Response<Bytes> {
    Response::builder()
        .status(StatusCode::NO_CONTENT)
        .body(Bytes::new())
        .expect("failed to build response")
}

/// Resolves a handler's return value against its declared intent.
///
/// Body-producing intent serializes the output directly: text as-is with
/// a plain-text content type, JSON values and records as JSON. No view
/// lookup occurs. View-producing intent turns the output into a
/// [`ViewReference`] carrying the accumulated `attributes`; a bare text
/// return is the logical view name, an empty return derives the view name
/// from the request path (leading `/` stripped).
///
/// Mixing intents is caller misuse and fails with
/// [`IntentMismatch`](BindError::IntentMismatch); nothing is rendered.
///
/// # Example
///
/// ```rust
/// use ligature_respond::{resolve, Attributes, HandlerIntent, HandlerOutput};
///
/// let mut model = Attributes::new();
/// model.add("data", "hello!");
///
/// let resolved = resolve(
///     HandlerIntent::ViewProducing,
///     HandlerOutput::Text("response/hello".into()),
///     model,
///     "/response-view-v2",
/// )
/// .unwrap();
///
/// let view = resolved.as_view().unwrap();
/// assert_eq!(view.name(), "response/hello");
/// assert_eq!(view.attributes().get("data"), Some(&serde_json::json!("hello!")));
/// ```
pub fn resolve(
    intent: HandlerIntent,
    output: HandlerOutput,
    attributes: Attributes,
    request_path: &str,
) -> BindResult<ResponseValue> {
    match intent {
        HandlerIntent::BodyProducing => {
            let response = match output {
                HandlerOutput::Text(text) => text_body(text),
                HandlerOutput::JsonValue(value) => json_body(&value)?,
                HandlerOutput::Record(record) => json_body(&record.to_json())?,
                HandlerOutput::Empty => empty_body(),
                HandlerOutput::View(_) => {
                    return Err(BindError::intent(intent.to_string(), "a view reference"));
                }
            };
            tracing::debug!(intent = %intent, status = %response.status(), "resolved direct body");
            Ok(ResponseValue::DirectBody(response))
        }
        HandlerIntent::ViewProducing => {
            let view = match output {
                HandlerOutput::Text(name) => ViewReference::with_attributes(name, attributes),
                HandlerOutput::View(mut view) => {
                    view.absorb(&attributes);
                    view
                }
                HandlerOutput::Empty => {
                    let name = request_path.trim_start_matches('/');
                    ViewReference::with_attributes(name, attributes)
                }
                other @ (HandlerOutput::JsonValue(_) | HandlerOutput::Record(_)) => {
                    return Err(BindError::intent(intent.to_string(), other.describe()));
                }
            };
            tracing::debug!(intent = %intent, view = view.name(), "resolved view reference");
            Ok(ResponseValue::ViewReference(view))
        }
    }
}
