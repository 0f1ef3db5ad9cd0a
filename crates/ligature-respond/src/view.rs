//! View references and the renderer seam.
//!
//! A [`ViewReference`] names a logical view and carries the attributes it
//! should be rendered with. Rendering itself belongs to an external
//! collaborator behind the [`ViewRenderer`] trait; this crate only decides
//! *that* a view should render, never *how*.

use crate::model::Attributes;
use bytes::Bytes;
use http::{Response, StatusCode};
use thiserror::Error;

/// A logical view name plus the attribute mapping to render it with.
///
/// # Example
///
/// ```rust
/// use ligature_respond::ViewReference;
///
/// let view = ViewReference::new("response/hello").with_attribute("data", "hello!");
///
/// assert_eq!(view.name(), "response/hello");
/// assert_eq!(view.attributes().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewReference {
    name: String,
    attributes: Attributes,
}

impl ViewReference {
    /// Creates a view reference with no attributes.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Attributes::new(),
        }
    }

    /// Creates a view reference with a prebuilt attribute set.
    #[must_use]
    pub fn with_attributes(name: impl Into<String>, attributes: Attributes) -> Self {
        Self {
            name: name.into(),
            attributes,
        }
    }

    /// Adds one attribute.
    #[must_use]
    pub fn with_attribute(
        mut self,
        name: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.attributes.add(name, value);
        self
    }

    /// Returns the logical view name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the attributes.
    #[must_use]
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Folds accumulated model attributes into this reference; the
    /// reference's own attributes win on name clashes.
    pub(crate) fn absorb(&mut self, accumulated: &Attributes) {
        self.attributes.merge_missing(accumulated);
    }
}

/// External view-rendering collaborator.
///
/// Implementations receive the logical view name and the attribute
/// mapping; templating behavior is entirely theirs.
pub trait ViewRenderer {
    /// Renders a view reference into a finished response.
    ///
    /// # Errors
    ///
    /// Returns a [`RenderError`] if the view is unknown or rendering
    /// fails.
    fn render(&self, view: &ViewReference) -> Result<Response<Bytes>, RenderError>;
}

/// Failure reported by a [`ViewRenderer`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("failed to render view '{view}': {detail}")]
pub struct RenderError {
    view: String,
    detail: String,
}

impl RenderError {
    /// Creates a render error for a view.
    #[must_use]
    pub fn new(view: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            view: view.into(),
            detail: detail.into(),
        }
    }

    /// Returns the logical view name that failed.
    #[must_use]
    pub fn view(&self) -> &str {
        &self.view
    }

    /// Returns the status code this error maps to.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}
