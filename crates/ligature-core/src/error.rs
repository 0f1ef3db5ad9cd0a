//! Binding and resolution errors.
//!
//! All failures in this taxonomy are synchronous and request-scoped: none
//! are retried and none are fatal to the process. Each maps to a status
//! code and a stable error code; the transport layer owns the final
//! response policy.

use crate::record::FieldType;
use http::StatusCode;
use std::fmt;
use thiserror::Error;

/// Result type alias using [`BindError`].
pub type BindResult<T> = Result<T, BindError>;

/// Where a bound value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueSource {
    /// URL query string parameters.
    Query,
    /// URL-encoded form body parameters.
    Form,
    /// Structured request payload (JSON body).
    Body,
}

impl fmt::Display for ValueSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Query => write!(f, "query"),
            Self::Form => write!(f, "form"),
            Self::Body => write!(f, "body"),
        }
    }
}

/// Error produced while binding a request or resolving a response.
///
/// # Example
///
/// ```rust
/// use ligature_core::{BindError, ValueSource};
/// use http::StatusCode;
///
/// let err = BindError::missing(ValueSource::Query, "age");
/// assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
/// assert_eq!(err.error_code(), "MISSING_PARAMETER");
/// assert!(err.to_string().contains("age"));
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BindError {
    /// A required field had no value and no default.
    #[error("missing required {origin} parameter: {name}")]
    MissingParameter {
        /// Where the parameter was expected.
        origin: ValueSource,
        /// The declared field name.
        name: String,
    },

    /// Parameter text could not be coerced to the declared type.
    #[error("cannot coerce {origin} parameter '{name}' to {expected}: got '{value}'")]
    TypeCoercion {
        /// Where the parameter came from.
        origin: ValueSource,
        /// The declared field name.
        name: String,
        /// The declared type.
        expected: FieldType,
        /// The raw text that failed to coerce.
        value: String,
    },

    /// The payload text was not structurally valid (e.g. malformed JSON).
    #[error("malformed request payload: {detail}")]
    Parse {
        /// Parser diagnostic.
        detail: String,
    },

    /// The payload parsed, but a field did not match the schema.
    #[error("body does not match schema at '{name}': {detail}")]
    SchemaMismatch {
        /// The offending field name, or `$` for the payload root.
        name: String,
        /// What was expected versus found.
        detail: String,
    },

    /// A handler's declared intent contradicts what it returned.
    #[error("handler declared {declared} intent but returned {returned}")]
    IntentMismatch {
        /// The declared intent.
        declared: String,
        /// A description of the returned value.
        returned: String,
    },
}

impl BindError {
    /// Creates a missing-parameter error.
    #[must_use]
    pub fn missing(origin: ValueSource, name: impl Into<String>) -> Self {
        Self::MissingParameter {
            origin,
            name: name.into(),
        }
    }

    /// Creates a type-coercion error.
    #[must_use]
    pub fn coercion(
        origin: ValueSource,
        name: impl Into<String>,
        expected: FieldType,
        value: impl Into<String>,
    ) -> Self {
        Self::TypeCoercion {
            origin,
            name: name.into(),
            expected,
            value: value.into(),
        }
    }

    /// Creates a parse error from a parser diagnostic.
    #[must_use]
    pub fn parse(detail: impl Into<String>) -> Self {
        Self::Parse {
            detail: detail.into(),
        }
    }

    /// Creates a schema-mismatch error for a field.
    #[must_use]
    pub fn mismatch(name: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::SchemaMismatch {
            name: name.into(),
            detail: detail.into(),
        }
    }

    /// Creates an intent-mismatch error.
    #[must_use]
    pub fn intent(declared: impl Into<String>, returned: impl Into<String>) -> Self {
        Self::IntentMismatch {
            declared: declared.into(),
            returned: returned.into(),
        }
    }

    /// Returns the status code this error maps to.
    ///
    /// Client input problems are 4xx. `IntentMismatch` is handler
    /// misconfiguration, not a client fault, and maps to 500.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingParameter { .. } | Self::TypeCoercion { .. } | Self::Parse { .. } => {
                StatusCode::BAD_REQUEST
            }
            Self::SchemaMismatch { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::IntentMismatch { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns the stable error code for error envelopes.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MissingParameter { .. } => "MISSING_PARAMETER",
            Self::TypeCoercion { .. } => "TYPE_COERCION",
            Self::Parse { .. } => "MALFORMED_PAYLOAD",
            Self::SchemaMismatch { .. } => "SCHEMA_MISMATCH",
            Self::IntentMismatch { .. } => "INTENT_MISMATCH",
        }
    }
}
