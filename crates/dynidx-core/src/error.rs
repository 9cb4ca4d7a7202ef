use std::fmt;
use thiserror::Error as ThisError;

///
/// InternalError
///
/// Structured runtime error with a stable internal classification.
/// Typed errors from each module convert into this at the crate boundary.
///

#[derive(Debug, ThisError)]
#[error("{message}")]
pub struct InternalError {
    pub class: ErrorClass,
    pub origin: ErrorOrigin,
    pub message: String,

    /// Optional structured error detail.
    /// The variant (if present) must correspond to `origin`.
    pub detail: Option<ErrorDetail>,
}

impl InternalError {
    /// Construct an InternalError without structured detail.
    pub fn new(class: ErrorClass, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            class,
            origin,
            message: message.into(),
            detail: None,
        }
    }

    #[must_use]
    pub const fn is_invalid_field(&self) -> bool {
        matches!(
            self.detail,
            Some(ErrorDetail::Index(IndexError::InvalidField { .. }))
        )
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self.class, ErrorClass::NotFound)
    }

    #[must_use]
    pub fn display_with_class(&self) -> String {
        format!("{}:{}: {}", self.origin, self.class, self.message)
    }
}

///
/// ErrorDetail
///
/// Structured, origin-specific error detail carried by [`InternalError`].
///

#[derive(Debug, ThisError)]
pub enum ErrorDetail {
    #[error("{0}")]
    Index(IndexError),

    #[error("{0}")]
    Store(StoreError),
}

///
/// IndexError
///
/// Failures raised while declaring an index or deriving its key values.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum IndexError {
    #[error("a key specified for an index is not a field: {entity}.{field}")]
    InvalidField { entity: String, field: String },

    #[error("index on {entity} has no hash attribute")]
    MissingHashKey { entity: String },

    #[error("index table '{table}' is already declared with a different range key")]
    RangeKeyConflict { table: String },

    #[error("record of {entity} has no value for primary key '{field}'")]
    MissingPrimaryKey { entity: String, field: String },

    #[error("range value for '{field}' in index table '{table}' must be numeric")]
    NonNumericRange { table: String, field: String },
}

impl IndexError {
    pub(crate) const fn class(&self) -> ErrorClass {
        match self {
            Self::InvalidField { .. }
            | Self::MissingHashKey { .. }
            | Self::RangeKeyConflict { .. } => ErrorClass::Unsupported,
            Self::MissingPrimaryKey { .. } | Self::NonNumericRange { .. } => {
                ErrorClass::InvariantViolation
            }
        }
    }
}

impl From<IndexError> for InternalError {
    fn from(err: IndexError) -> Self {
        Self {
            class: err.class(),
            origin: ErrorOrigin::Index,
            message: err.to_string(),
            detail: Some(ErrorDetail::Index(err)),
        }
    }
}

///
/// StoreError
///
/// Failures surfaced by a [`crate::store::TableStore`] implementation.
/// These are opaque to index maintenance and are propagated unchanged.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum StoreError {
    #[error("table '{0}' not found")]
    TableNotFound(String),

    #[error("table '{table}' has no range key but a range value was supplied")]
    UnexpectedRange { table: String },

    #[error("store backend failure: {0}")]
    Backend(String),
}

impl StoreError {
    pub(crate) const fn class(&self) -> ErrorClass {
        match self {
            Self::TableNotFound(_) => ErrorClass::NotFound,
            Self::UnexpectedRange { .. } => ErrorClass::InvariantViolation,
            Self::Backend(_) => ErrorClass::Internal,
        }
    }
}

impl From<StoreError> for InternalError {
    fn from(err: StoreError) -> Self {
        Self {
            class: err.class(),
            origin: ErrorOrigin::Store,
            message: err.to_string(),
            detail: Some(ErrorDetail::Store(err)),
        }
    }
}

///
/// ErrorClass
/// Internal error taxonomy for runtime classification.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorClass {
    NotFound,
    Internal,
    Unsupported,
    InvariantViolation,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::NotFound => "not_found",
            Self::Internal => "internal",
            Self::Unsupported => "unsupported",
            Self::InvariantViolation => "invariant_violation",
        };
        write!(f, "{label}")
    }
}

///
/// ErrorOrigin
/// Internal origin taxonomy for runtime classification.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorOrigin {
    Config,
    Index,
    Store,
}

impl fmt::Display for ErrorOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Config => "config",
            Self::Index => "index",
            Self::Store => "store",
        };
        write!(f, "{label}")
    }
}
