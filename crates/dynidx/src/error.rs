use derive_more::Display;
use dynidx_core::error::{
    ErrorClass, ErrorDetail, ErrorOrigin as CoreErrorOrigin, IndexError, InternalError,
};
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

///
/// Error
/// Public error type with a stable kind + origin taxonomy.
///

#[derive(Debug, Deserialize, Serialize, ThisError)]
#[error("{message}")]
pub struct Error {
    pub kind: ErrorKind,
    pub origin: ErrorOrigin,
    pub message: String,
}

impl Error {
    pub fn new(kind: ErrorKind, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            kind,
            origin,
            message: message.into(),
        }
    }

    #[must_use]
    pub const fn is_invalid_field(&self) -> bool {
        matches!(self.kind, ErrorKind::InvalidField)
    }
}

impl From<InternalError> for Error {
    fn from(err: InternalError) -> Self {
        let kind = match &err.detail {
            Some(ErrorDetail::Index(IndexError::InvalidField { .. })) => ErrorKind::InvalidField,
            Some(ErrorDetail::Index(
                IndexError::MissingHashKey { .. } | IndexError::RangeKeyConflict { .. },
            )) => ErrorKind::InvalidDeclaration,
            Some(ErrorDetail::Index(_)) => ErrorKind::InvalidRecord,
            _ => match err.class {
                ErrorClass::NotFound => ErrorKind::Store(StoreErrorKind::NotFound),
                ErrorClass::Unsupported => ErrorKind::Config,
                ErrorClass::Internal | ErrorClass::InvariantViolation => match err.origin {
                    CoreErrorOrigin::Store => ErrorKind::Store(StoreErrorKind::Unavailable),
                    CoreErrorOrigin::Config => ErrorKind::Config,
                    CoreErrorOrigin::Index => ErrorKind::Internal,
                },
            },
        };

        Self::new(kind, err.origin.into(), err.message)
    }
}

impl From<dynidx_core::config::ConfigError> for Error {
    fn from(err: dynidx_core::config::ConfigError) -> Self {
        InternalError::from(err).into()
    }
}

///
/// ErrorKind
/// Public error taxonomy for callers.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum ErrorKind {
    /// An index names an attribute the entity does not declare.
    InvalidField,

    /// An index declaration is malformed or conflicts with an earlier one.
    InvalidDeclaration,

    /// A record cannot be indexed (no primary id, non-numeric range value).
    InvalidRecord,

    /// Configuration could not be loaded or is out of range.
    Config,

    Store(StoreErrorKind),

    /// The caller cannot remediate this.
    Internal,
}

///
/// StoreErrorKind
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum StoreErrorKind {
    NotFound,
    Unavailable,
}

///
/// ErrorOrigin
/// Public origin taxonomy for callers.
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
pub enum ErrorOrigin {
    Config,
    Index,
    Store,
}

impl From<CoreErrorOrigin> for ErrorOrigin {
    fn from(origin: CoreErrorOrigin) -> Self {
        match origin {
            CoreErrorOrigin::Config => Self::Config,
            CoreErrorOrigin::Index => Self::Index,
            CoreErrorOrigin::Store => Self::Store,
        }
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use dynidx_core::error::StoreError;

    #[test]
    fn invalid_field_kind_is_preserved() {
        let err: Error = InternalError::from(IndexError::InvalidField {
            entity: "User".to_string(),
            field: "text".to_string(),
        })
        .into();

        assert!(err.is_invalid_field());
        assert_eq!(err.origin, ErrorOrigin::Index);
        assert!(err.message.contains("User.text"));
    }

    #[test]
    fn conflicting_declaration_maps_to_invalid_declaration() {
        let err: Error = InternalError::from(IndexError::RangeKeyConflict {
            table: "t".to_string(),
        })
        .into();

        assert_eq!(err.kind, ErrorKind::InvalidDeclaration);
    }

    #[test]
    fn record_failures_map_to_invalid_record() {
        let err: Error = InternalError::from(IndexError::NonNumericRange {
            table: "t".to_string(),
            field: "email".to_string(),
        })
        .into();

        assert_eq!(err.kind, ErrorKind::InvalidRecord);
    }

    #[test]
    fn store_failures_keep_their_origin() {
        let missing: Error = InternalError::from(StoreError::TableNotFound("t".into())).into();
        let backend: Error = InternalError::from(StoreError::Backend("timeout".into())).into();

        assert_eq!(missing.kind, ErrorKind::Store(StoreErrorKind::NotFound));
        assert_eq!(backend.kind, ErrorKind::Store(StoreErrorKind::Unavailable));
        assert_eq!(backend.origin, ErrorOrigin::Store);
    }

    #[test]
    fn config_failures_map_to_config_kind() {
        let err: Error = dynidx_core::config::IndexConfig::from_toml_str("read_capacity = 0")
            .expect_err("zero capacity")
            .into();

        assert_eq!(err.kind, ErrorKind::Config);
        assert_eq!(err.origin, ErrorOrigin::Config);
    }

    #[test]
    fn serializes_for_callers() {
        let err = Error::new(ErrorKind::InvalidField, ErrorOrigin::Index, "bad");
        let json = serde_json::to_value(&err).expect("serialize");

        assert_eq!(json["kind"], "InvalidField");
        assert_eq!(json["origin"], "Index");
    }
}
