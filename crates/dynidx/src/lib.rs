//! ## Crate layout
//! - `core`: entity models, attribute values, local and global index
//!   descriptors, the per-entity registry, the store boundary, and
//!   observability.
//! - `error`: the public error type callers match on.
//!
//! The `prelude` module carries what application code needs to declare
//! indexes and keep them in step with record saves and deletes.

pub use dynidx_core as core;

pub mod error;

pub use error::{Error, ErrorKind, ErrorOrigin};

/// Result alias for facade callers.
pub type Result<T> = std::result::Result<T, Error>;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

///
/// Prelude
///

pub mod prelude {
    pub use crate::core::{
        config::IndexConfig,
        index::{GlobalIndex, IndexOptions, IndexRef, IndexRegistry, LocalIndex},
        model::{AttributeName, EntityModel, IndexIdentity},
        source::{AttributeMap, AttributeSource as _, Document, ValueSelection},
        store::{MemoryStore, TableStore as _},
        value::Value,
    };
    pub use crate::{Error, ErrorKind};
}
