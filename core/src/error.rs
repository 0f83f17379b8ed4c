use paramval_types::{BaseType, TypeDesc};
use thiserror::Error;

/// Rejected inputs when building a `TypedValue` from caller data.
///
/// Retrieval never produces these; it falls back to defaults instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
    #[error("{nvalues} values of type {ty} do not fit in memory")]
    SizeOverflow { nvalues: usize, ty: TypeDesc },

    #[error("expected {expected} bytes of data, got {actual}")]
    DataLength { expected: usize, actual: usize },

    #[error("expected a multiple of {expected} components, got {actual}")]
    ComponentCount { expected: usize, actual: usize },

    #[error("type {expected} cannot hold values of base type {actual}")]
    TypeMismatch { expected: TypeDesc, actual: BaseType },
}
