use thiserror::Error;

/// Rejected annotation edits. Each one is a user-visible warning; state is
/// left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnnotationError {
    #[error("index {0} is already in use")]
    IndexConflict(usize),

    #[error("index must be greater than 0 (got {0})")]
    InvalidIndex(i64),

    #[error("no point with index {0}")]
    UnknownIndex(usize),
}
