use thiserror::Error;

/// Errors surfaced while building or reconfiguring a character.
///
/// Frame-time operations never fail; they degrade visually instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BlobError {
    #[error("unknown spring channel `{0}`")]
    UnknownChannel(String),
    #[error("spring channel `{0}` is already registered")]
    DuplicateChannel(String),
    #[error("spring sequence for `{0}` has no steps")]
    EmptySequence(String),
    #[error("unknown geometry detail `{0}` (expected \"rough\" or \"smooth\")")]
    UnknownDetail(String),
    #[error("invalid config `{field}`: {reason}")]
    InvalidConfig { field: &'static str, reason: String },
}

pub type Result<T> = std::result::Result<T, BlobError>;

pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> BlobError {
    BlobError::InvalidConfig {
        field,
        reason: reason.into(),
    }
}
