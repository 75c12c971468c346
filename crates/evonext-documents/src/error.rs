use evonext_types::IdentifierError;
use thiserror::Error;

/// Errors produced while assembling documents.
///
/// All variants except `NameResolution` are detected before any external
/// call is made, so they carry no side effects.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DocumentError {
    #[error("post content is empty")]
    EmptyContent,

    #[error("post content exceeds {max} characters (got {len})")]
    ContentTooLong { len: usize, max: usize },

    #[error("display name is empty")]
    EmptyDisplayName,

    #[error("invalid avatar spec: {reason}")]
    InvalidAvatarSpec { reason: String },

    #[error("invalid language code: {0:?}")]
    InvalidLanguage(String),

    #[error("malformed identifier: {0}")]
    Identifier(#[from] IdentifierError),

    #[error("name resolution failed: {reason}")]
    NameResolution { reason: String },

    #[error("document serialization failed: {0}")]
    Serialization(String),
}

pub type DocumentResult<T> = Result<T, DocumentError>;
