use thiserror::Error;

/// Errors reported by the external platform collaborators.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlatformError {
    #[error("query failed: {reason}")]
    Query { reason: String },

    #[error("transport failed: {reason}")]
    Transport { reason: String },

    /// The submitted nonce was already spent. Fatal for the attempt; the
    /// caller must restart the full preparation sequence.
    #[error("identity nonce conflict")]
    NonceConflict,

    #[error("submission rejected: {reason}")]
    Rejected { reason: String },

    #[error("serialization failed: {reason}")]
    Serialization { reason: String },
}

pub type PlatformResult<T> = Result<T, PlatformError>;
