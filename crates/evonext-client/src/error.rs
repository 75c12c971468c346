use evonext_documents::DocumentError;
use evonext_platform::PlatformError;
use evonext_types::{IdentifierError, IdentityId};
use thiserror::Error;

/// Errors surfaced to callers of the client facade.
///
/// Each variant is terminal for the current preparation; the caller decides
/// whether to restart the full sequence.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("malformed identifier: {0}")]
    MalformedIdentifier(#[from] IdentifierError),

    #[error(transparent)]
    Document(#[from] DocumentError),

    /// The gateway's nonce answer could not be interpreted. Never defaulted
    /// to zero.
    #[error("invalid nonce response: {got}")]
    InvalidNonceResponse { got: String },

    /// No unexpired signing key for the identity. The session has timed out;
    /// the caller must route the user to re-authentication.
    #[error("signing key unavailable for {identity}")]
    KeyUnavailable { identity: IdentityId },

    #[error("signing failed: {reason}")]
    SigningFailed { reason: String },

    #[error("invalid contract definition: {reason}")]
    InvalidContractDefinition { reason: String },

    #[error(transparent)]
    Platform(#[from] PlatformError),
}

impl ClientError {
    /// Whether the caller should send the user back through authentication
    /// instead of showing a generic failure.
    pub fn requires_reauthentication(&self) -> bool {
        matches!(self, ClientError::KeyUnavailable { .. })
    }

    /// Whether this is the submission layer's nonce conflict, surfaced
    /// unchanged.
    pub fn is_nonce_conflict(&self) -> bool {
        matches!(self, ClientError::Platform(PlatformError::NonceConflict))
    }
}

pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_unavailable_routes_to_reauthentication() {
        let err = ClientError::KeyUnavailable {
            identity: IdentityId::from_bytes([1; 32]),
        };
        assert!(err.requires_reauthentication());
        assert!(!err.is_nonce_conflict());
    }

    #[test]
    fn nonce_conflict_passes_through() {
        let err = ClientError::from(PlatformError::NonceConflict);
        assert!(err.is_nonce_conflict());
        assert!(!err.requires_reauthentication());
    }
}
