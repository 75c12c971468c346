use async_trait::async_trait;
use evonext_types::{ContractId, DocumentId, IdentityId};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::PlatformResult;
use crate::nonce::RawNonce;
use crate::transition::SignedRequest;

/// Read-side platform collaborator.
///
/// Each method is a single round-trip to the gateway and may take
/// user-perceptible network time.
#[async_trait]
pub trait PlatformQuery: Send + Sync {
    /// The identity's current on-chain nonce, as the gateway reports it.
    async fn identity_nonce(&self, identity: &IdentityId) -> PlatformResult<RawNonce>;

    /// Fetch a document, or `None` when it does not exist.
    async fn get_document(
        &self,
        contract: &ContractId,
        document_type: &str,
        document_id: &DocumentId,
    ) -> PlatformResult<Option<Value>>;

    /// Resolve a normalized name label to the identity registered under it.
    async fn resolve_name(&self, label: &str) -> PlatformResult<Option<IdentityId>>;
}

/// Write-side platform collaborator: accepts a signed request and submits
/// it. A spent nonce surfaces as [`PlatformError::NonceConflict`],
/// unchanged.
///
/// [`PlatformError::NonceConflict`]: crate::error::PlatformError::NonceConflict
#[async_trait]
pub trait SubmissionClient: Send + Sync {
    async fn broadcast(&self, request: &SignedRequest) -> PlatformResult<SubmissionReceipt>;
}

/// Acknowledgement of a broadcast transition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionReceipt {
    /// Hash of the canonical transition bytes.
    pub transition_hash: [u8; 32],
}
