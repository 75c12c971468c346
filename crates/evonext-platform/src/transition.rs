use evonext_crypto::Signature;
use evonext_types::{ContractId, DocumentId, Entropy, IdentityId};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{PlatformError, PlatformResult};

/// The mutation a state transition carries.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Transition {
    DocumentCreate {
        contract: ContractId,
        document_type: String,
        document_id: DocumentId,
        document: Value,
    },
    DocumentReplace {
        contract: ContractId,
        document_type: String,
        document_id: DocumentId,
        revision: u64,
        document: Value,
    },
    DocumentDelete {
        contract: ContractId,
        document_type: String,
        document_id: DocumentId,
    },
    ContractCreate {
        contract_id: ContractId,
        definition: Value,
    },
}

impl Transition {
    /// Short name of the mutation kind, for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Transition::DocumentCreate { .. } => "document_create",
            Transition::DocumentReplace { .. } => "document_replace",
            Transition::DocumentDelete { .. } => "document_delete",
            Transition::ContractCreate { .. } => "contract_create",
        }
    }

    /// The document this transition addresses, if any.
    pub fn document_id(&self) -> Option<&DocumentId> {
        match self {
            Transition::DocumentCreate { document_id, .. }
            | Transition::DocumentReplace { document_id, .. }
            | Transition::DocumentDelete { document_id, .. } => Some(document_id),
            Transition::ContractCreate { .. } => None,
        }
    }
}

/// One unsigned state transition: everything the signature covers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StateTransition {
    pub identity: IdentityId,
    pub nonce: u64,
    pub entropy: Entropy,
    pub transition: Transition,
}

impl StateTransition {
    /// The canonical byte serialization that is signed.
    ///
    /// Identical field values always produce identical bytes; identifiers
    /// and entropy serialize in their 32-byte binary form here.
    pub fn canonical_bytes(&self) -> PlatformResult<Vec<u8>> {
        bincode::serialize(self).map_err(|e| PlatformError::Serialization {
            reason: e.to_string(),
        })
    }
}

/// A signed, submittable mutation request.
///
/// Produced by the builder; submission is the network collaborator's
/// responsibility.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SignedRequest {
    pub transition: StateTransition,
    pub signature: Signature,
}

impl SignedRequest {
    /// The bytes the signature covers.
    pub fn canonical_bytes(&self) -> PlatformResult<Vec<u8>> {
        self.transition.canonical_bytes()
    }

    pub fn identity(&self) -> &IdentityId {
        &self.transition.identity
    }

    pub fn nonce(&self) -> u64 {
        self.transition.nonce
    }

    pub fn entropy(&self) -> &Entropy {
        &self.transition.entropy
    }
}
