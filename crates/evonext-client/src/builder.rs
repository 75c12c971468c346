use std::sync::Arc;

use evonext_crypto::{EntropySource, Signature, Signer, SigningKey, TransitionHasher};
use evonext_documents::{DocumentAssembler, DocumentType};
use evonext_keystore::EphemeralKeyStore;
use evonext_platform::{SignedRequest, StateTransition, Transition};
use evonext_types::{ContractId, DocumentId, Entropy, IdentityId};
use serde_json::Value;
use tracing::debug;

use crate::error::{ClientError, ClientResult};
use crate::nonce::{NonceLease, NonceSequencer};
use crate::payload::{ExistingDocument, MutationPayload};

/// A signed request together with the nonce lease that protects it.
///
/// The lease is released when this value is dropped: after handing the
/// request to the submission layer, or when the caller abandons the attempt.
/// Until then, no other preparation for the same identity can fetch a nonce.
pub struct PreparedMutation {
    request: SignedRequest,
    _lease: NonceLease,
}

impl PreparedMutation {
    /// The submittable request.
    pub fn request(&self) -> &SignedRequest {
        &self.request
    }

    /// Consume into the request, releasing the nonce lease.
    pub fn into_request(self) -> SignedRequest {
        self.request
    }

    pub fn nonce(&self) -> u64 {
        self.request.nonce()
    }
}

impl std::fmt::Debug for PreparedMutation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreparedMutation")
            .field("kind", &self.request.transition.transition.kind())
            .field("nonce", &self.request.nonce())
            .finish()
    }
}

/// Either a built document or a contract definition, ready to become a
/// transition once entropy is drawn.
enum BuiltPayload {
    Document {
        document_type: DocumentType,
        document: Value,
        existing: Option<ExistingDocument>,
    },
    Contract {
        definition: Value,
    },
}

/// Composes the pipeline: nonce, document, entropy, key, signature.
///
/// Steps run in that order; validation runs before all of them and touches
/// nothing external. No step is retried internally, because a retry after
/// entropy is drawn would need a fresh nonce and fresh entropy, not a blind
/// repeat.
pub struct StateTransitionBuilder {
    contract: ContractId,
    keystore: Arc<EphemeralKeyStore>,
    assembler: DocumentAssembler,
    sequencer: NonceSequencer,
    entropy: Arc<dyn EntropySource>,
    signer: Arc<dyn Signer>,
}

impl StateTransitionBuilder {
    pub fn new(
        contract: ContractId,
        keystore: Arc<EphemeralKeyStore>,
        assembler: DocumentAssembler,
        sequencer: NonceSequencer,
        entropy: Arc<dyn EntropySource>,
        signer: Arc<dyn Signer>,
    ) -> Self {
        Self {
            contract,
            keystore,
            assembler,
            sequencer,
            entropy,
            signer,
        }
    }

    /// Prepare a signed mutation for `identity`.
    pub async fn prepare(
        &self,
        identity: &IdentityId,
        payload: MutationPayload,
    ) -> ClientResult<PreparedMutation> {
        payload.validate()?;
        let kind = payload.kind();

        let lease = self.sequencer.next_nonce(identity).await?;
        let built = self.assemble(payload).await?;
        let entropy = self.entropy.entropy();
        let transition = self.to_transition(identity, built, &entropy);

        self.finish(identity, kind, lease, entropy, transition).await
    }

    /// Prepare a signed deletion of an existing document.
    pub async fn prepare_deletion(
        &self,
        identity: &IdentityId,
        document_type: DocumentType,
        document_id: DocumentId,
    ) -> ClientResult<PreparedMutation> {
        let lease = self.sequencer.next_nonce(identity).await?;
        let entropy = self.entropy.entropy();
        let transition = Transition::DocumentDelete {
            contract: self.contract,
            document_type: document_type.as_str().to_string(),
            document_id,
        };

        self.finish(identity, "delete", lease, entropy, transition)
            .await
    }

    async fn assemble(&self, payload: MutationPayload) -> ClientResult<BuiltPayload> {
        Ok(match payload {
            MutationPayload::Profile { patch, existing } => BuiltPayload::Document {
                document_type: DocumentType::Profile,
                document: self.assembler.build_profile(&patch)?.to_value()?,
                existing,
            },
            MutationPayload::Avatar(spec) => BuiltPayload::Document {
                document_type: DocumentType::Avatar,
                document: self.assembler.build_avatar(&spec)?.to_value()?,
                existing: None,
            },
            MutationPayload::Post(input) => BuiltPayload::Document {
                document_type: DocumentType::Post,
                document: self.assembler.build_post(&input).await?.to_value()?,
                existing: None,
            },
            MutationPayload::Contract { definition } => BuiltPayload::Contract { definition },
        })
    }

    fn to_transition(
        &self,
        identity: &IdentityId,
        built: BuiltPayload,
        entropy: &Entropy,
    ) -> Transition {
        match built {
            BuiltPayload::Document {
                document_type,
                document,
                existing: Some(existing),
            } => Transition::DocumentReplace {
                contract: self.contract,
                document_type: document_type.as_str().to_string(),
                document_id: existing.document_id,
                revision: existing.revision + 1,
                document,
            },
            BuiltPayload::Document {
                document_type,
                document,
                existing: None,
            } => Transition::DocumentCreate {
                contract: self.contract,
                document_type: document_type.as_str().to_string(),
                document_id: TransitionHasher::derive_document_id(
                    identity,
                    document_type.as_str(),
                    entropy,
                ),
                document,
            },
            BuiltPayload::Contract { definition } => Transition::ContractCreate {
                contract_id: TransitionHasher::derive_contract_id(identity, entropy),
                definition,
            },
        }
    }

    async fn finish(
        &self,
        identity: &IdentityId,
        kind: &'static str,
        lease: NonceLease,
        entropy: Entropy,
        transition: Transition,
    ) -> ClientResult<PreparedMutation> {
        let state_transition = StateTransition {
            identity: *identity,
            nonce: lease.value(),
            entropy,
            transition,
        };
        let signature = self.sign(identity, &state_transition).await?;
        debug!(kind, nonce = state_transition.nonce, "prepared state transition");
        Ok(PreparedMutation {
            request: SignedRequest {
                transition: state_transition,
                signature,
            },
            _lease: lease,
        })
    }

    async fn sign(
        &self,
        identity: &IdentityId,
        state_transition: &StateTransition,
    ) -> ClientResult<Signature> {
        let secret = self
            .keystore
            .signing_key(identity)
            .ok_or(ClientError::KeyUnavailable {
                identity: *identity,
            })?;
        let key = SigningKey::from_slice(secret.as_bytes()).map_err(|e| {
            ClientError::SigningFailed {
                reason: e.to_string(),
            }
        })?;
        let message = state_transition.canonical_bytes()?;
        self.signer
            .sign(&key, &message)
            .await
            .map_err(|e| ClientError::SigningFailed {
                reason: e.to_string(),
            })
    }
}

impl std::fmt::Debug for StateTransitionBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateTransitionBuilder")
            .field("contract", &self.contract)
            .finish()
    }
}
