use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use evonext_crypto::{Ed25519Signer, EntropySource, OsEntropy, Signer};
use evonext_documents::{DocumentAssembler, DocumentType, NameResolver, ResolveError};
use evonext_keystore::{EphemeralKeyStore, SecretBytes};
use evonext_platform::PlatformQuery;
use evonext_types::{ContractId, DocumentId, IdentityId};

use crate::builder::{PreparedMutation, StateTransitionBuilder};
use crate::error::ClientResult;
use crate::nonce::NonceSequencer;
use crate::payload::MutationPayload;

/// External display form of an identity.
pub fn encode_identifier(identity: &IdentityId) -> String {
    identity.to_base58()
}

/// Parse the external display form of an identity.
pub fn decode_identifier(s: &str) -> ClientResult<IdentityId> {
    Ok(IdentityId::from_base58(s)?)
}

/// Name resolution through the platform query collaborator.
struct QueryResolver {
    query: Arc<dyn PlatformQuery>,
}

#[async_trait]
impl NameResolver for QueryResolver {
    async fn resolve_name(&self, label: &str) -> Result<Option<IdentityId>, ResolveError> {
        self.query
            .resolve_name(label)
            .await
            .map_err(|e| ResolveError {
                reason: e.to_string(),
            })
    }
}

/// The client core's interface to the UI/session layer.
///
/// Owns the ephemeral keystore and the state-transition builder. Holds no
/// network connection itself; everything external goes through the injected
/// collaborators.
pub struct Client {
    keystore: Arc<EphemeralKeyStore>,
    builder: StateTransitionBuilder,
}

impl Client {
    /// Create a client with the default collaborators: a wall-clock
    /// keystore, the OS entropy source, and the in-process Ed25519 signer.
    pub fn new(contract: ContractId, query: Arc<dyn PlatformQuery>) -> Self {
        Self::with_collaborators(
            contract,
            query,
            Arc::new(EphemeralKeyStore::new()),
            Arc::new(OsEntropy),
            Arc::new(Ed25519Signer),
        )
    }

    /// Create a client with caller-supplied collaborators.
    pub fn with_collaborators(
        contract: ContractId,
        query: Arc<dyn PlatformQuery>,
        keystore: Arc<EphemeralKeyStore>,
        entropy: Arc<dyn EntropySource>,
        signer: Arc<dyn Signer>,
    ) -> Self {
        let assembler = DocumentAssembler::new(Arc::new(QueryResolver {
            query: query.clone(),
        }));
        let sequencer = NonceSequencer::new(query);
        let builder = StateTransitionBuilder::new(
            contract,
            keystore.clone(),
            assembler,
            sequencer,
            entropy,
            signer,
        );
        Self { keystore, builder }
    }

    // ------------------------------------------------------------------
    // Session key management
    // ------------------------------------------------------------------

    /// Store an identity's signing key after authentication. `ttl: None`
    /// applies the keystore's default of one hour.
    pub fn store_signing_key(
        &self,
        identity: &IdentityId,
        key: impl Into<SecretBytes>,
        ttl: Option<Duration>,
    ) {
        self.keystore.set_signing_key(identity, key, ttl);
    }

    /// Remove one identity's signing key.
    pub fn clear_signing_key(&self, identity: &IdentityId) -> bool {
        self.keystore.remove_signing_key(identity)
    }

    /// Remove every signing key. Call on application teardown and on loss
    /// of page visibility or session.
    pub fn clear_all_signing_keys(&self) {
        self.keystore.clear_signing_keys();
    }

    /// The underlying keystore, for lifecycle hooks that clear everything.
    pub fn keystore(&self) -> &EphemeralKeyStore {
        &self.keystore
    }

    // ------------------------------------------------------------------
    // Mutation preparation
    // ------------------------------------------------------------------

    /// Prepare a signed mutation. The result is handed to the network
    /// collaborator for submission; dropping it abandons the attempt and
    /// releases the identity's nonce lease.
    pub async fn prepare_mutation(
        &self,
        identity: &IdentityId,
        payload: MutationPayload,
    ) -> ClientResult<PreparedMutation> {
        self.builder.prepare(identity, payload).await
    }

    /// Prepare a signed deletion of an existing document.
    pub async fn prepare_deletion(
        &self,
        identity: &IdentityId,
        document_type: DocumentType,
        document_id: &str,
    ) -> ClientResult<PreparedMutation> {
        let document_id = DocumentId::from_base58(document_id)?;
        self.builder
            .prepare_deletion(identity, document_type, document_id)
            .await
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("builder", &self.builder)
            .finish()
    }
}
