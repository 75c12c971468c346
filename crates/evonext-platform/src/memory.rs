use std::collections::HashMap;
use std::sync::RwLock;
use std::time::Duration;

use async_trait::async_trait;
use evonext_crypto::TransitionHasher;
use evonext_types::{ContractId, DocumentId, IdentityId};
use serde_json::Value;

use crate::error::{PlatformError, PlatformResult};
use crate::nonce::RawNonce;
use crate::query::{PlatformQuery, SubmissionClient, SubmissionReceipt};
use crate::transition::SignedRequest;

/// In-memory platform double for tests, local demos, and embedding.
///
/// Holds per-identity nonces, a name registry, and stored documents behind a
/// `RwLock`. `broadcast` verifies the request's nonce against the identity's
/// current counter and advances it on success, so nonce conflicts behave as
/// they do on the real network.
pub struct InMemoryPlatform {
    inner: RwLock<PlatformState>,
    /// Artificial latency on nonce fetches, to widen race windows in tests.
    fetch_delay: Option<Duration>,
}

#[derive(Default)]
struct PlatformState {
    nonces: HashMap<IdentityId, u64>,
    /// Per-identity raw override; lets tests inject malformed answers.
    raw_nonces: HashMap<IdentityId, Value>,
    names: HashMap<String, IdentityId>,
    documents: HashMap<(ContractId, String, DocumentId), Value>,
    broadcasts: Vec<SignedRequest>,
}

impl InMemoryPlatform {
    /// Create an empty platform double.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(PlatformState::default()),
            fetch_delay: None,
        }
    }

    /// Add artificial latency to every nonce fetch.
    pub fn with_fetch_delay(mut self, delay: Duration) -> Self {
        self.fetch_delay = Some(delay);
        self
    }

    /// Set an identity's current on-chain nonce.
    pub fn set_identity_nonce(&self, identity: &IdentityId, nonce: u64) {
        let mut state = self.inner.write().expect("lock poisoned");
        state.nonces.insert(*identity, nonce);
    }

    /// Make nonce fetches for `identity` return a raw value verbatim.
    pub fn set_raw_nonce(&self, identity: &IdentityId, raw: Value) {
        let mut state = self.inner.write().expect("lock poisoned");
        state.raw_nonces.insert(*identity, raw);
    }

    /// Register a name label.
    pub fn register_name(&self, label: &str, identity: &IdentityId) {
        let mut state = self.inner.write().expect("lock poisoned");
        state.names.insert(label.to_string(), *identity);
    }

    /// Store a document directly, bypassing the transition path.
    pub fn insert_document(
        &self,
        contract: &ContractId,
        document_type: &str,
        document_id: &DocumentId,
        document: Value,
    ) {
        let mut state = self.inner.write().expect("lock poisoned");
        state
            .documents
            .insert((*contract, document_type.to_string(), *document_id), document);
    }

    /// Every request broadcast so far, in order.
    pub fn broadcasts(&self) -> Vec<SignedRequest> {
        self.inner.read().expect("lock poisoned").broadcasts.clone()
    }

    /// Number of requests broadcast so far.
    pub fn broadcast_count(&self) -> usize {
        self.inner.read().expect("lock poisoned").broadcasts.len()
    }
}

impl Default for InMemoryPlatform {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PlatformQuery for InMemoryPlatform {
    async fn identity_nonce(&self, identity: &IdentityId) -> PlatformResult<RawNonce> {
        if let Some(delay) = self.fetch_delay {
            tokio::time::sleep(delay).await;
        }
        let state = self.inner.read().expect("lock poisoned");
        if let Some(raw) = state.raw_nonces.get(identity) {
            return Ok(RawNonce::new(raw.clone()));
        }
        // A fresh identity starts at nonce zero
        Ok(RawNonce::from_u64(
            state.nonces.get(identity).copied().unwrap_or(0),
        ))
    }

    async fn get_document(
        &self,
        contract: &ContractId,
        document_type: &str,
        document_id: &DocumentId,
    ) -> PlatformResult<Option<Value>> {
        let state = self.inner.read().expect("lock poisoned");
        Ok(state
            .documents
            .get(&(*contract, document_type.to_string(), *document_id))
            .cloned())
    }

    async fn resolve_name(&self, label: &str) -> PlatformResult<Option<IdentityId>> {
        let state = self.inner.read().expect("lock poisoned");
        Ok(state.names.get(label).copied())
    }
}

#[async_trait]
impl SubmissionClient for InMemoryPlatform {
    async fn broadcast(&self, request: &SignedRequest) -> PlatformResult<SubmissionReceipt> {
        let bytes = request.canonical_bytes()?;
        let mut state = self.inner.write().expect("lock poisoned");
        let identity = request.identity();
        let current = state.nonces.get(identity).copied().unwrap_or(0);
        let expected = current.wrapping_add(1);
        if request.nonce() != expected {
            return Err(PlatformError::NonceConflict);
        }
        state.nonces.insert(*identity, expected);
        state.broadcasts.push(request.clone());
        Ok(SubmissionReceipt {
            transition_hash: TransitionHasher::TRANSITION.hash(&bytes),
        })
    }
}

impl std::fmt::Debug for InMemoryPlatform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.inner.read().expect("lock poisoned");
        f.debug_struct("InMemoryPlatform")
            .field("identities", &state.nonces.len())
            .field("broadcasts", &state.broadcasts.len())
            .finish()
    }
}
