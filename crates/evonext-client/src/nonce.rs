use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use evonext_platform::PlatformQuery;
use evonext_types::IdentityId;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::debug;

use crate::error::{ClientError, ClientResult};

/// The wire format allocates 48 bits to the nonce field.
pub const NONCE_MASK: u64 = 0xFFFF_FFFF_FFFF;

/// Truncate a nonce candidate to the wire format's 48 bits.
///
/// Applied on every call, not only when the value is large, so behavior is
/// uniform and testable.
pub fn mask_nonce(candidate: u64) -> u64 {
    candidate & NONCE_MASK
}

/// A fetched next-nonce value together with the per-identity exclusion that
/// protects it.
///
/// The lease IS the exclusion token: while it is alive, no other preparation
/// for the same identity can begin its nonce fetch. Dropping the lease,
/// whether because the request was submitted or because the caller abandoned
/// it, releases the exclusion; the value is discarded, never cached.
pub struct NonceLease {
    value: u64,
    _guard: OwnedMutexGuard<()>,
}

impl NonceLease {
    /// The masked next-nonce value.
    pub fn value(&self) -> u64 {
        self.value
    }
}

impl std::fmt::Debug for NonceLease {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NonceLease").field("value", &self.value).finish()
    }
}

/// Serializes nonce acquisition per identity.
///
/// Retrieves the identity's current on-chain nonce (one round-trip),
/// increments it, and masks to the wire width. Nothing is cached across
/// calls; staleness at submission time surfaces as a nonce conflict from the
/// submission collaborator.
pub struct NonceSequencer {
    query: Arc<dyn PlatformQuery>,
    locks: RwLock<HashMap<IdentityId, Arc<Mutex<()>>>>,
}

impl NonceSequencer {
    pub fn new(query: Arc<dyn PlatformQuery>) -> Self {
        Self {
            query,
            locks: RwLock::new(HashMap::new()),
        }
    }

    /// The next nonce for `identity`, behind its exclusion lease.
    ///
    /// Calls for the same identity serialize: the fetch only begins once the
    /// previous lease has been dropped. Calls for different identities
    /// proceed fully in parallel.
    pub async fn next_nonce(&self, identity: &IdentityId) -> ClientResult<NonceLease> {
        let guard = self.lock_for(identity).lock_owned().await;
        let raw = self.query.identity_nonce(identity).await?;
        let current = raw
            .parse()
            .map_err(|e| ClientError::InvalidNonceResponse { got: e.got })?;
        let value = mask_nonce(current.wrapping_add(1));
        debug!(identity = %identity, nonce = value, "acquired nonce lease");
        Ok(NonceLease {
            value,
            _guard: guard,
        })
    }

    fn lock_for(&self, identity: &IdentityId) -> Arc<Mutex<()>> {
        if let Some(lock) = self.locks.read().expect("lock poisoned").get(identity) {
            return lock.clone();
        }
        let mut locks = self.locks.write().expect("lock poisoned");
        locks
            .entry(*identity)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}

impl std::fmt::Debug for NonceSequencer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let identities = self.locks.read().expect("lock poisoned").len();
        f.debug_struct("NonceSequencer")
            .field("identities", &identities)
            .finish()
    }
}
