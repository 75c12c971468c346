use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use evonext_types::IdentityId;
use tracing::debug;

use crate::clock::{Clock, SystemClock};
use crate::secret::SecretBytes;

/// Default time-to-live for signing key material.
pub const DEFAULT_KEY_TTL: Duration = Duration::from_secs(3600);

struct Entry {
    value: SecretBytes,
    /// Milliseconds since epoch; `None` means no expiry.
    expires_at: Option<u64>,
}

impl Entry {
    fn is_expired(&self, now: u64) -> bool {
        matches!(self.expires_at, Some(deadline) if now >= deadline)
    }
}

/// Process-lifetime, in-memory credential store with per-entry TTL.
///
/// Entries are keyed by string key slots. Expiry is evaluated against the
/// injected [`Clock`] inside the store's own lock: reads treat an expired
/// entry as absent and purge it; writes, deletes, and enumerations sweep all
/// expired entries first. Overwriting a slot replaces both the value and the
/// deadline, so a stale deadline can never evict a newer value.
///
/// None of the operations fail; a missing or expired key is absence, never
/// an error. No entry is ever written to persistent storage.
pub struct EphemeralKeyStore {
    clock: Arc<dyn Clock>,
    entries: RwLock<HashMap<String, Entry>>,
}

impl EphemeralKeyStore {
    /// Create a store backed by the wall clock.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Create a store backed by a caller-supplied clock.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Store `value` under `key`, replacing any existing entry and its
    /// deadline. `ttl: None` stores without expiry.
    pub fn set(&self, key: impl Into<String>, value: impl Into<SecretBytes>, ttl: Option<Duration>) {
        let now = self.clock.now_millis();
        let expires_at = ttl.map(|t| now.saturating_add(t.as_millis() as u64));
        let mut entries = self.entries.write().expect("lock poisoned");
        Self::sweep(&mut entries, now);
        entries.insert(
            key.into(),
            Entry {
                value: value.into(),
                expires_at,
            },
        );
    }

    /// The value under `key`, if present and unexpired.
    ///
    /// An expired entry is purged here rather than left unreadable, so
    /// memory is reclaimed without waiting for the next write.
    pub fn get(&self, key: &str) -> Option<SecretBytes> {
        let now = self.clock.now_millis();
        let mut entries = self.entries.write().expect("lock poisoned");
        match entries.get(key) {
            Some(entry) if entry.is_expired(now) => {
                entries.remove(key);
                debug!(key, "purged expired entry on read");
                None
            }
            Some(entry) => Some(entry.value.clone()),
            None => None,
        }
    }

    /// Remove an entry. Returns `true` if an unexpired entry was removed.
    pub fn remove(&self, key: &str) -> bool {
        let now = self.clock.now_millis();
        let mut entries = self.entries.write().expect("lock poisoned");
        Self::sweep(&mut entries, now);
        entries.remove(key).is_some()
    }

    /// Remove all entries. Must run synchronously and completely before the
    /// execution context is lost (teardown, visibility loss).
    pub fn clear(&self) {
        let mut entries = self.entries.write().expect("lock poisoned");
        let count = entries.len();
        entries.clear();
        debug!(count, "keystore cleared");
    }

    /// Sorted list of unexpired keys. Never reveals expired entries.
    pub fn keys(&self) -> Vec<String> {
        let now = self.clock.now_millis();
        let mut entries = self.entries.write().expect("lock poisoned");
        Self::sweep(&mut entries, now);
        let mut keys: Vec<String> = entries.keys().cloned().collect();
        keys.sort();
        keys
    }

    /// Number of unexpired entries.
    pub fn len(&self) -> usize {
        let now = self.clock.now_millis();
        let mut entries = self.entries.write().expect("lock poisoned");
        Self::sweep(&mut entries, now);
        entries.len()
    }

    /// Whether the store holds no unexpired entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn sweep(entries: &mut HashMap<String, Entry>, now: u64) {
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired(now));
        let removed = before - entries.len();
        if removed > 0 {
            debug!(removed, "swept expired entries");
        }
    }

    // ------------------------------------------------------------------
    // Signing-key slots
    // ------------------------------------------------------------------

    /// Key slot under which an identity's signing key is stored.
    pub fn signing_key_slot(identity: &IdentityId) -> String {
        format!("signing-key/{}", identity.to_base58())
    }

    /// Store an identity's signing key. `ttl: None` applies
    /// [`DEFAULT_KEY_TTL`]; key material always expires.
    pub fn set_signing_key(
        &self,
        identity: &IdentityId,
        key: impl Into<SecretBytes>,
        ttl: Option<Duration>,
    ) {
        let ttl = ttl.unwrap_or(DEFAULT_KEY_TTL);
        self.set(Self::signing_key_slot(identity), key, Some(ttl));
    }

    /// The identity's signing key, if present and unexpired.
    pub fn signing_key(&self, identity: &IdentityId) -> Option<SecretBytes> {
        self.get(&Self::signing_key_slot(identity))
    }

    /// Remove the identity's signing key.
    pub fn remove_signing_key(&self, identity: &IdentityId) -> bool {
        self.remove(&Self::signing_key_slot(identity))
    }

    /// Remove every stored signing key, leaving other slots intact.
    pub fn clear_signing_keys(&self) {
        let mut entries = self.entries.write().expect("lock poisoned");
        entries.retain(|key, _| !key.starts_with("signing-key/"));
    }
}

impl Default for EphemeralKeyStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EphemeralKeyStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let count = self.entries.read().expect("lock poisoned").len();
        f.debug_struct("EphemeralKeyStore")
            .field("entry_count", &count)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;

    fn store_at(start: u64) -> (EphemeralKeyStore, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(start));
        let store = EphemeralKeyStore::with_clock(clock.clone());
        (store, clock)
    }

    fn identity(byte: u8) -> IdentityId {
        IdentityId::from_bytes([byte; 32])
    }

    // ------------------------------------------------------------------
    // TTL behavior
    // ------------------------------------------------------------------

    #[test]
    fn value_readable_before_expiry() {
        let (store, clock) = store_at(0);
        store.set("k", [1u8; 32], Some(Duration::from_millis(1000)));
        clock.advance(500);
        assert_eq!(store.get("k"), Some(SecretBytes::from([1u8; 32])));
    }

    #[test]
    fn value_absent_after_expiry() {
        let (store, clock) = store_at(0);
        store.set("k", [1u8; 32], Some(Duration::from_millis(1000)));
        clock.advance(1500);
        assert_eq!(store.get("k"), None);
    }

    #[test]
    fn keys_never_lists_expired_entries() {
        let (store, clock) = store_at(0);
        store.set("short", [1u8; 32], Some(Duration::from_millis(1000)));
        store.set("long", [2u8; 32], Some(Duration::from_millis(10_000)));
        clock.advance(1500);
        assert_eq!(store.keys(), vec!["long".to_string()]);
    }

    #[test]
    fn read_at_exact_deadline_is_absence() {
        let (store, clock) = store_at(0);
        store.set("k", [1u8; 32], Some(Duration::from_millis(1000)));
        clock.advance(1000);
        assert_eq!(store.get("k"), None);
    }

    #[test]
    fn no_ttl_means_no_expiry() {
        let (store, clock) = store_at(0);
        store.set("k", [1u8; 32], None);
        clock.advance(u64::MAX / 2);
        assert!(store.get("k").is_some());
    }

    #[test]
    fn expired_entry_is_purged_on_read() {
        let (store, clock) = store_at(0);
        store.set("k", [1u8; 32], Some(Duration::from_millis(100)));
        clock.advance(200);
        assert_eq!(store.get("k"), None);
        // Entry is gone, not merely unreadable
        assert_eq!(store.entries.read().unwrap().len(), 0);
    }

    // ------------------------------------------------------------------
    // Overwrite and delete semantics
    // ------------------------------------------------------------------

    #[test]
    fn overwrite_replaces_deadline() {
        let (store, clock) = store_at(0);
        store.set("k", [1u8; 32], Some(Duration::from_millis(1000)));
        // Overwrite with a longer deadline; the old one must not apply
        store.set("k", [2u8; 32], Some(Duration::from_millis(5000)));
        clock.advance(1500);
        assert_eq!(store.get("k"), Some(SecretBytes::from([2u8; 32])));
    }

    #[test]
    fn overwrite_with_no_ttl_clears_deadline() {
        let (store, clock) = store_at(0);
        store.set("k", [1u8; 32], Some(Duration::from_millis(1000)));
        store.set("k", [2u8; 32], None);
        clock.advance(2000);
        assert!(store.get("k").is_some());
    }

    #[test]
    fn remove_returns_presence() {
        let (store, _clock) = store_at(0);
        store.set("k", [1u8; 32], None);
        assert!(store.remove("k"));
        assert!(!store.remove("k"));
        assert_eq!(store.get("k"), None);
    }

    #[test]
    fn remove_of_expired_entry_reports_absence() {
        let (store, clock) = store_at(0);
        store.set("k", [1u8; 32], Some(Duration::from_millis(100)));
        clock.advance(200);
        // Eviction won; explicit delete of the same key is a no-op
        assert!(!store.remove("k"));
    }

    #[test]
    fn clear_removes_everything_with_no_late_effects() {
        let (store, clock) = store_at(0);
        store.set("a", [1u8; 32], Some(Duration::from_millis(1000)));
        store.set("b", [2u8; 32], None);
        store.clear();
        assert!(store.is_empty());
        assert_eq!(store.get("a"), None);
        assert_eq!(store.get("b"), None);
        // A later clock tick must not resurrect or evict anything
        clock.advance(10_000);
        assert!(store.keys().is_empty());
        store.set("a", [3u8; 32], None);
        assert!(store.get("a").is_some());
    }

    #[test]
    fn write_sweeps_other_expired_entries() {
        let (store, clock) = store_at(0);
        store.set("stale", [1u8; 32], Some(Duration::from_millis(100)));
        clock.advance(200);
        store.set("fresh", [2u8; 32], None);
        // Sweep ran during the write; only the fresh entry remains
        assert_eq!(store.entries.read().unwrap().len(), 1);
    }

    // ------------------------------------------------------------------
    // Signing-key slots
    // ------------------------------------------------------------------

    #[test]
    fn signing_key_roundtrip() {
        let (store, _clock) = store_at(0);
        let id = identity(1);
        store.set_signing_key(&id, [7u8; 32], None);
        assert_eq!(store.signing_key(&id), Some(SecretBytes::from([7u8; 32])));
        assert!(store.remove_signing_key(&id));
        assert_eq!(store.signing_key(&id), None);
    }

    #[test]
    fn signing_key_gets_default_ttl() {
        let (store, clock) = store_at(0);
        let id = identity(1);
        store.set_signing_key(&id, [7u8; 32], None);
        clock.advance(DEFAULT_KEY_TTL.as_millis() as u64 - 1);
        assert!(store.signing_key(&id).is_some());
        clock.advance(1);
        assert!(store.signing_key(&id).is_none());
    }

    #[test]
    fn signing_key_ttl_override() {
        let (store, clock) = store_at(0);
        let id = identity(1);
        store.set_signing_key(&id, [7u8; 32], Some(Duration::from_millis(50)));
        clock.advance(60);
        assert!(store.signing_key(&id).is_none());
    }

    #[test]
    fn clear_signing_keys_leaves_other_slots() {
        let (store, _clock) = store_at(0);
        store.set_signing_key(&identity(1), [1u8; 32], None);
        store.set_signing_key(&identity(2), [2u8; 32], None);
        store.set("session/meta", [3u8; 32], None);
        store.clear_signing_keys();
        assert_eq!(store.signing_key(&identity(1)), None);
        assert_eq!(store.signing_key(&identity(2)), None);
        assert!(store.get("session/meta").is_some());
    }

    #[test]
    fn slots_are_per_identity() {
        let (store, _clock) = store_at(0);
        store.set_signing_key(&identity(1), [1u8; 32], None);
        assert_eq!(store.signing_key(&identity(2)), None);
    }

    #[test]
    fn debug_does_not_print_values() {
        let (store, _clock) = store_at(0);
        store.set("k", [0xabu8; 32], None);
        let debug = format!("{store:?}");
        assert!(debug.contains("entry_count"));
        assert!(!debug.contains("ab"));
    }
}
