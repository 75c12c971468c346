//! Ephemeral credential storage for the EvoNext client core.
//!
//! Private key material lives only in process memory and only for as long
//! as a session needs it. Entries carry an explicit expiry timestamp from an
//! injected [`Clock`]; expiry is checked lazily on read and swept eagerly on
//! write and delete, so eviction is deterministic and testable without a
//! host timer primitive.
//!
//! Nothing in this crate ever touches persistent storage.
//!
//! # Lifecycle
//!
//! Callers must invoke [`EphemeralKeyStore::clear`] on application teardown
//! and on loss of page visibility or session; both mean the execution
//! context is about to go away and key material must not outlive it.

pub mod clock;
pub mod secret;
pub mod store;

pub use clock::{Clock, ManualClock, SystemClock};
pub use secret::SecretBytes;
pub use store::{EphemeralKeyStore, DEFAULT_KEY_TTL};
