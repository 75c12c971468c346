//! Cryptographic seams for the EvoNext client core.
//!
//! Provides Ed25519 signing behind a collaborator trait, a CSPRNG-backed
//! entropy source, and domain-separated BLAKE3 derivation of document and
//! contract identifiers.
//!
//! All crypto operations wrap established libraries; no custom cryptography.

pub mod entropy;
pub mod hasher;
pub mod signer;

pub use entropy::{EntropySource, OsEntropy};
pub use hasher::TransitionHasher;
pub use signer::{Ed25519Signer, Signature, Signer, SignerError, SigningKey, VerifyingKey};
