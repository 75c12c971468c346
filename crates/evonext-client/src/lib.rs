//! State-transition construction for the EvoNext client.
//!
//! This is the composition root of the client core: it sequences per-identity
//! nonces, assembles documents, draws entropy, retrieves the signing key from
//! the ephemeral keystore, and emits a signed request ready for submission by
//! the network layer. Submission itself never happens here.
//!
//! # Entry point
//!
//! [`Client`] is what the UI/session layer talks to:
//!
//! - [`Client::store_signing_key`] after authentication
//! - [`Client::prepare_mutation`] for each edit action
//! - [`Client::clear_all_signing_keys`] on teardown or visibility loss
//!
//! Every failure of a preparation is terminal for that attempt; nothing is
//! retried internally, because a retry needs a fresh nonce and fresh entropy.

pub mod builder;
pub mod client;
pub mod error;
pub mod nonce;
pub mod payload;

pub use builder::{PreparedMutation, StateTransitionBuilder};
pub use client::{decode_identifier, encode_identifier, Client};
pub use error::{ClientError, ClientResult};
pub use nonce::{mask_nonce, NonceLease, NonceSequencer, NONCE_MASK};
pub use payload::{ExistingDocument, MutationPayload};
