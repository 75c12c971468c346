//! Foundation types for the EvoNext client core.
//!
//! This crate provides the identifier, entropy, and name-label types used
//! throughout the client pipeline. Every other evonext crate depends on
//! `evonext-types`.
//!
//! # Key Types
//!
//! - [`IdentityId`] — 32-byte identity of a platform account
//! - [`DocumentId`] — 32-byte identifier of a platform document
//! - [`ContractId`] — 32-byte identifier of a data contract
//! - [`Entropy`] — fresh 32-byte randomness mixed into each mutation
//! - [`IdentifierError`] — failures of the base58 identifier codec

pub mod entropy;
pub mod error;
pub mod identifier;
pub mod names;

pub use entropy::{Entropy, ENTROPY_LEN};
pub use error::IdentifierError;
pub use identifier::{ContractId, DocumentId, IdentityId, IDENTIFIER_LEN};
