//! External collaborator interfaces for the EvoNext client core.
//!
//! The network/query layer, the submission path, and the gateway's loosely
//! typed nonce answers live behind the traits in this crate. The core never
//! talks to the network itself; it produces [`SignedRequest`] values and
//! hands them to a [`SubmissionClient`].
//!
//! [`InMemoryPlatform`] implements every trait for tests and local demos.

pub mod error;
pub mod memory;
pub mod nonce;
pub mod query;
pub mod transition;

pub use error::{PlatformError, PlatformResult};
pub use memory::InMemoryPlatform;
pub use nonce::{NonceParseError, RawNonce};
pub use query::{PlatformQuery, SubmissionClient, SubmissionReceipt};
pub use transition::{SignedRequest, StateTransition, Transition};
