use evonext_types::{Entropy, ENTROPY_LEN};
use rand::RngCore;

/// The random-byte collaborator.
///
/// Implementations must be cryptographically secure; derived document
/// identifiers are only unique if this is.
pub trait EntropySource: Send + Sync {
    /// Draw 32 fresh bytes.
    fn entropy(&self) -> Entropy;
}

/// OS CSPRNG-backed entropy source, the default collaborator.
#[derive(Debug, Default)]
pub struct OsEntropy;

impl EntropySource for OsEntropy {
    fn entropy(&self) -> Entropy {
        let mut bytes = [0u8; ENTROPY_LEN];
        rand::rngs::OsRng.fill_bytes(&mut bytes);
        Entropy::from_bytes(bytes)
    }
}
