use evonext_types::{ContractId, DocumentId, Entropy, IdentityId};

/// Domain-separated BLAKE3 hasher for deriving transition identifiers.
///
/// Each hasher carries a domain tag that is prepended to every computation,
/// so a document and a contract derived from identical material can never
/// collide.
pub struct TransitionHasher {
    domain: &'static str,
}

impl TransitionHasher {
    /// Hasher for document identifiers.
    pub const DOCUMENT: Self = Self {
        domain: "evonext-document-v1",
    };
    /// Hasher for contract identifiers.
    pub const CONTRACT: Self = Self {
        domain: "evonext-contract-v1",
    };
    /// Hasher for transition hashes (submission receipts).
    pub const TRANSITION: Self = Self {
        domain: "evonext-transition-v1",
    };

    /// Create a hasher with a custom domain tag.
    pub const fn new(domain: &'static str) -> Self {
        Self { domain }
    }

    /// Hash raw bytes with domain separation.
    pub fn hash(&self, data: &[u8]) -> [u8; 32] {
        let mut hasher = blake3::Hasher::new();
        hasher.update(self.domain.as_bytes());
        hasher.update(b":");
        hasher.update(data);
        *hasher.finalize().as_bytes()
    }

    /// The domain tag used by this hasher.
    pub fn domain(&self) -> &str {
        self.domain
    }

    /// Derive the identifier of a document about to be created.
    ///
    /// Deterministic in (owner, document type, entropy); fresh entropy per
    /// mutation is what makes the result unique.
    pub fn derive_document_id(
        owner: &IdentityId,
        document_type: &str,
        entropy: &Entropy,
    ) -> DocumentId {
        let mut hasher = blake3::Hasher::new();
        hasher.update(Self::DOCUMENT.domain.as_bytes());
        hasher.update(b":");
        hasher.update(owner.as_bytes());
        hasher.update(b":");
        hasher.update(document_type.as_bytes());
        hasher.update(b":");
        hasher.update(entropy.as_bytes());
        DocumentId::from_bytes(*hasher.finalize().as_bytes())
    }

    /// Derive the identifier of a contract about to be published.
    pub fn derive_contract_id(owner: &IdentityId, entropy: &Entropy) -> ContractId {
        let mut hasher = blake3::Hasher::new();
        hasher.update(Self::CONTRACT.domain.as_bytes());
        hasher.update(b":");
        hasher.update(owner.as_bytes());
        hasher.update(b":");
        hasher.update(entropy.as_bytes());
        ContractId::from_bytes(*hasher.finalize().as_bytes())
    }
}
