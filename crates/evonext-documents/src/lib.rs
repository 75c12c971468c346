//! Typed platform documents for the EvoNext client core.
//!
//! Each document kind is a tagged value with a fixed required/optional field
//! set, checked at construction time by the [`DocumentAssembler`]; an
//! invalid document can never be assembled. Optional fields are omitted from
//! the encoded form entirely; absence is distinct from an empty value.
//!
//! # Key Types
//!
//! - [`ProfileDocument`], [`AvatarDocument`], [`PostDocument`] — the values
//! - [`DocumentAssembler`] — builds them from user input
//! - [`NameResolver`] — external collaborator turning `@mention` labels into
//!   identities

pub mod assembler;
pub mod document;
pub mod error;
pub mod extract;

pub use assembler::{
    validate_avatar_spec, validate_language, validate_post_content, validate_profile_patch,
    AvatarSpec, DocumentAssembler, NameResolver, PostInput, ProfilePatch, ResolveError,
};
pub use document::{
    AvatarDocument, DocumentType, PostDocument, ProfileDocument, MAX_AVATAR_DATA_CHARS,
    MAX_AVATAR_VERSION, MAX_POST_CONTENT_CHARS, MIN_AVATAR_DATA_CHARS, MIN_AVATAR_VERSION,
};
pub use error::{DocumentError, DocumentResult};
pub use extract::{extract_hashtags, extract_mentions, MAX_TAG_CHARS};
