use std::sync::Arc;

use async_trait::async_trait;
use evonext_types::names::{is_valid_label, normalize_label};
use evonext_types::{DocumentId, IdentityId};
use thiserror::Error;
use tracing::debug;

use crate::document::{
    AvatarDocument, PostDocument, ProfileDocument, MAX_AVATAR_DATA_CHARS, MAX_AVATAR_VERSION,
    MAX_POST_CONTENT_CHARS, MIN_AVATAR_DATA_CHARS, MIN_AVATAR_VERSION,
};
use crate::error::{DocumentError, DocumentResult};
use crate::extract::{extract_hashtags, extract_mentions};

/// Failure of the external name-resolution collaborator.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("name resolution failed: {reason}")]
pub struct ResolveError {
    pub reason: String,
}

/// External collaborator that turns a normalized name label into the
/// identity registered under it, or `None` when nothing is registered.
#[async_trait]
pub trait NameResolver: Send + Sync {
    async fn resolve_name(&self, label: &str) -> Result<Option<IdentityId>, ResolveError>;
}

/// Input for building or updating a profile.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProfilePatch {
    pub display_name: String,
    pub bio: Option<String>,
    /// Base58 reference to the avatar document, if one is set.
    pub avatar_id: Option<String>,
}

/// Input for building an avatar.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AvatarSpec {
    pub version: u32,
    pub data: String,
}

/// Input for building a post.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PostInput {
    pub content: String,
    pub media_url: Option<String>,
    /// Base58 reference to the post being replied to.
    pub reply_to_post_id: Option<String>,
    /// Base58 reference to the post being quoted.
    pub quoted_post_id: Option<String>,
    /// 2-letter lowercase language code.
    pub language: Option<String>,
    pub is_sensitive: Option<bool>,
}

/// Trim and bound-check post content. Returns the trimmed text.
pub fn validate_post_content(content: &str) -> DocumentResult<&str> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(DocumentError::EmptyContent);
    }
    let len = trimmed.chars().count();
    if len > MAX_POST_CONTENT_CHARS {
        return Err(DocumentError::ContentTooLong {
            len,
            max: MAX_POST_CONTENT_CHARS,
        });
    }
    Ok(trimmed)
}

/// Check avatar version and data bounds.
pub fn validate_avatar_spec(spec: &AvatarSpec) -> DocumentResult<()> {
    if !(MIN_AVATAR_VERSION..=MAX_AVATAR_VERSION).contains(&spec.version) {
        return Err(DocumentError::InvalidAvatarSpec {
            reason: format!(
                "version {} outside [{MIN_AVATAR_VERSION},{MAX_AVATAR_VERSION}]",
                spec.version
            ),
        });
    }
    let len = spec.data.chars().count();
    if !(MIN_AVATAR_DATA_CHARS..=MAX_AVATAR_DATA_CHARS).contains(&len) {
        return Err(DocumentError::InvalidAvatarSpec {
            reason: format!(
                "data length {len} outside [{MIN_AVATAR_DATA_CHARS},{MAX_AVATAR_DATA_CHARS}]"
            ),
        });
    }
    Ok(())
}

/// Trim and presence-check a profile patch. Returns the trimmed display name.
pub fn validate_profile_patch(patch: &ProfilePatch) -> DocumentResult<&str> {
    let trimmed = patch.display_name.trim();
    if trimmed.is_empty() {
        return Err(DocumentError::EmptyDisplayName);
    }
    Ok(trimmed)
}

/// Check that a language code is 2 lowercase ASCII letters.
pub fn validate_language(code: &str) -> DocumentResult<()> {
    let ok = code.len() == 2 && code.chars().all(|c| c.is_ascii_lowercase());
    if ok {
        Ok(())
    } else {
        Err(DocumentError::InvalidLanguage(code.to_string()))
    }
}

/// Builds typed documents from user input.
///
/// Validation runs before any external call; the only collaborator the
/// assembler touches is the [`NameResolver`], and only after the content has
/// passed its checks.
pub struct DocumentAssembler {
    resolver: Arc<dyn NameResolver>,
}

impl DocumentAssembler {
    pub fn new(resolver: Arc<dyn NameResolver>) -> Self {
        Self { resolver }
    }

    /// Build a profile document from a patch.
    pub fn build_profile(&self, patch: &ProfilePatch) -> DocumentResult<ProfileDocument> {
        let display_name = validate_profile_patch(patch)?.to_string();
        let avatar_id = match &patch.avatar_id {
            Some(s) => Some(DocumentId::from_base58(s)?),
            None => None,
        };
        Ok(ProfileDocument {
            display_name,
            bio: patch.bio.clone().filter(|b| !b.is_empty()),
            avatar_id,
        })
    }

    /// Build an avatar document from a spec.
    pub fn build_avatar(&self, spec: &AvatarSpec) -> DocumentResult<AvatarDocument> {
        validate_avatar_spec(spec)?;
        Ok(AvatarDocument {
            version: spec.version,
            data: spec.data.clone(),
        })
    }

    /// Build a post document.
    ///
    /// Keeps the first hashtag as `primary_hashtag` and resolves the first
    /// mention through the name resolver; later occurrences of either are
    /// dropped. An unresolvable or invalid mention label leaves the field
    /// absent.
    pub async fn build_post(&self, input: &PostInput) -> DocumentResult<PostDocument> {
        let content = validate_post_content(&input.content)?.to_string();
        if let Some(language) = &input.language {
            validate_language(language)?;
        }
        let reply_to_post_id = match &input.reply_to_post_id {
            Some(s) => Some(DocumentId::from_base58(s)?),
            None => None,
        };
        let quoted_post_id = match &input.quoted_post_id {
            Some(s) => Some(DocumentId::from_base58(s)?),
            None => None,
        };

        let primary_hashtag = extract_hashtags(&content).into_iter().next();
        let first_mention_id = match extract_mentions(&content).into_iter().next() {
            Some(label) => self.resolve_mention(&label).await?,
            None => None,
        };

        Ok(PostDocument {
            content,
            media_url: input.media_url.clone().filter(|u| !u.is_empty()),
            reply_to_post_id,
            quoted_post_id,
            first_mention_id,
            primary_hashtag,
            language: input.language.clone(),
            is_sensitive: input.is_sensitive,
        })
    }

    async fn resolve_mention(&self, label: &str) -> DocumentResult<Option<IdentityId>> {
        let normalized = normalize_label(label);
        if !is_valid_label(&normalized) {
            debug!(label, "skipping mention with invalid label");
            return Ok(None);
        }
        self.resolver
            .resolve_name(&normalized)
            .await
            .map_err(|e| DocumentError::NameResolution { reason: e.reason })
    }
}

impl std::fmt::Debug for DocumentAssembler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentAssembler").finish()
    }
}
