use evonext_documents::{
    validate_avatar_spec, validate_language, validate_post_content, validate_profile_patch,
    AvatarSpec, PostInput, ProfilePatch,
};
use evonext_types::DocumentId;
use serde_json::Value;

use crate::error::{ClientError, ClientResult};

/// Document being updated rather than created.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExistingDocument {
    pub document_id: DocumentId,
    /// Current revision as previously fetched; the replace transition
    /// submits `revision + 1`.
    pub revision: u64,
}

/// What a mutation changes, tagged per kind.
#[derive(Clone, Debug, PartialEq)]
pub enum MutationPayload {
    /// Create or, when `existing` is set, update the identity's profile.
    Profile {
        patch: ProfilePatch,
        existing: Option<ExistingDocument>,
    },
    /// Create an avatar document.
    Avatar(AvatarSpec),
    /// Create a post.
    Post(PostInput),
    /// Publish a data contract.
    Contract { definition: Value },
}

impl MutationPayload {
    /// The mutation kind name, for logs and routing.
    pub fn kind(&self) -> &'static str {
        match self {
            MutationPayload::Profile { .. } => "profile",
            MutationPayload::Avatar(_) => "avatar",
            MutationPayload::Post(_) => "post",
            MutationPayload::Contract { .. } => "contract",
        }
    }

    /// Pure validation, run before any external call so that a rejected
    /// payload carries no side effects.
    pub(crate) fn validate(&self) -> ClientResult<()> {
        match self {
            MutationPayload::Profile { patch, .. } => {
                validate_profile_patch(patch)?;
                if let Some(reference) = &patch.avatar_id {
                    DocumentId::from_base58(reference)?;
                }
            }
            MutationPayload::Avatar(spec) => {
                validate_avatar_spec(spec)?;
            }
            MutationPayload::Post(input) => {
                validate_post_content(&input.content)?;
                if let Some(language) = &input.language {
                    validate_language(language)?;
                }
                for reference in [&input.reply_to_post_id, &input.quoted_post_id]
                    .into_iter()
                    .flatten()
                {
                    DocumentId::from_base58(reference)?;
                }
            }
            MutationPayload::Contract { definition } => {
                if !definition.is_object() {
                    return Err(ClientError::InvalidContractDefinition {
                        reason: "definition must be a JSON object".into(),
                    });
                }
            }
        }
        Ok(())
    }
}
