use evonext_types::{DocumentId, IdentityId};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{DocumentError, DocumentResult};

/// Hard protocol limit on post content, in characters.
pub const MAX_POST_CONTENT_CHARS: usize = 500;

/// Inclusive avatar encoding version range.
pub const MIN_AVATAR_VERSION: u32 = 1;
pub const MAX_AVATAR_VERSION: u32 = 10;

/// Inclusive avatar data length range, in characters.
pub const MIN_AVATAR_DATA_CHARS: usize = 16;
pub const MAX_AVATAR_DATA_CHARS: usize = 128;

/// Document kinds the client can submit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentType {
    Profile,
    Avatar,
    Post,
}

impl DocumentType {
    /// The document type name used in the platform contract.
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentType::Profile => "profile",
            DocumentType::Avatar => "avatar",
            DocumentType::Post => "post",
        }
    }
}

impl std::fmt::Display for DocumentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user's profile record.
///
/// No `avatar_id` means "no avatar set"; it is never encoded as a
/// zero-filled placeholder.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileDocument {
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_id: Option<DocumentId>,
}

/// A user's avatar record: a versioned, compact string encoding.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvatarDocument {
    pub version: u32,
    pub data: String,
}

/// A post record.
///
/// The platform schema keeps a single primary hashtag and a single first
/// mention rather than lists; later occurrences are dropped at assembly.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDocument {
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_to_post_id: Option<DocumentId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quoted_post_id: Option<DocumentId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_mention_id: Option<IdentityId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_hashtag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_sensitive: Option<bool>,
}

macro_rules! document_impl {
    ($name:ident, $kind:expr) => {
        impl $name {
            /// The document type this value encodes.
            pub fn document_type() -> DocumentType {
                $kind
            }

            /// The JSON form submitted to the platform.
            pub fn to_value(&self) -> DocumentResult<Value> {
                serde_json::to_value(self).map_err(|e| DocumentError::Serialization(e.to_string()))
            }
        }
    };
}

document_impl!(ProfileDocument, DocumentType::Profile);
document_impl!(AvatarDocument, DocumentType::Avatar);
document_impl!(PostDocument, DocumentType::Post);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_fields_are_omitted() {
        let doc = PostDocument {
            content: "hello".into(),
            media_url: None,
            reply_to_post_id: None,
            quoted_post_id: None,
            first_mention_id: None,
            primary_hashtag: None,
            language: None,
            is_sensitive: None,
        };
        let value = doc.to_value().unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.len(), 1);
        assert_eq!(obj["content"], "hello");
    }

    #[test]
    fn present_fields_use_camel_case() {
        let doc = PostDocument {
            content: "hi".into(),
            media_url: Some("https://example.com/a.png".into()),
            reply_to_post_id: Some(DocumentId::from_bytes([1; 32])),
            quoted_post_id: None,
            first_mention_id: None,
            primary_hashtag: Some("one".into()),
            language: Some("en".into()),
            is_sensitive: Some(false),
        };
        let value = doc.to_value().unwrap();
        let obj = value.as_object().unwrap();
        assert!(obj.contains_key("mediaUrl"));
        assert!(obj.contains_key("replyToPostId"));
        assert!(obj.contains_key("primaryHashtag"));
        assert!(obj.contains_key("isSensitive"));
    }

    #[test]
    fn references_encode_as_base58_strings() {
        let avatar = DocumentId::from_bytes([9; 32]);
        let doc = ProfileDocument {
            display_name: "Alice".into(),
            bio: None,
            avatar_id: Some(avatar),
        };
        let value = doc.to_value().unwrap();
        assert_eq!(value["avatarId"], avatar.to_base58());
    }

    #[test]
    fn json_roundtrip() {
        let doc = ProfileDocument {
            display_name: "Alice".into(),
            bio: Some("hi".into()),
            avatar_id: None,
        };
        let json = serde_json::to_string(&doc).unwrap();
        let parsed: ProfileDocument = serde_json::from_str(&json).unwrap();
        assert_eq!(doc, parsed);
    }

    #[test]
    fn document_type_names() {
        assert_eq!(DocumentType::Profile.as_str(), "profile");
        assert_eq!(DocumentType::Avatar.as_str(), "avatar");
        assert_eq!(DocumentType::Post.as_str(), "post");
    }
}
