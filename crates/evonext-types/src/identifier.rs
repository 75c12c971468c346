use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::IdentifierError;

/// Width of every platform identifier, in bytes.
pub const IDENTIFIER_LEN: usize = 32;

macro_rules! platform_identifier {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name([u8; IDENTIFIER_LEN]);

        impl $name {
            /// Wrap a raw 32-byte identifier.
            pub const fn from_bytes(bytes: [u8; IDENTIFIER_LEN]) -> Self {
                Self(bytes)
            }

            /// The canonical binary form.
            pub const fn as_bytes(&self) -> &[u8; IDENTIFIER_LEN] {
                &self.0
            }

            /// Consume into the raw byte array.
            pub const fn to_bytes(self) -> [u8; IDENTIFIER_LEN] {
                self.0
            }

            /// External display form (base58).
            pub fn to_base58(&self) -> String {
                bs58::encode(&self.0).into_string()
            }

            /// Parse the external display form.
            ///
            /// Fails when the input is not valid base58 or does not decode to
            /// exactly 32 bytes.
            pub fn from_base58(s: &str) -> Result<Self, IdentifierError> {
                let bytes = bs58::decode(s)
                    .into_vec()
                    .map_err(|e| IdentifierError::Encoding(e.to_string()))?;
                if bytes.len() != IDENTIFIER_LEN {
                    return Err(IdentifierError::Length {
                        expected: IDENTIFIER_LEN,
                        actual: bytes.len(),
                    });
                }
                let mut arr = [0u8; IDENTIFIER_LEN];
                arr.copy_from_slice(&bytes);
                Ok(Self(arr))
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                let b58 = self.to_base58();
                let head = &b58[..b58.len().min(8)];
                write!(f, "{}({}..)", stringify!($name), head)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.to_base58())
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                if serializer.is_human_readable() {
                    serializer.serialize_str(&self.to_base58())
                } else {
                    serializer.serialize_bytes(&self.0)
                }
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                struct IdVisitor;

                impl<'de> Visitor<'de> for IdVisitor {
                    type Value = $name;

                    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                        write!(f, "a base58 string or 32 raw bytes")
                    }

                    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                        $name::from_base58(v).map_err(de::Error::custom)
                    }

                    fn visit_bytes<E: de::Error>(self, v: &[u8]) -> Result<Self::Value, E> {
                        if v.len() != IDENTIFIER_LEN {
                            return Err(de::Error::invalid_length(v.len(), &self));
                        }
                        let mut arr = [0u8; IDENTIFIER_LEN];
                        arr.copy_from_slice(v);
                        Ok($name::from_bytes(arr))
                    }

                    fn visit_seq<A: de::SeqAccess<'de>>(
                        self,
                        mut seq: A,
                    ) -> Result<Self::Value, A::Error> {
                        let mut arr = [0u8; IDENTIFIER_LEN];
                        for (i, slot) in arr.iter_mut().enumerate() {
                            *slot = seq
                                .next_element()?
                                .ok_or_else(|| de::Error::invalid_length(i, &self))?;
                        }
                        if seq.next_element::<u8>()?.is_some() {
                            return Err(de::Error::invalid_length(IDENTIFIER_LEN + 1, &self));
                        }
                        Ok($name::from_bytes(arr))
                    }
                }

                if deserializer.is_human_readable() {
                    deserializer.deserialize_str(IdVisitor)
                } else {
                    deserializer.deserialize_bytes(IdVisitor)
                }
            }
        }
    };
}

platform_identifier!(
    /// Identity of a platform account.
    ///
    /// Serializes as a base58 string in human-readable formats (JSON) and as
    /// the canonical 32 raw bytes in binary formats (the signed wire form).
    IdentityId
);

platform_identifier!(
    /// Identifier of a platform document.
    ///
    /// Same wire shape as [`IdentityId`]; a distinct type so that a document
    /// reference can never be passed where an identity is expected.
    DocumentId
);

platform_identifier!(
    /// Identifier of a data contract.
    ContractId
);
