use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Width of the entropy value mixed into each mutation, in bytes.
pub const ENTROPY_LEN: usize = 32;

/// Fresh randomness for one state transition.
///
/// A new value is drawn for every mutation and moved into the transition it
/// was drawn for; entropy is never persisted and never reused. Uniqueness of
/// derived document identifiers rests on this.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Entropy([u8; ENTROPY_LEN]);

impl Entropy {
    /// Wrap raw entropy bytes.
    pub const fn from_bytes(bytes: [u8; ENTROPY_LEN]) -> Self {
        Self(bytes)
    }

    /// The raw 32 bytes.
    pub const fn as_bytes(&self) -> &[u8; ENTROPY_LEN] {
        &self.0
    }

    /// Consume into the raw byte array.
    pub const fn to_bytes(self) -> [u8; ENTROPY_LEN] {
        self.0
    }

    /// Hex form, used when the platform gateway expects a string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for Entropy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entropy({}..)", hex::encode(&self.0[..4]))
    }
}

impl Serialize for Entropy {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            serializer.serialize_str(&self.to_hex())
        } else {
            serializer.serialize_bytes(&self.0)
        }
    }
}

impl<'de> Deserialize<'de> for Entropy {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntropyVisitor;

        impl<'de> Visitor<'de> for EntropyVisitor {
            type Value = Entropy;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "a 64-char hex string or 32 raw bytes")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                let bytes = hex::decode(v).map_err(de::Error::custom)?;
                self.visit_bytes(&bytes)
            }

            fn visit_bytes<E: de::Error>(self, v: &[u8]) -> Result<Self::Value, E> {
                if v.len() != ENTROPY_LEN {
                    return Err(de::Error::invalid_length(v.len(), &self));
                }
                let mut arr = [0u8; ENTROPY_LEN];
                arr.copy_from_slice(v);
                Ok(Entropy(arr))
            }

            fn visit_seq<A: de::SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
                let mut arr = [0u8; ENTROPY_LEN];
                for (i, slot) in arr.iter_mut().enumerate() {
                    *slot = seq
                        .next_element()?
                        .ok_or_else(|| de::Error::invalid_length(i, &self))?;
                }
                if seq.next_element::<u8>()?.is_some() {
                    return Err(de::Error::invalid_length(ENTROPY_LEN + 1, &self));
                }
                Ok(Entropy(arr))
            }
        }

        if deserializer.is_human_readable() {
            deserializer.deserialize_str(EntropyVisitor)
        } else {
            deserializer.deserialize_bytes(EntropyVisitor)
        }
    }
}
