use thiserror::Error;

/// Failures of the identifier codec.
///
/// Decoding any string that does not parse as base58, or that parses to a
/// value of the wrong width, is rejected here before it can reach a
/// document or a state transition.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IdentifierError {
    #[error("invalid base58 string: {0}")]
    Encoding(String),

    #[error("invalid identifier length: expected {expected} bytes, got {actual}")]
    Length { expected: usize, actual: usize },
}
