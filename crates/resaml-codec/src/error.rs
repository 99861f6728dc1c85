use thiserror::Error;

pub type Result<T> = core::result::Result<T, ResourceError>;

/// Error taxonomy shared by the codec, the routing builder and the façade.
///
/// No path in this workspace retries internally; every error is surfaced to
/// the caller immediately and any partially written output is undefined.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResourceError {
    /// The caller-supplied output buffer cannot hold the result. Recoverable:
    /// `needed` is the exact byte count a retry must provide.
    #[error("output buffer too small ({needed} bytes required)")]
    BufferTooSmall { needed: usize },

    /// A descriptor tag that maps to no known resource type.
    #[error("unknown resource descriptor tag {tag:#04x}")]
    InvalidResourceType { tag: u8 },

    /// The byte stream violates the wire format: missing EndTag, truncated
    /// body, illegal flag combination, or bytes left over after the EndTag.
    #[error("malformed resource stream: {0}")]
    MalformedStream(&'static str),

    /// An evaluated operand object has the wrong shape or element type.
    #[error("bad operand data: {0}")]
    BadOperandData(&'static str),

    /// Caller bug: a record or list that can never be encoded.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// The external namespace collaborator failed to evaluate a method.
    #[error("evaluation of {method} failed: {reason}")]
    Evaluation {
        method: &'static str,
        reason: String,
    },
}
