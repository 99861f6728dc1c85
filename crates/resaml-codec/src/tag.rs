//! Resource descriptor tag classification.
//!
//! Every descriptor starts with a one-byte tag. Bit 7 selects the header
//! encoding:
//!
//! - set: large resource. The tag byte itself is the type code and a 2-byte
//!   little-endian body length follows (header is 3 bytes, length excludes
//!   the header).
//! - clear: small resource. Bits 6:3 are the type code, bits 2:0 the body
//!   length (0-7), and the header is the tag byte alone.

use crate::error::{ResourceError, Result};

// Small resource type codes (tag bits 6:3).
pub const SMALL_IRQ: u8 = 0x04;
pub const SMALL_DMA: u8 = 0x05;
pub const SMALL_START_DEPENDENT: u8 = 0x06;
pub const SMALL_END_DEPENDENT: u8 = 0x07;
pub const SMALL_IO: u8 = 0x08;
pub const SMALL_FIXED_IO: u8 = 0x09;
pub const SMALL_VENDOR: u8 = 0x0E;
pub const SMALL_END_TAG: u8 = 0x0F;

// Large resource type codes (whole tag byte).
pub const LARGE_MEMORY24: u8 = 0x81;
pub const LARGE_VENDOR: u8 = 0x84;
pub const LARGE_MEMORY32: u8 = 0x85;
pub const LARGE_FIXED_MEMORY32: u8 = 0x86;
pub const LARGE_ADDRESS32: u8 = 0x87;
pub const LARGE_ADDRESS16: u8 = 0x88;
pub const LARGE_EXTENDED_IRQ: u8 = 0x89;
pub const LARGE_ADDRESS64: u8 = 0x8A;

/// Classification of a descriptor's first byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tag {
    pub large: bool,
    /// Type code: the whole tag byte for large resources, bits 6:3 for
    /// small ones.
    pub name: u8,
    /// Header length in bytes: 3 for large resources, 1 for small.
    pub header_len: usize,
}

/// Classifies a tag byte, rejecting type codes with no known descriptor.
pub fn classify(byte: u8) -> Result<Tag> {
    if byte & 0x80 != 0 {
        match byte {
            LARGE_MEMORY24 | LARGE_VENDOR | LARGE_MEMORY32 | LARGE_FIXED_MEMORY32
            | LARGE_ADDRESS32 | LARGE_ADDRESS16 | LARGE_EXTENDED_IRQ | LARGE_ADDRESS64 => Ok(Tag {
                large: true,
                name: byte,
                header_len: 3,
            }),
            _ => Err(ResourceError::InvalidResourceType { tag: byte }),
        }
    } else {
        let name = (byte >> 3) & 0x0F;
        match name {
            SMALL_IRQ | SMALL_DMA | SMALL_START_DEPENDENT | SMALL_END_DEPENDENT | SMALL_IO
            | SMALL_FIXED_IO | SMALL_VENDOR | SMALL_END_TAG => Ok(Tag {
                large: false,
                name,
                header_len: 1,
            }),
            _ => Err(ResourceError::InvalidResourceType { tag: byte }),
        }
    }
}

/// Classifies the descriptor at the start of `bytes` and reads its declared
/// body length.
pub fn header(bytes: &[u8]) -> Result<(Tag, usize)> {
    let first = *bytes
        .first()
        .ok_or(ResourceError::MalformedStream("empty descriptor header"))?;
    let tag = classify(first)?;
    let body_len = if tag.large {
        if bytes.len() < 3 {
            return Err(ResourceError::MalformedStream(
                "truncated large descriptor header",
            ));
        }
        usize::from(u16::from_le_bytes([bytes[1], bytes[2]]))
    } else {
        usize::from(first & 0x07)
    };
    Ok((tag, body_len))
}
