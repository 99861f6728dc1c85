//! Word/DWord/QWord address-space descriptors.
//!
//! All three share a 3-byte type/flags header followed by five range
//! fields at the descriptor's width and the optional ResourceSource
//! trailer. Flag bit positions (general flags byte): bit 0
//! consumer/producer, bit 1 decode type, bit 2 min fixed, bit 3 max fixed.

use crate::codec::{push_large_header, read_u16, read_u32, read_u64, source};
use crate::error::{ResourceError, Result};
use crate::record::{
    round_up_32, round_up_64, AddressDescriptor, AddressFlags, AddressResourceType, ResourceSource,
};
use crate::tag::{LARGE_ADDRESS16, LARGE_ADDRESS32, LARGE_ADDRESS64};

pub(crate) const ADDRESS16_MIN_BODY: usize = 13;
pub(crate) const ADDRESS32_MIN_BODY: usize = 23;
pub(crate) const ADDRESS64_MIN_BODY: usize = 43;

const FLAG_CONSUMER: u8 = 0x01;
const FLAG_SUBTRACTIVE_DECODE: u8 = 0x02;
const FLAG_MIN_FIXED: u8 = 0x04;
const FLAG_MAX_FIXED: u8 = 0x08;

fn decode_flags(byte: u8) -> AddressFlags {
    AddressFlags {
        consumer: byte & FLAG_CONSUMER != 0,
        subtractive_decode: byte & FLAG_SUBTRACTIVE_DECODE != 0,
        min_fixed: byte & FLAG_MIN_FIXED != 0,
        max_fixed: byte & FLAG_MAX_FIXED != 0,
    }
}

fn encode_flags(flags: &AddressFlags) -> u8 {
    let mut byte = 0u8;
    if flags.consumer {
        byte |= FLAG_CONSUMER;
    }
    if flags.subtractive_decode {
        byte |= FLAG_SUBTRACTIVE_DECODE;
    }
    if flags.min_fixed {
        byte |= FLAG_MIN_FIXED;
    }
    if flags.max_fixed {
        byte |= FLAG_MAX_FIXED;
    }
    byte
}

pub(crate) fn decode_address16(body: &[u8]) -> Result<AddressDescriptor<u16>> {
    if body.len() < ADDRESS16_MIN_BODY {
        return Err(ResourceError::MalformedStream(
            "address16 body below minimum",
        ));
    }
    Ok(AddressDescriptor {
        resource_type: AddressResourceType::from_wire(body[0]),
        flags: decode_flags(body[1]),
        type_specific: body[2],
        granularity: read_u16(body, 3),
        minimum: read_u16(body, 5),
        maximum: read_u16(body, 7),
        translation_offset: read_u16(body, 9),
        length: read_u16(body, 11),
        source: source::decode(&body[ADDRESS16_MIN_BODY..])?,
    })
}

pub(crate) fn decode_address32(body: &[u8]) -> Result<AddressDescriptor<u32>> {
    if body.len() < ADDRESS32_MIN_BODY {
        return Err(ResourceError::MalformedStream(
            "address32 body below minimum",
        ));
    }
    Ok(AddressDescriptor {
        resource_type: AddressResourceType::from_wire(body[0]),
        flags: decode_flags(body[1]),
        type_specific: body[2],
        granularity: read_u32(body, 3),
        minimum: read_u32(body, 7),
        maximum: read_u32(body, 11),
        translation_offset: read_u32(body, 15),
        length: read_u32(body, 19),
        source: source::decode(&body[ADDRESS32_MIN_BODY..])?,
    })
}

pub(crate) fn decode_address64(body: &[u8]) -> Result<AddressDescriptor<u64>> {
    if body.len() < ADDRESS64_MIN_BODY {
        return Err(ResourceError::MalformedStream(
            "address64 body below minimum",
        ));
    }
    Ok(AddressDescriptor {
        resource_type: AddressResourceType::from_wire(body[0]),
        flags: decode_flags(body[1]),
        type_specific: body[2],
        granularity: read_u64(body, 3),
        minimum: read_u64(body, 11),
        maximum: read_u64(body, 19),
        translation_offset: read_u64(body, 27),
        length: read_u64(body, 35),
        source: source::decode(&body[ADDRESS64_MIN_BODY..])?,
    })
}

fn push_header<T>(
    desc: &AddressDescriptor<T>,
    tag_byte: u8,
    min_body: usize,
    out: &mut Vec<u8>,
) -> Result<()> {
    source::validate(&desc.source)?;
    let body_len = min_body + ResourceSource::wire_len(&desc.source);
    push_large_header(out, tag_byte, body_len);
    out.push(desc.resource_type.to_wire());
    out.push(encode_flags(&desc.flags));
    out.push(desc.type_specific);
    Ok(())
}

pub(crate) fn encode_address16(desc: &AddressDescriptor<u16>, out: &mut Vec<u8>) -> Result<()> {
    push_header(desc, LARGE_ADDRESS16, ADDRESS16_MIN_BODY, out)?;
    out.extend_from_slice(&desc.granularity.to_le_bytes());
    out.extend_from_slice(&desc.minimum.to_le_bytes());
    out.extend_from_slice(&desc.maximum.to_le_bytes());
    out.extend_from_slice(&desc.translation_offset.to_le_bytes());
    out.extend_from_slice(&desc.length.to_le_bytes());
    source::encode(&desc.source, out);
    Ok(())
}

pub(crate) fn encode_address32(desc: &AddressDescriptor<u32>, out: &mut Vec<u8>) -> Result<()> {
    push_header(desc, LARGE_ADDRESS32, ADDRESS32_MIN_BODY, out)?;
    out.extend_from_slice(&desc.granularity.to_le_bytes());
    out.extend_from_slice(&desc.minimum.to_le_bytes());
    out.extend_from_slice(&desc.maximum.to_le_bytes());
    out.extend_from_slice(&desc.translation_offset.to_le_bytes());
    out.extend_from_slice(&desc.length.to_le_bytes());
    source::encode(&desc.source, out);
    Ok(())
}

pub(crate) fn encode_address64(desc: &AddressDescriptor<u64>, out: &mut Vec<u8>) -> Result<()> {
    push_header(desc, LARGE_ADDRESS64, ADDRESS64_MIN_BODY, out)?;
    out.extend_from_slice(&desc.granularity.to_le_bytes());
    out.extend_from_slice(&desc.minimum.to_le_bytes());
    out.extend_from_slice(&desc.maximum.to_le_bytes());
    out.extend_from_slice(&desc.translation_offset.to_le_bytes());
    out.extend_from_slice(&desc.length.to_le_bytes());
    source::encode(&desc.source, out);
    Ok(())
}

/// Wire size of the full descriptor (header + body + trailer).
pub(crate) fn encoded_size<T>(desc: &AddressDescriptor<T>, min_body: usize) -> Result<usize> {
    source::validate(&desc.source)?;
    Ok(3 + min_body + ResourceSource::wire_len(&desc.source))
}

/// In-memory size of the record this body decodes to: the fixed record
/// size plus the trailer bytes, rounded to the 4-byte grid (8-byte for
/// Address64).
pub(crate) fn decoded_size(
    body: &[u8],
    min_body: usize,
    record_base: usize,
    round_64: bool,
) -> Result<usize> {
    if body.len() < min_body {
        return Err(ResourceError::MalformedStream(
            "address descriptor body below minimum",
        ));
    }
    let total = record_base + (body.len() - min_body);
    Ok(if round_64 {
        round_up_64(total)
    } else {
        round_up_32(total)
    })
}
