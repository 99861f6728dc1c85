//! Large memory range descriptors (24-bit, 32-bit and fixed 32-bit).

use crate::codec::{push_large_header, read_u16, read_u32};
use crate::error::{ResourceError, Result};
use crate::record::{FixedMemory32Descriptor, Memory24Descriptor, Memory32Descriptor};
use crate::tag::{LARGE_FIXED_MEMORY32, LARGE_MEMORY24, LARGE_MEMORY32};

const INFO_WRITEABLE: u8 = 0x01; // bit 0

const MEMORY24_BODY: usize = 9;
const MEMORY32_BODY: usize = 17;
const FIXED_MEMORY32_BODY: usize = 9;

pub(crate) fn decode_memory24(body: &[u8]) -> Result<Memory24Descriptor> {
    if body.len() != MEMORY24_BODY {
        return Err(ResourceError::MalformedStream(
            "memory24 body must be 9 bytes",
        ));
    }
    Ok(Memory24Descriptor {
        writeable: body[0] & INFO_WRITEABLE != 0,
        minimum: read_u16(body, 1),
        maximum: read_u16(body, 3),
        alignment: read_u16(body, 5),
        length: read_u16(body, 7),
    })
}

pub(crate) fn encode_memory24(mem: &Memory24Descriptor, out: &mut Vec<u8>) {
    push_large_header(out, LARGE_MEMORY24, MEMORY24_BODY);
    out.push(if mem.writeable { INFO_WRITEABLE } else { 0 });
    out.extend_from_slice(&mem.minimum.to_le_bytes());
    out.extend_from_slice(&mem.maximum.to_le_bytes());
    out.extend_from_slice(&mem.alignment.to_le_bytes());
    out.extend_from_slice(&mem.length.to_le_bytes());
}

pub(crate) fn memory24_decoded_size(body: &[u8]) -> Result<usize> {
    if body.len() != MEMORY24_BODY {
        return Err(ResourceError::MalformedStream(
            "memory24 body must be 9 bytes",
        ));
    }
    Ok(12)
}

pub(crate) fn decode_memory32(body: &[u8]) -> Result<Memory32Descriptor> {
    if body.len() != MEMORY32_BODY {
        return Err(ResourceError::MalformedStream(
            "memory32 body must be 17 bytes",
        ));
    }
    Ok(Memory32Descriptor {
        writeable: body[0] & INFO_WRITEABLE != 0,
        minimum: read_u32(body, 1),
        maximum: read_u32(body, 5),
        alignment: read_u32(body, 9),
        length: read_u32(body, 13),
    })
}

pub(crate) fn encode_memory32(mem: &Memory32Descriptor, out: &mut Vec<u8>) {
    push_large_header(out, LARGE_MEMORY32, MEMORY32_BODY);
    out.push(if mem.writeable { INFO_WRITEABLE } else { 0 });
    out.extend_from_slice(&mem.minimum.to_le_bytes());
    out.extend_from_slice(&mem.maximum.to_le_bytes());
    out.extend_from_slice(&mem.alignment.to_le_bytes());
    out.extend_from_slice(&mem.length.to_le_bytes());
}

pub(crate) fn memory32_decoded_size(body: &[u8]) -> Result<usize> {
    if body.len() != MEMORY32_BODY {
        return Err(ResourceError::MalformedStream(
            "memory32 body must be 17 bytes",
        ));
    }
    Ok(20)
}

pub(crate) fn decode_fixed_memory32(body: &[u8]) -> Result<FixedMemory32Descriptor> {
    if body.len() != FIXED_MEMORY32_BODY {
        return Err(ResourceError::MalformedStream(
            "fixed memory32 body must be 9 bytes",
        ));
    }
    Ok(FixedMemory32Descriptor {
        writeable: body[0] & INFO_WRITEABLE != 0,
        address: read_u32(body, 1),
        length: read_u32(body, 5),
    })
}

pub(crate) fn encode_fixed_memory32(mem: &FixedMemory32Descriptor, out: &mut Vec<u8>) {
    push_large_header(out, LARGE_FIXED_MEMORY32, FIXED_MEMORY32_BODY);
    out.push(if mem.writeable { INFO_WRITEABLE } else { 0 });
    out.extend_from_slice(&mem.address.to_le_bytes());
    out.extend_from_slice(&mem.length.to_le_bytes());
}

pub(crate) fn fixed_memory32_decoded_size(body: &[u8]) -> Result<usize> {
    if body.len() != FIXED_MEMORY32_BODY {
        return Err(ResourceError::MalformedStream(
            "fixed memory32 body must be 9 bytes",
        ));
    }
    Ok(12)
}
