//! Small I/O port descriptors.

use crate::codec::{read_u16, small_tag};
use crate::error::{ResourceError, Result};
use crate::record::{FixedIoDescriptor, IoDescriptor};
use crate::tag::{SMALL_FIXED_IO, SMALL_IO};

const INFO_DECODE_16: u8 = 0x01; // bit 0

/// Fixed I/O addresses are 10-bit ISA addresses.
const FIXED_IO_ADDRESS_MASK: u16 = 0x03FF;

pub(crate) fn decode(body: &[u8]) -> Result<IoDescriptor> {
    if body.len() != 7 {
        return Err(ResourceError::MalformedStream(
            "io descriptor body must be 7 bytes",
        ));
    }
    Ok(IoDescriptor {
        decode_16: body[0] & INFO_DECODE_16 != 0,
        minimum: read_u16(body, 1),
        maximum: read_u16(body, 3),
        alignment: body[5],
        length: body[6],
    })
}

pub(crate) fn encode(io: &IoDescriptor, out: &mut Vec<u8>) {
    out.push(small_tag(SMALL_IO, 7));
    out.push(if io.decode_16 { INFO_DECODE_16 } else { 0 });
    out.extend_from_slice(&io.minimum.to_le_bytes());
    out.extend_from_slice(&io.maximum.to_le_bytes());
    out.push(io.alignment);
    out.push(io.length);
}

pub(crate) fn decoded_size(body: &[u8]) -> Result<usize> {
    if body.len() != 7 {
        return Err(ResourceError::MalformedStream(
            "io descriptor body must be 7 bytes",
        ));
    }
    Ok(12)
}

pub(crate) fn decode_fixed(body: &[u8]) -> Result<FixedIoDescriptor> {
    if body.len() != 3 {
        return Err(ResourceError::MalformedStream(
            "fixed io descriptor body must be 3 bytes",
        ));
    }
    Ok(FixedIoDescriptor {
        address: read_u16(body, 0) & FIXED_IO_ADDRESS_MASK,
        length: body[2],
    })
}

pub(crate) fn encode_fixed(fio: &FixedIoDescriptor, out: &mut Vec<u8>) {
    out.push(small_tag(SMALL_FIXED_IO, 3));
    out.extend_from_slice(&(fio.address & FIXED_IO_ADDRESS_MASK).to_le_bytes());
    out.push(fio.length);
}

pub(crate) fn fixed_decoded_size(body: &[u8]) -> Result<usize> {
    if body.len() != 3 {
        return Err(ResourceError::MalformedStream(
            "fixed io descriptor body must be 3 bytes",
        ));
    }
    Ok(8)
}
