//! Per-kind descriptor codecs.
//!
//! Each submodule owns one descriptor family: a `decode` that reads the
//! body bytes of one descriptor into its record, an `encode` that writes
//! tag, length header and body, and the size-only twins used by the
//! length calculators. All multi-byte fields are little-endian and moved
//! byte-by-byte; nothing is reinterpreted across alignment boundaries.

pub(crate) mod address;
pub(crate) mod dma;
pub(crate) mod io;
pub(crate) mod irq;
pub(crate) mod memory;
pub(crate) mod misc;
pub(crate) mod source;
pub(crate) mod vendor;

use crate::error::{ResourceError, Result};
use crate::record::ResourceRecord;
use crate::tag::{self, Tag};

/// Builds a small-resource tag byte from a type code and body length.
pub(crate) fn small_tag(name: u8, body_len: usize) -> u8 {
    debug_assert!(body_len <= 7);
    (name << 3) | (body_len as u8 & 0x07)
}

/// Writes a large-resource header: tag byte plus 2-byte LE body length.
pub(crate) fn push_large_header(out: &mut Vec<u8>, tag_byte: u8, body_len: usize) {
    debug_assert!(body_len <= usize::from(u16::MAX));
    out.push(tag_byte);
    out.extend_from_slice(&(body_len as u16).to_le_bytes());
}

pub(crate) fn read_u16(body: &[u8], off: usize) -> u16 {
    u16::from_le_bytes([body[off], body[off + 1]])
}

pub(crate) fn read_u32(body: &[u8], off: usize) -> u32 {
    u32::from_le_bytes([body[off], body[off + 1], body[off + 2], body[off + 3]])
}

pub(crate) fn read_u64(body: &[u8], off: usize) -> u64 {
    u64::from_le_bytes([
        body[off],
        body[off + 1],
        body[off + 2],
        body[off + 3],
        body[off + 4],
        body[off + 5],
        body[off + 6],
        body[off + 7],
    ])
}

/// Decodes the body of one classified descriptor.
pub(crate) fn decode_record(tag: Tag, body: &[u8]) -> Result<ResourceRecord> {
    if tag.large {
        match tag.name {
            tag::LARGE_MEMORY24 => memory::decode_memory24(body).map(ResourceRecord::Memory24),
            tag::LARGE_VENDOR => vendor::decode(body).map(ResourceRecord::VendorDefined),
            tag::LARGE_MEMORY32 => memory::decode_memory32(body).map(ResourceRecord::Memory32),
            tag::LARGE_FIXED_MEMORY32 => {
                memory::decode_fixed_memory32(body).map(ResourceRecord::FixedMemory32)
            }
            tag::LARGE_ADDRESS16 => address::decode_address16(body).map(ResourceRecord::Address16),
            tag::LARGE_ADDRESS32 => address::decode_address32(body).map(ResourceRecord::Address32),
            tag::LARGE_ADDRESS64 => address::decode_address64(body).map(ResourceRecord::Address64),
            tag::LARGE_EXTENDED_IRQ => {
                irq::decode_extended(body).map(ResourceRecord::ExtendedIrq)
            }
            other => Err(ResourceError::InvalidResourceType { tag: other }),
        }
    } else {
        match tag.name {
            tag::SMALL_IRQ => irq::decode(body).map(ResourceRecord::Irq),
            tag::SMALL_DMA => dma::decode(body).map(ResourceRecord::Dma),
            tag::SMALL_START_DEPENDENT => {
                misc::decode_start_dependent(body).map(ResourceRecord::StartDependentFunctions)
            }
            tag::SMALL_END_DEPENDENT => {
                misc::decode_end_dependent(body).map(|()| ResourceRecord::EndDependentFunctions)
            }
            tag::SMALL_IO => io::decode(body).map(ResourceRecord::Io),
            tag::SMALL_FIXED_IO => io::decode_fixed(body).map(ResourceRecord::FixedIo),
            tag::SMALL_VENDOR => vendor::decode(body).map(ResourceRecord::VendorDefined),
            tag::SMALL_END_TAG => misc::decode_end_tag(body).map(ResourceRecord::EndTag),
            other => Err(ResourceError::InvalidResourceType { tag: other }),
        }
    }
}

/// Appends the wire encoding of one record to `out`.
pub(crate) fn encode_record(record: &ResourceRecord, out: &mut Vec<u8>) -> Result<()> {
    match record {
        ResourceRecord::Irq(irq) => irq::encode(irq, out),
        ResourceRecord::Dma(dma) => dma::encode(dma, out),
        ResourceRecord::StartDependentFunctions(dep) => {
            misc::encode_start_dependent(dep, out);
            Ok(())
        }
        ResourceRecord::EndDependentFunctions => {
            misc::encode_end_dependent(out);
            Ok(())
        }
        ResourceRecord::Io(io) => {
            io::encode(io, out);
            Ok(())
        }
        ResourceRecord::FixedIo(fio) => {
            io::encode_fixed(fio, out);
            Ok(())
        }
        ResourceRecord::VendorDefined(vendor) => vendor::encode(vendor, out),
        ResourceRecord::EndTag(end) => {
            misc::encode_end_tag(end, out);
            Ok(())
        }
        ResourceRecord::Memory24(mem) => {
            memory::encode_memory24(mem, out);
            Ok(())
        }
        ResourceRecord::Memory32(mem) => {
            memory::encode_memory32(mem, out);
            Ok(())
        }
        ResourceRecord::FixedMemory32(mem) => {
            memory::encode_fixed_memory32(mem, out);
            Ok(())
        }
        ResourceRecord::Address16(addr) => address::encode_address16(addr, out),
        ResourceRecord::Address32(addr) => address::encode_address32(addr, out),
        ResourceRecord::Address64(addr) => address::encode_address64(addr, out),
        ResourceRecord::ExtendedIrq(eirq) => irq::encode_extended(eirq, out),
    }
}

/// Exact wire size `encode_record` will produce for `record`, applying the
/// same validation, without building any bytes.
pub(crate) fn encoded_size(record: &ResourceRecord) -> Result<usize> {
    match record {
        ResourceRecord::Irq(irq) => irq::encoded_size(irq),
        ResourceRecord::Dma(dma) => dma::encoded_size(dma),
        ResourceRecord::StartDependentFunctions(dep) => Ok(misc::start_dependent_encoded_size(dep)),
        ResourceRecord::EndDependentFunctions => Ok(1),
        ResourceRecord::Io(_) => Ok(8),
        ResourceRecord::FixedIo(_) => Ok(4),
        ResourceRecord::VendorDefined(vendor) => vendor::encoded_size(vendor),
        ResourceRecord::EndTag(_) => Ok(2),
        ResourceRecord::Memory24(_) => Ok(12),
        ResourceRecord::Memory32(_) => Ok(20),
        ResourceRecord::FixedMemory32(_) => Ok(12),
        ResourceRecord::Address16(addr) => address::encoded_size(addr, address::ADDRESS16_MIN_BODY),
        ResourceRecord::Address32(addr) => address::encoded_size(addr, address::ADDRESS32_MIN_BODY),
        ResourceRecord::Address64(addr) => address::encoded_size(addr, address::ADDRESS64_MIN_BODY),
        ResourceRecord::ExtendedIrq(eirq) => irq::extended_encoded_size(eirq),
    }
}

/// In-memory size the record decoded from this body would report, without
/// building the record. Mirrors [`ResourceRecord::byte_length`].
pub(crate) fn decoded_size(tag: Tag, body: &[u8]) -> Result<usize> {
    if tag.large {
        match tag.name {
            tag::LARGE_MEMORY24 => memory::memory24_decoded_size(body),
            tag::LARGE_VENDOR => Ok(vendor::decoded_size(body)),
            tag::LARGE_MEMORY32 => memory::memory32_decoded_size(body),
            tag::LARGE_FIXED_MEMORY32 => memory::fixed_memory32_decoded_size(body),
            tag::LARGE_ADDRESS16 => {
                address::decoded_size(body, address::ADDRESS16_MIN_BODY, 16, false)
            }
            tag::LARGE_ADDRESS32 => {
                address::decoded_size(body, address::ADDRESS32_MIN_BODY, 24, false)
            }
            tag::LARGE_ADDRESS64 => {
                address::decoded_size(body, address::ADDRESS64_MIN_BODY, 48, true)
            }
            tag::LARGE_EXTENDED_IRQ => irq::extended_decoded_size(body),
            other => Err(ResourceError::InvalidResourceType { tag: other }),
        }
    } else {
        match tag.name {
            tag::SMALL_IRQ => irq::decoded_size(body),
            tag::SMALL_DMA => dma::decoded_size(body),
            tag::SMALL_START_DEPENDENT => misc::start_dependent_decoded_size(body),
            tag::SMALL_END_DEPENDENT => misc::end_dependent_decoded_size(body),
            tag::SMALL_IO => io::decoded_size(body),
            tag::SMALL_FIXED_IO => io::fixed_decoded_size(body),
            tag::SMALL_VENDOR => Ok(vendor::decoded_size(body)),
            tag::SMALL_END_TAG => misc::end_tag_decoded_size(body),
            other => Err(ResourceError::InvalidResourceType { tag: other }),
        }
    }
}
