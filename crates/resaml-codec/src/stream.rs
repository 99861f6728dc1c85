//! End-to-end drivers over whole streams and lists.
//!
//! Both directions are a small Scanning -> Done | Error machine: classify
//! the next tag, hand the body to the matching codec, advance by the
//! consumed size, stop at the EndTag. Done requires exact consumption —
//! a stream with valid-looking records and an EndTag but leftover bytes is
//! still malformed, because a self-declared length somewhere miscounted.

use crate::codec;
use crate::error::{ResourceError, Result};
use crate::length;
use crate::record::ResourceRecord;
use crate::tag;

/// Decodes a complete AML resource byte stream into records.
///
/// Succeeds only when the stream terminates with the 2-byte small EndTag
/// and walking the self-declared record lengths consumes the buffer
/// exactly.
pub fn decode_stream(stream: &[u8]) -> Result<Vec<ResourceRecord>> {
    let mut records = Vec::new();
    let mut offset = 0usize;
    loop {
        if offset >= stream.len() {
            return Err(ResourceError::MalformedStream(
                "no end tag before end of stream",
            ));
        }
        let (tag, body_len) = tag::header(&stream[offset..])?;
        let body_start = offset + tag.header_len;
        let body_end = body_start
            .checked_add(body_len)
            .filter(|&end| end <= stream.len())
            .ok_or(ResourceError::MalformedStream(
                "descriptor body extends past end of stream",
            ))?;
        let record = codec::decode_record(tag, &stream[body_start..body_end])?;
        let done = record.is_end_tag();
        records.push(record);
        offset = body_end;
        if done {
            if offset != stream.len() {
                return Err(ResourceError::MalformedStream(
                    "trailing bytes after end tag",
                ));
            }
            return Ok(records);
        }
    }
}

/// Encodes a record list into a freshly allocated AML resource byte
/// stream. The list must hold exactly one EndTag, in final position.
pub fn encode_list(list: &[ResourceRecord]) -> Result<Vec<u8>> {
    length::validate_list(list)?;
    let mut out = Vec::new();
    for record in list {
        codec::encode_record(record, &mut out)?;
    }
    Ok(out)
}

/// Encodes into a caller-supplied buffer, preserving the two-call size
/// negotiation: when `out` is too short (a zero-length buffer is the
/// conventional first call) nothing is written and
/// [`ResourceError::BufferTooSmall`] reports the exact size to allocate.
/// Returns the number of bytes written.
pub fn encode_list_into(list: &[ResourceRecord], out: &mut [u8]) -> Result<usize> {
    let needed = length::stream_length_of_list(list)?;
    if out.len() < needed {
        return Err(ResourceError::BufferTooSmall { needed });
    }
    let bytes = encode_list(list)?;
    debug_assert_eq!(bytes.len(), needed);
    out[..bytes.len()].copy_from_slice(&bytes);
    Ok(bytes.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{EndTagDescriptor, FixedMemory32Descriptor, IoDescriptor};

    fn sample_list() -> Vec<ResourceRecord> {
        vec![
            ResourceRecord::Io(IoDescriptor {
                decode_16: true,
                minimum: 0x0070,
                maximum: 0x0070,
                alignment: 1,
                length: 2,
            }),
            ResourceRecord::FixedMemory32(FixedMemory32Descriptor {
                writeable: true,
                address: 0xFED0_0000,
                length: 0x400,
            }),
            ResourceRecord::EndTag(EndTagDescriptor { checksum: 0 }),
        ]
    }

    #[test]
    fn encode_requires_a_final_end_tag() {
        let mut list = sample_list();
        list.pop();
        assert_eq!(
            encode_list(&list),
            Err(ResourceError::InvalidArgument(
                "resource list does not end with an end tag"
            ))
        );
    }

    #[test]
    fn encode_rejects_an_early_end_tag() {
        let mut list = sample_list();
        list.insert(1, ResourceRecord::EndTag(EndTagDescriptor { checksum: 0 }));
        assert_eq!(
            encode_list(&list),
            Err(ResourceError::InvalidArgument(
                "end tag before the end of the resource list"
            ))
        );
    }

    #[test]
    fn negotiation_reports_exact_size_then_fills() {
        let list = sample_list();
        let needed = match encode_list_into(&list, &mut []) {
            Err(ResourceError::BufferTooSmall { needed }) => needed,
            other => panic!("expected BufferTooSmall, got {other:?}"),
        };
        let mut buf = vec![0u8; needed];
        assert_eq!(encode_list_into(&list, &mut buf).unwrap(), needed);
        assert_eq!(buf, encode_list(&list).unwrap());
    }

    #[test]
    fn undersized_by_one_still_negotiates() {
        let list = sample_list();
        let needed = encode_list(&list).unwrap().len();
        let mut buf = vec![0u8; needed - 1];
        assert_eq!(
            encode_list_into(&list, &mut buf),
            Err(ResourceError::BufferTooSmall { needed })
        );
    }
}
