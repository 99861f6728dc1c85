//! The two sizing passes of the two-pass conversion contract.
//!
//! Both walk their input once and report the exact size the matching
//! conversion will produce, without building anything, so a caller can
//! allocate the output in one shot. They apply the same rounding and
//! edge-case rules as the codecs; if the two ever disagree the contract is
//! broken, which the round-trip tests guard against.

use crate::codec;
use crate::error::{ResourceError, Result};
use crate::record::ResourceRecord;
use crate::tag;

/// Exact total in-memory byte length of the record list that
/// [`decode_stream`](crate::stream::decode_stream) would produce for
/// `stream` (the sum of each record's
/// [`byte_length`](ResourceRecord::byte_length)).
pub fn list_length_of_stream(stream: &[u8]) -> Result<usize> {
    let mut total = 0usize;
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
        let body = &stream[body_start..body_end];
        total += codec::decoded_size(tag, body)?;
        offset = body_end;
        if !tag.large && tag.name == tag::SMALL_END_TAG {
            if offset != stream.len() {
                return Err(ResourceError::MalformedStream(
                    "trailing bytes after end tag",
                ));
            }
            return Ok(total);
        }
    }
}

/// Exact total wire byte length that
/// [`encode_list`](crate::stream::encode_list) would produce for `list`,
/// including the terminating EndTag. Enforces the same list invariant as
/// the encoder: exactly one EndTag, in final position.
pub fn stream_length_of_list(list: &[ResourceRecord]) -> Result<usize> {
    validate_list(list)?;
    let mut total = 0usize;
    for record in list {
        total += codec::encoded_size(record)?;
    }
    Ok(total)
}

/// Shared list invariant check for the encode-side passes.
pub(crate) fn validate_list(list: &[ResourceRecord]) -> Result<()> {
    let Some((last, rest)) = list.split_last() else {
        return Err(ResourceError::InvalidArgument("resource list is empty"));
    };
    if !last.is_end_tag() {
        return Err(ResourceError::InvalidArgument(
            "resource list does not end with an end tag",
        ));
    }
    if rest.iter().any(ResourceRecord::is_end_tag) {
        return Err(ResourceError::InvalidArgument(
            "end tag before the end of the resource list",
        ));
    }
    Ok(())
}
