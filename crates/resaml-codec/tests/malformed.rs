//! Rejection paths: truncation, unknown tags, illegal flag values and the
//! strict exact-consumption rule.

use resaml_codec::length::list_length_of_stream;
use resaml_codec::{decode_stream, ResourceError};

fn expect_malformed(stream: &[u8]) {
    assert!(
        matches!(
            decode_stream(stream),
            Err(ResourceError::MalformedStream(_))
        ),
        "stream {stream:02X?} should be malformed"
    );
}

#[test]
fn empty_stream_has_no_end_tag() {
    expect_malformed(&[]);
}

#[test]
fn stream_without_end_tag_is_rejected() {
    // A valid IRQ descriptor, then nothing.
    expect_malformed(&[0x22, 0x01, 0x00]);
}

#[test]
fn trailing_bytes_after_end_tag_are_rejected() {
    // Exact consumption is required even though the EndTag itself is fine.
    expect_malformed(&[0x79, 0x00, 0x00]);
    expect_malformed(&[0x22, 0x01, 0x00, 0x79, 0x00, 0xFF]);
}

#[test]
fn unknown_type_codes_fail_with_the_offending_tag() {
    // Small type code 0x0A.
    assert_eq!(
        decode_stream(&[0x50, 0x79, 0x00]),
        Err(ResourceError::InvalidResourceType { tag: 0x50 })
    );
    // Large type code 0x90.
    assert_eq!(
        decode_stream(&[0x90, 0x00, 0x00, 0x79, 0x00]),
        Err(ResourceError::InvalidResourceType { tag: 0x90 })
    );
}

#[test]
fn truncated_large_header_is_rejected() {
    expect_malformed(&[0x87, 0x17]);
}

#[test]
fn declared_body_past_end_of_stream_is_rejected() {
    // IO descriptor declares 7 body bytes but only 2 follow.
    expect_malformed(&[0x47, 0x01, 0x70]);
}

#[test]
fn edge_active_low_irq_is_rejected() {
    // Info byte 0x09: edge-triggered plus active-low, outside the two
    // combinations the format allows.
    expect_malformed(&[0x23, 0x01, 0x00, 0x09, 0x79, 0x00]);
}

#[test]
fn level_active_high_irq_is_rejected() {
    expect_malformed(&[0x23, 0x01, 0x00, 0x00, 0x79, 0x00]);
}

#[test]
fn wrong_memory_body_lengths_are_rejected() {
    // Memory24 declares 8 body bytes instead of 9.
    let mut stream = vec![0x81, 0x08, 0x00];
    stream.extend_from_slice(&[0u8; 8]);
    stream.extend_from_slice(&[0x79, 0x00]);
    expect_malformed(&stream);

    // Memory32 declares 16 instead of 17.
    let mut stream = vec![0x85, 0x10, 0x00];
    stream.extend_from_slice(&[0u8; 16]);
    stream.extend_from_slice(&[0x79, 0x00]);
    expect_malformed(&stream);

    // FixedMemory32 declares 10 instead of 9.
    let mut stream = vec![0x86, 0x0A, 0x00];
    stream.extend_from_slice(&[0u8; 10]);
    stream.extend_from_slice(&[0x79, 0x00]);
    expect_malformed(&stream);
}

#[test]
fn wrong_dma_body_length_is_rejected() {
    // Channel mask with no flags byte (tag declares a 1-byte body).
    expect_malformed(&[0x29, 0x01, 0x79, 0x00]);
}

#[test]
fn reserved_dma_width_is_rejected() {
    expect_malformed(&[0x2A, 0x01, 0x03, 0x79, 0x00]);
}

#[test]
fn reserved_dependent_priority_is_rejected() {
    expect_malformed(&[0x31, 0x03, 0x79, 0x00]);
}

#[test]
fn extended_irq_with_empty_table_is_rejected() {
    expect_malformed(&[0x89, 0x02, 0x00, 0x01, 0x00, 0x79, 0x00]);
}

#[test]
fn extended_irq_table_overrunning_body_is_rejected() {
    // Claims two interrupts but the body only holds one.
    expect_malformed(&[0x89, 0x06, 0x00, 0x01, 0x02, 0x09, 0x00, 0x00, 0x00, 0x79, 0x00]);
}

#[test]
fn address32_below_minimum_body_is_rejected() {
    let mut stream = vec![0x87, 0x16, 0x00];
    stream.extend_from_slice(&[0u8; 0x16]);
    stream.extend_from_slice(&[0x79, 0x00]);
    expect_malformed(&stream);
}

#[test]
fn resource_source_without_terminator_is_rejected() {
    // Address16 with one trailer byte too few for index + NUL.
    let mut stream = vec![0x88, 0x0E, 0x00];
    stream.extend_from_slice(&[0u8; 13]);
    stream.push(0x01); // index byte, then no string at all
    stream.extend_from_slice(&[0x79, 0x00]);
    expect_malformed(&stream);

    // Non-NUL-terminated name.
    let mut stream = vec![0x88, 0x10, 0x00];
    stream.extend_from_slice(&[0u8; 13]);
    stream.extend_from_slice(&[0x01, b'A', b'B']);
    stream.extend_from_slice(&[0x79, 0x00]);
    expect_malformed(&stream);
}

#[test]
fn sizing_pass_rejects_what_the_decoder_rejects() {
    for stream in [
        &[][..],
        &[0x22, 0x01, 0x00][..],
        &[0x79, 0x00, 0x00][..],
        &[0x47, 0x01, 0x70][..],
        &[0x87, 0x17][..],
    ] {
        assert!(
            list_length_of_stream(stream).is_err(),
            "sizing accepted {stream:02X?}"
        );
    }
    assert_eq!(
        list_length_of_stream(&[0x50, 0x79, 0x00]),
        Err(ResourceError::InvalidResourceType { tag: 0x50 })
    );
}
