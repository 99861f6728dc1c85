//! Dependent-function markers and the EndTag.

use crate::codec::small_tag;
use crate::error::{ResourceError, Result};
use crate::record::{DependentPriority, EndTagDescriptor, StartDependentFunctions};
use crate::tag::{SMALL_END_DEPENDENT, SMALL_END_TAG, SMALL_START_DEPENDENT};

fn priority_from_wire(bits: u8) -> Result<DependentPriority> {
    match bits {
        0 => Ok(DependentPriority::Good),
        1 => Ok(DependentPriority::Acceptable),
        2 => Ok(DependentPriority::SubOptimal),
        _ => Err(ResourceError::MalformedStream(
            "reserved dependent function priority",
        )),
    }
}

fn priority_to_wire(priority: DependentPriority) -> u8 {
    match priority {
        DependentPriority::Good => 0,
        DependentPriority::Acceptable => 1,
        DependentPriority::SubOptimal => 2,
    }
}

fn is_default(dep: &StartDependentFunctions) -> bool {
    dep.compatibility == DependentPriority::Acceptable
        && dep.performance == DependentPriority::Acceptable
}

pub(crate) fn decode_start_dependent(body: &[u8]) -> Result<StartDependentFunctions> {
    match body.len() {
        // Priority byte omitted: both priorities default to Acceptable.
        0 => Ok(StartDependentFunctions {
            compatibility: DependentPriority::Acceptable,
            performance: DependentPriority::Acceptable,
        }),
        1 => Ok(StartDependentFunctions {
            compatibility: priority_from_wire(body[0] & 0x03)?,
            performance: priority_from_wire((body[0] >> 2) & 0x03)?,
        }),
        _ => Err(ResourceError::MalformedStream(
            "start-dependent body must be 0 or 1 bytes",
        )),
    }
}

pub(crate) fn encode_start_dependent(dep: &StartDependentFunctions, out: &mut Vec<u8>) {
    if is_default(dep) {
        out.push(small_tag(SMALL_START_DEPENDENT, 0));
    } else {
        out.push(small_tag(SMALL_START_DEPENDENT, 1));
        out.push(priority_to_wire(dep.compatibility) | (priority_to_wire(dep.performance) << 2));
    }
}

pub(crate) fn start_dependent_encoded_size(dep: &StartDependentFunctions) -> usize {
    if is_default(dep) {
        1
    } else {
        2
    }
}

pub(crate) fn start_dependent_decoded_size(body: &[u8]) -> Result<usize> {
    if body.len() > 1 {
        return Err(ResourceError::MalformedStream(
            "start-dependent body must be 0 or 1 bytes",
        ));
    }
    Ok(8)
}

pub(crate) fn decode_end_dependent(body: &[u8]) -> Result<()> {
    if !body.is_empty() {
        return Err(ResourceError::MalformedStream(
            "end-dependent descriptor carries no body",
        ));
    }
    Ok(())
}

pub(crate) fn encode_end_dependent(out: &mut Vec<u8>) {
    out.push(small_tag(SMALL_END_DEPENDENT, 0));
}

pub(crate) fn end_dependent_decoded_size(body: &[u8]) -> Result<usize> {
    decode_end_dependent(body)?;
    Ok(4)
}

pub(crate) fn decode_end_tag(body: &[u8]) -> Result<EndTagDescriptor> {
    if body.len() != 1 {
        return Err(ResourceError::MalformedStream(
            "end tag body must be 1 byte",
        ));
    }
    Ok(EndTagDescriptor { checksum: body[0] })
}

pub(crate) fn encode_end_tag(end: &EndTagDescriptor, out: &mut Vec<u8>) {
    out.push(small_tag(SMALL_END_TAG, 1));
    out.push(end.checksum);
}

pub(crate) fn end_tag_decoded_size(body: &[u8]) -> Result<usize> {
    decode_end_tag(body)?;
    Ok(4)
}
