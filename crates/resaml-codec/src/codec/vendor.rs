//! Vendor-defined descriptors. The encoding is a pure function of payload
//! size: small when the payload fits the 3-bit length field (0-7 bytes),
//! large otherwise.

use crate::codec::{push_large_header, small_tag};
use crate::error::{ResourceError, Result};
use crate::record::{round_up_32, VendorDescriptor};
use crate::tag::{LARGE_VENDOR, SMALL_VENDOR};

const SMALL_MAX_PAYLOAD: usize = 7;
const LARGE_MAX_PAYLOAD: usize = u16::MAX as usize;

pub(crate) fn decode(body: &[u8]) -> Result<VendorDescriptor> {
    Ok(VendorDescriptor {
        data: body.to_vec(),
    })
}

pub(crate) fn encode(vendor: &VendorDescriptor, out: &mut Vec<u8>) -> Result<()> {
    if vendor.data.len() <= SMALL_MAX_PAYLOAD {
        out.push(small_tag(SMALL_VENDOR, vendor.data.len()));
    } else if vendor.data.len() <= LARGE_MAX_PAYLOAD {
        push_large_header(out, LARGE_VENDOR, vendor.data.len());
    } else {
        return Err(ResourceError::InvalidArgument(
            "vendor payload exceeds a large descriptor body",
        ));
    }
    out.extend_from_slice(&vendor.data);
    Ok(())
}

pub(crate) fn encoded_size(vendor: &VendorDescriptor) -> Result<usize> {
    if vendor.data.len() <= SMALL_MAX_PAYLOAD {
        Ok(1 + vendor.data.len())
    } else if vendor.data.len() <= LARGE_MAX_PAYLOAD {
        Ok(3 + vendor.data.len())
    } else {
        Err(ResourceError::InvalidArgument(
            "vendor payload exceeds a large descriptor body",
        ))
    }
}

pub(crate) fn decoded_size(body: &[u8]) -> usize {
    round_up_32(4 + body.len())
}
