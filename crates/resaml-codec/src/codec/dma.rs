//! Small DMA descriptor.

use crate::codec::small_tag;
use crate::error::{ResourceError, Result};
use crate::record::{DmaChannelSpeed, DmaDescriptor, DmaTransferWidth};
use crate::tag::SMALL_DMA;

const FLAG_BUS_MASTER: u8 = 0x04; // bit 2

fn mask8_to_list(mask: u8) -> Vec<u8> {
    (0u8..8).filter(|bit| mask & (1 << bit) != 0).collect()
}

fn list_to_mask8(channels: &[u8]) -> Result<u8> {
    let mut mask = 0u8;
    for &ch in channels {
        if ch >= 8 {
            return Err(ResourceError::InvalidArgument(
                "dma channel does not fit the 8-bit mask",
            ));
        }
        mask |= 1 << ch;
    }
    Ok(mask)
}

pub(crate) fn decode(body: &[u8]) -> Result<DmaDescriptor> {
    if body.len() != 2 {
        return Err(ResourceError::MalformedStream(
            "dma descriptor body must be 2 bytes",
        ));
    }
    let flags = body[1];
    // Transfer width, bits 0:1 (0b11 is reserved).
    let width = match flags & 0x03 {
        0 => DmaTransferWidth::Width8,
        1 => DmaTransferWidth::Width8And16,
        2 => DmaTransferWidth::Width16,
        _ => {
            return Err(ResourceError::MalformedStream(
                "reserved dma transfer width",
            ))
        }
    };
    // Channel speed, bits 5:6.
    let speed = match (flags >> 5) & 0x03 {
        0 => DmaChannelSpeed::Compatibility,
        1 => DmaChannelSpeed::TypeA,
        2 => DmaChannelSpeed::TypeB,
        _ => DmaChannelSpeed::TypeF,
    };
    Ok(DmaDescriptor {
        width,
        bus_master: flags & FLAG_BUS_MASTER != 0,
        speed,
        channels: mask8_to_list(body[0]),
    })
}

pub(crate) fn encode(dma: &DmaDescriptor, out: &mut Vec<u8>) -> Result<()> {
    let mask = list_to_mask8(&dma.channels)?;
    let mut flags = match dma.width {
        DmaTransferWidth::Width8 => 0u8,
        DmaTransferWidth::Width8And16 => 1,
        DmaTransferWidth::Width16 => 2,
    };
    if dma.bus_master {
        flags |= FLAG_BUS_MASTER;
    }
    flags |= match dma.speed {
        DmaChannelSpeed::Compatibility => 0,
        DmaChannelSpeed::TypeA => 1 << 5,
        DmaChannelSpeed::TypeB => 2 << 5,
        DmaChannelSpeed::TypeF => 3 << 5,
    };
    out.push(small_tag(SMALL_DMA, 2));
    out.push(mask);
    out.push(flags);
    Ok(())
}

pub(crate) fn encoded_size(dma: &DmaDescriptor) -> Result<usize> {
    list_to_mask8(&dma.channels)?;
    Ok(3)
}

pub(crate) fn decoded_size(body: &[u8]) -> Result<usize> {
    if body.len() != 2 {
        return Err(ResourceError::MalformedStream(
            "dma descriptor body must be 2 bytes",
        ));
    }
    Ok(8 + 4 * body[0].count_ones() as usize)
}
