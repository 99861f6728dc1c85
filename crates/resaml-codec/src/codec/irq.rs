//! Small IRQ and large extended IRQ descriptors.

use crate::codec::{push_large_header, read_u32, small_tag, source};
use crate::error::{ResourceError, Result};
use crate::record::{
    round_up_32, ExtendedIrqDescriptor, IrqDescriptor, Polarity, ResourceSource, Sharing,
    Triggering,
};
use crate::tag::{LARGE_EXTENDED_IRQ, SMALL_IRQ};

// Small IRQ information byte (the optional third body byte).
const INFO_TRIGGER_EDGE: u8 = 0x01; // bit 0
const INFO_POLARITY_LOW: u8 = 0x08; // bit 3
const INFO_SHARED: u8 = 0x10; // bit 4

// Extended IRQ flags byte.
const EXT_CONSUMER: u8 = 0x01; // bit 0
const EXT_TRIGGER_EDGE: u8 = 0x02; // bit 1
const EXT_POLARITY_LOW: u8 = 0x04; // bit 2
const EXT_SHARED: u8 = 0x08; // bit 3

/// The ACPI specification only allows edge-triggered active-high or
/// level-triggered active-low interrupts on the legacy IRQ descriptor.
fn combination_is_legal(triggering: Triggering, polarity: Polarity) -> bool {
    matches!(
        (triggering, polarity),
        (Triggering::Edge, Polarity::ActiveHigh) | (Triggering::Level, Polarity::ActiveLow)
    )
}

fn mask16_to_list(mask: u16) -> Vec<u8> {
    (0u8..16).filter(|bit| mask & (1 << bit) != 0).collect()
}

fn list_to_mask16(interrupts: &[u8]) -> Result<u16> {
    let mut mask = 0u16;
    for &irq in interrupts {
        if irq >= 16 {
            return Err(ResourceError::InvalidArgument(
                "irq number does not fit the 16-bit mask",
            ));
        }
        mask |= 1 << irq;
    }
    Ok(mask)
}

pub(crate) fn decode(body: &[u8]) -> Result<IrqDescriptor> {
    if body.len() != 2 && body.len() != 3 {
        return Err(ResourceError::MalformedStream(
            "irq descriptor body must be 2 or 3 bytes",
        ));
    }
    let mask = u16::from_le_bytes([body[0], body[1]]);
    let (triggering, polarity, sharing) = if body.len() == 3 {
        let info = body[2];
        (
            if info & INFO_TRIGGER_EDGE != 0 {
                Triggering::Edge
            } else {
                Triggering::Level
            },
            if info & INFO_POLARITY_LOW != 0 {
                Polarity::ActiveLow
            } else {
                Polarity::ActiveHigh
            },
            if info & INFO_SHARED != 0 {
                Sharing::Shared
            } else {
                Sharing::Exclusive
            },
        )
    } else {
        // Byte 3 omitted: ACPI defaults.
        (Triggering::Edge, Polarity::ActiveHigh, Sharing::Exclusive)
    };
    if !combination_is_legal(triggering, polarity) {
        return Err(ResourceError::MalformedStream(
            "irq trigger/polarity combination not allowed",
        ));
    }
    Ok(IrqDescriptor {
        triggering,
        polarity,
        sharing,
        interrupts: mask16_to_list(mask),
    })
}

fn validate(irq: &IrqDescriptor) -> Result<u16> {
    if irq.interrupts.is_empty() {
        return Err(ResourceError::InvalidArgument(
            "irq descriptor carries no interrupts",
        ));
    }
    if !combination_is_legal(irq.triggering, irq.polarity) {
        return Err(ResourceError::InvalidArgument(
            "irq trigger/polarity combination not allowed",
        ));
    }
    list_to_mask16(&irq.interrupts)
}

pub(crate) fn encode(irq: &IrqDescriptor, out: &mut Vec<u8>) -> Result<()> {
    let mask = validate(irq)?;
    if irq.is_default_configuration() {
        // {Edge, ActiveHigh, Exclusive}: the info byte is omitted entirely.
        out.push(small_tag(SMALL_IRQ, 2));
        out.extend_from_slice(&mask.to_le_bytes());
    } else {
        out.push(small_tag(SMALL_IRQ, 3));
        out.extend_from_slice(&mask.to_le_bytes());
        let mut info = 0u8;
        if irq.triggering == Triggering::Edge {
            info |= INFO_TRIGGER_EDGE;
        }
        if irq.polarity == Polarity::ActiveLow {
            info |= INFO_POLARITY_LOW;
        }
        if irq.sharing == Sharing::Shared {
            info |= INFO_SHARED;
        }
        out.push(info);
    }
    Ok(())
}

pub(crate) fn encoded_size(irq: &IrqDescriptor) -> Result<usize> {
    validate(irq)?;
    Ok(if irq.is_default_configuration() { 3 } else { 4 })
}

pub(crate) fn decoded_size(body: &[u8]) -> Result<usize> {
    if body.len() != 2 && body.len() != 3 {
        return Err(ResourceError::MalformedStream(
            "irq descriptor body must be 2 or 3 bytes",
        ));
    }
    let mask = u16::from_le_bytes([body[0], body[1]]);
    Ok(8 + 4 * mask.count_ones() as usize)
}

pub(crate) fn decode_extended(body: &[u8]) -> Result<ExtendedIrqDescriptor> {
    if body.len() < 2 {
        return Err(ResourceError::MalformedStream(
            "extended irq body below minimum",
        ));
    }
    let flags = body[0];
    let count = usize::from(body[1]);
    if count == 0 {
        return Err(ResourceError::MalformedStream(
            "extended irq interrupt table is empty",
        ));
    }
    let table_end = 2 + 4 * count;
    if body.len() < table_end {
        return Err(ResourceError::MalformedStream(
            "extended irq interrupt table overruns body",
        ));
    }
    let interrupts = (0..count).map(|i| read_u32(body, 2 + 4 * i)).collect();
    let source = source::decode(&body[table_end..])?;
    Ok(ExtendedIrqDescriptor {
        consumer: flags & EXT_CONSUMER != 0,
        triggering: if flags & EXT_TRIGGER_EDGE != 0 {
            Triggering::Edge
        } else {
            Triggering::Level
        },
        polarity: if flags & EXT_POLARITY_LOW != 0 {
            Polarity::ActiveLow
        } else {
            Polarity::ActiveHigh
        },
        sharing: if flags & EXT_SHARED != 0 {
            Sharing::Shared
        } else {
            Sharing::Exclusive
        },
        interrupts,
        source,
    })
}

fn validate_extended(eirq: &ExtendedIrqDescriptor) -> Result<usize> {
    if eirq.interrupts.is_empty() {
        return Err(ResourceError::InvalidArgument(
            "extended irq descriptor carries no interrupts",
        ));
    }
    if eirq.interrupts.len() > usize::from(u8::MAX) {
        return Err(ResourceError::InvalidArgument(
            "extended irq interrupt table exceeds 255 entries",
        ));
    }
    source::validate(&eirq.source)?;
    Ok(2 + 4 * eirq.interrupts.len() + ResourceSource::wire_len(&eirq.source))
}

pub(crate) fn encode_extended(eirq: &ExtendedIrqDescriptor, out: &mut Vec<u8>) -> Result<()> {
    let body_len = validate_extended(eirq)?;
    push_large_header(out, LARGE_EXTENDED_IRQ, body_len);
    let mut flags = 0u8;
    if eirq.consumer {
        flags |= EXT_CONSUMER;
    }
    if eirq.triggering == Triggering::Edge {
        flags |= EXT_TRIGGER_EDGE;
    }
    if eirq.polarity == Polarity::ActiveLow {
        flags |= EXT_POLARITY_LOW;
    }
    if eirq.sharing == Sharing::Shared {
        flags |= EXT_SHARED;
    }
    out.push(flags);
    out.push(eirq.interrupts.len() as u8);
    for &gsi in &eirq.interrupts {
        out.extend_from_slice(&gsi.to_le_bytes());
    }
    source::encode(&eirq.source, out);
    Ok(())
}

pub(crate) fn extended_encoded_size(eirq: &ExtendedIrqDescriptor) -> Result<usize> {
    Ok(3 + validate_extended(eirq)?)
}

pub(crate) fn extended_decoded_size(body: &[u8]) -> Result<usize> {
    if body.len() < 2 {
        return Err(ResourceError::MalformedStream(
            "extended irq body below minimum",
        ));
    }
    let count = usize::from(body[1]);
    if count == 0 {
        return Err(ResourceError::MalformedStream(
            "extended irq interrupt table is empty",
        ));
    }
    let table_end = 2 + 4 * count;
    if body.len() < table_end {
        return Err(ResourceError::MalformedStream(
            "extended irq interrupt table overruns body",
        ));
    }
    Ok(round_up_32(8 + 4 * count + (body.len() - table_end)))
}
