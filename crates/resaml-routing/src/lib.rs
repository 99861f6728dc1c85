//! PCI interrupt routing tables.
//!
//! `_PRT` evaluates to a package of 4-element packages, one per routed
//! INTx pin: `[address, pin, source, source-index]`. This crate flattens
//! that generic operand shape into fixed routing records the platform
//! interrupt code can walk, with the same two-pass sizing contract as the
//! resource codec: [`routing_table_length`] reports the exact flat-table
//! footprint [`build_routing_table`] will account for.

use resaml_codec::{OperandObject, ResourceError, Result};

/// Fixed per-record header footprint: record length, address, pin and
/// source-index fields at 4 bytes each, plus the length field itself.
pub const ENTRY_HEADER_LEN: usize = 20;

/// One routing record: which device/pin routes to which interrupt source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PciRoutingEntry {
    /// PCI address of the routed device: `device << 16 | function`
    /// (function 0xFFFF meaning "all functions").
    pub address: u32,
    /// INTx pin, 0 = INTA# through 3 = INTD#.
    pub pin: u32,
    /// Namespace path of the interrupt link device arbitrating this pin;
    /// empty when the pin is hardwired to a global interrupt.
    pub source_name: String,
    /// Index into the source device's resources, or the global interrupt
    /// number when `source_name` is empty.
    pub source_index: u32,
}

impl PciRoutingEntry {
    /// Flat-record footprint: the fixed header plus the name bytes
    /// (including the terminating NUL), rounded up to an 8-byte boundary.
    pub fn byte_length(&self) -> usize {
        let name_len = if self.source_name.is_empty() {
            0
        } else {
            self.source_name.len() + 1
        };
        (ENTRY_HEADER_LEN + name_len + 7) & !7
    }
}

/// A flattened `_PRT`. The zero-length sentinel record terminating the
/// flat table is implicit: it is accounted for in [`byte_length`]
/// (`Self::byte_length`) but carries no entry of its own.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PciRoutingTable {
    pub entries: Vec<PciRoutingEntry>,
}

impl PciRoutingTable {
    /// Total flat-table footprint, sentinel included. Never zero: an empty
    /// table still holds the sentinel header.
    pub fn byte_length(&self) -> usize {
        self.entries
            .iter()
            .map(PciRoutingEntry::byte_length)
            .sum::<usize>()
            + ENTRY_HEADER_LEN
    }
}

fn entry_elements(entry: &OperandObject) -> Result<&[OperandObject]> {
    let OperandObject::Package(elements) = entry else {
        return Err(ResourceError::BadOperandData(
            "routing table entry is not a package",
        ));
    };
    if elements.len() != 4 {
        return Err(ResourceError::BadOperandData(
            "routing table entry must hold exactly four elements",
        ));
    }
    Ok(elements)
}

fn integer_field(element: &OperandObject, context: &'static str) -> Result<u32> {
    let OperandObject::Integer(value) = element else {
        return Err(ResourceError::BadOperandData(context));
    };
    u32::try_from(*value).map_err(|_| ResourceError::BadOperandData(context))
}

/// The source slot is either a namespace path string or an integer, the
/// latter standing for "no source device" (the value is ignored, matching
/// the firmware interfaces this shape comes from).
fn source_name(element: &OperandObject) -> Result<&str> {
    match element {
        OperandObject::String(name) => Ok(name),
        OperandObject::Integer(_) => Ok(""),
        _ => Err(ResourceError::BadOperandData(
            "routing table source must be a string or an integer",
        )),
    }
}

/// Flattens an evaluated `_PRT` package into a routing table.
pub fn build_routing_table(prt: &OperandObject) -> Result<PciRoutingTable> {
    let OperandObject::Package(packages) = prt else {
        return Err(ResourceError::BadOperandData(
            "routing table operand is not a package",
        ));
    };
    let mut entries = Vec::with_capacity(packages.len());
    for package in packages {
        let elements = entry_elements(package)?;
        entries.push(PciRoutingEntry {
            address: integer_field(
                &elements[0],
                "routing table address must be an integer within 32 bits",
            )?,
            pin: integer_field(
                &elements[1],
                "routing table pin must be an integer within 32 bits",
            )?,
            source_name: source_name(&elements[2])?.to_owned(),
            source_index: integer_field(
                &elements[3],
                "routing table source index must be an integer within 32 bits",
            )?,
        });
    }
    Ok(PciRoutingTable { entries })
}

/// Exact [`PciRoutingTable::byte_length`] the builder would report for
/// this operand, without building the table.
pub fn routing_table_length(prt: &OperandObject) -> Result<usize> {
    let OperandObject::Package(packages) = prt else {
        return Err(ResourceError::BadOperandData(
            "routing table operand is not a package",
        ));
    };
    let mut total = ENTRY_HEADER_LEN; // sentinel
    for package in packages {
        let elements = entry_elements(package)?;
        let name_len = match source_name(&elements[2])? {
            "" => 0,
            name => name.len() + 1,
        };
        total += (ENTRY_HEADER_LEN + name_len + 7) & !7;
    }
    Ok(total)
}
