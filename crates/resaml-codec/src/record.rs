//! In-memory resource records.
//!
//! One variant per descriptor kind, each carrying only the fields that kind
//! actually encodes. Records are plain owned data; a conversion never
//! retains them past the call that produced them. The flag enums render
//! their lowercase wire-level meaning through `Display`, which the dump
//! module relies on.

use core::fmt;

/// Optional arbiter-device trailer on address-space and extended-IRQ
/// descriptors: 1 index byte plus a NUL-terminated ASCII name on the wire.
/// The name is stored without its terminating NUL and may be empty (an
/// empty name still occupies the index byte and the NUL when encoded).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceSource {
    pub index: u8,
    pub name: String,
}

impl ResourceSource {
    /// Wire footprint: index byte + name + NUL. Zero when absent.
    pub(crate) fn wire_len(source: &Option<ResourceSource>) -> usize {
        match source {
            Some(src) => 2 + src.name.len(),
            None => 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Triggering {
    Level,
    Edge,
}

impl fmt::Display for Triggering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Triggering::Level => "level",
            Triggering::Edge => "edge",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    ActiveHigh,
    ActiveLow,
}

impl fmt::Display for Polarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Polarity::ActiveHigh => "active-high",
            Polarity::ActiveLow => "active-low",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sharing {
    Exclusive,
    Shared,
}

impl fmt::Display for Sharing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Sharing::Exclusive => "exclusive",
            Sharing::Shared => "shared",
        })
    }
}

/// Small IRQ descriptor. `interrupts` holds IRQ numbers 0-15 in ascending
/// order; the codec collapses them into the 16-bit wire mask.
///
/// Only Edge+ActiveHigh and Level+ActiveLow are legal combinations, and
/// {Edge, ActiveHigh, Exclusive} is the ACPI default that selects the
/// compact info-byte-less encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IrqDescriptor {
    pub triggering: Triggering,
    pub polarity: Polarity,
    pub sharing: Sharing,
    pub interrupts: Vec<u8>,
}

impl IrqDescriptor {
    pub fn is_default_configuration(&self) -> bool {
        self.triggering == Triggering::Edge
            && self.polarity == Polarity::ActiveHigh
            && self.sharing == Sharing::Exclusive
    }
}

/// DMA transfer width (flags bits 0:1). The value 0b11 is reserved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DmaTransferWidth {
    Width8,
    Width8And16,
    Width16,
}

impl fmt::Display for DmaTransferWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DmaTransferWidth::Width8 => "8-bit",
            DmaTransferWidth::Width8And16 => "8/16-bit",
            DmaTransferWidth::Width16 => "16-bit",
        })
    }
}

/// DMA channel speed (flags bits 5:6).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DmaChannelSpeed {
    Compatibility,
    TypeA,
    TypeB,
    TypeF,
}

impl fmt::Display for DmaChannelSpeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DmaChannelSpeed::Compatibility => "compatibility",
            DmaChannelSpeed::TypeA => "type-a",
            DmaChannelSpeed::TypeB => "type-b",
            DmaChannelSpeed::TypeF => "type-f",
        })
    }
}

/// Small DMA descriptor. `channels` holds channel numbers 0-7 in ascending
/// order, collapsed into the 8-bit wire mask.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DmaDescriptor {
    pub width: DmaTransferWidth,
    pub bus_master: bool,
    pub speed: DmaChannelSpeed,
    pub channels: Vec<u8>,
}

/// Priority carried by StartDependentFunctions (two 2-bit fields, values
/// above `SubOptimal` are reserved).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DependentPriority {
    Good,
    Acceptable,
    SubOptimal,
}

impl fmt::Display for DependentPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DependentPriority::Good => "good",
            DependentPriority::Acceptable => "acceptable",
            DependentPriority::SubOptimal => "sub-optimal",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StartDependentFunctions {
    pub compatibility: DependentPriority,
    pub performance: DependentPriority,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IoDescriptor {
    /// Bit 0 of the information byte: full 16-bit address decode when set,
    /// 10-bit ISA decode when clear.
    pub decode_16: bool,
    pub minimum: u16,
    pub maximum: u16,
    pub alignment: u8,
    pub length: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedIoDescriptor {
    /// 10-bit ISA address; the upper bits are masked off on encode.
    pub address: u16,
    pub length: u8,
}

/// Vendor-defined payload. The codec picks the small encoding when the
/// payload fits in 7 bytes and the large encoding otherwise; the caller
/// never chooses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VendorDescriptor {
    pub data: Vec<u8>,
}

/// The mandatory stream terminator. The checksum byte may be zero, which
/// by convention means "treat the checksum as valid".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndTagDescriptor {
    pub checksum: u8,
}

/// 24-bit memory range descriptor. Addresses are in 256-byte units on the
/// wire; the fields here hold the raw 16-bit wire values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Memory24Descriptor {
    pub writeable: bool,
    pub minimum: u16,
    pub maximum: u16,
    pub alignment: u16,
    pub length: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Memory32Descriptor {
    pub writeable: bool,
    pub minimum: u32,
    pub maximum: u32,
    pub alignment: u32,
    pub length: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedMemory32Descriptor {
    pub writeable: bool,
    pub address: u32,
    pub length: u32,
}

/// Address-space descriptor resource type byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressResourceType {
    Memory,
    Io,
    BusNumber,
    /// Reserved or hardware-vendor-defined type codes, preserved verbatim.
    Reserved(u8),
}

impl AddressResourceType {
    pub(crate) fn from_wire(byte: u8) -> Self {
        match byte {
            0 => AddressResourceType::Memory,
            1 => AddressResourceType::Io,
            2 => AddressResourceType::BusNumber,
            other => AddressResourceType::Reserved(other),
        }
    }

    pub(crate) fn to_wire(self) -> u8 {
        match self {
            AddressResourceType::Memory => 0,
            AddressResourceType::Io => 1,
            AddressResourceType::BusNumber => 2,
            AddressResourceType::Reserved(other) => other,
        }
    }
}

impl fmt::Display for AddressResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressResourceType::Memory => f.write_str("memory"),
            AddressResourceType::Io => f.write_str("io"),
            AddressResourceType::BusNumber => f.write_str("bus"),
            AddressResourceType::Reserved(code) => write!(f, "reserved({code:#04x})"),
        }
    }
}

/// General flags byte shared by the three address-space descriptors:
/// bit 0 consumer/producer, bit 1 decode type, bit 2 min fixed,
/// bit 3 max fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AddressFlags {
    /// Set: the device consumes this range. Clear: it produces the range
    /// for child devices (bridges).
    pub consumer: bool,
    /// Set: subtractive decode. Clear: positive decode.
    pub subtractive_decode: bool,
    pub min_fixed: bool,
    pub max_fixed: bool,
}

/// One of the Word/DWord/QWord address-space descriptors, generic over the
/// field width (`u16`/`u32`/`u64`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressDescriptor<T> {
    pub resource_type: AddressResourceType,
    pub flags: AddressFlags,
    /// Type-specific flags byte, kept raw so reserved bits survive a
    /// round trip. For memory ranges bit 0 is read/write and bits 1:2 the
    /// cacheability; for I/O ranges bits 0:1 select the range type.
    pub type_specific: u8,
    pub granularity: T,
    pub minimum: T,
    pub maximum: T,
    pub translation_offset: T,
    pub length: T,
    pub source: Option<ResourceSource>,
}

impl<T> AddressDescriptor<T> {
    /// Memory range read/write attribute (type-specific bit 0).
    pub fn memory_writeable(&self) -> bool {
        self.type_specific & 0x01 != 0
    }

    /// Memory range cacheability (type-specific bits 1:2): 0 non-cacheable,
    /// 1 cacheable, 2 write-combining, 3 prefetchable.
    pub fn memory_caching(&self) -> u8 {
        (self.type_specific >> 1) & 0x03
    }

    /// I/O range coverage (type-specific bits 0:1): 1 non-ISA-only,
    /// 2 ISA-only, 3 entire range.
    pub fn io_range_type(&self) -> u8 {
        self.type_specific & 0x03
    }
}

/// Large extended IRQ descriptor carrying 32-bit interrupt numbers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtendedIrqDescriptor {
    /// Set: the device consumes the interrupt (flags bit 0).
    pub consumer: bool,
    pub triggering: Triggering,
    pub polarity: Polarity,
    pub sharing: Sharing,
    pub interrupts: Vec<u32>,
    pub source: Option<ResourceSource>,
}

/// A decoded resource descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceRecord {
    Irq(IrqDescriptor),
    Dma(DmaDescriptor),
    StartDependentFunctions(StartDependentFunctions),
    EndDependentFunctions,
    Io(IoDescriptor),
    FixedIo(FixedIoDescriptor),
    VendorDefined(VendorDescriptor),
    EndTag(EndTagDescriptor),
    Memory24(Memory24Descriptor),
    Memory32(Memory32Descriptor),
    FixedMemory32(FixedMemory32Descriptor),
    Address16(AddressDescriptor<u16>),
    Address32(AddressDescriptor<u32>),
    Address64(AddressDescriptor<u64>),
    ExtendedIrq(ExtendedIrqDescriptor),
}

/// Rounds up to the next 4-byte boundary.
pub(crate) fn round_up_32(len: usize) -> usize {
    (len + 3) & !3
}

/// Rounds up to the next 8-byte boundary.
pub(crate) fn round_up_64(len: usize) -> usize {
    (len + 7) & !7
}

impl ResourceRecord {
    /// Logical in-memory size of this record in bytes.
    ///
    /// This is the accounting size the list-length calculator reports per
    /// record; the sum over a decoded list equals
    /// [`list_length_of_stream`](crate::length::list_length_of_stream) for
    /// the stream it came from. Sizes that include a trailing
    /// ResourceSource name are rounded up to a 4-byte boundary, except
    /// Address64 which rounds to 8 bytes. The rounding is an explicit rule
    /// of the format's in-memory accounting, not host alignment.
    pub fn byte_length(&self) -> usize {
        match self {
            ResourceRecord::Irq(irq) => 8 + 4 * irq.interrupts.len(),
            ResourceRecord::Dma(dma) => 8 + 4 * dma.channels.len(),
            ResourceRecord::StartDependentFunctions(_) => 8,
            ResourceRecord::EndDependentFunctions => 4,
            ResourceRecord::Io(_) => 12,
            ResourceRecord::FixedIo(_) => 8,
            ResourceRecord::VendorDefined(vendor) => round_up_32(4 + vendor.data.len()),
            ResourceRecord::EndTag(_) => 4,
            ResourceRecord::Memory24(_) => 12,
            ResourceRecord::Memory32(_) => 20,
            ResourceRecord::FixedMemory32(_) => 12,
            ResourceRecord::Address16(addr) => {
                round_up_32(16 + ResourceSource::wire_len(&addr.source))
            }
            ResourceRecord::Address32(addr) => {
                round_up_32(24 + ResourceSource::wire_len(&addr.source))
            }
            ResourceRecord::Address64(addr) => {
                round_up_64(48 + ResourceSource::wire_len(&addr.source))
            }
            ResourceRecord::ExtendedIrq(eirq) => round_up_32(
                8 + 4 * eirq.interrupts.len() + ResourceSource::wire_len(&eirq.source),
            ),
        }
    }

    pub fn is_end_tag(&self) -> bool {
        matches!(self, ResourceRecord::EndTag(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_length_rounds_trailing_strings() {
        let mut desc = AddressDescriptor {
            resource_type: AddressResourceType::Memory,
            flags: AddressFlags::default(),
            type_specific: 0,
            granularity: 0u32,
            minimum: 0,
            maximum: 0,
            translation_offset: 0,
            length: 0,
            source: None,
        };
        assert_eq!(ResourceRecord::Address32(desc.clone()).byte_length(), 24);

        // "GPE0" + NUL + index byte = 6 extra bytes, 24 + 6 -> 32 after
        // rounding to the next 4-byte boundary.
        desc.source = Some(ResourceSource {
            index: 0,
            name: "GPE0".to_owned(),
        });
        assert_eq!(ResourceRecord::Address32(desc).byte_length(), 32);
    }

    #[test]
    fn address64_rounds_to_eight_bytes() {
        let desc = AddressDescriptor {
            resource_type: AddressResourceType::Memory,
            flags: AddressFlags::default(),
            type_specific: 0,
            granularity: 0u64,
            minimum: 0,
            maximum: 0,
            translation_offset: 0,
            length: 0,
            source: Some(ResourceSource {
                index: 1,
                name: "X".to_owned(),
            }),
        };
        // 48 + 3 -> 56 on the 8-byte grid.
        assert_eq!(ResourceRecord::Address64(desc).byte_length(), 56);
    }

    #[test]
    fn flag_enums_display_their_wire_meaning() {
        assert_eq!(Triggering::Edge.to_string(), "edge");
        assert_eq!(Polarity::ActiveLow.to_string(), "active-low");
        assert_eq!(Sharing::Shared.to_string(), "shared");
        assert_eq!(DependentPriority::SubOptimal.to_string(), "sub-optimal");
        assert_eq!(DmaTransferWidth::Width8And16.to_string(), "8/16-bit");
        assert_eq!(DmaChannelSpeed::TypeF.to_string(), "type-f");
        assert_eq!(AddressResourceType::BusNumber.to_string(), "bus");
        assert_eq!(
            AddressResourceType::Reserved(0x0A).to_string(),
            "reserved(0x0a)"
        );
    }

    #[test]
    fn irq_length_grows_per_interrupt() {
        let irq = IrqDescriptor {
            triggering: Triggering::Edge,
            polarity: Polarity::ActiveHigh,
            sharing: Sharing::Exclusive,
            interrupts: vec![2, 5, 9],
        };
        assert_eq!(ResourceRecord::Irq(irq).byte_length(), 20);
    }
}
