//! Human-readable rendering of resource lists and routing tables.
//!
//! The sink is injected: callers hand in any `fmt::Write` (a `String`, a
//! log adapter, ...) and decide themselves where the text goes and at
//! what verbosity. Formatting knobs live in [`DumpOptions`]; the flag
//! enums carry their own `Display` impls.

use core::fmt::{self, Write};

use resaml_codec::{AddressDescriptor, ResourceRecord, ResourceSource};
use resaml_routing::PciRoutingTable;

/// Formatting options for [`dump_resources_with`]. The defaults produce
/// one compact line per record.
#[derive(Debug, Clone, Copy, Default)]
pub struct DumpOptions {
    /// Render vendor payload bytes in hex instead of just their count.
    pub vendor_data: bool,
    /// Append each record's flat in-memory byte length.
    pub record_lengths: bool,
}

fn write_source(out: &mut dyn Write, source: &Option<ResourceSource>) -> fmt::Result {
    if let Some(src) = source {
        write!(out, " source={}:{}", src.index, src.name)?;
    }
    Ok(())
}

fn write_address<T: fmt::LowerHex>(
    out: &mut dyn Write,
    kind: &str,
    desc: &AddressDescriptor<T>,
) -> fmt::Result {
    write!(
        out,
        "{kind}: type={} {} min={:#x} max={:#x} len={:#x} gran={:#x} xlat={:#x}",
        desc.resource_type,
        if desc.flags.consumer {
            "consumer"
        } else {
            "producer"
        },
        desc.minimum,
        desc.maximum,
        desc.length,
        desc.granularity,
        desc.translation_offset,
    )?;
    write_source(out, &desc.source)
}

fn write_record(
    record: &ResourceRecord,
    options: &DumpOptions,
    out: &mut dyn Write,
) -> fmt::Result {
    match record {
        ResourceRecord::Irq(irq) => write!(
            out,
            "IRQ: {:?} {} {} {}",
            irq.interrupts, irq.triggering, irq.polarity, irq.sharing
        )?,
        ResourceRecord::Dma(dma) => write!(
            out,
            "DMA: {:?} {} {}{}",
            dma.channels,
            dma.width,
            dma.speed,
            if dma.bus_master { " bus-master" } else { "" }
        )?,
        ResourceRecord::StartDependentFunctions(dep) => write!(
            out,
            "StartDependentFunctions: compatibility={} performance={}",
            dep.compatibility, dep.performance
        )?,
        ResourceRecord::EndDependentFunctions => write!(out, "EndDependentFunctions")?,
        ResourceRecord::Io(io) => write!(
            out,
            "IO: min={:#06x} max={:#06x} align={} len={}{}",
            io.minimum,
            io.maximum,
            io.alignment,
            io.length,
            if io.decode_16 { " decode-16" } else { "" }
        )?,
        ResourceRecord::FixedIo(fio) => {
            write!(out, "FixedIO: base={:#06x} len={}", fio.address, fio.length)?
        }
        ResourceRecord::VendorDefined(vendor) => {
            if options.vendor_data {
                write!(out, "Vendor: {:02X?}", vendor.data)?
            } else {
                write!(out, "Vendor: {} bytes", vendor.data.len())?
            }
        }
        ResourceRecord::EndTag(end) => write!(out, "EndTag: checksum={:#04x}", end.checksum)?,
        ResourceRecord::Memory24(mem) => write!(
            out,
            "Memory24: min={:#x} max={:#x} align={:#x} len={:#x}{}",
            mem.minimum,
            mem.maximum,
            mem.alignment,
            mem.length,
            if mem.writeable { " rw" } else { " ro" }
        )?,
        ResourceRecord::Memory32(mem) => write!(
            out,
            "Memory32: min={:#x} max={:#x} align={:#x} len={:#x}{}",
            mem.minimum,
            mem.maximum,
            mem.alignment,
            mem.length,
            if mem.writeable { " rw" } else { " ro" }
        )?,
        ResourceRecord::FixedMemory32(mem) => write!(
            out,
            "FixedMemory32: base={:#x} len={:#x}{}",
            mem.address,
            mem.length,
            if mem.writeable { " rw" } else { " ro" }
        )?,
        ResourceRecord::Address16(desc) => write_address(out, "Address16", desc)?,
        ResourceRecord::Address32(desc) => write_address(out, "Address32", desc)?,
        ResourceRecord::Address64(desc) => write_address(out, "Address64", desc)?,
        ResourceRecord::ExtendedIrq(eirq) => {
            write!(
                out,
                "ExtendedIRQ: {:?} {} {} {} {}",
                eirq.interrupts,
                eirq.triggering,
                eirq.polarity,
                eirq.sharing,
                if eirq.consumer { "consumer" } else { "producer" }
            )?;
            write_source(out, &eirq.source)?;
        }
    }
    if options.record_lengths {
        write!(out, " ({} bytes)", record.byte_length())?;
    }
    writeln!(out)
}

/// Writes one line per record using the given options.
pub fn dump_resources_with(
    records: &[ResourceRecord],
    options: &DumpOptions,
    out: &mut dyn Write,
) -> fmt::Result {
    for record in records {
        write_record(record, options, out)?;
    }
    Ok(())
}

/// Writes one line per record with the default options.
pub fn dump_resources(records: &[ResourceRecord], out: &mut dyn Write) -> fmt::Result {
    dump_resources_with(records, &DumpOptions::default(), out)
}

/// Writes one line per routing entry plus a sentinel marker.
pub fn dump_routing_table(table: &PciRoutingTable, out: &mut dyn Write) -> fmt::Result {
    for entry in &table.entries {
        writeln!(
            out,
            "dev {:#06x} fn {:#06x} pin INT{}#: source={} index={}",
            entry.address >> 16,
            entry.address & 0xFFFF,
            char::from(b'A' + (entry.pin & 0x03) as u8),
            if entry.source_name.is_empty() {
                "<none>"
            } else {
                entry.source_name.as_str()
            },
            entry.source_index
        )?;
    }
    writeln!(out, "{} entries, {} bytes", table.entries.len(), table.byte_length())
}
