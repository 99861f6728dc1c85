//! Device resource conversion front end.
//!
//! Ties the resource descriptor codec and the PCI routing builder to the
//! namespace methods that produce and consume their data: `_CRS` and
//! `_PRS` return AML resource byte streams, `_PRT` returns a routing
//! package, `_SRS` accepts an encoded stream. Method evaluation itself is
//! behind the [`Namespace`] trait; this crate only converts what comes
//! back (or goes in).
//!
//! All conversions return owned values sized exactly by the codec's
//! sizing passes; the classic two-call buffer negotiation remains
//! available through [`encode_list_into`] and the `length` module.

pub mod dump;

use core::num::NonZeroU64;

use tracing::debug;

pub use resaml_codec::{
    decode_stream, encode_list, encode_list_into, length, AddressDescriptor, AddressFlags,
    AddressResourceType, DependentPriority, DmaChannelSpeed, DmaDescriptor, DmaTransferWidth,
    EndTagDescriptor, ExtendedIrqDescriptor, FixedIoDescriptor, FixedMemory32Descriptor,
    IoDescriptor, IrqDescriptor, Memory24Descriptor, Memory32Descriptor, OperandObject, Polarity,
    ResourceError, ResourceRecord, ResourceSource, Result, Sharing, StartDependentFunctions,
    Triggering, VendorDescriptor,
};
pub use resaml_routing::{
    build_routing_table, routing_table_length, PciRoutingEntry, PciRoutingTable,
};

pub const METHOD_CURRENT_RESOURCES: &str = "_CRS";
pub const METHOD_POSSIBLE_RESOURCES: &str = "_PRS";
pub const METHOD_ROUTING_TABLE: &str = "_PRT";
pub const METHOD_SET_RESOURCES: &str = "_SRS";

/// Opaque, always-valid reference to a device node in the namespace.
///
/// Wrapping a non-zero integer makes the "null handle" caller bug
/// unrepresentable rather than a runtime check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeviceHandle(NonZeroU64);

impl DeviceHandle {
    pub fn new(raw: u64) -> Option<Self> {
        NonZeroU64::new(raw).map(Self)
    }

    pub fn get(self) -> u64 {
        self.0.get()
    }
}

/// The external namespace/method-evaluation collaborator.
///
/// Implementations evaluate `method` under `device` and return the
/// resulting object; for `_SRS` the encoded resource buffer arrives as
/// `arg`. Evaluation failures surface as
/// [`ResourceError::Evaluation`] and pass through the entry points
/// unchanged.
pub trait Namespace {
    fn evaluate(
        &mut self,
        device: DeviceHandle,
        method: &str,
        arg: Option<&OperandObject>,
    ) -> Result<OperandObject>;
}

fn resources_from_method<N: Namespace + ?Sized>(
    ns: &mut N,
    device: DeviceHandle,
    method: &'static str,
) -> Result<Vec<ResourceRecord>> {
    debug!(device = device.get(), method, "evaluating resource method");
    let object = ns.evaluate(device, method, None)?;
    let OperandObject::Buffer(stream) = object else {
        return Err(ResourceError::BadOperandData(
            "resource method did not return a buffer",
        ));
    };
    let records = decode_stream(&stream)?;
    debug!(
        device = device.get(),
        method,
        records = records.len(),
        "decoded resource stream"
    );
    Ok(records)
}

/// Current resource settings of `device` (`_CRS`).
pub fn current_resources<N: Namespace + ?Sized>(
    ns: &mut N,
    device: DeviceHandle,
) -> Result<Vec<ResourceRecord>> {
    resources_from_method(ns, device, METHOD_CURRENT_RESOURCES)
}

/// Possible resource settings of `device` (`_PRS`).
pub fn possible_resources<N: Namespace + ?Sized>(
    ns: &mut N,
    device: DeviceHandle,
) -> Result<Vec<ResourceRecord>> {
    resources_from_method(ns, device, METHOD_POSSIBLE_RESOURCES)
}

/// PCI interrupt routing table below `device` (`_PRT`).
pub fn irq_routing_table<N: Namespace + ?Sized>(
    ns: &mut N,
    device: DeviceHandle,
) -> Result<PciRoutingTable> {
    debug!(device = device.get(), method = METHOD_ROUTING_TABLE, "evaluating routing table");
    let object = ns.evaluate(device, METHOD_ROUTING_TABLE, None)?;
    let table = build_routing_table(&object)?;
    debug!(
        device = device.get(),
        entries = table.entries.len(),
        "built routing table"
    );
    Ok(table)
}

/// Programs `device` with `list` by encoding it and evaluating `_SRS`
/// with the byte stream as sole argument. The list must end in exactly
/// one EndTag.
pub fn set_current_resources<N: Namespace + ?Sized>(
    ns: &mut N,
    device: DeviceHandle,
    list: &[ResourceRecord],
) -> Result<()> {
    let stream = encode_list(list)?;
    debug!(
        device = device.get(),
        method = METHOD_SET_RESOURCES,
        bytes = stream.len(),
        "setting resources"
    );
    ns.evaluate(
        device,
        METHOD_SET_RESOURCES,
        Some(&OperandObject::Buffer(stream)),
    )?;
    Ok(())
}
