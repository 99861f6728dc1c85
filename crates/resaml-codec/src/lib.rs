//! Codec between AML resource descriptor byte streams and typed records.
//!
//! The wire format is the tagged, self-length-delimited binary encoding
//! firmware uses to describe IRQs, DMA channels, I/O ports, memory ranges
//! and bus-address windows. A stream is a sequence of descriptors, each a
//! one-byte tag (small or large header) plus a body, terminated by the
//! mandatory 2-byte EndTag; the in-memory form is a `Vec<ResourceRecord>`
//! ending in the EndTag record.
//!
//! Everything here is a pure, synchronous transformation over
//! caller-owned buffers; no state survives a call. Sizing passes
//! ([`length`]) let callers learn the exact output size before converting,
//! and [`stream::encode_list_into`] keeps the classic two-call buffer
//! negotiation available.

mod codec;
mod error;
mod operand;
mod record;

pub mod length;
pub mod stream;
pub mod tag;

pub use error::{ResourceError, Result};
pub use operand::OperandObject;
pub use record::{
    AddressDescriptor, AddressFlags, AddressResourceType, DependentPriority, DmaChannelSpeed,
    DmaDescriptor, DmaTransferWidth, EndTagDescriptor, ExtendedIrqDescriptor, FixedIoDescriptor,
    FixedMemory32Descriptor, IoDescriptor, IrqDescriptor, Memory24Descriptor, Memory32Descriptor,
    Polarity, ResourceRecord, ResourceSource, Sharing, StartDependentFunctions, Triggering,
    VendorDescriptor,
};
pub use stream::{decode_stream, encode_list, encode_list_into};
