//! Property tests for the round-trip and exact-sizing contracts: encoding
//! any valid list and decoding it back is the identity, and both sizing
//! passes agree byte-for-byte with the conversions they predict.

#![cfg(not(target_arch = "wasm32"))]

use proptest::prelude::*;
use resaml_codec::length::{list_length_of_stream, stream_length_of_list};
use resaml_codec::{
    decode_stream, encode_list, encode_list_into, AddressDescriptor, AddressFlags,
    AddressResourceType, DependentPriority, DmaChannelSpeed, DmaDescriptor, DmaTransferWidth,
    EndTagDescriptor, ExtendedIrqDescriptor, FixedIoDescriptor, FixedMemory32Descriptor,
    IoDescriptor, IrqDescriptor, Memory24Descriptor, Memory32Descriptor, Polarity, ResourceError,
    ResourceRecord, ResourceSource, Sharing, StartDependentFunctions, Triggering,
    VendorDescriptor,
};

fn trigger_polarity() -> impl Strategy<Value = (Triggering, Polarity)> {
    prop_oneof![
        Just((Triggering::Edge, Polarity::ActiveHigh)),
        Just((Triggering::Level, Polarity::ActiveLow)),
    ]
}

fn sharing() -> impl Strategy<Value = Sharing> {
    prop_oneof![Just(Sharing::Exclusive), Just(Sharing::Shared)]
}

fn irq() -> impl Strategy<Value = ResourceRecord> {
    (
        proptest::collection::btree_set(0u8..16, 1..=8),
        trigger_polarity(),
        sharing(),
    )
        .prop_map(|(interrupts, (triggering, polarity), sharing)| {
            ResourceRecord::Irq(IrqDescriptor {
                triggering,
                polarity,
                sharing,
                interrupts: interrupts.into_iter().collect(),
            })
        })
}

fn dma() -> impl Strategy<Value = ResourceRecord> {
    (
        proptest::collection::btree_set(0u8..8, 0..=4),
        prop_oneof![
            Just(DmaTransferWidth::Width8),
            Just(DmaTransferWidth::Width8And16),
            Just(DmaTransferWidth::Width16),
        ],
        any::<bool>(),
        prop_oneof![
            Just(DmaChannelSpeed::Compatibility),
            Just(DmaChannelSpeed::TypeA),
            Just(DmaChannelSpeed::TypeB),
            Just(DmaChannelSpeed::TypeF),
        ],
    )
        .prop_map(|(channels, width, bus_master, speed)| {
            ResourceRecord::Dma(DmaDescriptor {
                width,
                bus_master,
                speed,
                channels: channels.into_iter().collect(),
            })
        })
}

fn priority() -> impl Strategy<Value = DependentPriority> {
    prop_oneof![
        Just(DependentPriority::Good),
        Just(DependentPriority::Acceptable),
        Just(DependentPriority::SubOptimal),
    ]
}

fn dependent_markers() -> impl Strategy<Value = ResourceRecord> {
    prop_oneof![
        (priority(), priority()).prop_map(|(compatibility, performance)| {
            ResourceRecord::StartDependentFunctions(StartDependentFunctions {
                compatibility,
                performance,
            })
        }),
        Just(ResourceRecord::EndDependentFunctions),
    ]
}

fn io() -> impl Strategy<Value = ResourceRecord> {
    prop_oneof![
        (any::<bool>(), any::<u16>(), any::<u16>(), any::<u8>(), any::<u8>()).prop_map(
            |(decode_16, minimum, maximum, alignment, length)| {
                ResourceRecord::Io(IoDescriptor {
                    decode_16,
                    minimum,
                    maximum,
                    alignment,
                    length,
                })
            }
        ),
        (0u16..0x400, any::<u8>()).prop_map(|(address, length)| {
            ResourceRecord::FixedIo(FixedIoDescriptor { address, length })
        }),
    ]
}

fn vendor() -> impl Strategy<Value = ResourceRecord> {
    proptest::collection::vec(any::<u8>(), 0..=24)
        .prop_map(|data| ResourceRecord::VendorDefined(VendorDescriptor { data }))
}

fn memory() -> impl Strategy<Value = ResourceRecord> {
    prop_oneof![
        (any::<bool>(), any::<u16>(), any::<u16>(), any::<u16>(), any::<u16>()).prop_map(
            |(writeable, minimum, maximum, alignment, length)| {
                ResourceRecord::Memory24(Memory24Descriptor {
                    writeable,
                    minimum,
                    maximum,
                    alignment,
                    length,
                })
            }
        ),
        (any::<bool>(), any::<u32>(), any::<u32>(), any::<u32>(), any::<u32>()).prop_map(
            |(writeable, minimum, maximum, alignment, length)| {
                ResourceRecord::Memory32(Memory32Descriptor {
                    writeable,
                    minimum,
                    maximum,
                    alignment,
                    length,
                })
            }
        ),
        (any::<bool>(), any::<u32>(), any::<u32>()).prop_map(|(writeable, address, length)| {
            ResourceRecord::FixedMemory32(FixedMemory32Descriptor {
                writeable,
                address,
                length,
            })
        }),
    ]
}

fn resource_source() -> impl Strategy<Value = Option<ResourceSource>> {
    proptest::option::of(("[A-Z0-9_.\\\\]{1,12}", any::<u8>()).prop_map(|(name, index)| {
        ResourceSource { index, name }
    }))
}

fn address_resource_type() -> impl Strategy<Value = AddressResourceType> {
    prop_oneof![
        Just(AddressResourceType::Memory),
        Just(AddressResourceType::Io),
        Just(AddressResourceType::BusNumber),
        (3u8..=0xFF).prop_map(AddressResourceType::Reserved),
    ]
}

fn address_flags() -> impl Strategy<Value = AddressFlags> {
    (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()).prop_map(
        |(consumer, subtractive_decode, min_fixed, max_fixed)| AddressFlags {
            consumer,
            subtractive_decode,
            min_fixed,
            max_fixed,
        },
    )
}

fn address16() -> impl Strategy<Value = ResourceRecord> {
    (
        address_resource_type(),
        address_flags(),
        any::<u8>(),
        any::<[u16; 5]>(),
        resource_source(),
    )
        .prop_map(|(resource_type, flags, type_specific, fields, source)| {
            ResourceRecord::Address16(AddressDescriptor {
                resource_type,
                flags,
                type_specific,
                granularity: fields[0],
                minimum: fields[1],
                maximum: fields[2],
                translation_offset: fields[3],
                length: fields[4],
                source,
            })
        })
}

fn address32() -> impl Strategy<Value = ResourceRecord> {
    (
        address_resource_type(),
        address_flags(),
        any::<u8>(),
        any::<[u32; 5]>(),
        resource_source(),
    )
        .prop_map(|(resource_type, flags, type_specific, fields, source)| {
            ResourceRecord::Address32(AddressDescriptor {
                resource_type,
                flags,
                type_specific,
                granularity: fields[0],
                minimum: fields[1],
                maximum: fields[2],
                translation_offset: fields[3],
                length: fields[4],
                source,
            })
        })
}

fn address64() -> impl Strategy<Value = ResourceRecord> {
    (
        address_resource_type(),
        address_flags(),
        any::<u8>(),
        any::<[u64; 5]>(),
        resource_source(),
    )
        .prop_map(|(resource_type, flags, type_specific, fields, source)| {
            ResourceRecord::Address64(AddressDescriptor {
                resource_type,
                flags,
                type_specific,
                granularity: fields[0],
                minimum: fields[1],
                maximum: fields[2],
                translation_offset: fields[3],
                length: fields[4],
                source,
            })
        })
}

fn extended_irq() -> impl Strategy<Value = ResourceRecord> {
    (
        any::<bool>(),
        trigger_polarity(),
        sharing(),
        proptest::collection::vec(any::<u32>(), 1..=4),
        resource_source(),
    )
        .prop_map(|(consumer, (triggering, polarity), sharing, interrupts, source)| {
            ResourceRecord::ExtendedIrq(ExtendedIrqDescriptor {
                consumer,
                triggering,
                polarity,
                sharing,
                interrupts,
                source,
            })
        })
}

fn record() -> impl Strategy<Value = ResourceRecord> {
    prop_oneof![
        irq(),
        dma(),
        dependent_markers(),
        io(),
        vendor(),
        memory(),
        address16(),
        address32(),
        address64(),
        extended_irq(),
    ]
}

fn resource_list() -> impl Strategy<Value = Vec<ResourceRecord>> {
    (proptest::collection::vec(record(), 0..=8), any::<u8>()).prop_map(|(mut list, checksum)| {
        list.push(ResourceRecord::EndTag(EndTagDescriptor { checksum }));
        list
    })
}

proptest! {
    #[test]
    fn encode_then_decode_is_identity(list in resource_list()) {
        let stream = encode_list(&list).unwrap();
        let decoded = decode_stream(&stream).unwrap();
        prop_assert_eq!(decoded, list);
    }

    #[test]
    fn stream_sizing_matches_the_encoder(list in resource_list()) {
        let stream = encode_list(&list).unwrap();
        prop_assert_eq!(stream_length_of_list(&list).unwrap(), stream.len());
    }

    #[test]
    fn list_sizing_matches_the_decoder(list in resource_list()) {
        let stream = encode_list(&list).unwrap();
        let decoded = decode_stream(&stream).unwrap();
        let expected: usize = decoded.iter().map(ResourceRecord::byte_length).sum();
        prop_assert_eq!(list_length_of_stream(&stream).unwrap(), expected);
    }

    #[test]
    fn negotiation_always_reports_the_exact_size(list in resource_list()) {
        let needed = match encode_list_into(&list, &mut []) {
            Err(ResourceError::BufferTooSmall { needed }) => needed,
            other => panic!("expected BufferTooSmall, got {other:?}"),
        };
        let mut buf = vec![0u8; needed];
        prop_assert_eq!(encode_list_into(&list, &mut buf).unwrap(), needed);
        prop_assert_eq!(buf, encode_list(&list).unwrap());
    }
}
