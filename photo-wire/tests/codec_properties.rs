// SPDX-License-Identifier: MIT
//! Property-based tests for the codec and envelope

use photo_wire::{compress, decompress, frame, Envelope};
use proptest::prelude::*;

proptest! {
    /// Anything produced by `compress` decodes back to the original bytes
    #[test]
    fn compress_then_decompress_is_identity(data in proptest::collection::vec(any::<u8>(), 0..4096)) {
        let compressed = compress(&data).unwrap();
        let decoded = decompress(&compressed).unwrap();
        prop_assert_eq!(decoded, data);
    }

    /// Rebuilding an envelope around its own payload reproduces the packet
    #[test]
    fn envelope_rebuild_is_identity(
        prefix in proptest::collection::vec(any::<u8>(), 0..16),
        payload in proptest::collection::vec(any::<u8>(), 0..256),
        suffix in proptest::collection::vec(any::<u8>(), 0..16),
    ) {
        let mut packet = prefix.clone();
        packet.extend(frame(&payload).unwrap());
        packet.extend(&suffix);

        let envelope = Envelope::parse(&packet, prefix.len()).unwrap();
        prop_assert_eq!(envelope.payload(), payload.as_slice());
        prop_assert_eq!(envelope.rebuild(envelope.payload()).unwrap(), packet);
    }
}
