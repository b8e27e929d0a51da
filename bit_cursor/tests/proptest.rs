//! Property tests: every cursor family produces the same bits.

use bit_cursor::{
    BitArray, BitCursor, BitOrder, BitRead, BitSpan, BitStreamReader, BitStreamWriter, BitWrite,
};
use proptest::prelude::*;

fn order() -> impl Strategy<Value = BitOrder> {
    prop_oneof![Just(BitOrder::Lsb), Just(BitOrder::Msb)]
}

/// A sequence of `(value, bit_count)` fields.
fn field_list() -> impl Strategy<Value = Vec<(u64, u32)>> {
    prop::collection::vec((any::<u64>(), 0u32..=64), 1..24)
}

fn low_bits(value: u64, count: u32) -> u64 {
    if count == 64 { value } else { value & ((1u64 << count) - 1) }
}

fn total_bits(fields: &[(u64, u32)]) -> u64 {
    fields.iter().map(|&(_, count)| u64::from(count)).sum()
}

proptest! {
    // -------------------------------------------------------------
    // 1. Each read or write moves the position by exactly its width.
    // -------------------------------------------------------------
    #[test]
    fn prop_position_advances_by_bit_count(ref fields in field_list(), order in order()) {
        let len = total_bits(fields).div_ceil(8) as usize;
        let mut array = BitArray::with_order(vec![0; len], order).unwrap();
        let mut stream = BitStreamWriter::with_order(Vec::new(), order);

        for &(value, count) in fields.iter() {
            let before = array.position();
            array.write_u64(value, count).unwrap();
            prop_assert_eq!(array.position(), before + i64::from(count));

            let before = stream.position();
            stream.write_u64(value, count).unwrap();
            prop_assert_eq!(stream.position(), before + u64::from(count));
        }

        array.set_position(0);
        let bytes = stream.into_inner().unwrap();
        let mut reader = BitStreamReader::with_order(bytes.as_slice(), order);
        for &(_, count) in fields.iter() {
            let before = reader.position();
            reader.read_u64(count).unwrap();
            prop_assert_eq!(reader.position(), before + u64::from(count));

            let before = array.position();
            array.read_u64(count).unwrap();
            prop_assert_eq!(array.position(), before + i64::from(count));
        }

        let before = array.position();
        if array.remaining_bits() > 0 {
            array.read_bit().unwrap();
            prop_assert_eq!(array.position(), before + 1);
        }
    }

    // -------------------------------------------------------------
    // 2. Array, span and stream writers agree byte for byte.
    // -------------------------------------------------------------
    #[test]
    fn prop_writers_agree(ref fields in field_list(), order in order()) {
        let len = total_bits(fields).div_ceil(8) as usize;

        let mut array = BitArray::with_order(vec![0; len], order).unwrap();
        let mut backing = vec![0u8; len];
        let mut span = BitSpan::with_order(backing.as_mut_slice(), order).unwrap();
        let mut stream = BitStreamWriter::with_order(Vec::new(), order);

        for &(value, count) in fields.iter() {
            array.write_u64(value, count).unwrap();
            span.write_u64(value, count).unwrap();
            stream.write_u64(value, count).unwrap();
        }
        drop(span);

        let streamed = stream.into_inner().unwrap();
        prop_assert_eq!(array.as_bytes(), backing.as_slice());
        prop_assert_eq!(array.as_bytes(), streamed.as_slice());
    }

    // -------------------------------------------------------------
    // 3. Array and stream readers agree on the same bytes.
    // -------------------------------------------------------------
    #[test]
    fn prop_readers_agree(
        ref bytes in prop::collection::vec(any::<u8>(), 0..96),
        ref counts in prop::collection::vec(0u32..=64, 1..24),
        order in order(),
    ) {
        let mut array = BitCursor::with_order(bytes.as_slice(), order).unwrap();
        let mut reader = BitStreamReader::with_order(bytes.as_slice(), order);

        for &count in counts.iter() {
            match array.read_u64(count) {
                Ok(expected) => {
                    prop_assert_eq!(reader.read_u64(count).unwrap(), expected);
                }
                Err(_) => {
                    prop_assert!(reader.read_u64(count).unwrap_err().is_eof());
                    break;
                }
            }
        }
    }

    // -------------------------------------------------------------
    // 4. Writing then reading back returns the masked values.
    // -------------------------------------------------------------
    #[test]
    fn prop_stream_roundtrip(ref fields in field_list(), order in order()) {
        let mut writer = BitStreamWriter::with_order(Vec::new(), order);
        for &(value, count) in fields.iter() {
            writer.write_u64(value, count).unwrap();
        }
        let bytes = writer.into_inner().unwrap();

        let mut reader = BitStreamReader::with_order(bytes.as_slice(), order);
        for &(value, count) in fields.iter() {
            prop_assert_eq!(reader.read_u64(count).unwrap(), low_bits(value, count));
        }
    }

    // -------------------------------------------------------------
    // 5. A seekable writer patches a field without touching its
    //    neighbours.
    // -------------------------------------------------------------
    #[test]
    fn prop_seekable_patch_keeps_neighbours(
        ref original in prop::collection::vec(any::<u8>(), 16..32),
        offset in 0u64..64,
        value in any::<u64>(),
        count in 1u32..=64,
        order in order(),
    ) {
        let mut expected = BitArray::with_order(original.clone(), order).unwrap();
        expected.set_position(offset as i64);
        expected.write_u64(value, count).unwrap();

        let stream = std::io::Cursor::new(original.clone());
        let mut writer = BitStreamWriter::seekable_with_order(stream, order);
        writer.set_position(offset).unwrap();
        writer.write_u64(value, count).unwrap();
        let patched = writer.into_inner().unwrap().into_inner();

        prop_assert_eq!(patched.as_slice(), expected.as_bytes());
    }
}
