//! Bit-at-a-time reference versions of the span operations.
//!
//! Slow but hopefully correct; the word-staged implementation is checked
//! against these. Out-of-range offsets panic on the slice index.

use crate::BitOrder;

#[inline(always)]
fn locate(pos: usize, order: BitOrder) -> (usize, u32) {
    (pos / 8, order.bit_in_byte((pos % 8) as u32))
}

/// Reads `bit_width` (at most 64) bits at `bit_offset`.
///
/// For [`BitOrder::Lsb`] the first bit lands in bit 0 of the result; for
/// [`BitOrder::Msb`] it lands in the result's top field bit.
pub fn get_bits(slice: &[u8], bit_offset: usize, bit_width: usize, order: BitOrder) -> u64 {
    let mut value = 0u64;

    for i in 0..bit_width {
        let (byte, shift) = locate(bit_offset + i, order);
        let bit = ((slice[byte] >> shift) & 1) as u64;

        match order {
            BitOrder::Lsb => value |= bit << i,
            BitOrder::Msb => value = (value << 1) | bit,
        }
    }

    value
}

pub fn set_bits(slice: &mut [u8], bit_offset: usize, bit_width: usize, value: u64, order: BitOrder) {
    for i in 0..bit_width {
        let bit = match order {
            BitOrder::Lsb => (value >> i) & 1,
            BitOrder::Msb => (value >> (bit_width - 1 - i)) & 1,
        };
        let (byte, shift) = locate(bit_offset + i, order);

        if bit == 1 {
            slice[byte] |= 1 << shift;
        } else {
            slice[byte] &= !(1 << shift);
        }
    }
}
