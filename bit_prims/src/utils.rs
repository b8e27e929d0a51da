//! Stateless bit tricks: reversal, Morton interleaving, range masks and
//! ZigZag folding.

use crate::Word;

/// `BIT_REVERSE_TABLE[b]` is `b` with its eight bits mirrored.
pub const BIT_REVERSE_TABLE: [u8; 256] = build_reverse_table();

const fn build_reverse_table() -> [u8; 256] {
    let mut table = [0u8; 256];
    let mut i = 0;
    while i < 256 {
        let mut byte = i as u8;
        let mut reversed = 0u8;
        let mut k = 0;
        while k < 8 {
            reversed = (reversed << 1) | (byte & 1);
            byte >>= 1;
            k += 1;
        }
        table[i] = reversed;
        i += 1;
    }
    table
}

#[inline]
pub fn reverse_bits_u8(value: u8) -> u8 {
    BIT_REVERSE_TABLE[value as usize]
}

#[inline]
pub fn reverse_bits_u16(value: u16) -> u16 {
    ((reverse_bits_u8(value as u8) as u16) << 8) | reverse_bits_u8((value >> 8) as u8) as u16
}

#[inline]
pub fn reverse_bits_u32(value: u32) -> u32 {
    ((reverse_bits_u16(value as u16) as u32) << 16) | reverse_bits_u16((value >> 16) as u16) as u32
}

#[inline]
pub fn reverse_bits_u64(value: u64) -> u64 {
    ((reverse_bits_u32(value as u32) as u64) << 32) | reverse_bits_u32((value >> 32) as u32) as u64
}

/// Mirrors the bits inside every byte of `word` while keeping the bytes
/// where they are.
///
/// This turns an LSB-first mask into the equivalent MSB-first one.
#[inline]
pub fn reverse_byte_bits<W: Word>(mut word: W) -> W {
    for byte in bytemuck::bytes_of_mut(&mut word) {
        *byte = BIT_REVERSE_TABLE[*byte as usize];
    }
    word
}

// Spreads the 32 bits of `value` over the even bit positions.
#[inline]
fn spread(value: u32) -> u64 {
    let mut x = value as u64;
    x = (x | (x << 16)) & 0x0000_FFFF_0000_FFFF;
    x = (x | (x << 8)) & 0x00FF_00FF_00FF_00FF;
    x = (x | (x << 4)) & 0x0F0F_0F0F_0F0F_0F0F;
    x = (x | (x << 2)) & 0x3333_3333_3333_3333;
    (x | (x << 1)) & 0x5555_5555_5555_5555
}

// Inverse of `spread`: gathers the even bit positions.
#[inline]
fn compact(value: u64) -> u32 {
    let mut x = value & 0x5555_5555_5555_5555;
    x = (x | (x >> 1)) & 0x3333_3333_3333_3333;
    x = (x | (x >> 2)) & 0x0F0F_0F0F_0F0F_0F0F;
    x = (x | (x >> 4)) & 0x00FF_00FF_00FF_00FF;
    x = (x | (x >> 8)) & 0x0000_FFFF_0000_FFFF;
    x = (x | (x >> 16)) & 0x0000_0000_FFFF_FFFF;
    x as u32
}

/// Interleaves two words into a Morton code: even bits come from `a`,
/// odd bits from `b`.
#[inline]
pub fn interleave_u32(a: u32, b: u32) -> u64 {
    spread(a) | (spread(b) << 1)
}

#[inline]
pub fn interleave_u16(a: u16, b: u16) -> u32 {
    interleave_u32(a as u32, b as u32) as u32
}

#[inline]
pub fn interleave_u8(a: u8, b: u8) -> u16 {
    interleave_u32(a as u32, b as u32) as u16
}

/// Splits a Morton code back into its `(even, odd)` operands.
#[inline]
pub fn deinterleave_u64(code: u64) -> (u32, u32) {
    (compact(code), compact(code >> 1))
}

#[inline]
pub fn deinterleave_u32(code: u32) -> (u16, u16) {
    let (a, b) = deinterleave_u64(code as u64);
    (a as u16, b as u16)
}

#[inline]
pub fn deinterleave_u16(code: u16) -> (u8, u8) {
    let (a, b) = deinterleave_u64(code as u64);
    (a as u8, b as u8)
}

/// A run of `count` set bits starting at bit `offset`.
///
/// `offset + count` must not exceed the width of `W`.
#[inline]
pub fn range_mask<W: Word>(offset: u32, count: u32) -> W {
    debug_assert!(offset + count <= W::BITS);
    if count == 0 {
        return W::zero();
    }
    (W::max_value() >> (W::BITS - count) as usize) << offset as usize
}

/// Flips `count` bits of `value` starting at bit `offset`.
#[inline]
pub fn invert_bits<W: Word>(value: W, offset: u32, count: u32) -> W {
    value ^ range_mask::<W>(offset, count)
}

/// Takes the bits selected by `mask` from `a` and the rest from `b`.
#[inline]
pub fn merge_bits<W: Word>(a: W, b: W, mask: W) -> W {
    b ^ ((b ^ a) & mask)
}

/// Swaps the `len`-bit fields starting at bits `a` and `b`.
///
/// The two fields must not overlap.
#[inline]
pub fn swap_bits<W: Word>(value: W, a: u32, b: u32, len: u32) -> W {
    debug_assert!(a.max(b) + len <= W::BITS);
    let x = ((value >> a as usize) ^ (value >> b as usize)) & range_mask::<W>(0, len);
    value ^ ((x << a as usize) | (x << b as usize))
}

macro_rules! zigzag {
    ($($encode:ident, $decode:ident: $signed:ty => $unsigned:ty;)*) => {
        $(
            /// Folds the sign into the lowest bit so small magnitudes stay
            /// small: 0, -1, 1, -2, ... map to 0, 1, 2, 3, ...
            #[inline]
            pub const fn $encode(value: $signed) -> $unsigned {
                ((value << 1) ^ (value >> (<$signed>::BITS - 1))) as $unsigned
            }

            #[inline]
            pub const fn $decode(value: $unsigned) -> $signed {
                ((value >> 1) as $signed) ^ -((value & 1) as $signed)
            }
        )*
    };
}

zigzag! {
    zigzag_encode_8, zigzag_decode_8: i8 => u8;
    zigzag_encode_16, zigzag_decode_16: i16 => u16;
    zigzag_encode_32, zigzag_decode_32: i32 => u32;
    zigzag_encode_64, zigzag_decode_64: i64 => u64;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_matches_intrinsic() {
        for b in 0..=255u8 {
            assert_eq!(reverse_bits_u8(b), b.reverse_bits());
        }
        assert_eq!(reverse_bits_u16(0x1234), 0x1234u16.reverse_bits());
        assert_eq!(reverse_bits_u32(0xDEAD_BEEF), 0xDEAD_BEEFu32.reverse_bits());
        assert_eq!(
            reverse_bits_u64(0x0123_4567_89AB_CDEF),
            0x0123_4567_89AB_CDEFu64.reverse_bits()
        );
    }

    #[test]
    fn byte_bits_reverse_in_place() {
        assert_eq!(reverse_byte_bits(0x0000_00F8u32), 0x0000_001F);
        assert_eq!(reverse_byte_bits(0x0180u16), 0x8001);
    }

    #[test]
    fn morton_layout() {
        assert_eq!(interleave_u8(0xFF, 0x00), 0x5555);
        assert_eq!(interleave_u8(0x00, 0xFF), 0xAAAA);
        assert_eq!(interleave_u16(0b11, 0b01), 0b0111);
        assert_eq!(deinterleave_u32(interleave_u16(0xBEEF, 0x1234)), (0xBEEF, 0x1234));
    }

    #[test]
    fn masks_and_merges() {
        assert_eq!(range_mask::<u8>(2, 3), 0b0001_1100);
        assert_eq!(range_mask::<u64>(0, 64), u64::MAX);
        assert_eq!(range_mask::<u16>(5, 0), 0);
        assert_eq!(invert_bits(0b1010_1010u8, 0, 4), 0b1010_0101);
        assert_eq!(merge_bits(0xFFu8, 0x00, 0x0F), 0x0F);
        assert_eq!(swap_bits(0b0000_0011u8, 0, 4, 2), 0b0011_0000);
    }

    #[test]
    fn zigzag_small_magnitudes() {
        assert_eq!(zigzag_encode_32(0), 0);
        assert_eq!(zigzag_encode_32(-1), 1);
        assert_eq!(zigzag_encode_32(1), 2);
        assert_eq!(zigzag_encode_32(-2), 3);
        assert_eq!(zigzag_encode_8(i8::MIN), u8::MAX);
        assert_eq!(zigzag_decode_64(u64::MAX), i64::MIN);
    }
}
