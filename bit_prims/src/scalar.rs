//! Bit fields inside a single integer.
//!
//! The integer is treated as its own little-endian byte storage, so a field
//! can never borrow bits from a neighbouring byte: `bit_offset + bit_count`
//! must stay within the integer's width.

use crate::span;
use crate::word::NATIVE_64;
use crate::{BitError, BitOrder, Word, sign_extend};

type Result<T> = core::result::Result<T, BitError>;

pub fn read_bits<W: Word>(source: W, bit_offset: u32, bit_count: u32, order: BitOrder) -> Result<W> {
    let bytes = source.to_le();
    span::read_bits(bytemuck::bytes_of(&bytes), bit_offset as usize, bit_count, order)
}

pub fn read_bits_signed<W: Word>(
    source: W,
    bit_offset: u32,
    bit_count: u32,
    order: BitOrder,
) -> Result<W::Signed> {
    let value = read_bits(source, bit_offset, bit_count, order)?;
    Ok(sign_extend(value, bit_count))
}

/// Splices the low `bit_count` bits of `value` into `dest`.
pub fn write_bits<W: Word>(
    dest: &mut W,
    bit_offset: u32,
    value: W,
    bit_count: u32,
    order: BitOrder,
) -> Result<()> {
    let mut bytes = dest.to_le();
    span::write_bits(
        bytemuck::bytes_of_mut(&mut bytes),
        bit_offset as usize,
        value,
        bit_count,
        order,
    )?;
    *dest = W::from_le(bytes);
    Ok(())
}

pub fn write_bits_signed<W: Word>(
    dest: &mut W,
    bit_offset: u32,
    value: W::Signed,
    bit_count: u32,
    order: BitOrder,
) -> Result<()> {
    write_bits(dest, bit_offset, W::from_signed(value), bit_count, order)
}

pub fn read_bit<W: Word>(source: W, bit_offset: u32, order: BitOrder) -> Result<bool> {
    let bytes = source.to_le();
    span::read_bit(bytemuck::bytes_of(&bytes), bit_offset as usize, order)
}

pub fn write_bit<W: Word>(dest: &mut W, bit_offset: u32, value: bool, order: BitOrder) -> Result<()> {
    let mut bytes = dest.to_le();
    span::write_bit(bytemuck::bytes_of_mut(&mut bytes), bit_offset as usize, value, order)?;
    *dest = W::from_le(bytes);
    Ok(())
}

pub fn read_usize(source: usize, bit_offset: u32, bit_count: u32, order: BitOrder) -> Result<usize> {
    if NATIVE_64 {
        read_bits(source as u64, bit_offset, bit_count, order).map(|v| v as usize)
    } else {
        read_bits(source as u32, bit_offset, bit_count, order).map(|v| v as usize)
    }
}

pub fn read_isize(source: isize, bit_offset: u32, bit_count: u32, order: BitOrder) -> Result<isize> {
    if NATIVE_64 {
        read_bits_signed(source as u64, bit_offset, bit_count, order).map(|v| v as isize)
    } else {
        read_bits_signed(source as u32, bit_offset, bit_count, order).map(|v| v as isize)
    }
}

pub fn write_usize(
    dest: &mut usize,
    bit_offset: u32,
    value: usize,
    bit_count: u32,
    order: BitOrder,
) -> Result<()> {
    if NATIVE_64 {
        let mut word = *dest as u64;
        write_bits(&mut word, bit_offset, value as u64, bit_count, order)?;
        *dest = word as usize;
    } else {
        let mut word = *dest as u32;
        write_bits(&mut word, bit_offset, value as u32, bit_count, order)?;
        *dest = word as usize;
    }
    Ok(())
}

pub fn write_isize(
    dest: &mut isize,
    bit_offset: u32,
    value: isize,
    bit_count: u32,
    order: BitOrder,
) -> Result<()> {
    let mut word = *dest as usize;
    write_usize(&mut word, bit_offset, value as usize, bit_count, order)?;
    *dest = word as isize;
    Ok(())
}

macro_rules! fixed_order {
    ($($read:ident, $write:ident => $ty:ty, $reader:expr, $writer:expr, $order:expr;)*) => {
        $(
            #[inline]
            pub fn $read(source: $ty, bit_offset: u32, bit_count: u32) -> Result<$ty> {
                $reader(source, bit_offset, bit_count, $order)
            }

            #[inline]
            pub fn $write(dest: &mut $ty, bit_offset: u32, value: $ty, bit_count: u32) -> Result<()> {
                $writer(dest, bit_offset, value, bit_count, $order)
            }
        )*
    };
}

// Signed scalars go through their unsigned twin so the field arithmetic
// stays on one implementation.
fn read_i8(source: i8, bit_offset: u32, bit_count: u32, order: BitOrder) -> Result<i8> {
    read_bits_signed(source as u8, bit_offset, bit_count, order)
}

fn read_i16(source: i16, bit_offset: u32, bit_count: u32, order: BitOrder) -> Result<i16> {
    read_bits_signed(source as u16, bit_offset, bit_count, order)
}

fn read_i32(source: i32, bit_offset: u32, bit_count: u32, order: BitOrder) -> Result<i32> {
    read_bits_signed(source as u32, bit_offset, bit_count, order)
}

fn read_i64(source: i64, bit_offset: u32, bit_count: u32, order: BitOrder) -> Result<i64> {
    read_bits_signed(source as u64, bit_offset, bit_count, order)
}

fn write_signed<W: Word>(
    dest: &mut W::Signed,
    bit_offset: u32,
    value: W::Signed,
    bit_count: u32,
    order: BitOrder,
) -> Result<()> {
    let mut word = W::from_signed(*dest);
    write_bits_signed(&mut word, bit_offset, value, bit_count, order)?;
    *dest = word.to_signed();
    Ok(())
}

fixed_order! {
    read_u8_lsb, write_u8_lsb => u8, read_bits::<u8>, write_bits::<u8>, BitOrder::Lsb;
    read_u8_msb, write_u8_msb => u8, read_bits::<u8>, write_bits::<u8>, BitOrder::Msb;
    read_i8_lsb, write_i8_lsb => i8, read_i8, write_signed::<u8>, BitOrder::Lsb;
    read_i8_msb, write_i8_msb => i8, read_i8, write_signed::<u8>, BitOrder::Msb;
    read_u16_lsb, write_u16_lsb => u16, read_bits::<u16>, write_bits::<u16>, BitOrder::Lsb;
    read_u16_msb, write_u16_msb => u16, read_bits::<u16>, write_bits::<u16>, BitOrder::Msb;
    read_i16_lsb, write_i16_lsb => i16, read_i16, write_signed::<u16>, BitOrder::Lsb;
    read_i16_msb, write_i16_msb => i16, read_i16, write_signed::<u16>, BitOrder::Msb;
    read_u32_lsb, write_u32_lsb => u32, read_bits::<u32>, write_bits::<u32>, BitOrder::Lsb;
    read_u32_msb, write_u32_msb => u32, read_bits::<u32>, write_bits::<u32>, BitOrder::Msb;
    read_i32_lsb, write_i32_lsb => i32, read_i32, write_signed::<u32>, BitOrder::Lsb;
    read_i32_msb, write_i32_msb => i32, read_i32, write_signed::<u32>, BitOrder::Msb;
    read_u64_lsb, write_u64_lsb => u64, read_bits::<u64>, write_bits::<u64>, BitOrder::Lsb;
    read_u64_msb, write_u64_msb => u64, read_bits::<u64>, write_bits::<u64>, BitOrder::Msb;
    read_i64_lsb, write_i64_lsb => i64, read_i64, write_signed::<u64>, BitOrder::Lsb;
    read_i64_msb, write_i64_msb => i64, read_i64, write_signed::<u64>, BitOrder::Msb;
    read_usize_lsb, write_usize_lsb => usize, read_usize, write_usize, BitOrder::Lsb;
    read_usize_msb, write_usize_msb => usize, read_usize, write_usize, BitOrder::Msb;
    read_isize_lsb, write_isize_lsb => isize, read_isize, write_isize, BitOrder::Lsb;
    read_isize_msb, write_isize_msb => isize, read_isize, write_isize, BitOrder::Msb;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lsb_offsets_count_from_bit_zero() -> Result<()> {
        assert_eq!(read_u16_lsb(0xABCD, 4, 8)?, 0xBC);
        assert_eq!(read_i16_lsb(0x0F00, 8, 4)?, -1);
        Ok(())
    }

    #[test]
    fn msb_walks_the_little_endian_bytes() -> Result<()> {
        // Bytes in memory are CD AB; MSB-first that reads 1100 1101 1010 1011.
        assert_eq!(read_u16_msb(0xABCD, 0, 4)?, 0xC);
        assert_eq!(read_u16_msb(0xABCD, 8, 8)?, 0xAB);
        Ok(())
    }

    #[test]
    fn no_neighbouring_bytes_to_borrow() {
        assert_eq!(
            read_u8_lsb(0xFF, 4, 5),
            Err(BitError::OutOfRange {
                offset: 4,
                count: 5,
                len_bits: 8
            })
        );
        let mut value = 0x1234u16;
        assert!(write_u16_msb(&mut value, 0, 0, 17).is_err());
        assert_eq!(value, 0x1234);
    }

    #[test]
    fn writes_update_in_place() -> Result<()> {
        let mut value = 0u32;
        write_u32_lsb(&mut value, 4, 0xABC, 12)?;
        assert_eq!(value, 0xABC0);

        let mut signed = 0i64;
        write_i64_msb(&mut signed, 60, -1, 4)?;
        assert_eq!(read_i64_msb(signed, 60, 4)?, -1);

        let mut flags = 0u8;
        write_bit(&mut flags, 7, true, BitOrder::Lsb)?;
        assert_eq!(flags, 0x80);
        assert!(read_bit(flags, 0, BitOrder::Msb)?);
        Ok(())
    }

    #[test]
    fn pointer_width_dispatch() -> Result<()> {
        let mut value = 0usize;
        write_usize_lsb(&mut value, 3, 0b101, 3)?;
        assert_eq!(value, 0b101_000);
        assert_eq!(read_isize_lsb(value as isize, 3, 3)?, -3);
        Ok(())
    }
}
