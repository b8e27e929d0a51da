//! Bit fields addressed by bit offset inside a byte slice.
//!
//! Multi-bit operations check `bit_count` against the width of the result
//! and `bit_offset + bit_count` against the slice before touching memory.
//! Single-bit operations skip the explicit check and report a bad offset
//! through the byte lookup itself.

use crate::mask;
use crate::word::NATIVE_64;
use crate::{BitError, BitOrder, Word, sign_extend};

type Result<T> = core::result::Result<T, BitError>;

/// Validates a `bit_count`-bit field at `bit_offset` against `len_bytes`
/// bytes of storage and a `width`-bit result.
#[inline]
pub fn check_range(len_bytes: usize, bit_offset: usize, bit_count: u32, width: u32) -> Result<()> {
    if bit_count > width {
        return Err(BitError::InvalidBitCount {
            count: bit_count,
            width,
        });
    }
    let len_bits = len_bytes as u64 * 8;
    let end = (bit_offset as u64).checked_add(u64::from(bit_count));
    if end.is_none_or(|end| end > len_bits) {
        return Err(BitError::OutOfRange {
            offset: bit_offset,
            count: bit_count,
            len_bits,
        });
    }
    Ok(())
}

// Loads a little-endian `S` starting at `bytes[index]`, zero-filling past
// the end of the slice.
#[inline(always)]
fn load<S: Word>(bytes: &[u8], index: usize) -> S {
    let tail = bytes.get(index..).unwrap_or_default();
    let word = if tail.len() >= S::BYTES {
        bytemuck::pod_read_unaligned(&tail[..S::BYTES])
    } else {
        let mut word = S::zero();
        bytemuck::bytes_of_mut(&mut word)[..tail.len()].copy_from_slice(tail);
        word
    };
    S::from_le(word)
}

// Stores `word` little-endian at `bytes[index]`, dropping whatever falls
// past the end of the slice.
#[inline(always)]
fn store<S: Word>(bytes: &mut [u8], index: usize, word: S) {
    let word = word.to_le();
    let tail = bytes.get_mut(index..).unwrap_or_default();
    let len = tail.len().min(S::BYTES);
    tail[..len].copy_from_slice(&bytemuck::bytes_of(&word)[..len]);
}

/// Reads `bit_count` bits at `bit_offset` as an unsigned `W`.
pub fn read_bits<W: Word>(
    source: &[u8],
    bit_offset: usize,
    bit_count: u32,
    order: BitOrder,
) -> Result<W> {
    check_range(source.len(), bit_offset, bit_count, W::BITS)?;
    if bit_count == 0 {
        return Ok(W::zero());
    }

    let index = bit_offset >> 3;
    let offset = (bit_offset & 7) as u32;
    let staged = if offset + bit_count <= <W::Stage as Word>::BITS {
        mask::read(load::<W::Stage>(source, index), offset, bit_count, order)
    } else {
        let lo = load::<W::Stage>(source, index);
        let hi = load::<W::Stage>(source, index + <W::Stage as Word>::BYTES);
        mask::read_split(lo, hi, offset, bit_count, order)
    };
    Ok(W::narrow(staged))
}

/// Reads `bit_count` bits at `bit_offset` and sign-extends them.
pub fn read_bits_signed<W: Word>(
    source: &[u8],
    bit_offset: usize,
    bit_count: u32,
    order: BitOrder,
) -> Result<W::Signed> {
    let value = read_bits::<W>(source, bit_offset, bit_count, order)?;
    Ok(sign_extend(value, bit_count))
}

/// Writes the low `bit_count` bits of `value` at `bit_offset`.
///
/// On error `dest` is left untouched.
pub fn write_bits<W: Word>(
    dest: &mut [u8],
    bit_offset: usize,
    value: W,
    bit_count: u32,
    order: BitOrder,
) -> Result<()> {
    check_range(dest.len(), bit_offset, bit_count, W::BITS)?;
    if bit_count == 0 {
        return Ok(());
    }

    let index = bit_offset >> 3;
    let offset = (bit_offset & 7) as u32;
    let value = value.widen();
    if offset + bit_count <= <W::Stage as Word>::BITS {
        let word = load::<W::Stage>(dest, index);
        store(dest, index, mask::write(word, offset, value, bit_count, order));
    } else {
        let hi_index = index + <W::Stage as Word>::BYTES;
        let lo = load::<W::Stage>(dest, index);
        let hi = load::<W::Stage>(dest, hi_index);
        let (lo, hi) = mask::write_split(lo, hi, offset, value, bit_count, order);
        store(dest, index, lo);
        store(dest, hi_index, hi);
    }
    Ok(())
}

/// Writes the low `bit_count` bits of a signed `value` at `bit_offset`.
pub fn write_bits_signed<W: Word>(
    dest: &mut [u8],
    bit_offset: usize,
    value: W::Signed,
    bit_count: u32,
    order: BitOrder,
) -> Result<()> {
    write_bits(dest, bit_offset, W::from_signed(value), bit_count, order)
}

/// Reads the single bit at `bit_offset`.
///
/// There is no up-front range check; an offset past the end fails with
/// [`BitError::IndexOutOfBounds`] from the byte lookup.
#[inline]
pub fn read_bit(source: &[u8], bit_offset: usize, order: BitOrder) -> Result<bool> {
    let index = bit_offset >> 3;
    let byte = source.get(index).ok_or(BitError::IndexOutOfBounds {
        index,
        len: source.len(),
    })?;
    Ok((byte >> order.bit_in_byte((bit_offset & 7) as u32)) & 1 != 0)
}

/// Sets or clears the single bit at `bit_offset`.
#[inline]
pub fn write_bit(dest: &mut [u8], bit_offset: usize, value: bool, order: BitOrder) -> Result<()> {
    let index = bit_offset >> 3;
    let len = dest.len();
    let byte = dest
        .get_mut(index)
        .ok_or(BitError::IndexOutOfBounds { index, len })?;
    let mask = 1u8 << order.bit_in_byte((bit_offset & 7) as u32);
    if value {
        *byte |= mask;
    } else {
        *byte &= !mask;
    }
    Ok(())
}

/// Pointer-width read, dispatched to the 64- or 32-bit implementation.
pub fn read_usize(source: &[u8], bit_offset: usize, bit_count: u32, order: BitOrder) -> Result<usize> {
    if NATIVE_64 {
        read_bits::<u64>(source, bit_offset, bit_count, order).map(|v| v as usize)
    } else {
        read_bits::<u32>(source, bit_offset, bit_count, order).map(|v| v as usize)
    }
}

pub fn read_isize(source: &[u8], bit_offset: usize, bit_count: u32, order: BitOrder) -> Result<isize> {
    if NATIVE_64 {
        read_bits_signed::<u64>(source, bit_offset, bit_count, order).map(|v| v as isize)
    } else {
        read_bits_signed::<u32>(source, bit_offset, bit_count, order).map(|v| v as isize)
    }
}

pub fn write_usize(
    dest: &mut [u8],
    bit_offset: usize,
    value: usize,
    bit_count: u32,
    order: BitOrder,
) -> Result<()> {
    if NATIVE_64 {
        write_bits::<u64>(dest, bit_offset, value as u64, bit_count, order)
    } else {
        write_bits::<u32>(dest, bit_offset, value as u32, bit_count, order)
    }
}

pub fn write_isize(
    dest: &mut [u8],
    bit_offset: usize,
    value: isize,
    bit_count: u32,
    order: BitOrder,
) -> Result<()> {
    write_usize(dest, bit_offset, value as usize, bit_count, order)
}

// Fixed-order entry points. Accessor generators key off these names, so
// they stay one function per width, signedness and order.
macro_rules! fixed_order {
    ($($read:ident, $write:ident => $ty:ty, $reader:expr, $writer:expr, $order:expr;)*) => {
        $(
            #[inline]
            pub fn $read(source: &[u8], bit_offset: usize, bit_count: u32) -> Result<$ty> {
                $reader(source, bit_offset, bit_count, $order)
            }

            #[inline]
            pub fn $write(dest: &mut [u8], bit_offset: usize, value: $ty, bit_count: u32) -> Result<()> {
                $writer(dest, bit_offset, value, bit_count, $order)
            }
        )*
    };
}

fixed_order! {
    read_u8_lsb, write_u8_lsb => u8, read_bits::<u8>, write_bits::<u8>, BitOrder::Lsb;
    read_u8_msb, write_u8_msb => u8, read_bits::<u8>, write_bits::<u8>, BitOrder::Msb;
    read_i8_lsb, write_i8_lsb => i8, read_bits_signed::<u8>, write_bits_signed::<u8>, BitOrder::Lsb;
    read_i8_msb, write_i8_msb => i8, read_bits_signed::<u8>, write_bits_signed::<u8>, BitOrder::Msb;
    read_u16_lsb, write_u16_lsb => u16, read_bits::<u16>, write_bits::<u16>, BitOrder::Lsb;
    read_u16_msb, write_u16_msb => u16, read_bits::<u16>, write_bits::<u16>, BitOrder::Msb;
    read_i16_lsb, write_i16_lsb => i16, read_bits_signed::<u16>, write_bits_signed::<u16>, BitOrder::Lsb;
    read_i16_msb, write_i16_msb => i16, read_bits_signed::<u16>, write_bits_signed::<u16>, BitOrder::Msb;
    read_u32_lsb, write_u32_lsb => u32, read_bits::<u32>, write_bits::<u32>, BitOrder::Lsb;
    read_u32_msb, write_u32_msb => u32, read_bits::<u32>, write_bits::<u32>, BitOrder::Msb;
    read_i32_lsb, write_i32_lsb => i32, read_bits_signed::<u32>, write_bits_signed::<u32>, BitOrder::Lsb;
    read_i32_msb, write_i32_msb => i32, read_bits_signed::<u32>, write_bits_signed::<u32>, BitOrder::Msb;
    read_u64_lsb, write_u64_lsb => u64, read_bits::<u64>, write_bits::<u64>, BitOrder::Lsb;
    read_u64_msb, write_u64_msb => u64, read_bits::<u64>, write_bits::<u64>, BitOrder::Msb;
    read_i64_lsb, write_i64_lsb => i64, read_bits_signed::<u64>, write_bits_signed::<u64>, BitOrder::Lsb;
    read_i64_msb, write_i64_msb => i64, read_bits_signed::<u64>, write_bits_signed::<u64>, BitOrder::Msb;
    read_usize_lsb, write_usize_lsb => usize, read_usize, write_usize, BitOrder::Lsb;
    read_usize_msb, write_usize_msb => usize, read_usize, write_usize, BitOrder::Msb;
    read_isize_lsb, write_isize_lsb => isize, read_isize, write_isize, BitOrder::Lsb;
    read_isize_msb, write_isize_msb => isize, read_isize, write_isize, BitOrder::Msb;
}

#[inline]
pub fn read_bit_lsb(source: &[u8], bit_offset: usize) -> Result<bool> {
    read_bit(source, bit_offset, BitOrder::Lsb)
}

#[inline]
pub fn read_bit_msb(source: &[u8], bit_offset: usize) -> Result<bool> {
    read_bit(source, bit_offset, BitOrder::Msb)
}

#[inline]
pub fn write_bit_lsb(dest: &mut [u8], bit_offset: usize, value: bool) -> Result<()> {
    write_bit(dest, bit_offset, value, BitOrder::Lsb)
}

#[inline]
pub fn write_bit_msb(dest: &mut [u8], bit_offset: usize, value: bool) -> Result<()> {
    write_bit(dest, bit_offset, value, BitOrder::Msb)
}
