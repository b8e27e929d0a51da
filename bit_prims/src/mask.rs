//! Extracting and splicing a field inside a staged word.
//!
//! A staged word is loaded little-endian from byte storage, so its low byte
//! is the first byte in memory. `offset` is the field's position inside that
//! first byte (always below 8), `count` its width.
//!
//! MSB-first fields use the same shift arithmetic as LSB-first ones after a
//! byte swap: swapping puts the first byte at the top of the word, where the
//! highest bit is the first bit of the stream.

use crate::utils::reverse_byte_bits;
use crate::{BitOrder, Word};

/// Extracts `count` bits at `offset` from `source`.
///
/// `offset + count` must fit in `S`. A zero-width field reads as 0.
#[inline]
pub fn read<S: Word>(source: S, offset: u32, count: u32, order: BitOrder) -> S {
    debug_assert!(offset + count <= S::BITS);
    if count == 0 {
        return S::zero();
    }
    let down = (S::BITS - count) as usize;
    match order {
        BitOrder::Lsb => (source << (S::BITS - count - offset) as usize) >> down,
        BitOrder::Msb => (source.swap_bytes() << offset as usize) >> down,
    }
}

/// Splices the low `count` bits of `value` into `dest` at `offset`.
///
/// Bits of `dest` outside the field are preserved. A zero-width field
/// leaves `dest` unchanged.
#[inline]
pub fn write<S: Word>(dest: S, offset: u32, value: S, count: u32, order: BitOrder) -> S {
    debug_assert!(offset + count <= S::BITS);
    if count == 0 {
        return dest;
    }
    let mask = S::max_value() >> (S::BITS - count) as usize;
    let value = value & mask;
    let (mask, value) = match order {
        BitOrder::Lsb => (mask << offset as usize, value << offset as usize),
        BitOrder::Msb => (
            reverse_byte_bits(mask << offset as usize),
            (value << (S::BITS - count - offset) as usize).swap_bytes(),
        ),
    };
    (dest & !mask) | value
}

/// Reads a field that starts in `lo` at `offset` and runs into `hi`.
///
/// `hi` is the word staged right after `lo`; the field must overrun `lo`
/// (`offset + count > S::BITS`).
#[inline]
pub fn read_split<S: Word>(lo: S, hi: S, offset: u32, count: u32, order: BitOrder) -> S {
    debug_assert!(offset + count > S::BITS && count <= S::BITS);
    let head = S::BITS - offset;
    let tail = count - head;
    match order {
        BitOrder::Lsb => read(lo, offset, head, order) | (read(hi, 0, tail, order) << head as usize),
        BitOrder::Msb => (read(lo, offset, head, order) << tail as usize) | read(hi, 0, tail, order),
    }
}

/// Counterpart of [`read_split`], returning the updated `(lo, hi)` pair.
#[inline]
pub fn write_split<S: Word>(
    lo: S,
    hi: S,
    offset: u32,
    value: S,
    count: u32,
    order: BitOrder,
) -> (S, S) {
    debug_assert!(offset + count > S::BITS && count <= S::BITS);
    let head = S::BITS - offset;
    let tail = count - head;
    match order {
        BitOrder::Lsb => (
            write(lo, offset, value, head, order),
            write(hi, 0, value >> head as usize, tail, order),
        ),
        BitOrder::Msb => (
            write(lo, offset, value >> tail as usize, head, order),
            write(hi, 0, value, tail, order),
        ),
    }
}
