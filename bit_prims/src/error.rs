#[cfg(feature = "std")]
use thiserror::Error;

/// Errors raised by the bit read/write primitives.
///
/// Multi-bit operations validate their arguments before touching the
/// destination, so a failed write leaves the storage unmodified.
#[cfg_attr(feature = "std", derive(Error))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BitError {
    #[cfg_attr(
        feature = "std",
        error("bit count {count} exceeds the {width}-bit width of the operation")
    )]
    InvalidBitCount { count: u32, width: u32 },

    #[cfg_attr(
        feature = "std",
        error("{count} bits at offset {offset} overrun storage of {len_bits} bits")
    )]
    OutOfRange {
        offset: usize,
        count: u32,
        len_bits: u64,
    },

    /// Single-bit access past the end of the storage.
    #[cfg_attr(
        feature = "std",
        error("byte index {index} is out of bounds for length {len}")
    )]
    IndexOutOfBounds { index: usize, len: usize },
}

#[cfg(not(feature = "std"))]
impl core::fmt::Display for BitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            BitError::InvalidBitCount { count, width } => write!(
                f,
                "bit count {} exceeds the {}-bit width of the operation",
                count, width
            ),
            BitError::OutOfRange {
                offset,
                count,
                len_bits,
            } => write!(
                f,
                "{} bits at offset {} overrun storage of {} bits",
                count, offset, len_bits
            ),
            BitError::IndexOutOfBounds { index, len } => {
                write!(f, "byte index {} is out of bounds for length {}", index, len)
            }
        }
    }
}
