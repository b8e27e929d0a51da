use std::io::SeekFrom;

use bit_prims::{BitOrder, Word, span};

use crate::{BitRead, BitWrite, CursorError, MAX_BUFFER_LEN, Result};

/// A bit position over a fixed byte buffer.
///
/// The position is a plain signed bit index. Seeking assigns it without
/// clamping; a negative position is reported by the next read or write, and
/// one past the end fails the range check of that operation. The position
/// only moves when an operation succeeds.
///
/// Any `S: AsRef<[u8]>` can be read from, so `BitCursor<&[u8]>` serves as a
/// read-only view. Writing needs `S: AsMut<[u8]>` as well.
#[derive(Debug, Clone)]
pub struct BitCursor<S> {
    storage: S,
    position: i64,
    order: BitOrder,
}

/// Cursor that owns its bytes.
pub type BitArray = BitCursor<Vec<u8>>;

/// Cursor over a borrowed, writable byte slice.
pub type BitSpan<'a> = BitCursor<&'a mut [u8]>;

impl<S: AsRef<[u8]>> BitCursor<S> {
    /// Wraps `storage` with LSB-first order.
    pub fn new(storage: S) -> Result<Self> {
        Self::with_order(storage, BitOrder::default())
    }

    pub fn with_order(storage: S, order: BitOrder) -> Result<Self> {
        let len = storage.as_ref().len();
        if len >= MAX_BUFFER_LEN {
            return Err(CursorError::BufferTooLarge { len });
        }

        Ok(Self {
            storage,
            position: 0,
            order,
        })
    }

    #[inline]
    pub fn position(&self) -> i64 {
        self.position
    }

    #[inline]
    pub fn set_position(&mut self, position: i64) {
        self.position = position;
    }

    /// Moves the position and returns the new one. Offsets are in bits.
    pub fn seek(&mut self, pos: SeekFrom) -> i64 {
        self.position = match pos {
            SeekFrom::Start(offset) => i64::try_from(offset).unwrap_or(i64::MAX),
            SeekFrom::Current(delta) => self.position.saturating_add(delta),
            SeekFrom::End(delta) => self.len_bits().saturating_add(delta),
        };
        self.position
    }

    #[inline]
    pub fn len_bits(&self) -> i64 {
        self.storage.as_ref().len() as i64 * 8
    }

    /// Bits between the position and the end; negative once past the end.
    #[inline]
    pub fn remaining_bits(&self) -> i64 {
        self.len_bits() - self.position
    }

    #[inline]
    pub fn order(&self) -> BitOrder {
        self.order
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.storage.as_ref()
    }

    pub fn get_ref(&self) -> &S {
        &self.storage
    }

    pub fn into_inner(self) -> S {
        self.storage
    }

    fn offset(&self) -> Result<usize> {
        if self.position < 0 {
            return Err(CursorError::NegativePosition(self.position));
        }
        // Anything past usize::MAX is out of range for the bounds check anyway.
        Ok(usize::try_from(self.position).unwrap_or(usize::MAX))
    }
}

impl<S: AsRef<[u8]> + AsMut<[u8]>> BitCursor<S> {
    pub fn get_mut(&mut self) -> &mut S {
        &mut self.storage
    }
}

impl BitArray {
    /// Copies `bytes` into a new owned cursor.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::new(bytes.to_vec())
    }

    pub fn zeroed(len: usize) -> Result<Self> {
        if len >= MAX_BUFFER_LEN {
            return Err(CursorError::BufferTooLarge { len });
        }
        Self::new(vec![0; len])
    }
}

impl<'a> BitSpan<'a> {
    /// Builds a cursor over `len` bytes starting at `ptr`.
    ///
    /// # Safety
    ///
    /// Unless `ptr` is null or `len` is over the limit (both rejected before
    /// the pointer is used), `ptr` must be valid for reads and writes of
    /// `len` bytes for `'a` and must not be aliased for that lifetime, as for
    /// [`std::slice::from_raw_parts_mut`].
    pub unsafe fn from_raw_parts(ptr: *mut u8, len: usize, order: BitOrder) -> Result<Self> {
        if ptr.is_null() {
            return Err(CursorError::NullBuffer);
        }
        if len >= MAX_BUFFER_LEN {
            return Err(CursorError::BufferTooLarge { len });
        }

        // SAFETY: non-null was checked above; validity and exclusivity for
        // `'a` are the caller's contract.
        let storage = unsafe { std::slice::from_raw_parts_mut(ptr, len) };
        Self::with_order(storage, order)
    }
}

impl<S: AsRef<[u8]>> BitRead for BitCursor<S> {
    fn read_bit(&mut self) -> Result<bool> {
        let offset = self.offset()?;
        let bit = span::read_bit(self.storage.as_ref(), offset, self.order)?;
        self.position += 1;
        Ok(bit)
    }

    fn read<W: Word>(&mut self, bit_count: u32) -> Result<W> {
        let offset = self.offset()?;
        let value = span::read_bits(self.storage.as_ref(), offset, bit_count, self.order)?;
        self.position += i64::from(bit_count);
        Ok(value)
    }
}

impl<S: AsRef<[u8]> + AsMut<[u8]>> BitWrite for BitCursor<S> {
    fn write_bit(&mut self, value: bool) -> Result<()> {
        let offset = self.offset()?;
        span::write_bit(self.storage.as_mut(), offset, value, self.order)?;
        self.position += 1;
        Ok(())
    }

    fn write<W: Word>(&mut self, value: W, bit_count: u32) -> Result<()> {
        let offset = self.offset()?;
        span::write_bits(self.storage.as_mut(), offset, value, bit_count, self.order)?;
        self.position += i64::from(bit_count);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::ptr::NonNull;

    use bit_prims::BitError;

    use super::*;

    #[test]
    fn sequential_fields_advance_the_position() -> Result<()> {
        let mut cursor = BitArray::zeroed(8)?;
        cursor.write_u8(0x4D, 7)?;
        cursor.write_i16(-3, 10)?;
        cursor.write_bit(true)?;
        cursor.write_u64(0, 0)?;
        assert_eq!(cursor.position(), 18);

        cursor.set_position(0);
        assert_eq!(cursor.read_u8(7)?, 0x4D);
        assert_eq!(cursor.read_i16(10)?, -3);
        assert!(cursor.read_bit()?);
        assert_eq!(cursor.read_u64(0)?, 0);
        assert_eq!(cursor.position(), 18);
        assert_eq!(cursor.remaining_bits(), 46);
        Ok(())
    }

    #[test]
    fn msb_cursor_reads_from_the_high_bit() -> Result<()> {
        let bytes = [0xCD, 0x0A, 0xA2, 0xF5];
        let mut cursor = BitCursor::with_order(&bytes[..], BitOrder::Msb)?;
        assert_eq!(cursor.read_u8(7)?, 0x66);
        assert!(cursor.read_bit()?);
        assert_eq!(cursor.read_u8(8)?, 0x0A);
        Ok(())
    }

    #[test]
    fn failed_operations_keep_the_position() -> Result<()> {
        let mut cursor = BitArray::from_bytes(&[0xFF, 0xFF])?;
        cursor.set_position(10);

        assert!(matches!(
            cursor.read_u8(7),
            Err(CursorError::Bits(BitError::OutOfRange { .. }))
        ));
        assert!(matches!(
            cursor.write_u8(0, 9),
            Err(CursorError::Bits(BitError::InvalidBitCount { count: 9, width: 8 }))
        ));
        assert_eq!(cursor.position(), 10);
        assert_eq!(cursor.as_bytes(), &[0xFF, 0xFF]);

        cursor.set_position(16);
        assert!(matches!(
            cursor.read_bit(),
            Err(CursorError::Bits(BitError::IndexOutOfBounds { index: 2, len: 2 }))
        ));
        assert_eq!(cursor.position(), 16);
        Ok(())
    }

    #[test]
    fn seek_is_unclamped() -> Result<()> {
        let mut cursor = BitArray::zeroed(4)?;
        assert_eq!(cursor.seek(SeekFrom::End(-5)), 27);
        assert_eq!(cursor.seek(SeekFrom::Current(10)), 37);
        assert_eq!(cursor.seek(SeekFrom::Start(3)), 3);
        assert_eq!(cursor.seek(SeekFrom::Current(-4)), -1);

        assert!(matches!(
            cursor.read_u8(1),
            Err(CursorError::NegativePosition(-1))
        ));
        assert!(matches!(
            cursor.write_bit(false),
            Err(CursorError::NegativePosition(-1))
        ));
        Ok(())
    }

    #[test]
    fn span_writes_land_in_the_borrowed_slice() -> Result<()> {
        let mut bytes = [0u8; 3];
        {
            let mut cursor = BitSpan::new(&mut bytes[..])?;
            cursor.set_position(4);
            cursor.write_u16(0xABC, 12)?;
            cursor.get_mut()[2] = 0x7E;
        }
        assert_eq!(bytes, [0xC0, 0xAB, 0x7E]);
        Ok(())
    }

    #[test]
    fn raw_parts_reject_null_and_oversized() {
        let result = unsafe { BitSpan::from_raw_parts(std::ptr::null_mut(), 4, BitOrder::Lsb) };
        assert!(matches!(result, Err(CursorError::NullBuffer)));

        let dangling = NonNull::<u8>::dangling().as_ptr();
        let result = unsafe { BitSpan::from_raw_parts(dangling, MAX_BUFFER_LEN, BitOrder::Lsb) };
        assert!(matches!(
            result,
            Err(CursorError::BufferTooLarge { len }) if len == MAX_BUFFER_LEN
        ));
    }

    #[test]
    fn raw_parts_cursor_writes_through() -> Result<()> {
        let mut bytes = [0u8; 2];
        let mut cursor = unsafe { BitSpan::from_raw_parts(bytes.as_mut_ptr(), 2, BitOrder::Msb)? };
        cursor.write_u8(0b101, 3)?;
        drop(cursor);
        assert_eq!(bytes, [0b1010_0000, 0]);
        Ok(())
    }

    #[test]
    fn pointer_width_fields() -> Result<()> {
        let mut cursor = BitArray::zeroed(16)?;
        cursor.write_usize(usize::MAX, 20)?;
        cursor.write_isize(-2, 31)?;
        cursor.set_position(0);
        assert_eq!(cursor.read_usize(20)?, (1 << 20) - 1);
        assert_eq!(cursor.read_isize(31)?, -2);
        Ok(())
    }
}
