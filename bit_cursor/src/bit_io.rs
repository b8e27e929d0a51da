//! Sequential read/write interface shared by every cursor.
//!
//! Implementors provide the generic [`BitRead::read`] / [`BitWrite::write`]
//! and the single-bit pair; the per-width methods are built on top of them.
//! Each call consumes exactly `bit_count` bits (one for the bit methods)
//! from the cursor's position.

use bit_prims::{NATIVE_64, Word, sign_extend};

use crate::Result;

pub trait BitRead {
    fn read_bit(&mut self) -> Result<bool>;

    /// Reads a `bit_count`-bit unsigned field.
    fn read<W: Word>(&mut self, bit_count: u32) -> Result<W>;

    /// Reads a `bit_count`-bit field and sign-extends it.
    fn read_signed<W: Word>(&mut self, bit_count: u32) -> Result<W::Signed> {
        let value = self.read::<W>(bit_count)?;
        Ok(sign_extend(value, bit_count))
    }

    fn read_u8(&mut self, bit_count: u32) -> Result<u8> {
        self.read(bit_count)
    }

    fn read_u16(&mut self, bit_count: u32) -> Result<u16> {
        self.read(bit_count)
    }

    fn read_u32(&mut self, bit_count: u32) -> Result<u32> {
        self.read(bit_count)
    }

    fn read_u64(&mut self, bit_count: u32) -> Result<u64> {
        self.read(bit_count)
    }

    fn read_i8(&mut self, bit_count: u32) -> Result<i8> {
        self.read_signed::<u8>(bit_count)
    }

    fn read_i16(&mut self, bit_count: u32) -> Result<i16> {
        self.read_signed::<u16>(bit_count)
    }

    fn read_i32(&mut self, bit_count: u32) -> Result<i32> {
        self.read_signed::<u32>(bit_count)
    }

    fn read_i64(&mut self, bit_count: u32) -> Result<i64> {
        self.read_signed::<u64>(bit_count)
    }

    fn read_usize(&mut self, bit_count: u32) -> Result<usize> {
        if NATIVE_64 {
            self.read::<u64>(bit_count).map(|v| v as usize)
        } else {
            self.read::<u32>(bit_count).map(|v| v as usize)
        }
    }

    fn read_isize(&mut self, bit_count: u32) -> Result<isize> {
        if NATIVE_64 {
            self.read_signed::<u64>(bit_count).map(|v| v as isize)
        } else {
            self.read_signed::<u32>(bit_count).map(|v| v as isize)
        }
    }
}

pub trait BitWrite {
    fn write_bit(&mut self, value: bool) -> Result<()>;

    /// Writes the low `bit_count` bits of `value`.
    fn write<W: Word>(&mut self, value: W, bit_count: u32) -> Result<()>;

    fn write_signed<W: Word>(&mut self, value: W::Signed, bit_count: u32) -> Result<()> {
        self.write(W::from_signed(value), bit_count)
    }

    fn write_u8(&mut self, value: u8, bit_count: u32) -> Result<()> {
        self.write(value, bit_count)
    }

    fn write_u16(&mut self, value: u16, bit_count: u32) -> Result<()> {
        self.write(value, bit_count)
    }

    fn write_u32(&mut self, value: u32, bit_count: u32) -> Result<()> {
        self.write(value, bit_count)
    }

    fn write_u64(&mut self, value: u64, bit_count: u32) -> Result<()> {
        self.write(value, bit_count)
    }

    fn write_i8(&mut self, value: i8, bit_count: u32) -> Result<()> {
        self.write_signed::<u8>(value, bit_count)
    }

    fn write_i16(&mut self, value: i16, bit_count: u32) -> Result<()> {
        self.write_signed::<u16>(value, bit_count)
    }

    fn write_i32(&mut self, value: i32, bit_count: u32) -> Result<()> {
        self.write_signed::<u32>(value, bit_count)
    }

    fn write_i64(&mut self, value: i64, bit_count: u32) -> Result<()> {
        self.write_signed::<u64>(value, bit_count)
    }

    fn write_usize(&mut self, value: usize, bit_count: u32) -> Result<()> {
        if NATIVE_64 {
            self.write(value as u64, bit_count)
        } else {
            self.write(value as u32, bit_count)
        }
    }

    fn write_isize(&mut self, value: isize, bit_count: u32) -> Result<()> {
        self.write_usize(value as usize, bit_count)
    }
}
