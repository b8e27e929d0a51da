use std::io::{Read, Seek, SeekFrom, Write};

use bit_prims::{BitError, BitOrder, Word, span};

use crate::sink::{Capability, ReadWriteSeek, Sink, WriteOnly};
use crate::{BitWrite, CursorError, Result};

// A 64-bit field starting mid-byte touches nine bytes.
const SCRATCH_LEN: usize = 9;

const SINK_PRESENT: &str = "sink is only taken by into_inner";

/// Writes bit fields to a byte stream.
///
/// Whole bytes go out as soon as a write completes them; the trailing,
/// partially written byte is held back as a carry until a later write
/// completes it or [`flush`](Self::flush) is called. Dropping the writer
/// flushes it.
///
/// Built with [`new`](BitStreamWriter::new) the writer only appends, and
/// bits sharing a byte with a field are zero unless this writer put them
/// there. Built with [`seekable`](BitStreamWriter::seekable) it reads the
/// existing bytes back first, so fields can be written into the middle of
/// existing data, and it can seek.
#[derive(Debug)]
pub struct BitStreamWriter<K: Sink> {
    // `None` only once `into_inner` has taken it.
    sink: Option<K>,
    order: BitOrder,
    bits_pos: u32,
    carry: u8,
    // Whether `carry` holds bits the stream has not seen yet.
    dirty: bool,
    stream_pos: u64,
}

impl<W: Write> BitStreamWriter<WriteOnly<W>> {
    pub fn new(inner: W) -> Self {
        Self::with_order(inner, BitOrder::default())
    }

    pub fn with_order(inner: W, order: BitOrder) -> Self {
        Self::from_sink(WriteOnly(inner), order)
    }
}

impl<S: Read + Write + Seek> BitStreamWriter<ReadWriteSeek<S>> {
    pub fn seekable(inner: S) -> Self {
        Self::seekable_with_order(inner, BitOrder::default())
    }

    pub fn seekable_with_order(inner: S, order: BitOrder) -> Self {
        Self::from_sink(ReadWriteSeek(inner), order)
    }
}

impl<K: Sink> BitStreamWriter<K> {
    pub fn from_sink(sink: K, order: BitOrder) -> Self {
        Self {
            sink: Some(sink),
            order,
            bits_pos: 0,
            carry: 0,
            dirty: false,
            stream_pos: 0,
        }
    }

    /// Bits written since the writer was created, including the ones still
    /// held in the carry byte.
    #[inline]
    pub fn position(&self) -> u64 {
        self.stream_pos * 8 + u64::from(self.bits_pos)
    }

    #[inline]
    pub fn order(&self) -> BitOrder {
        self.order
    }

    #[inline]
    pub fn capability(&self) -> Capability {
        K::CAPABILITY
    }

    pub fn get_ref(&self) -> &K::Inner {
        self.sink.as_ref().expect(SINK_PRESENT).get_ref()
    }

    /// Writing to the stream directly desynchronizes the writer's position.
    pub fn get_mut(&mut self) -> &mut K::Inner {
        self.sink_mut().get_mut()
    }

    #[inline]
    fn sink_mut(&mut self) -> &mut K {
        self.sink.as_mut().expect(SINK_PRESENT)
    }

    /// Writes out the carry byte, if any, and flushes the stream.
    ///
    /// A seekable writer steps back onto the carry byte afterwards, so the
    /// position is unchanged and later fields keep merging into it. A
    /// write-only writer cannot come back to the byte and moves on to the
    /// next byte boundary.
    pub fn flush(&mut self) -> Result<()> {
        if self.bits_pos != 0 && self.dirty {
            let carry = self.carry;
            self.sink_mut().write_all(&[carry])?;
            self.dirty = false;

            match K::CAPABILITY {
                Capability::ReadWriteSeek => {
                    self.sink_mut().seek_to(SeekFrom::Current(-1))?;
                }
                Capability::WriteOnly => {
                    log::trace!("Padded {} bits to the byte boundary", 8 - self.bits_pos);
                    self.stream_pos += 1;
                    self.bits_pos = 0;
                }
            }
        }

        self.sink_mut().flush()?;
        Ok(())
    }

    /// Flushes and hands back the stream.
    pub fn into_inner(mut self) -> Result<K::Inner> {
        self.flush()?;

        let sink = self.sink.take().expect(SINK_PRESENT);
        Ok(sink.into_inner())
    }

    /// Moves to `bit`. Only seekable writers can move anywhere but where
    /// they already are.
    pub fn set_position(&mut self, bit: u64) -> Result<()> {
        if bit == self.position() {
            return Ok(());
        }
        if K::CAPABILITY == Capability::WriteOnly {
            return Err(CursorError::Unsupported("seeking a write-only bit stream"));
        }

        log::debug!("Seeking bit writer from bit {} to bit {bit}", self.position());
        if self.bits_pos != 0 && self.dirty {
            let carry = self.carry;
            self.sink_mut().write_all(&[carry])?;
            self.sink_mut().seek_to(SeekFrom::Current(-1))?;
        }

        let byte = bit >> 3;
        let delta = byte as i64 - self.stream_pos as i64;
        if delta != 0 {
            self.sink_mut().seek_to(SeekFrom::Current(delta))?;
        }
        self.stream_pos = byte;
        self.bits_pos = (bit & 7) as u32;
        self.carry = 0;
        self.dirty = false;

        if self.bits_pos != 0 {
            let mut existing = [0u8; 1];
            if self.sink_mut().read_back(&mut existing)? != 0 {
                self.sink_mut().seek_to(SeekFrom::Current(-1))?;
            }
            self.carry = existing[0];
        }
        Ok(())
    }

    /// Seeks by bits and returns the new position.
    pub fn seek(&mut self, pos: SeekFrom) -> Result<u64> {
        let target = match pos {
            SeekFrom::Start(bit) => i128::from(bit),
            SeekFrom::Current(delta) => i128::from(self.position()) + i128::from(delta),
            SeekFrom::End(delta) => i128::from(self.len_bits()?) + i128::from(delta),
        };
        if target < 0 {
            return Err(CursorError::NegativePosition(
                i64::try_from(target).unwrap_or(i64::MIN),
            ));
        }

        let target = u64::try_from(target).unwrap_or(u64::MAX);
        self.set_position(target)?;
        Ok(target)
    }

    /// Length in bits from the writer's origin: the stream's end or the
    /// position, whichever is further.
    pub fn len_bits(&mut self) -> Result<u64> {
        if K::CAPABILITY == Capability::WriteOnly {
            return Err(CursorError::Unsupported("length of a write-only bit stream"));
        }

        let current = self.sink_mut().seek_to(SeekFrom::Current(0))?;
        let end = self.sink_mut().seek_to(SeekFrom::End(0))?;
        if end != current {
            self.sink_mut().seek_to(SeekFrom::Start(current))?;
        }

        let origin = current.saturating_sub(self.stream_pos);
        Ok((end.saturating_sub(origin) * 8).max(self.position()))
    }
}

impl<K: Sink> BitWrite for BitStreamWriter<K> {
    fn write_bit(&mut self, value: bool) -> Result<()> {
        self.write(value as u8, 1)
    }

    fn write<W: Word>(&mut self, value: W, bit_count: u32) -> Result<()> {
        if bit_count > W::BITS {
            return Err(BitError::InvalidBitCount {
                count: bit_count,
                width: W::BITS,
            }
            .into());
        }
        if bit_count == 0 {
            return Ok(());
        }

        let total = self.bits_pos + bit_count;
        let len = total.div_ceil(8) as usize;
        let mut scratch = [0u8; SCRATCH_LEN];

        if K::CAPABILITY == Capability::ReadWriteSeek {
            let got = self.sink_mut().read_back(&mut scratch[..len])?;
            if got != 0 {
                self.sink_mut().seek_to(SeekFrom::Current(-(got as i64)))?;
            }
        }
        if self.bits_pos != 0 {
            scratch[0] = self.carry;
        }

        span::write_bits(
            &mut scratch[..len],
            self.bits_pos as usize,
            value,
            bit_count,
            self.order,
        )?;

        let whole = (total >> 3) as usize;
        self.sink_mut().write_all(&scratch[..whole])?;
        if whole != 0 {
            log::trace!("Pushed {whole} bytes at byte {}", self.stream_pos);
        }
        self.stream_pos += whole as u64;
        self.bits_pos = total & 7;

        if self.bits_pos != 0 {
            self.carry = scratch[whole];
            self.dirty = true;
        } else {
            self.dirty = false;
        }
        Ok(())
    }
}

impl<K: Sink> Drop for BitStreamWriter<K> {
    fn drop(&mut self) {
        if self.sink.is_none() {
            return;
        }
        if let Err(err) = self.flush() {
            log::warn!("Failed to flush bit writer on drop: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::{BitArray, BitRead};

    #[test]
    fn holds_the_partial_byte_until_flushed() -> Result<()> {
        let mut bytes = Vec::new();
        let mut writer = BitStreamWriter::new(&mut bytes);

        writer.write_u8(0x4D, 7)?;
        assert_eq!(writer.position(), 7);
        assert!(writer.get_ref().is_empty());

        writer.write_bit(true)?;
        assert_eq!(writer.get_ref().as_slice(), &[0xCD]);

        writer.write_u16(0x20A, 12)?;
        assert_eq!(writer.get_ref().as_slice(), &[0xCD, 0x0A]);
        assert_eq!(writer.position(), 20);

        writer.flush()?;
        assert_eq!(writer.position(), 24);
        drop(writer);
        assert_eq!(bytes, [0xCD, 0x0A, 0x02]);
        Ok(())
    }

    #[test]
    fn drop_flushes_the_carry() -> Result<()> {
        let mut bytes = Vec::new();
        {
            let mut writer = BitStreamWriter::with_order(&mut bytes, BitOrder::Msb);
            writer.write_u8(0b101, 3)?;
        }
        assert_eq!(bytes, [0b1010_0000]);
        Ok(())
    }

    #[test]
    fn into_inner_releases_the_stream_once() -> Result<()> {
        let mut bytes = Vec::new();
        let mut writer = BitStreamWriter::new(&mut bytes);
        writer.write_u8(0x1F, 5)?;

        let stream = writer.into_inner()?;
        stream.push(0xAA);
        assert_eq!(bytes, [0x1F, 0xAA]);
        Ok(())
    }

    #[test]
    fn write_only_cannot_seek() -> Result<()> {
        let mut writer = BitStreamWriter::new(Vec::new());
        writer.write_u8(0xFF, 5)?;

        writer.set_position(5)?;
        assert!(matches!(
            writer.set_position(0),
            Err(CursorError::Unsupported(_))
        ));
        assert!(matches!(
            writer.seek(SeekFrom::End(0)),
            Err(CursorError::Unsupported(_))
        ));
        assert_eq!(writer.capability(), Capability::WriteOnly);
        assert_eq!(writer.into_inner()?, [0x1F]);
        Ok(())
    }

    #[test]
    fn seekable_writes_merge_into_existing_bytes() -> Result<()> {
        let stream = Cursor::new(vec![0xFFu8; 4]);
        let mut writer = BitStreamWriter::seekable(stream);

        writer.set_position(4)?;
        writer.write_u8(0, 8)?;
        writer.write_u8(0, 2)?;
        assert_eq!(writer.position(), 14);

        let stream = writer.into_inner()?;
        assert_eq!(stream.get_ref().as_slice(), &[0x0F, 0xC0, 0xFF, 0xFF]);
        Ok(())
    }

    #[test]
    fn seekable_flush_keeps_the_position() -> Result<()> {
        let mut writer = BitStreamWriter::seekable(Cursor::new(Vec::new()));
        writer.write_u8(0x3, 2)?;
        writer.flush()?;
        assert_eq!(writer.position(), 2);
        assert_eq!(writer.get_ref().get_ref().as_slice(), &[0x03]);

        writer.write_u8(0x3, 2)?;
        writer.flush()?;
        assert_eq!(writer.get_ref().get_ref().as_slice(), &[0x0F]);
        assert_eq!(writer.len_bits()?, 8);
        Ok(())
    }

    #[test]
    fn seeking_back_and_rewriting() -> Result<()> {
        let mut writer = BitStreamWriter::seekable(Cursor::new(Vec::new()));
        writer.write_u32(0xFFFF_FFFF, 32)?;
        assert_eq!(writer.seek(SeekFrom::End(-20))?, 12);
        writer.write_u8(0, 8)?;
        assert_eq!(writer.seek(SeekFrom::Current(4))?, 24);

        let bytes = writer.into_inner()?.into_inner();
        let mut cursor = BitArray::from_bytes(&bytes)?;
        assert_eq!(cursor.read_u16(12)?, 0xFFF);
        assert_eq!(cursor.read_u8(8)?, 0);
        assert_eq!(cursor.read_u16(12)?, 0xFFF);
        Ok(())
    }
}
