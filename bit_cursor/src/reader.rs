use std::io::{self, Read, Seek, SeekFrom};

use bit_prims::{BitError, BitOrder, Word, span};

use crate::{BitRead, CursorError, Result};

// One carried boundary byte plus the eight a 64-bit field can need.
const BUFFER_LEN: usize = 9;

/// Reads bit fields from a byte stream, pulling whole bytes on demand.
///
/// Between calls the reader keeps the last pulled byte if some of its bits
/// are still unread. Positions are in bits, counted from wherever the stream
/// stood when the reader was created.
#[derive(Debug)]
pub struct BitStreamReader<R> {
    inner: R,
    order: BitOrder,
    // Bits of the boundary byte already consumed; 0 means no byte is carried.
    bits_pos: u32,
    buffer: [u8; BUFFER_LEN],
    buffered: usize,
    stream_pos: u64,
}

impl<R: Read> BitStreamReader<R> {
    pub fn new(inner: R) -> Self {
        Self::with_order(inner, BitOrder::default())
    }

    pub fn with_order(inner: R, order: BitOrder) -> Self {
        Self {
            inner,
            order,
            bits_pos: 0,
            buffer: [0; BUFFER_LEN],
            buffered: 0,
            stream_pos: 0,
        }
    }

    /// The bit position: bytes pulled so far minus the unread bits of the
    /// boundary byte.
    #[inline]
    pub fn position(&self) -> u64 {
        self.stream_pos * 8 - u64::from((8 - self.bits_pos) & 7)
    }

    #[inline]
    pub fn order(&self) -> BitOrder {
        self.order
    }

    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    /// Reading from the stream directly desynchronizes the reader's position.
    pub fn get_mut(&mut self) -> &mut R {
        &mut self.inner
    }

    /// Unwraps the stream. A partially read boundary byte is dropped.
    pub fn into_inner(self) -> R {
        self.inner
    }

    // Pulls `count` bytes into `buffer[start..]`. A short stream leaves the
    // reader at the end of what it got, with nothing carried.
    fn pull(&mut self, start: usize, count: usize) -> Result<()> {
        let mut got = 0;
        let mut failure = None;

        while got < count {
            match self.inner.read(&mut self.buffer[start + got..start + count]) {
                Ok(0) => break,
                Ok(n) => got += n,
                Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
                Err(err) => {
                    failure = Some(err);
                    break;
                }
            }
        }
        self.stream_pos += got as u64;

        if got < count {
            self.bits_pos = 0;
            self.buffered = 0;
            let err = failure.unwrap_or_else(|| {
                io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    format!("stream ended {} bytes short", count - got),
                )
            });
            return Err(err.into());
        }

        log::trace!("Pulled {count} bytes at byte {}", self.stream_pos - count as u64);
        self.buffered = start + count;
        Ok(())
    }
}

impl<R: Read + Seek> BitStreamReader<R> {
    /// Moves to `bit`, re-pulling the boundary byte when the target is not
    /// byte aligned.
    pub fn set_position(&mut self, bit: u64) -> Result<()> {
        let byte = bit >> 3;
        let sub = (bit & 7) as u32;

        // Same boundary byte as the one already carried.
        if sub != 0 && self.bits_pos != 0 && byte + 1 == self.stream_pos {
            self.bits_pos = sub;
            return Ok(());
        }
        if sub == 0 && byte == self.stream_pos {
            self.bits_pos = 0;
            self.buffered = 0;
            return Ok(());
        }

        log::debug!("Seeking bit reader from bit {} to bit {bit}", self.position());
        let delta = byte as i64 - self.stream_pos as i64;
        self.inner.seek(SeekFrom::Current(delta))?;
        self.stream_pos = byte;
        self.bits_pos = 0;
        self.buffered = 0;

        if sub != 0 {
            self.pull(0, 1)?;
            self.bits_pos = sub;
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

    /// Length of the stream in bits, from the reader's origin.
    pub fn len_bits(&mut self) -> Result<u64> {
        let current = self.inner.stream_position()?;
        let end = self.inner.seek(SeekFrom::End(0))?;
        if end != current {
            self.inner.seek(SeekFrom::Start(current))?;
        }

        let origin = current.saturating_sub(self.stream_pos);
        Ok(end.saturating_sub(origin) * 8)
    }

    pub fn remaining_bits(&mut self) -> Result<u64> {
        Ok(self.len_bits()?.saturating_sub(self.position()))
    }
}

impl<R: Read> BitRead for BitStreamReader<R> {
    fn read_bit(&mut self) -> Result<bool> {
        Ok(self.read::<u8>(1)? != 0)
    }

    fn read<W: Word>(&mut self, bit_count: u32) -> Result<W> {
        if bit_count > W::BITS {
            return Err(BitError::InvalidBitCount {
                count: bit_count,
                width: W::BITS,
            }
            .into());
        }

        let carried = (8 - self.bits_pos) & 7;
        let required = bit_count.saturating_sub(carried).div_ceil(8) as usize;
        let start = if self.bits_pos != 0 {
            self.buffer[0] = self.buffer[self.buffered - 1];
            1
        } else {
            0
        };
        self.pull(start, required)?;

        let value = span::read_bits(
            &self.buffer[..self.buffered],
            self.bits_pos as usize,
            bit_count,
            self.order,
        )?;
        self.bits_pos = (self.bits_pos + bit_count) & 7;
        Ok(value)
    }
}
