//! Byte sinks for [`BitStreamWriter`](crate::BitStreamWriter).
//!
//! The writer's behaviour for partially written bytes depends on whether it
//! can look at what is already in the stream. That is fixed by the wrapper
//! the stream is handed over in, not checked on every write.

use std::io::{self, Read, Seek, SeekFrom, Write};

/// What a writer can do with its stream beyond appending bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Existing bytes are read back and merged; the writer can seek.
    ReadWriteSeek,
    /// Bytes are written blind. Writing into the middle of existing data
    /// overwrites the bits around the field with zeros.
    WriteOnly,
}

pub trait Sink: Write {
    const CAPABILITY: Capability;

    type Inner;

    /// Reads up to `buf.len()` bytes at the current position, stopping early
    /// at end of stream. Returns how many were read.
    fn read_back(&mut self, buf: &mut [u8]) -> io::Result<usize>;

    fn seek_to(&mut self, pos: SeekFrom) -> io::Result<u64>;

    fn into_inner(self) -> Self::Inner;

    fn get_ref(&self) -> &Self::Inner;

    fn get_mut(&mut self) -> &mut Self::Inner;
}

/// A stream that can only be written.
#[derive(Debug)]
pub struct WriteOnly<W>(pub W);

/// A stream that can be read, written and seeked.
#[derive(Debug)]
pub struct ReadWriteSeek<S>(pub S);

impl<W: Write> Write for WriteOnly<W> {
    #[inline]
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.write(buf)
    }

    #[inline]
    fn flush(&mut self) -> io::Result<()> {
        self.0.flush()
    }
}

impl<W: Write> Sink for WriteOnly<W> {
    const CAPABILITY: Capability = Capability::WriteOnly;

    type Inner = W;

    fn read_back(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "stream is not readable",
        ))
    }

    fn seek_to(&mut self, _pos: SeekFrom) -> io::Result<u64> {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "stream is not seekable",
        ))
    }

    fn into_inner(self) -> W {
        self.0
    }

    fn get_ref(&self) -> &W {
        &self.0
    }

    fn get_mut(&mut self) -> &mut W {
        &mut self.0
    }
}

impl<S: Write> Write for ReadWriteSeek<S> {
    #[inline]
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.write(buf)
    }

    #[inline]
    fn flush(&mut self) -> io::Result<()> {
        self.0.flush()
    }
}

impl<S: Read + Write + Seek> Sink for ReadWriteSeek<S> {
    const CAPABILITY: Capability = Capability::ReadWriteSeek;

    type Inner = S;

    fn read_back(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let mut filled = 0;
        while filled < buf.len() {
            match self.0.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
                Err(err) => return Err(err),
            }
        }
        Ok(filled)
    }

    fn seek_to(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.0.seek(pos)
    }

    fn into_inner(self) -> S {
        self.0
    }

    fn get_ref(&self) -> &S {
        &self.0
    }

    fn get_mut(&mut self) -> &mut S {
        &mut self.0
    }
}
