//! # bit_cursor
//!
//! Sequential bit cursors built on [`bit_prims`].
//!
//! - [`BitCursor`] walks a fixed byte buffer, either owned ([`BitArray`]) or
//!   borrowed ([`BitSpan`]).
//! - [`BitStreamReader`] pulls bytes from any [`std::io::Read`] on demand.
//! - [`BitStreamWriter`] pushes whole bytes to a [`std::io::Write`] and holds
//!   the partially written boundary byte until the next write or flush.
//!
//! All of them implement [`BitRead`] and/or [`BitWrite`], so the same field
//! layout code runs against memory and streams.
//!
//! ```rust
//! use bit_cursor::{BitArray, BitRead, BitStreamWriter, BitWrite};
//!
//! let mut bytes = Vec::new();
//! {
//!     let mut writer = BitStreamWriter::new(&mut bytes);
//!     writer.write_u8(0x4D, 7).unwrap();
//!     writer.write_u16(0x1ABC, 13).unwrap();
//!     writer.flush().unwrap();
//! }
//!
//! let mut cursor = BitArray::from_bytes(&bytes).unwrap();
//! assert_eq!(cursor.read_u8(7).unwrap(), 0x4D);
//! assert_eq!(cursor.read_u16(13).unwrap(), 0x1ABC);
//! assert_eq!(cursor.position(), 20);
//! ```

pub mod error;
pub use error::CursorError;

mod bit_io;
pub use bit_io::{BitRead, BitWrite};

mod array;
pub use array::{BitArray, BitCursor, BitSpan};

mod reader;
pub use reader::BitStreamReader;

pub mod sink;
pub use sink::Capability;

mod writer;
pub use writer::BitStreamWriter;

pub use bit_prims::{BitOrder, Word};

/// Buffers must stay below this many bytes so every bit index fits in a
/// 31-bit position.
pub const MAX_BUFFER_LEN: usize = 1 << 28;

pub type Result<T> = core::result::Result<T, CursorError>;
