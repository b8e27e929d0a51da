//! # bit_prims
//!
//! A `no_std` compatible library for packing sub-byte integers into bytes.
//!
//! Fields of 0 to 64 bits can sit at any bit offset and in either
//! [`BitOrder`]. Every operation stages a whole word from memory and works
//! on it with shifts and masks rather than walking bits one by one.
//!
//! ```rust
//! use bit_prims::span;
//!
//! let mut buf = [0u8; 4];
//!
//! // A 7-bit and a 13-bit field, back to back.
//! span::write_u8_lsb(&mut buf, 0, 0x4D, 7).unwrap();
//! span::write_u16_lsb(&mut buf, 7, 0x1ABC, 13).unwrap();
//!
//! assert_eq!(span::read_u8_lsb(&buf, 0, 7), Ok(0x4D));
//! assert_eq!(span::read_u16_lsb(&buf, 7, 13), Ok(0x1ABC));
//! ```
//!
//! ## Bit orders
//!
//! ```rust
//! use bit_prims::{BitOrder, span};
//!
//! let buf = [0xCD, 0x0A, 0xA2, 0xF5];
//!
//! // LSB-first takes the low 7 bits of 0xCD, MSB-first the high 7.
//! assert_eq!(span::read_bits::<u8>(&buf, 0, 7, BitOrder::Lsb), Ok(0x4D));
//! assert_eq!(span::read_bits::<u8>(&buf, 0, 7, BitOrder::Msb), Ok(0x66));
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

pub mod error;
pub use error::BitError;

mod order;
pub use order::BitOrder;

mod word;
pub use word::{NATIVE_64, Word, sign_extend};

pub mod mask;
pub mod naive;
pub mod scalar;
pub mod span;
pub mod utils;
