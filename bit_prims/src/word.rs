//! The unsigned integer capability the dispatch layer is generic over.

use core::fmt::Debug;

use bytemuck::Pod;
use num_traits::{PrimInt, Unsigned, Zero};

/// Whether pointer-sized operations take the 64-bit path.
pub const NATIVE_64: bool = usize::BITS == 64;

/// An unsigned integer with a known bit width.
///
/// Every width is staged through [`Word::Stage`], a word wide enough to hold
/// a full field starting at any of the eight sub-byte offsets. `u64` has no
/// wider primitive to stage into, so fields that straddle its end are split
/// into two staged halves instead.
pub trait Word: PrimInt + Unsigned + Pod + Debug {
    const BITS: u32;
    const BYTES: usize;

    /// Same-width signed counterpart.
    type Signed: PrimInt + num_traits::Signed + Pod + Debug;

    /// Staging word used when loading this width from byte storage.
    type Stage: Word;

    fn widen(self) -> Self::Stage;

    /// Truncates a staged word back to this width.
    fn narrow(stage: Self::Stage) -> Self;

    /// Reinterprets the bits as the signed counterpart.
    fn to_signed(self) -> Self::Signed;

    fn from_signed(value: Self::Signed) -> Self;
}

macro_rules! impl_word {
    ($($word:ty => $signed:ty, $stage:ty;)*) => {
        $(
            impl Word for $word {
                const BITS: u32 = <$word>::BITS;
                const BYTES: usize = core::mem::size_of::<$word>();

                type Signed = $signed;
                type Stage = $stage;

                #[inline(always)]
                fn widen(self) -> $stage {
                    self as $stage
                }

                #[inline(always)]
                fn narrow(stage: $stage) -> Self {
                    stage as $word
                }

                #[inline(always)]
                fn to_signed(self) -> $signed {
                    self as $signed
                }

                #[inline(always)]
                fn from_signed(value: $signed) -> Self {
                    value as $word
                }
            }
        )*
    };
}

impl_word! {
    u8 => i8, u16;
    u16 => i16, u32;
    u32 => i32, u64;
    u64 => i64, u64;
}

/// Sign-extends the low `bit_count` bits of `value`.
///
/// A zero-width field extends to 0.
#[inline]
pub fn sign_extend<W: Word>(value: W, bit_count: u32) -> W::Signed {
    debug_assert!(bit_count <= W::BITS);
    if bit_count == 0 {
        return W::Signed::zero();
    }
    let shift = (W::BITS - bit_count) as usize;
    (value << shift).to_signed() >> shift
}
