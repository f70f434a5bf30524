//! The bound on source-alphabet types, the way `record.rs` bounds its own
//! generic field (de)compressors on `num_traits`.

use num_traits::{NumCast, PrimInt, Unsigned};

/// A source symbol type usable with [`crate::encode`]/[`crate::decode`].
///
/// Implemented for the four unsigned integer widths; callers pick whichever
/// fits their alphabet size.
pub trait Symbol: PrimInt + Unsigned {
    fn to_index(self) -> u64;
    fn from_index(v: u64) -> Self;
}

macro_rules! impl_symbol {
    ($($t:ty),*) => {
        $(
            impl Symbol for $t {
                fn to_index(self) -> u64 {
                    self.to_u64().expect("infallible widening to u64")
                }
                fn from_index(v: u64) -> Self {
                    <$t as NumCast>::from(v).expect("symbol index out of range for this type")
                }
            }
        )*
    };
}

use num_traits::ToPrimitive;
impl_symbol!(u8, u16, u32, u64);
