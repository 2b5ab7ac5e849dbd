//! Bit-field tools for working with 32-bit format words

use crate::{TIME_BITS, TIME_MASK};
use num_traits::{PrimInt, Unsigned};
use std::ops::BitAndAssign;

/// Top 8 bits of a word: the tag byte of event words, the sync byte of descriptors
#[inline]
pub fn top_byte(word: u32) -> u8 {
    (word >> TIME_BITS) as u8
}

/// Low 24 bits of a word: the time field, or the payload of an overflow word
#[inline]
pub fn low24(word: u32) -> u32 {
    word & TIME_MASK
}

/// Bitwise clear/check operations for the unsigned widths used by the format
pub trait BitOps: PrimInt + BitAndAssign + Unsigned {
    fn clear(&mut self, b: usize);
    fn check(self, b: usize) -> bool;
}

macro_rules! impl_bit_ops {
    ($($t:ty),*) => {
        $(
            impl BitOps for $t {
                #[inline]
                fn clear(&mut self, b: usize) {
                    *self &= !(1 << b);
                }

                #[inline]
                fn check(self, b: usize) -> bool {
                    return self >> b & 1 == 1;
                }
            }
        )*
    };
}

impl_bit_ops!(u8, u32);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_fields() {
        assert_eq!(0xC1, top_byte(0xC102_8302));
        assert_eq!(0x02_8302, low24(0xC102_8302));
        assert_eq!(0x05, top_byte(0x0500_BA16));
        assert_eq!(0x00_BA16, low24(0x0500_BA16));
        assert_eq!(0, low24(0x4000_0000));
    }

    #[test]
    fn bit_ops() {
        // Exhaustively check all u8's
        for i in u8::MIN..=u8::MAX {
            for b in 0..8 {
                let mut x = i;
                let i_set = i | 1 << b;
                let i_clr = i & !(1 << b);

                assert_eq!(i.check(b), i >> b & 1 == 1);
                x.clear(b);
                assert_eq!(x, i_clr);
                assert!(!x.check(b));
                assert!(i_set.check(b));
            }
        }
        // Check some interesting u32's
        for &i in [u32::MIN, 1u32, 0x4000_0000, 0xC102_8302, u32::MAX].iter() {
            for b in 0..32 {
                let mut x = i;
                let i_set = i | 1 << b;
                let i_clr = i & !(1 << b);

                assert_eq!(i.check(b), i >> b & 1 == 1);
                x.clear(b);
                assert_eq!(x, i_clr);
                assert!(i_set.check(b));
            }
        }
    }
}
