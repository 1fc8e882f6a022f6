//! The equality used by [`index_of`](crate::LazySequence::index_of) and
//! friends.

use std::rc::Rc;

/// Identity-style equality.
///
/// It agrees with `==` except for floating point: `NaN` equals `NaN`, and
/// `+0.0` differs from `-0.0`.
pub trait SameValue {
    fn same_value(&self, other: &Self) -> bool;
}

macro_rules! same_value_by_eq {
    ($($ty:ty),* $(,)?) => {
        $(
            impl SameValue for $ty {
                #[inline]
                fn same_value(&self, other: &Self) -> bool {
                    self == other
                }
            }
        )*
    };
}

same_value_by_eq!(
    bool, char, u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, str, String,
    (),
);

#[cfg(feature = "bigint")]
same_value_by_eq!(num_bigint::BigInt, num_bigint::BigUint);

impl SameValue for f64 {
    #[inline]
    fn same_value(&self, other: &Self) -> bool {
        (self.is_nan() && other.is_nan()) || self.to_bits() == other.to_bits()
    }
}

impl SameValue for f32 {
    #[inline]
    fn same_value(&self, other: &Self) -> bool {
        (self.is_nan() && other.is_nan()) || self.to_bits() == other.to_bits()
    }
}

impl<T: SameValue + ?Sized> SameValue for &T {
    fn same_value(&self, other: &Self) -> bool {
        (**self).same_value(*other)
    }
}

impl<T: SameValue + ?Sized> SameValue for Box<T> {
    fn same_value(&self, other: &Self) -> bool {
        (**self).same_value(other)
    }
}

impl<T: SameValue + ?Sized> SameValue for Rc<T> {
    fn same_value(&self, other: &Self) -> bool {
        (**self).same_value(other)
    }
}

impl<T: SameValue> SameValue for [T] {
    fn same_value(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().zip(other).all(|(a, b)| a.same_value(b))
    }
}

impl<T: SameValue> SameValue for Vec<T> {
    fn same_value(&self, other: &Self) -> bool {
        self.as_slice().same_value(other.as_slice())
    }
}

impl<T: SameValue> SameValue for Option<T> {
    fn same_value(&self, other: &Self) -> bool {
        match (self, other) {
            (Some(a), Some(b)) => a.same_value(b),
            (None, None) => true,
            _ => false,
        }
    }
}

macro_rules! same_value_tuple {
    ($($name:ident : $idx:tt),+) => {
        impl<$($name: SameValue),+> SameValue for ($($name,)+) {
            fn same_value(&self, other: &Self) -> bool {
                $(self.$idx.same_value(&other.$idx))&&+
            }
        }
    };
}

same_value_tuple!(A: 0);
same_value_tuple!(A: 0, B: 1);
same_value_tuple!(A: 0, B: 1, C: 2);
same_value_tuple!(A: 0, B: 1, C: 2, D: 3);
