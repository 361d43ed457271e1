use crate::key::FieldKey;
use std::borrow::Cow;

/// Implements [`FieldKey`] for fixed-width integers.
///
/// The integer identifier only exists for values that fit into an [`isize`].
macro_rules! impl_integer_field_key {
    ($($int:ty),+ $(,)?) => {
        $(
            impl FieldKey for $int {
                fn to_field_name(&self) -> Cow<'_, str> {
                    Cow::Owned(self.to_string())
                }

                fn from_field_name(name: &str) -> Option<Self> {
                    name.parse().ok()
                }

                fn to_field_int(&self) -> Option<isize> {
                    isize::try_from(*self).ok()
                }

                fn from_field_int(int: isize) -> Option<Self> {
                    Self::try_from(int).ok()
                }
            }
        )+
    };
}

impl_integer_field_key!(i8, i16, i32, i64, i128, u8, u16, u32, u64, u128, usize);

// `isize` is the identifier type itself, so both channels always succeed.
impl FieldKey for isize {
    fn to_field_name(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn from_field_name(name: &str) -> Option<Self> {
        name.parse().ok()
    }

    fn to_field_int(&self) -> Option<isize> {
        Some(*self)
    }

    fn from_field_int(int: isize) -> Option<Self> {
        Some(int)
    }
}
