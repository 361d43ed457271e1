//! Floating-point keys.
//!
//! Floats are neither [`Eq`] nor [`Hash`], so they are wrapped into a [`FloatKey`],
//! which compares by bit pattern. All NaNs are the same key, while `0.0` and `-0.0`
//! are different keys.
//!
//! Field names use the shortest rendering that parses back to the same value.
//! Non-finite values use the tokens `NaN`, `inf` and `-inf`; parsing also accepts
//! `infinity` and `nan` in any case.

use crate::key::FieldKey;
use std::borrow::Cow;
use std::fmt::{self, Display, Formatter};
use std::hash::{Hash, Hasher};

/// A float usable as a key of a [`KeyedMap`](crate::KeyedMap).
#[derive(Clone, Copy, Debug, Default)]
pub struct FloatKey<F>(F);

impl<F> FloatKey<F> {
    #[must_use]
    pub const fn new(value: F) -> Self {
        Self(value)
    }

    /// Returns the wrapped float.
    #[must_use]
    pub fn get(self) -> F {
        self.0
    }
}

macro_rules! impl_float_key {
    ($float:ty, $int:ty) => {
        impl FloatKey<$float> {
            const fn canonical_bits(self) -> $int {
                if self.0.is_nan() {
                    <$float>::NAN.to_bits()
                } else {
                    self.0.to_bits()
                }
            }
        }

        impl From<$float> for FloatKey<$float> {
            fn from(value: $float) -> Self {
                Self(value)
            }
        }

        impl From<FloatKey<$float>> for $float {
            fn from(key: FloatKey<$float>) -> Self {
                key.0
            }
        }

        impl PartialEq for FloatKey<$float> {
            fn eq(&self, other: &Self) -> bool {
                self.canonical_bits() == other.canonical_bits()
            }
        }

        impl Eq for FloatKey<$float> {}

        impl Hash for FloatKey<$float> {
            fn hash<H: Hasher>(&self, state: &mut H) {
                self.canonical_bits().hash(state);
            }
        }

        impl Display for FloatKey<$float> {
            fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
                Display::fmt(&self.0, f)
            }
        }

        impl FieldKey for FloatKey<$float> {
            fn to_field_name(&self) -> Cow<'_, str> {
                Cow::Owned(self.0.to_string())
            }

            fn from_field_name(name: &str) -> Option<Self> {
                name.parse().ok().map(Self)
            }

            fn to_field_int(&self) -> Option<isize> {
                let value = self.0;
                // `isize::MAX as float` rounds up, so the upper bound is exclusive.
                if value.fract() != 0.0
                    || (value == 0.0 && value.is_sign_negative())
                    || value < isize::MIN as $float
                    || value >= isize::MAX as $float
                {
                    return None;
                }
                Some(value as isize)
            }

            fn from_field_int(int: isize) -> Option<Self> {
                let value = int as $float;
                // Only accept integers that survive the conversion unchanged.
                (value as i128 == int as i128).then_some(Self(value))
            }
        }
    };
}

impl_float_key!(f32, u32);
impl_float_key!(f64, u64);

#[cfg(test)]
mod test {
    use crate::key::{FieldKey, FloatKey};

    #[test]
    fn names_round_trip() {
        for value in [0.0, -0.0, 1.0, -2.5, 0.1, 1e300, f64::MIN_POSITIVE, f64::MAX] {
            let key = FloatKey::new(value);
            let name = key.to_field_name();
            assert_eq!(FloatKey::<f64>::from_field_name(&name), Some(key), "{name}");
        }

        assert_eq!(FloatKey::new(1.5f32).to_field_name(), "1.5");
        assert_eq!(FloatKey::new(3.0f64).to_field_name(), "3");
    }

    #[test]
    fn non_finite_tokens() {
        assert_eq!(FloatKey::new(f64::NAN).to_field_name(), "NaN");
        assert_eq!(FloatKey::new(f64::INFINITY).to_field_name(), "inf");
        assert_eq!(FloatKey::new(f64::NEG_INFINITY).to_field_name(), "-inf");

        assert_eq!(
            FloatKey::<f64>::from_field_name("NaN"),
            Some(FloatKey::new(f64::NAN))
        );
        assert_eq!(
            FloatKey::<f32>::from_field_name("Infinity"),
            Some(FloatKey::new(f32::INFINITY))
        );
        assert_eq!(
            FloatKey::<f64>::from_field_name("-inf"),
            Some(FloatKey::new(f64::NEG_INFINITY))
        );
        assert_eq!(FloatKey::<f64>::from_field_name("not a number"), None);
    }

    #[test]
    fn equality() {
        assert_eq!(FloatKey::new(f64::NAN), FloatKey::new(-f64::NAN));
        assert_ne!(FloatKey::new(0.0f64), FloatKey::new(-0.0f64));
        assert_eq!(FloatKey::new(2.0f32), FloatKey::from(2.0f32));
    }

    #[test]
    fn int_channel() {
        assert_eq!(FloatKey::new(3.0f64).to_field_int(), Some(3));
        assert_eq!(FloatKey::new(-3.0f64).to_field_int(), Some(-3));
        assert_eq!(FloatKey::new(3.5f64).to_field_int(), None);
        assert_eq!(FloatKey::new(-0.0f64).to_field_int(), None);
        assert_eq!(FloatKey::new(f64::NAN).to_field_int(), None);
        assert_eq!(FloatKey::new(f64::INFINITY).to_field_int(), None);
        assert_eq!(FloatKey::new(1e300f64).to_field_int(), None);

        assert_eq!(FloatKey::<f64>::from_field_int(5), Some(FloatKey::new(5.0)));
        assert_eq!(FloatKey::<f32>::from_field_int(16_777_217), None);
        assert_eq!(FloatKey::<f64>::from_field_int(isize::MAX), None);
    }
}
