use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Cow;
use std::fmt::{self, Display, Formatter};
use std::hash::Hash;

mod boolean;
pub mod float;
mod grapheme;
mod integer;
mod scalar;
mod text;
#[cfg(feature = "uuid")]
mod uuid_key;

pub use float::FloatKey;
pub use grapheme::GraphemeKey;

/// A type that can be a key of a [`KeyedMap`](crate::KeyedMap).
///
/// A key is addressed on the wire by a *field identifier*: always a name, and
/// optionally an integer for formats that prefer numeric identifiers.
///
/// Implementations must keep both channels lossless:
/// - `from_field_name(&key.to_field_name()) == Some(key)` for every key.
/// - If `to_field_int` returns `Some(i)`, then `from_field_int(i) == Some(key)`.
///
/// None of the parsing functions are fatal; the caller decides whether
/// [`None`] is an error.
pub trait FieldKey: Eq + Hash + Sized {
    /// Renders this key as a field name. This never fails.
    fn to_field_name(&self) -> Cow<'_, str>;

    /// Parses a field name back into a key.
    fn from_field_name(name: &str) -> Option<Self>;

    /// Returns the integer identifier of this key, if it has one.
    fn to_field_int(&self) -> Option<isize> {
        None
    }

    /// Parses an integer identifier back into a key.
    ///
    /// By default, this parses the decimal rendering of `int` as a field name.
    fn from_field_int(int: isize) -> Option<Self> {
        Self::from_field_name(&int.to_string())
    }

    /// Returns the preferred [`FieldIdentifier`] of this key:
    /// the integer one if it exists and parses back to this key, otherwise the name.
    fn to_field_identifier(&self) -> FieldIdentifier {
        self.to_field_int()
            .filter(|int| Self::from_field_int(*int).as_ref() == Some(self))
            .map_or_else(
            || FieldIdentifier::Name(self.to_field_name().into_owned()),
            FieldIdentifier::Int,
        )
    }

    /// Parses any [`FieldIdentifier`] into a key.
    fn from_field_identifier(identifier: &FieldIdentifier) -> Option<Self> {
        match identifier {
            FieldIdentifier::Name(name) => Self::from_field_name(name),
            FieldIdentifier::Int(int) => Self::from_field_int(*int),
        }
    }
}

/// A type whose key representation is the one of an underlying *raw value*,
/// like a field-less `enum` with a string or integer per case.
///
/// Every type implementing this also implements [`FieldKey`] by delegating to
/// [`RawKey::Raw`]. Use `#[derive(RawKey)]` to generate it for enums and newtypes.
pub trait RawKey: Sized {
    /// The underlying key type.
    type Raw: FieldKey;

    /// Returns the raw value of this key.
    fn to_raw(&self) -> Self::Raw;

    /// Returns the key with the given raw value, or [`None`] if no key has it.
    fn from_raw(raw: Self::Raw) -> Option<Self>;
}

impl<T> FieldKey for T
where
    T: RawKey + Eq + Hash,
{
    fn to_field_name(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_raw().to_field_name().into_owned())
    }

    fn from_field_name(name: &str) -> Option<Self> {
        T::Raw::from_field_name(name).and_then(Self::from_raw)
    }

    fn to_field_int(&self) -> Option<isize> {
        self.to_raw().to_field_int()
    }

    fn from_field_int(int: isize) -> Option<Self> {
        T::Raw::from_field_int(int).and_then(Self::from_raw)
    }
}

/// The token a format uses to address one entry of a keyed structure.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum FieldIdentifier {
    Name(String),
    Int(isize),
}

impl Display for FieldIdentifier {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name) => f.write_str(name),
            Self::Int(int) => write!(f, "{int}"),
        }
    }
}

impl Serialize for FieldIdentifier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Name(name) => serializer.serialize_str(name),
            Self::Int(int) => serializer.serialize_i64(*int as i64),
        }
    }
}

/// Accepts every primitive a self-describing format may use as a map key.
pub(crate) struct FieldIdentifierVisitor;

impl FieldIdentifierVisitor {
    fn int_or_name<E: de::Error, I>(value: I) -> Result<FieldIdentifier, E>
    where
        I: TryInto<isize> + Display + Copy,
    {
        // Integers outside `isize` can still be parsed by wide key types through their name.
        Ok(value.try_into().map_or_else(
            |_| FieldIdentifier::Name(value.to_string()),
            FieldIdentifier::Int,
        ))
    }
}

impl Visitor<'_> for FieldIdentifierVisitor {
    type Value = FieldIdentifier;

    fn expecting(&self, formatter: &mut Formatter) -> fmt::Result {
        formatter.write_str("a field name or integer field identifier")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
        Ok(FieldIdentifier::Name(v.to_string()))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Self::int_or_name(v)
    }

    fn visit_i128<E: de::Error>(self, v: i128) -> Result<Self::Value, E> {
        Self::int_or_name(v)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Self::int_or_name(v)
    }

    fn visit_u128<E: de::Error>(self, v: u128) -> Result<Self::Value, E> {
        Self::int_or_name(v)
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Ok(FieldIdentifier::Name(v.to_string()))
    }

    fn visit_char<E: de::Error>(self, v: char) -> Result<Self::Value, E> {
        Ok(FieldIdentifier::Name(v.to_string()))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(FieldIdentifier::Name(v.to_owned()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
        Ok(FieldIdentifier::Name(v))
    }
}

impl<'de> Deserialize<'de> for FieldIdentifier {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(FieldIdentifierVisitor)
    }
}
