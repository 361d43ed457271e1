use crate::error::KeyedMapError;
use crate::key::{FieldIdentifier, FieldIdentifierVisitor, FieldKey};
use crate::map::KeyedMap;
use serde::de::{self, DeserializeSeed, MapAccess, Visitor};
use serde::ser::{self, SerializeMap};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::any::type_name;
use std::collections::HashMap;
use std::fmt::{self, Formatter};
use std::hash::BuildHasher;
use std::marker::PhantomData;
use tracing::{debug, trace};

/// Decoders may announce absurd lengths; don't trust them further than this.
const MAX_PREALLOCATED_ENTRIES: usize = 4096;

/// Which field identifier is written for each key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum KeyStyle {
    /// Always the field name.
    Name,
    /// The integer identifier if the key has one, otherwise the field name.
    PreferInt,
}

/// A value that names its key in the error if it fails to serialize.
struct KeyedValue<'a, V: ?Sized> {
    identifier: &'a FieldIdentifier,
    value: &'a V,
}

impl<V: Serialize + ?Sized> Serialize for KeyedValue<'_, V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.value.serialize(serializer).map_err(|error| {
            ser::Error::custom(KeyedMapError::ValueEncode {
                key: self.identifier.to_string(),
                message: error.to_string(),
            })
        })
    }
}

/// Writes all entries as a map keyed by field identifiers.
pub(crate) fn serialize_entries<'a, K, V, S>(
    entries: impl ExactSizeIterator<Item = (&'a K, &'a V)>,
    serializer: S,
    style: KeyStyle,
) -> Result<S::Ok, S::Error>
where
    K: FieldKey + 'a,
    V: Serialize + 'a,
    S: Serializer,
{
    trace!(entries = entries.len(), ?style, "encoding keyed map");
    let mut map = serializer.serialize_map(Some(entries.len()))?;
    for (key, value) in entries {
        let identifier = match style {
            KeyStyle::Name => FieldIdentifier::Name(key.to_field_name().into_owned()),
            KeyStyle::PreferInt => key.to_field_identifier(),
        };
        map.serialize_entry(
            &identifier,
            &KeyedValue {
                identifier: &identifier,
                value,
            },
        )?;
    }
    map.end()
}

/// Reads one field identifier of a map.
struct IdentifierSeed(KeyStyle);

impl<'de> DeserializeSeed<'de> for IdentifierSeed {
    type Value = FieldIdentifier;

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        match self.0 {
            // Keys written by name are strings; asking for one also works in formats
            // that are not self-describing.
            KeyStyle::Name => deserializer.deserialize_str(FieldIdentifierVisitor),
            KeyStyle::PreferInt => deserializer.deserialize_any(FieldIdentifierVisitor),
        }
    }
}

/// A collection entries can be decoded into.
pub(crate) trait Entries<K, V> {
    fn with_capacity(capacity: usize) -> Self;

    fn insert_entry(&mut self, key: K, value: V);
}

impl<K: FieldKey, V> Entries<K, V> for KeyedMap<K, V> {
    fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity(capacity)
    }

    fn insert_entry(&mut self, key: K, value: V) {
        self.insert(key, value);
    }
}

impl<K: FieldKey, V, H: BuildHasher + Default> Entries<K, V> for HashMap<K, V, H> {
    fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, H::default())
    }

    fn insert_entry(&mut self, key: K, value: V) {
        self.insert(key, value);
    }
}

/// Parses an identifier read from the input into a key.
///
/// Formats with string-only map keys (like JSON) turn integer identifiers into
/// names, so with [`KeyStyle::PreferInt`] numeric names are retried as integers.
fn parse_key<K: FieldKey>(identifier: &FieldIdentifier, style: KeyStyle) -> Option<K> {
    K::from_field_identifier(identifier).or_else(|| match (style, identifier) {
        (KeyStyle::PreferInt, FieldIdentifier::Name(name)) => {
            name.parse().ok().and_then(K::from_field_int)
        }
        _ => None,
    })
}

/// Decodes a map keyed by field identifiers into `C`.
///
/// An identifier that is not a valid `K` fails the whole decode.
/// If several identifiers parse into the same key, the last value wins.
pub(crate) struct EntriesVisitor<C, K, V> {
    style: KeyStyle,
    marker: PhantomData<fn() -> (C, K, V)>,
}

impl<C, K, V> EntriesVisitor<C, K, V> {
    pub(crate) const fn new(style: KeyStyle) -> Self {
        Self {
            style,
            marker: PhantomData,
        }
    }
}

impl<'de, C, K, V> Visitor<'de> for EntriesVisitor<C, K, V>
where
    C: Entries<K, V>,
    K: FieldKey,
    V: Deserialize<'de>,
{
    type Value = C;

    fn expecting(&self, formatter: &mut Formatter) -> fmt::Result {
        write!(formatter, "a map keyed by `{}` field identifiers", type_name::<K>())
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let capacity = access.size_hint().unwrap_or(0);
        let mut entries = C::with_capacity(capacity.min(MAX_PREALLOCATED_ENTRIES));

        while let Some(identifier) = access.next_key_seed(IdentifierSeed(self.style))? {
            let Some(key) = parse_key::<K>(&identifier, self.style) else {
                debug!(%identifier, key_type = type_name::<K>(), "rejected field identifier");
                return Err(de::Error::custom(KeyedMapError::key_parse::<K>(&identifier)));
            };
            let value = access.next_value().inspect_err(|error| {
                debug!(%identifier, %error, "failed to decode keyed map value");
            })?;
            entries.insert_entry(key, value);
        }
        Ok(entries)
    }
}

impl<K: FieldKey, V: Serialize> Serialize for KeyedMap<K, V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_entries(self.iter(), serializer, KeyStyle::Name)
    }
}

impl<'de, K: FieldKey, V: Deserialize<'de>> Deserialize<'de> for KeyedMap<K, V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(EntriesVisitor::new(KeyStyle::Name))
    }
}
