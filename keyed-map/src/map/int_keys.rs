//! Encodes a [`KeyedMap`] with integer field identifiers where keys have one.
//!
//! Use with `#[serde(with = "keyed_map::int_keys")]`. Keys without an integer
//! identifier are written by name. Decoding accepts names and integers, which
//! needs a self-describing format.
//!
//! ```
//! use keyed_map::{KeyedMap, keyed_map};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct Levels {
//!     #[serde(with = "keyed_map::int_keys")]
//!     by_depth: KeyedMap<u8, String>,
//! }
//!
//! let levels = Levels { by_depth: keyed_map! { 1 => "surface".to_string() } };
//! assert_eq!(serde_json::to_string(&levels).unwrap(), r#"{"by_depth":{"1":"surface"}}"#);
//! ```

use crate::key::FieldKey;
use crate::map::KeyedMap;
use crate::map::coding::{EntriesVisitor, KeyStyle, serialize_entries};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub fn serialize<K, V, S>(map: &KeyedMap<K, V>, serializer: S) -> Result<S::Ok, S::Error>
where
    K: FieldKey,
    V: Serialize,
    S: Serializer,
{
    serialize_entries(map.iter(), serializer, KeyStyle::PreferInt)
}

pub fn deserialize<'de, K, V, D>(deserializer: D) -> Result<KeyedMap<K, V>, D::Error>
where
    K: FieldKey,
    V: Deserialize<'de>,
    D: Deserializer<'de>,
{
    deserializer.deserialize_map(EntriesVisitor::new(KeyStyle::PreferInt))
}
