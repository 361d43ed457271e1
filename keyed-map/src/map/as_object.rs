//! Encodes a plain [`HashMap`] the way a [`KeyedMap`](crate::KeyedMap) is encoded.
//!
//! Use with `#[serde(with = "keyed_map::as_object")]` on fields that must stay a `HashMap`.
//!
//! ```
//! use keyed_map::FloatKey;
//! use serde::{Deserialize, Serialize};
//! use std::collections::HashMap;
//!
//! #[derive(Serialize, Deserialize)]
//! struct Prices {
//!     #[serde(with = "keyed_map::as_object")]
//!     by_weight: HashMap<FloatKey<f64>, u32>,
//! }
//!
//! let prices = Prices { by_weight: HashMap::from([(FloatKey::new(0.5), 3)]) };
//! assert_eq!(serde_json::to_string(&prices).unwrap(), r#"{"by_weight":{"0.5":3}}"#);
//! ```

use crate::key::FieldKey;
use crate::map::coding::{EntriesVisitor, KeyStyle, serialize_entries};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::hash::BuildHasher;

pub fn serialize<K, V, H, S>(map: &HashMap<K, V, H>, serializer: S) -> Result<S::Ok, S::Error>
where
    K: FieldKey,
    V: Serialize,
    S: Serializer,
{
    serialize_entries(map.iter(), serializer, KeyStyle::Name)
}

pub fn deserialize<'de, K, V, H, D>(deserializer: D) -> Result<HashMap<K, V, H>, D::Error>
where
    K: FieldKey,
    V: Deserialize<'de>,
    H: BuildHasher + Default,
    D: Deserializer<'de>,
{
    deserializer.deserialize_map(EntriesVisitor::new(KeyStyle::Name))
}
