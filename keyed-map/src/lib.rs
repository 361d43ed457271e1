//! A hash map whose keys always serialize as the field names of an object.
//!
//! `serde` formats such as JSON only write a map as an object when its keys serialize
//! as strings (or integers). [`KeyedMap`] renders every key through the [`FieldKey`]
//! adapter instead, so booleans, chars, floats and enums are written as objects as well:
//!
//! ```
//! # #[cfg(feature = "derive")]
//! # fn main() {
//! use keyed_map::{KeyedMap, RawKey, keyed_map};
//!
//! #[derive(Debug, PartialEq, Eq, Hash, RawKey)]
//! #[raw_key(rename_all = "snake_case")]
//! enum Slot {
//!     MainHand,
//!     OffHand,
//! }
//!
//! let slots = keyed_map! { Slot::MainHand => "sword", Slot::OffHand => "shield" };
//! let json = serde_json::to_string(&slots).unwrap();
//! assert_eq!(json, r#"{"main_hand":"sword","off_hand":"shield"}"#);
//!
//! let decoded: KeyedMap<Slot, String> = serde_json::from_str(&json).unwrap();
//! assert_eq!(decoded.get(&Slot::OffHand).map(String::as_str), Some("shield"));
//! # }
//! # #[cfg(not(feature = "derive"))]
//! # fn main() {}
//! ```

/// Asserts that a map encodes to the given JSON and decodes back to an equal map.
#[cfg(test)]
macro_rules! assert_coding {
    ($map:expr, $json:expr) => {{
        fn decode_like<T: serde::de::DeserializeOwned>(_: &T, json: &str) -> T {
            serde_json::from_str(json).expect("decoding failed")
        }

        let map = $map;
        let encoded = serde_json::to_string(&map).expect("encoding failed");
        assert_eq!(encoded, $json, "unexpected encoding");
        assert_eq!(map, decode_like(&map, &encoded), "decoding did not round-trip");
    }};
}

pub mod error;
pub mod key;
pub mod map;

pub use error::{KeyedMapError, Result};
pub use key::{FieldIdentifier, FieldKey, FloatKey, GraphemeKey, RawKey};
#[cfg(feature = "derive")]
pub use keyed_map_macros::RawKey;
pub use map::{Index, KeyedMap, as_object, int_keys};

/// Creates a [`KeyedMap`] from `key => value` pairs.
///
/// A key given more than once keeps its last value.
///
/// ```
/// use keyed_map::keyed_map;
///
/// let map = keyed_map! { 'a' => 1, 'b' => 2, 'a' => 3 };
/// assert_eq!(map.len(), 2);
/// assert_eq!(map.get(&'a'), Some(&3));
/// ```
#[macro_export]
macro_rules! keyed_map {
    () => {
        $crate::KeyedMap::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {
        $crate::KeyedMap::from([$(($key, $value)),+])
    };
}
