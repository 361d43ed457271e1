use crate::error::{KeyedMapError, Result};
use crate::key::FieldKey;
use indexmap::IndexMap;
use indexmap::map::{IntoIter, Iter, IterMut, Keys, Values, ValuesMut};
use rand::Rng;
use rand::seq::IteratorRandom;
use rustc_hash::FxHasher;
use std::collections::HashMap;
use std::fmt::{self, Debug, Formatter};
use std::hash::{BuildHasher, Hash, Hasher};

pub mod as_object;
pub mod int_keys;
mod coding;

/// A hash map whose keys are always encoded as the field names of an object,
/// never as a flat list of alternating keys and values.
///
/// Keys must implement [`FieldKey`]; values are encoded with their own `serde` implementation.
/// The iteration order is unspecified, but stays the same while the map is not mutated.
#[derive(Clone)]
pub struct KeyedMap<K: FieldKey, V> {
    entries: IndexMap<K, V>,
}

/// An opaque position of an entry in a [`KeyedMap`].
///
/// A position is only meaningful for the map it came from, until that map is mutated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Index(usize);

impl<K: FieldKey, V> KeyedMap<K, V> {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// Creates an empty map with space for at least `capacity` entries.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: IndexMap::with_capacity(capacity),
        }
    }

    /// Creates a map from pairs whose keys must all be different.
    ///
    /// Returns [`KeyedMapError::DuplicateKey`] for the first repeated key.
    pub fn from_unique_pairs(pairs: impl IntoIterator<Item = (K, V)>) -> Result<Self> {
        let pairs = pairs.into_iter();
        let mut map = Self::with_capacity(pairs.size_hint().0);
        for (key, value) in pairs {
            if map.entries.contains_key(&key) {
                return Err(KeyedMapError::DuplicateKey {
                    key: key.to_field_name().into_owned(),
                });
            }
            map.entries.insert(key, value);
        }
        Ok(map)
    }

    /// Creates a map from pairs, calling `combine(existing, new)` to get the value
    /// kept for a repeated key.
    pub fn from_pairs_with(
        pairs: impl IntoIterator<Item = (K, V)>,
        combine: impl FnMut(V, V) -> V,
    ) -> Self {
        let mut map = Self::new();
        map.merge(pairs, combine);
        map
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns how many entries the map can hold without reallocating.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.entries.capacity()
    }

    pub fn reserve(&mut self, additional: usize) {
        self.entries.reserve(additional);
    }

    #[must_use]
    pub fn contains_key(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    #[must_use]
    pub fn get(&self, key: &K) -> Option<&V> {
        self.entries.get(key)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.entries.get_mut(key)
    }

    /// Returns the value for `key`, or `default` if there is none.
    #[must_use]
    pub fn get_or<'a>(&'a self, key: &K, default: &'a V) -> &'a V {
        self.entries.get(key).unwrap_or(default)
    }

    /// Returns a mutable reference to the value for `key`,
    /// first inserting the result of `default` if there is none.
    pub fn get_or_insert_with(&mut self, key: K, default: impl FnOnce() -> V) -> &mut V {
        self.entries.entry(key).or_insert_with(default)
    }

    /// Inserts a value, returning the value previously stored for `key`.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.entries.insert(key, value)
    }

    /// Inserts all pairs, calling `combine(existing, new)` to get the value kept
    /// for a key that is already present.
    pub fn merge(
        &mut self,
        pairs: impl IntoIterator<Item = (K, V)>,
        mut combine: impl FnMut(V, V) -> V,
    ) {
        for (key, value) in pairs {
            match self.entries.swap_remove_full(&key) {
                Some((index, key, existing)) => {
                    // Put the combined entry back at its old position.
                    let (last, _) = self.entries.insert_full(key, combine(existing, value));
                    self.entries.swap_indices(index, last);
                }
                None => {
                    self.entries.insert(key, value);
                }
            }
        }
    }

    /// Returns this map with all pairs merged in. See [`KeyedMap::merge`].
    #[must_use]
    pub fn merging(
        mut self,
        pairs: impl IntoIterator<Item = (K, V)>,
        combine: impl FnMut(V, V) -> V,
    ) -> Self {
        self.merge(pairs, combine);
        self
    }

    /// Removes the value for `key`, returning it if it existed.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.entries.swap_remove(key)
    }

    /// Removes every entry. With `keep_capacity`, the allocated space is retained.
    pub fn remove_all(&mut self, keep_capacity: bool) {
        if keep_capacity {
            self.entries.clear();
        } else {
            self.entries = IndexMap::new();
        }
    }

    /// Returns the position of `key`, if it is present.
    #[must_use]
    pub fn index_of(&self, key: &K) -> Option<Index> {
        self.entries.get_index_of(key).map(Index)
    }

    /// Returns the entry at `index`.
    #[must_use]
    pub fn get_index(&self, index: Index) -> Option<(&K, &V)> {
        self.entries.get_index(index.0)
    }

    /// Removes and returns the entry at `index`.
    pub fn remove_at(&mut self, index: Index) -> Option<(K, V)> {
        self.entries.swap_remove_index(index.0)
    }

    /// Returns a new map with the same keys and every value transformed by `transform`.
    #[must_use]
    pub fn map_values<T>(self, mut transform: impl FnMut(V) -> T) -> KeyedMap<K, T> {
        KeyedMap {
            entries: self
                .entries
                .into_iter()
                .map(|(key, value)| (key, transform(value)))
                .collect(),
        }
    }

    /// Returns the first entry in iteration order.
    #[must_use]
    pub fn first(&self) -> Option<(&K, &V)> {
        self.entries.first()
    }

    /// Returns a uniformly chosen entry, or [`None`] if the map is empty.
    pub fn random_entry<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<(&K, &V)> {
        self.entries.iter().choose(rng)
    }

    pub fn keys(&self) -> Keys<'_, K, V> {
        self.entries.keys()
    }

    pub fn values(&self) -> Values<'_, K, V> {
        self.entries.values()
    }

    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
        self.entries.values_mut()
    }

    pub fn iter(&self) -> Iter<'_, K, V> {
        self.entries.iter()
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        self.entries.iter_mut()
    }

    /// Returns the wrapped map.
    #[must_use]
    pub fn into_inner(self) -> IndexMap<K, V> {
        self.entries
    }
}

impl<K: FieldKey, T> KeyedMap<K, Vec<T>> {
    /// Groups `values` by the key `key_for_value` returns for each of them.
    /// Values keep their relative order inside each group.
    pub fn grouping(
        values: impl IntoIterator<Item = T>,
        mut key_for_value: impl FnMut(&T) -> K,
    ) -> Self {
        let mut map = Self::new();
        for value in values {
            map.get_or_insert_with(key_for_value(&value), Vec::new)
                .push(value);
        }
        map
    }
}

impl<K: FieldKey, V> Default for KeyedMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: FieldKey + Debug, V: Debug> Debug for KeyedMap<K, V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(&self.entries).finish()
    }
}

impl<K: FieldKey, V: PartialEq> PartialEq for KeyedMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl<K: FieldKey, V: Eq> Eq for KeyedMap<K, V> {}

impl<K: FieldKey, V: Hash> Hash for KeyedMap<K, V> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Combine per-entry hashes with a commutative operation so that equal maps
        // in different orders hash the same.
        let combined = self
            .entries
            .iter()
            .map(|entry| {
                let mut hasher = FxHasher::default();
                entry.hash(&mut hasher);
                hasher.finish()
            })
            .fold(0u64, u64::wrapping_add);
        state.write_usize(self.entries.len());
        state.write_u64(combined);
    }
}

/// Duplicate keys keep the last value.
impl<K: FieldKey, V> FromIterator<(K, V)> for KeyedMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: IndexMap::from_iter(iter),
        }
    }
}

/// Duplicate keys keep the last value.
impl<K: FieldKey, V, const N: usize> From<[(K, V); N]> for KeyedMap<K, V> {
    fn from(pairs: [(K, V); N]) -> Self {
        Self::from_iter(pairs)
    }
}

impl<K: FieldKey, V, S: BuildHasher> From<HashMap<K, V, S>> for KeyedMap<K, V> {
    fn from(map: HashMap<K, V, S>) -> Self {
        Self::from_iter(map)
    }
}

impl<K: FieldKey, V> From<IndexMap<K, V>> for KeyedMap<K, V> {
    fn from(entries: IndexMap<K, V>) -> Self {
        Self { entries }
    }
}

impl<K: FieldKey, V> Extend<(K, V)> for KeyedMap<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.entries.extend(iter);
    }
}

impl<K: FieldKey, V> IntoIterator for KeyedMap<K, V> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a, K: FieldKey, V> IntoIterator for &'a KeyedMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl<'a, K: FieldKey, V> IntoIterator for &'a mut KeyedMap<K, V> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter_mut()
    }
}

#[cfg(test)]
mod test {
    use crate::error::KeyedMapError;
    use crate::map::KeyedMap;
    use crate::{FloatKey, keyed_map};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashMap;
    use std::hash::{BuildHasher, RandomState};

    #[test]
    fn construction() {
        let empty: KeyedMap<String, i32> = KeyedMap::new();
        assert!(empty.is_empty());
        assert_eq!(empty.len(), 0);

        let reserved: KeyedMap<u8, i32> = KeyedMap::with_capacity(32);
        assert!(reserved.capacity() >= 32);

        let map = KeyedMap::from_unique_pairs([(1u8, "a"), (2, "b")]).unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map.get(&2), Some(&"b"));

        assert_eq!(
            KeyedMap::from_unique_pairs([(1u8, "a"), (1, "b")]),
            Err(KeyedMapError::DuplicateKey { key: "1".into() })
        );

        let summed = KeyedMap::from_pairs_with([('a', 1), ('b', 2), ('a', 10)], |a, b| a + b);
        assert_eq!(summed.get(&'a'), Some(&11));
        assert_eq!(summed.get(&'b'), Some(&2));

        let from_std: KeyedMap<i64, &str> = HashMap::from([(4, "four")]).into();
        assert_eq!(from_std.get(&4), Some(&"four"));
    }

    #[test]
    fn literal_keeps_last_value() {
        let map = keyed_map! {
            "key".to_string() => 1,
            "other".to_string() => 2,
            "key".to_string() => 3,
        };
        assert_eq!(map.len(), 2);
        assert_eq!(map.get(&"key".to_string()), Some(&3));

        let from_array = KeyedMap::from([(true, 'a'), (true, 'b')]);
        assert_eq!(from_array.get(&true), Some(&'b'));
    }

    #[test]
    fn grouping() {
        let words = ["apple", "avocado", "banana", "blueberry", "cherry"];
        let groups = KeyedMap::grouping(words, |word| word.chars().next().unwrap_or(' '));
        assert_eq!(groups.len(), 3);
        assert_eq!(groups.get(&'a'), Some(&vec!["apple", "avocado"]));
        assert_eq!(groups.get(&'b'), Some(&vec!["banana", "blueberry"]));
        assert_eq!(groups.get(&'c'), Some(&vec!["cherry"]));
    }

    #[test]
    fn access() {
        let mut map: KeyedMap<u16, i32> = keyed_map! { 1 => 10, 2 => 20 };
        assert!(map.contains_key(&1));
        assert_eq!(map.get_or(&3, &0), &0);
        assert_eq!(map.get_or(&1, &0), &10);
        assert!(!map.contains_key(&3));

        *map.get_or_insert_with(3, || 0) += 5;
        assert_eq!(map.get(&3), Some(&5));
        *map.get_or_insert_with(1, || 0) += 5;
        assert_eq!(map.get(&1), Some(&15));

        if let Some(value) = map.get_mut(&2) {
            *value = 21;
        }
        assert_eq!(map.insert(2, 22), Some(21));
        assert_eq!(map.insert(4, 40), None);
        assert_eq!(map.len(), 4);
    }

    #[test]
    fn merge() {
        let mut map = keyed_map! { 'a' => 1, 'b' => 2 };
        map.merge([('b', 3), ('c', 4)], |old, new| old.max(new));
        assert_eq!(map, keyed_map! { 'a' => 1, 'b' => 3, 'c' => 4 });

        let kept = map.merging([('a', 100)], |old, _| old);
        assert_eq!(kept.get(&'a'), Some(&1));
    }

    #[test]
    fn merge_keeps_positions() {
        let mut map = keyed_map! { 1u8 => "a", 2 => "b", 3 => "c" };
        let before = map.index_of(&1);
        map.merge([(1, "z")], |_, new| new);
        assert_eq!(map.index_of(&1), before);
        assert_eq!(map.keys().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn removal() {
        let mut map = keyed_map! { 1u32 => "one", 2 => "two", 3 => "three" };
        assert_eq!(map.remove(&2), Some("two"));
        assert_eq!(map.remove(&2), None);
        assert_eq!(map.len(), 2);

        let index = map.index_of(&3).unwrap();
        assert_eq!(map.get_index(index), Some((&3, &"three")));
        assert_eq!(map.remove_at(index), Some((3, "three")));
        assert_eq!(map.index_of(&3), None);
        assert_eq!(map.len(), 1);

        map.reserve(64);
        map.remove_all(true);
        assert!(map.is_empty());
        assert!(map.capacity() >= 64);

        map.insert(9, "nine");
        map.remove_all(false);
        assert!(map.is_empty());
        assert_eq!(map.capacity(), 0);
    }

    #[test]
    fn map_values() {
        let map = keyed_map! { FloatKey::new(0.5f64) => 2, FloatKey::new(1.5) => 3 };
        let squared = map.map_values(|v| v * v);
        assert_eq!(squared.get(&FloatKey::new(0.5)), Some(&4));
        assert_eq!(squared.get(&FloatKey::new(1.5)), Some(&9));
    }

    #[test]
    fn random_entry() {
        let mut rng = StdRng::seed_from_u64(7);
        let empty: KeyedMap<u8, u8> = KeyedMap::new();
        assert_eq!(empty.random_entry(&mut rng), None);

        let map = keyed_map! { 'a' => 1, 'b' => 2, 'c' => 3 };
        let mut seen = KeyedMap::new();
        for _ in 0..200 {
            let (key, value) = map.random_entry(&mut rng).unwrap();
            assert_eq!(map.get(key), Some(value));
            *seen.get_or_insert_with(*key, || 0) += 1;
        }
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn iteration_is_stable() {
        let map: KeyedMap<i32, i32> = (0..100).map(|i| (i, i * 2)).collect();
        let first: Vec<_> = map.iter().collect();
        let second: Vec<_> = (&map).into_iter().collect();
        assert_eq!(first, second);
        assert_eq!(map.first(), first.first().copied());
        assert_eq!(map.values().sum::<i32>(), 9900);

        let mut map = map;
        for value in map.values_mut() {
            *value += 1;
        }
        for (_, value) in &mut map {
            *value -= 1;
        }
        assert!(map.iter().all(|(k, v)| *v == k * 2));
        assert_eq!(map.into_iter().count(), 100);
    }

    #[test]
    fn equality_ignores_order() {
        let a = keyed_map! { 1u8 => "a", 2 => "b" };
        let b = keyed_map! { 2u8 => "b", 1 => "a" };
        assert_eq!(a, b);

        let state = RandomState::new();
        assert_eq!(state.hash_one(&a), state.hash_one(&b));

        let c = keyed_map! { 1u8 => "a", 2 => "c" };
        assert_ne!(a, c);
    }

    #[test]
    fn debug_as_map() {
        let map = keyed_map! { "k".to_string() => 1 };
        assert_eq!(format!("{map:?}"), r#"{"k": 1}"#);
    }
}
