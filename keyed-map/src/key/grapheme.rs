use crate::key::FieldKey;
use std::borrow::Cow;
use std::fmt::{self, Display, Formatter};
use unicode_segmentation::UnicodeSegmentation;

/// A key made of exactly one extended grapheme cluster, like `"e\u{301}"` or `"👍🏽"`.
///
/// Unlike [`char`], a single user-perceived character may span several scalars here.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GraphemeKey(String);

impl GraphemeKey {
    /// Returns the key for `text`, or [`None`] unless it is exactly one grapheme cluster.
    #[must_use]
    pub fn new(text: &str) -> Option<Self> {
        // Only look at the first two clusters.
        let mut graphemes = text.graphemes(true);
        match (graphemes.next(), graphemes.next()) {
            (Some(grapheme), None) => Some(Self(grapheme.to_owned())),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<char> for GraphemeKey {
    fn from(c: char) -> Self {
        Self(c.to_string())
    }
}

impl Display for GraphemeKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FieldKey for GraphemeKey {
    fn to_field_name(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.0)
    }

    fn from_field_name(name: &str) -> Option<Self> {
        Self::new(name)
    }

    fn to_field_int(&self) -> Option<isize> {
        let mut chars = self.0.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => c.to_field_int(),
            _ => None,
        }
    }

    fn from_field_int(int: isize) -> Option<Self> {
        char::from_field_int(int).map(Self::from)
    }
}

#[cfg(test)]
mod test {
    use crate::key::{FieldKey, GraphemeKey};

    #[test]
    fn single_cluster_names() {
        assert_eq!(GraphemeKey::from_field_name(""), None);
        assert_eq!(GraphemeKey::from_field_name("a"), Some(GraphemeKey::from('a')));
        assert_eq!(GraphemeKey::from_field_name("ab"), None);

        let combined = GraphemeKey::from_field_name("e\u{301}").unwrap();
        assert_eq!(combined.as_str(), "e\u{301}");
        assert_eq!(combined.to_field_name(), "e\u{301}");
        assert_eq!(GraphemeKey::from_field_name("e\u{301}e"), None);

        assert!(GraphemeKey::new("👨‍👩‍👧").is_some());
        assert!(GraphemeKey::new("\r\n").is_some());
        assert_eq!(GraphemeKey::new("👍👍"), None);
    }

    #[test]
    fn digit_identifiers() {
        assert_eq!(GraphemeKey::from('4').to_field_int(), Some(4));
        assert_eq!(GraphemeKey::new("4\u{301}").unwrap().to_field_int(), None);
        assert_eq!(GraphemeKey::from('x').to_field_int(), None);
        assert_eq!(GraphemeKey::from_field_int(9), Some(GraphemeKey::from('9')));
        assert_eq!(GraphemeKey::from_field_int(12), None);
    }

    #[test]
    fn object_encoding() {
        let map = crate::keyed_map! { GraphemeKey::new("e\u{301}").unwrap() => 1 };
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, "{\"e\u{301}\":1}");
        let decoded: crate::KeyedMap<GraphemeKey, i32> = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, map);
    }
}
