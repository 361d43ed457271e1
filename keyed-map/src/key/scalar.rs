use crate::key::FieldKey;
use std::borrow::Cow;

impl FieldKey for char {
    fn to_field_name(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn from_field_name(name: &str) -> Option<Self> {
        // Only look at the first two chars: the name is valid iff there is exactly one.
        let mut chars = name.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Some(c),
            _ => None,
        }
    }

    fn to_field_int(&self) -> Option<isize> {
        self.to_digit(10).map(|digit| digit as isize)
    }

    fn from_field_int(int: isize) -> Option<Self> {
        u32::try_from(int)
            .ok()
            .and_then(|digit| Self::from_digit(digit, 10))
    }
}
