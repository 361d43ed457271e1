use crate::key::FieldKey;
use std::borrow::Cow;
use std::rc::Rc;
use std::sync::Arc;

/// Implements [`FieldKey`] for an owned text type where the field name is the text itself.
macro_rules! impl_text_field_key {
    ($($text:ty),+ $(,)?) => {
        $(
            impl FieldKey for $text {
                fn to_field_name(&self) -> Cow<'_, str> {
                    Cow::Borrowed(self)
                }

                fn from_field_name(name: &str) -> Option<Self> {
                    Some(Self::from(name))
                }

                fn to_field_int(&self) -> Option<isize> {
                    // Only canonical numerals: `007`, `+7` and `-0` stay names.
                    self.parse::<isize>()
                        .ok()
                        .filter(|int| int.to_string() == **self)
                }

                fn from_field_int(int: isize) -> Option<Self> {
                    Some(Self::from(int.to_string().as_str()))
                }
            }
        )+
    };
}

impl_text_field_key!(String, Box<str>, Rc<str>, Arc<str>);
