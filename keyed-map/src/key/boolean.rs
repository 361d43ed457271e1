use crate::key::FieldKey;
use std::borrow::Cow;

impl FieldKey for bool {
    fn to_field_name(&self) -> Cow<'_, str> {
        Cow::Borrowed(if *self { "true" } else { "false" })
    }

    /// Also accepts the YAML 1.1 spellings, ignoring case.
    fn from_field_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "y" | "yes" | "true" | "on" => Some(true),
            "n" | "no" | "false" | "off" => Some(false),
            _ => None,
        }
    }

    fn to_field_int(&self) -> Option<isize> {
        Some(isize::from(*self))
    }

    fn from_field_int(int: isize) -> Option<Self> {
        Some(int != 0)
    }
}

#[cfg(test)]
mod test {
    use crate::key::FieldKey;

    #[test]
    fn vocabulary() {
        for truthy in ["y", "Y", "yes", "YES", "true", "True", "on", "oN"] {
            assert_eq!(bool::from_field_name(truthy), Some(true), "{truthy}");
        }
        for falsy in ["n", "N", "no", "No", "false", "FALSE", "off", "Off"] {
            assert_eq!(bool::from_field_name(falsy), Some(false), "{falsy}");
        }
        for invalid in ["maybe", "", "1", "0", "yess", " true"] {
            assert_eq!(bool::from_field_name(invalid), None, "{invalid}");
        }
    }

    #[test]
    fn int_channel() {
        assert_eq!(true.to_field_name(), "true");
        assert_eq!(false.to_field_name(), "false");
        assert_eq!(true.to_field_int(), Some(1));
        assert_eq!(false.to_field_int(), Some(0));
        assert_eq!(bool::from_field_int(1), Some(true));
        assert_eq!(bool::from_field_int(0), Some(false));
        assert_eq!(bool::from_field_int(-5), Some(true));
    }
}
