use crate::key::FieldKey;
use std::borrow::Cow;
use uuid::Uuid;

impl FieldKey for Uuid {
    fn to_field_name(&self) -> Cow<'_, str> {
        Cow::Owned(self.hyphenated().to_string())
    }

    fn from_field_name(name: &str) -> Option<Self> {
        Self::parse_str(name).ok()
    }

    fn from_field_int(_int: isize) -> Option<Self> {
        None
    }
}

#[cfg(test)]
mod test {
    use crate::key::FieldKey;
    use uuid::Uuid;

    #[test]
    fn uuid_keys() {
        let id = Uuid::new_v4();
        let name = id.to_field_name();
        assert_eq!(name.len(), 36);
        assert_eq!(Uuid::from_field_name(&name), Some(id));
        assert_eq!(Uuid::from_field_name(&name.to_uppercase()), Some(id));
        assert_eq!(Uuid::from_field_name("not-a-uuid"), None);
        assert_eq!(id.to_field_int(), None);
        assert_eq!(Uuid::from_field_int(0), None);
    }
}
