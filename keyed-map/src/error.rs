use thiserror::Error;

pub type Result<T> = std::result::Result<T, KeyedMapError>;

/// Errors produced by a [`KeyedMap`](crate::KeyedMap).
///
/// While encoding and decoding, these are carried inside the format's own error
/// type through `serde`'s `Error::custom`.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum KeyedMapError {
    /// A field identifier of the input could not be parsed into a key.
    #[error("invalid field identifier `{identifier}` for key type `{key_type}`")]
    KeyParse {
        identifier: String,
        key_type: &'static str,
    },

    /// The value stored under `key` could not be encoded.
    #[error("failed to encode value at `{key}`: {message}")]
    ValueEncode { key: String, message: String },

    /// A sequence expected to have unique keys contained `key` more than once.
    #[error("duplicate key `{key}`")]
    DuplicateKey { key: String },
}

impl KeyedMapError {
    /// Returns an error for an identifier that is not a valid `K`.
    pub fn key_parse<K>(identifier: impl ToString) -> Self {
        Self::KeyParse {
            identifier: identifier.to_string(),
            key_type: std::any::type_name::<K>(),
        }
    }
}
