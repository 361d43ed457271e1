//! Derive macros for `keyed-map`.
//!
//! * `#[derive(RawKey)]` - implements `keyed_map::RawKey` for field-less enums and newtypes

use proc_macro::TokenStream;
use proc_macro_error2::proc_macro_error;

/// `RawKey` derive macro implementation.
mod raw_key;

/// Derives `keyed_map::RawKey`, which makes a type usable as a `KeyedMap` key.
///
/// Supported shapes:
/// * Field-less enums without `#[repr]` or discriminants are keyed by text. Each variant
///   is keyed by its name unless renamed.
/// * Field-less enums with an integer `#[repr]` or explicit discriminants are keyed by
///   their discriminant (as `isize` without `#[repr]`).
/// * Structs with exactly one field are keyed by that field, which must be `Clone`.
///
/// Attributes:
/// * `#[raw_key(rename_all = "...")]` on a text-keyed enum: one of `lowercase`,
///   `UPPERCASE`, `snake_case`, `kebab-case`, `camelCase`, `PascalCase`,
///   `SCREAMING_SNAKE_CASE`
/// * `#[raw_key(rename = "...")]` on a variant of a text-keyed enum
///
/// ```ignore
/// #[derive(PartialEq, Eq, Hash, RawKey)]
/// enum Rarity {
///     Common,
///     #[raw_key(rename = "very rare")]
///     VeryRare,
/// }
///
/// #[derive(PartialEq, Eq, Hash, RawKey)]
/// #[repr(u8)]
/// enum Level {
///     Low = 1,
///     High = 10,
/// }
/// ```
#[proc_macro_error]
#[proc_macro_derive(RawKey, attributes(raw_key))]
pub fn derive_raw_key(input: TokenStream) -> TokenStream {
    raw_key::derive_raw_key(input.into()).into()
}
