use heck::{ToKebabCase, ToLowerCamelCase, ToShoutySnakeCase, ToSnakeCase, ToUpperCamelCase};
use proc_macro_error2::abort;
use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::{
    Attribute, Data, DataEnum, DeriveInput, Fields, Ident, LitStr, Member, Variant,
    parenthesized, parse2, token,
};

const INTEGER_REPRS: [&str; 12] = [
    "i8", "i16", "i32", "i64", "i128", "isize", "u8", "u16", "u32", "u64", "u128", "usize",
];

/// How the variant names of a text-keyed enum are transformed.
#[derive(Clone, Copy)]
enum RenameRule {
    Lower,
    Upper,
    Snake,
    Kebab,
    Camel,
    Pascal,
    ScreamingSnake,
}

impl RenameRule {
    fn parse(value: &LitStr) -> syn::Result<Self> {
        Ok(match value.value().as_str() {
            "lowercase" => Self::Lower,
            "UPPERCASE" => Self::Upper,
            "snake_case" => Self::Snake,
            "kebab-case" => Self::Kebab,
            "camelCase" => Self::Camel,
            "PascalCase" => Self::Pascal,
            "SCREAMING_SNAKE_CASE" => Self::ScreamingSnake,
            _ => return Err(syn::Error::new_spanned(value, "unknown rename_all rule")),
        })
    }

    fn apply(self, name: &str) -> String {
        match self {
            Self::Lower => name.to_lowercase(),
            Self::Upper => name.to_uppercase(),
            Self::Snake => name.to_snake_case(),
            Self::Kebab => name.to_kebab_case(),
            Self::Camel => name.to_lower_camel_case(),
            Self::Pascal => name.to_upper_camel_case(),
            Self::ScreamingSnake => name.to_shouty_snake_case(),
        }
    }
}

pub fn derive_raw_key(input: TokenStream) -> TokenStream {
    let input: DeriveInput = match parse2(input) {
        Ok(input) => input,
        Err(error) => return error.to_compile_error(),
    };
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let body = match &input.data {
        Data::Enum(data) => derive_enum(&input.attrs, data, name),
        Data::Struct(data) => derive_newtype(&data.fields, name),
        Data::Union(_) => abort!(name, "RawKey cannot be derived for unions"),
    };

    quote! {
        impl #impl_generics ::keyed_map::RawKey for #name #ty_generics #where_clause {
            #body
        }
    }
}

fn derive_enum(attrs: &[Attribute], data: &DataEnum, name: &Ident) -> TokenStream {
    if data.variants.is_empty() {
        abort!(name, "RawKey needs an enum with at least one variant");
    }
    for variant in &data.variants {
        if !matches!(variant.fields, Fields::Unit) {
            abort!(variant, "RawKey enum variants cannot have fields");
        }
    }

    let repr = integer_repr(attrs);
    let has_discriminants = data.variants.iter().any(|v| v.discriminant.is_some());

    if repr.is_some() || has_discriminants {
        let raw = repr.unwrap_or_else(|| Ident::new("isize", Span::call_site()));
        if rename_all(attrs).is_some() {
            abort!(
                name,
                "rename_all only applies to enums keyed by text, this one is keyed by `{}`",
                raw
            );
        }
        derive_integer_enum(data, &raw)
    } else {
        derive_text_enum(attrs, data)
    }
}

/// Returns the integer type of `#[repr(..)]`, if there is one.
fn integer_repr(attrs: &[Attribute]) -> Option<Ident> {
    let mut repr = None;
    for attr in attrs.iter().filter(|attr| attr.path().is_ident("repr")) {
        // Other reprs (like `C` or `align(8)`) are irrelevant here.
        let _ = attr.parse_nested_meta(|meta| {
            if let Some(ident) = meta.path.get_ident()
                && INTEGER_REPRS.contains(&ident.to_string().as_str())
            {
                repr = Some(ident.clone());
            }
            if meta.input.peek(token::Paren) {
                let _arguments;
                parenthesized!(_arguments in meta.input);
            }
            Ok(())
        });
    }
    repr
}

fn derive_integer_enum(data: &DataEnum, raw: &Ident) -> TokenStream {
    let variants: Vec<&Ident> = data.variants.iter().map(|v| &v.ident).collect();
    for variant in &data.variants {
        if variant_rename(variant).is_some() {
            abort!(
                variant,
                "rename only applies to enums keyed by text, this one is keyed by `{}`",
                raw
            );
        }
    }

    quote! {
        type Raw = #raw;

        fn to_raw(&self) -> #raw {
            match self {
                #( Self::#variants => Self::#variants as #raw, )*
            }
        }

        fn from_raw(raw: #raw) -> ::std::option::Option<Self> {
            #(
                if raw == Self::#variants as #raw {
                    return ::std::option::Option::Some(Self::#variants);
                }
            )*
            ::std::option::Option::None
        }
    }
}

fn derive_text_enum(attrs: &[Attribute], data: &DataEnum) -> TokenStream {
    let rule = rename_all(attrs);

    let mut variants = Vec::new();
    let mut names: Vec<String> = Vec::new();
    for variant in &data.variants {
        let name = variant_rename(variant).map_or_else(
            || {
                let ident = variant.ident.to_string();
                rule.map_or_else(|| ident.clone(), |rule| rule.apply(&ident))
            },
            |rename| rename.value(),
        );
        if names.contains(&name) {
            abort!(variant, "duplicate raw key `{}`", name);
        }
        variants.push(&variant.ident);
        names.push(name);
    }

    quote! {
        type Raw = ::std::string::String;

        fn to_raw(&self) -> ::std::string::String {
            match self {
                #( Self::#variants => ::std::string::String::from(#names), )*
            }
        }

        fn from_raw(raw: ::std::string::String) -> ::std::option::Option<Self> {
            match raw.as_str() {
                #( #names => ::std::option::Option::Some(Self::#variants), )*
                _ => ::std::option::Option::None,
            }
        }
    }
}

fn derive_newtype(fields: &Fields, name: &Ident) -> TokenStream {
    let mut iter = fields.iter();
    let (Some(field), None) = (iter.next(), iter.next()) else {
        abort!(name, "RawKey structs must have exactly one field");
    };
    let member = field
        .ident
        .clone()
        .map_or_else(|| Member::Unnamed(0.into()), Member::Named);
    let ty = &field.ty;

    quote! {
        type Raw = #ty;

        fn to_raw(&self) -> #ty {
            ::std::clone::Clone::clone(&self.#member)
        }

        fn from_raw(raw: #ty) -> ::std::option::Option<Self> {
            ::std::option::Option::Some(Self { #member: raw })
        }
    }
}

/// Parses `#[raw_key(rename_all = "..")]` on the enum.
fn rename_all(attrs: &[Attribute]) -> Option<RenameRule> {
    let mut rule = None;
    for attr in attrs.iter().filter(|attr| attr.path().is_ident("raw_key")) {
        let result = attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename_all") {
                rule = Some(RenameRule::parse(&meta.value()?.parse()?)?);
                Ok(())
            } else {
                Err(meta.error("expected `rename_all`"))
            }
        });
        if let Err(error) = result {
            abort!(error.span(), "{}", error);
        }
    }
    rule
}

/// Parses `#[raw_key(rename = "..")]` on a variant.
fn variant_rename(variant: &Variant) -> Option<LitStr> {
    let mut rename = None;
    for attr in variant
        .attrs
        .iter()
        .filter(|attr| attr.path().is_ident("raw_key"))
    {
        let result = attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename") {
                rename = Some(meta.value()?.parse()?);
                Ok(())
            } else {
                Err(meta.error("expected `rename`"))
            }
        });
        if let Err(error) = result {
            abort!(error.span(), "{}", error);
        }
    }
    rename
}
