use proc_macro::TokenStream;
use quote::quote;
use syn::{
    Expr, ExprLit, Fields, Ident, ItemStruct, Lit, Meta, Path, Token, parse_macro_input, parse_str,
    punctuated::Punctuated,
};

struct BaseEntityConfig {
    traits_path: Path,
    active_model_ident: Ident,
    id_field: Ident,
}

impl Default for BaseEntityConfig {
    fn default() -> Self {
        Self {
            traits_path: parse_str("crate::db::dao::base_traits")
                .expect("default traits path should parse"),
            active_model_ident: Ident::new("ActiveModel", proc_macro2::Span::call_site()),
            id_field: Ident::new("id", proc_macro2::Span::call_site()),
        }
    }
}

/// Adds an integer primary key to a sea-orm model and wires it into the DAO traits.
///
/// The key is `auto_increment`, so inserts that leave it unset get the next id from
/// the database while inserts that set it keep the caller's value.
#[proc_macro_attribute]
pub fn base_entity(attr: TokenStream, item: TokenStream) -> TokenStream {
    let args = parse_macro_input!(attr with Punctuated<Meta, Token![,]>::parse_terminated);
    let mut config = BaseEntityConfig::default();
    if let Err(err) = apply_args(&mut config, args) {
        return err.to_compile_error().into();
    }

    let mut input = parse_macro_input!(item as ItemStruct);
    let fields = match &mut input.fields {
        Fields::Named(fields) => fields,
        _ => {
            return syn::Error::new_spanned(
                input,
                "base_entity requires a struct with named fields",
            )
            .to_compile_error()
            .into();
        }
    };

    let has_id = fields
        .named
        .iter()
        .any(|field| field.ident.as_ref() == Some(&config.id_field));

    if !has_id {
        let id_ident = config.id_field.clone();
        let id_field: syn::Field = syn::parse_quote! {
            #[sea_orm(primary_key)]
            pub #id_ident: i64
        };
        let mut new_fields = Punctuated::new();
        new_fields.push(id_field);
        for field in fields.named.iter().cloned() {
            new_fields.push(field);
        }
        fields.named = new_fields;
    }

    let traits_path = config.traits_path;
    let active_model = config.active_model_ident;
    let id_field = config.id_field;
    let id_column = Ident::new(&to_pascal_case(&id_field.to_string()), id_field.span());

    let expanded = quote! {
        #input

        impl #traits_path::HasIdActiveModel for #active_model {
            fn set_id(&mut self, id: i64) {
                self.#id_field = sea_orm::ActiveValue::Set(id);
            }
        }

        impl #traits_path::HasIdColumn for Entity {
            fn id_column() -> Column {
                Column::#id_column
            }
        }
    };

    expanded.into()
}

fn to_pascal_case(name: &str) -> String {
    name.split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect()
}

fn apply_args(
    config: &mut BaseEntityConfig,
    args: Punctuated<Meta, Token![,]>,
) -> Result<(), syn::Error> {
    for meta in args {
        let Meta::NameValue(name_value) = meta else {
            return Err(syn::Error::new_spanned(
                meta,
                "expected name-value pair, e.g. traits = \"path::to::traits\"",
            ));
        };

        let Some(ident) = name_value.path.get_ident() else {
            return Err(syn::Error::new_spanned(
                name_value.path,
                "expected simple identifier for attribute key",
            ));
        };

        let value = match name_value.value {
            Expr::Lit(ExprLit {
                lit: Lit::Str(lit_str),
                ..
            }) => lit_str,
            other => {
                return Err(syn::Error::new_spanned(
                    other,
                    "expected string literal for attribute value",
                ));
            }
        };

        match ident.to_string().as_str() {
            "traits" => {
                config.traits_path = value.parse::<Path>().map_err(|err| {
                    syn::Error::new(value.span(), format!("invalid traits path: {err}"))
                })?;
            }
            "active_model" => {
                config.active_model_ident = Ident::new(&value.value(), value.span());
            }
            "id" => {
                config.id_field = Ident::new(&value.value(), value.span());
            }
            _ => {
                return Err(syn::Error::new_spanned(
                    ident,
                    "unknown base_entity attribute key",
                ));
            }
        }
    }

    Ok(())
}
