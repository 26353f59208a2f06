use proc_macro::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Field, Fields, LitStr};

pub fn derive_resource(input: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(input as DeriveInput);
    let name = &input.ident;

    let fields = match named_fields(&input) {
        Ok(fields) => fields,
        Err(err) => return err.to_compile_error().into(),
    };

    let collection = extract_collection(&input);

    let id_field = match extract_id_field(&input, &fields) {
        Ok(ident) => ident,
        Err(err) => return err.to_compile_error().into(),
    };

    let natural_key = fields
        .iter()
        .find(|field| has_flag(field, "natural_key"))
        .and_then(|field| field.ident.clone());

    let natural_key_fn = natural_key.map(|field| {
        quote! {
            fn natural_key(&self) -> ::std::option::Option<::std::string::String> {
                ::std::option::Option::Some(self.#field.trim().to_lowercase())
            }
        }
    });

    let expanded = quote! {
        impl bookstore_catalog::Resource for #name {
            const COLLECTION: &'static str = #collection;

            fn id(&self) -> bookstore_catalog::Uuid {
                self.#id_field
            }

            #natural_key_fn
        }
    };

    TokenStream::from(expanded)
}

fn named_fields(input: &DeriveInput) -> syn::Result<Vec<Field>> {
    if let Data::Struct(data_struct) = &input.data {
        if let Fields::Named(fields) = &data_struct.fields {
            return Ok(fields.named.iter().cloned().collect());
        }
    }
    Err(syn::Error::new_spanned(
        &input.ident,
        "Resource derive only supports structs with named fields",
    ))
}

fn extract_collection(input: &DeriveInput) -> String {
    for attr in &input.attrs {
        if !attr.path().is_ident("resource") {
            continue;
        }

        let mut collection = None;
        let _ = attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("collection") {
                let value: LitStr = meta.value()?.parse()?;
                collection = Some(value.value());
            }
            Ok(())
        });

        if let Some(c) = collection {
            return c;
        }
    }

    let name = input.ident.to_string();
    format!("{}s", to_snake_case(&name))
}

fn extract_id_field(input: &DeriveInput, fields: &[Field]) -> syn::Result<syn::Ident> {
    if let Some(ident) = fields
        .iter()
        .find(|field| has_flag(field, "id"))
        .and_then(|field| field.ident.clone())
    {
        return Ok(ident);
    }

    fields
        .iter()
        .filter_map(|field| field.ident.clone())
        .find(|ident| ident == "id")
        .ok_or_else(|| {
            syn::Error::new_spanned(
                &input.ident,
                "Resource derive: no field marked with #[resource(id)] and no field named `id`",
            )
        })
}

fn has_flag(field: &Field, flag: &str) -> bool {
    field.attrs.iter().any(|attr| {
        if !attr.path().is_ident("resource") {
            return false;
        }
        let mut found = false;
        let _ = attr.parse_nested_meta(|meta| {
            if meta.path.is_ident(flag) {
                found = true;
            }
            Ok(())
        });
        found
    })
}

fn to_snake_case(s: &str) -> String {
    let mut result = String::new();
    for (i, ch) in s.chars().enumerate() {
        if ch.is_uppercase() {
            if i > 0 {
                result.push('_');
            }
            result.extend(ch.to_lowercase());
        } else {
            result.push(ch);
        }
    }
    result
}
