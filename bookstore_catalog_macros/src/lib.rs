use proc_macro::TokenStream;

mod resource;

/// Derive macro for catalog resources.
///
/// Implements `bookstore_catalog::Resource` for a struct with named fields.
///
/// # Attributes
///
/// - `#[resource(collection = "authors")]` on the struct sets the storage
///   collection. Defaults to the snake_case struct name plus `s`.
/// - `#[resource(id)]` marks the identifier field (a `Uuid`). Defaults to a
///   field named `id`.
/// - `#[resource(natural_key)]` marks a `String` field that must be unique
///   per collection, compared trimmed and case-insensitively.
///
/// # Example
///
/// ```ignore
/// #[derive(Clone, Serialize, Deserialize, Resource)]
/// #[resource(collection = "authors")]
/// pub struct Author {
///     pub id: Uuid,
///     #[resource(natural_key)]
///     pub name: String,
/// }
/// ```
#[proc_macro_derive(Resource, attributes(resource))]
pub fn derive_resource(input: TokenStream) -> TokenStream {
    resource::derive_resource(input)
}
