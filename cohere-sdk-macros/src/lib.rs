use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, DeriveInput};

/// Derives a `from_bytes` constructor that decodes the type from a JSON byte slice.
///
/// The generated function returns `crate::Result<Self>` and maps decode failures
/// into `crate::Error::JsonParse`, so it is only usable inside `cohere-sdk`.
#[proc_macro_derive(FromBytes)]
pub fn derive_from_bytes(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let expanded = quote! {
        impl #impl_generics #name #ty_generics #where_clause {
            /// Decodes a value from a JSON document held in `bytes`.
            pub fn from_bytes(bytes: impl AsRef<[u8]>) -> crate::Result<Self> {
                ::serde_json::from_slice(bytes.as_ref()).map_err(crate::Error::JsonParse)
            }
        }
    };
    TokenStream::from(expanded)
}
