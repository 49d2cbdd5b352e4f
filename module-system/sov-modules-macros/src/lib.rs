//! Procedural macros to assist in the creation of modules.

#![deny(missing_docs)]

mod common;
mod module_info;

use proc_macro::TokenStream;
use syn::parse_macro_input;

/// Derives the [`sov_modules_api::ModuleInfo`] trait for the underlying `struct`.
///
/// The underlying type must respect the following conditions, or compilation
/// will fail:
/// - It must be a named `struct`. Tuple `struct`s, `enum`s, and others are
/// not supported.
/// - Its first generic parameter must be the [`sov_modules_api::Context`].
/// - It must have *exactly one* field with the `#[address]` attribute. This field
///   represents the **module address**.
/// - All other fields must have either the `#[state]` or `#[module]` attribute.
///   - `#[state]` is used for state members.
///   - `#[module]` is used for module members.
///
/// The macro also implements [`Default`], which builds every state member
/// under a prefix made of the module path, the struct name and the field name.
///
/// ## Example
///
/// ```
/// use sov_modules_api::{Context, ModuleInfo, StateMap};
///
/// #[derive(ModuleInfo)]
/// struct TestModule<C: Context> {
///     #[address]
///     admin: C::Address,
///
///     #[state]
///     pub state_map: StateMap<String, u32>,
/// }
///
/// fn get_prefix<C: Context>() {
///     let test_struct = TestModule::<C>::default();
///     let prefix = test_struct.state_map.prefix();
/// }
/// ```
#[proc_macro_derive(ModuleInfo, attributes(state, module, address))]
pub fn module_info(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input);

    handle_macro_error(module_info::derive_module_info(input))
}

fn handle_macro_error(result: Result<proc_macro::TokenStream, syn::Error>) -> TokenStream {
    match result {
        Ok(ok) => ok,
        Err(err) => err.to_compile_error().into(),
    }
}
