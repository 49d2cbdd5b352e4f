use proc_macro2::{self, Ident, Span};
use syn::{DataStruct, DeriveInput, ImplGenerics, PathArguments, TypeGenerics, WhereClause};

use crate::common::get_generics_type_param;

#[derive(Clone)]
struct StructNamedField {
    ident: proc_macro2::Ident,
    ty: syn::Type,
}

// Imported modules build their own prefixes, only state members get one here.
#[derive(Clone)]
enum FieldKind {
    Address(StructNamedField),
    State(StructNamedField),
    Module(StructNamedField),
}

struct StructDef<'a> {
    ident: proc_macro2::Ident,
    impl_generics: ImplGenerics<'a>,
    type_generics: TypeGenerics<'a>,
    generic_param: &'a Ident,
    fields: Vec<FieldKind>,
    where_clause: Option<&'a WhereClause>,
}

pub(crate) fn derive_module_info(
    input: DeriveInput,
) -> Result<proc_macro::TokenStream, syn::Error> {
    let DeriveInput {
        data,
        ident,
        generics,
        ..
    } = input;

    let generic_param = get_generics_type_param(&generics, Span::call_site())?;

    let (impl_generics, type_generics, where_clause) = generics.split_for_impl();
    let fields = get_fields_from_struct(&data)?;

    let struct_def = StructDef {
        ident,
        fields,
        impl_generics,
        type_generics,
        generic_param: &generic_param,
        where_clause,
    };

    let impl_prefix_functions = struct_def.impl_prefix_functions();
    let impl_module_info = struct_def.impl_module_info()?;

    Ok(quote::quote! {
        #impl_prefix_functions

        #impl_module_info
    }
    .into())
}

impl<'a> StructDef<'a> {
    // One prefix function per state member.
    fn impl_prefix_functions(&self) -> proc_macro2::TokenStream {
        let impl_prefix_functions = self.fields.iter().filter_map(|field| match field {
            FieldKind::State(field) => Some(make_prefix_func(field, &self.ident)),
            FieldKind::Module(_) | FieldKind::Address(_) => None,
        });

        let impl_generics = &self.impl_generics;
        let ident = &self.ident;
        let ty_generics = &self.type_generics;
        let where_clause = self.where_clause;

        quote::quote! {
            impl #impl_generics #ident #ty_generics #where_clause{
                #(#impl_prefix_functions)*
            }
        }
    }

    // Implements `Default` and `ModuleInfo`.
    fn impl_module_info(&self) -> Result<proc_macro2::TokenStream, syn::Error> {
        let type_generics = &self.type_generics;

        let mut impl_self_init = Vec::default();
        let mut impl_self_body = Vec::default();
        let mut modules = Vec::default();

        let mut module_address = None;
        for field in self.fields.iter() {
            match field {
                FieldKind::State(field) => {
                    impl_self_init.push(make_init_state(field)?);
                    impl_self_body.push(&field.ident);
                }
                FieldKind::Module(field) => {
                    impl_self_init.push(make_init_module(field));
                    impl_self_body.push(&field.ident);
                    modules.push(&field.ident);
                }
                FieldKind::Address(field) => {
                    impl_self_init.push(make_init_address(
                        field,
                        &self.ident,
                        module_address,
                        self.generic_param,
                    )?);
                    impl_self_body.push(&field.ident);
                    module_address = Some(&field.ident);
                }
            };
        }

        let generic_param = self.generic_param;
        let impl_generics = &self.impl_generics;
        let ident = &self.ident;
        let where_clause = self.where_clause;

        let fn_address = make_fn_address(module_address)?;
        let fn_dependencies = make_fn_dependencies(modules);

        Ok(quote::quote! {
            impl #impl_generics ::std::default::Default for #ident #type_generics #where_clause{

                fn default() -> Self {
                    #(#impl_self_init)*

                    Self{
                        #(#impl_self_body),*
                    }
                }
            }

            impl #impl_generics ::sov_modules_api::ModuleInfo for #ident #type_generics #where_clause{
                type Context = #generic_param;

                #fn_address

                #fn_dependencies
            }
        })
    }
}

fn get_fields_from_struct(data: &syn::Data) -> Result<Vec<FieldKind>, syn::Error> {
    match data {
        syn::Data::Struct(data_struct) => get_fields_from_data_struct(data_struct),
        syn::Data::Enum(en) => Err(syn::Error::new_spanned(
            en.enum_token,
            "The `ModuleInfo` macro supports structs only.",
        )),
        syn::Data::Union(un) => Err(syn::Error::new_spanned(
            un.union_token,
            "The `ModuleInfo` macro supports structs only.",
        )),
    }
}

fn get_fields_from_data_struct(data_struct: &DataStruct) -> Result<Vec<FieldKind>, syn::Error> {
    let mut output_fields = Vec::default();

    for original_field in data_struct.fields.iter() {
        let field_ident = original_field.ident.as_ref().ok_or_else(|| {
            syn::Error::new_spanned(
                original_field,
                "The `ModuleInfo` macro supports structs only, unnamed fields witnessed.",
            )
        })?;

        let field = StructNamedField {
            ident: field_ident.clone(),
            ty: original_field.ty.clone(),
        };

        let mut kind = None;
        for attribute in &original_field.attrs {
            let next = if attribute.path.is_ident("state") {
                FieldKind::State(field.clone())
            } else if attribute.path.is_ident("module") {
                FieldKind::Module(field.clone())
            } else if attribute.path.is_ident("address") {
                FieldKind::Address(field.clone())
            } else if attribute.path.is_ident("doc") {
                continue;
            } else {
                return Err(syn::Error::new_spanned(
                    field_ident,
                    "Only `#[module]`, `#[state]` or `#[address]` attributes are supported.",
                ));
            };

            if kind.replace(next).is_some() {
                return Err(syn::Error::new_spanned(
                    field_ident,
                    "A field can carry only one of `#[module]`, `#[state]` or `#[address]`.",
                ));
            }
        }

        match kind {
            Some(kind) => output_fields.push(kind),
            None => {
                return Err(syn::Error::new_spanned(
                    field_ident,
                    "This field is missing an attribute: add `#[module]`, `#[state]` or `#[address]`. ",
                ))
            }
        }
    }
    Ok(output_fields)
}

fn prefix_func_ident(ident: &proc_macro2::Ident) -> proc_macro2::Ident {
    syn::Ident::new(&format!("_prefix_{ident}"), ident.span())
}

fn make_prefix_func(
    field: &StructNamedField,
    module_ident: &proc_macro2::Ident,
) -> proc_macro2::TokenStream {
    let field_ident = &field.ident;
    let prefix_func_ident = prefix_func_ident(field_ident);

    // generates prefix functions:
    //   fn _prefix_field_ident() -> sov_modules_api::Prefix {
    //      let module_path = "some_module";
    //      sov_modules_api::Prefix::new_storage(module_path, module_name, field_ident)
    //   }
    quote::quote! {
        fn #prefix_func_ident() -> ::sov_modules_api::Prefix {
            let module_path = module_path!();
            ::sov_modules_api::Prefix::new_storage(module_path, stringify!(#module_ident), stringify!(#field_ident))
        }
    }
}

fn make_fn_address(
    address_ident: Option<&proc_macro2::Ident>,
) -> Result<proc_macro2::TokenStream, syn::Error> {
    match address_ident {
        Some(address_ident) => Ok(quote::quote! {
            fn address(&self) -> &<Self::Context as ::sov_modules_api::Spec>::Address {
               &self.#address_ident
            }
        }),
        None => Err(syn::Error::new(
            Span::call_site(),
            "The `ModuleInfo` macro requires `[address]` attribute.",
        )),
    }
}

fn make_fn_dependencies(modules: Vec<&proc_macro2::Ident>) -> proc_macro2::TokenStream {
    let address_tokens = modules.iter().map(|ident| {
        quote::quote! {
            ::sov_modules_api::ModuleInfo::address(&self.#ident)
        }
    });

    quote::quote! {
        fn dependencies(&self) -> ::std::vec::Vec<&<Self::Context as ::sov_modules_api::Spec>::Address> {
            ::std::vec![#(#address_tokens),*]
        }
    }
}

fn make_init_state(field: &StructNamedField) -> Result<proc_macro2::TokenStream, syn::Error> {
    let prefix_fun = prefix_func_ident(&field.ident);
    let field_ident = &field.ident;
    let ty = &field.ty;

    let ty = match ty {
        syn::Type::Path(syn::TypePath { path, .. }) if !path.segments.is_empty() => {
            let mut segments = path.segments.clone();

            // SomeType<G> => SomeType
            if let Some(last) = segments.last_mut() {
                last.arguments = PathArguments::None;
            }
            segments
        }

        _ => {
            return Err(syn::Error::new_spanned(
                ty,
                "Type not supported by the `ModuleInfo` macro",
            ));
        }
    };

    // generates code for the state initialization:
    //  let state_prefix = Self::_prefix_field_ident().into();
    //  let field_ident = path::StateType::new(state_prefix);
    Ok(quote::quote! {
        let state_prefix = Self::#prefix_fun().into();
        let #field_ident = #ty::new(state_prefix);
    })
}

fn make_init_module(field: &StructNamedField) -> proc_macro2::TokenStream {
    let field_ident = &field.ident;
    let ty = &field.ty;

    quote::quote! {
        let #field_ident = <#ty as ::std::default::Default>::default();
    }
}

fn make_init_address(
    field: &StructNamedField,
    struct_ident: &Ident,
    address: Option<&Ident>,
    generic_param: &Ident,
) -> Result<proc_macro2::TokenStream, syn::Error> {
    let field_ident = &field.ident;

    match address {
        Some(addr) => Err(syn::Error::new_spanned(
            addr,
            format!(
                "The `address` attribute is defined more than once, revisit field: {}",
                addr
            ),
        )),
        None => Ok(quote::quote! {
            let module_path = module_path!();
            let prefix = ::sov_modules_api::Prefix::new_module(module_path, stringify!(#struct_ident));
            let #field_ident : <#generic_param as ::sov_modules_api::Spec>::Address =
                <<#generic_param as ::sov_modules_api::Spec>::Address as ::std::convert::From<[u8; 32]>>::from(
                    prefix.hash::<#generic_param>()
                );
        }),
    }
}
