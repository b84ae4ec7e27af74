//! Procedural macros for tui-kit

use darling::{FromDeriveInput, FromVariant};
use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, DeriveInput};

/// Container-level attributes for #[derive(Action)]
#[derive(Debug, FromDeriveInput)]
#[darling(attributes(action), supports(enum_any))]
struct ActionOpts {
    ident: syn::Ident,
    generics: syn::Generics,
    data: darling::ast::Data<ActionVariant, ()>,

    /// Derive categories from variant name prefixes
    #[darling(default)]
    infer_categories: bool,
}

/// Variant-level attributes
#[derive(Debug, FromVariant)]
#[darling(attributes(action))]
struct ActionVariant {
    ident: syn::Ident,
    fields: darling::ast::Fields<()>,

    /// Explicit category override
    #[darling(default)]
    category: Option<String>,

    /// Exclude from category inference
    #[darling(default)]
    skip_category: bool,
}

// Verbs that end an action name; everything before the verb is the category.
// Nouns like "Panel" or "Range" must not be listed here.
const ACTION_VERBS: &[&str] = &[
    "Open", "Close", "Toggle", "Submit", "Confirm", "Cancel", "Commit", "Set", "Clear", "Change",
    "Select", "Pick", "Press", "Focus", "Blur", "Show", "Hide", "Move", "Next", "Prev", "Reset",
    "Hover", "Scroll",
];

fn split_pascal_case(s: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();

    for ch in s.chars() {
        if ch.is_uppercase() && !current.is_empty() {
            parts.push(std::mem::take(&mut current));
        }
        current.push(ch);
    }
    if !current.is_empty() {
        parts.push(current);
    }
    parts
}

fn to_snake_case(parts: &[String]) -> String {
    parts
        .iter()
        .map(|p| p.to_lowercase())
        .collect::<Vec<_>>()
        .join("_")
}

/// `DueDateSet` -> `due_date`, `MenuItemSelect` -> `menu_item`.
/// Names starting with a verb or containing none are uncategorized.
fn infer_category(name: &str) -> Option<String> {
    let parts = split_pascal_case(name);
    if parts.len() < 2 || ACTION_VERBS.contains(&parts[0].as_str()) {
        return None;
    }
    let verb_at = parts
        .iter()
        .skip(1)
        .position(|p| ACTION_VERBS.contains(&p.as_str()))?
        + 1;
    Some(to_snake_case(&parts[..verb_at]))
}

/// Derive macro for the Action trait
///
/// Generates `name()` returning the variant name. Categories come from
/// `#[action(category = "...")]` on a variant, or from the variant name's
/// prefix when the enum has `#[action(infer_categories)]`.
///
/// # Example
/// ```ignore
/// #[derive(Action, Clone, Debug)]
/// #[action(infer_categories)]
/// enum AppAction {
///     DueDateSet(Option<i64>),
///     StayRangeSet(Option<i64>, Option<i64>),
///     #[action(category = "app")]
///     Quit,
/// }
///
/// assert_eq!(AppAction::DueDateSet(None).name(), "DueDateSet");
/// assert_eq!(AppAction::DueDateSet(None).category(), Some("due_date"));
/// ```
#[proc_macro_derive(Action, attributes(action))]
pub fn derive_action(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let opts = match ActionOpts::from_derive_input(&input) {
        Ok(opts) => opts,
        Err(e) => return e.write_errors().into(),
    };

    let name = &opts.ident;
    let (impl_generics, ty_generics, where_clause) = opts.generics.split_for_impl();

    let variants = match &opts.data {
        darling::ast::Data::Enum(variants) => variants,
        _ => {
            return syn::Error::new_spanned(&input, "Action can only be derived for enums")
                .to_compile_error()
                .into();
        }
    };

    let pattern = |v: &ActionVariant| {
        let variant_name = &v.ident;
        match &v.fields.style {
            darling::ast::Style::Unit => quote! { #name::#variant_name },
            darling::ast::Style::Tuple => quote! { #name::#variant_name(..) },
            darling::ast::Style::Struct => quote! { #name::#variant_name { .. } },
        }
    };

    let name_arms = variants.iter().map(|v| {
        let pat = pattern(v);
        let variant_str = v.ident.to_string();
        quote! { #pat => #variant_str }
    });

    let category_arms = variants.iter().map(|v| {
        let pat = pattern(v);
        let category = if v.skip_category {
            None
        } else if let Some(explicit) = &v.category {
            Some(explicit.clone())
        } else if opts.infer_categories {
            infer_category(&v.ident.to_string())
        } else {
            None
        };
        match category {
            Some(c) => quote! { #pat => ::core::option::Option::Some(#c) },
            None => quote! { #pat => ::core::option::Option::None },
        }
    });

    let expanded = quote! {
        impl #impl_generics tui_kit::Action for #name #ty_generics #where_clause {
            fn name(&self) -> &'static str {
                match self {
                    #(#name_arms),*
                }
            }

            fn category(&self) -> ::core::option::Option<&'static str> {
                match self {
                    #(#category_arms),*
                }
            }
        }
    };

    TokenStream::from(expanded)
}
