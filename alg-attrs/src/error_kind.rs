//! Reading the `#[error(...)]` attribute and writing the [`ErrorKind`] methods it describes.

use proc_macro2::TokenStream as TokenStream2;
use quote::{quote, ToTokens};
use syn::{
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
    Data,
    DeriveInput,
    Expr,
    Fields,
    Ident,
    Result,
    Token,
};

/// A single `tag = expression` pair inside the attribute.
struct Tag {
    name: Ident,
    value: Expr,
}

impl Parse for Tag {
    fn parse(input: ParseStream) -> Result<Self> {
        let name = input.parse()?;
        input.parse::<Token![=]>()?;
        let value = input.parse()?;
        Ok(Self { name, value })
    }
}

/// The expressions that make up the report of an error. Missing tags fall back to the name of the
/// struct as the message, no labels and no help.
#[derive(Default)]
pub struct ReportSpec {
    message: Option<Expr>,
    labels: Option<Expr>,
    help: Option<Expr>,
}

impl Parse for ReportSpec {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut spec = ReportSpec::default();
        for Tag { name, value } in Punctuated::<Tag, Token![,]>::parse_terminated(input)? {
            let slot = match name.to_string().as_str() {
                "message" => &mut spec.message,
                "labels" => &mut spec.labels,
                "help" => &mut spec.help,
                other => {
                    let msg = format!("unknown tag `{}`", other);
                    return Err(syn::Error::new_spanned(&name, msg));
                },
            };
            if slot.replace(value).is_some() {
                let msg = format!("tag `{}` is given more than once", name);
                return Err(syn::Error::new_spanned(&name, msg));
            }
        }
        Ok(spec)
    }
}

/// A struct deriving `ErrorKind`, with its report read from the `error` attribute.
pub struct ErrorKindTarget {
    pub name: Ident,
    report: ReportSpec,
}

impl Parse for ErrorKindTarget {
    fn parse(input: ParseStream) -> Result<Self> {
        let DeriveInput { ident, attrs, data, .. } = input.parse()?;
        match data {
            Data::Struct(data) if matches!(data.fields, Fields::Unnamed(_)) => {
                let msg = "`ErrorKind` cannot be derived for tuple structs";
                return Err(syn::Error::new_spanned(&ident, msg));
            },
            Data::Struct(_) => (),
            _ => return Err(syn::Error::new_spanned(&ident, "`ErrorKind` can only be derived for structs")),
        }

        let report = match attrs.iter().find(|attr| attr.path().is_ident("error")) {
            Some(attr) => attr.parse_args()?,
            None => ReportSpec::default(),
        };
        Ok(Self { name: ident, report })
    }
}

impl ToTokens for ErrorKindTarget {
    fn to_tokens(&self, tokens: &mut TokenStream2) {
        let message = match &self.report.message {
            Some(message) => quote! { (#message).to_string() },
            None => {
                let name = self.name.to_string();
                quote! { #name.to_string() }
            },
        };
        let labels = match &self.report.labels {
            Some(labels) => quote! { #labels },
            None => quote! { ::std::vec::Vec::<::std::string::String>::new() },
        };
        let help = self.report.help.as_ref()
            .map(|help| quote! { report.set_help(#help); });

        tokens.extend(quote! {
            fn message(&self) -> ::std::string::String {
                #message
            }

            fn build_report<'a>(
                &self,
                src_id: &'a str,
                spans: &[::std::ops::Range<usize>],
            ) -> ::ariadne::Report<(&'a str, ::std::ops::Range<usize>)> {
                let offset = spans.first().map_or(0, |span| span.start);
                let mut report = ::ariadne::Report::build(::ariadne::ReportKind::Error, src_id, offset)
                    .with_message(self.message());

                // one label per span, in order; empty label text draws a bare underline
                for (text, span) in (#labels).into_iter().zip(spans) {
                    let text = text.to_string();
                    let label = ::ariadne::Label::new((src_id, span.clone()))
                        .with_color(::alg_error::EXPR);
                    report.add_label(if text.is_empty() { label } else { label.with_message(text) });
                }

                #help
                report.finish()
            }
        });
    }
}
