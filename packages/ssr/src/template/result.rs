//! Template results and template HTML preparation
//!
//! A `TemplateResult` is one instantiation of a template literal: the
//! identity of its static fragments plus the ordered dynamic values for
//! this instantiation. Preparation joins the static fragments with the
//! marker sentinel so the parsed shape encodes where each expression
//! was embedded.

use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::render::Value;
use crate::template::{BOUND_ATTRIBUTE_SUFFIX, MARKER, NODE_MARKER};

/// Identity of a template's static string fragments.
///
/// Two template literals with equal fragments share one identity and
/// therefore one cached parse. Cloning is cheap; equality and hashing
/// are by content.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TemplateStrings(Arc<Vec<String>>);

impl TemplateStrings {
    pub fn new(strings: Vec<String>) -> Self {
        TemplateStrings(Arc::new(strings))
    }

    pub fn from_slice(strings: &[&str]) -> Self {
        TemplateStrings(Arc::new(strings.iter().map(|s| s.to_string()).collect()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    /// Number of expression slots these fragments encode.
    pub fn expression_count(&self) -> usize {
        self.0.len().saturating_sub(1)
    }
}

/// One instantiation of a template literal.
#[derive(Debug, Clone)]
pub struct TemplateResult {
    pub strings: TemplateStrings,
    pub values: Vec<Value>,
}

impl TemplateResult {
    /// The renderer checks the `values.len() == expression_count`
    /// invariant during the render, where a mismatch is fatal.
    pub fn new(strings: TemplateStrings, values: Vec<Value>) -> Self {
        TemplateResult { strings, values }
    }
}

/// Matches a trailing, still-open attribute: whitespace, a name, `=`
/// and an optional (possibly unclosed) value at the end of the scanned
/// HTML. Used to decide whether an expression boundary sits in
/// attribute position.
static LAST_ATTRIBUTE_NAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"([ \x09\x0a\x0c\x0d])([^\x00-\x1F\x7F-\x9F "'>=/]+)([ \x09\x0a\x0c\x0d]*=[ \x09\x0a\x0c\x0d]*(?:[^ \x09\x0a\x0c\x0d"'`<>=]*|"[^"]*|'[^']*))$"#,
    )
    .expect("last-attribute-name regex is valid")
});

/// Join static fragments with markers, producing the HTML source that
/// the template registry parses.
///
/// Text-position expressions become a marker comment; attribute-position
/// expressions become bare marker text inside the attribute's value,
/// with the bound-attribute suffix spliced onto the attribute name the
/// first time that attribute receives one.
pub fn get_template_html(strings: &TemplateStrings) -> String {
    let mut html = String::new();
    let last = strings.len().saturating_sub(1);
    for (i, s) in strings.iter().enumerate() {
        html.push_str(s);
        if i == last {
            break;
        }
        match LAST_ATTRIBUTE_NAME_RE.captures(&html) {
            Some(caps) => {
                if let Some(name) = caps.get(2) {
                    if !name.as_str().ends_with(BOUND_ATTRIBUTE_SUFFIX) {
                        html.insert_str(name.end(), BOUND_ATTRIBUTE_SUFFIX);
                    }
                }
                html.push_str(MARKER);
            }
            None => html.push_str(NODE_MARKER),
        }
    }
    html
}

/// Build a [`TemplateResult`] from alternating string literals and
/// `{ expr }` dynamic values, mirroring a tagged template literal:
///
/// ```
/// use lit_ssr::html;
/// let name = "World";
/// let tpl = html!("<p>Hello, " {name} "!</p>");
/// assert_eq!(tpl.values.len(), 1);
/// ```
///
/// Consecutive `{ expr }` slots are separated by an implicit empty
/// fragment; consecutive string literals are not supported (write one
/// literal instead).
#[macro_export]
macro_rules! html {
    (@done [$($s:expr,)*] [$($v:expr,)*]) => {
        $crate::TemplateResult::new(
            $crate::TemplateStrings::new(::std::vec![$($s,)*]),
            ::std::vec![$($v,)*],
        )
    };
    // After a value (or at the start): a static fragment is owed before
    // the next value, so synthesize an empty one where none is written.
    (@need_str [$($s:expr,)*] [$($v:expr,)*]) => {
        $crate::html!(@done [$($s,)* ::std::string::String::new(),] [$($v,)*])
    };
    (@need_str [$($s:expr,)*] [$($v:expr,)*] $lit:literal $($rest:tt)*) => {
        $crate::html!(@have_str [$($s,)* ::std::string::String::from($lit),] [$($v,)*] $($rest)*)
    };
    (@need_str [$($s:expr,)*] [$($v:expr,)*] { $e:expr } $($rest:tt)*) => {
        $crate::html!(@need_str
            [$($s,)* ::std::string::String::new(),]
            [$($v,)* $crate::Value::from($e),]
            $($rest)*)
    };
    (@have_str [$($s:expr,)*] [$($v:expr,)*]) => {
        $crate::html!(@done [$($s,)*] [$($v,)*])
    };
    (@have_str [$($s:expr,)*] [$($v:expr,)*] { $e:expr } $($rest:tt)*) => {
        $crate::html!(@need_str [$($s,)*] [$($v,)* $crate::Value::from($e),] $($rest)*)
    };
    () => {
        $crate::TemplateResult::new(
            $crate::TemplateStrings::new(::std::vec![::std::string::String::new()]),
            ::std::vec::Vec::new(),
        )
    };
    ($($tt:tt)+) => {
        $crate::html!(@need_str [] [] $($tt)+)
    };
}
