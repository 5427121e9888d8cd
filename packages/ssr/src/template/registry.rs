//! Template registry
//!
//! Process-wide, content-addressed cache of parsed template structure.
//! A template identity is parsed exactly once in the common case; two
//! first-use races may both parse, producing value-identical results,
//! and the cache keeps the most recent write. There is no eviction:
//! the cache is bounded by the number of distinct template literals
//! compiled into the program and lives for the process lifetime.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use once_cell::sync::Lazy;

use crate::dom;
use crate::dom::ast::Node;
use crate::error::RenderError;
use crate::template::parts::{extract_parts, Part};
use crate::template::result::{get_template_html, TemplateStrings};

/// Cached parse of a template's static shape. Immutable after creation.
#[derive(Debug)]
pub struct ParsedTemplate {
    /// Prepared HTML source (static fragments joined with markers).
    pub html: String,
    /// Parsed tree with byte-offset spans into `html`.
    pub ast: Vec<Node>,
    /// Ordered dynamic slots, document order.
    pub parts: Vec<Part>,
}

static CACHE: Lazy<RwLock<HashMap<TemplateStrings, Arc<ParsedTemplate>>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// Look up or parse the static structure for a template identity.
///
/// Template HTML comes from compiled template literals, so a parse
/// error is a programmer error and fatal for the template.
pub fn get_or_parse(strings: &TemplateStrings) -> Result<Arc<ParsedTemplate>, RenderError> {
    if let Some(cached) = CACHE
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(strings)
    {
        return Ok(Arc::clone(cached));
    }

    let html = get_template_html(strings);
    let parsed = dom::parse(&html);
    if let Some(error) = parsed.errors.first() {
        return Err(RenderError::TemplateParse(error.to_string()));
    }
    let parts = extract_parts(&parsed.root_nodes);
    log::trace!("parsed template ({} bytes, {} parts)", html.len(), parts.len());

    let template = Arc::new(ParsedTemplate { html, ast: parsed.root_nodes, parts });
    CACHE
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .insert(strings.clone(), Arc::clone(&template));
    Ok(template)
}
