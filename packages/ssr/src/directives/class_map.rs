//! The `class_map` directive
//!
//! Attribute-position directive producing a space-joined class list
//! from name/enabled pairs. Insertion order is preserved so output is
//! deterministic.

use std::rc::Rc;

use crate::directive::Directive;
use crate::error::RenderError;
use crate::render::context::RenderContext;
use crate::render::value::Value;

pub struct ClassMap {
    classes: Vec<(String, bool)>,
}

/// Build a class-list fragment for a `class` attribute binding.
pub fn class_map<I, S>(classes: I) -> Rc<dyn Directive>
where
    I: IntoIterator<Item = (S, bool)>,
    S: Into<String>,
{
    let classes = classes
        .into_iter()
        .map(|(name, enabled)| (name.into(), enabled))
        .collect();
    Rc::new(ClassMap { classes })
}

impl Directive for ClassMap {
    fn kind(&self) -> &'static str {
        "class_map"
    }

    fn resolve(&self, _ctx: &RenderContext) -> Result<Value, RenderError> {
        Err(RenderError::Directive(
            "class_map must be used in attribute position".into(),
        ))
    }

    fn attribute_fragment(&self) -> Option<String> {
        let names: Vec<&str> = self
            .classes
            .iter()
            .filter(|(_, enabled)| *enabled)
            .map(|(name, _)| name.as_str())
            .collect();
        Some(names.join(" "))
    }
}
