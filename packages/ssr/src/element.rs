//! Custom elements and attribute reflection
//!
//! The registry mapping hyphenated tag names to constructors, plus the
//! reflected-attribute lookup, both consumed by the renderer as
//! collaborator inputs. A registry is passed into each render call
//! explicitly rather than living in process-global state.

use std::collections::HashMap;
use std::fmt;

use crate::render::value::Value;
use crate::template::result::TemplateResult;

/// A server-side custom element instance.
///
/// Property bindings are assigned before `render` is called; the
/// instance's own template result is then streamed into the output in
/// place, by the same algorithm as the enclosing template.
pub trait CustomElement {
    fn set_property(&mut self, name: &str, value: Value);
    fn render(&self) -> TemplateResult;
}

/// Constructor failure. Construction errors never abort a render: the
/// element degrades to a non-custom one.
#[derive(Debug)]
pub struct ConstructError(pub String);

impl fmt::Display for ConstructError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

type Constructor = Box<dyn Fn() -> Result<Box<dyn CustomElement>, ConstructError>>;

/// Tag-name -> constructor registry with the reflected-attribute
/// lookup table `(tag, property) -> attribute`.
#[derive(Default)]
pub struct CustomElementRegistry {
    constructors: HashMap<String, Constructor>,
    reflections: HashMap<(String, String), String>,
}

impl CustomElementRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a constructor for a tag name.
    pub fn define<F>(&mut self, tag_name: &str, constructor: F)
    where
        F: Fn() -> Result<Box<dyn CustomElement>, ConstructError> + 'static,
    {
        self.constructors
            .insert(tag_name.to_ascii_lowercase(), Box::new(constructor));
    }

    /// Declare that assigning `property` on `tag_name` also reflects as
    /// the attribute `attribute` in server output.
    pub fn reflect(&mut self, tag_name: &str, property: &str, attribute: &str) {
        self.reflections.insert(
            (tag_name.to_ascii_lowercase(), property.to_string()),
            attribute.to_string(),
        );
    }

    pub fn is_defined(&self, tag_name: &str) -> bool {
        self.constructors.contains_key(&tag_name.to_ascii_lowercase())
    }

    /// Construct an instance for a tag; `None` when the tag is not
    /// registered.
    pub fn construct(
        &self,
        tag_name: &str,
    ) -> Option<Result<Box<dyn CustomElement>, ConstructError>> {
        self.constructors
            .get(&tag_name.to_ascii_lowercase())
            .map(|ctor| ctor())
    }

    /// Reflected attribute name for `(tag, property)`, if any.
    pub fn reflected_attribute(&self, tag_name: &str, property: &str) -> Option<&str> {
        self.reflections
            .get(&(tag_name.to_ascii_lowercase(), property.to_string()))
            .map(String::as_str)
    }
}
