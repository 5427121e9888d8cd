//! Directive protocol
//!
//! A directive is a tagged, non-plain value produced by a binding
//! expression that customizes how its slot streams. The renderer
//! dispatches on the capability (the `Value::Directive` variant and the
//! methods here); adding a new directive kind means implementing this
//! trait, not teaching the renderer a new predicate.

use crate::error::RenderError;
use crate::render::context::RenderContext;
use crate::render::value::Value;

pub trait Directive {
    /// Capability tag identifying the directive kind, for diagnostics.
    fn kind(&self) -> &'static str;

    /// Node-position expansion. The returned value is rendered in the
    /// directive's place, inside the part markers already opened for
    /// this slot. The context exposes the nearest enclosing custom
    /// element for directives that need a live instance.
    fn resolve(&self, ctx: &RenderContext) -> Result<Value, RenderError>;

    /// Attribute-position fragment. Directives returning `Some` are
    /// spliced into plain-attribute concatenation instead of being
    /// stringified; `None` means the directive is node-only.
    fn attribute_fragment(&self) -> Option<String> {
        None
    }
}
