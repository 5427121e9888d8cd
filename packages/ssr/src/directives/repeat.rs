//! The `repeat` directive
//!
//! Renders a sequence of values in node position. Keyed reordering is a
//! client-side concern; on the server the items simply stream in order,
//! each wrapped in its own part markers.

use std::rc::Rc;

use crate::directive::Directive;
use crate::error::RenderError;
use crate::render::context::RenderContext;
use crate::render::value::Value;

pub struct Repeat {
    items: Vec<Value>,
}

/// Map `items` through `template` and render the results in order.
pub fn repeat<T, F>(items: impl IntoIterator<Item = T>, template: F) -> Rc<dyn Directive>
where
    F: Fn(&T, usize) -> Value,
{
    let items = items
        .into_iter()
        .enumerate()
        .map(|(i, item)| template(&item, i))
        .collect();
    Rc::new(Repeat { items })
}

impl Directive for Repeat {
    fn kind(&self) -> &'static str {
        "repeat"
    }

    fn resolve(&self, _ctx: &RenderContext) -> Result<Value, RenderError> {
        Ok(Value::List(self.items.clone()))
    }
}
