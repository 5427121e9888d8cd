//! Per-render traversal state

use std::cell::RefCell;
use std::rc::Rc;

use crate::element::{CustomElement, CustomElementRegistry};

/// A live custom-element instance shared between the traversal that
/// assigns its properties and the child stream that renders its output.
pub type ElementInstance = Rc<RefCell<Box<dyn CustomElement>>>;

/// One entry in the component stack: a custom element the traversal is
/// currently inside of. `instance` is `None` when construction failed
/// and the element degraded to a non-custom one.
pub struct ComponentFrame {
    pub tag_name: String,
    pub instance: Option<ElementInstance>,
}

/// State for one top-level render call. Created fresh per render and
/// owned by that render's stream; never shared across renders.
pub struct RenderContext {
    registry: Rc<CustomElementRegistry>,
    stack: Vec<ComponentFrame>,
}

impl RenderContext {
    pub fn new(registry: Rc<CustomElementRegistry>) -> Self {
        RenderContext { registry, stack: Vec::new() }
    }

    pub fn registry(&self) -> &CustomElementRegistry {
        &self.registry
    }

    /// Nearest enclosing custom element, for directives that need a
    /// live instance.
    pub fn enclosing_element(&self) -> Option<&ComponentFrame> {
        self.stack.last()
    }

    pub(crate) fn push_frame(&mut self, frame: ComponentFrame) {
        self.stack.push(frame);
    }

    pub(crate) fn pop_frame(&mut self) {
        self.stack.pop();
    }
}
