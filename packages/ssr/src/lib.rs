#![deny(clippy::all)]

/**
 * Streaming server-side renderer for tagged HTML templates
 *
 * Templates are parsed once per unique string set, cached globally, and
 * rendered as lazy chunk streams with hydration markers for the client
 * renderer to attach to.
 */

pub mod chars;
pub mod directive;
pub mod directives;
pub mod dom;
pub mod element;
pub mod error;
pub mod parse_util;
pub mod render;
pub mod template;

pub use directive::Directive;
pub use directives::{class_map, repeat};
pub use element::{ConstructError, CustomElement, CustomElementRegistry};
pub use error::RenderError;
pub use render::{render, render_to_string, RenderContext, RenderStream, Value};
pub use template::{TemplateResult, TemplateStrings};
