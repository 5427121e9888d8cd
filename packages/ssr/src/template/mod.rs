//! Template structure: static-fragment identity, prepared HTML,
//! part extraction and the process-wide parse cache.

pub mod digest;
pub mod parts;
pub mod registry;
pub mod result;

pub use parts::{AttributeKind, AttributePart, NodePart, Part};
pub use registry::{get_or_parse, ParsedTemplate};
pub use result::{get_template_html, TemplateResult, TemplateStrings};

/// Marker sentinel. Comment text for a dynamic node slot, and the
/// substring standing in for an embedded expression inside a bound
/// attribute's value. Deterministic: this crate owns both template
/// preparation and rendering, and stable digests matter more than
/// collision hardening against hand-written lookalike text.
pub const MARKER: &str = "{{lit-ssr}}";

/// What template preparation inserts at a text-position expression.
pub const NODE_MARKER: &str = "<!--{{lit-ssr}}-->";

/// Suffix appended to an attribute name to mark it as bound.
pub const BOUND_ATTRIBUTE_SUFFIX: &str = "$lit$";
