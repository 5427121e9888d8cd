//! Render errors
//!
//! Every failure here is either a template-authoring mistake or an
//! internal consistency bug; none are transient, so nothing is retried.
//! Custom-element construction failures are deliberately absent: they
//! are logged and the element degrades to a non-custom one.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    /// The template's prepared HTML did not parse cleanly.
    #[error("template parse error: {0}")]
    TemplateParse(String),

    /// A `?attr` binding must be a single whole-value expression with
    /// no literal text around it.
    #[error("boolean attribute binding `?{name}` must be a single whole-value expression")]
    BooleanAttributeSyntax { name: String },

    /// The template's shape and its value list disagree; extraction and
    /// rendering lost synchronization somewhere upstream.
    #[error("template consumed {consumed} values but {provided} were provided")]
    ValueCountMismatch { consumed: usize, provided: usize },

    /// A directive refused to produce output where it was placed.
    #[error("directive error: {0}")]
    Directive(String),

    /// Traversal bookkeeping broke an invariant. Always a bug in this
    /// crate, never in the caller's template.
    #[error("internal render error: {0}")]
    Internal(String),
}
