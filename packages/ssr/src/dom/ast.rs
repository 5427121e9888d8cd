//! HTML AST node definitions
//!
//! Every node carries byte-offset spans into the source it was parsed
//! from; the streaming renderer re-emits the source through those
//! offsets rather than serializing the tree.

use crate::parse_util::Span;

/// Node type union
#[derive(Debug, Clone)]
pub enum Node {
    Element(Element),
    Text(Text),
    Comment(Comment),
}

impl Node {
    pub fn source_span(&self) -> Span {
        match self {
            Node::Element(e) => e.source_span,
            Node::Text(t) => t.source_span,
            Node::Comment(c) => c.source_span,
        }
    }

    /// Child list; empty for anything that cannot have children.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Element(e) => &e.children,
            _ => &[],
        }
    }
}

/// Element node
#[derive(Debug, Clone)]
pub struct Element {
    pub name: String,
    pub attrs: Vec<Attribute>,
    pub children: Vec<Node>,
    pub is_self_closing: bool,
    pub is_void: bool,
    /// Whole element, `<` of the open tag through `>` of the close tag.
    pub source_span: Span,
    /// Open tag only, `<` through its `>`.
    pub start_source_span: Span,
}

/// Attribute node
#[derive(Debug, Clone)]
pub struct Attribute {
    pub name: String,
    /// Raw value text, without quotes. Empty for bare attributes.
    pub value: String,
    /// From the first whitespace character before the name through the
    /// end of the value (past a closing quote). Skipping this span
    /// removes the attribute together with its leading whitespace.
    pub source_span: Span,
    /// The name itself.
    pub name_span: Span,
    /// The raw value text, inside any quotes. None for bare attributes.
    pub value_span: Option<Span>,
}

/// Text node
#[derive(Debug, Clone)]
pub struct Text {
    pub value: String,
    pub source_span: Span,
}

/// Comment node
#[derive(Debug, Clone)]
pub struct Comment {
    /// Exact text between `<!--` and `-->`, untrimmed.
    pub value: String,
    /// `<!--` through `-->` inclusive.
    pub source_span: Span,
}
