//! Part extraction
//!
//! Derives the ordered list of dynamic slots from a parsed template.
//! The depth-first pre-order node indexing here must be bit-identical
//! to the indexing the renderer (and ultimately the hydrating client)
//! assigns while walking the same tree, or hydration attaches to the
//! wrong nodes.

use smallvec::SmallVec;

use crate::dom::ast::Node;
use crate::template::{BOUND_ATTRIBUTE_SUFFIX, MARKER};

/// One dynamic slot in a template.
#[derive(Debug, Clone, PartialEq)]
pub enum Part {
    Node(NodePart),
    Attribute(AttributePart),
}

impl Part {
    pub fn index(&self) -> usize {
        match self {
            Part::Node(p) => p.index,
            Part::Attribute(p) => p.index,
        }
    }
}

/// A dynamic child slot, standing where a marker comment was parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodePart {
    /// Depth-first pre-order index of the marker comment.
    pub index: usize,
}

/// Binding kind, selected by the sigil on the logical attribute name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeKind {
    /// `.name` - assigned as a property on a custom-element instance.
    Property,
    /// `@name` - event listener; has no static-HTML representation.
    Event,
    /// `?name` - presence/absence of the bare attribute.
    Boolean,
    /// No sigil - plain attribute text.
    Attribute,
}

/// A dynamic attribute slot on an element.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributePart {
    /// Depth-first pre-order index of the owning element.
    pub index: usize,
    /// Logical attribute name: bound suffix and sigil stripped.
    pub name: String,
    pub kind: AttributeKind,
    /// Static text fragments around each embedded expression; the raw
    /// attribute value split on the marker sentinel.
    pub strings: SmallVec<[String; 2]>,
}

impl AttributePart {
    /// Number of expressions embedded in this attribute's value.
    pub fn expression_count(&self) -> usize {
        self.strings.len().saturating_sub(1)
    }

    /// True when the raw value is exactly one whole-value expression
    /// with no literal text around it.
    pub fn is_single_expression(&self) -> bool {
        self.strings.len() == 2 && self.strings[0].is_empty() && self.strings[1].is_empty()
    }
}

/// Strip the binding sigil off a logical attribute name.
pub fn classify_attribute(logical_name: &str) -> (AttributeKind, &str) {
    match logical_name.as_bytes().first() {
        Some(b'.') => (AttributeKind::Property, &logical_name[1..]),
        Some(b'@') => (AttributeKind::Event, &logical_name[1..]),
        Some(b'?') => (AttributeKind::Boolean, &logical_name[1..]),
        _ => (AttributeKind::Attribute, logical_name),
    }
}

/// Extract the ordered part list from a parsed template tree.
///
/// Indexing starts at -1 so the first child of the root is index 0;
/// every visited node increments the running index. A marker comment
/// records a node part at its own index and then increments the index
/// a second time, mirroring the paired open/close marker comments the
/// client renderer creates for each dynamic node slot. Attribute parts
/// take the owning element's index and consume no extra increment.
pub fn extract_parts(nodes: &[Node]) -> Vec<Part> {
    let mut parts = Vec::new();
    let mut index: isize = -1;
    visit_nodes(nodes, &mut index, &mut parts);
    parts
}

fn visit_nodes(nodes: &[Node], index: &mut isize, parts: &mut Vec<Part>) {
    for node in nodes {
        *index += 1;
        match node {
            Node::Comment(comment) if comment.value == MARKER => {
                parts.push(Part::Node(NodePart { index: *index as usize }));
                *index += 1;
            }
            Node::Element(element) => {
                for attr in &element.attrs {
                    if let Some(logical) = attr.name.strip_suffix(BOUND_ATTRIBUTE_SUFFIX) {
                        let (kind, name) = classify_attribute(logical);
                        let strings: SmallVec<[String; 2]> =
                            attr.value.split(MARKER).map(String::from).collect();
                        parts.push(Part::Attribute(AttributePart {
                            index: *index as usize,
                            name: name.to_string(),
                            kind,
                            strings,
                        }));
                    }
                }
                visit_nodes(&element.children, index, parts);
            }
            _ => {}
        }
    }
}
