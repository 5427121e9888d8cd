//! HTML tree builder
//!
//! Assembles lexer tokens into a node tree, auto-closing void and
//! unterminated elements and collecting errors for anything that does
//! not match up.

use crate::dom::ast::{Attribute, Comment, Element, Node, Text};
use crate::dom::lexer::{tokenize, Token};
use crate::dom::tags::is_void_element;
use crate::parse_util::{ParseError, Span};

/// Parse tree result
#[derive(Debug, Clone)]
pub struct ParseResult {
    pub root_nodes: Vec<Node>,
    pub errors: Vec<ParseError>,
}

/// Parse an HTML fragment into a tree with byte-offset spans.
pub fn parse(source: &str) -> ParseResult {
    let lexed = tokenize(source);
    let mut builder = TreeBuilder::new(source);
    builder.errors = lexed.errors;
    for token in lexed.tokens {
        builder.push_token(token);
    }
    builder.finish()
}

/// An open element still waiting for its closing tag.
struct OpenElement {
    name: String,
    attrs: Vec<Attribute>,
    children: Vec<Node>,
    start: usize,
    start_source_span: Span,
}

struct TreeBuilder<'a> {
    source: &'a str,
    roots: Vec<Node>,
    stack: Vec<OpenElement>,
    /// Open tag currently being assembled from start/attr/end tokens.
    pending: Option<OpenElement>,
    errors: Vec<ParseError>,
}

impl<'a> TreeBuilder<'a> {
    fn new(source: &'a str) -> Self {
        TreeBuilder {
            source,
            roots: Vec::new(),
            stack: Vec::new(),
            pending: None,
            errors: Vec::new(),
        }
    }

    fn add_node(&mut self, node: Node) {
        match self.stack.last_mut() {
            Some(open) => open.children.push(node),
            None => self.roots.push(node),
        }
    }

    fn push_token(&mut self, token: Token) {
        match token {
            Token::Text { span } => {
                let value = span.text(self.source).to_string();
                self.add_node(Node::Text(Text { value, source_span: span }));
            }
            Token::Comment { value, span } => {
                self.add_node(Node::Comment(Comment { value, source_span: span }));
            }
            Token::TagOpenStart { name, span } => {
                self.pending = Some(OpenElement {
                    name,
                    attrs: Vec::new(),
                    children: Vec::new(),
                    start: span.start,
                    start_source_span: span,
                });
            }
            Token::Attr(attr) => {
                if let Some(pending) = self.pending.as_mut() {
                    pending.attrs.push(attr);
                } else {
                    self.errors.push(ParseError::new(attr.source_span, "attribute outside of a tag"));
                }
            }
            Token::TagOpenEnd { self_closing, span } => {
                let Some(mut pending) = self.pending.take() else {
                    self.errors.push(ParseError::new(span, "unexpected end of open tag"));
                    return;
                };
                pending.start_source_span = Span::new(pending.start, span.end);
                let is_void = is_void_element(&pending.name);
                if self_closing || is_void {
                    let element = close_element(pending, span.end, self_closing, is_void);
                    self.add_node(Node::Element(element));
                } else {
                    self.stack.push(pending);
                }
            }
            Token::TagClose { name, span } => {
                let matches = self
                    .stack
                    .last()
                    .map(|open| open.name.eq_ignore_ascii_case(&name))
                    .unwrap_or(false);
                if !matches {
                    self.errors.push(ParseError::new(
                        span,
                        format!("unexpected closing tag </{}>", name),
                    ));
                } else if let Some(open) = self.stack.pop() {
                    let element = close_element(open, span.end, false, false);
                    self.add_node(Node::Element(element));
                }
            }
        }
    }

    fn finish(mut self) -> ParseResult {
        while let Some(open) = self.stack.pop() {
            self.errors.push(ParseError::new(
                open.start_source_span,
                format!("unclosed tag <{}>", open.name),
            ));
            let element = close_element(open, self.source.len(), false, false);
            self.add_node(Node::Element(element));
        }
        ParseResult { root_nodes: self.roots, errors: self.errors }
    }
}

fn close_element(open: OpenElement, end: usize, is_self_closing: bool, is_void: bool) -> Element {
    Element {
        name: open.name,
        attrs: open.attrs,
        children: open.children,
        is_self_closing,
        is_void,
        source_span: Span::new(open.start, end),
        start_source_span: open.start_source_span,
    }
}
