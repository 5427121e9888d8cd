//! HTML parsing capability
//!
//! A small HTML parser producing a tree annotated with byte-offset
//! spans. The renderer only consumes the AST and the spans; it never
//! looks at tokenizer internals, so this module stays behind the
//! `parse` entry point.

pub mod ast;
pub mod lexer;
pub mod parser;
pub mod tags;

pub use ast::{Attribute, Comment, Element, Node, Text};
pub use parser::{parse, ParseResult};
