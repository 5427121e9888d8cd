//! HTML tokenizer
//!
//! Converts template HTML into a flat token sequence with byte-offset
//! spans. Entities are left undecoded and line endings untouched: the
//! renderer flushes raw source text, so the tokenizer's only job is
//! structure and offsets.

use crate::chars;
use crate::dom::ast::Attribute;
use crate::dom::tags::{get_tag_content_type, is_void_element, TagContentType};
use crate::parse_util::{ParseError, Span};

/// Token union
#[derive(Debug, Clone)]
pub enum Token {
    /// Raw text run (also covers doctypes and CDATA, which the renderer
    /// flushes through verbatim).
    Text { span: Span },
    Comment { value: String, span: Span },
    /// `<` through the end of the tag name.
    TagOpenStart { name: String, span: Span },
    Attr(Attribute),
    /// `>` or `/>` terminating an open tag.
    TagOpenEnd { self_closing: bool, span: Span },
    /// `</name ... >`
    TagClose { name: String, span: Span },
}

/// Tokenization result
#[derive(Debug, Clone)]
pub struct TokenizeResult {
    pub tokens: Vec<Token>,
    pub errors: Vec<ParseError>,
}

/// Tokenize an HTML fragment.
pub fn tokenize(source: &str) -> TokenizeResult {
    let mut lexer = Lexer::new(source);
    lexer.tokenize();
    TokenizeResult { tokens: lexer.tokens, errors: lexer.errors }
}

struct Lexer<'a> {
    input: &'a str,
    pos: usize,
    tokens: Vec<Token>,
    errors: Vec<ParseError>,
}

impl<'a> Lexer<'a> {
    fn new(input: &'a str) -> Self {
        Lexer { input, pos: 0, tokens: Vec::new(), errors: Vec::new() }
    }

    fn peek(&self) -> char {
        self.input[self.pos..].chars().next().unwrap_or(chars::EOF)
    }

    fn peek_at(&self, offset: usize) -> char {
        self.input[self.pos..].chars().nth(offset).unwrap_or(chars::EOF)
    }

    fn at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn advance(&mut self) {
        if let Some(ch) = self.input[self.pos..].chars().next() {
            self.pos += ch.len_utf8();
        }
    }

    fn starts_with(&self, s: &str) -> bool {
        self.input[self.pos..].starts_with(s)
    }

    fn skip_whitespace(&mut self) {
        while chars::is_whitespace(self.peek()) && !self.at_end() {
            self.advance();
        }
    }

    fn error(&mut self, span: Span, msg: impl Into<String>) {
        self.errors.push(ParseError::new(span, msg));
    }

    fn tokenize(&mut self) {
        while !self.at_end() {
            if self.starts_with("<!--") {
                self.consume_comment();
            } else if self.starts_with("</") {
                self.consume_tag_close();
            } else if self.peek() == chars::LT && chars::is_name_start(self.peek_at(1)) {
                self.consume_tag_open();
            } else if self.starts_with("<!") {
                self.consume_markup_declaration();
            } else {
                self.consume_text();
            }
        }
    }

    /// Text up to the next markup-looking `<`.
    fn consume_text(&mut self) {
        let start = self.pos;
        loop {
            if self.at_end() {
                break;
            }
            if self.peek() == chars::LT
                && (chars::is_name_start(self.peek_at(1))
                    || self.peek_at(1) == chars::SLASH
                    || self.peek_at(1) == chars::BANG)
            {
                break;
            }
            self.advance();
        }
        if self.pos > start {
            self.tokens.push(Token::Text { span: Span::new(start, self.pos) });
        }
    }

    fn consume_comment(&mut self) {
        let start = self.pos;
        self.pos += "<!--".len();
        match self.input[self.pos..].find("-->") {
            Some(rel) => {
                let value = self.input[self.pos..self.pos + rel].to_string();
                self.pos += rel + "-->".len();
                self.tokens.push(Token::Comment { value, span: Span::new(start, self.pos) });
            }
            None => {
                let value = self.input[self.pos..].to_string();
                self.pos = self.input.len();
                let span = Span::new(start, self.pos);
                self.error(span, "unterminated comment");
                self.tokens.push(Token::Comment { value, span });
            }
        }
    }

    /// Doctypes and CDATA sections pass through as raw text.
    fn consume_markup_declaration(&mut self) {
        let start = self.pos;
        while !self.at_end() && self.peek() != chars::GT {
            self.advance();
        }
        if !self.at_end() {
            self.advance();
        } else {
            self.error(Span::new(start, self.pos), "unterminated markup declaration");
        }
        self.tokens.push(Token::Text { span: Span::new(start, self.pos) });
    }

    fn consume_name(&mut self) -> Span {
        let start = self.pos;
        while chars::is_name_char(self.peek()) && !self.at_end() {
            self.advance();
        }
        Span::new(start, self.pos)
    }

    fn consume_tag_close(&mut self) {
        let start = self.pos;
        self.pos += "</".len();
        let name_span = self.consume_name();
        let name = name_span.text(self.input).to_string();
        while !self.at_end() && self.peek() != chars::GT {
            self.advance();
        }
        if self.at_end() {
            self.error(Span::new(start, self.pos), format!("unterminated closing tag </{}", name));
        } else {
            self.advance();
        }
        self.tokens.push(Token::TagClose { name, span: Span::new(start, self.pos) });
    }

    fn consume_tag_open(&mut self) {
        let start = self.pos;
        self.advance(); // <
        let name_span = self.consume_name();
        let name = name_span.text(self.input).to_string();
        self.tokens.push(Token::TagOpenStart {
            name: name.clone(),
            span: Span::new(start, self.pos),
        });

        let mut self_closing = false;
        loop {
            let ws_start = self.pos;
            self.skip_whitespace();
            match self.peek() {
                chars::GT => {
                    let end_start = self.pos;
                    self.advance();
                    self.tokens.push(Token::TagOpenEnd {
                        self_closing: false,
                        span: Span::new(end_start, self.pos),
                    });
                    break;
                }
                chars::SLASH if self.peek_at(1) == chars::GT => {
                    let end_start = self.pos;
                    self.advance();
                    self.advance();
                    self_closing = true;
                    self.tokens.push(Token::TagOpenEnd {
                        self_closing: true,
                        span: Span::new(end_start, self.pos),
                    });
                    break;
                }
                chars::EOF => {
                    self.error(Span::new(start, self.pos), format!("unterminated open tag <{}", name));
                    self.tokens.push(Token::TagOpenEnd {
                        self_closing: false,
                        span: Span::new(self.pos, self.pos),
                    });
                    break;
                }
                _ => self.consume_attribute(ws_start),
            }
        }

        if !self_closing && !is_void_element(&name) {
            if get_tag_content_type(&name) == TagContentType::RawText {
                self.consume_raw_text(&name);
            }
        }
    }

    fn consume_attribute(&mut self, ws_start: usize) {
        let name_span = self.consume_name();
        if name_span.is_empty() {
            // Stray character inside a tag; skip it rather than loop forever.
            self.error(Span::new(self.pos, self.pos), "unexpected character in tag");
            self.advance();
            return;
        }
        let name = name_span.text(self.input).to_string();

        let after_name = self.pos;
        self.skip_whitespace();
        if self.peek() != chars::EQ {
            // Bare attribute.
            self.pos = after_name;
            self.tokens.push(Token::Attr(Attribute {
                name,
                value: String::new(),
                source_span: Span::new(ws_start, name_span.end),
                name_span,
                value_span: None,
            }));
            return;
        }
        self.advance(); // =
        self.skip_whitespace();

        let (value_span, end) = match self.peek() {
            q @ (chars::DQ | chars::SQ) => {
                self.advance();
                let value_start = self.pos;
                while !self.at_end() && self.peek() != q {
                    self.advance();
                }
                let value_end = self.pos;
                if self.at_end() {
                    self.error(
                        Span::new(name_span.start, self.pos),
                        format!("unterminated value for attribute {}", name),
                    );
                } else {
                    self.advance(); // closing quote
                }
                (Span::new(value_start, value_end), self.pos)
            }
            _ => {
                let value_start = self.pos;
                while !self.at_end()
                    && !chars::is_whitespace(self.peek())
                    && self.peek() != chars::GT
                    && !(self.peek() == chars::SLASH && self.peek_at(1) == chars::GT)
                {
                    self.advance();
                }
                (Span::new(value_start, self.pos), self.pos)
            }
        };

        self.tokens.push(Token::Attr(Attribute {
            name,
            value: value_span.text(self.input).to_string(),
            source_span: Span::new(ws_start, end),
            name_span,
            value_span: Some(value_span),
        }));
    }

    /// Raw-text content runs to the matching close tag, markup and all.
    fn consume_raw_text(&mut self, tag_name: &str) {
        let start = self.pos;
        let needle = format!("</{}", tag_name.to_ascii_lowercase());
        let haystack = self.input[self.pos..].to_ascii_lowercase();
        let end = haystack.find(&needle).map(|rel| self.pos + rel).unwrap_or(self.input.len());
        if end > start {
            self.tokens.push(Token::Text { span: Span::new(start, end) });
        }
        self.pos = end;
    }
}
