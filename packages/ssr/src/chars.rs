//! Character constants used by the template lexer

pub const EOF: char = '\0';
pub const TAB: char = '\t';
pub const LF: char = '\n';
pub const FF: char = '\x0C';
pub const CR: char = '\r';
pub const SPACE: char = ' ';

pub const BANG: char = '!';
pub const DQ: char = '"';
pub const SQ: char = '\'';
pub const MINUS: char = '-';
pub const SLASH: char = '/';
pub const LT: char = '<';
pub const EQ: char = '=';
pub const GT: char = '>';

/// Check if character is whitespace (HTML tag context)
pub fn is_whitespace(ch: char) -> bool {
    ch == SPACE || ch == TAB || ch == LF || ch == FF || ch == CR
}

/// Check if character can start a tag or attribute name
pub fn is_name_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_' || ch == ':' || ch == '.' || ch == '?' || ch == '@'
}

/// Check if character can continue a tag or attribute name
pub fn is_name_char(ch: char) -> bool {
    !is_whitespace(ch) && ch != SLASH && ch != GT && ch != EQ && ch != DQ && ch != SQ && ch != EOF
}
