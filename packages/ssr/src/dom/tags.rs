//! Tag classification tables

/// Tag content types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagContentType {
    /// Children are parsed as markup.
    ParsableData,
    /// Children are raw text up to the matching close tag.
    RawText,
}

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style", "textarea", "title"];

/// Check if the tag never has children or a closing tag.
pub fn is_void_element(name: &str) -> bool {
    VOID_ELEMENTS.contains(&name.to_ascii_lowercase().as_str())
}

/// Content model for a tag's children.
pub fn get_tag_content_type(name: &str) -> TagContentType {
    if RAW_TEXT_ELEMENTS.contains(&name.to_ascii_lowercase().as_str()) {
        TagContentType::RawText
    } else {
        TagContentType::ParsableData
    }
}

/// Check if the tag name follows the custom-element naming convention
/// (a `-` separator after a leading ASCII letter).
pub fn is_custom_element_name(name: &str) -> bool {
    name.contains('-') && name.starts_with(|c: char| c.is_ascii_alphabetic())
}
