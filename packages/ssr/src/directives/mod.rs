//! Built-in directives

pub mod class_map;
pub mod repeat;

pub use class_map::{class_map, ClassMap};
pub use repeat::{repeat, Repeat};
