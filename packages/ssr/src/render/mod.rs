//! Streaming renderer
//!
//! Pull-based rendering of values and template results into HTML text
//! chunks, with the hydration markers the client renderer attaches to.

pub mod context;
pub mod stream;
pub mod value;

pub use context::{ComponentFrame, RenderContext};
pub use stream::{render, render_to_string, RenderStream};
pub use value::Value;
