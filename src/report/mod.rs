//! One-shot renderings of a view: terminal text and a static HTML page.

pub mod format;
pub mod html;

pub use format::{format_selection, format_view};
