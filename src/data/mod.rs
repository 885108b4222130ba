//! Dataset sources.
//!
//! - `source`: resolve a URL or path and load it into a `Table`

pub mod source;

pub use source::{DEFAULT_DATA_URL, DataSource, load_table};
