//! Document assembly: the rendered pipeline file and the README header.

pub mod header;
pub mod pipeline;

pub use header::{render_header, replace_header, Badge, HEADER_BEGIN, HEADER_END};
pub use pipeline::{render, Generator};
