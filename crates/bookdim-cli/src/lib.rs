//! CLI library components for the book dimension pipeline.

pub mod logging;
pub mod pipeline;
