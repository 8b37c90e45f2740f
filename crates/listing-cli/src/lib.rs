//! CLI library components for the listing audit.

pub mod logging;
pub mod pipeline;
