//! Library components of the assessment CLI.

pub mod logging;
pub mod pipeline;
