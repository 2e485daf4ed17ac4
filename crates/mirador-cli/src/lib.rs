//! Library components of the `mirador` command line tool.

pub mod logging;
pub mod pipeline;
