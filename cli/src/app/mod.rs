//! Application configuration and command-line surface

pub mod cli;
pub mod options;
