//! CI environment integration

pub mod env_file;
pub mod github;
