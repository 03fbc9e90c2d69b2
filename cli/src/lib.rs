//! Watchly CLI Library
//!
//! Reports CI/CD deployment lifecycle events to the Watchly webhook API.

pub mod app;
pub mod ci;
pub mod commands;
pub mod errors;
pub mod http;
pub mod logs;
pub mod utils;
