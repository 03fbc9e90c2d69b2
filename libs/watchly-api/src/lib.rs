//! Wire models for the Watchly webhook API

pub mod models;
