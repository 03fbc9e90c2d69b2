//! Utility functions

use serde::Serialize;

/// Version information for the CLI
#[derive(Debug, Clone, Serialize)]
pub struct VersionInfo {
    pub version: String,
    pub git_hash: String,
    pub build_time: String,
}

/// Get version information
pub fn version_info() -> VersionInfo {
    VersionInfo {
        version: env!("CARGO_PKG_VERSION").to_string(),
        git_hash: option_env!("GIT_HASH").unwrap_or("unknown").to_string(),
        build_time: option_env!("BUILD_TIME").unwrap_or("unknown").to_string(),
    }
}

/// User agent sent with every request
pub fn user_agent() -> String {
    format!("watchly-cli/{}", env!("CARGO_PKG_VERSION"))
}

/// Current time as an RFC 3339 UTC timestamp with second precision
pub fn now_rfc3339() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
}
