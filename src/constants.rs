//! Application constants and configuration

pub const API_BASE_URL: &str = "https://rickandmortyapi.com/api";
pub const APP_NAME: &str = "Character Browser";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Concurrent portrait downloads during page prefetch
pub const PORTRAIT_FETCH_LIMIT: usize = 6;
