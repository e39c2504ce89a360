//! Environment Module
//!
//! Turns process environment variables into explicit runtime settings.

pub mod settings;

pub use settings::{directory_name, Settings, APOLLO_URL_VAR, DATA_DIR_VAR, DEFAULT_APOLLO_URL, HELPER_DIR_VAR};
