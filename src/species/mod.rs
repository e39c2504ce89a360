//! Species Installation Module
//!
//! Provisioning and teardown of per-species browser data directories.

pub mod installation;

pub use installation::{organism_name, InstallOutcome, InstallRequest, SpeciesManager};
