//! Track Management Module
//!
//! Adding and removing annotation tracks of an existing species installation.
//!
//! # Structure
//!
//! - [`registry`]: Supported track types and their styling
//! - [`selection`]: Interactive track type selection
//! - [`manager`]: Request validation and converter invocation

pub mod manager;
pub mod registry;
pub mod selection;

pub use manager::{converter_invocation, TrackHelper, TrackOutcome, TrackRequest};
pub use registry::TrackType;
pub use selection::{Selection, SelectionState, TypeSelector};
