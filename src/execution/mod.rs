//! Tool Execution Module
//!
//! Runs the genome browser's external helper programs.
//!
//! # Architecture
//!
//! - [`command`]: Invocation type and the runners that execute it
//! - [`tools`]: Builders for each helper program

pub mod command;
pub mod tools;

pub use command::{
    CommandRunner, DryRunRunner, RecordingRunner, SystemRunner, ToolInvocation, ToolStatus,
};
