//! Apollo Admin - WebApollo Curator Tools
//!
//! Library behind the two command-line tools a curator uses to maintain a
//! WebApollo / JBrowse deployment: one provisions or removes a species
//! installation, the other adds or removes a single annotation track.
//!
//! # Architecture
//!
//! The library is organized into these modules:
//!
//! - [`environment`]: Runtime settings read once from the environment
//! - [`execution`]: External helper programs and the runners that call them
//! - [`prompt`]: Operator questions and answers
//! - [`species`]: Species installation lifecycle
//! - [`track`]: Track type registry, type selection, track loading
//!
//! # Example
//!
//! ```rust,no_run
//! use apollo_admin::execution::SystemRunner;
//! use apollo_admin::prompt::TerminalPrompter;
//! use apollo_admin::track::{TrackHelper, TrackRequest};
//! use apollo_admin::Settings;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let settings = Settings::from_env()?;
//!     let mut runner = SystemRunner;
//!     let mut prompter = TerminalPrompter::stdio();
//!
//!     let request = TrackRequest {
//!         infile: Some("genes.gff3".into()),
//!         species: Some("acme_bug".to_string()),
//!         category: Some("genes".to_string()),
//!         label: Some("geneset1".to_string()),
//!         direct: Some(3),
//!         ..Default::default()
//!     };
//!     TrackHelper::new(&settings, &mut runner, &mut prompter).run(&request)?;
//!     Ok(())
//! }
//! ```

pub mod environment;
pub mod error;
pub mod execution;
pub mod prompt;
pub mod species;
pub mod track;

// Re-export commonly used types
pub use environment::Settings;
pub use error::{ApolloError, Result};
pub use execution::{CommandRunner, ToolInvocation};
pub use species::SpeciesManager;
pub use track::{TrackHelper, TrackType};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = "Apollo Admin";

/// Configures the logging system with appropriate formatting.
///
/// `RUST_LOG` overrides the default level.
pub fn setup_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format(|buf, record| {
            use std::io::Write;

            match record.level() {
                log::Level::Warn | log::Level::Error => {
                    writeln!(buf, "[{}] {}", record.level(), record.args())
                }
                _ => writeln!(buf, "{}", record.args()),
            }
        })
        .init();
}
