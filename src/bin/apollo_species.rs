//! Species Installation Tool
//!
//! Builds a new WebApollo species installation from a genome assembly, or
//! removes one again.
//!
//! # Usage
//!
//! ```bash
//! # Create an installation
//! apollo-species -s acme_bug -f acme_bug.fa -w apollo
//!
//! # Remove it, including its annotations on the server
//! apollo-species -s acme_bug -w apollo --clean
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use colored::Colorize;
use log::info;

use apollo_admin::execution::{CommandRunner, DryRunRunner, SystemRunner};
use apollo_admin::prompt::TerminalPrompter;
use apollo_admin::species::{InstallOutcome, InstallRequest, SpeciesManager};
use apollo_admin::{setup_logging, ApolloError, Settings, APP_NAME, VERSION};

/// Build or remove a WebApollo species installation
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Name of the species
    #[arg(short, long)]
    species: Option<String>,

    /// Genome sequence (FASTA), required unless cleaning up
    #[arg(short, long)]
    fasta: Option<PathBuf>,

    /// Remove the species folder and its annotations
    #[arg(short, long)]
    clean: bool,

    /// Name of the WebApollo installation on the server
    #[arg(short = 'w', long = "wa_installation")]
    wa_installation: Option<String>,

    /// Log external commands instead of running them
    #[arg(long)]
    dry_run: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn into_request(self) -> InstallRequest {
        InstallRequest {
            species: self.species,
            fasta: self.fasta,
            wa_installation: self.wa_installation,
            clean: self.clean,
        }
    }
}

/// Prints the application banner with version information.
fn print_banner() {
    println!();
    println!("{}", format!("{} v{}", APP_NAME, VERSION).bold());
    println!("Species installation manager");
    println!();
}

fn run() -> Result<(), ApolloError> {
    let args = Args::parse();

    setup_logging(args.verbose);
    print_banner();

    let settings = Settings::from_env()?;

    if args.dry_run {
        info!("Mode: DRY RUN (commands will not execute)");
    }

    let mut runner: Box<dyn CommandRunner> = if args.dry_run {
        Box::new(DryRunRunner)
    } else {
        Box::new(SystemRunner)
    };
    let mut prompter = TerminalPrompter::stdio();

    let dry_run = args.dry_run;
    let mut manager = SpeciesManager::new(&settings, runner.as_mut(), &mut prompter);
    manager.set_dry_run(dry_run);

    match manager.run(&args.into_request())? {
        InstallOutcome::Created { path } => info!("Installation ready at {}", path.display()),
        InstallOutcome::Removed { path } => info!("Removed installation {}", path.display()),
        InstallOutcome::Unchanged => {}
    }

    Ok(())
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!();
            eprintln!("{} {}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}
