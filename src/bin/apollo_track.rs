//! Track Management Tool
//!
//! Loads an annotation file as a typed track into a species installation,
//! or removes a track by label.
//!
//! # Usage
//!
//! ```bash
//! # Load a gene set, choosing the type interactively
//! apollo-track -s acme_bug -i genes.gff3 -c genes -l geneset1
//!
//! # Same, pre-selecting menu entry 3 (gene)
//! apollo-track -s acme_bug -i genes.gff3 -c genes -l geneset1 -d 3
//!
//! # Remove the track again
//! apollo-track -s acme_bug -l geneset1 --remove
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use colored::Colorize;
use log::info;

use apollo_admin::execution::{CommandRunner, DryRunRunner, SystemRunner};
use apollo_admin::prompt::TerminalPrompter;
use apollo_admin::track::{TrackHelper, TrackOutcome, TrackRequest};
use apollo_admin::{setup_logging, ApolloError, Settings, APP_NAME, VERSION};

/// Add or remove an annotation track of a WebApollo species installation
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Annotation file (GFF3) to load
    #[arg(short, long)]
    infile: Option<PathBuf>,

    /// Remove the track, requires species (-s) and label (-l)
    #[arg(short, long)]
    remove: bool,

    /// Name of the species
    #[arg(short, long)]
    species: Option<String>,

    /// Track category
    #[arg(short, long)]
    category: Option<String>,

    /// Track label
    #[arg(short, long)]
    label: Option<String>,

    /// Output directory for the converted track
    #[arg(short, long)]
    outfile: Option<PathBuf>,

    /// Name of the WebApollo installation on the server
    #[arg(short = 'w', long = "wa_installation")]
    wa_installation: Option<String>,

    /// Menu number of the track type, skipping the interactive selection
    #[arg(short, long)]
    direct: Option<usize>,

    /// Log external commands instead of running them
    #[arg(long)]
    dry_run: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn into_request(self) -> TrackRequest {
        TrackRequest {
            infile: self.infile,
            species: self.species,
            category: self.category,
            label: self.label,
            outfile: self.outfile,
            remove: self.remove,
            direct: self.direct,
            wa_installation: self.wa_installation,
        }
    }
}

/// Prints the application banner with version information.
fn print_banner() {
    println!();
    println!("{}", format!("{} v{}", APP_NAME, VERSION).bold());
    println!("Track manager");
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

    let outcome = TrackHelper::new(&settings, runner.as_mut(), &mut prompter)
        .run(&args.into_request())?;

    match outcome {
        TrackOutcome::Loaded { label, track_type } => {
            info!("Track {} loaded as {}", label, track_type)
        }
        TrackOutcome::Removed { label } => info!("Track {} removed", label),
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
