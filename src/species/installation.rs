//! Species Installation Lifecycle
//!
//! Creates a species data directory from a genome assembly, or tears one
//! down together with its annotations on the WebApollo server.

use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::environment::{directory_name, Settings};
use crate::error::{ApolloError, Result};
use crate::execution::tools;
use crate::execution::CommandRunner;
use crate::prompt::Prompter;

/// Name of the style sheet written into each installation.
pub const STYLE_SHEET_FILE: &str = "custom.css";

/// Colors for plus/minus strand CIGAR matches.
pub const STYLE_SHEET: &str = ".plus-cigarM {
background-color: green; /* color for plus matches */
}

.minus-cigarM {
background-color: blue; /* color for minus matches */
}
";

/// Everything the curator passed on the command line.
#[derive(Debug, Clone, Default)]
pub struct InstallRequest {
    pub species: Option<String>,
    pub fasta: Option<PathBuf>,

    /// Name of the WebApollo web application on the server
    pub wa_installation: Option<String>,

    pub clean: bool,
}

/// What a successful run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    Created { path: PathBuf },
    Removed { path: PathBuf },

    /// Cleanup was declined, or nothing was touched in a dry run
    Unchanged,
}

/// Provisions and removes species installations.
pub struct SpeciesManager<'a> {
    settings: &'a Settings,
    runner: &'a mut dyn CommandRunner,
    prompter: &'a mut dyn Prompter,
    dry_run: bool,
}

impl<'a> SpeciesManager<'a> {
    pub fn new(
        settings: &'a Settings,
        runner: &'a mut dyn CommandRunner,
        prompter: &'a mut dyn Prompter,
    ) -> Self {
        Self {
            settings,
            runner,
            prompter,
            dry_run: false,
        }
    }

    /// Skips directory creation, style sheet writing and tree removal.
    pub fn set_dry_run(&mut self, dry_run: bool) {
        self.dry_run = dry_run;
    }

    /// Validates the request and creates or cleans the installation.
    pub fn run(&mut self, request: &InstallRequest) -> Result<InstallOutcome> {
        let species = request
            .species
            .as_deref()
            .ok_or(ApolloError::MissingArgument("species name"))?;
        let species = directory_name("species name", species)?;
        let installation = request
            .wa_installation
            .as_deref()
            .ok_or(ApolloError::MissingArgument("WebApollo installation name"))?;

        if request.clean {
            return self.clean(species, installation);
        }

        let fasta = request
            .fasta
            .as_deref()
            .ok_or(ApolloError::MissingArgument("genome sequence"))?;

        self.create(species, fasta)
    }

    fn create(&mut self, species: &str, fasta: &Path) -> Result<InstallOutcome> {
        let species_dir = self.settings.species_dir(species);
        if species_dir.is_dir() {
            return Err(ApolloError::InstallationExists {
                species: species.to_string(),
                path: species_dir,
            });
        }

        info!("Create folders for {}", organism_name(species));
        if !self.dry_run {
            fs::create_dir_all(&species_dir).map_err(|e| {
                ApolloError::io(format!("Failed to create {}", species_dir.display()), e)
            })?;
        }

        info!("Loading genome assembly");
        self.runner.run(&tools::prepare_refseqs(fasta, &species_dir));

        let style_sheet = species_dir.join(STYLE_SHEET_FILE);
        info!("Writing style sheet {}", style_sheet.display());
        if !self.dry_run {
            fs::write(&style_sheet, STYLE_SHEET).map_err(|e| {
                ApolloError::io(format!("Failed to write {}", style_sheet.display()), e)
            })?;
        }

        info!("Build Blat database");
        self.runner.run(&tools::fa_to_two_bit(fasta, &species_dir));

        if self.dry_run {
            info!("[dry-run] {} was not created", species_dir.display());
            return Ok(InstallOutcome::Unchanged);
        }

        Ok(InstallOutcome::Created { path: species_dir })
    }

    fn clean(&mut self, species: &str, installation: &str) -> Result<InstallOutcome> {
        let species_dir = self.settings.species_dir(species);

        if !self
            .prompter
            .confirm("Are you really sure to remove the species folder ? [y|n]:")?
        {
            self.prompter.say("Fine, we leave everything as it was.")?;
            return Ok(InstallOutcome::Unchanged);
        }

        info!("Cleaning database");
        let destination = self.settings.destination_url(installation);
        self.runner.run(&tools::delete_organism_annotations(
            &self.settings.delete_script,
            &destination,
            species,
        ));

        info!("Cleaning webapollo folder");
        if self.dry_run {
            info!("[dry-run] rm -Rf {}", species_dir.display());
            return Ok(InstallOutcome::Unchanged);
        }

        if species_dir.exists() {
            fs::remove_dir_all(&species_dir).map_err(|e| {
                ApolloError::io(format!("Failed to remove {}", species_dir.display()), e)
            })?;
        } else {
            warn!("{} does not exist; nothing to remove", species_dir.display());
        }

        info!("Cleaning finished");
        Ok(InstallOutcome::Removed { path: species_dir })
    }
}

/// Display name for a species: `acme_bug` becomes `Acme bug`.
pub fn organism_name(species: &str) -> String {
    let first = species.split('_').next().unwrap_or_default();
    let last = species.rsplit('_').next().unwrap_or_default();

    let mut chars = first.chars();
    let genus = match chars.next() {
        Some(c) => c.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    };

    format!("{} {}", genus, last)
}
