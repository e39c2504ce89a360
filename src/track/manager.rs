//! Track Loading and Removal
//!
//! Validates a track request against the species installation, lets the
//! curator pick a track type, and hands the feature file to the converter.

use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::Serialize;

use super::registry::TrackType;
use super::selection::TypeSelector;
use crate::environment::{directory_name, Settings};
use crate::error::{ApolloError, Result};
use crate::execution::tools::{self, FLATFILE_TO_JSON};
use crate::execution::{CommandRunner, ToolInvocation};
use crate::prompt::Prompter;

/// Subdirectory of an installation holding one directory per track.
pub const TRACKS_DIR: &str = "tracks";

const ARROWHEAD_CLASS: &str = "trellis-arrowhead";
const CSS_CLASS: &str = "container-16px";

/// Everything the curator passed on the command line.
#[derive(Debug, Clone, Default)]
pub struct TrackRequest {
    pub infile: Option<PathBuf>,
    pub species: Option<String>,
    pub category: Option<String>,
    pub label: Option<String>,

    /// Converter output directory; defaults to the species installation
    pub outfile: Option<PathBuf>,

    pub remove: bool,

    /// 1-based menu number that bypasses interactive selection
    pub direct: Option<usize>,

    /// Accepted for symmetry with the species tool; not used for tracks
    pub wa_installation: Option<String>,
}

/// What a successful run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackOutcome {
    Removed { label: String },
    Loaded { label: String, track_type: TrackType },
}

/// Metadata attached to every loaded track.
#[derive(Serialize)]
struct TrackConfig<'a> {
    category: &'a str,
}

/// Adds or removes one track of a species installation.
pub struct TrackHelper<'a> {
    settings: &'a Settings,
    runner: &'a mut dyn CommandRunner,
    prompter: &'a mut dyn Prompter,
}

impl<'a> TrackHelper<'a> {
    pub fn new(
        settings: &'a Settings,
        runner: &'a mut dyn CommandRunner,
        prompter: &'a mut dyn Prompter,
    ) -> Self {
        Self {
            settings,
            runner,
            prompter,
        }
    }

    /// Validates the request in order and performs the removal or load.
    pub fn run(&mut self, request: &TrackRequest) -> Result<TrackOutcome> {
        let species = request
            .species
            .as_deref()
            .ok_or(ApolloError::MissingArgument("species"))?;
        let species = directory_name("species", species)?;

        let species_dir = self.settings.species_dir(species);
        if !species_dir.is_dir() {
            return Err(ApolloError::InstallationMissing {
                species: species.to_string(),
                path: species_dir,
            });
        }

        let label = request
            .label
            .as_deref()
            .ok_or(ApolloError::MissingArgument("track label"))?;
        let label = directory_name("track label", label)?;

        if let Some(installation) = &request.wa_installation {
            debug!("WebApollo installation '{}' is not used for track operations", installation);
        }

        if request.remove {
            return Ok(self.remove(&species_dir, label));
        }

        let infile = request
            .infile
            .as_deref()
            .ok_or(ApolloError::MissingArgument("track"))?;
        let category = request
            .category
            .as_deref()
            .ok_or(ApolloError::MissingArgument("category for this track"))?;

        if track_dir(&species_dir, label).is_dir() {
            return Err(ApolloError::TrackExists {
                label: label.to_string(),
                species: species.to_string(),
            });
        }

        let out_dir = request.outfile.as_deref().unwrap_or(&species_dir);
        self.load(infile, out_dir, category, label, request.direct)
    }

    fn remove(&mut self, species_dir: &Path, label: &str) -> TrackOutcome {
        info!("Removing track {} from {}", label, species_dir.display());
        self.runner.run(&tools::remove_track(species_dir, label));

        TrackOutcome::Removed {
            label: label.to_string(),
        }
    }

    fn load(
        &mut self,
        infile: &Path,
        out_dir: &Path,
        category: &str,
        label: &str,
        direct: Option<usize>,
    ) -> Result<TrackOutcome> {
        self.prompter.say("Your data:")?;
        self.prompter.say("----------")?;
        self.prompter.say(&format!("Track to load: {}", infile.display()))?;
        self.prompter.say(&format!("Track label: {}", label))?;
        self.prompter.say(&format!("Category: {}", category))?;
        self.prompter.say("Track type selection...")?;
        self.prompter.say("")?;

        let selection = TypeSelector::new(direct).run(&mut *self.prompter)?;
        let track_type = selection.track_type;

        self.prompter.say(&format!(
            "Loading track as type {}, with the label {} into the category {} of webapollo",
            track_type, label, category
        ))?;

        if selection.interactive && !self.prompter.confirm("Proceed? (Y/N)")? {
            return Err(ApolloError::Declined);
        }

        let invocation = converter_invocation(track_type, infile, out_dir, category, label)?;
        debug!("Converter call: {}", invocation);
        self.runner.run(&invocation);

        Ok(TrackOutcome::Loaded {
            label: label.to_string(),
            track_type,
        })
    }
}

/// Directory the converter creates for a track.
pub fn track_dir(species_dir: &Path, label: &str) -> PathBuf {
    species_dir.join(TRACKS_DIR).join(label)
}

/// Builds the `flatfile-to-json.pl` call for a track of the given type.
pub fn converter_invocation(
    track_type: TrackType,
    infile: &Path,
    out_dir: &Path,
    category: &str,
    label: &str,
) -> Result<ToolInvocation> {
    let config = serde_json::to_string(&TrackConfig { category })?;

    let mut invocation = ToolInvocation::new(FLATFILE_TO_JSON)
        .arg("--gff")
        .path_arg(infile)
        .arg("--out")
        .path_arg(out_dir)
        .option("--arrowheadClass", ARROWHEAD_CLASS)
        .arg("--getSubfeatures")
        .option(
            "--subfeatureClasses",
            format!("{{{}}}", track_type.formatting_profile()),
        )
        .option("--cssClass", CSS_CLASS)
        .option("--config", config);

    if let Some(feature_type) = track_type.feature_type() {
        invocation = invocation.option("--type", feature_type);
    }

    Ok(invocation.option("--trackLabel", label))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::execution::RecordingRunner;
    use crate::prompt::ScriptedPrompter;
    use crate::species::{InstallOutcome, InstallRequest, SpeciesManager};
    use crate::track::registry;
    use std::fs;
    use tempfile::{tempdir, TempDir};

    /// Converter `--subfeatureClasses` values, in menu order.
    const EXPECTED_SUBFEATURE_CLASSES: [&str; 11] = [
        r#"{"match_part": "springgreen-80pct"}"#,
        r#"{"match_part": "green-80pct"}"#,
        r#"{"wholeCDS": null, "CDS": "blueviolet-80pct", "UTR": "darkorange-60pct", "exon" : "container-100pct"}"#,
        r#"{"wholeCDS": null, "CDS": "green-80pct", "UTR": "darkorange-60pct", "exon" : "container-100pct"}"#,
        r#"{"exon": "green-80pct"}"#,
        r#"{"match_part": "blue-80pct"}"#,
        r#"{"match_part": "green-80pct"}"#,
        r#"{"exon" : "green-80pct"}"#,
        r#"{"match_part": "orange-80pct"}"#,
        r#"{"nucleotide_motif": "springgreen-80pct"}"#,
        r#"{"exon": "green-80pct"}"#,
    ];

    fn installation(species: &str) -> (TempDir, Settings) {
        let temp_dir = tempdir().unwrap();
        fs::create_dir_all(temp_dir.path().join(species)).unwrap();
        let settings = Settings::new(temp_dir.path());
        (temp_dir, settings)
    }

    fn load_request(direct: Option<usize>) -> TrackRequest {
        TrackRequest {
            infile: Some(PathBuf::from("genes.gff3")),
            species: Some("acme_bug".to_string()),
            category: Some("genes".to_string()),
            label: Some("geneset1".to_string()),
            direct,
            ..Default::default()
        }
    }

    #[test]
    fn test_missing_species() {
        let (_temp_dir, settings) = installation("acme_bug");
        let mut runner = RecordingRunner::new();
        let mut prompter = ScriptedPrompter::default();

        let request = TrackRequest {
            species: None,
            ..load_request(Some(3))
        };
        let result = TrackHelper::new(&settings, &mut runner, &mut prompter).run(&request);

        assert!(matches!(result, Err(ApolloError::MissingArgument("species"))));
        assert!(runner.invocations().is_empty());
    }

    #[test]
    fn test_installation_missing_checked_before_label() {
        let temp_dir = tempdir().unwrap();
        let settings = Settings::new(temp_dir.path());
        let mut runner = RecordingRunner::new();
        let mut prompter = ScriptedPrompter::default();

        let request = TrackRequest {
            label: None,
            ..load_request(Some(3))
        };
        let result = TrackHelper::new(&settings, &mut runner, &mut prompter).run(&request);

        assert!(matches!(result, Err(ApolloError::InstallationMissing { .. })));
        assert!(runner.invocations().is_empty());
        assert!(prompter.transcript().is_empty());
        assert!(!temp_dir.path().join("acme_bug").exists());
    }

    #[test]
    fn test_remove_on_missing_installation_does_nothing() {
        let temp_dir = tempdir().unwrap();
        let settings = Settings::new(temp_dir.path());
        let mut runner = RecordingRunner::new();
        let mut prompter = ScriptedPrompter::default();

        let request = TrackRequest {
            species: Some("acme_bug".to_string()),
            label: Some("geneset1".to_string()),
            remove: true,
            ..Default::default()
        };
        let result = TrackHelper::new(&settings, &mut runner, &mut prompter).run(&request);

        assert!(matches!(result, Err(ApolloError::InstallationMissing { .. })));
        assert!(runner.invocations().is_empty());
    }

    #[test]
    fn test_missing_label() {
        let (_temp_dir, settings) = installation("acme_bug");
        let mut runner = RecordingRunner::new();
        let mut prompter = ScriptedPrompter::default();

        let request = TrackRequest {
            label: None,
            ..load_request(Some(3))
        };
        let result = TrackHelper::new(&settings, &mut runner, &mut prompter).run(&request);
        assert!(matches!(result, Err(ApolloError::MissingArgument("track label"))));
    }

    #[test]
    fn test_remove_needs_no_infile_or_prompt() {
        let (temp_dir, settings) = installation("acme_bug");
        let mut runner = RecordingRunner::new();
        let mut prompter = ScriptedPrompter::default();

        let request = TrackRequest {
            species: Some("acme_bug".to_string()),
            label: Some("geneset1".to_string()),
            remove: true,
            ..Default::default()
        };
        let outcome = TrackHelper::new(&settings, &mut runner, &mut prompter)
            .run(&request)
            .unwrap();

        assert_eq!(
            outcome,
            TrackOutcome::Removed {
                label: "geneset1".to_string()
            }
        );
        assert_eq!(prompter.questions_asked(), 0);

        let calls = runner.invocations();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].program(), Path::new("remove-track.pl"));
        let species_dir = temp_dir.path().join("acme_bug");
        assert_eq!(calls[0].value_of("--dir"), species_dir.to_str());
        assert_eq!(calls[0].value_of("--trackLabel"), Some("geneset1"));
        assert!(calls[0].has_flag("-D"));
    }

    #[test]
    fn test_create_requires_infile_then_category() {
        let (_temp_dir, settings) = installation("acme_bug");
        let mut runner = RecordingRunner::new();
        let mut prompter = ScriptedPrompter::default();

        let request = TrackRequest {
            infile: None,
            category: None,
            ..load_request(Some(3))
        };
        let result = TrackHelper::new(&settings, &mut runner, &mut prompter).run(&request);
        assert!(matches!(result, Err(ApolloError::MissingArgument("track"))));

        let request = TrackRequest {
            category: None,
            ..load_request(Some(3))
        };
        let result = TrackHelper::new(&settings, &mut runner, &mut prompter).run(&request);
        assert!(matches!(
            result,
            Err(ApolloError::MissingArgument("category for this track"))
        ));
        assert!(runner.invocations().is_empty());
    }

    #[test]
    fn test_label_collision() {
        let (temp_dir, settings) = installation("acme_bug");
        fs::create_dir_all(track_dir(&temp_dir.path().join("acme_bug"), "geneset1")).unwrap();

        let mut runner = RecordingRunner::new();
        let mut prompter = ScriptedPrompter::default();
        let result = TrackHelper::new(&settings, &mut runner, &mut prompter).run(&load_request(Some(3)));

        assert!(matches!(result, Err(ApolloError::TrackExists { .. })));
        assert!(runner.invocations().is_empty());
    }

    #[test]
    fn test_direct_gene_load_after_installation() {
        let temp_dir = tempdir().unwrap();
        let settings = Settings::new(temp_dir.path());
        let mut runner = RecordingRunner::new();
        let mut prompter = ScriptedPrompter::default();

        let before = TrackHelper::new(&settings, &mut runner, &mut prompter).run(&load_request(Some(3)));
        assert!(matches!(before, Err(ApolloError::InstallationMissing { .. })));
        assert!(runner.invocations().is_empty());

        let install = InstallRequest {
            species: Some("acme_bug".to_string()),
            fasta: Some(PathBuf::from("acme_bug.fa")),
            wa_installation: Some("apollo".to_string()),
            clean: false,
        };
        let created = SpeciesManager::new(&settings, &mut runner, &mut prompter)
            .run(&install)
            .unwrap();
        assert!(matches!(created, InstallOutcome::Created { .. }));

        let outcome = TrackHelper::new(&settings, &mut runner, &mut prompter)
            .run(&load_request(Some(3)))
            .unwrap();

        assert_eq!(
            outcome,
            TrackOutcome::Loaded {
                label: "geneset1".to_string(),
                track_type: TrackType::Gene
            }
        );
        assert_eq!(prompter.questions_asked(), 0);

        // prepare-refseqs and faToTwoBit, then the converter
        let calls = runner.invocations();
        assert_eq!(calls.len(), 3);
        let call = &calls[2];
        assert_eq!(call.program(), Path::new(FLATFILE_TO_JSON));
        assert_eq!(call.value_of("--gff"), Some("genes.gff3"));
        assert_eq!(
            call.value_of("--out"),
            temp_dir.path().join("acme_bug").to_str()
        );
        assert_eq!(call.value_of("--type"), Some("mRNA"));
        assert_eq!(
            call.value_of("--subfeatureClasses"),
            Some(r#"{"wholeCDS": null, "CDS": "blueviolet-80pct", "UTR": "darkorange-60pct", "exon" : "container-100pct"}"#)
        );
        assert_eq!(call.value_of("--config"), Some(r#"{"category":"genes"}"#));
        assert_eq!(call.value_of("--trackLabel"), Some("geneset1"));
    }

    #[test]
    fn test_species_must_be_single_directory_name() {
        let temp_dir = tempdir().unwrap();
        let data_dir = temp_dir.path().join("data");
        fs::create_dir_all(data_dir.join("acme_bug/tracks")).unwrap();
        let settings = Settings::new(&data_dir);

        for species in ["", ".", "..", "acme_bug/tracks"] {
            let mut runner = RecordingRunner::new();
            let mut prompter = ScriptedPrompter::default();
            let request = TrackRequest {
                species: Some(species.to_string()),
                remove: true,
                ..load_request(None)
            };

            let result = TrackHelper::new(&settings, &mut runner, &mut prompter).run(&request);

            match species {
                "" => assert!(matches!(result, Err(ApolloError::MissingArgument("species")))),
                _ => assert!(
                    matches!(result, Err(ApolloError::InvalidName { .. })),
                    "'{}' should be rejected",
                    species
                ),
            }
            assert!(runner.invocations().is_empty());
        }
    }

    #[test]
    fn test_label_must_be_single_directory_name() {
        let (_temp_dir, settings) = installation("acme_bug");

        for label in ["", ".", "..", "a/b"] {
            for remove in [true, false] {
                let mut runner = RecordingRunner::new();
                let mut prompter = ScriptedPrompter::default();
                let request = TrackRequest {
                    label: Some(label.to_string()),
                    remove,
                    ..load_request(Some(3))
                };

                let result = TrackHelper::new(&settings, &mut runner, &mut prompter).run(&request);

                match label {
                    "" => assert!(matches!(
                        result,
                        Err(ApolloError::MissingArgument("track label"))
                    )),
                    _ => assert!(
                        matches!(result, Err(ApolloError::InvalidName { .. })),
                        "'{}' should be rejected",
                        label
                    ),
                }
                assert!(runner.invocations().is_empty());
            }
        }
    }

    #[test]
    fn test_interactive_load_asks_to_proceed() {
        let (_temp_dir, settings) = installation("acme_bug");
        let mut runner = RecordingRunner::new();
        let mut prompter = ScriptedPrompter::new(["11", "y", "Y"]);

        let outcome = TrackHelper::new(&settings, &mut runner, &mut prompter)
            .run(&load_request(None))
            .unwrap();

        assert!(matches!(
            outcome,
            TrackOutcome::Loaded {
                track_type: TrackType::TRna,
                ..
            }
        ));
        assert_eq!(prompter.questions_asked(), 3);
        assert_eq!(runner.invocations()[0].value_of("--type"), Some("tRNA"));
    }

    #[test]
    fn test_declined_proceed_has_no_side_effect() {
        let (_temp_dir, settings) = installation("acme_bug");
        let mut runner = RecordingRunner::new();
        let mut prompter = ScriptedPrompter::new(["3", "y", "n"]);

        let result = TrackHelper::new(&settings, &mut runner, &mut prompter).run(&load_request(None));

        assert!(matches!(result, Err(ApolloError::Declined)));
        assert!(runner.invocations().is_empty());
    }

    #[test]
    fn test_exhausted_selection_has_no_side_effect() {
        let (_temp_dir, settings) = installation("acme_bug");
        let mut runner = RecordingRunner::new();
        let mut prompter = ScriptedPrompter::new(["1", "n", "1", "n", "1", "n", "1", "n"]);

        let result = TrackHelper::new(&settings, &mut runner, &mut prompter).run(&load_request(None));

        assert!(matches!(result, Err(ApolloError::SelectionExhausted)));
        assert!(runner.invocations().is_empty());
    }

    #[test]
    fn test_outfile_overrides_output_directory() {
        let (_temp_dir, settings) = installation("acme_bug");
        let mut runner = RecordingRunner::new();
        let mut prompter = ScriptedPrompter::default();

        let request = TrackRequest {
            outfile: Some(PathBuf::from("/tmp/staging")),
            ..load_request(Some(6))
        };
        TrackHelper::new(&settings, &mut runner, &mut prompter)
            .run(&request)
            .unwrap();

        assert_eq!(runner.invocations()[0].value_of("--out"), Some("/tmp/staging"));
    }

    #[test]
    fn test_converter_dispatch_for_every_type() {
        for (number, track_type) in registry::menu().into_iter().enumerate() {
            let inv = converter_invocation(
                track_type,
                Path::new("in.gff3"),
                Path::new("/data/acme_bug"),
                "cat",
                "label",
            )
            .unwrap();

            let expected_type = match track_type.name() {
                "tRNA" => Some("tRNA"),
                "ncRNA" => Some("ncRNA"),
                "gene" | "lift-over" | "rnaseq" => Some("mRNA"),
                _ => None,
            };
            assert_eq!(inv.value_of("--type"), expected_type, "menu entry {}", number + 1);
            assert_eq!(
                inv.value_of("--subfeatureClasses"),
                Some(EXPECTED_SUBFEATURE_CLASSES[number]),
                "menu entry {}",
                number + 1
            );
            assert_eq!(inv.value_of("--arrowheadClass"), Some("trellis-arrowhead"));
            assert_eq!(inv.value_of("--cssClass"), Some("container-16px"));
            assert!(inv.has_flag("--getSubfeatures"));
            assert_eq!(inv.args().last().map(String::as_str), Some("label"));
        }
    }

    #[test]
    fn test_category_is_json_escaped() {
        let inv = converter_invocation(
            TrackType::Protein,
            Path::new("in.gff3"),
            Path::new("/data"),
            r#"my "best" genes"#,
            "label",
        )
        .unwrap();

        assert_eq!(
            inv.value_of("--config"),
            Some(r#"{"category":"my \"best\" genes"}"#)
        );
    }
}
