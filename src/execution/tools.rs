//! Browser Helper Programs
//!
//! Builders for every external program the curator tools call.

use std::path::Path;

use super::command::ToolInvocation;

/// Loads a FASTA assembly into the browser's sequence store.
pub const PREPARE_REFSEQS: &str = "prepare-refseqs.pl";

/// Encodes a FASTA file into UCSC two-bit format for BLAT.
pub const FA_TO_TWO_BIT: &str = "faToTwoBit";

/// Converts GFF3 features into a browser track.
pub const FLATFILE_TO_JSON: &str = "flatfile-to-json.pl";

/// Deletes a track from a browser data directory.
pub const REMOVE_TRACK: &str = "remove-track.pl";

/// Name of the BLAT database written into each installation.
pub const TWO_BIT_FILE: &str = "blat.2bit";

/// `prepare-refseqs.pl --fasta <fasta> --out <out_dir>`
pub fn prepare_refseqs(fasta: &Path, out_dir: &Path) -> ToolInvocation {
    ToolInvocation::new(PREPARE_REFSEQS)
        .arg("--fasta")
        .path_arg(fasta)
        .arg("--out")
        .path_arg(out_dir)
}

/// `faToTwoBit <fasta> <out_dir>/blat.2bit`
pub fn fa_to_two_bit(fasta: &Path, out_dir: &Path) -> ToolInvocation {
    ToolInvocation::new(FA_TO_TWO_BIT)
        .path_arg(fasta)
        .path_arg(out_dir.join(TWO_BIT_FILE))
}

/// `<script> -destinationurl <url> -organismname <species>`
pub fn delete_organism_annotations(
    script: &Path,
    destination_url: &str,
    species: &str,
) -> ToolInvocation {
    ToolInvocation::new(script)
        .option("-destinationurl", destination_url)
        .option("-organismname", species)
}

/// `remove-track.pl --dir <data_dir> --trackLabel <label> -D`
pub fn remove_track(data_dir: &Path, label: &str) -> ToolInvocation {
    ToolInvocation::new(REMOVE_TRACK)
        .arg("--dir")
        .path_arg(data_dir)
        .option("--trackLabel", label)
        .arg("-D")
}
