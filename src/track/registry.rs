//! Track Type Registry
//!
//! The fixed set of track types the curator can load, with the subfeature
//! styling each one is rendered with.

use std::fmt;

/// Kind of annotation a track holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackType {
    Protein,
    Est,
    Repeat,
    TRna,
    NcRna,
    Synteny,
    RnaseqMatch,
    Rnaseq,
    Abinitio,
    Gene,
    LiftOver,
}

impl TrackType {
    /// Every registered type, in declaration order.
    pub const ALL: [TrackType; 11] = [
        Self::Protein,
        Self::Est,
        Self::Repeat,
        Self::TRna,
        Self::NcRna,
        Self::Synteny,
        Self::RnaseqMatch,
        Self::Rnaseq,
        Self::Abinitio,
        Self::Gene,
        Self::LiftOver,
    ];

    /// Name shown to the curator.
    pub fn name(self) -> &'static str {
        match self {
            Self::Protein => "protein",
            Self::Est => "est",
            Self::Repeat => "repeat",
            Self::TRna => "tRNA",
            Self::NcRna => "ncRNA",
            Self::Synteny => "synteny",
            Self::RnaseqMatch => "rnaseq_match",
            Self::Rnaseq => "rnaseq",
            Self::Abinitio => "abinitio",
            Self::Gene => "gene",
            Self::LiftOver => "lift-over",
        }
    }

    /// Subfeature class mapping, without the enclosing braces.
    pub fn formatting_profile(self) -> &'static str {
        match self {
            Self::Protein => r#""match_part": "blue-80pct""#,
            Self::Est => r#""match_part": "green-80pct""#,
            Self::Repeat => r#""match_part": "green-80pct""#,
            Self::TRna => r#""exon": "green-80pct""#,
            Self::NcRna => r#""exon": "green-80pct""#,
            Self::Synteny => r#""nucleotide_motif": "springgreen-80pct""#,
            Self::RnaseqMatch => r#""match_part": "orange-80pct""#,
            Self::Rnaseq => r#""exon" : "green-80pct""#,
            Self::Abinitio => r#""match_part": "springgreen-80pct""#,
            Self::Gene => {
                r#""wholeCDS": null, "CDS": "blueviolet-80pct", "UTR": "darkorange-60pct", "exon" : "container-100pct""#
            }
            Self::LiftOver => {
                r#""wholeCDS": null, "CDS": "green-80pct", "UTR": "darkorange-60pct", "exon" : "container-100pct""#
            }
        }
    }

    /// GFF feature type the converter should pick up, if restricted.
    pub fn feature_type(self) -> Option<&'static str> {
        match self {
            Self::TRna => Some("tRNA"),
            Self::NcRna => Some("ncRNA"),
            Self::Gene | Self::LiftOver | Self::Rnaseq => Some("mRNA"),
            _ => None,
        }
    }

    /// Looks a type up by its displayed name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.name() == name)
    }
}

impl fmt::Display for TrackType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Types in menu order: sorted by name.
pub fn menu() -> Vec<TrackType> {
    let mut types = TrackType::ALL.to_vec();
    types.sort_by_key(|t| t.name());
    types
}

/// Resolves a 1-based menu number.
pub fn by_menu_number(number: usize) -> Option<TrackType> {
    number.checked_sub(1).and_then(|i| menu().get(i).copied())
}
