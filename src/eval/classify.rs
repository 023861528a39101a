//! Static classification of rnaQUAST short-report metrics.
//!
//! The class of a metric decides which divider the scaler uses for it.
//! Names missing from [`METRIC_CLASSES`] fall back to cross-assembly max
//! normalization, so a metric added to rnaQUAST later is scaled relative to
//! the best assembly until it is listed here.

use std::fmt;

use serde::Serialize;

/// Which quantity a metric is relative to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum MetricClass {
    /// Counted against the database gene count
    GeneRelative,
    /// Counted against the database isoform count
    IsoformRelative,
    /// Counted against the assembly's own transcript count
    TranscriptRelative,
    /// Already a fraction or ratio
    AlreadyScaled,
    /// Not listed; scaled by the maximum over all assemblies
    Unclassified,
}

impl MetricClass {
    pub const ALL: [MetricClass; 5] = [
        MetricClass::GeneRelative,
        MetricClass::IsoformRelative,
        MetricClass::TranscriptRelative,
        MetricClass::AlreadyScaled,
        MetricClass::Unclassified,
    ];

    /// Short identifier used in output file names
    pub fn slug(self) -> &'static str {
        match self {
            MetricClass::GeneRelative => "genes",
            MetricClass::IsoformRelative => "isoforms",
            MetricClass::TranscriptRelative => "transcripts",
            MetricClass::AlreadyScaled => "fractions",
            MetricClass::Unclassified => "other",
        }
    }
}

impl fmt::Display for MetricClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MetricClass::GeneRelative => "Gene metrics",
            MetricClass::IsoformRelative => "Isoform metrics",
            MetricClass::TranscriptRelative => "Transcript metrics",
            MetricClass::AlreadyScaled => "Fraction metrics",
            MetricClass::Unclassified => "Other metrics",
        };
        write!(f, "{label}")
    }
}

/// Name of the per-assembly transcript count row
pub const TRANSCRIPTS: &str = "Transcripts";

/// rnaQUAST's isoform list repeats "50%-covered isoforms"; the repeat is kept
/// and "95%-covered isoforms" stays unclassified.
pub static METRIC_CLASSES: &[(&str, MetricClass)] = &[
    ("50%-assembled genes", MetricClass::GeneRelative),
    ("95%-assembled genes", MetricClass::GeneRelative),
    ("50%-covered genes", MetricClass::GeneRelative),
    ("95%-covered genes", MetricClass::GeneRelative),
    ("50%-assembled isoforms", MetricClass::IsoformRelative),
    ("95%-assembled isoforms", MetricClass::IsoformRelative),
    ("50%-covered isoforms", MetricClass::IsoformRelative),
    ("50%-covered isoforms", MetricClass::IsoformRelative),
    ("Transcripts > 500 bp", MetricClass::TranscriptRelative),
    ("Transcripts > 1000 bp", MetricClass::TranscriptRelative),
    ("Aligned", MetricClass::TranscriptRelative),
    ("Uniquely aligned", MetricClass::TranscriptRelative),
    ("Multiply aligned", MetricClass::TranscriptRelative),
    ("Unaligned", MetricClass::TranscriptRelative),
    ("Misassemblies", MetricClass::TranscriptRelative),
    ("Unannotated", MetricClass::TranscriptRelative),
    ("50%-matched", MetricClass::TranscriptRelative),
    ("95%-matched", MetricClass::TranscriptRelative),
    ("Database coverage", MetricClass::AlreadyScaled),
    ("Avg. aligned fraction", MetricClass::AlreadyScaled),
    ("Mean fraction of transcript matched", MetricClass::AlreadyScaled),
];

/// Look up the class of a metric name
pub fn classify(metric: &str) -> MetricClass {
    METRIC_CLASSES
        .iter()
        .find(|(name, _)| *name == metric)
        .map(|&(_, class)| class)
        .unwrap_or(MetricClass::Unclassified)
}
