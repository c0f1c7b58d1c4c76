//! Non-fatal conditions raised while extracting clusters.
//!
//! Components receive a `&mut Diagnostics` instead of printing. Each emitted
//! diagnostic is kept for the caller and forwarded to `tracing`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    TooFewColumns,
    InvalidCoordinates,
    MissingProduct,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::TooFewColumns => write!(f, "fewer than 9 columns"),
            SkipReason::InvalidCoordinates => write!(f, "start/end are not valid coordinates"),
            SkipReason::MissingProduct => write!(f, "no product attribute"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// Malformed annotation lines, aggregated per reason
    SkippedLines {
        reason: SkipReason,
        count: usize,
        first_line: usize,
    },
    ContigNotFound {
        contig: String,
    },
    TruncatedSlice {
        contig: String,
        requested_end: u64,
        available: usize,
    },
    OversizedRecord {
        contig: String,
        length: usize,
        max_len: u64,
    },
    NoClusters {
        genes: String,
        feature_type: String,
        gff: PathBuf,
        fna: PathBuf,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::SkippedLines {
                reason,
                count: 1,
                first_line,
            } => write!(f, "Skipping annotation line {}: {}", first_line, reason),
            Diagnostic::SkippedLines {
                reason,
                count,
                first_line,
            } => write!(
                f,
                "Skipping {} annotation lines from line {}: {}",
                count, first_line, reason
            ),
            Diagnostic::ContigNotFound { contig } => {
                write!(
                    f,
                    "Sequence ID '{}' not found in FNA. Skipping.",
                    contig.to_uppercase()
                )
            }
            Diagnostic::TruncatedSlice {
                contig,
                requested_end,
                available,
            } => write!(
                f,
                "Region end {} runs past the end of '{}' ({} bases)",
                requested_end,
                contig.to_uppercase(),
                available
            ),
            Diagnostic::OversizedRecord {
                contig,
                length,
                max_len,
            } => write!(
                f,
                "Sequence is too long ({}) on '{}', limit {}",
                length,
                contig.to_uppercase(),
                max_len
            ),
            Diagnostic::NoClusters {
                genes,
                feature_type,
                gff,
                fna,
            } => write!(
                f,
                "No {} {} features found in {}. ({})",
                genes,
                feature_type,
                fna.display(),
                gff.display()
            ),
        }
    }
}

/// Collecting sink for [`Diagnostic`]s
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&mut self, diagnostic: Diagnostic) {
        match &diagnostic {
            Diagnostic::SkippedLines { .. } => tracing::debug!("{}", diagnostic),
            Diagnostic::NoClusters { .. } => tracing::info!("{}", diagnostic),
            Diagnostic::ContigNotFound { .. }
            | Diagnostic::TruncatedSlice { .. }
            | Diagnostic::OversizedRecord { .. } => tracing::warn!("{}", diagnostic),
        }
        self.entries.push(diagnostic);
    }

    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<Diagnostic> {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total annotation lines skipped across all reasons
    pub fn skipped_lines(&self) -> usize {
        self.entries
            .iter()
            .map(|d| match d {
                Diagnostic::SkippedLines { count, .. } => *count,
                _ => 0,
            })
            .sum()
    }

    pub fn missing_contigs(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter_map(|d| match d {
                Diagnostic::ContigNotFound { contig } => Some(contig.as_str()),
                _ => None,
            })
            .collect()
    }
}
