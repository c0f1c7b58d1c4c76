//! GFF annotation parsing and per-(contig, strand) feature grouping.
//!
//! Matching is case-insensitive throughout: each line is lower-cased before it
//! is split, so feature types, attribute keys, products and contig ids are all
//! compared in lower case. Contig ids are upper-cased again when the sequence
//! store is consulted.

use crate::diagnostics::{Diagnostic, Diagnostics, SkipReason};
use crate::sequence::{RequiredGenes, Strand};
use indexmap::IndexMap;
use operon_core::OperonResult;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::BufRead;
use std::path::Path;

use super::open_for_reading;

/// Number of tab-separated columns in a GFF line
const GFF_COLUMNS: usize = 9;

/// GFF3 directive after which only sequence data follows
const FASTA_DIRECTIVE: &str = "##FASTA";

/// Parse a `;`-separated `key=value` attribute string.
///
/// Keys and values are trimmed, only the first `=` splits, later duplicates
/// win and fragments without `=` are dropped.
pub fn parse_attributes(attributes: &str) -> HashMap<String, String> {
    let mut attrs = HashMap::new();

    for pair in attributes.split(';') {
        if let Some((key, value)) = pair.split_once('=') {
            attrs.insert(key.trim().to_string(), value.trim().to_string());
        }
    }

    attrs
}

/// One annotation line split into its named columns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GffLine<'a> {
    pub seqid: &'a str,
    pub source: &'a str,
    pub feature_type: &'a str,
    pub start: &'a str,
    pub end: &'a str,
    pub score: &'a str,
    pub strand: &'a str,
    pub phase: &'a str,
    pub attributes: &'a str,
}

impl<'a> GffLine<'a> {
    /// Split a line into columns; `None` when fewer than nine are present.
    ///
    /// Tabs past the eighth separator stay part of the attribute column.
    pub fn split(line: &'a str) -> Option<Self> {
        let columns: Vec<&str> = line.splitn(GFF_COLUMNS, '\t').collect();
        if columns.len() < GFF_COLUMNS {
            return None;
        }

        Some(Self {
            seqid: columns[0],
            source: columns[1],
            feature_type: columns[2],
            start: columns[3],
            end: columns[4],
            score: columns[5],
            strand: columns[6],
            phase: columns[7],
            attributes: columns[8],
        })
    }

    /// 1-based inclusive coordinates; `None` unless both parse and start >= 1
    pub fn coordinates(&self) -> Option<(u64, u64)> {
        let start: u64 = self.start.trim().parse().ok()?;
        let end: u64 = self.end.trim().parse().ok()?;
        (start >= 1).then_some((start, end))
    }
}

/// A single annotated element matched to one required gene
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feature {
    pub contig_id: String,
    pub start: u64,
    pub end: u64,
    pub strand: Strand,
    pub gene: String,
}

/// Grouping key for features sharing a contig and strand
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FeatureKey {
    pub contig_id: String,
    pub strand: Strand,
}

/// Classification of one annotation line
#[derive(Debug, PartialEq, Eq)]
enum ParsedLine {
    /// `##FASTA` or a bare `>` header: no annotations follow
    EndOfAnnotations,
    Comment,
    Blank,
    OtherType,
    Skipped(SkipReason),
    Matched(Vec<Feature>),
}

/// Features of one annotation file grouped by (contig, strand).
///
/// Groups and the features inside them keep first-seen order.
#[derive(Debug, Clone, Default)]
pub struct FeatureIndex {
    groups: IndexMap<FeatureKey, Vec<Feature>>,
    feature_count: usize,
}

impl FeatureIndex {
    /// Parse an annotation stream.
    ///
    /// Lines are decoded lossily, so stray non-UTF-8 bytes never fail the
    /// file. Malformed lines are skipped and reported to `diagnostics` as one
    /// [`Diagnostic::SkippedLines`] per reason; only read failures are
    /// returned as errors. Parsing stops at an embedded FASTA section.
    pub fn parse<R: BufRead>(
        mut reader: R,
        feature_type: &str,
        genes: &RequiredGenes,
        diagnostics: &mut Diagnostics,
    ) -> OperonResult<Self> {
        let feature_type = feature_type.to_lowercase();
        let mut index = Self::default();
        let mut skipped: IndexMap<SkipReason, (usize, usize)> = IndexMap::new();

        let mut buf = Vec::new();
        let mut line_no = 0usize;
        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            line_no += 1;

            let text = String::from_utf8_lossy(&buf);
            let line = text.trim_end_matches(|c: char| c == '\n' || c == '\r');
            match classify_line(line, &feature_type, genes) {
                ParsedLine::Matched(features) => {
                    for feature in features {
                        index.insert(feature);
                    }
                }
                ParsedLine::Skipped(reason) => {
                    tracing::trace!(line = line_no, %reason, "skipping annotation line");
                    skipped.entry(reason).or_insert((line_no, 0)).1 += 1;
                }
                ParsedLine::EndOfAnnotations => break,
                ParsedLine::Comment | ParsedLine::Blank | ParsedLine::OtherType => {}
            }
        }

        for (reason, (first_line, count)) in skipped {
            diagnostics.emit(Diagnostic::SkippedLines {
                reason,
                count,
                first_line,
            });
        }

        tracing::debug!(
            features = index.feature_count,
            groups = index.groups.len(),
            "indexed annotation features"
        );
        Ok(index)
    }

    pub fn parse_str(
        text: &str,
        feature_type: &str,
        genes: &RequiredGenes,
        diagnostics: &mut Diagnostics,
    ) -> OperonResult<Self> {
        Self::parse(text.as_bytes(), feature_type, genes, diagnostics)
    }

    /// Parse an annotation file (supports .gz compression)
    pub fn from_path<P: AsRef<Path>>(
        path: P,
        feature_type: &str,
        genes: &RequiredGenes,
        diagnostics: &mut Diagnostics,
    ) -> OperonResult<Self> {
        let reader = open_for_reading(path)?;
        Self::parse(reader, feature_type, genes, diagnostics)
    }

    fn insert(&mut self, feature: Feature) {
        let key = FeatureKey {
            contig_id: feature.contig_id.clone(),
            strand: feature.strand,
        };
        self.groups.entry(key).or_default().push(feature);
        self.feature_count += 1;
    }

    pub fn groups(&self) -> impl Iterator<Item = (&FeatureKey, &[Feature])> {
        self.groups.iter().map(|(key, features)| (key, features.as_slice()))
    }

    pub fn group(&self, key: &FeatureKey) -> Option<&[Feature]> {
        self.groups.get(key).map(Vec::as_slice)
    }

    pub fn feature_count(&self) -> usize {
        self.feature_count
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.feature_count == 0
    }
}

fn classify_line(line: &str, feature_type: &str, genes: &RequiredGenes) -> ParsedLine {
    if is_fasta_directive(line) || line.starts_with('>') {
        return ParsedLine::EndOfAnnotations;
    }
    if line.starts_with('#') {
        return ParsedLine::Comment;
    }
    if line.trim().is_empty() {
        return ParsedLine::Blank;
    }

    let lowered = line.trim().to_lowercase();
    let Some(columns) = GffLine::split(&lowered) else {
        return ParsedLine::Skipped(SkipReason::TooFewColumns);
    };

    if columns.feature_type != feature_type {
        return ParsedLine::OtherType;
    }

    let Some((start, end)) = columns.coordinates() else {
        return ParsedLine::Skipped(SkipReason::InvalidCoordinates);
    };

    let attributes = parse_attributes(columns.attributes);
    let Some(product) = attributes.get("product") else {
        return ParsedLine::Skipped(SkipReason::MissingProduct);
    };

    let strand = Strand::from_gff(columns.strand);
    let features = genes
        .matches_in(product)
        .map(|gene| Feature {
            contig_id: columns.seqid.to_string(),
            start,
            end,
            strand,
            gene: gene.to_string(),
        })
        .collect();

    ParsedLine::Matched(features)
}

fn is_fasta_directive(line: &str) -> bool {
    line.get(..FASTA_DIRECTIVE.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(FASTA_DIRECTIVE))
}
