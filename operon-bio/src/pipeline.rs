//! End-to-end processing of one annotation/sequence file pair.

use crate::cluster::ClusterFinder;
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::extract::{build_record_id, SequenceExtractor};
use crate::formats::gff::FeatureIndex;
use crate::output::OutputWriter;
use crate::sequence::{RequiredGenes, SequenceStore};
use operon_core::{Config, OperonResult, OutputConfig};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// One unit of batch work
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePair {
    pub gff: PathBuf,
    pub fna: PathBuf,
    /// Output path without the gene suffix and extension
    pub output_base: PathBuf,
    /// File name used to derive record ids
    pub source_id: String,
}

impl FilePair {
    pub fn new<P: AsRef<Path>>(gff: P, fna: P, output_base: P, source_id: impl Into<String>) -> Self {
        Self {
            gff: gff.as_ref().to_path_buf(),
            fna: fna.as_ref().to_path_buf(),
            output_base: output_base.as_ref().to_path_buf(),
            source_id: source_id.into(),
        }
    }
}

/// Validated extraction settings shared by every pair in a batch
#[derive(Debug, Clone)]
pub struct ExtractionParams {
    pub genes: RequiredGenes,
    pub feature_type: String,
    pub max_len: u64,
    pub output: OutputConfig,
}

impl ExtractionParams {
    pub fn from_config(config: &Config) -> OperonResult<Self> {
        config.validate()?;
        Ok(Self {
            genes: RequiredGenes::new(&config.extraction.genes)?,
            feature_type: config.extraction.feature_type.clone(),
            max_len: config.extraction.max_len as u64,
            output: config.output.clone(),
        })
    }
}

/// Outcome of [`process_pair`]
#[derive(Debug, Clone, Serialize)]
pub struct PairReport {
    pub gff: PathBuf,
    pub fna: PathBuf,
    pub output: Option<PathBuf>,
    pub features: usize,
    pub clusters: usize,
    pub records: usize,
    pub diagnostics: Vec<Diagnostic>,
}

/// Parse, cluster, extract and write one file pair.
///
/// The sequence file is only read when at least one cluster was found.
/// An unusable source name fails the pair before its sequences are loaded.
pub fn process_pair(pair: &FilePair, params: &ExtractionParams) -> OperonResult<PairReport> {
    let span = tracing::info_span!("pair", gff = %pair.gff.display());
    let _guard = span.enter();

    let mut diagnostics = Diagnostics::new();
    let index = FeatureIndex::from_path(&pair.gff, &params.feature_type, &params.genes, &mut diagnostics)?;
    let clusters = ClusterFinder::new(&params.genes, params.max_len).find_all(&index)?;
    tracing::debug!(
        features = index.feature_count(),
        clusters = clusters.len(),
        "clusters found"
    );

    let records = if clusters.is_empty() {
        Vec::new()
    } else {
        let record_id = build_record_id(&pair.source_id)?;
        let store = SequenceStore::load(&pair.fna)?;
        let extractor =
            SequenceExtractor::with_record_id(&store, record_id, &params.genes, params.max_len);
        extractor.extract_all(&clusters, &mut diagnostics)
    };

    let writer = OutputWriter::new(&pair.output_base, &params.genes, &params.output);
    let output = writer.write(
        &records,
        &params.feature_type,
        &pair.gff,
        &pair.fna,
        &mut diagnostics,
    )?;

    Ok(PairReport {
        gff: pair.gff.clone(),
        fna: pair.fna.clone(),
        output,
        features: index.feature_count(),
        clusters: clusters.len(),
        records: records.len(),
        diagnostics: diagnostics.into_entries(),
    })
}
