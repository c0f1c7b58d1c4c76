//! Turning clusters into labelled sequence records.

use crate::cluster::Cluster;
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::sequence::{RequiredGenes, Sequence, SequenceStore};
use operon_core::{OperonError, OperonResult};
use std::path::Path;

/// Minimum `_`-separated fields in an assembly file name
const RECORD_ID_FIELDS: usize = 4;

/// Derive an output record id from an assembly file name.
///
/// `GCF_000123.4_Genus_species_strainX.fna` becomes
/// `GCF_000123.4 Genus species strainX`: the extension is dropped, the first
/// two fields form the accession, the last field is the strain (trailing dots
/// removed) and everything between is the organism name.
pub fn build_record_id(source: &str) -> OperonResult<String> {
    let stem = Path::new(source)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(source);

    let fields: Vec<&str> = stem.split('_').collect();
    if fields.len() < RECORD_ID_FIELDS {
        return Err(OperonError::invalid_file_name(
            source,
            format!(
                "expected at least {} '_'-separated fields, found {}",
                RECORD_ID_FIELDS,
                fields.len()
            ),
        ));
    }

    let last = fields.len() - 1;
    let strain = fields[last].trim_end_matches('.');
    let organism = fields[2..last].join(" ");

    Ok(format!("{}_{} {} {}", fields[0], fields[1], organism, strain))
}

/// Slices cluster regions out of one assembly's sequences
pub struct SequenceExtractor<'a> {
    store: &'a SequenceStore,
    record_id: String,
    description_prefix: String,
    max_len: u64,
}

impl<'a> SequenceExtractor<'a> {
    /// Fails when `source_id` does not yield a record id, before any cluster
    /// is touched.
    pub fn new(
        store: &'a SequenceStore,
        source_id: &str,
        genes: &RequiredGenes,
        max_len: u64,
    ) -> OperonResult<Self> {
        let record_id = build_record_id(source_id)?;
        Ok(Self::with_record_id(store, record_id, genes, max_len))
    }

    /// Use an already derived record id
    pub fn with_record_id(
        store: &'a SequenceStore,
        record_id: String,
        genes: &RequiredGenes,
        max_len: u64,
    ) -> Self {
        Self {
            store,
            record_id,
            description_prefix: genes.joined(),
            max_len,
        }
    }

    /// Extract one cluster; `None` when its contig is not in the store.
    pub fn extract(&self, cluster: &Cluster, diagnostics: &mut Diagnostics) -> Option<Sequence> {
        let Some(contig) = self.store.get_contig(&cluster.contig_id) else {
            diagnostics.emit(Diagnostic::ContigNotFound {
                contig: cluster.contig_id.clone(),
            });
            return None;
        };

        let start = to_index(cluster.min_start.saturating_sub(1));
        let end = to_index(cluster.max_end);
        let (region, truncated) = contig.slice(start, end);
        if truncated {
            diagnostics.emit(Diagnostic::TruncatedSlice {
                contig: cluster.contig_id.clone(),
                requested_end: cluster.max_end,
                available: contig.len(),
            });
        }

        let symbols = if cluster.strand.is_reverse() {
            crate::sequence::reverse_complement(region)
        } else {
            region.to_vec()
        };

        if symbols.len() as u64 > self.max_len {
            diagnostics.emit(Diagnostic::OversizedRecord {
                contig: cluster.contig_id.clone(),
                length: symbols.len(),
                max_len: self.max_len,
            });
        }

        Some(
            Sequence::new(self.record_id.clone(), symbols)
                .with_description(format!("{} {}", self.description_prefix, cluster.strand)),
        )
    }

    /// Extract every cluster, dropping those whose contig is missing
    pub fn extract_all(&self, clusters: &[Cluster], diagnostics: &mut Diagnostics) -> Vec<Sequence> {
        clusters
            .iter()
            .filter_map(|cluster| self.extract(cluster, diagnostics))
            .collect()
    }
}

fn to_index(coordinate: u64) -> usize {
    usize::try_from(coordinate).unwrap_or(usize::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequence::Strand;
    use pretty_assertions::assert_eq;

    fn store() -> SequenceStore {
        SequenceStore::from_sequences(vec![Sequence::new(
            "C1".to_string(),
            b"AAAACCCCGGGGTTTT".to_vec(),
        )])
    }

    fn cluster(contig: &str, strand: Strand, min_start: u64, max_end: u64) -> Cluster {
        Cluster {
            contig_id: contig.to_string(),
            strand,
            min_start,
            max_end,
            genes: vec!["16s".to_string(), "23s".to_string()],
        }
    }

    fn genes() -> RequiredGenes {
        RequiredGenes::new(&["16s", "23s"]).unwrap()
    }

    const SOURCE: &str = "GCF_000123.4_Genus_species_strainX.fna";

    #[test]
    fn test_build_record_id() {
        assert_eq!(
            build_record_id(SOURCE).unwrap(),
            "GCF_000123.4 Genus species strainX"
        );
        assert_eq!(
            build_record_id("GCA_1.1_Escherichia_K12..fna").unwrap(),
            "GCA_1.1 Escherichia K12"
        );
    }

    #[test]
    fn test_build_record_id_rejects_short_names() {
        match build_record_id("GCF_000123.4_genome.fna") {
            Err(OperonError::InvalidFileName { name, .. }) => {
                assert_eq!(name, "GCF_000123.4_genome.fna")
            }
            other => panic!("Expected InvalidFileName, got {:?}", other),
        }
    }

    #[test]
    fn test_forward_extraction() {
        let store = store();
        let extractor = SequenceExtractor::new(&store, SOURCE, &genes(), 1000).unwrap();
        let mut diagnostics = Diagnostics::new();

        let record = extractor
            .extract(&cluster("c1", Strand::Forward, 3, 10), &mut diagnostics)
            .unwrap();

        assert_eq!(record.id, "GCF_000123.4 Genus species strainX");
        assert_eq!(record.sequence, b"AACCCCGG");
        assert_eq!(record.description.as_deref(), Some("16s-23s +"));
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_reverse_strand_is_reverse_complemented() {
        let store = store();
        let extractor = SequenceExtractor::new(&store, SOURCE, &genes(), 1000).unwrap();
        let mut diagnostics = Diagnostics::new();

        let record = extractor
            .extract(&cluster("c1", Strand::Reverse, 3, 10), &mut diagnostics)
            .unwrap();

        assert_eq!(record.sequence, b"CCGGGGTT");
        assert_eq!(record.len(), 10 - 3 + 1);
        assert_eq!(record.description.as_deref(), Some("16s-23s -"));
    }

    #[test]
    fn test_missing_contig_is_reported() {
        let store = store();
        let extractor = SequenceExtractor::new(&store, SOURCE, &genes(), 1000).unwrap();
        let mut diagnostics = Diagnostics::new();

        let records = extractor.extract_all(
            &[
                cluster("c9", Strand::Forward, 1, 4),
                cluster("c1", Strand::Forward, 1, 4),
            ],
            &mut diagnostics,
        );

        assert_eq!(records.len(), 1);
        assert_eq!(
            diagnostics.entries(),
            &[Diagnostic::ContigNotFound { contig: "c9".to_string() }]
        );
    }

    #[test]
    fn test_slice_past_end_is_clamped() {
        let store = store();
        let extractor = SequenceExtractor::new(&store, SOURCE, &genes(), 1000).unwrap();
        let mut diagnostics = Diagnostics::new();

        let record = extractor
            .extract(&cluster("c1", Strand::Forward, 13, 40), &mut diagnostics)
            .unwrap();

        assert_eq!(record.sequence, b"TTTT");
        assert_eq!(
            diagnostics.entries(),
            &[Diagnostic::TruncatedSlice {
                contig: "c1".to_string(),
                requested_end: 40,
                available: 16,
            }]
        );
    }

    #[test]
    fn test_oversized_record_is_reported_but_kept() {
        let store = store();
        let extractor = SequenceExtractor::new(&store, SOURCE, &genes(), 4).unwrap();
        let mut diagnostics = Diagnostics::new();

        let record = extractor.extract(&cluster("c1", Strand::Forward, 1, 8), &mut diagnostics);

        assert!(record.is_some());
        assert!(matches!(
            diagnostics.entries(),
            [Diagnostic::OversizedRecord { length: 8, max_len: 4, .. }]
        ));
    }

    #[test]
    fn test_with_record_id_labels_records() {
        let store = store();
        let extractor =
            SequenceExtractor::with_record_id(&store, "custom id".to_string(), &genes(), 1000);
        let mut diagnostics = Diagnostics::new();

        let record = extractor
            .extract(&cluster("c1", Strand::Forward, 1, 4), &mut diagnostics)
            .unwrap();

        assert_eq!(record.id, "custom id");
        assert_eq!(record.sequence, b"AAAA");
    }

    #[test]
    fn test_empty_contig_yields_empty_record() {
        let store = SequenceStore::from_sequences(vec![Sequence::new("C2".to_string(), Vec::new())]);
        let extractor = SequenceExtractor::new(&store, SOURCE, &genes(), 1000).unwrap();
        let mut diagnostics = Diagnostics::new();

        let record = extractor
            .extract(&cluster("c2", Strand::Reverse, 1, 10), &mut diagnostics)
            .unwrap();

        assert!(record.is_empty());
        assert_eq!(
            diagnostics.entries(),
            &[Diagnostic::TruncatedSlice {
                contig: "c2".to_string(),
                requested_end: 10,
                available: 0,
            }]
        );
    }

    #[test]
    fn test_bad_source_fails_construction() {
        let store = store();
        assert!(SequenceExtractor::new(&store, "assembly.fna", &genes(), 1000).is_err());
    }
}
