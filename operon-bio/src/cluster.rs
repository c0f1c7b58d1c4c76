//! Sliding-window detection of ordered gene clusters.

use crate::formats::gff::{Feature, FeatureIndex, FeatureKey};
use crate::sequence::{RequiredGenes, Strand};
use operon_core::OperonResult;
use operon_utils::sliding_window;
use serde::{Deserialize, Serialize};

/// A run of features holding every required gene once, in forward or
/// reversed order. Coordinates are 1-based inclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cluster {
    pub contig_id: String,
    pub strand: Strand,
    pub min_start: u64,
    pub max_end: u64,
    /// Gene labels in window order
    pub genes: Vec<String>,
}

impl Cluster {
    /// `max_end - min_start`, the quantity bounded by `max_len`
    pub fn span(&self) -> u64 {
        self.max_end.saturating_sub(self.min_start)
    }

    /// Number of bases covered by the inclusive range
    pub fn length(&self) -> u64 {
        self.span() + 1
    }
}

pub struct ClusterFinder<'a> {
    genes: &'a RequiredGenes,
    max_len: u64,
}

impl<'a> ClusterFinder<'a> {
    pub fn new(genes: &'a RequiredGenes, max_len: u64) -> Self {
        Self { genes, max_len }
    }

    /// Find every window position over one (contig, strand) group that forms
    /// a cluster. Overlapping clusters are all reported.
    pub fn find_clusters(&self, key: &FeatureKey, features: &[Feature]) -> OperonResult<Vec<Cluster>> {
        let mut sorted: Vec<&Feature> = features.iter().collect();
        sorted.sort_by_key(|feature| feature.start);

        let mut clusters = Vec::new();
        for window in sliding_window(sorted, self.genes.len())? {
            let labels: Vec<Option<&str>> = window
                .iter()
                .map(|slot| slot.map(|feature| feature.gene.as_str()))
                .collect();
            if !self.genes.matches_order(&labels) {
                continue;
            }

            // Padding never passes the order check, so every slot is filled here
            let members: Vec<&Feature> = window.into_iter().flatten().collect();
            let min_start = members.iter().map(|f| f.start).min().unwrap_or_default();
            let max_end = members.iter().map(|f| f.end).max().unwrap_or_default();

            if max_end.saturating_sub(min_start) >= self.max_len {
                tracing::debug!(
                    contig = %key.contig_id,
                    min_start,
                    max_end,
                    max_len = self.max_len,
                    "cluster span too long, discarded"
                );
                continue;
            }

            clusters.push(Cluster {
                contig_id: key.contig_id.clone(),
                strand: key.strand,
                min_start,
                max_end,
                genes: members.iter().map(|f| f.gene.clone()).collect(),
            });
        }

        Ok(clusters)
    }

    /// Clusters of every group in the index, in group order
    pub fn find_all(&self, index: &FeatureIndex) -> OperonResult<Vec<Cluster>> {
        let mut clusters = Vec::new();
        for (key, features) in index.groups() {
            clusters.extend(self.find_clusters(key, features)?);
        }
        Ok(clusters)
    }
}
