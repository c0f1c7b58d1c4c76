//! In-memory sequence records keyed by identifier.

use super::types::Sequence;
use crate::formats::fasta::parse_fasta;
use operon_core::OperonResult;
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Clone, Default)]
pub struct SequenceStore {
    records: HashMap<String, Sequence>,
}

impl SequenceStore {
    /// Build a store from parsed records; a repeated id keeps the last record.
    pub fn from_sequences(sequences: Vec<Sequence>) -> Self {
        let records = sequences
            .into_iter()
            .map(|seq| (seq.id.clone(), seq))
            .collect();
        Self { records }
    }

    pub fn load<P: AsRef<Path>>(path: P) -> OperonResult<Self> {
        Ok(Self::from_sequences(parse_fasta(path)?))
    }

    /// Exact, case-sensitive lookup
    pub fn get(&self, id: &str) -> Option<&Sequence> {
        self.records.get(id)
    }

    /// Lookup for an annotation contig: the key is always upper-cased
    pub fn get_contig(&self, contig_id: &str) -> Option<&Sequence> {
        self.records.get(&contig_id.to_uppercase())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
