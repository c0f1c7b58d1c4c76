//! Gene-order constrained region extraction for operon

pub mod assembly;
pub mod cluster;
pub mod diagnostics;
pub mod extract;
pub mod formats;
pub mod output;
pub mod pipeline;
pub mod sequence;

// Re-export commonly used types
pub use cluster::{Cluster, ClusterFinder};
pub use diagnostics::{Diagnostic, Diagnostics, SkipReason};
pub use extract::{build_record_id, SequenceExtractor};
pub use formats::fasta::{parse_fasta, write_fasta};
pub use formats::gff::{parse_attributes, Feature, FeatureIndex, FeatureKey};
pub use output::OutputWriter;
pub use pipeline::{process_pair, ExtractionParams, FilePair, PairReport};
pub use sequence::{RequiredGenes, Sequence, SequenceStore, Strand};
