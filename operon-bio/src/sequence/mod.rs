pub mod genes;
pub mod store;
pub mod strand;
pub mod types;

// Re-export commonly used types
pub use genes::RequiredGenes;
pub use store::SequenceStore;
pub use strand::Strand;
pub use types::{complement, reverse_complement, Sequence};
