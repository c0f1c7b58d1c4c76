//! Core utilities and types shared across all operon crates

pub mod config;
pub mod error;

// Re-export commonly used types
pub use config::{
    load_config, normalize_genes, save_config, Config, ExtractionConfig, OutputConfig,
    PerformanceConfig,
};
pub use error::{OperonError, OperonResult};
