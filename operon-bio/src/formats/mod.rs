pub mod fasta;
pub mod gff;

use flate2::read::GzDecoder;
use operon_core::OperonResult;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

// Re-export commonly used functions
pub use fasta::{parse_fasta, parse_fasta_from_bytes, write_fasta};
pub use gff::{parse_attributes, FeatureIndex};

pub(crate) fn is_gzipped(path: &Path) -> bool {
    path.extension().and_then(|s| s.to_str()) == Some("gz")
}

/// Open a text input for reading, automatically detecting gzip compression
pub fn open_for_reading<P: AsRef<Path>>(path: P) -> OperonResult<Box<dyn BufRead>> {
    let path = path.as_ref();
    let file = File::open(path)?;

    if is_gzipped(path) {
        Ok(Box::new(BufReader::new(GzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}
