use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::formats::fasta::write_fasta;
use crate::sequence::{RequiredGenes, Sequence};
use operon_core::{OperonResult, OutputConfig};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Writes the records of one file pair to `<base>_<GENES>.<ext>`
pub struct OutputWriter {
    path: PathBuf,
    genes: String,
    line_width: usize,
}

impl OutputWriter {
    pub fn new<P: AsRef<Path>>(base: P, genes: &RequiredGenes, output: &OutputConfig) -> Self {
        let mut name = OsString::from(base.as_ref().as_os_str());
        name.push(format!("_{}.{}", genes.file_suffix(), output.extension));

        Self {
            path: PathBuf::from(name),
            genes: genes.joined(),
            line_width: output.line_width,
        }
    }

    pub fn output_path(&self) -> &Path {
        &self.path
    }

    /// Write all records in one go. Nothing is written for an empty list;
    /// that case is reported as [`Diagnostic::NoClusters`].
    pub fn write(
        &self,
        records: &[Sequence],
        feature_type: &str,
        gff: &Path,
        fna: &Path,
        diagnostics: &mut Diagnostics,
    ) -> OperonResult<Option<PathBuf>> {
        if records.is_empty() {
            diagnostics.emit(Diagnostic::NoClusters {
                genes: self.genes.clone(),
                feature_type: feature_type.to_string(),
                gff: gff.to_path_buf(),
                fna: fna.to_path_buf(),
            });
            return Ok(None);
        }

        write_fasta(&self.path, records, self.line_width)?;
        tracing::info!(
            records = records.len(),
            path = %self.path.display(),
            "wrote extracted regions"
        );
        Ok(Some(self.path.clone()))
    }
}
