//! NCBI assembly summary tables.

pub mod select;

pub use select::{organism_key, select_assemblies, select_best, AssemblyTable, Selection, OUTPUT_COLUMNS};

use operon_core::OperonError;

pub(crate) fn csv_error(err: csv::Error) -> OperonError {
    if err.is_io_error() {
        if let csv::ErrorKind::Io(io) = err.into_kind() {
            return OperonError::Io(io);
        }
        return OperonError::Parse("CSV I/O failure".to_string());
    }
    OperonError::Parse(format!("Failed to parse assembly table: {}", err))
}
