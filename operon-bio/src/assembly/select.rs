//! Choosing one representative assembly per organism.
//!
//! Rows are grouped by the first two words of the organism name. Within a
//! group only assemblies longer than 90% of the group's longest survive, and
//! of those the one with the highest contig N50 is kept.

use super::csv_error;
use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use indexmap::IndexMap;
use operon_core::{OperonError, OperonResult};
use regex::Regex;
use std::collections::HashMap;
use std::io::{Read, Write};
use std::path::Path;
use std::sync::OnceLock;

pub const ORGANISM_NAME: &str = "Organism Name";
pub const TOTAL_LENGTH: &str = "Assembly Stats Total Sequence Length";
pub const CONTIG_N50: &str = "Assembly Stats Contig N50";

pub const OUTPUT_COLUMNS: [&str; 7] = [
    "Assembly Accession",
    ORGANISM_NAME,
    "Organism Infraspecific Names Strain",
    TOTAL_LENGTH,
    CONTIG_N50,
    "Assembly Stats GC Count",
    "Assembly Stats GC Percent",
];

/// Minimum fraction of the group's longest assembly a row must exceed
const LENGTH_FRACTION: f64 = 0.9;

/// Largest groups reported in the log
const TOP_GROUPS: usize = 12;

static PUNCTUATION: OnceLock<Regex> = OnceLock::new();

/// First two words of an organism name with punctuation removed
pub fn organism_key(name: &str) -> String {
    let punctuation = PUNCTUATION.get_or_init(|| {
        Regex::new(r"[^\w\s]").unwrap_or_else(|e| panic!("invalid punctuation pattern: {}", e))
    });

    let cleaned = punctuation.replace_all(name, "");
    cleaned.split_whitespace().take(2).collect::<Vec<_>>().join(" ")
}

/// A tab-separated table with a header row
#[derive(Debug, Clone)]
pub struct AssemblyTable {
    headers: StringRecord,
    rows: Vec<StringRecord>,
}

impl AssemblyTable {
    pub fn from_reader<R: Read>(reader: R) -> OperonResult<Self> {
        let mut csv_reader = ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(true)
            .from_reader(reader);

        let headers = csv_reader.headers().map_err(csv_error)?.clone();
        let rows = csv_reader
            .records()
            .collect::<Result<Vec<_>, _>>()
            .map_err(csv_error)?;

        Ok(Self { headers, rows })
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> OperonResult<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn column(&self, name: &str) -> OperonResult<usize> {
        self.headers
            .iter()
            .position(|header| header == name)
            .ok_or_else(|| OperonError::Parse(format!("missing column '{}'", name)))
    }

    fn value<'r>(&self, row: &'r StringRecord, column: usize) -> &'r str {
        row.get(column).unwrap_or("")
    }
}

/// Result of [`select_best`]
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    /// Selected rows projected onto [`OUTPUT_COLUMNS`]
    pub rows: Vec<Vec<String>>,
    /// Organism groups in the input with their row counts, largest first
    pub group_sizes: Vec<(String, usize)>,
}

impl Selection {
    pub fn write<W: Write>(&self, writer: W) -> OperonResult<()> {
        let mut csv_writer = WriterBuilder::new().delimiter(b'\t').from_writer(writer);
        csv_writer.write_record(OUTPUT_COLUMNS).map_err(csv_error)?;
        for row in &self.rows {
            csv_writer.write_record(row).map_err(csv_error)?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}

fn parse_number(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok()
}

pub fn select_best(table: &AssemblyTable) -> OperonResult<Selection> {
    let name_col = table.column(ORGANISM_NAME)?;
    let length_col = table.column(TOTAL_LENGTH)?;
    let n50_col = table.column(CONTIG_N50)?;
    let output_cols = OUTPUT_COLUMNS
        .iter()
        .map(|name| table.column(name))
        .collect::<OperonResult<Vec<_>>>()?;

    let keyed: Vec<(String, &StringRecord)> = table
        .rows
        .iter()
        .map(|row| (organism_key(table.value(row, name_col)), row))
        .collect();

    let mut group_sizes: IndexMap<&str, usize> = IndexMap::new();
    let mut max_length: HashMap<&str, f64> = HashMap::new();
    for (key, row) in &keyed {
        *group_sizes.entry(key.as_str()).or_default() += 1;
        if let Some(length) = parse_number(table.value(row, length_col)) {
            let entry = max_length.entry(key.as_str()).or_insert(length);
            if length > *entry {
                *entry = length;
            }
        }
    }

    let mut candidates: Vec<(&str, &StringRecord, f64)> = keyed
        .iter()
        .filter(|(key, row)| {
            let length = parse_number(table.value(row, length_col));
            match (length, max_length.get(key.as_str())) {
                (Some(length), Some(max)) => length > LENGTH_FRACTION * max,
                _ => false,
            }
        })
        .map(|(key, row)| {
            let n50 = parse_number(table.value(row, n50_col)).unwrap_or(0.0);
            (key.as_str(), *row, n50)
        })
        .collect();

    // Stable, so equal N50 keeps input order
    candidates.sort_by(|a, b| b.2.total_cmp(&a.2));

    let mut best: IndexMap<&str, &StringRecord> = IndexMap::new();
    for (key, row, _) in candidates {
        best.entry(key).or_insert(row);
    }

    let rows = best
        .values()
        .map(|row| {
            output_cols
                .iter()
                .map(|&col| table.value(row, col).to_string())
                .collect()
        })
        .collect();

    let mut sizes: Vec<(String, usize)> = group_sizes
        .into_iter()
        .map(|(key, count)| (key.to_string(), count))
        .collect();
    sizes.sort_by(|a, b| b.1.cmp(&a.1));

    Ok(Selection {
        rows,
        group_sizes: sizes,
    })
}

/// Read `input`, select one assembly per organism and write the result to
/// `output` as TSV.
pub fn select_assemblies<P: AsRef<Path>, Q: AsRef<Path>>(input: P, output: Q) -> OperonResult<Selection> {
    let table = AssemblyTable::from_path(&input)?;
    tracing::info!(
        rows = table.len(),
        path = %input.as_ref().display(),
        "loaded assembly summary"
    );

    let selection = select_best(&table)?;
    for (key, count) in selection.group_sizes.iter().take(TOP_GROUPS) {
        tracing::info!(organism = %key, assemblies = count, "organism group");
    }

    let file = std::fs::File::create(output)?;
    selection.write(std::io::BufWriter::new(file))?;
    Ok(selection)
}
