#![allow(dead_code)]

use anyhow::Result;
use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const ASSEMBLY: &str = "GCF_000123.4_Genus_species_strainX";

/// 300 bases of a repeating pattern
pub fn contig_sequence() -> String {
    "ACGTTGCA".chars().cycle().take(300).collect()
}

/// FASTA with a single contig `C1`, wrapped at 60 columns
pub fn create_contig_fasta() -> String {
    let sequence = contig_sequence();
    let mut content = String::from(">C1 test contig\n");
    for chunk in sequence.as_bytes().chunks(60) {
        content.push_str(std::str::from_utf8(chunk).unwrap());
        content.push('\n');
    }
    content
}

/// Annotation with one forward 16S/23S cluster on `C1`
pub fn create_rrna_gff() -> String {
    [
        "##gff-version 3",
        "C1\tRefSeq\tregion\t1\t300\t.\t+\t.\tID=C1:1..300",
        "C1\tRefSeq\trRNA\t10\t50\t.\t+\t.\tID=rna-1;product=16S ribosomal RNA",
        "C1\tRefSeq\trRNA\t60\t200\t.\t+\t.\tID=rna-2;product=23S ribosomal RNA",
        "",
    ]
    .join("\n")
}

pub fn operon_cmd() -> Command {
    let mut cmd = Command::cargo_bin("operon").unwrap();
    cmd.env("OPERON_SILENT", "1").env_remove("RUST_LOG");
    cmd
}

/// Count sequences in a FASTA file
pub fn count_sequences(path: &Path) -> Result<usize> {
    let content = fs::read_to_string(path)?;
    Ok(content.lines().filter(|line| line.starts_with('>')).count())
}

/// Temporary FNA/GFF/output directory layout
pub struct TestEnvironment {
    pub temp_dir: TempDir,
    pub fna_dir: PathBuf,
    pub gff_dir: PathBuf,
    pub output_dir: PathBuf,
}

impl TestEnvironment {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let fna_dir = temp_dir.path().join("fna");
        let gff_dir = temp_dir.path().join("gff");
        let output_dir = temp_dir.path().join("output");

        fs::create_dir_all(&fna_dir)?;
        fs::create_dir_all(&gff_dir)?;

        Ok(Self {
            temp_dir,
            fna_dir,
            gff_dir,
            output_dir,
        })
    }

    /// Write `<name>.gff` and `<name>.fna`
    pub fn add_pair(&self, name: &str, gff: &str, fasta: &str) -> Result<()> {
        fs::write(self.gff_dir.join(format!("{}.gff", name)), gff)?;
        fs::write(self.fna_dir.join(format!("{}.fna", name)), fasta)?;
        Ok(())
    }

    pub fn output_path(&self, name: &str) -> PathBuf {
        self.output_dir.join(name)
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.temp_dir.path().join(name)
    }

    /// `operon extract <fna> <gff> <output>` ready for extra flags
    pub fn extract_cmd(&self) -> Command {
        let mut cmd = operon_cmd();
        cmd.arg("extract")
            .arg(&self.fna_dir)
            .arg(&self.gff_dir)
            .arg(&self.output_dir);
        cmd
    }
}
