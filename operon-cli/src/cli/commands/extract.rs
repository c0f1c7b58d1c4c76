use anyhow::{Context, Result};
use clap::Args;
use colored::*;
use operon_bio::pipeline::{process_pair, ExtractionParams, FilePair, PairReport};
use operon_core::{load_config, save_config, Config, OperonResult};
use operon_utils::parallel::{configure_thread_pool, should_parallelize};
use rayon::prelude::*;
use std::path::{Path, PathBuf};

use crate::cli::output;
use crate::cli::progress::create_progress_bar;

#[derive(Args)]
pub struct ExtractArgs {
    /// Directory holding `<name>.fna` (or `<name>.fna.gz`) sequence files
    #[arg(value_name = "FNA_DIR")]
    pub fna_dir: PathBuf,

    /// Directory holding `<name>.gff` annotation files
    #[arg(value_name = "GFF_DIR")]
    pub gff_dir: PathBuf,

    /// Directory receiving `<name>_<GENES>.fna` outputs (created if missing)
    #[arg(value_name = "OUTPUT_DIR")]
    pub output_dir: PathBuf,

    /// Required genes in order, comma separated (e.g. 16s,23s)
    #[arg(short = 'g', long, value_delimiter = ',')]
    pub genes: Option<Vec<String>>,

    /// Annotation feature type to match (case-insensitive)
    #[arg(short = 't', long)]
    pub feature_type: Option<String>,

    /// Exclusive upper bound on cluster span in bases
    #[arg(short = 'm', long)]
    pub max_len: Option<usize>,

    /// TOML configuration file
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Save the effective configuration to this path
    #[arg(long, value_name = "FILE")]
    pub write_config: Option<PathBuf>,

    /// Write a JSON report of every processed pair
    #[arg(long, value_name = "FILE")]
    pub report: Option<PathBuf>,
}

/// Load the config file (if any) and apply command-line overrides
pub fn effective_config(args: &ExtractArgs) -> OperonResult<Config> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => Config::default(),
    };

    if let Some(genes) = &args.genes {
        config.extraction.genes = genes.clone();
    }
    if let Some(feature_type) = &args.feature_type {
        config.extraction.feature_type = feature_type.clone();
    }
    if let Some(max_len) = args.max_len {
        config.extraction.max_len = max_len;
    }

    config.validate()?;
    Ok(config)
}

/// Pair every `*.gff` in `gff_dir` with its sequence file, sorted by name
pub fn discover_pairs(fna_dir: &Path, gff_dir: &Path, output_dir: &Path) -> Result<Vec<FilePair>> {
    let pattern = format!(
        "{}/*.gff",
        glob::Pattern::escape(&gff_dir.to_string_lossy())
    );

    let mut gff_files: Vec<PathBuf> = glob::glob(&pattern)
        .with_context(|| format!("Invalid annotation directory {:?}", gff_dir))?
        .filter_map(|entry| match entry {
            Ok(path) => Some(path),
            Err(e) => {
                tracing::warn!("Skipping unreadable entry: {}", e);
                None
            }
        })
        .filter(|path| path.is_file())
        .collect();
    gff_files.sort();

    let pairs = gff_files
        .into_iter()
        .filter_map(|gff| {
            let stem = gff.file_stem()?.to_str()?.to_string();
            let source_id = format!("{}.fna", stem);

            let plain = fna_dir.join(&source_id);
            let gzipped = fna_dir.join(format!("{}.gz", source_id));
            let fna = if !plain.exists() && gzipped.exists() {
                gzipped
            } else {
                plain
            };

            Some(FilePair::new(gff, fna, output_dir.join(&stem), source_id))
        })
        .collect();

    Ok(pairs)
}

pub fn run(args: ExtractArgs, threads: usize) -> Result<()> {
    let config = effective_config(&args)?;

    if let Some(path) = &args.write_config {
        save_config(path, &config)?;
        output::success(&format!("Configuration written to {}", path.display()));
    }

    let threads = if threads == 0 {
        config.performance.threads
    } else {
        threads
    };
    let threads = configure_thread_pool(threads)?;
    tracing::info!("Using {} threads", threads);

    let params = ExtractionParams::from_config(&config)?;

    std::fs::create_dir_all(&args.output_dir)?;
    let pairs = discover_pairs(&args.fna_dir, &args.gff_dir, &args.output_dir)?;
    if pairs.is_empty() {
        output::warning(&format!("No .gff files found in {}", args.gff_dir.display()));
        return Ok(());
    }

    let pb = create_progress_bar(pairs.len() as u64, "Extracting clusters...");
    let process = |pair: &FilePair| {
        let result = process_pair(pair, &params);
        pb.inc(1);
        result
    };

    let results: Vec<OperonResult<PairReport>> = if should_parallelize(pairs.len(), 1) {
        pairs.par_iter().map(process).collect()
    } else {
        pairs.iter().map(process).collect()
    };
    pb.finish_and_clear();

    let mut reports = Vec::with_capacity(results.len());
    let mut failures = 0usize;
    for (pair, result) in pairs.iter().zip(results) {
        match result {
            Ok(report) => reports.push(report),
            Err(e) => {
                failures += 1;
                tracing::error!(gff = %pair.gff.display(), "{}", e);
                output::error(&format!("{}: {}", pair.gff.display(), e));
            }
        }
    }

    print_summary(&params, pairs.len(), &reports, failures);

    if let Some(path) = &args.report {
        super::save_report(&reports, path)?;
        output::success(&format!("Report written to {}", path.display()));
    }

    if failures > 0 {
        anyhow::bail!("{} of {} file pairs failed", failures, pairs.len());
    }
    Ok(())
}

fn print_summary(params: &ExtractionParams, total: usize, reports: &[PairReport], failures: usize) {
    let written = reports.iter().filter(|r| r.output.is_some()).count();
    let clusters: usize = reports.iter().map(|r| r.clusters).sum();
    let records: usize = reports.iter().map(|r| r.records).sum();
    let diagnostics: usize = reports.iter().map(|r| r.diagnostics.len()).sum();

    output::section_header(&format!("{} extraction", params.genes.file_suffix()));
    output::tree_item(false, "File pairs", Some(&output::format_number(total)));
    output::tree_item(false, "Files written", Some(&output::format_number(written)));
    output::tree_item(false, "Clusters", Some(&output::format_number(clusters)));
    output::tree_item(false, "Records", Some(&output::format_number(records)));
    output::tree_item(false, "Diagnostics", Some(&output::format_number(diagnostics)));

    let failed = output::format_number(failures);
    let failed = if failures > 0 {
        failed.red().bold().to_string()
    } else {
        failed.green().to_string()
    };
    output::tree_item(true, "Failures", Some(&failed));
}
