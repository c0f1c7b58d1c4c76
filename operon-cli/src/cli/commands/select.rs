use anyhow::Result;
use clap::Args;
use operon_bio::assembly::select_assemblies;
use std::path::PathBuf;

use crate::cli::output;

/// Largest organism groups shown after selection
const SHOWN_GROUPS: usize = 12;

#[derive(Args)]
pub struct SelectArgs {
    /// Tab-separated NCBI assembly summary with a header row
    #[arg(value_name = "INPUT_TSV")]
    pub input: PathBuf,

    /// Destination for the selected assemblies
    #[arg(value_name = "OUTPUT_TSV")]
    pub output: PathBuf,
}

pub fn run(args: SelectArgs) -> Result<()> {
    let selection = select_assemblies(&args.input, &args.output)?;

    output::section_header("Assembly selection");
    output::tree_item(
        false,
        "Organisms",
        Some(&output::format_number(selection.group_sizes.len())),
    );
    output::tree_item(
        true,
        "Selected",
        Some(&output::format_number(selection.rows.len())),
    );

    if !selection.group_sizes.is_empty() {
        output::section_header("Largest groups");
        let shown: Vec<_> = selection.group_sizes.iter().take(SHOWN_GROUPS).collect();
        for (i, (organism, count)) in shown.iter().enumerate() {
            let label = if organism.is_empty() { "(unnamed)" } else { organism.as_str() };
            output::tree_item(i + 1 == shown.len(), label, Some(&output::format_number(*count)));
        }
    }

    output::success(&format!("Selection written to {}", args.output.display()));
    Ok(())
}
