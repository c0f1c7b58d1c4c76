pub mod commands;
pub mod output;
pub mod progress;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "operon",
    version,
    about = "Extract gene-ordered regions from paired GFF/FASTA assemblies",
    long_about = "Operon scans genome annotations for runs of required genes (for example the \
                  16S-23S rRNA operon) appearing in forward or reversed order, slices the \
                  matching regions out of the assembly sequence and writes them as FASTA."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Number of threads to use (0 = config value, or all available)
    #[arg(short = 'j', long, default_value = "0", global = true)]
    pub threads: usize,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract gene clusters from a directory of annotation/sequence pairs
    Extract(commands::extract::ExtractArgs),

    /// Pick one representative assembly per organism from an assembly summary
    Select(commands::select::SelectArgs),
}
