//! Command-line argument parsing

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use zonelabel::defaults;

/// Normalize and split zoning labels
#[derive(Parser)]
#[command(name = "zonelabel")]
#[command(
    about = "Normalize zoning codes on parcel labels and split compound labels",
    long_about = None
)]
#[command(version)]
pub struct Cli {
    /// Write the detailed log to this file instead of stderr
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Annotate every text entity of a sheet listing
    Annotate(AnnotateArgs),

    /// Show what would happen to individual labels
    Classify {
        /// Labels to classify
        #[arg(required = true)]
        labels: Vec<String>,

        #[command(flatten)]
        rules: RuleArgs,
    },
}

#[derive(Args)]
pub struct AnnotateArgs {
    /// Sheet listing to annotate
    pub sheet: PathBuf,

    /// Where to write the annotated sheet (defaults to overwriting the input)
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Report what would change without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Leave labels that contain the delimiter but do not split untouched
    #[arg(long)]
    pub keep_rejected: bool,

    /// Skip entities on this layer (repeatable)
    #[arg(long = "ignore-layer", value_name = "LAYER")]
    pub ignore_layers: Vec<String>,

    #[command(flatten)]
    pub rules: RuleArgs,
}

#[derive(Args)]
pub struct RuleArgs {
    /// Separator between the two halves of a combination label
    #[arg(long, default_value_t = defaults::DELIMITER)]
    pub delimiter: char,

    /// Displacement of the second half of a split, in label heights
    #[arg(long, default_value_t = defaults::DISPLACEMENT.raw())]
    pub displacement: f64,
}
