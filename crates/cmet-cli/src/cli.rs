use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "cmet")]
#[command(about = "Collect metrics for compression engines", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (default: platform config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run each engine on sample text and record metrics
    Collect(CollectArgs),

    /// List registered engines
    Engines,
}

#[derive(Args)]
pub struct CollectArgs {
    /// Where to write the JSON report
    #[arg(long, default_value = "engine_metrics.json")]
    pub output: PathBuf,

    /// Use the deterministic mock embedder instead of real models
    #[arg(long)]
    pub use_mock: bool,

    /// Sample text file (default: bundled moon landing text)
    #[arg(long)]
    pub sample: Option<PathBuf>,

    /// Use the deprecated whitespace-ceiling similarity metric
    #[arg(long)]
    pub legacy: bool,

    /// Models to score (default from config)
    #[arg(long = "model")]
    pub models: Vec<String>,

    /// Token budget for compressing engines (default from config: 100)
    #[arg(long)]
    pub tokens: Option<usize>,
}
