use std::path::PathBuf;
use clap::Parser;
use crate::enums::commands::Commands;

#[derive(Parser)]
#[clap(name = "bfsi-guard", version)]
#[clap(about = "Pattern-rule scanner and compliance gate for BFSI codebases", long_about = None)]
pub struct Cli {
    /// Configuration file (defaults to ./bfsi-guard.toml, then ~/bfsi-guard/config.toml)
    #[clap(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG says otherwise
    #[clap(short, long, global = true)]
    pub verbose: bool,

    #[clap(subcommand)]
    pub command: Commands,
}
