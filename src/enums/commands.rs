use std::path::PathBuf;
use clap::Subcommand;
use crate::config::constants::{DEFAULT_COMPLIANCE_REPORT_FILE, DEFAULT_GATE_REPORT_FILE};
use crate::enums::output_format::OutputFormat;
use crate::enums::rule_category::RuleCategory;
use crate::enums::severity::Severity;

#[derive(Subcommand)]
pub enum Commands {
    /// Write a sample configuration file
    Init {
        #[clap(short, long)]
        path: Option<PathBuf>,
        #[clap(long)]
        force: bool,
    },
    /// Load the configuration and compile every rule set
    Validate,
    /// List the loaded pattern rules
    Rules {
        #[clap(long, value_enum)]
        category: Option<RuleCategory>,
    },
    /// Evaluate a single identifier or literal
    Eval {
        text: String,
        #[clap(long, value_enum)]
        category: Option<RuleCategory>,
        /// Stop at the first matching rule
        #[clap(long)]
        first: bool,
        #[clap(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Scan a source tree with the pattern rules
    Scan {
        path: PathBuf,
        #[clap(short, long, value_enum)]
        format: Option<OutputFormat>,
        #[clap(short, long)]
        output: Option<PathBuf>,
        #[clap(short, long)]
        suppressions: Option<PathBuf>,
        #[clap(long, value_enum)]
        fail_on: Option<Severity>,
    },
    /// Map a SARIF log onto compliance controls
    ProcessSarif {
        sarif_file: PathBuf,
        #[clap(short, long, default_value = DEFAULT_COMPLIANCE_REPORT_FILE)]
        output: PathBuf,
    },
    /// Evaluate security quality gates over a directory of SARIF logs
    Gate {
        #[clap(long)]
        sarif_dir: PathBuf,
        #[clap(long)]
        compliance_file: Option<PathBuf>,
        #[clap(long)]
        no_fail_on_critical: bool,
        #[clap(long)]
        no_fail_on_high: bool,
        #[clap(long)]
        max_medium: Option<usize>,
        #[clap(short, long, default_value = DEFAULT_GATE_REPORT_FILE)]
        output: PathBuf,
    },
    /// Generate compliance reports from a directory of SARIF logs
    Report {
        #[clap(long)]
        sarif_dir: PathBuf,
        #[clap(long)]
        output_dir: PathBuf,
        /// Comma separated: RBI, ISO27001, SEBI
        #[clap(long, default_value = "RBI,ISO27001,SEBI")]
        standards: String,
        #[clap(long)]
        template: Option<PathBuf>,
    },
    /// Check a dependency list against an approval policy
    Policy {
        #[clap(long)]
        policy: PathBuf,
        #[clap(long)]
        dependencies: PathBuf,
        #[clap(short, long)]
        suppressions: Option<PathBuf>,
        #[clap(short, long)]
        output: Option<PathBuf>,
    },
}
