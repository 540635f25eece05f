//! CLI command definitions using clap

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use storecheck::Suite;

/// storecheck: end-to-end checks for the bookshop API and web UI
#[derive(Parser, Debug)]
#[command(name = "storecheck")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorArg,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run scenarios against the live shop
    Run(RunArgs),

    /// List scenarios without running them
    List(ListArgs),
}

/// Where settings and test data are read from
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// INI file with [ui] and [api] sections
    #[arg(long, default_value = "test_config.ini")]
    pub config: PathBuf,

    /// JSON file with tokens and case parameters
    #[arg(long, default_value = "test_data.json")]
    pub data: PathBuf,
}

/// Which cases to pick from the catalog
#[derive(Args, Debug, Clone)]
pub struct SelectionArgs {
    /// Suite to run
    #[arg(short, long, value_enum, default_value_t = SuiteArg::All)]
    pub suite: SuiteArg,

    /// Keep only cases whose name contains this text
    #[arg(short, long)]
    pub filter: Option<String>,
}

/// Arguments for the run command
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Input files
    #[command(flatten)]
    pub sources: SourceArgs,

    /// Case selection
    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Stop at the first failed case and skip the rest
    #[arg(long)]
    pub fail_fast: bool,

    /// Write the JSON report to this path
    #[arg(short, long)]
    pub report: Option<PathBuf>,
}

/// Arguments for the list command
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Input files
    #[command(flatten)]
    pub sources: SourceArgs,

    /// Case selection
    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Print the list as JSON
    #[arg(long)]
    pub json: bool,
}

/// Suite selector
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SuiteArg {
    /// REST API cases only
    Api,
    /// Browser cases only
    Ui,
    /// Every case
    #[default]
    All,
}

impl SuiteArg {
    /// Suite filter for the catalog; `None` keeps both
    #[must_use]
    pub const fn suite(self) -> Option<Suite> {
        match self {
            Self::Api => Some(Suite::Api),
            Self::Ui => Some(Suite::Ui),
            Self::All => None,
        }
    }
}

/// Color output argument
#[derive(ValueEnum, Clone, Debug, Default)]
pub enum ColorArg {
    /// Detect terminal
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorArg> for crate::config::ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}
