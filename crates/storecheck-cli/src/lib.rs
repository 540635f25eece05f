//! storecheck CLI library
//!
//! Command-line front end for the storecheck suites: argument parsing,
//! logging setup, progress output and the suite runner.

#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]

mod commands;
mod config;
mod error;
mod output;
mod runner;

pub use commands::{Cli, ColorArg, Commands, ListArgs, RunArgs, SelectionArgs, SourceArgs, SuiteArg};
pub use config::{init_logging, CliConfig, ColorChoice, Verbosity};
pub use error::{CliError, CliResult};
pub use output::ProgressReporter;
pub use runner::SuiteRunner;
