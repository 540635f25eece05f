//! storecheck CLI: run the bookshop end-to-end suites
//!
//! ## Usage
//!
//! ```bash
//! storecheck list                          # Show every case
//! storecheck run --suite api               # REST API cases only
//! storecheck run --filter navigation -v    # UI navigation cases, with logs
//! storecheck run --fail-fast --report target/storecheck/report.json
//! ```

use clap::Parser;
use serde::Serialize;
use std::process::ExitCode;
use storecheck::scenarios;
use storecheck::{Fixtures, Scenario, Suite};
use storecheck_cli::{
    init_logging, Cli, CliConfig, CliError, CliResult, ColorChoice, Commands, ListArgs, RunArgs,
    SelectionArgs, SourceArgs, SuiteRunner, Verbosity,
};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> CliResult<()> {
    let cli = Cli::parse();
    let verbosity = Verbosity::from_flags(cli.quiet, cli.verbose);
    init_logging(verbosity)?;

    let color: ColorChoice = cli.color.into();
    let config = CliConfig::new().with_verbosity(verbosity).with_color(color);

    match cli.command {
        Commands::Run(args) => run_suite(config, args).await,
        Commands::List(args) => run_list(&args),
    }
}

fn load(sources: &SourceArgs, selection: &SelectionArgs) -> CliResult<(Fixtures, Vec<Scenario>)> {
    let fixtures = Fixtures::load(&sources.config, &sources.data)?;
    let cases = scenarios::select(
        scenarios::catalog(&fixtures)?,
        selection.suite.suite(),
        selection.filter.as_deref(),
    );
    Ok((fixtures, cases))
}

async fn run_suite(config: CliConfig, args: RunArgs) -> CliResult<()> {
    let (fixtures, cases) = load(&args.sources, &args.selection)?;
    let config = config
        .with_fail_fast(args.fail_fast)
        .with_report(args.report);

    let report = SuiteRunner::new(config).run(fixtures, cases).await?;
    if report.all_passed() {
        Ok(())
    } else {
        Err(CliError::test_execution(format!(
            "{} of {} cases failed",
            report.failed_count(),
            report.total()
        )))
    }
}

#[derive(Serialize)]
struct ListedCase {
    name: String,
    suite: Suite,
}

fn run_list(args: &ListArgs) -> CliResult<()> {
    let (_, cases) = load(&args.sources, &args.selection)?;

    if args.json {
        let listed: Vec<_> = cases
            .iter()
            .map(|case| ListedCase {
                name: case.name(),
                suite: case.suite(),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&listed)?);
    } else {
        for case in &cases {
            println!("{}", case.name());
        }
    }
    Ok(())
}
