//! Suite runner: picks the context, drives the harness, reports progress

use crate::config::CliConfig;
use crate::error::CliResult;
use crate::output::ProgressReporter;
use std::time::Instant;
use storecheck::scenarios::run_scenarios;
use storecheck::{Fixtures, Scenario, ScenarioContext, Suite, SuiteReport};

/// Runs a selection of scenarios and reports as it goes
#[derive(Debug)]
pub struct SuiteRunner {
    config: CliConfig,
    reporter: ProgressReporter,
}

impl SuiteRunner {
    /// Create a new runner
    #[must_use]
    pub fn new(config: CliConfig) -> Self {
        let reporter =
            ProgressReporter::new(config.color.should_color(), config.verbosity.is_quiet());
        Self { config, reporter }
    }

    /// Run `cases` in order.
    ///
    /// A browser is launched only when a UI case is selected, and is quit
    /// before this returns. The JSON report is written when a path is
    /// configured.
    pub async fn run(&mut self, fixtures: Fixtures, cases: Vec<Scenario>) -> CliResult<SuiteReport> {
        let start = Instant::now();

        let report = if cases.is_empty() {
            self.reporter.warning("No cases selected");
            SuiteReport::start()
        } else {
            self.reporter.header(&format!("Running {} cases", cases.len()));
            self.reporter
                .start_progress(cases.len() as u64, "starting...");

            let needs_browser = cases.iter().any(|case| case.suite() == Suite::Ui);
            let report = if needs_browser {
                self.run_with_browser(fixtures, cases).await
            } else {
                Ok(self.execute(&ScenarioContext::api_only(fixtures), cases).await)
            };

            self.reporter.finish();
            let report = report?;
            self.reporter.summary(
                report.passed_count(),
                report.failed_count(),
                report.skipped_count(),
                start.elapsed(),
            );
            report
        };

        if let Some(path) = &self.config.report {
            report.write(path)?;
            self.reporter
                .info(&format!("Report written to {}", path.display()));
        }

        Ok(report)
    }

    #[cfg(feature = "browser")]
    async fn run_with_browser(
        &self,
        fixtures: Fixtures,
        cases: Vec<Scenario>,
    ) -> CliResult<SuiteReport> {
        use storecheck::BrowserSession;

        self.reporter.set_message("launching browser");
        let driver = fixtures.launch_browser().await?;
        let report = BrowserSession::scoped(driver, |driver| async move {
            let ctx = ScenarioContext::with_browser(fixtures, driver);
            Ok(self.execute(&ctx, cases).await)
        })
        .await?;
        Ok(report)
    }

    #[cfg(not(feature = "browser"))]
    async fn run_with_browser(
        &self,
        _fixtures: Fixtures,
        _cases: Vec<Scenario>,
    ) -> CliResult<SuiteReport> {
        Err(crate::error::CliError::invalid_argument(
            "UI cases need the `browser` feature; rebuild with it or pass --suite api",
        ))
    }

    async fn execute(&self, ctx: &ScenarioContext, cases: Vec<Scenario>) -> SuiteReport {
        let reporter = &self.reporter;
        run_scenarios(cases, ctx, self.config.failure_mode(), |result| {
            reporter.case_result(result);
            reporter.set_message(&result.name);
            reporter.increment(1);
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ColorChoice, Verbosity};
    use storecheck::{Settings, TestData};

    fn fixtures() -> Fixtures {
        Fixtures::new(
            Settings::from_ini_str(
                "[api]\nbase_url = http://127.0.0.1:9\ncart = /cart\nrequest_timeout = 1\n",
            )
            .unwrap(),
            TestData::from_json_str(r#"{"token": "t", "user_agent": "ua"}"#).unwrap(),
        )
    }

    fn runner(config: CliConfig) -> SuiteRunner {
        SuiteRunner::new(
            config
                .with_verbosity(Verbosity::Quiet)
                .with_color(ColorChoice::Never),
        )
    }

    mod runner_tests {
        use super::*;

        #[tokio::test]
        async fn test_empty_selection_passes() {
            let report = runner(CliConfig::new()).run(fixtures(), Vec::new()).await.unwrap();
            assert_eq!(report.total(), 0);
            assert!(report.all_passed());
        }

        #[tokio::test]
        async fn test_empty_selection_still_writes_report() {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("report.json");
            runner(CliConfig::new().with_report(Some(path.clone())))
                .run(fixtures(), Vec::new())
                .await
                .unwrap();

            let report: SuiteReport =
                serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
            assert_eq!(report.total(), 0);
        }

        #[tokio::test]
        async fn test_browser_launch_failure_clears_progress() {
            let fixtures = Fixtures::new(
                Settings::from_ini_str("[ui]\nwindow_width = -1\n").unwrap(),
                TestData::from_json_str("{}").unwrap(),
            );
            let mut runner = SuiteRunner::new(CliConfig::new().with_color(ColorChoice::Never));

            let result = runner.run(fixtures, vec![Scenario::UiAddToCart]).await;

            assert!(result.is_err());
            assert!(runner.reporter.is_idle());
        }

        #[tokio::test]
        async fn test_api_failures_are_reported_not_raised() {
            let cases = vec![Scenario::CartClear, Scenario::AddToCart];
            let report = runner(CliConfig::new()).run(fixtures(), cases).await.unwrap();
            assert_eq!(report.failed_count(), 2);
        }

        #[tokio::test]
        async fn test_fail_fast_skips_rest() {
            let cases = vec![Scenario::CartClear, Scenario::AddToCart];
            let report = runner(CliConfig::new().with_fail_fast(true))
                .run(fixtures(), cases)
                .await
                .unwrap();
            assert_eq!(report.failed_count(), 1);
            assert_eq!(report.skipped_count(), 1);
        }

        #[tokio::test]
        async fn test_report_is_written() {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("report.json");
            let config = CliConfig::new().with_report(Some(path.clone()));
            runner(config)
                .run(fixtures(), vec![Scenario::CartClear])
                .await
                .unwrap();

            let text = std::fs::read_to_string(path).unwrap();
            let report: SuiteReport = serde_json::from_str(&text).unwrap();
            assert_eq!(report.results[0].name, "api::cart_clear");
        }
    }
}
