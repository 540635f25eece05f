//! Checks against the live shop.
//!
//! Ignored by default: they need network access, a valid token in
//! `test_data.json` and, for the UI case, chromium. Run with
//! `cargo test -p storecheck --features browser -- --ignored`.

use std::path::PathBuf;
use storecheck::scenarios::{self, run_scenarios};
use storecheck::{FailureMode, Fixtures, ScenarioContext, Suite};

fn workspace_file(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../..").join(name)
}

fn live_fixtures() -> Fixtures {
    Fixtures::load(workspace_file("test_config.ini"), workspace_file("test_data.json")).unwrap()
}

#[tokio::test]
#[ignore = "requires network access and a valid API token"]
async fn test_live_api_suite() {
    let fx = live_fixtures();
    let cases = scenarios::select(scenarios::catalog(&fx).unwrap(), Some(Suite::Api), None);
    let ctx = ScenarioContext::api_only(fx);

    let report = run_scenarios(cases, &ctx, FailureMode::CollectAll, |_| {}).await;
    assert!(report.all_passed(), "{}", report.to_json().unwrap());
}

#[tokio::test]
#[ignore = "requires network access"]
async fn test_live_track_endpoint() {
    let identity = live_fixtures().identity_api().unwrap();
    let uri = identity.current_url().await.unwrap();
    assert!(uri.contains("track"));
}

#[cfg(feature = "browser")]
#[tokio::test]
#[ignore = "requires network access and chromium"]
async fn test_live_ui_navigation() {
    use storecheck::BrowserSession;

    let fx = live_fixtures();
    let cases = scenarios::select(scenarios::catalog(&fx).unwrap(), Some(Suite::Ui), Some("navigation"));
    let driver = fx.launch_browser().await.unwrap();

    let report = BrowserSession::scoped(driver, |driver| async move {
        let ctx = ScenarioContext::with_browser(fx, driver);
        Ok(run_scenarios(cases, &ctx, FailureMode::CollectAll, |_| {}).await)
    })
    .await
    .unwrap();
    assert!(report.all_passed(), "{}", report.to_json().unwrap());
}
