//! Script-backed dashboard data with explicit fallback reporting.

use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

use super::mock::mock_dashboard;
use super::runner::{ScriptError, ScriptRunner};
use super::types::{DashboardData, DashboardResponse, RefreshReport};
use crate::outcome::{FallbackReason, Outcome};

const FAST_SCRIPT: &str = "fast_air_quality.py";
const REFRESH_SCRIPT: &str = "run_air_quality_apis.py";
const COMBINED_DATA_FILE: &str = "combined_data.json";
const METADATA_FILE: &str = "metadata.json";
const DEFAULT_FETCH_TIME_SECS: f64 = 0.1;

/// Noise the data scripts emit on every run; not worth a warning.
const IGNORED_STDERR: &str = "InsecureRequestWarning";

/// Where the data scripts live and write their output.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub project_dir: PathBuf,
    pub data_dir: PathBuf,
}

impl DashboardConfig {
    pub fn new(project_dir: impl Into<PathBuf>) -> Self {
        let project_dir = project_dir.into();
        let data_dir = project_dir.join("data").join("api_data");
        Self {
            project_dir,
            data_dir,
        }
    }

    /// Locations searched, in order, for the fast data script.
    pub fn fast_script_candidates(&self) -> Vec<PathBuf> {
        let root = &self.project_dir;
        vec![
            root.join(FAST_SCRIPT),
            root.join("scripts").join(FAST_SCRIPT),
            root.join("app").join("api").join("fast-air-quality").join(FAST_SCRIPT),
            root.join("app").join("api").join(FAST_SCRIPT),
        ]
    }

    pub fn find_fast_script(&self) -> Option<PathBuf> {
        self.fast_script_candidates().into_iter().find(|p| p.exists())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FetchOptions {
    /// Ask the script to bypass its cache.
    pub force: bool,
    /// Skip the script entirely and serve the fixed payload.
    pub mock: bool,
}

fn warn_on_stderr(stderr: &str) {
    let stderr = stderr.trim();
    if !stderr.is_empty() && !stderr.contains(IGNORED_STDERR) {
        warn!(stderr, "Data script wrote to stderr, continuing");
    }
}

fn fallback(reason: FallbackReason) -> Outcome<DashboardResponse> {
    warn!(reason = %reason, "Serving mock dashboard data");
    Outcome::fallback(mock_dashboard(), reason)
}

async fn read_json(path: &Path) -> Result<Option<Value>, String> {
    match tokio::fs::read_to_string(path).await {
        Ok(content) => serde_json::from_str(&content)
            .map(Some)
            .map_err(|e| e.to_string()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.to_string()),
    }
}

/// Seconds the script reported for its fetch, or 0.1 when absent or zero.
fn reported_fetch_time(data: &DashboardData) -> f64 {
    data.metadata
        .as_ref()
        .map(|m| m.fetch_time_seconds)
        .filter(|t| *t != 0.0)
        .unwrap_or(DEFAULT_FETCH_TIME_SECS)
}

/// Runs the fast data script and returns its combined output.
///
/// Every failure path serves the mock payload, tagged with the reason, so
/// callers can tell live data from stand-in data.
#[tracing::instrument(skip(config, runner), fields(project_dir = %config.project_dir.display()))]
pub async fn fast_dashboard<R: ScriptRunner>(
    config: &DashboardConfig,
    runner: &R,
    options: FetchOptions,
) -> Outcome<DashboardResponse> {
    if options.mock {
        info!("Mock data requested");
        return Outcome::fallback(mock_dashboard(), FallbackReason::Requested);
    }

    if let Err(e) = tokio::fs::create_dir_all(&config.data_dir).await {
        error!(dir = %config.data_dir.display(), error = %e, "Failed to create data directory");
    }

    let Some(script) = config.find_fast_script() else {
        return fallback(FallbackReason::ScriptMissing);
    };

    let args: &[&str] = if options.force { &["--force"] } else { &[] };
    match runner.run(&script, args).await {
        Ok(output) => warn_on_stderr(&output.stderr),
        Err(ScriptError::Timeout(_)) => return fallback(FallbackReason::Timeout),
        Err(e) => return fallback(FallbackReason::ScriptFailed(e.to_string())),
    }

    let data_path = config.data_dir.join(COMBINED_DATA_FILE);
    let value = match read_json(&data_path).await {
        Ok(Some(value)) => value,
        Ok(None) => {
            error!(path = %data_path.display(), "No data file available");
            return fallback(FallbackReason::DataUnavailable);
        }
        Err(e) => return fallback(FallbackReason::Unparsable(e)),
    };

    match serde_json::from_value::<DashboardData>(value) {
        Ok(data) => {
            info!("Dashboard data fetched");
            Outcome::Ok(DashboardResponse {
                success: true,
                message: "Data fetched successfully".to_string(),
                fetch_time: reported_fetch_time(&data),
                data,
            })
        }
        Err(e) => fallback(FallbackReason::Unparsable(e.to_string())),
    }
}

/// Runs the full source refresh script.
///
/// There is no stand-in for a refresh: any failure, including output on
/// stderr, is reported as [`Outcome::Error`].
#[tracing::instrument(skip(config, runner), fields(project_dir = %config.project_dir.display()))]
pub async fn refresh_sources<R: ScriptRunner>(
    config: &DashboardConfig,
    runner: &R,
) -> Outcome<RefreshReport> {
    let script = config.project_dir.join(REFRESH_SCRIPT);
    if !script.exists() {
        error!(script = %script.display(), "Refresh script not found");
        return Outcome::error(format!("{} not found", script.display()));
    }

    let output = match runner.run(&script, &[]).await {
        Ok(output) => output,
        Err(e) => {
            error!(error = %e, "Refresh script failed");
            return Outcome::error(e);
        }
    };

    if !output.stderr.trim().is_empty() {
        error!(stderr = %output.stderr.trim(), "Refresh script reported errors");
        return Outcome::error("Error fetching air quality data");
    }

    let metadata_path = config.data_dir.join(METADATA_FILE);
    let metadata = match read_json(&metadata_path).await {
        Ok(metadata) => metadata,
        Err(e) => {
            error!(path = %metadata_path.display(), error = %e, "Unreadable refresh metadata");
            return Outcome::error(format!("Failed to read refresh metadata: {e}"));
        }
    };

    info!(has_metadata = metadata.is_some(), "Sources refreshed");
    Outcome::Ok(RefreshReport {
        success: true,
        message: "Data fetched successfully".to_string(),
        output: output.stdout,
        metadata,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::runner::ScriptOutput;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::time::Duration;

    /// Fake runner that optionally writes files into the data dir, then
    /// returns a canned result.
    struct FakeRunner {
        writes: Vec<(PathBuf, String)>,
        result: Mutex<Option<Result<ScriptOutput, ScriptError>>>,
        calls: Mutex<Vec<Vec<String>>>,
    }

    impl FakeRunner {
        fn new(result: Result<ScriptOutput, ScriptError>) -> Self {
            Self {
                writes: Vec::new(),
                result: Mutex::new(Some(result)),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn writing(mut self, path: PathBuf, content: &str) -> Self {
            self.writes.push((path, content.to_string()));
            self
        }
    }

    #[async_trait]
    impl ScriptRunner for FakeRunner {
        async fn run(&self, _script: &Path, args: &[&str]) -> Result<ScriptOutput, ScriptError> {
            self.calls
                .lock()
                .unwrap()
                .push(args.iter().map(|a| a.to_string()).collect());
            for (path, content) in &self.writes {
                std::fs::write(path, content).unwrap();
            }
            self.result.lock().unwrap().take().unwrap()
        }
    }

    fn ok_output(stderr: &str) -> Result<ScriptOutput, ScriptError> {
        Ok(ScriptOutput {
            stdout: "done".into(),
            stderr: stderr.into(),
        })
    }

    fn project_with_script(script: &str) -> (tempfile::TempDir, DashboardConfig) {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(script), "print('hi')").unwrap();
        let config = DashboardConfig::new(dir.path());
        (dir, config)
    }

    fn live_payload() -> String {
        let mut data = serde_json::to_value(mock_dashboard().data).unwrap();
        data["current_aqi"]["aqi"] = serde_json::json!(88);
        data["metadata"]["fetch_time_seconds"] = serde_json::json!(0.42);
        data.to_string()
    }

    #[tokio::test]
    async fn test_live_data_without_metadata_is_served() {
        let (_dir, config) = project_with_script(FAST_SCRIPT);
        std::fs::create_dir_all(&config.data_dir).unwrap();
        let mut data: serde_json::Value = serde_json::from_str(&live_payload()).unwrap();
        let object = data.as_object_mut().unwrap();
        object.remove("metadata");
        object.remove("detailed_weather");
        let runner = FakeRunner::new(ok_output(""))
            .writing(config.data_dir.join(COMBINED_DATA_FILE), &data.to_string());

        let outcome = fast_dashboard(&config, &runner, FetchOptions::default()).await;

        assert!(outcome.is_ok());
        let response = outcome.data().unwrap();
        assert_eq!(response.data.current_aqi.aqi, 88.0);
        assert_eq!(response.fetch_time, 0.1);
        assert!(response.data.metadata.is_none());
    }

    #[tokio::test]
    async fn test_mock_requested() {
        let dir = tempfile::tempdir().unwrap();
        let config = DashboardConfig::new(dir.path());
        let runner = FakeRunner::new(ok_output(""));

        let outcome = fast_dashboard(&config, &runner, FetchOptions { force: false, mock: true }).await;

        assert_eq!(outcome.fallback_reason(), Some(&FallbackReason::Requested));
        assert!(runner.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_script_missing() {
        let dir = tempfile::tempdir().unwrap();
        let config = DashboardConfig::new(dir.path());
        let runner = FakeRunner::new(ok_output(""));

        let outcome = fast_dashboard(&config, &runner, FetchOptions::default()).await;

        assert_eq!(outcome.fallback_reason(), Some(&FallbackReason::ScriptMissing));
        assert!(config.data_dir.exists());
    }

    #[tokio::test]
    async fn test_script_in_nested_location_is_found() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("scripts")).unwrap();
        std::fs::write(dir.path().join("scripts").join(FAST_SCRIPT), "").unwrap();
        let config = DashboardConfig::new(dir.path());

        assert_eq!(
            config.find_fast_script(),
            Some(dir.path().join("scripts").join(FAST_SCRIPT))
        );
    }

    #[tokio::test]
    async fn test_timeout() {
        let (_dir, config) = project_with_script(FAST_SCRIPT);
        let runner = FakeRunner::new(Err(ScriptError::Timeout(Duration::from_secs(15))));

        let outcome = fast_dashboard(&config, &runner, FetchOptions::default()).await;
        assert_eq!(outcome.fallback_reason(), Some(&FallbackReason::Timeout));
        assert_eq!(outcome.data().unwrap().data.current_aqi.aqi, 156.0);
    }

    #[tokio::test]
    async fn test_script_failure() {
        let (_dir, config) = project_with_script(FAST_SCRIPT);
        let runner = FakeRunner::new(Err(ScriptError::Failed {
            interpreter: "python3".into(),
            status: "exit status: 1".into(),
            stderr: "Traceback".into(),
        }));

        let outcome = fast_dashboard(&config, &runner, FetchOptions::default()).await;
        assert!(matches!(
            outcome.fallback_reason(),
            Some(FallbackReason::ScriptFailed(_))
        ));
    }

    #[tokio::test]
    async fn test_no_data_file() {
        let (_dir, config) = project_with_script(FAST_SCRIPT);
        let runner = FakeRunner::new(ok_output(""));

        let outcome = fast_dashboard(&config, &runner, FetchOptions::default()).await;
        assert_eq!(outcome.fallback_reason(), Some(&FallbackReason::DataUnavailable));
    }

    #[tokio::test]
    async fn test_unparsable_data_file() {
        let (_dir, config) = project_with_script(FAST_SCRIPT);
        let runner = FakeRunner::new(ok_output(""))
            .writing(config.data_dir.join(COMBINED_DATA_FILE), "{\"current_aqi\":");

        let outcome = fast_dashboard(&config, &runner, FetchOptions::default()).await;
        assert!(matches!(
            outcome.fallback_reason(),
            Some(FallbackReason::Unparsable(_))
        ));
    }

    #[tokio::test]
    async fn test_live_data_with_force_flag() {
        let (_dir, config) = project_with_script(FAST_SCRIPT);
        std::fs::create_dir_all(&config.data_dir).unwrap();
        let runner = FakeRunner::new(ok_output("InsecureRequestWarning: Unverified HTTPS request"))
            .writing(config.data_dir.join(COMBINED_DATA_FILE), &live_payload());

        let outcome = fast_dashboard(&config, &runner, FetchOptions { force: true, mock: false }).await;

        assert!(outcome.is_ok());
        let response = outcome.data().unwrap();
        assert_eq!(response.data.current_aqi.aqi, 88.0);
        assert_eq!(response.fetch_time, 0.42);
        assert_eq!(runner.calls.lock().unwrap()[0], vec!["--force".to_string()]);
    }

    #[tokio::test]
    async fn test_refresh_missing_script_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = DashboardConfig::new(dir.path());
        let runner = FakeRunner::new(ok_output(""));

        assert!(refresh_sources(&config, &runner).await.is_error());
    }

    #[tokio::test]
    async fn test_refresh_stderr_is_error() {
        let (_dir, config) = project_with_script(REFRESH_SCRIPT);
        let runner = FakeRunner::new(ok_output("Error running OpenAQ.py"));

        let outcome = refresh_sources(&config, &runner).await;
        assert_eq!(
            outcome,
            Outcome::Error("Error fetching air quality data".to_string())
        );
    }

    #[tokio::test]
    async fn test_refresh_reads_metadata() {
        let (_dir, config) = project_with_script(REFRESH_SCRIPT);
        std::fs::create_dir_all(&config.data_dir).unwrap();
        let runner = FakeRunner::new(ok_output("")).writing(
            config.data_dir.join(METADATA_FILE),
            r#"{"last_updated":"2025-01-01T00:00:00","api_results":{}}"#,
        );

        let outcome = refresh_sources(&config, &runner).await;
        let report = outcome.data().unwrap();

        assert_eq!(report.output, "done");
        assert_eq!(
            report.metadata.as_ref().unwrap()["last_updated"],
            "2025-01-01T00:00:00"
        );
    }
}
