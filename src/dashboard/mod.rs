//! Dashboard data backed by external Python scripts.
//!
//! The scripts are external collaborators: this module locates them, runs
//! them under a timeout, reads the JSON they leave behind, and reports
//! whether the result is live data, mock data (and why), or an error.

pub mod mock;
pub mod provider;
pub mod runner;
pub mod types;

pub use mock::mock_dashboard;
pub use provider::{DashboardConfig, FetchOptions, fast_dashboard, refresh_sources};
pub use runner::{DEFAULT_SCRIPT_TIMEOUT, PythonRunner, ScriptError, ScriptOutput, ScriptRunner};
pub use types::{DashboardData, DashboardResponse, RefreshReport};
