use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use thiserror::Error;
use tokio::process::Command;
use tracing::{debug, warn};

/// Default time a script may run before it is abandoned.
pub const DEFAULT_SCRIPT_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScriptOutput {
    pub stdout: String,
    pub stderr: String,
}

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("failed to start `{interpreter}`: {source}")]
    Spawn {
        interpreter: String,
        #[source]
        source: std::io::Error,
    },
    #[error("`{interpreter}` exited with {status}: {stderr}")]
    Failed {
        interpreter: String,
        status: String,
        stderr: String,
    },
    #[error("timed out after {0:?}")]
    Timeout(Duration),
}

/// Runs an external data script and captures its output.
#[async_trait]
pub trait ScriptRunner: Send + Sync {
    async fn run(&self, script: &Path, args: &[&str]) -> Result<ScriptOutput, ScriptError>;
}

/// Runs scripts with `python3`, falling back to `python`.
pub struct PythonRunner {
    interpreters: Vec<String>,
    working_dir: PathBuf,
    timeout: Duration,
}

impl PythonRunner {
    pub fn new(working_dir: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            interpreters: vec!["python3".to_string(), "python".to_string()],
            working_dir: working_dir.into(),
            timeout,
        }
    }

    pub fn with_interpreters(mut self, interpreters: Vec<String>) -> Self {
        self.interpreters = interpreters;
        self
    }

    async fn run_with(
        &self,
        interpreter: &str,
        script: &Path,
        args: &[&str],
    ) -> Result<ScriptOutput, ScriptError> {
        let mut cmd = Command::new(interpreter);
        cmd.arg(script)
            .args(args)
            .current_dir(&self.working_dir)
            .stdin(Stdio::null())
            .kill_on_drop(true);

        let output = tokio::time::timeout(self.timeout, cmd.output())
            .await
            .map_err(|_| ScriptError::Timeout(self.timeout))?
            .map_err(|source| ScriptError::Spawn {
                interpreter: interpreter.to_string(),
                source,
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if !output.status.success() {
            return Err(ScriptError::Failed {
                interpreter: interpreter.to_string(),
                status: output.status.to_string(),
                stderr,
            });
        }

        Ok(ScriptOutput { stdout, stderr })
    }
}

#[async_trait]
impl ScriptRunner for PythonRunner {
    #[tracing::instrument(skip(self), fields(script = %script.display()))]
    async fn run(&self, script: &Path, args: &[&str]) -> Result<ScriptOutput, ScriptError> {
        let mut last_err: Option<ScriptError> = None;

        for interpreter in &self.interpreters {
            debug!(interpreter = %interpreter, "Running script");
            match self.run_with(interpreter, script, args).await {
                Ok(output) => return Ok(output),
                Err(e) => {
                    warn!(interpreter = %interpreter, error = %e, "Script attempt failed");
                    // A missing interpreter says less than a real failure seen earlier.
                    let keep_previous = matches!(e, ScriptError::Spawn { .. })
                        && last_err.is_some();
                    if !keep_previous {
                        last_err = Some(e);
                    }
                }
            }
        }

        Err(last_err.unwrap_or(ScriptError::Spawn {
            interpreter: String::new(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no interpreter configured"),
        }))
    }
}
