use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::debug;

use crate::domain::change::parse_changed_paths;
use crate::error::{AppError, AppResult};
use crate::services::VersionControlService;

pub struct GitCli {
    workspace_root: PathBuf,
    timeout: Duration,
}

impl GitCli {
    pub fn new(workspace_root: PathBuf, timeout: Duration) -> Self {
        Self {
            workspace_root,
            timeout,
        }
    }

    async fn run(&self, args: &[&str]) -> AppResult<String> {
        debug!(?args, cwd = %self.workspace_root.display(), "running git");

        let output = timeout(
            self.timeout,
            Command::new("git")
                .args(args)
                .current_dir(&self.workspace_root)
                .stdin(Stdio::null())
                .stdout(Stdio::piped())
                .stderr(Stdio::piped())
                .kill_on_drop(true)
                .output(),
        )
        .await
        .map_err(|_| {
            AppError::VersionControl(format!(
                "git {} timed out after {}s",
                args.join(" "),
                self.timeout.as_secs()
            ))
        })?
        .map_err(|err| AppError::VersionControl(format!("failed to run git: {err}")))?;

        if !output.status.success() {
            return Err(AppError::VersionControl(failure_detail(
                &output.stderr,
                output.status.code(),
            )));
        }

        decode_stdout(output.stdout)
    }
}

/// Git output must be valid UTF-8; bytes are never replaced.
fn decode_stdout(stdout: Vec<u8>) -> AppResult<String> {
    String::from_utf8(stdout)
        .map_err(|err| AppError::VersionControl(format!("git output is not valid UTF-8: {err}")))
}

fn failure_detail(stderr: &[u8], code: Option<i32>) -> String {
    let stderr = String::from_utf8_lossy(stderr);
    let trimmed = stderr.trim();
    if !trimmed.is_empty() {
        return trimmed.to_string();
    }
    match code {
        Some(code) => format!("git exited with status {code}"),
        None => "git terminated by signal".to_string(),
    }
}

#[async_trait]
impl VersionControlService for GitCli {
    async fn staged_changed_paths(&self) -> AppResult<Vec<String>> {
        let stdout = self.run(&["diff", "--cached", "--name-only"]).await?;
        Ok(parse_changed_paths(&stdout))
    }

    async fn staged_diff(&self) -> AppResult<String> {
        self.run(&["diff", "--cached"]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_detail_prefers_stderr() {
        let detail = failure_detail(b"fatal: not a git repository\n", Some(128));
        assert_eq!(detail, "fatal: not a git repository");
    }

    #[test]
    fn failure_detail_falls_back_to_status() {
        assert_eq!(failure_detail(b"  \n", Some(1)), "git exited with status 1");
        assert_eq!(failure_detail(b"", None), "git terminated by signal");
    }

    #[test]
    fn decodes_utf8_output() {
        let out = decode_stdout("+héllo\n".as_bytes().to_vec()).unwrap();
        assert_eq!(out, "+héllo\n");
    }

    #[test]
    fn non_utf8_output_is_a_version_control_error() {
        // Latin-1 encoded "+caf\xe9"
        let err = decode_stdout(vec![b'+', b'c', b'a', b'f', 0xe9, b'\n']).unwrap_err();
        assert!(matches!(err, AppError::VersionControl(_)));
        assert!(err.detail().contains("not valid UTF-8"));
    }

    #[tokio::test]
    async fn missing_workspace_is_a_version_control_error() {
        let dir = tempfile::tempdir().unwrap();
        let git = GitCli::new(dir.path().join("missing"), Duration::from_secs(5));
        let err = git.staged_diff().await.unwrap_err();
        assert!(matches!(err, AppError::VersionControl(_)));
    }
}
