//! `tmux` CLI implementation of [`Multiplexer`].

use async_trait::async_trait;
use std::path::Path;

use crate::error::DriverError;

use super::parse::{parse_window_locator, split_output_lines};
use super::process::{ensure_success, run_process, ExecOutput};
use super::{Multiplexer, SessionHandle};

const SESSION_NAME_FORMAT: &str = "#{session_name}";
const WINDOW_NAME_FORMAT: &str = "#{window_name}";
const WINDOW_INDEXED_FORMAT: &str = "#{window_index}:#{window_name}";
const WINDOW_LOCATOR_FORMAT: &str = "#{session_name}:#{window_index}";

/// Drives a tmux server through its command-line interface.
#[derive(Debug, Clone)]
pub struct TmuxDriver {
    binary: String,
}

impl TmuxDriver {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    pub fn binary(&self) -> &str {
        &self.binary
    }

    async fn exec(&self, args: Vec<String>) -> Result<ExecOutput, DriverError> {
        tracing::debug!(binary = %self.binary, ?args, "invoking tmux");
        let context = format!("{} {}", self.binary, args.first().map_or("", String::as_str));
        let output = run_process(&self.binary, &args, None).await?;
        ensure_success(output, context)
    }
}

impl Default for TmuxDriver {
    fn default() -> Self {
        Self::new("tmux")
    }
}

#[async_trait]
impl Multiplexer for TmuxDriver {
    async fn new_session_detached(&self, name: &str) -> Result<SessionHandle, DriverError> {
        self.exec(new_session_args(name)).await?;
        Ok(SessionHandle::attach(name))
    }

    async fn list_sessions(&self) -> Result<Vec<String>, DriverError> {
        let out = self.exec(list_sessions_args()).await?;
        Ok(split_output_lines(&out.stdout))
    }

    async fn list_windows(&self, session: &str) -> Result<Vec<String>, DriverError> {
        let out = self
            .exec(list_windows_args(session, WINDOW_NAME_FORMAT))
            .await?;
        Ok(split_output_lines(&out.stdout))
    }

    async fn list_windows_indexed(&self, session: &str) -> Result<Vec<String>, DriverError> {
        let out = self
            .exec(list_windows_args(session, WINDOW_INDEXED_FORMAT))
            .await?;
        Ok(split_output_lines(&out.stdout))
    }

    async fn new_window(
        &self,
        session: &SessionHandle,
        name: &str,
        dir: &Path,
    ) -> Result<String, DriverError> {
        let out = self
            .exec(new_window_args(session.name(), name, dir))
            .await?;
        parse_window_locator(&out.stdout).ok_or_else(|| DriverError::Failed {
            context: format!("{} new-window", self.binary),
            status: out.exit_code,
            output: format!("printed no window locator for `{name}`"),
        })
    }

    async fn send_keys(&self, target: &str, text: &str) -> Result<(), DriverError> {
        // Text may be a password; only its length is logged.
        tracing::trace!(window = target, len = text.len(), "sending literal keys");
        let output = run_process(&self.binary, &send_literal_args(target, text), None).await?;
        ensure_success(output, format!("{} send-keys -l", self.binary))?;
        let output = run_process(&self.binary, &send_enter_args(target), None).await?;
        ensure_success(output, format!("{} send-keys Enter", self.binary))?;
        Ok(())
    }

    async fn select_window(&self, session: &str, window: &str) -> Result<(), DriverError> {
        self.exec(select_window_args(session, window)).await?;
        Ok(())
    }

    async fn kill_session(&self, session: &str) -> Result<(), DriverError> {
        self.exec(kill_session_args(session)).await?;
        Ok(())
    }
}

fn args<const N: usize>(parts: [&str; N]) -> Vec<String> {
    parts.iter().map(|part| (*part).to_string()).collect()
}

/// Exact-match session target. A bare name lets tmux fall back to prefix
/// matching, or to a window name in the caller's own session.
fn session_target(session: &str) -> String {
    format!("={session}")
}

pub(crate) fn new_session_args(name: &str) -> Vec<String> {
    args(["new-session", "-d", "-s", name])
}

pub(crate) fn list_sessions_args() -> Vec<String> {
    args(["list-sessions", "-F", SESSION_NAME_FORMAT])
}

pub(crate) fn list_windows_args(session: &str, format: &str) -> Vec<String> {
    let target = session_target(session);
    args(["list-windows", "-t", target.as_str(), "-F", format])
}

pub(crate) fn new_window_args(session: &str, name: &str, dir: &Path) -> Vec<String> {
    let dir = dir.display().to_string();
    // Trailing `:` picks the next free index in that session.
    let target = format!("{}:", session_target(session));
    args([
        "new-window",
        "-P",
        "-F",
        WINDOW_LOCATOR_FORMAT,
        "-t",
        target.as_str(),
        "-c",
        dir.as_str(),
        "-n",
        name,
    ])
}

pub(crate) fn send_literal_args(target: &str, text: &str) -> Vec<String> {
    args(["send-keys", "-l", "-t", target, "--", text])
}

pub(crate) fn send_enter_args(target: &str) -> Vec<String> {
    args(["send-keys", "-t", target, "Enter"])
}

pub(crate) fn select_window_args(session: &str, window: &str) -> Vec<String> {
    let target = format!("{}:{window}", session_target(session));
    args(["select-window", "-t", target.as_str()])
}

pub(crate) fn kill_session_args(session: &str) -> Vec<String> {
    let target = session_target(session);
    args(["kill-session", "-t", target.as_str()])
}
