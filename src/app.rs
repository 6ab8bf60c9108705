//! Subcommand handlers behind the `tmugs` binary.
//!
//! Handlers take the multiplexer, pacer and output sink as arguments so the
//! binary wires real tmux and stdout while tests use the in-memory doubles.

use std::io::Write;
use std::path::PathBuf;

use crate::config::{load_session_config, Settings};
use crate::credential::{CredentialCache, PasswordPrompt};
use crate::error::AppError;
use crate::reconcile::{Pacer, ReconcileReport, Reconciler};
use crate::tmux::Multiplexer;

/// `tmugs start CFG...`: reconcile each session file in order.
///
/// The sudo password is captured the first time a file carries the `sudo`
/// marker and reused for every later file. A config error, credential error
/// or session creation failure stops the run; files already processed stay
/// as they are.
pub async fn start_sessions<P: PasswordPrompt>(
    mux: &dyn Multiplexer,
    pacer: &dyn Pacer,
    settings: &Settings,
    credentials: &mut CredentialCache<P>,
    paths: &[PathBuf],
) -> Result<Vec<ReconcileReport>, AppError> {
    let reconciler = Reconciler::new(mux, pacer, settings.sudo.prompt_delay());
    let mut reports = Vec::with_capacity(paths.len());
    for path in paths {
        tracing::info!(file = %path.display(), "starting session");
        let loaded = load_session_config(path)?;
        let credential = if loaded.config.use_sudo {
            Some(credentials.ensure().await?)
        } else {
            credentials.get()
        };
        reports.push(reconciler.reconcile(&loaded.config, credential).await?);
    }
    Ok(reports)
}

/// `tmugs ls`: one session name per line.
pub async fn list_sessions(mux: &dyn Multiplexer, out: &mut dyn Write) -> Result<(), AppError> {
    for session in mux.list_sessions().await? {
        writeln!(out, "{session}")?;
    }
    Ok(())
}

/// `tmugs ls SESSION`: one window per line, optionally as `index:name`.
pub async fn list_windows(
    mux: &dyn Multiplexer,
    session: &str,
    indexed: bool,
    out: &mut dyn Write,
) -> Result<(), AppError> {
    let windows = if indexed {
        mux.list_windows_indexed(session).await?
    } else {
        mux.list_windows(session).await?
    };
    for window in windows {
        writeln!(out, "{window}")?;
    }
    Ok(())
}

/// `tmugs a SESSION WINDOW`.
pub async fn select_window(
    mux: &dyn Multiplexer,
    session: &str,
    window: &str,
) -> Result<(), AppError> {
    mux.select_window(session, window).await?;
    Ok(())
}

/// `tmugs kill SESSION...`: every session is attempted even after a failure.
pub async fn kill_sessions(mux: &dyn Multiplexer, sessions: &[String]) -> Result<(), AppError> {
    let mut failures = 0;
    for session in sessions {
        match mux.kill_session(session).await {
            Ok(()) => tracing::info!(session = %session, "killed session"),
            Err(e) => {
                tracing::error!(session = %session, error = %e, "failed to kill session");
                failures += 1;
            }
        }
    }
    if failures > 0 {
        return Err(AppError::KillFailed(failures));
    }
    Ok(())
}
