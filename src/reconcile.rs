//! Session reconciliation: make live tmux state contain the declared windows.
//!
//! Only window creation is guarded against duplication. Commands are typed
//! blind, paced with fixed pauses; nothing detects shell or password-prompt
//! readiness, and nothing is rolled back on partial failure.

use async_trait::async_trait;
use std::path::Path;
use std::time::Duration;

use crate::config::{CommandSpec, SessionConfig, WindowSpec};
use crate::credential::SudoCredential;
use crate::error::ReconcileError;
use crate::tmux::{Multiplexer, SessionHandle};

/// Blocking pause between keystroke sends.
#[async_trait]
pub trait Pacer: Send + Sync {
    async fn pause(&self, duration: Duration);
}

/// Real-time pacing via `tokio::time::sleep`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioPacer;

#[async_trait]
impl Pacer for TokioPacer {
    async fn pause(&self, duration: Duration) {
        if !duration.is_zero() {
            tokio::time::sleep(duration).await;
        }
    }
}

/// Terminal state of one declared window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WindowOutcome {
    /// A window with this name was already live; nothing was sent.
    AlreadyExists,
    /// Window created; `commands_sent` counts commands whose text reached tmux.
    Created {
        locator: String,
        commands_sent: usize,
    },
    CreateFailed {
        reason: String,
    },
}

/// What one reconciliation pass did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcileReport {
    pub session: String,
    /// `false` when an existing session was reused.
    pub session_created: bool,
    pub windows: Vec<(String, WindowOutcome)>,
}

impl ReconcileReport {
    pub fn created(&self) -> usize {
        self.count(|outcome| matches!(outcome, WindowOutcome::Created { .. }))
    }

    pub fn skipped(&self) -> usize {
        self.count(|outcome| matches!(outcome, WindowOutcome::AlreadyExists))
    }

    pub fn failed(&self) -> usize {
        self.count(|outcome| matches!(outcome, WindowOutcome::CreateFailed { .. }))
    }

    fn count(&self, pred: impl Fn(&WindowOutcome) -> bool) -> usize {
        self.windows.iter().filter(|(_, outcome)| pred(outcome)).count()
    }
}

/// Drives one session file into tmux.
pub struct Reconciler<'a> {
    mux: &'a dyn Multiplexer,
    pacer: &'a dyn Pacer,
    sudo_prompt_delay: Duration,
}

impl<'a> Reconciler<'a> {
    pub fn new(mux: &'a dyn Multiplexer, pacer: &'a dyn Pacer, sudo_prompt_delay: Duration) -> Self {
        Self {
            mux,
            pacer,
            sudo_prompt_delay,
        }
    }

    /// Reconcile `config` against live tmux state.
    ///
    /// Only session creation failure is an error; per-window failures are
    /// logged and reported in the result.
    pub async fn reconcile(
        &self,
        config: &SessionConfig,
        credential: Option<&SudoCredential>,
    ) -> Result<ReconcileReport, ReconcileError> {
        let (session, session_created) = self.ensure_session(&config.name).await?;

        let mut windows = Vec::with_capacity(config.windows.len());
        for window in &config.windows {
            let outcome = self
                .reconcile_window(&session, &config.root, window, credential)
                .await;
            windows.push((window.name.clone(), outcome));
        }

        let report = ReconcileReport {
            session: config.name.clone(),
            session_created,
            windows,
        };
        tracing::info!(
            session = %report.session,
            created = report.created(),
            skipped = report.skipped(),
            failed = report.failed(),
            "session reconciled"
        );
        Ok(report)
    }

    async fn ensure_session(&self, name: &str) -> Result<(SessionHandle, bool), ReconcileError> {
        let live = match self.mux.list_sessions().await {
            Ok(sessions) => sessions,
            Err(e) => {
                // tmux exits non-zero when no server is running yet.
                tracing::debug!(error = %e, "session list unavailable; assuming none");
                Vec::new()
            }
        };

        if live.iter().any(|session| session == name) {
            tracing::info!(session = name, "reusing existing session");
            return Ok((SessionHandle::attach(name), false));
        }

        tracing::info!(session = name, "creating detached session");
        let handle = self
            .mux
            .new_session_detached(name)
            .await
            .map_err(|source| ReconcileError::SessionCreate {
                session: name.to_string(),
                source,
            })?;
        Ok((handle, true))
    }

    async fn reconcile_window(
        &self,
        session: &SessionHandle,
        root: &Path,
        window: &WindowSpec,
        credential: Option<&SudoCredential>,
    ) -> WindowOutcome {
        let live = match self.mux.list_windows(session.name()).await {
            Ok(names) => names,
            Err(e) => {
                tracing::warn!(session = session.name(), error = %e, "window list unavailable");
                Vec::new()
            }
        };
        if live.iter().any(|name| name == &window.name) {
            tracing::info!(window = %window.name, "window already exists; skipping");
            return WindowOutcome::AlreadyExists;
        }

        let dir = root.join(&window.cd);
        tracing::info!(window = %window.name, dir = %dir.display(), "creating window");
        let locator = match self.mux.new_window(session, &window.name, &dir).await {
            Ok(locator) => locator,
            Err(e) => {
                tracing::error!(window = %window.name, error = %e, "failed to create window");
                return WindowOutcome::CreateFailed {
                    reason: e.to_string(),
                };
            }
        };

        let commands_sent = self.run_commands(&locator, window, credential).await;
        WindowOutcome::Created {
            locator,
            commands_sent,
        }
    }

    async fn run_commands(
        &self,
        locator: &str,
        window: &WindowSpec,
        credential: Option<&SudoCredential>,
    ) -> usize {
        if window.commands.is_empty() {
            return 0;
        }

        let mut sent = 0;
        self.pacer.pause(window.sleep()).await;
        for command in &window.commands {
            let delivered = match command {
                CommandSpec::Plain(text) => {
                    tracing::info!(window = %window.name, command = %text, "exec");
                    self.send(locator, text).await
                }
                CommandSpec::Sudo(text) => {
                    tracing::info!(window = %window.name, command = %text, "exec with sudo");
                    self.send_sudo(locator, text, credential).await
                }
            };
            if delivered {
                sent += 1;
            }
            self.pacer.pause(window.sleep()).await;
        }
        sent
    }

    async fn send_sudo(
        &self,
        locator: &str,
        text: &str,
        credential: Option<&SudoCredential>,
    ) -> bool {
        if !self.send(locator, &format!("sudo {text}")).await {
            return false;
        }
        // Blind wait for sudo's password prompt.
        self.pacer.pause(self.sudo_prompt_delay).await;
        match credential {
            Some(credential) => {
                if let Err(e) = self.mux.send_keys(locator, credential.password()).await {
                    tracing::error!(target_window = locator, error = %e, "failed to send sudo password");
                }
            }
            None => {
                tracing::warn!(
                    target_window = locator,
                    "no sudo password captured; add a top-level `sudo:` key to the session file"
                );
            }
        }
        true
    }

    async fn send(&self, locator: &str, text: &str) -> bool {
        match self.mux.send_keys(locator, text).await {
            Ok(()) => true,
            Err(e) => {
                tracing::error!(target_window = locator, error = %e, "failed to send keys");
                false
            }
        }
    }
}
