//! Shared test fixtures: temp dirs and an in-memory tmux double.
//!
//! `FakeMultiplexer` and `RecordingPacer` write into one `Journal` so tests can
//! assert on the exact interleaving of keystroke sends and pauses.

use async_trait::async_trait;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::error::DriverError;
use crate::reconcile::Pacer;
use crate::tmux::{Multiplexer, SessionHandle};

static TEST_DIR_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Temporary directory fixture with best-effort cleanup.
#[derive(Debug)]
pub struct TestTempDir {
    path: PathBuf,
}

impl TestTempDir {
    /// Create a unique temporary directory with a readable prefix.
    pub fn new(prefix: &str) -> Self {
        let suffix = TEST_DIR_COUNTER.fetch_add(1, Ordering::Relaxed);
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis();
        let dir = std::env::temp_dir().join(format!("tmugs-{prefix}-{millis}-{suffix}"));
        fs::create_dir_all(&dir).expect("failed to create temporary fixture directory");
        Self { path: dir }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn child(&self, relative: &str) -> PathBuf {
        self.path.join(relative)
    }

    /// Write UTF-8 text to a child path, creating parent directories as needed.
    pub fn write_text(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.child(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("failed to create parent directories for fixture");
        }
        fs::write(&path, content).expect("failed to write fixture file");
        path
    }
}

impl Drop for TestTempDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

/// One recorded multiplexer call or pause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MuxEvent {
    ListSessions,
    NewSession(String),
    ListWindows(String),
    NewWindow {
        session: String,
        name: String,
        dir: PathBuf,
    },
    SendKeys {
        target: String,
        text: String,
    },
    SelectWindow {
        session: String,
        window: String,
    },
    KillSession(String),
    Pause(Duration),
}

impl MuxEvent {
    pub fn send(target: &str, text: &str) -> Self {
        Self::SendKeys {
            target: target.to_string(),
            text: text.to_string(),
        }
    }
}

/// Shared, ordered event log.
#[derive(Debug, Clone, Default)]
pub struct Journal(Arc<Mutex<Vec<MuxEvent>>>);

impl Journal {
    pub fn push(&self, event: MuxEvent) {
        self.0.lock().expect("journal lock").push(event);
    }

    pub fn events(&self) -> Vec<MuxEvent> {
        self.0.lock().expect("journal lock").clone()
    }

    pub fn clear(&self) {
        self.0.lock().expect("journal lock").clear();
    }
}

/// Pacer that records pauses instead of sleeping.
#[derive(Debug, Clone)]
pub struct RecordingPacer {
    journal: Journal,
}

impl RecordingPacer {
    pub fn new(journal: Journal) -> Self {
        Self { journal }
    }
}

#[async_trait]
impl Pacer for RecordingPacer {
    async fn pause(&self, duration: Duration) {
        self.journal.push(MuxEvent::Pause(duration));
    }
}

#[derive(Debug, Default)]
struct FakeState {
    /// Session name to window names, in creation order. New sessions start
    /// with no windows.
    sessions: Vec<(String, Vec<String>)>,
    fail_session_create: bool,
    fail_windows: HashSet<String>,
    fail_sends: HashSet<String>,
    fail_kills: HashSet<String>,
}

/// In-memory tmux double with tmux-like failure modes.
#[derive(Debug)]
pub struct FakeMultiplexer {
    journal: Journal,
    state: Mutex<FakeState>,
}

fn failed(context: &str, output: String) -> DriverError {
    DriverError::Failed {
        context: context.to_string(),
        status: 1,
        output,
    }
}

impl FakeMultiplexer {
    pub fn new(journal: Journal) -> Self {
        Self {
            journal,
            state: Mutex::new(FakeState::default()),
        }
    }

    pub fn with_session(self, name: &str, windows: &[&str]) -> Self {
        self.lock().sessions.push((
            name.to_string(),
            windows.iter().map(|window| window.to_string()).collect(),
        ));
        self
    }

    pub fn failing_session_create(self) -> Self {
        self.lock().fail_session_create = true;
        self
    }

    pub fn failing_window(self, name: &str) -> Self {
        self.lock().fail_windows.insert(name.to_string());
        self
    }

    pub fn failing_send(self, text: &str) -> Self {
        self.lock().fail_sends.insert(text.to_string());
        self
    }

    pub fn failing_kill(self, session: &str) -> Self {
        self.lock().fail_kills.insert(session.to_string());
        self
    }

    pub fn session_names(&self) -> Vec<String> {
        self.lock()
            .sessions
            .iter()
            .map(|(name, _)| name.clone())
            .collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FakeState> {
        self.state.lock().expect("fake tmux state lock")
    }
}

#[async_trait]
impl Multiplexer for FakeMultiplexer {
    async fn new_session_detached(&self, name: &str) -> Result<SessionHandle, DriverError> {
        self.journal.push(MuxEvent::NewSession(name.to_string()));
        let mut state = self.lock();
        if state.fail_session_create {
            return Err(failed("tmux new-session", "server exited unexpectedly".into()));
        }
        if state.sessions.iter().any(|(session, _)| session == name) {
            return Err(failed("tmux new-session", format!("duplicate session: {name}")));
        }
        state.sessions.push((name.to_string(), Vec::new()));
        Ok(SessionHandle::attach(name))
    }

    async fn list_sessions(&self) -> Result<Vec<String>, DriverError> {
        self.journal.push(MuxEvent::ListSessions);
        let names = self.session_names();
        if names.is_empty() {
            return Err(failed("tmux list-sessions", "no server running".into()));
        }
        Ok(names)
    }

    async fn list_windows(&self, session: &str) -> Result<Vec<String>, DriverError> {
        self.journal.push(MuxEvent::ListWindows(session.to_string()));
        self.lock()
            .sessions
            .iter()
            .find(|(name, _)| name == session)
            .map(|(_, windows)| windows.clone())
            .ok_or_else(|| failed("tmux list-windows", format!("can't find session: {session}")))
    }

    async fn list_windows_indexed(&self, session: &str) -> Result<Vec<String>, DriverError> {
        let windows = self.list_windows(session).await?;
        Ok(windows
            .iter()
            .enumerate()
            .map(|(index, name)| format!("{index}:{name}"))
            .collect())
    }

    async fn new_window(
        &self,
        session: &SessionHandle,
        name: &str,
        dir: &Path,
    ) -> Result<String, DriverError> {
        self.journal.push(MuxEvent::NewWindow {
            session: session.name().to_string(),
            name: name.to_string(),
            dir: dir.to_path_buf(),
        });
        let mut state = self.lock();
        if state.fail_windows.contains(name) {
            return Err(failed("tmux new-window", format!("create window failed: {name}")));
        }
        let Some((_, windows)) = state
            .sessions
            .iter_mut()
            .find(|(existing, _)| existing == session.name())
        else {
            return Err(failed(
                "tmux new-window",
                format!("can't find session: {}", session.name()),
            ));
        };
        let index = windows.len();
        windows.push(name.to_string());
        Ok(format!("{}:{index}", session.name()))
    }

    async fn send_keys(&self, target: &str, text: &str) -> Result<(), DriverError> {
        self.journal.push(MuxEvent::send(target, text));
        if self.lock().fail_sends.contains(text) {
            return Err(failed("tmux send-keys", format!("can't find pane: {target}")));
        }
        Ok(())
    }

    async fn select_window(&self, session: &str, window: &str) -> Result<(), DriverError> {
        self.journal.push(MuxEvent::SelectWindow {
            session: session.to_string(),
            window: window.to_string(),
        });
        let state = self.lock();
        let found = state.sessions.iter().any(|(name, windows)| {
            name == session
                && (windows.iter().any(|existing| existing == window)
                    || window.parse::<usize>().is_ok_and(|index| index < windows.len()))
        });
        if found {
            Ok(())
        } else {
            Err(failed(
                "tmux select-window",
                format!("can't find window: {window}"),
            ))
        }
    }

    async fn kill_session(&self, session: &str) -> Result<(), DriverError> {
        self.journal.push(MuxEvent::KillSession(session.to_string()));
        let mut state = self.lock();
        if state.fail_kills.contains(session) {
            return Err(failed("tmux kill-session", "permission denied".into()));
        }
        let before = state.sessions.len();
        state.sessions.retain(|(name, _)| name != session);
        if state.sessions.len() == before {
            return Err(failed(
                "tmux kill-session",
                format!("can't find session: {session}"),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temp_dir_fixture_writes_and_resolves_paths() {
        let fixture = TestTempDir::new("fixture");
        let file = fixture.write_text("nested/file.yml", "tabs: []");
        assert_eq!(fs::read_to_string(file).unwrap(), "tabs: []");
        assert!(fixture.path().exists());
    }

    #[tokio::test]
    async fn fake_reports_no_server_when_empty() {
        let mux = FakeMultiplexer::new(Journal::default());
        let err = mux.list_sessions().await.expect_err("no sessions");
        assert!(err.to_string().contains("no server running"));
    }

    #[tokio::test]
    async fn fake_assigns_sequential_window_indexes() {
        let journal = Journal::default();
        let mux = FakeMultiplexer::new(journal.clone()).with_session("dev", &["zsh"]);
        let handle = SessionHandle::attach("dev");
        let locator = mux
            .new_window(&handle, "editor", Path::new("/tmp"))
            .await
            .expect("new window");
        assert_eq!(locator, "dev:1");
        assert_eq!(
            mux.list_windows_indexed("dev").await.expect("indexed"),
            vec!["0:zsh", "1:editor"]
        );
    }
}
