//! tmux session/window control through the external `tmux` binary.
//!
//! [`Multiplexer`] is the seam the reconciler and front end talk to;
//! [`TmuxDriver`] is the only production implementation. Each operation shells
//! out to tmux and waits for it, with no retry and no timeout.

use async_trait::async_trait;
use std::path::Path;

use crate::error::DriverError;

pub mod driver;
pub mod parse;
pub mod process;

pub use driver::TmuxDriver;

/// Name of a live session the caller has created or found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionHandle {
    name: String,
}

impl SessionHandle {
    /// Wrap an existing session name without touching tmux.
    pub fn attach(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Primitive multiplexer operations.
#[async_trait]
pub trait Multiplexer: Send + Sync {
    /// Create a detached session. Fails if tmux already has one by that name.
    async fn new_session_detached(&self, name: &str) -> Result<SessionHandle, DriverError>;

    async fn list_sessions(&self) -> Result<Vec<String>, DriverError>;

    /// Window names of `session`, in tmux index order.
    async fn list_windows(&self, session: &str) -> Result<Vec<String>, DriverError>;

    /// `index:name` pairs for each window of `session`.
    async fn list_windows_indexed(&self, session: &str) -> Result<Vec<String>, DriverError>;

    /// Create a window and return its `session:index` locator.
    async fn new_window(
        &self,
        session: &SessionHandle,
        name: &str,
        dir: &Path,
    ) -> Result<String, DriverError>;

    /// Type `text` literally into `target`, followed by Enter.
    async fn send_keys(&self, target: &str, text: &str) -> Result<(), DriverError>;

    async fn select_window(&self, session: &str, window: &str) -> Result<(), DriverError>;

    async fn kill_session(&self, session: &str) -> Result<(), DriverError>;
}
