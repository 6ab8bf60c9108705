//! Configuration data model.
//!
//! Validated types (`SessionConfig`, `WindowSpec`, `CommandSpec`, `Settings`)
//! are what the rest of the crate consumes. The `File*` shapes mirror the YAML
//! document and exist only for the loader.

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use super::defaults::{
    DEFAULT_SUDO_PROMPT_DELAY_SECS, DEFAULT_TMUX_BINARY, DEFAULT_VERIFY_SUDO, DEFAULT_WINDOW_DIR,
};

// ---------------------------------------------------------------------------
// Session files
// ---------------------------------------------------------------------------

/// A fully loaded session file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Session name, derived from the file name.
    pub name: String,
    /// Base directory every window `cd` is joined onto.
    pub root: PathBuf,
    /// Set when the file carries the top-level `sudo` marker.
    pub use_sudo: bool,
    /// Windows in declaration order.
    pub windows: Vec<WindowSpec>,
}

/// One declared window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowSpec {
    pub name: String,
    /// Directory relative to the session root.
    pub cd: String,
    /// Pause before the first command and after each command.
    pub sleep_secs: u64,
    pub commands: Vec<CommandSpec>,
}

impl WindowSpec {
    /// Window with default directory, no pause and no commands.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cd: DEFAULT_WINDOW_DIR.to_string(),
            sleep_secs: 0,
            commands: Vec::new(),
        }
    }

    pub fn sleep(&self) -> Duration {
        Duration::from_secs(self.sleep_secs)
    }
}

/// A command typed into a window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandSpec {
    Plain(String),
    /// Typed as `sudo <text>`, followed by the captured password.
    Sudo(String),
}

/// A tab entry dropped at load time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedWindow {
    /// Zero-based position in `tabs`.
    pub index: usize,
    pub reason: String,
}

/// Non-fatal problems found while loading a session file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionDiagnostics {
    pub skipped: Vec<SkippedWindow>,
}

/// Loader result: the config plus its diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedSession {
    pub config: SessionConfig,
    pub diagnostics: SessionDiagnostics,
}

#[derive(Debug, Deserialize)]
pub(super) struct FileSession {
    #[serde(default)]
    pub(super) root: Option<String>,
    pub(super) tabs: Vec<serde_yaml::Value>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct FileTab {
    #[serde(default)]
    pub(super) sleep: Option<u64>,
    #[serde(default)]
    pub(super) cd: Option<String>,
    #[serde(default)]
    pub(super) run: Option<FileRun>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(super) enum FileRun {
    One(String),
    Many(Vec<FileRunEntry>),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(super) enum FileRunEntry {
    Plain(String),
    Sudo(FileSudoEntry),
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(super) struct FileSudoEntry {
    pub(super) sudo: String,
}

// ---------------------------------------------------------------------------
// Tool settings
// ---------------------------------------------------------------------------

/// Settings for tmugs itself, read from `tmugs.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub tmux: TmuxSettings,
    pub sudo: SudoSettings,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct TmuxSettings {
    pub binary: String,
}

impl Default for TmuxSettings {
    fn default() -> Self {
        Self {
            binary: DEFAULT_TMUX_BINARY.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct SudoSettings {
    pub prompt_delay_secs: u64,
    pub verify: bool,
}

impl Default for SudoSettings {
    fn default() -> Self {
        Self {
            prompt_delay_secs: DEFAULT_SUDO_PROMPT_DELAY_SECS,
            verify: DEFAULT_VERIFY_SUDO,
        }
    }
}

impl SudoSettings {
    pub fn prompt_delay(&self) -> Duration {
        Duration::from_secs(self.prompt_delay_secs)
    }
}
