//! Configuration: YAML session files and TOML tool settings.
//!
//! A session file names a tmux session (after the file) and declares its
//! windows:
//!
//! ```yaml
//! root: ~/src/project
//! sudo:
//! tabs:
//!   - editor:
//!       cd: app
//!       run: vim .
//!   - services:
//!       sleep: 1
//!       run:
//!         - docker compose up -d
//!         - sudo: systemctl restart nginx
//! ```
//!
//! Tool settings live in `tmugs.toml`; see [`settings`].

mod defaults;
mod loader;
pub mod settings;
mod types;

pub use loader::{load_session_config, parse_session_config, session_name_from_path};
pub use settings::{default_settings_path, load_settings};
pub use types::{
    CommandSpec, LoadedSession, SessionConfig, SessionDiagnostics, Settings, SkippedWindow,
    SudoSettings, TmuxSettings, WindowSpec,
};
