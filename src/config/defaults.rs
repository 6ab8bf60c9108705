//! Default configuration constants.
//!
//! Keeping defaults in one module lets the loader, settings and tests share
//! the same literals.

/// tmux binary used when neither settings nor env override it.
pub(super) const DEFAULT_TMUX_BINARY: &str = "tmux";
/// Blind wait between typing `sudo <cmd>` and typing the password.
pub(super) const DEFAULT_SUDO_PROMPT_DELAY_SECS: u64 = 2;
/// Whether the captured password is checked with `sudo -k -S` before use.
pub(super) const DEFAULT_VERIFY_SUDO: bool = true;
/// Directory name under the user config root holding `tmugs.toml`.
pub(super) const SETTINGS_DIR_NAME: &str = "tmugs";
/// Settings file name.
pub(super) const SETTINGS_FILE_NAME: &str = "tmugs.toml";
/// Root used when no `root` key is given and the working directory is gone.
pub(super) const PLACEHOLDER_ROOT: &str = "~/";
/// Window directory suffix used when a tab has no `cd` key.
pub(super) const DEFAULT_WINDOW_DIR: &str = ".";
/// Top-level session-file key whose presence requests sudo capture.
pub(super) const SUDO_MARKER_KEY: &str = "sudo";

/// Env var overriding the tmux binary.
pub(super) const ENV_TMUX_BINARY: &str = "TMUGS_TMUX";
/// Env var overriding the sudo prompt delay, in whole seconds.
pub(super) const ENV_SUDO_PROMPT_DELAY_SECS: &str = "TMUGS_SUDO_PROMPT_DELAY_SECS";
