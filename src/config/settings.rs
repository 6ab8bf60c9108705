//! Tool settings loading (`tmugs.toml`) and environment overrides.
//!
//! Precedence, highest first:
//! 1. `TMUGS_TMUX` / `TMUGS_SUDO_PROMPT_DELAY_SECS`
//! 2. the file given with `--settings`
//! 3. `$XDG_CONFIG_HOME/tmugs/tmugs.toml` (or `~/.config/tmugs/tmugs.toml`)
//! 4. built-in defaults

use std::path::{Path, PathBuf};

use crate::error::ConfigError;

use super::defaults::{
    ENV_SUDO_PROMPT_DELAY_SECS, ENV_TMUX_BINARY, SETTINGS_DIR_NAME, SETTINGS_FILE_NAME,
};
use super::Settings;

/// Load settings from disk and environment.
///
/// An explicit path must exist; the default path is optional.
pub fn load_settings(path_override: Option<&Path>) -> Result<Settings, ConfigError> {
    load_settings_from_sources(
        path_override,
        |path| std::fs::read_to_string(path),
        |name| std::env::var(name).ok(),
        default_settings_path,
    )
}

pub(super) fn load_settings_from_sources<FRead, FEnv, FDefault>(
    path_override: Option<&Path>,
    read_file: FRead,
    env_lookup: FEnv,
    default_path: FDefault,
) -> Result<Settings, ConfigError>
where
    FRead: Fn(&Path) -> Result<String, std::io::Error>,
    FEnv: Fn(&str) -> Option<String>,
    FDefault: Fn() -> Option<PathBuf>,
{
    let text = match path_override {
        Some(path) => Some(read_file(path)?),
        None => match default_path() {
            Some(path) => match read_file(&path) {
                Ok(text) => {
                    tracing::debug!(path = %path.display(), "loaded settings");
                    Some(text)
                }
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
                Err(e) => return Err(ConfigError::Io(e)),
            },
            None => None,
        },
    };

    let mut settings: Settings = match text {
        Some(text) => toml::from_str(&text)?,
        None => Settings::default(),
    };
    apply_env_overrides(&mut settings, &env_lookup)?;
    Ok(settings)
}

fn apply_env_overrides<FEnv>(settings: &mut Settings, env_lookup: &FEnv) -> Result<(), ConfigError>
where
    FEnv: Fn(&str) -> Option<String>,
{
    if let Some(binary) = non_empty_env(env_lookup, ENV_TMUX_BINARY) {
        settings.tmux.binary = binary;
    }
    if let Some(delay) = non_empty_env(env_lookup, ENV_SUDO_PROMPT_DELAY_SECS) {
        settings.sudo.prompt_delay_secs = delay.parse::<u64>().map_err(|_| {
            ConfigError::Invalid(format!(
                "invalid {ENV_SUDO_PROMPT_DELAY_SECS} value `{delay}`: expected whole seconds"
            ))
        })?;
    }
    Ok(())
}

fn non_empty_env<FEnv>(env_lookup: &FEnv, name: &str) -> Option<String>
where
    FEnv: Fn(&str) -> Option<String>,
{
    env_lookup(name)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Settings file read when no `--settings` path is given
/// (`$XDG_CONFIG_HOME/tmugs/tmugs.toml`, else `~/.config/tmugs/tmugs.toml`).
pub fn default_settings_path() -> Option<PathBuf> {
    config_root_dir().map(|root| root.join(SETTINGS_DIR_NAME).join(SETTINGS_FILE_NAME))
}

/// Resolve the base config directory from env/home conventions.
fn config_root_dir() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("XDG_CONFIG_HOME") {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return Some(PathBuf::from(trimmed));
        }
    }
    dirs::home_dir()
        .map(|home| home.join(".config"))
        .or_else(dirs::config_dir)
}
