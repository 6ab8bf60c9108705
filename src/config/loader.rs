//! Session-file loading: YAML parsing, tab validation and root resolution.

use std::path::{Path, PathBuf};

use crate::error::ConfigError;

use super::defaults::{DEFAULT_WINDOW_DIR, PLACEHOLDER_ROOT, SUDO_MARKER_KEY};
use super::types::{FileRun, FileRunEntry, FileSession, FileTab};
use super::{CommandSpec, LoadedSession, SessionConfig, SessionDiagnostics, SkippedWindow, WindowSpec};

/// Load a session file from disk.
///
/// Malformed tab entries are dropped and reported in the diagnostics; a
/// malformed document is an error.
pub fn load_session_config(path: &Path) -> Result<LoadedSession, ConfigError> {
    load_session_config_from_sources(
        path,
        |path| std::fs::read_to_string(path),
        std::env::current_dir,
        dirs::home_dir,
    )
}

pub(super) fn load_session_config_from_sources<FRead, FCwd, FHome>(
    path: &Path,
    read_file: FRead,
    current_dir: FCwd,
    home_dir: FHome,
) -> Result<LoadedSession, ConfigError>
where
    FRead: Fn(&Path) -> Result<String, std::io::Error>,
    FCwd: Fn() -> Result<PathBuf, std::io::Error>,
    FHome: Fn() -> Option<PathBuf>,
{
    let name = session_name_from_path(path)?;
    let text = read_file(path)?;
    let loaded = parse_session_config(&name, &text, current_dir, home_dir)?;
    for skipped in &loaded.diagnostics.skipped {
        tracing::error!(
            file = %path.display(),
            tab = skipped.index,
            reason = %skipped.reason,
            "skipping malformed tab"
        );
    }
    Ok(loaded)
}

/// Session name: the file's base name up to the first `.`.
pub fn session_name_from_path(path: &Path) -> Result<String, ConfigError> {
    let base = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = base.split('.').next().unwrap_or_default();
    if name.is_empty() {
        return Err(ConfigError::Invalid(format!(
            "cannot derive a session name from `{}`",
            path.display()
        )));
    }
    Ok(name.to_string())
}

/// Parse session-file text into a validated config.
pub fn parse_session_config<FCwd, FHome>(
    name: &str,
    text: &str,
    current_dir: FCwd,
    home_dir: FHome,
) -> Result<LoadedSession, ConfigError>
where
    FCwd: Fn() -> Result<PathBuf, std::io::Error>,
    FHome: Fn() -> Option<PathBuf>,
{
    let document: serde_yaml::Value = serde_yaml::from_str(text)?;
    let use_sudo = document
        .as_mapping()
        .is_some_and(|map| map.contains_key(SUDO_MARKER_KEY));
    let file: FileSession = serde_yaml::from_value(document)?;

    let root = resolve_root(file.root.as_deref(), &current_dir, &home_dir);

    let mut windows = Vec::with_capacity(file.tabs.len());
    let mut diagnostics = SessionDiagnostics::default();
    for (index, tab) in file.tabs.iter().enumerate() {
        match parse_tab(tab) {
            Ok(window) => windows.push(window),
            Err(reason) => diagnostics.skipped.push(SkippedWindow { index, reason }),
        }
    }

    Ok(LoadedSession {
        config: SessionConfig {
            name: name.to_string(),
            root,
            use_sudo,
            windows,
        },
        diagnostics,
    })
}

/// Resolve the session root.
///
/// Explicit roots win; otherwise the working directory, then `~/`. A leading
/// `~` is expanded when the home directory is known, and relative explicit
/// roots are anchored at the working directory.
fn resolve_root<FCwd, FHome>(explicit: Option<&str>, current_dir: &FCwd, home_dir: &FHome) -> PathBuf
where
    FCwd: Fn() -> Result<PathBuf, std::io::Error>,
    FHome: Fn() -> Option<PathBuf>,
{
    match explicit {
        Some(raw) => {
            let expanded = expand_home(raw, home_dir);
            if expanded.is_relative() && !raw.starts_with('~') {
                if let Ok(cwd) = current_dir() {
                    return cwd.join(expanded);
                }
            }
            expanded
        }
        None => match current_dir() {
            Ok(cwd) => cwd,
            Err(e) => {
                tracing::warn!(error = %e, "working directory unavailable; using {PLACEHOLDER_ROOT}");
                expand_home(PLACEHOLDER_ROOT, home_dir)
            }
        },
    }
}

fn expand_home<FHome>(raw: &str, home_dir: &FHome) -> PathBuf
where
    FHome: Fn() -> Option<PathBuf>,
{
    let rest = if raw == "~" {
        Some("")
    } else {
        raw.strip_prefix("~/")
    };
    match (rest, home_dir()) {
        (Some(rest), Some(home)) if rest.is_empty() => home,
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(raw),
    }
}

/// Validate one `tabs` entry: a single-key map from window name to body.
fn parse_tab(tab: &serde_yaml::Value) -> Result<WindowSpec, String> {
    let map = tab
        .as_mapping()
        .ok_or_else(|| format!("expected a single-key mapping, got {}", describe(tab)))?;
    if map.len() != 1 {
        return Err(format!(
            "expected exactly one window name per tab, got {} keys",
            map.len()
        ));
    }
    let Some((key, body)) = map.iter().next() else {
        return Err("empty tab".to_string());
    };
    let name = key
        .as_str()
        .ok_or_else(|| format!("window name must be a string, got {}", describe(key)))?;

    let body: FileTab = match body {
        serde_yaml::Value::Null => FileTab::default(),
        serde_yaml::Value::Mapping(_) => serde_yaml::from_value(body.clone())
            .map_err(|e| format!("window `{name}`: {e}"))?,
        other => {
            return Err(format!(
                "window `{name}`: expected a mapping, got {}",
                describe(other)
            ))
        }
    };

    let commands = match body.run {
        None => Vec::new(),
        Some(FileRun::One(text)) => vec![CommandSpec::Plain(text)],
        Some(FileRun::Many(entries)) => entries
            .into_iter()
            .map(|entry| match entry {
                FileRunEntry::Plain(text) => CommandSpec::Plain(text),
                FileRunEntry::Sudo(entry) => CommandSpec::Sudo(entry.sudo),
            })
            .collect(),
    };

    Ok(WindowSpec {
        name: name.to_string(),
        cd: body.cd.unwrap_or_else(|| DEFAULT_WINDOW_DIR.to_string()),
        sleep_secs: body.sleep.unwrap_or(0),
        commands,
    })
}

fn describe(value: &serde_yaml::Value) -> &'static str {
    match value {
        serde_yaml::Value::Null => "null",
        serde_yaml::Value::Bool(_) => "a boolean",
        serde_yaml::Value::Number(_) => "a number",
        serde_yaml::Value::String(_) => "a string",
        serde_yaml::Value::Sequence(_) => "a sequence",
        serde_yaml::Value::Mapping(_) => "a mapping",
        serde_yaml::Value::Tagged(_) => "a tagged value",
    }
}
