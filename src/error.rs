//! Unified error types for tmugs.

use std::fmt;

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Errors when loading session files or tool settings.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Yaml(serde_yaml::Error),
    Toml(toml::de::Error),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "io: {e}"),
            Self::Yaml(e) => write!(f, "yaml: {e}"),
            Self::Toml(e) => write!(f, "toml: {e}"),
            Self::Invalid(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(e: serde_yaml::Error) -> Self {
        Self::Yaml(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        Self::Toml(e)
    }
}

// ---------------------------------------------------------------------------
// DriverError
// ---------------------------------------------------------------------------

/// Errors from invoking the external tmux binary.
#[derive(Debug)]
pub enum DriverError {
    /// The process could not be spawned or awaited.
    Spawn(String),
    /// The process ran and exited non-zero.
    Failed {
        context: String,
        status: i32,
        output: String,
    },
}

impl fmt::Display for DriverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Spawn(msg) => write!(f, "spawn: {msg}"),
            Self::Failed {
                context,
                status,
                output,
            } => {
                if output.is_empty() {
                    write!(f, "{context}: exited with {status}")
                } else {
                    write!(f, "{context}: {output} (exit {status})")
                }
            }
        }
    }
}

impl std::error::Error for DriverError {}

// ---------------------------------------------------------------------------
// CredentialError
// ---------------------------------------------------------------------------

/// Errors while capturing the sudo password.
#[derive(Debug)]
pub enum CredentialError {
    /// Reading the masked password from the terminal failed.
    Prompt(std::io::Error),
    /// The verification command could not run.
    Verify(DriverError),
    /// sudo refused the password.
    Rejected(String),
}

impl fmt::Display for CredentialError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Prompt(e) => write!(f, "password prompt: {e}"),
            Self::Verify(e) => write!(f, "password verification: {e}"),
            Self::Rejected(msg) => write!(f, "sudo rejected password: {msg}"),
        }
    }
}

impl std::error::Error for CredentialError {}

// ---------------------------------------------------------------------------
// ReconcileError
// ---------------------------------------------------------------------------

/// Fatal reconciliation failures. Per-window problems are reported in the
/// reconcile report instead.
#[derive(Debug)]
pub enum ReconcileError {
    SessionCreate { session: String, source: DriverError },
}

impl fmt::Display for ReconcileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SessionCreate { session, source } => {
                write!(f, "failed to create session `{session}`: {source}")
            }
        }
    }
}

impl std::error::Error for ReconcileError {}

// ---------------------------------------------------------------------------
// AppError
// ---------------------------------------------------------------------------

/// Top-level error type for the command-line front end.
#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Driver(DriverError),
    Credential(CredentialError),
    Reconcile(ReconcileError),
    /// Writing command output failed.
    Io(std::io::Error),
    /// One or more sessions could not be killed.
    KillFailed(usize),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Driver(e) => write!(f, "tmux: {e}"),
            Self::Credential(e) => write!(f, "credential: {e}"),
            Self::Reconcile(e) => write!(f, "{e}"),
            Self::Io(e) => write!(f, "io: {e}"),
            Self::KillFailed(1) => write!(f, "1 session could not be killed"),
            Self::KillFailed(n) => write!(f, "{n} sessions could not be killed"),
        }
    }
}

impl std::error::Error for AppError {}

impl From<ConfigError> for AppError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<DriverError> for AppError {
    fn from(e: DriverError) -> Self {
        Self::Driver(e)
    }
}

impl From<CredentialError> for AppError {
    fn from(e: CredentialError) -> Self {
        Self::Credential(e)
    }
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<ReconcileError> for AppError {
    fn from(e: ReconcileError) -> Self {
        Self::Reconcile(e)
    }
}
