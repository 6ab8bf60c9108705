//! CLI argument parsing via clap.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use tmugs::build_info;

/// Reconcile tmux sessions against YAML session files.
#[derive(Debug, Parser)]
#[command(
    name = "tmugs",
    version,
    long_version = build_info::LONG_VERSION,
    after_help = build_info::HELP_BUILD_METADATA,
    arg_required_else_help = true
)]
pub struct Args {
    /// Tool settings file (default: $XDG_CONFIG_HOME/tmugs/tmugs.toml).
    #[arg(long = "settings", global = true, value_name = "FILE")]
    pub settings: Option<PathBuf>,

    /// Raise log verbosity (-v debug, -vv trace). TMUGS_LOG overrides.
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create or complete the sessions described by each file.
    Start {
        /// Session files; the session name is the file name up to the first `.`.
        #[arg(required = true, value_name = "CFG")]
        configs: Vec<PathBuf>,
    },
    /// List sessions, or the windows of one session.
    Ls {
        session: Option<String>,
        /// Print windows as `index:name`.
        #[arg(short = 'i', long = "index", requires = "session")]
        index: bool,
    },
    /// Select a window in a session.
    #[command(name = "a")]
    Attach { session: String, window: String },
    /// Kill one or more sessions.
    Kill {
        #[arg(required = true)]
        sessions: Vec<String>,
    },
}
