//! tmugs: bring tmux sessions in line with YAML session files.
//!
//! Each session file names a set of windows, the directory each one opens in
//! and the commands typed into it. [`reconcile::Reconciler`] creates whatever
//! is missing and leaves existing windows untouched, so `tmugs start` can be
//! rerun safely.
//!
//! ```no_run
//! use tmugs::config::load_session_config;
//! use tmugs::reconcile::{Reconciler, TokioPacer};
//! use tmugs::tmux::TmuxDriver;
//! use std::path::Path;
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let loaded = load_session_config(Path::new("dev.yml"))?;
//! let driver = TmuxDriver::default();
//! let reconciler = Reconciler::new(&driver, &TokioPacer, Duration::from_secs(2));
//! let report = reconciler.reconcile(&loaded.config, None).await?;
//! println!("created {} windows", report.created());
//! # Ok(())
//! # }
//! ```

pub mod app;
pub mod build_info;
pub mod config;
pub mod credential;
pub mod error;
pub mod logging;
pub mod reconcile;
#[cfg(test)]
pub mod testsupport;
pub mod tmux;
