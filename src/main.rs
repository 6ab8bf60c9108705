//! CLI entry point for tmugs.

mod cli;

use clap::Parser;
use tmugs::app;
use tmugs::config::load_settings;
use tmugs::credential::{CredentialCache, TerminalPrompt};
use tmugs::error::AppError;
use tmugs::logging::init_logging;
use tmugs::reconcile::TokioPacer;
use tmugs::tmux::TmuxDriver;

use cli::{Args, Command};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    let settings = match load_settings(args.settings.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };
    tracing::debug!(tmux = %settings.tmux.binary, "settings loaded");

    let driver = TmuxDriver::new(settings.tmux.binary.clone());
    let mux = &driver;

    let result: Result<(), AppError> = match args.command {
        Command::Start { configs } => {
            let verifier = settings.sudo.verify.then(|| "sudo".to_string());
            let mut credentials = CredentialCache::new(TerminalPrompt, verifier);
            app::start_sessions(mux, &TokioPacer, &settings, &mut credentials, &configs)
                .await
                .map(|_reports| ())
        }
        Command::Ls { session: None, .. } => {
            app::list_sessions(mux, &mut std::io::stdout().lock()).await
        }
        Command::Ls {
            session: Some(session),
            index,
        } => app::list_windows(mux, &session, index, &mut std::io::stdout().lock()).await,
        Command::Attach { session, window } => app::select_window(mux, &session, &window).await,
        Command::Kill { sessions } => app::kill_sessions(mux, &sessions).await,
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
