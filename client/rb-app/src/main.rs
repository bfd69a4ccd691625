//! rb - Recipes by AI command-line client
//!
//! Signs in against the recipe service, keeps the session in a local store
//! and prints every result as JSON on stdout. Logs go to stderr.
//!
//! # Examples
//!
//! ```bash
//! # Sign in (polls until the service is awake)
//! rb login --id-token <google-id-token>
//!
//! # Accept the terms on first sign-in
//! rb terms accept
//!
//! # Ask for a recipe and star it
//! rb recipe suggest chicken rice lemon --star --pretty
//! ```

use rb_app::{App, AppError, Cli, initialize_logger};
use rb_config::Config;
use rb_session::UserFeedback;

use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use log::error;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = config.validate() {
        eprintln!("Invalid configuration: {e}");
        return ExitCode::FAILURE;
    }

    if let Err(e) = initialize_logger(
        config.logging.level,
        config.logging.file.as_deref().map(Path::new),
        config.logging.colored,
    ) {
        eprintln!("{e}");
        return ExitCode::FAILURE;
    }

    config.log_summary();

    let app = match App::new(config, cli.server) {
        Ok(app) => app,
        Err(e) => {
            error!("Startup failed: {e}");
            eprintln!("Error: {}", e.user_message());
            return ExitCode::FAILURE;
        }
    };

    match app.run(cli.command).await {
        Ok(value) => print_json(&value, cli.pretty),
        Err(e) => {
            report(&app, &e);
            ExitCode::FAILURE
        }
    }
}

fn print_json(value: &serde_json::Value, pretty: bool) -> ExitCode {
    let output = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };

    match output {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error serializing response: {}", AppError::from(e));
            ExitCode::FAILURE
        }
    }
}

fn report(app: &App, err: &AppError) {
    error!("{err}");

    match app.feedback(err) {
        UserFeedback::Notice { message, .. } => eprintln!("Error: {message}"),
        UserFeedback::SignedOut => {
            eprintln!("You are signed out. Sign in with `rb login --id-token <token>`.")
        }
        UserFeedback::ShowTerms => eprintln!(
            "Please accept the terms and conditions with `rb terms accept` \
             (or `rb terms decline` to sign out)."
        ),
    }
}
