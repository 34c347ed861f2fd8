mod cli;
mod convert;
mod recording;
mod replay;

use std::process::ExitCode;

use tether_common::ConfigError;
use tether_config::TetherConfig;
use tracing_subscriber::filter::{Directive, LevelFilter};
use tracing_subscriber::EnvFilter;

use cli::{Args, Command};

const DEFAULT_DIRECTIVE: &str = "tether=info";

fn load_config(args: &Args) -> Result<TetherConfig, ConfigError> {
    match &args.config {
        Some(path) => tether_config::load_config_from(path),
        None => tether_config::load_config(),
    }
}

/// `--log-level`, then the config's level, then the default.
fn log_directive(args: &Args, config: Option<&TetherConfig>) -> String {
    args.log_level
        .clone()
        .or_else(|| config.map(|c| c.logging.level.as_directive().to_string()))
        .unwrap_or_else(|| DEFAULT_DIRECTIVE.to_string())
}

fn init_logging(directive: &str) {
    let directive: Directive = directive.parse().unwrap_or_else(|_| {
        DEFAULT_DIRECTIVE
            .parse()
            .unwrap_or_else(|_| LevelFilter::INFO.into())
    });
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env().add_directive(directive))
        .init();
}

fn main() -> ExitCode {
    let args = cli::parse();

    let loaded = load_config(&args);
    init_logging(&log_directive(&args, loaded.as_ref().ok()));
    tracing::info!("Tether v{} starting...", env!("CARGO_PKG_VERSION"));

    match args.command {
        Command::CheckConfig => match loaded {
            Ok(config) => {
                println!("{}", tether_config::config_to_json(&config));
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("config error: {e}");
                ExitCode::FAILURE
            }
        },
        Command::Replay { ref session } => {
            let config = loaded.unwrap_or_else(|e| {
                tracing::warn!("Config load failed, using defaults: {e}");
                TetherConfig::default()
            });

            let result = replay::load_session(session)
                .and_then(|events| replay::run(convert::controller_config(&config), events));
            match result {
                Ok(lines) => {
                    for line in lines {
                        println!("{line}");
                    }
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    tracing::error!("Replay failed: {e}");
                    eprintln!("replay failed: {e}");
                    ExitCode::FAILURE
                }
            }
        }
    }
}
