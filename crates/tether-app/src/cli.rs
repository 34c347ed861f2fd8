use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Tether: drive the script bridge without a real web view.
#[derive(Parser, Debug)]
#[command(name = "tether", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log directive override (e.g. `tether=debug`).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Replay a JSON session of host events and print every collaborator
    /// call as one JSON line.
    Replay {
        /// Path to the session file (a JSON array of events).
        session: PathBuf,
    },
    /// Load and validate the config, then print it as JSON.
    CheckConfig,
}

pub fn parse() -> Args {
    Args::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_replay_with_global_flags() {
        let args = Args::try_parse_from([
            "tether",
            "replay",
            "session.json",
            "--log-level",
            "tether=debug",
        ])
        .unwrap();
        assert_eq!(args.log_level.as_deref(), Some("tether=debug"));
        assert!(matches!(args.command, Command::Replay { ref session } if session == &PathBuf::from("session.json")));
    }

    #[test]
    fn parses_check_config() {
        let args = Args::try_parse_from(["tether", "--config", "x.toml", "check-config"]).unwrap();
        assert_eq!(args.config, Some(PathBuf::from("x.toml")));
        assert!(matches!(args.command, Command::CheckConfig));
    }

    #[test]
    fn subcommand_is_required() {
        assert!(Args::try_parse_from(["tether"]).is_err());
    }
}
