//! Command-line argument parsing
//!
//! Supports:
//! - Listing the command table with effective shortcuts
//! - Validating and printing a keymap
//! - Replaying scripted key sessions against an in-memory feed
//! - Writing default config and keymap files

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Keyboard command layer for social feed pages
#[derive(Parser, Debug)]
#[command(
    name = "feedkeys",
    version,
    about = "Keyboard command layer for social feed pages"
)]
pub struct CliArgs {
    /// Keymap file to use instead of the layered defaults
    #[arg(long, global = true, value_name = "PATH")]
    pub keymap: Option<PathBuf>,

    /// Layer config file to use instead of ~/.config/feedkeys/config.yaml
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    /// Print the command table with shortcuts from the effective keymap
    Commands {
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,

        /// Only list commands matching this palette query, best first
        #[arg(long, value_name = "QUERY")]
        filter: Option<String>,
    },

    /// Validate a keymap and print its bindings
    Keymap {
        /// Keymap file to check (defaults to the effective layered keymap)
        #[arg(long, value_name = "PATH")]
        file: Option<PathBuf>,
    },

    /// Run a scripted key session against an in-memory feed
    Replay {
        /// YAML script describing the page and the events
        #[arg(value_name = "SCRIPT")]
        script: PathBuf,
    },

    /// Write a default config.yaml and keymap.yaml into the config directory
    Init {
        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commands_json_flag() {
        let args = CliArgs::try_parse_from(["feedkeys", "commands", "--json"]).unwrap();
        assert_eq!(
            args.command,
            CliCommand::Commands {
                json: true,
                filter: None
            }
        );
        assert_eq!(args.keymap, None);
    }

    #[test]
    fn test_commands_filter() {
        let args =
            CliArgs::try_parse_from(["feedkeys", "commands", "--filter", "like"]).unwrap();
        assert_eq!(
            args.command,
            CliCommand::Commands {
                json: false,
                filter: Some("like".to_string())
            }
        );
    }

    #[test]
    fn test_init_force() {
        let args = CliArgs::try_parse_from(["feedkeys", "init", "--force"]).unwrap();
        assert_eq!(args.command, CliCommand::Init { force: true });
    }

    #[test]
    fn test_keymap_file() {
        let args =
            CliArgs::try_parse_from(["feedkeys", "keymap", "--file", "my.yaml"]).unwrap();
        assert_eq!(
            args.command,
            CliCommand::Keymap {
                file: Some(PathBuf::from("my.yaml"))
            }
        );
    }

    #[test]
    fn test_replay_with_global_keymap() {
        let args = CliArgs::try_parse_from([
            "feedkeys",
            "replay",
            "session.yaml",
            "--keymap",
            "custom.yaml",
        ])
        .unwrap();
        assert_eq!(
            args.command,
            CliCommand::Replay {
                script: PathBuf::from("session.yaml")
            }
        );
        assert_eq!(args.keymap, Some(PathBuf::from("custom.yaml")));
    }

    #[test]
    fn test_subcommand_required() {
        assert!(CliArgs::try_parse_from(["feedkeys"]).is_err());
    }
}
