//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// One path-based view over etcd, Consul and INI/JSON/TOML/YAML documents
#[derive(Parser, Debug)]
#[command(name = "treeconf")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Settings file layered over the global one
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Copy every value from one backend to another
    Copy {
        /// Source URI, e.g. json:/etc/app.json
        #[arg(short, long)]
        source: String,
        /// Destination URI, e.g. etcd-v3://localhost:2379/app
        #[arg(short, long)]
        dest: String,
    },

    /// Print a single value
    Get {
        /// Backend URI
        uri: String,
        /// Path of the value
        path: String,
        /// Path separator (default: from settings)
        #[arg(long)]
        separator: Option<char>,
    },

    /// Print all values below a path
    Dump {
        /// Backend URI
        uri: String,
        /// Subtree to dump (default: root)
        #[arg(default_value = "")]
        path: String,
        /// Path separator (default: from settings)
        #[arg(long)]
        separator: Option<char>,
        /// Render as a tree instead of path=value lines
        #[arg(long)]
        tree: bool,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective settings
    Show,

    /// Print a commented settings template
    Template,

    /// Show global settings path
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_copy_with_short_flags_when_parsing_then_uris_captured() {
        let cli = Cli::try_parse_from([
            "treeconf",
            "-vv",
            "copy",
            "-s",
            "json:/etc/app.json",
            "-d",
            "etcd-v3://localhost:2379/app",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Copy { source, dest } => {
                assert_eq!(source, "json:/etc/app.json");
                assert_eq!(dest, "etcd-v3://localhost:2379/app");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn given_copy_without_dest_when_parsing_then_fails() {
        assert!(Cli::try_parse_from(["treeconf", "copy", "-s", "json:/a.json"]).is_err());
    }

    #[test]
    fn given_dump_without_path_when_parsing_then_defaults_to_root() {
        let cli =
            Cli::try_parse_from(["treeconf", "dump", "file:/a.ini", "--separator", "."]).unwrap();
        match cli.command {
            Commands::Dump {
                path,
                separator,
                tree,
                ..
            } => {
                assert_eq!(path, "");
                assert_eq!(separator, Some('.'));
                assert!(!tree);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
