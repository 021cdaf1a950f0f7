//! Command-line interface definitions.
//!
//! Defines all CLI arguments and subcommands using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Folio blog manifest CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Project root directory
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Post directory path (relative to project root)
    #[arg(short, long)]
    pub content: Option<PathBuf>,

    /// Manifest output directory path (relative to project root)
    #[arg(short, long)]
    pub data: Option<PathBuf>,

    /// Config file name (default: folio.toml)
    #[arg(short = 'C', long, default_value = "folio.toml")]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Regenerate the manifest from the post directory
    Build,

    /// Print the newest posts, one page at a time
    List {
        /// How many "load more" steps to show (1-based)
        #[arg(short, long, default_value_t = 1)]
        page: usize,

        /// Override the configured page size
        #[arg(long = "per-page")]
        per_page: Option<usize>,
    },

    /// Print a single post with its body
    Show {
        /// the post slug (file name without extension)
        slug: String,
    },

    /// Write a stub post file for every manifest entry
    Scaffold,

    /// Serve the manifest and posts as a JSON API
    Serve {
        /// Interface to bind on
        #[arg(short, long)]
        interface: Option<String>,

        /// The port you should provide
        #[arg(short, long)]
        port: Option<u16>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_build() {
        let cli = Cli::parse_from(["folio", "build"]);
        assert!(matches!(cli.command, Commands::Build));
        assert_eq!(cli.config, PathBuf::from("folio.toml"));
        assert!(cli.root.is_none());
    }

    #[test]
    fn test_parse_list_defaults() {
        let cli = Cli::parse_from(["folio", "list"]);
        match cli.command {
            Commands::List { page, per_page } => {
                assert_eq!(page, 1);
                assert_eq!(per_page, None);
            }
            _ => panic!("expected list"),
        }
    }

    #[test]
    fn test_parse_list_overrides() {
        let cli = Cli::parse_from(["folio", "list", "--page", "3", "--per-page", "2"]);
        match cli.command {
            Commands::List { page, per_page } => {
                assert_eq!(page, 3);
                assert_eq!(per_page, Some(2));
            }
            _ => panic!("expected list"),
        }
    }

    #[test]
    fn test_parse_global_paths() {
        let cli = Cli::parse_from([
            "folio", "-r", "site", "-c", "posts", "-d", "out", "-C", "custom.toml", "show", "hello",
        ]);
        assert_eq!(cli.root, Some(PathBuf::from("site")));
        assert_eq!(cli.content, Some(PathBuf::from("posts")));
        assert_eq!(cli.data, Some(PathBuf::from("out")));
        assert_eq!(cli.config, PathBuf::from("custom.toml"));
        assert!(matches!(cli.command, Commands::Show { ref slug } if slug == "hello"));
    }

    #[test]
    fn test_parse_serve() {
        let cli = Cli::parse_from(["folio", "serve", "-i", "0.0.0.0", "-p", "8080"]);
        match cli.command {
            Commands::Serve { interface, port } => {
                assert_eq!(interface.as_deref(), Some("0.0.0.0"));
                assert_eq!(port, Some(8080));
            }
            _ => panic!("expected serve"),
        }
    }
}
