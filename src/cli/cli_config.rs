use std::path::PathBuf;

use clap::Parser;

use crate::cli::LogLevel;

/// Loads a tree manifest, applies expansion, filter and selection, and
/// prints the rows a tree view would show.
#[derive(Parser, Debug, Clone)]
#[command(version)]
pub struct Cli {
    /// Manifest file, or a directory containing `tree.yaml`
    #[clap(default_value = ".")]
    pub manifest: PathBuf,

    /// Only show nodes whose name contains this text, and their ancestors
    #[clap(long, short)]
    pub filter: Option<String>,

    /// Expand a node before rendering; may be repeated
    #[clap(long, short)]
    pub expand: Vec<String>,

    /// Reveal and select the node at this path
    #[clap(long, short)]
    pub select: Option<String>,

    /// File keeping expansion, selection and filter between runs
    #[clap(long)]
    pub state: Option<PathBuf>,

    #[clap(long, short, default_value = "warn", value_enum)]
    pub log_level: LogLevel,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_defaults() {
        let cli = Cli::try_parse_from(["tree-state"]).unwrap();
        assert_eq!(cli.manifest, PathBuf::from("."));
        assert!(cli.expand.is_empty());
        assert!(cli.filter.is_none());
        assert!(matches!(cli.log_level, LogLevel::Warn));
    }

    #[test]
    fn test_parse_all_arguments() {
        let cli = Cli::try_parse_from([
            "tree-state",
            "tree.yaml",
            "--filter",
            "cat",
            "-e",
            "a",
            "-e",
            "a/b",
            "--select",
            "a/b/c",
            "--state",
            ".tree-state",
            "-l",
            "debug",
        ])
        .unwrap();
        assert_eq!(cli.manifest, PathBuf::from("tree.yaml"));
        assert_eq!(cli.filter.as_deref(), Some("cat"));
        assert_eq!(cli.expand, vec!["a", "a/b"]);
        assert_eq!(cli.select.as_deref(), Some("a/b/c"));
        assert_eq!(cli.state, Some(PathBuf::from(".tree-state")));
        assert!(matches!(cli.log_level, LogLevel::Debug));
    }
}
