use std::path::PathBuf;

use crate::cli::Cli;

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub manifest: PathBuf,
    pub filter: Option<String>,
    pub expand: Vec<String>,
    pub select: Option<String>,
    pub state: Option<PathBuf>,
    pub color: bool,
}

impl From<Cli> for RuntimeConfig {
    fn from(cli: Cli) -> Self {
        Self {
            manifest: cli.manifest,
            filter: cli.filter,
            expand: cli.expand,
            select: cli.select,
            state: cli.state,
            color: supports_color::on(supports_color::Stream::Stdout).is_some(),
        }
    }
}
