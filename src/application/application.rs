use std::io::Write;

use futures::StreamExt;
use snafu::Snafu;
use snafu::prelude::*;
use tracing::{debug, info, warn};
use tree_state::config::{ManifestError, TreeManifest};
use tree_state::listener::ChannelListener;
use tree_state::view_state::{ViewState, ViewStateError};

use crate::application::RuntimeConfig;
use crate::application::render::render_rows;

pub struct Application;

impl Application {
    pub async fn run(app_config: impl Into<RuntimeConfig>) -> Result<(), ApplicationError> {
        let app_config: RuntimeConfig = app_config.into();

        let manifest = if app_config.manifest.is_dir() {
            TreeManifest::read(&app_config.manifest).await
        } else {
            TreeManifest::from_path(app_config.manifest.clone()).await
        }
        .context(ManifestSnafu)?;
        debug!("Loaded manifest with {} entries", manifest.entries.len());

        let (listener, mut events) = ChannelListener::channel();
        let mut engine = manifest
            .into_engine()
            .with_listener(Box::new(listener.clone()))
            .with_context_menu(Box::new(listener));

        if let Some(state_path) = &app_config.state {
            engine.restore_view_state(ViewState::read(state_path).await);
        }
        for path in &app_config.expand {
            if !engine.expand(path) && !engine.is_expanded(path) {
                warn!("Cannot expand '{}': no such node", path);
            }
        }
        if let Some(query) = &app_config.filter {
            if !engine.set_filter(query) {
                info!("No node matches '{}'", query);
            }
        }
        if let Some(target) = &app_config.select {
            if !engine.select_by_path(target) {
                warn!("Cannot select '{}': no such node", target);
            }
        }

        let output = render_rows(&engine.visible_rows(), app_config.color);
        std::io::stdout()
            .write_all(output.as_bytes())
            .context(OutputSnafu)?;

        if let Some(state_path) = &app_config.state {
            engine
                .view_state()
                .write(state_path)
                .await
                .context(ViewStateSnafu)?;
        }

        // Dropping the engine drops its listeners and closes the channel.
        drop(engine);
        while let Some(event) = events.next().await {
            debug!("Tree event: {}", event);
        }

        Ok(())
    }
}

#[derive(Debug, Snafu)]
pub enum ApplicationError {
    #[snafu(display("Critical failure encountered while loading the manifest"))]
    ManifestError { source: ManifestError },
    #[snafu(display("Failed to save the view state"))]
    ViewStateError { source: ViewStateError },
    #[snafu(display("Failed to write the tree to stdout"))]
    OutputError { source: std::io::Error },
}
