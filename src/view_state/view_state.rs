use std::path::{Path, PathBuf};

use bincode::{Decode, Encode};
use compio::fs;
use snafu::{ResultExt, Snafu};
use tracing::{debug, info, warn};

const ZSTD_LEVEL: i32 = 3;

/// The part of an engine's state worth keeping between sessions.
#[derive(Debug, Clone, PartialEq, Eq, Default, Encode, Decode)]
pub struct ViewState {
    pub expanded: Vec<String>,
    pub selected: Option<String>,
    pub query: String,
}

impl ViewState {
    /// Reads a saved state. A missing or unreadable file gives an empty state.
    pub async fn read(path: &Path) -> Self {
        debug!("Reading view state from {}", path.display());
        let bytes = match fs::read(path).await {
            Ok(bytes) => bytes,
            Err(_) => {
                info!("No saved view state found, starting fresh");
                return Self::default();
            }
        };
        match Self::from_bytes(&bytes) {
            Ok(state) => {
                debug!("Successfully read view state: {:?}", state);
                state
            }
            Err(e) => {
                warn!("Ignoring saved view state: {}", e);
                Self::default()
            }
        }
    }

    pub async fn write(&self, path: &Path) -> Result<(), ViewStateError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.context(WriteSnafu {
                path: parent.to_path_buf(),
            })?;
        }

        let bytes = self.to_bytes()?;
        fs::write(path, bytes).await.0.context(WriteSnafu {
            path: path.to_path_buf(),
        })?;
        debug!("Saved view state to {}", path.display());
        Ok(())
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, ViewStateError> {
        let encoded =
            bincode::encode_to_vec(self, bincode::config::standard()).context(EncodeSnafu)?;
        zstd::encode_all(encoded.as_slice(), ZSTD_LEVEL).context(CompressionSnafu)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ViewStateError> {
        let decoded = zstd::decode_all(bytes).context(CompressionSnafu)?;
        let (state, _) = bincode::decode_from_slice(&decoded, bincode::config::standard())
            .context(DecodeSnafu)?;
        Ok(state)
    }
}

#[derive(Debug, Snafu)]
pub enum ViewStateError {
    #[snafu(display("Failed to write view state to {}", path.display()))]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display("Failed to encode view state"))]
    EncodeError { source: bincode::error::EncodeError },
    #[snafu(display("Failed to decode view state"))]
    DecodeError { source: bincode::error::DecodeError },
    #[snafu(display("Failed to (de)compress view state"))]
    CompressionError { source: std::io::Error },
}
