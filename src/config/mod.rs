mod manifest;
mod options;

pub use manifest::{MANIFEST_FILE_NAME, ManifestEntry, ManifestError, TreeManifest};
pub use options::{DEFAULT_CHILDREN_FIELD, ReselectBehavior, SortOrder, TreeOptions};
