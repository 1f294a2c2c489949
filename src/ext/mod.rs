mod tree_path_ext;

pub use tree_path_ext::{
    TreePathExt, canonicalize, extract_name, extract_prefix, is_within, join_path, parent_path,
    trim_slashes,
};
