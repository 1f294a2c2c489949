use crate::ext::{TreePathExt, canonicalize, join_path};

/// The currently selected node, held by path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    selected: Option<String>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn path(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn is_selected(&self, path: &str) -> bool {
        self.selected.as_deref() == Some(path)
    }

    pub fn select(&mut self, path: &str) {
        self.selected = Some(canonicalize(path));
    }

    /// Clears the selection, returning what was selected.
    pub fn clear(&mut self) -> Option<String> {
        self.selected.take()
    }

    /// Clears the selection if it points at `path` or below it. Returns
    /// whether anything was cleared.
    pub fn invalidate_subtree(&mut self, path: &str) -> bool {
        if self.selected.as_ref().is_some_and(|s| s.is_within(path)) {
            self.selected = None;
            true
        } else {
            false
        }
    }

    pub fn rename_subtree(&mut self, old_path: &str, new_path: &str) {
        if let Some(selected) = self.selected.as_mut() {
            if selected == old_path {
                *selected = new_path.to_string();
            } else if selected.is_within(old_path) {
                *selected = join_path(new_path, &selected[old_path.len() + 1..]);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_and_clear() {
        let mut selection = Selection::new();
        selection.select("/a/b/");
        assert!(selection.is_selected("a/b"));
        assert_eq!(selection.clear(), Some("a/b".to_string()));
        assert_eq!(selection.path(), None);
    }

    #[test]
    fn test_invalidate_subtree() {
        let mut selection = Selection::new();
        selection.select("a/b");
        assert!(!selection.invalidate_subtree("ab"));
        assert!(selection.invalidate_subtree("a"));
        assert_eq!(selection.path(), None);
    }

    #[test]
    fn test_rename_subtree_follows_ancestor() {
        let mut selection = Selection::new();
        selection.select("a/b/c");
        selection.rename_subtree("a/b", "a/x");
        assert_eq!(selection.path(), Some("a/x/c"));
        selection.rename_subtree("a/x/c", "a/x/d");
        assert_eq!(selection.path(), Some("a/x/d"));
    }
}
