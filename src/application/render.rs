use colored::Colorize;
use tree_state::tree::{RowState, VisibleRow};

/// Renders rows as an indented outline, one node per line.
pub fn render_rows(rows: &[VisibleRow], color: bool) -> String {
    let mut output = String::new();
    for row in rows {
        let indent = "  ".repeat(row.depth);
        let marker = match row.state {
            RowState::Leaf => " ",
            RowState::Expanded => "▾",
            RowState::Collapsed => "▸",
        };
        let label = if row.editable {
            format!("[{}]", row.name)
        } else {
            row.name.clone()
        };

        let label = if !color {
            label
        } else {
            let styled = match row.state {
                RowState::Leaf => label.as_str().normal(),
                RowState::Expanded | RowState::Collapsed => label.as_str().blue().bold(),
            };
            if row.selected {
                styled.reversed().to_string()
            } else {
                styled.to_string()
            }
        };
        let selected = if row.selected && !color { " *" } else { "" };

        output.push_str(&format!("{indent}{marker} {label}{selected}\n"));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(depth: usize, name: &str, state: RowState, selected: bool) -> VisibleRow {
        VisibleRow {
            depth,
            path: name.to_string(),
            name: name.to_string(),
            state,
            selected,
            editable: false,
        }
    }

    #[test]
    fn test_render_plain_outline() {
        let rows = vec![
            row(0, "src", RowState::Expanded, false),
            row(1, "lib.rs", RowState::Leaf, true),
            row(0, "docs", RowState::Collapsed, false),
        ];
        assert_eq!(render_rows(&rows, false), "▾ src\n    lib.rs *\n▸ docs\n");
    }

    #[test]
    fn test_render_marks_editable_rows() {
        let mut editing = row(0, "draft", RowState::Leaf, false);
        editing.editable = true;
        assert_eq!(render_rows(&[editing], false), "  [draft]\n");
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(render_rows(&[], true), "");
    }
}
