//! Session tree: row flattening, collapse state, and hit-testing
//!
//! `build_rows` flattens the projected render tree into uniform-height rows;
//! the renderer paints them and `TreeView::hit_test` maps clicks back onto
//! checkboxes, headers, and tab rows. Collapse state is view-only and never
//! touches the document.

use std::collections::HashSet;

use crate::config::layout;
use crate::session::project::{GroupNode, RenderTree, TabNode, WindowNode};

use super::types::{Rect, TreeHit};

/// Collapsed window/group headers. The key is the window id plus, for a
/// group, the group id.
#[derive(Debug, Clone, Default)]
pub struct CollapseState {
    collapsed: HashSet<(String, Option<String>)>,
}

impl CollapseState {
    pub fn toggle_window(&mut self, window_id: &str) {
        let key = (window_id.to_string(), None);
        if !self.collapsed.remove(&key) {
            self.collapsed.insert(key);
        }
    }

    pub fn toggle_group(&mut self, window_id: &str, group_id: &str) {
        let key = (window_id.to_string(), Some(group_id.to_string()));
        if !self.collapsed.remove(&key) {
            self.collapsed.insert(key);
        }
    }

    pub fn is_window_collapsed(&self, window_id: &str) -> bool {
        self.collapsed.contains(&(window_id.to_string(), None))
    }

    pub fn is_group_collapsed(&self, window_id: &str, group_id: &str) -> bool {
        self.collapsed
            .contains(&(window_id.to_string(), Some(group_id.to_string())))
    }

    pub fn expand_all(&mut self) {
        self.collapsed.clear();
    }

    pub fn collapse_all(&mut self, tree: &RenderTree) {
        for win in &tree.windows {
            self.collapsed.insert((win.id.clone(), None));
            for group in &win.groups {
                self.collapsed.insert((win.id.clone(), Some(group.id.clone())));
            }
        }
    }
}

#[derive(Debug)]
pub enum TreeRow<'t> {
    Window {
        node: &'t WindowNode,
        collapsed: bool,
    },
    Group {
        window_id: &'t str,
        node: &'t GroupNode,
        collapsed: bool,
    },
    Tab(&'t TabNode),
}

impl TreeRow<'_> {
    pub fn depth(&self) -> usize {
        match self {
            TreeRow::Window { .. } => 0,
            TreeRow::Group { .. } => 1,
            TreeRow::Tab(tab) => {
                if tab.grouped {
                    2
                } else {
                    1
                }
            }
        }
    }
}

/// Flattens the render tree honoring collapse state. While a search term is
/// active everything renders expanded; the manual collapse set takes effect
/// again once the term is cleared.
pub fn build_rows<'t>(tree: &'t RenderTree, collapse: &CollapseState) -> Vec<TreeRow<'t>> {
    let searching = tree.searching();
    let mut rows = Vec::new();
    for win in &tree.windows {
        let win_collapsed = !searching && collapse.is_window_collapsed(&win.id);
        rows.push(TreeRow::Window {
            node: win,
            collapsed: win_collapsed,
        });
        if win_collapsed {
            continue;
        }
        for group in &win.groups {
            let group_collapsed = !searching && collapse.is_group_collapsed(&win.id, &group.id);
            rows.push(TreeRow::Group {
                window_id: &win.id,
                node: group,
                collapsed: group_collapsed,
            });
            if group_collapsed {
                continue;
            }
            for tab in &group.tabs {
                rows.push(TreeRow::Tab(tab));
            }
        }
        for tab in &win.standalone {
            rows.push(TreeRow::Tab(tab));
        }
    }
    rows
}

/// Geometry of the tree area and its rows.
#[derive(Debug, Clone, Copy)]
pub struct TreeView {
    pub area: Rect,
    scale: f32,
}

impl TreeView {
    /// The tree fills the space below the toolbar, search bar, and stats line.
    pub fn new(width: f32, height: f32, scale: f32) -> Self {
        let top = (layout::TOOLBAR_HEIGHT + layout::SEARCH_BAR_HEIGHT + layout::STATS_HEIGHT)
            * scale;
        let padding = layout::PADDING * scale;
        Self {
            area: Rect {
                x: 0.0,
                y: top,
                width,
                height: (height - top - padding).max(0.0),
            },
            scale,
        }
    }

    pub fn row_height(&self) -> f32 {
        layout::LINE_HEIGHT * self.scale
    }

    pub fn visible_rows(&self) -> usize {
        (self.area.height / self.row_height()).floor().max(1.0) as usize
    }

    /// Screen rect of the row at `visible_idx` (0 = first on-screen row).
    pub fn row_rect(&self, visible_idx: usize) -> Rect {
        Rect {
            x: self.area.x,
            y: self.area.y + visible_idx as f32 * self.row_height(),
            width: self.area.width,
            height: self.row_height(),
        }
    }

    pub fn indent_x(&self, depth: usize) -> f32 {
        layout::PADDING * self.scale + depth as f32 * layout::TREE_INDENT * self.scale
    }

    pub fn checkbox_rect(&self, row_rect: Rect, depth: usize) -> Rect {
        let size = layout::CHECKBOX_SIZE * self.scale;
        Rect {
            x: self.indent_x(depth),
            y: row_rect.y + (row_rect.height - size) / 2.0,
            width: size,
            height: size,
        }
    }

    pub fn hit_test(&self, rows: &[TreeRow<'_>], scroll_offset: usize, x: f32, y: f32) -> TreeHit {
        if !self.area.contains(x, y) {
            return TreeHit::None;
        }
        let visible_idx = ((y - self.area.y) / self.row_height()).floor() as usize;
        let Some(row) = rows.get(scroll_offset + visible_idx) else {
            return TreeHit::None;
        };
        let row_rect = self.row_rect(visible_idx);
        let checkbox = self.checkbox_rect(row_rect, row.depth());
        // Grow the checkbox target a little; exact 14px squares are fiddly.
        let on_checkbox = x >= checkbox.x - 2.0
            && x <= checkbox.x + checkbox.width + 2.0
            && y >= checkbox.y - 2.0
            && y <= checkbox.y + checkbox.height + 2.0;

        match row {
            TreeRow::Window { node, .. } => {
                if on_checkbox {
                    TreeHit::WindowCheckbox(node.id.clone())
                } else {
                    TreeHit::WindowHeader(node.id.clone())
                }
            }
            TreeRow::Group {
                window_id, node, ..
            } => {
                if on_checkbox {
                    TreeHit::GroupCheckbox {
                        window_id: (*window_id).to_string(),
                        group_id: node.id.clone(),
                    }
                } else {
                    TreeHit::GroupHeader {
                        window_id: (*window_id).to_string(),
                        group_id: node.id.clone(),
                    }
                }
            }
            TreeRow::Tab(tab) => {
                if on_checkbox {
                    TreeHit::TabCheckbox(tab.tab.clone())
                } else {
                    TreeHit::TabRow(tab.tab.clone())
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Selection;
    use crate::session::codec::parse_session;
    use crate::session::project::project;

    fn tree() -> RenderTree {
        let doc = parse_session(
            r#"[{"windows":{"W1":{
                "T1":{"title":"Alpha"},
                "T2":{"title":"Beta","groupId":"G1"},
                "T3":{"title":"Gamma","groupId":"G1"}
            }}}]"#,
        )
        .unwrap();
        project(&doc, "", &Selection::new())
    }

    #[test]
    fn rows_follow_group_then_standalone_order() {
        let tree = tree();
        let rows = build_rows(&tree, &CollapseState::default());
        // window, group, two grouped tabs, one standalone tab
        assert_eq!(rows.len(), 5);
        assert!(matches!(rows[0], TreeRow::Window { .. }));
        assert!(matches!(rows[1], TreeRow::Group { .. }));
        assert!(matches!(rows[4], TreeRow::Tab(tab) if !tab.grouped));
    }

    #[test]
    fn collapsed_window_hides_children() {
        let tree = tree();
        let mut collapse = CollapseState::default();
        collapse.toggle_window("W1");
        let rows = build_rows(&tree, &collapse);
        assert_eq!(rows.len(), 1);
        collapse.toggle_window("W1");
        assert_eq!(build_rows(&tree, &collapse).len(), 5);
    }

    #[test]
    fn collapsed_group_hides_only_its_tabs() {
        let tree = tree();
        let mut collapse = CollapseState::default();
        collapse.toggle_group("W1", "G1");
        let rows = build_rows(&tree, &collapse);
        assert_eq!(rows.len(), 3); // window, group header, standalone tab
    }

    #[test]
    fn searching_renders_everything_expanded() {
        let doc = parse_session(
            r#"[{"windows":{"W1":{"T2":{"title":"Beta","groupId":"G1"}}}}]"#,
        )
        .unwrap();
        let projected = project(&doc, "beta", &Selection::new());
        let mut collapse = CollapseState::default();
        collapse.collapse_all(&projected);
        let rows = build_rows(&projected, &collapse);
        assert_eq!(rows.len(), 3);
    }

    #[test]
    fn collapse_survives_a_search_round_trip() {
        let tree = tree();
        let mut collapse = CollapseState::default();
        collapse.toggle_window("W1");
        assert!(collapse.is_window_collapsed("W1"));
        // The search itself doesn't erase the manual set.
        let doc = parse_session(r#"[{"windows":{"W1":{"T1":{"title":"Alpha"}}}}]"#).unwrap();
        let searched = project(&doc, "alpha", &Selection::new());
        assert_eq!(build_rows(&searched, &collapse).len(), 2);
        assert_eq!(build_rows(&tree, &collapse).len(), 1);
    }

    #[test]
    fn hit_testing_distinguishes_checkbox_and_header() {
        let tree = tree();
        let rows = build_rows(&tree, &CollapseState::default());
        let view = TreeView::new(800.0, 600.0, 1.0);

        let row_rect = view.row_rect(0);
        let checkbox = view.checkbox_rect(row_rect, 0);
        let hit = view.hit_test(
            &rows,
            0,
            checkbox.x + checkbox.width / 2.0,
            checkbox.y + checkbox.height / 2.0,
        );
        assert_eq!(hit, TreeHit::WindowCheckbox("W1".to_string()));

        let hit = view.hit_test(&rows, 0, row_rect.x + 300.0, row_rect.y + 5.0);
        assert_eq!(hit, TreeHit::WindowHeader("W1".to_string()));

        // Below the last row: nothing.
        let below = view.row_rect(rows.len());
        assert_eq!(view.hit_test(&rows, 0, 10.0, below.y + 5.0), TreeHit::None);
    }
}
