//! Multi-level tab selection with derived group/window checkbox state

use std::collections::HashSet;

use super::filter::Visibility;
use super::{Document, TabRef};

/// Derived checkbox display state for a group or window header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckState {
    Unchecked,
    Partial,
    Checked,
}

/// The canonical selection state: which tabs are checked, each scoped by its
/// owning window so identical raw ids in different windows stay distinct.
/// Group/window checkboxes are pure reads derived on demand.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    selected: HashSet<TabRef>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn contains(&self, tab_ref: &TabRef) -> bool {
        self.selected.contains(tab_ref)
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Toggles one tab. Never cascades upward; headers derive their state.
    pub fn set_tab(&mut self, tab_ref: TabRef, selected: bool) {
        if selected {
            self.selected.insert(tab_ref);
        } else {
            self.selected.remove(&tab_ref);
        }
    }

    pub fn toggle_tab(&mut self, tab_ref: TabRef) {
        if self.selected.contains(&tab_ref) {
            self.selected.remove(&tab_ref);
        } else {
            self.selected.insert(tab_ref);
        }
    }

    /// Selects every currently rendered tab. Selection operates over the
    /// visible set, not the full document.
    pub fn select_all(&mut self, doc: &Document, vis: &Visibility) {
        for win in doc.windows() {
            for tab in vis.visible_tabs_of(win) {
                self.selected.insert(TabRef::new(win.id.clone(), tab.id.clone()));
            }
        }
    }

    pub fn select_none(&mut self) {
        self.selected.clear();
    }

    /// Cascades `selected` to every tab currently rendered under the window.
    /// Tabs hidden by the active filter are unaffected.
    pub fn select_window(
        &mut self,
        doc: &Document,
        vis: &Visibility,
        window_id: &str,
        selected: bool,
    ) {
        let Some(win) = doc.window(window_id) else {
            return;
        };
        for tab in vis.visible_tabs_of(win) {
            self.set_tab(TabRef::new(win.id.clone(), tab.id.clone()), selected);
        }
    }

    /// Cascades `selected` to the rendered tabs of one derived group.
    pub fn select_group(
        &mut self,
        doc: &Document,
        vis: &Visibility,
        window_id: &str,
        group_key: &str,
        selected: bool,
    ) {
        let Some(win) = doc.window(window_id) else {
            return;
        };
        for tab in vis.visible_tabs_of(win) {
            if tab.record.group_key().as_deref() == Some(group_key) {
                self.set_tab(TabRef::new(win.id.clone(), tab.id.clone()), selected);
            }
        }
    }

    /// Tri-state over a set of rendered tabs (a group's or a window's).
    pub fn check_state<'a>(&self, rendered: impl IntoIterator<Item = &'a TabRef>) -> CheckState {
        let mut any = false;
        let mut all = true;
        let mut seen = false;
        for tab_ref in rendered {
            seen = true;
            if self.selected.contains(tab_ref) {
                any = true;
            } else {
                all = false;
            }
        }
        if !seen || !any {
            CheckState::Unchecked
        } else if all {
            CheckState::Checked
        } else {
            CheckState::Partial
        }
    }

    /// Selected refs in document order, for the delete-selected batch.
    pub fn ordered_refs(&self, doc: &Document) -> Vec<TabRef> {
        let mut refs = Vec::with_capacity(self.selected.len());
        for win in doc.windows() {
            for tab in &win.tabs {
                let tab_ref = TabRef::new(win.id.clone(), tab.id.clone());
                if self.selected.contains(&tab_ref) {
                    refs.push(tab_ref);
                }
            }
        }
        refs
    }
}

#[cfg(test)]
mod tests {
    use super::super::codec::parse_session;
    use super::super::filter::project_visibility;
    use super::*;

    fn doc() -> Document {
        parse_session(
            r#"[{"windows":{
                "W1":{
                    "T1":{"title":"Alpha"},
                    "T2":{"title":"Beta","groupId":"G1"},
                    "T3":{"title":"Beta two","groupId":"G1"}
                },
                "W2":{
                    "T1":{"title":"Alpha in the other window"}
                }
            }}]"#,
        )
        .unwrap()
    }

    #[test]
    fn same_raw_id_in_two_windows_is_two_selections() {
        let mut sel = Selection::new();
        sel.set_tab(TabRef::new("W1", "T1"), true);
        sel.set_tab(TabRef::new("W2", "T1"), true);
        assert_eq!(sel.len(), 2);
        sel.set_tab(TabRef::new("W1", "T1"), false);
        assert!(sel.contains(&TabRef::new("W2", "T1")));
    }

    #[test]
    fn window_cascade_respects_the_filter() {
        let doc = doc();
        let vis = project_visibility(&doc, "beta");
        let mut sel = Selection::new();
        sel.select_window(&doc, &vis, "W1", true);
        // Only the rendered tabs were selected; Alpha stayed untouched.
        assert_eq!(sel.len(), 2);
        assert!(!sel.contains(&TabRef::new("W1", "T1")));
        assert!(sel.contains(&TabRef::new("W1", "T2")));
        assert!(sel.contains(&TabRef::new("W1", "T3")));
    }

    #[test]
    fn group_cascade_only_touches_that_group() {
        let doc = doc();
        let vis = project_visibility(&doc, "");
        let mut sel = Selection::new();
        sel.select_group(&doc, &vis, "W1", "G1", true);
        assert_eq!(sel.len(), 2);
        sel.select_group(&doc, &vis, "W1", "G1", false);
        assert!(sel.is_empty());
    }

    #[test]
    fn select_all_covers_only_the_rendered_set() {
        let doc = doc();
        let vis = project_visibility(&doc, "alpha");
        let mut sel = Selection::new();
        sel.select_all(&doc, &vis);
        assert_eq!(sel.len(), 2);
        assert!(sel.contains(&TabRef::new("W2", "T1")));
    }

    #[test]
    fn tri_state_derivation() {
        let doc = doc();
        let win = doc.window("W1").unwrap();
        let refs: Vec<TabRef> = win
            .tabs
            .iter()
            .map(|tab| TabRef::new("W1", tab.id.clone()))
            .collect();

        let mut sel = Selection::new();
        assert_eq!(sel.check_state(refs.iter()), CheckState::Unchecked);

        sel.set_tab(refs[0].clone(), true);
        assert_eq!(sel.check_state(refs.iter()), CheckState::Partial);

        for tab_ref in &refs {
            sel.set_tab(tab_ref.clone(), true);
        }
        assert_eq!(sel.check_state(refs.iter()), CheckState::Checked);

        // An empty rendered set (empty window header) reads unchecked.
        assert_eq!(
            sel.check_state(std::iter::empty::<&TabRef>()),
            CheckState::Unchecked
        );
    }
}
