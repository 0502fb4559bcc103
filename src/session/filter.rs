//! Search/filter projection over a session document

use std::collections::HashSet;

use super::{Document, SessionWindow, TabRecord, TabRef};

/// Case-insensitive substring match against title OR url. An empty term
/// matches everything; an absent field never matches.
pub fn tab_matches(record: &TabRecord, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    let needle = term.to_lowercase();
    let hit = |field: &Option<String>| {
        field
            .as_deref()
            .map(|text| text.to_lowercase().contains(&needle))
            .unwrap_or(false)
    };
    hit(&record.title) || hit(&record.url)
}

/// Visible tab set for one (document, term) pair, plus found/total counts.
/// Derived, never stored; recomputed whenever the term changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Visibility {
    visible: HashSet<TabRef>,
    pub total_tabs: usize,
    pub matched_tabs: usize,
}

impl Visibility {
    pub fn is_visible(&self, tab_ref: &TabRef) -> bool {
        self.visible.contains(tab_ref)
    }

    /// A window renders iff it has at least one visible tab, or no tabs at
    /// all (an explicitly empty window stays reachable as an add-tab target).
    pub fn window_visible(&self, win: &SessionWindow) -> bool {
        win.tabs.is_empty()
            || win
                .tabs
                .iter()
                .any(|tab| self.visible.contains(&TabRef::new(win.id.clone(), tab.id.clone())))
    }

    /// Rendered tabs under a window, in document order.
    pub fn visible_tabs_of<'doc>(&self, win: &'doc SessionWindow) -> Vec<&'doc super::SessionTab> {
        win.tabs
            .iter()
            .filter(|tab| self.visible.contains(&TabRef::new(win.id.clone(), tab.id.clone())))
            .collect()
    }
}

/// Evaluates `tab_matches` for every tab. Idempotent: unchanged inputs yield
/// an identical visible set.
pub fn project_visibility(doc: &Document, term: &str) -> Visibility {
    let term = term.trim();
    let mut visible = HashSet::new();
    let mut total_tabs = 0;
    let mut matched_tabs = 0;
    for win in doc.windows() {
        for tab in &win.tabs {
            total_tabs += 1;
            if tab_matches(&tab.record, term) {
                matched_tabs += 1;
                visible.insert(TabRef::new(win.id.clone(), tab.id.clone()));
            }
        }
    }
    Visibility {
        visible,
        total_tabs,
        matched_tabs,
    }
}

#[cfg(test)]
mod tests {
    use super::super::codec::parse_session;
    use super::*;

    fn alpha_beta() -> Document {
        parse_session(
            r#"[{"windows":{"W1":{
                "T1":{"id":"T1","title":"Alpha"},
                "T2":{"id":"T2","title":"Beta","groupId":"G1"}
            }}}]"#,
        )
        .unwrap()
    }

    #[test]
    fn empty_term_matches_everything() {
        let doc = alpha_beta();
        let vis = project_visibility(&doc, "");
        assert_eq!(vis.total_tabs, 2);
        assert_eq!(vis.matched_tabs, 2);
    }

    #[test]
    fn match_is_case_insensitive_over_title_and_url() {
        let doc = parse_session(
            r#"[{"windows":{"W1":{
                "T1":{"title":"Steam Login"},
                "T2":{"url":"https://forums.FUNCOM.com/t/thread"},
                "T3":{}
            }}}]"#,
        )
        .unwrap();
        let win = doc.window("W1").unwrap();
        assert!(tab_matches(&win.tab("T1").unwrap().record, "steam"));
        assert!(tab_matches(&win.tab("T2").unwrap().record, "funcom"));
        // Absent fields never match.
        assert!(!tab_matches(&win.tab("T3").unwrap().record, "anything"));
    }

    #[test]
    fn beta_search_hides_alpha_but_keeps_window() {
        let doc = alpha_beta();
        let vis = project_visibility(&doc, "beta");
        assert_eq!(vis.matched_tabs, 1);
        assert!(vis.is_visible(&TabRef::new("W1", "T2")));
        assert!(!vis.is_visible(&TabRef::new("W1", "T1")));
        assert!(vis.window_visible(doc.window("W1").unwrap()));
    }

    #[test]
    fn empty_window_always_renders() {
        let doc = parse_session(r#"[{"windows":{"W1":{"T1":{"title":"x"}},"W2":{}}}]"#).unwrap();
        let vis = project_visibility(&doc, "zzz-no-match");
        assert!(!vis.window_visible(doc.window("W1").unwrap()));
        assert!(vis.window_visible(doc.window("W2").unwrap()));
    }

    #[test]
    fn projection_is_idempotent() {
        let doc = alpha_beta();
        assert_eq!(
            project_visibility(&doc, "beta"),
            project_visibility(&doc, "beta")
        );
    }
}
