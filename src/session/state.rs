//! Session controller: owns the document, search term, and selection
//!
//! Every user edit funnels through here and is followed by one full
//! re-projection; the rendered tree is never edited independently.

use super::codec;
use super::filter;
use super::project::{self, RenderTree};
use super::selection::Selection;
use super::{Document, SessionError, TabRef};

#[derive(Debug, Default)]
pub struct SessionState {
    document: Option<Document>,
    term: String,
    selection: Selection,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loaded(&self) -> bool {
        self.document.is_some()
    }

    pub fn document(&self) -> Option<&Document> {
        self.document.as_ref()
    }

    fn document_mut(&mut self) -> Result<&mut Document, SessionError> {
        self.document.as_mut().ok_or(SessionError::NoDocumentLoaded)
    }

    /// Replaces the document wholesale and resets the view state.
    pub fn load(&mut self, doc: Document) {
        self.document = Some(doc);
        self.term.clear();
        self.selection.clear();
    }

    pub fn search_term(&self) -> &str {
        &self.term
    }

    /// Any actual change to the term clears the selection before
    /// re-filtering, so tabs hidden by the new filter can't stay selected.
    pub fn set_search_term(&mut self, term: &str) {
        let term = term.trim();
        if term != self.term {
            self.term = term.to_string();
            self.selection.clear();
        }
    }

    /// Leaving the tree view keeps the document but drops term + selection.
    pub fn reset_view(&mut self) {
        self.term.clear();
        self.selection.clear();
    }

    pub fn selected_count(&self) -> usize {
        self.selection.len()
    }

    // =========================================================================
    // Edit intents
    // =========================================================================

    pub fn add_window(&mut self) -> Result<String, SessionError> {
        Ok(self.document_mut()?.add_window())
    }

    pub fn add_tab(
        &mut self,
        window_id: &str,
        title: &str,
        url: &str,
    ) -> Result<String, SessionError> {
        self.document_mut()?.add_tab(window_id, title, url)
    }

    /// Deletes the selected tabs, applies the cascade policy, and leaves the
    /// selection empty. Returns how many tabs were removed.
    pub fn delete_selected(&mut self) -> Result<usize, SessionError> {
        let doc = self.document.as_mut().ok_or(SessionError::NoDocumentLoaded)?;
        let refs = self.selection.ordered_refs(doc);
        let removed = doc.delete_tabs(&refs);
        self.selection.clear();
        Ok(removed)
    }

    // =========================================================================
    // Selection intents
    // =========================================================================

    pub fn toggle_tab(&mut self, tab_ref: TabRef) {
        self.selection.toggle_tab(tab_ref);
    }

    pub fn select_all(&mut self) {
        if let Some(doc) = &self.document {
            let vis = filter::project_visibility(doc, &self.term);
            self.selection.select_all(doc, &vis);
        }
    }

    pub fn select_none(&mut self) {
        self.selection.select_none();
    }

    pub fn set_window_selected(&mut self, window_id: &str, selected: bool) {
        if let Some(doc) = &self.document {
            let vis = filter::project_visibility(doc, &self.term);
            self.selection.select_window(doc, &vis, window_id, selected);
        }
    }

    pub fn set_group_selected(&mut self, window_id: &str, group_key: &str, selected: bool) {
        if let Some(doc) = &self.document {
            let vis = filter::project_visibility(doc, &self.term);
            self.selection
                .select_group(doc, &vis, window_id, group_key, selected);
        }
    }

    // =========================================================================
    // Derived views
    // =========================================================================

    pub fn project(&self) -> Option<RenderTree> {
        self.document
            .as_ref()
            .map(|doc| project::project(doc, &self.term, &self.selection))
    }

    pub fn export_json(&self) -> Result<String, SessionError> {
        let doc = self.document.as_ref().ok_or(SessionError::NoDocumentLoaded)?;
        Ok(codec::to_json_pretty(doc))
    }

    pub fn window_ids(&self) -> Vec<String> {
        self.document
            .as_ref()
            .map(|doc| doc.window_ids())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::super::codec::parse_session;
    use super::*;

    fn loaded() -> SessionState {
        let mut state = SessionState::new();
        state.load(
            parse_session(
                r#"[{"windows":{"W1":{
                    "T1":{"id":"T1","title":"Alpha"},
                    "T2":{"id":"T2","title":"Beta","groupId":"G1"}
                }}}]"#,
            )
            .unwrap(),
        );
        state
    }

    #[test]
    fn edits_before_load_report_no_document() {
        let mut state = SessionState::new();
        assert_eq!(state.add_window().unwrap_err(), SessionError::NoDocumentLoaded);
        assert_eq!(
            state.add_tab("W1", "", "").unwrap_err(),
            SessionError::NoDocumentLoaded
        );
        assert_eq!(
            state.delete_selected().unwrap_err(),
            SessionError::NoDocumentLoaded
        );
        assert_eq!(state.export_json().unwrap_err(), SessionError::NoDocumentLoaded);
        assert!(state.project().is_none());
    }

    #[test]
    fn changing_the_term_clears_selection() {
        let mut state = loaded();
        state.select_all();
        assert_eq!(state.selected_count(), 2);
        state.set_search_term("beta");
        assert_eq!(state.selected_count(), 0);
    }

    #[test]
    fn unchanged_term_preserves_selection() {
        let mut state = loaded();
        state.set_search_term("beta");
        state.select_all();
        assert_eq!(state.selected_count(), 1);
        // Same term again (with whitespace the trim removes): no reset.
        state.set_search_term(" beta ");
        assert_eq!(state.selected_count(), 1);
    }

    #[test]
    fn adds_preserve_selection_deletes_clear_it() {
        let mut state = loaded();
        state.select_all();
        let win_id = state.add_window().unwrap();
        state.add_tab(&win_id, "New", "https://example.com").unwrap();
        assert_eq!(state.selected_count(), 2);

        let removed = state.delete_selected().unwrap();
        assert_eq!(removed, 2);
        assert_eq!(state.selected_count(), 0);
        // W1 was emptied by deletion and cascaded away; the added window stays.
        let doc = state.document().unwrap();
        assert!(doc.window("W1").is_none());
        assert!(doc.window(&win_id).is_some());
    }

    #[test]
    fn deleting_sole_group_member_then_window_empties_document() {
        let mut state = loaded();
        state.toggle_tab(TabRef::new("W1", "T1"));
        state.delete_selected().unwrap();
        let tree = state.project().unwrap();
        assert!(tree.windows[0].groups.iter().any(|g| g.id == "G1"));

        state.toggle_tab(TabRef::new("W1", "T2"));
        state.delete_selected().unwrap();
        let tree = state.project().unwrap();
        assert!(tree.windows.is_empty());
        assert_eq!(state.document().unwrap().window_count(), 0);
    }

    #[test]
    fn reset_view_keeps_the_document() {
        let mut state = loaded();
        state.set_search_term("beta");
        state.select_all();
        state.reset_view();
        assert_eq!(state.search_term(), "");
        assert_eq!(state.selected_count(), 0);
        assert!(state.is_loaded());
    }

    #[test]
    fn load_replaces_wholesale() {
        let mut state = loaded();
        state.set_search_term("beta");
        state.load(parse_session(r#"[{"windows":{"W9":{}}}]"#).unwrap());
        assert_eq!(state.search_term(), "");
        assert_eq!(state.window_ids(), vec!["W9".to_string()]);
    }

    #[test]
    fn export_round_trips() {
        let state = loaded();
        let json = state.export_json().unwrap();
        let reparsed = parse_session(&json).unwrap();
        assert_eq!(reparsed, *state.document().unwrap());
    }
}
