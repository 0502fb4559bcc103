//! Session document model - windows, tabs, and the mutations on them

pub mod codec;
pub mod filter;
pub mod project;
pub mod sample;
pub mod selection;
pub mod state;

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub use selection::{CheckState, Selection};
pub use state::SessionState;

/// Errors surfaced by session operations. All are recoverable at the
/// boundary where they are detected; none are fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Input is not parseable or does not match the expected shape.
    InvalidFormat(String),
    /// An edit/export operation was attempted before any document exists.
    NoDocumentLoaded,
    /// The add-tab target window no longer exists.
    WindowNotFound(String),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::InvalidFormat(detail) => {
                write!(f, "Invalid data format: {}", detail)
            }
            SessionError::NoDocumentLoaded => write!(f, "Please load data first."),
            SessionError::WindowNotFound(id) => write!(f, "Window {} no longer exists.", id),
        }
    }
}

impl std::error::Error for SessionError {}

/// A single tab record as it appears in the export. Unrecognized fields are
/// kept in `extra` so a load-then-export round-trip reproduces the input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TabRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    /// Original ordering hint; carried through untouched, never re-validated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<Value>,
    #[serde(rename = "lastAccessed", default, skip_serializing_if = "Option::is_none")]
    pub last_accessed: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(rename = "groupId", default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TabRecord {
    /// Derived group membership. Browser exports carry loose ids: null,
    /// false, 0, and "" count as ungrouped, and numeric 7 shares a group
    /// with "7" since ids compare by their string form.
    pub fn group_key(&self) -> Option<String> {
        match self.group_id.as_ref()? {
            Value::Null | Value::Bool(false) => None,
            Value::Bool(true) => Some("true".to_string()),
            Value::Number(n) => {
                if n.as_f64() == Some(0.0) {
                    None
                } else {
                    Some(n.to_string())
                }
            }
            Value::String(s) if s.is_empty() => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Last-accessed time in epoch milliseconds, when present and numeric.
    pub fn last_accessed_millis(&self) -> Option<f64> {
        self.last_accessed.as_ref().and_then(Value::as_f64)
    }
}

/// A tab keyed by its identifier within the owning window.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionTab {
    pub id: String,
    pub record: TabRecord,
}

/// A browser window: an ordered collection of tabs. A window with zero tabs
/// is valid when created that way; the delete cascade in [`Document::delete_tabs`]
/// is what removes windows emptied by deletion.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionWindow {
    pub id: String,
    pub tabs: Vec<SessionTab>,
}

impl SessionWindow {
    pub fn tab(&self, tab_id: &str) -> Option<&SessionTab> {
        self.tabs.iter().find(|tab| tab.id == tab_id)
    }

    pub fn tab_count(&self) -> usize {
        self.tabs.len()
    }
}

/// Reference to a tab together with its owning window. Carried alongside
/// every tab the view hands out, so deletion never searches for an owner.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TabRef {
    pub window_id: String,
    pub tab_id: String,
}

impl TabRef {
    pub fn new(window_id: impl Into<String>, tab_id: impl Into<String>) -> Self {
        Self {
            window_id: window_id.into(),
            tab_id: tab_id.into(),
        }
    }
}

/// The canonical in-memory session: ordered windows plus the opaque parts of
/// the export (extra fields on the first root element, trailing elements)
/// that are carried through for round-trip fidelity.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    windows: Vec<SessionWindow>,
    root_extra: Map<String, Value>,
    trailing: Vec<Value>,
}

impl Document {
    pub fn new(
        windows: Vec<SessionWindow>,
        root_extra: Map<String, Value>,
        trailing: Vec<Value>,
    ) -> Self {
        Self {
            windows,
            root_extra,
            trailing,
        }
    }

    pub fn windows(&self) -> &[SessionWindow] {
        &self.windows
    }

    pub fn window(&self, window_id: &str) -> Option<&SessionWindow> {
        self.windows.iter().find(|win| win.id == window_id)
    }

    fn window_mut(&mut self, window_id: &str) -> Option<&mut SessionWindow> {
        self.windows.iter_mut().find(|win| win.id == window_id)
    }

    pub fn window_ids(&self) -> Vec<String> {
        self.windows.iter().map(|win| win.id.clone()).collect()
    }

    pub fn window_count(&self) -> usize {
        self.windows.len()
    }

    pub fn total_tabs(&self) -> usize {
        self.windows.iter().map(|win| win.tabs.len()).sum()
    }

    /// Distinct group ids across the whole document (loading stats only).
    pub fn group_count(&self) -> usize {
        let mut seen = std::collections::HashSet::new();
        for win in &self.windows {
            for tab in &win.tabs {
                if let Some(key) = tab.record.group_key() {
                    seen.insert(key);
                }
            }
        }
        seen.len()
    }

    pub(crate) fn root_extra(&self) -> &Map<String, Value> {
        &self.root_extra
    }

    pub(crate) fn trailing(&self) -> &[Value] {
        &self.trailing
    }

    /// Creates a new empty window and returns its identifier.
    pub fn add_window(&mut self) -> String {
        let id = self.fresh_window_id();
        self.windows.push(SessionWindow {
            id: id.clone(),
            tabs: Vec::new(),
        });
        id
    }

    /// Creates a tab in `window_id` with a fresh identifier, `index` equal to
    /// the pre-insertion tab count, and `lastAccessed` set to now. Empty
    /// title/url strings are stored as given.
    pub fn add_tab(
        &mut self,
        window_id: &str,
        title: &str,
        url: &str,
    ) -> Result<String, SessionError> {
        let now = now_millis();
        let Some(win) = self.window_mut(window_id) else {
            return Err(SessionError::WindowNotFound(window_id.to_string()));
        };
        let tab_id = fresh_tab_id(win, now);
        let record = TabRecord {
            id: Some(Value::String(tab_id.clone())),
            index: Some(Value::from(win.tabs.len() as u64)),
            last_accessed: Some(Value::from(now)),
            title: Some(title.to_string()),
            url: Some(url.to_string()),
            group_id: None,
            extra: Map::new(),
        };
        win.tabs.push(SessionTab {
            id: tab_id.clone(),
            record,
        });
        Ok(tab_id)
    }

    /// Removes the referenced tabs. Unknown references are skipped. Windows
    /// whose tab collection reaches zero *through this batch* are removed;
    /// windows that were already empty before it stay. Groups are derived and
    /// need no cleanup. Returns the number of tabs actually removed.
    pub fn delete_tabs(&mut self, refs: &[TabRef]) -> usize {
        let mut touched: Vec<String> = Vec::new();
        let mut removed = 0;
        for tab_ref in refs {
            if let Some(win) = self.window_mut(&tab_ref.window_id) {
                let before = win.tabs.len();
                win.tabs.retain(|tab| tab.id != tab_ref.tab_id);
                if win.tabs.len() < before {
                    removed += before - win.tabs.len();
                    if !touched.contains(&tab_ref.window_id) {
                        touched.push(tab_ref.window_id.clone());
                    }
                }
            }
        }
        self.windows
            .retain(|win| !(win.tabs.is_empty() && touched.contains(&win.id)));
        removed
    }

    /// `window-{millis}`, bumped while taken so two adds in the same
    /// millisecond still get distinct ids.
    fn fresh_window_id(&self) -> String {
        let mut millis = now_millis();
        loop {
            let id = format!("window-{}", millis);
            if self.window(&id).is_none() {
                return id;
            }
            millis += 1;
        }
    }
}

fn fresh_tab_id(win: &SessionWindow, now: u64) -> String {
    let mut millis = now;
    loop {
        let id = format!("tab{}", millis);
        if win.tab(&id).is_none() {
            return id;
        }
        millis += 1;
    }
}

pub(crate) fn now_millis() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tab(id: &str, group: Option<Value>) -> SessionTab {
        SessionTab {
            id: id.to_string(),
            record: TabRecord {
                id: Some(Value::String(id.to_string())),
                index: None,
                last_accessed: None,
                title: Some(format!("title {}", id)),
                url: Some(format!("https://example.com/{}", id)),
                group_id: group,
                extra: Map::new(),
            },
        }
    }

    fn doc_one_window(tabs: Vec<SessionTab>) -> Document {
        Document::new(
            vec![SessionWindow {
                id: "W1".to_string(),
                tabs,
            }],
            Map::new(),
            Vec::new(),
        )
    }

    #[test]
    fn add_window_assigns_unique_ids() {
        let mut doc = Document::default();
        let first = doc.add_window();
        let second = doc.add_window();
        assert_ne!(first, second);
        assert_eq!(doc.window_count(), 2);
        assert!(doc.window(&first).unwrap().tabs.is_empty());
    }

    #[test]
    fn add_tab_uses_pre_insertion_count_as_index() {
        let mut doc = doc_one_window(vec![tab("T1", None), tab("T2", None)]);
        let id = doc.add_tab("W1", "New", "https://example.com").unwrap();
        let win = doc.window("W1").unwrap();
        assert_eq!(win.tab_count(), 3);
        let added = win.tab(&id).unwrap();
        assert_eq!(added.record.index, Some(Value::from(2u64)));
        assert!(added.record.last_accessed_millis().is_some());
        assert_eq!(added.record.group_key(), None);
    }

    #[test]
    fn add_tab_to_missing_window_fails_without_mutation() {
        let mut doc = doc_one_window(vec![tab("T1", None)]);
        let err = doc.add_tab("W9", "x", "y").unwrap_err();
        assert_eq!(err, SessionError::WindowNotFound("W9".to_string()));
        assert_eq!(doc.total_tabs(), 1);
    }

    #[test]
    fn delete_unknown_refs_is_a_no_op() {
        let mut doc = doc_one_window(vec![tab("T1", None)]);
        let removed = doc.delete_tabs(&[
            TabRef::new("W1", "nope"),
            TabRef::new("missing-window", "T1"),
        ]);
        assert_eq!(removed, 0);
        assert_eq!(doc.total_tabs(), 1);
    }

    #[test]
    fn deleting_last_tab_removes_the_window() {
        let mut doc = doc_one_window(vec![tab("T1", None), tab("T2", Some(Value::from("G1")))]);
        doc.delete_tabs(&[TabRef::new("W1", "T1")]);
        assert_eq!(doc.window("W1").unwrap().tab_count(), 1);

        doc.delete_tabs(&[TabRef::new("W1", "T2")]);
        assert!(doc.window("W1").is_none());
        assert_eq!(doc.window_count(), 0);
    }

    #[test]
    fn batch_delete_cascades_per_window() {
        let mut doc = Document::new(
            vec![
                SessionWindow {
                    id: "W1".to_string(),
                    tabs: vec![tab("T1", None)],
                },
                SessionWindow {
                    id: "W2".to_string(),
                    tabs: vec![tab("T1", None), tab("T2", None)],
                },
            ],
            Map::new(),
            Vec::new(),
        );
        let removed = doc.delete_tabs(&[TabRef::new("W1", "T1"), TabRef::new("W2", "T1")]);
        assert_eq!(removed, 2);
        assert!(doc.window("W1").is_none());
        assert_eq!(doc.window("W2").unwrap().tab_count(), 1);
    }

    #[test]
    fn window_created_empty_survives_unrelated_deletes() {
        let mut doc = doc_one_window(vec![tab("T1", None)]);
        let empty_id = doc.add_window();
        doc.delete_tabs(&[TabRef::new("W1", "T1")]);
        assert!(doc.window("W1").is_none());
        assert!(doc.window(&empty_id).is_some());
    }

    #[test]
    fn falsy_group_ids_mean_standalone() {
        for value in [
            Value::Null,
            Value::Bool(false),
            Value::from(0u64),
            Value::from(0.0),
            Value::String(String::new()),
        ] {
            assert_eq!(tab("T", Some(value.clone())).record.group_key(), None, "{value:?}");
        }
        assert_eq!(
            tab("T", Some(Value::from(7u64))).record.group_key(),
            Some("7".to_string())
        );
        assert_eq!(
            tab("T", Some(Value::from("7"))).record.group_key(),
            Some("7".to_string())
        );
    }
}
