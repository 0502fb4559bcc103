//! Pure projection of (document, term, selection) into a render tree
//!
//! The rendering layer is a strict consumer of this tree; nothing here
//! mutates the document, and every aggregate is recomputed from scratch on
//! each call (a full rebuild per change is the right trade-off at this data
//! size).

use chrono::{Local, TimeZone};

use super::filter;
use super::selection::{CheckState, Selection};
use super::{Document, SessionTab, TabRef};

/// Max characters of URL shown before the ellipsis.
const URL_DISPLAY_LIMIT: usize = 40;

#[derive(Debug, Clone, PartialEq)]
pub struct TabNode {
    pub tab: TabRef,
    /// Title, or "Untitled" when absent or empty.
    pub title: String,
    /// Byte spans of term occurrences in `title`, for highlight boxes.
    pub title_highlights: Vec<(usize, usize)>,
    /// URL truncated for display, or "No URL" when absent or empty.
    pub url: String,
    pub url_highlights: Vec<(usize, usize)>,
    /// Full URL for tooltips/activation; empty when absent.
    pub full_url: String,
    /// Locale-formatted last-accessed time; empty when absent.
    pub timestamp: String,
    pub selected: bool,
    pub grouped: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GroupNode {
    pub id: String,
    /// 3-way cycling visual category (1..=3), styling only.
    pub color: usize,
    pub check: CheckState,
    pub tabs: Vec<TabNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WindowNode {
    pub id: String,
    /// 1-based position within the document, across hidden windows too.
    pub ordinal: usize,
    /// 2-way cycling visual category (1..=2), styling only.
    pub color: usize,
    /// Total tabs in the window, unfiltered (the header count).
    pub tab_count: usize,
    pub check: CheckState,
    pub groups: Vec<GroupNode>,
    pub standalone: Vec<TabNode>,
}

impl WindowNode {
    pub fn visible_tab_count(&self) -> usize {
        self.groups.iter().map(|g| g.tabs.len()).sum::<usize>() + self.standalone.len()
    }
}

/// Aggregates recomputed on every projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Stats {
    pub total_tabs: usize,
    pub matched_tabs: usize,
    pub windows_rendered: usize,
    pub selected_tabs: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderTree {
    pub windows: Vec<WindowNode>,
    pub stats: Stats,
    /// The (trimmed) term this tree was projected with.
    pub term: String,
}

impl RenderTree {
    pub fn searching(&self) -> bool {
        !self.term.is_empty()
    }

    pub fn no_results(&self) -> bool {
        self.searching() && self.stats.matched_tabs == 0
    }
}

pub fn project(doc: &Document, term: &str, selection: &Selection) -> RenderTree {
    let term = term.trim();
    let vis = filter::project_visibility(doc, term);
    let mut windows = Vec::new();

    for (position, win) in doc.windows().iter().enumerate() {
        if !vis.window_visible(win) {
            continue;
        }
        let ordinal = position + 1;

        // Partition rendered tabs into derived groups (first-encounter order)
        // and standalone tabs.
        let mut groups: Vec<(String, Vec<&SessionTab>)> = Vec::new();
        let mut standalone: Vec<&SessionTab> = Vec::new();
        for tab in vis.visible_tabs_of(win) {
            match tab.record.group_key() {
                Some(key) => match groups.iter().position(|(k, _)| *k == key) {
                    Some(at) => groups[at].1.push(tab),
                    None => groups.push((key, vec![tab])),
                },
                None => standalone.push(tab),
            }
        }

        let group_nodes: Vec<GroupNode> = groups
            .into_iter()
            .enumerate()
            .map(|(idx, (key, tabs))| {
                let refs: Vec<TabRef> = tabs
                    .iter()
                    .map(|tab| TabRef::new(win.id.clone(), tab.id.clone()))
                    .collect();
                GroupNode {
                    check: selection.check_state(refs.iter()),
                    color: (idx + 1) % 3 + 1,
                    id: key,
                    tabs: tabs
                        .into_iter()
                        .map(|tab| tab_node(win.id.clone(), tab, term, selection, true))
                        .collect(),
                }
            })
            .collect();

        let standalone_nodes: Vec<TabNode> = standalone
            .into_iter()
            .map(|tab| tab_node(win.id.clone(), tab, term, selection, false))
            .collect();

        let rendered_refs: Vec<TabRef> = group_nodes
            .iter()
            .flat_map(|g| g.tabs.iter())
            .chain(standalone_nodes.iter())
            .map(|node| node.tab.clone())
            .collect();

        windows.push(WindowNode {
            id: win.id.clone(),
            ordinal,
            color: ordinal % 2 + 1,
            tab_count: win.tab_count(),
            check: selection.check_state(rendered_refs.iter()),
            groups: group_nodes,
            standalone: standalone_nodes,
        });
    }

    let stats = Stats {
        total_tabs: vis.total_tabs,
        matched_tabs: vis.matched_tabs,
        windows_rendered: windows.len(),
        selected_tabs: selection.len(),
    };

    RenderTree {
        windows,
        stats,
        term: term.to_string(),
    }
}

fn tab_node(
    window_id: String,
    tab: &SessionTab,
    term: &str,
    selection: &Selection,
    grouped: bool,
) -> TabNode {
    let title = display_or(tab.record.title.as_deref(), "Untitled");
    let full_url = tab.record.url.clone().unwrap_or_default();
    let url = if full_url.is_empty() {
        "No URL".to_string()
    } else {
        truncate_url(&full_url)
    };
    let tab_ref = TabRef::new(window_id, tab.id.clone());
    let selected = selection.contains(&tab_ref);
    TabNode {
        title_highlights: highlight_spans(&title, term),
        url_highlights: if full_url.is_empty() {
            Vec::new()
        } else {
            highlight_spans(&url, term)
        },
        tab: tab_ref,
        title,
        url,
        full_url,
        timestamp: tab
            .record
            .last_accessed_millis()
            .map(format_timestamp)
            .unwrap_or_default(),
        selected,
        grouped,
    }
}

fn display_or(field: Option<&str>, fallback: &str) -> String {
    match field {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => fallback.to_string(),
    }
}

fn truncate_url(url: &str) -> String {
    if url.chars().count() > URL_DISPLAY_LIMIT {
        let cut: String = url.chars().take(URL_DISPLAY_LIMIT).collect();
        format!("{}...", cut)
    } else {
        url.to_string()
    }
}

/// Byte spans of case-insensitive term occurrences. Spans index the display
/// string itself; the renderer paints boxes behind the glyphs, so the text
/// (including a clickable URL) is never rewritten. Titles whose lowercase
/// form changes byte length cannot be mapped back and render unhighlighted.
fn highlight_spans(text: &str, term: &str) -> Vec<(usize, usize)> {
    let term = term.trim();
    if term.is_empty() || text.is_empty() {
        return Vec::new();
    }
    let lowered = text.to_lowercase();
    if lowered.len() != text.len() {
        return Vec::new();
    }
    let needle = term.to_lowercase();
    let mut spans = Vec::new();
    let mut start = 0;
    while let Some(pos) = lowered[start..].find(&needle) {
        let begin = start + pos;
        spans.push((begin, begin + needle.len()));
        start = begin + needle.len();
    }
    spans
}

fn format_timestamp(millis: f64) -> String {
    Local
        .timestamp_millis_opt(millis as i64)
        .single()
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_default()
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
    fn beta_search_projects_group_only() {
        let tree = project(&alpha_beta(), "beta", &Selection::new());
        assert_eq!(tree.windows.len(), 1);
        let win = &tree.windows[0];
        assert_eq!(win.groups.len(), 1);
        assert_eq!(win.groups[0].id, "G1");
        assert_eq!(win.groups[0].tabs.len(), 1);
        assert!(win.standalone.is_empty());
        assert_eq!(tree.stats.matched_tabs, 1);
        assert_eq!(tree.stats.total_tabs, 2);
        assert!(!tree.no_results());
    }

    #[test]
    fn no_results_flag() {
        let tree = project(&alpha_beta(), "zzz", &Selection::new());
        assert!(tree.windows.is_empty());
        assert!(tree.no_results());
    }

    #[test]
    fn defaults_for_missing_title_url_timestamp() {
        let doc = parse_session(r#"[{"windows":{"W1":{"T1":{"title":"","url":""}}}}]"#).unwrap();
        let tree = project(&doc, "", &Selection::new());
        let tab = &tree.windows[0].standalone[0];
        assert_eq!(tab.title, "Untitled");
        assert_eq!(tab.url, "No URL");
        assert_eq!(tab.timestamp, "");
        assert!(tab.url_highlights.is_empty());
    }

    #[test]
    fn long_urls_truncate_with_ellipsis() {
        let long = format!("https://example.com/{}", "x".repeat(60));
        let doc = parse_session(&format!(
            r#"[{{"windows":{{"W1":{{"T1":{{"url":"{long}"}}}}}}}}]"#
        ))
        .unwrap();
        let tree = project(&doc, "", &Selection::new());
        let tab = &tree.windows[0].standalone[0];
        assert_eq!(tab.url.chars().count(), URL_DISPLAY_LIMIT + 3);
        assert!(tab.url.ends_with("..."));
        assert_eq!(tab.full_url, long);
    }

    #[test]
    fn highlight_spans_cover_every_occurrence() {
        assert_eq!(highlight_spans("Beta beta BETA", "beta"), vec![(0, 4), (5, 9), (10, 14)]);
        assert_eq!(highlight_spans("Alpha", "beta"), Vec::<(usize, usize)>::new());
        assert_eq!(highlight_spans("Alpha", ""), Vec::<(usize, usize)>::new());
    }

    #[test]
    fn group_order_is_first_encounter_and_colors_cycle() {
        let doc = parse_session(
            r#"[{"windows":{"W1":{
                "T1":{"title":"a","groupId":"G2"},
                "T2":{"title":"b","groupId":"G1"},
                "T3":{"title":"c","groupId":"G2"},
                "T4":{"title":"d","groupId":"G3"},
                "T5":{"title":"e","groupId":"G4"}
            }}}]"#,
        )
        .unwrap();
        let tree = project(&doc, "", &Selection::new());
        let ids: Vec<&str> = tree.windows[0].groups.iter().map(|g| g.id.as_str()).collect();
        assert_eq!(ids, ["G2", "G1", "G3", "G4"]);
        let colors: Vec<usize> = tree.windows[0].groups.iter().map(|g| g.color).collect();
        assert_eq!(colors, [2, 3, 1, 2]);
    }

    #[test]
    fn window_ordinal_counts_hidden_windows() {
        let doc = parse_session(
            r#"[{"windows":{
                "W1":{"T1":{"title":"Alpha"}},
                "W2":{"T1":{"title":"Beta"}}
            }}]"#,
        )
        .unwrap();
        let tree = project(&doc, "beta", &Selection::new());
        assert_eq!(tree.windows.len(), 1);
        assert_eq!(tree.windows[0].id, "W2");
        assert_eq!(tree.windows[0].ordinal, 2);
        assert_eq!(tree.windows[0].color, 1);
    }

    #[test]
    fn selection_reflected_in_nodes_and_stats() {
        let doc = alpha_beta();
        let mut sel = Selection::new();
        sel.set_tab(TabRef::new("W1", "T2"), true);
        let tree = project(&doc, "", &sel);
        let win = &tree.windows[0];
        assert_eq!(win.check, CheckState::Partial);
        assert_eq!(win.groups[0].check, CheckState::Checked);
        assert!(win.groups[0].tabs[0].selected);
        assert!(!win.standalone[0].selected);
        assert_eq!(tree.stats.selected_tabs, 1);
    }
}
