//! JSON boundary: validate/parse a pasted export, serialize one back

use serde_json::{Map, Value};

use super::{Document, SessionError, SessionTab, SessionWindow};

/// Parses and validates raw input text. The top-level value must be a
/// non-empty array whose first element carries a `windows` object; anything
/// else is `InvalidFormat`. Extra root fields, trailing root elements, and
/// unknown tab fields are preserved for export.
pub fn parse_session(input: &str) -> Result<Document, SessionError> {
    let value: Value = serde_json::from_str(input)
        .map_err(|err| SessionError::InvalidFormat(err.to_string()))?;
    document_from_value(value)
}

pub fn document_from_value(value: Value) -> Result<Document, SessionError> {
    let Value::Array(mut roots) = value else {
        return Err(SessionError::InvalidFormat(
            "expected an array with a \"windows\" object".to_string(),
        ));
    };
    if roots.is_empty() {
        return Err(SessionError::InvalidFormat(
            "expected an array with a \"windows\" object".to_string(),
        ));
    }
    let Value::Object(mut root) = roots.remove(0) else {
        return Err(SessionError::InvalidFormat(
            "first element is not an object".to_string(),
        ));
    };
    let Some(windows_value) = root.remove("windows") else {
        return Err(SessionError::InvalidFormat(
            "first element has no \"windows\" object".to_string(),
        ));
    };
    let Value::Object(windows_map) = windows_value else {
        return Err(SessionError::InvalidFormat(
            "\"windows\" is not an object".to_string(),
        ));
    };

    let mut windows = Vec::with_capacity(windows_map.len());
    for (window_id, tabs_value) in windows_map {
        let Value::Object(tabs_map) = tabs_value else {
            return Err(SessionError::InvalidFormat(format!(
                "window {} is not an object of tabs",
                window_id
            )));
        };
        let mut tabs = Vec::with_capacity(tabs_map.len());
        for (tab_id, tab_value) in tabs_map {
            let record = serde_json::from_value(tab_value).map_err(|err| {
                SessionError::InvalidFormat(format!("tab {}: {}", tab_id, err))
            })?;
            tabs.push(SessionTab { id: tab_id, record });
        }
        windows.push(SessionWindow {
            id: window_id,
            tabs,
        });
    }

    Ok(Document::new(windows, root, roots))
}

/// Rebuilds the external shape: `[{ windows: {...}, ...extra }, ...trailing]`.
pub fn document_to_value(doc: &Document) -> Value {
    let mut windows = Map::new();
    for win in doc.windows() {
        let mut tabs = Map::new();
        for tab in &win.tabs {
            let record = serde_json::to_value(&tab.record).unwrap_or(Value::Null);
            tabs.insert(tab.id.clone(), record);
        }
        windows.insert(win.id.clone(), Value::Object(tabs));
    }

    let mut root = Map::new();
    root.insert("windows".to_string(), Value::Object(windows));
    for (key, value) in doc.root_extra() {
        root.insert(key.clone(), value.clone());
    }

    let mut roots = Vec::with_capacity(1 + doc.trailing().len());
    roots.push(Value::Object(root));
    roots.extend(doc.trailing().iter().cloned());
    Value::Array(roots)
}

pub fn to_json_pretty(doc: &Document) -> String {
    serde_json::to_string_pretty(&document_to_value(doc)).unwrap_or_default()
}

/// Fixed prefix plus a sortable UTC timestamp, `:`/`.` replaced for
/// filesystem safety.
pub fn export_filename() -> String {
    let stamp = chrono::Utc::now().format("%Y-%m-%dT%H-%M-%S-%3fZ");
    format!("browser_tabs_{}.json", stamp)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"[{"windows":{"W1":{"T1":{"id":"T1","title":"Alpha"}}}}]"#;

    #[test]
    fn rejects_non_array_input() {
        for bad in ["{}", "42", "\"hi\"", "[]", "[42]", "[{}]"] {
            assert!(
                matches!(parse_session(bad), Err(SessionError::InvalidFormat(_))),
                "{bad}"
            );
        }
    }

    #[test]
    fn rejects_unparseable_input() {
        assert!(matches!(
            parse_session("not json at all"),
            Err(SessionError::InvalidFormat(_))
        ));
    }

    #[test]
    fn parses_minimal_document() {
        let doc = parse_session(MINIMAL).unwrap();
        assert_eq!(doc.window_count(), 1);
        let win = doc.window("W1").unwrap();
        assert_eq!(win.tab("T1").unwrap().record.title.as_deref(), Some("Alpha"));
    }

    #[test]
    fn round_trip_is_deep_equal() {
        let input = r#"[
            {
                "windows": {
                    "10": {
                        "100": {"id": 100, "index": 3, "lastAccessed": 1729971922909.627,
                                "title": "A", "url": "https://a.example", "groupId": 5,
                                "pinned": true},
                        "101": {"id": 101, "index": 4, "lastAccessed": 1729971913865,
                                "url": "https://b.example"}
                    },
                    "11": {}
                },
                "exportedAt": "2024-10-26"
            },
            {"trailer": [1, 2, 3]}
        ]"#;
        let original: Value = serde_json::from_str(input).unwrap();
        let doc = document_from_value(original.clone()).unwrap();
        assert_eq!(document_to_value(&doc), original);
    }

    #[test]
    fn export_after_edit_reflects_the_edit() {
        let mut doc = parse_session(MINIMAL).unwrap();
        doc.add_tab("W1", "Beta", "").unwrap();
        let value = document_to_value(&doc);
        let tabs = &value[0]["windows"]["W1"];
        assert_eq!(tabs.as_object().unwrap().len(), 2);
    }

    #[test]
    fn export_filename_shape() {
        let name = export_filename();
        assert!(name.starts_with("browser_tabs_"));
        assert!(name.ends_with(".json"));
        assert!(!name.contains(':'));
    }
}
