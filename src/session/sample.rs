//! Fixed demo dataset used to pre-fill the input editor

use serde_json::{Value, json};

pub fn sample_value() -> Value {
    json!([
        {
            "windows": {
                "2104794959": {
                    "2104331965": {
                        "id": 2104331965u64,
                        "index": 243,
                        "lastAccessed": 1729971922909.627,
                        "title": "login.steampowered.com",
                        "url": "https://login.steampowered.com/jwt/refresh?redir=https%3A%2F%2Fsteamcommunity.com%2Fapp%2F440900%2Fdiscussions%2F0%2F4700161192391741362%2F%3Fctp%3D3"
                    },
                    "2104331989": {
                        "groupId": 1777522509u64,
                        "id": 2104331989u64,
                        "index": 244,
                        "lastAccessed": 1729971913865.529,
                        "title": "Freya 's quest line is bugged - PlayStation Discussion / PlayStation Bug Reports - Funcom Forums",
                        "url": "https://forums.funcom.com/t/freya-s-quest-line-is-bugged/264869/23"
                    },
                    "2104332016": {
                        "groupId": 1777522509u64,
                        "id": 2104332016u64,
                        "index": 245,
                        "lastAccessed": 1729971920091.137,
                        "title": "Drowned Vault Armors deleted and missing from the game - PC Discussion / PC Bug Reports - Funcom Forums",
                        "url": "https://forums.funcom.com/t/drowned-vault-armors-deleted-and-missing-from-the-game/264514/8"
                    },
                    "2104332038": {
                        "groupId": 1777522509u64,
                        "id": 2104332038u64,
                        "index": 246,
                        "lastAccessed": 1729944862470.103,
                        "title": "Chairs too far away from tables T_T - Conan Exiles / PC Discussion - Funcom Forums",
                        "url": "https://forums.funcom.com/t/chairs-too-far-away-from-tables-t-t/265522"
                    }
                },
                "2104794961": {
                    "2104300576": {
                        "id": 2104300576u64,
                        "index": 741,
                        "lastAccessed": 1729364198818.772,
                        "title": "x.com/OskSta/status/1798310423554658732",
                        "url": "https://x.com/OskSta/status/1798310423554658732"
                    },
                    "2104333602": {
                        "id": 2104333602u64,
                        "index": 0,
                        "lastAccessed": 1712077091523.49,
                        "title": "WARNO Steam Key for PC - Buy now",
                        "url": "https://uk.gamesplanet.com/game/warno-steam-key--5471-1?utm_campaign=weekly&utm_content=toptitle&utm_medium=email&utm_source=2022-01-21"
                    }
                }
            }
        }
    ])
}

/// Pretty JSON for the "Load Sample" button.
pub fn sample_json_pretty() -> String {
    serde_json::to_string_pretty(&sample_value()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::super::codec::document_from_value;
    use super::*;

    #[test]
    fn sample_is_a_valid_session() {
        let doc = document_from_value(sample_value()).unwrap();
        assert_eq!(doc.window_count(), 2);
        assert_eq!(doc.total_tabs(), 6);
        assert_eq!(doc.group_count(), 1);
    }
}
