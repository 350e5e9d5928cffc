//! Team directory: team id to display name

use serde_json::Value;
use std::collections::HashMap;

use crate::json;

/// Display-name sources, tried in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameSource {
    /// `location` + `nickname`, space-joined
    LocationNickname,
    Name,
    Abbrev,
    Abbreviation,
}

impl NameSource {
    pub const ORDER: [NameSource; 4] = [
        NameSource::LocationNickname,
        NameSource::Name,
        NameSource::Abbrev,
        NameSource::Abbreviation,
    ];

    pub fn extract(self, team: &Value) -> Option<String> {
        match self {
            NameSource::LocationNickname => {
                let parts: Vec<&str> = [
                    json::text_at(team, &["location"]),
                    json::text_at(team, &["nickname"]),
                ]
                .into_iter()
                .flatten()
                .collect();
                (!parts.is_empty()).then(|| parts.join(" "))
            }
            NameSource::Name => json::text_at(team, &["name"]).map(str::to_string),
            NameSource::Abbrev => json::text_at(team, &["abbrev"]).map(str::to_string),
            NameSource::Abbreviation => json::text_at(team, &["abbreviation"]).map(str::to_string),
        }
    }
}

/// Name used when nothing else resolves
pub fn synthesized_name(team_id: i64) -> String {
    format!("Team {}", team_id)
}

/// Resolve a single raw team record's display name.
pub fn display_name(team: &Value, team_id: i64) -> String {
    NameSource::ORDER
        .iter()
        .find_map(|source| source.extract(team))
        .unwrap_or_else(|| synthesized_name(team_id))
}

/// Team id of a raw record, if it has a usable one
pub fn team_id(team: &Value) -> Option<i64> {
    json::integer_at(team, &["id"])
}

/// Lookup from team id to display name, built once per report
#[derive(Debug, Clone, Default)]
pub struct TeamDirectory {
    names: HashMap<i64, String>,
}

impl TeamDirectory {
    /// Build the directory from a raw team list. Records without an id are skipped;
    /// anything that is not an array yields an empty directory.
    pub fn resolve_names(raw_teams: &Value) -> Self {
        let names = raw_teams
            .as_array()
            .map(|teams| {
                teams
                    .iter()
                    .filter_map(|team| team_id(team).map(|id| (id, display_name(team, id))))
                    .collect()
            })
            .unwrap_or_default();
        Self { names }
    }

    /// Display name for `team_id`, synthesized when unknown.
    pub fn name(&self, team_id: i64) -> String {
        self.get(team_id).map_or_else(|| synthesized_name(team_id), str::to_string)
    }

    pub fn get(&self, team_id: i64) -> Option<&str> {
        self.names.get(&team_id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Pick the raw team list: the scoreboard's own `teams`, else the separate team payload
/// (a bare array or an object holding `teams`).
pub fn team_list<'a>(scoreboard: &'a Value, teams: Option<&'a Value>) -> Option<&'a Value> {
    let non_empty = |v: &&Value| v.as_array().is_some_and(|a| !a.is_empty());

    scoreboard
        .get("teams")
        .filter(non_empty)
        .or_else(|| {
            teams.and_then(|t| if t.is_array() { Some(t) } else { t.get("teams") })
        })
        .filter(|v| v.is_array())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_location_and_nickname_joined() {
        let teams =
            json!([{"id": 1, "location": " Geno ", "nickname": "Squad", "name": "ignored"}]);
        let directory = TeamDirectory::resolve_names(&teams);
        assert_eq!(directory.name(1), "Geno Squad");
    }

    #[test]
    fn test_fallback_order() {
        let teams = json!([
            {"id": 2, "name": "Named"},
            {"id": 3, "location": "", "abbrev": "ABC"},
            {"id": 4, "abbreviation": "XYZ"},
            {"id": 7},
            {"id": 8, "nickname": "Solo"},
        ]);
        let directory = TeamDirectory::resolve_names(&teams);
        assert_eq!(directory.name(2), "Named");
        assert_eq!(directory.name(3), "ABC");
        assert_eq!(directory.name(4), "XYZ");
        assert_eq!(directory.name(7), "Team 7");
        assert_eq!(directory.name(8), "Solo");
        assert_eq!(directory.len(), 5);
    }

    #[test]
    fn test_records_without_id_are_skipped() {
        let teams = json!([
            {"name": "No Id"},
            {"id": null, "name": "Null Id"},
            {"id": "5", "name": "Five"},
        ]);
        let directory = TeamDirectory::resolve_names(&teams);
        assert_eq!(directory.len(), 1);
        assert_eq!(directory.get(5), Some("Five"));
    }

    #[test]
    fn test_unknown_id_is_synthesized() {
        let directory = TeamDirectory::resolve_names(&json!(null));
        assert!(directory.is_empty());
        assert_eq!(directory.name(12), "Team 12");
    }

    #[test]
    fn test_team_list_prefers_scoreboard() {
        let scoreboard = json!({"teams": [{"id": 1}]});
        let separate = json!({"teams": [{"id": 2}]});
        let list = team_list(&scoreboard, Some(&separate)).unwrap();
        assert_eq!(list[0]["id"], 1);

        let bare = json!({"schedule": []});
        let list = team_list(&bare, Some(&separate)).unwrap();
        assert_eq!(list[0]["id"], 2);

        let array = json!([{"id": 3}]);
        let list = team_list(&bare, Some(&array)).unwrap();
        assert_eq!(list[0]["id"], 3);

        assert!(team_list(&bare, None).is_none());
    }
}
