//! `/api/roster/*`: load and inspect the offline roster.

use serde_json::json;

use crate::routes::util::reply;
use crate::server::roster;

/// Handle GET /api/roster/
pub fn handle_roster_get(_query: &str) -> String {
    roster::export_roster_json()
}

/// Handle POST /api/roster/import/
/// Body: roster JSON `{"factions": [...], "characters": [...]}`.
pub fn handle_import_post(body: &str) -> String {
    reply(roster::import_roster_json(body).map(|()| {
        let (factions, characters) =
            roster::with_roster(|r| (r.factions.len(), r.characters.len()));
        json!({ "factions": factions, "characters": characters })
    }))
}
