//! `GET /api/faction_member_count/`

use crate::routes::util::json_body;
use crate::server::roster;

/// Member count per faction, in roster order.
pub fn handle_member_count_get(_query: &str) -> String {
    let counts = roster::with_roster(|r| r.member_counts());
    json_body(&counts)
}
