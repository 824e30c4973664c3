//! Juego web client.
//!
//! Two page controllers compiled to WASM:
//! * the faction chart loader (`chart`), which fetches member counts and
//!   hands a Chart.js bar configuration to the page;
//! * the battle controller (`battle`), which keeps the turn state of a
//!   two-character battle, sends attacks and patches HP, commentary and
//!   button enablement from the server's reply.
//!
//! `handle_request(method, path, query, body)` exposes an in-WASM copy of
//! the game backend (`server`) so the pages also work offline. It uses
//! `matchit` for URL routing.

use wasm_bindgen::prelude::*;

pub mod battle;
pub mod chart;
pub mod config;
pub mod error;
pub mod page;
pub mod routes;
pub mod server;

#[cfg(target_arch = "wasm32")]
pub mod web;

/// Process an HTTP-like request against the offline backend and return the
/// JSON response body.
///
/// # Arguments
/// * `method`: HTTP method ("GET" or "POST")
/// * `path`: URL path (e.g., "/battle/attack/")
/// * `query`: Query string, possibly empty
/// * `body`: Request body (form data or JSON). Empty string for GET requests.
#[wasm_bindgen]
pub fn handle_request(method: &str, path: &str, query: &str, body: &str) -> String {
    let mut router = matchit::Router::new();

    // Pages the Django backend also serves
    router.insert("/api/faction_member_count/", "faction_counts").ok();
    router.insert("/battle/", "battle").ok();
    router.insert("/battle/attack/", "attack").ok();

    // Offline-only: roster loading and localStorage persistence
    router.insert("/api/roster/", "roster").ok();
    router.insert("/api/roster/import/", "roster_import").ok();
    router.insert("/api/battle/persist/", "battle_persist").ok();
    router.insert("/api/battle/restore/", "battle_restore").ok();

    match router.at(path) {
        Ok(matched) => match (*matched.value, method) {
            ("faction_counts", "GET") => routes::factions::handle_member_count_get(query),
            ("battle", "GET") => routes::battle::handle_battle_get(query),
            ("roster", "GET") => routes::roster::handle_roster_get(query),
            ("battle_persist", "GET") => routes::battle::handle_persist_get(query),

            ("battle", "POST") => routes::battle::handle_battle_post(body),
            ("attack", "POST") => routes::battle::handle_attack_post(body),
            ("roster_import", "POST") => routes::roster::handle_import_post(body),
            ("battle_restore", "POST") => routes::battle::handle_restore_post(body),

            _ => method_not_allowed(),
        },
        Err(_) => not_found(),
    }
}

fn not_found() -> String {
    routes::util::error_body("404 — route not found")
}

fn method_not_allowed() -> String {
    routes::util::error_body("405 — method not allowed")
}
