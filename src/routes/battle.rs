//! `/battle/*` and `/api/battle/*` routes: start a battle, resolve attacks,
//! persist the session.

use serde_json::{Value, json};

use crate::battle::ids::CharacterId;
use crate::routes::util::{error_body, get_param, parse_form_body, reply};
use crate::server::session;

// ── GET /battle/ ───────────────────────────────────────────────────

/// Current battle state, as the start reply shapes it.
pub fn handle_battle_get(_query: &str) -> String {
    reply(session::with_session(|s| {
        s.map(|s| s.reply())
            .ok_or_else(|| "No hay batalla en curso".to_string())
    }))
}

// ── POST /battle/ ──────────────────────────────────────────────────

/// Handle POST /battle/
/// Body params: `character={id}&character2={id}`
pub fn handle_battle_post(body: &str) -> String {
    let params = parse_form_body(body);
    let id = |key: &str| get_param(&params, key).and_then(|v| v.trim().parse::<u32>().ok());
    let (Some(char1), Some(char2)) = (id("character"), id("character2")) else {
        return error_body("Hay un problema con la selección de personajes.");
    };
    reply(session::start_battle(char1, char2).map(|s| s.reply()))
}

// ── POST /battle/attack/ ───────────────────────────────────────────

/// Handle POST /battle/attack/
/// JSON body: `{"ataque": "fuerte"|"debil", "attacker": id}`; the id may be a
/// number or a numeric string.
pub fn handle_attack_post(body: &str) -> String {
    let Some((attacker, ataque)) = parse_attack_body(body) else {
        return error_body("Datos incompletos");
    };
    reply(session::attack(attacker, &ataque))
}

fn parse_attack_body(body: &str) -> Option<(u32, String)> {
    let value: Value = serde_json::from_str(body).ok()?;
    let attacker: CharacterId = serde_json::from_value(value.get("attacker")?.clone()).ok()?;
    let attacker = attacker.as_u32().filter(|&id| id != 0)?;
    let ataque = value.get("ataque")?.as_str()?.trim();
    if ataque.is_empty() {
        return None;
    }
    Some((attacker, ataque.to_string()))
}

// ── GET /api/battle/persist/ ───────────────────────────────────────

/// Roster + session as a base64 string for localStorage.
pub fn handle_persist_get(_query: &str) -> String {
    session::encode_snapshot()
}

// ── POST /api/battle/restore/ ──────────────────────────────────────

/// Restore from a `persist` string. Accepts the raw string or `state={b64}`.
pub fn handle_restore_post(body: &str) -> String {
    let params = parse_form_body(body);
    let state = get_param(&params, "state").unwrap_or(body.trim());
    reply(session::restore_snapshot(state).map(|()| json!({ "restored": true })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::response::{NextTurn, parse_attack_response};
    use crate::server::roster::{self, Roster};
    use crate::server::roster::fixtures::demo_roster;

    fn reset_state() {
        roster::replace_roster(demo_roster());
        session::replace_session(None);
    }

    fn error_of(body: &str) -> Option<String> {
        let v: Value = serde_json::from_str(body).ok()?;
        v.get("error")?.as_str().map(str::to_string)
    }

    #[test]
    fn start_then_get() {
        reset_state();
        let started: Value = serde_json::from_str(&handle_battle_post("character=1&character2=2")).unwrap();
        assert_eq!(started["turn_player"], 1);
        assert_eq!(started["frase"], session::OPENING_LINE);

        let current: Value = serde_json::from_str(&handle_battle_get("")).unwrap();
        assert_eq!(current["char2_id"], 2);
        reset_state();
    }

    #[test]
    fn start_with_bad_form() {
        reset_state();
        assert!(error_of(&handle_battle_post("character=1")).unwrap().contains("selección"));
        assert_eq!(
            error_of(&handle_battle_post("character=2&character2=2")).as_deref(),
            Some("Un personaje no puede pelear contra si mismo")
        );
        assert_eq!(error_of(&handle_battle_get("")).as_deref(), Some("No hay batalla en curso"));
    }

    #[test]
    fn incomplete_attack_bodies() {
        reset_state();
        for body in ["", "{}", r#"{"ataque":"debil"}"#, r#"{"attacker":1}"#, r#"{"attacker":"x","ataque":"debil"}"#, r#"{"attacker":0,"ataque":"debil"}"#] {
            assert_eq!(error_of(&handle_attack_post(body)).as_deref(), Some("Datos incompletos"), "{body}");
        }
    }

    #[test]
    fn attack_reply_is_understood_by_the_client() {
        reset_state();
        handle_battle_post("character=1&character2=2");
        let body = handle_attack_post(r#"{"ataque":"debil","attacker":"1"}"#);
        let outcome = parse_attack_response(&body).unwrap();
        assert_eq!(outcome.next, NextTurn::Player(CharacterId::from(2)));

        let again = handle_attack_post(r#"{"ataque":"debil","attacker":1}"#);
        assert_eq!(error_of(&again).as_deref(), Some("No es tu turno"));
        reset_state();
    }

    #[test]
    fn persist_and_restore() {
        reset_state();
        handle_battle_post("character=1&character2=2");
        let saved = handle_persist_get("");

        roster::replace_roster(Roster::default());
        session::replace_session(None);
        let restored: Value = serde_json::from_str(&handle_restore_post(&saved)).unwrap();
        assert_eq!(restored["restored"], true);
        session::with_session(|s| assert_eq!(s.map(|s| s.char2), Some(2)));

        assert!(error_of(&handle_restore_post("state=%%%")).is_some());
        reset_state();
    }
}
