//! Battle session: the one battle in progress, and its persistence.
//!
//! A battle starts at full HP with char1 to move. Each accepted attack hands
//! the turn to the defender; the first side to reach 0 HP loses and the
//! session is cleared.

use std::cell::RefCell;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::combat::{AttackRolls, describe, resolve_strike};
use super::roster::{self, Roster};
use crate::battle::turns::MoveKind;

pub const STARTING_HP: f64 = 1000.0;
pub const OPENING_LINE: &str = "Que comience la batalla!";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleSession {
    pub char1: u32,
    pub char2: u32,
    pub char1_hp: f64,
    pub char2_hp: f64,
    pub turn_player: u32,
    pub frase: String,
}

impl BattleSession {
    pub fn new(char1: u32, char2: u32) -> Self {
        BattleSession {
            char1,
            char2,
            char1_hp: STARTING_HP,
            char2_hp: STARTING_HP,
            turn_player: char1,
            frase: OPENING_LINE.to_string(),
        }
    }

    /// The live-battle reply describing this session.
    pub fn reply(&self) -> AttackReply {
        AttackReply {
            char1_hp: self.char1_hp,
            char1_id: self.char1,
            char2_hp: self.char2_hp,
            char2_id: self.char2,
            turn_player: Some(self.turn_player),
            frase: self.frase.clone(),
            winner: None,
        }
    }

    /// The other fighter, if `attacker` is in this battle.
    pub fn defender_of(&self, attacker: u32) -> Option<u32> {
        if attacker == self.char1 {
            Some(self.char2)
        } else if attacker == self.char2 {
            Some(self.char1)
        } else {
            None
        }
    }
}

/// Body returned for every accepted attack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttackReply {
    pub char1_hp: f64,
    pub char1_id: u32,
    pub char2_hp: f64,
    pub char2_id: u32,
    /// `None` once the battle is over.
    pub turn_player: Option<u32>,
    pub frase: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub winner: Option<String>,
}

thread_local! {
    static SESSION: RefCell<Option<BattleSession>> = const { RefCell::new(None) };
}

/// Execute a closure with read access to the current session.
pub fn with_session<F, R>(f: F) -> R
where
    F: FnOnce(Option<&BattleSession>) -> R,
{
    SESSION.with(|s| f(s.borrow().as_ref()))
}

pub fn replace_session(session: Option<BattleSession>) {
    SESSION.with(|s| *s.borrow_mut() = session);
}

/// Start a battle between two roster characters.
pub fn start_battle(char1: u32, char2: u32) -> Result<BattleSession, String> {
    if char1 == char2 {
        return Err("Un personaje no puede pelear contra si mismo".to_string());
    }
    let known = roster::with_roster(|r| r.character(char1).is_some() && r.character(char2).is_some());
    if !known {
        return Err("Hay un problema con la selección de personajes.".to_string());
    }
    let session = BattleSession::new(char1, char2);
    info!("battle started: {} vs {}", char1, char2);
    replace_session(Some(session.clone()));
    Ok(session)
}

/// Resolve one attack, rolling from the server RNG.
pub fn attack(attacker: u32, ataque: &str) -> Result<AttackReply, String> {
    let rolls = super::with_rng(|rng| AttackRolls::roll(rng));
    attack_with_rolls(attacker, ataque, rolls)
}

/// Resolve one attack with the given rolls.
pub fn attack_with_rolls(attacker: u32, ataque: &str, rolls: AttackRolls) -> Result<AttackReply, String> {
    let mut session = with_session(|s| s.cloned()).ok_or("No hay batalla en curso")?;
    let defender = session.defender_of(attacker).ok_or("Atacante no válido")?;
    if session.turn_player != attacker {
        return Err("No es tu turno".to_string());
    }
    let kind = match ataque {
        "fuerte" => MoveKind::Strong,
        "debil" => MoveKind::Weak,
        _ => return Err("Tipo de ataque inválido".to_string()),
    };

    let (attacker_char, defender_char) = roster::with_roster(|r| {
        (r.character(attacker).cloned(), r.character(defender).cloned())
    });
    let (Some(attacker_char), Some(defender_char)) = (attacker_char, defender_char) else {
        return Err("Personaje no encontrado".to_string());
    };
    let weapon = attacker_char
        .equipped_weapon
        .as_ref()
        .ok_or("Personaje sin arma equipada")?;

    let strike = resolve_strike(weapon, kind, defender_char.defense(), rolls);
    let frase = describe(&attacker_char.name, &strike);
    debug!("{} -> {}: {:?}", attacker, defender, strike);

    if defender == session.char1 {
        session.char1_hp -= strike.damage;
    } else {
        session.char2_hp -= strike.damage;
    }

    if session.char1_hp <= 0.0 || session.char2_hp <= 0.0 {
        let survivor = if session.char1_hp <= 0.0 {
            session.char1_hp = 0.0;
            session.char2
        } else {
            session.char2_hp = 0.0;
            session.char1
        };
        let winner = roster::with_roster(|r| r.character(survivor).map(|c| c.name.clone()))
            .unwrap_or_default();
        replace_session(None);
        info!("battle over: {} wins", winner);
        return Ok(AttackReply {
            char1_hp: session.char1_hp,
            char1_id: session.char1,
            char2_hp: session.char2_hp,
            char2_id: session.char2,
            turn_player: None,
            frase,
            winner: Some(format!("{} gana la batalla!! 🏆", winner)),
        });
    }

    session.turn_player = defender;
    session.frase = frase;
    let reply = session.reply();
    replace_session(Some(session));
    Ok(reply)
}

// ── Persistence ────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct Snapshot {
    #[serde(default)]
    roster: Roster,
    #[serde(default)]
    session: Option<BattleSession>,
}

/// Encode roster + session as a URL-safe base64 string for localStorage.
pub fn encode_snapshot() -> String {
    let snapshot = Snapshot {
        roster: roster::with_roster(Roster::clone),
        session: with_session(|s| s.cloned()),
    };
    let json = serde_json::to_vec(&snapshot).unwrap_or_default();
    URL_SAFE_NO_PAD.encode(json)
}

/// Restore roster + session from `encode_snapshot` output. Empty input is a no-op.
pub fn restore_snapshot(state_b64: &str) -> Result<(), String> {
    let state_b64 = state_b64.trim();
    if state_b64.is_empty() {
        return Ok(());
    }
    let bytes = URL_SAFE_NO_PAD
        .decode(state_b64)
        .map_err(|e| format!("Invalid base64: {}", e))?;
    let snapshot: Snapshot =
        serde_json::from_slice(&bytes).map_err(|e| format!("Invalid snapshot: {}", e))?;
    snapshot.roster.validate()?;
    roster::replace_roster(snapshot.roster);
    replace_session(snapshot.session);
    Ok(())
}
