//! Attack request/response wire types.

use serde::{Deserialize, Serialize};

use super::ids::CharacterId;
use super::turns::MoveKind;
use crate::error::ClientError;

/// Body of `POST /battle/attack/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackRequest {
    pub ataque: MoveKind,
    pub attacker: CharacterId,
}

impl AttackRequest {
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// Raw response. Every field is optional: error responses carry only
/// `error`, and game-over responses drop the ids and the frase.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AttackResponse {
    pub char1_hp: Option<f64>,
    pub char2_hp: Option<f64>,
    pub frase: Option<String>,
    pub turn_player: Option<CharacterId>,
    pub char1_id: Option<CharacterId>,
    pub char2_id: Option<CharacterId>,
    pub winner: Option<String>,
    pub error: Option<String>,
}

/// Where the battle goes after a successful attack.
#[derive(Debug, Clone, PartialEq)]
pub enum NextTurn {
    Player(CharacterId),
    /// Battle over; the message shown in the comment node.
    Winner(String),
}

/// A successful, well-formed attack response.
#[derive(Debug, Clone, PartialEq)]
pub struct AttackOutcome {
    pub char1_hp: f64,
    pub char2_hp: f64,
    pub frase: String,
    pub char1_id: Option<CharacterId>,
    pub char2_id: Option<CharacterId>,
    pub next: NextTurn,
}

impl AttackOutcome {
    /// Text for the comment node: the winner message once the battle is over.
    pub fn comment(&self) -> &str {
        match &self.next {
            NextTurn::Winner(msg) => msg,
            NextTurn::Player(_) => &self.frase,
        }
    }

    pub fn is_final(&self) -> bool {
        matches!(self.next, NextTurn::Winner(_))
    }
}

impl AttackResponse {
    pub fn parse(body: &str) -> Result<Self, ClientError> {
        Ok(serde_json::from_str(body)?)
    }

    /// Classify the response. An `error` field wins over everything else.
    pub fn into_outcome(self) -> Result<AttackOutcome, ClientError> {
        if let Some(err) = self.error {
            return Err(ClientError::Rejected(err));
        }
        let (Some(char1_hp), Some(char2_hp)) = (self.char1_hp, self.char2_hp) else {
            return Err(ClientError::Malformed("response carries no hp values".into()));
        };
        let frase = self.frase.unwrap_or_default();

        let next = if char1_hp <= 0.0 || char2_hp <= 0.0 {
            NextTurn::Winner(self.winner.unwrap_or_else(|| frase.clone()))
        } else {
            match self.turn_player {
                Some(id) => NextTurn::Player(id),
                None => {
                    return Err(ClientError::Malformed(
                        "response carries no turn_player".into(),
                    ));
                }
            }
        };

        Ok(AttackOutcome {
            char1_hp,
            char2_hp,
            frase,
            char1_id: self.char1_id,
            char2_id: self.char2_id,
            next,
        })
    }
}

/// Parse and classify an attack response body in one go.
pub fn parse_attack_response(body: &str) -> Result<AttackOutcome, ClientError> {
    AttackResponse::parse(body)?.into_outcome()
}

/// HP as shown on the page: negative values clamp to 0, whole numbers lose
/// their fractional part (strong attacks make the server send `985.0`).
pub fn format_hp(hp: f64) -> String {
    let hp = if hp < 0.0 { 0.0 } else { hp };
    if hp.fract() == 0.0 && hp.abs() < i64::MAX as f64 {
        format!("{}", hp as i64)
    } else {
        format!("{hp}")
    }
}
