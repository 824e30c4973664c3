//! Turn phases and attack-button enablement.
//!
//! The one rule: whoever holds the turn gets both of their buttons, the other
//! side gets none. A finished battle enables nobody.

use serde::{Deserialize, Serialize};

use super::ids::CharacterId;

/// Which of the two fighters on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Char1,
    Char2,
}

impl Side {
    pub fn parse(s: &str) -> Option<Side> {
        match s.trim().to_ascii_lowercase().as_str() {
            "char1" | "1" => Some(Side::Char1),
            "char2" | "2" => Some(Side::Char2),
            _ => None,
        }
    }
}

/// Attack kinds the server understands, with their wire tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveKind {
    #[serde(rename = "fuerte")]
    Strong,
    #[serde(rename = "debil")]
    Weak,
}

impl MoveKind {
    pub fn token(self) -> &'static str {
        match self {
            MoveKind::Strong => "fuerte",
            MoveKind::Weak => "debil",
        }
    }

    pub fn parse(s: &str) -> Option<MoveKind> {
        match s.trim() {
            "fuerte" | "strong" => Some(MoveKind::Strong),
            "debil" | "weak" => Some(MoveKind::Weak),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnPhase {
    Char1Turn,
    Char2Turn,
    GameOver,
}

impl TurnPhase {
    /// Phase for a live battle. Anything other than char1's id hands the turn
    /// to char2, including an unknown id.
    pub fn from_turn_player(turn_player: &CharacterId, char1: &CharacterId) -> TurnPhase {
        if turn_player == char1 {
            TurnPhase::Char1Turn
        } else {
            TurnPhase::Char2Turn
        }
    }

    pub fn is_over(self) -> bool {
        self == TurnPhase::GameOver
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Enablement {
    pub char1_enabled: bool,
    pub char2_enabled: bool,
}

impl Enablement {
    pub const NONE: Enablement = Enablement {
        char1_enabled: false,
        char2_enabled: false,
    };

    pub fn for_phase(phase: TurnPhase) -> Enablement {
        match phase {
            TurnPhase::Char1Turn => Enablement {
                char1_enabled: true,
                char2_enabled: false,
            },
            TurnPhase::Char2Turn => Enablement {
                char1_enabled: false,
                char2_enabled: true,
            },
            TurnPhase::GameOver => Enablement::NONE,
        }
    }

    pub fn is_enabled(&self, side: Side) -> bool {
        match side {
            Side::Char1 => self.char1_enabled,
            Side::Char2 => self.char2_enabled,
        }
    }
}

/// Button enablement for the character holding the turn.
///
/// `char2` is accepted for symmetry with the page fields; the decision only
/// compares against `char1`.
pub fn compute_enablement(
    turn_player: &CharacterId,
    char1: &CharacterId,
    _char2: &CharacterId,
) -> Enablement {
    Enablement::for_phase(TurnPhase::from_turn_player(turn_player, char1))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids() -> (CharacterId, CharacterId) {
        (CharacterId::from("c1"), CharacterId::from("c2"))
    }

    #[test]
    fn char1_turn_enables_char1_only() {
        let (c1, c2) = ids();
        let e = compute_enablement(&c1, &c1, &c2);
        assert!(e.char1_enabled);
        assert!(!e.char2_enabled);
    }

    #[test]
    fn char2_turn_enables_char2_only() {
        let (c1, c2) = ids();
        let e = compute_enablement(&c2, &c1, &c2);
        assert!(!e.char1_enabled);
        assert!(e.char2_enabled);
    }

    #[test]
    fn unknown_turn_player_falls_to_char2() {
        let (c1, c2) = ids();
        let e = compute_enablement(&CharacterId::from("zz"), &c1, &c2);
        assert_eq!(e, Enablement::for_phase(TurnPhase::Char2Turn));
    }

    #[test]
    fn game_over_enables_nobody() {
        let e = Enablement::for_phase(TurnPhase::GameOver);
        assert!(!e.is_enabled(Side::Char1));
        assert!(!e.is_enabled(Side::Char2));
    }

    #[test]
    fn move_tokens() {
        assert_eq!(MoveKind::Strong.token(), "fuerte");
        assert_eq!(MoveKind::parse("debil"), Some(MoveKind::Weak));
        assert_eq!(MoveKind::parse("weak"), Some(MoveKind::Weak));
        assert_eq!(MoveKind::parse("kick"), None);
        assert_eq!(serde_json::to_string(&MoveKind::Weak).unwrap(), r#""debil""#);
    }

    #[test]
    fn side_parsing() {
        assert_eq!(Side::parse("char1"), Some(Side::Char1));
        assert_eq!(Side::parse("2"), Some(Side::Char2));
        assert_eq!(Side::parse("char3"), None);
    }
}
