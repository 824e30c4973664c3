//! Attack resolution: damage, hit and critical rules.
//!
//! Rolls are taken as input so the arithmetic can be tested without an RNG.

use rand::Rng;

use super::roster::Weapon;
use crate::battle::response::format_hp;
use crate::battle::turns::MoveKind;

pub const DEFAULT_ACCURACY: u32 = 50;
pub const DEFAULT_CRITIC: u32 = 10;
pub const STRONG_MULTIPLIER: f64 = 1.5;

/// Two percentile rolls, each in 0..=100.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttackRolls {
    pub hit: u32,
    pub crit: u32,
}

impl AttackRolls {
    pub fn roll<R: Rng>(rng: &mut R) -> Self {
        AttackRolls {
            hit: rng.gen_range(0..=100),
            crit: rng.gen_range(0..=100),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Strike {
    pub damage: f64,
    pub hit: bool,
    pub critical: bool,
}

pub fn base_damage(weapon: &Weapon, kind: MoveKind) -> f64 {
    let damage = weapon.damage as f64;
    match kind {
        MoveKind::Strong => damage * STRONG_MULTIPLIER,
        MoveKind::Weak => damage,
    }
}

/// Resolve one strike against a defender with `defense` armor.
///
/// A zero or missing accuracy/critic falls back to the defaults. Criticals
/// double the damage before armor; armor never pushes damage below zero.
pub fn resolve_strike(weapon: &Weapon, kind: MoveKind, defense: i64, rolls: AttackRolls) -> Strike {
    let accuracy = weapon.accuracy.filter(|&a| a != 0).unwrap_or(DEFAULT_ACCURACY);
    let critic = weapon.critic.filter(|&c| c != 0).unwrap_or(DEFAULT_CRITIC);
    let hit = rolls.hit <= accuracy;
    let critical = rolls.crit <= critic;

    let mut damage = base_damage(weapon, kind);
    if critical {
        damage *= 2.0;
    }
    let defense = defense as f64;
    damage = if damage > defense { damage - defense } else { 0.0 };
    if !hit {
        damage = 0.0;
    }
    Strike { damage, hit, critical }
}

/// Battle commentary for a strike.
pub fn describe(attacker: &str, strike: &Strike) -> String {
    if !strike.hit {
        format!("{} lanza un ataque y falla!!", attacker)
    } else if strike.critical {
        format!(
            "{} lanza un ataque crítico y realiza {} de daño!!",
            attacker,
            format_hp(strike.damage)
        )
    } else {
        format!(
            "{} lanza un ataque y realiza {} de daño!!",
            attacker,
            format_hp(strike.damage)
        )
    }
}
