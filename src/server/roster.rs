//! Roster: factions and the characters that fight in them.
//!
//! Lives in a `thread_local!` for the lifetime of the worker, like the battle
//! session. Imported as JSON; persisted together with the session.

use std::cell::RefCell;
use std::collections::HashSet;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::chart::faction::FactionStat;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Faction {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub location: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Weapon {
    pub name: String,
    #[serde(default)]
    pub damage: i64,
    /// Critical chance, 0..=100. Rolled on import when absent.
    #[serde(default)]
    pub critic: Option<u32>,
    /// Hit chance, 0..=100. Rolled on import when absent.
    #[serde(default)]
    pub accuracy: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Armor {
    pub name: String,
    #[serde(default)]
    pub defense: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub location: String,
    /// Faction id.
    #[serde(default)]
    pub faction: Option<u32>,
    #[serde(default)]
    pub equipped_weapon: Option<Weapon>,
    #[serde(default)]
    pub equipped_armor: Option<Armor>,
}

impl Character {
    pub fn defense(&self) -> i64 {
        self.equipped_armor.as_ref().map_or(0, |a| a.defense)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    #[serde(default)]
    pub factions: Vec<Faction>,
    #[serde(default)]
    pub characters: Vec<Character>,
}

impl Roster {
    pub fn character(&self, id: u32) -> Option<&Character> {
        self.characters.iter().find(|c| c.id == id)
    }

    /// Member count per faction, in faction order. Factionless characters
    /// are not counted.
    pub fn member_counts(&self) -> Vec<FactionStat> {
        self.factions
            .iter()
            .map(|f| FactionStat {
                name: f.name.clone(),
                member_count: self
                    .characters
                    .iter()
                    .filter(|c| c.faction == Some(f.id))
                    .count() as u64,
            })
            .collect()
    }

    /// Reject rosters with duplicate ids or dangling faction references.
    pub fn validate(&self) -> Result<(), String> {
        let mut faction_ids = HashSet::new();
        for f in &self.factions {
            if !faction_ids.insert(f.id) {
                return Err(format!("Duplicate faction id {}", f.id));
            }
        }
        let mut char_ids = HashSet::new();
        for c in &self.characters {
            if !char_ids.insert(c.id) {
                return Err(format!("Duplicate character id {}", c.id));
            }
            if let Some(fid) = c.faction {
                if !faction_ids.contains(&fid) {
                    return Err(format!("Character {} references unknown faction {}", c.id, fid));
                }
            }
        }
        Ok(())
    }

    /// Give weapons without stats their random critic (0..=90) and accuracy
    /// (40..=100). Stats already present are kept.
    pub fn roll_missing_weapon_stats<R: Rng>(&mut self, rng: &mut R) {
        for weapon in self
            .characters
            .iter_mut()
            .filter_map(|c| c.equipped_weapon.as_mut())
        {
            if weapon.critic.is_none() {
                weapon.critic = Some(rng.gen_range(0..=90));
            }
            if weapon.accuracy.is_none() {
                weapon.accuracy = Some(rng.gen_range(40..=100));
            }
        }
    }
}

thread_local! {
    static ROSTER: RefCell<Roster> = RefCell::new(Roster::default());
}

/// Execute a closure with read access to the roster.
pub fn with_roster<F, R>(f: F) -> R
where
    F: FnOnce(&Roster) -> R,
{
    ROSTER.with(|r| f(&r.borrow()))
}

/// Replace the whole roster.
pub fn replace_roster(roster: Roster) {
    ROSTER.with(|r| *r.borrow_mut() = roster);
}

/// Import a roster from JSON, rolling any missing weapon stats.
pub fn import_roster_json(json: &str) -> Result<(), String> {
    let mut roster: Roster =
        serde_json::from_str(json).map_err(|e| format!("Invalid roster JSON: {}", e))?;
    roster.validate()?;
    super::with_rng(|rng| roster.roll_missing_weapon_stats(rng));
    replace_roster(roster);
    Ok(())
}

pub fn export_roster_json() -> String {
    with_roster(|r| serde_json::to_string(r).unwrap_or_else(|_| "{}".to_string()))
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// Two factions, three characters; Aria and Borin are armed for battle.
    pub fn demo_roster() -> Roster {
        Roster {
            factions: vec![
                Faction { id: 1, name: "Horda".into(), location: "Norte".into() },
                Faction { id: 2, name: "Alianza".into(), location: "Sur".into() },
            ],
            characters: vec![
                Character {
                    id: 1,
                    name: "Aria".into(),
                    location: "Norte".into(),
                    faction: Some(1),
                    equipped_weapon: Some(Weapon {
                        name: "Hacha".into(),
                        damage: 100,
                        critic: Some(10),
                        accuracy: Some(80),
                    }),
                    equipped_armor: Some(Armor { name: "Cuero".into(), defense: 20 }),
                },
                Character {
                    id: 2,
                    name: "Borin".into(),
                    location: "Sur".into(),
                    faction: Some(2),
                    equipped_weapon: Some(Weapon {
                        name: "Espada".into(),
                        damage: 60,
                        critic: Some(5),
                        accuracy: Some(90),
                    }),
                    equipped_armor: Some(Armor { name: "Malla".into(), defense: 30 }),
                },
                Character {
                    id: 3,
                    name: "Ciro".into(),
                    location: "Norte".into(),
                    faction: Some(1),
                    equipped_weapon: None,
                    equipped_armor: None,
                },
            ],
        }
    }
}
