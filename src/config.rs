//! Client configuration: endpoint paths, page element ids, offline switch.
//!
//! The page hands a JSON string to the wasm exports. Every field has a
//! default matching the stock battle/faction templates, so `""` or `"{}"`
//! yields a working configuration.

use serde::{Deserialize, Serialize};

use crate::error::ClientError;

/// Server endpoints the client talks to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    pub faction_counts: String,
    pub attack: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            faction_counts: "/api/faction_member_count/".to_string(),
            attack: "/battle/attack/".to_string(),
        }
    }
}

/// Ids of the page elements the controllers read and write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementIds {
    pub chart_canvas: String,
    pub char1_hp: String,
    pub char2_hp: String,
    pub comment: String,
    pub turn_player: String,
    pub char1_id: String,
    pub char2_id: String,
    pub char1_strong: String,
    pub char1_weak: String,
    pub char2_strong: String,
    pub char2_weak: String,
    /// `name` attribute (not id) of the CSRF form field.
    pub csrf_field: String,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            chart_canvas: "factionsChart".to_string(),
            char1_hp: "char1_hp".to_string(),
            char2_hp: "char2_hp".to_string(),
            comment: "comentario".to_string(),
            turn_player: "turn_player".to_string(),
            char1_id: "char1_id".to_string(),
            char2_id: "char2_id".to_string(),
            char1_strong: "char1_fuerte".to_string(),
            char1_weak: "char1_debil".to_string(),
            char2_strong: "char2_fuerte".to_string(),
            char2_weak: "char2_debil".to_string(),
            csrf_field: "csrfmiddlewaretoken".to_string(),
        }
    }
}

impl ElementIds {
    /// Attack buttons of character 1 (strong, weak).
    pub fn char1_buttons(&self) -> [&str; 2] {
        [&self.char1_strong, &self.char1_weak]
    }

    /// Attack buttons of character 2 (strong, weak).
    pub fn char2_buttons(&self) -> [&str; 2] {
        [&self.char2_strong, &self.char2_weak]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub endpoints: Endpoints,
    pub elements: ElementIds,
    /// Route requests to the in-WASM `handle_request` instead of the network.
    pub offline: bool,
}

impl ClientConfig {
    pub fn from_json(json: &str) -> Result<Self, ClientError> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(json).map_err(|e| ClientError::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_string_gives_defaults() {
        let cfg = ClientConfig::from_json("  ").unwrap();
        assert_eq!(cfg, ClientConfig::default());
        assert_eq!(cfg.endpoints.attack, "/battle/attack/");
        assert_eq!(cfg.elements.comment, "comentario");
        assert!(!cfg.offline);
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let cfg = ClientConfig::from_json(
            r#"{"offline":true,"elements":{"comment":"log"},"endpoints":{"attack":"/x/"}}"#,
        )
        .unwrap();
        assert!(cfg.offline);
        assert_eq!(cfg.elements.comment, "log");
        assert_eq!(cfg.elements.char1_hp, "char1_hp");
        assert_eq!(cfg.endpoints.attack, "/x/");
        assert_eq!(cfg.endpoints.faction_counts, "/api/faction_member_count/");
    }

    #[test]
    fn invalid_json_is_a_config_error() {
        let err = ClientConfig::from_json("{not json").unwrap_err();
        assert!(matches!(err, ClientError::Config(_)));
    }

    #[test]
    fn button_groups() {
        let ids = ElementIds::default();
        assert_eq!(ids.char1_buttons(), ["char1_fuerte", "char1_debil"]);
        assert_eq!(ids.char2_buttons(), ["char2_fuerte", "char2_debil"]);
    }
}
