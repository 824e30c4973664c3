//! Character identifiers as they travel between page and server.
//!
//! Hidden fields hold ids as strings ("7"); the server answers with JSON
//! numbers (7). Both normalize to the same textual form so they compare equal.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct CharacterId(String);

impl CharacterId {
    pub fn new(raw: impl AsRef<str>) -> Self {
        CharacterId(raw.as_ref().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric form, when the id is a plain integer.
    pub fn as_u32(&self) -> Option<u32> {
        self.0.parse().ok()
    }
}

impl fmt::Display for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<u32> for CharacterId {
    fn from(id: u32) -> Self {
        CharacterId(id.to_string())
    }
}

impl From<&str> for CharacterId {
    fn from(id: &str) -> Self {
        CharacterId::new(id)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Int(i64),
    Text(String),
}

impl<'de> Deserialize<'de> for CharacterId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match RawId::deserialize(deserializer)? {
            RawId::Int(n) => CharacterId(n.to_string()),
            RawId::Text(s) => CharacterId::new(s),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_and_string_forms_are_equal() {
        let a: CharacterId = serde_json::from_str("7").unwrap();
        let b: CharacterId = serde_json::from_str(r#""7""#).unwrap();
        assert_eq!(a, b);
        assert_eq!(a, CharacterId::from(7));
    }

    #[test]
    fn null_is_an_absent_id() {
        let id: Option<CharacterId> = serde_json::from_str("null").unwrap();
        assert!(id.is_none());
    }

    #[test]
    fn hidden_field_whitespace_is_trimmed() {
        assert_eq!(CharacterId::new(" c1\n"), CharacterId::from("c1"));
        assert_eq!(CharacterId::from("12").as_u32(), Some(12));
        assert_eq!(CharacterId::from("c1").as_u32(), None);
    }

    #[test]
    fn serializes_as_plain_string() {
        assert_eq!(serde_json::to_string(&CharacterId::from(3)).unwrap(), r#""3""#);
    }
}
