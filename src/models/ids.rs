//! Identificadores de entidades
//!
//! El backend asigna ids numéricos; los flujos locales generan UUIDs.
//! Ambos se representan como texto.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Id generado en el cliente
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Si el id fue generado en el cliente (flujo local)
    pub fn is_generated(&self) -> bool {
        Uuid::parse_str(&self.0).is_ok()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<i64> for EntityId {
    fn from(value: i64) -> Self {
        Self(value.to_string())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(i64),
    Text(String),
}

impl<'de> Deserialize<'de> for EntityId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match RawId::deserialize(deserializer)? {
            RawId::Number(n) => EntityId::from(n),
            RawId::Text(s) => EntityId(s),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_numeric_and_text_ids() {
        let numeric: EntityId = serde_json::from_str("1718000000000").unwrap();
        assert_eq!(numeric.as_str(), "1718000000000");

        let text: EntityId = serde_json::from_str("\"esp32_1\"").unwrap();
        assert_eq!(text, EntityId::from("esp32_1"));
        assert_eq!(serde_json::to_string(&text).unwrap(), "\"esp32_1\"");
    }

    #[test]
    fn test_generated_ids_are_unique() {
        assert_ne!(EntityId::generate(), EntityId::generate());
    }

    #[test]
    fn test_generated_ids_are_recognized() {
        assert!(EntityId::generate().is_generated());
        assert!(!EntityId::from(1718000000000_i64).is_generated());
        assert!(!EntityId::from("esp32_1").is_generated());
    }
}
