//! Territory rosters: the records a registry is filled from.
//!
//! Records arrive either one at a time from the console or as a JSON array
//! in a roster file:
//!
//! ```json
//! [
//!   { "name": "Brasil", "owner": "Azul", "troops": 10 },
//!   { "name": "Chile", "owner": "Vermelho", "troops": 5 }
//! ]
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{WarError, WarResult};
use crate::game::{Registry, Territory};

/// One unvalidated territory record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerritoryRecord {
    /// Territory name.
    pub name: String,
    /// Controlling color.
    #[serde(alias = "color")]
    pub owner: String,
    /// Troops stationed there. Negative counts fail to deserialize.
    pub troops: u32,
}

impl TerritoryRecord {
    /// Validate and bound this record as the `index`-th territory.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRecord` when the name or owner is blank.
    pub fn into_territory(self, index: usize) -> WarResult<Territory> {
        Territory::new(&self.name, &self.owner, self.troops).ok_or_else(|| {
            let field = if self.name.trim().is_empty() {
                "name"
            } else {
                "owner"
            };
            WarError::InvalidRecord {
                index,
                reason: format!("{field} must not be empty"),
            }
        })
    }
}

/// Build a registry from records, in order.
///
/// # Errors
///
/// Returns `InvalidSize(0)` for no records, or the first `InvalidRecord`.
pub fn build_registry(records: Vec<TerritoryRecord>) -> WarResult<Registry> {
    let mut registry = Registry::new(records.len())?;
    for (index, record) in records.into_iter().enumerate() {
        registry.register(index, record.into_territory(index)?)?;
    }
    Ok(registry)
}

/// Parse a JSON roster.
///
/// # Errors
///
/// Returns `Roster` for malformed JSON, otherwise see [`build_registry`].
pub fn parse_roster(json: &str) -> WarResult<Registry> {
    let records: Vec<TerritoryRecord> = serde_json::from_str(json)?;
    build_registry(records)
}

/// Load a JSON roster file.
///
/// # Errors
///
/// Returns `Io` if the file cannot be read, otherwise see [`parse_roster`].
pub fn load_roster(path: &Path) -> WarResult<Registry> {
    let json = fs::read_to_string(path)?;
    parse_roster(&json)
}
