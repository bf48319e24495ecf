use serde::{Deserialize, Serialize};

/// One row of the sanctions snapshot.
///
/// Only `name` takes part in matching; the other columns are carried along
/// for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SanctionsEntry {
    /// SECO subject id (SSID)
    pub ssid: String,
    /// Sanctions program (e.g. "Ukraine / Russia")
    pub program: String,
    /// Measures in force
    pub sanctions: String,
    /// Subject type (person, entity, ...)
    pub entity_type: String,
    /// Listed name
    pub name: String,
}

impl SanctionsEntry {
    /// Entry with only a name
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            ssid: String::new(),
            program: String::new(),
            sanctions: String::new(),
            entity_type: String::new(),
            name: name.into(),
        }
    }
}
