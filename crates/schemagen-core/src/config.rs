//! Generator configuration types

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Options controlling the shape of the emitted code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Suffix appended to every to-one navigation member
    #[serde(default = "default_navigation_suffix")]
    pub navigation_suffix: String,

    /// Generic collection type used for to-many navigations and their
    /// initializers, e.g. `HashSet` gives `ICollection<Post>` backed by
    /// `new HashSet<Post>()`
    #[serde(default = "default_collection_type")]
    pub collection_type: String,

    /// Emit the `// <auto-generated />` marker and `#nullable disable`
    #[serde(default = "default_emit_header")]
    pub emit_header: bool,

    /// Inflection exceptions layered over the built-in English tables
    #[serde(default)]
    pub inflections: InflectionConfig,
}

fn default_navigation_suffix() -> String {
    "Navigation".to_string()
}

fn default_collection_type() -> String {
    "HashSet".to_string()
}

fn default_emit_header() -> bool {
    true
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            navigation_suffix: default_navigation_suffix(),
            collection_type: default_collection_type(),
            emit_header: default_emit_header(),
            inflections: InflectionConfig::default(),
        }
    }
}

impl GeneratorConfig {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Create configuration from JSON bytes
    pub fn from_json(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        if bytes.is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_slice(bytes)
    }

    pub fn with_navigation_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.navigation_suffix = suffix.into();
        self
    }

    pub fn with_collection_type(mut self, collection_type: impl Into<String>) -> Self {
        self.collection_type = collection_type.into();
        self
    }

    pub fn without_header(mut self) -> Self {
        self.emit_header = false;
        self
    }
}

/// Extra inflection rules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InflectionConfig {
    /// Irregular singular → plural pairs
    #[serde(default)]
    pub irregular: BTreeMap<String, String>,

    /// Words whose singular and plural forms are identical
    #[serde(default)]
    pub uncountable: Vec<String>,
}
