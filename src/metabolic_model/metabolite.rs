//! This module provides the metabolite struct representing a metabolite

use std::hash::Hash;

use derive_builder::Builder;
use indexmap::IndexMap;
use serde_json::Value;

/// Represents a metabolite
#[derive(Builder, Debug, Clone)]
pub struct Metabolite {
    /// Used to identify the metabolite (must be unique within a model)
    pub id: String,
    /// Human Readable name of the metabolite
    #[builder(default = "None")]
    pub name: Option<String>,
    /// Which compartment token the metabolite is in (e.g. "c0", "e0")
    #[builder(default = "None")]
    pub compartment: Option<String>,
    /// Electrical charge of the Metabolite
    #[builder(default = "0")]
    pub charge: i32,
    /// Chemical Formula of the metabolite
    #[builder(default = "None")]
    pub formula: Option<String>,
    /// Metabolite annotations (external database name mapped to values)
    #[builder(default = "IndexMap::new()")]
    pub annotation: IndexMap<String, Value>,
}

impl Metabolite {
    /// Compound id with the trailing compartment token stripped
    ///
    /// `cpd00027_e0` in compartment `e0` has the root compound id `cpd00027`.
    /// Ids that do not carry their compartment as a suffix are returned unchanged.
    pub fn root_compound_id(&self) -> &str {
        let Some(ref compartment) = self.compartment else {
            return &self.id;
        };
        match self.id.strip_suffix(compartment.as_str()) {
            Some(stem) => stem.strip_suffix('_').unwrap_or(stem),
            None => &self.id,
        }
    }

    /// First character of the compartment token, used for classification
    /// (`c` cytosol, `e` extracellular, ...)
    pub fn compartment_class(&self) -> Option<char> {
        self.compartment.as_ref().and_then(|c| c.chars().next())
    }
}

impl Hash for Metabolite {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state); // Hash by id
                             // If the metabolite has an associated compartment, also hash by that
        if let Some(ref compartment) = self.compartment {
            compartment.hash(state)
        };
    }
}
