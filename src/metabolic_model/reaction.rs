//! This module provides a struct for representing reactions
use super::model::Gpr;
use crate::configuration::CONFIGURATION;

use derive_builder::Builder;
use indexmap::IndexMap;
use serde_json::Value;

/// Represents a reaction in the metabolic model
///
/// The stoichiometry maps metabolite ids (borrowed from the owning model's
/// metabolite index) to signed coefficients. Mass balance is not validated here.
#[derive(Builder, Debug, Clone)]
pub struct Reaction {
    /// Used to identify the reaction (must be unique within a model)
    pub id: String,
    /// Metabolite stoichiometry of the reaction
    #[builder(default = "IndexMap::new()")]
    pub metabolites: IndexMap<String, f64>,
    /// Human-readable reaction name
    #[builder(default = "None")]
    pub name: Option<String>,
    /// Gene Protein Reaction rule describing which gene products catalyze the reaction
    #[builder(default = "None")]
    pub gpr: Option<Gpr>,
    /// Lower flux bound
    #[builder(default = "CONFIGURATION.read().unwrap().lower_bound")]
    pub lower_bound: f64,
    /// Upper flux bound
    #[builder(default = "CONFIGURATION.read().unwrap().upper_bound")]
    pub upper_bound: f64,
    /// Reaction subsystem
    #[builder(default = "None")]
    pub subsystem: Option<String>,
    /// Reaction Annotations (external database name mapped to values)
    #[builder(default = "IndexMap::new()")]
    pub annotation: IndexMap<String, Value>,
}

impl Reaction {
    /// Gene reaction rule as a boolean string, empty when the reaction has no genes
    pub fn gene_reaction_rule(&self) -> String {
        self.gpr
            .as_ref()
            .map(|rule| rule.to_string_id())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_bounds_come_from_configuration() {
        let reaction = ReactionBuilder::default()
            .id("rxn00001_c0".to_string())
            .build()
            .unwrap();
        assert_eq!(reaction.lower_bound, -1000.0);
        assert_eq!(reaction.upper_bound, 1000.0);
        assert_eq!(reaction.gene_reaction_rule(), "");
    }
}
