//! Flat (COBRA-style) JSON IO for Models
//!
//! The flat format carries materialized entities directly: metabolite,
//! reaction and gene lists with gene rules as boolean strings. It is the
//! interchange format the relational engine's output is usually persisted in.
use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::io::gpr_parse::{parse_gpr, GprParseError};
use crate::metabolic_model::gene::Gene;
use crate::metabolic_model::metabolite::Metabolite;
use crate::metabolic_model::model::Model;
use crate::metabolic_model::reaction::{ReactionBuilder, ReactionBuilderError};

// region JSON Model
/// Represents a JSON serialized model, used for reading and writing models in json format
#[derive(Serialize, Deserialize)]
struct JsonModel {
    metabolites: Vec<JsonMetabolite>,
    reactions: Vec<JsonReaction>,
    genes: Vec<JsonGene>,
    id: Option<String>,
    name: Option<String>,
    compartments: Option<IndexMap<String, String>>,
    version: Option<String>,
}

#[derive(Serialize, Deserialize)]
struct JsonMetabolite {
    id: String,
    name: Option<String>,
    compartment: Option<String>,
    charge: Option<i32>,
    formula: Option<String>,
    #[serde(default)]
    annotation: IndexMap<String, Value>,
}

#[derive(Serialize, Deserialize)]
struct JsonReaction {
    id: String,
    name: Option<String>,
    metabolites: IndexMap<String, f64>,
    lower_bound: f64,
    upper_bound: f64,
    #[serde(default)]
    gene_reaction_rule: String,
    objective_coefficient: Option<f64>,
    subsystem: Option<String>,
    #[serde(default)]
    annotation: IndexMap<String, Value>,
}

#[derive(Serialize, Deserialize)]
struct JsonGene {
    id: String,
    name: Option<String>,
    #[serde(default)]
    annotation: IndexMap<String, Value>,
}
// endregion JSON Model

// region Conversions
impl From<JsonGene> for Gene {
    fn from(g: JsonGene) -> Self {
        Self {
            id: g.id,
            name: g.name,
            annotation: g.annotation,
        }
    }
}

impl From<JsonMetabolite> for Metabolite {
    fn from(m: JsonMetabolite) -> Self {
        Self {
            id: m.id,
            name: m.name,
            compartment: m.compartment,
            charge: m.charge.unwrap_or_default(),
            formula: m.formula,
            annotation: m.annotation,
        }
    }
}

impl From<Gene> for JsonGene {
    fn from(g: Gene) -> Self {
        Self {
            id: g.id,
            name: g.name,
            annotation: g.annotation,
        }
    }
}

impl From<Metabolite> for JsonMetabolite {
    fn from(m: Metabolite) -> Self {
        Self {
            id: m.id,
            name: m.name,
            compartment: m.compartment,
            charge: Some(m.charge),
            formula: m.formula,
            annotation: m.annotation,
        }
    }
}

impl Model {
    pub fn read_json<P: AsRef<Path>>(path: P) -> Result<Model, JsonError> {
        let model_str = match fs::read_to_string(path) {
            Ok(data) => data,
            Err(err) => return Err(JsonError::UnableToRead(format!("{:?}", err))),
        };
        let json_model = serde_json::from_str::<JsonModel>(&model_str)?;
        Model::from_json(json_model)
    }

    pub fn write_json<P: AsRef<Path>>(&self, path: P) -> Result<(), JsonError> {
        let json_model = self.to_json();
        let model_string = serde_json::to_string(&json_model)?;
        fs::write(path, model_string)?;
        Ok(())
    }

    fn from_json(json_model: JsonModel) -> Result<Self, JsonError> {
        let mut model = Model::new_empty();
        // Start by converting the genes and metabolites using the From methods
        for g in json_model.genes {
            model.add_gene(Gene::from(g));
        }
        for m in json_model.metabolites {
            model.add_metabolite(Metabolite::from(m));
        }
        /* Now, iterate through the reactions, parsing GPRs, and adding to
        the objective along the way */
        for rxn in json_model.reactions {
            let gpr = if !rxn.gene_reaction_rule.is_empty() {
                Some(parse_gpr(&rxn.gene_reaction_rule)?)
            } else {
                None
            };
            // A rule may reference genes absent from the gene list
            if let Some(ref rule) = gpr {
                for gene_id in rule.genes() {
                    if !model.genes.contains_key(&gene_id) {
                        model.add_gene(Gene::new(gene_id.clone(), None));
                    }
                }
            }
            let new_reaction = ReactionBuilder::default()
                .id(rxn.id.clone())
                .metabolites(rxn.metabolites)
                .name(rxn.name)
                .gpr(gpr)
                .lower_bound(rxn.lower_bound)
                .upper_bound(rxn.upper_bound)
                .subsystem(rxn.subsystem)
                .annotation(rxn.annotation)
                .build()?;
            model.add_reaction(new_reaction);
            if let Some(coef) = rxn.objective_coefficient {
                model.objective.insert(rxn.id, coef);
            }
        }
        model.id = json_model.id;
        model.name = json_model.name;
        model.compartments = json_model.compartments;
        model.version = json_model.version;
        Ok(model)
    }

    fn to_json(&self) -> JsonModel {
        let json_genes: Vec<JsonGene> = self.genes.values().map(|g| g.clone().into()).collect();
        let json_metabolites: Vec<JsonMetabolite> = self
            .metabolites
            .values()
            .map(|m| m.clone().into())
            .collect();
        let json_reactions: Vec<JsonReaction> = self
            .reactions
            .values()
            .map(|r| JsonReaction {
                id: r.id.clone(),
                name: r.name.clone(),
                metabolites: r.metabolites.clone(),
                lower_bound: r.lower_bound,
                upper_bound: r.upper_bound,
                gene_reaction_rule: r.gene_reaction_rule(),
                objective_coefficient: self.objective.get(&r.id).copied(),
                subsystem: r.subsystem.clone(),
                annotation: r.annotation.clone(),
            })
            .collect();

        JsonModel {
            metabolites: json_metabolites,
            reactions: json_reactions,
            genes: json_genes,
            id: self.id.clone(),
            name: self.name.clone(),
            compartments: self.compartments.clone(),
            version: self.version.clone(),
        }
    }
}

#[derive(Error, Debug)]
pub enum JsonError {
    #[error("Unable to parse a GPR rule during conversion from JSON")]
    GprParserError(#[from] GprParseError),
    #[error("Unable to read file due to {0}")]
    UnableToRead(String),
    #[error("Unable to build reaction")]
    UnableToBuildReaction(#[from] ReactionBuilderError),
    #[error("Serde json parse error")]
    SerdeJsonParseError(#[from] serde_json::Error),
    #[error("Unable to write to file")]
    UnableToWrite(#[from] std::io::Error),
}
// endregion Conversions
