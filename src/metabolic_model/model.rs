//! This module provides the Model struct for representing an entire metabolic model
use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};

use crate::metabolic_model::gene::Gene;
use crate::metabolic_model::metabolite::Metabolite;
use crate::metabolic_model::reaction::Reaction;

use indexmap::IndexMap;
use thiserror::Error;

/// Represents a Genome Scale Metabolic Model
///
/// Owns all metabolites, reactions and genes. Reactions reference metabolites
/// by id through the model's metabolite index rather than holding live object
/// references.
#[derive(Clone, Debug, Default)]
pub struct Model {
    /// Map of reaction ids to Reaction objects
    pub reactions: IndexMap<String, Reaction>,
    /// Map of gene ids to Gene objects
    pub genes: IndexMap<String, Gene>,
    /// Map of metabolite ids to Metabolite objects
    pub metabolites: IndexMap<String, Metabolite>,
    /// Map of reaction ids to objective function coefficients
    ///
    /// At most one reaction is flagged as the active objective by the
    /// materializer; a model without one is legitimate (e.g. templates).
    pub objective: IndexMap<String, f64>,
    /// Id associated with the Model
    pub id: Option<String>,
    /// Human readable model name
    pub name: Option<String>,
    /// Compartments in the model
    ///
    /// An IndexMap<String, String> of {short name: long name}
    pub compartments: Option<IndexMap<String, String>>,
    /// A version identifier for the Model, stored as a string
    pub version: Option<String>,
}

impl Model {
    pub fn new_empty() -> Self {
        Model::default()
    }

    /// Add a metabolite to the model
    pub fn add_metabolite(&mut self, metabolite: Metabolite) {
        let id = metabolite.id.clone();
        self.metabolites.insert(id, metabolite);
    }

    /// Add a reaction to the model
    pub fn add_reaction(&mut self, reaction: Reaction) {
        let id = reaction.id.clone();
        self.reactions.insert(id, reaction);
    }

    /// Add a gene to the model
    pub fn add_gene(&mut self, gene: Gene) {
        let id = gene.id.clone();
        self.genes.insert(id, gene);
    }

    /// Flag a reaction as the active optimization objective
    pub fn set_objective(&mut self, reaction_id: &str) -> Result<(), ModelError> {
        if !self.reactions.contains_key(reaction_id) {
            return Err(ModelError::UnknownReaction(reaction_id.to_string()));
        }
        self.objective.clear();
        self.objective.insert(reaction_id.to_string(), 1.0);
        Ok(())
    }

    /// Id of the reaction currently flagged as objective, if any
    pub fn objective_reaction_id(&self) -> Option<&str> {
        self.objective.keys().next().map(|id| id.as_str())
    }
}

#[derive(Clone, Debug, Error)]
pub enum ModelError {
    #[error("reaction is not present in the model: {0}")]
    UnknownReaction(String),
}

// region GPR Functionality
/// Representation of a Gene Protein Reaction Rule as an AST
///
/// Gene rules are plain monotone boolean expressions, so only `and` and `or`
/// nodes exist; negation has no meaning for catalysis requirements.
#[derive(Clone, Debug, PartialEq)]
pub enum Gpr {
    /// Operation on two subexpressions (see [`GprOperation`])
    Operation(GprOperation),
    /// A terminal gene node holding a gene id
    GeneNode(String),
}

impl Display for Gpr {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_string_id())
    }
}

impl Gpr {
    /// Create a new binary operation node
    pub fn new_binary_operation(left: Gpr, operator: GprOperatorType, right: Gpr) -> Gpr {
        let op = match operator {
            GprOperatorType::Or => GprOperation::Or {
                left: Box::new(left),
                right: Box::new(right),
            },
            GprOperatorType::And => GprOperation::And {
                left: Box::new(left),
                right: Box::new(right),
            },
        };
        Gpr::Operation(op)
    }

    /// Create a new gene node
    pub fn new_gene_node(gene: &str) -> Gpr {
        Gpr::GeneNode(gene.to_string())
    }

    /// Generate a GPR string with gene ids from the GPR AST
    ///
    /// Operation nodes are always parenthesized, so a rule that round-trips
    /// through parsing may gain an outer pair of parentheses.
    pub fn to_string_id(&self) -> String {
        match self {
            Gpr::Operation(op) => match op {
                GprOperation::Or { left, right } => {
                    format!("({} or {})", left.to_string_id(), right.to_string_id())
                }
                GprOperation::And { left, right } => {
                    format!("({} and {})", left.to_string_id(), right.to_string_id())
                }
            },
            Gpr::GeneNode(gene_ref) => gene_ref.to_string(),
        }
    }

    /// Collect every distinct gene id referenced by the rule
    pub fn genes(&self) -> BTreeSet<String> {
        let mut found = BTreeSet::new();
        self.collect_genes(&mut found);
        found
    }

    fn collect_genes(&self, found: &mut BTreeSet<String>) {
        match self {
            Gpr::Operation(op) => match op {
                GprOperation::Or { left, right } | GprOperation::And { left, right } => {
                    left.collect_genes(found);
                    right.collect_genes(found);
                }
            },
            Gpr::GeneNode(gene) => {
                found.insert(gene.clone());
            }
        }
    }
}

/// Possible operations on gene rule subexpressions
#[derive(Clone, Debug, PartialEq)]
pub enum GprOperation {
    Or { left: Box<Gpr>, right: Box<Gpr> },
    And { left: Box<Gpr>, right: Box<Gpr> },
}

/// Types of Allowed GPR Operations
pub enum GprOperatorType {
    /// Or, satisfied if either side is satisfied
    Or,
    /// And, satisfied only if both sides are satisfied
    And,
}
// endregion GPR Functionality
