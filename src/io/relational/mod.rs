//! Conversion between the workspace-style relational model graph and [`crate::metabolic_model::model::Model`]
//!
//! The relational representation links entities through string references
//! (e.g. `"~/modelcompounds/id/cpd00001_c0"`). Materialization resolves those
//! references against explicit indices built in a fixed order (metabolites,
//! reactions, genes, boundary reactions, objective), so missing or duplicated
//! data degrades to recorded warnings instead of hard failures.

pub mod boundary;
pub mod bounds;
pub mod compartment;
pub mod dematerialize;
pub mod gpr;
pub mod materialize;
pub mod reference;
pub mod report;
pub mod schema;

/// SBO term attached to materialized metabolites (simple chemical)
pub const SBO_SIMPLE_CHEMICAL: &str = "SBO:0000247";
/// SBO term attached to materialized reactions (biochemical reaction)
pub const SBO_BIOCHEMICAL_REACTION: &str = "SBO:0000176";
/// SBO term attached to genes (gene)
pub const SBO_GENE: &str = "SBO:0000243";
/// SBO term attached to exchange reactions
pub const SBO_EXCHANGE_REACTION: &str = "SBO:0000627";
/// SBO term attached to demand reactions
pub const SBO_DEMAND_REACTION: &str = "SBO:0000628";
/// SBO term flagging biomass production reactions, the objective candidates
pub const SBO_BIOMASS_PRODUCTION: &str = "SBO:0000629";

/// Annotation key carrying SBO terms
pub const SBO_ANNOTATION: &str = "sbo";
