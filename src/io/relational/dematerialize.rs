//! Regeneration of a relational model graph from a materialized [`Model`]
//!
//! Dematerialization is the inverse of [`ModelBuilder::build`] up to the
//! documented lossy spots: synthesized boundary reactions are omitted (the
//! materializer recreates them), gene rule subunit structure collapses through
//! DNF, and provenance fields not carried on the in-memory entities are
//! emitted with placeholder conventions.
//!
//! [`ModelBuilder::build`]: crate::io::relational::materialize::ModelBuilder::build

use indexmap::IndexMap;
use serde_json::Value;

use crate::io::relational::boundary::is_boundary_id;
use crate::io::relational::bounds::encode_bounds_sentinel;
use crate::io::relational::gpr::complexes_from_rule;
use crate::io::relational::report::BuildReport;
use crate::io::relational::schema::{
    BiomassRecord, CompartmentRecord, CompoundRecord, ModelGraph, ReactionRecord, ReagentRecord,
};
use crate::io::gpr_parse::GprParseError;
use crate::io::relational::{
    SBO_ANNOTATION, SBO_BIOMASS_PRODUCTION, SBO_DEMAND_REACTION, SBO_EXCHANGE_REACTION,
};
use crate::metabolic_model::metabolite::Metabolite;
use crate::metabolic_model::model::Model;
use crate::metabolic_model::reaction::Reaction;

/// Regenerate the relational document for a model
///
/// Boundary reactions (by SBO marker or naming convention) are skipped;
/// reactions flagged as biomass become [`BiomassRecord`]s. Fails only when a
/// reaction carries a gene rule string that does not parse, which cannot
/// happen for models produced by the materializer.
pub fn dematerialize(model: &Model, report: &mut BuildReport) -> Result<ModelGraph, GprParseError> {
    let modelcompartments = model
        .compartments
        .iter()
        .flatten()
        .map(|(id, label)| CompartmentRecord {
            id: id.clone(),
            label: Some(label.clone()),
        })
        .collect();

    let modelcompounds = model
        .metabolites
        .values()
        .map(compound_record)
        .collect();

    let mut modelreactions = Vec::new();
    let mut biomasses = Vec::new();
    for reaction in model.reactions.values() {
        if is_boundary(reaction) {
            continue;
        }
        if is_biomass(reaction) {
            biomasses.push(BiomassRecord {
                id: reaction.id.clone(),
                name: reaction.name.clone(),
                biomasscompounds: reagent_records(reaction),
            });
        } else {
            modelreactions.push(reaction_record(reaction, report)?);
        }
    }

    Ok(ModelGraph {
        id: model.id.clone(),
        name: model.name.clone(),
        modelcompounds,
        modelreactions,
        biomasses,
        modelcompartments,
    })
}

fn is_boundary(reaction: &Reaction) -> bool {
    match reaction.annotation.get(SBO_ANNOTATION) {
        Some(Value::String(sbo)) => sbo == SBO_EXCHANGE_REACTION || sbo == SBO_DEMAND_REACTION,
        _ => is_boundary_id(&reaction.id),
    }
}

/// Only the biomass annotation marker decides; a caller-set objective on an
/// ordinary reaction must keep its bounds and gene rule through a full record
fn is_biomass(reaction: &Reaction) -> bool {
    matches!(
        reaction.annotation.get(SBO_ANNOTATION),
        Some(Value::String(sbo)) if sbo == SBO_BIOMASS_PRODUCTION
    )
}

fn compound_record(metabolite: &Metabolite) -> CompoundRecord {
    // Database cross-references live in the annotation map as arrays; scalar
    // annotation entries (sbo, seed ids) are engine-internal markers
    let dblinks: IndexMap<String, Vec<String>> = metabolite
        .annotation
        .iter()
        .filter_map(|(database, value)| match value {
            Value::Array(external_ids) => Some((
                database.clone(),
                external_ids
                    .iter()
                    .filter_map(|external| external.as_str().map(str::to_string))
                    .collect(),
            )),
            _ => None,
        })
        .collect();
    CompoundRecord {
        id: metabolite.id.clone(),
        name: metabolite.name.clone(),
        // "null" is the wire sentinel for a missing formula
        formula: Some(
            metabolite
                .formula
                .clone()
                .unwrap_or_else(|| "null".to_string()),
        ),
        charge: Some(Value::from(metabolite.charge)),
        compound_ref: Some(format!(
            "~/template/compounds/id/{}",
            metabolite.root_compound_id()
        )),
        modelcompartment_ref: metabolite
            .compartment
            .as_ref()
            .map(|token| format!("~/modelcompartments/id/{}", token)),
        dblinks,
    }
}

fn reaction_record(
    reaction: &Reaction,
    report: &mut BuildReport,
) -> Result<ReactionRecord, GprParseError> {
    let (maxrevflux, maxforflux, direction) =
        encode_bounds_sentinel(reaction.lower_bound, reaction.upper_bound, report);
    let model_reaction_proteins = complexes_from_rule(&reaction.gene_reaction_rule())?
        .iter()
        .map(|complex| complex.to_record())
        .collect();
    let compartment_token = reaction_compartment(reaction);
    Ok(ReactionRecord {
        id: reaction.id.clone(),
        name: reaction.name.clone(),
        direction: Some(direction.symbol().to_string()),
        maxrevflux: Some(maxrevflux),
        maxforflux: Some(maxforflux),
        model_reaction_reagents: reagent_records(reaction),
        model_reaction_proteins,
        modelcompartment_ref: Some(format!("~/modelcompartments/id/{}", compartment_token)),
        reaction_ref: None,
    })
}

fn reagent_records(reaction: &Reaction) -> Vec<ReagentRecord> {
    reaction
        .metabolites
        .iter()
        .map(|(metabolite_id, coefficient)| ReagentRecord {
            modelcompound_ref: format!("~/modelcompounds/id/{}", metabolite_id),
            coefficient: *coefficient,
        })
        .collect()
}

/// Compartment token a reaction is assigned to
///
/// Derived from the compartment suffixes of its metabolite ids: a reaction
/// whose metabolites span the cytosol and one other compartment is assigned
/// to the other compartment (transporters live at the membrane of the
/// non-cytosolic side). Anything else defaults to `c0`.
fn reaction_compartment(reaction: &Reaction) -> String {
    let mut tokens: Vec<&str> = reaction
        .metabolites
        .keys()
        .filter_map(|metabolite_id| metabolite_id.rsplit_once('_').map(|(_, token)| token))
        .collect();
    tokens.sort_unstable();
    tokens.dedup();
    match tokens.as_slice() {
        [token] => token.to_string(),
        [first, second] if *first == "c0" => second.to_string(),
        [first, second] if *second == "c0" => first.to_string(),
        _ => "c0".to_string(),
    }
}
