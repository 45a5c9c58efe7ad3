//! Synthesis of boundary (exchange/demand) reactions
//!
//! Boundary reactions carry a single `{metabolite: -1}` stoichiometry term
//! and represent exchange with the environment (extracellular metabolites) or
//! one-directional consumption of designated sink compounds. Synthesis is
//! idempotent: an existing boundary reaction for a metabolite is detected by
//! its naming convention and skipped.

use indexmap::{IndexMap, IndexSet};
use serde_json::Value;

use crate::configuration::CONFIGURATION;
use crate::io::relational::{SBO_ANNOTATION, SBO_DEMAND_REACTION, SBO_EXCHANGE_REACTION};
use crate::metabolic_model::model::Model;
use crate::metabolic_model::reaction::{Reaction, ReactionBuilder};

/// Id prefix of synthesized exchange reactions
pub const EXCHANGE_PREFIX: &str = "EX_";
/// Id prefix of synthesized demand reactions
///
/// `DM_` and `SK_` both occur in the wild for auto-sink compounds; this
/// engine consistently emits `DM_`.
pub const DEMAND_PREFIX: &str = "DM_";

/// Add exchange reactions for extracellular metabolites and demand reactions
/// for the auto-sink set
///
/// Exchange bounds default to fully reversible when `media_constraints` is
/// empty (no medium configured); once any medium is defined uptake is blocked
/// (`(0, upper)`) unless the metabolite's root compound id carries a media
/// entry, whose bounds are then used verbatim. Demand reactions are always
/// efflux-only.
pub fn synthesize_boundary_reactions(
    model: &mut Model,
    media_constraints: &IndexMap<String, (f64, f64)>,
    auto_sink: &IndexSet<String>,
    extracellular_class: char,
) {
    let (default_lower, default_upper) = {
        let configuration = CONFIGURATION.read().unwrap();
        (configuration.lower_bound, configuration.upper_bound)
    };
    let Model {
        metabolites,
        reactions,
        ..
    } = model;

    for metabolite in metabolites.values() {
        if metabolite.compartment_class() == Some(extracellular_class) {
            let reaction_id = format!("{}{}", EXCHANGE_PREFIX, metabolite.id);
            if reactions.contains_key(&reaction_id) {
                continue;
            }
            let (lower_bound, upper_bound) = if media_constraints.is_empty() {
                (default_lower, default_upper)
            } else {
                media_constraints
                    .get(metabolite.root_compound_id())
                    .copied()
                    .unwrap_or((0.0, default_upper))
            };
            let reaction = drain_reaction(
                reaction_id,
                format!(
                    "Exchange for {}",
                    metabolite.name.as_deref().unwrap_or(&metabolite.id)
                ),
                &metabolite.id,
                lower_bound,
                upper_bound,
                SBO_EXCHANGE_REACTION,
            );
            tracing::debug!(id = %reaction.id, "created exchange reaction");
            reactions.insert(reaction.id.clone(), reaction);
        }
    }

    for sink_id in auto_sink {
        let Some(metabolite) = metabolites.get(sink_id) else {
            continue;
        };
        let reaction_id = format!("{}{}", DEMAND_PREFIX, metabolite.id);
        if reactions.contains_key(&reaction_id) {
            continue;
        }
        let reaction = drain_reaction(
            reaction_id,
            format!(
                "Demand for {}",
                metabolite.name.as_deref().unwrap_or(&metabolite.id)
            ),
            &metabolite.id,
            0.0,
            default_upper,
            SBO_DEMAND_REACTION,
        );
        tracing::debug!(id = %reaction.id, "created demand reaction");
        reactions.insert(reaction.id.clone(), reaction);
    }
}

/// Whether a reaction id follows a synthesized boundary naming convention
pub fn is_boundary_id(reaction_id: &str) -> bool {
    reaction_id.starts_with(EXCHANGE_PREFIX) || reaction_id.starts_with(DEMAND_PREFIX)
}

fn drain_reaction(
    id: String,
    name: String,
    metabolite_id: &str,
    lower_bound: f64,
    upper_bound: f64,
    sbo: &str,
) -> Reaction {
    let mut stoichiometry = IndexMap::new();
    stoichiometry.insert(metabolite_id.to_string(), -1.0);
    let mut annotation = IndexMap::new();
    annotation.insert(SBO_ANNOTATION.to_string(), Value::String(sbo.to_string()));
    ReactionBuilder::default()
        .id(id)
        .name(Some(name))
        .metabolites(stoichiometry)
        .lower_bound(lower_bound)
        .upper_bound(upper_bound)
        .annotation(annotation)
        .build()
        .expect("drain reaction builder with id set cannot fail")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::relational::compartment::EXTRACELLULAR_CLASS;
    use crate::metabolic_model::metabolite::MetaboliteBuilder;

    fn model_with(metabolites: &[(&str, &str)]) -> Model {
        let mut model = Model::new_empty();
        for (id, compartment) in metabolites {
            model.add_metabolite(
                MetaboliteBuilder::default()
                    .id(id.to_string())
                    .compartment(Some(compartment.to_string()))
                    .build()
                    .unwrap(),
            );
        }
        model
    }

    #[test]
    fn exchange_defaults_without_media() {
        let mut model = model_with(&[("cpd00027_e0", "e0"), ("cpd00027_c0", "c0")]);
        synthesize_boundary_reactions(
            &mut model,
            &IndexMap::new(),
            &IndexSet::new(),
            EXTRACELLULAR_CLASS,
        );
        assert_eq!(model.reactions.len(), 1);
        let exchange = &model.reactions["EX_cpd00027_e0"];
        assert_eq!(exchange.lower_bound, -1000.0);
        assert_eq!(exchange.upper_bound, 1000.0);
        assert_eq!(exchange.metabolites["cpd00027_e0"], -1.0);
    }

    #[test]
    fn media_blocks_uptake_by_default() {
        let mut model = model_with(&[("cpd00027_e0", "e0"), ("cpd00007_e0", "e0")]);
        let mut media = IndexMap::new();
        media.insert("cpd00027".to_string(), (-5.0, 100.0));
        synthesize_boundary_reactions(&mut model, &media, &IndexSet::new(), EXTRACELLULAR_CLASS);
        // Constrained compound gets its media bounds verbatim
        let constrained = &model.reactions["EX_cpd00027_e0"];
        assert_eq!((constrained.lower_bound, constrained.upper_bound), (-5.0, 100.0));
        // Any other extracellular compound has uptake blocked
        let blocked = &model.reactions["EX_cpd00007_e0"];
        assert_eq!((blocked.lower_bound, blocked.upper_bound), (0.0, 1000.0));
    }

    #[test]
    fn demand_reactions_for_auto_sinks() {
        let mut model = model_with(&[("cpd11416_c0", "c0")]);
        let mut auto_sink = IndexSet::new();
        auto_sink.insert("cpd11416_c0".to_string());
        // Sinks missing from the model are ignored
        auto_sink.insert("cpd02701_c0".to_string());
        synthesize_boundary_reactions(&mut model, &IndexMap::new(), &auto_sink, EXTRACELLULAR_CLASS);
        assert_eq!(model.reactions.len(), 1);
        let demand = &model.reactions["DM_cpd11416_c0"];
        assert_eq!((demand.lower_bound, demand.upper_bound), (0.0, 1000.0));
        assert_eq!(demand.metabolites["cpd11416_c0"], -1.0);
    }

    #[test]
    fn synthesis_is_idempotent() {
        let mut model = model_with(&[("cpd00027_e0", "e0"), ("cpd11416_c0", "c0")]);
        let mut auto_sink = IndexSet::new();
        auto_sink.insert("cpd11416_c0".to_string());
        synthesize_boundary_reactions(&mut model, &IndexMap::new(), &auto_sink, EXTRACELLULAR_CLASS);
        let first = model.reactions.len();
        synthesize_boundary_reactions(&mut model, &IndexMap::new(), &auto_sink, EXTRACELLULAR_CLASS);
        assert_eq!(model.reactions.len(), first);
    }

    #[test]
    fn boundary_id_detection() {
        assert!(is_boundary_id("EX_cpd00027_e0"));
        assert!(is_boundary_id("DM_cpd11416_c0"));
        assert!(!is_boundary_id("rxn00459_c0"));
    }
}
