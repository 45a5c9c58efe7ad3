//! Materialization of a relational model graph into a [`Model`]
//!
//! The build proceeds in a fixed order: metabolites, reactions, genes,
//! boundary reactions, objective selection. Each [`ModelBuilder`] owns all of
//! its indices and counters for the duration of one build, so independent
//! models can be materialized concurrently with fresh builders.

use indexmap::{IndexMap, IndexSet};
use serde_json::Value;
use thiserror::Error;

use crate::configuration::CONFIGURATION;
use crate::io::gpr_parse::{parse_gpr, GprParseError};
use crate::io::relational::boundary::synthesize_boundary_reactions;
use crate::io::relational::bounds::{decode_bounds, Direction};
use crate::io::relational::compartment::EXTRACELLULAR_CLASS;
use crate::io::relational::gpr::{extract_genes, gpr_string, ProteinComplex};
use crate::io::relational::reference::local_id;
use crate::io::relational::report::{BuildReport, BuildWarning};
use crate::io::relational::schema::{
    BiomassRecord, CompoundRecord, ModelGraph, ReactionRecord, ReagentRecord,
};
use crate::io::relational::{
    SBO_ANNOTATION, SBO_BIOCHEMICAL_REACTION, SBO_BIOMASS_PRODUCTION, SBO_GENE,
    SBO_SIMPLE_CHEMICAL,
};
use crate::metabolic_model::gene::Gene;
use crate::metabolic_model::metabolite::{Metabolite, MetaboliteBuilder};
use crate::metabolic_model::model::Model;
use crate::metabolic_model::reaction::{Reaction, ReactionBuilder};

/// What to do when a reaction record repeats an already-indexed id
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// Keep the later reaction under a `_copyN` suffixed id
    #[default]
    Rename,
    /// Drop the later reaction
    Reject,
}

#[derive(Debug, Error)]
pub enum MaterializeError {
    /// A gene reaction rule could not be parsed back into an AST
    #[error("invalid gene reaction rule: {0}")]
    Gpr(#[from] GprParseError),
}

// region id normalization

/// Normalize a compound id: strip source-system prefixes and escape hyphens
pub fn normalize_compound_id(raw: &str) -> String {
    let stripped = raw
        .strip_prefix("M_")
        .or_else(|| raw.strip_prefix("M-"))
        .unwrap_or(raw);
    escape_id(stripped, "Species")
}

/// Normalize a reaction id: strip source-system prefixes and escape hyphens
pub fn normalize_reaction_id(raw: &str) -> String {
    let stripped = raw
        .strip_prefix("R_")
        .or_else(|| raw.strip_prefix("R-"))
        .unwrap_or(raw);
    escape_id(stripped, "Reaction")
}

/// Normalize a gene id: strip the `G_` source-system prefix and escape hyphens
pub fn normalize_gene_id(raw: &str) -> String {
    let stripped = raw.strip_prefix("G_").unwrap_or(raw);
    escape_id(stripped, "Gene")
}

fn escape_id(id: &str, kind: &str) -> String {
    if id.contains('-') {
        let escaped = id.replace('-', "__DASH__");
        tracing::debug!("[{}] rename: [{}] -> [{}]", kind, id, escaped);
        escaped
    } else {
        id.to_string()
    }
}

// endregion id normalization

/// Default auto-sink compounds (biomass byproducts that must be drainable)
pub const DEFAULT_AUTO_SINK: [&str; 3] = ["cpd02701_c0", "cpd11416_c0", "cpd15302_c0"];

/// Per-call materializer for one relational model graph
pub struct ModelBuilder {
    graph: ModelGraph,
    media_constraints: IndexMap<String, (f64, f64)>,
    auto_sink: IndexSet<String>,
    gene_aliases: IndexMap<String, IndexMap<String, Value>>,
    duplicate_policy: DuplicatePolicy,
    extracellular_class: char,
    // per-build state
    pending_genes: IndexSet<String>,
    reaction_copy_number: IndexMap<String, u32>,
    biomass_reaction_ids: Vec<String>,
    report: BuildReport,
}

impl ModelBuilder {
    pub fn new(graph: ModelGraph) -> ModelBuilder {
        ModelBuilder {
            graph,
            media_constraints: IndexMap::new(),
            auto_sink: DEFAULT_AUTO_SINK.iter().map(|id| id.to_string()).collect(),
            gene_aliases: IndexMap::new(),
            duplicate_policy: DuplicatePolicy::default(),
            extracellular_class: EXTRACELLULAR_CLASS,
            pending_genes: IndexSet::new(),
            reaction_copy_number: IndexMap::new(),
            biomass_reaction_ids: Vec::new(),
            report: BuildReport::new(),
        }
    }

    /// Constrain exchange bounds by a medium (root compound id to bounds)
    pub fn with_media(mut self, media_constraints: IndexMap<String, (f64, f64)>) -> Self {
        self.media_constraints = media_constraints;
        self
    }

    /// Add a compound to the auto-sink set
    pub fn with_sink(mut self, metabolite_id: &str) -> Self {
        self.auto_sink.insert(metabolite_id.to_string());
        self
    }

    /// Replace the auto-sink set entirely
    pub fn with_auto_sink(mut self, auto_sink: IndexSet<String>) -> Self {
        self.auto_sink = auto_sink;
        self
    }

    /// Merge externally supplied per-gene alias annotations, keyed by raw
    /// feature id
    pub fn with_gene_aliases(
        mut self,
        gene_aliases: IndexMap<String, IndexMap<String, Value>>,
    ) -> Self {
        self.gene_aliases = gene_aliases;
        self
    }

    pub fn with_duplicate_policy(mut self, duplicate_policy: DuplicatePolicy) -> Self {
        self.duplicate_policy = duplicate_policy;
        self
    }

    /// Materialize the graph into a model, in the fixed order metabolites ->
    /// reactions -> genes -> boundary reactions -> objective
    pub fn build(mut self) -> Result<(Model, BuildReport), MaterializeError> {
        let mut model = Model::new_empty();
        model.id = self.graph.id.clone();
        model.name = self.graph.name.clone();
        if !self.graph.modelcompartments.is_empty() {
            let compartments: IndexMap<String, String> = self
                .graph
                .modelcompartments
                .iter()
                .map(|compartment| {
                    (
                        compartment.id.clone(),
                        compartment
                            .label
                            .clone()
                            .unwrap_or_else(|| compartment.id.clone()),
                    )
                })
                .collect();
            model.compartments = Some(compartments);
        }

        // Pass 1: metabolites, indexed by normalized id, first occurrence wins
        let modelcompounds = std::mem::take(&mut self.graph.modelcompounds);
        for compound in &modelcompounds {
            let metabolite = self.convert_compound(compound);
            if model.metabolites.contains_key(&metabolite.id) {
                self.report
                    .warn(BuildWarning::DuplicateMetabolite(metabolite.id));
                continue;
            }
            model.add_metabolite(metabolite);
        }
        tracing::info!(metabolites = model.metabolites.len(), "pass 1 complete");

        // Pass 2: reactions, stoichiometry resolved against the pass-1 index
        let modelreactions = std::mem::take(&mut self.graph.modelreactions);
        for record in &modelreactions {
            let reaction = self.convert_reaction(record, &model)?;
            self.add_reaction(&mut model, reaction);
        }
        let biomasses = std::mem::take(&mut self.graph.biomasses);
        for biomass in &biomasses {
            let reaction = self.convert_biomass(biomass, &model);
            if let Some(inserted_id) = self.add_reaction(&mut model, reaction) {
                self.biomass_reaction_ids.push(inserted_id);
            }
        }
        tracing::info!(reactions = model.reactions.len(), "pass 2 complete");

        // Pass 3: genes, one per unique pending id
        let pending_genes = std::mem::take(&mut self.pending_genes);
        for raw_id in &pending_genes {
            let mut annotation = IndexMap::new();
            annotation.insert(
                SBO_ANNOTATION.to_string(),
                Value::String(SBO_GENE.to_string()),
            );
            if let Some(aliases) = self.gene_aliases.get(raw_id) {
                annotation.extend(aliases.clone());
            }
            let mut gene = Gene::new(normalize_gene_id(raw_id), Some(raw_id.clone()));
            gene.annotation = annotation;
            model.add_gene(gene);
        }

        // Boundary reactions, then the objective; boundary reactions are
        // synthesized after objective candidates were collected and are never
        // eligible themselves
        synthesize_boundary_reactions(
            &mut model,
            &self.media_constraints,
            &self.auto_sink,
            self.extracellular_class,
        );
        match self.biomass_reaction_ids.first() {
            Some(biomass_id) => {
                tracing::info!("default biomass: [{}]", biomass_id);
                model
                    .set_objective(biomass_id)
                    .expect("biomass reaction was inserted above");
            }
            None => self.report.warn(BuildWarning::NoObjective),
        }

        Ok((model, self.report))
    }

    fn convert_compound(&mut self, compound: &CompoundRecord) -> Metabolite {
        let id = normalize_compound_id(&compound.id);
        // "null" and "*" are wire sentinels for a missing formula
        let formula = compound
            .formula
            .clone()
            .filter(|formula| formula != "null" && formula != "*");
        let mut annotation: IndexMap<String, Value> = IndexMap::new();
        annotation.insert(
            SBO_ANNOTATION.to_string(),
            Value::String(SBO_SIMPLE_CHEMICAL.to_string()),
        );
        if id.starts_with("cpd") {
            if let Some(root) = id.split('_').next() {
                annotation.insert("seed.compound".to_string(), Value::String(root.to_string()));
            }
        }
        for (database, external_ids) in &compound.dblinks {
            annotation.insert(
                database.clone(),
                Value::Array(
                    external_ids
                        .iter()
                        .map(|external| Value::String(external.clone()))
                        .collect(),
                ),
            );
        }
        MetaboliteBuilder::default()
            .id(id)
            .name(compound.name.clone())
            .compartment(compound.compartment_token().map(str::to_string))
            .charge(compound.charge_as_int().unwrap_or_default())
            .formula(formula)
            .annotation(annotation)
            .build()
            .expect("metabolite builder with id set cannot fail")
    }

    fn convert_reaction(
        &mut self,
        record: &ReactionRecord,
        model: &Model,
    ) -> Result<Reaction, MaterializeError> {
        let id = normalize_reaction_id(&record.id);
        let direction = record
            .direction
            .as_deref()
            .and_then(Direction::from_symbol);
        let (lower_bound, upper_bound) = decode_bounds(
            &id,
            record.maxrevflux,
            record.maxforflux,
            direction,
            &mut self.report,
        );

        let metabolites = self.resolve_stoichiometry(&id, &record.model_reaction_reagents, model);

        // Gene ids are normalized before rule generation so that ids the rule
        // grammar cannot carry (e.g. hyphenated locus tags) stay parseable
        let complexes: Vec<ProteinComplex> = record
            .model_reaction_proteins
            .iter()
            .map(|protein| {
                let complex = ProteinComplex::from_record(protein);
                ProteinComplex::new(
                    complex
                        .subunits
                        .into_iter()
                        .map(|alternatives| {
                            alternatives
                                .iter()
                                .map(|gene| normalize_gene_id(gene))
                                .collect()
                        })
                        .collect(),
                )
            })
            .filter(|complex| !complex.is_empty())
            .collect();
        self.pending_genes.extend(extract_genes(&complexes));
        let rule = gpr_string(&complexes);
        let gpr = if rule.is_empty() {
            None
        } else {
            Some(parse_gpr(&rule)?)
        };

        let mut annotation: IndexMap<String, Value> = IndexMap::new();
        annotation.insert(
            SBO_ANNOTATION.to_string(),
            Value::String(SBO_BIOCHEMICAL_REACTION.to_string()),
        );
        if id.starts_with("rxn") {
            if let Some(root) = id.split('_').next() {
                annotation.insert("seed.reaction".to_string(), Value::String(root.to_string()));
            }
        }

        Ok(ReactionBuilder::default()
            .id(id)
            .name(record.name.clone())
            .metabolites(metabolites)
            .gpr(gpr)
            .lower_bound(lower_bound)
            .upper_bound(upper_bound)
            .annotation(annotation)
            .build()
            .expect("reaction builder with id set cannot fail"))
    }

    fn convert_biomass(&mut self, biomass: &BiomassRecord, model: &Model) -> Reaction {
        let id = normalize_reaction_id(&biomass.id);
        let metabolites = self.resolve_stoichiometry(&id, &biomass.biomasscompounds, model);
        let mut annotation: IndexMap<String, Value> = IndexMap::new();
        annotation.insert(
            SBO_ANNOTATION.to_string(),
            Value::String(SBO_BIOMASS_PRODUCTION.to_string()),
        );
        let upper_bound = CONFIGURATION.read().unwrap().upper_bound;
        ReactionBuilder::default()
            .id(id)
            .name(biomass.name.clone())
            .metabolites(metabolites)
            .lower_bound(0.0)
            .upper_bound(upper_bound)
            .annotation(annotation)
            .build()
            .expect("reaction builder with id set cannot fail")
    }

    /// Resolve reagent references against the metabolite index, dropping
    /// terms whose target is missing
    fn resolve_stoichiometry(
        &mut self,
        context: &str,
        reagents: &[ReagentRecord],
        model: &Model,
    ) -> IndexMap<String, f64> {
        let mut stoichiometry = IndexMap::new();
        for reagent in reagents {
            let metabolite_id = normalize_compound_id(local_id(&reagent.modelcompound_ref));
            if model.metabolites.contains_key(&metabolite_id) {
                stoichiometry.insert(metabolite_id, reagent.coefficient);
            } else {
                self.report.warn(BuildWarning::UndeclaredSpecies {
                    context: context.to_string(),
                    metabolite_id,
                });
            }
        }
        stoichiometry
    }

    /// Insert a reaction, applying the duplicate policy; returns the id the
    /// reaction was actually stored under, or None when it was dropped
    fn add_reaction(&mut self, model: &mut Model, mut reaction: Reaction) -> Option<String> {
        if !model.reactions.contains_key(&reaction.id) {
            let id = reaction.id.clone();
            model.add_reaction(reaction);
            return Some(id);
        }
        self.report
            .warn(BuildWarning::DuplicateReaction(reaction.id.clone()));
        match self.duplicate_policy {
            DuplicatePolicy::Rename => {
                // The suffixed id may itself already be taken by an input
                // record, keep counting until a free id is found
                let renamed = loop {
                    let counter = self
                        .reaction_copy_number
                        .entry(reaction.id.clone())
                        .or_insert(1);
                    let candidate = format!("{}_copy{}", reaction.id, counter);
                    *counter += 1;
                    if !model.reactions.contains_key(&candidate) {
                        break candidate;
                    }
                };
                self.report.warn(BuildWarning::ReactionRenamed {
                    original: reaction.id.clone(),
                    renamed: renamed.clone(),
                });
                reaction.id = renamed.clone();
                model.add_reaction(reaction);
                Some(renamed)
            }
            DuplicatePolicy::Reject => {
                self.report
                    .warn(BuildWarning::ReactionDropped(reaction.id));
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph(data: &str) -> ModelGraph {
        ModelGraph::from_json_str(data).unwrap()
    }

    const SMALL_GRAPH: &str = r#"{
        "id": "test_model",
        "name": "Test Model",
        "modelcompartments": [
            {"id": "c0", "label": "Cytosol_0"},
            {"id": "e0", "label": "Extracellular_0"}
        ],
        "modelcompounds": [
            {"id": "cpd00027_c0", "name": "D-Glucose_c0", "formula": "C6H12O6",
             "charge": 0, "modelcompartment_ref": "~/modelcompartments/id/c0"},
            {"id": "cpd00027_e0", "name": "D-Glucose_e0", "formula": "C6H12O6",
             "charge": 0, "modelcompartment_ref": "~/modelcompartments/id/e0"}
        ],
        "modelreactions": [
            {"id": "rxn05573_c0", "name": "Glucose transport",
             "direction": "=", "maxrevflux": 1000000, "maxforflux": 1000000,
             "modelReactionReagents": [
                {"modelcompound_ref": "~/modelcompounds/id/cpd00027_e0", "coefficient": -1},
                {"modelcompound_ref": "~/modelcompounds/id/cpd00027_c0", "coefficient": 1}
             ],
             "modelReactionProteins": [
                {"note": "", "source": "", "modelReactionProteinSubunits": [
                    {"role": "", "triggering": 1, "optionalSubunit": 0, "note": "",
                     "feature_refs": ["~/genome/features/id/b2417"]}
                ]}
             ]}
        ],
        "biomasses": [
            {"id": "bio1", "name": "Biomass", "biomasscompounds": [
                {"modelcompound_ref": "~/modelcompounds/id/cpd00027_c0", "coefficient": -1}
            ]}
        ]
    }"#;

    #[test]
    fn end_to_end_assembly() {
        let (model, report) = ModelBuilder::new(graph(SMALL_GRAPH)).build().unwrap();

        assert_eq!(model.metabolites.len(), 2);
        // 1 metabolic + 1 biomass + 1 exchange for the extracellular glucose
        assert_eq!(model.reactions.len(), 3);
        assert!(model.reactions.contains_key("rxn05573_c0"));
        assert!(model.reactions.contains_key("bio1"));
        assert!(model.reactions.contains_key("EX_cpd00027_e0"));

        // Transport reaction decoded from sentinel capacities + "="
        let transport = &model.reactions["rxn05573_c0"];
        assert_eq!((transport.lower_bound, transport.upper_bound), (-1000.0, 1000.0));
        assert_eq!(transport.metabolites["cpd00027_e0"], -1.0);
        assert_eq!(transport.gene_reaction_rule(), "b2417");

        // Exchange defaults to fully reversible (no media configured)
        let exchange = &model.reactions["EX_cpd00027_e0"];
        assert_eq!((exchange.lower_bound, exchange.upper_bound), (-1000.0, 1000.0));

        // Biomass flagged reaction became the objective
        assert_eq!(model.objective_reaction_id(), Some("bio1"));
        let biomass = &model.reactions["bio1"];
        assert_eq!((biomass.lower_bound, biomass.upper_bound), (0.0, 1000.0));

        // One gene, materialized lazily from the reaction rule
        assert_eq!(model.genes.len(), 1);
        assert_eq!(model.genes["b2417"].name.as_deref(), Some("b2417"));

        assert!(report.is_empty());
        assert_eq!(
            model.compartments.as_ref().unwrap()["e0"],
            "Extracellular_0"
        );
    }

    #[test]
    fn duplicate_compounds_keep_first_occurrence() {
        let data = r#"{
            "id": "m",
            "modelcompounds": [
                {"id": "cpd00001_c0", "name": "H2O", "charge": 0,
                 "modelcompartment_ref": "~/modelcompartments/id/c0"},
                {"id": "cpd00001_c0", "name": "Water (duplicate)", "charge": 0,
                 "modelcompartment_ref": "~/modelcompartments/id/c0"}
            ]
        }"#;
        let (model, report) = ModelBuilder::new(graph(data)).build().unwrap();
        assert_eq!(model.metabolites.len(), 1);
        assert_eq!(
            model.metabolites["cpd00001_c0"].name.as_deref(),
            Some("H2O")
        );
        assert!(report.contains(&BuildWarning::DuplicateMetabolite(
            "cpd00001_c0".to_string()
        )));
    }

    #[test]
    fn duplicate_reactions_renamed_with_copy_suffix() {
        let data = r#"{
            "id": "m",
            "modelcompounds": [
                {"id": "cpd00001_c0", "modelcompartment_ref": "~/modelcompartments/id/c0"}
            ],
            "modelreactions": [
                {"id": "rxn00001_c0", "direction": ">",
                 "maxrevflux": 1000000, "maxforflux": 1000000,
                 "modelReactionReagents": [
                    {"modelcompound_ref": "~/modelcompounds/id/cpd00001_c0", "coefficient": -1}]},
                {"id": "rxn00001_c0", "direction": ">",
                 "maxrevflux": 1000000, "maxforflux": 1000000,
                 "modelReactionReagents": [
                    {"modelcompound_ref": "~/modelcompounds/id/cpd00001_c0", "coefficient": -1}]}
            ]
        }"#;
        let (model, report) = ModelBuilder::new(graph(data)).build().unwrap();
        assert_eq!(model.reactions.len(), 2);
        assert!(model.reactions.contains_key("rxn00001_c0"));
        assert!(model.reactions.contains_key("rxn00001_c0_copy1"));
        assert!(report.contains(&BuildWarning::ReactionRenamed {
            original: "rxn00001_c0".to_string(),
            renamed: "rxn00001_c0_copy1".to_string(),
        }));
    }

    #[test]
    fn duplicate_reactions_dropped_under_reject_policy() {
        let data = r#"{
            "id": "m",
            "modelreactions": [
                {"id": "rxn00001_c0", "direction": ">"},
                {"id": "rxn00001_c0", "direction": "<"}
            ]
        }"#;
        let (model, report) = ModelBuilder::new(graph(data))
            .with_duplicate_policy(DuplicatePolicy::Reject)
            .build()
            .unwrap();
        assert_eq!(model.reactions.len(), 1);
        // First occurrence wins, so the kept reaction is forward-only
        assert_eq!(model.reactions["rxn00001_c0"].lower_bound, 0.0);
        assert!(report.contains(&BuildWarning::ReactionDropped(
            "rxn00001_c0".to_string()
        )));
    }

    #[test]
    fn undeclared_species_dropped_with_warning() {
        let data = r#"{
            "id": "m",
            "modelcompounds": [
                {"id": "cpd00001_c0", "modelcompartment_ref": "~/modelcompartments/id/c0"}
            ],
            "modelreactions": [
                {"id": "rxn00001_c0", "direction": "=",
                 "modelReactionReagents": [
                    {"modelcompound_ref": "~/modelcompounds/id/cpd00001_c0", "coefficient": -1},
                    {"modelcompound_ref": "~/modelcompounds/id/cpd99999_c0", "coefficient": 1}]}
            ]
        }"#;
        let (model, report) = ModelBuilder::new(graph(data)).build().unwrap();
        let reaction = &model.reactions["rxn00001_c0"];
        assert_eq!(reaction.metabolites.len(), 1);
        assert!(report.contains(&BuildWarning::UndeclaredSpecies {
            context: "rxn00001_c0".to_string(),
            metabolite_id: "cpd99999_c0".to_string(),
        }));
    }

    #[test]
    fn graph_without_biomass_has_no_objective() {
        let data = r#"{"id": "m", "modelcompounds": [], "modelreactions": []}"#;
        let (model, report) = ModelBuilder::new(graph(data)).build().unwrap();
        assert!(model.objective_reaction_id().is_none());
        assert!(report.contains(&BuildWarning::NoObjective));
    }

    #[test]
    fn id_normalization() {
        assert_eq!(normalize_compound_id("M_cpd00001_c0"), "cpd00001_c0");
        assert_eq!(normalize_compound_id("M-cpd00001_c0"), "cpd00001_c0");
        assert_eq!(normalize_compound_id("glc-D_c0"), "glc__DASH__D_c0");
        assert_eq!(normalize_reaction_id("R_rxn00001_c0"), "rxn00001_c0");
        assert_eq!(normalize_reaction_id("ATP-synthase"), "ATP__DASH__synthase");
        assert_eq!(normalize_gene_id("G_b2417"), "b2417");
        assert_eq!(normalize_gene_id("b2417"), "b2417");
        assert_eq!(normalize_gene_id("ABC-123"), "ABC__DASH__123");
    }

    #[test]
    fn hyphenated_gene_ids_survive_rule_generation() {
        let data = r#"{
            "id": "m",
            "modelcompounds": [
                {"id": "cpd00001_c0", "modelcompartment_ref": "~/modelcompartments/id/c0"}
            ],
            "modelreactions": [
                {"id": "rxn00001_c0", "direction": "=",
                 "modelReactionReagents": [
                    {"modelcompound_ref": "~/modelcompounds/id/cpd00001_c0", "coefficient": -1}],
                 "modelReactionProteins": [
                    {"note": "", "source": "", "modelReactionProteinSubunits": [
                        {"role": "", "triggering": 1, "optionalSubunit": 0, "note": "",
                         "feature_refs": ["~/genome/features/id/ABC-123"]}]}
                 ]}
            ]
        }"#;
        let (model, _) = ModelBuilder::new(graph(data)).build().unwrap();
        let reaction = &model.reactions["rxn00001_c0"];
        assert_eq!(reaction.gene_reaction_rule(), "ABC__DASH__123");
        assert!(model.genes.contains_key("ABC__DASH__123"));
    }

    #[test]
    fn rename_skips_copy_ids_already_in_use() {
        // An input that already contains the first copy id must not be
        // overwritten by the renamed duplicate
        let data = r#"{
            "id": "m",
            "modelreactions": [
                {"id": "rxn00001_c0", "direction": ">"},
                {"id": "rxn00001_c0_copy1", "direction": "<"},
                {"id": "rxn00001_c0", "direction": "="}
            ]
        }"#;
        let (model, report) = ModelBuilder::new(graph(data)).build().unwrap();
        assert_eq!(model.reactions.len(), 3);
        // The pre-existing copy id keeps its own record
        assert_eq!(model.reactions["rxn00001_c0_copy1"].upper_bound, 0.0);
        assert!(model.reactions.contains_key("rxn00001_c0_copy2"));
        assert!(report.contains(&BuildWarning::ReactionRenamed {
            original: "rxn00001_c0".to_string(),
            renamed: "rxn00001_c0_copy2".to_string(),
        }));
    }

    #[test]
    fn gene_aliases_merged() {
        let data = r#"{
            "id": "m",
            "modelcompounds": [
                {"id": "cpd00001_c0", "modelcompartment_ref": "~/modelcompartments/id/c0"}
            ],
            "modelreactions": [
                {"id": "rxn00001_c0", "direction": "=",
                 "modelReactionReagents": [
                    {"modelcompound_ref": "~/modelcompounds/id/cpd00001_c0", "coefficient": -1}],
                 "modelReactionProteins": [
                    {"note": "", "source": "", "modelReactionProteinSubunits": [
                        {"role": "", "triggering": 1, "optionalSubunit": 0, "note": "",
                         "feature_refs": ["~/genome/features/id/b2417"]}]}
                 ]}
            ]
        }"#;
        let mut aliases = IndexMap::new();
        let mut b2417 = IndexMap::new();
        b2417.insert(
            "ncbigene".to_string(),
            Value::String("946880".to_string()),
        );
        aliases.insert("b2417".to_string(), b2417);
        let (model, _) = ModelBuilder::new(graph(data))
            .with_gene_aliases(aliases)
            .build()
            .unwrap();
        let gene = &model.genes["b2417"];
        assert_eq!(gene.annotation["ncbigene"], Value::String("946880".to_string()));
        assert_eq!(gene.annotation[SBO_ANNOTATION], Value::String(SBO_GENE.to_string()));
    }
}
