//! Conversion between the three-level relational gene structure and flat
//! boolean gene reaction rules
//!
//! The relational form is complex -> subunit -> alternative gene features: a
//! reaction is catalyzed if for some complex every subunit role is filled by
//! at least one of its alternative features. Flattened to a boolean rule this
//! reads "OR of (AND of (OR of alternatives))".
//!
//! The reverse mapping (rule string back to complexes) goes through
//! disjunctive normal form and is intentionally lossy: a DNF disjunct cannot
//! distinguish genes that were distinct AND'd subunits from OR'd alternatives
//! within one subunit, so every disjunct becomes a single-subunit complex.
//! This asymmetry is part of the contract, not a defect to repair.

use std::collections::BTreeSet;

use crate::io::gpr_parse::{parse_gpr, GprParseError};
use crate::io::relational::reference::local_id;
use crate::io::relational::schema::{ProteinRecord, SubunitRecord};
use crate::metabolic_model::model::{Gpr, GprOperation};

/// A reaction-scoped protein complex
///
/// Each subunit lists the alternative gene ids (isoenzymes) able to fill that
/// subunit role. Alternatives are kept sorted and deduplicated so generated
/// rules are deterministic and diffable.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProteinComplex {
    pub subunits: Vec<Vec<String>>,
}

impl ProteinComplex {
    /// Build a complex from raw subunit alternative lists, normalizing each
    /// subunit (sorted, deduplicated) and dropping empty subunits
    pub fn new(subunits: Vec<Vec<String>>) -> ProteinComplex {
        let subunits = subunits
            .into_iter()
            .map(|mut alternatives| {
                alternatives.sort();
                alternatives.dedup();
                alternatives
            })
            .filter(|alternatives| !alternatives.is_empty())
            .collect();
        ProteinComplex { subunits }
    }

    /// Decode a relational protein record, resolving each subunit's feature
    /// references to local gene ids
    pub fn from_record(record: &ProteinRecord) -> ProteinComplex {
        let subunits = record
            .model_reaction_protein_subunits
            .iter()
            .map(|subunit| {
                subunit
                    .feature_refs
                    .iter()
                    .map(|feature_ref| local_id(feature_ref).to_string())
                    .collect()
            })
            .collect();
        ProteinComplex::new(subunits)
    }

    /// Encode the complex back to a relational protein record
    ///
    /// Role and provenance fields are not recoverable from a boolean rule and
    /// are emitted with the wire format's placeholder conventions.
    pub fn to_record(&self) -> ProteinRecord {
        let subunits = self
            .subunits
            .iter()
            .map(|alternatives| SubunitRecord {
                role: String::new(),
                triggering: 1,
                optional_subunit: 0,
                note: String::new(),
                feature_refs: alternatives
                    .iter()
                    .map(|gene| format!("~/genome/features/id/{}", gene))
                    .collect(),
            })
            .collect();
        ProteinRecord {
            complex_ref: Some("~/template/complexes/name/cpx00000".to_string()),
            note: String::new(),
            source: String::new(),
            model_reaction_protein_subunits: subunits,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.subunits.is_empty()
    }
}

/// Flatten complexes into a boolean gene reaction rule string
///
/// Subunits are joined with `" and "`; a subunit with more than one
/// alternative is parenthesized and joined with `" or "`; per-complex clauses
/// are joined with `" or "` and parenthesized only when more than one complex
/// is present. Zero complexes yield the empty string, never `"()"`.
pub fn gpr_string(complexes: &[ProteinComplex]) -> String {
    let clauses: Vec<String> = complexes
        .iter()
        .map(|complex| {
            complex
                .subunits
                .iter()
                // Tolerate hand-built complexes with feature-less subunits
                .filter(|alternatives| !alternatives.is_empty())
                .map(|alternatives| {
                    if alternatives.len() > 1 {
                        format!("({})", alternatives.join(" or "))
                    } else {
                        alternatives[0].clone()
                    }
                })
                .collect::<Vec<String>>()
                .join(" and ")
        })
        .filter(|clause| !clause.is_empty())
        .collect();
    match clauses.len() {
        0 => String::new(),
        1 => clauses.into_iter().next().unwrap(),
        _ => clauses
            .iter()
            .map(|clause| format!("({})", clause))
            .collect::<Vec<String>>()
            .join(" or "),
    }
}

/// Every distinct gene id referenced across the complexes
pub fn extract_genes(complexes: &[ProteinComplex]) -> BTreeSet<String> {
    complexes
        .iter()
        .flat_map(|complex| complex.subunits.iter())
        .flat_map(|alternatives| alternatives.iter().cloned())
        .collect()
}

/// Parse a boolean rule string back into a complex set
///
/// The rule is brought into disjunctive normal form; each top-level disjunct
/// becomes one complex with a single subunit holding the disjunct's conjuncts
/// as alternatives. See the module docs for why this is lossy.
pub fn complexes_from_rule(rule: &str) -> Result<Vec<ProteinComplex>, GprParseError> {
    if rule.trim().is_empty() {
        return Ok(Vec::new());
    }
    let gpr = parse_gpr(rule)?;
    let complexes = disjunctive_normal_form(&gpr)
        .into_iter()
        .map(|conjuncts| ProteinComplex::new(vec![conjuncts]))
        .collect();
    Ok(complexes)
}

/// Expand a GPR tree into its DNF disjuncts, each a list of conjunct gene ids
fn disjunctive_normal_form(gpr: &Gpr) -> Vec<Vec<String>> {
    match gpr {
        Gpr::GeneNode(gene) => vec![vec![gene.clone()]],
        Gpr::Operation(GprOperation::Or { left, right }) => {
            let mut disjuncts = disjunctive_normal_form(left);
            disjuncts.extend(disjunctive_normal_form(right));
            disjuncts
        }
        Gpr::Operation(GprOperation::And { left, right }) => {
            let left_disjuncts = disjunctive_normal_form(left);
            let right_disjuncts = disjunctive_normal_form(right);
            let mut disjuncts = Vec::with_capacity(left_disjuncts.len() * right_disjuncts.len());
            for left_conjuncts in &left_disjuncts {
                for right_conjuncts in &right_disjuncts {
                    let mut conjuncts = left_conjuncts.clone();
                    conjuncts.extend(right_conjuncts.iter().cloned());
                    disjuncts.push(conjuncts);
                }
            }
            disjuncts
        }
    }
}
