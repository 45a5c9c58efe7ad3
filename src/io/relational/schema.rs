//! Serde structures for the relational model graph
//!
//! Field names are bit-exact with the workspace JSON so that a materialized
//! model can be regenerated without loss of the fields this engine consumes.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::io::relational::reference::local_id;

/// Top-level relational model document
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct ModelGraph {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub modelcompounds: Vec<CompoundRecord>,
    #[serde(default)]
    pub modelreactions: Vec<ReactionRecord>,
    #[serde(default)]
    pub biomasses: Vec<BiomassRecord>,
    #[serde(default)]
    pub modelcompartments: Vec<CompartmentRecord>,
}

impl ModelGraph {
    pub fn from_json_str(data: &str) -> Result<ModelGraph, serde_json::Error> {
        serde_json::from_str(data)
    }
}

/// A model compartment instance, e.g. `{"id": "c0", "label": "Cytosol_0"}`
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct CompartmentRecord {
    pub id: String,
    #[serde(default)]
    pub label: Option<String>,
}

/// A relational compound record
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct CompoundRecord {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    /// `"null"` and `"*"` are sentinels for "no formula"
    #[serde(default)]
    pub formula: Option<String>,
    /// May arrive as a number or a numeric string
    #[serde(default)]
    pub charge: Option<Value>,
    #[serde(default)]
    pub compound_ref: Option<String>,
    #[serde(default)]
    pub modelcompartment_ref: Option<String>,
    /// External database name mapped to external ids
    #[serde(default)]
    pub dblinks: IndexMap<String, Vec<String>>,
}

impl CompoundRecord {
    /// Charge coerced to an integer, tolerating float and string encodings
    pub fn charge_as_int(&self) -> Option<i32> {
        match self.charge.as_ref()? {
            Value::Number(n) => n.as_f64().map(|v| v as i32),
            Value::String(s) => s.parse::<f64>().ok().map(|v| v as i32),
            _ => None,
        }
    }

    /// Compartment token from the trailing segment of `modelcompartment_ref`
    pub fn compartment_token(&self) -> Option<&str> {
        self.modelcompartment_ref.as_deref().map(local_id)
    }
}

/// A relational reaction record
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct ReactionRecord {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    /// `">"`, `"<"` or `"="`
    #[serde(default)]
    pub direction: Option<String>,
    #[serde(default)]
    pub maxrevflux: Option<f64>,
    #[serde(default)]
    pub maxforflux: Option<f64>,
    #[serde(default, rename = "modelReactionReagents")]
    pub model_reaction_reagents: Vec<ReagentRecord>,
    #[serde(default, rename = "modelReactionProteins")]
    pub model_reaction_proteins: Vec<ProteinRecord>,
    #[serde(default)]
    pub modelcompartment_ref: Option<String>,
    #[serde(default)]
    pub reaction_ref: Option<String>,
}

/// One stoichiometry term: a compound reference and its signed coefficient
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct ReagentRecord {
    pub modelcompound_ref: String,
    pub coefficient: f64,
}

/// The protein level of the relational gene structure, one entry per complex
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct ProteinRecord {
    #[serde(default)]
    pub complex_ref: Option<String>,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub source: String,
    #[serde(default, rename = "modelReactionProteinSubunits")]
    pub model_reaction_protein_subunits: Vec<SubunitRecord>,
}

/// A complex subunit; `feature_refs` lists the alternative gene features
/// (isoenzymes) able to fill this subunit role
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct SubunitRecord {
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub triggering: u8,
    #[serde(default, rename = "optionalSubunit")]
    pub optional_subunit: u8,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub feature_refs: Vec<String>,
}

/// A biomass composition record
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct BiomassRecord {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub biomasscompounds: Vec<ReagentRecord>,
}

/// One compound of a media definition
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct MediaCompoundRecord {
    pub compound_ref: String,
    #[serde(rename = "minFlux")]
    pub min_flux: f64,
    #[serde(rename = "maxFlux")]
    pub max_flux: f64,
}

/// Derive exchange bound constraints from media compounds
///
/// Media fluxes are recorded from the environment's perspective, so signs are
/// inverted: `lb = -maxFlux`, `ub = -minFlux`. Keys are root compound ids
/// (no compartment suffix).
pub fn media_constraints(mediacompounds: &[MediaCompoundRecord]) -> IndexMap<String, (f64, f64)> {
    let mut constraints = IndexMap::new();
    for mediacompound in mediacompounds {
        let compound_id = local_id(&mediacompound.compound_ref).to_string();
        constraints.insert(
            compound_id,
            (-mediacompound.max_flux, -mediacompound.min_flux),
        );
    }
    constraints
}
