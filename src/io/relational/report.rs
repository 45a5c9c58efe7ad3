//! Per-call accumulator for recoverable materialization diagnostics
//!
//! Every warning is recorded here and mirrored to `tracing`; nothing in the
//! conversion pipeline keeps process-wide mutable state, so independent
//! models can be materialized from separate threads with separate reports.

use thiserror::Error;

/// A recoverable condition encountered while converting a model
///
/// None of these abort the conversion; the affected record is skipped,
/// renamed or defaulted as described per variant.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum BuildWarning {
    /// A compound record repeated an already-indexed metabolite id; the first
    /// occurrence was kept
    #[error("duplicate compound: {0}")]
    DuplicateMetabolite(String),
    /// A reaction record repeated an already-indexed reaction id
    #[error("duplicate reaction: {0}")]
    DuplicateReaction(String),
    /// A duplicate reaction was kept under a renamed id
    #[error("copy reaction: [{original}] -> [{renamed}]")]
    ReactionRenamed { original: String, renamed: String },
    /// A duplicate reaction was dropped under the reject policy
    #[error("dropped duplicate reaction: {0}")]
    ReactionDropped(String),
    /// A stoichiometry or biomass term referenced a metabolite missing from the index
    #[error("[{context}] undeclared species: {metabolite_id}")]
    UndeclaredSpecies {
        context: String,
        metabolite_id: String,
    },
    /// A reaction record carried neither flux capacities nor a direction symbol
    #[error("[{0}] no flux constraints present, defaulting to fully reversible")]
    MissingFluxConstraints(String),
    /// Decoded or supplied bounds had lower > upper and were coerced to (0, 0)
    #[error("invalid bounds ({lower}, {upper}), coerced to (0, 0)")]
    InvalidBounds { lower: f64, upper: f64 },
    /// No reaction in the graph was flagged as biomass, the model has no objective
    #[error("no biomass reaction found, model has no objective")]
    NoObjective,
}

/// Warnings collected over a single conversion call
#[derive(Debug, Default)]
pub struct BuildReport {
    pub warnings: Vec<BuildWarning>,
}

impl BuildReport {
    pub fn new() -> Self {
        BuildReport::default()
    }

    /// Record a warning and mirror it to the tracing subscriber
    pub fn warn(&mut self, warning: BuildWarning) {
        tracing::warn!("{}", warning);
        self.warnings.push(warning);
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Whether a warning of the same value was recorded
    pub fn contains(&self, warning: &BuildWarning) -> bool {
        self.warnings.contains(warning)
    }
}
