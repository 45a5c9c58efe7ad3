//! Core rust implementation of fluxbridge, a crate for converting workspace-style
//! relational FBA model graphs into in-memory stoichiometric networks and back.

pub mod configuration;
pub mod io;
pub mod metabolic_model;
