//! Process-wide defaults shared by the codecs and the materializer
use std::sync::{LazyLock, RwLock};

pub static CONFIGURATION: LazyLock<RwLock<Configuration>> =
    LazyLock::new(|| RwLock::new(Configuration::default()));

pub struct Configuration {
    /// Default lower flux bound for fully reversible reactions
    pub lower_bound: f64,
    /// Default upper flux bound
    pub upper_bound: f64,
    /// Numerical tolerance used when comparing stoichiometric coefficients
    pub tolerance: f64,
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration {
            lower_bound: -1000.,
            upper_bound: 1000.,
            tolerance: 1e-09,
        }
    }
}
