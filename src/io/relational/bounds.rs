//! Bidirectional conversion between signed flux bounds and the relational
//! capacity-pair + direction-symbol encoding
//!
//! The relational form stores two non-negative capacities (`maxrevflux`,
//! `maxforflux`) and a direction symbol. A magnitude of 1 000 000 on both
//! capacities is a sentinel meaning "unbounded"; bounds are then derived from
//! the symbol alone. Literal capacities are otherwise trusted even when they
//! happen to equal the sentinel value.

use crate::configuration::CONFIGURATION;
use crate::io::relational::report::{BuildReport, BuildWarning};

/// Capacity magnitude treated as "unbounded" when present on both sides
/// together with a direction symbol
pub const UNBOUNDED_FLUX: f64 = 1_000_000.0;

/// Direction symbol of a relational reaction record
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// `>`: forward only
    Forward,
    /// `<`: reverse only
    Reverse,
    /// `=`: reversible
    Reversible,
}

impl Direction {
    pub fn from_symbol(symbol: &str) -> Option<Direction> {
        match symbol {
            ">" => Some(Direction::Forward),
            "<" => Some(Direction::Reverse),
            "=" => Some(Direction::Reversible),
            _ => None,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Direction::Forward => ">",
            Direction::Reverse => "<",
            Direction::Reversible => "=",
        }
    }
}

/// Bounds derived from a direction symbol alone
fn direction_bounds(direction: Direction) -> (f64, f64) {
    let configuration = CONFIGURATION.read().unwrap();
    match direction {
        Direction::Forward => (0.0, configuration.upper_bound),
        Direction::Reverse => (configuration.lower_bound, 0.0),
        Direction::Reversible => (configuration.lower_bound, configuration.upper_bound),
    }
}

/// Decode relational flux constraints into `(lower_bound, upper_bound)`
///
/// `context` names the record being decoded and is only used in diagnostics.
/// A record with neither capacities nor a direction symbol defaults to fully
/// reversible and records a warning; decoded bounds with `lower > upper`
/// (possible with out-of-range capacity input) are coerced to `(0, 0)`.
pub fn decode_bounds(
    context: &str,
    max_rev_flux: Option<f64>,
    max_for_flux: Option<f64>,
    direction: Option<Direction>,
    report: &mut BuildReport,
) -> (f64, f64) {
    let (lower, upper) = match (max_rev_flux, max_for_flux) {
        (Some(rev), Some(fwd)) => {
            if rev == UNBOUNDED_FLUX && fwd == UNBOUNDED_FLUX && direction.is_some() {
                direction_bounds(direction.unwrap())
            } else {
                (-rev, fwd)
            }
        }
        _ => match direction {
            Some(direction) => direction_bounds(direction),
            None => {
                report.warn(BuildWarning::MissingFluxConstraints(context.to_string()));
                direction_bounds(Direction::Reversible)
            }
        },
    };
    if lower > upper {
        report.warn(BuildWarning::InvalidBounds { lower, upper });
        return (0.0, 0.0);
    }
    (lower, upper)
}

/// Encode signed flux bounds as literal `(maxrevflux, maxforflux, direction)`
///
/// The degenerate `lower > upper` input is invalid and maps to `(0, 0, "=")`
/// with a recorded warning rather than an error.
pub fn encode_bounds(lower: f64, upper: f64, report: &mut BuildReport) -> (f64, f64, Direction) {
    if lower > upper {
        report.warn(BuildWarning::InvalidBounds { lower, upper });
        return (0.0, 0.0, Direction::Reversible);
    }
    let max_rev_flux = if lower < 0.0 { -lower } else { 0.0 };
    let max_for_flux = if upper > 0.0 { upper } else { 0.0 };
    let direction = if max_rev_flux == 0.0 && max_for_flux > 0.0 {
        Direction::Forward
    } else if max_for_flux == 0.0 && max_rev_flux > 0.0 {
        Direction::Reverse
    } else {
        Direction::Reversible
    };
    (max_rev_flux, max_for_flux, direction)
}

/// Encode bounds under the sentinel convention
///
/// Bounds that coincide with the configured default magnitudes are written as
/// unbounded capacities with the direction symbol carrying the information,
/// matching what decode expects from sentinel-encoded records. All other
/// bounds are encoded literally.
pub fn encode_bounds_sentinel(
    lower: f64,
    upper: f64,
    report: &mut BuildReport,
) -> (f64, f64, Direction) {
    let (default_lower, default_upper) = {
        let configuration = CONFIGURATION.read().unwrap();
        (configuration.lower_bound, configuration.upper_bound)
    };
    if lower == default_lower && upper == default_upper {
        return (UNBOUNDED_FLUX, UNBOUNDED_FLUX, Direction::Reversible);
    }
    if lower == 0.0 && upper == default_upper {
        return (UNBOUNDED_FLUX, UNBOUNDED_FLUX, Direction::Forward);
    }
    if lower == default_lower && upper == 0.0 {
        return (UNBOUNDED_FLUX, UNBOUNDED_FLUX, Direction::Reverse);
    }
    encode_bounds(lower, upper, report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_capacities_defer_to_direction() {
        let mut report = BuildReport::new();
        assert_eq!(
            decode_bounds(
                "rxn1",
                Some(UNBOUNDED_FLUX),
                Some(UNBOUNDED_FLUX),
                Some(Direction::Forward),
                &mut report
            ),
            (0.0, 1000.0)
        );
        assert_eq!(
            decode_bounds(
                "rxn1",
                Some(UNBOUNDED_FLUX),
                Some(UNBOUNDED_FLUX),
                Some(Direction::Reverse),
                &mut report
            ),
            (-1000.0, 0.0)
        );
        assert_eq!(
            decode_bounds(
                "rxn1",
                Some(UNBOUNDED_FLUX),
                Some(UNBOUNDED_FLUX),
                Some(Direction::Reversible),
                &mut report
            ),
            (-1000.0, 1000.0)
        );
        assert!(report.is_empty());
    }

    #[test]
    fn literal_capacities_are_trusted() {
        let mut report = BuildReport::new();
        assert_eq!(
            decode_bounds("rxn1", Some(5.0), Some(25.0), None, &mut report),
            (-5.0, 25.0)
        );
        // Sentinel magnitude without a direction symbol stays literal
        assert_eq!(
            decode_bounds(
                "rxn1",
                Some(UNBOUNDED_FLUX),
                Some(UNBOUNDED_FLUX),
                None,
                &mut report
            ),
            (-UNBOUNDED_FLUX, UNBOUNDED_FLUX)
        );
        assert!(report.is_empty());
    }

    #[test]
    fn missing_capacities_fall_back_to_direction() {
        let mut report = BuildReport::new();
        assert_eq!(
            decode_bounds("rxn1", None, None, Some(Direction::Forward), &mut report),
            (0.0, 1000.0)
        );
        // One-sided capacities are treated as absent
        assert_eq!(
            decode_bounds(
                "rxn1",
                Some(10.0),
                None,
                Some(Direction::Reverse),
                &mut report
            ),
            (-1000.0, 0.0)
        );
        assert!(report.is_empty());
    }

    #[test]
    fn missing_everything_defaults_reversible_with_warning() {
        let mut report = BuildReport::new();
        assert_eq!(
            decode_bounds("rxn1", None, None, None, &mut report),
            (-1000.0, 1000.0)
        );
        assert!(report.contains(&BuildWarning::MissingFluxConstraints("rxn1".to_string())));
    }

    #[test]
    fn negative_capacity_yields_coerced_bounds() {
        let mut report = BuildReport::new();
        assert_eq!(
            decode_bounds("rxn1", Some(-5.0), Some(2.0), None, &mut report),
            (0.0, 0.0)
        );
        assert_eq!(report.warnings.len(), 1);
    }

    #[test]
    fn encode_directionality() {
        let mut report = BuildReport::new();
        assert_eq!(
            encode_bounds(0.0, 500.0, &mut report),
            (0.0, 500.0, Direction::Forward)
        );
        assert_eq!(
            encode_bounds(-500.0, 0.0, &mut report),
            (500.0, 0.0, Direction::Reverse)
        );
        assert_eq!(
            encode_bounds(-500.0, 500.0, &mut report),
            (500.0, 500.0, Direction::Reversible)
        );
        assert_eq!(
            encode_bounds(0.0, 0.0, &mut report),
            (0.0, 0.0, Direction::Reversible)
        );
        assert!(report.is_empty());
    }

    #[test]
    fn encode_degenerate_bounds_warns() {
        let mut report = BuildReport::new();
        assert_eq!(
            encode_bounds(10.0, -10.0, &mut report),
            (0.0, 0.0, Direction::Reversible)
        );
        assert!(report.contains(&BuildWarning::InvalidBounds {
            lower: 10.0,
            upper: -10.0
        }));
    }

    #[test]
    fn decode_encode_round_trip() {
        let mut report = BuildReport::new();
        for (lower, upper) in [(-1000.0, 1000.0), (-12.5, 0.0), (0.0, 3.25), (0.0, 0.0)] {
            let (rev, fwd, direction) = encode_bounds(lower, upper, &mut report);
            assert_eq!(
                decode_bounds("rxn1", Some(rev), Some(fwd), Some(direction), &mut report),
                (lower, upper)
            );
        }
        assert!(report.is_empty());
    }

    #[test]
    fn sentinel_encoding_round_trips_default_bounds() {
        let mut report = BuildReport::new();
        let (rev, fwd, direction) = encode_bounds_sentinel(-1000.0, 1000.0, &mut report);
        assert_eq!((rev, fwd, direction), (
            UNBOUNDED_FLUX,
            UNBOUNDED_FLUX,
            Direction::Reversible
        ));
        assert_eq!(
            decode_bounds("rxn1", Some(rev), Some(fwd), Some(direction), &mut report),
            (-1000.0, 1000.0)
        );
        // Non-default bounds stay literal
        assert_eq!(
            encode_bounds_sentinel(-5.0, 10.0, &mut report),
            (5.0, 10.0, Direction::Reversible)
        );
        assert!(report.is_empty());
    }
}
