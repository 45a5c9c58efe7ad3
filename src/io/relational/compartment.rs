//! Mapping abstract compartment sockets of template reactions onto concrete
//! compartment tokens
//!
//! Template reaction stoichiometries are keyed by `(compound id, socket)`
//! where the socket is a small integer placeholder. A model instance keys its
//! stoichiometry by `(compound id, compartment token)` such as `"c0"`. The
//! matchers below recover which token each socket stands for.

use indexmap::{IndexMap, IndexSet};
use thiserror::Error;

use crate::configuration::CONFIGURATION;

/// Compartment class of a token is its first character (`c` cytosol,
/// `e` extracellular, ...)
pub fn compartment_class(token: &str) -> Option<char> {
    token.chars().next()
}

/// Class character marking extracellular compartment tokens
pub const EXTRACELLULAR_CLASS: char = 'e';

/// Template stoichiometry: `(compound id, socket)` to signed coefficient
pub type TemplateStoichiometry = IndexMap<(String, u32), f64>;
/// Instance stoichiometry: `(compound id, compartment token)` to signed coefficient
pub type InstanceStoichiometry = IndexMap<(String, String), f64>;
/// A socket to compartment token mapping
pub type SocketAssignment = IndexMap<u32, String>;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum SocketMatchError {
    /// The two stoichiometries use different numbers of distinct compartments
    #[error("socket/token count mismatch: {sockets} sockets vs {tokens} tokens")]
    CountMismatch { sockets: usize, tokens: usize },
    /// The iterative search ran out of progress or depth without locking
    /// every socket
    #[error("unable to detect valid configuration")]
    NoValidConfiguration,
    /// A serialized template stoichiometry entry did not follow
    /// `coefficient:compound:socket`
    #[error("malformed template stoichiometry entry: {0}")]
    MalformedStoichiometry(String),
}

/// Parse a serialized template stoichiometry
///
/// Entries are `;`-separated `coefficient:compound:socket[:...]` groups, e.g.
/// `"-1:cpd00067:1;1:cpd00067:0"`. Trailing fields beyond the first three are
/// ignored.
pub fn parse_template_stoichiometry(
    serialized: &str,
) -> Result<TemplateStoichiometry, SocketMatchError> {
    let mut stoichiometry = TemplateStoichiometry::new();
    for entry in serialized.split(';').filter(|e| !e.trim().is_empty()) {
        let mut fields = entry.split(':');
        let parsed = (|| {
            let coefficient: f64 = fields.next()?.trim().parse().ok()?;
            let compound_id = fields.next()?.trim().to_string();
            let socket: u32 = fields.next()?.trim().parse().ok()?;
            Some(((compound_id, socket), coefficient))
        })();
        match parsed {
            Some((key, coefficient)) => {
                stoichiometry.insert(key, coefficient);
            }
            None => return Err(SocketMatchError::MalformedStoichiometry(entry.to_string())),
        }
    }
    Ok(stoichiometry)
}

/// Exhaustively enumerate every socket assignment consistent with both
/// stoichiometries
///
/// An assignment matches when substituting it into the template reproduces
/// the instance stoichiometry exactly, or reproduces its element-wise
/// negation (the instance may be recorded in the opposite direction
/// convention). Every matching permutation is returned: an empty result means
/// no valid configuration, more than one means the mapping is ambiguous and
/// the caller must disambiguate — this engine never silently picks one.
pub fn match_socket_assignments(
    template: &TemplateStoichiometry,
    instance: &InstanceStoichiometry,
) -> Result<Vec<SocketAssignment>, SocketMatchError> {
    let sockets: IndexSet<u32> = template.keys().map(|(_, socket)| *socket).collect();
    let tokens: IndexSet<&str> = instance.keys().map(|(_, token)| token.as_str()).collect();
    if sockets.len() != tokens.len() {
        return Err(SocketMatchError::CountMismatch {
            sockets: sockets.len(),
            tokens: tokens.len(),
        });
    }

    let sockets: Vec<u32> = sockets.into_iter().collect();
    let tokens: Vec<&str> = tokens.into_iter().collect();
    let mut assignments: Vec<SocketAssignment> = Vec::new();
    for permutation in permutations(&tokens) {
        let assignment: SocketAssignment = sockets
            .iter()
            .zip(permutation.iter())
            .map(|(socket, token)| (*socket, token.to_string()))
            .collect();
        let substituted: InstanceStoichiometry = template
            .iter()
            .map(|((compound_id, socket), coefficient)| {
                ((compound_id.clone(), assignment[socket].clone()), *coefficient)
            })
            .collect();
        let direct = stoichiometries_equal(&substituted, instance, 1.0);
        let negated = stoichiometries_equal(&substituted, instance, -1.0);
        tracing::debug!(?assignment, direct, negated, "socket permutation tested");
        if (direct || negated) && !assignments.contains(&assignment) {
            assignments.push(assignment);
        }
    }
    Ok(assignments)
}

/// Compare stoichiometries after scaling the left side by `sign`
fn stoichiometries_equal(
    left: &InstanceStoichiometry,
    right: &InstanceStoichiometry,
    sign: f64,
) -> bool {
    if left.len() != right.len() {
        return false;
    }
    let tolerance = CONFIGURATION.read().unwrap().tolerance;
    left.iter().all(|(key, coefficient)| {
        right
            .get(key)
            .is_some_and(|other| (sign * coefficient - other).abs() <= tolerance)
    })
}

/// All orderings of `items`, by simple recursion; socket counts are small
/// (typically <= 3) so the factorial blowup is bounded in practice
fn permutations<'a>(items: &[&'a str]) -> Vec<Vec<&'a str>> {
    if items.is_empty() {
        return vec![Vec::new()];
    }
    let mut result = Vec::new();
    for (index, item) in items.iter().enumerate() {
        let mut rest: Vec<&str> = items.to_vec();
        rest.remove(index);
        for mut tail in permutations(&rest) {
            tail.insert(0, item);
            result.push(tail);
        }
    }
    result
}

/// Iteratively narrow socket candidates until each socket is locked to one token
///
/// For progressively narrowing larger socket sets without enumerating
/// permutations: per round, each unlocked socket's candidate set is the set
/// of instance compartment tokens carried by the socket's compounds, minus
/// tokens already locked to other sockets. Sockets with exactly one candidate
/// are locked. The search succeeds when every socket is locked, and fails
/// when a round locks nothing new or the depth bound (10 rounds) is
/// exceeded. This trades completeness (ambiguous solutions are not
/// enumerated) for performance.
pub fn infer_socket_assignment(
    template: &TemplateStoichiometry,
    instance_reagents: &[(String, String)],
) -> Result<SocketAssignment, SocketMatchError> {
    let sockets: IndexSet<u32> = template.keys().map(|(_, socket)| *socket).collect();
    let mut locked: SocketAssignment = SocketAssignment::new();

    for _depth in 0..=10 {
        let mut progressed = false;
        for &socket in &sockets {
            if locked.contains_key(&socket) {
                continue;
            }
            let mut candidates: IndexSet<&str> = IndexSet::new();
            for ((compound_id, template_socket), _) in template.iter() {
                if *template_socket != socket {
                    continue;
                }
                for (instance_compound, token) in instance_reagents {
                    if instance_compound == compound_id
                        && !locked.values().any(|assigned| assigned == token)
                    {
                        candidates.insert(token.as_str());
                    }
                }
            }
            if candidates.len() == 1 {
                let token = candidates.into_iter().next().unwrap().to_string();
                tracing::debug!(socket, %token, "socket locked");
                locked.insert(socket, token);
                progressed = true;
            }
        }
        if locked.len() == sockets.len() {
            locked.sort_keys();
            return Ok(locked);
        }
        if !progressed {
            return Err(SocketMatchError::NoValidConfiguration);
        }
    }
    Err(SocketMatchError::NoValidConfiguration)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template(entries: &[(&str, u32, f64)]) -> TemplateStoichiometry {
        entries
            .iter()
            .map(|(compound, socket, coefficient)| {
                ((compound.to_string(), *socket), *coefficient)
            })
            .collect()
    }

    fn instance(entries: &[(&str, &str, f64)]) -> InstanceStoichiometry {
        entries
            .iter()
            .map(|(compound, token, coefficient)| {
                ((compound.to_string(), token.to_string()), *coefficient)
            })
            .collect()
    }

    #[test]
    fn unique_direct_match() {
        let template = template(&[("A", 0, -1.0), ("B", 1, 1.0)]);
        let instance = instance(&[("A", "c0", -1.0), ("B", "e0", 1.0)]);
        let assignments = match_socket_assignments(&template, &instance).unwrap();
        assert_eq!(assignments.len(), 1);
        assert_eq!(assignments[0][&0], "c0");
        assert_eq!(assignments[0][&1], "e0");
    }

    #[test]
    fn negated_instance_matches() {
        // Instance recorded in the opposite direction convention
        let template = template(&[("A", 0, -1.0), ("B", 1, 1.0)]);
        let instance = instance(&[("A", "c0", 1.0), ("B", "e0", -1.0)]);
        let assignments = match_socket_assignments(&template, &instance).unwrap();
        assert_eq!(assignments.len(), 1);
        assert_eq!(assignments[0][&0], "c0");
    }

    #[test]
    fn ambiguous_symmetric_stoichiometry_returns_all_candidates() {
        // An antiport-style template is satisfied both ways around
        let template = template(&[("A", 0, -1.0), ("A", 1, 1.0)]);
        let instance = instance(&[("A", "c0", -1.0), ("A", "e0", 1.0)]);
        let assignments = match_socket_assignments(&template, &instance).unwrap();
        assert_eq!(assignments.len(), 2);
    }

    #[test]
    fn no_configuration_yields_empty_set() {
        let template = template(&[("A", 0, -1.0), ("B", 1, 1.0)]);
        let instance = instance(&[("A", "c0", -2.0), ("B", "e0", 1.0)]);
        let assignments = match_socket_assignments(&template, &instance).unwrap();
        assert!(assignments.is_empty());
    }

    #[test]
    fn count_mismatch_is_an_error() {
        let template = template(&[("A", 0, -1.0), ("B", 1, 1.0)]);
        let instance = instance(&[("A", "c0", -1.0), ("B", "c0", 1.0)]);
        assert_eq!(
            match_socket_assignments(&template, &instance),
            Err(SocketMatchError::CountMismatch {
                sockets: 2,
                tokens: 1
            })
        );
    }

    #[test]
    fn iterative_inference_locks_progressively() {
        // Socket 0 is pinned by compound A; socket 1 resolves once c0 is taken
        let template = template(&[("A", 0, -1.0), ("B", 1, 1.0)]);
        let reagents = vec![
            ("A".to_string(), "c0".to_string()),
            ("B".to_string(), "c0".to_string()),
            ("B".to_string(), "e0".to_string()),
        ];
        let assignment = infer_socket_assignment(&template, &reagents).unwrap();
        assert_eq!(assignment[&0], "c0");
        assert_eq!(assignment[&1], "e0");
    }

    #[test]
    fn iterative_inference_fails_without_progress() {
        // Both sockets see both tokens, no round can lock anything
        let template = template(&[("A", 0, -1.0), ("A", 1, 1.0)]);
        let reagents = vec![
            ("A".to_string(), "c0".to_string()),
            ("A".to_string(), "e0".to_string()),
        ];
        assert_eq!(
            infer_socket_assignment(&template, &reagents),
            Err(SocketMatchError::NoValidConfiguration)
        );
    }

    #[test]
    fn template_stoichiometry_parsing() {
        let parsed = parse_template_stoichiometry("-1:cpd00067:1;1:cpd00067:0").unwrap();
        assert_eq!(parsed[&("cpd00067".to_string(), 1)], -1.0);
        assert_eq!(parsed[&("cpd00067".to_string(), 0)], 1.0);
        // Extra per-entry fields from richer serializations are tolerated
        let parsed = parse_template_stoichiometry("-1:cpd00001:0:0:\"H2O\"").unwrap();
        assert_eq!(parsed[&("cpd00001".to_string(), 0)], -1.0);
        assert!(parse_template_stoichiometry("nonsense").is_err());
    }

    #[test]
    fn classification() {
        assert_eq!(compartment_class("e0"), Some(EXTRACELLULAR_CLASS));
        assert_eq!(compartment_class("c0"), Some('c'));
        assert_eq!(compartment_class(""), None);
    }
}
