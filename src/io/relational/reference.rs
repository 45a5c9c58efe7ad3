//! Resolution of relational reference strings into identifiers
//!
//! Two pointer grammars occur in workspace data:
//! - local/template pointers: `~/<subobject-path>/id/<id>`, resolved to the
//!   trailing segment
//! - workspace pointers: `<container>/<object>[/<version>]`, additionally
//!   exposed as a structured triple for callers that need a fetchable pointer

/// Resolve a reference string to its local identifier
///
/// Returns the final `/`-separated path segment. Inputs without a delimiter
/// are returned unchanged: upstream data has historically contained bare ids
/// with no reference wrapper, so the identity fallback is deliberate and
/// carries no diagnostic.
pub fn local_id(reference: &str) -> &str {
    match reference.rsplit_once('/') {
        Some((_, id)) => id,
        None => reference,
    }
}

/// A structured `(container, object, version)` workspace pointer
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorkspaceRef {
    pub container: String,
    pub object: String,
    pub version: Option<String>,
}

impl WorkspaceRef {
    /// Parse a `container/object[/version]` pointer
    ///
    /// Template pointers (`~/...`) and bare ids are not workspace references
    /// and yield `None`.
    pub fn parse(reference: &str) -> Option<WorkspaceRef> {
        if reference.starts_with('~') {
            return None;
        }
        let mut segments = reference.split('/');
        let container = segments.next()?;
        let object = segments.next()?;
        let version = segments.next();
        if container.is_empty() || object.is_empty() || segments.next().is_some() {
            return None;
        }
        Some(WorkspaceRef {
            container: container.to_string(),
            object: object.to_string(),
            version: version.map(str::to_string),
        })
    }
}
