//! This module provides the Gene struct, representing a gene product referenced by
//! one or more gene reaction rules
use std::fmt::{Display, Formatter};

use derive_builder::Builder;
use indexmap::IndexMap;
use serde_json::Value;

/// Structure Representing a Gene
#[derive(Builder, Clone, Debug, PartialEq)]
pub struct Gene {
    /// Used to identify the gene
    pub id: String,
    /// Human Readable Gene Name
    #[builder(default = "None")]
    pub name: Option<String>,
    /// Gene Annotations (external database name mapped to values)
    #[builder(default = "IndexMap::new()")]
    pub annotation: IndexMap<String, Value>,
}

impl Gene {
    pub fn new(id: String, name: Option<String>) -> Gene {
        GeneBuilder::default()
            .id(id)
            .name(name)
            .build()
            .expect("gene builder with id set cannot fail")
    }
}

impl Display for Gene {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_gene() {
        let gene = Gene::new("b1241".to_string(), Some("adhE".to_string()));
        assert_eq!(gene.id, "b1241");
        assert_eq!(gene.name.as_deref(), Some("adhE"));
        assert!(gene.annotation.is_empty());
        assert_eq!(format!("{}", gene), "b1241");
    }
}
