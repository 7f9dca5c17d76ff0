//! KGML relation edges.

use serde::{Deserialize, Serialize};
use std::fmt;

/// KGML relation types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RelationKind {
    /// Protein-protein interaction.
    #[serde(rename = "PPrel")]
    ProteinProtein,
    /// Gene expression relation.
    #[serde(rename = "GErel")]
    GeneExpression,
    /// Genetic interaction between genes.
    #[serde(rename = "GGrel")]
    GeneticInteraction,
    /// Link to another pathway map.
    #[serde(rename = "maplink")]
    MapLink,
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RelationKind::ProteinProtein => "PPrel",
            RelationKind::GeneExpression => "GErel",
            RelationKind::GeneticInteraction => "GGrel",
            RelationKind::MapLink => "maplink",
        };
        f.write_str(s)
    }
}

/// KGML relation subtype annotations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Subtype {
    Activation,
    Inhibition,
    Expression,
    Association,
    IndirectEffect,
    Binding,
    StateChange,
}

impl fmt::Display for Subtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // KGML attribute spellings
        let s = match self {
            Subtype::Activation => "activation",
            Subtype::Inhibition => "inhibition",
            Subtype::Expression => "expression",
            Subtype::Association => "association",
            Subtype::IndirectEffect => "indirect effect",
            Subtype::Binding => "binding/association",
            Subtype::StateChange => "state change",
        };
        f.write_str(s)
    }
}

/// One edge of a KGML pathway graph.
///
/// A relation may carry no type: the pairwise state-change edges synthesized
/// from transport and degradation interactions are untyped, and two untyped
/// relations over the same entry pair merge with each other.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Relation {
    pub entry1: u32,
    pub entry2: u32,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<RelationKind>,
    /// Accumulating set of annotation tags; insertion-ordered, never empty.
    pub subtypes: Vec<Subtype>,
}

impl Relation {
    pub fn new(entry1: u32, entry2: u32, kind: Option<RelationKind>, subtype: Subtype) -> Self {
        Self {
            entry1,
            entry2,
            kind,
            subtypes: vec![subtype],
        }
    }

    /// Merge a subtype into the set. Returns true if it was not already
    /// present.
    pub fn add_subtype(&mut self, subtype: Subtype) -> bool {
        if self.subtypes.contains(&subtype) {
            false
        } else {
            self.subtypes.push(subtype);
            true
        }
    }

    /// True when this relation occupies the (entry1, entry2, type) slot the
    /// merge rule keys on.
    pub fn occupies(&self, entry1: u32, entry2: u32, kind: Option<RelationKind>) -> bool {
        self.entry1 == entry1 && self.entry2 == entry2 && self.kind == kind
    }
}
