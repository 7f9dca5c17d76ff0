//! KGML reaction hyper-edges.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction class of a reaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Reversibility {
    Irreversible,
    Reversible,
    /// Direction not declared by the source.
    Other,
}

impl fmt::Display for Reversibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Reversibility::Irreversible => "irreversible",
            Reversibility::Reversible => "reversible",
            Reversibility::Other => "other",
        };
        f.write_str(s)
    }
}

/// One substrate or product slot of a reaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionComponent {
    /// Entry id of the participant.
    pub id: u32,
    /// Entry name, repeated here so the record is self-describing.
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stoichiometry: Option<u32>,
}

impl ReactionComponent {
    pub fn new(id: u32, name: impl Into<String>, stoichiometry: Option<u32>) -> Self {
        Self {
            id,
            name: name.into(),
            stoichiometry,
        }
    }
}

/// A substrate→product transformation, referencing entries by id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reaction {
    /// Synthesized name, `rn:unknownN`.
    pub name: String,
    #[serde(rename = "type")]
    pub reversibility: Reversibility,
    pub substrates: Vec<ReactionComponent>,
    pub products: Vec<ReactionComponent>,
}

impl Reaction {
    /// Two reactions are the same transformation when their reversibility
    /// matches and both sides reference the same entry id sets, order
    /// ignored. Sizes are compared first as a cheap pre-filter.
    pub fn equivalent(&self, other: &Reaction) -> bool {
        self.reversibility == other.reversibility
            && same_id_set(&self.substrates, &other.substrates)
            && same_id_set(&self.products, &other.products)
    }
}

fn same_id_set(a: &[ReactionComponent], b: &[ReactionComponent]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().all(|c| b.iter().any(|d| d.id == c.id))
        && b.iter().all(|d| a.iter().any(|c| c.id == d.id))
}
