//! KGML entry nodes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// KGML entry types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Gene,
    Compound,
    Map,
    Group,
    Ortholog,
    Other,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EntryKind::Gene => "gene",
            EntryKind::Compound => "compound",
            EntryKind::Map => "map",
            EntryKind::Group => "group",
            EntryKind::Ortholog => "ortholog",
            EntryKind::Other => "other",
        };
        f.write_str(s)
    }
}

/// Gene-type refinement carried by extended KGML entries.
///
/// Only meaningful when the entry kind is [`EntryKind::Gene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GeneKind {
    Dna,
    DnaRegion,
    Rna,
    RnaRegion,
    Protein,
    Unknown,
}

/// One node of a KGML pathway graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entry {
    /// Positive, unique per pathway, assigned in creation order from 1.
    pub id: u32,
    /// Resolved KEGG identifier (`hsa:7157`), pathway name (`path:hsa04115`)
    /// or `unknownN` placeholder. Never empty.
    pub name: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gene_kind: Option<GeneKind>,
    /// Display label: declared source names joined with `,`, or component
    /// labels joined with `/` for groups.
    pub graphics: String,
    /// Child entry ids; non-empty only for groups.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<u32>,
    /// Names of the reactions this entry catalyzes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reactions: Vec<String>,
}

impl Entry {
    pub fn new(id: u32, name: impl Into<String>, kind: EntryKind, graphics: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            gene_kind: None,
            graphics: graphics.into(),
            components: Vec::new(),
            reactions: Vec::new(),
        }
    }

    /// Structural equality used for deduplication: compares everything an
    /// entry *is* (name, kind, gene kind, graphics, components) and nothing
    /// it *was assigned* (id) or *accumulated* (reaction refs).
    pub fn matches(&self, other: &Entry) -> bool {
        self.name == other.name
            && self.kind == other.kind
            && self.gene_kind == other.gene_kind
            && self.graphics == other.graphics
            && self.components == other.components
    }

    /// Record a reaction this entry catalyzes. Duplicates are dropped.
    pub fn append_reaction(&mut self, name: &str) {
        if !self.reactions.iter().any(|r| r == name) {
            self.reactions.push(name.to_string());
        }
    }

    /// Graphics label split into its display tokens (`,` and `/` both
    /// separate).
    pub fn graphics_tokens(&self) -> Vec<&str> {
        self.graphics
            .split(|c| c == ',' || c == '/')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect()
    }
}
