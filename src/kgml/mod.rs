//! KGML target model: pathways of entries, relations and reactions.
//!
//! This is the flat, deduplicated graph form the translator produces.
//! Serializing it to KGML XML is the downstream writer's business; the
//! types here are serde-serializable so the CLI and the tests have a JSON
//! snapshot form. What the translator guarantees to any writer: entry ids
//! are contiguous from 1, relation subtype sets are non-empty, and every
//! recorded reaction has at least one substrate and one product.

mod entry;
mod reaction;
mod relation;

pub use entry::{Entry, EntryKind, GeneKind};
pub use reaction::{Reaction, ReactionComponent, Reversibility};
pub use relation::{Relation, RelationKind, Subtype};

use serde::{Deserialize, Serialize};

/// One KGML pathway: the entry list (which owns id assignment), the
/// relation list and the reaction list for a single source pathway.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pathway {
    /// KEGG-style pathway name, `path:<org><number>`.
    pub name: String,
    /// KEGG organism abbreviation, e.g. `hsa`.
    pub org: String,
    pub number: u32,
    pub title: String,
    #[serde(default)]
    pub entries: Vec<Entry>,
    #[serde(default)]
    pub relations: Vec<Relation>,
    #[serde(default)]
    pub reactions: Vec<Reaction>,
}

impl Pathway {
    pub fn new(
        name: impl Into<String>,
        org: impl Into<String>,
        number: u32,
        title: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            org: org.into(),
            number,
            title: title.into(),
            entries: Vec::new(),
            relations: Vec::new(),
            reactions: Vec::new(),
        }
    }

    pub fn entry_by_id(&self, id: u32) -> Option<&Entry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn entry_by_id_mut(&mut self, id: u32) -> Option<&mut Entry> {
        self.entries.iter_mut().find(|e| e.id == id)
    }

    pub fn has_entry(&self, id: u32) -> bool {
        self.entry_by_id(id).is_some()
    }

    /// The id the next created entry receives. Robust against loaded
    /// pathways whose entries were not created by this process.
    pub fn next_entry_id(&self) -> u32 {
        self.entries.iter().map(|e| e.id).max().unwrap_or(0) + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_entry_id_starts_at_one() {
        let p = Pathway::new("path:hsa00001", "hsa", 1, "test");
        assert_eq!(p.next_entry_id(), 1);
    }

    #[test]
    fn test_next_entry_id_follows_max() {
        let mut p = Pathway::new("path:hsa00001", "hsa", 1, "test");
        p.entries.push(Entry::new(1, "hsa:1", EntryKind::Gene, "A"));
        p.entries.push(Entry::new(2, "hsa:2", EntryKind::Gene, "B"));
        assert_eq!(p.next_entry_id(), 3);
    }

    #[test]
    fn test_entry_lookup() {
        let mut p = Pathway::new("path:hsa00001", "hsa", 1, "test");
        p.entries.push(Entry::new(1, "hsa:1", EntryKind::Gene, "A"));
        assert!(p.has_entry(1));
        assert!(!p.has_entry(2));
        p.entry_by_id_mut(1).unwrap().append_reaction("rn:unknown1");
        assert_eq!(p.entry_by_id(1).unwrap().reactions.len(), 1);
    }

    #[test]
    fn test_snapshot_roundtrip() {
        let mut p = Pathway::new("path:hsa04115", "hsa", 4115, "p53 signaling");
        p.entries.push(Entry::new(1, "hsa:7157", EntryKind::Gene, "TP53"));
        p.relations.push(Relation::new(
            1,
            1,
            Some(RelationKind::GeneExpression),
            Subtype::Expression,
        ));
        let json = serde_json::to_string(&p).unwrap();
        let back: Pathway = serde_json::from_str(&json).unwrap();
        assert_eq!(back.entries.len(), 1);
        assert_eq!(back.relations.len(), 1);
        assert_eq!(back.name, "path:hsa04115");
    }
}
