//! Relation synthesis with merge semantics.

use crate::kgml::{Pathway, Relation, RelationKind, Subtype};
use crate::translate::{AugmentationStats, Mode};

/// Create or merge a relation between two entries.
///
/// An existing relation over the same (entry1, entry2, type) slot absorbs
/// the subtype instead of a duplicate edge being added. In augment mode a
/// *new* relation is placed only when both endpoints already exist in the
/// target pathway and the edge is not a self-loop; otherwise it is dropped
/// silently. Returns the index of the affected relation.
pub(crate) fn link(
    pathway: &mut Pathway,
    mode: Mode,
    stats: &mut AugmentationStats,
    entry1: u32,
    entry2: u32,
    kind: Option<RelationKind>,
    subtype: Subtype,
) -> Option<usize> {
    place(pathway, mode, stats, entry1, entry2, kind, subtype, false)
}

/// The template-reaction expression edge: a deliberate self-loop.
///
/// Expression relations mark their target as self-regulated output, so this
/// path skips the self-loop check `link` applies in augment mode. The
/// endpoint-existence check still applies.
pub(crate) fn link_expression(
    pathway: &mut Pathway,
    mode: Mode,
    stats: &mut AugmentationStats,
    entry: u32,
) -> Option<usize> {
    place(
        pathway,
        mode,
        stats,
        entry,
        entry,
        Some(RelationKind::GeneExpression),
        Subtype::Expression,
        true,
    )
}

#[allow(clippy::too_many_arguments)]
fn place(
    pathway: &mut Pathway,
    mode: Mode,
    stats: &mut AugmentationStats,
    entry1: u32,
    entry2: u32,
    kind: Option<RelationKind>,
    subtype: Subtype,
    allow_self: bool,
) -> Option<usize> {
    if let Some(idx) = pathway
        .relations
        .iter()
        .position(|r| r.occupies(entry1, entry2, kind))
    {
        let merged = pathway.relations[idx].add_subtype(subtype);
        if merged && mode == Mode::Augment {
            stats.subtypes_merged += 1;
        }
        return Some(idx);
    }

    if mode == Mode::Augment {
        if !allow_self && entry1 == entry2 {
            return None;
        }
        if !pathway.has_entry(entry1) || !pathway.has_entry(entry2) {
            return None;
        }
        stats.relations_added += 1;
    }

    pathway
        .relations
        .push(Relation::new(entry1, entry2, kind, subtype));
    Some(pathway.relations.len() - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kgml::{Entry, EntryKind};

    fn pathway_with_entries(n: u32) -> Pathway {
        let mut p = Pathway::new("path:hsa00001", "hsa", 1, "test");
        for id in 1..=n {
            p.entries
                .push(Entry::new(id, format!("hsa:{}", id), EntryKind::Gene, "x"));
        }
        p
    }

    #[test]
    fn test_link_merges_subtypes() {
        let mut p = pathway_with_entries(2);
        let mut stats = AugmentationStats::default();
        let kind = Some(RelationKind::ProteinProtein);
        link(&mut p, Mode::Build, &mut stats, 1, 2, kind, Subtype::Activation);
        link(&mut p, Mode::Build, &mut stats, 1, 2, kind, Subtype::Inhibition);
        link(&mut p, Mode::Build, &mut stats, 1, 2, kind, Subtype::Activation);
        assert_eq!(p.relations.len(), 1);
        assert_eq!(
            p.relations[0].subtypes,
            vec![Subtype::Activation, Subtype::Inhibition]
        );
    }

    #[test]
    fn test_link_distinguishes_kind() {
        let mut p = pathway_with_entries(2);
        let mut stats = AugmentationStats::default();
        link(&mut p, Mode::Build, &mut stats, 1, 2, None, Subtype::StateChange);
        link(
            &mut p,
            Mode::Build,
            &mut stats,
            1,
            2,
            Some(RelationKind::ProteinProtein),
            Subtype::StateChange,
        );
        assert_eq!(p.relations.len(), 2);
    }

    #[test]
    fn test_build_allows_unknown_endpoints() {
        // Build mode trusts the classifier; placement checks are an
        // augment-mode concern only
        let mut p = pathway_with_entries(0);
        let mut stats = AugmentationStats::default();
        let idx = link(&mut p, Mode::Build, &mut stats, 7, 8, None, Subtype::StateChange);
        assert_eq!(idx, Some(0));
        assert_eq!(stats.relations_added, 0);
    }

    #[test]
    fn test_augment_requires_existing_endpoints() {
        let mut p = pathway_with_entries(1);
        let mut stats = AugmentationStats::default();
        let idx = link(&mut p, Mode::Augment, &mut stats, 1, 2, None, Subtype::StateChange);
        assert_eq!(idx, None);
        assert!(p.relations.is_empty());
        assert_eq!(stats.relations_added, 0);
    }

    #[test]
    fn test_augment_discards_self_loops() {
        let mut p = pathway_with_entries(1);
        let mut stats = AugmentationStats::default();
        let idx = link(
            &mut p,
            Mode::Augment,
            &mut stats,
            1,
            1,
            Some(RelationKind::ProteinProtein),
            Subtype::Activation,
        );
        assert_eq!(idx, None);
        assert!(p.relations.is_empty());
    }

    #[test]
    fn test_augment_counts_added_relations_and_merged_subtypes() {
        let mut p = pathway_with_entries(2);
        let mut stats = AugmentationStats::default();
        link(&mut p, Mode::Augment, &mut stats, 1, 2, None, Subtype::StateChange);
        assert_eq!(stats.relations_added, 1);
        // Same slot, new subtype: merge, not add
        link(&mut p, Mode::Augment, &mut stats, 1, 2, None, Subtype::Inhibition);
        assert_eq!(stats.relations_added, 1);
        assert_eq!(stats.subtypes_merged, 1);
        // Same slot, same subtype: no-op
        link(&mut p, Mode::Augment, &mut stats, 1, 2, None, Subtype::Inhibition);
        assert_eq!(stats.subtypes_merged, 1);
        assert_eq!(p.relations.len(), 1);
    }

    #[test]
    fn test_expression_self_loop_bypasses_guard() {
        let mut p = pathway_with_entries(1);
        let mut stats = AugmentationStats::default();
        let idx = link_expression(&mut p, Mode::Augment, &mut stats, 1);
        assert_eq!(idx, Some(0));
        let r = &p.relations[0];
        assert_eq!((r.entry1, r.entry2), (1, 1));
        assert_eq!(r.kind, Some(RelationKind::GeneExpression));
        assert_eq!(r.subtypes, vec![Subtype::Expression]);
    }

    #[test]
    fn test_expression_self_loop_still_requires_entry() {
        let mut p = pathway_with_entries(0);
        let mut stats = AugmentationStats::default();
        let idx = link_expression(&mut p, Mode::Augment, &mut stats, 3);
        assert_eq!(idx, None);
    }
}
