//! Entry registry: the canonical, deduplicated entry set of one pathway.

use crate::kgml::{Entry, Pathway};
use crate::resolve::is_placeholder;
use crate::translate::Mode;

/// Find or create the entry a candidate describes.
///
/// Build mode scans for a structurally equal entry and otherwise appends the
/// candidate under the next id. Augment mode is lookup-only: it never adds
/// entries, so augmentation stays strictly additive on relations.
pub(crate) fn get_or_create(pathway: &mut Pathway, mut candidate: Entry, mode: Mode) -> Option<u32> {
    match mode {
        Mode::Build => {
            if let Some(existing) = pathway.entries.iter().find(|e| e.matches(&candidate)) {
                return Some(existing.id);
            }
            candidate.id = pathway.next_entry_id();
            let id = candidate.id;
            pathway.entries.push(candidate);
            Some(id)
        }
        Mode::Augment => find_best_match(pathway, &candidate),
    }
}

/// Augment-mode lookup. Placeholder names carry no identity, so they never
/// match; real names match same-named entries, best graphics-label overlap
/// first, ties to the lowest id.
fn find_best_match(pathway: &Pathway, candidate: &Entry) -> Option<u32> {
    if is_placeholder(&candidate.name) {
        return None;
    }
    let candidate_tokens = candidate.graphics_tokens();
    pathway
        .entries
        .iter()
        .filter(|e| e.name == candidate.name)
        .map(|e| {
            let overlap = e
                .graphics_tokens()
                .iter()
                .filter(|t| candidate_tokens.contains(t))
                .count();
            (e, overlap)
        })
        // max_by_key keeps the *last* maximum; ties must go to the lowest
        // id, so compare overlap first and inverted id second
        .max_by(|(a, oa), (b, ob)| oa.cmp(ob).then(b.id.cmp(&a.id)))
        .map(|(e, _)| e.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kgml::EntryKind;

    fn pathway() -> Pathway {
        Pathway::new("path:hsa00001", "hsa", 1, "test")
    }

    fn gene(name: &str, graphics: &str) -> Entry {
        Entry::new(0, name, EntryKind::Gene, graphics)
    }

    #[test]
    fn test_build_assigns_ids_in_creation_order() {
        let mut p = pathway();
        let a = get_or_create(&mut p, gene("hsa:1", "A"), Mode::Build);
        let b = get_or_create(&mut p, gene("hsa:2", "B"), Mode::Build);
        assert_eq!(a, Some(1));
        assert_eq!(b, Some(2));
        assert_eq!(p.entries.len(), 2);
    }

    #[test]
    fn test_build_dedups_structural_duplicates() {
        let mut p = pathway();
        let first = get_or_create(&mut p, gene("hsa:1", "A"), Mode::Build);
        let again = get_or_create(&mut p, gene("hsa:1", "A"), Mode::Build);
        assert_eq!(first, again);
        assert_eq!(p.entries.len(), 1);
    }

    #[test]
    fn test_build_distinguishes_graphics() {
        let mut p = pathway();
        get_or_create(&mut p, gene("hsa:1", "A"), Mode::Build);
        let other = get_or_create(&mut p, gene("hsa:1", "A2"), Mode::Build);
        assert_eq!(other, Some(2));
        assert_eq!(p.entries.len(), 2);
    }

    #[test]
    fn test_augment_never_creates() {
        let mut p = pathway();
        let found = get_or_create(&mut p, gene("hsa:1", "A"), Mode::Augment);
        assert_eq!(found, None);
        assert!(p.entries.is_empty());
    }

    #[test]
    fn test_augment_matches_by_name() {
        let mut p = pathway();
        get_or_create(&mut p, gene("hsa:1", "A"), Mode::Build);
        let found = get_or_create(&mut p, gene("hsa:1", "totally different"), Mode::Augment);
        assert_eq!(found, Some(1));
        assert_eq!(p.entries.len(), 1);
    }

    #[test]
    fn test_augment_prefers_graphics_overlap() {
        let mut p = pathway();
        get_or_create(&mut p, gene("hsa:1", "A,B"), Mode::Build);
        get_or_create(&mut p, gene("hsa:1", "A,C,D"), Mode::Build);
        let found = get_or_create(&mut p, gene("hsa:1", "C,D"), Mode::Augment);
        assert_eq!(found, Some(2));
    }

    #[test]
    fn test_augment_ties_go_to_lowest_id() {
        let mut p = pathway();
        get_or_create(&mut p, gene("hsa:1", "A,B"), Mode::Build);
        get_or_create(&mut p, gene("hsa:1", "A,C"), Mode::Build);
        let found = get_or_create(&mut p, gene("hsa:1", "A"), Mode::Augment);
        assert_eq!(found, Some(1));
    }

    #[test]
    fn test_augment_rejects_placeholders() {
        let mut p = pathway();
        get_or_create(&mut p, gene("unknown1", "A"), Mode::Build);
        let found = get_or_create(&mut p, gene("unknown1", "A"), Mode::Augment);
        assert_eq!(found, None);
    }
}
