//! Reaction synthesis with merge semantics.

use crate::kgml::{Pathway, Reaction, ReactionComponent, Reversibility};
use crate::model::{PaxId, Stoichiometry};

/// Run-scoped issuer of `rn:unknownN` reaction names, N starting at 1.
#[derive(Debug, Clone, Default)]
pub(crate) struct ReactionNames {
    issued: u32,
}

impl ReactionNames {
    pub(crate) fn next(&mut self) -> String {
        self.issued += 1;
        format!("rn:unknown{}", self.issued)
    }
}

/// A conversion participant together with the entry the classifier produced
/// for it (None when classification yielded nothing, e.g. an augment-mode
/// lookup miss).
#[derive(Debug, Clone, Copy)]
pub(crate) struct ClassifiedMember {
    pub source: PaxId,
    pub entry: Option<u32>,
}

/// Record the reaction a conversion describes, merging with an equivalent
/// existing one.
///
/// Members without an entry are skipped. Stoichiometric coefficients attach
/// by participant handle identity; a participant without a coefficient
/// record simply gets none. A reaction that ends up with an empty substrate
/// or product side is not recorded at all. Returns the name of the
/// (existing or new) reaction.
pub(crate) fn synthesize(
    pathway: &mut Pathway,
    names: &mut ReactionNames,
    substrates: &[ClassifiedMember],
    products: &[ClassifiedMember],
    stoichiometry: &[Stoichiometry],
    reversibility: Reversibility,
) -> Option<String> {
    let substrates = components(pathway, substrates, stoichiometry);
    let products = components(pathway, products, stoichiometry);
    if substrates.is_empty() || products.is_empty() {
        log::debug!("conversion with an empty side, no reaction recorded");
        return None;
    }

    let candidate = Reaction {
        name: String::new(),
        reversibility,
        substrates,
        products,
    };
    if let Some(existing) = pathway.reactions.iter().find(|r| r.equivalent(&candidate)) {
        return Some(existing.name.clone());
    }

    let named = Reaction {
        name: names.next(),
        ..candidate
    };
    let name = named.name.clone();
    pathway.reactions.push(named);
    Some(name)
}

fn components(
    pathway: &Pathway,
    members: &[ClassifiedMember],
    stoichiometry: &[Stoichiometry],
) -> Vec<ReactionComponent> {
    members
        .iter()
        .filter_map(|m| {
            let id = m.entry?;
            let entry = pathway.entry_by_id(id)?;
            let coefficient = stoichiometry
                .iter()
                .find(|s| s.entity == m.source)
                .map(|s| s.coefficient);
            Some(ReactionComponent::new(id, entry.name.clone(), coefficient))
        })
        .collect()
}
