//! Entity/interaction classification: the dispatch core of the translator.
//!
//! Every BioPAX class in the model enum has exactly one construction recipe
//! here. A shape arriving where the recipe cannot apply (an interaction as
//! a complex member, an entity as a controlled process) aborts the run with
//! [`Pax2KgmlError::UnhandledElement`]; silent fallthrough would hide
//! unmapped format extensions.

use std::collections::HashMap;

use crate::error::{Pax2KgmlError, Result};
use crate::kgml::{Entry, EntryKind, GeneKind, Pathway, RelationKind, Reversibility, Subtype};
use crate::model::{
    ControlParts, ControlType, ConversionDirection, ConversionParts, PaxClass, PaxElement, PaxId,
    PaxModel,
};
use crate::resolve::IdentifierResolver;
use crate::translate::reactions::ClassifiedMember;
use crate::translate::{entries, reactions, relations, AugmentationStats, Mode, RunCounters};

/// Classifies the elements of one source pathway into one target pathway.
pub(crate) struct Classifier<'a> {
    model: &'a PaxModel,
    resolver: &'a IdentifierResolver,
    mode: Mode,
    pathway: &'a mut Pathway,
    counters: &'a mut RunCounters,
    stats: &'a mut AugmentationStats,
    /// Names already resolved in this pathway, so re-classifying an element
    /// cannot burn a fresh placeholder and defeat deduplication.
    resolved: HashMap<PaxId, String>,
}

impl<'a> Classifier<'a> {
    pub(crate) fn new(
        model: &'a PaxModel,
        resolver: &'a IdentifierResolver,
        mode: Mode,
        pathway: &'a mut Pathway,
        counters: &'a mut RunCounters,
        stats: &'a mut AugmentationStats,
    ) -> Self {
        Self {
            model,
            resolver,
            mode,
            pathway,
            counters,
            stats,
            resolved: HashMap::new(),
        }
    }

    /// Classify any element, producing entries/relations/reactions as side
    /// effects. Returns the primary entry created or found, if any.
    pub(crate) fn classify(&mut self, id: PaxId) -> Result<Option<u32>> {
        let element = self.model.element(id)?;
        if element.class.is_entity() {
            self.classify_entity(id)
        } else {
            self.classify_interaction(id)
        }
    }

    // ---- entities -------------------------------------------------------

    fn classify_entity(&mut self, id: PaxId) -> Result<Option<u32>> {
        let model = self.model;
        let element = model.element(id)?;
        match &element.class {
            PaxClass::Protein => self.entity_entry(id, EntryKind::Gene, Some(GeneKind::Protein)),
            PaxClass::Dna => self.entity_entry(id, EntryKind::Gene, Some(GeneKind::Dna)),
            PaxClass::DnaRegion => self.entity_entry(id, EntryKind::Gene, Some(GeneKind::DnaRegion)),
            PaxClass::Rna => self.entity_entry(id, EntryKind::Gene, Some(GeneKind::Rna)),
            PaxClass::RnaRegion => self.entity_entry(id, EntryKind::Gene, Some(GeneKind::RnaRegion)),
            PaxClass::Gene => self.entity_entry(id, EntryKind::Gene, Some(GeneKind::Unknown)),
            PaxClass::SmallMolecule => self.entity_entry(id, EntryKind::Compound, None),
            PaxClass::PhysicalEntity => self.entity_entry(id, EntryKind::Other, None),
            PaxClass::Complex { components } => self.complex_entry(id, components),
            PaxClass::Pathway { .. } => self.pathway_entry(id),
            other => Err(unhandled(&element.uri, other)),
        }
    }

    /// The common entry-creation path: resolve the identifier, derive the
    /// graphics label, hand the candidate to the registry.
    fn entity_entry(
        &mut self,
        id: PaxId,
        kind: EntryKind,
        gene_kind: Option<GeneKind>,
    ) -> Result<Option<u32>> {
        let model = self.model;
        let element = model.element(id)?;
        let name = self.resolve_name(id, element);
        let graphics = if element.names.is_empty() {
            name.clone()
        } else {
            element.names.join(",")
        };
        let mut candidate = Entry::new(0, name, kind, graphics);
        candidate.gene_kind = gene_kind;
        Ok(entries::get_or_create(self.pathway, candidate, self.mode))
    }

    /// A complex becomes a group entry whose components are the classified
    /// members; the graphics label joins the member display names with `/`.
    fn complex_entry(&mut self, id: PaxId, components: &[PaxId]) -> Result<Option<u32>> {
        let model = self.model;
        let mut member_ids = Vec::new();
        let mut labels = Vec::new();
        for &member_id in components {
            if let Some(child) = self.classify_entity(member_id)? {
                member_ids.push(child);
                let member = model.element(member_id)?;
                let label = match member.shortest_name() {
                    Some(n) => n.to_string(),
                    None => self
                        .pathway
                        .entry_by_id(child)
                        .map(|e| e.name.clone())
                        .unwrap_or_default(),
                };
                if !label.is_empty() {
                    labels.push(label);
                }
            }
        }
        let element = model.element(id)?;
        let name = self.resolve_name(id, element);
        let graphics = if labels.is_empty() {
            name.clone()
        } else {
            labels.join("/")
        };
        let mut candidate = Entry::new(0, name, EntryKind::Group, graphics);
        candidate.components = member_ids;
        Ok(entries::get_or_create(self.pathway, candidate, self.mode))
    }

    /// A referenced pathway becomes a map entry named `path:<org><number>`.
    fn pathway_entry(&mut self, id: PaxId) -> Result<Option<u32>> {
        let model = self.model;
        let element = model.element(id)?;
        let hint = trailing_number(&element.uri);
        let number = self.counters.pathway_numbers.number_for(&element.uri, hint);
        let name = format!("path:{}{:05}", self.resolver.species().kegg_abbr, number);
        let graphics = if element.names.is_empty() {
            name.clone()
        } else {
            element.names.join(",")
        };
        let candidate = Entry::new(0, name, EntryKind::Map, graphics);
        Ok(entries::get_or_create(self.pathway, candidate, self.mode))
    }

    fn resolve_name(&mut self, id: PaxId, element: &PaxElement) -> String {
        if let Some(name) = self.resolved.get(&id) {
            return name.clone();
        }
        let name = self
            .resolver
            .resolve(element, &mut self.counters.placeholders);
        self.resolved.insert(id, name.clone());
        name
    }

    // ---- interactions ---------------------------------------------------

    fn classify_interaction(&mut self, id: PaxId) -> Result<Option<u32>> {
        let model = self.model;
        let element = model.element(id)?;
        match &element.class {
            PaxClass::Control(parts)
            | PaxClass::Catalysis(parts)
            | PaxClass::Modulation(parts)
            | PaxClass::TemplateReactionRegulation(parts) => self.control_like(element, parts),

            PaxClass::BiochemicalReaction(parts)
            | PaxClass::ComplexAssembly(parts)
            | PaxClass::TransportWithBiochemicalReaction(parts) => {
                self.conversion_reaction(parts)?;
                Ok(None)
            }

            PaxClass::Transport(parts) | PaxClass::Degradation(parts) => {
                self.pairwise_conversion(parts, Subtype::StateChange)?;
                Ok(None)
            }
            PaxClass::Conversion(parts) => {
                let tag = vocabulary_subtype(&parts.interaction_type);
                self.pairwise_conversion(parts, tag)?;
                Ok(None)
            }

            PaxClass::TemplateReaction { products } => {
                let produced = self.template_reaction(products)?;
                Ok(produced.last().copied())
            }

            PaxClass::GeneticInteraction { participants } => self.pairwise_participants(
                participants,
                RelationKind::GeneticInteraction,
                Subtype::Association,
            ),
            PaxClass::MolecularInteraction { participants } => self.pairwise_participants(
                participants,
                RelationKind::ProteinProtein,
                Subtype::IndirectEffect,
            ),

            // A base-class interaction carries no translatable shape; it
            // still gets a node so the pathway does not lose it.
            PaxClass::Interaction { .. } => self.entity_entry(id, EntryKind::Map, None),

            other => Err(unhandled(&element.uri, other)),
        }
    }

    /// Catalysis, Modulation, TemplateReactionRegulation and generic
    /// Control: classify each controller, then wire it to every controlled
    /// process.
    fn control_like(&mut self, element: &PaxElement, parts: &ControlParts) -> Result<Option<u32>> {
        let model = self.model;
        let is_catalysis = matches!(element.class, PaxClass::Catalysis(_));
        let subtype = control_subtype(parts.control_type, is_catalysis);
        let mut primary = None;
        for &controller_id in &parts.controllers {
            let controller = model.element(controller_id)?;
            let (entry, rel_kind) = match &controller.class {
                PaxClass::Pathway { .. } => {
                    (self.pathway_entry(controller_id)?, RelationKind::MapLink)
                }
                c if c.is_entity() => (
                    self.classify_entity(controller_id)?,
                    RelationKind::ProteinProtein,
                ),
                other => return Err(unhandled(&controller.uri, other)),
            };
            if primary.is_none() {
                primary = entry;
            }
            for &process_id in &parts.controlled {
                self.controlled_process(entry, rel_kind, subtype, parts.control_type, process_id)?;
            }
        }
        Ok(primary)
    }

    fn controlled_process(
        &mut self,
        controller: Option<u32>,
        rel_kind: RelationKind,
        subtype: Subtype,
        control_type: Option<ControlType>,
        id: PaxId,
    ) -> Result<()> {
        let model = self.model;
        let process = model.element(id)?;
        match &process.class {
            PaxClass::BiochemicalReaction(parts)
            | PaxClass::ComplexAssembly(parts)
            | PaxClass::TransportWithBiochemicalReaction(parts) => {
                let (reaction_name, substrates, products) = self.conversion_reaction(parts)?;
                let Some(controller_entry) = controller else {
                    return Ok(());
                };
                if rel_kind == RelationKind::MapLink {
                    // A pathway controlling a reaction points at what the
                    // reaction consumes
                    for member in &substrates {
                        if let Some(target) = member.entry {
                            relations::link(
                                self.pathway,
                                self.mode,
                                self.stats,
                                controller_entry,
                                target,
                                Some(RelationKind::MapLink),
                                subtype,
                            );
                        }
                    }
                } else {
                    // A physical controller is the catalyst: it carries the
                    // reaction name and points at what the reaction yields
                    if let Some(name) = &reaction_name {
                        if let Some(entry) = self.pathway.entry_by_id_mut(controller_entry) {
                            entry.append_reaction(name);
                        }
                    }
                    for member in &products {
                        if let Some(target) = member.entry {
                            relations::link(
                                self.pathway,
                                self.mode,
                                self.stats,
                                controller_entry,
                                target,
                                Some(rel_kind),
                                subtype,
                            );
                        }
                    }
                }
                Ok(())
            }

            PaxClass::Transport(parts) | PaxClass::Degradation(parts) => {
                let (_, rights) = self.pairwise_conversion(parts, Subtype::StateChange)?;
                self.link_controller(controller, rel_kind, subtype, &rights);
                Ok(())
            }
            PaxClass::Conversion(parts) => {
                let tag = vocabulary_subtype(&parts.interaction_type);
                let (_, rights) = self.pairwise_conversion(parts, tag)?;
                self.link_controller(controller, rel_kind, subtype, &rights);
                Ok(())
            }

            PaxClass::Pathway { .. } => {
                let target = self.pathway_entry(id)?;
                if let (Some(c), Some(t)) = (controller, target) {
                    relations::link(
                        self.pathway,
                        self.mode,
                        self.stats,
                        c,
                        t,
                        Some(rel_kind),
                        subtype,
                    );
                }
                Ok(())
            }

            PaxClass::TemplateReaction { products } => {
                let produced = self.template_reaction(products)?;
                // An undeclared control type on a template regulation means
                // plain expression control
                let tag = if control_type.is_none() {
                    Subtype::Expression
                } else {
                    subtype
                };
                self.link_controller(controller, rel_kind, tag, &produced);
                Ok(())
            }

            other => Err(unhandled(&process.uri, other)),
        }
    }

    /// Build the reaction a conversion describes (skipped in augment mode)
    /// and return its name plus both classified sides.
    #[allow(clippy::type_complexity)]
    fn conversion_reaction(
        &mut self,
        parts: &ConversionParts,
    ) -> Result<(Option<String>, Vec<ClassifiedMember>, Vec<ClassifiedMember>)> {
        let substrates = self.classify_members(&parts.left)?;
        let products = self.classify_members(&parts.right)?;
        let name = if self.mode == Mode::Build {
            reactions::synthesize(
                self.pathway,
                &mut self.counters.reactions,
                &substrates,
                &products,
                &parts.stoichiometry,
                reversibility(parts.direction),
            )
        } else {
            None
        };
        Ok((name, substrates, products))
    }

    /// Conversions without a reaction shape turn into untyped pairwise
    /// relations between every left and every right member. Returns both
    /// sides' entry ids.
    fn pairwise_conversion(
        &mut self,
        parts: &ConversionParts,
        tag: Subtype,
    ) -> Result<(Vec<u32>, Vec<u32>)> {
        let lefts = self.entry_ids(&parts.left)?;
        let rights = self.entry_ids(&parts.right)?;
        for &left in &lefts {
            for &right in &rights {
                relations::link(self.pathway, self.mode, self.stats, left, right, None, tag);
            }
        }
        Ok((lefts, rights))
    }

    /// Template reactions: classify each product and mark it with the
    /// deliberate self-loop expression relation.
    fn template_reaction(&mut self, products: &[PaxId]) -> Result<Vec<u32>> {
        let mut produced = Vec::new();
        for &product in products {
            if let Some(entry) = self.classify_entity(product)? {
                relations::link_expression(self.pathway, self.mode, self.stats, entry);
                produced.push(entry);
            }
        }
        Ok(produced)
    }

    /// Fully pairwise relations over an interaction's participants.
    fn pairwise_participants(
        &mut self,
        participants: &[PaxId],
        kind: RelationKind,
        tag: Subtype,
    ) -> Result<Option<u32>> {
        let ids = self.entry_ids(participants)?;
        for (i, &a) in ids.iter().enumerate() {
            for &b in &ids[i + 1..] {
                relations::link(self.pathway, self.mode, self.stats, a, b, Some(kind), tag);
            }
        }
        Ok(ids.first().copied())
    }

    fn classify_members(&mut self, members: &[PaxId]) -> Result<Vec<ClassifiedMember>> {
        members
            .iter()
            .map(|&m| {
                Ok(ClassifiedMember {
                    source: m,
                    entry: self.classify_entity(m)?,
                })
            })
            .collect()
    }

    fn entry_ids(&mut self, members: &[PaxId]) -> Result<Vec<u32>> {
        Ok(self
            .classify_members(members)?
            .into_iter()
            .filter_map(|m| m.entry)
            .collect())
    }

    fn link_controller(
        &mut self,
        controller: Option<u32>,
        rel_kind: RelationKind,
        tag: Subtype,
        targets: &[u32],
    ) {
        let Some(controller) = controller else {
            return;
        };
        for &target in targets {
            relations::link(
                self.pathway,
                self.mode,
                self.stats,
                controller,
                target,
                Some(rel_kind),
                tag,
            );
        }
    }
}

fn unhandled(uri: &str, class: &PaxClass) -> Pax2KgmlError {
    Pax2KgmlError::UnhandledElement {
        id: uri.to_string(),
        class: class.name().to_string(),
    }
}

fn reversibility(direction: Option<ConversionDirection>) -> Reversibility {
    match direction {
        Some(ConversionDirection::Reversible) => Reversibility::Reversible,
        Some(ConversionDirection::LeftToRight) | Some(ConversionDirection::RightToLeft) => {
            Reversibility::Irreversible
        }
        None => Reversibility::Other,
    }
}

/// Control sign to relation tag. Catalysis without a declared sign is
/// activating by definition; other undeclared controls only assert that
/// something changes state.
fn control_subtype(control_type: Option<ControlType>, is_catalysis: bool) -> Subtype {
    match control_type {
        Some(ControlType::Activation) => Subtype::Activation,
        Some(ControlType::Inhibition) => Subtype::Inhibition,
        None if is_catalysis => Subtype::Activation,
        None => Subtype::StateChange,
    }
}

/// Relation tag for a generic conversion, derived from its interactionType
/// vocabulary terms by case-insensitive suffix match.
fn vocabulary_subtype(terms: &[String]) -> Subtype {
    for term in terms {
        let term = term.to_ascii_lowercase();
        if term.ends_with("activation") {
            return Subtype::Activation;
        }
        if term.ends_with("inhibition") {
            return Subtype::Inhibition;
        }
        if term.ends_with("transcription") || term.ends_with("translation") {
            return Subtype::Expression;
        }
        if term.ends_with("molecular_interaction") {
            return Subtype::Binding;
        }
        if term.ends_with("hedgehog_cleavage_and_lipidation") {
            return Subtype::IndirectEffect;
        }
    }
    Subtype::StateChange
}

/// Trailing decimal digits of an identifier, used as the pathway number
/// when the source id carries one.
pub(crate) fn trailing_number(text: &str) -> Option<u32> {
    let re = regex::Regex::new(r"(\d+)$").expect("valid regex");
    re.captures(text.trim())?.get(1)?.as_str().parse().ok()
}
