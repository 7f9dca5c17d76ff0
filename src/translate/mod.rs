//! Translation engine: orchestrates BioPAX → KGML per pathway.
//!
//! One pathway is fully translated before the next begins, because the
//! identifier mappers are rebuilt in place when the organism changes
//! between pathways. A concurrent port must serialize per organism or give
//! each worker its own mappers.

mod classify;
mod entries;
mod reactions;
mod relations;

use std::collections::HashMap;

use crate::error::Result;
use crate::kgml::Pathway;
use crate::model::{PaxClass, PaxElement, PaxId, PaxModel};
use crate::resolve::{IdentifierResolver, MapperFactory, PlaceholderNames, SpeciesResolver};
use classify::{trailing_number, Classifier};
use reactions::ReactionNames;

/// Operating mode of a translation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Build fresh pathways from the source document.
    Build,
    /// Only add relations/subtypes to an existing pathway; never create
    /// entries or reactions.
    Augment,
}

/// Counters scoped to one translation run.
///
/// These are deliberately not process-wide: two runs must not leak
/// placeholder numbers or reaction names into each other.
#[derive(Debug, Clone, Default)]
pub struct RunCounters {
    pub(crate) placeholders: PlaceholderNames,
    pub(crate) reactions: ReactionNames,
    pub(crate) pathway_numbers: PathwayNumbers,
}

impl RunCounters {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Pathway numbers: taken from trailing digits of the source id when
/// present, otherwise issued from a run-scoped fallback counter. Numbers
/// are sticky per source id so a pathway referenced twice keeps one name.
#[derive(Debug, Clone, Default)]
pub(crate) struct PathwayNumbers {
    issued: u32,
    assigned: HashMap<String, u32>,
}

impl PathwayNumbers {
    pub(crate) fn number_for(&mut self, uri: &str, hint: Option<u32>) -> u32 {
        if let Some(&n) = self.assigned.get(uri) {
            return n;
        }
        let n = match hint {
            Some(n) => n,
            None => {
                self.issued += 1;
                self.issued
            }
        };
        self.assigned.insert(uri.to_string(), n);
        n
    }
}

/// What an augmentation run changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AugmentationStats {
    /// Relations newly placed into the existing pathway.
    pub relations_added: u32,
    /// Subtypes merged onto relations that already existed.
    pub subtypes_merged: u32,
}

/// The translation orchestrator.
pub struct Translator {
    species: SpeciesResolver,
    factory: Box<dyn MapperFactory>,
}

impl Translator {
    pub fn new(species: SpeciesResolver, factory: Box<dyn MapperFactory>) -> Self {
        Self { species, factory }
    }

    /// Translate every pathway of a source document into a fresh KGML
    /// pathway. A document that declares no pathways is translated as one
    /// synthetic pathway covering all its interactions.
    pub fn translate(&self, model: &PaxModel) -> Result<Vec<Pathway>> {
        let mut counters = RunCounters::new();
        let mut stats = AugmentationStats::default();
        let pathway_ids = model.pathways();
        let mut out = Vec::new();

        if pathway_ids.is_empty() {
            log::info!("document declares no pathways, translating the whole model as one");
            let species = self.species.default_species().clone();
            let resolver = IdentifierResolver::new(&species, self.factory.as_ref());
            let number = counters.pathway_numbers.number_for("", None);
            let mut pathway = Pathway::new(
                format!("path:{}{:05}", species.kegg_abbr, number),
                species.kegg_abbr.clone(),
                number,
                "unknown",
            );
            let mut classifier = Classifier::new(
                model,
                &resolver,
                Mode::Build,
                &mut pathway,
                &mut counters,
                &mut stats,
            );
            for id in model.interactions() {
                classifier.classify(id)?;
            }
            out.push(pathway);
            return Ok(out);
        }

        let mut resolver: Option<IdentifierResolver> = None;
        for id in pathway_ids {
            let element = model.element(id)?;
            let PaxClass::Pathway {
                organism,
                components,
            } = &element.class
            else {
                continue;
            };
            let species = self.species.resolve(organism.as_ref()).clone();
            // Swap the mappers only when the organism actually changes, and
            // never mid-pathway
            if resolver.as_ref().map(|r| r.species()) != Some(&species) {
                log::debug!("installing identifier mappers for '{}'", species.kegg_abbr);
                resolver = Some(IdentifierResolver::new(&species, self.factory.as_ref()));
            }
            let Some(active) = resolver.as_ref() else {
                continue; // unreachable: assigned just above
            };
            let pathway =
                self.translate_pathway(model, element, components, active, &mut counters, &mut stats)?;
            log::info!(
                "translated '{}': {} entries, {} relations, {} reactions",
                pathway.title,
                pathway.entries.len(),
                pathway.relations.len(),
                pathway.reactions.len()
            );
            out.push(pathway);
        }
        Ok(out)
    }

    fn translate_pathway(
        &self,
        model: &PaxModel,
        element: &PaxElement,
        components: &[PaxId],
        resolver: &IdentifierResolver,
        counters: &mut RunCounters,
        stats: &mut AugmentationStats,
    ) -> Result<Pathway> {
        let hint = trailing_number(&element.uri);
        let number = counters.pathway_numbers.number_for(&element.uri, hint);
        let abbr = resolver.species().kegg_abbr.clone();
        let title = element.display_name().unwrap_or(&element.uri).to_string();
        let mut pathway = Pathway::new(format!("path:{}{:05}", abbr, number), abbr, number, title);
        let mut classifier =
            Classifier::new(model, resolver, Mode::Build, &mut pathway, counters, stats);
        for &component in components {
            classifier.classify(component)?;
        }
        Ok(pathway)
    }

    /// Augment an existing pathway with relations inferred from a source
    /// document. Strictly additive: entries and reactions are untouched.
    pub fn augment(&self, model: &PaxModel, pathway: &mut Pathway) -> Result<AugmentationStats> {
        let mut counters = RunCounters::new();
        let mut stats = AugmentationStats::default();
        let species = match self.species.by_abbr(&pathway.org) {
            Some(s) => s.clone(),
            None => {
                log::warn!(
                    "pathway organism '{}' not in the table, using default",
                    pathway.org
                );
                self.species.default_species().clone()
            }
        };
        let resolver = IdentifierResolver::new(&species, self.factory.as_ref());
        let entries_before = pathway.entries.len();
        let mut classifier = Classifier::new(
            model,
            &resolver,
            Mode::Augment,
            pathway,
            &mut counters,
            &mut stats,
        );
        for id in model.interactions() {
            classifier.classify(id)?;
        }
        debug_assert_eq!(entries_before, pathway.entries.len());
        log::info!(
            "augmentation: {} relations added, {} subtypes merged",
            stats.relations_added,
            stats.subtypes_merged
        );
        Ok(stats)
    }
}
