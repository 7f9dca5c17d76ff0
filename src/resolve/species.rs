//! Organism table and species resolution.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;
use crate::model::BioSource;

/// One row of the KEGG organism table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Species {
    pub scientific_name: String,
    pub common_name: String,
    /// KEGG organism abbreviation, e.g. `hsa`.
    pub kegg_abbr: String,
    /// NCBI taxonomy id.
    pub taxonomy_id: u32,
}

impl Species {
    pub fn new(
        scientific_name: impl Into<String>,
        common_name: impl Into<String>,
        kegg_abbr: impl Into<String>,
        taxonomy_id: u32,
    ) -> Self {
        Self {
            scientific_name: scientific_name.into(),
            common_name: common_name.into(),
            kegg_abbr: kegg_abbr.into(),
            taxonomy_id,
        }
    }

    /// Search a species list by one key field. Name fields compare
    /// case-insensitively; the taxonomy field parses the key as a number.
    pub fn search<'a>(list: &'a [Species], key: &str, field: SpeciesField) -> Option<&'a Species> {
        match field {
            SpeciesField::ScientificName => list
                .iter()
                .find(|s| s.scientific_name.eq_ignore_ascii_case(key)),
            SpeciesField::CommonName => list
                .iter()
                .find(|s| s.common_name.eq_ignore_ascii_case(key)),
            SpeciesField::KeggAbbr => list.iter().find(|s| s.kegg_abbr.eq_ignore_ascii_case(key)),
            SpeciesField::TaxonomyId => {
                let id: u32 = key.trim().parse().ok()?;
                list.iter().find(|s| s.taxonomy_id == id)
            }
        }
    }
}

/// Which field of [`Species`] a search key refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeciesField {
    ScientificName,
    CommonName,
    KeggAbbr,
    TaxonomyId,
}

/// Built-in organism table covering the common model organisms.
///
/// The full KEGG organism list is loaded externally; this default keeps the
/// tool usable without one.
pub fn default_table() -> Vec<Species> {
    vec![
        Species::new("Homo sapiens", "human", "hsa", 9606),
        Species::new("Mus musculus", "mouse", "mmu", 10090),
        Species::new("Rattus norvegicus", "rat", "rno", 10116),
        Species::new("Danio rerio", "zebrafish", "dre", 7955),
        Species::new("Drosophila melanogaster", "fruit fly", "dme", 7227),
        Species::new("Caenorhabditis elegans", "nematode", "cel", 6239),
        Species::new("Saccharomyces cerevisiae", "budding yeast", "sce", 4932),
        Species::new("Arabidopsis thaliana", "thale cress", "ath", 3702),
        Species::new("Escherichia coli K-12 MG1655", "E. coli", "eco", 511145),
    ]
}

/// Load an organism table from a JSON file (array of [`Species`]).
pub fn load_table(path: &Path) -> Result<Vec<Species>> {
    let text = std::fs::read_to_string(path)?;
    let table: Vec<Species> = serde_json::from_str(&text)?;
    Ok(table)
}

/// Determines the organism governing a pathway from its BioSource
/// annotation, falling back to a configured default.
#[derive(Debug, Clone)]
pub struct SpeciesResolver {
    table: Vec<Species>,
    default: Species,
}

impl SpeciesResolver {
    /// The default species must itself be in the table; callers construct
    /// via [`with_default`](Self::with_default) which enforces that.
    pub fn with_default(table: Vec<Species>, default_abbr: &str) -> Option<Self> {
        let default = Species::search(&table, default_abbr, SpeciesField::KeggAbbr)?.clone();
        Some(Self { table, default })
    }

    pub fn default_species(&self) -> &Species {
        &self.default
    }

    pub fn by_abbr(&self, abbr: &str) -> Option<&Species> {
        Species::search(&self.table, abbr, SpeciesField::KeggAbbr)
    }

    /// Resolve the organism of a pathway.
    ///
    /// Preference order: taxonomy xref, declared name (scientific then
    /// common), configured default. Lookup misses are logged, never fatal.
    pub fn resolve(&self, organism: Option<&BioSource>) -> &Species {
        let Some(source) = organism else {
            log::debug!(
                "pathway has no organism annotation, using default '{}'",
                self.default.kegg_abbr
            );
            return &self.default;
        };

        if let Some(taxonomy) = &source.taxonomy {
            if let Some(species) = Species::search(&self.table, taxonomy, SpeciesField::TaxonomyId)
            {
                return species;
            }
        }

        if let Some(name) = &source.name {
            if let Some(species) = Species::search(&self.table, name, SpeciesField::ScientificName)
                .or_else(|| Species::search(&self.table, name, SpeciesField::CommonName))
            {
                return species;
            }
        }

        log::warn!(
            "unknown organism (name={:?}, taxonomy={:?}), using default '{}'",
            source.name,
            source.taxonomy,
            self.default.kegg_abbr
        );
        &self.default
    }
}
