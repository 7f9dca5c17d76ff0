//! Entity identifier resolution.
//!
//! Maps a BioPAX element onto the KEGG identifier its KGML entry will
//! carry: Entrez Gene xrefs first, gene-symbol lookups second, synthesized
//! `unknownN` placeholders last. The two lookup collaborators are injected
//! as traits so they can be rebuilt per organism and faked in tests.

use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use crate::error::Result;
use crate::model::PaxElement;
use crate::resolve::Species;

/// Gene symbol → Entrez gene id lookup.
pub trait GeneSymbolMapper {
    fn map(&self, symbol: &str) -> Option<u64>;
}

/// Entrez gene id → organism-specific KEGG code lookup (`hsa:7157`).
pub trait GeneCodeMapper {
    fn map(&self, gene_id: u64) -> Option<String>;
}

/// Builds both mappers for a resolved species.
///
/// The translator calls this again whenever the organism changes between
/// pathways, so one pathway's lookups never leak into the next organism's.
pub trait MapperFactory {
    fn symbol_mapper(&self, species: &Species) -> Box<dyn GeneSymbolMapper>;
    fn code_mapper(&self, species: &Species) -> Box<dyn GeneCodeMapper>;
}

/// HashMap-backed mapper tables, loadable from JSON files.
///
/// The tables are single-organism: whoever constructs the factory supplies
/// tables for the organisms of the current run, so `species` is not
/// consulted here.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TableMapperFactory {
    #[serde(default)]
    symbols: HashMap<String, u64>,
    #[serde(default)]
    codes: HashMap<u64, String>,
}

impl TableMapperFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_symbol(mut self, symbol: impl Into<String>, gene_id: u64) -> Self {
        self.symbols.insert(symbol.into(), gene_id);
        self
    }

    pub fn with_code(mut self, gene_id: u64, code: impl Into<String>) -> Self {
        self.codes.insert(gene_id, code.into());
        self
    }

    /// Load mapping tables from optional JSON files:
    /// `{"TP53": 7157}` for symbols, `{"7157": "hsa:7157"}` for codes.
    pub fn from_files(symbols: Option<&Path>, codes: Option<&Path>) -> Result<Self> {
        let mut factory = Self::new();
        if let Some(path) = symbols {
            let text = std::fs::read_to_string(path)?;
            factory.symbols = serde_json::from_str(&text)?;
        }
        if let Some(path) = codes {
            let text = std::fs::read_to_string(path)?;
            factory.codes = serde_json::from_str(&text)?;
        }
        Ok(factory)
    }
}

impl MapperFactory for TableMapperFactory {
    fn symbol_mapper(&self, _species: &Species) -> Box<dyn GeneSymbolMapper> {
        Box::new(TableSymbolMapper(self.symbols.clone()))
    }

    fn code_mapper(&self, _species: &Species) -> Box<dyn GeneCodeMapper> {
        Box::new(TableCodeMapper(self.codes.clone()))
    }
}

struct TableSymbolMapper(HashMap<String, u64>);

impl GeneSymbolMapper for TableSymbolMapper {
    fn map(&self, symbol: &str) -> Option<u64> {
        self.0.get(symbol).copied()
    }
}

struct TableCodeMapper(HashMap<u64, String>);

impl GeneCodeMapper for TableCodeMapper {
    fn map(&self, gene_id: u64) -> Option<String> {
        self.0.get(&gene_id).cloned()
    }
}

/// Run-scoped issuer of `unknownN` placeholder names, N starting at 1.
#[derive(Debug, Clone, Default)]
pub struct PlaceholderNames {
    issued: u32,
}

impl PlaceholderNames {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&mut self) -> String {
        self.issued += 1;
        format!("unknown{}", self.issued)
    }

    pub fn issued(&self) -> u32 {
        self.issued
    }
}

/// True for names synthesized by [`PlaceholderNames`].
pub fn is_placeholder(name: &str) -> bool {
    name.starts_with("unknown")
}

/// True for xref database tags naming the Entrez Gene authority.
fn is_entrez(db: &str) -> bool {
    db.to_ascii_lowercase()
        .replace([' ', '_', '-'], "")
        .contains("entrez")
}

/// Lookup variants tried for one declared name, in retry order: the raw
/// name; each `/` token; the name with `-` stripped; the name with `-` and
/// spaces replaced by `_`.
fn symbol_variants(name: &str) -> Vec<String> {
    let mut variants: Vec<String> = vec![name.to_string()];
    let mut push = |v: String| {
        if !v.is_empty() && !variants.contains(&v) {
            variants.push(v);
        }
    };
    if name.contains('/') {
        for token in name.split('/') {
            push(token.trim().to_string());
        }
    }
    push(name.replace('-', ""));
    push(name.replace(['-', ' '], "_"));
    variants
}

/// Resolves source entities to KEGG identifiers for one organism.
pub struct IdentifierResolver {
    species: Species,
    symbols: Box<dyn GeneSymbolMapper>,
    codes: Box<dyn GeneCodeMapper>,
}

impl IdentifierResolver {
    pub fn new(species: &Species, factory: &dyn MapperFactory) -> Self {
        Self {
            species: species.clone(),
            symbols: factory.symbol_mapper(species),
            codes: factory.code_mapper(species),
        }
    }

    pub fn species(&self) -> &Species {
        &self.species
    }

    /// Resolve an element to its output identifier.
    ///
    /// Never fails: an element nothing can resolve gets the next
    /// placeholder name.
    pub fn resolve(&self, element: &PaxElement, placeholders: &mut PlaceholderNames) -> String {
        for xref in &element.xrefs {
            if !is_entrez(&xref.db) {
                continue;
            }
            if let Ok(gene_id) = xref.id.trim().parse::<u64>() {
                return self.code_for(gene_id);
            }
            log::warn!(
                "non-numeric Entrez Gene id '{}' on '{}'",
                xref.id,
                element.uri
            );
        }

        for name in &element.names {
            for variant in symbol_variants(name) {
                if let Some(gene_id) = self.symbols.map(&variant) {
                    return self.code_for(gene_id);
                }
            }
        }

        let placeholder = placeholders.next();
        log::debug!("no identifier for '{}', assigned {}", element.uri, placeholder);
        placeholder
    }

    /// Map a gene id through the organism code table, falling back to the
    /// `<abbr>:<id>` form when the table has no row for it.
    fn code_for(&self, gene_id: u64) -> String {
        match self.codes.map(gene_id) {
            Some(code) => code,
            None => {
                log::warn!(
                    "gene id {} not in the {} code table, synthesizing identifier",
                    gene_id,
                    self.species.kegg_abbr
                );
                format!("{}:{}", self.species.kegg_abbr, gene_id)
            }
        }
    }
}
