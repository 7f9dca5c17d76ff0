//! Identifier and species resolution.

mod identifiers;
mod species;

pub use identifiers::{
    is_placeholder, GeneCodeMapper, GeneSymbolMapper, IdentifierResolver, MapperFactory,
    PlaceholderNames, TableMapperFactory,
};
pub use species::{default_table, load_table, Species, SpeciesField, SpeciesResolver};
