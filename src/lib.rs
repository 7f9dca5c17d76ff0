//! pax2kgml: translate BioPAX Level 3 pathway models into KEGG KGML
//! pathway graphs.
//!
//! The crate is the translation engine of a BioPAX-to-KGML converter:
//! classification and dispatch over the source model's entity/interaction
//! classes, entry deduplication, relation and reaction synthesis with merge
//! semantics, identifier resolution, and the two operating modes (build a
//! fresh pathway, or augment an existing one with inferred relations only).
//! Parsing BioPAX OWL and writing KGML XML are external concerns; both ends
//! speak serde-serializable snapshot types instead.

pub mod config;
pub mod error;
pub mod kgml;
pub mod model;
pub mod resolve;
pub mod translate;

pub use config::Config;
pub use error::{Pax2KgmlError, Result};
pub use translate::{AugmentationStats, Mode, Translator};
