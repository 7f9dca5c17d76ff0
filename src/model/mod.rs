//! In-memory BioPAX Level 3 object graph.
//!
//! Elements live in a flat arena and reference each other through [`PaxId`]
//! handles, so stoichiometry matching and deduplication can rely on handle
//! equality instead of value equality. Parsing BioPAX OWL/RDF into this
//! model is a separate concern; the arena itself is serde-serializable as a
//! JSON snapshot for the CLI and for tests.

mod element;

pub use element::{
    BioSource, ControlParts, ControlType, ConversionDirection, ConversionParts, PaxClass,
    PaxElement, Stoichiometry, Xref,
};

use serde::{Deserialize, Serialize};

use crate::error::{Pax2KgmlError, Result};

/// Handle to an element in a [`PaxModel`] arena.
///
/// Two handles are equal iff they name the same element instance, which is
/// exactly the identity semantics BioPAX stoichiometry matching needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaxId(u32);

/// A BioPAX L3 document as a flat element arena.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaxModel {
    elements: Vec<PaxElement>,
}

impl PaxModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an element and return its handle.
    pub fn add(&mut self, element: PaxElement) -> PaxId {
        let id = PaxId(self.elements.len() as u32);
        self.elements.push(element);
        id
    }

    pub fn get(&self, id: PaxId) -> Option<&PaxElement> {
        self.elements.get(id.0 as usize)
    }

    /// Like [`get`](Self::get) but a dangling handle is an error.
    pub fn element(&self, id: PaxId) -> Result<&PaxElement> {
        self.get(id)
            .ok_or_else(|| Pax2KgmlError::DanglingReference(format!("element #{}", id.0)))
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (PaxId, &PaxElement)> {
        self.elements
            .iter()
            .enumerate()
            .map(|(i, e)| (PaxId(i as u32), e))
    }

    /// Handles of all Pathway elements, in arena order.
    pub fn pathways(&self) -> Vec<PaxId> {
        self.iter()
            .filter(|(_, e)| matches!(e.class, PaxClass::Pathway { .. }))
            .map(|(id, _)| id)
            .collect()
    }

    /// Handles of all interaction-class elements, in arena order.
    ///
    /// Used for the whole-model fallback when a document declares no
    /// pathways.
    pub fn interactions(&self) -> Vec<PaxId> {
        self.iter()
            .filter(|(_, e)| e.class.is_interaction())
            .map(|(id, _)| id)
            .collect()
    }
}
