//! BioPAX element variants and their payloads.

use serde::{Deserialize, Serialize};

use super::PaxId;

/// External cross-reference (unification/relationship xref).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Xref {
    /// Database tag, e.g. `Entrez Gene`, `Taxonomy`, `uniprot`.
    pub db: String,
    /// Raw identifier within that database.
    pub id: String,
}

impl Xref {
    pub fn new(db: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            db: db.into(),
            id: id.into(),
        }
    }
}

/// Organism annotation of a pathway (BioSource).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BioSource {
    /// Declared organism name, e.g. `Homo sapiens`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// NCBI taxonomy identifier from the unification xref, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub taxonomy: Option<String>,
}

/// BioPAX controlType values, collapsed to their effect.
///
/// The allosteric/nonallosteric distinction of the source vocabulary does
/// not survive translation, only the sign does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ControlType {
    Activation,
    Inhibition,
}

/// BioPAX conversionDirection values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConversionDirection {
    LeftToRight,
    RightToLeft,
    Reversible,
}

/// Per-participant stoichiometric coefficient of a conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stoichiometry {
    /// The participant this coefficient belongs to (matched by handle).
    pub entity: PaxId,
    pub coefficient: u32,
}

/// Shared payload of the control-like interaction classes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ControlParts {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub control_type: Option<ControlType>,
    #[serde(default)]
    pub controllers: Vec<PaxId>,
    #[serde(default)]
    pub controlled: Vec<PaxId>,
}

/// Shared payload of the conversion interaction classes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConversionParts {
    #[serde(default)]
    pub left: Vec<PaxId>,
    #[serde(default)]
    pub right: Vec<PaxId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<ConversionDirection>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub stoichiometry: Vec<Stoichiometry>,
    /// interactionType vocabulary terms, e.g.
    /// `ACTIVATION_NONALLOSTERIC_activation`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub interaction_type: Vec<String>,
}

/// The closed set of BioPAX L3 classes the translator understands.
///
/// The source format's inheritance hierarchy is flattened into one tagged
/// union so the classifier can match exhaustively; a class outside this set
/// never reaches the classifier because it cannot be represented here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PaxClass {
    // Physical entities
    Protein,
    Dna,
    DnaRegion,
    Rna,
    RnaRegion,
    Gene,
    SmallMolecule,
    Complex {
        components: Vec<PaxId>,
    },
    /// Generic or otherwise unrecognized physical entity.
    PhysicalEntity,

    // Containers
    Pathway {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        organism: Option<BioSource>,
        #[serde(default)]
        components: Vec<PaxId>,
    },

    // Control-like interactions
    Control(ControlParts),
    Catalysis(ControlParts),
    Modulation(ControlParts),
    TemplateReactionRegulation(ControlParts),

    // Conversions
    Conversion(ConversionParts),
    BiochemicalReaction(ConversionParts),
    ComplexAssembly(ConversionParts),
    Transport(ConversionParts),
    TransportWithBiochemicalReaction(ConversionParts),
    Degradation(ConversionParts),

    // Other interactions
    TemplateReaction {
        #[serde(default)]
        products: Vec<PaxId>,
    },
    GeneticInteraction {
        #[serde(default)]
        participants: Vec<PaxId>,
    },
    MolecularInteraction {
        #[serde(default)]
        participants: Vec<PaxId>,
    },
    /// Base-class interaction with no more specific shape.
    Interaction {
        #[serde(default)]
        participants: Vec<PaxId>,
    },
}

impl PaxClass {
    /// BioPAX class name, for diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            PaxClass::Protein => "Protein",
            PaxClass::Dna => "Dna",
            PaxClass::DnaRegion => "DnaRegion",
            PaxClass::Rna => "Rna",
            PaxClass::RnaRegion => "RnaRegion",
            PaxClass::Gene => "Gene",
            PaxClass::SmallMolecule => "SmallMolecule",
            PaxClass::Complex { .. } => "Complex",
            PaxClass::PhysicalEntity => "PhysicalEntity",
            PaxClass::Pathway { .. } => "Pathway",
            PaxClass::Control(_) => "Control",
            PaxClass::Catalysis(_) => "Catalysis",
            PaxClass::Modulation(_) => "Modulation",
            PaxClass::TemplateReactionRegulation(_) => "TemplateReactionRegulation",
            PaxClass::Conversion(_) => "Conversion",
            PaxClass::BiochemicalReaction(_) => "BiochemicalReaction",
            PaxClass::ComplexAssembly(_) => "ComplexAssembly",
            PaxClass::Transport(_) => "Transport",
            PaxClass::TransportWithBiochemicalReaction(_) => "TransportWithBiochemicalReaction",
            PaxClass::Degradation(_) => "Degradation",
            PaxClass::TemplateReaction { .. } => "TemplateReaction",
            PaxClass::GeneticInteraction { .. } => "GeneticInteraction",
            PaxClass::MolecularInteraction { .. } => "MolecularInteraction",
            PaxClass::Interaction { .. } => "Interaction",
        }
    }

    /// True for classes that denote things (entities, genes, pathways)
    /// rather than processes.
    pub fn is_entity(&self) -> bool {
        matches!(
            self,
            PaxClass::Protein
                | PaxClass::Dna
                | PaxClass::DnaRegion
                | PaxClass::Rna
                | PaxClass::RnaRegion
                | PaxClass::Gene
                | PaxClass::SmallMolecule
                | PaxClass::Complex { .. }
                | PaxClass::PhysicalEntity
                | PaxClass::Pathway { .. }
        )
    }

    pub fn is_interaction(&self) -> bool {
        !self.is_entity()
    }
}

/// One element of the object graph: class payload plus the annotations every
/// BioPAX element carries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaxElement {
    /// RDF identifier from the source document.
    pub uri: String,
    /// displayName plus any additional names, in declaration order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub names: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub xrefs: Vec<Xref>,
    pub class: PaxClass,
}

impl PaxElement {
    pub fn new(uri: impl Into<String>, class: PaxClass) -> Self {
        Self {
            uri: uri.into(),
            names: Vec::new(),
            xrefs: Vec::new(),
            class,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.names.push(name.into());
        self
    }

    pub fn with_xref(mut self, xref: Xref) -> Self {
        self.xrefs.push(xref);
        self
    }

    /// First declared name, if any.
    pub fn display_name(&self) -> Option<&str> {
        self.names.first().map(String::as_str)
    }

    /// Shortest declared name; ties go to declaration order.
    ///
    /// KGML graphics labels favor the compact gene symbol over the long
    /// descriptive synonyms most source documents also carry.
    pub fn shortest_name(&self) -> Option<&str> {
        self.names
            .iter()
            .min_by_key(|n| n.len())
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_names() {
        assert_eq!(PaxClass::Protein.name(), "Protein");
        assert_eq!(
            PaxClass::Catalysis(ControlParts::default()).name(),
            "Catalysis"
        );
        assert_eq!(
            PaxClass::TemplateReaction {
                products: Vec::new()
            }
            .name(),
            "TemplateReaction"
        );
    }

    #[test]
    fn test_entity_vs_interaction() {
        assert!(PaxClass::SmallMolecule.is_entity());
        assert!(PaxClass::Pathway {
            organism: None,
            components: Vec::new()
        }
        .is_entity());
        assert!(PaxClass::Degradation(ConversionParts::default()).is_interaction());
        assert!(!PaxClass::Gene.is_interaction());
    }

    #[test]
    fn test_shortest_name() {
        let e = PaxElement::new("#p", PaxClass::Protein)
            .with_name("cellular tumor antigen p53")
            .with_name("TP53")
            .with_name("P53");
        assert_eq!(e.display_name(), Some("cellular tumor antigen p53"));
        // TP53 and P53 differ in length; P53 is shortest
        assert_eq!(e.shortest_name(), Some("P53"));
    }

    #[test]
    fn test_shortest_name_tie_keeps_declaration_order() {
        let e = PaxElement::new("#p", PaxClass::Protein)
            .with_name("ABC")
            .with_name("XYZ");
        assert_eq!(e.shortest_name(), Some("ABC"));
    }
}
