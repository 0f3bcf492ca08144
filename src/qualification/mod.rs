//! Qualification text generation — template-based, deterministic, LLM-free
//!
//! Produces the formal notarial prose that identifies each party, the
//! property and the deal terms. Pure functions of the fused records: no
//! hidden state, no randomness, no clock. Calling any generator twice with
//! the same input yields byte-identical output, which downstream template
//! assembly relies on.

pub mod extenso;
mod deal;
mod person;
mod property;

pub use deal::qualify_deal;
pub use extenso::{currency_extenso, format_brl, number_extenso};
pub use person::qualify_person;
pub use property::qualify_property;

use crate::orchestrator::MappedFields;

/// Qualification prose for every entity of a mapping run, ready for the
/// external template assembler.
#[derive(Debug, Clone, serde::Serialize)]
pub struct QualificationSet {
    pub alienantes: Vec<String>,
    pub adquirentes: Vec<String>,
    pub anuentes: Vec<String>,
    pub property: String,
    pub deal: String,
}

/// Generate the full qualification set for a mapping result.
pub fn qualify_all(mapped: &MappedFields) -> QualificationSet {
    QualificationSet {
        alienantes: mapped.alienantes.iter().map(qualify_person).collect(),
        adquirentes: mapped.adquirentes.iter().map(qualify_person).collect(),
        anuentes: mapped.anuentes.iter().map(qualify_person).collect(),
        property: qualify_property(&mapped.property),
        deal: qualify_deal(&mapped.deal),
    }
}
