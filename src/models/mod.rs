//! Domain models for the minuta fusion engine
//!
//! Typed representations of everything that flows through the pipeline:
//! the incoming document records, the fused Person/Property/Deal aggregates,
//! and the ephemeral legal alerts. All entity structs are partial by design
//! (Option everywhere) — a document rarely supplies more than a handful of
//! fields, and the fill-gap merge assembles the rest over multiple runs.

pub mod alert;
pub mod deal;
pub mod document;
pub mod person;
pub mod property;

pub use alert::{Alert, AlertSeverity};
pub use deal::{Brokerage, Deal, PaymentTerms, TransferTaxGuide};
pub use document::{DocumentRecord, DocumentType};
pub use person::{Address, CivilStatus, Filiation, LaborDebtCertificate, Person, Role};
pub use property::{Lien, Property};
