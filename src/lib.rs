//! Minuta fusion-and-qualification engine
//!
//! Ingests per-document field-extraction results for one real-estate
//! transaction, fuses them into a deduplicated, source-attributed dataset
//! (parties, property, deal terms), derives legal-risk alerts and generates
//! deterministic notarial qualification prose.
//!
//! ## Pipeline
//!
//! Documents -> [`orchestrator::run_mapping`] (priority order, type
//! mappers, fill-gap merge, identity dedup) -> [`orchestrator::MappedFields`]
//! -> [`database::UpsertService`] (durable fill-gap merge) ->
//! [`qualification`] (notarial prose for the template assembler).
//!
//! ## Quick start
//!
//! ```rust
//! use minuta_engine::models::{DocumentRecord, DocumentType};
//! use minuta_engine::orchestrator::run_mapping;
//! use minuta_engine::qualification::qualify_all;
//!
//! let documents = vec![DocumentRecord {
//!     id: uuid::Uuid::new_v4(),
//!     document_type: DocumentType::Rg,
//!     original_filename: "rg.pdf".to_string(),
//!     extracted_fields: serde_json::json!({ "cpf": "12345678900", "nome": "JOAO SILVA" }),
//! }];
//! let mapped = run_mapping(&documents).unwrap();
//! let prose = qualify_all(&mapped);
//! assert_eq!(prose.alienantes[0], "JOAO SILVA, inscrito no CPF/MF sob o nº 123.456.789-00");
//! ```

// Core error handling
pub mod error;

// Environment configuration
pub mod config;

// Domain models
pub mod models;

// Pure field normalizers
pub mod normalize;

// Fill-gap merge with provenance
pub mod merge;

// Per-document-type mappers
pub mod mappers;

// Legal-alert derivation rules
pub mod alerts;

// Mapping orchestration and identity resolution
pub mod orchestrator;

// Qualification text generation
pub mod qualification;

// Persistence upsert layer
pub mod database;

pub use error::EngineError;
pub use orchestrator::{run_mapping, MappedFields};
