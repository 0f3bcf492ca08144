//! Mapping orchestrator: priority ordering, identity dedup, assembly
//!
//! Processes the transaction's documents strictly sequentially in
//! descending type-priority order and threads an explicit `MergeContext`
//! through the run — no shared mutable state. Because the fill-gap merge
//! never overwrites a filled field, the processing order is the only
//! tie-break: the first document type to supply a field wins it
//! permanently.
//!
//! Person mentions are deduplicated by normalized identity key. A mention
//! with no resolvable key is always inserted standalone — two unkeyed
//! mentions of the same real person stay separate records. Role bucketing
//! is decided by whichever document introduces the person first;
//! identity-only documents default new persons into the alienante bucket.

use std::collections::HashMap;

use serde::Serialize;
use tracing::{debug, info};

use crate::alerts::derive_alerts;
use crate::error::EngineError;
use crate::mappers::{MappedFragment, MapperRegistry};
use crate::merge::merge_entity;
use crate::models::{Alert, Deal, DocumentRecord, Person, Property, Role};
use crate::normalize::normalize_identity_key;

/// Per-run bookkeeping surfaced to the caller
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunMetadata {
    pub documents_processed: usize,
    pub fields_filled: usize,
    /// Required paths the run could not fill, e.g. `"property.matricula"`.
    pub missing_field_paths: Vec<String>,
}

/// The fused, deduplicated, source-attributed output of one mapping run
#[derive(Debug, Clone, Serialize)]
pub struct MappedFields {
    pub alienantes: Vec<Person>,
    pub adquirentes: Vec<Person>,
    pub anuentes: Vec<Person>,
    pub property: Property,
    pub deal: Deal,
    pub alerts: Vec<Alert>,
    pub metadata: RunMetadata,
}

struct PersonSlot {
    role: Role,
    person: Person,
}

/// Explicit aggregation state threaded through the pipeline
#[derive(Default)]
struct MergeContext {
    slots: Vec<PersonSlot>,
    by_key: HashMap<String, usize>,
    property: Property,
    deal: Deal,
    alerts: Vec<Alert>,
    documents_processed: usize,
    fields_filled: usize,
}

impl MergeContext {
    fn absorb(&mut self, fragment: MappedFragment, source: &str) -> Result<(), EngineError> {
        for (incoming, role_hint) in fragment.persons {
            self.absorb_person(incoming, role_hint, source)?;
        }
        if let Some(property) = fragment.property {
            let filled = merge_entity(&mut self.property, &property, source)?;
            self.fields_filled += filled.len();
        }
        if let Some(deal) = fragment.deal {
            let filled = merge_entity(&mut self.deal, &deal, source)?;
            self.fields_filled += filled.len();
        }
        self.alerts.extend(fragment.alerts);
        self.documents_processed += 1;
        Ok(())
    }

    fn absorb_person(
        &mut self,
        incoming: Person,
        role_hint: Option<Role>,
        source: &str,
    ) -> Result<(), EngineError> {
        let key = incoming
            .cpf
            .as_deref()
            .and_then(|cpf| normalize_identity_key(cpf).digits().map(String::from));

        if let Some(index) = key.as_ref().and_then(|k| self.by_key.get(k)).copied() {
            // Existing record: fill gaps only. The role was fixed by the
            // first document that introduced the person.
            let filled = merge_entity(&mut self.slots[index].person, &incoming, source)?;
            debug!(key = ?key, filled = filled.len(), source, "merged person mention");
            self.fields_filled += filled.len();
            return Ok(());
        }

        // New record. Unresolvable keys never match anything; the mention
        // is inserted standalone even if it duplicates a real person.
        let mut person = Person::default();
        let filled = merge_entity(&mut person, &incoming, source)?;
        self.fields_filled += filled.len();

        let role = role_hint.unwrap_or(Role::Alienante);
        let index = self.slots.len();
        debug!(key = ?key, ?role, source, "inserted person record");
        if let Some(k) = key {
            self.by_key.insert(k, index);
        }
        self.slots.push(PersonSlot { role, person });
        Ok(())
    }

    fn finish(mut self) -> MappedFields {
        let mut alienantes = Vec::new();
        let mut adquirentes = Vec::new();
        let mut anuentes = Vec::new();
        for slot in self.slots {
            match slot.role {
                Role::Alienante => alienantes.push(slot.person),
                Role::Adquirente => adquirentes.push(slot.person),
                Role::Anuente => anuentes.push(slot.person),
            }
        }

        self.alerts.extend(derive_alerts(&self.property));

        let mut missing = Vec::new();
        for (bucket, persons) in [
            ("alienantes", &alienantes),
            ("adquirentes", &adquirentes),
            ("anuentes", &anuentes),
        ] {
            for (i, person) in persons.iter().enumerate() {
                if person.cpf.is_none() {
                    missing.push(format!("{bucket}[{i}].cpf"));
                }
                if person.nome.is_none() {
                    missing.push(format!("{bucket}[{i}].nome"));
                }
            }
        }
        if self.property.matricula.is_none() {
            missing.push("property.matricula".to_string());
        }
        if self.deal.tipo_negocio.is_none() {
            missing.push("deal.tipo_negocio".to_string());
        }
        if self.deal.valor_total.is_none() {
            missing.push("deal.valor_total".to_string());
        }

        MappedFields {
            alienantes,
            adquirentes,
            anuentes,
            property: self.property,
            deal: self.deal,
            alerts: self.alerts,
            metadata: RunMetadata {
                documents_processed: self.documents_processed,
                fields_filled: self.fields_filled,
                missing_field_paths: missing,
            },
        }
    }
}

/// Run the full mapping pipeline over one transaction's documents.
///
/// Fatal only when the document list is empty; individual documents never
/// abort the run.
pub fn run_mapping(documents: &[DocumentRecord]) -> Result<MappedFields, EngineError> {
    if documents.is_empty() {
        return Err(EngineError::NoDocuments);
    }

    // Descending priority; the sort is stable, so documents of the same
    // type keep their input order.
    let mut ordered: Vec<&DocumentRecord> = documents.iter().collect();
    ordered.sort_by_key(|d| std::cmp::Reverse(d.document_type.priority()));

    let registry = MapperRegistry::with_defaults();
    let mut context = MergeContext::default();

    for document in ordered {
        let mapper = registry.mapper_for(document.document_type);
        let fragment = mapper.map(&document.extracted_fields);
        context.absorb(fragment, document.source_name())?;
    }

    let mapped = context.finish();
    info!(
        documents = mapped.metadata.documents_processed,
        fields = mapped.metadata.fields_filled,
        persons = mapped.alienantes.len() + mapped.adquirentes.len() + mapped.anuentes.len(),
        alerts = mapped.alerts.len(),
        "mapping run complete"
    );
    Ok(mapped)
}
