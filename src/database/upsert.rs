//! Fill-gap upsert of fused entities against the record store
//!
//! The durable half of the merge contract: the same fill-gap rule the
//! orchestrator applies in memory is applied here column by column against
//! the stored row, never as a whole-object replace. Person rows are keyed
//! by (transaction_id, identity_key); an unresolvable key always inserts a
//! fresh row and never attempts to match. Property and deal rows are
//! singletons per transaction.
//!
//! Two concurrent invocations for the same transaction can both observe
//! "no existing row" and both insert. Deployments needing correctness under
//! concurrency must add a uniqueness constraint on (transaction_id,
//! identity_key) or an external lock around the upsert phase.

use anyhow::Result;
use serde_json::{json, Value as JsonValue};
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::store::{tables, RecordStore};
use crate::merge::{attribute, fill_gap, Provenance};
use crate::models::{Deal, Person, Property, Role};
use crate::normalize::normalize_identity_key;
use crate::orchestrator::MappedFields;

/// Explicit result of one entity upsert
#[derive(Debug, Clone, PartialEq)]
pub enum UpsertOutcome {
    Inserted { id: Uuid },
    Updated { id: Uuid, fields_filled: Vec<String> },
}

/// Aggregated result of persisting a whole mapping run.
///
/// Partial success is legitimate: failed entities are listed here, not
/// raised.
#[derive(Debug, Default)]
pub struct PersistSummary {
    pub inserted: usize,
    pub updated: usize,
    pub failed: usize,
    pub errors: Vec<String>,
}

impl PersistSummary {
    fn record(&mut self, entity: &str, result: Result<UpsertOutcome>) {
        match result {
            Ok(UpsertOutcome::Inserted { id }) => {
                debug!(entity, %id, "inserted");
                self.inserted += 1;
            }
            Ok(UpsertOutcome::Updated { id, fields_filled }) => {
                debug!(entity, %id, filled = fields_filled.len(), "updated");
                self.updated += 1;
            }
            Err(e) => {
                warn!(entity, error = %e, "upsert failed, continuing with remaining entities");
                self.failed += 1;
                self.errors.push(format!("{entity}: {e:#}"));
            }
        }
    }
}

/// Service applying the fill-gap contract against a record store
pub struct UpsertService<S: RecordStore> {
    store: S,
}

impl<S: RecordStore> UpsertService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Upsert one person row, keyed by (transaction_id, identity_key).
    pub async fn upsert_person(
        &self,
        person: &Person,
        transaction_id: Uuid,
        role: Role,
    ) -> Result<UpsertOutcome> {
        let (entity, provenance) = split_provenance(person)?;
        let key = person
            .cpf
            .as_deref()
            .and_then(|cpf| normalize_identity_key(cpf).digits().map(String::from));

        let Some(key) = key else {
            // Unresolvable identity: never attempt to match a stored row.
            let id = self
                .store
                .insert(
                    tables::PERSONS,
                    json!({
                        "transaction_id": transaction_id.to_string(),
                        "identity_key": JsonValue::Null,
                        "role": role,
                        "person": entity,
                        "provenance": provenance,
                    }),
                )
                .await?;
            return Ok(UpsertOutcome::Inserted { id });
        };

        let filter = json!({
            "transaction_id": transaction_id.to_string(),
            "identity_key": key,
        });
        match self.store.find_one(tables::PERSONS, &filter).await? {
            Some(row) => {
                self.fill_gap_update(tables::PERSONS, row, "person", &entity, &provenance)
                    .await
            }
            None => {
                let id = self
                    .store
                    .insert(
                        tables::PERSONS,
                        json!({
                            "transaction_id": transaction_id.to_string(),
                            "identity_key": key,
                            "role": role,
                            "person": entity,
                            "provenance": provenance,
                        }),
                    )
                    .await?;
                Ok(UpsertOutcome::Inserted { id })
            }
        }
    }

    /// Upsert the transaction's singleton property row.
    pub async fn upsert_property(
        &self,
        property: &Property,
        transaction_id: Uuid,
    ) -> Result<UpsertOutcome> {
        let (entity, provenance) = split_provenance(property)?;
        self.upsert_singleton(tables::PROPERTIES, "property", transaction_id, entity, provenance)
            .await
    }

    /// Upsert the transaction's singleton deal row.
    pub async fn upsert_deal(&self, deal: &Deal, transaction_id: Uuid) -> Result<UpsertOutcome> {
        let (entity, provenance) = split_provenance(deal)?;
        self.upsert_singleton(tables::DEALS, "deal", transaction_id, entity, provenance)
            .await
    }

    /// Persist a full mapping run, one entity at a time.
    ///
    /// Each failure is caught and logged individually; processing always
    /// continues with the remaining entities.
    pub async fn persist_mapped_fields(
        &self,
        mapped: &MappedFields,
        transaction_id: Uuid,
    ) -> PersistSummary {
        let mut summary = PersistSummary::default();

        for (role, persons) in [
            (Role::Alienante, &mapped.alienantes),
            (Role::Adquirente, &mapped.adquirentes),
            (Role::Anuente, &mapped.anuentes),
        ] {
            for person in persons {
                let result = self.upsert_person(person, transaction_id, role).await;
                summary.record("person", result);
            }
        }

        // Singletons are only created once some document supplied a field.
        if mapped.property != Property::default() {
            let result = self.upsert_property(&mapped.property, transaction_id).await;
            summary.record("property", result);
        }
        if mapped.deal != Deal::default() {
            let result = self.upsert_deal(&mapped.deal, transaction_id).await;
            summary.record("deal", result);
        }

        info!(
            inserted = summary.inserted,
            updated = summary.updated,
            failed = summary.failed,
            %transaction_id,
            "persist phase complete"
        );
        summary
    }

    async fn upsert_singleton(
        &self,
        table: &str,
        column: &str,
        transaction_id: Uuid,
        entity: JsonValue,
        provenance: Provenance,
    ) -> Result<UpsertOutcome> {
        let filter = json!({ "transaction_id": transaction_id.to_string() });
        match self.store.find_one(table, &filter).await? {
            Some(row) => self.fill_gap_update(table, row, column, &entity, &provenance).await,
            None => {
                let id = self
                    .store
                    .insert(
                        table,
                        json!({
                            "transaction_id": transaction_id.to_string(),
                            column: entity,
                            "provenance": provenance,
                        }),
                    )
                    .await?;
                Ok(UpsertOutcome::Inserted { id })
            }
        }
    }

    /// Column-level fill-gap against a stored row: merge the entity
    /// document, union provenance for the filled paths only, touch the
    /// update timestamp.
    async fn fill_gap_update(
        &self,
        table: &str,
        row: super::store::StoredRow,
        column: &str,
        incoming: &JsonValue,
        incoming_provenance: &Provenance,
    ) -> Result<UpsertOutcome> {
        let mut stored = row.columns.get(column).cloned().unwrap_or(JsonValue::Null);
        if !stored.is_object() {
            stored = json!({});
        }
        let filled = fill_gap(&mut stored, incoming);

        let mut stored_provenance: Provenance = row
            .columns
            .get("provenance")
            .cloned()
            .map(serde_json::from_value)
            .transpose()?
            .unwrap_or_default();
        for path in &filled {
            if let Some(sources) = incoming_provenance.get(path) {
                attribute(&mut stored_provenance, std::slice::from_ref(path), sources);
            }
        }

        if filled.is_empty() {
            // Nothing to write, but the row was reprocessed: touch the
            // timestamp so stale-data monitoring sees the run.
            self.store.update(table, row.id, json!({})).await?;
            return Ok(UpsertOutcome::Updated {
                id: row.id,
                fields_filled: filled,
            });
        }

        self.store
            .update(
                table,
                row.id,
                json!({ column: stored, "provenance": stored_provenance }),
            )
            .await?;
        Ok(UpsertOutcome::Updated {
            id: row.id,
            fields_filled: filled,
        })
    }
}

/// Serialize an entity, splitting its provenance map into its own column.
fn split_provenance<T: serde::Serialize>(entity: &T) -> Result<(JsonValue, Provenance)> {
    let mut value = serde_json::to_value(entity)?;
    let provenance = match value.as_object_mut().and_then(|m| m.remove("provenance")) {
        Some(p) => serde_json::from_value(p)?,
        None => Provenance::default(),
    };
    Ok((value, provenance))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::MemoryRecordStore;

    fn person(cpf: Option<&str>, nome: Option<&str>) -> Person {
        Person {
            cpf: cpf.map(String::from),
            nome: nome.map(String::from),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_person_insert_then_fill_gap_update() {
        let service = UpsertService::new(MemoryRecordStore::new());
        let tx = Uuid::new_v4();

        let mut first = person(Some("123.456.789-00"), Some("JOAO SILVA"));
        first
            .provenance
            .insert("nome".to_string(), vec!["rg.pdf".to_string()]);
        let outcome = service
            .upsert_person(&first, tx, Role::Alienante)
            .await
            .unwrap();
        assert!(matches!(outcome, UpsertOutcome::Inserted { .. }));

        // Second run: same key, new field, conflicting name.
        let mut second = person(Some("12345678900"), Some("NOME ERRADO"));
        second.profissao = Some("engenheiro".to_string());
        second
            .provenance
            .insert("profissao".to_string(), vec!["contrato.pdf".to_string()]);
        let outcome = service
            .upsert_person(&second, tx, Role::Alienante)
            .await
            .unwrap();
        match outcome {
            UpsertOutcome::Updated { fields_filled, .. } => {
                assert_eq!(fields_filled, vec!["profissao"]);
            }
            other => panic!("expected Updated, got {other:?}"),
        }

        let rows = service.store().rows(tables::PERSONS);
        assert_eq!(rows.len(), 1);
        let columns = &rows[0].columns;
        assert_eq!(columns["person"]["nome"], "JOAO SILVA");
        assert_eq!(columns["person"]["profissao"], "engenheiro");
        assert_eq!(columns["provenance"]["nome"][0], "rg.pdf");
        assert_eq!(columns["provenance"]["profissao"][0], "contrato.pdf");
    }

    #[tokio::test]
    async fn test_unresolvable_key_always_inserts() {
        let service = UpsertService::new(MemoryRecordStore::new());
        let tx = Uuid::new_v4();

        let anonymous = person(None, Some("MARIA SILVA"));
        service
            .upsert_person(&anonymous, tx, Role::Anuente)
            .await
            .unwrap();
        service
            .upsert_person(&anonymous, tx, Role::Anuente)
            .await
            .unwrap();

        // Same mention twice, no key: two rows, never matched.
        assert_eq!(service.store().row_count(tables::PERSONS), 2);
    }

    #[tokio::test]
    async fn test_property_singleton_per_transaction() {
        let service = UpsertService::new(MemoryRecordStore::new());
        let tx = Uuid::new_v4();

        let first = Property {
            matricula: Some("12.345".to_string()),
            ..Default::default()
        };
        let outcome = service.upsert_property(&first, tx).await.unwrap();
        assert!(matches!(outcome, UpsertOutcome::Inserted { .. }));

        let second = Property {
            matricula: Some("99.999".to_string()),
            valor_venal: Some(280_000.0),
            ..Default::default()
        };
        let outcome = service.upsert_property(&second, tx).await.unwrap();
        match outcome {
            UpsertOutcome::Updated { fields_filled, .. } => {
                assert_eq!(fields_filled, vec!["valor_venal"]);
            }
            other => panic!("expected Updated, got {other:?}"),
        }

        let rows = service.store().rows(tables::PROPERTIES);
        assert_eq!(rows.len(), 1);
        // Filled matricula survives the conflicting second run.
        assert_eq!(rows[0].columns["property"]["matricula"], "12.345");
        assert_eq!(rows[0].columns["property"]["valor_venal"], 280_000.0);
    }

    #[tokio::test]
    async fn test_distinct_transactions_do_not_collide() {
        let service = UpsertService::new(MemoryRecordStore::new());
        let property = Property {
            matricula: Some("1".to_string()),
            ..Default::default()
        };
        service
            .upsert_property(&property, Uuid::new_v4())
            .await
            .unwrap();
        service
            .upsert_property(&property, Uuid::new_v4())
            .await
            .unwrap();
        assert_eq!(service.store().row_count(tables::PROPERTIES), 2);
    }
}
