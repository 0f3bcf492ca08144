//! Integration tests for the persist phase: mapping output through the
//! upsert service against the in-memory store.

use anyhow::Result;
use async_trait::async_trait;
use serde_json::{json, Value as JsonValue};
use uuid::Uuid;

use minuta_engine::database::store::tables;
use minuta_engine::database::{MemoryRecordStore, RecordStore, StoredRow, UpsertService};
use minuta_engine::models::{DocumentRecord, DocumentType};
use minuta_engine::orchestrator::run_mapping;

fn bundle() -> Vec<DocumentRecord> {
    vec![
        DocumentRecord {
            id: Uuid::new_v4(),
            document_type: DocumentType::Rg,
            original_filename: "rg_joao.pdf".to_string(),
            extracted_fields: json!({ "cpf": "12345678900", "nome": "JOAO SILVA" }),
        },
        DocumentRecord {
            id: Uuid::new_v4(),
            document_type: DocumentType::ContratoCompraVenda,
            original_filename: "contrato.pdf".to_string(),
            extracted_fields: json!({
                "compradores": [{ "cpf": "11122233344", "nome": "CARLOS SOUZA" }],
                "valor_total": "350.000,00"
            }),
        },
        DocumentRecord {
            id: Uuid::new_v4(),
            document_type: DocumentType::MatriculaImovel,
            original_filename: "matricula.pdf".to_string(),
            extracted_fields: json!({ "matricula": "12.345" }),
        },
    ]
}

#[tokio::test]
async fn persist_full_run_then_reprocess() {
    let mapped = run_mapping(&bundle()).unwrap();
    let service = UpsertService::new(MemoryRecordStore::new());
    let tx = Uuid::new_v4();

    let summary = service.persist_mapped_fields(&mapped, tx).await;
    assert_eq!(summary.inserted, 4); // two persons, property, deal
    assert_eq!(summary.failed, 0);

    // Reprocessing the same bundle must not duplicate rows.
    let summary = service.persist_mapped_fields(&mapped, tx).await;
    assert_eq!(summary.inserted, 0);
    assert_eq!(summary.updated, 4);
    assert_eq!(service.store().row_count(tables::PERSONS), 2);
    assert_eq!(service.store().row_count(tables::PROPERTIES), 1);
    assert_eq!(service.store().row_count(tables::DEALS), 1);

    // Provenance made it into the person row.
    let rows = service.store().rows(tables::PERSONS);
    let joao = rows
        .iter()
        .find(|r| r.columns["identity_key"] == "12345678900")
        .unwrap();
    assert_eq!(joao.columns["role"], "alienante");
    assert_eq!(joao.columns["provenance"]["nome"][0], "rg_joao.pdf");
}

#[tokio::test]
async fn second_run_fills_gaps_without_overwriting() {
    let service = UpsertService::new(MemoryRecordStore::new());
    let tx = Uuid::new_v4();

    let first = run_mapping(&bundle()).unwrap();
    service.persist_mapped_fields(&first, tx).await;

    // Later bundle for the same transaction adds the profession and a
    // conflicting spelling of the name.
    let later = run_mapping(&[DocumentRecord {
        id: Uuid::new_v4(),
        document_type: DocumentType::ContratoCompraVenda,
        original_filename: "aditivo.pdf".to_string(),
        extracted_fields: json!({
            "vendedores": [{
                "cpf": "123.456.789-00",
                "nome": "J SILVA",
                "profissao": "engenheiro"
            }]
        }),
    }])
    .unwrap();
    service.persist_mapped_fields(&later, tx).await;

    let rows = service.store().rows(tables::PERSONS);
    let joao = rows
        .iter()
        .find(|r| r.columns["identity_key"] == "12345678900")
        .unwrap();
    assert_eq!(joao.columns["person"]["nome"], "JOAO SILVA");
    assert_eq!(joao.columns["person"]["profissao"], "engenheiro");
    assert_eq!(joao.columns["provenance"]["profissao"][0], "aditivo.pdf");
}

/// Store that rejects writes to one table, for exercising per-entity
/// failure isolation.
struct FaultyStore {
    inner: MemoryRecordStore,
    broken_table: String,
}

#[async_trait]
impl RecordStore for FaultyStore {
    async fn find_one(&self, table: &str, filter: &JsonValue) -> Result<Option<StoredRow>> {
        self.inner.find_one(table, filter).await
    }

    async fn insert(&self, table: &str, columns: JsonValue) -> Result<Uuid> {
        if table == self.broken_table {
            anyhow::bail!("simulated write failure on {table}");
        }
        self.inner.insert(table, columns).await
    }

    async fn update(&self, table: &str, id: Uuid, partial: JsonValue) -> Result<()> {
        self.inner.update(table, id, partial).await
    }
}

#[tokio::test]
async fn one_failed_entity_does_not_abort_the_rest() {
    let mapped = run_mapping(&bundle()).unwrap();
    let service = UpsertService::new(FaultyStore {
        inner: MemoryRecordStore::new(),
        broken_table: tables::PROPERTIES.to_string(),
    });
    let tx = Uuid::new_v4();

    let summary = service.persist_mapped_fields(&mapped, tx).await;
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.inserted, 3);
    assert_eq!(summary.errors.len(), 1);
    assert!(summary.errors[0].starts_with("property:"));

    // Persons and the deal landed despite the property failure.
    assert_eq!(service.store().inner.row_count(tables::PERSONS), 2);
    assert_eq!(service.store().inner.row_count(tables::DEALS), 1);
}
