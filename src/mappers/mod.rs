//! Type-specific document mappers
//!
//! One pure mapper per supported document type, projecting a raw extraction
//! object into canonical Person/Property/Deal fragments. Mappers are total:
//! absent or malformed sub-fields are simply omitted from the fragment,
//! never an error.
//!
//! Dispatch goes through `MapperRegistry` (document type → mapper) so new
//! document types are added without touching the orchestrator. Types with
//! no registered mapper route to the best-effort generic mapper with a log
//! entry.

mod civil;
mod clearance;
mod contract;
mod corporate;
mod generic;
mod identity;
mod matricula;
mod tax;

use std::collections::HashMap;

use serde_json::Value as JsonValue;
use tracing::warn;

use crate::models::{Address, Alert, Deal, DocumentType, Filiation, Person, Property, Role};
use crate::normalize::{self, format_cnpj, format_cpf, IdentityKey};

pub use generic::GenericMapper;

/// What one document contributes to the transaction
#[derive(Debug, Default)]
pub struct MappedFragment {
    /// Person mentions with an optional explicit role. `None` means the
    /// document is identity-only; the orchestrator defaults those into the
    /// alienante bucket.
    pub persons: Vec<(Person, Option<Role>)>,
    pub property: Option<Property>,
    pub deal: Option<Deal>,
    pub alerts: Vec<Alert>,
}

/// A pure projection from raw extracted fields to canonical fragments
pub trait DocumentMapper: Send + Sync {
    fn map(&self, fields: &JsonValue) -> MappedFragment;
}

/// Registry mapping document type tags to mapper implementations
pub struct MapperRegistry {
    mappers: HashMap<DocumentType, Box<dyn DocumentMapper>>,
    fallback: GenericMapper,
}

impl MapperRegistry {
    /// Build the registry with every supported document type wired in.
    pub fn with_defaults() -> Self {
        use DocumentType::*;

        let mut mappers: HashMap<DocumentType, Box<dyn DocumentMapper>> = HashMap::new();
        for t in [Rg, Cnh, Cpf, Passaporte, ComprovanteEndereco] {
            mappers.insert(t, Box::new(identity::IdentityDocumentMapper));
        }
        for t in [CertidaoCasamento, CertidaoNascimento, CertidaoObito, PactoAntenupcial] {
            mappers.insert(t, Box::new(civil::CivilStatusMapper));
        }
        for t in [ContratoCompraVenda, CompromissoCompraVenda, Escritura] {
            mappers.insert(t, Box::new(contract::ContractMapper));
        }
        for t in [MatriculaImovel, CertidaoOnus] {
            mappers.insert(t, Box::new(matricula::PropertyRegistryMapper));
        }
        for t in [Iptu, CertidaoValorVenal, ItbiGuia] {
            mappers.insert(t, Box::new(tax::MunicipalTaxMapper));
        }
        mappers.insert(
            CndTrabalhista,
            Box::new(clearance::ClearanceMapper { labor: true }),
        );
        for t in [CndFederal, CndEstadual, CndMunicipal, CertidaoDistribuidor] {
            mappers.insert(t, Box::new(clearance::ClearanceMapper { labor: false }));
        }
        for t in [ContratoSocial, CartaoCnpj] {
            mappers.insert(t, Box::new(corporate::CorporateMapper));
        }

        Self {
            mappers,
            fallback: GenericMapper,
        }
    }

    /// Resolve the mapper for a document type, falling back to the generic
    /// mapper (logged, never fatal) for unregistered types.
    pub fn mapper_for(&self, document_type: DocumentType) -> &dyn DocumentMapper {
        match self.mappers.get(&document_type) {
            Some(mapper) => mapper.as_ref(),
            None => {
                if document_type != DocumentType::Outro {
                    warn!(
                        ?document_type,
                        "no mapper registered for document type, using generic fallback"
                    );
                }
                &self.fallback
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Validating accessors over the untyped extraction object
// ---------------------------------------------------------------------------
//
// Extraction results are untrusted: values may be missing, null, numbers
// where strings are expected, or nested under slightly different keys.
// Everything below parses defensively and returns None instead of failing.

/// A trimmed, non-empty string field. Numbers are accepted and stringified.
pub(crate) fn str_field(fields: &JsonValue, key: &str) -> Option<String> {
    match fields.get(key)? {
        JsonValue::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        JsonValue::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// First present value among aliased keys.
pub(crate) fn first_str(fields: &JsonValue, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|&k| str_field(fields, k))
}

/// A nested object field.
pub(crate) fn obj_field<'a>(fields: &'a JsonValue, key: &str) -> Option<&'a JsonValue> {
    fields.get(key).filter(|v| v.is_object())
}

/// An array field.
pub(crate) fn arr_field<'a>(fields: &'a JsonValue, key: &str) -> Option<&'a Vec<JsonValue>> {
    fields.get(key).and_then(|v| v.as_array())
}

/// A monetary field: JSON number, or string in either locale notation.
pub(crate) fn currency_field(fields: &JsonValue, key: &str) -> Option<f64> {
    match fields.get(key)? {
        JsonValue::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        JsonValue::String(s) => normalize::parse_currency(s),
        _ => None,
    }
}

/// An area field: JSON number, or string with unit markers.
pub(crate) fn area_field(fields: &JsonValue, key: &str) -> Option<f64> {
    match fields.get(key)? {
        JsonValue::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        JsonValue::String(s) => normalize::parse_area(s),
        _ => None,
    }
}

/// Display-format a CPF/CNPJ mention according to its resolved scheme.
pub(crate) fn display_identity(raw: &str) -> String {
    match normalize::normalize_identity_key(raw) {
        IdentityKey::Individual(_) => format_cpf(raw),
        IdentityKey::Organization(_) => format_cnpj(raw),
        IdentityKey::Unresolvable => raw.trim().to_string(),
    }
}

/// Project the person-shaped keys of an extraction object into a fragment.
///
/// Shared by every mapper that meets a party. Only recognized keys are
/// read; extra fields are dropped explicitly.
pub(crate) fn person_from_obj(obj: &JsonValue) -> Person {
    let mut person = Person {
        nome: first_str(obj, &["nome", "nome_completo", "razao_social"]),
        cpf: first_str(obj, &["cpf", "cnpj"]).map(|raw| display_identity(&raw)),
        rg: first_str(obj, &["rg", "numero_rg"]),
        rg_orgao_emissor: first_str(obj, &["orgao_emissor", "rg_orgao_emissor"]),
        rg_uf: first_str(obj, &["uf_rg", "rg_uf", "uf_emissao"]),
        cnh: str_field(obj, "cnh"),
        nacionalidade: str_field(obj, "nacionalidade"),
        data_nascimento: str_field(obj, "data_nascimento"),
        naturalidade: str_field(obj, "naturalidade"),
        profissao: str_field(obj, "profissao"),
        estado_civil: str_field(obj, "estado_civil"),
        regime_bens: str_field(obj, "regime_bens"),
        data_casamento: str_field(obj, "data_casamento"),
        conjuge: first_str(obj, &["conjuge", "nome_conjuge"]),
        ..Default::default()
    };

    let pai = first_str(obj, &["nome_pai", "pai"]);
    let mae = first_str(obj, &["nome_mae", "mae"]);
    if pai.is_some() || mae.is_some() {
        person.filiacao = Some(Filiation { pai, mae });
    }

    person.endereco = address_from(obj);
    person
}

/// Address from either a nested object or a single free-text line.
pub(crate) fn address_from(obj: &JsonValue) -> Option<Address> {
    if let Some(nested) = obj_field(obj, "endereco") {
        let address = Address {
            logradouro: str_field(nested, "logradouro"),
            numero: str_field(nested, "numero"),
            complemento: str_field(nested, "complemento"),
            bairro: str_field(nested, "bairro"),
            cidade: str_field(nested, "cidade"),
            uf: str_field(nested, "uf"),
            cep: str_field(nested, "cep"),
        };
        if address != Address::default() {
            return Some(address);
        }
        return None;
    }
    str_field(obj, "endereco").map(|line| Address {
        logradouro: Some(line),
        ..Default::default()
    })
}
