//! Clearance certificates (CNDT and other negative-debt certificates)
//!
//! Certificates are issued against a person (or organization), so the
//! fragment is a person mention keyed by the certificate's CPF/CNPJ. Only
//! the labor-debt certificate (CNDT) has a modeled sub-record; the other
//! clearance types contribute the identity mention alone.

use serde_json::Value as JsonValue;

use super::{display_identity, first_str, str_field, DocumentMapper, MappedFragment};
use crate::models::{LaborDebtCertificate, Person};

pub struct ClearanceMapper {
    /// Whether this instance handles the labor-debt certificate, the one
    /// clearance type with a modeled sub-record.
    pub labor: bool,
}

impl DocumentMapper for ClearanceMapper {
    fn map(&self, fields: &JsonValue) -> MappedFragment {
        let mut person = Person {
            nome: first_str(fields, &["nome", "razao_social"]),
            cpf: first_str(fields, &["cpf", "cnpj"]).map(|raw| display_identity(&raw)),
            ..Default::default()
        };

        if self.labor {
            let certificate = LaborDebtCertificate {
                numero: first_str(fields, &["numero_certidao", "numero"]),
                data_emissao: str_field(fields, "data_emissao"),
                validade: str_field(fields, "validade"),
                situacao: str_field(fields, "situacao"),
            };
            if certificate != LaborDebtCertificate::default() {
                person.cnd_trabalhista = Some(certificate);
            }
        }

        if person == Person::default() {
            return MappedFragment::default();
        }
        MappedFragment {
            persons: vec![(person, None)],
            ..Default::default()
        }
    }
}
