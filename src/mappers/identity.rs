//! Identity documents (RG, CNH, CPF card, passport, proof of address)
//!
//! These documents describe exactly one person and carry no role
//! information, so the person fragment is emitted without a role hint and
//! the orchestrator applies the alienante default.

use serde_json::Value as JsonValue;

use super::{person_from_obj, DocumentMapper, MappedFragment};
use crate::models::Person;

pub struct IdentityDocumentMapper;

impl DocumentMapper for IdentityDocumentMapper {
    fn map(&self, fields: &JsonValue) -> MappedFragment {
        let person = person_from_obj(fields);
        if person == Person::default() {
            return MappedFragment::default();
        }
        MappedFragment {
            persons: vec![(person, None)],
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_rg_maps_identity_fields() {
        let fields = json!({
            "nome": "JOAO SILVA",
            "cpf": "12345678900",
            "rg": "12.345.678-9",
            "orgao_emissor": "SSP",
            "uf_rg": "SP",
            "data_nascimento": "01/01/1980",
            "nome_pai": "JOSE SILVA",
            "nome_mae": "ANA SILVA"
        });
        let fragment = IdentityDocumentMapper.map(&fields);
        assert_eq!(fragment.persons.len(), 1);
        let (person, role) = &fragment.persons[0];
        assert_eq!(*role, None);
        assert_eq!(person.cpf.as_deref(), Some("123.456.789-00"));
        assert_eq!(person.rg.as_deref(), Some("12.345.678-9"));
        assert_eq!(person.rg_orgao_emissor.as_deref(), Some("SSP"));
        assert_eq!(person.filiacao.as_ref().unwrap().pai.as_deref(), Some("JOSE SILVA"));
        assert!(fragment.property.is_none());
        assert!(fragment.deal.is_none());
    }

    #[test]
    fn test_empty_extraction_emits_nothing() {
        let fragment = IdentityDocumentMapper.map(&json!({}));
        assert!(fragment.persons.is_empty());
    }
}
