//! Best-effort fallback mapper for unclassified documents
//!
//! Projects whatever recognizable person/property/deal keys it finds at the
//! top level of the extraction object. Never fails: a document with nothing
//! recognizable contributes an empty fragment.

use serde_json::Value as JsonValue;

use super::{currency_field, first_str, person_from_obj, DocumentMapper, MappedFragment};
use crate::models::{Deal, Person, Property};

pub struct GenericMapper;

impl DocumentMapper for GenericMapper {
    fn map(&self, fields: &JsonValue) -> MappedFragment {
        let mut fragment = MappedFragment::default();

        let person = person_from_obj(fields);
        if person != Person::default() {
            fragment.persons.push((person, None));
        }

        let property = Property {
            matricula: first_str(fields, &["matricula", "numero_matricula"]),
            inscricao_municipal: first_str(fields, &["inscricao_municipal"]),
            valor_venal: currency_field(fields, "valor_venal"),
            ..Default::default()
        };
        if property != Property::default() {
            fragment.property = Some(property);
        }

        let deal = Deal {
            tipo_negocio: first_str(fields, &["tipo_negocio"]),
            valor_total: currency_field(fields, "valor_total"),
            ..Default::default()
        };
        if deal != Deal::default() {
            fragment.deal = Some(deal);
        }

        fragment
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_generic_extracts_recognizable_keys() {
        let fields = json!({
            "nome": "MARIA SILVA",
            "cpf": "98765432100",
            "matricula": "55.123",
            "campo_desconhecido": true
        });
        let fragment = GenericMapper.map(&fields);
        assert_eq!(fragment.persons.len(), 1);
        assert_eq!(fragment.property.unwrap().matricula.as_deref(), Some("55.123"));
        assert!(fragment.deal.is_none());
    }

    #[test]
    fn test_generic_tolerates_garbage() {
        let fragment = GenericMapper.map(&json!({ "x": [1, 2, 3] }));
        assert!(fragment.persons.is_empty());
        assert!(fragment.property.is_none());
        assert!(fragment.deal.is_none());
    }
}
