//! Corporate documents (contrato social, cartão CNPJ)
//!
//! Organization parties ride the same Person record, keyed by the 14-digit
//! CNPJ instead of a CPF. Articles of association also mention the managing
//! partners, who become their own person mentions.

use serde_json::Value as JsonValue;

use super::{
    address_from, arr_field, display_identity, first_str, person_from_obj, DocumentMapper,
    MappedFragment,
};
use crate::models::Person;

pub struct CorporateMapper;

impl DocumentMapper for CorporateMapper {
    fn map(&self, fields: &JsonValue) -> MappedFragment {
        let mut fragment = MappedFragment::default();

        let organization = Person {
            nome: first_str(fields, &["razao_social", "nome_empresarial", "nome"]),
            cpf: first_str(fields, &["cnpj"]).map(|raw| display_identity(&raw)),
            endereco: address_from(fields),
            ..Default::default()
        };
        if organization != Person::default() {
            fragment.persons.push((organization, None));
        }

        if let Some(partners) = arr_field(fields, "socios") {
            for partner in partners {
                let person = person_from_obj(partner);
                if person != Person::default() {
                    fragment.persons.push((person, None));
                }
            }
        }

        fragment
    }
}
