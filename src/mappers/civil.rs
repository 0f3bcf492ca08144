//! Civil-status documents (marriage/birth/death certificates, prenup pact)
//!
//! A marriage certificate mentions both spouses. The first spouse carries
//! no role hint; the second is emitted as a consenting party (anuente) —
//! when the spouse already exists under their own identity key, the merge
//! leaves their original role untouched.

use serde_json::Value as JsonValue;

use super::{first_str, obj_field, person_from_obj, str_field, DocumentMapper, MappedFragment};
use crate::models::{Person, Role};

pub struct CivilStatusMapper;

impl CivilStatusMapper {
    /// Spouse fragment with the marriage-level fields folded in.
    fn spouse(obj: &JsonValue, marriage: &JsonValue) -> Person {
        let mut person = person_from_obj(obj);
        if person.estado_civil.is_none() {
            person.estado_civil = Some("casado".to_string());
        }
        if person.regime_bens.is_none() {
            person.regime_bens = str_field(marriage, "regime_bens");
        }
        if person.data_casamento.is_none() {
            person.data_casamento = str_field(marriage, "data_casamento");
        }
        person
    }
}

impl DocumentMapper for CivilStatusMapper {
    fn map(&self, fields: &JsonValue) -> MappedFragment {
        let mut fragment = MappedFragment::default();

        let conjuge1 = obj_field(fields, "conjuge1");
        let conjuge2 = obj_field(fields, "conjuge2");

        if conjuge1.is_none() && conjuge2.is_none() {
            // Birth certificate / prenup pact shape: a single person at the
            // top level.
            let person = person_from_obj(fields);
            if person != Person::default() {
                fragment.persons.push((person, None));
            }
            return fragment;
        }

        if let Some(obj) = conjuge1 {
            let mut person = Self::spouse(obj, fields);
            if person.conjuge.is_none() {
                person.conjuge = conjuge2.and_then(|c| first_str(c, &["nome", "nome_completo"]));
            }
            if person != Person::default() {
                fragment.persons.push((person, None));
            }
        }
        if let Some(obj) = conjuge2 {
            let mut person = Self::spouse(obj, fields);
            if person.conjuge.is_none() {
                person.conjuge = conjuge1.and_then(|c| first_str(c, &["nome", "nome_completo"]));
            }
            if person != Person::default() {
                fragment.persons.push((person, Some(Role::Anuente)));
            }
        }
        fragment
    }
}
