//! Deal instruments (purchase contract, purchase commitment, deed draft)
//!
//! The one mapper that assigns roles explicitly: sellers become
//! alienantes, buyers adquirentes. Also the primary source of the deal
//! terms (price, payment, brokerage).

use serde_json::Value as JsonValue;

use super::{
    arr_field, currency_field, first_str, obj_field, person_from_obj, str_field, DocumentMapper,
    MappedFragment,
};
use crate::models::{Brokerage, Deal, PaymentTerms, Person, Role};

pub struct ContractMapper;

impl ContractMapper {
    fn parties(fields: &JsonValue, keys: &[&str], role: Role, out: &mut Vec<(Person, Option<Role>)>) {
        for key in keys {
            if let Some(items) = arr_field(fields, key) {
                for item in items {
                    let person = person_from_obj(item);
                    if person != Person::default() {
                        out.push((person, Some(role)));
                    }
                }
                return;
            }
            // Single-party contracts sometimes extract an object, not a list.
            if let Some(obj) = obj_field(fields, key) {
                let person = person_from_obj(obj);
                if person != Person::default() {
                    out.push((person, Some(role)));
                }
                return;
            }
        }
    }

    fn deal(fields: &JsonValue) -> Option<Deal> {
        let mut deal = Deal {
            tipo_negocio: first_str(fields, &["tipo_negocio", "tipo_contrato"])
                .or(Some("compra_venda".to_string())),
            valor_total: currency_field(fields, "valor_total")
                .or_else(|| currency_field(fields, "valor")),
            ..Default::default()
        };

        let forma = first_str(fields, &["forma_pagamento", "condicao_pagamento"]);
        let entrada = currency_field(fields, "entrada").or_else(|| currency_field(fields, "sinal"));
        let saldo = currency_field(fields, "saldo");
        if forma.is_some() || entrada.is_some() || saldo.is_some() {
            deal.pagamento = Some(PaymentTerms { forma, entrada, saldo });
        }

        let corretor = str_field(fields, "corretor");
        let comissao = currency_field(fields, "comissao");
        if corretor.is_some() || comissao.is_some() {
            deal.corretagem = Some(Brokerage { corretor, comissao });
        }

        if let Some(obj) = obj_field(fields, "condicoes_extras") {
            if let Some(map) = obj.as_object() {
                for (key, value) in map {
                    if let Some(text) = value.as_str() {
                        if !text.trim().is_empty() {
                            deal.condicoes_extras
                                .insert(key.clone(), text.trim().to_string());
                        }
                    }
                }
            }
        }

        // A contract always states at least the deal type; only suppress
        // the fragment when literally nothing was extracted.
        if deal.valor_total.is_none()
            && deal.pagamento.is_none()
            && deal.corretagem.is_none()
            && deal.condicoes_extras.is_empty()
            && first_str(fields, &["tipo_negocio", "tipo_contrato"]).is_none()
        {
            return None;
        }
        Some(deal)
    }
}

impl DocumentMapper for ContractMapper {
    fn map(&self, fields: &JsonValue) -> MappedFragment {
        let mut fragment = MappedFragment::default();

        Self::parties(
            fields,
            &["vendedores", "alienantes", "vendedor"],
            Role::Alienante,
            &mut fragment.persons,
        );
        Self::parties(
            fields,
            &["compradores", "adquirentes", "comprador"],
            Role::Adquirente,
            &mut fragment.persons,
        );
        Self::parties(
            fields,
            &["anuentes", "anuente"],
            Role::Anuente,
            &mut fragment.persons,
        );

        fragment.deal = Self::deal(fields);
        fragment
    }
}
