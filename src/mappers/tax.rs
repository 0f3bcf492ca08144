//! Municipal/tax records (IPTU, venal-value certificate, ITBI guide)
//!
//! IPTU and venal-value certificates feed the property aggregate; the ITBI
//! guide feeds the deal's transfer-tax sub-record.

use serde_json::Value as JsonValue;

use super::{currency_field, first_str, str_field, DocumentMapper, MappedFragment};
use crate::models::{Deal, Property, TransferTaxGuide};

pub struct MunicipalTaxMapper;

impl DocumentMapper for MunicipalTaxMapper {
    fn map(&self, fields: &JsonValue) -> MappedFragment {
        let mut fragment = MappedFragment::default();

        let property = Property {
            inscricao_municipal: first_str(fields, &["inscricao_municipal", "inscricao"]),
            valor_venal: currency_field(fields, "valor_venal"),
            localizacao: first_str(fields, &["localizacao", "endereco"]),
            ..Default::default()
        };
        if property != Property::default() {
            fragment.property = Some(property);
        }

        // ITBI guide shape.
        let guide = TransferTaxGuide {
            numero_guia: first_str(fields, &["numero_guia", "guia"]),
            valor: currency_field(fields, "valor_itbi").or_else(|| currency_field(fields, "valor")),
            data_pagamento: str_field(fields, "data_pagamento"),
        };
        if guide.numero_guia.is_some() || guide.data_pagamento.is_some() {
            fragment.deal = Some(Deal {
                itbi: Some(guide),
                ..Default::default()
            });
        }

        fragment
    }
}
