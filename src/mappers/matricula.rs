//! Property registry documents (matrícula, onus certificate)
//!
//! Primary source of the property aggregate, including the two lien arrays
//! that the alert engine watches. Lien arrays obey the wholesale-replace
//! rule downstream, so this mapper emits them exactly as extracted.

use serde_json::Value as JsonValue;

use super::{
    area_field, arr_field, currency_field, first_str, str_field, DocumentMapper, MappedFragment,
};
use crate::models::{Lien, Property};

pub struct PropertyRegistryMapper;

impl PropertyRegistryMapper {
    fn lien(obj: &JsonValue) -> Option<Lien> {
        let lien = Lien {
            tipo: str_field(obj, "tipo"),
            descricao: str_field(obj, "descricao"),
            beneficiario: str_field(obj, "beneficiario"),
            data_registro: first_str(obj, &["data_registro", "data"]),
        };
        (lien != Lien::default()).then_some(lien)
    }

    fn liens(fields: &JsonValue, keys: &[&str]) -> Vec<Lien> {
        keys.iter()
            .filter_map(|&k| arr_field(fields, k))
            .next()
            .map(|items| items.iter().filter_map(Self::lien).collect())
            .unwrap_or_default()
    }
}

impl DocumentMapper for PropertyRegistryMapper {
    fn map(&self, fields: &JsonValue) -> MappedFragment {
        let property = Property {
            matricula: first_str(fields, &["matricula", "numero_matricula"]),
            cartorio: first_str(fields, &["cartorio", "oficio", "registro_imoveis"]),
            tipo_imovel: first_str(fields, &["tipo_imovel", "tipo"]),
            descricao: str_field(fields, "descricao"),
            localizacao: first_str(fields, &["localizacao", "endereco"]),
            area_total: area_field(fields, "area_total"),
            area_privativa: area_field(fields, "area_privativa"),
            area_comum: area_field(fields, "area_comum"),
            fracao_ideal: str_field(fields, "fracao_ideal"),
            inscricao_municipal: str_field(fields, "inscricao_municipal"),
            valor_venal: currency_field(fields, "valor_venal"),
            proprietarios: arr_field(fields, "proprietarios")
                .map(|items| {
                    items
                        .iter()
                        .filter_map(|v| v.as_str())
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            onus_ativos: Self::liens(fields, &["onus_ativos", "onus"]),
            onus_baixados: Self::liens(fields, &["onus_baixados", "onus_cancelados"]),
            ..Default::default()
        };

        if property == Property::default() {
            return MappedFragment::default();
        }
        MappedFragment {
            property: Some(property),
            ..Default::default()
        }
    }
}
