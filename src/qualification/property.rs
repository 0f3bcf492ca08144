//! Property description prose
//!
//! Same omit-if-absent discipline as the party qualification: an ordered
//! clause list where missing fields disappear without leaving separators
//! behind.

use super::extenso::format_brl;
use crate::models::Property;

fn area_clause(label: &str, value: f64) -> String {
    // Areas render with the Brazilian decimal comma.
    let formatted = format!("{value:.2}").replace('.', ",");
    format!("com {label} de {formatted} m²")
}

/// Full descriptive text for the property.
pub fn qualify_property(property: &Property) -> String {
    let mut clauses: Vec<String> = Vec::new();

    match (property.tipo_imovel.as_deref(), property.matricula.as_deref()) {
        (Some(tipo), Some(matricula)) => {
            clauses.push(format!("o imóvel do tipo {tipo}, objeto da matrícula nº {matricula}"))
        }
        (Some(tipo), None) => clauses.push(format!("o imóvel do tipo {tipo}")),
        (None, Some(matricula)) => clauses.push(format!("o imóvel objeto da matrícula nº {matricula}")),
        (None, None) => {}
    }
    if let Some(cartorio) = property.cartorio.as_deref() {
        clauses.push(format!("do {cartorio}"));
    }
    if let Some(descricao) = property.descricao.as_deref() {
        clauses.push(format!("assim descrito: {descricao}"));
    }
    if let Some(localizacao) = property.localizacao.as_deref() {
        clauses.push(format!("situado em {localizacao}"));
    }
    if let Some(area) = property.area_total {
        clauses.push(area_clause("área total", area));
    }
    if let Some(area) = property.area_privativa {
        clauses.push(area_clause("área privativa", area));
    }
    if let Some(area) = property.area_comum {
        clauses.push(area_clause("área comum", area));
    }
    if let Some(fracao) = property.fracao_ideal.as_deref() {
        clauses.push(format!("correspondendo-lhe a fração ideal de {fracao}"));
    }
    if let Some(inscricao) = property.inscricao_municipal.as_deref() {
        clauses.push(format!("cadastrado na Prefeitura Municipal sob nº {inscricao}"));
    }
    if let Some(valor) = property.valor_venal {
        clauses.push(format!("com valor venal de {}", format_brl(valor)));
    }

    clauses.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_property_description() {
        let property = Property {
            tipo_imovel: Some("apartamento".to_string()),
            matricula: Some("12.345".to_string()),
            cartorio: Some("5º Registro de Imóveis de São Paulo/SP".to_string()),
            area_total: Some(120.0),
            area_privativa: Some(80.5),
            fracao_ideal: Some("2,5%".to_string()),
            inscricao_municipal: Some("123.456.0001-7".to_string()),
            valor_venal: Some(280_000.0),
            ..Default::default()
        };
        let text = qualify_property(&property);
        assert!(text.starts_with("o imóvel do tipo apartamento, objeto da matrícula nº 12.345"));
        assert!(text.contains("do 5º Registro de Imóveis de São Paulo/SP"));
        assert!(text.contains("com área total de 120,00 m²"));
        assert!(text.contains("com área privativa de 80,50 m²"));
        assert!(!text.contains("área comum"));
        assert!(text.contains("com valor venal de R$ 280.000,00"));
    }

    #[test]
    fn test_absent_fields_leave_no_separators() {
        let property = Property {
            matricula: Some("99".to_string()),
            ..Default::default()
        };
        assert_eq!(
            qualify_property(&property),
            "o imóvel objeto da matrícula nº 99"
        );
    }

    #[test]
    fn test_empty_property_renders_empty() {
        assert_eq!(qualify_property(&Property::default()), "");
    }
}
