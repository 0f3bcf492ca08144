//! Deal description prose
//!
//! Maps the canonical deal-type tag through a fixed lookup table to legal
//! phrasing, states the price in figures and in words, renders the payment
//! terms and any extra conditions with title-cased keys.

use super::extenso::{currency_extenso, format_brl};
use crate::models::Deal;

/// Canonical tag → Portuguese legal phrasing. Unrecognized tags pass
/// through with separators replaced by spaces.
fn deal_type_phrase(tag: &str) -> String {
    match tag {
        "compra_venda" => "compra e venda".to_string(),
        "doacao" => "doação".to_string(),
        "permuta" => "permuta".to_string(),
        "dacao_em_pagamento" => "dação em pagamento".to_string(),
        "cessao_de_direitos" => "cessão de direitos".to_string(),
        "instituicao_de_usufruto" => "instituição de usufruto".to_string(),
        other => other.replace(['_', '-'], " "),
    }
}

fn title_case_key(key: &str) -> String {
    key.split(['_', '-', ' '])
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn value_clause(valor: f64) -> String {
    format!(
        "pelo preço certo e ajustado de {} ({})",
        format_brl(valor),
        currency_extenso(valor)
    )
}

/// Full descriptive text for the deal terms.
pub fn qualify_deal(deal: &Deal) -> String {
    let mut clauses: Vec<String> = Vec::new();

    if let Some(tag) = deal.tipo_negocio.as_deref() {
        clauses.push(deal_type_phrase(tag));
    }
    if let Some(valor) = deal.valor_total {
        clauses.push(value_clause(valor));
    }
    if let Some(pagamento) = deal.pagamento.as_ref() {
        if let Some(forma) = pagamento.forma.as_deref() {
            clauses.push(format!("pagamento na forma {}", deal_type_phrase(forma)));
        }
        if let Some(entrada) = pagamento.entrada {
            clauses.push(format!(
                "com entrada de {} ({})",
                format_brl(entrada),
                currency_extenso(entrada)
            ));
        }
        if let Some(saldo) = pagamento.saldo {
            clauses.push(format!(
                "e saldo de {} ({})",
                format_brl(saldo),
                currency_extenso(saldo)
            ));
        }
    }
    if let Some(itbi) = deal.itbi.as_ref() {
        if let Some(guia) = itbi.numero_guia.as_deref() {
            let mut clause = format!("ITBI recolhido pela guia nº {guia}");
            if let Some(valor) = itbi.valor {
                clause.push_str(&format!(" no valor de {}", format_brl(valor)));
            }
            if let Some(data) = itbi.data_pagamento.as_deref() {
                clause.push_str(&format!(" em {data}"));
            }
            clauses.push(clause);
        }
    }
    for (key, value) in &deal.condicoes_extras {
        clauses.push(format!("{}: {}", title_case_key(key), value));
    }

    clauses.join(", ")
}
