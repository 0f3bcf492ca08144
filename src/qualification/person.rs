//! Party qualification prose
//!
//! Renders the formal notarial identification of one party as an ordered
//! clause sequence. Any clause whose underlying field is absent is omitted
//! entirely — never rendered as an empty clause or dangling punctuation.
//! The output is a pure function of the person record.

use crate::models::{CivilStatus, Person};

/// Civil-status clause, with the property regime appended only for married
/// persons.
fn civil_status_clause(person: &Person) -> Option<String> {
    let status = CivilStatus::of(person)?;
    let clause = match status {
        CivilStatus::Solteiro => "solteiro".to_string(),
        CivilStatus::Divorciado => "divorciado".to_string(),
        CivilStatus::Viuvo => "viúvo".to_string(),
        CivilStatus::UniaoEstavel => "convivente em união estável".to_string(),
        CivilStatus::CasadoSemPacto | CivilStatus::CasadoComPacto => {
            let mut clause = "casado".to_string();
            if let Some(regime) = person.regime_bens.as_deref() {
                clause.push_str(&format!(" sob o regime da {}", regime.trim()));
                if status == CivilStatus::CasadoComPacto {
                    clause.push_str(", conforme pacto antenupcial");
                }
            }
            clause
        }
    };
    Some(clause)
}

fn rg_clause(person: &Person) -> Option<String> {
    let rg = person.rg.as_deref()?;
    let mut clause = format!("portador da cédula de identidade RG nº {rg}");
    match (person.rg_orgao_emissor.as_deref(), person.rg_uf.as_deref()) {
        (Some(issuer), Some(uf)) => clause.push_str(&format!(", expedida pela {issuer}/{uf}")),
        (Some(issuer), None) => clause.push_str(&format!(", expedida pela {issuer}")),
        _ => {}
    }
    Some(clause)
}

fn address_clause(person: &Person) -> Option<String> {
    let address = person.endereco.as_ref()?;
    let mut pieces = Vec::new();
    if let Some(logradouro) = address.logradouro.as_deref() {
        pieces.push(logradouro.to_string());
    }
    if let Some(numero) = address.numero.as_deref() {
        pieces.push(format!("nº {numero}"));
    }
    if let Some(complemento) = address.complemento.as_deref() {
        pieces.push(complemento.to_string());
    }
    if let Some(bairro) = address.bairro.as_deref() {
        pieces.push(bairro.to_string());
    }
    match (address.cidade.as_deref(), address.uf.as_deref()) {
        (Some(cidade), Some(uf)) => pieces.push(format!("{cidade}/{uf}")),
        (Some(cidade), None) => pieces.push(cidade.to_string()),
        (None, Some(uf)) => pieces.push(uf.to_string()),
        (None, None) => {}
    }
    if let Some(cep) = address.cep.as_deref() {
        pieces.push(format!("CEP {cep}"));
    }
    if pieces.is_empty() {
        return None;
    }
    Some(format!("residente e domiciliado à {}", pieces.join(", ")))
}

/// Full qualification text for one party.
pub fn qualify_person(person: &Person) -> String {
    let mut clauses: Vec<String> = Vec::new();

    if let Some(nome) = person.nome.as_deref() {
        clauses.push(nome.to_string());
    }
    if let Some(nacionalidade) = person.nacionalidade.as_deref() {
        clauses.push(nacionalidade.to_string());
    }
    if let Some(clause) = civil_status_clause(person) {
        clauses.push(clause);
    }
    if let Some(profissao) = person.profissao.as_deref() {
        clauses.push(profissao.to_string());
    }
    if let Some(clause) = rg_clause(person) {
        clauses.push(clause);
    }
    if let Some(cpf) = person.cpf.as_deref() {
        clauses.push(format!("inscrito no CPF/MF sob o nº {cpf}"));
    }
    if let Some(clause) = address_clause(person) {
        clauses.push(clause);
    }

    clauses.join(", ")
}
