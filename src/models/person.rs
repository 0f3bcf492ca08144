//! Party (person) model and role bucketing
//!
//! A `Person` is keyed by the digits-only CPF/CNPJ extracted from whichever
//! document first mentioned them. Every scalar is optional; the fill-gap
//! merge fills holes across documents but never rewrites a filled value.

use serde::{Deserialize, Serialize};

use crate::merge::{Provenance, Provenanced};

/// Which bucket of the transaction a party belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Selling/transferring party
    Alienante,
    /// Buying/receiving party
    Adquirente,
    /// Consenting third party (typically a spouse)
    Anuente,
}

/// Postal address, merged per leaf sub-field
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub logradouro: Option<String>,
    pub numero: Option<String>,
    pub complemento: Option<String>,
    pub bairro: Option<String>,
    pub cidade: Option<String>,
    pub uf: Option<String>,
    pub cep: Option<String>,
}

/// Parent names (filiation)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Filiation {
    pub pai: Option<String>,
    pub mae: Option<String>,
}

/// Labor-debt clearance certificate (CNDT) sub-record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LaborDebtCertificate {
    pub numero: Option<String>,
    pub data_emissao: Option<String>,
    pub validade: Option<String>,
    pub situacao: Option<String>,
}

/// One party of the transaction
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub nome: Option<String>,
    /// Display-formatted CPF ("123.456.789-00") or CNPJ. The digits-only
    /// form of this field is the dedup key.
    pub cpf: Option<String>,
    pub rg: Option<String>,
    pub rg_orgao_emissor: Option<String>,
    pub rg_uf: Option<String>,
    pub cnh: Option<String>,
    pub nacionalidade: Option<String>,
    pub data_nascimento: Option<String>,
    pub naturalidade: Option<String>,
    pub profissao: Option<String>,
    pub estado_civil: Option<String>,
    pub regime_bens: Option<String>,
    pub data_casamento: Option<String>,
    /// Name of the spouse as stated by a civil-status document.
    pub conjuge: Option<String>,
    pub filiacao: Option<Filiation>,
    pub endereco: Option<Address>,
    pub cnd_trabalhista: Option<LaborDebtCertificate>,
    /// Field path → ordered list of source documents that set the value.
    #[serde(default, skip_serializing_if = "Provenance::is_empty")]
    pub provenance: Provenance,
}

impl Provenanced for Person {
    fn provenance_mut(&mut self) -> &mut Provenance {
        &mut self.provenance
    }

    fn provenance(&self) -> &Provenance {
        &self.provenance
    }
}

/// Civil status as the qualification generator sees it.
///
/// Married persons split on the presence of a prenuptial pact because the
/// notarial phrasing differs. Statuses are derived from free-text
/// `estado_civil` values, so the matching is tolerant of inflection
/// ("casado"/"casada") and accents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CivilStatus {
    Solteiro,
    CasadoSemPacto,
    CasadoComPacto,
    Divorciado,
    Viuvo,
    UniaoEstavel,
}

impl CivilStatus {
    /// Derive the status from the person's merged fields.
    ///
    /// Returns None when no civil status was extracted at all — the
    /// qualification generator then omits the clause entirely.
    pub fn of(person: &Person) -> Option<Self> {
        let raw = person.estado_civil.as_deref()?.trim().to_lowercase();
        if raw.is_empty() {
            return None;
        }

        if raw.contains("uniao estavel") || raw.contains("união estável") {
            return Some(CivilStatus::UniaoEstavel);
        }
        if raw.starts_with("solteir") {
            return Some(CivilStatus::Solteiro);
        }
        if raw.starts_with("divorciad") || raw.starts_with("separad") {
            return Some(CivilStatus::Divorciado);
        }
        if raw.starts_with("viuv") || raw.starts_with("viúv") {
            return Some(CivilStatus::Viuvo);
        }
        if raw.starts_with("casad") {
            return Some(if Self::regime_needs_pact(person.regime_bens.as_deref()) {
                CivilStatus::CasadoComPacto
            } else {
                CivilStatus::CasadoSemPacto
            });
        }
        None
    }

    /// Partial community of property is the legal default and needs no
    /// prenuptial pact; every other stated regime implies one.
    fn regime_needs_pact(regime: Option<&str>) -> bool {
        match regime {
            None => false,
            Some(r) => {
                let r = r.to_lowercase();
                !(r.contains("comunhao parcial") || r.contains("comunhão parcial"))
            }
        }
    }
}
