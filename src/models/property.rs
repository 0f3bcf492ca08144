//! Property model
//!
//! One property per transaction. Lien arrays follow the wholesale-replace
//! rule: a non-empty incoming array only lands when the existing array is
//! empty; items are never unioned.

use serde::{Deserialize, Serialize};

use crate::merge::{Provenance, Provenanced};

/// A registered lien or encumbrance (hipoteca, penhora, usufruto, ...)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Lien {
    pub tipo: Option<String>,
    pub descricao: Option<String>,
    pub beneficiario: Option<String>,
    pub data_registro: Option<String>,
}

/// The property object of the transaction
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub matricula: Option<String>,
    /// Registry office holding the matrícula.
    pub cartorio: Option<String>,
    pub tipo_imovel: Option<String>,
    pub descricao: Option<String>,
    pub localizacao: Option<String>,
    pub area_total: Option<f64>,
    pub area_privativa: Option<f64>,
    pub area_comum: Option<f64>,
    pub fracao_ideal: Option<String>,
    pub inscricao_municipal: Option<String>,
    pub valor_venal: Option<f64>,
    #[serde(default)]
    pub proprietarios: Vec<String>,
    #[serde(default)]
    pub onus_ativos: Vec<Lien>,
    #[serde(default)]
    pub onus_baixados: Vec<Lien>,
    #[serde(default, skip_serializing_if = "Provenance::is_empty")]
    pub provenance: Provenance,
}

impl Provenanced for Property {
    fn provenance_mut(&mut self) -> &mut Provenance {
        &mut self.provenance
    }

    fn provenance(&self) -> &Provenance {
        &self.provenance
    }
}
