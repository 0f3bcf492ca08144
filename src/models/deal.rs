//! Deal (business terms) model

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::merge::{Provenance, Provenanced};

/// How the price is paid
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentTerms {
    /// "a_vista", "financiado", "parcelado", ...
    pub forma: Option<String>,
    pub entrada: Option<f64>,
    pub saldo: Option<f64>,
}

/// ITBI (transfer tax) guide data
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransferTaxGuide {
    pub numero_guia: Option<String>,
    pub valor: Option<f64>,
    pub data_pagamento: Option<String>,
}

/// Brokerage data
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Brokerage {
    pub corretor: Option<String>,
    pub comissao: Option<f64>,
}

/// The business terms of the transaction
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Deal {
    /// Canonical deal-type tag, e.g. "compra_venda".
    pub tipo_negocio: Option<String>,
    pub valor_total: Option<f64>,
    pub pagamento: Option<PaymentTerms>,
    pub itbi: Option<TransferTaxGuide>,
    pub corretagem: Option<Brokerage>,
    /// Free-form extra conditions, rendered with title-cased keys.
    /// BTreeMap keeps the qualification output deterministic.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub condicoes_extras: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Provenance::is_empty")]
    pub provenance: Provenance,
}

impl Provenanced for Deal {
    fn provenance_mut(&mut self) -> &mut Provenance {
        &mut self.provenance
    }

    fn provenance(&self) -> &Provenance {
        &self.provenance
    }
}
