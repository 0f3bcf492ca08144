//! Incoming document records and the document type taxonomy
//!
//! A `DocumentRecord` is what the upstream classification/extraction step
//! hands us: a type tag plus an untyped JSON object of extracted fields.
//! The extracted fields are untrusted and partial — every consumer goes
//! through the validating accessors in `mappers` rather than indexing into
//! the JSON directly.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use uuid::Uuid;

/// One classified document with its raw extraction result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub id: Uuid,
    pub document_type: DocumentType,
    pub original_filename: String,
    /// Untyped extraction output. Treated as untrusted input.
    #[serde(default)]
    pub extracted_fields: JsonValue,
}

impl DocumentRecord {
    /// Source name used for provenance attribution.
    ///
    /// The original filename is what an auditor recognizes, so it wins over
    /// the opaque document id.
    pub fn source_name(&self) -> &str {
        &self.original_filename
    }
}

/// The known document type tags produced by the classifier.
///
/// Unknown wire tags deserialize to `Outro` and are routed to the generic
/// fallback mapper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    // Identity documents
    Rg,
    Cnh,
    Cpf,
    Passaporte,
    // Civil status
    CertidaoNascimento,
    CertidaoCasamento,
    CertidaoObito,
    PactoAntenupcial,
    // Corporate parties
    ContratoSocial,
    CartaoCnpj,
    // Representation
    Procuracao,
    // Deal instruments
    ContratoCompraVenda,
    CompromissoCompraVenda,
    Escritura,
    // Property registry
    MatriculaImovel,
    CertidaoOnus,
    // Municipal / tax
    Iptu,
    CertidaoValorVenal,
    ItbiGuia,
    // Clearance certificates
    CndTrabalhista,
    CndFederal,
    CndEstadual,
    CndMunicipal,
    CertidaoDistribuidor,
    // Miscellaneous
    ComprovanteEndereco,
    #[serde(other)]
    Outro,
}

impl DocumentType {
    /// Static processing priority, higher first.
    ///
    /// Identity documents rank highest and the unclassified catch-all lowest.
    /// Because the fill-gap merge never overwrites a filled field, this
    /// ordering is the only tie-break between documents that disagree: the
    /// first type processed wins a field permanently.
    pub fn priority(self) -> u8 {
        use DocumentType::*;
        match self {
            Rg | Cnh | Cpf | Passaporte => 100,
            CertidaoNascimento | CertidaoCasamento | CertidaoObito | PactoAntenupcial => 90,
            ContratoSocial | CartaoCnpj => 85,
            Procuracao => 80,
            ContratoCompraVenda | CompromissoCompraVenda | Escritura => 70,
            MatriculaImovel | CertidaoOnus => 60,
            Iptu | CertidaoValorVenal | ItbiGuia => 50,
            CndTrabalhista | CndFederal | CndEstadual | CndMunicipal | CertidaoDistribuidor => 40,
            ComprovanteEndereco => 30,
            Outro => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_documents_outrank_everything() {
        assert!(DocumentType::Rg.priority() > DocumentType::CertidaoCasamento.priority());
        assert!(DocumentType::CertidaoCasamento.priority() > DocumentType::ContratoCompraVenda.priority());
        assert!(DocumentType::ContratoCompraVenda.priority() > DocumentType::MatriculaImovel.priority());
        assert!(DocumentType::Outro.priority() < DocumentType::ComprovanteEndereco.priority());
    }

    #[test]
    fn test_unknown_tag_deserializes_to_outro() {
        let tag: DocumentType = serde_json::from_str("\"laudo_de_vistoria\"").unwrap();
        assert_eq!(tag, DocumentType::Outro);
    }

    #[test]
    fn test_known_tag_roundtrip() {
        let tag: DocumentType = serde_json::from_str("\"certidao_casamento\"").unwrap();
        assert_eq!(tag, DocumentType::CertidaoCasamento);
        assert_eq!(
            serde_json::to_string(&tag).unwrap(),
            "\"certidao_casamento\""
        );
    }
}
