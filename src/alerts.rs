//! Legal-alert derivation rules
//!
//! A table of predicates over the aggregated property state. Alerts are
//! recomputed fresh on each run and never deduplicated or persisted; adding
//! a rule is a matter of appending to `RULES`, the orchestrator does not
//! change.

use crate::models::{Alert, AlertSeverity, Property};

type AlertRule = fn(&Property) -> Option<Alert>;

const RULES: &[AlertRule] = &[active_liens];

/// Run every rule against the final property aggregate.
pub fn derive_alerts(property: &Property) -> Vec<Alert> {
    RULES.iter().filter_map(|rule| rule(property)).collect()
}

/// Non-empty active-liens array: the deal may be blocked or need creditor
/// consent.
fn active_liens(property: &Property) -> Option<Alert> {
    let count = property.onus_ativos.len();
    if count == 0 {
        return None;
    }
    Some(Alert {
        alert_type: "onus_ativos".to_string(),
        severity: AlertSeverity::High,
        message: format!(
            "O imóvel possui {} ônus ativo(s) registrado(s) na matrícula",
            count
        ),
        recommendation: Some(
            "Verificar baixa dos ônus ou anuência dos credores antes da lavratura".to_string(),
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Lien;

    #[test]
    fn test_two_active_liens_yield_one_high_alert_with_count() {
        let property = Property {
            onus_ativos: vec![
                Lien {
                    tipo: Some("hipoteca".to_string()),
                    ..Default::default()
                },
                Lien {
                    tipo: Some("penhora".to_string()),
                    ..Default::default()
                },
            ],
            ..Default::default()
        };
        let alerts = derive_alerts(&property);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].severity, AlertSeverity::High);
        assert!(alerts[0].message.contains('2'));
    }

    #[test]
    fn test_historical_liens_alone_yield_nothing() {
        let property = Property {
            onus_baixados: vec![Lien::default()],
            ..Default::default()
        };
        assert!(derive_alerts(&property).is_empty());
    }

    #[test]
    fn test_clean_property_yields_nothing() {
        assert!(derive_alerts(&Property::default()).is_empty());
    }
}
