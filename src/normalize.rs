//! Pure normalizers for extracted field values
//!
//! Everything here is total: malformed input yields `None` (or
//! `IdentityKey::Unresolvable`), never an error. Callers must treat `None`
//! as "not extracted", which is distinct from a genuine zero or empty value.

use chrono::NaiveDate;

/// Canonical identity key extracted from a CPF/CNPJ mention
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentityKey {
    /// 11-digit CPF (individual)
    Individual(String),
    /// 14-digit CNPJ (organization)
    Organization(String),
    /// Not enough digits to key on. The mention is non-deduplicable —
    /// not an error.
    Unresolvable,
}

impl IdentityKey {
    /// The digits-only key, when resolvable.
    pub fn digits(&self) -> Option<&str> {
        match self {
            IdentityKey::Individual(d) | IdentityKey::Organization(d) => Some(d),
            IdentityKey::Unresolvable => None,
        }
    }
}

/// Strip punctuation from a CPF/CNPJ mention and classify it by length.
///
/// "123.456.789-00" and "12345678900" normalize to the same key. Any input
/// that does not reduce to exactly 11 or 14 digits is unresolvable.
pub fn normalize_identity_key(raw: &str) -> IdentityKey {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    match digits.len() {
        11 => IdentityKey::Individual(digits),
        14 => IdentityKey::Organization(digits),
        _ => IdentityKey::Unresolvable,
    }
}

/// Render an 11-digit CPF in display form ("123.456.789-00").
///
/// Inputs that are not exactly 11 digits are returned trimmed but otherwise
/// untouched.
pub fn format_cpf(raw: &str) -> String {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() != 11 {
        return raw.trim().to_string();
    }
    format!(
        "{}.{}.{}-{}",
        &digits[0..3],
        &digits[3..6],
        &digits[6..9],
        &digits[9..11]
    )
}

/// Render a 14-digit CNPJ in display form ("12.345.678/0001-90").
pub fn format_cnpj(raw: &str) -> String {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() != 14 {
        return raw.trim().to_string();
    }
    format!(
        "{}.{}.{}/{}-{}",
        &digits[0..2],
        &digits[2..5],
        &digits[5..8],
        &digits[8..12],
        &digits[12..14]
    )
}

/// Parse a monetary amount in either Brazilian or plain-decimal notation.
///
/// The ambiguity between "1.234,56" and "1234.56" is resolved by separator
/// co-occurrence: when both '.' and ',' appear, dots are thousands markers
/// and the comma is the decimal point. A lone comma is a decimal comma; a
/// lone dot is a plain decimal point.
pub fn parse_currency(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .trim()
        .trim_start_matches("R$")
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    if cleaned.is_empty() {
        return None;
    }

    let has_dot = cleaned.contains('.');
    let has_comma = cleaned.contains(',');

    let normalized = if has_dot && has_comma {
        cleaned.replace('.', "").replace(',', ".")
    } else if has_comma {
        cleaned.replace(',', ".")
    } else {
        cleaned
    };

    match normalized.parse::<f64>() {
        Ok(v) if v.is_finite() => Some(v),
        _ => None,
    }
}

/// Parse a date in ISO form or day/month/year text.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    for fmt in ["%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, fmt) {
            return Some(date);
        }
    }
    None
}

/// Parse an area measurement, stripping unit markers and locale separators.
pub fn parse_area(raw: &str) -> Option<f64> {
    let lowered = raw.trim().to_lowercase();
    let stripped = lowered
        .trim_end_matches("m²")
        .trim_end_matches("m2")
        .trim_end_matches("ha")
        .trim();
    parse_currency(stripped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_key_punctuation_invariant() {
        assert_eq!(
            normalize_identity_key("123.456.789-00"),
            normalize_identity_key("12345678900")
        );
        assert_eq!(
            normalize_identity_key("123.456.789-00"),
            IdentityKey::Individual("12345678900".to_string())
        );
    }

    #[test]
    fn test_identity_key_cnpj() {
        assert_eq!(
            normalize_identity_key("12.345.678/0001-90"),
            IdentityKey::Organization("12345678000190".to_string())
        );
    }

    #[test]
    fn test_identity_key_wrong_length_is_unresolvable() {
        assert_eq!(normalize_identity_key("1234567890"), IdentityKey::Unresolvable);
        assert_eq!(normalize_identity_key(""), IdentityKey::Unresolvable);
        assert_eq!(normalize_identity_key("abc"), IdentityKey::Unresolvable);
        assert_eq!(
            normalize_identity_key("123.456.789-001"),
            IdentityKey::Unresolvable
        );
    }

    #[test]
    fn test_format_cpf() {
        assert_eq!(format_cpf("12345678900"), "123.456.789-00");
        assert_eq!(format_cpf("123.456.789-00"), "123.456.789-00");
        // Not a CPF: pass through trimmed.
        assert_eq!(format_cpf(" 12345 "), "12345");
    }

    #[test]
    fn test_currency_brazilian_notation() {
        assert_eq!(parse_currency("1.234,56"), Some(1234.56));
        assert_eq!(parse_currency("R$ 350.000,00"), Some(350_000.0));
        assert_eq!(parse_currency("1234,56"), Some(1234.56));
    }

    #[test]
    fn test_currency_plain_decimal() {
        assert_eq!(parse_currency("1234.56"), Some(1234.56));
        assert_eq!(parse_currency("350000"), Some(350_000.0));
    }

    #[test]
    fn test_currency_malformed_is_none() {
        assert_eq!(parse_currency(""), None);
        assert_eq!(parse_currency("R$"), None);
        assert_eq!(parse_currency("abc"), None);
        assert_eq!(parse_currency("12,34,56.7"), None);
    }

    #[test]
    fn test_date_iso_and_br() {
        let expected = NaiveDate::from_ymd_opt(2015, 5, 10).unwrap();
        assert_eq!(parse_date("2015-05-10"), Some(expected));
        assert_eq!(parse_date("10/05/2015"), Some(expected));
        assert_eq!(parse_date("10-05-2015"), Some(expected));
        assert_eq!(parse_date("May 10th"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn test_area() {
        assert_eq!(parse_area("120,50 m²"), Some(120.5));
        assert_eq!(parse_area("120.5m2"), Some(120.5));
        assert_eq!(parse_area("1.200,00 m²"), Some(1200.0));
        assert_eq!(parse_area("n/a"), None);
    }
}
