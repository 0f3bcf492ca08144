//! Currency values in Portuguese words ("por extenso") and display form
//!
//! Notarial instruments state every price twice: in figures
//! ("R$ 350.000,00") and spelled out ("trezentos e cinquenta mil reais").
//! Both renderings are pure functions of the value.

/// Spell out a monetary value in reais, e.g.
/// `1234.56` → `"mil, duzentos e trinta e quatro reais e cinquenta e seis centavos"`.
///
/// Negative or non-finite inputs render as zero; the parsers upstream never
/// produce them.
pub fn currency_extenso(value: f64) -> String {
    let total_cents = if value.is_finite() && value > 0.0 {
        (value * 100.0).round() as u64
    } else {
        0
    };
    let reais = total_cents / 100;
    let centavos = total_cents % 100;

    let mut parts = Vec::new();
    match reais {
        0 if centavos == 0 => parts.push("zero reais".to_string()),
        0 => {}
        1 => parts.push("um real".to_string()),
        _ => {
            let words = number_extenso(reais);
            // "um milhão de reais", but "um milhão e duzentos mil reais".
            let connector = if ends_in_bare_scale(reais) { " de reais" } else { " reais" };
            parts.push(format!("{words}{connector}"));
        }
    }
    match centavos {
        0 => {}
        1 => parts.push("um centavo".to_string()),
        _ => parts.push(format!("{} centavos", number_extenso(centavos))),
    }
    parts.join(" e ")
}

/// Display form with thousands dots and decimal comma: `"R$ 350.000,00"`.
pub fn format_brl(value: f64) -> String {
    let total_cents = if value.is_finite() {
        (value.abs() * 100.0).round() as u64
    } else {
        0
    };
    let sign = if value.is_sign_negative() && total_cents > 0 { "-" } else { "" };
    let integer = total_cents / 100;
    let cents = total_cents % 100;

    let digits = integer.to_string();
    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }
    format!("R$ {sign}{grouped},{cents:02}")
}

const UNITS: [&str; 20] = [
    "zero", "um", "dois", "três", "quatro", "cinco", "seis", "sete", "oito", "nove", "dez",
    "onze", "doze", "treze", "quatorze", "quinze", "dezesseis", "dezessete", "dezoito",
    "dezenove",
];
const TENS: [&str; 10] = [
    "", "", "vinte", "trinta", "quarenta", "cinquenta", "sessenta", "setenta", "oitenta",
    "noventa",
];
const HUNDREDS: [&str; 10] = [
    "", "cento", "duzentos", "trezentos", "quatrocentos", "quinhentos", "seiscentos",
    "setecentos", "oitocentos", "novecentos",
];

fn under_1000(n: u64) -> String {
    debug_assert!(n < 1000);
    if n == 100 {
        return "cem".to_string();
    }
    let hundreds = (n / 100) as usize;
    let rest = n % 100;

    let mut parts = Vec::new();
    if hundreds > 0 {
        parts.push(HUNDREDS[hundreds].to_string());
    }
    if rest > 0 {
        if rest < 20 {
            parts.push(UNITS[rest as usize].to_string());
        } else {
            let tens = TENS[(rest / 10) as usize];
            let unit = rest % 10;
            if unit > 0 {
                parts.push(format!("{tens} e {}", UNITS[unit as usize]));
            } else {
                parts.push(tens.to_string());
            }
        }
    }
    parts.join(" e ")
}

/// A cardinal number in Brazilian Portuguese words.
pub fn number_extenso(n: u64) -> String {
    if n == 0 {
        return "zero".to_string();
    }

    // (group value, scale singular, scale plural), most significant first.
    let scales: [(u64, &str, &str); 4] = [
        (1_000_000_000_000, "trilhão", "trilhões"),
        (1_000_000_000, "bilhão", "bilhões"),
        (1_000_000, "milhão", "milhões"),
        (1_000, "mil", "mil"),
    ];

    let mut groups: Vec<(u64, String)> = Vec::new();
    let mut remainder = n;
    for (scale, singular, plural) in scales {
        let count = remainder / scale;
        remainder %= scale;
        if count == 0 {
            continue;
        }
        let text = if scale == 1_000 && count == 1 {
            // "mil", never "um mil".
            "mil".to_string()
        } else if count == 1 {
            format!("um {singular}")
        } else {
            format!("{} {plural}", under_1000(count))
        };
        groups.push((count, text));
    }
    if remainder > 0 {
        groups.push((remainder, under_1000(remainder)));
    }

    let mut out = String::new();
    for (i, (value, text)) in groups.iter().enumerate() {
        if i > 0 {
            let is_last = i == groups.len() - 1;
            // "e" before a final group under 100 or an exact hundred.
            if is_last && (*value < 100 || *value % 100 == 0) {
                out.push_str(" e ");
            } else {
                out.push_str(", ");
            }
        }
        out.push_str(text);
    }
    out
}

/// True when the words for `n` end in a bare scale word (milhão, bilhões,
/// ...), which takes the preposition: "um milhão *de* reais".
fn ends_in_bare_scale(n: u64) -> bool {
    n >= 1_000_000 && n % 1_000_000 == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_numbers() {
        assert_eq!(number_extenso(0), "zero");
        assert_eq!(number_extenso(1), "um");
        assert_eq!(number_extenso(15), "quinze");
        assert_eq!(number_extenso(21), "vinte e um");
        assert_eq!(number_extenso(100), "cem");
        assert_eq!(number_extenso(101), "cento e um");
        assert_eq!(number_extenso(234), "duzentos e trinta e quatro");
    }

    #[test]
    fn test_thousands() {
        assert_eq!(number_extenso(1_000), "mil");
        assert_eq!(number_extenso(1_001), "mil e um");
        assert_eq!(number_extenso(2_500), "dois mil e quinhentos");
        assert_eq!(
            number_extenso(350_000),
            "trezentos e cinquenta mil"
        );
        assert_eq!(
            number_extenso(1_234),
            "mil, duzentos e trinta e quatro"
        );
    }

    #[test]
    fn test_millions() {
        assert_eq!(number_extenso(1_000_000), "um milhão");
        assert_eq!(number_extenso(2_000_000), "dois milhões");
        assert_eq!(
            number_extenso(1_200_000),
            "um milhão e duzentos mil"
        );
    }

    #[test]
    fn test_currency_extenso() {
        assert_eq!(currency_extenso(1.0), "um real");
        assert_eq!(currency_extenso(0.01), "um centavo");
        assert_eq!(currency_extenso(0.0), "zero reais");
        assert_eq!(
            currency_extenso(350_000.0),
            "trezentos e cinquenta mil reais"
        );
        assert_eq!(
            currency_extenso(1_234.56),
            "mil, duzentos e trinta e quatro reais e cinquenta e seis centavos"
        );
        assert_eq!(currency_extenso(1_000_000.0), "um milhão de reais");
        assert_eq!(
            currency_extenso(1_200_000.0),
            "um milhão e duzentos mil reais"
        );
    }

    #[test]
    fn test_format_brl() {
        assert_eq!(format_brl(350_000.0), "R$ 350.000,00");
        assert_eq!(format_brl(1_234.56), "R$ 1.234,56");
        assert_eq!(format_brl(0.5), "R$ 0,50");
        assert_eq!(format_brl(1_000_000.0), "R$ 1.000.000,00");
    }
}
