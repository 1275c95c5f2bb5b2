//! Label-anchored scalar field location.
//!
//! Works over accent-folded, normalized lines. Matching policy: same-line
//! value preferred, bottom-most occurrence wins (payslips repeat labels in a
//! summary box after the detail table, and the summary is authoritative),
//! next-line fallback as a last resort.

use regex::Regex;
use rust_decimal::Decimal;

use crate::models::extraction::ExtractedField;

use super::amounts::parse_brl_amount;
use super::patterns::{AMOUNT_TOKEN, PERIOD_ONLY_LINE, PERIOD_TOKEN, VALUE_ONLY_LINE};

/// A named scalar field and the folded label variants it may appear under.
///
/// Variants are listed longest first so a more specific label wins the
/// substring match.
pub struct FieldSpec {
    /// Human-readable field name, used in validation messages.
    pub name: &'static str,
    /// Canonical label recorded on the extracted field.
    pub label: &'static str,
    /// Accent-folded label variants, including known OCR-mangled spellings.
    pub variants: &'static [&'static str],
}

pub const GROSS_SALARY: FieldSpec = FieldSpec {
    name: "gross salary",
    label: "Salário Bruto",
    variants: &[
        "REMUNERACAO BRUTA",
        "VENCIMENTO BRUTO",
        "SALARIO BRUTO",
        "TOTAL BRUTO",
    ],
};

pub const NET_SALARY: FieldSpec = FieldSpec {
    name: "net salary",
    label: "Líquido a Receber",
    variants: &[
        "LIQUIDO A RECEBER",
        "SALARIO LIQUIDO",
        "VALOR LIQUIDO",
        "TOTAL LIQUIDO",
        "LIQUIDO",
    ],
};

pub const INSS_BASE: FieldSpec = FieldSpec {
    name: "INSS base",
    label: "Base Cálc. INSS",
    variants: &[
        "SALARIO CONTRIBUICAO INSS",
        "BASE DE CALCULO INSS",
        "BASE CALCULO INSS",
        "BASE CALC. INSS",
        "BASE CALC INSS",
        "BASE INSS",
    ],
};

pub const FGTS_BASE: FieldSpec = FieldSpec {
    name: "FGTS base",
    label: "Base Cálc. FGTS",
    variants: &[
        "BASE DE CALCULO FGTS",
        "BASE CALCULO FGTS",
        "BASE CALC. FGTS",
        "BASE CALC FGTS",
        "BASE FGTS",
    ],
};

pub const IRRF_BASE: FieldSpec = FieldSpec {
    name: "IRRF base",
    label: "Base Cálc. IRRF",
    variants: &[
        "BASE DE CALCULO IRRF",
        "BASE CALCULO IRRF",
        "BASE CALC. IRRF",
        "BASE CALC IRRF",
        "BASE IRRF",
        "BASE IRPF",
    ],
};

pub const FGTS_DEPOSIT: FieldSpec = FieldSpec {
    name: "FGTS deposit",
    label: "FGTS do Mês",
    variants: &["DEPOSITO FGTS", "FGTS DO MES", "VALOR FGTS", "FGTS MES"],
};

pub const TOTAL_EARNINGS: FieldSpec = FieldSpec {
    name: "total earnings",
    label: "Total de Vencimentos",
    variants: &[
        "TOTAL DE VENCIMENTOS",
        "TOTAL DE PROVENTOS",
        "TOTAL DE VANTAGENS",
        "TOTAL VENCIMENTOS",
        "TOTAL PROVENTOS",
    ],
};

pub const TOTAL_DEDUCTIONS: FieldSpec = FieldSpec {
    name: "total deductions",
    label: "Total de Descontos",
    variants: &["TOTAL DE DESCONTOS", "TOTAL DESCONTOS"],
};

pub const PERIOD: FieldSpec = FieldSpec {
    name: "pay period",
    label: "Competência",
    variants: &[
        "MES DE REFERENCIA",
        "FOLHA MENSAL",
        "COMPETENCIA",
        "REFERENCIA",
        "PERIODO",
    ],
};

const ALL_SPECS: &[&FieldSpec] = &[
    &GROSS_SALARY,
    &NET_SALARY,
    &INSS_BASE,
    &FGTS_BASE,
    &IRRF_BASE,
    &FGTS_DEPOSIT,
    &TOTAL_EARNINGS,
    &TOTAL_DEDUCTIONS,
    &PERIOD,
];

/// Every known scalar label variant; the line-item extractor uses this to
/// keep summary rows out of the earnings/deductions tables.
pub fn all_scalar_variants() -> impl Iterator<Item = &'static str> {
    ALL_SPECS.iter().flat_map(|spec| spec.variants.iter().copied())
}

/// Result of locating one scalar field.
#[derive(Debug, Clone)]
pub struct Located<T> {
    /// The extracted field, tagged with how it was recovered.
    pub field: ExtractedField<T>,
    /// 1-based number of the line the value was taken from, when the
    /// next-line fallback fired.
    pub fallback_line: Option<usize>,
}

/// Locate a monetary field over folded lines.
pub fn locate_monetary(lines: &[String], spec: &FieldSpec) -> Located<Decimal> {
    locate_with(lines, spec, &VALUE_ONLY_LINE, |text| {
        AMOUNT_TOKEN
            .find(text)
            .and_then(|m| parse_brl_amount(m.as_str()))
    })
}

/// Locate the pay period (MM/YYYY token) over folded lines.
pub fn locate_period(lines: &[String]) -> Located<String> {
    locate_with(lines, &PERIOD, &PERIOD_ONLY_LINE, |text| {
        PERIOD_TOKEN.find(text).map(|m| m.as_str().to_string())
    })
}

fn locate_with<T>(
    lines: &[String],
    spec: &FieldSpec,
    value_line: &Regex,
    extract: impl Fn(&str) -> Option<T>,
) -> Located<T> {
    // Same-line pass, bottom-most match wins.
    let mut same_line = None;
    for line in lines {
        if let Some(rest) = rest_after_label(line, spec) {
            if let Some(value) = extract(rest) {
                same_line = Some(value);
            }
        }
    }
    if let Some(value) = same_line {
        return Located {
            field: ExtractedField::found(spec.label, value),
            fallback_line: None,
        };
    }

    // No same-line match anywhere: look for a label whose value landed on the
    // immediately following line.
    let mut fallback = None;
    for idx in 0..lines.len().saturating_sub(1) {
        if rest_after_label(&lines[idx], spec).is_some()
            && value_line.is_match(&lines[idx + 1])
        {
            if let Some(value) = extract(&lines[idx + 1]) {
                fallback = Some((idx + 1, value));
            }
        }
    }

    match fallback {
        Some((value_idx, value)) => Located {
            field: ExtractedField::fallback(spec.label, value),
            fallback_line: Some(value_idx + 1),
        },
        None => Located {
            field: ExtractedField::missing(spec.label),
            fallback_line: None,
        },
    }
}

fn rest_after_label<'a>(line: &'a str, spec: &FieldSpec) -> Option<&'a str> {
    for variant in spec.variants {
        if let Some(pos) = line.find(variant) {
            return Some(&line[pos + variant.len()..]);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::extraction::FieldStatus;
    use crate::payslip::rules::normalize::fold_for_match;
    use pretty_assertions::assert_eq;
    use std::str::FromStr;

    fn folded(text: &str) -> Vec<String> {
        text.lines().map(fold_for_match).collect()
    }

    #[test]
    fn test_same_line_match() {
        let lines = folded("Líquido a Receber 6261,45");
        let located = locate_monetary(&lines, &NET_SALARY);

        assert_eq!(located.field.status, FieldStatus::Found);
        assert_eq!(located.field.value, Some(Decimal::from_str("6261.45").unwrap()));
        assert_eq!(located.fallback_line, None);
    }

    #[test]
    fn test_bottom_most_occurrence_wins() {
        // The label repeats in the summary box after the detail table; the
        // summary occurrence is authoritative.
        let lines = folded("Salário Líquido 100,00\nDETALHE 1,00\nSalário Líquido 6261,45");
        let located = locate_monetary(&lines, &NET_SALARY);

        assert_eq!(located.field.value, Some(Decimal::from_str("6261.45").unwrap()));
    }

    #[test]
    fn test_next_line_fallback_reports_line_number() {
        let lines = folded("SALARIO BRUTO\n7089,84");
        let located = locate_monetary(&lines, &GROSS_SALARY);

        assert_eq!(located.field.status, FieldStatus::Fallback);
        assert_eq!(located.field.value, Some(Decimal::from_str("7089.84").unwrap()));
        assert_eq!(located.fallback_line, Some(2));
    }

    #[test]
    fn test_missing_label() {
        let lines = folded("SALARIO BASE 5000,00");
        let located = locate_monetary(&lines, &NET_SALARY);

        assert_eq!(located.field.status, FieldStatus::Missing);
        assert_eq!(located.field.value, None);
    }

    #[test]
    fn test_locate_period() {
        let lines = folded("FOLHA MENSAL Competência: 05/2024");
        let located = locate_period(&lines);

        assert_eq!(located.field.value.as_deref(), Some("05/2024"));
        assert_eq!(located.field.status, FieldStatus::Found);
    }

    #[test]
    fn test_period_on_following_line() {
        // A date line is not a VALUE_ONLY_LINE (no slash there), so the
        // period fallback needs its own value-line shape.
        let lines = folded("Competência:\n05/2024");
        let located = locate_period(&lines);

        assert_eq!(located.field.status, FieldStatus::Fallback);
        assert_eq!(located.field.value.as_deref(), Some("05/2024"));
        assert_eq!(located.fallback_line, Some(2));
    }

    #[test]
    fn test_accent_mangled_label_variant() {
        // OCR commonly drops accents; folding makes "Liquido" and "Líquido"
        // identical before matching.
        let lines = folded("Liquido a Receber 1234,56");
        let located = locate_monetary(&lines, &NET_SALARY);

        assert_eq!(located.field.value, Some(Decimal::from_str("1234.56").unwrap()));
    }
}
