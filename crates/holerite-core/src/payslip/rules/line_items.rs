//! Earnings/deductions table extraction.
//!
//! Scans the document body for repeated "description + amount" rows and
//! classifies each one with a keyword heuristic. Classification is never
//! inferred from sign or column position: OCR rarely preserves column
//! alignment on scanned payslips.

use crate::models::extraction::{LineItem, MonetaryValue};

use super::amounts::parse_brl_amount;
use super::fields::all_scalar_variants;
use super::normalize::fold_for_match;
use super::patterns::{AMOUNT_TOKEN, DESC_ONLY_ROW, LINE_ITEM_ROW, VALUE_ONLY_LINE};

/// Which table a row belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineItemKind {
    Earning,
    Deduction,
}

/// Classify a row description against an explicit deduction keyword list.
///
/// Accent- and case-insensitive containment; anything that matches no
/// keyword is an earning.
pub fn classify_line_item(description: &str, deduction_keywords: &[String]) -> LineItemKind {
    let folded = fold_for_match(description);
    let is_deduction = deduction_keywords
        .iter()
        .any(|keyword| folded.contains(&fold_for_match(keyword)));

    if is_deduction {
        LineItemKind::Deduction
    } else {
        LineItemKind::Earning
    }
}

/// Result of scanning the document body for table rows.
#[derive(Debug, Clone, Default)]
pub struct ExtractedLineItems {
    /// Earning rows, in document order.
    pub earnings: Vec<LineItem>,
    /// Deduction rows, in document order.
    pub deductions: Vec<LineItem>,
    /// Rows whose value was recovered from the following line.
    pub fallback_recoveries: u32,
    /// One message per degraded-path recovery.
    pub warnings: Vec<String>,
}

/// Extract every "description + amount" row from the normalized document.
///
/// `original_lines` and `folded_lines` must be the same lines, unfolded and
/// folded; the fold is one char per char, so offsets line up. Rows with no
/// parseable amount are dropped silently. Duplicate descriptions are
/// retained: the same code may legally appear twice for different reference
/// periods.
pub fn extract_line_items(
    original_lines: &[&str],
    folded_lines: &[String],
    deduction_keywords: &[String],
) -> ExtractedLineItems {
    let scalar_variants: Vec<&str> = all_scalar_variants().collect();

    let mut result = ExtractedLineItems::default();
    let mut idx = 0;

    while idx < folded_lines.len() {
        let folded = &folded_lines[idx];

        // Summary and scalar-field rows are not table rows.
        if scalar_variants.iter().any(|v| folded.contains(v)) {
            idx += 1;
            continue;
        }

        if let Some(caps) = LINE_ITEM_ROW.captures(folded) {
            let desc_match = caps.name("desc").unwrap();
            let description = original_slice(
                original_lines[idx],
                folded,
                desc_match.start(),
                desc_match.end(),
            );

            // The amount is the last parseable token on the row; earlier
            // tokens are reference columns (hours, percentages).
            let amount = AMOUNT_TOKEN
                .find_iter(caps.name("amounts").unwrap().as_str())
                .filter_map(|m| parse_brl_amount(m.as_str()))
                .last();

            if let Some(value) = amount {
                push_item(
                    &mut result,
                    description.clone(),
                    MonetaryValue::found(description, value),
                    deduction_keywords,
                );
            }
            idx += 1;
            continue;
        }

        // Secondary pass: a bare description whose value landed on the next
        // line, the same split the scalar locator tolerates.
        if let Some(caps) = DESC_ONLY_ROW.captures(folded) {
            if let Some(next) = folded_lines.get(idx + 1) {
                if VALUE_ONLY_LINE.is_match(next) {
                    let value = AMOUNT_TOKEN
                        .find(next)
                        .and_then(|m| parse_brl_amount(m.as_str()));

                    if let Some(value) = value {
                        let desc_match = caps.name("desc").unwrap();
                        let description = original_slice(
                            original_lines[idx],
                            folded,
                            desc_match.start(),
                            desc_match.end(),
                        );

                        result.warnings.push(format!(
                            "line item '{}': value found on the following line {}",
                            description,
                            idx + 2
                        ));
                        result.fallback_recoveries += 1;
                        push_item(
                            &mut result,
                            description.clone(),
                            MonetaryValue::fallback(description, value),
                            deduction_keywords,
                        );
                        idx += 2;
                        continue;
                    }
                }
            }
        }

        idx += 1;
    }

    result
}

fn push_item(
    result: &mut ExtractedLineItems,
    description: String,
    amount: MonetaryValue,
    deduction_keywords: &[String],
) {
    let kind = classify_line_item(&description, deduction_keywords);

    let item = LineItem {
        description,
        amount,
    };

    match kind {
        LineItemKind::Deduction => result.deductions.push(item),
        LineItemKind::Earning => result.earnings.push(item),
    }
}

/// Map a byte range in the folded line back to the original line text.
fn original_slice(original: &str, folded: &str, start: usize, end: usize) -> String {
    let start_chars = folded[..start].chars().count();
    let len_chars = folded[start..end].chars().count();

    original
        .chars()
        .skip(start_chars)
        .take(len_chars)
        .collect::<String>()
        .trim()
        .to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn run(text: &str) -> ExtractedLineItems {
        let original: Vec<&str> = text.lines().collect();
        let folded: Vec<String> = original.iter().map(|l| fold_for_match(l)).collect();
        let keywords = crate::models::config::ExtractionConfig::default().deduction_keywords;
        extract_line_items(&original, &folded, &keywords)
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_classification_by_keyword() {
        let keywords = vec!["INSS".to_string(), "DESCONTO".to_string()];

        assert_eq!(
            classify_line_item("INSS", &keywords),
            LineItemKind::Deduction
        );
        assert_eq!(
            classify_line_item("Desconto Farmácia", &keywords),
            LineItemKind::Deduction
        );
        assert_eq!(
            classify_line_item("SALARIO BASE", &keywords),
            LineItemKind::Earning
        );
    }

    #[test]
    fn test_extractor_delegates_to_the_classifier() {
        // Accented keyword, unaccented row text: both paths must fold the
        // same way, so the extractor's verdict matches the classifier's.
        let keywords = vec!["PENSÃO".to_string()];
        let original = ["PENSAO ALIMENTICIA 300,00", "SALARIO BASE 5000,00"];
        let folded: Vec<String> = original.iter().map(|l| fold_for_match(l)).collect();

        assert_eq!(
            classify_line_item("PENSAO ALIMENTICIA", &keywords),
            LineItemKind::Deduction
        );

        let result = extract_line_items(&original, &folded, &keywords);
        assert_eq!(result.deductions.len(), 1);
        assert_eq!(result.deductions[0].description, "PENSAO ALIMENTICIA");
        assert_eq!(result.earnings.len(), 1);
    }

    #[test]
    fn test_extracts_and_classifies_rows() {
        let result = run("SALARIO BASE 30,00 5000,00\nHORAS EXTRAS 50% 250,00\nINSS 828,39\nIRRF 142,80");

        assert_eq!(result.earnings.len(), 2);
        assert_eq!(result.deductions.len(), 2);
        assert_eq!(result.earnings[0].description, "SALARIO BASE");
        assert_eq!(result.earnings[0].amount.value, Some(dec("5000.00")));
        assert_eq!(result.earnings[1].amount.value, Some(dec("250.00")));
        assert_eq!(result.deductions[0].description, "INSS");
        assert_eq!(result.deductions[0].amount.value, Some(dec("828.39")));
    }

    #[test]
    fn test_order_and_duplicates_preserved() {
        // Two SALARIO BASE rows at different values: a mid-month rate change.
        // Deduplication would silently discard legitimate data.
        let result = run("SALARIO BASE 2500,00\nADICIONAL NOTURNO 300,00\nSALARIO BASE 2600,00");

        assert_eq!(result.earnings.len(), 3);
        assert_eq!(result.earnings[0].amount.value, Some(dec("2500.00")));
        assert_eq!(result.earnings[1].description, "ADICIONAL NOTURNO");
        assert_eq!(result.earnings[2].description, "SALARIO BASE");
        assert_eq!(result.earnings[2].amount.value, Some(dec("2600.00")));
    }

    #[test]
    fn test_next_line_value_pairing_warns() {
        let result = run("VALE TRANSPORTE\n120,00\nSALARIO BASE 5000,00");

        assert_eq!(result.deductions.len(), 1);
        assert_eq!(result.deductions[0].amount.value, Some(dec("120.00")));
        assert_eq!(result.fallback_recoveries, 1);
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].contains("following line 2"));
        assert_eq!(result.earnings.len(), 1);
    }

    #[test]
    fn test_summary_rows_are_not_line_items() {
        let result = run("SALARIO BASE 5000,00\nTotal de Vencimentos 7089,84\nLíquido a Receber 6261,45");

        assert_eq!(result.earnings.len(), 1);
        assert!(result.deductions.is_empty());
    }

    #[test]
    fn test_accented_description_kept_as_scanned() {
        let result = run("Salário Família 59,82");

        assert_eq!(result.earnings.len(), 1);
        assert_eq!(result.earnings[0].description, "SALÁRIO FAMÍLIA");
    }
}
