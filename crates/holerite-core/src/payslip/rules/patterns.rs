//! Common regex patterns for payslip extraction.
//!
//! Patterns operate on normalized, accent-folded lines. They are anchored and
//! bounded where possible so adversarial OCR noise cannot trigger pathological
//! backtracking.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // BRL amount token: optional sign, dot-grouped or plain integer part,
    // decimal comma, or the OCR degradation where the centavo separator was
    // dropped and replaced by a space ("5000 00").
    pub static ref AMOUNT_TOKEN: Regex = Regex::new(
        r"-?(?:\d{1,3}(?:\.\d{3})+|\d+)(?:,\d{2}| \d{2}\b)?"
    ).unwrap();

    // A line that carries only a value: digits and number punctuation.
    pub static ref VALUE_ONLY_LINE: Regex = Regex::new(
        r"^\s*-?\d[\d.,\s]*$"
    ).unwrap();

    // A line holding a single label word and nothing else, as produced by OCR
    // engines that break a "label value" row in two. Optional trailing colon.
    pub static ref LABEL_ONLY_LINE: Regex = Regex::new(
        r"^\s*\p{L}{2,}[:.]?\s*$"
    ).unwrap();

    // One earnings/deductions table row: optional numeric row code, an
    // uppercase description, then a run of numeric tokens to end of line.
    // Subsequent description words must start with a letter so the numeric
    // columns are never swallowed into the description.
    pub static ref LINE_ITEM_ROW: Regex = Regex::new(
        r"^\s*(?:\d{1,4}\s+)?(?P<desc>[A-Z][A-Z0-9.%/()ºª°-]*(?:\s+[A-Z(][A-Z0-9.%/()ºª°-]*)*)\s+(?P<amounts>-?\d[\d.,% ]*)$"
    ).unwrap();

    // A bare description row with no trailing number; candidate for pairing
    // with a value on the following line.
    pub static ref DESC_ONLY_ROW: Regex = Regex::new(
        r"^\s*(?:\d{1,4}\s+)?(?P<desc>[A-Z][A-Z0-9.%/()ºª°-]*(?:\s+[A-Z(][A-Z0-9.%/()ºª°-]*)*)\s*$"
    ).unwrap();

    // Pay period (competência): MM/YYYY or MM/YY.
    pub static ref PERIOD_TOKEN: Regex = Regex::new(
        r"\b(0?[1-9]|1[0-2])/(\d{4}|\d{2})\b"
    ).unwrap();

    // A line carrying only a period token. VALUE_ONLY_LINE cannot serve here:
    // it admits no `/`, and widening it would turn dates into amounts.
    pub static ref PERIOD_ONLY_LINE: Regex = Regex::new(
        r"^\s*(0?[1-9]|1[0-2])/(\d{4}|\d{2})\s*$"
    ).unwrap();

    // Numeric token garbled by letter-for-digit OCR confusion (22e, 1O0, 5l).
    pub static ref GARBLED_NUMERIC_TOKEN: Regex = Regex::new(
        r"\b\d[0-9OoIle.,]*\b"
    ).unwrap();

    // Trailing "space + two digits" where OCR dropped the centavo separator.
    pub static ref SPACE_CENTS: Regex = Regex::new(
        r"^(.*\d) (\d{2})$"
    ).unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_token_shapes() {
        for token in ["5000,00", "5.000,00", "5000 00", "5.000 00", "-120,50", "828,39"] {
            let m = AMOUNT_TOKEN.find(token).unwrap();
            assert_eq!(m.as_str(), token, "should match whole token: {token}");
        }
    }

    #[test]
    fn test_value_only_line() {
        assert!(VALUE_ONLY_LINE.is_match("  5000 00"));
        assert!(VALUE_ONLY_LINE.is_match("5.000,00"));
        assert!(!VALUE_ONLY_LINE.is_match("SALARIO 5000,00"));
        assert!(!VALUE_ONLY_LINE.is_match("TOTAL"));
    }

    #[test]
    fn test_line_item_row() {
        let caps = LINE_ITEM_ROW.captures("001 SALARIO BASE 30,00 5000,00").unwrap();
        assert_eq!(&caps["desc"], "SALARIO BASE");
        assert_eq!(&caps["amounts"], "30,00 5000,00");

        let caps = LINE_ITEM_ROW.captures("HORAS EXTRAS 50% 10,00 250,00").unwrap();
        assert_eq!(&caps["desc"], "HORAS EXTRAS");

        assert!(LINE_ITEM_ROW.captures("Liquido a Receber 6261,45").is_none());
    }

    #[test]
    fn test_desc_only_row() {
        let caps = DESC_ONLY_ROW.captures("  VALE TRANSPORTE").unwrap();
        assert_eq!(&caps["desc"], "VALE TRANSPORTE");
        assert!(DESC_ONLY_ROW.captures("VALE TRANSPORTE 120,00").is_none());
    }

    #[test]
    fn test_period_token() {
        assert!(PERIOD_TOKEN.is_match("COMPETENCIA 05/2024"));
        assert!(PERIOD_TOKEN.is_match("11/23"));
        assert!(!PERIOD_TOKEN.is_match("13/2024"));
    }

    #[test]
    fn test_period_only_line() {
        assert!(PERIOD_ONLY_LINE.is_match(" 05/2024"));
        assert!(PERIOD_ONLY_LINE.is_match("11/23"));
        assert!(!PERIOD_ONLY_LINE.is_match("COMPETENCIA 05/2024"));
        assert!(!PERIOD_ONLY_LINE.is_match("5.000,00"));
    }
}
