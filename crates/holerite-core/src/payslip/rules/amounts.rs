//! BRL amount parsing for payslip extraction.

use rust_decimal::Decimal;
use std::str::FromStr;

use super::patterns::{AMOUNT_TOKEN, SPACE_CENTS};
use super::FieldExtractor;

/// Parse a Brazilian-formatted amount token, tolerating OCR degradations.
///
/// Applied in order: a trailing "space + two digits" is restored to a decimal
/// comma ("5000 00" -> "5000,00") before thousands separators are stripped,
/// so space-separated centavos are never confused with grouping; then `.` is
/// dropped, `,` becomes the decimal point, and stray non-numeric characters
/// (except a leading minus) are removed.
pub fn parse_brl_amount(token: &str) -> Option<Decimal> {
    let token = token.trim();
    if token.is_empty() {
        return None;
    }

    let token = SPACE_CENTS.replace(token, "${1},${2}");
    let token = token.replace('.', "").replace(',', ".");

    let negative = token.starts_with('-');
    let digits: String = token
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    if digits.is_empty() {
        return None;
    }

    let value = Decimal::from_str(&digits).ok()?;
    Some(if negative { -value } else { value })
}

/// Format an amount in Brazilian style (1.234,56).
pub fn format_brl_amount(amount: Decimal) -> String {
    let s = format!("{:.2}", amount.abs());
    let (integer_part, decimal_part) = s.split_once('.').unwrap_or((&s, "00"));

    let chars: Vec<char> = integer_part.chars().collect();
    let mut formatted = String::new();

    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            formatted.push('.');
        }
        formatted.push(*c);
    }

    let sign = if amount.is_sign_negative() && !amount.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{}{},{}", sign, formatted, decimal_part)
}

/// One numeric token found in the document body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedAmount {
    /// Token text as it appears in the normalized document.
    pub raw: String,
    /// Parsed value.
    pub value: Decimal,
}

/// Scanner for every parseable amount token in a text, used when no label
/// match exists and the full candidate list must be surfaced to the caller.
pub struct AmountScanner;

impl FieldExtractor for AmountScanner {
    type Output = ScannedAmount;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        AMOUNT_TOKEN
            .find_iter(text)
            .filter_map(|m| {
                parse_brl_amount(m.as_str()).map(|value| ScannedAmount {
                    raw: m.as_str().to_string(),
                    value,
                })
            })
            .collect()
    }
}
