//! Text normalization for scanned payslips.
//!
//! Repairs known OCR misreadings and rejoins rows the scanner split between a
//! label and its value, so the downstream extraction patterns see a canonical
//! character stream. `normalize` is pure, total and idempotent.

use crate::models::config::NormalizerConfig;

use super::patterns::{GARBLED_NUMERIC_TOKEN, LABEL_ONLY_LINE, VALUE_ONLY_LINE};

/// Known whole-word OCR misreadings on Brazilian payslip headers.
const SUBSTITUTIONS: &[(&str, &str)] = &[
    ("CNP3", "CNPJ"),
    ("F0LHA", "FOLHA"),
    ("SALARI0", "SALARIO"),
    ("SALÁRI0", "SALÁRIO"),
    ("LIQUID0", "LIQUIDO"),
    ("LÍQUID0", "LÍQUIDO"),
];

/// Normalize raw OCR text with default settings.
pub fn normalize(raw: &str) -> String {
    normalize_with(raw, &NormalizerConfig::default())
}

/// Normalize raw OCR text: repair substitutions, collapse run-together
/// whitespace and rejoin label/value rows split across two lines.
pub fn normalize_with(raw: &str, config: &NormalizerConfig) -> String {
    let text = if config.repair_substitutions {
        repair_substitutions(raw)
    } else {
        raw.to_string()
    };

    let lines: Vec<String> = text
        .lines()
        .map(collapse_whitespace)
        // Blank rows carry no signal and would skew "following line" pairing.
        .filter(|line| !line.is_empty())
        .collect();

    let lines = if config.join_split_lines {
        join_split_lines(lines)
    } else {
        lines
    };

    lines.join("\n")
}

/// Fold one character for accent- and case-insensitive matching.
///
/// One char in, one char out, so char offsets in the folded text line up
/// with the original.
pub fn fold_char(c: char) -> char {
    match c {
        'á' | 'à' | 'â' | 'ã' | 'ä' | 'Á' | 'À' | 'Â' | 'Ã' | 'Ä' => 'A',
        'é' | 'è' | 'ê' | 'ë' | 'É' | 'È' | 'Ê' | 'Ë' => 'E',
        'í' | 'ì' | 'î' | 'ï' | 'Í' | 'Ì' | 'Î' | 'Ï' => 'I',
        'ó' | 'ò' | 'ô' | 'õ' | 'ö' | 'Ó' | 'Ò' | 'Ô' | 'Õ' | 'Ö' => 'O',
        'ú' | 'ù' | 'û' | 'ü' | 'Ú' | 'Ù' | 'Û' | 'Ü' => 'U',
        'ç' | 'Ç' => 'C',
        'ñ' | 'Ñ' => 'N',
        c => c.to_ascii_uppercase(),
    }
}

/// Accent-folded, upper-cased copy of `text` for label matching.
pub fn fold_for_match(text: &str) -> String {
    text.chars().map(fold_char).collect()
}

fn repair_substitutions(text: &str) -> String {
    let mut repaired = text.to_string();

    for (garbled, fixed) in SUBSTITUTIONS {
        repaired = repaired.replace(garbled, fixed);
    }

    // Letter-for-digit confusion inside numeric tokens: 22e -> 220, 1O0 -> 100.
    GARBLED_NUMERIC_TOKEN
        .replace_all(&repaired, |caps: &regex::Captures| {
            caps[0]
                .chars()
                .map(|c| match c {
                    'O' | 'o' | 'e' => '0',
                    'I' | 'l' => '1',
                    c => c,
                })
                .collect::<String>()
        })
        .into_owned()
}

fn collapse_whitespace(line: &str) -> String {
    line.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Join a lone single-word label line with a following value-only line.
///
/// Compensates for OCR engines that insert a spurious line break inside one
/// logical "label value" row. Multi-word labels are left alone; the field
/// locator handles those with its own next-line fallback and reports them.
fn join_split_lines(lines: Vec<String>) -> Vec<String> {
    let mut joined = Vec::with_capacity(lines.len());
    let mut i = 0;

    while i < lines.len() {
        let is_split_row = LABEL_ONLY_LINE.is_match(&lines[i])
            && lines
                .get(i + 1)
                .is_some_and(|next| VALUE_ONLY_LINE.is_match(next));

        if is_split_row {
            joined.push(format!("{} {}", lines[i].trim(), lines[i + 1].trim()));
            i += 2;
        } else {
            joined.push(lines[i].clone());
            i += 1;
        }
    }

    joined
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_repairs_known_substitutions() {
        assert_eq!(normalize("CNP3: 12.345.678/0001-90"), "CNPJ: 12.345.678/0001-90");
        assert_eq!(normalize("SALARI0 BASE 22e"), "SALARIO BASE 220");
        assert_eq!(normalize("TOTAL 1O0,00"), "TOTAL 100,00");
    }

    #[test]
    fn test_collapses_whitespace() {
        assert_eq!(
            normalize("SALARIO   BASE\t\t5000,00"),
            "SALARIO BASE 5000,00"
        );
    }

    #[test]
    fn test_joins_single_word_label_with_value_line() {
        assert_eq!(normalize("INSS\n828,39"), "INSS 828,39");
        assert_eq!(normalize("LIQUIDO:\n6.261,45"), "LIQUIDO: 6.261,45");
    }

    #[test]
    fn test_leaves_multi_word_label_split_alone() {
        // Multi-word split rows are the field locator's next-line fallback
        // territory; joining them here would hide the recovery from the
        // validation report.
        assert_eq!(
            normalize("SALARIO BASE\n5000 00"),
            "SALARIO BASE\n5000 00"
        );
    }

    #[test]
    fn test_idempotent() {
        let samples = [
            "CNP3  12.345.678/0001-90\nINSS\n828,39\nSALARIO   BASE 22e",
            "Líquido a Receber 6261,45\nTotal de Vencimentos\n7089,84",
            "",
            "   \n\n  ",
            "F0LHA MENSAL 05/2024",
        ];

        for sample in samples {
            let once = normalize(sample);
            assert_eq!(normalize(&once), once, "not idempotent for {sample:?}");
        }
    }

    #[test]
    fn test_fold_for_match() {
        assert_eq!(fold_for_match("Líquido a Receber"), "LIQUIDO A RECEBER");
        assert_eq!(fold_for_match("Salário-Família"), "SALARIO-FAMILIA");
        assert_eq!(fold_for_match("Base Cálc. INSS"), "BASE CALC. INSS");
    }
}
