//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{HoleriteError, Result};

/// Main configuration for the holerite pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HoleriteConfig {
    /// Text normalizer configuration.
    pub normalizer: NormalizerConfig,

    /// Field extraction configuration.
    pub extraction: ExtractionConfig,
}

/// Text normalizer configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizerConfig {
    /// Repair known OCR character substitutions (CNP3 -> CNPJ, 22e -> 220).
    pub repair_substitutions: bool,

    /// Join a lone label line with a following value-only line.
    pub join_split_lines: bool,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            repair_substitutions: true,
            join_split_lines: true,
        }
    }
}

/// Field extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Keywords that classify a line item as a deduction. Matched
    /// accent-insensitively against the row description.
    pub deduction_keywords: Vec<String>,

    /// Reconciliation tolerance in centavos.
    pub tolerance_cents: u32,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            deduction_keywords: default_deduction_keywords(),
            tolerance_cents: 1,
        }
    }
}

/// Statutory and common contractual deductions on Brazilian payslips.
fn default_deduction_keywords() -> Vec<String> {
    [
        "INSS",
        "IRRF",
        "IMPOSTO DE RENDA",
        "PLANO DE SAUDE",
        "ASSISTENCIA MEDICA",
        "UNIMED",
        "ODONTO",
        "PENSAO ALIMENTICIA",
        "PENSAO JUDICIAL",
        "VALE TRANSPORTE",
        "VALE REFEICAO",
        "COPARTICIPACAO",
        "CONTRIBUICAO SINDICAL",
        "ADIANTAMENTO",
        "FALTAS",
        "DESCONTO",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

impl HoleriteConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| HoleriteError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
