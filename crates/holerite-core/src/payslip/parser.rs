//! Payslip parser composing the extraction pipeline.
//!
//! Strictly sequential: normalize, locate scalar fields, extract line items,
//! reconcile. The whole pass is a pure function of the input text; the parser
//! holds no per-call state and may be shared freely across threads.

use std::time::Instant;

use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::models::config::HoleriteConfig;
use crate::models::extraction::{
    ExtractedField, ExtractionMetadata, PayslipExtraction, ValidationReport,
};

use super::reconcile::reconcile;
use super::rules::{
    fields::{self, FieldSpec, Located},
    locate_monetary, locate_period, AmountScanner, FieldExtractor,
};
use super::rules::{extract_line_items, fold_for_match, normalize_with};

/// Trait for payslip extractors.
///
/// Extraction is total: noisy or incomplete input degrades to missing fields
/// and validation messages, never to an error. A hard failure here would
/// block a user-facing workflow that manual correction can always finish.
pub trait PayslipExtractor {
    /// Extract structured payslip data from OCR text.
    fn extract_from_text(&self, text: &str) -> PayslipExtraction;
}

/// Rule-based payslip parser.
pub struct PayslipParser {
    config: HoleriteConfig,
}

impl PayslipParser {
    /// Create a parser with default settings.
    pub fn new() -> Self {
        Self {
            config: HoleriteConfig::default(),
        }
    }

    /// Create a parser from a full configuration.
    pub fn with_config(config: HoleriteConfig) -> Self {
        Self { config }
    }

    /// Replace the deduction keyword list.
    pub fn with_deduction_keywords(mut self, keywords: Vec<String>) -> Self {
        self.config.extraction.deduction_keywords = keywords;
        self
    }

    /// Set the reconciliation tolerance in centavos.
    pub fn with_tolerance_cents(mut self, cents: u32) -> Self {
        self.config.extraction.tolerance_cents = cents;
        self
    }

    /// Parse one payslip's OCR text into a structured extraction.
    pub fn parse(&self, text: &str) -> PayslipExtraction {
        let start = Instant::now();
        info!("parsing payslip text of {} characters", text.len());

        let normalized = normalize_with(text, &self.config.normalizer);
        let original_lines: Vec<&str> = normalized.lines().collect();
        let folded_lines: Vec<String> = original_lines
            .iter()
            .map(|line| fold_for_match(line))
            .collect();

        let mut validation = ValidationReport::new();
        let mut fallback_recoveries = 0u32;

        let period = self.take(
            locate_period(&folded_lines),
            &fields::PERIOD,
            &mut validation,
            &mut fallback_recoveries,
        );
        let gross_salary = self.take(
            locate_monetary(&folded_lines, &fields::GROSS_SALARY),
            &fields::GROSS_SALARY,
            &mut validation,
            &mut fallback_recoveries,
        );
        let inss_base = self.take(
            locate_monetary(&folded_lines, &fields::INSS_BASE),
            &fields::INSS_BASE,
            &mut validation,
            &mut fallback_recoveries,
        );
        let fgts_base = self.take(
            locate_monetary(&folded_lines, &fields::FGTS_BASE),
            &fields::FGTS_BASE,
            &mut validation,
            &mut fallback_recoveries,
        );
        let irrf_base = self.take(
            locate_monetary(&folded_lines, &fields::IRRF_BASE),
            &fields::IRRF_BASE,
            &mut validation,
            &mut fallback_recoveries,
        );
        let fgts_deposit = self.take(
            locate_monetary(&folded_lines, &fields::FGTS_DEPOSIT),
            &fields::FGTS_DEPOSIT,
            &mut validation,
            &mut fallback_recoveries,
        );
        let total_earnings = self.take(
            locate_monetary(&folded_lines, &fields::TOTAL_EARNINGS),
            &fields::TOTAL_EARNINGS,
            &mut validation,
            &mut fallback_recoveries,
        );
        let total_deductions = self.take(
            locate_monetary(&folded_lines, &fields::TOTAL_DEDUCTIONS),
            &fields::TOTAL_DEDUCTIONS,
            &mut validation,
            &mut fallback_recoveries,
        );

        // Net salary is the single most consulted figure and must never sink
        // the extraction: when fully unlabeled, surface every numeric
        // candidate instead of a value.
        let net_salary = {
            let located = locate_monetary(&folded_lines, &fields::NET_SALARY);
            if located.field.is_present() {
                self.take(
                    located,
                    &fields::NET_SALARY,
                    &mut validation,
                    &mut fallback_recoveries,
                )
            } else {
                let candidates = AmountScanner.extract_all(&normalized);
                if candidates.is_empty() {
                    validation.warn(
                        "net salary label not found and no numeric candidates in the document",
                    );
                } else {
                    let raw: Vec<&str> =
                        candidates.iter().map(|c| c.raw.as_str()).collect();
                    validation.warn(format!(
                        "net salary label not found; numeric candidates: {}",
                        raw.join(", ")
                    ));
                }
                located.field
            }
        };

        let items = extract_line_items(
            &original_lines,
            &folded_lines,
            &self.config.extraction.deduction_keywords,
        );
        for warning in &items.warnings {
            validation.warn(warning.clone());
        }
        fallback_recoveries += items.fallback_recoveries;

        let mut extraction = PayslipExtraction {
            period,
            gross_salary,
            net_salary,
            total_earnings,
            total_deductions,
            inss_base,
            fgts_base,
            irrf_base,
            fgts_deposit,
            earnings: items.earnings,
            deductions: items.deductions,
            validation,
            metadata: ExtractionMetadata::default(),
        };

        reconcile(&mut extraction, self.tolerance());

        extraction.metadata.processing_time_ms = Some(start.elapsed().as_millis() as u64);
        extraction.metadata.fallback_recoveries = fallback_recoveries;

        debug!(
            "extracted {} earnings, {} deductions, status {:?}",
            extraction.earnings.len(),
            extraction.deductions.len(),
            extraction.validation.status
        );

        extraction
    }

    fn take<T>(
        &self,
        located: Located<T>,
        spec: &FieldSpec,
        validation: &mut ValidationReport,
        fallback_recoveries: &mut u32,
    ) -> ExtractedField<T> {
        if let Some(line) = located.fallback_line {
            validation.warn(format!(
                "{}: value found on the following line {}",
                spec.name, line
            ));
            *fallback_recoveries += 1;
        }
        located.field
    }

    fn tolerance(&self) -> Decimal {
        Decimal::new(self.config.extraction.tolerance_cents as i64, 2)
    }
}

impl Default for PayslipParser {
    fn default() -> Self {
        Self::new()
    }
}

impl PayslipExtractor for PayslipParser {
    fn extract_from_text(&self, text: &str) -> PayslipExtraction {
        self.parse(text)
    }
}
