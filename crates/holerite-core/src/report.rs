//! Reviewer-facing audit summary of an extraction.
//!
//! A flat projection of [`PayslipExtraction`](crate::models::extraction::PayslipExtraction)
//! for manual review queues: which fields were found and how, how many table
//! rows came out, and every recorded anomaly. Serializes to JSON and renders
//! as plain text.

use std::fmt;

use serde::Serialize;

use crate::models::extraction::{FieldStatus, MonetaryValue, PayslipExtraction, ValidationStatus};
use crate::payslip::rules::format_brl_amount;

/// Presence and provenance of one scalar field.
#[derive(Debug, Clone, Serialize)]
pub struct FieldPresence {
    /// Label the field was (or would have been) found under.
    pub label: String,
    /// How the value was recovered.
    pub status: FieldStatus,
    /// Formatted value, absent when the field is missing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl FieldPresence {
    fn monetary(field: &MonetaryValue) -> Self {
        Self {
            label: field.label.clone(),
            status: field.status,
            value: field.value.map(format_brl_amount),
        }
    }
}

/// Audit summary of one payslip extraction.
#[derive(Debug, Clone, Serialize)]
pub struct AuditReport {
    /// Overall extraction health.
    pub status: ValidationStatus,
    /// Extracted pay period, when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<String>,
    /// Number of earning rows extracted.
    pub earnings_count: usize,
    /// Number of deduction rows extracted.
    pub deductions_count: usize,
    /// Values recovered from the line following their label.
    pub fallback_recoveries: u32,
    /// Scalar fields in fixed display order.
    pub fields: Vec<FieldPresence>,
    /// Anomaly messages, in the order they were recorded.
    pub warnings: Vec<String>,
}

impl AuditReport {
    /// Project an extraction into its audit summary.
    pub fn from_extraction(extraction: &PayslipExtraction) -> Self {
        let fields = vec![
            FieldPresence::monetary(&extraction.gross_salary),
            FieldPresence::monetary(&extraction.net_salary),
            FieldPresence::monetary(&extraction.total_earnings),
            FieldPresence::monetary(&extraction.total_deductions),
            FieldPresence::monetary(&extraction.inss_base),
            FieldPresence::monetary(&extraction.fgts_base),
            FieldPresence::monetary(&extraction.irrf_base),
            FieldPresence::monetary(&extraction.fgts_deposit),
        ];

        Self {
            status: extraction.validation.status,
            period: extraction.period.value.clone(),
            earnings_count: extraction.earnings.len(),
            deductions_count: extraction.deductions.len(),
            fallback_recoveries: extraction.metadata.fallback_recoveries,
            fields,
            warnings: extraction.validation.messages.clone(),
        }
    }

    /// Whether a reviewer needs to look at this document.
    pub fn needs_review(&self) -> bool {
        self.status != ValidationStatus::Ok
    }
}

impl fmt::Display for AuditReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Status: {}", self.status)?;
        match &self.period {
            Some(period) => writeln!(f, "Period: {}", period)?,
            None => writeln!(f, "Period: (not found)")?,
        }
        writeln!(
            f,
            "Rows: {} earnings, {} deductions",
            self.earnings_count, self.deductions_count
        )?;
        writeln!(f, "Fallback recoveries: {}", self.fallback_recoveries)?;

        writeln!(f, "Fields:")?;
        for field in &self.fields {
            writeln!(
                f,
                "  {:<24} {:<9} {}",
                field.label,
                field.status,
                field.value.as_deref().unwrap_or("-"),
            )?;
        }

        if !self.warnings.is_empty() {
            writeln!(f, "Warnings:")?;
            for warning in &self.warnings {
                writeln!(f, "  - {}", warning)?;
            }
        }

        Ok(())
    }
}
