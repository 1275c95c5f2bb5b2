//! Payslip extraction data models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How an extracted field value was recovered from the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldStatus {
    /// Label and value found together on the same line.
    Found,
    /// Value recovered from the line following its label.
    Fallback,
    /// Value derived from other fields (e.g. a summed total).
    Computed,
    /// No usable value was found.
    #[default]
    Missing,
}

impl std::fmt::Display for FieldStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            FieldStatus::Found => "found",
            FieldStatus::Fallback => "fallback",
            FieldStatus::Computed => "computed",
            FieldStatus::Missing => "missing",
        };
        write!(f, "{}", s)
    }
}

/// One scalar field extracted from the payslip, together with the label text
/// it was found under.
///
/// `value` is `None` when extraction failed; callers must check before doing
/// arithmetic. The `status` tag distinguishes a confidently-found value from
/// one recovered via a fallback path without re-deriving that from the
/// validation messages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedField<T> {
    /// Label the value was found under (or the canonical field label when missing).
    pub label: String,

    /// Extracted value, `None` when extraction failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<T>,

    /// How the value was recovered.
    pub status: FieldStatus,
}

/// A monetary field. Amounts are `Decimal`, so a present value is always
/// finite; absence is `None`, never NaN.
pub type MonetaryValue = ExtractedField<Decimal>;

impl<T> ExtractedField<T> {
    /// Field found with label and value on the same line.
    pub fn found(label: impl Into<String>, value: T) -> Self {
        Self {
            label: label.into(),
            value: Some(value),
            status: FieldStatus::Found,
        }
    }

    /// Field recovered from the line following its label.
    pub fn fallback(label: impl Into<String>, value: T) -> Self {
        Self {
            label: label.into(),
            value: Some(value),
            status: FieldStatus::Fallback,
        }
    }

    /// Field derived from other extracted data rather than located in the text.
    pub fn computed(label: impl Into<String>, value: T) -> Self {
        Self {
            label: label.into(),
            value: Some(value),
            status: FieldStatus::Computed,
        }
    }

    /// Field that could not be extracted.
    pub fn missing(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: None,
            status: FieldStatus::Missing,
        }
    }

    /// Whether a value was extracted.
    pub fn is_present(&self) -> bool {
        self.value.is_some()
    }
}

/// One row from the payslip's earnings or deductions table.
///
/// `description` is the raw trimmed label text as scanned. Duplicate
/// descriptions are legal and preserved: a payslip may list the same code
/// twice for different reference periods.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItem {
    /// Raw description text, trimmed, as scanned.
    pub description: String,

    /// Amount for this row.
    pub amount: MonetaryValue,
}

/// Overall extraction health.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationStatus {
    /// Everything reconciled cleanly.
    #[default]
    Ok,
    /// At least one degraded-path decision or mismatch was recorded.
    Warning,
    /// The document could not be parsed at all. Terminal.
    Error,
}

impl std::fmt::Display for ValidationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ValidationStatus::Ok => "ok",
            ValidationStatus::Warning => "warning",
            ValidationStatus::Error => "error",
        };
        write!(f, "{}", s)
    }
}

/// Append-only log of anomalies detected during extraction and reconciliation.
///
/// `status` escalates monotonically: `ok` -> `warning` on the first message,
/// `warning` -> `error` only for an unparseable document. It never downgrades.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Current status.
    pub status: ValidationStatus,

    /// One descriptive message per degraded-path decision.
    pub messages: Vec<String>,
}

impl ValidationReport {
    /// Create a clean report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a warning. Escalates `ok` to `warning`; never downgrades `error`.
    pub fn warn(&mut self, message: impl Into<String>) {
        self.messages.push(message.into());
        if self.status == ValidationStatus::Ok {
            self.status = ValidationStatus::Warning;
        }
    }

    /// Record a fatal anomaly. The status becomes `error` and stays there.
    pub fn fail(&mut self, message: impl Into<String>) {
        self.messages.push(message.into());
        self.status = ValidationStatus::Error;
    }

    /// Whether the report is still clean.
    pub fn is_ok(&self) -> bool {
        self.status == ValidationStatus::Ok
    }
}

/// Metadata about the extraction process.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractionMetadata {
    /// Processing time in milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processing_time_ms: Option<u64>,

    /// Number of values recovered from the line following their label
    /// (scalar fields and line items combined).
    pub fallback_recoveries: u32,
}

/// Structured result of parsing one payslip's OCR text.
///
/// Built fresh on every parse and returned by value; the parser retains no
/// state between calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayslipExtraction {
    /// Pay period (competência), usually `MM/YYYY`.
    pub period: ExtractedField<String>,

    /// Gross salary.
    pub gross_salary: MonetaryValue,

    /// Net salary (líquido a receber).
    pub net_salary: MonetaryValue,

    /// Total earnings (total de vencimentos).
    pub total_earnings: MonetaryValue,

    /// Total deductions (total de descontos).
    pub total_deductions: MonetaryValue,

    /// INSS calculation base.
    pub inss_base: MonetaryValue,

    /// FGTS calculation base.
    pub fgts_base: MonetaryValue,

    /// IRRF calculation base.
    pub irrf_base: MonetaryValue,

    /// FGTS deposit for the month.
    pub fgts_deposit: MonetaryValue,

    /// Earning rows, in document order.
    pub earnings: Vec<LineItem>,

    /// Deduction rows, in document order.
    pub deductions: Vec<LineItem>,

    /// Anomalies detected during extraction and reconciliation.
    pub validation: ValidationReport,

    /// Extraction metadata.
    pub metadata: ExtractionMetadata,
}

impl PayslipExtraction {
    /// Sum of extracted earning amounts, treating missing values as zero.
    pub fn earnings_sum(&self) -> Decimal {
        self.earnings
            .iter()
            .filter_map(|item| item.amount.value)
            .sum()
    }

    /// Sum of extracted deduction amounts, treating missing values as zero.
    pub fn deductions_sum(&self) -> Decimal {
        self.deductions
            .iter()
            .filter_map(|item| item.amount.value)
            .sum()
    }

    /// Parse the period field as the first day of the competência month.
    ///
    /// Accepts `MM/YYYY` and `MM/YY` (two-digit years are taken as 20xx).
    pub fn period_as_date(&self) -> Option<NaiveDate> {
        let raw = self.period.value.as_deref()?;
        let (month, year) = raw.trim().split_once('/')?;
        let month: u32 = month.trim().parse().ok()?;
        let year: i32 = year.trim().parse().ok()?;
        let year = if year < 100 { year + 2000 } else { year };
        NaiveDate::from_ymd_opt(year, month, 1)
    }
}
