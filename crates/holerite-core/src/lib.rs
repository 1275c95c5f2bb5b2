//! Core library for Brazilian payslip (holerite) OCR text extraction.
//!
//! This crate provides:
//! - OCR text normalization (garbled-character repair, whitespace cleanup)
//! - Label-anchored field extraction (competência, salário bruto/líquido,
//!   INSS/FGTS/IRRF bases, totals)
//! - Earnings/deductions table extraction with keyword classification
//! - Totals reconciliation and validation reporting

pub mod error;
pub mod models;
pub mod payslip;
pub mod report;

pub use error::{HoleriteError, Result};
pub use models::config::HoleriteConfig;
pub use models::extraction::{
    ExtractedField, FieldStatus, LineItem, MonetaryValue, PayslipExtraction, ValidationReport,
    ValidationStatus,
};
pub use payslip::{PayslipExtractor, PayslipParser};
pub use report::AuditReport;
