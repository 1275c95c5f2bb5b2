//! Brazilian payslip (holerite) extraction.
//!
//! The pipeline runs in fixed order: OCR text normalization, label-anchored
//! scalar field location, line-item table extraction, totals reconciliation.

mod parser;
pub mod reconcile;
pub mod rules;

pub use parser::{PayslipExtractor, PayslipParser};
