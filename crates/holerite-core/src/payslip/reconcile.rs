//! Totals reconciliation and cross-checking.
//!
//! Produces authoritative earning/deduction totals and records every internal
//! inconsistency on the validation report. An explicit labeled total always
//! beats the computed sum: line-item extraction is the less reliable signal.

use rust_decimal::Decimal;

use crate::models::extraction::{MonetaryValue, PayslipExtraction, ValidationReport};

use super::rules::format_brl_amount;

/// Reconcile extracted totals against line-item sums and the
/// net = earnings - deductions identity.
pub fn reconcile(extraction: &mut PayslipExtraction, tolerance: Decimal) {
    let computed_earnings = extraction.earnings_sum();
    let computed_deductions = extraction.deductions_sum();

    // Unparseable document: nothing to total and nothing to sum.
    let no_line_items = extraction.earnings.is_empty() && extraction.deductions.is_empty();
    if no_line_items
        && !extraction.total_earnings.is_present()
        && !extraction.total_deductions.is_present()
    {
        extraction
            .validation
            .fail("document could not be parsed: no explicit totals and no line items found");
        return;
    }

    resolve_total(
        &mut extraction.total_earnings,
        computed_earnings,
        "earnings",
        "Soma dos Vencimentos (calculado)",
        &mut extraction.validation,
        tolerance,
    );
    resolve_total(
        &mut extraction.total_deductions,
        computed_deductions,
        "deductions",
        "Soma dos Descontos (calculado)",
        &mut extraction.validation,
        tolerance,
    );

    // Net = earnings - deductions identity.
    if let (Some(net), Some(earnings), Some(deductions)) = (
        extraction.net_salary.value,
        extraction.total_earnings.value,
        extraction.total_deductions.value,
    ) {
        let expected = earnings - deductions;
        if (net - expected).abs() > tolerance {
            extraction.validation.warn(format!(
                "net salary {} does not reconcile with total earnings {} minus total deductions {} (expected {})",
                format_brl_amount(net),
                format_brl_amount(earnings),
                format_brl_amount(deductions),
                format_brl_amount(expected),
            ));
        }
    }

    // A payslip cannot pay out more than its base.
    if let (Some(gross), Some(net)) = (
        extraction.gross_salary.value,
        extraction.net_salary.value,
    ) {
        if gross < net {
            extraction.validation.warn(format!(
                "gross salary {} is less than net salary {}",
                format_brl_amount(gross),
                format_brl_amount(net),
            ));
        }
    }
}

fn resolve_total(
    total: &mut MonetaryValue,
    computed: Decimal,
    kind: &str,
    computed_label: &str,
    report: &mut ValidationReport,
    tolerance: Decimal,
) {
    match total.value {
        Some(explicit) => {
            if (explicit - computed).abs() > tolerance {
                report.warn(format!(
                    "explicit {} total {} differs from sum of extracted {} line items {}; keeping the explicit total",
                    kind,
                    format_brl_amount(explicit),
                    kind,
                    format_brl_amount(computed),
                ));
            }
        }
        None => {
            report.warn(format!(
                "explicit {} total not found; falling back to the sum of extracted line items {}",
                kind,
                format_brl_amount(computed),
            ));
            *total = MonetaryValue::computed(computed_label, computed);
        }
    }
}
