//! Audit command - print a reviewer-facing summary for one payslip.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::info;

use holerite_core::payslip::PayslipParser;
use holerite_core::report::AuditReport;

/// Arguments for the audit command.
#[derive(Args)]
pub struct AuditArgs {
    /// Input file (OCR text)
    #[arg(required = true)]
    input: PathBuf,

    /// Emit the report as JSON instead of plain text
    #[arg(long)]
    json: bool,
}

pub fn run(args: AuditArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = super::extract::load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Auditing file: {}", args.input.display());

    let text = fs::read_to_string(&args.input)?;
    let extraction = PayslipParser::with_config(config).parse(&text);
    let report = AuditReport::from_extraction(&extraction);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{} {}", style("Audit:").bold(), args.input.display());
        print!("{}", report);

        if report.needs_review() {
            println!();
            println!("{}", style("Needs manual review.").yellow());
        }
    }

    Ok(())
}
