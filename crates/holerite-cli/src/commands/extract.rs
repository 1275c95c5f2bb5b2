//! Extract command - extract data from a single payslip text file.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, info};

use holerite_core::models::config::HoleriteConfig;
use holerite_core::models::extraction::{PayslipExtraction, ValidationStatus};
use holerite_core::payslip::rules::format_brl_amount;
use holerite_core::payslip::PayslipParser;

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Input file (OCR text)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Print validation messages to stderr
    #[arg(long)]
    show_validation: bool,

    /// Exit with an error when the extraction status is not ok
    #[arg(long)]
    strict: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

pub fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let text = fs::read_to_string(&args.input)?;
    let parser = PayslipParser::with_config(config);
    let extraction = parser.parse(&text);

    if args.show_validation && !extraction.validation.messages.is_empty() {
        eprintln!("{}", style("Validation messages:").yellow());
        for message in &extraction.validation.messages {
            eprintln!("  - {}", message);
        }
    }

    let output = format_extraction(&extraction, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    if args.strict && extraction.validation.status != ValidationStatus::Ok {
        anyhow::bail!(
            "extraction finished with status {}",
            extraction.validation.status
        );
    }

    Ok(())
}

pub fn load_config(config_path: Option<&str>) -> anyhow::Result<HoleriteConfig> {
    match config_path {
        Some(path) => Ok(HoleriteConfig::from_file(std::path::Path::new(path))?),
        None => Ok(HoleriteConfig::default()),
    }
}

pub fn format_extraction(
    extraction: &PayslipExtraction,
    format: OutputFormat,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(extraction)?),
        OutputFormat::Csv => format_csv(extraction),
        OutputFormat::Text => Ok(format_text(extraction)),
    }
}

fn format_csv(extraction: &PayslipExtraction) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "period",
        "gross_salary",
        "net_salary",
        "total_earnings",
        "total_deductions",
        "inss_base",
        "fgts_base",
        "irrf_base",
        "fgts_deposit",
        "earnings_count",
        "deductions_count",
        "status",
    ])?;

    let amount = |field: &holerite_core::MonetaryValue| {
        field.value.map(format_brl_amount).unwrap_or_default()
    };

    wtr.write_record([
        extraction.period.value.clone().unwrap_or_default(),
        amount(&extraction.gross_salary),
        amount(&extraction.net_salary),
        amount(&extraction.total_earnings),
        amount(&extraction.total_deductions),
        amount(&extraction.inss_base),
        amount(&extraction.fgts_base),
        amount(&extraction.irrf_base),
        amount(&extraction.fgts_deposit),
        extraction.earnings.len().to_string(),
        extraction.deductions.len().to_string(),
        extraction.validation.status.to_string(),
    ])?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(extraction: &PayslipExtraction) -> String {
    let mut output = String::new();

    let period = extraction.period.value.as_deref().unwrap_or("(not found)");
    output.push_str(&format!("Period: {}\n", period));
    output.push_str(&format!("Status: {}\n", extraction.validation.status));
    output.push('\n');

    let amount = |field: &holerite_core::MonetaryValue| {
        field
            .value
            .map(format_brl_amount)
            .unwrap_or_else(|| "-".to_string())
    };

    output.push_str("Summary:\n");
    output.push_str(&format!("  Gross:      {}\n", amount(&extraction.gross_salary)));
    output.push_str(&format!("  Net:        {}\n", amount(&extraction.net_salary)));
    output.push_str(&format!("  Earnings:   {}\n", amount(&extraction.total_earnings)));
    output.push_str(&format!("  Deductions: {}\n", amount(&extraction.total_deductions)));
    output.push('\n');

    if !extraction.earnings.is_empty() {
        output.push_str("Earnings:\n");
        for item in &extraction.earnings {
            output.push_str(&format!(
                "  {:<32} {}\n",
                item.description,
                amount(&item.amount)
            ));
        }
        output.push('\n');
    }

    if !extraction.deductions.is_empty() {
        output.push_str("Deductions:\n");
        for item in &extraction.deductions {
            output.push_str(&format!(
                "  {:<32} {}\n",
                item.description,
                amount(&item.amount)
            ));
        }
    }

    output
}
