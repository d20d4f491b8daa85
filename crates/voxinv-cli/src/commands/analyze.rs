//! Analyze command - extract invoice data from a single transcript.

use std::fs;
use std::io::Read;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use rust_decimal::Decimal;
use tracing::{debug, info};

use voxinv_core::{
    ExtractionResult, InvoiceDraft, InvoiceExtractor, Language, TranscriptAnalyzer, VoiceRequest,
};

/// Arguments for the analyze command.
#[derive(Args)]
pub struct AnalyzeArgs {
    /// Transcript text (read from --file or stdin when omitted)
    text: Option<String>,

    /// Read the transcript from a file
    #[arg(short = 'i', long, conflicts_with = "text")]
    file: Option<PathBuf>,

    /// Customer name to use when none is found in the transcript
    #[arg(long, default_value = "")]
    customer: String,

    /// Transcript language (detected from the text when omitted)
    #[arg(short, long, value_enum)]
    lang: Option<LangArg>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Build a full invoice draft instead of the raw extraction
    #[arg(long)]
    draft: bool,

    /// Report draft validation issues (implies --draft)
    #[arg(long)]
    validate: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output, one row per line item
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum LangArg {
    /// English (en-US)
    En,
    /// Hindi (hi-IN)
    Hi,
}

impl From<LangArg> for Language {
    fn from(lang: LangArg) -> Self {
        match lang {
            LangArg::En => Language::English,
            LangArg::Hi => Language::Hindi,
        }
    }
}

pub async fn run(args: AnalyzeArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = super::load_config(config_path)?;

    let transcript = read_transcript(&args)?;
    if transcript.trim().is_empty() {
        anyhow::bail!("Transcript is empty");
    }

    info!("Analyzing {} characters of transcript", transcript.chars().count());

    let analyzer = TranscriptAnalyzer::with_config(config);
    let language = args.lang.map(Language::from);

    let output = if args.draft || args.validate {
        let mut request = VoiceRequest::new(transcript, args.customer.as_str());
        if let Some(language) = language {
            request = request.with_language(language);
        }
        let draft = analyzer.draft(&request)?;

        if args.validate {
            let issues = draft.validate();
            if !issues.is_empty() {
                eprintln!("{}", style("Validation issues:").yellow());
                for issue in &issues {
                    eprintln!("  - {}", issue);
                }
            }
        }

        format_draft(&draft, args.format)?
    } else {
        let result = analyzer.analyze(&transcript, language);
        format_result(&result, args.format)?
    };

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

    Ok(())
}

fn read_transcript(args: &AnalyzeArgs) -> anyhow::Result<String> {
    if let Some(text) = &args.text {
        return Ok(text.clone());
    }

    if let Some(path) = &args.file {
        if !path.exists() {
            anyhow::bail!("Input file not found: {}", path.display());
        }
        return Ok(fs::read_to_string(path)?);
    }

    let mut buffer = String::new();
    std::io::stdin().read_to_string(&mut buffer)?;
    Ok(buffer)
}

pub fn format_result(result: &ExtractionResult, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(result)?),
        OutputFormat::Csv => result_csv(result),
        OutputFormat::Text => Ok(result_text(result)),
    }
}

pub fn format_draft(draft: &InvoiceDraft, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(draft)?),
        OutputFormat::Csv => draft_csv(draft),
        OutputFormat::Text => Ok(draft_text(draft)),
    }
}

fn result_csv(result: &ExtractionResult) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "language",
        "customer_name",
        "description",
        "quantity",
        "unit_price",
        "total",
    ])?;

    let customer = result.customer_name.clone().unwrap_or_default();
    for item in &result.items {
        wtr.write_record([
            result.language.code(),
            &customer,
            &item.description,
            &item.quantity.to_string(),
            &item.unit_price.to_string(),
            &item.total.to_string(),
        ])?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn draft_csv(draft: &InvoiceDraft) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "customer_name",
        "issue_date",
        "due_date",
        "description",
        "quantity",
        "unit_price",
        "total",
        "currency",
    ])?;

    for item in &draft.items {
        wtr.write_record([
            &draft.customer_name,
            &draft.issue_date.to_string(),
            &draft.due_date.to_string(),
            &item.description,
            &item.quantity.to_string(),
            &item.unit_price.to_string(),
            &item.total.to_string(),
            &draft.currency,
        ])?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn result_text(result: &ExtractionResult) -> String {
    let mut output = String::new();

    output.push_str(&format!("Language: {}\n", result.language));
    output.push_str(&format!(
        "Customer: {}\n",
        result.customer_name.as_deref().unwrap_or("-")
    ));
    output.push_str(&format!("Services: {}\n", result.services.join(", ")));

    let amounts: Vec<String> = result.amounts.iter().map(|a| a.to_string()).collect();
    output.push_str(&format!("Amounts: {}\n", amounts.join(", ")));
    output.push('\n');

    output.push_str("Items:\n");
    if result.items.is_empty() {
        output.push_str("  (none)\n");
    }
    for (i, item) in result.items.iter().enumerate() {
        output.push_str(&format!(
            "  {}. {}  {} x {} = {}\n",
            i + 1,
            item.description,
            item.quantity,
            item.unit_price,
            item.total
        ));
    }

    output
}

fn draft_text(draft: &InvoiceDraft) -> String {
    let mut output = String::new();

    output.push_str(&format!("Customer: {}\n", draft.customer_name));
    output.push_str(&format!("Language: {}\n", draft.language));
    output.push_str(&format!("Issued: {}\n", draft.issue_date));
    output.push_str(&format!("Due: {}\n", draft.due_date));
    output.push('\n');

    output.push_str("Items:\n");
    for (i, item) in draft.items.iter().enumerate() {
        output.push_str(&format!(
            "  {}. {}  {} x {} = {} {}\n",
            i + 1,
            item.description,
            item.quantity,
            item.unit_price,
            item.total,
            draft.currency
        ));
    }
    output.push('\n');

    output.push_str("Summary:\n");
    output.push_str(&format!("  Subtotal: {} {}\n", draft.subtotal, draft.currency));
    output.push_str(&format!(
        "  Tax ({}%): {} {}\n",
        (draft.tax_rate * Decimal::ONE_HUNDRED).normalize(),
        draft.tax_amount,
        draft.currency
    ));
    output.push_str(&format!("  Total: {} {}\n", draft.total_amount, draft.currency));

    if !draft.suggestions.is_empty() {
        output.push_str("\nSuggestions:\n");
        for suggestion in &draft.suggestions {
            output.push_str(&format!("  - {}\n", suggestion));
        }
    }

    output.push_str(&format!("\n{}\n", draft.message));

    output
}
