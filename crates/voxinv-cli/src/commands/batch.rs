//! Batch command - draft invoices for many transcript files.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::Semaphore;
use tokio::task::JoinError;
use tracing::{debug, error, warn};

use voxinv_core::{InvoiceDraft, InvoiceExtractor, Language, TranscriptAnalyzer, VoiceRequest};

use super::analyze::{format_draft, OutputFormat};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Glob pattern matching transcript files (.txt)
    #[arg(required = true)]
    input: String,

    /// Output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Number of parallel workers
    #[arg(short = 'j', long, default_value = "4")]
    jobs: usize,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,

    /// Customer name used for files that do not mention one
    #[arg(long, default_value = "")]
    customer: String,

    /// Locale code of the transcripts, e.g. "hi-IN" (detected per file when omitted)
    #[arg(short, long)]
    lang: Option<String>,
}

/// Result of processing a single file.
struct FileResult {
    path: PathBuf,
    draft: Option<InvoiceDraft>,
    error: Option<String>,
    processing_time_ms: u64,
}

impl FileResult {
    fn new(path: PathBuf, outcome: anyhow::Result<InvoiceDraft>, started: Instant) -> Self {
        let processing_time_ms = started.elapsed().as_millis() as u64;
        match outcome {
            Ok(draft) => Self {
                path,
                draft: Some(draft),
                error: None,
                processing_time_ms,
            },
            Err(e) => Self {
                path,
                draft: None,
                error: Some(e.to_string()),
                processing_time_ms,
            },
        }
    }

    /// Turn a finished worker into a per-file result. Panicked or cancelled
    /// workers become failures for their file only.
    fn settle(path: PathBuf, joined: Result<anyhow::Result<FileResult>, JoinError>) -> Self {
        let error = match joined {
            Ok(Ok(result)) => return result,
            Ok(Err(e)) => e.to_string(),
            Err(e) => format!("worker task failed: {}", e),
        };

        Self {
            path,
            draft: None,
            error: Some(error),
            processing_time_ms: 0,
        }
    }
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = super::load_config(config_path)?;

    let mut files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            p.extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case("txt"))
        })
        .collect();
    files.sort();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let progress = ProgressBar::new(files.len() as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let analyzer = Arc::new(TranscriptAnalyzer::with_config(config));
    let permits = Arc::new(Semaphore::new(args.jobs.max(1)));
    let language = args.lang.as_deref().map(Language::from_code);

    let mut handles = Vec::with_capacity(files.len());
    for path in files {
        let analyzer = Arc::clone(&analyzer);
        let permits = Arc::clone(&permits);
        let customer = args.customer.clone();
        let progress = progress.clone();
        let task_path = path.clone();

        let handle = tokio::spawn(async move {
            let _permit = permits.acquire_owned().await?;
            let result = tokio::task::spawn_blocking(move || {
                let file_start = Instant::now();
                let outcome = draft_file(&task_path, &analyzer, &customer, language);
                FileResult::new(task_path, outcome, file_start)
            })
            .await;
            progress.inc(1);
            anyhow::Ok(result?)
        });
        handles.push((path, handle));
    }

    // Handles are awaited in submission order so results follow the sorted file list
    let mut results = Vec::with_capacity(handles.len());
    for (path, handle) in handles {
        let result = FileResult::settle(path, handle.await);

        if let Some(error_msg) = &result.error {
            if args.continue_on_error {
                warn!("Failed to process {}: {}", result.path.display(), error_msg);
            } else {
                error!("Failed to process {}: {}", result.path.display(), error_msg);
                progress.abandon();
                anyhow::bail!("Processing failed: {}", error_msg);
            }
        }
        results.push(result);
    }

    progress.finish_with_message("Complete");

    let successful: Vec<_> = results.iter().filter(|r| r.draft.is_some()).collect();
    let failed: Vec<_> = results.iter().filter(|r| r.error.is_some()).collect();

    if let Some(output_dir) = &args.output_dir {
        for result in &successful {
            let Some(draft) = &result.draft else { continue };
            let output_name = result
                .path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("invoice");
            let output_path =
                output_dir.join(format!("{}.{}", output_name, args.format.extension()));

            fs::write(&output_path, format_draft(draft, args.format)?)?;
            debug!("Wrote output to {}", output_path.display());
        }
    }

    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &results)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed",
        style(successful.len()).green(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for result in &failed {
            println!(
                "  - {}: {}",
                result.path.display(),
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

fn draft_file(
    path: &Path,
    analyzer: &TranscriptAnalyzer,
    customer: &str,
    language: Option<Language>,
) -> anyhow::Result<InvoiceDraft> {
    let transcript = fs::read_to_string(path)?;
    if transcript.trim().is_empty() {
        anyhow::bail!("Transcript is empty");
    }

    let mut request = VoiceRequest::new(transcript, customer);
    if let Some(language) = language {
        request = request.with_language(language);
    }
    Ok(analyzer.draft(&request)?)
}

fn write_summary(path: &Path, results: &[FileResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "filename",
        "status",
        "language",
        "customer_name",
        "services",
        "amounts",
        "items",
        "total_amount",
        "processing_time_ms",
        "error",
    ])?;

    for result in results {
        let filename = result
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("");

        if let Some(draft) = &result.draft {
            let amounts: Vec<String> = draft.amounts.iter().map(|a| a.to_string()).collect();
            wtr.write_record([
                filename,
                "success",
                draft.language.code(),
                &draft.customer_name,
                &draft.services.join("; "),
                &amounts.join("; "),
                &draft.items.len().to_string(),
                &draft.total_amount.to_string(),
                &result.processing_time_ms.to_string(),
                "",
            ])?;
        } else {
            wtr.write_record([
                filename,
                "error",
                "",
                "",
                "",
                "",
                "",
                "",
                &result.processing_time_ms.to_string(),
                result.error.as_deref().unwrap_or(""),
            ])?;
        }
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_panicked_worker_becomes_file_failure() {
        let handle = tokio::spawn(async {
            let result: anyhow::Result<FileResult> = tokio::task::spawn_blocking(|| {
                panic!("worker blew up")
            })
            .await
            .map_err(anyhow::Error::from);
            result
        });

        let result = FileResult::settle(PathBuf::from("bad.txt"), handle.await);
        assert_eq!(result.path, PathBuf::from("bad.txt"));
        assert!(result.draft.is_none());
        assert!(result.error.is_some());
    }

    #[tokio::test]
    async fn test_panic_outside_blocking_task_becomes_file_failure() {
        let handle = tokio::spawn(async {
            if true {
                panic!("scheduler task blew up");
            }
            anyhow::Ok(FileResult::settle(PathBuf::new(), Ok(Err(anyhow::anyhow!("unused")))))
        });

        let result = FileResult::settle(PathBuf::from("worse.txt"), handle.await);
        assert_eq!(result.path, PathBuf::from("worse.txt"));
        assert!(result.error.unwrap().starts_with("worker task failed"));
    }

    #[test]
    fn test_completed_worker_is_kept() {
        let analyzer = TranscriptAnalyzer::new();
        let draft = analyzer
            .draft(&VoiceRequest::new("seo 100 dollars", "Acme"))
            .unwrap();
        let done = FileResult::new(PathBuf::from("ok.txt"), Ok(draft), Instant::now());

        let result = FileResult::settle(PathBuf::from("ignored.txt"), Ok(Ok(done)));
        assert_eq!(result.path, PathBuf::from("ok.txt"));
        assert!(result.draft.is_some());
        assert!(result.error.is_none());
    }
}
