//! Extract command: one document or a folder of documents into one table.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, error};

use certx_core::extraction::reconcile::empty_record;
use certx_core::models::record::source_name;
use certx_core::batch::run_batch;
use certx_core::{BatchResult, DocumentOutcome, DocumentProcessor, FieldSetVersion, InputKind};

use crate::output::{format_record_text, write_records, OutputFormat};

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// PDF file or folder containing PDF files
    #[arg(required = true)]
    input: PathBuf,

    /// Output file [default: extracted_data.csv]
    output: Option<PathBuf>,

    /// Field set: v1 (first certificate layout) or v2 (revised layout) [default: from config]
    #[arg(long)]
    field_set: Option<FieldSetVersion>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "csv")]
    format: OutputFormat,

    /// Number of documents processed in parallel
    #[arg(short = 'j', long)]
    jobs: Option<usize>,

    /// Write an empty row for documents whose text could not be read
    #[arg(long)]
    keep_failed: bool,

    /// Print each extracted record to stdout
    #[arg(long)]
    print: bool,
}

pub async fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = super::config::load(config_path)?;

    let version = args.field_set.unwrap_or(config.extraction.field_set);
    let output_path = args.output.clone().unwrap_or_else(|| config.batch.output.clone());
    let jobs = args.jobs.unwrap_or(config.batch.jobs).max(1);
    let keep_unreadable = args.keep_failed || config.batch.keep_unreadable;
    let extensions = &config.batch.extensions;

    let Ok(input) = InputKind::resolve(&args.input, extensions) else {
        anyhow::bail!(
            "Please provide a valid PDF file or folder containing PDF files: {}",
            args.input.display()
        );
    };
    let single_document = matches!(input, InputKind::Document(_));

    let documents = input.documents(extensions)?;
    if documents.is_empty() {
        eprintln!(
            "{} No documents found in {}",
            style("⚠").yellow(),
            args.input.display()
        );
        return Ok(());
    }

    debug!(
        "Extracting {} documents with field set {} ({} jobs)",
        documents.len(),
        version,
        jobs
    );

    let processor = DocumentProcessor::new(version, config.pdf.clone());
    let result = process_documents(processor, &documents, jobs, keep_unreadable).await?;

    if args.print || single_document {
        for record in &result.records {
            println!("{}", format_record_text(record));
        }
    }

    if result.records.is_empty() {
        eprintln!(
            "{} No data could be extracted from the provided documents",
            style("⚠").yellow()
        );
        print_failures(&result);
        return Ok(());
    }

    write_records(&output_path, &result.records, args.format)?;

    println!(
        "{} Processed {} documents in {:?}",
        style("✓").green(),
        result.processed,
        start.elapsed()
    );
    println!(
        "   {} extracted, {} unreadable",
        style(result.extracted_count()).green(),
        style(result.failures.len()).red()
    );
    println!(
        "{} Data saved to {}",
        style("✓").green(),
        output_path.display()
    );
    print_failures(&result);

    Ok(())
}

/// Run documents through the processor on at most `jobs` blocking workers and
/// collect the outcomes in input order. One job runs the library's sequential
/// batch on a single blocking worker.
async fn process_documents(
    processor: DocumentProcessor,
    documents: &[PathBuf],
    jobs: usize,
    keep_unreadable: bool,
) -> anyhow::Result<BatchResult> {
    if jobs == 1 {
        let documents = documents.to_vec();
        let result =
            tokio::task::spawn_blocking(move || run_batch(&processor, &documents, keep_unreadable)).await?;
        return Ok(result);
    }

    let progress = ProgressBar::new(documents.len() as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} documents")?
            .progress_chars("=>-"),
    );

    let processor = Arc::new(processor);
    let semaphore = Arc::new(Semaphore::new(jobs));
    let mut tasks = JoinSet::new();

    for (index, path) in documents.iter().cloned().enumerate() {
        let processor = Arc::clone(&processor);
        let semaphore = Arc::clone(&semaphore);
        tasks.spawn(async move { (index, process_one(processor, semaphore, path).await) });
    }

    let mut outcomes: Vec<Option<DocumentOutcome>> = vec![None; documents.len()];
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((index, outcome)) => outcomes[index] = Some(outcome),
            Err(e) => error!("Document task failed: {}", e),
        }
        progress.inc(1);
    }
    progress.finish_and_clear();

    let mut result = BatchResult::default();
    for (path, outcome) in documents.iter().zip(outcomes) {
        let outcome = outcome.unwrap_or_else(|| unreadable(&processor, path, "document task failed".to_string()));
        result.push(path, outcome, keep_unreadable);
    }

    Ok(result)
}

async fn process_one(processor: Arc<DocumentProcessor>, semaphore: Arc<Semaphore>, path: PathBuf) -> DocumentOutcome {
    let _permit = match semaphore.acquire_owned().await {
        Ok(permit) => permit,
        Err(e) => return unreadable(&processor, &path, e.to_string()),
    };

    let worker = Arc::clone(&processor);
    let document = path.clone();
    match tokio::task::spawn_blocking(move || worker.process(&document)).await {
        Ok(outcome) => outcome,
        Err(e) => {
            // A panic inside a text library lands here
            error!("Failed to process {}: {}", path.display(), e);
            unreadable(&processor, &path, format!("processing failed: {}", e))
        }
    }
}

fn unreadable(processor: &DocumentProcessor, path: &std::path::Path, reason: String) -> DocumentOutcome {
    DocumentOutcome::Unreadable {
        record: empty_record(processor.field_set(), &source_name(path)),
        reason,
    }
}

fn print_failures(result: &BatchResult) {
    if result.failures.is_empty() {
        return;
    }

    eprintln!();
    eprintln!("{}", style("Unreadable documents:").red());
    for failure in &result.failures {
        eprintln!("  - {}: {}", failure.path.display(), failure.reason);
    }
}
