// src/main.rs
mod extractors;
mod source;
mod storage;
mod utils;

use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use extractors::{RosterExtractor, TeamRecord};
use source::loader;
use storage::StorageManager;
use utils::AppError;

/// Output formats for extracted rosters
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// One JSON record (plus metadata) per document
    Json,
    /// teams.csv and players.csv for the whole batch
    Csv,
    Both,
}

impl OutputFormat {
    fn writes_json(self) -> bool {
        matches!(self, OutputFormat::Json | OutputFormat::Both)
    }

    fn writes_csv(self) -> bool {
        matches!(self, OutputFormat::Csv | OutputFormat::Both)
    }
}

/// Command Line Interface for the Blood Bowl roster sheet parser
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Span dumps of roster sheets, or directories containing them
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Output directory for extracted rosters
    #[arg(short, long, default_value = "./output")]
    output_dir: String,

    /// Which outputs to write
    #[arg(long, value_enum, default_value_t = OutputFormat::Both)]
    format: OutputFormat,

    /// Debug mode - verbose logging and the fragment stream of every document
    #[arg(short, long)]
    debug: bool,

    /// Stop at the first document that fails instead of moving on
    #[arg(long)]
    fail_fast: bool,
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // 1. Parse CLI Arguments
    let args = Args::parse();

    // 2. Setup Logging (reads RUST_LOG env var, --debug raises the default)
    utils::logging::setup_logging(args.debug);
    tracing::info!("Starting processing for args: {:?}", args);

    // 3. Resolve input documents
    let inputs = loader::collect_inputs(&args.inputs).await?;
    if inputs.is_empty() {
        return Err(AppError::Config("No span dumps found in the given inputs".to_string()));
    }
    tracing::info!("Found {} documents", inputs.len());

    // 4. Initialize storage and extractor
    let storage = StorageManager::new(&args.output_dir)?;
    let extractor = RosterExtractor::new();

    // 5. Process each document independently
    let mut records = Vec::new();
    let mut failure_count = 0;

    for path in &inputs {
        match process_document(path, &extractor, &storage, &args).await {
            Ok(record) => records.push(record),
            Err(e) => {
                tracing::error!("Failed to process {}: {}", path.display(), e);
                failure_count += 1;
                if args.fail_fast {
                    return Err(e);
                }
            }
        }
    }

    // 6. Batch tables
    if args.format.writes_csv() && !records.is_empty() {
        storage.save_tables(&records)?;
    }

    tracing::info!("Processing finished. Success: {}, Failures: {}", records.len(), failure_count);

    if records.is_empty() && failure_count > 0 {
        return Err(AppError::Processing(format!("Failed to extract any rosters from {} documents", failure_count)));
    }

    Ok(())
}

/// Load, extract and (optionally) save a single roster sheet.
async fn process_document(
    path: &Path,
    extractor: &RosterExtractor,
    storage: &StorageManager,
    args: &Args,
) -> Result<TeamRecord, AppError> {
    let document = loader::load_document(path).await?;

    // Written before extraction so failing sheets can be inspected
    if args.debug {
        if let Err(e) = storage.save_fragment_trace(&document) {
            tracing::warn!("Failed to save fragment trace: {}", e);
        }
    }

    let record = extractor.process(&document)?;

    if args.format.writes_json() {
        storage.save_record(&record)?;
        storage.save_record_metadata(&record)?;
    }

    Ok(record)
}
