use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use ingest::{
    read_catalog, read_credits, Document, IngestError, ReaderStats, TableStats, WikiReader,
};
use matcher::{
    CreditFeatures, FeatureSource, MatchConfig, MatchTable, Orchestrator, RunStats, TitleFeatures,
};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::config::FilmlinkConfig;
use crate::output::write_results;
use crate::PipelineError;

/// Input files for a match run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputPaths {
    /// Encyclopedia abstract dump (XML).
    pub wiki: PathBuf,
    /// Movie metadata table (CSV).
    pub catalog: PathBuf,
    /// Credits table (CSV).
    pub credits: PathBuf,
}

/// Everything a finished run produced.
#[derive(Debug, Clone)]
pub struct MatchSummary {
    pub reader: ReaderStats,
    pub stats: RunStats,
    pub table: MatchTable,
}

fn open(path: &Path) -> Result<File, PipelineError> {
    File::open(path).map_err(|source| PipelineError::Open {
        path: path.to_path_buf(),
        source,
    })
}

fn log_table_stats(stats: &TableStats) {
    info!("{stats}");
}

/// Read both catalog tables and build the feature sources, title first.
pub fn load_sources(
    inputs: &InputPaths,
    config: &MatchConfig,
) -> Result<Vec<FeatureSource>, PipelineError> {
    let (catalog, catalog_stats) = read_catalog(
        &inputs.catalog.display().to_string(),
        BufReader::new(open(&inputs.catalog)?),
    )?;
    log_table_stats(&catalog_stats);

    let (credits, credit_stats) = read_credits(
        &inputs.credits.display().to_string(),
        BufReader::new(open(&inputs.credits)?),
    )?;
    log_table_stats(&credit_stats);

    let title = TitleFeatures::build(catalog, config.title_bias)?;
    let credits = CreditFeatures::build(credits);
    info!(
        titles = title.len(),
        credits = credits.len(),
        "feature_sources_loaded"
    );

    Ok(vec![title.into(), credits.into()])
}

/// Run the movie document stream on a blocking thread.
///
/// Documents are pushed into a bounded channel of `capacity`; the reader
/// blocks while the channel is full. The channel closes when the stream is
/// exhausted, when the reader fails, or when the receiver is dropped. The
/// handle yields the reader counters, or the error that stopped it.
pub fn spawn_document_producer<R>(
    reader: WikiReader<R>,
    capacity: usize,
) -> (
    mpsc::Receiver<Document>,
    JoinHandle<Result<ReaderStats, IngestError>>,
)
where
    R: BufRead + Send + 'static,
{
    let (tx, rx) = mpsc::channel(capacity);
    let handle = tokio::task::spawn_blocking(move || {
        let mut movies = reader.movies();
        for item in movies.by_ref() {
            let doc = item?;
            if tx.blocking_send(doc).is_err() {
                warn!("document_consumer_closed");
                break;
            }
        }
        let stats = movies.stats();
        info!(
            documents_seen = stats.documents_seen,
            movies_emitted = stats.movies_emitted,
            "document_stream_finished"
        );
        Ok(stats)
    });
    (rx, handle)
}

/// Load the catalog, stream the dump through the matcher and write the
/// results to `config.output.path`.
///
/// The output file is rewritten at every checkpoint, so an interrupted run
/// still leaves a usable partial table behind.
pub async fn run_match(
    inputs: &InputPaths,
    config: &FilmlinkConfig,
) -> Result<MatchSummary, PipelineError> {
    config.validate()?;

    let sources = load_sources(inputs, &config.matcher)?;
    let orchestrator = Orchestrator::new(sources, config.matcher.clone())?;

    let reader = WikiReader::new(
        BufReader::new(open(&inputs.wiki)?),
        config.ingest.title_prefix.clone(),
    );
    let (documents, producer) = spawn_document_producer(reader, config.ingest.queue_capacity);

    let output = config.output.path.as_path();
    let report = orchestrator
        .run(documents, |table| {
            if let Err(err) = write_results(table, output) {
                warn!(error = %err, path = %output.display(), "checkpoint_write_failed");
            }
        })
        .await;

    let reader_stats = producer
        .await
        .map_err(|err| PipelineError::Producer(err.to_string()))??;

    write_results(&report.table, output)?;
    info!(
        matched = report.table.len(),
        path = %output.display(),
        "results_written"
    );

    Ok(MatchSummary {
        reader: reader_stats,
        stats: report.stats,
        table: report.table,
    })
}
