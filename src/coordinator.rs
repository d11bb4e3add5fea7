//! Run coordination: every configured source, in order, into one sink.
//!
//! The sink is initialized once before any source is scraped; that is the
//! only step whose failure aborts the run. After it, a source that fails to
//! fetch, yields nothing or panics is logged and skipped, and a record the
//! sink refuses is logged and counted while the rest keep flowing.

use std::panic::AssertUnwindSafe;

use chrono::NaiveDate;
use futures::FutureExt;
use tracing::{debug, error, info, instrument, warn};

use crate::fetch::Fetcher;
use crate::models::COLUMNS;
use crate::outputs::{Sink, SinkError};
use crate::scrapers::{SourceExtractor, scrape};
use crate::utils::truncate_for_log;
use crate::zones::panic_message;

/// What happened to one source during a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceReport {
    pub source: String,
    pub scraped: usize,
    pub written: usize,
    pub failed_writes: usize,
    /// The scrape panicked and was abandoned.
    pub faulted: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub sources: Vec<SourceReport>,
}

impl RunSummary {
    pub fn written(&self) -> usize {
        self.sources.iter().map(|s| s.written).sum()
    }

    pub fn failed_writes(&self) -> usize {
        self.sources.iter().map(|s| s.failed_writes).sum()
    }
}

pub struct Coordinator {
    sources: Vec<Box<dyn SourceExtractor>>,
    fecha: NaiveDate,
}

impl Coordinator {
    pub fn new(sources: Vec<Box<dyn SourceExtractor>>, fecha: NaiveDate) -> Self {
        Self { sources, fecha }
    }

    /// Scrape every source sequentially and append its records to `sink`.
    ///
    /// # Returns
    ///
    /// A [`RunSummary`] with one [`SourceReport`] per source, in run order.
    ///
    /// # Errors
    ///
    /// Only when the sink cannot be initialized; nothing is scraped then.
    #[instrument(level = "info", skip_all, fields(fecha = %self.fecha, sources = self.sources.len()))]
    pub async fn run<F: Fetcher, S: Sink>(&self, fetcher: &F, sink: &mut S) -> Result<RunSummary, SinkError> {
        sink.initialize(&COLUMNS).await.inspect_err(|e| error!(error = %e, "Could not initialize sink"))?;

        let mut summary = RunSummary::default();
        for source in &self.sources {
            let mut report = SourceReport { source: source.name().to_string(), ..SourceReport::default() };

            let records = match AssertUnwindSafe(scrape(source.as_ref(), fetcher, self.fecha)).catch_unwind().await {
                Ok(records) => records,
                Err(payload) => {
                    error!(source = %report.source, fault = %panic_message(payload.as_ref()), "Source scrape aborted");
                    report.faulted = true;
                    summary.sources.push(report);
                    continue;
                }
            };
            report.scraped = records.len();
            if records.is_empty() {
                warn!(source = %report.source, "Source produced no headlines");
            }

            for record in &records {
                debug!(
                    source = %report.source,
                    zone = record.zona_portada(),
                    title = %truncate_for_log(record.titular(), 80),
                    "Writing headline"
                );
                match sink.append(record).await {
                    Ok(()) => report.written += 1,
                    Err(e) => {
                        error!(source = %report.source, error = %e, "Could not write headline");
                        report.failed_writes += 1;
                    }
                }
            }

            info!(source = %report.source, written = report.written, failed = report.failed_writes, "Source done");
            summary.sources.push(report);
        }
        Ok(summary)
    }
}
