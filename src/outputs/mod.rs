//! Headline record sinks.
//!
//! A [`Sink`] is an append-only destination for [`HeadlineRecord`]s. It is
//! initialized once per run and then receives records one at a time, so a
//! write failure costs a single row and never the rest of the run.
//!
//! # Submodules
//!
//! - [`csv`]: Appends rows to a CSV file, writing the header only once
//!
//! # Output Structure
//!
//! ```text
//! data/
//! └── titulares.csv   # fecha,medio,titular,zona_portada,seccion,url
//! ```

pub mod csv;

use std::path::PathBuf;

use thiserror::Error;

use crate::models::HeadlineRecord;

#[derive(Error, Debug)]
pub enum SinkError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("sink rejected record: {0}")]
    Rejected(String),
}

/// Append-only destination for records.
pub trait Sink {
    /// Prepare the destination for `columns`. Idempotent: calling it on an
    /// already initialized destination changes nothing.
    async fn initialize(&mut self, columns: &[&str]) -> Result<(), SinkError>;

    /// Append one record.
    async fn append(&mut self, record: &HeadlineRecord) -> Result<(), SinkError>;
}
