//! Append-only CSV output.
//!
//! The file is never truncated. The header row is written only when the
//! file is missing or empty, so consecutive runs accumulate rows under a
//! single header.
//!
//! The file is reopened in append mode for every row, so each row is on
//! disk once [`Sink::append`] returns.
//!
//! Fields containing the separator, a quote or a line break are quoted, with
//! inner quotes doubled.

use std::io::SeekFrom;
use std::path::{Path, PathBuf};

use tokio::fs::{self, File, OpenOptions};
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncSeekExt, AsyncWriteExt, BufReader};
use tracing::{debug, info, instrument, warn};

use super::{Sink, SinkError};
use crate::models::HeadlineRecord;

const SEP: char = ',';

fn needs_quotes(field: &str) -> bool {
    field.contains(SEP) || field.contains('"') || field.contains('\n') || field.contains('\r')
}

/// One CSV line, terminated by `\n`.
pub fn format_row<S: AsRef<str>>(row: &[S]) -> String {
    let mut line = String::new();
    for (i, cell) in row.iter().enumerate() {
        if i > 0 {
            line.push(SEP);
        }
        let cell = cell.as_ref();
        if needs_quotes(cell) {
            line.push('"');
            line.push_str(&cell.replace('"', "\"\""));
            line.push('"');
        } else {
            line.push_str(cell);
        }
    }
    line.push('\n');
    line
}

/// [`Sink`] appending to a CSV file.
#[derive(Debug)]
pub struct CsvSink {
    path: PathBuf,
    initialized: bool,
}

impl CsvSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), initialized: false }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> SinkError {
        SinkError::Io { path: self.path.clone(), source }
    }

    async fn first_line(&self) -> Result<Option<String>, SinkError> {
        let file = match File::open(&self.path).await {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.io_error(e)),
        };
        let mut line = String::new();
        BufReader::new(file).read_line(&mut line).await.map_err(|e| self.io_error(e))?;
        Ok((!line.is_empty()).then(|| line.trim_end_matches(['\r', '\n']).to_string()))
    }

    /// Whether the last byte of an existing, non-empty file is `\n`.
    async fn ends_with_newline(&self) -> Result<bool, SinkError> {
        let mut file = File::open(&self.path).await.map_err(|e| self.io_error(e))?;
        file.seek(SeekFrom::End(-1)).await.map_err(|e| self.io_error(e))?;
        let mut last = [0u8; 1];
        file.read_exact(&mut last).await.map_err(|e| self.io_error(e))?;
        Ok(last[0] == b'\n')
    }

    async fn write_line(&self, line: &str) -> Result<(), SinkError> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| self.io_error(e))?;
        file.write_all(line.as_bytes()).await.map_err(|e| self.io_error(e))?;
        file.flush().await.map_err(|e| self.io_error(e))
    }
}

impl Sink for CsvSink {
    #[instrument(level = "info", skip_all, fields(path = %self.path.display()))]
    async fn initialize(&mut self, columns: &[&str]) -> Result<(), SinkError> {
        if let Some(dir) = self.path.parent()
            && !dir.as_os_str().is_empty()
        {
            fs::create_dir_all(dir).await.map_err(|e| self.io_error(e))?;
        }

        match self.first_line().await? {
            None => {
                self.write_line(&format_row(columns)).await?;
                info!("Created CSV file with header");
            }
            Some(header) => {
                let expected = format_row(columns);
                if header != expected.trim_end_matches('\n') {
                    warn!(found = %header, "Existing CSV header differs from expected columns");
                }
                // An unterminated last row would swallow the next record.
                if !self.ends_with_newline().await? {
                    self.write_line("\n").await?;
                    warn!("Existing CSV file did not end with a newline; terminated last row");
                }
                debug!("Appending to existing CSV file");
            }
        }
        self.initialized = true;
        Ok(())
    }

    async fn append(&mut self, record: &HeadlineRecord) -> Result<(), SinkError> {
        if !self.initialized {
            return Err(SinkError::Rejected("sink not initialized".to_string()));
        }
        self.write_line(&format_row(&record.to_row())).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::COLUMNS;
    use chrono::NaiveDate;
    use url::Url;

    fn record(titular: &str) -> HeadlineRecord {
        HeadlineRecord::new(
            NaiveDate::from_ymd_opt(2025, 5, 6).unwrap(),
            "0223",
            titular,
            "apertura_principal",
            "Policiales",
            &Url::parse("https://www.0223.com.ar/policiales/nota-1").unwrap(),
        )
        .unwrap()
    }

    async fn lines(path: &Path) -> Vec<String> {
        fs::read_to_string(path).await.unwrap().lines().map(str::to_string).collect()
    }

    #[test]
    fn test_format_row_quotes_when_needed() {
        assert_eq!(format_row(&["a", "b"]), "a,b\n");
        assert_eq!(format_row(&["Paro, movilización", "x"]), "\"Paro, movilización\",x\n");
        assert_eq!(format_row(&["Dijo \"basta\""]), "\"Dijo \"\"basta\"\"\"\n");
        assert_eq!(format_row(&["dos\nlíneas"]), "\"dos\nlíneas\"\n");
    }

    #[tokio::test]
    async fn test_new_file_gets_header_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("titulares.csv");
        let mut sink = CsvSink::new(&path);
        sink.initialize(&COLUMNS).await.unwrap();
        sink.append(&record("Corte de agua")).await.unwrap();

        assert_eq!(
            lines(&path).await,
            vec![
                "fecha,medio,titular,zona_portada,seccion,url".to_string(),
                "2025-05-06,0223,Corte de agua,apertura_principal,Policiales,https://www.0223.com.ar/policiales/nota-1"
                    .to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_reinitialize_keeps_rows_and_single_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("titulares.csv");

        let mut first = CsvSink::new(&path);
        first.initialize(&COLUMNS).await.unwrap();
        first.append(&record("Primera")).await.unwrap();
        drop(first);

        let mut second = CsvSink::new(&path);
        second.initialize(&COLUMNS).await.unwrap();
        assert_eq!(lines(&path).await.len(), 2);

        second.initialize(&COLUMNS).await.unwrap();
        assert_eq!(lines(&path).await.len(), 2);

        second.append(&record("Segunda")).await.unwrap();
        let rows = lines(&path).await;
        assert_eq!(rows.len(), 3);
        assert_eq!(rows.iter().filter(|l| l.starts_with("fecha,")).count(), 1);
    }

    #[tokio::test]
    async fn test_empty_file_gets_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("titulares.csv");
        fs::write(&path, "").await.unwrap();

        let mut sink = CsvSink::new(&path);
        sink.initialize(&COLUMNS).await.unwrap();
        assert_eq!(lines(&path).await, vec!["fecha,medio,titular,zona_portada,seccion,url".to_string()]);
    }

    #[tokio::test]
    async fn test_unterminated_last_row_is_not_joined() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("titulares.csv");
        fs::write(&path, "fecha,medio,titular,zona_portada,seccion,url\n2025-05-05,X,Vieja,z,s,https://e.com/a")
            .await
            .unwrap();

        let mut sink = CsvSink::new(&path);
        sink.initialize(&COLUMNS).await.unwrap();
        sink.append(&record("Nueva")).await.unwrap();

        let rows = lines(&path).await;
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1], "2025-05-05,X,Vieja,z,s,https://e.com/a");
        assert!(rows[2].starts_with("2025-05-06,0223,Nueva,"));
    }

    #[tokio::test]
    async fn test_append_before_initialize_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = CsvSink::new(dir.path().join("t.csv"));
        assert!(matches!(sink.append(&record("x")).await, Err(SinkError::Rejected(_))));
    }

    #[tokio::test]
    async fn test_title_with_comma_is_quoted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("titulares.csv");
        let mut sink = CsvSink::new(&path);
        sink.initialize(&COLUMNS).await.unwrap();
        sink.append(&record("Paro, movilización y \"cortes\"")).await.unwrap();

        let rows = lines(&path).await;
        assert!(rows[1].starts_with("2025-05-06,0223,\"Paro, movilización y \"\"cortes\"\"\",apertura_principal"));
    }
}
