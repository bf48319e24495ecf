//! Snapshot sources and parsing

use crate::{config::SanctionsConfig, types::SanctionsEntry, Error, Result};
use async_trait::async_trait;
use bytes::Bytes;
use calamine::{open_workbook_from_rs, Data, Reader, Xlsx};
use reqwest::Client;
use std::collections::HashSet;
use std::io::Cursor;
use std::time::Duration;
use tracing::{debug, info};

/// Where raw sanctions snapshots come from
#[async_trait]
pub trait SnapshotSource: Send + Sync {
    /// Fetch the raw snapshot bytes
    async fn fetch(&self) -> Result<Bytes>;
}

/// Snapshot exported over HTTP
#[derive(Debug, Clone)]
pub struct HttpSnapshotSource {
    client: Client,
    url: String,
    query: Vec<(String, String)>,
}

impl HttpSnapshotSource {
    /// Source for a URL with extra query parameters
    pub fn new(url: impl Into<String>, query: Vec<(String, String)>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url: url.into(),
            query,
        })
    }

    /// Source configured from [`SanctionsConfig`]
    pub fn from_config(config: &SanctionsConfig) -> Result<Self> {
        Self::new(
            config.snapshot_url.clone(),
            config
                .snapshot_query
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
            Duration::from_secs(config.request_timeout_secs),
        )
    }
}

#[async_trait]
impl SnapshotSource for HttpSnapshotSource {
    async fn fetch(&self) -> Result<Bytes> {
        info!("Downloading sanctions snapshot from {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .query(&self.query)
            .send()
            .await?
            .error_for_status()?;

        let bytes = response.bytes().await?;
        debug!("Downloaded {} byte sanctions snapshot", bytes.len());
        Ok(bytes)
    }
}

/// Leading bytes of a zip container, which every xlsx workbook is
const XLSX_MAGIC: &[u8] = b"PK\x03\x04";

/// Parse a snapshot with a header row.
///
/// An xlsx workbook (the SECO export) is read from its first sheet; any
/// other body is read as CSV. Columns 0-3 are SSID, program, sanctions and
/// subject type; the name is read from `name_column`. Blank names are
/// skipped and each name is kept once, at its first occurrence. A snapshot
/// without any name is rejected so that an empty download never reads as
/// "nobody is sanctioned".
pub fn parse_snapshot(bytes: &[u8], name_column: usize) -> Result<Vec<SanctionsEntry>> {
    let rows = if bytes.starts_with(XLSX_MAGIC) {
        workbook_rows(bytes)?
    } else {
        csv_rows(bytes)?
    };
    entries_from_rows(rows, name_column)
}

/// Data rows of the first sheet, header skipped
fn workbook_rows(bytes: &[u8]) -> Result<Vec<Vec<String>>> {
    let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| Error::Snapshot("workbook has no sheets".to_string()))??;

    // Ranges start at the first used cell; pad so indices stay absolute.
    let first_column = range.start().map(|(_, col)| col as usize).unwrap_or(0);

    Ok(range
        .rows()
        .skip(1)
        .map(|row| {
            std::iter::repeat(String::new())
                .take(first_column)
                .chain(row.iter().map(cell_text))
                .collect()
        })
        .collect())
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}

/// Data rows of a CSV body, header skipped
fn csv_rows(bytes: &[u8]) -> Result<Vec<Vec<String>>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);

    let mut rows = Vec::new();
    for record in reader.records() {
        rows.push(record?.iter().map(str::to_string).collect());
    }
    Ok(rows)
}

fn entries_from_rows(rows: Vec<Vec<String>>, name_column: usize) -> Result<Vec<SanctionsEntry>> {
    let mut seen = HashSet::new();
    let mut entries = Vec::new();

    for (row, record) in rows.iter().enumerate() {
        // Trailing empty cells are not always stored
        if record.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }

        let name = record.get(name_column).ok_or_else(|| {
            Error::Snapshot(format!(
                "row {} has {} columns, name column is {}",
                row + 1,
                record.len(),
                name_column
            ))
        })?;

        let name = name.trim();
        if name.is_empty() || !seen.insert(name.to_string()) {
            continue;
        }

        let column = |i: usize| record.get(i).map(|c| c.trim().to_string()).unwrap_or_default();
        entries.push(SanctionsEntry {
            ssid: column(0),
            program: column(1),
            sanctions: column(2),
            entity_type: column(3),
            name: name.to_string(),
        });
    }

    if entries.is_empty() {
        return Err(Error::Snapshot("snapshot contains no names".to_string()));
    }

    Ok(entries)
}
