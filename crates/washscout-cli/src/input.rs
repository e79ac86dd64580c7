//! Input CSV: one site per data row, columns taken by position.

use std::borrow::Cow;
use std::io::Read;
use std::path::Path;

use anyhow::Context;
use washscout_core::OriginSite;

const ADDRESS_COLUMN: usize = 0;
const LATITUDE_COLUMN: usize = 1;
const LONGITUDE_COLUMN: usize = 2;

/// Half-open range of zero-based data rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RowRange {
    start: usize,
    end: Option<usize>,
}

impl RowRange {
    pub(crate) fn new(start: usize, end: Option<usize>) -> anyhow::Result<Self> {
        if let Some(end) = end {
            anyhow::ensure!(end >= start, "--end ({end}) must not be before --start ({start})");
        }
        Ok(Self { start, end })
    }

    fn contains(self, row: usize) -> bool {
        row >= self.start && self.end.is_none_or(|end| row < end)
    }

    fn is_past(self, row: usize) -> bool {
        self.end.is_some_and(|end| row >= end)
    }
}

/// Reads the sites in `range` from the CSV at `path`.
pub(crate) fn read_sites(path: &Path, range: RowRange) -> anyhow::Result<Vec<OriginSite>> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("failed to open input {}", path.display()))?;
    parse_sites(file, range).with_context(|| format!("failed to read input {}", path.display()))
}

pub(crate) fn parse_sites<R: Read>(reader: R, range: RowRange) -> anyhow::Result<Vec<OriginSite>> {
    let mut csv = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut sites = Vec::new();
    for (row, record) in csv.byte_records().enumerate() {
        if range.is_past(row) {
            break;
        }
        let record = record?;
        if !range.contains(row) {
            continue;
        }
        sites.push(OriginSite {
            row,
            address: field(&record, ADDRESS_COLUMN)
                .map(|a| a.trim().to_owned())
                .filter(|a| !a.is_empty()),
            latitude: coordinate(&record, LATITUDE_COLUMN, row),
            longitude: coordinate(&record, LONGITUDE_COLUMN, row),
        });
    }
    Ok(sites)
}

/// Input files are often Windows-1252; undecodable bytes become U+FFFD.
fn field(record: &csv::ByteRecord, column: usize) -> Option<Cow<'_, str>> {
    record.get(column).map(String::from_utf8_lossy)
}

fn coordinate(record: &csv::ByteRecord, column: usize, row: usize) -> Option<f64> {
    let raw = field(record, column)?;
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    match raw.parse::<f64>() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(row, column, value = raw, "unparseable coordinate");
            None
        }
    }
}
