use core::fmt;

use serde::{Deserialize, Serialize};

/// One row of `results.csv`.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Benchmark name, ie. `Gol/4x512x512-2-100`
    pub name: String,
    /// Nanoseconds when loaded, seconds once [`crate::transform::nanos_to_seconds`] ran
    pub time: f64,
    /// Carried through untouched
    pub range: String,
    /// Worker threads, derived from `name`
    pub threads: Option<u64>,
    /// CPU cores, derived from `name`
    pub cpu_cores: Option<u64>,
}

impl Record {
    pub fn new(name: impl Into<String>, time: f64, range: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            time,
            range: range.into(),
            threads: None,
            cpu_cores: None,
        }
    }
}

/// The working set of the pipeline. Every stage keeps row order and row count.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordSet {
    records: Vec<Record>,
}

impl RecordSet {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.records.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Record> {
        self.records.iter_mut()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }
}

impl From<Vec<Record>> for RecordSet {
    fn from(records: Vec<Record>) -> Self {
        Self { records }
    }
}

impl FromIterator<Record> for RecordSet {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

fn optional(value: Option<u64>) -> String {
    value.map_or_else(|| "NaN".to_owned(), |x| x.to_string())
}

const HEADERS: [&str; 6] = ["", "name", "time", "range", "threads", "cpu_cores"];

impl fmt::Display for RecordSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows = self
            .records
            .iter()
            .enumerate()
            .map(|(idx, record)| {
                [
                    idx.to_string(),
                    record.name.clone(),
                    format!("{:.6}", record.time),
                    record.range.clone(),
                    optional(record.threads),
                    optional(record.cpu_cores),
                ]
            })
            .collect::<Vec<_>>();

        let mut widths = HEADERS.map(str::len);
        for row in &rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.len());
            }
        }

        let header = HEADERS
            .iter()
            .zip(widths)
            .map(|(h, w)| format!("{h:>w$}"))
            .collect::<Vec<_>>()
            .join("  ");
        writeln!(f, "{header}")?;
        for row in rows {
            let line = row
                .iter()
                .zip(widths)
                .map(|(cell, w)| format!("{cell:>w$}"))
                .collect::<Vec<_>>()
                .join("  ");
            writeln!(f, "{line}")?;
        }
        write!(f, "[{} rows x {} columns]", self.len(), HEADERS.len() - 1)
    }
}
