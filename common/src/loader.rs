use std::{fs::File, io::Read, path::Path};

use eyre::{Context, Result, bail};
use serde::Deserialize;
use tracing::debug;

use crate::record::{Record, RecordSet};

/// Column layout of the results file. The file's own header line is ignored,
/// fields are matched by position.
#[derive(Debug, Deserialize)]
struct RawRow {
    name: String,
    time: f64,
    range: String,
}

const COLUMNS: usize = 3;

/// Reads comma separated benchmark results, discarding the first line
/// whatever its field count. Every data row must have exactly three fields.
pub fn load_records<R: Read>(reader: R) -> Result<RecordSet> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut records = Vec::new();
    for (idx, row) in reader.records().enumerate() {
        let row = row.wrap_err_with(|| format!("Read results row {}", idx + 1))?;
        if row.len() != COLUMNS {
            bail!(
                "Results row {} has {} fields, expected {COLUMNS}",
                idx + 1,
                row.len()
            );
        }
        let raw: RawRow = row
            .deserialize(None)
            .wrap_err_with(|| format!("Parse results row {}", idx + 1))?;
        records.push(Record::new(raw.name, raw.time, raw.range));
    }
    debug!("Loaded {} records", records.len());
    Ok(RecordSet::from(records))
}

pub fn load_records_from_path(path: &Path) -> Result<RecordSet> {
    let file = File::open(path).wrap_err_with(|| format!("Open {}", path.display()))?;
    load_records(file)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_is_discarded_and_columns_are_positional() {
        let csv = "whatever,is,here\nGol/4x10x10-2-100,5000000000,0\nGol/8x20x20-4-50,2500000000,1\n";
        let set = load_records(csv.as_bytes()).unwrap();

        assert_eq!(set.len(), 2);
        let first = &set.records()[0];
        assert_eq!(first.name, "Gol/4x10x10-2-100");
        assert_eq!(first.time, 5_000_000_000.0);
        assert_eq!(first.range, "0");
        assert_eq!(first.threads, None);
        assert_eq!(set.records()[1].range, "1");
    }

    #[test]
    fn range_is_kept_as_text() {
        let csv = "name,time,range\nGol/1x1x1-1-1,10,± 3%\n";
        let set = load_records(csv.as_bytes()).unwrap();
        assert_eq!(set.records()[0].range, "± 3%");
    }

    #[test]
    fn single_field_header_is_discarded() {
        let csv = "benchmark\nGol/4x10x10-2-100,5000000000,0\n";
        let set = load_records(csv.as_bytes()).unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set.records()[0].name, "Gol/4x10x10-2-100");
        assert_eq!(set.records()[0].time, 5_000_000_000.0);
    }

    #[test]
    fn wide_header_is_discarded() {
        let csv = "name,time,range,extra\nGol/4x10x10-2-100,5000000000,0\nFoo-bar,1,2\n";
        let set = load_records(csv.as_bytes()).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.records()[1].range, "2");
    }

    #[test]
    fn extra_field_in_data_row_fails() {
        let csv = "name,time,range\nGol/4x10x10-2-100,5,0,9\n";
        assert!(load_records(csv.as_bytes()).is_err());
    }

    #[test]
    fn header_only_yields_empty_set() {
        let set = load_records("name,time,range\n".as_bytes()).unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn non_numeric_time_fails() {
        let csv = "name,time,range\nGol/4x10x10-2-100,fast,0\n";
        assert!(load_records(csv.as_bytes()).is_err());
    }

    #[test]
    fn wrong_column_count_fails() {
        let csv = "name,time,range\nGol/4x10x10-2-100,5\n";
        assert!(load_records(csv.as_bytes()).is_err());
    }

    #[test]
    fn missing_file_fails() {
        let err = load_records_from_path(Path::new("does/not/exist.csv")).unwrap_err();
        assert!(format!("{err:#}").contains("does/not/exist.csv"));
    }
}
