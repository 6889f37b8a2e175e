// crates/wxcheck-services/src/record_store.rs

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use wxcheck_core::StoreError;

/// On-disk timestamp layout
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One aligned forecast/actual observation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherRecord {
    /// Hour the reading belongs to, local to the configured time zone
    pub timestamp: NaiveDateTime,
    pub forecast_temperature: f64,
    pub actual_temperature: f64,
    pub forecast_wind: f64,
    pub actual_wind: f64,
}

type Row = (String, f64, f64, f64, f64);

const FIELD_COUNT: usize = 5;

impl WeatherRecord {
    fn to_row(&self) -> Row {
        (
            self.timestamp.format(TIMESTAMP_FORMAT).to_string(),
            self.forecast_temperature,
            self.actual_temperature,
            self.forecast_wind,
            self.actual_wind,
        )
    }

    fn from_row(row: Row, line: u64) -> Result<Self, StoreError> {
        let (timestamp, forecast_temperature, actual_temperature, forecast_wind, actual_wind) = row;
        let timestamp = NaiveDateTime::parse_from_str(&timestamp, TIMESTAMP_FORMAT).map_err(|e| {
            StoreError::Malformed {
                line,
                reason: format!("bad timestamp {timestamp:?}: {e}"),
            }
        })?;

        Ok(Self {
            timestamp,
            forecast_temperature,
            actual_temperature,
            forecast_wind,
            actual_wind,
        })
    }
}

/// Append-only CSV file of [`WeatherRecord`]s, no header row.
///
/// The collector is the only writer. Each append writes one complete line in a
/// single call so readers see either the whole record or none of it.
#[derive(Debug, Clone)]
pub struct RecordStore {
    path: PathBuf,
}

impl RecordStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one record
    pub fn append(&self, record: &WeatherRecord) -> Result<(), StoreError> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(Vec::new());
        writer
            .serialize(record.to_row())
            .map_err(|e| self.csv_error(e))?;
        let line = writer.into_inner().map_err(|e| StoreError::Csv {
            path: self.path.clone(),
            message: e.to_string(),
        })?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| StoreError::io(&self.path, e))?;
        file.write_all(&line)
            .map_err(|e| StoreError::io(&self.path, e))?;

        Ok(())
    }

    /// Read every record in file order.
    ///
    /// A store that has not been created yet holds zero records.
    pub fn load(&self) -> Result<Vec<WeatherRecord>, StoreError> {
        if !self.path.exists() {
            tracing::debug!("Record store {} does not exist yet", self.path.display());
            return Ok(Vec::new());
        }

        let file = std::fs::File::open(&self.path).map_err(|e| StoreError::io(&self.path, e))?;
        // width is checked per record below
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(file);

        let mut records = Vec::new();
        for (index, result) in reader.records().enumerate() {
            let fallback_line = index as u64 + 1;
            let record = result.map_err(|e| self.read_error(e, fallback_line))?;
            let line = record
                .position()
                .map(|p| p.line())
                .unwrap_or(fallback_line);

            if record.len() != FIELD_COUNT {
                return Err(StoreError::Malformed {
                    line,
                    reason: format!("expected {FIELD_COUNT} fields, found {}", record.len()),
                });
            }

            let row: Row = record.deserialize(None).map_err(|e| StoreError::Malformed {
                line,
                reason: e.to_string(),
            })?;
            records.push(WeatherRecord::from_row(row, line)?);
        }

        tracing::debug!("Loaded {} records from {}", records.len(), self.path.display());
        Ok(records)
    }

    /// Number of stored records
    pub fn len(&self) -> Result<usize, StoreError> {
        Ok(self.load()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }

    fn csv_error(&self, e: csv::Error) -> StoreError {
        StoreError::Csv {
            path: self.path.clone(),
            message: e.to_string(),
        }
    }

    fn read_error(&self, e: csv::Error, fallback_line: u64) -> StoreError {
        let line = e.position().map(|p| p.line()).unwrap_or(fallback_line);
        let reason = e.to_string();
        match e.into_kind() {
            csv::ErrorKind::Io(io) => StoreError::io(&self.path, io),
            _ => StoreError::Malformed { line, reason },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::tempdir;

    fn record(hour: u32, ft: f64, at: f64, fw: f64, aw: f64) -> WeatherRecord {
        WeatherRecord {
            timestamp: NaiveDate::from_ymd_opt(2024, 1, 1)
                .and_then(|d| d.and_hms_opt(hour, 0, 0))
                .unwrap(),
            forecast_temperature: ft,
            actual_temperature: at,
            forecast_wind: fw,
            actual_wind: aw,
        }
    }

    #[test]
    fn test_append_writes_expected_line() {
        let dir = tempdir().unwrap();
        let store = RecordStore::new(dir.path().join("weather_data.csv"));

        store.append(&record(9, 27.3, 28.1, 5.4, 6.0)).unwrap();

        let contents = std::fs::read_to_string(store.path()).unwrap();
        assert_eq!(contents, "2024-01-01 09:00:00,27.3,28.1,5.4,6.0\n");
    }

    #[test]
    fn test_append_then_load_preserves_order() {
        let dir = tempdir().unwrap();
        let store = RecordStore::new(dir.path().join("weather_data.csv"));

        store.append(&record(1, 25.0, 25.5, 4.0, 3.5)).unwrap();
        store.append(&record(2, 26.0, 27.0, 5.0, 5.0)).unwrap();

        let records = store.load().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0], record(1, 25.0, 25.5, 4.0, 3.5));
        assert_eq!(records[1], record(2, 26.0, 27.0, 5.0, 5.0));
    }

    #[test]
    fn test_append_creates_parent_directories() {
        let dir = tempdir().unwrap();
        let store = RecordStore::new(dir.path().join("a").join("b").join("data.csv"));

        store.append(&record(3, 1.0, 2.0, 3.0, 4.0)).unwrap();
        assert_eq!(store.len().unwrap(), 1);
    }

    #[test]
    fn test_missing_store_is_empty() {
        let dir = tempdir().unwrap();
        let store = RecordStore::new(dir.path().join("never-written.csv"));

        assert!(store.load().unwrap().is_empty());
        assert!(store.is_empty().unwrap());
    }

    #[test]
    fn test_reads_files_written_with_crlf() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("weather_data.csv");
        std::fs::write(
            &path,
            "2024-01-01 00:00:00,25.1,26.0,3.2,4.0\r\n2024-01-01 01:00:00,24.9,25.2,3.0,2.5\r\n",
        )
        .unwrap();

        let records = RecordStore::new(&path).load().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].actual_wind, 2.5);
    }

    #[test]
    fn test_bad_timestamp_reports_line() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("weather_data.csv");
        std::fs::write(
            &path,
            "2024-01-01 00:00:00,25.1,26.0,3.2,4.0\n2024-01-01T01,24.9,25.2,3.0,2.5\n",
        )
        .unwrap();

        match RecordStore::new(&path).load() {
            Err(StoreError::Malformed { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected malformed record, got {other:?}"),
        }
    }

    #[test]
    fn test_non_numeric_field_is_malformed() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("weather_data.csv");
        std::fs::write(&path, "2024-01-01 00:00:00,warm,26.0,3.2,4.0\n").unwrap();

        assert!(matches!(
            RecordStore::new(&path).load(),
            Err(StoreError::Malformed { line: 1, .. })
        ));
    }

    #[test]
    fn test_extra_fields_are_malformed() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("weather_data.csv");
        std::fs::write(
            &path,
            "2024-01-01 00:00:00,1,2,3,4,999\n2024-01-01 01:00:00,1,2,3,4,999\n",
        )
        .unwrap();

        assert!(matches!(
            RecordStore::new(&path).load(),
            Err(StoreError::Malformed { line: 1, .. })
        ));
    }

    #[test]
    fn test_extra_fields_after_valid_lines_are_malformed() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("weather_data.csv");
        std::fs::write(
            &path,
            "2024-01-01 00:00:00,1,2,3,4\n2024-01-01 01:00:00,1,2,3,4,999\n",
        )
        .unwrap();

        assert!(matches!(
            RecordStore::new(&path).load(),
            Err(StoreError::Malformed { line: 2, .. })
        ));
    }

    #[test]
    fn test_malformed_line_number_counts_blank_lines() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("weather_data.csv");
        std::fs::write(
            &path,
            "2024-01-01 00:00:00,25.1,26.0,3.2,4.0\n\n2024-01-01T01,24.9,25.2,3.0,2.5\n",
        )
        .unwrap();

        match RecordStore::new(&path).load() {
            Err(StoreError::Malformed { line, .. }) => assert_eq!(line, 3),
            other => panic!("expected malformed record, got {other:?}"),
        }
    }

    #[test]
    fn test_partial_record_is_malformed() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("weather_data.csv");
        std::fs::write(&path, "2024-01-01 00:00:00,25.1,26.0,3.2\n").unwrap();

        assert!(matches!(
            RecordStore::new(&path).load(),
            Err(StoreError::Malformed { .. })
        ));
    }
}
