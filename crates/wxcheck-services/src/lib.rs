pub mod analyzer;
pub mod collector;
pub mod mse;
pub mod record_store;

pub use analyzer::{analyze, AlignedDataset, AnalysisReport, Analyzer};
pub use collector::{Collector, RunSummary};
pub use mse::mean_squared_error;
pub use record_store::{RecordStore, WeatherRecord, TIMESTAMP_FORMAT};
