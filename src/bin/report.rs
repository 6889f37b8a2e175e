//! wxcheck-report - prints forecast accuracy for the recorded data.

use anyhow::{Context, Result};
use wxcheck_core::Config;
use wxcheck_services::{Analyzer, RecordStore};

fn main() -> Result<()> {
    wxcheck_core::init()?;

    let (config, _warnings) = Config::load_validated().context("Failed to load configuration")?;
    let analyzer = Analyzer::new(RecordStore::new(&config.store_path));

    let report = analyzer
        .run()
        .map_err(|e| anyhow::anyhow!("{}: {}", e.user_message(), e))?;

    println!("Temperature MSE: {:.3}", report.temperature_mse);
    println!("Wind Speed MSE: {:.3}", report.wind_mse);
    Ok(())
}
