use std::error::Error;

use clap::Parser;
use health_explorer::{
    args::Args, config::ExplorerConfig, data::dataset::Dataset, logging::setup_tracing,
    presentation::dashboard,
};
use tracing::info;

pub fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let config = ExplorerConfig::read_config(Some(&args.config))?;
    let _guard = setup_tracing(Some(config.log_dir.as_str()))?;
    info!("Loaded configuration");

    let dataset = Dataset::load(&config.dataset_path)?;
    let selection = args.selection(&config.default_selection);
    selection.validate()?;

    let result = dashboard(&dataset, &selection)?;
    println!(
        "{} by {} | ages {}-{} | {} of {} records",
        selection.measurement,
        selection.group,
        selection.age_min,
        selection.age_max,
        result.matched,
        dataset.len()
    );
    println!("\nSummary of {}:\n{}", selection.measurement, result.summary);
    println!("\nStatistics by {}:\n{}", selection.group, result.group_stats);

    let shown = result.rows.head(args.rows);
    println!("Rows ({} of {}):\n{}", shown.len(), result.rows.len(), shown);
    Ok(())
}
