use sdg_forecast::{DataLoader, EngineConfig, Indicator, OutlookEngine};
use std::path::PathBuf;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load data from CSV
    let csv_path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("examples")
        .join("csv")
        .join("sdg_indicators.csv");

    println!("Loading data from: {}", csv_path.display());
    let table = DataLoader::from_csv(csv_path)?;
    println!("Loaded {} rows for {} countries", table.len(), table.countries().len());

    // Project to 2030, leaving the 2020 outlier out of training
    let config = EngineConfig {
        excluded_training_years: vec![2020],
        ..EngineConfig::default()
    };
    let engine = OutlookEngine::new(config)?;
    let report = engine.run(&table)?;

    // Display the results
    for outlook in &report.outlooks {
        println!("\n{} (anchor {:?})", outlook.country, outlook.anchor_year);
        for record in &outlook.statuses {
            let forecast = record
                .forecast
                .map(|v| format!("{:.2}", v))
                .unwrap_or_else(|| "-".to_string());
            let status = record
                .status
                .map(|s| s.label())
                .unwrap_or("No Forecast");
            println!(
                "  {:<28} {:>10}  {:<8} {}",
                record.indicator, forecast, record.target, status
            );
        }
        match (outlook.score.global_score, outlook.score.grade) {
            (Some(score), Some(grade)) => println!("  Score {:.2}: {}", score, grade),
            _ => println!("  No score"),
        }
    }

    if let Some(path) = report.outlooks[0].path.as_ref() {
        println!("\nEmissions path for {}:", path.country);
        for record in path.records() {
            if let Some(value) = record.current.get(Indicator::GhgEmissions) {
                println!("  {}: {:.2}", record.year, value);
            }
        }
    }

    Ok(())
}
