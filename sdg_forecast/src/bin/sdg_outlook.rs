use clap::{Parser, Subcommand};
use sdg_forecast::config::EngineConfig;
use sdg_forecast::data::DataLoader;
use sdg_forecast::error::Result;
use sdg_forecast::pipeline::OutlookEngine;
use sdg_forecast::report;
use sdg_forecast::validation::{summarize_by_indicator, Backtester, DEFAULT_CUTOFF_YEAR};
use std::fs::File;
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "sdg-outlook")]
#[command(about = "Project European SDG indicators to a target year and grade each country")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Project every country and write the report tables
    Project {
        #[arg(short, long)]
        input: PathBuf,
        #[arg(short, long)]
        output_dir: PathBuf,
        /// JSON engine configuration
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(long)]
        target_year: Option<i32>,
        #[arg(long)]
        anchor_year: Option<i32>,
    },
    /// Score the models out of sample after a training cutoff
    Backtest {
        #[arg(short, long)]
        input: PathBuf,
        #[arg(long, default_value_t = DEFAULT_CUTOFF_YEAR)]
        cutoff_year: i32,
        /// Write per-model errors to this CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    if let Err(err) = run(cli.command) {
        eprintln!("error: {}", err);
        process::exit(1);
    }
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Project {
            input,
            output_dir,
            config,
            target_year,
            anchor_year,
        } => {
            let mut config = match config {
                Some(path) => EngineConfig::from_json_file(path)?,
                None => EngineConfig::default(),
            };
            if let Some(year) = target_year {
                config.target_year = year;
            }
            if anchor_year.is_some() {
                config.anchor_year = anchor_year;
            }

            let table = DataLoader::from_csv(&input)?;
            let engine = OutlookEngine::new(config)?;
            let outlook = engine.run(&table)?;
            report::write_all(&outlook, &engine.config().catalog, &output_dir)?;

            println!("Outlook to {}", outlook.target_year);
            println!("{:<4} {:<24} {:>6}  Grade", "#", "Country", "Score");
            for (rank, score) in outlook.leaderboard().iter().enumerate() {
                let value = score
                    .global_score
                    .map(|s| format!("{:.2}", s))
                    .unwrap_or_else(|| "-".to_string());
                let grade = score
                    .grade
                    .map(|g| g.label())
                    .unwrap_or(report::NO_SCORE);
                println!("{:<4} {:<24} {:>6}  {}", rank + 1, score.country, value, grade);
            }

            let skipped: Vec<_> = outlook.skipped().collect();
            if !skipped.is_empty() {
                println!("\nSkipped {} country/indicator pairs:", skipped.len());
                for pair in skipped {
                    println!("  {}", pair);
                }
            }
            println!("\nReports written to {}", output_dir.display());
        }
        Commands::Backtest {
            input,
            cutoff_year,
            output,
        } => {
            let table = DataLoader::from_csv(&input)?;
            let catalog = EngineConfig::default().catalog;
            let results = Backtester::new(&catalog, cutoff_year).run(&table);

            println!("Backtest, training through {}", cutoff_year);
            println!(
                "{:<28} {:>10} {:>10}  Countries",
                "Indicator", "Mean MAE", "Mean RMSE"
            );
            for summary in summarize_by_indicator(&results) {
                println!(
                    "{:<28} {:>10.3} {:>10.3}  {}",
                    summary.indicator.column_name(),
                    summary.mean_mae,
                    summary.mean_rmse,
                    summary.countries
                );
            }

            if let Some(path) = output {
                report::write_backtest(&results, File::create(&path)?)?;
                println!("\nModel errors written to {}", path.display());
            }
        }
    }

    Ok(())
}
