//! CSV report writers
//!
//! All numeric cells are rounded to two decimals; a missing value is written
//! as an empty cell.

use crate::error::Result;
use crate::indicators::{Indicator, IndicatorCatalog};
use crate::pipeline::OutlookReport;
use crate::status::Status;
use crate::validation::ValidationResult;
use csv::Writer;
use log::info;
use sdg_math::round_to;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Projection table file name
pub const PROJECTION_FILE: &str = "projections.csv";
/// Long-form status table file name
pub const STATUS_FILE: &str = "status.csv";
/// Forecast path file name
pub const PATHS_FILE: &str = "forecast_paths.csv";
/// Status legend file name
pub const LEGEND_FILE: &str = "legend.csv";
/// Skipped pair summary file name
pub const SKIPPED_FILE: &str = "skipped.csv";

/// Status cell for a pair without forecast
pub const NO_FORECAST: &str = "No Forecast";
/// Grade cell for a country without score
pub const NO_SCORE: &str = "No Score";

fn cell(value: Option<f64>) -> String {
    value
        .map(|v| format!("{:.2}", round_to(v, 2)))
        .unwrap_or_default()
}

/// Header of the projection table for a target year
pub fn projection_header(target_year: i32) -> Vec<String> {
    let mut header = vec!["Country".to_string()];
    for indicator in Indicator::ALL {
        header.push(format!("{}_{}", indicator, target_year));
        header.push(format!("{}_Latest", indicator));
        header.push(format!("Status_{}", indicator));
    }
    header.push("Global_Score".to_string());
    header.push("Final_Grade".to_string());
    header
}

/// One row per country: forecast, latest value and status per indicator, then score and grade
pub fn write_projection_table<W: Write>(report: &OutlookReport, writer: W) -> Result<()> {
    let mut wtr = Writer::from_writer(writer);
    wtr.write_record(projection_header(report.target_year))?;

    for outlook in &report.outlooks {
        let mut row = vec![outlook.country.clone()];
        for indicator in Indicator::ALL {
            let record = outlook.status(indicator);
            row.push(cell(record.and_then(|r| r.forecast)));
            row.push(cell(outlook.last_observed.get(indicator)));
            row.push(
                record
                    .and_then(|r| r.status)
                    .map(|s| s.label().to_string())
                    .unwrap_or_else(|| NO_FORECAST.to_string()),
            );
        }
        row.push(cell(outlook.score.global_score));
        row.push(
            outlook
                .score
                .grade
                .map(|g| g.label().to_string())
                .unwrap_or_else(|| NO_SCORE.to_string()),
        );
        wtr.write_record(&row)?;
    }

    wtr.flush()?;
    Ok(())
}

/// One row per country/indicator pair
pub fn write_status_table<W: Write>(report: &OutlookReport, writer: W) -> Result<()> {
    let mut wtr = Writer::from_writer(writer);
    wtr.write_record([
        "Country",
        "Indicator",
        "Last Value",
        "Forecast",
        "Target",
        "Status",
        "Color",
    ])?;

    for record in report.outlooks.iter().flat_map(|o| o.statuses.iter()) {
        let (status, color) = match record.status {
            Some(status) => (status.label(), status.color()),
            None => (NO_FORECAST, ""),
        };
        wtr.write_record([
            record.country.as_str(),
            record.indicator.column_name(),
            cell(record.last_observed).as_str(),
            cell(record.forecast).as_str(),
            record.target.as_str(),
            status,
            color,
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Every year of every forecast path, anchor year included
pub fn write_forecast_paths<W: Write>(report: &OutlookReport, writer: W) -> Result<()> {
    let mut wtr = Writer::from_writer(writer);
    let mut header = vec!["Country".to_string(), "Year".to_string()];
    header.extend(Indicator::ALL.iter().map(|i| i.column_name().to_string()));
    wtr.write_record(&header)?;

    for path in report.outlooks.iter().filter_map(|o| o.path.as_ref()) {
        for record in path.records() {
            let mut row = vec![path.country.clone(), record.year.to_string()];
            row.extend(record.current.iter().map(|(_, value)| cell(value)));
            wtr.write_record(&row)?;
        }
    }

    wtr.flush()?;
    Ok(())
}

/// Target and rule kind of every indicator, plus the status colour key
pub fn write_legend<W: Write>(catalog: &IndicatorCatalog, writer: W) -> Result<()> {
    let mut wtr = Writer::from_writer(writer);
    wtr.write_record(["Indicator", "Target", "Rule"])?;
    for spec in catalog.specs() {
        wtr.write_record([
            spec.indicator.column_name(),
            spec.rule.describe().as_str(),
            spec.rule.kind(),
        ])?;
    }

    wtr.write_record(["", "", ""])?;
    wtr.write_record(["Status", "Color", "Score"])?;
    let statuses = [
        Status::OnTarget,
        Status::Improving,
        Status::Worsening,
        Status::HighGrowth,
        Status::MediumGrowth,
        Status::Stagnation,
        Status::Good,
        Status::Bad,
    ];
    for status in statuses {
        wtr.write_record([status.label(), status.color(), status.score().to_string().as_str()])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Country/indicator pairs without a status, with the reason
pub fn write_skipped<W: Write>(report: &OutlookReport, writer: W) -> Result<()> {
    let mut wtr = Writer::from_writer(writer);
    wtr.write_record(["Country", "Indicator", "Reason"])?;
    for pair in report.skipped() {
        wtr.write_record([
            pair.country.as_str(),
            pair.indicator.column_name(),
            pair.reason.as_str(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Backtest errors, one row per country/indicator model
pub fn write_backtest<W: Write>(results: &[ValidationResult], writer: W) -> Result<()> {
    let mut wtr = Writer::from_writer(writer);
    wtr.write_record(["Country", "Indicator", "MAE", "RMSE", "MAPE", "Test_Points"])?;
    for result in results {
        wtr.write_record([
            result.country.as_str(),
            result.indicator.column_name(),
            cell(Some(result.accuracy.mae)).as_str(),
            cell(Some(result.accuracy.rmse)).as_str(),
            cell(Some(result.accuracy.mape)).as_str(),
            result.test_points.to_string().as_str(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write all five report files into `dir`, creating it if needed
pub fn write_all<P: AsRef<Path>>(
    report: &OutlookReport,
    catalog: &IndicatorCatalog,
    dir: P,
) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;

    let mut written = Vec::with_capacity(5);
    let mut create = |name: &str| -> Result<fs::File> {
        let path = dir.join(name);
        let file = fs::File::create(&path)?;
        info!("Writing {}", path.display());
        written.push(path);
        Ok(file)
    };

    write_projection_table(report, create(PROJECTION_FILE)?)?;
    write_status_table(report, create(STATUS_FILE)?)?;
    write_forecast_paths(report, create(PATHS_FILE)?)?;
    write_legend(catalog, create(LEGEND_FILE)?)?;
    write_skipped(report, create(SKIPPED_FILE)?)?;

    Ok(written)
}
