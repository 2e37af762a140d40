use sdg_forecast::data::DataLoader;
use sdg_forecast::{ForecastError, Indicator};
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

const HEADER: &str = "Country,Year,Real_GDP_Per_Capita,NEET_Rate,Unemployment_Rate,Income_Distribution_Ratio,Income_Share_Bottom_40,Renewable_Energy_Share,GHG_Emissions";

#[test]
fn test_data_loader_from_csv() {
    // Create a temporary CSV file, rows deliberately out of order
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "{}", HEADER).unwrap();
    writeln!(file, "Spain,2021,26000.5,10.2,14.8,5.6,20.1,20.7,290.0").unwrap();
    writeln!(file, "Spain,2020,25100.0,11.4,15.5,5.8,19.9,21.2,275.0").unwrap();
    writeln!(file, "Malta,2020,28000.0,7.2,4.4,4.8,,12.2,2.1").unwrap();

    let table = DataLoader::from_csv(file.path()).unwrap();

    assert_eq!(table.len(), 3);
    assert!(!table.is_empty());
    assert_eq!(table.countries(), &["Spain".to_string(), "Malta".to_string()]);

    let years: Vec<i32> = table.country_rows("Spain").iter().map(|o| o.year).collect();
    assert_eq!(years, vec![2020, 2021]);

    let malta = table.get("Malta", 2020).unwrap();
    assert_eq!(malta.values.get(Indicator::NeetRate), Some(7.2));
    assert_eq!(malta.values.get(Indicator::IncomeShareBottom40), None);
    assert_eq!(table.anchor_year("Spain"), Some(2021));
}

#[test]
fn test_bundled_sample_data() {
    let csv_path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("examples")
        .join("csv")
        .join("sdg_indicators.csv");

    let table = DataLoader::from_csv(csv_path).unwrap();

    assert_eq!(table.countries().len(), 3);
    assert_eq!(table.len(), 39);
    // Portugal reports the bottom-40 share from 2019 only, so its 2022 row is complete
    assert_eq!(table.anchor_year("Portugal"), Some(2022));
}

#[test]
fn test_missing_file_names_the_path() {
    let result = DataLoader::from_csv("nonexistent_indicators.csv");

    match result {
        Err(ForecastError::MissingData(message)) => {
            assert!(message.contains("nonexistent_indicators.csv"))
        }
        other => panic!("Expected MissingData, got {:?}", other),
    }
}

#[test]
fn test_missing_columns_are_listed() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "Country,Year,Real_GDP_Per_Capita,NEET_Rate,Unemployment_Rate,Income_Distribution_Ratio,Renewable_Energy_Share").unwrap();
    writeln!(file, "Spain,2021,26000.5,10.2,14.8,5.6,20.7").unwrap();

    match DataLoader::from_csv(file.path()) {
        Err(ForecastError::MissingData(message)) => {
            assert!(message.contains("Income_Share_Bottom_40"));
            assert!(message.contains("GHG_Emissions"));
            assert!(!message.contains("NEET_Rate"));
        }
        other => panic!("Expected MissingData, got {:?}", other),
    }
}

#[test]
fn test_duplicate_rows_rejected() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "{}", HEADER).unwrap();
    writeln!(file, "Spain,2021,26000.5,10.2,14.8,5.6,20.1,20.7,290.0").unwrap();
    writeln!(file, "Spain,2021,26000.5,10.2,14.8,5.6,20.1,20.7,290.0").unwrap();

    let result = DataLoader::from_csv(file.path());

    assert!(matches!(result, Err(ForecastError::DataError(_))));
}
