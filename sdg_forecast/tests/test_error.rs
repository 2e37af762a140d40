use sdg_forecast::error::ForecastError;
use sdg_forecast::Indicator;
use sdg_math::MathError;
use std::io;

#[test]
fn test_error_conversion() {
    // Test IO error conversion
    let io_error = io::Error::new(io::ErrorKind::NotFound, "file not found");
    let forecast_error = ForecastError::from(io_error);

    match forecast_error {
        ForecastError::IoError(_) => {}
        _ => panic!("Expected IoError variant"),
    }

    // Test math error conversion
    let math_error = MathError::InvalidInput("empty design matrix".to_string());
    let forecast_error = ForecastError::from(math_error);

    match forecast_error {
        ForecastError::MathError(MathError::InvalidInput(_)) => {}
        _ => panic!("Expected MathError variant"),
    }

    // Test JSON error conversion
    let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    assert!(matches!(ForecastError::from(json_error), ForecastError::JsonError(_)));
}

#[test]
fn test_error_display() {
    let error = ForecastError::MissingData("required column(s) not found: NEET_Rate".to_string());
    let error_string = format!("{}", error);

    assert!(error_string.starts_with("Missing data"));
    assert!(error_string.contains("NEET_Rate"));

    let error = ForecastError::InsufficientTrainingData {
        country: "Malta".to_string(),
        indicator: Indicator::IncomeShareBottom40,
        rows: 2,
        required: 4,
    };
    assert_eq!(
        error.to_string(),
        "Insufficient training data for Income_Share_Bottom_40 in Malta: 2 usable rows, 4 required"
    );

    // Test with source error
    let io_error = io::Error::new(io::ErrorKind::PermissionDenied, "permission denied");
    let error = ForecastError::from(io_error);
    let error_string = format!("{}", error);

    assert!(error_string.contains("IO error"));
    assert!(error_string.contains("permission denied"));
}

#[test]
fn test_local_errors() {
    let local = ForecastError::InsufficientTrainingData {
        country: "Malta".to_string(),
        indicator: Indicator::NeetRate,
        rows: 0,
        required: 4,
    };
    assert!(local.is_local());

    let singular = ForecastError::from(MathError::CalculationError(
        "Least squares solution is not finite".to_string(),
    ));
    assert!(singular.is_local());

    let fatal = [
        ForecastError::MissingData("input.csv".to_string()),
        ForecastError::DataError("duplicate row".to_string()),
        ForecastError::ConfigError("anchor after target".to_string()),
        ForecastError::InvalidParameter("anchor year 2022 is after target year 2020".to_string()),
    ];
    for error in fatal {
        assert!(!error.is_local(), "{}", error);
    }
}
