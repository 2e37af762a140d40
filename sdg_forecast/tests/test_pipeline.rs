mod common;

use pretty_assertions::assert_eq;
use sdg_forecast::indicators::IndicatorSpec;
use sdg_forecast::status::StatusClassifier;
use sdg_forecast::{
    EngineConfig, ForecastError, Grade, Indicator, IndicatorCatalog, IndicatorValues, Observation,
    ObservationTable, OutlookEngine, Status,
};

/// Table whose bottom-40 share is only observed in 2020-2022
fn sparse_bottom_40() -> ObservationTable {
    let mut observations = common::history("Sparseland", 2005..=2022, 0.0);
    for observation in observations.iter_mut().filter(|o| o.year < 2020) {
        observation.values.set(Indicator::IncomeShareBottom40, None);
    }
    ObservationTable::from_observations(observations).unwrap()
}

#[test]
fn test_reference_classifications() {
    let catalog = IndicatorCatalog::eu_2030();
    let classifier = StatusClassifier::new(&catalog);

    let neet = classifier.assess("X", Indicator::NeetRate, Some(10.0), Some(8.5));
    assert_eq!(neet.status, Some(Status::OnTarget));

    let unemployment = classifier.assess("X", Indicator::UnemploymentRate, Some(7.0), Some(6.0));
    assert_eq!(unemployment.status, Some(Status::Improving));

    let gdp = classifier.assess("X", Indicator::RealGdpPerCapita, Some(30_000.0), Some(31_200.0));
    assert_eq!(gdp.status, Some(Status::Stagnation));
}

#[test]
fn test_full_history_projects_every_indicator() {
    let table = common::table(&["Alpha", "Beta"]);
    let engine = OutlookEngine::new(EngineConfig::default()).unwrap();

    let report = engine.run(&table).unwrap();

    assert_eq!(report.target_year, 2030);
    assert_eq!(report.outlooks.len(), 2);
    assert_eq!(report.skipped().count(), 0);
    for outlook in &report.outlooks {
        assert_eq!(outlook.anchor_year, Some(2022));
        assert_eq!(outlook.statuses.len(), Indicator::COUNT);
        assert!(outlook.statuses.iter().all(|r| r.status.is_some()));
        assert_eq!(outlook.score.assessed, Indicator::COUNT);
        let path = outlook.path.as_ref().unwrap();
        assert_eq!(path.steps(), 8);
    }
}

#[test]
fn test_sparse_indicator_only_skips_its_own_pair() {
    // no other model reads the bottom-40 lag in this catalogue
    let mut specs: Vec<IndicatorSpec> = IndicatorCatalog::eu_2030().into();
    specs[Indicator::IncomeDistributionRatio.index()].predictors = vec![Indicator::NeetRate];
    let config = EngineConfig {
        catalog: IndicatorCatalog::new(specs).unwrap(),
        ..EngineConfig::default()
    };
    let engine = OutlookEngine::new(config).unwrap();

    let report = engine.run(&sparse_bottom_40()).unwrap();
    let outlook = report.country("Sparseland").unwrap();

    let skipped: Vec<Indicator> = report.skipped().map(|p| p.indicator).collect();
    assert_eq!(skipped, vec![Indicator::IncomeShareBottom40]);
    assert!(report.skipped().next().unwrap().reason.contains("Insufficient training data"));

    let bottom_40 = outlook.status(Indicator::IncomeShareBottom40).unwrap();
    assert_eq!(bottom_40.status, None);
    assert_eq!(bottom_40.forecast, None);
    assert!(bottom_40.last_observed.is_some());

    for indicator in Indicator::ALL {
        if indicator != Indicator::IncomeShareBottom40 {
            assert!(outlook.status(indicator).unwrap().status.is_some(), "{}", indicator);
        }
    }
    assert_eq!(outlook.score.assessed, 6);
}

#[test]
fn test_missing_model_cascades_to_dependents() {
    let engine = OutlookEngine::new(EngineConfig::default()).unwrap();

    let report = engine.run(&sparse_bottom_40()).unwrap();
    let outlook = report.country("Sparseland").unwrap();

    // only emissions has no path back to the bottom-40 share
    let assessed: Vec<Indicator> = outlook
        .statuses
        .iter()
        .filter(|r| r.status.is_some())
        .map(|r| r.indicator)
        .collect();
    assert_eq!(assessed, vec![Indicator::GhgEmissions]);
    assert_eq!(outlook.skipped.len(), 6);

    let path = outlook.path.as_ref().unwrap();
    assert!(path.value_at(Indicator::RealGdpPerCapita, 2023).is_some());
    assert_eq!(path.value_at(Indicator::RealGdpPerCapita, 2024), None);
}

#[test]
fn test_forecast_path_is_causal() {
    let report = OutlookEngine::new(EngineConfig::default())
        .unwrap()
        .run(&common::table(&["Alpha"]))
        .unwrap();
    let path = report.outlooks[0].path.as_ref().unwrap();

    let anchor = path.anchor();
    assert_eq!(anchor.year, 2022);
    assert_eq!(anchor.current, common::history("Alpha", 2022..=2022, 0.0)[0].values);
    for pair in path.records().windows(2) {
        assert_eq!(pair[1].year, pair[0].year + 1);
        assert_eq!(pair[1].lag1, pair[0].current);
    }
}

#[test]
fn test_rates_never_projected_negative() {
    // NEET falls two points a year and reaches zero before 2030
    let observations: Vec<Observation> = common::history("Fallland", 2005..=2022, 0.0)
        .into_iter()
        .map(|mut o| {
            let t = (o.year - 2005) as f64;
            o.values.set(Indicator::NeetRate, Some((36.0 - 2.0 * t).max(0.5) + 0.1 * (t % 2.0)));
            o
        })
        .collect();
    let table = ObservationTable::from_observations(observations).unwrap();

    let report = OutlookEngine::new(EngineConfig::default()).unwrap().run(&table).unwrap();
    let path = report.outlooks[0].path.as_ref().unwrap();

    let floored = [
        Indicator::NeetRate,
        Indicator::UnemploymentRate,
        Indicator::IncomeShareBottom40,
        Indicator::RenewableEnergyShare,
    ];
    for record in &path.records()[1..] {
        for indicator in floored {
            if let Some(value) = record.current.get(indicator) {
                assert!(value >= 0.0, "{} in {} is {}", indicator, record.year, value);
            }
        }
    }
}

#[test]
fn test_runs_are_deterministic() {
    let table = common::table(&["Alpha", "Beta", "Gamma"]);
    let engine = OutlookEngine::new(EngineConfig::default()).unwrap();

    let first = engine.run(&table).unwrap();
    let second = engine.run(&table).unwrap();

    for (a, b) in first.outlooks.iter().zip(second.outlooks.iter()) {
        assert_eq!(a.path, b.path);
        assert_eq!(a.statuses, b.statuses);
        assert_eq!(a.score, b.score);
    }
}

#[test]
fn test_scores_and_grades_are_consistent() {
    let table = common::table(&["Alpha", "Beta", "Gamma"]);
    let report = OutlookEngine::new(EngineConfig::default()).unwrap().run(&table).unwrap();

    for outlook in &report.outlooks {
        let score = outlook.score.global_score.unwrap();
        assert!((1.0..=3.0).contains(&score));
        assert_eq!(outlook.score.grade, Some(Grade::from_score(score)));
    }

    let leaderboard = report.leaderboard();
    for pair in leaderboard.windows(2) {
        assert!(pair[0].global_score >= pair[1].global_score);
    }
}

#[test]
fn test_configured_anchor_year() {
    let table = common::table(&["Alpha"]);
    let config = EngineConfig {
        anchor_year: Some(2018),
        ..EngineConfig::default()
    };

    let report = OutlookEngine::new(config).unwrap().run(&table).unwrap();
    let outlook = &report.outlooks[0];
    let path = outlook.path.as_ref().unwrap();

    assert_eq!(path.anchor_year(), 2018);
    assert_eq!(path.steps(), 12);
    // latest values are taken at the anchor, not from later rows
    let expected = common::history("Alpha", 2018..=2018, 0.0)[0].values;
    assert_eq!(outlook.last_observed, expected);
}

#[test]
fn test_missing_anchor_row_skips_country() {
    let table = common::table(&["Alpha"]);
    let config = EngineConfig {
        anchor_year: Some(1999),
        ..EngineConfig::default()
    };

    let report = OutlookEngine::new(config).unwrap().run(&table).unwrap();
    let outlook = &report.outlooks[0];

    assert!(outlook.path.is_none());
    assert_eq!(outlook.skipped.len(), Indicator::COUNT);
    assert!(outlook.skipped[0].reason.contains("1999"));
    assert_eq!(outlook.score.global_score, None);
    assert_eq!(outlook.score.grade, None);
}

#[test]
fn test_gap_in_projection_is_not_scored() {
    // GDP is missing in the anchor row, so renewables lose their lag input in 2023
    let mut observations = common::history("Alpha", 2005..=2022, 0.0);
    observations
        .last_mut()
        .unwrap()
        .values
        .set(Indicator::RealGdpPerCapita, None);
    let table = ObservationTable::from_observations(observations).unwrap();
    let config = EngineConfig {
        anchor_year: Some(2022),
        ..EngineConfig::default()
    };

    let report = OutlookEngine::new(config).unwrap().run(&table).unwrap();
    let outlook = &report.outlooks[0];
    let path = outlook.path.as_ref().unwrap();

    assert_eq!(path.anchor_year(), 2022);
    assert!(path.value_at(Indicator::RealGdpPerCapita, 2024).is_some());
    assert_eq!(path.final_value(Indicator::RenewableEnergyShare), None);

    let renewables = outlook.status(Indicator::RenewableEnergyShare).unwrap();
    assert_eq!(renewables.forecast, None);
    assert_eq!(renewables.status, None);

    let skipped: Vec<Indicator> = outlook.skipped.iter().map(|p| p.indicator).collect();
    assert_eq!(skipped, vec![Indicator::RenewableEnergyShare]);
    assert!(outlook.skipped[0].reason.contains("2023"));
    assert_eq!(outlook.score.assessed, Indicator::COUNT - 1);
}

#[test]
fn test_anchor_after_target_skips_only_that_country() {
    let mut observations = common::history("Alpha", 2005..=2022, 0.0);
    observations.extend(common::history("Beta", 2005..=2018, 1.0));
    let table = ObservationTable::from_observations(observations).unwrap();
    let config = EngineConfig {
        target_year: 2020,
        ..EngineConfig::default()
    };

    let report = OutlookEngine::new(config).unwrap().run(&table).unwrap();

    let alpha = report.country("Alpha").unwrap();
    assert_eq!(alpha.anchor_year, Some(2022));
    assert!(alpha.path.is_none());
    assert_eq!(alpha.skipped.len(), Indicator::COUNT);
    assert!(alpha.skipped[0].reason.contains("after target year 2020"));
    assert_eq!(alpha.score.global_score, None);

    let beta = report.country("Beta").unwrap();
    assert_eq!(beta.path.as_ref().unwrap().steps(), 2);
    assert!(beta.skipped.is_empty());
    assert!(beta.score.global_score.is_some());
}

#[test]
fn test_country_without_values_gets_no_score() {
    let mut observations = common::history("Alpha", 2005..=2022, 0.0);
    observations.push(Observation::new("Empty", 2020, IndicatorValues::empty()));
    observations.push(Observation::new("Empty", 2021, IndicatorValues::empty()));
    let table = ObservationTable::from_observations(observations).unwrap();

    let report = OutlookEngine::new(EngineConfig::default()).unwrap().run(&table).unwrap();
    let empty = report.country("Empty").unwrap();

    assert_eq!(empty.anchor_year, None);
    assert_eq!(empty.score.global_score, None);
    assert_eq!(empty.skipped.len(), Indicator::COUNT);
    assert!(report.country("Alpha").unwrap().score.global_score.is_some());

    let leaderboard = report.leaderboard();
    assert_eq!(leaderboard[leaderboard.len() - 1].country, "Empty");
}

#[test]
fn test_excluded_years_change_the_models() {
    let table = common::table(&["Alpha"]);
    let config = EngineConfig {
        excluded_training_years: vec![2010, 2011, 2012],
        ..EngineConfig::default()
    };

    let with_all = OutlookEngine::new(EngineConfig::default()).unwrap().run(&table).unwrap();
    let without = OutlookEngine::new(config).unwrap().run(&table).unwrap();

    // the anchor year itself is still the starting point
    assert_eq!(
        with_all.outlooks[0].path.as_ref().unwrap().anchor(),
        without.outlooks[0].path.as_ref().unwrap().anchor()
    );
    assert_eq!(without.outlooks[0].skipped.len(), 0);
}

#[test]
fn test_invalid_configuration_and_empty_table() {
    let config = EngineConfig {
        target_year: 2025,
        anchor_year: Some(2026),
        ..EngineConfig::default()
    };
    assert!(matches!(OutlookEngine::new(config), Err(ForecastError::ConfigError(_))));

    let engine = OutlookEngine::new(EngineConfig::default()).unwrap();
    let empty = ObservationTable::from_observations(Vec::new()).unwrap();
    assert!(matches!(engine.run(&empty), Err(ForecastError::MissingData(_))));
}
