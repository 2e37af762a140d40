use sdg_forecast::{Indicator, IndicatorValues, Observation, ObservationTable};

/// Smooth synthetic history with small periodic wiggles, shifted by `offset`
pub fn history(country: &str, years: std::ops::RangeInclusive<i32>, offset: f64) -> Vec<Observation> {
    years
        .map(|year| {
            let t = (year - 2005) as f64;
            let mut values = IndicatorValues::empty();
            values.set(Indicator::RealGdpPerCapita, Some(25_000.0 + 1_000.0 * offset + 400.0 * t + 30.0 * (t % 2.0)));
            values.set(Indicator::NeetRate, Some(14.0 + offset - 0.3 * t + 0.1 * (t % 2.0)));
            values.set(Indicator::UnemploymentRate, Some(9.0 + offset - 0.2 * t + 0.2 * (t % 3.0)));
            values.set(Indicator::IncomeDistributionRatio, Some(5.0 - 0.05 * t + 0.02 * (t % 4.0)));
            values.set(Indicator::IncomeShareBottom40, Some(20.0 + 0.1 * t - 0.1 * (t % 2.0)));
            values.set(Indicator::RenewableEnergyShare, Some(10.0 + offset + 1.2 * t));
            values.set(Indicator::GhgEmissions, Some(400.0 - 5.0 * t + 2.0 * (t % 3.0)));
            Observation::new(country, year, values)
        })
        .collect()
}

/// Table with one synthetic country per name, observed 2005-2022
pub fn table(countries: &[&str]) -> ObservationTable {
    let observations = countries
        .iter()
        .enumerate()
        .flat_map(|(i, country)| history(country, 2005..=2022, i as f64))
        .collect();
    ObservationTable::from_observations(observations).unwrap()
}
