//! Closed-form disaster-risk scoring for cities.
//!
//! The score is derived entirely from static city attributes, so the same
//! city record always produces the same score:
//!
//! 1. Average the per-category weights of the city's primary risks
//!    (unrecognized categories score a flat 0.3).
//! 2. Multiply by the city-type factor (coastal 1.2, river 1.1, inland 0.9).
//! 3. Multiply by `1 + min(population / 1e6, 1) * 0.2` -- a population
//!    boost capped at +20%.
//! 4. Clamp to 1.0.
//!
//! Confidence and contributing-factor labels are fixed placeholder
//! outputs; there is no underlying statistical model.

use chrono::Utc;
use relief_types::{City, CityId, RiskAssessment, RiskLevel};

use crate::error::EngineError;
use crate::store::ReliefStore;

/// Fixed confidence placeholder reported with every assessment.
const CONFIDENCE: f64 = 0.85;

/// Population count at which the population boost saturates.
const POPULATION_CAP: f64 = 1_000_000.0;

/// Maximum relative boost from population (+20%).
const POPULATION_BOOST: f64 = 0.2;

/// Fixed contributing-factor labels reported with every assessment.
const FACTORS: [&str; 4] = [
    "City characteristics",
    "Historical patterns",
    "Population density",
    "Geographic location",
];

/// Assess the disaster risk for a city.
///
/// # Errors
///
/// Returns [`EngineError::CityNotFound`] if the city is unknown.
pub fn assess(store: &ReliefStore, city_id: &CityId) -> Result<RiskAssessment, EngineError> {
    let city = store.city(city_id)?;
    let score = risk_score(city);

    Ok(RiskAssessment {
        city_id: city_id.clone(),
        risk_score: score,
        risk_level: RiskLevel::from_score(score),
        confidence: CONFIDENCE,
        factors: FACTORS.iter().map(|&f| f.to_owned()).collect(),
        last_updated: Utc::now(),
    })
}

/// The numeric risk score for a city, in `[0, 1]`.
pub fn risk_score(city: &City) -> f64 {
    let base = base_risk(city);
    let adjusted = base * city.kind.risk_factor() * (1.0 + population_factor(city) * POPULATION_BOOST);
    adjusted.min(1.0)
}

/// Mean category weight over the city's primary risks.
///
/// A city with no declared risks scores zero rather than dividing by zero.
fn base_risk(city: &City) -> f64 {
    if city.primary_risks.is_empty() {
        return 0.0;
    }
    let total: f64 = city.primary_risks.iter().map(|r| r.weight()).sum();
    #[allow(clippy::cast_precision_loss)]
    let count = city.primary_risks.len() as f64;
    total / count
}

/// Population scaled against the 1M cap, in `[0, 1]`.
fn population_factor(city: &City) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    let population = city.population as f64;
    (population / POPULATION_CAP).min(1.0)
}
