//! Location safety scoring
//!
//! Combines weather and time-of-day signals into a 0-100 score:
//! - adverse weather condition: -25
//! - temperature above 35°C: -15
//! - hour before 06:00 or after 22:00 (local): -30
//!
//! Missing weather data skips the weather rules rather than failing.

use crate::constants::scoring::*;
use crate::gateway::{WeatherGateway, WeatherLookup};
use crate::geo::Coordinates;
use chrono::Timelike;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Qualitative safety level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SafetyLevel {
    Safe,
    Caution,
    Unsafe,
}

impl SafetyLevel {
    /// Classify a score
    pub fn from_score(score: u8) -> Self {
        let score = i32::from(score);
        if score > SAFE_ABOVE {
            Self::Safe
        } else if score > CAUTION_ABOVE {
            Self::Caution
        } else {
            Self::Unsafe
        }
    }
}

impl std::fmt::Display for SafetyLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Safe => write!(f, "Safe"),
            Self::Caution => write!(f, "Caution"),
            Self::Unsafe => write!(f, "Unsafe"),
        }
    }
}

/// Result of a safety check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SafetyAssessment {
    pub score: u8,
    pub level: SafetyLevel,
    /// Reasons in rule order: weather condition, heat, time of day
    pub reasons: Vec<String>,
    /// Place name from the weather service, or "N/A" without weather data
    pub district: String,
}

/// Score a location from a weather lookup and the local hour (0-23)
pub fn assess(weather: &WeatherLookup, hour: u32) -> SafetyAssessment {
    let mut score = BASE_SCORE;
    let mut reasons = Vec::new();

    let district = match weather.report() {
        Some(report) => {
            if let Some(condition) = report
                .condition
                .as_deref()
                .filter(|c| ADVERSE_CONDITIONS.contains(c))
            {
                score -= ADVERSE_WEATHER_PENALTY;
                reasons.push(format!("Adverse weather predicted: {}.", condition));
            }

            if let Some(temp) = report.temperature_c.filter(|t| *t > HEAT_THRESHOLD_C) {
                score -= HEAT_PENALTY;
                // Debug keeps the decimal point on whole values: 36.0, not 36
                reasons.push(format!("Potential for extreme heat: {:?}°C.", temp));
            }

            report.place.clone()
        }
        None => UNAVAILABLE_DISTRICT.to_string(),
    };

    if is_night(hour) {
        score -= NIGHT_PENALTY;
        reasons.push("Late night travel increases risk.".to_string());
    }

    // Unreachable with the current weights (25 + 15 + 30 < 100); kept for rule changes.
    let score = u8::try_from(score.clamp(0, BASE_SCORE)).unwrap_or(0);

    SafetyAssessment {
        score,
        level: SafetyLevel::from_score(score),
        reasons,
        district,
    }
}

/// Hours strictly before 06 or strictly after 22
pub fn is_night(hour: u32) -> bool {
    hour < DAY_START_HOUR || hour > DAY_END_HOUR
}

/// Scores locations against live weather
#[derive(Clone)]
pub struct SafetyScorer {
    weather: Arc<dyn WeatherGateway>,
}

impl SafetyScorer {
    pub fn new(weather: Arc<dyn WeatherGateway>) -> Self {
        Self { weather }
    }

    /// Assess `current`, or `destination` when one is given, at local `hour`
    pub async fn assess_at(
        &self,
        current: Coordinates,
        destination: Option<Coordinates>,
        hour: u32,
    ) -> SafetyAssessment {
        let target = destination.unwrap_or(current);
        let lookup = self.weather.current(target).await;
        assess(&lookup, hour)
    }

    /// Assess using the serving process's local wall-clock hour
    pub async fn assess_now(
        &self,
        current: Coordinates,
        destination: Option<Coordinates>,
    ) -> SafetyAssessment {
        let hour = chrono::Local::now().hour();
        self.assess_at(current, destination, hour).await
    }

    pub fn weather_configured(&self) -> bool {
        self.weather.is_configured()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::fixtures::FixedWeather;
    use crate::gateway::{Unavailable, WeatherReport};

    fn weather(condition: &str, temp: f64) -> WeatherLookup {
        WeatherLookup::Available(WeatherReport {
            condition: Some(condition.to_string()),
            temperature_c: Some(temp),
            place: "Old Goa".to_string(),
        })
    }

    #[test]
    fn test_unavailable_weather_daytime() {
        let result = assess(&WeatherLookup::Unavailable(Unavailable::MissingApiKey), 12);
        assert_eq!(result.score, 100);
        assert_eq!(result.level, SafetyLevel::Safe);
        assert!(result.reasons.is_empty());
        assert_eq!(result.district, "N/A");
    }

    #[test]
    fn test_rain_at_night() {
        let result = assess(&weather("Rain", 20.0), 23);
        assert_eq!(result.score, 45);
        assert_eq!(result.level, SafetyLevel::Caution);
        assert_eq!(
            result.reasons,
            vec![
                "Adverse weather predicted: Rain.".to_string(),
                "Late night travel increases risk.".to_string(),
            ]
        );
        assert_eq!(result.district, "Old Goa");
    }

    #[test]
    fn test_all_penalties_stack() {
        let result = assess(&weather("Thunderstorm", 38.5), 2);
        assert_eq!(result.score, 30);
        assert_eq!(result.level, SafetyLevel::Unsafe);
        assert_eq!(result.reasons.len(), 3);
        assert_eq!(result.reasons[1], "Potential for extreme heat: 38.5°C.");
    }

    #[test]
    fn test_heat_reason_keeps_decimal() {
        let result = assess(&weather("Clear", 36.0), 12);
        assert_eq!(result.score, 85);
        assert_eq!(result.reasons, vec!["Potential for extreme heat: 36.0°C.".to_string()]);
    }

    #[test]
    fn test_clear_weather_no_deductions() {
        let result = assess(&weather("Clear", 35.0), 22);
        assert_eq!(result.score, 100);
        assert!(result.reasons.is_empty());
    }

    #[test]
    fn test_condition_match_is_exact() {
        assert_eq!(assess(&weather("rain", 20.0), 12).score, 100);
        assert_eq!(assess(&weather("Clouds", 20.0), 12).score, 100);
        for condition in ADVERSE_CONDITIONS {
            assert_eq!(assess(&weather(condition, 20.0), 12).score, 75);
        }
    }

    #[test]
    fn test_night_boundaries() {
        assert!(is_night(0));
        assert!(is_night(5));
        assert!(!is_night(6));
        assert!(!is_night(22));
        assert!(is_night(23));
    }

    #[test]
    fn test_level_boundaries() {
        assert_eq!(SafetyLevel::from_score(100), SafetyLevel::Safe);
        assert_eq!(SafetyLevel::from_score(66), SafetyLevel::Safe);
        assert_eq!(SafetyLevel::from_score(65), SafetyLevel::Caution);
        assert_eq!(SafetyLevel::from_score(36), SafetyLevel::Caution);
        assert_eq!(SafetyLevel::from_score(35), SafetyLevel::Unsafe);
        assert_eq!(SafetyLevel::from_score(0), SafetyLevel::Unsafe);
    }

    #[test]
    fn test_assessment_serialization() {
        let result = assess(&weather("Fog", 10.0), 12);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["score"], 75);
        assert_eq!(json["level"], "Safe");
        assert_eq!(json["district"], "Old Goa");
    }

    #[tokio::test]
    async fn test_scorer_uses_gateway() {
        let scorer = SafetyScorer::new(Arc::new(FixedWeather::report("Snow", -2.0, "Manali")));
        let result = scorer
            .assess_at(Coordinates::new(32.24, 77.19), None, 10)
            .await;
        assert_eq!(result.score, 75);
        assert_eq!(result.district, "Manali");
        assert!(scorer.weather_configured());
    }

    #[tokio::test]
    async fn test_scorer_without_weather() {
        let scorer = SafetyScorer::new(Arc::new(FixedWeather::unavailable()));
        let result = scorer
            .assess_at(Coordinates::new(0.0, 0.0), Some(Coordinates::new(1.0, 1.0)), 3)
            .await;
        assert_eq!(result.score, 70);
        assert_eq!(result.district, "N/A");
        assert!(!scorer.weather_configured());
    }

    struct EchoWeather;

    #[async_trait::async_trait]
    impl WeatherGateway for EchoWeather {
        fn is_configured(&self) -> bool {
            true
        }

        async fn current(&self, at: Coordinates) -> WeatherLookup {
            WeatherLookup::Available(WeatherReport {
                condition: None,
                temperature_c: None,
                place: at.to_string(),
            })
        }
    }

    #[tokio::test]
    async fn test_scorer_prefers_destination() {
        let scorer = SafetyScorer::new(Arc::new(EchoWeather));
        let current = Coordinates::new(10.0, 20.0);
        let destination = Coordinates::new(11.0, 21.0);

        let result = scorer.assess_at(current, Some(destination), 12).await;
        assert_eq!(result.district, destination.to_string());

        let result = scorer.assess_at(current, None, 12).await;
        assert_eq!(result.district, current.to_string());
    }
}
