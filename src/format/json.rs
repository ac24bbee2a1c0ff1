//! JSON output formatter

use crate::error::Result;
use crate::format::OutputFormatter;
use crate::gateway::PointOfInterest;
use crate::safety::SafetyAssessment;

/// JSON formatter - outputs results as pretty-printed JSON
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn description(&self) -> &str {
        "Pretty-printed JSON, same shape as the HTTP API"
    }

    fn format_assessment(&self, assessment: &SafetyAssessment) -> Result<String> {
        Ok(serde_json::to_string_pretty(assessment)?)
    }

    fn format_attractions(&self, attractions: &[PointOfInterest]) -> Result<String> {
        Ok(serde_json::to_string_pretty(attractions)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::safety::SafetyLevel;

    #[test]
    fn test_json_assessment() {
        let assessment = SafetyAssessment {
            score: 45,
            level: SafetyLevel::Caution,
            reasons: vec!["Adverse weather predicted: Rain.".to_string()],
            district: "Kochi".to_string(),
        };

        let output = JsonFormatter.format_assessment(&assessment).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(parsed["score"], 45);
        assert_eq!(parsed["level"], "Caution");
        assert_eq!(parsed["reasons"][0], "Adverse weather predicted: Rain.");
        assert_eq!(parsed["district"], "Kochi");
    }

    #[test]
    fn test_json_attractions() {
        let attractions = vec![PointOfInterest {
            name: "Fort Kochi Beach".to_string(),
            address: None,
            distance: Some(1200.5),
            lat: Some(9.96),
            lon: Some(76.24),
        }];

        let output = JsonFormatter.format_attractions(&attractions).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(parsed[0]["name"], "Fort Kochi Beach");
        assert!(parsed[0]["address"].is_null());
        assert_eq!(parsed[0]["distance"], 1200.5);
    }
}
