//! Human-readable text output formatter

use crate::error::Result;
use crate::format::OutputFormatter;
use crate::gateway::PointOfInterest;
use crate::safety::SafetyAssessment;

/// Text formatter - outputs human-readable summary
pub struct TextFormatter;

impl OutputFormatter for TextFormatter {
    fn name(&self) -> &str {
        "text"
    }

    fn description(&self) -> &str {
        "Human-readable text"
    }

    fn format_assessment(&self, assessment: &SafetyAssessment) -> Result<String> {
        let mut output = String::new();

        output.push_str(&format!("District: {}\n", assessment.district));
        output.push_str(&format!(
            "Safety: {} ({}/100)\n",
            assessment.level, assessment.score
        ));

        if assessment.reasons.is_empty() {
            output.push_str("No risk factors found.\n");
        } else {
            output.push_str("Reasons:\n");
            for reason in &assessment.reasons {
                output.push_str(&format!("  - {}\n", reason));
            }
        }

        Ok(output)
    }

    fn format_attractions(&self, attractions: &[PointOfInterest]) -> Result<String> {
        if attractions.is_empty() {
            return Ok("No attractions found nearby.\n".to_string());
        }

        let mut output = format!("{} attractions nearby:\n", attractions.len());

        for (i, poi) in attractions.iter().enumerate() {
            let distance = poi
                .distance
                .map(|d| format!("{:.1} km", d / 1000.0))
                .unwrap_or_else(|| "? km".to_string());
            output.push_str(&format!("{:>3}. {} [{}]\n", i + 1, poi.name, distance));
            if let Some(address) = &poi.address {
                output.push_str(&format!("     {}\n", address));
            }
        }

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::safety::SafetyLevel;

    #[test]
    fn test_text_assessment() {
        let assessment = SafetyAssessment {
            score: 70,
            level: SafetyLevel::Safe,
            reasons: vec!["Late night travel increases risk.".to_string()],
            district: "N/A".to_string(),
        };

        let output = TextFormatter.format_assessment(&assessment).unwrap();

        assert!(output.contains("District: N/A"));
        assert!(output.contains("Safety: Safe (70/100)"));
        assert!(output.contains("  - Late night travel increases risk."));
    }

    #[test]
    fn test_text_assessment_without_reasons() {
        let assessment = SafetyAssessment {
            score: 100,
            level: SafetyLevel::Safe,
            reasons: Vec::new(),
            district: "Jaipur".to_string(),
        };
        let output = TextFormatter.format_assessment(&assessment).unwrap();
        assert!(output.contains("No risk factors found."));
    }

    #[test]
    fn test_text_attractions() {
        let attractions = vec![
            PointOfInterest {
                name: "Hawa Mahal".to_string(),
                address: Some("Badi Choupad, Jaipur".to_string()),
                distance: Some(1530.0),
                lat: None,
                lon: None,
            },
            PointOfInterest {
                name: "Albert Hall".to_string(),
                address: None,
                distance: None,
                lat: None,
                lon: None,
            },
        ];

        let output = TextFormatter.format_attractions(&attractions).unwrap();

        assert!(output.starts_with("2 attractions nearby:"));
        assert!(output.contains("  1. Hawa Mahal [1.5 km]"));
        assert!(output.contains("Badi Choupad, Jaipur"));
        assert!(output.contains("  2. Albert Hall [? km]"));
        assert_eq!(
            TextFormatter.format_attractions(&[]).unwrap(),
            "No attractions found nearby.\n"
        );
    }
}
