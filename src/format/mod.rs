//! Output formatters
//!
//! Provides trait-based output formatting for CLI results.

pub mod json;
pub mod text;

use crate::error::{Error, Result};
use crate::gateway::PointOfInterest;
use crate::safety::SafetyAssessment;
use serde::{Deserialize, Serialize};

/// Information about an output format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatInfo {
    /// Format name
    pub name: String,
    /// Format description
    pub description: String,
}

/// Trait for output formatters
pub trait OutputFormatter: Send + Sync {
    /// Get the format name
    fn name(&self) -> &str;

    /// Get the format description
    fn description(&self) -> &str;

    /// Format a safety assessment
    fn format_assessment(&self, assessment: &SafetyAssessment) -> Result<String>;

    /// Format a list of attractions, nearest first
    fn format_attractions(&self, attractions: &[PointOfInterest]) -> Result<String>;
}

/// Get a formatter by name
pub fn get_formatter(name: &str) -> Option<Box<dyn OutputFormatter>> {
    match name.to_lowercase().as_str() {
        "json" => Some(Box::new(json::JsonFormatter)),
        "text" => Some(Box::new(text::TextFormatter)),
        _ => None,
    }
}

/// Get a formatter by name, naming the known formats if there is none
pub fn formatter_for(name: &str) -> Result<Box<dyn OutputFormatter>> {
    get_formatter(name).ok_or_else(|| {
        let known: Vec<String> = available_formats()
            .into_iter()
            .map(|info| format!("{} ({})", info.name, info.description))
            .collect();
        Error::Config(format!(
            "Unknown format: {}. Available: {}",
            name,
            known.join(", ")
        ))
    })
}

/// List all available formatters
pub fn available_formats() -> Vec<FormatInfo> {
    vec![
        FormatInfo {
            name: "json".to_string(),
            description: "Pretty-printed JSON, same shape as the HTTP API".to_string(),
        },
        FormatInfo {
            name: "text".to_string(),
            description: "Human-readable text".to_string(),
        },
    ]
}
