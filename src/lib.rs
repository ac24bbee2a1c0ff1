//! tourist-safety: Tourist Safety Monitoring Service
//!
//! A library and CLI tool that scores location safety from live weather,
//! tracks tourist positions to flag movement anomalies, and searches for
//! nearby attractions.
//!
//! ## Features
//!
//! - Safety score (0-100) from weather condition, heat and time of day
//! - Inactivity and route-deviation detection per location report
//! - Staleness sweep dropping tourists who stop reporting
//! - Keyword-driven attraction search with deduplication
//! - HTTP API + CLI interface
//!
//! ## Quick Start
//!
//! ```rust
//! use tourist_safety::gateway::{WeatherLookup, Unavailable};
//! use tourist_safety::geo::{haversine_km, Coordinates};
//! use tourist_safety::safety::{assess, SafetyLevel};
//!
//! let d = haversine_km(Coordinates::new(0.0, 0.0), Coordinates::new(0.0, 1.0));
//! assert!((d - 111.19).abs() < 0.01);
//!
//! // No weather data at noon: nothing to deduct
//! let result = assess(&WeatherLookup::Unavailable(Unavailable::MissingApiKey), 12);
//! assert_eq!(result.score, 100);
//! assert_eq!(result.level, SafetyLevel::Safe);
//! ```

pub mod attractions;
pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod format;
pub mod gateway;
pub mod geo;
pub mod safety;
pub mod server;
pub mod tracking;

// Re-export commonly used types
pub use config::Config;
pub use error::{Error, Result};
pub use geo::Coordinates;
pub use safety::{SafetyAssessment, SafetyLevel};
pub use tracking::{Anomaly, AnomalyKind, LocationReport, Tracker};
