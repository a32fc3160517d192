//! Configuration module

use serde::{Deserialize, Serialize};

/// Engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Utilization fraction at which a capacity alert event is published
    pub capacity_alert_threshold: f64,
}

impl Config {
    pub fn new(capacity_alert_threshold: f64) -> Self {
        Self {
            capacity_alert_threshold,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            capacity_alert_threshold: 0.85,
        }
    }
}
