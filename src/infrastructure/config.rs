//! Application configuration

use std::env;

use anyhow::Result;

use crate::domain::value_objects::AutomationSettings;

/// Application configuration loaded from environment
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Pipeline tuning knobs
    pub settings: AutomationSettings,
    /// Display name the demo attacker speaks under
    pub attacker_name: String,
    /// Display name of the authority participant
    pub authority_name: String,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let settings = AutomationSettings::from_env();
        if settings.pending_window_secs == 0 {
            anyhow::bail!("RIPOSTE_PENDING_WINDOW_SECS must be greater than zero");
        }
        if settings.capture_timeout_secs == 0 {
            anyhow::bail!("RIPOSTE_CAPTURE_TIMEOUT_SECS must be greater than zero");
        }

        Ok(Self {
            settings,
            attacker_name: env::var("RIPOSTE_ATTACKER_NAME")
                .unwrap_or_else(|_| "Kowalski".to_string()),
            authority_name: env::var("RIPOSTE_AUTHORITY_NAME")
                .unwrap_or_else(|_| "Referee".to_string()),
        })
    }
}
