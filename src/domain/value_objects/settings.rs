//! Automation settings value object
//!
//! Settings carry serde derives because they are the configuration contract:
//! they load from the environment at startup and are echoed back verbatim in
//! diagnostics, so the JSON shape is part of the observable surface.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Which detector keyword sets are armed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DetectionMode {
    /// Only skill-style melee rolls are recognized.
    SkillsOnly,
    /// Only weapon cards and weapon rolls are recognized.
    WeaponsOnly,
    /// Everything is recognized.
    Both,
}

impl DetectionMode {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "skills-only" | "skills" => Some(Self::SkillsOnly),
            "weapons-only" | "weapons" => Some(Self::WeaponsOnly),
            "both" => Some(Self::Both),
            _ => None,
        }
    }
}

/// All configurable knobs of the attack/evasion pipeline
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AutomationSettings {
    pub detection_mode: DetectionMode,

    /// Weapon-category phrases and specific weapon names (lowercase)
    pub weapon_keywords: Vec<String>,
    /// Skill-style melee action phrases (lowercase)
    pub skill_keywords: Vec<String>,

    /// Label of the defensive skill triggered on the defender
    pub evasion_skill_label: String,

    /// How long a narrative melee card keeps the pending marker armed
    pub pending_window_secs: u64,
    /// Bound on each asynchronous roll-capture attempt
    pub capture_timeout_secs: u64,
    /// How long a sheet-click detection waits for a roll event to win the race
    pub click_grace_delay_ms: u64,
    /// How long a committed action suppresses the redundant detectors
    pub suppression_window_secs: u64,
    /// Gap between the two simulated activation signals
    pub confirm_click_delay_ms: u64,
}

impl Default for AutomationSettings {
    fn default() -> Self {
        Self {
            detection_mode: DetectionMode::Both,
            weapon_keywords: vec![
                "melee weapon attack".to_string(),
                "unarmed".to_string(),
                "knife".to_string(),
                "bayonet".to_string(),
                "machete".to_string(),
                "rifle butt".to_string(),
            ],
            skill_keywords: vec![
                "melee attack".to_string(),
                "close combat".to_string(),
            ],
            evasion_skill_label: "Evasion".to_string(),
            pending_window_secs: 10,
            capture_timeout_secs: 4,
            click_grace_delay_ms: 1500,
            suppression_window_secs: 5,
            confirm_click_delay_ms: 300,
        }
    }
}

impl AutomationSettings {
    /// Load from environment variables, using defaults for missing values
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            detection_mode: std::env::var("RIPOSTE_DETECTION_MODE")
                .ok()
                .and_then(|v| DetectionMode::parse(&v))
                .unwrap_or(defaults.detection_mode),
            weapon_keywords: env_keyword_list("RIPOSTE_WEAPON_KEYWORDS", defaults.weapon_keywords),
            skill_keywords: env_keyword_list("RIPOSTE_SKILL_KEYWORDS", defaults.skill_keywords),
            evasion_skill_label: std::env::var("RIPOSTE_EVASION_SKILL")
                .unwrap_or(defaults.evasion_skill_label),
            pending_window_secs: env_or("RIPOSTE_PENDING_WINDOW_SECS", defaults.pending_window_secs),
            capture_timeout_secs: env_or(
                "RIPOSTE_CAPTURE_TIMEOUT_SECS",
                defaults.capture_timeout_secs,
            ),
            click_grace_delay_ms: env_or(
                "RIPOSTE_CLICK_GRACE_DELAY_MS",
                defaults.click_grace_delay_ms,
            ),
            suppression_window_secs: env_or(
                "RIPOSTE_SUPPRESSION_WINDOW_SECS",
                defaults.suppression_window_secs,
            ),
            confirm_click_delay_ms: env_or(
                "RIPOSTE_CONFIRM_CLICK_DELAY_MS",
                defaults.confirm_click_delay_ms,
            ),
        }
    }

    pub fn pending_window(&self) -> Duration {
        Duration::from_secs(self.pending_window_secs)
    }

    pub fn capture_timeout(&self) -> Duration {
        Duration::from_secs(self.capture_timeout_secs)
    }

    pub fn click_grace_delay(&self) -> Duration {
        Duration::from_millis(self.click_grace_delay_ms)
    }

    pub fn suppression_window(&self) -> Duration {
        Duration::from_secs(self.suppression_window_secs)
    }

    pub fn confirm_click_delay(&self) -> Duration {
        Duration::from_millis(self.confirm_click_delay_ms)
    }
}

/// Read a parseable value from the environment, falling back to a default
fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Read a comma-separated keyword list, lowercased, falling back to a default
fn env_keyword_list(key: &str, default: Vec<String>) -> Vec<String> {
    match std::env::var(key) {
        Ok(raw) => {
            let keywords: Vec<String> = raw
                .split(',')
                .map(|k| k.trim().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect();
            if keywords.is_empty() {
                default
            } else {
                keywords
            }
        }
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_every_knob() {
        let settings = AutomationSettings::default();
        assert!((8..=12).contains(&settings.pending_window_secs));
        assert_eq!(settings.capture_timeout_secs, 4);
        assert_eq!(settings.evasion_skill_label, "Evasion");
        assert_eq!(settings.detection_mode, DetectionMode::Both);
    }

    #[test]
    fn detection_mode_parses_kebab_case() {
        assert_eq!(
            DetectionMode::parse("skills-only"),
            Some(DetectionMode::SkillsOnly)
        );
        assert_eq!(
            DetectionMode::parse("Weapons-Only"),
            Some(DetectionMode::WeaponsOnly)
        );
        assert_eq!(DetectionMode::parse("both"), Some(DetectionMode::Both));
        assert_eq!(DetectionMode::parse("everything"), None);
    }
}
