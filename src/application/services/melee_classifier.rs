//! Melee text classifier
//!
//! Decides whether a block of plain text (markup already stripped) looks
//! like a melee action. Deliberately permissive: a false positive only
//! widens the detection window, a false negative silently breaks the
//! automation, so the heuristic errs toward matching.

use crate::domain::value_objects::{AutomationSettings, DetectionMode};

/// Tokens that mark a generic combat-card template. A card that shows a
/// rate-of-fire value, a damage value, and the word "melee" is a melee
/// weapon card even when no configured keyword appears on it.
const RATE_OF_FIRE_MARKER: &str = "rof";
const DAMAGE_MARKER: &str = "damage";
const MELEE_MARKER: &str = "melee";

#[derive(Debug, Clone)]
pub struct MeleeClassifier {
    keywords: Vec<String>,
    card_heuristic: bool,
}

impl MeleeClassifier {
    /// Build a classifier with the keyword sets armed by the detection mode.
    /// The generic-card heuristic is weapon-shaped, so it is gated together
    /// with the weapon keyword set.
    pub fn from_settings(settings: &AutomationSettings) -> Self {
        let mut keywords = Vec::new();
        let mut card_heuristic = false;

        if matches!(
            settings.detection_mode,
            DetectionMode::WeaponsOnly | DetectionMode::Both
        ) {
            keywords.extend(settings.weapon_keywords.iter().map(|k| k.to_lowercase()));
            card_heuristic = true;
        }
        if matches!(
            settings.detection_mode,
            DetectionMode::SkillsOnly | DetectionMode::Both
        ) {
            keywords.extend(settings.skill_keywords.iter().map(|k| k.to_lowercase()));
        }

        Self {
            keywords,
            card_heuristic,
        }
    }

    /// True if the text looks like a melee action. No side effects.
    pub fn is_melee(&self, text: &str) -> bool {
        let text = text.to_lowercase();

        if self.keywords.iter().any(|k| text.contains(k.as_str())) {
            return true;
        }

        self.card_heuristic && Self::matches_card_template(&text)
    }

    fn matches_card_template(text: &str) -> bool {
        // "rof" must stand alone as a word; plain containment would match
        // inside unrelated words like "profession".
        contains_word(text, RATE_OF_FIRE_MARKER)
            && text.contains(DAMAGE_MARKER)
            && text.contains(MELEE_MARKER)
    }
}

fn contains_word(text: &str, word: &str) -> bool {
    text.split(|c: char| !c.is_alphanumeric())
        .any(|token| token == word)
}
