//! Opposed melee check types
//!
//! An attack is inferred from the event stream, never stated explicitly by
//! the platform, so every numeric total in this module is optional: a
//! detection path may know the attack happened without knowing its total,
//! and an evasion attempt may exhaust every strategy without capturing one.

use serde::{Deserialize, Serialize};

/// Which detector committed to the attack.
///
/// Up to three detectors can observe the same physical action; the
/// orchestrator guarantees only one of them produces an `AttackIntent`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DetectionPath {
    /// A narrative melee card followed by a roll inside the pending window
    CardThenRoll,
    /// A roll whose own text independently classifies as melee
    DirectRollTextMatch,
    /// A sheet activation with no roll event arriving in the grace window
    SheetClick,
}

/// The inferred fact "this participant just made a melee attack"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttackIntent {
    /// Attack total, unknown for the sheet-click path
    pub attack_total: Option<i32>,
    pub path: DetectionPath,
}

/// Result of triggering the defender's evasion check.
///
/// `total: None` is a valid terminal outcome: it routes to the manual
/// affordance rather than an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvasionResult {
    pub total: Option<i32>,
}

impl EvasionResult {
    pub fn captured(total: i32) -> Self {
        Self { total: Some(total) }
    }

    pub fn unknown() -> Self {
        Self { total: None }
    }
}

/// Verdict of the opposed check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Hit,
    Dodged,
    Undetermined,
}

impl Verdict {
    pub fn display_name(&self) -> &'static str {
        match self {
            Verdict::Hit => "HIT",
            Verdict::Dodged => "DODGED",
            Verdict::Undetermined => "UNDETERMINED",
        }
    }
}

/// The published result of one physical attack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub attack_total: Option<i32>,
    pub evasion_total: Option<i32>,
    pub verdict: Verdict,
}

impl Outcome {
    /// Apply the verdict rule: attack beats evasion strictly, ties favor the
    /// defender, and a missing total on either side is `Undetermined`.
    pub fn judge(attack_total: Option<i32>, evasion_total: Option<i32>) -> Self {
        let verdict = match (attack_total, evasion_total) {
            (Some(attack), Some(evasion)) if attack > evasion => Verdict::Hit,
            (Some(_), Some(_)) => Verdict::Dodged,
            _ => Verdict::Undetermined,
        };
        Self {
            attack_total,
            evasion_total,
            verdict,
        }
    }
}
