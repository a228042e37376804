//! Domain entities - Core business objects

mod attack;

pub use attack::{AttackIntent, DetectionPath, EvasionResult, Outcome, Verdict};
