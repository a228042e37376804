//! Application services - The attack-detection and evasion-resolution pipeline
//!
//! One service per pipeline stage: classification, extraction, the pending
//! marker, the evasion trigger, the orchestrator, and the reporter. Each
//! depends on outbound ports only, never on concrete platform adapters.

pub mod evasion;
pub mod melee_classifier;
pub mod pending;
pub mod reporter;
pub mod resolution;
pub mod roll_extractor;

pub use evasion::EvasionTrigger;
pub use resolution::AttackResolutionService;
