//! Sheet port - Roll capabilities exposed by a defender's character sheet
//!
//! A defender's internal roll-triggering mechanism is unknown and
//! inconsistent across sheet implementations, so this port exposes every
//! capability the trigger knows how to exploit: three programmatic
//! invocation shapes plus the simulated-interaction fallback. Any of them
//! may be unsupported on a given sheet; `Unsupported` is a normal outcome,
//! not a failure of the resolution.

use async_trait::async_trait;

use crate::domain::value_objects::DefenderRef;

/// A programmatic strategy threw or the sheet lacks the capability
#[derive(Debug, thiserror::Error)]
pub enum InvocationError {
    #[error("the sheet does not expose this capability")]
    Unsupported,

    #[error("invocation failed: {0}")]
    Failed(String),
}

#[async_trait]
pub trait SheetPort: Send + Sync {
    /// Direct invocation of the defender's roll capability
    async fn invoke_roll(&self, defender: &DefenderRef, skill: &str)
        -> Result<(), InvocationError>;

    /// Named-lookup-then-invoke against the defender's skill list
    async fn invoke_named_roll(
        &self,
        defender: &DefenderRef,
        skill: &str,
    ) -> Result<(), InvocationError>;

    /// Invocation through the sheet UI controller's internal handler
    async fn invoke_controller_handler(
        &self,
        defender: &DefenderRef,
        skill: &str,
    ) -> Result<(), InvocationError>;

    /// Make the defender's interactive surface visible (may open/render it)
    async fn ensure_sheet_visible(&self, defender: &DefenderRef);

    /// Simulate an activation signal on the first control matching the skill
    /// label. Zero matching controls is an invocation failure; multiple
    /// matches pick the first without escalation.
    async fn activate_skill_control(
        &self,
        defender: &DefenderRef,
        label: &str,
    ) -> Result<(), InvocationError>;
}
