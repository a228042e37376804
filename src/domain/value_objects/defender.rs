//! Resolved defender reference

use serde::{Deserialize, Serialize};

use super::ActorId;

/// A defending entity resolved from the acting participant's target selection.
///
/// Carries only the actor identity and a display name so it can be stored
/// across the manual-retrigger gap and matched against later roll events.
/// Live platform handles never appear here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefenderRef {
    pub actor: ActorId,
    pub name: String,
}

impl DefenderRef {
    pub fn new(actor: ActorId, name: impl Into<String>) -> Self {
        Self {
            actor,
            name: name.into(),
        }
    }
}
