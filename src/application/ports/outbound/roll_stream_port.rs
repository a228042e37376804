//! Roll stream port - Completed roll results, fanned out to listeners
//!
//! Capture works by subscribing before invoking anything, then waiting for
//! the first event attributable to the defender. Receivers are dropped when
//! a capture attempt times out, which is what unregisters the listener; a
//! stale listener surviving its timeout could wrongly absorb an unrelated
//! later roll.

use tokio::sync::broadcast;

use crate::domain::value_objects::ActorId;

/// A completed roll result attributable to an actor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RollEvent {
    pub actor: ActorId,
    pub total: Option<i32>,
}

pub trait RollStreamPort: Send + Sync {
    fn subscribe(&self) -> broadcast::Receiver<RollEvent>;
}
