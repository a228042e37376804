//! Domain value objects - Immutable types without identity

mod defender;
mod ids;
mod settings;

pub use defender::DefenderRef;
pub use ids::{ActorId, ParticipantId, RequestId, SceneId, TokenId};
pub use settings::{AutomationSettings, DetectionMode};
