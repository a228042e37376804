//! Channel port - The shared publish/subscribe channel between participants
//!
//! Transport is an external collaborator; the pipeline only needs to emit
//! resolution requests toward the authority and to know which participants
//! are authority-capable right now.

use async_trait::async_trait;

use crate::domain::events::ResolutionRequest;
use crate::domain::value_objects::ParticipantId;

#[derive(Debug, thiserror::Error)]
#[error("channel send failed: {0}")]
pub struct ChannelError(pub String);

#[async_trait]
pub trait ChannelPort: Send + Sync {
    /// Send a resolution request toward the elected authority
    async fn emit_resolution_request(&self, request: ResolutionRequest)
        -> Result<(), ChannelError>;

    /// Active authority-capable participants
    async fn roster(&self) -> Vec<ParticipantId>;
}

/// The single elected resolution authority: lowest stable identifier among
/// the active authority-capable participants.
pub fn elect_authority(roster: &[ParticipantId]) -> Option<ParticipantId> {
    roster.iter().min_by_key(|p| p.as_uuid().as_bytes()).copied()
}
