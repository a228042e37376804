//! Table port - Interface to the live game table
//!
//! The host platform owns the scene, the tokens, and each participant's
//! live target selection. The pipeline reads them fresh through this port
//! at the moment an attack resolves; nothing here is cached or persisted.

use async_trait::async_trait;

use crate::domain::value_objects::{DefenderRef, ParticipantId, SceneId, TokenId};

#[async_trait]
pub trait TablePort: Send + Sync {
    /// The scene the opposed check takes place in
    async fn current_scene(&self) -> SceneId;

    /// The participant's live UI target selection, read at resolution time
    async fn selected_targets(&self, participant: ParticipantId) -> Vec<TokenId>;

    /// Map a token reference to a live defending entity, if one exists
    async fn resolve_defender(&self, scene: SceneId, token: TokenId) -> Option<DefenderRef>;
}
