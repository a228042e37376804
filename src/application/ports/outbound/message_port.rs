//! Message port - The collaborator's shared messaging surface

use async_trait::async_trait;

use crate::domain::value_objects::RequestId;

#[async_trait]
pub trait MessagePort: Send + Sync {
    /// Publish a plain announcement to all participants
    async fn publish(&self, speaker: &str, content: &str);

    /// Publish an interactive manual-trigger affordance. Activating it is
    /// delivered back to the pipeline as a `ManualEvasionRequested` event
    /// carrying the same request id.
    async fn register_manual_affordance(&self, request_id: RequestId, defender_name: &str);
}
