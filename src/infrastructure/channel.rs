//! In-process shared channel
//!
//! Stand-in for the platform's publish/subscribe transport. Requests are
//! serialized to JSON on the way in and parsed on the way out, exactly as a
//! real transport would carry them; participant runtimes subscribe and feed
//! received requests into their own orchestrator as `ResolutionRequested`
//! events.

use async_trait::async_trait;
use tokio::sync::broadcast;

use crate::application::ports::outbound::{ChannelError, ChannelPort};
use crate::domain::events::ResolutionRequest;
use crate::domain::value_objects::ParticipantId;

pub struct InProcessChannel {
    requests: broadcast::Sender<String>,
    roster: Vec<ParticipantId>,
}

impl InProcessChannel {
    /// `roster` lists the authority-capable participants of this session.
    pub fn new(roster: Vec<ParticipantId>) -> Self {
        let (requests, _) = broadcast::channel(32);
        Self { requests, roster }
    }

    /// Subscribe to serialized resolution requests
    pub fn subscribe_requests(&self) -> broadcast::Receiver<String> {
        self.requests.subscribe()
    }

    /// Parse a received envelope back into a request
    pub fn decode(envelope: &str) -> Option<ResolutionRequest> {
        match serde_json::from_str(envelope) {
            Ok(request) => Some(request),
            Err(error) => {
                tracing::warn!(%error, "discarding malformed resolution request envelope");
                None
            }
        }
    }
}

#[async_trait]
impl ChannelPort for InProcessChannel {
    async fn emit_resolution_request(
        &self,
        request: ResolutionRequest,
    ) -> Result<(), ChannelError> {
        let envelope =
            serde_json::to_string(&request).map_err(|e| ChannelError(e.to_string()))?;
        self.requests
            .send(envelope)
            .map_err(|e| ChannelError(e.to_string()))?;
        Ok(())
    }

    async fn roster(&self) -> Vec<ParticipantId> {
        self.roster.clone()
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::value_objects::{RequestId, SceneId, TokenId};

    fn request() -> ResolutionRequest {
        ResolutionRequest {
            request_id: RequestId::new(),
            scene: SceneId::new(),
            token: TokenId::new(),
            defender_name: "Sgt. Virtanen".to_string(),
            attacker_name: "Kowalski".to_string(),
            attack_total: Some(14),
            evasion_skill: "Evasion".to_string(),
            requested_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn emitted_requests_arrive_at_subscribers_intact() {
        let channel = InProcessChannel::new(vec![ParticipantId::new()]);
        let mut rx = channel.subscribe_requests();

        let sent = request();
        channel
            .emit_resolution_request(sent.clone())
            .await
            .expect("emit");

        let envelope = rx.recv().await.expect("recv");
        let received = InProcessChannel::decode(&envelope).expect("decode");
        assert_eq!(received, sent);
    }

    #[tokio::test]
    async fn emitting_with_no_subscribers_is_an_error() {
        let channel = InProcessChannel::new(vec![]);
        let result = channel.emit_resolution_request(request()).await;
        assert!(result.is_err());
    }

    #[test]
    fn malformed_envelopes_are_discarded() {
        assert!(InProcessChannel::decode("not json at all").is_none());
    }
}
