//! Inbound event shapes and cross-participant messages
//!
//! `TableEvent` is the abstract form of the heterogeneous notifications the
//! host platform delivers: chat postings, roll results, and UI activation
//! signals. The recognizer pipeline consumes these and nothing else.
//!
//! `ResolutionRequest` is one of only two types that cross the participant
//! boundary (the other is [`Outcome`](crate::domain::entities::Outcome)).
//! Both carry identifiers and plain values only, never live object handles,
//! because the resolution authority runs in a separate process.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{ActorId, ParticipantId, RequestId, SceneId, TokenId};

/// A structured roll attachment on a chat-equivalent event.
///
/// Totals are only ever read from these attachments; narrative text that
/// happens to contain numbers is never parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollData {
    pub total: Option<i32>,
}

impl RollData {
    pub fn with_total(total: i32) -> Self {
        Self { total: Some(total) }
    }
}

/// Request to execute a defender's evasion check on the authority participant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolutionRequest {
    pub request_id: RequestId,
    pub scene: SceneId,
    pub token: TokenId,
    pub defender_name: String,
    pub attacker_name: String,
    pub attack_total: Option<i32>,
    pub evasion_skill: String,
    pub requested_at: DateTime<Utc>,
}

/// Everything the orchestrator can observe, in one stream
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TableEvent {
    /// A narrative chat posting (a card, a description, table talk)
    NarrativePosted {
        speaker: ParticipantId,
        text: String,
        rolls: Vec<RollData>,
    },
    /// A chat posting carrying completed dice results
    RollPosted {
        speaker: ParticipantId,
        actor: Option<ActorId>,
        text: String,
        rolls: Vec<RollData>,
    },
    /// An activation signal on a character sheet control
    SheetActivation {
        participant: ParticipantId,
        control_text: String,
        sheet_text: String,
    },
    /// A resolution request arriving over the shared channel
    ResolutionRequested(ResolutionRequest),
    /// The manual fallback affordance was activated
    ManualEvasionRequested { request_id: RequestId },
}
