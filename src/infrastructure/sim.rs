//! Simulated table adapters
//!
//! Concrete port implementations for the demo runtime: a one-scene table,
//! a defender sheet whose direct invocation rolls simulated dice, and a
//! console-backed messaging surface. These stand in for the host platform
//! the way the persistence and session adapters stand in for external
//! systems elsewhere; nothing here is used by the pipeline's tests.

use std::collections::HashMap;

use async_trait::async_trait;
use rand::Rng;
use tokio::sync::{broadcast, Mutex};

use crate::application::ports::outbound::{
    InvocationError, MessagePort, RollEvent, RollStreamPort, SheetPort, TablePort,
};
use crate::domain::value_objects::{DefenderRef, ParticipantId, RequestId, SceneId, TokenId};

/// Broadcast-backed roll result stream
pub struct SimRollStream {
    sender: broadcast::Sender<RollEvent>,
}

impl SimRollStream {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(32);
        Self { sender }
    }

    pub fn sender(&self) -> broadcast::Sender<RollEvent> {
        self.sender.clone()
    }
}

impl Default for SimRollStream {
    fn default() -> Self {
        Self::new()
    }
}

impl RollStreamPort for SimRollStream {
    fn subscribe(&self) -> broadcast::Receiver<RollEvent> {
        self.sender.subscribe()
    }
}

/// A single-scene table with per-participant target selections
pub struct SimTable {
    scene: SceneId,
    selections: Mutex<HashMap<ParticipantId, Vec<TokenId>>>,
    defenders: HashMap<TokenId, DefenderRef>,
}

impl SimTable {
    pub fn new(scene: SceneId, defenders: HashMap<TokenId, DefenderRef>) -> Self {
        Self {
            scene,
            selections: Mutex::new(HashMap::new()),
            defenders,
        }
    }

    pub async fn select_target(&self, participant: ParticipantId, token: TokenId) {
        self.selections
            .lock()
            .await
            .insert(participant, vec![token]);
    }
}

#[async_trait]
impl TablePort for SimTable {
    async fn current_scene(&self) -> SceneId {
        self.scene
    }

    async fn selected_targets(&self, participant: ParticipantId) -> Vec<TokenId> {
        self.selections
            .lock()
            .await
            .get(&participant)
            .cloned()
            .unwrap_or_default()
    }

    async fn resolve_defender(&self, scene: SceneId, token: TokenId) -> Option<DefenderRef> {
        (scene == self.scene)
            .then(|| self.defenders.get(&token).cloned())
            .flatten()
    }
}

/// Defender sheet that supports the direct invocation strategy only,
/// answering it with simulated 2d6 dice posted on the roll stream.
pub struct SimSheet {
    rolls: broadcast::Sender<RollEvent>,
}

impl SimSheet {
    pub fn new(rolls: broadcast::Sender<RollEvent>) -> Self {
        Self { rolls }
    }
}

#[async_trait]
impl SheetPort for SimSheet {
    async fn invoke_roll(
        &self,
        defender: &DefenderRef,
        skill: &str,
    ) -> Result<(), InvocationError> {
        let total = rand::thread_rng().gen_range(2..=12);
        tracing::debug!(defender = %defender.name, skill, total, "simulated sheet rolled");
        let _ = self.rolls.send(RollEvent {
            actor: defender.actor,
            total: Some(total),
        });
        Ok(())
    }

    async fn invoke_named_roll(
        &self,
        _defender: &DefenderRef,
        _skill: &str,
    ) -> Result<(), InvocationError> {
        Err(InvocationError::Unsupported)
    }

    async fn invoke_controller_handler(
        &self,
        _defender: &DefenderRef,
        _skill: &str,
    ) -> Result<(), InvocationError> {
        Err(InvocationError::Unsupported)
    }

    async fn ensure_sheet_visible(&self, defender: &DefenderRef) {
        tracing::debug!(defender = %defender.name, "simulated sheet opened");
    }

    async fn activate_skill_control(
        &self,
        _defender: &DefenderRef,
        _label: &str,
    ) -> Result<(), InvocationError> {
        Err(InvocationError::Unsupported)
    }
}

/// Messaging surface that prints announcements to the console
pub struct ConsoleMessages;

#[async_trait]
impl MessagePort for ConsoleMessages {
    async fn publish(&self, speaker: &str, content: &str) {
        println!("[{speaker}] {content}");
    }

    async fn register_manual_affordance(&self, request_id: RequestId, defender_name: &str) {
        println!(
            "[system] No evasion result captured for {defender_name}. \
             Manual trigger available (request {request_id})."
        );
    }
}
