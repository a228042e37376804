//! Attack resolution orchestrator
//!
//! The top-level state machine. Subscribes to every event source, decides
//! which detection path fired, validates the single selected target, and
//! either resolves locally (when this participant is the elected authority)
//! or forwards a resolution request over the shared channel.
//!
//! Three detectors can observe the same physical attack: the narrative card
//! plus its roll, the roll text alone, and a sheet click. Whichever commits
//! first arms the suppression guard; the guard spans all three paths, so at
//! most one resolution happens per physical attack. The sheet-click path
//! additionally waits a grace delay before committing, which lets a roll
//! event from the same action win the race and contribute its attack total.
//!
//! All state here is per-participant and process-local. It is only mutated
//! by this service's own handlers; nothing is shared or persisted.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::Mutex;

use crate::application::ports::outbound::{
    elect_authority, ChannelError, ChannelPort, MessagePort, TablePort,
};
use crate::application::services::evasion::EvasionTrigger;
use crate::application::services::melee_classifier::MeleeClassifier;
use crate::application::services::pending::{PendingAttackTracker, SuppressionGuard};
use crate::application::services::reporter::OutcomeReporter;
use crate::application::services::roll_extractor;
use crate::domain::entities::{AttackIntent, DetectionPath, Outcome};
use crate::domain::events::{ResolutionRequest, RollData, TableEvent};
use crate::domain::value_objects::{
    AutomationSettings, DefenderRef, ParticipantId, RequestId, TokenId,
};

/// Control labels that identify an attack control on a sheet
const ATTACK_CONTROL_MARKERS: [&str; 2] = ["attack", "strike"];

#[derive(Debug, thiserror::Error)]
pub enum ResolutionError {
    #[error("select exactly one target before attacking (currently {count})")]
    AmbiguousTarget { count: usize },

    #[error("target {token} does not map to a live defender")]
    UnresolvableActor { token: TokenId },

    #[error(transparent)]
    Channel(#[from] ChannelError),
}

/// Per-participant session state, owned by the orchestrator instance
struct SessionState {
    pending: PendingAttackTracker,
    suppression: SuppressionGuard,
    manual_requests: HashMap<RequestId, ManualRequest>,
}

/// Everything needed to re-run the evasion trigger from the manual affordance
#[derive(Debug, Clone)]
struct ManualRequest {
    defender: DefenderRef,
    attack_total: Option<i32>,
    attacker_name: String,
}

pub struct AttackResolutionService {
    participant: ParticipantId,
    display_name: String,
    settings: AutomationSettings,
    classifier: MeleeClassifier,
    state: Mutex<SessionState>,
    table: Arc<dyn TablePort>,
    channel: Arc<dyn ChannelPort>,
    messages: Arc<dyn MessagePort>,
    trigger: EvasionTrigger,
    reporter: OutcomeReporter,
}

impl AttackResolutionService {
    pub fn new(
        participant: ParticipantId,
        display_name: impl Into<String>,
        settings: AutomationSettings,
        table: Arc<dyn TablePort>,
        channel: Arc<dyn ChannelPort>,
        messages: Arc<dyn MessagePort>,
        trigger: EvasionTrigger,
    ) -> Self {
        let classifier = MeleeClassifier::from_settings(&settings);
        let state = SessionState {
            pending: PendingAttackTracker::new(settings.pending_window()),
            suppression: SuppressionGuard::new(settings.suppression_window()),
            manual_requests: HashMap::new(),
        };
        Self {
            participant,
            display_name: display_name.into(),
            classifier,
            state: Mutex::new(state),
            table,
            channel,
            messages: messages.clone(),
            trigger,
            reporter: OutcomeReporter::new(messages),
            settings,
        }
    }

    /// Entry point for every inbound platform event
    pub async fn handle_event(self: &Arc<Self>, event: TableEvent) {
        match event {
            TableEvent::NarrativePosted {
                speaker,
                text,
                rolls,
            } => self.on_narrative(speaker, &text, &rolls).await,
            TableEvent::RollPosted {
                speaker,
                text,
                rolls,
                ..
            } => self.on_roll(speaker, &text, &rolls).await,
            TableEvent::SheetActivation {
                participant,
                control_text,
                sheet_text,
            } => {
                self.on_sheet_activation(participant, &control_text, &sheet_text)
                    .await
            }
            TableEvent::ResolutionRequested(request) => self.on_resolution_requested(request).await,
            TableEvent::ManualEvasionRequested { request_id } => {
                self.on_manual_trigger(request_id).await
            }
        }
    }

    /// A narrative posting without roll data arms the pending marker when
    /// its text classifies as melee.
    async fn on_narrative(&self, speaker: ParticipantId, text: &str, rolls: &[RollData]) {
        if speaker != self.participant || !rolls.is_empty() {
            return;
        }
        if !self.classifier.is_melee(text) {
            return;
        }
        tracing::debug!("melee card observed, arming pending marker");
        self.state.lock().await.pending.mark();
    }

    async fn on_roll(self: &Arc<Self>, speaker: ParticipantId, text: &str, rolls: &[RollData]) {
        if speaker != self.participant {
            return;
        }
        let Some(total) = roll_extractor::first_total(rolls) else {
            return;
        };

        let path = {
            let mut state = self.state.lock().await;
            if self.classifier.is_melee(text) {
                // This path does not require a prior card.
                Some(DetectionPath::DirectRollTextMatch)
            } else if state.pending.is_pending() {
                state.pending.clear();
                Some(DetectionPath::CardThenRoll)
            } else {
                None
            }
        };

        if let Some(path) = path {
            self.commit(path, Some(total)).await;
        }
    }

    /// A click on an attack control commits after a grace delay, unless a
    /// roll-event path resolved the same physical action first.
    async fn on_sheet_activation(
        self: &Arc<Self>,
        participant: ParticipantId,
        control_text: &str,
        sheet_text: &str,
    ) {
        if participant != self.participant {
            return;
        }
        if !is_attack_control(control_text) || !self.classifier.is_melee(sheet_text) {
            return;
        }

        tracing::debug!("attack control activated, waiting out the grace delay");
        let this = Arc::clone(self);
        tokio::spawn(async move {
            tokio::time::sleep(this.settings.click_grace_delay()).await;
            this.commit(DetectionPath::SheetClick, None).await;
        });
    }

    /// The idempotence point: every detection path funnels through here, and
    /// the suppression guard admits exactly one commit per physical attack.
    async fn commit(self: &Arc<Self>, path: DetectionPath, attack_total: Option<i32>) {
        {
            let mut state = self.state.lock().await;
            if state.suppression.is_armed() {
                tracing::debug!(?path, "redundant detection suppressed, action already committed");
                return;
            }
            state.suppression.arm();
            state.pending.clear();
        }

        let intent = AttackIntent { attack_total, path };
        tracing::info!(
            path = ?intent.path,
            attack_total = ?intent.attack_total,
            "melee attack detected"
        );

        if let Err(error) = self.resolve(intent).await {
            tracing::warn!(%error, "attack resolution abandoned");
            // The guard stays armed: a redundant detector of the same
            // physical attack must not repeat the warning.
            self.messages
                .publish(
                    &self.display_name,
                    &format!("Attack automation stopped: {error}"),
                )
                .await;
        }
    }

    async fn resolve(&self, intent: AttackIntent) -> Result<(), ResolutionError> {
        // Read the live selection fresh; it is never cached.
        let targets = self.table.selected_targets(self.participant).await;
        if targets.len() != 1 {
            return Err(ResolutionError::AmbiguousTarget {
                count: targets.len(),
            });
        }
        let token = targets[0];
        let scene = self.table.current_scene().await;
        let defender = self
            .table
            .resolve_defender(scene, token)
            .await
            .ok_or(ResolutionError::UnresolvableActor { token })?;

        let roster = self.channel.roster().await;
        if elect_authority(&roster) == Some(self.participant) {
            self.resolve_locally(&self.display_name, &defender, intent.attack_total)
                .await;
        } else {
            let request = ResolutionRequest {
                request_id: RequestId::new(),
                scene,
                token,
                defender_name: defender.name.clone(),
                attacker_name: self.display_name.clone(),
                attack_total: intent.attack_total,
                evasion_skill: self.settings.evasion_skill_label.clone(),
                requested_at: Utc::now(),
            };
            tracing::debug!(
                request_id = %request.request_id,
                "not the elected authority, forwarding resolution request"
            );
            self.channel.emit_resolution_request(request).await?;
        }
        Ok(())
    }

    /// Run the evasion trigger and publish the result, or the manual
    /// affordance when no total could be captured.
    async fn resolve_locally(
        &self,
        attacker_name: &str,
        defender: &DefenderRef,
        attack_total: Option<i32>,
    ) {
        let evasion = self
            .trigger
            .trigger(defender, &self.settings.evasion_skill_label)
            .await;

        match evasion.total {
            Some(_) => {
                let outcome = Outcome::judge(attack_total, evasion.total);
                self.reporter
                    .report(attacker_name, &defender.name, &outcome)
                    .await;
            }
            None => {
                let request_id = RequestId::new();
                self.state.lock().await.manual_requests.insert(
                    request_id,
                    ManualRequest {
                        defender: defender.clone(),
                        attack_total,
                        attacker_name: attacker_name.to_string(),
                    },
                );
                self.reporter
                    .report_manual_fallback(request_id, &defender.name)
                    .await;
            }
        }
    }

    /// A detecting participant forwarded an attack to the authority.
    async fn on_resolution_requested(&self, request: ResolutionRequest) {
        let roster = self.channel.roster().await;
        if elect_authority(&roster) != Some(self.participant) {
            tracing::debug!(
                request_id = %request.request_id,
                "ignoring resolution request, not the elected authority"
            );
            return;
        }

        let Some(defender) = self
            .table
            .resolve_defender(request.scene, request.token)
            .await
        else {
            let error = ResolutionError::UnresolvableActor {
                token: request.token,
            };
            tracing::warn!(%error, request_id = %request.request_id, "resolution request abandoned");
            self.messages
                .publish(
                    &self.display_name,
                    &format!("Attack automation stopped: {error}"),
                )
                .await;
            return;
        };

        self.resolve_locally(&request.attacker_name, &defender, request.attack_total)
            .await;
    }

    /// The manual affordance fires the trigger once more, then publishes a
    /// normal outcome whatever the capture yields.
    async fn on_manual_trigger(&self, request_id: RequestId) {
        let request = self.state.lock().await.manual_requests.remove(&request_id);
        let Some(request) = request else {
            tracing::warn!(%request_id, "manual trigger activated for an unknown or consumed request");
            return;
        };

        let evasion = self
            .trigger
            .trigger(&request.defender, &self.settings.evasion_skill_label)
            .await;
        let outcome = Outcome::judge(request.attack_total, evasion.total);
        self.reporter
            .report(&request.attacker_name, &request.defender.name, &outcome)
            .await;
    }
}

fn is_attack_control(control_text: &str) -> bool {
    let control = control_text.to_lowercase();
    ATTACK_CONTROL_MARKERS
        .iter()
        .any(|marker| control.contains(marker))
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex as StdMutex;
    use std::time::Duration;

    use async_trait::async_trait;
    use tokio::sync::broadcast;
    use uuid::Uuid;

    use super::*;
    use crate::application::ports::outbound::{InvocationError, RollEvent, RollStreamPort, SheetPort};
    use crate::domain::value_objects::{ActorId, SceneId};

    struct FakeTable {
        scene: SceneId,
        targets: StdMutex<Vec<TokenId>>,
        defender_token: TokenId,
        defender: DefenderRef,
    }

    #[async_trait]
    impl TablePort for FakeTable {
        async fn current_scene(&self) -> SceneId {
            self.scene
        }

        async fn selected_targets(&self, _participant: ParticipantId) -> Vec<TokenId> {
            self.targets.lock().unwrap().clone()
        }

        async fn resolve_defender(&self, _scene: SceneId, token: TokenId) -> Option<DefenderRef> {
            (token == self.defender_token).then(|| self.defender.clone())
        }
    }

    struct FakeChannel {
        roster: Vec<ParticipantId>,
        requests: StdMutex<Vec<ResolutionRequest>>,
    }

    #[async_trait]
    impl ChannelPort for FakeChannel {
        async fn emit_resolution_request(
            &self,
            request: ResolutionRequest,
        ) -> Result<(), ChannelError> {
            self.requests.lock().unwrap().push(request);
            Ok(())
        }

        async fn roster(&self) -> Vec<ParticipantId> {
            self.roster.clone()
        }
    }

    #[derive(Default)]
    struct FakeMessages {
        published: StdMutex<Vec<(String, String)>>,
        affordances: StdMutex<Vec<(RequestId, String)>>,
    }

    impl FakeMessages {
        fn outcome_lines(&self) -> Vec<String> {
            self.published
                .lock()
                .unwrap()
                .iter()
                .map(|(_, content)| content.clone())
                .filter(|content| {
                    content.starts_with("HIT:")
                        || content.starts_with("DODGED:")
                        || content.starts_with("UNDETERMINED:")
                })
                .collect()
        }
    }

    #[async_trait]
    impl MessagePort for FakeMessages {
        async fn publish(&self, speaker: &str, content: &str) {
            self.published
                .lock()
                .unwrap()
                .push((speaker.to_string(), content.to_string()));
        }

        async fn register_manual_affordance(&self, request_id: RequestId, defender_name: &str) {
            self.affordances
                .lock()
                .unwrap()
                .push((request_id, defender_name.to_string()));
        }
    }

    /// Sheet whose direct-invocation behavior can change between events,
    /// so the manual-retrigger path can go from exhausted to working.
    struct SwitchableSheet {
        rolls: broadcast::Sender<RollEvent>,
        direct_total: StdMutex<Option<i32>>,
    }

    #[async_trait]
    impl SheetPort for SwitchableSheet {
        async fn invoke_roll(
            &self,
            defender: &DefenderRef,
            _skill: &str,
        ) -> Result<(), InvocationError> {
            match *self.direct_total.lock().unwrap() {
                Some(total) => {
                    let _ = self.rolls.send(RollEvent {
                        actor: defender.actor,
                        total: Some(total),
                    });
                    Ok(())
                }
                None => Err(InvocationError::Unsupported),
            }
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

        async fn ensure_sheet_visible(&self, _defender: &DefenderRef) {}

        async fn activate_skill_control(
            &self,
            _defender: &DefenderRef,
            _label: &str,
        ) -> Result<(), InvocationError> {
            Err(InvocationError::Failed("no matching control".to_string()))
        }
    }

    struct RollStream {
        sender: broadcast::Sender<RollEvent>,
    }

    impl RollStreamPort for RollStream {
        fn subscribe(&self) -> broadcast::Receiver<RollEvent> {
            self.sender.subscribe()
        }
    }

    struct Harness {
        defender_token: TokenId,
        service: Arc<AttackResolutionService>,
        messages: Arc<FakeMessages>,
        channel: Arc<FakeChannel>,
        sheet: Arc<SwitchableSheet>,
        table: Arc<FakeTable>,
    }

    fn participant(byte: u8) -> ParticipantId {
        ParticipantId::from_uuid(Uuid::from_bytes([byte; 16]))
    }

    fn harness(roster: Vec<ParticipantId>, me: ParticipantId, evasion_total: Option<i32>) -> Harness {
        let settings = AutomationSettings::default();

        let (sender, _) = broadcast::channel(16);
        let sheet = Arc::new(SwitchableSheet {
            rolls: sender.clone(),
            direct_total: StdMutex::new(evasion_total),
        });
        let stream = Arc::new(RollStream { sender });

        let defender_token = TokenId::new();
        let table = Arc::new(FakeTable {
            scene: SceneId::new(),
            targets: StdMutex::new(vec![defender_token]),
            defender_token,
            defender: DefenderRef::new(ActorId::new(), "Sgt. Virtanen"),
        });
        let channel = Arc::new(FakeChannel {
            roster,
            requests: StdMutex::new(Vec::new()),
        });
        let messages = Arc::new(FakeMessages::default());

        let trigger = EvasionTrigger::new(
            sheet.clone(),
            stream,
            settings.capture_timeout(),
            settings.confirm_click_delay(),
        );
        let service = Arc::new(AttackResolutionService::new(
            me,
            "Kowalski",
            settings,
            table.clone(),
            channel.clone(),
            messages.clone(),
            trigger,
        ));

        Harness {
            defender_token,
            service,
            messages,
            channel,
            sheet,
            table,
        }
    }

    fn card(me: ParticipantId) -> TableEvent {
        TableEvent::NarrativePosted {
            speaker: me,
            text: "Unarmed melee weapon attack".to_string(),
            rolls: vec![],
        }
    }

    fn attack_roll(me: ParticipantId, total: i32) -> TableEvent {
        TableEvent::RollPosted {
            speaker: me,
            actor: None,
            text: "2d6 keep highest".to_string(),
            rolls: vec![RollData::with_total(total)],
        }
    }

    #[tokio::test(start_paused = true)]
    async fn card_then_roll_resolves_to_a_hit() {
        let me = participant(1);
        let h = harness(vec![me], me, Some(9));

        h.service.handle_event(card(me)).await;
        h.service.handle_event(attack_roll(me, 14)).await;

        let outcomes = h.messages.outcome_lines();
        assert_eq!(outcomes.len(), 1);
        assert!(outcomes[0].starts_with("HIT:"));
        assert!(outcomes[0].contains("attack 14 vs evasion 9"));
        assert!(h.channel.requests.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn zero_targets_reports_and_abandons() {
        let me = participant(1);
        let h = harness(vec![me], me, Some(9));
        h.table.targets.lock().unwrap().clear();

        h.service.handle_event(card(me)).await;
        h.service.handle_event(attack_roll(me, 14)).await;

        assert!(h.messages.outcome_lines().is_empty());
        assert!(h.channel.requests.lock().unwrap().is_empty());
        let published = h.messages.published.lock().unwrap();
        assert_eq!(published.len(), 1);
        assert!(published[0].1.contains("exactly one target"));
    }

    #[tokio::test(start_paused = true)]
    async fn abandoned_resolution_keeps_redundant_detectors_suppressed() {
        let me = participant(1);
        let h = harness(vec![me], me, Some(9));
        h.table.targets.lock().unwrap().clear();

        h.service.handle_event(card(me)).await;
        h.service
            .handle_event(TableEvent::SheetActivation {
                participant: me,
                control_text: "Attack".to_string(),
                sheet_text: "Knife | ROF 1 | Damage 2 | MELEE".to_string(),
            })
            .await;
        h.service.handle_event(attack_roll(me, 14)).await;

        // The grace-delayed sheet-click task fires while the guard is armed.
        tokio::time::sleep(Duration::from_secs(3)).await;

        assert!(h.messages.outcome_lines().is_empty());
        let published = h.messages.published.lock().unwrap();
        assert_eq!(published.len(), 1);
        assert!(published[0].1.contains("exactly one target"));
    }

    #[tokio::test(start_paused = true)]
    async fn redundant_detectors_publish_exactly_one_outcome() {
        let me = participant(1);
        let h = harness(vec![me], me, Some(9));

        h.service.handle_event(card(me)).await;
        h.service
            .handle_event(TableEvent::SheetActivation {
                participant: me,
                control_text: "Attack".to_string(),
                sheet_text: "Knife | ROF 1 | Damage 2 | MELEE".to_string(),
            })
            .await;
        h.service.handle_event(attack_roll(me, 14)).await;

        // Let the grace-delayed sheet-click task run its course.
        tokio::time::sleep(Duration::from_secs(3)).await;

        assert_eq!(h.messages.outcome_lines().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn non_authority_forwards_a_resolution_request() {
        let me = participant(7);
        let authority = participant(1);
        let h = harness(vec![authority], me, Some(9));

        h.service.handle_event(card(me)).await;
        h.service.handle_event(attack_roll(me, 14)).await;

        let requests = h.channel.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].attack_total, Some(14));
        assert_eq!(requests[0].defender_name, "Sgt. Virtanen");
        assert_eq!(requests[0].attacker_name, "Kowalski");
        drop(requests);
        assert!(h.messages.outcome_lines().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn roll_text_match_needs_no_prior_card() {
        let me = participant(1);
        let h = harness(vec![me], me, Some(9));

        h.service
            .handle_event(TableEvent::RollPosted {
                speaker: me,
                actor: None,
                text: "Melee attack with the knife".to_string(),
                rolls: vec![RollData::with_total(14)],
            })
            .await;

        let outcomes = h.messages.outcome_lines();
        assert_eq!(outcomes.len(), 1);
        assert!(outcomes[0].starts_with("HIT:"));
    }

    #[tokio::test(start_paused = true)]
    async fn expired_marker_does_not_absorb_a_later_roll() {
        let me = participant(1);
        let h = harness(vec![me], me, Some(9));

        h.service.handle_event(card(me)).await;
        tokio::time::sleep(Duration::from_secs(11)).await;
        h.service.handle_event(attack_roll(me, 14)).await;

        assert!(h.messages.outcome_lines().is_empty());
        assert!(h.channel.requests.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn sheet_click_alone_resolves_with_unknown_attack_total() {
        let me = participant(1);
        let h = harness(vec![me], me, Some(9));

        h.service
            .handle_event(TableEvent::SheetActivation {
                participant: me,
                control_text: "Attack".to_string(),
                sheet_text: "Bayonet thrust".to_string(),
            })
            .await;
        tokio::time::sleep(Duration::from_secs(3)).await;

        let outcomes = h.messages.outcome_lines();
        assert_eq!(outcomes.len(), 1);
        assert!(outcomes[0].starts_with("UNDETERMINED:"));
        assert!(outcomes[0].contains("attack ? vs evasion 9"));
    }

    #[tokio::test(start_paused = true)]
    async fn manual_affordance_retries_once_and_completes() {
        let me = participant(1);
        let h = harness(vec![me], me, None);

        h.service.handle_event(card(me)).await;
        h.service.handle_event(attack_roll(me, 14)).await;

        // Both tiers exhausted: the affordance is published instead.
        assert!(h.messages.outcome_lines().is_empty());
        let request_id = {
            let affordances = h.messages.affordances.lock().unwrap();
            assert_eq!(affordances.len(), 1);
            assert_eq!(affordances[0].1, "Sgt. Virtanen");
            affordances[0].0
        };

        // The sheet starts working; the manual trigger completes the check.
        *h.sheet.direct_total.lock().unwrap() = Some(9);
        h.service
            .handle_event(TableEvent::ManualEvasionRequested { request_id })
            .await;

        let outcomes = h.messages.outcome_lines();
        assert_eq!(outcomes.len(), 1);
        assert!(outcomes[0].starts_with("HIT:"));
        assert!(outcomes[0].contains("attack 14 vs evasion 9"));

        // A consumed affordance is inert.
        h.service
            .handle_event(TableEvent::ManualEvasionRequested { request_id })
            .await;
        assert_eq!(h.messages.outcome_lines().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn authority_resolves_a_remote_request() {
        let me = participant(1);
        let h = harness(vec![me], me, Some(12));

        let request = ResolutionRequest {
            request_id: RequestId::new(),
            scene: h.table.scene,
            token: h.defender_token,
            defender_name: "Sgt. Virtanen".to_string(),
            attacker_name: "Private Okafor".to_string(),
            attack_total: Some(8),
            evasion_skill: "Evasion".to_string(),
            requested_at: Utc::now(),
        };
        h.service
            .handle_event(TableEvent::ResolutionRequested(request))
            .await;

        let outcomes = h.messages.outcome_lines();
        assert_eq!(outcomes.len(), 1);
        assert!(outcomes[0].starts_with("DODGED:"));
        assert!(outcomes[0].contains("Private Okafor"));
    }

    #[tokio::test(start_paused = true)]
    async fn other_participants_rolls_are_ignored() {
        let me = participant(1);
        let someone_else = participant(9);
        let h = harness(vec![me], me, Some(9));

        h.service
            .handle_event(TableEvent::RollPosted {
                speaker: someone_else,
                actor: None,
                text: "Melee attack with the knife".to_string(),
                rolls: vec![RollData::with_total(14)],
            })
            .await;

        assert!(h.messages.outcome_lines().is_empty());
        assert!(h.channel.requests.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn unresolvable_token_reports_and_abandons() {
        let me = participant(1);
        let h = harness(vec![me], me, Some(9));
        *h.table.targets.lock().unwrap() = vec![TokenId::new()];

        h.service.handle_event(card(me)).await;
        h.service.handle_event(attack_roll(me, 14)).await;

        assert!(h.messages.outcome_lines().is_empty());
        let published = h.messages.published.lock().unwrap();
        assert_eq!(published.len(), 1);
        assert!(published[0].1.contains("does not map to a live defender"));
    }
}
