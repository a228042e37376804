//! Evasion trigger
//!
//! Coerces a defensive roll out of a defender whose roll-triggering
//! mechanism is unknown. Two tiers, first captured total wins:
//!
//! 1. Programmatic: walk the prioritized invocation strategies the sheet
//!    exposes, while concurrently listening for the next roll result
//!    attributable to the defender. Success means "a total was captured",
//!    not "an invocation returned Ok"; invocation may complete before or
//!    after the result event arrives.
//! 2. Simulated interaction: make the sheet visible, activate the control
//!    matching the skill label (twice, some sheets want a confirmation
//!    step), and listen again with a fresh timeout.
//!
//! Exhausting both tiers returns an unknown result; the caller degrades to
//! the manual affordance instead of failing.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::time::timeout;

use crate::application::ports::outbound::{InvocationError, RollEvent, RollStreamPort, SheetPort};
use crate::domain::entities::EvasionResult;
use crate::domain::value_objects::{ActorId, DefenderRef};

#[derive(Debug, Clone, Copy)]
enum ProgrammaticStrategy {
    Direct,
    NamedLookup,
    ControllerHandler,
}

impl ProgrammaticStrategy {
    const ORDERED: [ProgrammaticStrategy; 3] = [
        ProgrammaticStrategy::Direct,
        ProgrammaticStrategy::NamedLookup,
        ProgrammaticStrategy::ControllerHandler,
    ];
}

pub struct EvasionTrigger {
    sheet: Arc<dyn SheetPort>,
    rolls: Arc<dyn RollStreamPort>,
    capture_timeout: Duration,
    confirm_click_delay: Duration,
}

impl EvasionTrigger {
    pub fn new(
        sheet: Arc<dyn SheetPort>,
        rolls: Arc<dyn RollStreamPort>,
        capture_timeout: Duration,
        confirm_click_delay: Duration,
    ) -> Self {
        Self {
            sheet,
            rolls,
            capture_timeout,
            confirm_click_delay,
        }
    }

    pub async fn trigger(&self, defender: &DefenderRef, skill_label: &str) -> EvasionResult {
        if let Some(total) = self.programmatic_tier(defender, skill_label).await {
            tracing::debug!(defender = %defender.name, total, "programmatic tier captured a total");
            return EvasionResult::captured(total);
        }

        if let Some(total) = self.interaction_tier(defender, skill_label).await {
            tracing::debug!(defender = %defender.name, total, "interaction tier captured a total");
            return EvasionResult::captured(total);
        }

        tracing::warn!(
            defender = %defender.name,
            skill = skill_label,
            "all evasion strategies exhausted without a captured total"
        );
        EvasionResult::unknown()
    }

    async fn programmatic_tier(&self, defender: &DefenderRef, skill: &str) -> Option<i32> {
        // Subscribe before invoking anything: the result event may arrive
        // before the invocation call returns.
        let receiver = self.rolls.subscribe();
        let capture = self.capture_total(receiver, defender.actor);

        let invocations = async {
            for strategy in ProgrammaticStrategy::ORDERED {
                let result = match strategy {
                    ProgrammaticStrategy::Direct => self.sheet.invoke_roll(defender, skill).await,
                    ProgrammaticStrategy::NamedLookup => {
                        self.sheet.invoke_named_roll(defender, skill).await
                    }
                    ProgrammaticStrategy::ControllerHandler => {
                        self.sheet.invoke_controller_handler(defender, skill).await
                    }
                };
                match result {
                    Ok(()) => {
                        tracing::debug!(?strategy, defender = %defender.name, "invocation accepted");
                        break;
                    }
                    Err(InvocationError::Unsupported) => {
                        tracing::debug!(?strategy, "capability not exposed, trying next");
                    }
                    Err(InvocationError::Failed(reason)) => {
                        tracing::warn!(?strategy, %reason, "invocation failed, trying next");
                    }
                }
            }
        };

        let (total, ()) = tokio::join!(capture, invocations);
        total
    }

    async fn interaction_tier(&self, defender: &DefenderRef, label: &str) -> Option<i32> {
        self.sheet.ensure_sheet_visible(defender).await;

        let receiver = self.rolls.subscribe();
        let capture = self.capture_total(receiver, defender.actor);

        let activations = async {
            for attempt in 0..2 {
                if attempt > 0 {
                    tokio::time::sleep(self.confirm_click_delay).await;
                }
                if let Err(error) = self.sheet.activate_skill_control(defender, label).await {
                    tracing::warn!(
                        defender = %defender.name,
                        %error,
                        "simulated activation failed"
                    );
                    break;
                }
            }
        };

        let (total, ()) = tokio::join!(capture, activations);
        total
    }

    /// Wait for the first numeric total attributable to the actor, bounded
    /// by the capture timeout. The receiver is dropped on timeout, which
    /// unregisters the listener; a stale listener must not absorb a later
    /// unrelated roll.
    async fn capture_total(
        &self,
        mut receiver: broadcast::Receiver<RollEvent>,
        actor: ActorId,
    ) -> Option<i32> {
        let wait = async move {
            loop {
                match receiver.recv().await {
                    Ok(event) if event.actor == actor => {
                        if let Some(total) = event.total {
                            return Some(total);
                        }
                    }
                    Ok(_) => {}
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::warn!(skipped, "roll capture lagged behind the stream");
                    }
                    Err(broadcast::error::RecvError::Closed) => return None,
                }
            }
        };

        timeout(self.capture_timeout, wait).await.unwrap_or(None)
    }
}
