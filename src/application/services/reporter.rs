//! Outcome reporter
//!
//! Formats the opposed-check result and publishes it on the shared
//! messaging surface. An unknown evasion total publishes the interactive
//! manual-trigger affordance instead of a verdict; everything else gets a
//! plain announcement.

use std::sync::Arc;

use crate::application::ports::outbound::MessagePort;
use crate::domain::entities::{Outcome, Verdict};
use crate::domain::value_objects::RequestId;

pub struct OutcomeReporter {
    messages: Arc<dyn MessagePort>,
}

impl OutcomeReporter {
    pub fn new(messages: Arc<dyn MessagePort>) -> Self {
        Self { messages }
    }

    pub async fn report(&self, attacker_name: &str, defender_name: &str, outcome: &Outcome) {
        let content = format_announcement(attacker_name, defender_name, outcome);
        tracing::info!(
            attacker = attacker_name,
            defender = defender_name,
            verdict = outcome.verdict.display_name(),
            "publishing opposed check outcome"
        );
        self.messages.publish(attacker_name, &content).await;
    }

    /// Automatic capture failed; hand the table a button instead of a verdict.
    pub async fn report_manual_fallback(&self, request_id: RequestId, defender_name: &str) {
        tracing::warn!(
            defender = defender_name,
            %request_id,
            "no evasion total captured, publishing manual trigger"
        );
        self.messages
            .register_manual_affordance(request_id, defender_name)
            .await;
    }
}

fn format_announcement(attacker: &str, defender: &str, outcome: &Outcome) -> String {
    let attack = format_total(outcome.attack_total);
    let evasion = format_total(outcome.evasion_total);
    match outcome.verdict {
        Verdict::Hit => format!(
            "HIT: {attacker} strikes {defender} (attack {attack} vs evasion {evasion})"
        ),
        Verdict::Dodged => format!(
            "DODGED: {defender} evades {attacker} (attack {attack} vs evasion {evasion})"
        ),
        Verdict::Undetermined => format!(
            "UNDETERMINED: opposed check between {attacker} and {defender} \
             (attack {attack} vs evasion {evasion})"
        ),
    }
}

fn format_total(total: Option<i32>) -> String {
    match total {
        Some(value) => value.to_string(),
        None => "?".to_string(),
    }
}
