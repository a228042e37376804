//! Riposte - Opposed melee attack and evasion automation
//!
//! Watches a session's event stream for melee attacks, triggers the
//! targeted defender's Evasion check, and announces the opposed result.
//! This binary wires the pipeline to simulated table adapters and replays
//! one attack end to end; a host platform integration supplies its own
//! implementations of the same ports.

mod application;
mod domain;
mod infrastructure;

use std::collections::HashMap;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::application::services::{AttackResolutionService, EvasionTrigger};
use crate::domain::events::{RollData, TableEvent};
use crate::domain::value_objects::{ActorId, DefenderRef, ParticipantId, SceneId, TokenId};
use crate::infrastructure::channel::InProcessChannel;
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::sim::{ConsoleMessages, SimRollStream, SimSheet, SimTable};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "riposte=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Riposte");

    let config = AppConfig::from_env()?;
    tracing::info!("Configuration loaded");
    tracing::info!("  Detection mode: {:?}", config.settings.detection_mode);
    tracing::info!("  Evasion skill: {}", config.settings.evasion_skill_label);

    // One scene, one attacker, one defender
    let attacker = ParticipantId::new();
    let referee = ParticipantId::new();
    let scene = SceneId::new();
    let defender_token = TokenId::new();
    let defender = DefenderRef::new(ActorId::new(), "Sgt. Virtanen");

    let table = Arc::new(SimTable::new(
        scene,
        HashMap::from([(defender_token, defender)]),
    ));
    table.select_target(attacker, defender_token).await;

    let stream = Arc::new(SimRollStream::new());
    let sheet = Arc::new(SimSheet::new(stream.sender()));
    let messages = Arc::new(ConsoleMessages);
    let channel = Arc::new(InProcessChannel::new(vec![referee]));

    let attacker_service = Arc::new(AttackResolutionService::new(
        attacker,
        config.attacker_name.clone(),
        config.settings.clone(),
        table.clone(),
        channel.clone(),
        messages.clone(),
        EvasionTrigger::new(
            sheet.clone(),
            stream.clone(),
            config.settings.capture_timeout(),
            config.settings.confirm_click_delay(),
        ),
    ));

    let referee_service = Arc::new(AttackResolutionService::new(
        referee,
        config.authority_name.clone(),
        config.settings.clone(),
        table.clone(),
        channel.clone(),
        messages,
        EvasionTrigger::new(
            sheet,
            stream,
            config.settings.capture_timeout(),
            config.settings.confirm_click_delay(),
        ),
    ));

    // The authority listens for forwarded resolution requests
    let forwarder = {
        let referee_service = referee_service.clone();
        let mut requests = channel.subscribe_requests();
        tokio::spawn(async move {
            while let Ok(envelope) = requests.recv().await {
                if let Some(request) = InProcessChannel::decode(&envelope) {
                    referee_service
                        .handle_event(TableEvent::ResolutionRequested(request))
                        .await;
                }
            }
        })
    };

    // Replay one physical attack: the narrative card, then its roll
    attacker_service
        .handle_event(TableEvent::NarrativePosted {
            speaker: attacker,
            text: "Unarmed melee weapon attack".to_string(),
            rolls: vec![],
        })
        .await;
    attacker_service
        .handle_event(TableEvent::RollPosted {
            speaker: attacker,
            actor: None,
            text: "2d6 keep highest".to_string(),
            rolls: vec![RollData::with_total(14)],
        })
        .await;

    // Give the forwarded resolution time to run on the authority side
    tokio::time::sleep(std::time::Duration::from_secs(2)).await;
    forwarder.abort();

    tracing::info!("Demo session complete");
    Ok(())
}
