//! Replays a scenario through a selection session.
//!
//! A feeder task pushes scenario inputs over a channel, the way UI callbacks
//! and network responses would arrive; the session loop owns the engine and
//! applies them one at a time. Cancelling the token tears the screen down.

use std::time::Duration;

use reward_selection::{SelectionEngine, SelectionObserver};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::errors::{HostError, Result};
use crate::events::{Scenario, ScenarioEvent};
use crate::presenter::{LoggingPresenter, SessionSummary};

const CHANNEL_CAPACITY: usize = 32;

/// Run `scenario` to completion, teardown, or cancellation.
pub async fn run(
    scenario: Scenario,
    config: &Config,
    cancel: CancellationToken,
) -> Result<SessionSummary> {
    let Scenario { mut screen, events } = scenario;
    if config.viewer_id.is_some() {
        screen.viewer_id = config.viewer_id;
    }
    info!(
        "Session starting — project {} with {} inputs",
        screen.project.id,
        events.len()
    );

    let (tx, mut rx) = mpsc::channel(CHANNEL_CAPACITY);
    let feed_cancel = cancel.child_token();
    let feeder = tokio::spawn(feed(
        events,
        tx,
        Duration::from_millis(config.event_interval_ms),
        feed_cancel.clone(),
    ));

    let mut engine = SelectionEngine::new(LoggingPresenter::default(), config.feature_flags());

    let outcome = async {
        engine.configure(screen)?;
        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    info!("Session cancelled");
                    break;
                }
                next = rx.recv() => match next {
                    None => break,
                    Some(ScenarioEvent::Teardown) => break,
                    Some(event) => apply(&mut engine, event)?,
                },
            }
        }
        Ok::<(), HostError>(())
    }
    .await;

    engine.teardown();
    feed_cancel.cancel();
    if let Err(e) = feeder.await {
        warn!("Feeder task failed: {e}");
    }

    if let Err(e) = &outcome {
        warn!("Session aborted: {e}");
    }
    outcome?;

    let summary = engine.into_observer().into_summary();
    info!(
        "Session finished — {} navigation(s), {} prompt(s)",
        summary.navigations.len(),
        summary.prompts
    );
    Ok(summary)
}

/// Apply one input to the engine.
fn apply<O: SelectionObserver>(engine: &mut SelectionEngine<O>, event: ScenarioEvent) -> Result<()> {
    debug!("Applying {}", event.as_str());
    match event {
        ScenarioEvent::ShippingRuleSelected { rule } => engine.shipping_rule_selected(rule)?,
        ScenarioEvent::ProjectUpdated { project } => engine.project_updated(project)?,
        ScenarioEvent::LayoutCompleted => engine.layout_completed()?,
        ScenarioEvent::RewardSelected { reward_id } => engine.reward_selected(reward_id)?,
        ScenarioEvent::ConfirmedEditReward => engine.confirmed_edit_reward()?,
        ScenarioEvent::Teardown => engine.teardown(),
    }
    Ok(())
}

/// Deliver `events` in order, pausing `interval` before each one.
async fn feed(
    events: Vec<ScenarioEvent>,
    tx: mpsc::Sender<ScenarioEvent>,
    interval: Duration,
    cancel: CancellationToken,
) {
    for event in events {
        if !interval.is_zero() {
            tokio::select! {
                _ = cancel.cancelled() => return,
                _ = tokio::time::sleep(interval) => {}
            }
        }
        tokio::select! {
            _ = cancel.cancelled() => return,
            sent = tx.send(event) => {
                if sent.is_err() {
                    return;
                }
            }
        }
    }
}
