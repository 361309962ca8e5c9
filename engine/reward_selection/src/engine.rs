//! # Engine
//!
//! [`SelectionEngine`] is the event-driven facade over the pure pipeline
//! stages. It keeps one set of latest inputs per screen session and recomputes
//! the affected outputs whenever an input changes:
//!
//! | Input                     | Recomputes                                  |
//! |---------------------------|---------------------------------------------|
//! | `configure`               | ordering, title, picker visibility, listing |
//! | `project_updated`         | ordering, title, picker visibility, listing |
//! | `shipping_rule_selected`  | location filter, listing                    |
//! | `layout_completed`        | scroll target (first hit only)              |
//! | `reward_selected`         | eligibility, navigation decision            |
//! | `confirmed_edit_reward`   | releases the pending decision               |
//! | `teardown`                | drops everything; later inputs fail         |
//!
//! Outputs are pushed to a [`SelectionObserver`]. Every stream is
//! last-write-wins: a new shipping rule replaces the old one, a new tap
//! replaces the selected reward and any decision still waiting for
//! confirmation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::availability::{can_navigate_to_reward, has_started, Clock, SystemClock};
use crate::copy::{edit_reward_prompt, title_for, EnglishLocalizer, Localizer, ScreenContext};
use crate::error::{Result, SelectionError};
use crate::location::{project_has_shippable_rewards, rewards_for_display};
use crate::navigation::{decide, Destination, FeatureFlags, NavigationDecision};
use crate::ordering::order;
use crate::scroll::resolve_scroll_index;
use crate::types::{
    PledgeContext, PledgeViewData, Project, RefTag, Reward, RewardId, ShippingRule, UserId,
};

/// Everything the screen is opened with.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScreenConfig {
    pub project: Project,
    #[serde(default)]
    pub ref_tag: Option<RefTag>,
    #[serde(default)]
    pub context: ScreenContext,
    #[serde(default)]
    pub secret_reward_token: Option<String>,
    #[serde(default)]
    pub viewer_id: Option<UserId>,
}

/// One tile of the reward list.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RewardCardData {
    pub reward: Reward,
    pub context: PledgeContext,
    /// Destination the tile was filtered for; `None` on the unfiltered list.
    pub shipping_rule: Option<ShippingRule>,
}

/// The reward list as it should be rendered.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct RewardListing {
    pub cards: Vec<RewardCardData>,
}

impl RewardListing {
    pub fn count(&self) -> usize {
        self.cards.len()
    }

    pub fn reward_ids(&self) -> Vec<RewardId> {
        self.cards.iter().map(|card| card.reward.id).collect()
    }
}

/// A navigation the presentation layer should perform.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NavigationEvent {
    pub destination: Destination,
    pub payload: PledgeViewData,
}

impl From<NavigationDecision> for NavigationEvent {
    fn from(decision: NavigationDecision) -> Self {
        Self {
            destination: decision.destination,
            payload: decision.payload,
        }
    }
}

/// Receiver of engine outputs. Every method defaults to doing nothing.
pub trait SelectionObserver {
    fn title(&mut self, _title: &str) {}
    fn shipping_location_hidden(&mut self, _hidden: bool) {}
    fn rewards_reloaded(&mut self, _listing: &RewardListing) {}
    fn scroll_to_reward(&mut self, _index: usize) {}
    fn confirmation_prompt(&mut self, _title: &str, _body: &str) {}
    fn navigate(&mut self, _event: &NavigationEvent) {}
}

/// Latest inputs of a configured session.
#[derive(Debug)]
struct SessionInputs {
    config: ScreenConfig,
    ordered: Vec<Reward>,
    shipping_rule: Option<ShippingRule>,
    selected_reward: Option<Reward>,
    pending: Option<NavigationDecision>,
    scrolled: bool,
}

/// Event-driven reward selection state machine for one screen.
pub struct SelectionEngine<O> {
    observer: O,
    flags: Box<dyn FeatureFlags + Send + Sync>,
    localizer: Box<dyn Localizer + Send + Sync>,
    clock: Box<dyn Clock + Send + Sync>,
    session: Option<SessionInputs>,
    closed: bool,
}

impl<O: SelectionObserver> SelectionEngine<O> {
    pub fn new(observer: O, flags: impl FeatureFlags + Send + Sync + 'static) -> Self {
        Self {
            observer,
            flags: Box::new(flags),
            localizer: Box::new(EnglishLocalizer),
            clock: Box::new(SystemClock),
            session: None,
            closed: false,
        }
    }

    pub fn with_localizer(mut self, localizer: impl Localizer + Send + Sync + 'static) -> Self {
        self.localizer = Box::new(localizer);
        self
    }

    pub fn with_clock(mut self, clock: impl Clock + Send + Sync + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn into_observer(self) -> O {
        self.observer
    }

    /// Last reward the user tapped in this session.
    pub fn selected_reward(&self) -> Option<&Reward> {
        self.session.as_ref()?.selected_reward.as_ref()
    }

    /// Whether a decision is waiting for [`confirmed_edit_reward`](Self::confirmed_edit_reward).
    pub fn has_pending_confirmation(&self) -> bool {
        self.session
            .as_ref()
            .is_some_and(|session| session.pending.is_some())
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    // ─────────────────────────────────────────────────────────
    // Inputs
    // ─────────────────────────────────────────────────────────

    /// Start (or restart) the session with a project snapshot.
    ///
    /// A restart keeps the latest shipping rule; selection, pending decision
    /// and scroll state start over.
    pub fn configure(&mut self, config: ScreenConfig) -> Result<()> {
        self.ensure_open()?;

        let ordered = order(&config.project.rewards);
        debug!(
            project_id = config.project.id,
            rewards = ordered.len(),
            backed = config.project.is_backed(),
            "session configured"
        );

        let shipping_rule = self
            .session
            .take()
            .and_then(|previous| previous.shipping_rule);
        self.session = Some(SessionInputs {
            config,
            ordered,
            shipping_rule,
            selected_reward: None,
            pending: None,
            scrolled: false,
        });
        self.publish_header()?;
        self.publish_listing()
    }

    /// A newer snapshot of the project arrived.
    ///
    /// Ordering, title, picker visibility and listing are recomputed against
    /// the latest shipping rule. The selected reward, scroll state and any
    /// decision waiting for confirmation are kept; a pending decision still
    /// carries the values captured when its reward was tapped.
    pub fn project_updated(&mut self, project: Project) -> Result<()> {
        let session = self.session_mut()?;
        debug!(
            project_id = project.id,
            rewards = project.rewards.len(),
            backed = project.is_backed(),
            pending = session.pending.is_some(),
            "project snapshot refreshed"
        );
        session.ordered = order(&project.rewards);
        session.config.project = project;
        self.publish_header()?;
        self.publish_listing()
    }

    /// The user picked a destination, or cleared it.
    pub fn shipping_rule_selected(&mut self, rule: Option<ShippingRule>) -> Result<()> {
        let session = self.session_mut()?;
        debug!(
            location_id = rule.as_ref().map(|rule| rule.location.id),
            "shipping rule selected"
        );
        session.shipping_rule = rule;
        self.publish_listing()
    }

    /// The list has been laid out; scroll to the initial reward once.
    pub fn layout_completed(&mut self) -> Result<()> {
        let now = self.clock.now();
        let session = self.session_mut()?;
        if session.scrolled {
            return Ok(());
        }

        let shown = listed_rewards(session, now);
        let index = resolve_scroll_index(
            &session.config.project,
            &shown,
            session.config.secret_reward_token.as_deref(),
        );

        if let Some(index) = index {
            session.scrolled = true;
            debug!(index, "scrolling to initial reward");
            self.observer.scroll_to_reward(index);
        }
        Ok(())
    }

    /// The user tapped the reward with `reward_id`.
    pub fn reward_selected(&mut self, reward_id: RewardId) -> Result<()> {
        self.ensure_open()?;
        let now = self.clock.now();
        let flags = self.flags.as_ref();
        let session = self.session.as_mut().ok_or(SelectionError::NotConfigured)?;
        let project = &session.config.project;

        let Some(reward) = session.ordered.iter().find(|reward| reward.id == reward_id) else {
            warn!(project_id = project.id, reward_id, "tapped reward is not in project");
            return Err(SelectionError::RewardNotFound {
                project_id: project.id,
                reward_id,
            });
        };
        session.selected_reward = Some(reward.clone());
        // A new tap always supersedes a decision nobody confirmed.
        session.pending = None;

        if !can_navigate_to_reward(project, reward, session.config.viewer_id, flags, now) {
            debug!(reward_id, "reward is not navigable");
            return Ok(());
        }

        let decision = decide(
            project,
            reward,
            project.backing(),
            session.config.ref_tag.as_ref(),
            session.shipping_rule.as_ref(),
            flags,
        )?;

        if decision.requires_confirmation {
            info!(reward_id, "holding navigation until edit is confirmed");
            session.pending = Some(decision);
            let (title, body) = edit_reward_prompt();
            let title = self.localizer.text(title);
            let body = self.localizer.text(body);
            self.observer.confirmation_prompt(&title, &body);
            return Ok(());
        }

        self.emit_navigation(decision);
        Ok(())
    }

    /// The user accepted the edit-reward prompt.
    pub fn confirmed_edit_reward(&mut self) -> Result<()> {
        let session = self.session_mut()?;
        match session.pending.take() {
            Some(decision) => self.emit_navigation(decision),
            None => debug!("edit confirmed with nothing pending"),
        }
        Ok(())
    }

    /// The screen went away. Nothing is emitted after this.
    pub fn teardown(&mut self) {
        if let Some(session) = self.session.take() {
            info!(
                project_id = session.config.project.id,
                discarded_pending = session.pending.is_some(),
                "session torn down"
            );
        }
        self.closed = true;
    }

    // ─────────────────────────────────────────────────────────
    // Internals
    // ─────────────────────────────────────────────────────────

    fn ensure_open(&self) -> Result<()> {
        if self.closed {
            return Err(SelectionError::SessionClosed);
        }
        Ok(())
    }

    fn session_mut(&mut self) -> Result<&mut SessionInputs> {
        self.ensure_open()?;
        self.session.as_mut().ok_or(SelectionError::NotConfigured)
    }

    fn publish_header(&mut self) -> Result<()> {
        let session = self.session_mut()?;
        let project = &session.config.project;
        let title = title_for(session.config.context, project, session.config.viewer_id);
        let hidden = !project_has_shippable_rewards(project);

        let title = self.localizer.text(title);
        self.observer.title(&title);
        self.observer.shipping_location_hidden(hidden);
        Ok(())
    }

    fn publish_listing(&mut self) -> Result<()> {
        let now = self.clock.now();
        let session = self.session_mut()?;
        let view = rewards_for_display(&session.ordered, session.shipping_rule.as_ref());
        let shipping_rule = if view.filtered {
            session.shipping_rule.clone()
        } else {
            None
        };

        let listing = RewardListing {
            cards: view
                .rewards
                .into_iter()
                .filter(|reward| has_started(reward, now))
                .map(|reward| RewardCardData {
                    reward,
                    context: PledgeContext::Pledge,
                    shipping_rule: shipping_rule.clone(),
                })
                .collect(),
        };

        debug!(count = listing.count(), filtered = view.filtered, "rewards reloaded");
        self.observer.rewards_reloaded(&listing);
        Ok(())
    }

    fn emit_navigation(&mut self, decision: NavigationDecision) {
        let event = NavigationEvent::from(decision);
        info!(
            destination = ?event.destination,
            context = ?event.payload.context,
            "navigating from reward selection"
        );
        self.observer.navigate(&event);
    }
}

/// Rewards currently shown, in listing order.
fn listed_rewards(session: &SessionInputs, now: DateTime<Utc>) -> Vec<Reward> {
    rewards_for_display(&session.ordered, session.shipping_rule.as_ref())
        .rewards
        .into_iter()
        .filter(|reward| has_started(reward, now))
        .collect()
}
