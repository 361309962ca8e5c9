//! Logging presentation layer.
//!
//! Stands in for the UI: every engine output is logged and the parts worth
//! reporting are collected into a [`SessionSummary`].

use reward_selection::{
    Destination, NavigationEvent, PledgeContext, RewardId, RewardListing, SelectionObserver,
};
use serde::Serialize;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NavigationRecord {
    pub destination: Destination,
    pub context: PledgeContext,
    pub reward_ids: Vec<RewardId>,
}

impl From<&NavigationEvent> for NavigationRecord {
    fn from(event: &NavigationEvent) -> Self {
        Self {
            destination: event.destination,
            context: event.payload.context,
            reward_ids: event.payload.rewards.iter().map(|reward| reward.id).collect(),
        }
    }
}

/// What the screen ended up showing and doing.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SessionSummary {
    pub title: Option<String>,
    pub shipping_location_hidden: Option<bool>,
    pub listed_reward_ids: Vec<RewardId>,
    pub reloads: usize,
    pub scroll_index: Option<usize>,
    pub prompts: usize,
    pub navigations: Vec<NavigationRecord>,
}

#[derive(Debug, Default)]
pub struct LoggingPresenter {
    summary: SessionSummary,
}

impl LoggingPresenter {
    pub fn into_summary(self) -> SessionSummary {
        self.summary
    }
}

impl SelectionObserver for LoggingPresenter {
    fn title(&mut self, title: &str) {
        info!("Title: {title}");
        self.summary.title = Some(title.to_string());
    }

    fn shipping_location_hidden(&mut self, hidden: bool) {
        info!("Shipping location picker hidden: {hidden}");
        self.summary.shipping_location_hidden = Some(hidden);
    }

    fn rewards_reloaded(&mut self, listing: &RewardListing) {
        let ids = listing.reward_ids();
        info!("Showing {} rewards: {ids:?}", listing.count());
        self.summary.listed_reward_ids = ids;
        self.summary.reloads += 1;
    }

    fn scroll_to_reward(&mut self, index: usize) {
        info!("Scrolling to reward at index {index}");
        self.summary.scroll_index = Some(index);
    }

    fn confirmation_prompt(&mut self, title: &str, body: &str) {
        info!("Prompt: {title} / {body}");
        self.summary.prompts += 1;
    }

    fn navigate(&mut self, event: &NavigationEvent) {
        let record = NavigationRecord::from(event);
        info!(
            "Navigate → {:?} ({:?}) with rewards {:?}",
            record.destination, record.context, record.reward_ids
        );
        self.summary.navigations.push(record);
    }
}
