//! Scenario inputs replayed against a selection session.
//!
//! A scenario is the screen configuration followed by the ordered list of
//! inputs the presentation layer would have delivered.

use std::path::Path;

use reward_selection::{Project, RewardId, ScreenConfig, ShippingRule};
use serde::{Deserialize, Serialize};

use crate::errors::Result;

/// One input delivered to the selection engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScenarioEvent {
    /// The viewer picked (or cleared) a shipping destination.
    ShippingRuleSelected {
        #[serde(default)]
        rule: Option<ShippingRule>,
    },
    /// A newer project snapshot came back from the data layer.
    ProjectUpdated { project: Project },
    /// The reward list finished layout.
    LayoutCompleted,
    /// The viewer tapped a reward.
    RewardSelected { reward_id: RewardId },
    /// The viewer accepted the edit-reward prompt.
    ConfirmedEditReward,
    /// The screen was dismissed.
    Teardown,
}

impl ScenarioEvent {
    /// Return a short identifier string suitable for logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ShippingRuleSelected { .. } => "shipping_rule_selected",
            Self::ProjectUpdated { .. } => "project_updated",
            Self::LayoutCompleted => "layout_completed",
            Self::RewardSelected { .. } => "reward_selected",
            Self::ConfirmedEditReward => "confirmed_edit_reward",
            Self::Teardown => "teardown",
        }
    }
}

/// A recorded selection session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(flatten)]
    pub screen: ScreenConfig,
    #[serde(default)]
    pub events: Vec<ScenarioEvent>,
}

impl Scenario {
    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = tokio::fs::read_to_string(path).await?;
        Self::from_json(&raw)
    }
}
