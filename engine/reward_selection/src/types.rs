//! # Types
//!
//! Snapshot structures shared by every stage of the selection pipeline.
//!
//! ## Design decisions
//!
//! ### Snapshots, not entities
//!
//! [`Project`], [`Reward`] and [`Backing`] are value snapshots handed over by
//! the data layer. The engine clones what it needs and never writes back; a
//! newer snapshot simply replaces the old one.
//!
//! ### Backing ownership
//!
//! The viewer's pledge lives inside [`Personalization`] rather than next to
//! the project, so a project snapshot alone answers "is this user backing?":
//!
//! ```text
//! Project ──► Personalization ──► Option<Backing> ──► add_ons: Option<Vec<Reward>>
//! ```
//!
//! ### Output payload
//!
//! [`PledgeViewData`] is built fresh for every navigation decision and moved
//! to the presentation layer; nothing inside the engine keeps a handle to it.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type RewardId = u64;
pub type LocationId = u64;
pub type UserId = u64;

/// Id carried by the "pledge without a reward" tier.
pub const NO_REWARD_ID: RewardId = 0;

/// Funding state of a project.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectState {
    Submitted,
    Started,
    /// Campaign running; accepting pledges.
    Live,
    /// Goal reached and campaign over.
    Successful,
    Failed,
    Canceled,
    Suspended,
    Purged,
}

/// Viewer-specific data attached to a project snapshot.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Personalization {
    /// The viewer's existing pledge, `None` when not backing.
    #[serde(default)]
    pub backing: Option<Backing>,
    /// Whether the viewer watches the project.
    #[serde(default)]
    pub is_starred: bool,
}

/// Read-only project snapshot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: u64,
    pub name: String,
    pub creator_id: UserId,
    pub state: ProjectState,
    #[serde(default)]
    pub is_in_post_campaign_pledging_phase: bool,
    #[serde(default)]
    pub is_pledge_over_time_allowed: bool,
    /// Server-provided reward sequence.
    #[serde(default)]
    pub rewards: Vec<Reward>,
    #[serde(default)]
    pub personalization: Personalization,
}

impl Project {
    /// Look up a reward of this project by id.
    pub fn reward(&self, id: RewardId) -> Option<&Reward> {
        self.rewards.iter().find(|reward| reward.id == id)
    }

    /// The viewer's backing, if any.
    pub fn backing(&self) -> Option<&Backing> {
        self.personalization.backing.as_ref()
    }

    pub fn is_backed(&self) -> bool {
        self.personalization.backing.is_some()
    }

    /// The project's own "no reward" tier, if it lists one.
    pub fn no_reward(&self) -> Option<&Reward> {
        self.rewards.iter().find(|reward| reward.is_no_reward)
    }
}

/// How a reward reaches the backer.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShippingPreference {
    /// Nothing ships (digital or no physical item).
    #[default]
    None,
    /// Picked up at a single location.
    Local,
    /// Ships only to the locations listed in the expanded rules.
    Restricted,
    /// Ships anywhere.
    Unrestricted,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: LocationId,
    pub name: String,
    #[serde(default)]
    pub country: String,
}

/// A destination paired with its estimated shipping cost range.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShippingRule {
    pub location: Location,
    #[serde(default)]
    pub estimated_min: f64,
    #[serde(default)]
    pub estimated_max: f64,
}

/// A pledge tier.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Reward {
    pub id: RewardId,
    #[serde(default)]
    pub title: Option<String>,
    /// Minimum pledge amount in project currency.
    #[serde(default)]
    pub minimum: f64,
    #[serde(default)]
    pub is_available: bool,
    #[serde(default)]
    pub is_secret_reward: bool,
    #[serde(default)]
    pub is_no_reward: bool,
    #[serde(default)]
    pub shipping_preference: ShippingPreference,
    /// Every location this reward ships to, in server order.
    #[serde(default)]
    pub shipping_rules_expanded: Vec<ShippingRule>,
    /// Pickup location for local rewards.
    #[serde(default)]
    pub local_pickup: Option<Location>,
    #[serde(default)]
    pub has_add_ons: bool,
    #[serde(default)]
    pub starts_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub ends_at: Option<DateTime<Utc>>,
}

impl Reward {
    /// The "pledge without a reward" sentinel tier.
    pub fn no_reward() -> Self {
        Self {
            id: NO_REWARD_ID,
            title: None,
            minimum: 1.0,
            is_available: true,
            is_secret_reward: false,
            is_no_reward: true,
            shipping_preference: ShippingPreference::None,
            shipping_rules_expanded: Vec::new(),
            local_pickup: None,
            has_add_ons: false,
            starts_at: None,
            ends_at: None,
        }
    }

    pub fn is_restricted_shipping(&self) -> bool {
        self.shipping_preference == ShippingPreference::Restricted
    }

    pub fn is_unrestricted_shipping(&self) -> bool {
        self.shipping_preference == ShippingPreference::Unrestricted
    }

    /// Whether any expanded shipping rule targets `location_id`.
    pub fn ships_to(&self, location_id: LocationId) -> bool {
        self.shipping_rules_expanded
            .iter()
            .any(|rule| rule.location.id == location_id)
    }
}

/// Lifecycle status of a backing.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackingStatus {
    Canceled,
    Collected,
    Dropped,
    /// Zero-amount pledge created to open a pledge management cart.
    Dummy,
    Errored,
    Pledged,
    Preauth,
    AuthenticationRequired,
}

/// The viewer's existing pledge on a project.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Backing {
    pub id: u64,
    pub amount: f64,
    #[serde(default)]
    pub bonus_amount: f64,
    #[serde(default)]
    pub shipping_amount: Option<f64>,
    pub status: BackingStatus,
    #[serde(default)]
    pub reward_id: Option<RewardId>,
    #[serde(default)]
    pub reward: Option<Box<Reward>>,
    #[serde(default)]
    pub add_ons: Option<Vec<Reward>>,
    #[serde(default)]
    pub location_id: Option<LocationId>,
}

impl Backing {
    /// Id of the base reward this backing is attached to.
    pub fn current_reward_id(&self) -> Option<RewardId> {
        self.reward_id
            .or_else(|| self.reward.as_ref().map(|reward| reward.id))
    }

    /// `true` when the backing carries at least one add-on.
    pub fn has_add_ons(&self) -> bool {
        self.add_ons.as_ref().is_some_and(|add_ons| !add_ons.is_empty())
    }
}

/// Referral tag attributing the pledge to an entry point.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RefTag(pub String);

impl RefTag {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Which pledge screen variant the next step opens in.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PledgeContext {
    Pledge,
    LatePledge,
    UpdateReward,
    EditPledgeOverTime,
}

/// Configuration payload for the screen reached after a reward is chosen.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PledgeViewData {
    pub project: Project,
    pub rewards: Vec<Reward>,
    pub bonus_support: Option<f64>,
    pub selected_shipping_rule: Option<ShippingRule>,
    pub selected_quantities: BTreeMap<RewardId, u32>,
    /// Filled in later, during add-on selection.
    pub selected_location_id: Option<LocationId>,
    pub ref_tag: Option<RefTag>,
    pub context: PledgeContext,
}
