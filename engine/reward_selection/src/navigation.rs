//! Navigation decision for a tapped reward.
//!
//! | Backing has add-ons | Reward changed | Outcome                        |
//! |---------------------|----------------|--------------------------------|
//! | no                  | any            | navigate now                   |
//! | yes                 | no             | navigate now                   |
//! | yes                 | yes            | hold until the user confirms   |
//!
//! The destination only depends on the tapped reward: rewards offering
//! add-ons go through add-on selection first, the rest go straight to the
//! pledge screen.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, SelectionError};
use crate::types::{Backing, PledgeContext, PledgeViewData, Project, RefTag, Reward, ShippingRule};

/// Feature switches consulted while deciding.
pub trait FeatureFlags {
    fn post_campaign_pledging_enabled(&self) -> bool;
    fn edit_pledge_over_time_enabled(&self) -> bool;
}

/// Flags fixed at construction time.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct StaticFeatureFlags {
    #[serde(default)]
    pub post_campaign_pledging: bool,
    #[serde(default)]
    pub edit_pledge_over_time: bool,
}

impl FeatureFlags for StaticFeatureFlags {
    fn post_campaign_pledging_enabled(&self) -> bool {
        self.post_campaign_pledging
    }

    fn edit_pledge_over_time_enabled(&self) -> bool {
        self.edit_pledge_over_time
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Destination {
    AddOnSelection,
    DirectPledge,
}

/// Everything needed to move on from the reward list, captured at tap time.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NavigationDecision {
    pub destination: Destination,
    pub requires_confirmation: bool,
    pub pledge_context: PledgeContext,
    pub payload: PledgeViewData,
}

/// Pick the pledge screen variant.
pub fn pledge_context(
    project: &Project,
    backing: Option<&Backing>,
    flags: &dyn FeatureFlags,
) -> PledgeContext {
    if project.is_in_post_campaign_pledging_phase && flags.post_campaign_pledging_enabled() {
        return PledgeContext::LatePledge;
    }
    if backing.is_none() {
        return PledgeContext::Pledge;
    }
    if project.is_pledge_over_time_allowed && flags.edit_pledge_over_time_enabled() {
        PledgeContext::EditPledgeOverTime
    } else {
        PledgeContext::UpdateReward
    }
}

/// Switching base reward would drop add-ons the backer already picked.
pub fn requires_confirmation(backing: Option<&Backing>, reward: &Reward) -> bool {
    backing.is_some_and(|backing| {
        backing.has_add_ons() && backing.current_reward_id() != Some(reward.id)
    })
}

pub fn destination_for(reward: &Reward) -> Destination {
    if reward.has_add_ons {
        Destination::AddOnSelection
    } else {
        Destination::DirectPledge
    }
}

/// Decide where a tap on `reward` leads.
///
/// Fails with [`SelectionError::RewardNotFound`] when `reward` is not one of
/// `project`'s rewards.
pub fn decide(
    project: &Project,
    reward: &Reward,
    backing: Option<&Backing>,
    ref_tag: Option<&RefTag>,
    selected_shipping_rule: Option<&ShippingRule>,
    flags: &dyn FeatureFlags,
) -> Result<NavigationDecision> {
    if project.reward(reward.id).is_none() {
        return Err(SelectionError::RewardNotFound {
            project_id: project.id,
            reward_id: reward.id,
        });
    }

    let context = pledge_context(project, backing, flags);
    let requires_confirmation = requires_confirmation(backing, reward);
    let destination = destination_for(reward);

    debug!(
        project_id = project.id,
        reward_id = reward.id,
        ?context,
        ?destination,
        requires_confirmation,
        "navigation decided"
    );

    let payload = PledgeViewData {
        project: project.clone(),
        rewards: vec![reward.clone()],
        bonus_support: None,
        selected_shipping_rule: selected_shipping_rule.cloned(),
        selected_quantities: BTreeMap::from([(reward.id, 1)]),
        selected_location_id: None,
        ref_tag: ref_tag.cloned(),
        context,
    };

    Ok(NavigationDecision {
        destination,
        requires_confirmation,
        pledge_context: context,
        payload,
    })
}
