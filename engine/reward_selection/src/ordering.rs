//! Reward ordering.
//!
//! Rewards are shown in four bands: the no-reward tier, secret rewards, the
//! regular available rewards, and finally unavailable ones. Inside a band the
//! server-provided order is kept.

use crate::classify::{classify, RewardClass};
use crate::types::{Project, Reward};

/// Stable four-band partition of `rewards`.
pub fn order(rewards: &[Reward]) -> Vec<Reward> {
    let mut no_reward = Vec::new();
    let mut secret = Vec::new();
    let mut available = Vec::new();
    let mut unavailable = Vec::new();

    for reward in rewards {
        let band = match classify(reward) {
            RewardClass::NoReward => &mut no_reward,
            RewardClass::Secret => &mut secret,
            RewardClass::Unavailable => &mut unavailable,
            _ => &mut available,
        };
        band.push(reward.clone());
    }

    no_reward.extend(secret);
    no_reward.extend(available);
    no_reward.extend(unavailable);
    no_reward
}

/// [`order`] applied to a project's own reward list.
pub fn order_project(project: &Project) -> Vec<Reward> {
    order(&project.rewards)
}
