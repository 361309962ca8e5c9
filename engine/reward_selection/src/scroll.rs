//! Initial scroll target.

use crate::classify::{classify, RewardClass};
use crate::types::{Backing, Project, Reward, NO_REWARD_ID};

/// Index of the reward to bring into view when the list first appears.
///
/// A non-empty secret reward token points at the first secret reward.
/// Otherwise a backer lands on the reward they backed.
pub fn resolve_scroll_index(
    project: &Project,
    rewards: &[Reward],
    secret_reward_token: Option<&str>,
) -> Option<usize> {
    if secret_reward_token.is_some_and(|token| !token.is_empty()) {
        return rewards
            .iter()
            .position(|reward| classify(reward) == RewardClass::Secret);
    }

    let backing = project.backing()?;
    let backed_id = backed_reward(project, backing).id;
    rewards.iter().position(|reward| reward.id == backed_id)
}

/// The reward a backing points at, or the no-reward tier when it points at
/// nothing the project lists.
pub fn backed_reward(project: &Project, backing: &Backing) -> Reward {
    backing
        .current_reward_id()
        .and_then(|id| project.reward(id))
        .or_else(|| project.no_reward())
        .cloned()
        .unwrap_or_else(Reward::no_reward)
}
