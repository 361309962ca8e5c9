//! Location filtering.
//!
//! Once a shipping destination is chosen, restricted-shipping rewards that do
//! not ship there are hidden. Everything that does not depend on a destination
//! (digital, local pickup, ship-anywhere) stays, as does the first tile.

use crate::classify::{is_digital, is_local_pickup};
use crate::types::{Project, Reward, ShippingRule};

/// Keep the rewards eligible for `selected` in input order.
pub fn filter_by_location(rewards: &[Reward], selected: Option<&ShippingRule>) -> Vec<Reward> {
    let first_id = rewards.first().map(|reward| reward.id);
    let location_id = selected.map(|rule| rule.location.id);

    rewards
        .iter()
        .filter(|reward| {
            if Some(reward.id) == first_id
                || is_digital(reward)
                || is_local_pickup(reward)
                || reward.is_unrestricted_shipping()
            {
                return true;
            }
            reward.is_restricted_shipping()
                && location_id.is_some_and(|id| reward.ships_to(id))
        })
        .cloned()
        .collect()
}

/// Rewards to present for a destination, with the empty-result fallback applied.
#[derive(Clone, Debug, PartialEq)]
pub struct LocationView {
    pub rewards: Vec<Reward>,
    /// `false` when the filter came back empty and the ordered list is shown.
    pub filtered: bool,
}

/// Filter `ordered` by `selected`, falling back to `ordered` itself when the
/// filter leaves nothing to show.
pub fn rewards_for_display(ordered: &[Reward], selected: Option<&ShippingRule>) -> LocationView {
    let filtered = filter_by_location(ordered, selected);
    if filtered.is_empty() {
        return LocationView {
            rewards: ordered.to_vec(),
            filtered: false,
        };
    }
    LocationView {
        rewards: filtered,
        filtered: true,
    }
}

/// Whether any reward ships, i.e. a destination picker is worth showing.
pub fn project_has_shippable_rewards(project: &Project) -> bool {
    project
        .rewards
        .iter()
        .any(|reward| reward.is_restricted_shipping() || reward.is_unrestricted_shipping())
}
