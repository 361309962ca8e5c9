//! Reward classification.
//!
//! [`classify`] assigns every reward exactly one [`RewardClass`]. The checks
//! run in a fixed precedence, so a reward that is both the no-reward tier and
//! unavailable is still [`RewardClass::NoReward`].

use serde::Serialize;

use crate::types::{Reward, ShippingPreference};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RewardClass {
    NoReward,
    Secret,
    Unavailable,
    Digital,
    LocalPickup,
    UnrestrictedShipping,
    RestrictedShipping,
    Standard,
}

/// Classify a single reward. First matching rule wins.
pub fn classify(reward: &Reward) -> RewardClass {
    if reward.is_no_reward {
        return RewardClass::NoReward;
    }
    if !reward.is_available {
        return RewardClass::Unavailable;
    }
    if reward.is_secret_reward {
        return RewardClass::Secret;
    }
    if is_digital(reward) {
        return RewardClass::Digital;
    }

    match reward.shipping_preference {
        ShippingPreference::Local => RewardClass::LocalPickup,
        ShippingPreference::Unrestricted => RewardClass::UnrestrictedShipping,
        ShippingPreference::Restricted => RewardClass::RestrictedShipping,
        ShippingPreference::None => RewardClass::Standard,
    }
}

/// Nothing ships and there is no pickup location.
///
/// Looks at shipping data only; availability and audience flags are ignored.
pub fn is_digital(reward: &Reward) -> bool {
    reward.shipping_preference == ShippingPreference::None && reward.local_pickup.is_none()
}

/// Shipping data says the backer collects the reward in person.
pub fn is_local_pickup(reward: &Reward) -> bool {
    reward.shipping_preference == ShippingPreference::Local
}
