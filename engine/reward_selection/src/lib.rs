//! # Reward Selection Engine
//!
//! Turns a project snapshot, the viewer's shipping destination and their taps
//! into what the reward list screen shows and where it navigates next.
//!
//! | Stage        | Entry Point(s)                                           |
//! |--------------|----------------------------------------------------------|
//! | Classify     | [`classify()`]                                           |
//! | Order        | [`order`], [`order_project`]                             |
//! | Filter       | [`filter_by_location`], [`rewards_for_display`]          |
//! | Decide       | [`decide`], [`can_navigate_to_reward`]                   |
//! | Scroll       | [`resolve_scroll_index`]                                 |
//! | Session      | [`SelectionEngine`]                                      |
//!
//! ## Architecture
//!
//! Every stage is a pure function over immutable snapshots. [`SelectionEngine`]
//! keeps the latest value of each input and reruns the affected stages when
//! one changes, pushing results to a [`SelectionObserver`]. Feature switches,
//! copy and time come in through the [`FeatureFlags`], [`Localizer`] and
//! [`Clock`] seams.

pub mod availability;
pub mod classify;
pub mod copy;
pub mod engine;
pub mod error;
pub mod location;
pub mod navigation;
pub mod ordering;
pub mod scroll;
mod types;

#[cfg(test)]
mod test_engine;

pub use availability::{can_navigate_to_reward, Clock, FixedClock, SystemClock};
pub use classify::{classify, RewardClass};
pub use copy::{EnglishLocalizer, Localizer, ScreenContext, TextKey};
pub use engine::{
    NavigationEvent, RewardCardData, RewardListing, ScreenConfig, SelectionEngine,
    SelectionObserver,
};
pub use error::SelectionError;
pub use location::{filter_by_location, project_has_shippable_rewards, rewards_for_display};
pub use navigation::{
    decide, Destination, FeatureFlags, NavigationDecision, StaticFeatureFlags,
};
pub use ordering::{order, order_project};
pub use scroll::resolve_scroll_index;
pub use types::{
    Backing, BackingStatus, Location, LocationId, Personalization, PledgeContext,
    PledgeViewData, Project, ProjectState, RefTag, Reward, RewardId, ShippingPreference,
    ShippingRule, UserId, NO_REWARD_ID,
};
