//! Reward availability windows and navigation eligibility.

use chrono::{DateTime, Utc};

use crate::navigation::FeatureFlags;
use crate::scroll::backed_reward;
use crate::types::{Project, ProjectState, Reward, UserId};

/// Source of the current time.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to one instant.
#[derive(Clone, Copy, Debug)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// The reward's start date, if any, is not in the future.
pub fn has_started(reward: &Reward, now: DateTime<Utc>) -> bool {
    reward.starts_at.map_or(true, |starts_at| starts_at <= now)
}

/// The reward had an end date and it has passed.
pub fn has_ended(reward: &Reward, now: DateTime<Utc>) -> bool {
    reward.ends_at.is_some_and(|ends_at| ends_at <= now)
}

/// Available flag set and the end date not reached.
pub fn is_reward_available(reward: &Reward, now: DateTime<Utc>) -> bool {
    reward.is_available && !has_ended(reward, now)
}

/// Whether tapping `reward` may lead anywhere for this viewer.
///
/// Creators never pledge to their own project. Otherwise the project has to
/// be live (successful while in the post-campaign phase), and the reward must
/// either be open to a new choice or be the backed reward with add-ons to edit.
pub fn can_navigate_to_reward(
    project: &Project,
    reward: &Reward,
    viewer: Option<UserId>,
    flags: &dyn FeatureFlags,
    now: DateTime<Utc>,
) -> bool {
    if viewer == Some(project.creator_id) {
        return false;
    }

    let is_backed_reward = project
        .backing()
        .is_some_and(|backing| backed_reward(project, backing).id == reward.id);

    let open_for_new_choice = is_reward_available(reward, now) && !is_backed_reward;
    let editable_backed_reward = is_backed_reward && reward.has_add_ons;

    let accepting_pledges =
        if flags.post_campaign_pledging_enabled() && project.is_in_post_campaign_pledging_phase {
            project.state == ProjectState::Successful
        } else {
            project.state == ProjectState::Live
        };

    accepting_pledges && (open_for_new_choice || editable_backed_reward)
}
