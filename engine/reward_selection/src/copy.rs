//! Screen titles and prompt copy.
//!
//! The engine only picks a [`TextKey`]; turning it into words is the host's
//! job through [`Localizer`].

use serde::{Deserialize, Serialize};

use crate::types::{Project, ProjectState, UserId};

/// Why the reward list was opened.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScreenContext {
    #[default]
    CreatePledge,
    ManagePledge,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextKey {
    ViewYourRewards,
    ViewRewards,
    BackThisProject,
    EditReward,
    ContinueWithThisReward,
    AddOnsMayNotBeOffered,
}

pub trait Localizer {
    fn text(&self, key: TextKey) -> String;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct EnglishLocalizer;

impl Localizer for EnglishLocalizer {
    fn text(&self, key: TextKey) -> String {
        match key {
            TextKey::ViewYourRewards => "View your rewards",
            TextKey::ViewRewards => "View rewards",
            TextKey::BackThisProject => "Back this project",
            TextKey::EditReward => "Edit reward",
            TextKey::ContinueWithThisReward => "Continue with this reward?",
            TextKey::AddOnsMayNotBeOffered => {
                "It may not offer some or all of your add-ons."
            }
        }
        .to_string()
    }
}

/// Title of the reward list screen.
pub fn title_for(context: ScreenContext, project: &Project, viewer: Option<UserId>) -> TextKey {
    if viewer == Some(project.creator_id) {
        return TextKey::ViewYourRewards;
    }
    if project.state != ProjectState::Live {
        return TextKey::ViewRewards;
    }
    match context {
        ScreenContext::CreatePledge => TextKey::BackThisProject,
        ScreenContext::ManagePledge => TextKey::EditReward,
    }
}

/// Title and body keys of the "switching reward drops add-ons" prompt.
pub fn edit_reward_prompt() -> (TextKey, TextKey) {
    (TextKey::ContinueWithThisReward, TextKey::AddOnsMayNotBeOffered)
}
