use chrono::Duration;

use crate::availability::FixedClock;
use crate::copy::{Localizer, ScreenContext, TextKey};
use crate::engine::{NavigationEvent, RewardListing, ScreenConfig, SelectionEngine, SelectionObserver};
use crate::error::SelectionError;
use crate::fixtures::{backing, now, project, reward, shipping_rule, RewardBuilder, CREATOR_ID, PROJECT_ID};
use crate::navigation::{Destination, StaticFeatureFlags};
use crate::types::{PledgeContext, Project, ProjectState, RefTag, ShippingPreference};

#[derive(Default)]
struct Recorder {
    titles: Vec<String>,
    shipping_hidden: Vec<bool>,
    listings: Vec<RewardListing>,
    scrolls: Vec<usize>,
    prompts: Vec<(String, String)>,
    navigations: Vec<NavigationEvent>,
}

impl SelectionObserver for Recorder {
    fn title(&mut self, title: &str) {
        self.titles.push(title.to_string());
    }

    fn shipping_location_hidden(&mut self, hidden: bool) {
        self.shipping_hidden.push(hidden);
    }

    fn rewards_reloaded(&mut self, listing: &RewardListing) {
        self.listings.push(listing.clone());
    }

    fn scroll_to_reward(&mut self, index: usize) {
        self.scrolls.push(index);
    }

    fn confirmation_prompt(&mut self, title: &str, body: &str) {
        self.prompts.push((title.to_string(), body.to_string()));
    }

    fn navigate(&mut self, event: &NavigationEvent) {
        self.navigations.push(event.clone());
    }
}

fn engine() -> SelectionEngine<Recorder> {
    SelectionEngine::new(Recorder::default(), StaticFeatureFlags::default())
        .with_clock(FixedClock(now()))
}

fn config(project: Project) -> ScreenConfig {
    ScreenConfig {
        project,
        ref_tag: Some(RefTag::new("category")),
        context: ScreenContext::CreatePledge,
        secret_reward_token: None,
        viewer_id: None,
    }
}

/// No-reward, two restricted, one ship-anywhere, one unavailable.
fn shippable_project() -> Project {
    project(vec![
        RewardBuilder::new(4).unavailable().build(),
        RewardBuilder::new(1).restricted_to(&[10]).build(),
        RewardBuilder::new(2).restricted_to(&[20]).build(),
        RewardBuilder::new(3).shipping(ShippingPreference::Unrestricted).build(),
        RewardBuilder::new(0).no_reward().build(),
    ])
}

fn last_listing(engine: &SelectionEngine<Recorder>) -> Vec<u64> {
    engine.observer().listings.last().unwrap().reward_ids()
}

#[test]
fn test_configure_publishes_title_visibility_and_listing() {
    let mut engine = engine();
    engine.configure(config(shippable_project())).unwrap();

    let out = engine.observer();
    assert_eq!(out.titles, vec!["Back this project".to_string()]);
    assert_eq!(out.shipping_hidden, vec![false]);
    assert_eq!(out.listings.len(), 1);
    // Nothing selected yet: restricted rewards drop out.
    assert_eq!(last_listing(&engine), vec![0, 3, 4]);
    assert!(engine
        .observer()
        .listings[0]
        .cards
        .iter()
        .all(|card| card.context == PledgeContext::Pledge && card.shipping_rule.is_none()));
}

#[test]
fn test_shipping_rule_change_refilters_last_write_wins() {
    let mut engine = engine();
    engine.configure(config(shippable_project())).unwrap();

    engine.shipping_rule_selected(Some(shipping_rule(10))).unwrap();
    assert_eq!(last_listing(&engine), vec![0, 1, 3, 4]);

    engine.shipping_rule_selected(Some(shipping_rule(20))).unwrap();
    assert_eq!(last_listing(&engine), vec![0, 2, 3, 4]);
    let listing = engine.observer().listings.last().unwrap();
    assert_eq!(listing.count(), 4);
    assert!(listing
        .cards
        .iter()
        .all(|card| card.shipping_rule.as_ref().map(|r| r.location.id) == Some(20)));

    engine.shipping_rule_selected(None).unwrap();
    assert_eq!(last_listing(&engine), vec![0, 3, 4]);
}

#[test]
fn test_digital_only_project_hides_shipping_picker() {
    let mut engine = engine();
    engine.configure(config(project(vec![reward(1), reward(2)]))).unwrap();
    assert_eq!(engine.observer().shipping_hidden, vec![true]);
    assert_eq!(last_listing(&engine), vec![1, 2]);
}

#[test]
fn test_listing_skips_rewards_not_started() {
    let mut engine = engine();
    let p = project(vec![
        reward(1),
        RewardBuilder::new(2).starts_at(now() + Duration::days(2)).build(),
        RewardBuilder::new(3).starts_at(now() - Duration::days(2)).build(),
    ]);
    engine.configure(config(p)).unwrap();
    assert_eq!(last_listing(&engine), vec![1, 3]);
}

#[test]
fn test_tap_without_backing_navigates_immediately() {
    let mut engine = engine();
    engine.configure(config(shippable_project())).unwrap();
    engine.shipping_rule_selected(Some(shipping_rule(10))).unwrap();

    engine.reward_selected(1).unwrap();

    let out = engine.observer();
    assert!(out.prompts.is_empty());
    assert_eq!(out.navigations.len(), 1);
    let nav = &out.navigations[0];
    assert_eq!(nav.destination, Destination::DirectPledge);
    assert_eq!(nav.payload.context, PledgeContext::Pledge);
    assert_eq!(nav.payload.rewards[0].id, 1);
    assert_eq!(
        nav.payload.selected_shipping_rule.as_ref().map(|r| r.location.id),
        Some(10)
    );
    assert_eq!(nav.payload.ref_tag, Some(RefTag::new("category")));
    assert_eq!(engine.selected_reward().map(|r| r.id), Some(1));
}

#[test]
fn test_tap_with_add_ons_goes_to_add_on_selection() {
    let mut engine = engine();
    let p = project(vec![RewardBuilder::new(5).with_add_ons().build()]);
    engine.configure(config(p)).unwrap();

    engine.reward_selected(5).unwrap();
    assert_eq!(
        engine.observer().navigations[0].destination,
        Destination::AddOnSelection
    );
}

fn backed_with_add_ons() -> Project {
    let mut p = project(vec![
        reward(7),
        RewardBuilder::new(9).with_add_ons().build(),
        reward(11),
    ]);
    p.personalization.backing = Some(backing(7, vec![reward(100)]));
    p
}

#[test]
fn test_switching_backed_reward_waits_for_confirmation() {
    let mut engine = engine();
    engine.configure(config(backed_with_add_ons())).unwrap();

    engine.reward_selected(9).unwrap();
    assert!(engine.observer().navigations.is_empty());
    assert_eq!(
        engine.observer().prompts,
        vec![(
            "Continue with this reward?".to_string(),
            "It may not offer some or all of your add-ons.".to_string()
        )]
    );
    assert!(engine.has_pending_confirmation());

    engine.confirmed_edit_reward().unwrap();
    let out = engine.observer();
    assert_eq!(out.navigations.len(), 1);
    assert_eq!(out.navigations[0].destination, Destination::AddOnSelection);
    assert_eq!(out.navigations[0].payload.context, PledgeContext::UpdateReward);
    assert!(!engine.has_pending_confirmation());

    // Confirmation is consumed.
    engine.confirmed_edit_reward().unwrap();
    assert_eq!(engine.observer().navigations.len(), 1);
}

#[test]
fn test_confirmed_decision_keeps_values_from_tap_time() {
    let mut engine = engine();
    engine.configure(config(backed_with_add_ons())).unwrap();
    engine.shipping_rule_selected(Some(shipping_rule(10))).unwrap();

    engine.reward_selected(11).unwrap();
    engine.shipping_rule_selected(Some(shipping_rule(20))).unwrap();
    engine.confirmed_edit_reward().unwrap();

    let nav = &engine.observer().navigations[0];
    assert_eq!(nav.destination, Destination::DirectPledge);
    assert_eq!(
        nav.payload.selected_shipping_rule.as_ref().map(|r| r.location.id),
        Some(10)
    );
}

#[test]
fn test_second_tap_replaces_pending_decision() {
    let mut engine = engine();
    engine.configure(config(backed_with_add_ons())).unwrap();

    engine.reward_selected(9).unwrap();
    engine.reward_selected(11).unwrap();
    assert_eq!(engine.observer().prompts.len(), 2);

    engine.confirmed_edit_reward().unwrap();
    let out = engine.observer();
    assert_eq!(out.navigations.len(), 1);
    assert_eq!(out.navigations[0].payload.rewards[0].id, 11);
}

#[test]
fn test_tap_on_non_navigable_reward_discards_pending() {
    let mut engine = engine();
    engine.configure(config(backed_with_add_ons())).unwrap();

    engine.reward_selected(9).unwrap();
    // Backed reward without add-ons: nothing to edit.
    engine.reward_selected(7).unwrap();
    assert!(!engine.has_pending_confirmation());
    assert_eq!(engine.selected_reward().map(|r| r.id), Some(7));

    engine.confirmed_edit_reward().unwrap();
    assert!(engine.observer().navigations.is_empty());
}

#[test]
fn test_creator_taps_are_ignored() {
    let mut engine = engine();
    let mut cfg = config(project(vec![reward(1)]));
    cfg.viewer_id = Some(CREATOR_ID);
    engine.configure(cfg).unwrap();

    assert_eq!(engine.observer().titles, vec!["View your rewards".to_string()]);
    engine.reward_selected(1).unwrap();
    assert!(engine.observer().navigations.is_empty());
    assert_eq!(engine.selected_reward().map(|r| r.id), Some(1));
}

#[test]
fn test_unknown_reward_tap_is_an_error() {
    let mut engine = engine();
    engine.configure(config(project(vec![reward(1)]))).unwrap();

    let err = engine.reward_selected(77).unwrap_err();
    assert_eq!(
        err,
        SelectionError::RewardNotFound {
            project_id: PROJECT_ID,
            reward_id: 77
        }
    );
    assert!(engine.selected_reward().is_none());
}

#[test]
fn test_inputs_before_configure_fail() {
    let mut engine = engine();
    assert_eq!(engine.reward_selected(1), Err(SelectionError::NotConfigured));
    assert_eq!(engine.shipping_rule_selected(None), Err(SelectionError::NotConfigured));
    assert_eq!(engine.layout_completed(), Err(SelectionError::NotConfigured));
    assert_eq!(
        engine.project_updated(shippable_project()),
        Err(SelectionError::NotConfigured)
    );
}

#[test]
fn test_scroll_target_published_once() {
    let mut engine = engine();
    let mut p = project(vec![RewardBuilder::new(0).no_reward().build(), reward(3), reward(7)]);
    p.personalization.backing = Some(backing(7, vec![]));
    engine.configure(config(p)).unwrap();

    engine.layout_completed().unwrap();
    engine.layout_completed().unwrap();
    assert_eq!(engine.observer().scrolls, vec![2]);
}

#[test]
fn test_scroll_waits_for_a_hit() {
    let mut engine = engine();
    let mut p = project(vec![reward(1), RewardBuilder::new(7).restricted_to(&[10]).build()]);
    p.personalization.backing = Some(backing(7, vec![]));
    engine.configure(config(p)).unwrap();

    // Backed reward hidden until its destination is chosen.
    engine.layout_completed().unwrap();
    assert!(engine.observer().scrolls.is_empty());

    engine.shipping_rule_selected(Some(shipping_rule(10))).unwrap();
    engine.layout_completed().unwrap();
    assert_eq!(engine.observer().scrolls, vec![1]);
}

#[test]
fn test_secret_token_scrolls_to_secret_reward() {
    let mut engine = engine();
    let mut cfg = config(project(vec![
        reward(1),
        RewardBuilder::new(0).no_reward().build(),
        RewardBuilder::new(5).secret().build(),
    ]));
    cfg.secret_reward_token = Some("abc".into());
    engine.configure(cfg).unwrap();

    engine.layout_completed().unwrap();
    assert_eq!(engine.observer().scrolls, vec![1]);
}

#[test]
fn test_nothing_fires_after_teardown() {
    let mut engine = engine();
    engine.configure(config(backed_with_add_ons())).unwrap();
    engine.reward_selected(9).unwrap();

    engine.teardown();
    assert!(engine.is_closed());
    assert!(!engine.has_pending_confirmation());
    assert_eq!(engine.confirmed_edit_reward(), Err(SelectionError::SessionClosed));
    assert_eq!(engine.reward_selected(11), Err(SelectionError::SessionClosed));
    assert_eq!(
        engine.configure(config(backed_with_add_ons())),
        Err(SelectionError::SessionClosed)
    );

    let out = engine.into_observer();
    assert!(out.navigations.is_empty());
    assert_eq!(out.listings.len(), 1);
}

#[test]
fn test_manage_pledge_title() {
    let mut engine = engine();
    let mut cfg = config(backed_with_add_ons());
    cfg.context = ScreenContext::ManagePledge;
    engine.configure(cfg).unwrap();
    assert_eq!(engine.observer().titles, vec!["Edit reward".to_string()]);
}

#[test]
fn test_reconfigure_keeps_latest_shipping_rule() {
    let mut engine = engine();
    engine.configure(config(shippable_project())).unwrap();
    engine.shipping_rule_selected(Some(shipping_rule(10))).unwrap();
    assert_eq!(last_listing(&engine), vec![0, 1, 3, 4]);

    engine.configure(config(shippable_project())).unwrap();
    assert_eq!(last_listing(&engine), vec![0, 1, 3, 4]);

    engine.reward_selected(1).unwrap();
    let nav = &engine.observer().navigations[0];
    assert_eq!(
        nav.payload.selected_shipping_rule.as_ref().map(|r| r.location.id),
        Some(10)
    );
}

#[test]
fn test_project_refresh_filters_with_latest_shipping_rule() {
    let mut engine = engine();
    engine.configure(config(shippable_project())).unwrap();
    engine.shipping_rule_selected(Some(shipping_rule(10))).unwrap();

    let mut refreshed = shippable_project();
    refreshed.rewards.push(RewardBuilder::new(5).restricted_to(&[10]).build());
    engine.project_updated(refreshed).unwrap();

    assert_eq!(engine.observer().listings.len(), 3);
    assert_eq!(last_listing(&engine), vec![0, 1, 3, 5, 4]);
    assert!(engine
        .observer()
        .listings
        .last()
        .unwrap()
        .cards
        .iter()
        .all(|card| card.shipping_rule.as_ref().map(|r| r.location.id) == Some(10)));

    engine.reward_selected(5).unwrap();
    let nav = &engine.observer().navigations[0];
    assert_eq!(nav.payload.rewards[0].id, 5);
    assert_eq!(
        nav.payload.selected_shipping_rule.as_ref().map(|r| r.location.id),
        Some(10)
    );
}

#[test]
fn test_project_refresh_republishes_title_and_picker() {
    let mut engine = engine();
    engine.configure(config(shippable_project())).unwrap();

    let mut ended = project(vec![reward(1)]);
    ended.state = ProjectState::Successful;
    engine.project_updated(ended).unwrap();

    let out = engine.observer();
    assert_eq!(
        out.titles,
        vec!["Back this project".to_string(), "View rewards".to_string()]
    );
    assert_eq!(out.shipping_hidden, vec![false, true]);
    assert_eq!(last_listing(&engine), vec![1]);
}

#[test]
fn test_project_refresh_keeps_pending_decision() {
    let mut engine = engine();
    engine.configure(config(backed_with_add_ons())).unwrap();
    engine.reward_selected(9).unwrap();
    assert!(engine.has_pending_confirmation());

    let mut refreshed = backed_with_add_ons();
    refreshed.rewards.retain(|reward| reward.id != 11);
    engine.project_updated(refreshed).unwrap();

    assert!(engine.has_pending_confirmation());
    assert_eq!(engine.selected_reward().map(|r| r.id), Some(9));
    assert_eq!(last_listing(&engine), vec![7, 9]);
    assert!(engine.observer().navigations.is_empty());

    engine.confirmed_edit_reward().unwrap();
    let out = engine.observer();
    assert_eq!(out.navigations.len(), 1);
    assert_eq!(out.navigations[0].payload.rewards[0].id, 9);
    assert_eq!(out.navigations[0].payload.project.rewards.len(), 3);
}

#[test]
fn test_reconfigure_drops_pending_decision() {
    let mut engine = engine();
    engine.configure(config(backed_with_add_ons())).unwrap();
    engine.reward_selected(9).unwrap();

    engine.configure(config(backed_with_add_ons())).unwrap();
    assert!(!engine.has_pending_confirmation());
    assert!(engine.selected_reward().is_none());

    engine.confirmed_edit_reward().unwrap();
    assert!(engine.observer().navigations.is_empty());
}

struct KeyNames;

impl Localizer for KeyNames {
    fn text(&self, key: TextKey) -> String {
        format!("{key:?}")
    }
}

#[test]
fn test_localizer_supplies_title_and_prompt() {
    let mut engine = SelectionEngine::new(Recorder::default(), StaticFeatureFlags::default())
        .with_clock(FixedClock(now()))
        .with_localizer(KeyNames);
    engine.configure(config(backed_with_add_ons())).unwrap();
    engine.reward_selected(9).unwrap();

    let out = engine.observer();
    assert_eq!(out.titles, vec!["BackThisProject".to_string()]);
    assert_eq!(
        out.prompts,
        vec![(
            "ContinueWithThisReward".to_string(),
            "AddOnsMayNotBeOffered".to_string()
        )]
    );
}
