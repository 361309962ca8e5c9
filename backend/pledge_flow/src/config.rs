//! Application configuration loaded from environment variables.

use reward_selection::{StaticFeatureFlags, UserId};

use crate::errors::{HostError, Result};

#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the JSON scenario to replay
    pub scenario_path: String,
    /// Post-campaign pledging feature switch
    pub post_campaign_pledge: bool,
    /// Pledge-over-time edit feature switch
    pub edit_pledge_over_time: bool,
    /// Delay (in milliseconds) between replayed inputs
    pub event_interval_ms: u64,
    /// Signed-in user, if any
    pub viewer_id: Option<UserId>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Config {
            scenario_path: env_var("SCENARIO_PATH").map_err(|_| {
                HostError::Config("SCENARIO_PATH environment variable is required".to_string())
            })?,
            post_campaign_pledge: parse_flag(
                "FEATURE_POST_CAMPAIGN_PLEDGE",
                env_var("FEATURE_POST_CAMPAIGN_PLEDGE").ok().as_deref(),
            )?,
            edit_pledge_over_time: parse_flag(
                "FEATURE_EDIT_PLEDGE_OVER_TIME",
                env_var("FEATURE_EDIT_PLEDGE_OVER_TIME").ok().as_deref(),
            )?,
            event_interval_ms: env_var("EVENT_INTERVAL_MS")
                .unwrap_or_else(|_| "0".to_string())
                .parse()
                .map_err(|_| HostError::Config("Invalid EVENT_INTERVAL_MS".to_string()))?,
            viewer_id: env_var("VIEWER_ID")
                .ok()
                .map(|raw| {
                    raw.parse()
                        .map_err(|_| HostError::Config("Invalid VIEWER_ID".to_string()))
                })
                .transpose()?,
        })
    }

    pub fn feature_flags(&self) -> StaticFeatureFlags {
        StaticFeatureFlags {
            post_campaign_pledging: self.post_campaign_pledge,
            edit_pledge_over_time: self.edit_pledge_over_time,
        }
    }
}

fn env_var(key: &str) -> Result<String> {
    std::env::var(key).map_err(|_| HostError::Config(format!("Missing env var: {key}")))
}

/// Unset means off; `1/0`, `true/false`, `on/off` are accepted.
fn parse_flag(key: &str, raw: Option<&str>) -> Result<bool> {
    let Some(raw) = raw else {
        return Ok(false);
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Ok(true),
        "0" | "false" | "off" | "no" | "" => Ok(false),
        _ => Err(HostError::Config(format!("Invalid {key}: {raw}"))),
    }
}
