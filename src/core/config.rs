use std::env;
use url::Url;

use crate::errors::SkillError;

pub const DEFAULT_USER_AGENT: &str = "App for /r/dadjokes Alexa skill.";
pub const DEFAULT_SUBREDDIT: &str = "dadjokes";
pub const DEFAULT_AUTH_URL: &str = "https://www.reddit.com/";
pub const DEFAULT_API_URL: &str = "https://oauth.reddit.com/";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub reddit_client_id: String,
    pub reddit_client_secret: String,
    pub reddit_refresh_token: String,
    pub reddit_user_agent: String,
    pub reddit_auth_url: Url,
    pub reddit_api_url: Url,
    pub subreddit: String,
    pub skill_id: Option<String>,
    pub request_max_age_secs: Option<u64>,
    pub reprompt_enabled: bool,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, SkillError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<L>(lookup: L) -> Result<Self, SkillError>
    where
        L: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let require = |key: &str| {
            get(key).ok_or_else(|| SkillError::ConfigError(format!("{key} is not set")))
        };

        let request_max_age_secs = match get("REQUEST_MAX_AGE_SECS") {
            Some(raw) => Some(raw.trim().parse::<u64>().map_err(|e| {
                SkillError::ConfigError(format!("REQUEST_MAX_AGE_SECS: {e}"))
            })?),
            None => None,
        };

        let reprompt_enabled = match get("REPROMPT_ENABLED") {
            Some(raw) => parse_flag(&raw).ok_or_else(|| {
                SkillError::ConfigError(format!("REPROMPT_ENABLED: invalid flag '{raw}'"))
            })?,
            None => false,
        };

        Ok(Self {
            reddit_client_id: require("REDDIT_CLIENT_ID")?,
            reddit_client_secret: require("REDDIT_CLIENT_SECRET")?,
            reddit_refresh_token: require("REDDIT_REFRESH_TOKEN")?,
            reddit_user_agent: get("REDDIT_USER_AGENT")
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            reddit_auth_url: base_url(get("REDDIT_AUTH_URL").as_deref().unwrap_or(DEFAULT_AUTH_URL))?,
            reddit_api_url: base_url(get("REDDIT_API_URL").as_deref().unwrap_or(DEFAULT_API_URL))?,
            subreddit: get("JOKE_SUBREDDIT").unwrap_or_else(|| DEFAULT_SUBREDDIT.to_string()),
            skill_id: get("ALEXA_SKILL_ID"),
            request_max_age_secs,
            reprompt_enabled,
        })
    }
}

// Url::join drops the last path segment unless the base ends with '/'
fn base_url(raw: &str) -> Result<Url, SkillError> {
    let trimmed = raw.trim();
    if trimmed.ends_with('/') {
        Ok(Url::parse(trimmed)?)
    } else {
        Ok(Url::parse(&format!("{trimmed}/"))?)
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
