use dadjokes::core::config::AppConfig;
use dadjokes::feed::RedditFeed;
use dadjokes::skill::{Skill, SkillOptions, handler};
use lambda_runtime::{Error, run, service_fn};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Error> {
    dadjokes::setup_logging();

    let config = AppConfig::from_env().map_err(|e| {
        error!("Config error: {}", e);
        Error::from(e)
    })?;
    let feed = RedditFeed::new(&config)?;
    let skill = Skill::new(feed, SkillOptions::from(&config));
    info!(
        subreddit = %config.subreddit,
        reprompt_enabled = config.reprompt_enabled,
        "Dad Jokes skill initialised"
    );

    let skill = &skill;
    run(service_fn(move |event| async move { handler(skill, event).await })).await
}
