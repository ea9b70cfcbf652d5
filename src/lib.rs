//! Dad Jokes - a voice assistant skill that tells jokes from Reddit's /r/dadjokes.
//!
//! The skill runs as a single AWS Lambda function behind the voice platform:
//! 1. The inbound request envelope is verified and routed through an ordered
//!    list of handler entries (first match wins)
//! 2. Joke requests fetch the subreddit's hot listing, pick one post uniformly
//!    at random and speak it with a matching card
//! 3. Any failure in a handler is answered by a fixed error joke that keeps
//!    the session open
//!
//! # Architecture
//!
//! The system uses:
//! - AWS Lambda (`lambda_runtime`) for serverless execution
//! - reqwest for the Reddit OAuth and listing calls
//! - tracing with JSON output for `CloudWatch` Logs
//! - Tokio for async runtime
//!
//! # Example
//!
//! ```no_run
//! use dadjokes::core::config::AppConfig;
//! use dadjokes::feed::{RedditFeed, fetch_joke};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     dadjokes::setup_logging();
//!
//!     let config = AppConfig::from_env()?;
//!     let feed = RedditFeed::new(&config)?;
//!
//!     let joke = fetch_joke(&feed).await?;
//!     println!("{joke}");
//!
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod errors;
pub mod feed;
pub mod skill;

pub use errors::SkillError;
pub use skill::{Skill, SkillOptions};

/// Configure structured logging with JSON format for AWS Lambda environments.
///
/// Sets up tracing-subscriber with a JSON formatter suitable for `CloudWatch`
/// Logs. Call it once at process start; later calls are no-ops.
///
/// # Example
///
/// ```
/// dadjokes::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::prelude::*;
    let fmt_layer = tracing_subscriber::fmt::layer().json().with_target(true);

    let _ = tracing_subscriber::registry().with(fmt_layer).try_init();
}
