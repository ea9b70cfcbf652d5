//! Joke content: listing fetch, random selection and spoken formatting.

pub mod reddit;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use rand::Rng;
use regex::Regex;
use tracing::info;

use crate::errors::SkillError;

pub use reddit::RedditFeed;

static TERMINAL_PUNCTUATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.!?,;:]$").expect("static regex compile"));

/// One post from the feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentItem {
    pub title: String,
    pub body: String,
}

impl ContentItem {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }
}

/// Source of the "currently popular" listing for the joke category.
#[async_trait]
pub trait JokeFeed: Send + Sync {
    async fn hot_listing(&self) -> Result<Vec<ContentItem>, SkillError>;
}

/// Uniform index over `[0, len)`.
///
/// # Errors
///
/// Returns [`SkillError::EmptyListing`] when `len` is zero.
pub fn pick_index<R: Rng + ?Sized>(len: usize, rng: &mut R) -> Result<usize, SkillError> {
    if len == 0 {
        return Err(SkillError::EmptyListing);
    }
    Ok(rng.random_range(0..len))
}

/// Formats an item as `"{title} {body}"`, terminating the title with `.`
/// unless it already ends in punctuation.
///
/// An empty body leaves a trailing space after the title.
#[must_use]
pub fn format_joke(item: &ContentItem) -> String {
    let mut title = item.title.trim().to_string();
    if !TERMINAL_PUNCTUATION.is_match(&title) {
        title.push('.');
    }
    format!("{} {}", title, item.body.trim())
}

/// Picks one item from `listing` and formats it.
///
/// # Errors
///
/// Returns [`SkillError::EmptyListing`] for an empty listing.
pub fn select_joke<R: Rng + ?Sized>(
    listing: &[ContentItem],
    rng: &mut R,
) -> Result<String, SkillError> {
    let index = pick_index(listing.len(), rng)?;
    Ok(format_joke(&listing[index]))
}

/// Fetches a fresh listing and returns one formatted joke from it.
///
/// # Errors
///
/// Propagates [`SkillError::FeedUnavailable`] from the feed and
/// [`SkillError::EmptyListing`] when the listing has no items.
pub async fn fetch_joke(feed: &dyn JokeFeed) -> Result<String, SkillError> {
    let listing = feed.hot_listing().await?;
    info!(listing_len = listing.len(), "Fetched joke listing");

    let mut rng = rand::rng();
    select_joke(&listing, &mut rng)
}
