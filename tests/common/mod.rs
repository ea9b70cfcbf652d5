#![allow(dead_code)]

use async_trait::async_trait;
use dadjokes::SkillError;
use dadjokes::core::models::RequestEnvelope;
use dadjokes::feed::{ContentItem, JokeFeed};
use serde_json::{Value, json};
use std::sync::atomic::{AtomicUsize, Ordering};

/// In-memory feed returning a fixed listing, or failing like the network would.
pub struct StaticFeed {
    listing: Option<Vec<ContentItem>>,
    calls: AtomicUsize,
}

impl StaticFeed {
    pub fn with(listing: Vec<ContentItem>) -> Self {
        Self {
            listing: Some(listing),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn single(title: &str, body: &str) -> Self {
        Self::with(vec![ContentItem::new(title, body)])
    }

    pub fn unavailable() -> Self {
        Self {
            listing: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl JokeFeed for StaticFeed {
    async fn hot_listing(&self) -> Result<Vec<ContentItem>, SkillError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.listing
            .clone()
            .ok_or_else(|| SkillError::FeedUnavailable("connection refused".to_string()))
    }
}

pub fn envelope(request: Value) -> RequestEnvelope {
    serde_json::from_value(json!({
        "version": "1.0",
        "session": {
            "new": true,
            "sessionId": "amzn1.echo-api.session.1",
            "application": {"applicationId": "amzn1.ask.skill.test"},
            "attributes": {"visits": 3}
        },
        "context": {
            "System": {"application": {"applicationId": "amzn1.ask.skill.test"}}
        },
        "request": request
    }))
    .expect("valid envelope")
}

pub fn launch() -> RequestEnvelope {
    envelope(json!({
        "type": "LaunchRequest",
        "requestId": "amzn1.echo-api.request.1",
        "timestamp": "2026-10-19T12:00:00Z",
        "locale": "en-US"
    }))
}

pub fn intent(name: &str) -> RequestEnvelope {
    envelope(json!({
        "type": "IntentRequest",
        "requestId": "amzn1.echo-api.request.2",
        "timestamp": "2026-10-19T12:00:00Z",
        "locale": "en-US",
        "intent": {"name": name, "confirmationStatus": "NONE"}
    }))
}

pub fn session_ended(reason: &str) -> RequestEnvelope {
    envelope(json!({
        "type": "SessionEndedRequest",
        "requestId": "amzn1.echo-api.request.3",
        "timestamp": "2026-10-19T12:00:00Z",
        "reason": reason
    }))
}
