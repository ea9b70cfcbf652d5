//! The skill: request verification, routing and dispatch to handler actions.

pub mod handler;
pub mod handlers;
pub mod response_builder;
pub mod router;
pub mod verification;

use chrono::Utc;
use tracing::{error, info};

use crate::core::config::AppConfig;
use crate::core::models::{Request, RequestEnvelope, ResponseEnvelope};
use crate::errors::SkillError;
use crate::feed::JokeFeed;

pub use handler::handler;
pub use response_builder::{ResponseBuilder, ResponsePayload};
pub use router::{ErrorHandlerEntry, HandlerEntry, HandlerKind, Router};

/// Options that shape routing and responses, fixed at startup.
#[derive(Debug, Clone, Default)]
pub struct SkillOptions {
    pub skill_id: Option<String>,
    pub request_max_age_secs: Option<u64>,
    pub reprompt_enabled: bool,
}

impl From<&AppConfig> for SkillOptions {
    fn from(config: &AppConfig) -> Self {
        Self {
            skill_id: config.skill_id.clone(),
            request_max_age_secs: config.request_max_age_secs,
            reprompt_enabled: config.reprompt_enabled,
        }
    }
}

/// Built once per process and shared read-only across invocations.
pub struct Skill<F> {
    feed: F,
    router: Router,
    options: SkillOptions,
}

impl<F: JokeFeed> Skill<F> {
    pub fn new(feed: F, options: SkillOptions) -> Self {
        let router = Router::new(options.reprompt_enabled);
        Self::with_router(feed, router, options)
    }

    pub fn with_router(feed: F, router: Router, options: SkillOptions) -> Self {
        Self {
            feed,
            router,
            options,
        }
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    /// Handles one inbound envelope.
    ///
    /// Handler failures are answered by the router's fallback error handler,
    /// so the errors returned here are verification rejections and, with a
    /// non-matching custom fallback, [`SkillError::Unroutable`].
    pub async fn handle(&self, envelope: RequestEnvelope) -> Result<ResponseEnvelope, SkillError> {
        verification::verify_skill_id(&envelope, self.options.skill_id.as_deref())?;
        verification::verify_timestamp(&envelope, self.options.request_max_age_secs, Utc::now())?;

        let payload = match self.dispatch(&envelope.request).await {
            Ok(payload) => payload,
            Err(e) => self.router.recover(&envelope.request, &e)?,
        };

        Ok(payload.into_envelope(envelope.session_attributes()))
    }

    /// Routes `request` and runs the selected action.
    pub async fn dispatch(&self, request: &Request) -> Result<ResponsePayload, SkillError> {
        let kind = self.router.route(request).inspect_err(|e| {
            error!("Routing failed: {}", e);
        })?;
        info!(handler = ?kind, request_type = request.type_name(), "Routing request");

        match kind {
            HandlerKind::GetJoke => {
                handlers::get_joke(&self.feed, self.options.reprompt_enabled).await
            }
            HandlerKind::Help => Ok(handlers::help()),
            HandlerKind::CancelStopNo => Ok(handlers::cancel()),
            HandlerKind::SessionEnded => Ok(handlers::session_ended(request)),
        }
    }
}
