//! Handler actions, one per [`HandlerKind`], plus the catch-all error handler.

use tracing::{error, info};

use super::response_builder::{ResponseBuilder, ResponsePayload, escape_ssml};
use super::router::ErrorHandlerEntry;
use crate::core::models::Request;
use crate::errors::{SkillError, error_chain};
use crate::feed::{JokeFeed, fetch_joke};

pub const SKILL_NAME: &str = "Reddit Dad Jokes";
pub const HELP_TEXT: &str = "To hear a joke, ask reddit Dad Jokes for a joke.";
pub const ERROR_JOKE: &str = "I applied to be a server years ago. To this day, I'm still waiting.";
pub const ANOTHER_JOKE_PROMPT: &str = "Would you like to hear another joke?";
pub const PAUSE_MARKER: &str = "<break time=\"1s\"/>";

/// Fetches a joke and speaks it with a matching card.
///
/// With `reprompt_enabled` the speech is followed by a pause and an offer of
/// another joke and the session stays open; otherwise the session ends.
///
/// # Errors
///
/// Propagates feed failures; they are not recovered here.
pub async fn get_joke(
    feed: &dyn JokeFeed,
    reprompt_enabled: bool,
) -> Result<ResponsePayload, SkillError> {
    let joke = fetch_joke(feed).await?;
    let spoken = escape_ssml(&joke);

    let builder = ResponseBuilder::new().with_simple_card(SKILL_NAME, joke);
    let payload = if reprompt_enabled {
        builder
            .speak(format!("{spoken} {PAUSE_MARKER} {ANOTHER_JOKE_PROMPT}"))
            .reprompt(ANOTHER_JOKE_PROMPT)
            .build()
    } else {
        builder.speak(spoken).with_should_end_session(true).build()
    };

    Ok(payload)
}

#[must_use]
pub fn help() -> ResponsePayload {
    ResponseBuilder::new().speak(HELP_TEXT).build()
}

/// Cancel, stop and no all end the interaction silently.
#[must_use]
pub fn cancel() -> ResponsePayload {
    ResponsePayload::empty()
}

#[must_use]
pub fn session_ended(request: &Request) -> ResponsePayload {
    if let Request::SessionEndedRequest { reason, error, .. } = request {
        let reason = reason.as_deref().unwrap_or("UNKNOWN");
        match error {
            Some(e) => info!(
                reason,
                error_type = e.kind.as_deref().unwrap_or(""),
                error_message = e.message.as_deref().unwrap_or(""),
                "Session ended with reason: {reason}"
            ),
            None => info!(reason, "Session ended with reason: {reason}"),
        }
    }
    ResponsePayload::empty()
}

/// Fallback predicate for the error path; matches every request.
pub fn error_handler_can_handle(_request: &Request) -> bool {
    true
}

/// The catch-all error handler installed on every [`Router::new`].
///
/// [`Router::new`]: super::router::Router::new
pub const ERROR_HANDLER: ErrorHandlerEntry = ErrorHandlerEntry {
    can_handle: error_handler_can_handle,
    handle: handle_error,
};

/// Recovers from any failure in a handler action. Never fails.
#[must_use]
pub fn handle_error(request: &Request, err: &SkillError) -> ResponsePayload {
    error!(request_type = request.type_name(), "Error handled: {err}");
    error!(chain = %error_chain(err), "Error stack: {err:?}");

    ResponseBuilder::new()
        .speak(ERROR_JOKE)
        .reprompt(ERROR_JOKE)
        .build()
}
