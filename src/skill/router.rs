//! Ordered request routing.
//!
//! Entries are evaluated in declaration order and the first predicate that
//! matches wins. The declared order is:
//!
//! 1. [`HandlerKind::GetJoke`]: launch, `GetJokeIntent`, and `AMAZON.YesIntent`
//!    when reprompts are enabled
//! 2. [`HandlerKind::Help`]: `AMAZON.HelpHandler`
//! 3. [`HandlerKind::CancelStopNo`]: cancel, stop and no intents
//! 4. [`HandlerKind::SessionEnded`]: session-ended requests
//!
//! Anything else is [`SkillError::Unroutable`]. Failed routing and failed
//! actions both go to the router's fallback [`ErrorHandlerEntry`], which is
//! [`handlers::ERROR_HANDLER`] unless replaced.

use super::handlers;
use super::response_builder::ResponsePayload;
use crate::core::models::Request;
use crate::errors::SkillError;

pub const GET_JOKE_INTENT: &str = "GetJokeIntent";
pub const YES_INTENT: &str = "AMAZON.YesIntent";
// Not the platform's built-in `AMAZON.HelpIntent`; matched literally.
pub const HELP_INTENT: &str = "AMAZON.HelpHandler";
pub const CANCEL_INTENT: &str = "AMAZON.CancelIntent";
pub const STOP_INTENT: &str = "AMAZON.StopIntent";
pub const NO_INTENT: &str = "AMAZON.NoIntent";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerKind {
    GetJoke,
    Help,
    CancelStopNo,
    SessionEnded,
}

pub type Predicate = fn(&Request) -> bool;
pub type Recovery = fn(&Request, &SkillError) -> ResponsePayload;

#[derive(Debug, Clone, Copy)]
pub struct HandlerEntry {
    pub kind: HandlerKind,
    pub can_handle: Predicate,
}

impl HandlerEntry {
    #[must_use]
    pub const fn new(kind: HandlerKind, can_handle: Predicate) -> Self {
        Self { kind, can_handle }
    }
}

/// Pairs a predicate with the recovery that answers a failed request.
#[derive(Debug, Clone, Copy)]
pub struct ErrorHandlerEntry {
    pub can_handle: Predicate,
    pub handle: Recovery,
}

#[derive(Debug, Clone)]
pub struct Router {
    entries: Vec<HandlerEntry>,
    fallback: ErrorHandlerEntry,
}

impl Router {
    #[must_use]
    pub fn new(reprompt_enabled: bool) -> Self {
        let get_joke: Predicate = if reprompt_enabled {
            is_joke_or_yes_request
        } else {
            is_joke_request
        };

        Self::from_entries(vec![
            HandlerEntry::new(HandlerKind::GetJoke, get_joke),
            HandlerEntry::new(HandlerKind::Help, is_help_request),
            HandlerEntry::new(HandlerKind::CancelStopNo, is_cancel_request),
            HandlerEntry::new(HandlerKind::SessionEnded, is_session_ended),
        ])
    }

    #[must_use]
    pub fn from_entries(entries: Vec<HandlerEntry>) -> Self {
        Self {
            entries,
            fallback: handlers::ERROR_HANDLER,
        }
    }

    #[must_use]
    pub fn with_fallback(mut self, fallback: ErrorHandlerEntry) -> Self {
        self.fallback = fallback;
        self
    }

    /// Handler kinds in evaluation order.
    pub fn kinds(&self) -> Vec<HandlerKind> {
        self.entries.iter().map(|e| e.kind).collect()
    }

    /// Selects the first entry whose predicate matches.
    ///
    /// # Errors
    ///
    /// Returns [`SkillError::Unroutable`] when no entry matches.
    pub fn route(&self, request: &Request) -> Result<HandlerKind, SkillError> {
        self.entries
            .iter()
            .find(|entry| (entry.can_handle)(request))
            .map(|entry| entry.kind)
            .ok_or_else(|| SkillError::Unroutable(describe(request)))
    }

    /// Answers a request whose routing or action failed with `err`.
    ///
    /// # Errors
    ///
    /// Returns [`SkillError::Unroutable`] when the fallback does not match,
    /// which the default catch-all never does.
    pub fn recover(
        &self,
        request: &Request,
        err: &SkillError,
    ) -> Result<ResponsePayload, SkillError> {
        if (self.fallback.can_handle)(request) {
            Ok((self.fallback.handle)(request, err))
        } else {
            Err(SkillError::Unroutable(format!(
                "no error handler for {} after: {err}",
                describe(request)
            )))
        }
    }
}

fn describe(request: &Request) -> String {
    match request.intent_name() {
        Some(name) => format!("{} ({name})", request.type_name()),
        None => request.type_name().to_string(),
    }
}

fn intent_is(request: &Request, names: &[&str]) -> bool {
    request.intent_name().is_some_and(|name| names.contains(&name))
}

pub fn is_joke_request(request: &Request) -> bool {
    matches!(request, Request::LaunchRequest { .. }) || intent_is(request, &[GET_JOKE_INTENT])
}

pub fn is_joke_or_yes_request(request: &Request) -> bool {
    is_joke_request(request) || intent_is(request, &[YES_INTENT])
}

pub fn is_help_request(request: &Request) -> bool {
    intent_is(request, &[HELP_INTENT])
}

pub fn is_cancel_request(request: &Request) -> bool {
    intent_is(request, &[CANCEL_INTENT, STOP_INTENT, NO_INTENT])
}

pub fn is_session_ended(request: &Request) -> bool {
    matches!(request, Request::SessionEndedRequest { .. })
}
