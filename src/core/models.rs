//! Wire types for the voice platform's request and response envelopes.
//!
//! Only the fields the skill reads are modelled; everything else in the
//! inbound envelope is ignored on deserialization.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Deserialize)]
pub struct RequestEnvelope {
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub session: Option<Session>,
    #[serde(default)]
    pub context: Option<Context>,
    pub request: Request,
}

impl RequestEnvelope {
    /// Application id from `context.System`, falling back to the session.
    pub fn application_id(&self) -> Option<&str> {
        self.context
            .as_ref()
            .and_then(|c| c.system.as_ref())
            .and_then(|s| s.application.as_ref())
            .or_else(|| self.session.as_ref().and_then(|s| s.application.as_ref()))
            .map(|a| a.application_id.as_str())
    }

    pub fn session_attributes(&self) -> Map<String, Value> {
        self.session
            .as_ref()
            .and_then(|s| s.attributes.clone())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    #[serde(default)]
    pub new: bool,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub application: Option<Application>,
    #[serde(default)]
    pub attributes: Option<Map<String, Value>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Context {
    #[serde(rename = "System", default)]
    pub system: Option<SystemState>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SystemState {
    #[serde(default)]
    pub application: Option<Application>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub application_id: String,
}

/// Common fields carried by every request type.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestMeta {
    #[serde(default)]
    pub request_id: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub locale: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum Request {
    LaunchRequest {
        #[serde(flatten)]
        meta: RequestMeta,
    },
    IntentRequest {
        #[serde(flatten)]
        meta: RequestMeta,
        intent: Intent,
    },
    SessionEndedRequest {
        #[serde(flatten)]
        meta: RequestMeta,
        #[serde(default)]
        reason: Option<String>,
        #[serde(default)]
        error: Option<SessionEndedError>,
    },
    #[serde(other)]
    Unknown,
}

impl Request {
    pub fn intent_name(&self) -> Option<&str> {
        match self {
            Request::IntentRequest { intent, .. } => Some(intent.name.as_str()),
            _ => None,
        }
    }

    pub fn meta(&self) -> Option<&RequestMeta> {
        match self {
            Request::LaunchRequest { meta }
            | Request::IntentRequest { meta, .. }
            | Request::SessionEndedRequest { meta, .. } => Some(meta),
            Request::Unknown => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Request::LaunchRequest { .. } => "LaunchRequest",
            Request::IntentRequest { .. } => "IntentRequest",
            Request::SessionEndedRequest { .. } => "SessionEndedRequest",
            Request::Unknown => "Unknown",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Intent {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionEndedError {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    pub version: String,
    pub session_attributes: Map<String, Value>,
    pub response: ResponseBody,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_speech: Option<OutputSpeech>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card: Option<Card>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reprompt: Option<Reprompt>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub should_end_session: Option<bool>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum OutputSpeech {
    #[serde(rename = "SSML")]
    Ssml { ssml: String },
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum Card {
    Simple { title: String, content: String },
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Reprompt {
    pub output_speech: OutputSpeech,
}
