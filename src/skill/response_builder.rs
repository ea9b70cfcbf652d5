//! Response payload assembly and rendering to the platform wire format.
//!
//! Speech and reprompt text are SSML fragments; they are wrapped in
//! `<speak>` when rendered. Plain text destined for speech must go through
//! [`escape_ssml`] first.

use serde_json::{Map, Value};

use crate::core::models::{Card, OutputSpeech, Reprompt, ResponseBody, ResponseEnvelope};

pub const RESPONSE_VERSION: &str = "1.0";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleCard {
    pub title: String,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponsePayload {
    pub speech_text: Option<String>,
    pub card: Option<SimpleCard>,
    pub reprompt_text: Option<String>,
    pub should_end_session: Option<bool>,
}

impl ResponsePayload {
    /// Payload with no speech, card, reprompt or session flag.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    #[must_use]
    pub fn into_body(self) -> ResponseBody {
        ResponseBody {
            output_speech: self.speech_text.map(|s| ssml(&s)),
            card: self.card.map(|c| Card::Simple {
                title: c.title,
                content: c.text,
            }),
            reprompt: self.reprompt_text.map(|s| Reprompt {
                output_speech: ssml(&s),
            }),
            should_end_session: self.should_end_session,
        }
    }

    #[must_use]
    pub fn into_envelope(self, session_attributes: Map<String, Value>) -> ResponseEnvelope {
        ResponseEnvelope {
            version: RESPONSE_VERSION.to_string(),
            session_attributes,
            response: self.into_body(),
        }
    }
}

#[derive(Debug, Default)]
pub struct ResponseBuilder {
    payload: ResponsePayload,
}

impl ResponseBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn speak(mut self, speech: impl Into<String>) -> Self {
        self.payload.speech_text = Some(speech.into());
        self
    }

    /// Sets the reprompt and keeps the session open.
    #[must_use]
    pub fn reprompt(mut self, speech: impl Into<String>) -> Self {
        self.payload.reprompt_text = Some(speech.into());
        self.payload.should_end_session = Some(false);
        self
    }

    #[must_use]
    pub fn with_simple_card(mut self, title: impl Into<String>, text: impl Into<String>) -> Self {
        self.payload.card = Some(SimpleCard {
            title: title.into(),
            text: text.into(),
        });
        self
    }

    #[must_use]
    pub fn with_should_end_session(mut self, end: bool) -> Self {
        self.payload.should_end_session = Some(end);
        self
    }

    #[must_use]
    pub fn build(self) -> ResponsePayload {
        self.payload
    }
}

fn ssml(fragment: &str) -> OutputSpeech {
    OutputSpeech::Ssml {
        ssml: format!("<speak>{fragment}</speak>"),
    }
}

/// Escapes markup characters so free text is safe as SSML element content.
#[must_use]
pub fn escape_ssml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}
