mod common;

use common::StaticFeed;
use dadjokes::SkillError;
use dadjokes::skill::handlers::{
    ANOTHER_JOKE_PROMPT, ERROR_JOKE, HELP_TEXT, PAUSE_MARKER, SKILL_NAME,
};
use dadjokes::skill::response_builder::SimpleCard;
use dadjokes::skill::{Skill, SkillOptions};
use serde_json::{Value, json};

fn skill(feed: StaticFeed) -> Skill<StaticFeed> {
    Skill::new(feed, SkillOptions::default())
}

fn reprompt_skill(feed: StaticFeed) -> Skill<StaticFeed> {
    Skill::new(
        feed,
        SkillOptions {
            reprompt_enabled: true,
            ..SkillOptions::default()
        },
    )
}

fn joke_feed() -> StaticFeed {
    StaticFeed::single("What do you call a fake noodle", "An impasta.")
}

#[tokio::test]
async fn test_launch_tells_a_joke_and_ends_session() {
    let skill = skill(joke_feed());
    let payload = skill.dispatch(&common::launch().request).await.unwrap();

    let joke = "What do you call a fake noodle. An impasta.";
    assert_eq!(payload.speech_text.as_deref(), Some(joke));
    assert_eq!(
        payload.card,
        Some(SimpleCard {
            title: SKILL_NAME.to_string(),
            text: joke.to_string(),
        })
    );
    assert_eq!(payload.reprompt_text, None);
    assert_eq!(payload.should_end_session, Some(true));
}

#[tokio::test]
async fn test_get_joke_intent_tells_a_joke() {
    let skill = skill(joke_feed());
    let payload = skill
        .dispatch(&common::intent("GetJokeIntent").request)
        .await
        .unwrap();

    assert!(!payload.speech_text.unwrap_or_default().is_empty());
    assert_eq!(payload.card.map(|c| c.title).as_deref(), Some(SKILL_NAME));
}

#[tokio::test]
async fn test_reprompt_variant_offers_another_joke() {
    let skill = reprompt_skill(joke_feed());
    let payload = skill
        .dispatch(&common::intent("AMAZON.YesIntent").request)
        .await
        .unwrap();

    let speech = payload.speech_text.unwrap();
    assert!(speech.starts_with("What do you call a fake noodle. An impasta."));
    assert!(speech.contains(PAUSE_MARKER));
    assert!(speech.ends_with(ANOTHER_JOKE_PROMPT));
    assert_eq!(payload.reprompt_text.as_deref(), Some(ANOTHER_JOKE_PROMPT));
    assert_eq!(payload.should_end_session, Some(false));
}

#[tokio::test]
async fn test_joke_markup_is_escaped_in_speech_only() {
    let skill = skill(StaticFeed::single("Salt & pepper", "<3"));
    let payload = skill.dispatch(&common::launch().request).await.unwrap();

    assert_eq!(payload.speech_text.as_deref(), Some("Salt &amp; pepper. &lt;3"));
    assert_eq!(payload.card.unwrap().text, "Salt & pepper. <3");
}

#[tokio::test]
async fn test_help_speaks_fixed_text() {
    let skill = skill(joke_feed());
    let payload = skill
        .dispatch(&common::intent("AMAZON.HelpHandler").request)
        .await
        .unwrap();

    assert_eq!(payload.speech_text.as_deref(), Some(HELP_TEXT));
    assert_eq!(payload.card, None);
    assert_eq!(payload.should_end_session, None);
}

#[tokio::test]
async fn test_cancel_stop_no_are_silent() {
    let feed = joke_feed();
    let skill = skill(feed);
    for name in ["AMAZON.CancelIntent", "AMAZON.StopIntent", "AMAZON.NoIntent"] {
        let payload = skill.dispatch(&common::intent(name).request).await.unwrap();
        assert!(payload.is_empty(), "{name} should produce an empty payload");
    }
}

#[tokio::test]
async fn test_session_ended_returns_empty_payload() {
    let skill = skill(joke_feed());
    for reason in ["USER_INITIATED", "ERROR", "EXCEEDED_MAX_REPROMPTS"] {
        let payload = skill
            .dispatch(&common::session_ended(reason).request)
            .await
            .unwrap();
        assert!(payload.is_empty());
    }
}

#[tokio::test]
async fn test_feed_failure_yields_error_joke() {
    let skill = skill(StaticFeed::unavailable());

    assert!(matches!(
        skill.dispatch(&common::launch().request).await,
        Err(SkillError::FeedUnavailable(_))
    ));

    let envelope = skill.handle(common::launch()).await.unwrap();
    let response = serde_json::to_value(&envelope.response).unwrap();
    let expected_ssml = format!("<speak>{ERROR_JOKE}</speak>");
    assert_eq!(
        response,
        json!({
            "outputSpeech": {"type": "SSML", "ssml": expected_ssml},
            "reprompt": {"outputSpeech": {"type": "SSML", "ssml": expected_ssml}},
            "shouldEndSession": false
        })
    );
}

#[tokio::test]
async fn test_empty_listing_yields_error_joke() {
    let skill = skill(StaticFeed::with(Vec::new()));
    let envelope = skill.handle(common::intent("GetJokeIntent")).await.unwrap();

    assert_eq!(envelope.response.should_end_session, Some(false));
    assert!(envelope.response.reprompt.is_some());
}

#[tokio::test]
async fn test_unroutable_request_yields_error_joke() {
    let feed = joke_feed();
    let skill = skill(feed);
    let envelope = skill
        .handle(common::intent("AMAZON.FallbackIntent"))
        .await
        .unwrap();

    let response = serde_json::to_value(&envelope.response).unwrap();
    assert_eq!(
        response["outputSpeech"]["ssml"],
        Value::String(format!("<speak>{ERROR_JOKE}</speak>"))
    );
}

#[tokio::test]
async fn test_response_envelope_wire_format() {
    let skill = skill(joke_feed());
    let envelope = skill.handle(common::launch()).await.unwrap();

    let value = serde_json::to_value(&envelope).unwrap();
    assert_eq!(
        value,
        json!({
            "version": "1.0",
            "sessionAttributes": {"visits": 3},
            "response": {
                "outputSpeech": {
                    "type": "SSML",
                    "ssml": "<speak>What do you call a fake noodle. An impasta.</speak>"
                },
                "card": {
                    "type": "Simple",
                    "title": "Reddit Dad Jokes",
                    "content": "What do you call a fake noodle. An impasta."
                },
                "shouldEndSession": true
            }
        })
    );
}

#[tokio::test]
async fn test_silent_response_serializes_empty() {
    let skill = skill(joke_feed());
    let envelope = skill.handle(common::intent("AMAZON.StopIntent")).await.unwrap();
    let value = serde_json::to_value(&envelope).unwrap();
    assert_eq!(value["response"], json!({}));
}

#[tokio::test]
async fn test_skill_id_mismatch_is_rejected() {
    let skill = Skill::new(
        joke_feed(),
        SkillOptions {
            skill_id: Some("amzn1.ask.skill.other".to_string()),
            ..SkillOptions::default()
        },
    );

    assert!(matches!(
        skill.handle(common::launch()).await,
        Err(SkillError::RequestRejected(_))
    ));
}

#[tokio::test]
async fn test_matching_skill_id_is_accepted() {
    let skill = Skill::new(
        joke_feed(),
        SkillOptions {
            skill_id: Some("amzn1.ask.skill.test".to_string()),
            ..SkillOptions::default()
        },
    );

    assert!(skill.handle(common::launch()).await.is_ok());
}

#[tokio::test]
async fn test_failures_go_through_router_fallback() {
    use dadjokes::skill::{ErrorHandlerEntry, ResponseBuilder, ResponsePayload, Router};

    fn apologise(_: &dadjokes::core::models::Request, err: &SkillError) -> ResponsePayload {
        ResponseBuilder::new().speak(format!("sorry: {err}")).build()
    }

    let router = Router::new(false).with_fallback(ErrorHandlerEntry {
        can_handle: |_| true,
        handle: apologise,
    });
    let skill = Skill::with_router(StaticFeed::with(Vec::new()), router, SkillOptions::default());

    let envelope = skill.handle(common::launch()).await.unwrap();
    let response = serde_json::to_value(&envelope.response).unwrap();
    assert_eq!(
        response["outputSpeech"]["ssml"],
        "<speak>sorry: Joke feed returned an empty listing</speak>"
    );
}

#[tokio::test]
async fn test_unmatched_fallback_surfaces_as_error() {
    use dadjokes::skill::{ErrorHandlerEntry, ResponsePayload, Router};

    let router = Router::new(false).with_fallback(ErrorHandlerEntry {
        can_handle: |_| false,
        handle: |_, _| ResponsePayload::empty(),
    });
    let skill = Skill::with_router(StaticFeed::unavailable(), router, SkillOptions::default());

    assert!(matches!(
        skill.handle(common::launch()).await,
        Err(SkillError::Unroutable(_))
    ));
}
