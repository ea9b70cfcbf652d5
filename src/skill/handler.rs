//! Lambda entry point for voice platform requests.

use lambda_runtime::{Error, LambdaEvent};
use tracing::{error, info};

use super::Skill;
use crate::core::models::{RequestEnvelope, ResponseEnvelope};
use crate::feed::JokeFeed;

pub use self::function_handler as handler;

/// Runs one invocation through `skill`.
///
/// # Errors
///
/// Returns an error to the runtime only when request verification rejects
/// the envelope; every other failure is answered by the error handler.
#[tracing::instrument(level = "info", skip_all, fields(request_id = %event.context.request_id))]
pub async fn function_handler<F: JokeFeed>(
    skill: &Skill<F>,
    event: LambdaEvent<RequestEnvelope>,
) -> Result<ResponseEnvelope, Error> {
    let envelope = event.payload;
    info!(
        request_type = envelope.request.type_name(),
        intent = envelope.request.intent_name().unwrap_or(""),
        "Skill received request"
    );

    skill.handle(envelope).await.map_err(|e| {
        error!("Request rejected: {}", e);
        Error::from(e)
    })
}
