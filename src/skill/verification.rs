use chrono::{DateTime, Utc};
use tracing::error;

use crate::core::models::RequestEnvelope;
use crate::errors::SkillError;

/// Rejects envelopes addressed to a different skill when an id is configured.
pub fn verify_skill_id(
    envelope: &RequestEnvelope,
    expected: Option<&str>,
) -> Result<(), SkillError> {
    let Some(expected) = expected else {
        return Ok(());
    };

    match envelope.application_id() {
        Some(actual) if actual == expected => Ok(()),
        Some(actual) => {
            error!(expected, actual, "Skill id mismatch");
            Err(SkillError::RequestRejected(format!(
                "skill id mismatch: {actual}"
            )))
        }
        None => {
            error!(expected, "Request carries no application id");
            Err(SkillError::RequestRejected(
                "missing application id".to_string(),
            ))
        }
    }
}

/// Rejects requests whose timestamp is further than `max_age_secs` from `now`.
pub fn verify_timestamp(
    envelope: &RequestEnvelope,
    max_age_secs: Option<u64>,
    now: DateTime<Utc>,
) -> Result<(), SkillError> {
    let Some(max_age) = max_age_secs else {
        return Ok(());
    };

    let Some(raw) = envelope
        .request
        .meta()
        .and_then(|m| m.timestamp.as_deref())
    else {
        return Err(SkillError::RequestRejected(
            "missing request timestamp".to_string(),
        ));
    };

    let sent = DateTime::parse_from_rfc3339(raw)
        .map_err(|e| SkillError::RequestRejected(format!("invalid timestamp '{raw}': {e}")))?
        .with_timezone(&Utc);

    let skew = (now - sent).num_seconds().unsigned_abs();
    if skew > max_age {
        error!(timestamp = raw, skew, max_age, "Request timestamp out of range");
        return Err(SkillError::RequestRejected(format!(
            "timestamp {raw} is {skew}s from now"
        )));
    }

    Ok(())
}
