use serde_json::Value;
use validator::Validate;

use crate::{
    constants::quiz_prompt::DECLINED_TOPIC_MESSAGE,
    errors::{GenerationError, GenerationResult},
    models::domain::{GenerationOutcome, QuizQuestion},
};

/// The two-field structure the model is asked to return.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseEnvelope {
    pub ok: bool,
    pub data: Vec<Value>,
}

/// Reads raw model output and decides what it means.
///
/// * `ok: false` is a declined generation and is returned as-is.
/// * `ok: true` with an object first is a quiz.
/// * `ok: true` with a string first is an error message in disguise.
/// * Anything else is an invalid format.
pub fn parse_response(raw: &str) -> GenerationResult<GenerationOutcome> {
    let envelope = parse_envelope(raw)?;
    classify(envelope)
}

pub fn parse_envelope(raw: &str) -> GenerationResult<ResponseEnvelope> {
    let json = extract_json(raw)
        .ok_or_else(|| GenerationError::Parse("no JSON found in response".to_string()))?;
    let value: Value = serde_json::from_str(json)?;

    match value {
        Value::Object(mut fields) => {
            let ok = fields
                .get("ok")
                .and_then(Value::as_bool)
                .ok_or_else(|| GenerationError::Parse("missing boolean `ok` field".to_string()))?;
            let data = match fields.remove("data") {
                Some(Value::Array(items)) => items,
                None if !ok => Vec::new(),
                _ => {
                    return Err(GenerationError::Parse(
                        "missing array `data` field".to_string(),
                    ))
                }
            };
            Ok(ResponseEnvelope { ok, data })
        }
        // Legacy form: [ { "ok": bool }, [ ... ] ]
        Value::Array(mut items) if items.len() == 2 => {
            let data = match items.pop() {
                Some(Value::Array(data)) => data,
                _ => {
                    return Err(GenerationError::Parse(
                        "second element must be an array".to_string(),
                    ))
                }
            };
            let ok = items
                .first()
                .and_then(|head| head.get("ok"))
                .and_then(Value::as_bool)
                .ok_or_else(|| GenerationError::Parse("missing boolean `ok` field".to_string()))?;
            Ok(ResponseEnvelope { ok, data })
        }
        _ => Err(GenerationError::Parse(
            "expected an object with `ok` and `data`".to_string(),
        )),
    }
}

pub fn classify(envelope: ResponseEnvelope) -> GenerationResult<GenerationOutcome> {
    if !envelope.ok {
        return Ok(GenerationOutcome::Declined(declined_reason(&envelope.data)));
    }

    match envelope.data.first() {
        Some(Value::Object(_)) => parse_questions(envelope.data).map(GenerationOutcome::Generated),
        Some(Value::String(message)) => Err(GenerationError::Rejected(message.clone())),
        _ => Err(GenerationError::InvalidFormat),
    }
}

fn declined_reason(data: &[Value]) -> String {
    match data.first() {
        Some(Value::String(reason)) => reason.clone(),
        Some(other) => other.to_string(),
        None => DECLINED_TOPIC_MESSAGE.to_string(),
    }
}

fn parse_questions(data: Vec<Value>) -> GenerationResult<Vec<QuizQuestion>> {
    data.into_iter()
        .enumerate()
        .map(|(index, item)| {
            let question: QuizQuestion = serde_json::from_value(item).map_err(|e| {
                GenerationError::Parse(format!("question {} is malformed: {}", index + 1, e))
            })?;
            question.validate().map_err(|e| {
                GenerationError::Parse(format!("question {} is malformed: {}", index + 1, e))
            })?;
            Ok(question)
        })
        .collect()
}

/// Pulls the JSON payload out of a reply that may be fenced or wrapped in
/// prose.
fn extract_json(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();

    if let Some(start) = trimmed.find("```") {
        let after_fence = &trimmed[start + 3..];
        // Skip the info string (`json`) up to the end of the line.
        let body_start = after_fence.find('\n').map(|i| i + 1).unwrap_or(0);
        let body = &after_fence[body_start..];
        let body = match body.find("```") {
            Some(end) => &body[..end],
            None => body,
        };
        let body = body.trim();
        if !body.is_empty() {
            return Some(body);
        }
    }

    let start = trimmed.find(|c: char| c == '{' || c == '[')?;
    let closing = if trimmed[start..].starts_with('{') { '}' } else { ']' };
    let end = trimmed.rfind(closing)?;
    (end >= start).then(|| &trimmed[start..=end])
}
