use std::borrow::Cow;

use once_cell::sync::Lazy;
use rand::Rng;
use regex::{Captures, Regex};

use crate::{
    constants::quiz_prompt::{
        DECLINED_TOPIC_MESSAGE, NO_PAST_QUESTIONS, PAST_QUESTIONS_SEPARATOR,
        QUIZ_GENERATION_PROMPT, RESPONSE_FORMAT_INSTRUCTIONS,
    },
    models::domain::Difficulty,
};

pub const SEED_RANGE: std::ops::RangeInclusive<u32> = 1..=1000;

static PLACEHOLDER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{(\w+)\}").expect("PLACEHOLDER_REGEX is a valid regex pattern"));

/// Builds the generation prompt with a fresh variety seed.
pub fn build_prompt(
    topic: &str,
    num_questions: u8,
    difficulty: Difficulty,
    past_questions: &[String],
) -> String {
    let seed = rand::thread_rng().gen_range(SEED_RANGE);
    build_prompt_with_seed(topic, num_questions, difficulty, past_questions, seed)
}

pub fn build_prompt_with_seed(
    topic: &str,
    num_questions: u8,
    difficulty: Difficulty,
    past_questions: &[String],
    seed: u32,
) -> String {
    let num_questions = num_questions.to_string();
    let seed = seed.to_string();
    let past = past_questions_display(past_questions);

    render(
        QUIZ_GENERATION_PROMPT,
        &[
            ("topic", topic),
            ("num_questions", &num_questions),
            ("difficulty", difficulty.as_str()),
            ("format", RESPONSE_FORMAT_INSTRUCTIONS),
            ("seed", &seed),
            ("past_questions", &past),
            ("declined_message", DECLINED_TOPIC_MESSAGE),
        ],
    )
}

pub fn past_questions_display(past_questions: &[String]) -> String {
    if past_questions.is_empty() {
        NO_PAST_QUESTIONS.to_string()
    } else {
        past_questions.join(PAST_QUESTIONS_SEPARATOR)
    }
}

/// Single-pass substitution: text coming from a value is never re-scanned,
/// and unknown placeholders are left alone.
fn render(template: &str, values: &[(&str, &str)]) -> String {
    PLACEHOLDER_REGEX
        .replace_all(template, |caps: &Captures| {
            let key = &caps[1];
            values
                .iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| Cow::Owned(value.to_string()))
                .unwrap_or_else(|| Cow::Owned(caps[0].to_string()))
        })
        .into_owned()
}
