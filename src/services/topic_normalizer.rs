use once_cell::sync::Lazy;
use regex::Regex;

pub const UNKNOWN_TOPIC: &str = "Unknown";

// Longer phrases come first so "a quiz on" is not reduced to a stray "a".
static BOILERPLATE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:generate\s+me\s+a\s+quiz\s+on|create\s+a\s+quiz\s+about|a\s+quiz\s+on|quiz\s+on)\b",
    )
    .expect("BOILERPLATE_REGEX is a valid regex pattern")
});

static WHITESPACE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("WHITESPACE_REGEX is a valid regex pattern"));

/// Turns a free-text topic into the canonical label used for prompts and
/// past-question lookups. Total and idempotent.
pub fn normalize(raw: &str) -> String {
    let mut topic = collapse_whitespace(&raw.to_lowercase());

    // Removing one phrase can splice together another ("quiz quiz on on").
    loop {
        let stripped = collapse_whitespace(&BOILERPLATE_REGEX.replace_all(&topic, " "));
        if stripped == topic {
            break;
        }
        topic = stripped;
    }

    if topic.is_empty() {
        UNKNOWN_TOPIC.to_string()
    } else {
        title_case(&topic)
    }
}

fn collapse_whitespace(value: &str) -> String {
    WHITESPACE_REGEX.replace_all(value.trim(), " ").into_owned()
}

fn title_case(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    let mut previous_is_letter = false;

    for ch in value.chars() {
        if previous_is_letter {
            result.extend(ch.to_lowercase());
        } else {
            result.push(title_char(ch));
        }
        previous_is_letter = ch.is_alphabetic();
    }

    result
}

// Characters whose uppercase form is several characters ('ß', 'ﬁ') stay
// as they are, otherwise a second pass would lowercase the tail.
fn title_char(ch: char) -> char {
    let mut upper = ch.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(single), None) => single,
        _ => ch,
    }
}
