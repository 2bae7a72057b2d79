pub const DECLINED_TOPIC_MESSAGE: &str = "The requested topic is inappropriate or cannot be used.";

pub const NO_PAST_QUESTIONS: &str = "None";

pub const PAST_QUESTIONS_SEPARATOR: &str = "; ";

/// Output contract handed to the model verbatim.
pub const RESPONSE_FORMAT_INSTRUCTIONS: &str = r#"The output should be a markdown code snippet formatted in the following schema, including the leading and trailing "```json" and "```":

```json
{
	"ok": boolean  // Success indicator
	"data": array  // Array of questions or error message
}
```"#;

/// Placeholders: `{topic}`, `{num_questions}`, `{difficulty}`, `{format}`,
/// `{seed}`, `{past_questions}`, `{declined_message}`.
pub const QUIZ_GENERATION_PROMPT: &str = r#"Generate a quiz with the following details:
- **Topic**: "{topic}"
- **Number of Questions**: {num_questions}
- **Difficulty Level**: "{difficulty}"

### Instructions:
1. Respond with a JSON object with exactly two fields, "ok" (boolean) and "data" (array). {format}
2. When "ok" is true, "data" is an array of question objects. Each question must include: serial_number (string), question (string), options (an array of exactly 4 strings), correct_answer (string, one of the options), description (string explaining the answer).
3. Use a creative twist (e.g., real-world scenarios, analogies) to add variety. Random seed: {seed}.
4. Do NOT repeat these past questions: {past_questions}.

### Guidelines:
- Ensure content is accurate, clear, and matches the topic and difficulty.
- If you can't generate the requested number, provide as many as possible.

### Fallback:
- If the topic is inappropriate, return: { "ok": false, "data": ["{declined_message}"] }
"#;
