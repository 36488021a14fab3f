// LLM prompt constants for banded answer rating.

use crate::panel::Persona;

/// System prompt for rating calls. The `Band:`/`Feedback:` contract is what
/// `rating::parse_rating` looks for; anything else degrades to raw-text
/// feedback.
pub const RATING_SYSTEM: &str =
    "You are rating one candidate answer from your own professional \
    perspective. Keep the justification to one or two sentences.";

/// Rating prompt template.
/// Replace: {persona}, {question}, {answer}
pub const RATING_PROMPT_TEMPLATE: &str = r#"You are {persona}.

Rate the following candidate answer to the question, from your unique professional perspective.

Question: {question}
Answer: {answer}

Give ONLY:
1. The score band (choose one: 0-10, 10-20, 20-30, 30-40, 40-50, 50-60, 60-70, 70-80, 80-90, 90-100)
2. A brief justification (1-2 sentences) from your perspective.
Format your response as: Band: <band>
Feedback: <justification>"#;

/// Fills the rating template for one panel seat.
pub fn build_rating_prompt(persona: &Persona, question: &str, answer: &str) -> String {
    RATING_PROMPT_TEMPLATE
        .replace("{persona}", &persona.descriptor())
        .replace("{question}", question)
        .replace("{answer}", answer)
}
