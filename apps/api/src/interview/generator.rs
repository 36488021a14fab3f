//! Interview text generation — the seam between the session core and the
//! text-generation service.
//!
//! `AppState` holds an `Arc<dyn InterviewModel>`; the production
//! implementation goes through `LlmClient`, tests script their own. Swap
//! the backend without touching the machine, engine, or handlers.

use async_trait::async_trait;
use tracing::warn;

use crate::errors::AppError;
use crate::interview::prompts::{
    FOLLOWUP_PROMPT_TEMPLATE, FOLLOWUP_SYSTEM, QUESTION_PROMPT_TEMPLATE, QUESTION_SYSTEM,
};
use crate::interview::sanitize::clean_spoken_text;
use crate::interview::session::Question;
use crate::llm_client::prompts::{PANEL_SIMULATION_PREAMBLE, SPOKEN_OUTPUT_INSTRUCTION};
use crate::llm_client::LlmClient;
use crate::panel::{self, Persona};

/// The text-generation collaborator. All outputs are free text; callers
/// sanitize or parse defensively.
#[async_trait]
pub trait InterviewModel: Send + Sync {
    /// Generates main question number `index + 1` in the persona's voice.
    async fn question(
        &self,
        persona: &Persona,
        index: usize,
        resume: &str,
        job_description: &str,
    ) -> Result<String, AppError>;

    /// Generates a follow-up that digs into the candidate's answer.
    async fn follow_up(
        &self,
        main_question: &str,
        answer: &str,
        resume: &str,
        job_description: &str,
    ) -> Result<String, AppError>;

    /// Asks one persona for a banded rating of a question/answer pair.
    /// Expected to contain `Band:` and `Feedback:` lines; parsed leniently.
    async fn rate(
        &self,
        persona: &Persona,
        question: &str,
        answer: &str,
    ) -> Result<String, AppError>;
}

/// Production implementation backed by the Claude API.
pub struct LlmInterviewModel {
    llm: LlmClient,
}

impl LlmInterviewModel {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl InterviewModel for LlmInterviewModel {
    async fn question(
        &self,
        persona: &Persona,
        index: usize,
        resume: &str,
        job_description: &str,
    ) -> Result<String, AppError> {
        let system = format!("{PANEL_SIMULATION_PREAMBLE} {QUESTION_SYSTEM}");
        let prompt = build_question_prompt(persona, index, resume, job_description);
        self.llm
            .call_text(&prompt, &system)
            .await
            .map_err(|e| AppError::Llm(format!("Question generation failed: {e}")))
    }

    async fn follow_up(
        &self,
        main_question: &str,
        answer: &str,
        resume: &str,
        job_description: &str,
    ) -> Result<String, AppError> {
        let prompt = build_followup_prompt(main_question, answer, resume, job_description);
        self.llm
            .call_text(&prompt, FOLLOWUP_SYSTEM)
            .await
            .map_err(|e| AppError::Llm(format!("Follow-up generation failed: {e}")))
    }

    async fn rate(
        &self,
        persona: &Persona,
        question: &str,
        answer: &str,
    ) -> Result<String, AppError> {
        let system = format!(
            "{PANEL_SIMULATION_PREAMBLE} {}",
            crate::evaluation::prompts::RATING_SYSTEM
        );
        let prompt = crate::evaluation::prompts::build_rating_prompt(persona, question, answer);
        self.llm
            .call_text(&prompt, &system)
            .await
            .map_err(|e| AppError::Llm(format!("Rating failed: {e}")))
    }
}

/// Fills the main-question template for one panel seat.
pub fn build_question_prompt(
    persona: &Persona,
    index: usize,
    resume: &str,
    job_description: &str,
) -> String {
    QUESTION_PROMPT_TEMPLATE
        .replace("{persona}", &persona.descriptor())
        .replace("{number}", &(index + 1).to_string())
        .replace("{spoken_instruction}", SPOKEN_OUTPUT_INSTRUCTION)
        .replace("{resume}", resume)
        .replace("{job_description}", job_description)
}

/// Fills the follow-up template.
pub fn build_followup_prompt(
    main_question: &str,
    answer: &str,
    resume: &str,
    job_description: &str,
) -> String {
    FOLLOWUP_PROMPT_TEMPLATE
        .replace("{main_question}", main_question)
        .replace("{answer}", answer)
        .replace("{job_description}", job_description)
        .replace("{resume}", resume)
}

/// Builds the session's question bank: one awaited generation call per
/// index, each voiced by the seat the index maps to, each sanitized before
/// it can ever be shown or spoken.
///
/// A failed or empty slot is skipped rather than seated as placeholder
/// text; an entirely empty result puts the session in its `NoQuestions`
/// terminal state.
pub async fn build_question_bank(
    model: &dyn InterviewModel,
    resume: &str,
    job_description: &str,
    count: usize,
) -> Vec<Question> {
    let mut questions = Vec::with_capacity(count);

    for index in 0..count {
        let persona = panel::persona_for(index);
        match model.question(persona, index, resume, job_description).await {
            Ok(raw) => {
                let text = clean_spoken_text(&raw);
                if text.is_empty() {
                    warn!("Question {index} cleaned to empty text; skipping slot");
                    continue;
                }
                questions.push(Question {
                    id: questions.len(),
                    text,
                    persona_index: index % panel::PANEL.len(),
                    has_followup: true,
                    followup_text: None,
                });
            }
            Err(e) => {
                warn!("Question {index} generation failed: {e}; skipping slot");
            }
        }
    }

    questions
}
