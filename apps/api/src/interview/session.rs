//! Session data model — everything the progression state machine owns.
//!
//! The browser original kept this as a pile of module-level globals
//! (`aiQuestions`, `aiCurrent`, `isFollowupActive`, ...). Here it is one
//! owned `Session` struct, mutated only by `machine::apply_event`.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::Serialize;
use tokio::time::Instant;
use uuid::Uuid;

use crate::evaluation::rating::{SessionEvaluation, TranscriptPair};
use crate::interview::timers::QUESTION_COUNTDOWN;
use crate::panel::{self, VoiceParams};

/// Where the candidate currently is in the interview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Phase {
    /// Panel introduces itself once, before question 0.
    Introduction,
    /// Waiting for the main answer to `questions[index]`.
    AwaitingMain { index: usize },
    /// Waiting for the follow-up answer to `questions[index]` (or for the
    /// follow-up itself while generation is outstanding).
    AwaitingFollowup { index: usize },
    /// Terminal: interview finished, evaluation triggered.
    Complete,
    /// Terminal: question generation produced nothing to ask.
    NoQuestions,
}

impl Phase {
    pub fn is_terminal(self) -> bool {
        matches!(self, Phase::Complete | Phase::NoQuestions)
    }

    pub fn is_awaiting(self) -> bool {
        matches!(
            self,
            Phase::AwaitingMain { .. } | Phase::AwaitingFollowup { .. }
        )
    }

    /// Index of the question an awaiting phase points at.
    pub fn active_index(self) -> Option<usize> {
        match self {
            Phase::AwaitingMain { index } | Phase::AwaitingFollowup { index } => Some(index),
            _ => None,
        }
    }
}

/// A generated interview question. Immutable once generated, except the
/// follow-up text which is populated lazily after the first answer.
#[derive(Debug, Clone)]
pub struct Question {
    /// Position in the bank.
    pub id: usize,
    pub text: String,
    /// Panel seat assigned at generation time; stable for the lifetime of
    /// the question.
    pub persona_index: usize,
    /// Whether a follow-up may still be generated for this question.
    pub has_followup: bool,
    pub followup_text: Option<String>,
}

/// The candidate's recorded answers for one question.
#[derive(Debug, Clone, Default)]
pub struct AnswerRecord {
    pub main: String,
    pub followup: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedKind {
    Intro,
    Question,
    Followup,
    Answer,
    Coach,
    Notice,
}

/// One chat-bubble entry in the interview feed. The UI renders these in
/// order; the core only appends.
#[derive(Debug, Clone, Serialize)]
pub struct FeedEntry {
    pub speaker: String,
    pub kind: FeedKind,
    pub text: String,
}

/// Instruction for the speech-synthesis collaborator: say `text` with the
/// persona's voice. Cleared when the UI reports the utterance ended.
#[derive(Debug, Clone, Serialize)]
pub struct SpeechDirective {
    pub persona_index: usize,
    pub persona_name: &'static str,
    pub text: String,
    pub voice: &'static VoiceParams,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionStatus {
    Answered,
    Current,
    Locked,
}

/// Per-question entry of the progress indicator.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionProgress {
    pub index: usize,
    pub persona: &'static str,
    pub status: QuestionStatus,
}

/// Read-only view of a session handed to the UI surface.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub id: Uuid,
    pub candidate_name: String,
    pub phase: Phase,
    pub current_index: Option<usize>,
    pub question_count: usize,
    pub progress: Vec<QuestionProgress>,
    pub feed: Vec<FeedEntry>,
    /// Whether the answer-submission control should be enabled.
    pub input_enabled: bool,
    /// Latest unsubmitted draft, so a re-rendering surface can restore it.
    pub input_draft: String,
    /// Per-question visible countdown, display only.
    pub countdown_remaining_secs: u64,
    /// Remaining overall interview budget.
    pub budget_remaining_secs: u64,
    pub speaking: Option<SpeechDirective>,
    pub evaluation: Option<SessionEvaluation>,
}

/// One interview session, owned by its engine task for the session's
/// lifetime. Created on session start, dropped when the interview ends or
/// is abandoned; nothing here is persisted.
#[derive(Debug)]
pub struct Session {
    pub id: Uuid,
    pub candidate_name: String,
    pub job_description: String,
    pub resume_text: String,
    pub questions: Vec<Question>,
    pub phase: Phase,
    pub answers: BTreeMap<usize, AnswerRecord>,
    pub feed: Vec<FeedEntry>,
    pub started_at: Instant,
    pub question_started_at: Option<Instant>,
    pub duration_budget: Duration,
    pub speaking: Option<SpeechDirective>,
    /// True while a follow-up generation call is outstanding; the input
    /// surface is disabled and activity events are ignored.
    pub followup_pending: bool,
    /// Latest unsubmitted input text (keystrokes or live transcript).
    pub input_draft: String,
    pub evaluation: Option<SessionEvaluation>,
}

impl Session {
    pub fn new(
        id: Uuid,
        candidate_name: String,
        job_description: String,
        resume_text: String,
        questions: Vec<Question>,
        duration_budget: Duration,
    ) -> Self {
        let mut session = Session {
            id,
            candidate_name,
            job_description,
            resume_text,
            phase: if questions.is_empty() {
                Phase::NoQuestions
            } else {
                Phase::Introduction
            },
            questions,
            answers: BTreeMap::new(),
            feed: Vec::new(),
            started_at: Instant::now(),
            question_started_at: None,
            duration_budget,
            speaking: None,
            followup_pending: false,
            input_draft: String::new(),
            evaluation: None,
        };

        match session.phase {
            Phase::NoQuestions => {
                session.push_notice("No questions could be generated for this session.");
            }
            _ => {
                for persona in &panel::PANEL {
                    session.feed.push(FeedEntry {
                        speaker: persona.name.to_string(),
                        kind: FeedKind::Intro,
                        text: format!(
                            "Hello, I'm {}, {}. {}",
                            persona.name, persona.role, persona.intro
                        ),
                    });
                }
            }
        }

        session
    }

    pub fn current_index(&self) -> Option<usize> {
        self.phase.active_index()
    }

    pub fn input_enabled(&self) -> bool {
        self.phase.is_awaiting() && !self.followup_pending
    }

    /// Whether the slot the candidate is currently being asked for already
    /// holds a recorded answer.
    pub fn active_slot_answered(&self) -> bool {
        match self.phase {
            Phase::AwaitingMain { index } => self
                .answers
                .get(&index)
                .map(|record| !record.main.trim().is_empty())
                .unwrap_or(false),
            Phase::AwaitingFollowup { index } => self
                .answers
                .get(&index)
                .and_then(|record| record.followup.as_deref())
                .map(|text| !text.trim().is_empty())
                .unwrap_or(false),
            _ => false,
        }
    }

    pub fn countdown_remaining(&self) -> Duration {
        match self.question_started_at {
            Some(started) => QUESTION_COUNTDOWN.saturating_sub(started.elapsed()),
            None => Duration::ZERO,
        }
    }

    pub fn budget_remaining(&self) -> Duration {
        self.duration_budget.saturating_sub(self.started_at.elapsed())
    }

    pub fn budget_exhausted(&self) -> bool {
        self.started_at.elapsed() >= self.duration_budget
    }

    /// The scored transcript: main question/answer pairs, in order, with
    /// auto-skipped (empty) answers excluded. Follow-up exchanges are
    /// deliberately not rated.
    pub fn transcript(&self) -> Vec<TranscriptPair> {
        self.questions
            .iter()
            .filter_map(|question| {
                let record = self.answers.get(&question.id)?;
                if record.main.trim().is_empty() {
                    return None;
                }
                Some(TranscriptPair {
                    question: question.text.clone(),
                    answer: record.main.clone(),
                })
            })
            .collect()
    }

    pub fn push_panel(&mut self, persona_index: usize, kind: FeedKind, text: impl Into<String>) {
        self.feed.push(FeedEntry {
            speaker: panel::persona_for(persona_index).name.to_string(),
            kind,
            text: text.into(),
        });
    }

    pub fn push_candidate(&mut self, text: impl Into<String>) {
        self.feed.push(FeedEntry {
            speaker: self.candidate_name.clone(),
            kind: FeedKind::Answer,
            text: text.into(),
        });
    }

    pub fn push_coach(&mut self, text: impl Into<String>) {
        self.feed.push(FeedEntry {
            speaker: "Coach".to_string(),
            kind: FeedKind::Coach,
            text: text.into(),
        });
    }

    pub fn push_notice(&mut self, text: impl Into<String>) {
        self.feed.push(FeedEntry {
            speaker: "System".to_string(),
            kind: FeedKind::Notice,
            text: text.into(),
        });
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let progress = self
            .questions
            .iter()
            .map(|question| {
                let status = match self.phase {
                    Phase::AwaitingMain { index } | Phase::AwaitingFollowup { index } => {
                        if question.id < index {
                            QuestionStatus::Answered
                        } else if question.id == index {
                            QuestionStatus::Current
                        } else {
                            QuestionStatus::Locked
                        }
                    }
                    Phase::Complete => QuestionStatus::Answered,
                    Phase::Introduction | Phase::NoQuestions => QuestionStatus::Locked,
                };
                QuestionProgress {
                    index: question.id,
                    persona: panel::persona_for(question.persona_index).name,
                    status,
                }
            })
            .collect();

        SessionSnapshot {
            id: self.id,
            candidate_name: self.candidate_name.clone(),
            phase: self.phase,
            current_index: self.current_index(),
            question_count: self.questions.len(),
            progress,
            feed: self.feed.clone(),
            input_enabled: self.input_enabled(),
            input_draft: self.input_draft.clone(),
            countdown_remaining_secs: self.countdown_remaining().as_secs(),
            budget_remaining_secs: self.budget_remaining().as_secs(),
            speaking: self.speaking.clone(),
            evaluation: self.evaluation.clone(),
        }
    }
}
