//! Progression state machine — the one place a session is mutated.
//!
//! Every input (candidate submissions, timer firings, completed generation
//! calls, collaborator signals) arrives as a `SessionEvent`; `apply_event`
//! runs the transition to completion and returns the side effects the engine
//! must execute. The machine itself never spawns tasks, never sleeps, and
//! never talks to the network, which keeps every transition unit-testable.
//!
//! Transition graph:
//! ```text
//! Introduction → AwaitingMain(0)
//! AwaitingMain(i) → AwaitingFollowup(i)        non-empty answer, follow-up available
//! AwaitingMain(i) → AwaitingMain(i+1)          non-empty answer, follow-up exhausted
//! AwaitingFollowup(i) → AwaitingMain(i+1)      follow-up answer (or generation failure)
//! Awaiting*(last) → Complete
//! Awaiting*(i) → next/Complete                 auto-advance after 60s of silence
//! any non-terminal → Complete                  end requested / budget exhausted
//! ```
//! `Complete` and `NoQuestions` are terminal: every event is a no-op.

use tracing::warn;

use crate::evaluation::rating::SessionEvaluation;
use crate::interview::sanitize::clean_spoken_text;
use crate::interview::session::{
    AnswerRecord, FeedKind, Phase, Session, SpeechDirective,
};
use crate::panel;

/// Gentle nudge surfaced by the help-prompt timer.
pub const HELP_PROMPT_TEXT: &str =
    "If you need help, feel free to start answering or ask for clarification!";

/// Warning surfaced shortly before auto-advance fires.
pub const AUTO_ADVANCE_WARNING_TEXT: &str =
    "No activity detected for 1 minute. Moving to the next question...";

/// An input to the state machine. Timer and generation events are already
/// epoch-filtered by the engine before they reach `apply_event`.
#[derive(Debug)]
pub enum SessionEvent {
    /// The post-introduction pause elapsed.
    IntroFinished,
    /// The candidate submitted answer text.
    AnswerSubmitted { text: String },
    /// Keystroke or live speech-recognition transcript update.
    InputActivity { draft: String },
    /// Help-prompt timer fired.
    HelpPromptDue,
    /// Auto-advance timer is about to fire.
    AutoAdvanceWarning,
    /// Auto-advance timer fired.
    AutoAdvanceDue,
    /// A follow-up generation call finished.
    FollowupReady {
        index: usize,
        result: Result<String, String>,
    },
    /// The speech synthesizer finished the current utterance.
    UtteranceEnded,
    /// The evaluation task finished.
    EvaluationReady { evaluation: SessionEvaluation },
    /// The candidate ended the call.
    EndRequested,
}

/// Side effects the engine must execute after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Cancel and re-arm the help-prompt and auto-advance timers under a
    /// fresh epoch.
    RestartTimers,
    /// Cancel all timers and invalidate outstanding epochs.
    CancelTimers,
    /// Spawn a follow-up generation call for `questions[index]`.
    RequestFollowup { index: usize },
    /// Spawn evaluation of the session transcript.
    Evaluate,
}

/// Applies one event to the session and returns the effects to execute.
/// This is the only function that mutates a `Session` after construction.
pub fn apply_event(session: &mut Session, event: SessionEvent) -> Vec<Effect> {
    if session.phase.is_terminal() {
        // Terminal states still accept the evaluation result; everything
        // else is dropped.
        if let SessionEvent::EvaluationReady { evaluation } = event {
            session.evaluation = Some(evaluation);
        }
        return Vec::new();
    }

    match event {
        SessionEvent::IntroFinished => match session.phase {
            Phase::Introduction => enter_question(session, 0),
            _ => Vec::new(),
        },
        SessionEvent::AnswerSubmitted { text } => submit_answer(session, &text),
        SessionEvent::InputActivity { draft } => {
            if session.followup_pending || !session.phase.is_awaiting() {
                return Vec::new();
            }
            session.input_draft = draft;
            vec![Effect::RestartTimers]
        }
        SessionEvent::HelpPromptDue => {
            // No nudge while a follow-up is being generated: there is
            // nothing the candidate could answer yet.
            if session.phase.is_awaiting()
                && !session.followup_pending
                && !session.active_slot_answered()
            {
                session.push_coach(HELP_PROMPT_TEXT);
            }
            Vec::new()
        }
        SessionEvent::AutoAdvanceWarning => {
            if session.phase.is_awaiting() && !session.active_slot_answered() {
                session.push_notice(AUTO_ADVANCE_WARNING_TEXT);
            }
            Vec::new()
        }
        SessionEvent::AutoAdvanceDue => auto_advance(session),
        SessionEvent::FollowupReady { index, result } => followup_ready(session, index, result),
        SessionEvent::UtteranceEnded => {
            session.speaking = None;
            Vec::new()
        }
        SessionEvent::EvaluationReady { evaluation } => {
            session.evaluation = Some(evaluation);
            Vec::new()
        }
        SessionEvent::EndRequested => {
            session.push_notice("Interview ended. Thank you for participating.");
            complete(session)
        }
    }
}

fn submit_answer(session: &mut Session, text: &str) -> Vec<Effect> {
    let answer = text.trim();
    if answer.is_empty() {
        // ValidationRejection: silently ignored, no state change.
        return Vec::new();
    }
    if session.followup_pending {
        // Input surface is disabled while generation is outstanding.
        return Vec::new();
    }

    match session.phase {
        Phase::AwaitingMain { index } => {
            session.push_candidate(answer);
            session.answers.insert(
                index,
                AnswerRecord {
                    main: answer.to_string(),
                    followup: None,
                },
            );
            session.input_draft.clear();

            if session.questions[index].has_followup {
                session.followup_pending = true;
                session.phase = Phase::AwaitingFollowup { index };
                // Restart first so the follow-up request is stamped with the
                // epoch the timers now run under.
                vec![Effect::RestartTimers, Effect::RequestFollowup { index }]
            } else {
                advance(session, index)
            }
        }
        Phase::AwaitingFollowup { index } => {
            session.push_candidate(answer);
            if let Some(record) = session.answers.get_mut(&index) {
                record.followup = Some(answer.to_string());
            }
            session.input_draft.clear();
            advance(session, index)
        }
        _ => Vec::new(),
    }
}

fn auto_advance(session: &mut Session) -> Vec<Effect> {
    match session.phase {
        Phase::AwaitingMain { index } => {
            if session.active_slot_answered() {
                return Vec::new();
            }
            // Record the skipped slot as an empty answer.
            session.answers.entry(index).or_default();
            advance(session, index)
        }
        Phase::AwaitingFollowup { index } => {
            if session.active_slot_answered() {
                return Vec::new();
            }
            session.followup_pending = false;
            if let Some(record) = session.answers.get_mut(&index) {
                if record.followup.is_none() && session.questions[index].followup_text.is_some() {
                    record.followup = Some(String::new());
                }
            }
            advance(session, index)
        }
        _ => Vec::new(),
    }
}

fn followup_ready(session: &mut Session, index: usize, result: Result<String, String>) -> Vec<Effect> {
    // The engine drops stale epochs; this guards the remaining races
    // (duplicate delivery, events for a question no longer current).
    let pending_here = session.followup_pending
        && matches!(session.phase, Phase::AwaitingFollowup { index: i } if i == index);
    if !pending_here {
        return Vec::new();
    }

    match result {
        Ok(raw) => {
            let cleaned = clean_spoken_text(&raw);
            if cleaned.is_empty() {
                return followup_failed(session, index);
            }
            session.followup_pending = false;
            let persona_index = session.questions[index].persona_index;
            session.questions[index].followup_text = Some(cleaned.clone());
            session.push_panel(persona_index, FeedKind::Followup, cleaned.clone());
            speak(session, persona_index, cleaned);
            vec![Effect::RestartTimers]
        }
        Err(reason) => {
            warn!("Follow-up generation failed for question {index}: {reason}");
            followup_failed(session, index)
        }
    }
}

/// Upstream failure while generating a follow-up: surface a placeholder,
/// treat the follow-up as exhausted, and keep the candidate moving. No
/// automatic retry.
fn followup_failed(session: &mut Session, index: usize) -> Vec<Effect> {
    session.push_notice("Error generating follow-up.");
    session.questions[index].has_followup = false;
    session.followup_pending = false;
    advance(session, index)
}

/// Moves past question `index`: next question, or completion when the bank
/// or the interview budget is exhausted. The session index only ever moves
/// through here, one question at a time.
fn advance(session: &mut Session, index: usize) -> Vec<Effect> {
    session.followup_pending = false;

    if session.budget_exhausted() {
        session.push_notice("Time limit reached.");
        return complete(session);
    }

    let next = index + 1;
    if next < session.questions.len() {
        enter_question(session, next)
    } else {
        session.push_notice("Interview complete! The panel is preparing your evaluation.");
        complete(session)
    }
}

fn enter_question(session: &mut Session, index: usize) -> Vec<Effect> {
    let text = session.questions[index].text.clone();
    let persona_index = session.questions[index].persona_index;

    session.phase = Phase::AwaitingMain { index };
    session.question_started_at = Some(tokio::time::Instant::now());
    session.input_draft.clear();
    session.push_panel(persona_index, FeedKind::Question, text.clone());
    speak(session, persona_index, text);

    vec![Effect::RestartTimers]
}

fn complete(session: &mut Session) -> Vec<Effect> {
    session.phase = Phase::Complete;
    session.question_started_at = None;
    session.speaking = None;
    session.followup_pending = false;
    session.input_draft.clear();

    let mut effects = vec![Effect::CancelTimers];
    if !session.transcript().is_empty() {
        effects.push(Effect::Evaluate);
    }
    effects
}

fn speak(session: &mut Session, persona_index: usize, text: String) {
    let persona = panel::persona_for(persona_index);
    session.speaking = Some(SpeechDirective {
        persona_index,
        persona_name: persona.name,
        text,
        voice: &persona.voice,
    });
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use uuid::Uuid;

    use super::*;
    use crate::interview::session::Question;
    use crate::panel::PANEL;

    fn make_questions(count: usize) -> Vec<Question> {
        (0..count)
            .map(|id| Question {
                id,
                text: format!("Question number {}?", id + 1),
                persona_index: id % PANEL.len(),
                has_followup: true,
                followup_text: None,
            })
            .collect()
    }

    fn make_session(question_count: usize) -> Session {
        Session::new(
            Uuid::new_v4(),
            "Asha".to_string(),
            "Backend engineer role".to_string(),
            "Six years of Rust and PostgreSQL.".to_string(),
            make_questions(question_count),
            Duration::from_secs(45 * 60),
        )
    }

    /// Drives a session from Introduction into question 0.
    fn started_session(question_count: usize) -> Session {
        let mut session = make_session(question_count);
        let effects = apply_event(&mut session, SessionEvent::IntroFinished);
        assert_eq!(effects, vec![Effect::RestartTimers]);
        session
    }

    #[test]
    fn test_empty_bank_is_terminal_no_questions() {
        let session = make_session(0);
        assert_eq!(session.phase, Phase::NoQuestions);
        assert!(session
            .feed
            .iter()
            .any(|entry| entry.text.contains("No questions")));
    }

    #[test]
    fn test_no_questions_ignores_all_events() {
        let mut session = make_session(0);
        for event in [
            SessionEvent::IntroFinished,
            SessionEvent::AnswerSubmitted {
                text: "hello".to_string(),
            },
            SessionEvent::AutoAdvanceDue,
        ] {
            assert!(apply_event(&mut session, event).is_empty());
            assert_eq!(session.phase, Phase::NoQuestions);
        }
    }

    #[test]
    fn test_intro_enters_first_question_with_first_persona() {
        let session = started_session(2);
        assert_eq!(session.phase, Phase::AwaitingMain { index: 0 });
        let speaking = session.speaking.as_ref().unwrap();
        assert_eq!(speaking.persona_name, PANEL[0].name);
        assert_eq!(speaking.text, "Question number 1?");
        assert!(session.input_enabled());
    }

    #[test]
    fn test_empty_and_whitespace_answers_are_noops() {
        let mut session = started_session(2);
        let feed_len = session.feed.len();
        for text in ["", "   ", "\n\t "] {
            let effects = apply_event(
                &mut session,
                SessionEvent::AnswerSubmitted {
                    text: text.to_string(),
                },
            );
            assert!(effects.is_empty());
            assert_eq!(session.phase, Phase::AwaitingMain { index: 0 });
            assert_eq!(session.feed.len(), feed_len);
            assert!(session.answers.is_empty());
        }
    }

    #[test]
    fn test_main_answer_requests_followup_and_disables_input() {
        let mut session = started_session(2);
        let effects = apply_event(
            &mut session,
            SessionEvent::AnswerSubmitted {
                text: "I would shard by tenant.".to_string(),
            },
        );
        assert_eq!(
            effects,
            vec![Effect::RestartTimers, Effect::RequestFollowup { index: 0 }]
        );
        assert_eq!(session.phase, Phase::AwaitingFollowup { index: 0 });
        assert!(session.followup_pending);
        assert!(!session.input_enabled());
        assert_eq!(session.answers[&0].main, "I would shard by tenant.");
    }

    #[test]
    fn test_submission_while_followup_pending_is_ignored() {
        let mut session = started_session(2);
        apply_event(
            &mut session,
            SessionEvent::AnswerSubmitted {
                text: "first".to_string(),
            },
        );
        let effects = apply_event(
            &mut session,
            SessionEvent::AnswerSubmitted {
                text: "second".to_string(),
            },
        );
        assert!(effects.is_empty());
        assert_eq!(session.answers[&0].main, "first");
    }

    #[test]
    fn test_followup_ready_is_spoken_and_reenables_input() {
        let mut session = started_session(2);
        apply_event(
            &mut session,
            SessionEvent::AnswerSubmitted {
                text: "first".to_string(),
            },
        );
        let effects = apply_event(
            &mut session,
            SessionEvent::FollowupReady {
                index: 0,
                result: Ok("**Why** that approach?".to_string()),
            },
        );
        assert_eq!(effects, vec![Effect::RestartTimers]);
        assert!(!session.followup_pending);
        assert!(session.input_enabled());
        assert_eq!(
            session.questions[0].followup_text.as_deref(),
            Some("Why that approach?")
        );
        let speaking = session.speaking.as_ref().unwrap();
        assert_eq!(speaking.text, "Why that approach?");
    }

    #[test]
    fn test_followup_answer_advances_to_next_question() {
        let mut session = started_session(2);
        apply_event(
            &mut session,
            SessionEvent::AnswerSubmitted {
                text: "main".to_string(),
            },
        );
        apply_event(
            &mut session,
            SessionEvent::FollowupReady {
                index: 0,
                result: Ok("Why?".to_string()),
            },
        );
        let effects = apply_event(
            &mut session,
            SessionEvent::AnswerSubmitted {
                text: "because".to_string(),
            },
        );
        assert_eq!(effects, vec![Effect::RestartTimers]);
        assert_eq!(session.phase, Phase::AwaitingMain { index: 1 });
        assert_eq!(session.answers[&0].followup.as_deref(), Some("because"));
        assert_eq!(
            session.speaking.as_ref().unwrap().persona_name,
            PANEL[1].name
        );
    }

    #[test]
    fn test_followup_failure_surfaces_placeholder_and_advances() {
        let mut session = started_session(2);
        apply_event(
            &mut session,
            SessionEvent::AnswerSubmitted {
                text: "main".to_string(),
            },
        );
        let effects = apply_event(
            &mut session,
            SessionEvent::FollowupReady {
                index: 0,
                result: Err("upstream 500".to_string()),
            },
        );
        assert_eq!(effects, vec![Effect::RestartTimers]);
        assert_eq!(session.phase, Phase::AwaitingMain { index: 1 });
        assert!(!session.questions[0].has_followup);
        assert!(session
            .feed
            .iter()
            .any(|entry| entry.text == "Error generating follow-up."));
    }

    #[test]
    fn test_followup_whose_text_cleans_to_empty_counts_as_failure() {
        let mut session = started_session(2);
        apply_event(
            &mut session,
            SessionEvent::AnswerSubmitted {
                text: "main".to_string(),
            },
        );
        apply_event(
            &mut session,
            SessionEvent::FollowupReady {
                index: 0,
                result: Ok("  (internal note) ".to_string()),
            },
        );
        assert_eq!(session.phase, Phase::AwaitingMain { index: 1 });
        assert!(session.questions[0].followup_text.is_none());
    }

    #[test]
    fn test_stale_followup_for_noncurrent_question_is_dropped() {
        let mut session = started_session(2);
        // Still awaiting the main answer; no follow-up was requested.
        let effects = apply_event(
            &mut session,
            SessionEvent::FollowupReady {
                index: 0,
                result: Ok("late".to_string()),
            },
        );
        assert!(effects.is_empty());
        assert_eq!(session.phase, Phase::AwaitingMain { index: 0 });
        assert!(session.questions[0].followup_text.is_none());
    }

    #[test]
    fn test_last_question_without_followup_completes_and_evaluates() {
        let mut session = started_session(1);
        session.questions[0].has_followup = false;
        let effects = apply_event(
            &mut session,
            SessionEvent::AnswerSubmitted {
                text: "final answer".to_string(),
            },
        );
        assert_eq!(effects, vec![Effect::CancelTimers, Effect::Evaluate]);
        assert_eq!(session.phase, Phase::Complete);
        assert!(!session.input_enabled());
    }

    #[test]
    fn test_auto_advance_records_empty_answer_and_moves_on() {
        let mut session = started_session(2);
        let effects = apply_event(&mut session, SessionEvent::AutoAdvanceDue);
        assert_eq!(effects, vec![Effect::RestartTimers]);
        assert_eq!(session.phase, Phase::AwaitingMain { index: 1 });
        assert_eq!(session.answers[&0].main, "");
    }

    #[test]
    fn test_auto_advance_on_last_unanswered_question_completes_without_evaluation() {
        let mut session = started_session(1);
        let effects = apply_event(&mut session, SessionEvent::AutoAdvanceDue);
        // Empty transcript: nothing to score.
        assert_eq!(effects, vec![Effect::CancelTimers]);
        assert_eq!(session.phase, Phase::Complete);
        assert!(session.transcript().is_empty());
    }

    #[test]
    fn test_auto_advance_during_pending_followup_discards_it() {
        let mut session = started_session(2);
        apply_event(
            &mut session,
            SessionEvent::AnswerSubmitted {
                text: "main".to_string(),
            },
        );
        assert!(session.followup_pending);
        let effects = apply_event(&mut session, SessionEvent::AutoAdvanceDue);
        assert_eq!(effects, vec![Effect::RestartTimers]);
        assert_eq!(session.phase, Phase::AwaitingMain { index: 1 });
        // The main answer survives; the follow-up slot stays empty because
        // no follow-up text was ever shown.
        assert_eq!(session.answers[&0].main, "main");
        assert_eq!(session.answers[&0].followup, None);

        // The late generation result must now be ignored.
        let late = apply_event(
            &mut session,
            SessionEvent::FollowupReady {
                index: 0,
                result: Ok("too late".to_string()),
            },
        );
        assert!(late.is_empty());
        assert!(session.questions[0].followup_text.is_none());
    }

    #[test]
    fn test_auto_advance_after_shown_followup_records_empty_followup() {
        let mut session = started_session(2);
        apply_event(
            &mut session,
            SessionEvent::AnswerSubmitted {
                text: "main".to_string(),
            },
        );
        apply_event(
            &mut session,
            SessionEvent::FollowupReady {
                index: 0,
                result: Ok("Why?".to_string()),
            },
        );
        apply_event(&mut session, SessionEvent::AutoAdvanceDue);
        assert_eq!(session.answers[&0].followup.as_deref(), Some(""));
        assert_eq!(session.phase, Phase::AwaitingMain { index: 1 });
    }

    #[test]
    fn test_help_prompt_only_when_unanswered() {
        let mut session = started_session(2);
        apply_event(&mut session, SessionEvent::HelpPromptDue);
        assert!(session
            .feed
            .iter()
            .any(|entry| entry.text == HELP_PROMPT_TEXT));

        // Once the slot is answered (followup shown, then answered via
        // auto-advance) the prompt no longer fires for it.
        let coach_count = session
            .feed
            .iter()
            .filter(|entry| entry.kind == FeedKind::Coach)
            .count();
        apply_event(
            &mut session,
            SessionEvent::AnswerSubmitted {
                text: "done".to_string(),
            },
        );
        apply_event(&mut session, SessionEvent::HelpPromptDue);
        let after = session
            .feed
            .iter()
            .filter(|entry| entry.kind == FeedKind::Coach)
            .count();
        assert_eq!(coach_count, after);
    }

    #[test]
    fn test_input_activity_restarts_timers_and_stores_draft() {
        let mut session = started_session(1);
        let effects = apply_event(
            &mut session,
            SessionEvent::InputActivity {
                draft: "I am typ".to_string(),
            },
        );
        assert_eq!(effects, vec![Effect::RestartTimers]);
        assert_eq!(session.input_draft, "I am typ");
    }

    #[test]
    fn test_input_activity_ignored_while_followup_pending() {
        let mut session = started_session(2);
        apply_event(
            &mut session,
            SessionEvent::AnswerSubmitted {
                text: "main".to_string(),
            },
        );
        let effects = apply_event(
            &mut session,
            SessionEvent::InputActivity {
                draft: "typing anyway".to_string(),
            },
        );
        assert!(effects.is_empty());
        assert!(session.input_draft.is_empty());
    }

    #[test]
    fn test_utterance_ended_clears_speaking() {
        let mut session = started_session(1);
        assert!(session.speaking.is_some());
        apply_event(&mut session, SessionEvent::UtteranceEnded);
        assert!(session.speaking.is_none());
    }

    #[test]
    fn test_end_request_completes_and_evaluates_partial_transcript() {
        let mut session = started_session(3);
        session.questions[0].has_followup = false;
        apply_event(
            &mut session,
            SessionEvent::AnswerSubmitted {
                text: "only answer".to_string(),
            },
        );
        let effects = apply_event(&mut session, SessionEvent::EndRequested);
        assert_eq!(effects, vec![Effect::CancelTimers, Effect::Evaluate]);
        assert_eq!(session.phase, Phase::Complete);
    }

    #[test]
    fn test_budget_exhaustion_completes_at_question_boundary() {
        let mut session = make_session(3);
        session.duration_budget = Duration::ZERO;
        apply_event(&mut session, SessionEvent::IntroFinished);
        session.questions[0].has_followup = false;
        apply_event(
            &mut session,
            SessionEvent::AnswerSubmitted {
                text: "answer".to_string(),
            },
        );
        assert_eq!(session.phase, Phase::Complete);
        assert!(session
            .feed
            .iter()
            .any(|entry| entry.text == "Time limit reached."));
    }

    #[test]
    fn test_index_advances_by_exactly_one_and_stays_in_bounds() {
        let count = 5;
        let mut session = started_session(count);
        for question in &mut session.questions {
            question.has_followup = false;
        }
        let mut last = session.current_index().unwrap();
        assert_eq!(last, 0);
        for step in 0..count {
            apply_event(
                &mut session,
                SessionEvent::AnswerSubmitted {
                    text: format!("answer {step}"),
                },
            );
            match session.current_index() {
                Some(index) => {
                    assert_eq!(index, last + 1);
                    assert!(index < count);
                    last = index;
                }
                None => {
                    assert_eq!(session.phase, Phase::Complete);
                    assert_eq!(step, count - 1);
                }
            }
        }
    }

    #[test]
    fn test_complete_is_terminal_for_further_answers() {
        let mut session = started_session(1);
        session.questions[0].has_followup = false;
        apply_event(
            &mut session,
            SessionEvent::AnswerSubmitted {
                text: "answer".to_string(),
            },
        );
        assert_eq!(session.phase, Phase::Complete);
        let effects = apply_event(
            &mut session,
            SessionEvent::AnswerSubmitted {
                text: "another".to_string(),
            },
        );
        assert!(effects.is_empty());
        assert_eq!(session.answers.len(), 1);
    }

    #[test]
    fn test_transcript_excludes_followups_and_skipped_questions() {
        let mut session = started_session(3);
        // Q0: answered with follow-up exchange.
        apply_event(
            &mut session,
            SessionEvent::AnswerSubmitted {
                text: "A".to_string(),
            },
        );
        apply_event(
            &mut session,
            SessionEvent::FollowupReady {
                index: 0,
                result: Ok("Why?".to_string()),
            },
        );
        apply_event(
            &mut session,
            SessionEvent::AnswerSubmitted {
                text: "B".to_string(),
            },
        );
        // Q1: skipped by auto-advance.
        apply_event(&mut session, SessionEvent::AutoAdvanceDue);
        // Q2: answered, no follow-up.
        session.questions[2].has_followup = false;
        apply_event(
            &mut session,
            SessionEvent::AnswerSubmitted {
                text: "C".to_string(),
            },
        );

        let transcript = session.transcript();
        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript[0].answer, "A");
        assert_eq!(transcript[1].answer, "C");
    }
}
