//! Session engine — one tokio task per session owning its `Session`.
//!
//! The browser original ran the progression logic on the UI event loop;
//! here the actor task is that loop. HTTP handlers, timers, and completed
//! generation calls all send `EngineMsg`s down one mpsc channel, and the
//! task applies them strictly one at a time, so every transition runs to
//! completion before the next input is seen.
//!
//! Async continuations never touch the session directly: a spawned
//! follow-up call sends its result back with the epoch it was requested
//! under, and the engine drops anything whose epoch is no longer current.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::evaluation::history::EvaluationHistory;
use crate::evaluation::rating::{evaluate_session, SessionEvaluation};
use crate::interview::generator::InterviewModel;
use crate::interview::machine::{apply_event, Effect, SessionEvent};
use crate::interview::session::{Phase, Session, SessionSnapshot};
use crate::interview::timers::TimerSet;

const ENGINE_CHANNEL_CAPACITY: usize = 64;

/// Everything that can be delivered to a session task.
#[derive(Debug)]
pub enum EngineMsg {
    Snapshot {
        reply: oneshot::Sender<SessionSnapshot>,
    },
    Answer {
        text: String,
        reply: oneshot::Sender<SessionSnapshot>,
    },
    Activity {
        draft: String,
    },
    UtteranceEnded,
    End {
        reply: oneshot::Sender<SessionSnapshot>,
    },
    IntroFinished {
        epoch: u64,
    },
    HelpPromptDue {
        epoch: u64,
    },
    AutoAdvanceWarning {
        epoch: u64,
    },
    AutoAdvanceDue {
        epoch: u64,
    },
    FollowupReady {
        index: usize,
        epoch: u64,
        result: Result<String, String>,
    },
    EvaluationReady {
        evaluation: Box<SessionEvaluation>,
    },
}

/// Collaborators the engine hands to its spawned tasks.
#[derive(Clone)]
pub struct EngineDeps {
    pub model: Arc<dyn InterviewModel>,
    pub history: Arc<dyn EvaluationHistory>,
}

/// Cheap handle to a running session task.
#[derive(Clone)]
pub struct SessionHandle {
    tx: mpsc::Sender<EngineMsg>,
}

impl SessionHandle {
    pub async fn snapshot(&self) -> Result<SessionSnapshot, AppError> {
        self.roundtrip(|reply| EngineMsg::Snapshot { reply }).await
    }

    pub async fn submit_answer(&self, text: String) -> Result<SessionSnapshot, AppError> {
        self.roundtrip(|reply| EngineMsg::Answer { text, reply })
            .await
    }

    pub async fn activity(&self, draft: String) -> Result<(), AppError> {
        self.tx
            .send(EngineMsg::Activity { draft })
            .await
            .map_err(|_| session_gone())
    }

    pub async fn utterance_ended(&self) -> Result<(), AppError> {
        self.tx
            .send(EngineMsg::UtteranceEnded)
            .await
            .map_err(|_| session_gone())
    }

    pub async fn end(&self) -> Result<SessionSnapshot, AppError> {
        self.roundtrip(|reply| EngineMsg::End { reply }).await
    }

    async fn roundtrip<F>(&self, make: F) -> Result<SessionSnapshot, AppError>
    where
        F: FnOnce(oneshot::Sender<SessionSnapshot>) -> EngineMsg,
    {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send(make(reply_tx))
            .await
            .map_err(|_| session_gone())?;
        reply_rx.await.map_err(|_| session_gone())
    }
}

fn session_gone() -> AppError {
    AppError::Internal(anyhow::anyhow!("session task terminated"))
}

/// Live sessions, keyed by id. Sessions are in-memory only; a restart
/// forgets them (evaluation history is the only durable output).
#[derive(Clone, Default)]
pub struct SessionRegistry {
    inner: Arc<RwLock<HashMap<Uuid, SessionHandle>>>,
}

impl SessionRegistry {
    pub fn insert(&self, id: Uuid, handle: SessionHandle) {
        self.inner
            .write()
            .expect("session registry lock poisoned")
            .insert(id, handle);
    }

    pub fn get(&self, id: &Uuid) -> Option<SessionHandle> {
        self.inner
            .read()
            .expect("session registry lock poisoned")
            .get(id)
            .cloned()
    }
}

/// Spawns the session task and returns its handle.
pub fn spawn_session(session: Session, deps: EngineDeps) -> SessionHandle {
    let (tx, rx) = mpsc::channel(ENGINE_CHANNEL_CAPACITY);
    let handle = SessionHandle { tx: tx.clone() };
    tokio::spawn(run_session(session, rx, tx, deps));
    handle
}

async fn run_session(
    mut session: Session,
    mut rx: mpsc::Receiver<EngineMsg>,
    tx: mpsc::Sender<EngineMsg>,
    deps: EngineDeps,
) {
    let mut timers = TimerSet::default();

    if session.phase == Phase::Introduction {
        timers.schedule_intro(&tx);
    }

    while let Some(msg) = rx.recv().await {
        match msg {
            EngineMsg::Snapshot { reply } => {
                let _ = reply.send(session.snapshot());
            }
            EngineMsg::Answer { text, reply } => {
                let effects = apply_event(&mut session, SessionEvent::AnswerSubmitted { text });
                run_effects(effects, &session, &mut timers, &tx, &deps);
                let _ = reply.send(session.snapshot());
            }
            EngineMsg::Activity { draft } => {
                let effects = apply_event(&mut session, SessionEvent::InputActivity { draft });
                run_effects(effects, &session, &mut timers, &tx, &deps);
            }
            EngineMsg::UtteranceEnded => {
                let effects = apply_event(&mut session, SessionEvent::UtteranceEnded);
                run_effects(effects, &session, &mut timers, &tx, &deps);
            }
            EngineMsg::End { reply } => {
                let effects = apply_event(&mut session, SessionEvent::EndRequested);
                run_effects(effects, &session, &mut timers, &tx, &deps);
                let _ = reply.send(session.snapshot());
            }
            EngineMsg::IntroFinished { epoch } => {
                if epoch != timers.epoch() {
                    continue;
                }
                let effects = apply_event(&mut session, SessionEvent::IntroFinished);
                run_effects(effects, &session, &mut timers, &tx, &deps);
            }
            EngineMsg::HelpPromptDue { epoch } => {
                if epoch != timers.epoch() {
                    continue;
                }
                let effects = apply_event(&mut session, SessionEvent::HelpPromptDue);
                run_effects(effects, &session, &mut timers, &tx, &deps);
            }
            EngineMsg::AutoAdvanceWarning { epoch } => {
                if epoch != timers.epoch() {
                    continue;
                }
                let effects = apply_event(&mut session, SessionEvent::AutoAdvanceWarning);
                run_effects(effects, &session, &mut timers, &tx, &deps);
            }
            EngineMsg::AutoAdvanceDue { epoch } => {
                if epoch != timers.epoch() {
                    continue;
                }
                let effects = apply_event(&mut session, SessionEvent::AutoAdvanceDue);
                run_effects(effects, &session, &mut timers, &tx, &deps);
            }
            EngineMsg::FollowupReady {
                index,
                epoch,
                result,
            } => {
                if epoch != timers.epoch() {
                    debug!(
                        "Discarding stale follow-up for question {index} \
                         (epoch {epoch}, current {})",
                        timers.epoch()
                    );
                    continue;
                }
                let effects =
                    apply_event(&mut session, SessionEvent::FollowupReady { index, result });
                run_effects(effects, &session, &mut timers, &tx, &deps);
            }
            EngineMsg::EvaluationReady { evaluation } => {
                let effects = apply_event(
                    &mut session,
                    SessionEvent::EvaluationReady {
                        evaluation: *evaluation,
                    },
                );
                run_effects(effects, &session, &mut timers, &tx, &deps);
            }
        }
    }
}

/// Executes the effects of one transition. Synchronous — anything slow is
/// spawned, stamped with the current epoch, and reports back through the
/// channel.
fn run_effects(
    effects: Vec<Effect>,
    session: &Session,
    timers: &mut TimerSet,
    tx: &mpsc::Sender<EngineMsg>,
    deps: &EngineDeps,
) {
    for effect in effects {
        match effect {
            Effect::RestartTimers => {
                timers.restart(tx);
            }
            Effect::CancelTimers => {
                timers.invalidate();
            }
            Effect::RequestFollowup { index } => {
                let epoch = timers.epoch();
                let model = deps.model.clone();
                let reply_tx = tx.clone();
                let main_question = session.questions[index].text.clone();
                let answer = session
                    .answers
                    .get(&index)
                    .map(|record| record.main.clone())
                    .unwrap_or_default();
                let resume = session.resume_text.clone();
                let job_description = session.job_description.clone();

                tokio::spawn(async move {
                    let result = model
                        .follow_up(&main_question, &answer, &resume, &job_description)
                        .await
                        .map_err(|e| e.to_string());
                    let _ = reply_tx
                        .send(EngineMsg::FollowupReady {
                            index,
                            epoch,
                            result,
                        })
                        .await;
                });
            }
            Effect::Evaluate => {
                let transcript = session.transcript();
                let model = deps.model.clone();
                let history = deps.history.clone();
                let reply_tx = tx.clone();
                let session_id = session.id;
                let candidate_name = session.candidate_name.clone();

                tokio::spawn(async move {
                    let evaluation = evaluate_session(model.as_ref(), &transcript).await;
                    if let Err(e) = history
                        .append_session(session_id, &candidate_name, &evaluation)
                        .await
                    {
                        warn!("Failed to persist session evaluation for {session_id}: {e}");
                    }
                    let _ = reply_tx
                        .send(EngineMsg::EvaluationReady {
                            evaluation: Box::new(evaluation),
                        })
                        .await;
                });
            }
        }
    }
}
