//! Inactivity and pacing timers for one session.
//!
//! Two timers run per active question: a gentle help-prompt nudge and the
//! authoritative auto-advance timer (with its warning two seconds before
//! firing). Both are rearmed from scratch on every input event and every
//! state transition — the invariant is at most one live timer pair, never a
//! stale one firing into a newer question's state.
//!
//! Every (re)arm bumps an epoch counter and aborts the previous tasks.
//! Events delivered to the engine carry the epoch they were scheduled
//! under; anything older than the current epoch is discarded. The same
//! epoch stamps in-flight follow-up generation calls, which is what makes
//! a forced transition safely discard a late result.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::interview::engine::EngineMsg;

/// Delay before the coach offers help on a silent question.
pub const HELP_PROMPT_DELAY: Duration = Duration::from_secs(10);
/// Total silence before the session auto-advances.
pub const AUTO_ADVANCE_SILENCE: Duration = Duration::from_secs(60);
/// How long before auto-advance the warning is surfaced.
pub const AUTO_ADVANCE_WARNING_LEAD: Duration = Duration::from_secs(2);
/// Visible per-question countdown. Display only — it never forces a
/// transition.
pub const QUESTION_COUNTDOWN: Duration = Duration::from_secs(120);
/// Pause between the panel introductions and question 1.
pub const INTRO_PAUSE: Duration = Duration::from_secs(2);

/// The live timers of one session, owned by its engine task.
#[derive(Debug, Default)]
pub struct TimerSet {
    epoch: u64,
    handles: Vec<JoinHandle<()>>,
}

impl TimerSet {
    /// The epoch current events must carry to be accepted.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Cancels whatever is armed and schedules a fresh help-prompt and
    /// auto-advance pair under a new epoch. Returns that epoch.
    pub fn restart(&mut self, tx: &mpsc::Sender<EngineMsg>) -> u64 {
        self.invalidate();
        let epoch = self.epoch;

        let help_tx = tx.clone();
        self.handles.push(tokio::spawn(async move {
            tokio::time::sleep(HELP_PROMPT_DELAY).await;
            let _ = help_tx.send(EngineMsg::HelpPromptDue { epoch }).await;
        }));

        let advance_tx = tx.clone();
        self.handles.push(tokio::spawn(async move {
            tokio::time::sleep(AUTO_ADVANCE_SILENCE - AUTO_ADVANCE_WARNING_LEAD).await;
            let _ = advance_tx
                .send(EngineMsg::AutoAdvanceWarning { epoch })
                .await;
            tokio::time::sleep(AUTO_ADVANCE_WARNING_LEAD).await;
            let _ = advance_tx.send(EngineMsg::AutoAdvanceDue { epoch }).await;
        }));

        epoch
    }

    /// Schedules the one-shot pause between panel introductions and the
    /// first question.
    pub fn schedule_intro(&mut self, tx: &mpsc::Sender<EngineMsg>) -> u64 {
        self.invalidate();
        let epoch = self.epoch;
        let intro_tx = tx.clone();
        self.handles.push(tokio::spawn(async move {
            tokio::time::sleep(INTRO_PAUSE).await;
            let _ = intro_tx.send(EngineMsg::IntroFinished { epoch }).await;
        }));
        epoch
    }

    /// Aborts all armed timers and bumps the epoch so that anything already
    /// queued (or any in-flight generation result) is dropped on arrival.
    pub fn invalidate(&mut self) {
        for handle in self.handles.drain(..) {
            handle.abort();
        }
        self.epoch += 1;
    }
}

impl Drop for TimerSet {
    fn drop(&mut self) {
        for handle in self.handles.drain(..) {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(rx: &mut mpsc::Receiver<EngineMsg>) -> Vec<EngineMsg> {
        let mut out = Vec::new();
        while let Ok(msg) = rx.try_recv() {
            out.push(msg);
        }
        out
    }

    #[tokio::test(start_paused = true)]
    async fn test_help_prompt_then_warning_then_advance() {
        let (tx, mut rx) = mpsc::channel(16);
        let mut timers = TimerSet::default();
        let epoch = timers.restart(&tx);

        let msg = rx.recv().await.unwrap();
        assert!(matches!(msg, EngineMsg::HelpPromptDue { epoch: e } if e == epoch));

        let msg = rx.recv().await.unwrap();
        assert!(matches!(msg, EngineMsg::AutoAdvanceWarning { epoch: e } if e == epoch));

        let msg = rx.recv().await.unwrap();
        assert!(matches!(msg, EngineMsg::AutoAdvanceDue { epoch: e } if e == epoch));
    }

    #[tokio::test(start_paused = true)]
    async fn test_warning_leads_advance_by_two_seconds() {
        let (tx, mut rx) = mpsc::channel(16);
        let mut timers = TimerSet::default();
        timers.restart(&tx);

        tokio::time::sleep(AUTO_ADVANCE_SILENCE - AUTO_ADVANCE_WARNING_LEAD).await;
        tokio::task::yield_now().await;
        let msgs = drain(&mut rx);
        assert!(msgs
            .iter()
            .any(|m| matches!(m, EngineMsg::AutoAdvanceWarning { .. })));
        assert!(!msgs
            .iter()
            .any(|m| matches!(m, EngineMsg::AutoAdvanceDue { .. })));

        tokio::time::sleep(AUTO_ADVANCE_WARNING_LEAD).await;
        tokio::task::yield_now().await;
        let msgs = drain(&mut rx);
        assert!(msgs
            .iter()
            .any(|m| matches!(m, EngineMsg::AutoAdvanceDue { .. })));
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_resets_the_full_window() {
        let (tx, mut rx) = mpsc::channel(16);
        let mut timers = TimerSet::default();
        timers.restart(&tx);

        // 50 seconds in, activity arrives and the timers restart.
        tokio::time::sleep(Duration::from_secs(50)).await;
        let epoch = timers.restart(&tx);

        // 30 more seconds (t=80): the old timer would have fired at t=60,
        // the fresh one is only halfway through its window.
        tokio::time::sleep(Duration::from_secs(30)).await;
        tokio::task::yield_now().await;
        assert!(!drain(&mut rx)
            .iter()
            .any(|m| matches!(m, EngineMsg::AutoAdvanceDue { .. })));

        // Full window after the restart (t=110) it fires, with the new epoch.
        tokio::time::sleep(Duration::from_secs(30)).await;
        tokio::task::yield_now().await;
        assert!(drain(&mut rx)
            .iter()
            .any(|m| matches!(m, EngineMsg::AutoAdvanceDue { epoch: e } if *e == epoch)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_invalidate_cancels_and_bumps_epoch() {
        let (tx, mut rx) = mpsc::channel(16);
        let mut timers = TimerSet::default();
        let old_epoch = timers.restart(&tx);
        timers.invalidate();
        assert!(timers.epoch() > old_epoch);

        tokio::time::sleep(AUTO_ADVANCE_SILENCE + Duration::from_secs(5)).await;
        tokio::task::yield_now().await;
        assert!(drain(&mut rx).is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_intro_pause_fires_once() {
        let (tx, mut rx) = mpsc::channel(16);
        let mut timers = TimerSet::default();
        let epoch = timers.schedule_intro(&tx);

        let msg = rx.recv().await.unwrap();
        assert!(matches!(msg, EngineMsg::IntroFinished { epoch: e } if e == epoch));

        tokio::time::sleep(Duration::from_secs(120)).await;
        tokio::task::yield_now().await;
        assert!(drain(&mut rx).is_empty());
    }
}
