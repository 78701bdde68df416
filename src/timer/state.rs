//! Timer state machine data types.
//!
//! Exactly one variant of [`TimerState`] is live at any time. Elapsed time
//! while running is always derived from the monotonic anchor captured at the
//! start of the current running window, never from counting ticks, so the
//! value stays correct no matter how the caller's thread is scheduled.

use serde::{Deserialize, Serialize};
use tokio::time::Instant;

use crate::models::FocusSession;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TimerPhase {
    Idle,
    Running,
    Paused,
}

#[derive(Debug, Clone)]
pub enum TimerState {
    Idle,
    Running {
        session: FocusSession,
        /// Monotonic instant the current running window started.
        anchor: Instant,
        /// Seconds already on the clock when that window started.
        start_spent_seconds: u64,
    },
    Paused {
        session: FocusSession,
    },
}

impl Default for TimerState {
    fn default() -> Self {
        TimerState::Idle
    }
}

impl TimerState {
    pub fn phase(&self) -> TimerPhase {
        match self {
            TimerState::Idle => TimerPhase::Idle,
            TimerState::Running { .. } => TimerPhase::Running,
            TimerState::Paused { .. } => TimerPhase::Paused,
        }
    }

    pub fn session(&self) -> Option<&FocusSession> {
        match self {
            TimerState::Idle => None,
            TimerState::Running { session, .. } | TimerState::Paused { session } => Some(session),
        }
    }

    /// Seconds on the clock right now, clamped to the session target.
    pub fn spent_seconds(&self) -> u64 {
        match self {
            TimerState::Idle => 0,
            TimerState::Running {
                session,
                anchor,
                start_spent_seconds,
            } => start_spent_seconds
                .saturating_add(anchor.elapsed().as_secs())
                .min(session.total_seconds),
            TimerState::Paused { session } => session.spent_seconds,
        }
    }

    pub fn remaining_seconds(&self) -> u64 {
        match self.session() {
            Some(session) => session.total_seconds.saturating_sub(self.spent_seconds()),
            None => 0,
        }
    }

    /// Fold the anchor-derived elapsed time back into the session record.
    /// Idempotent; duplicate or delayed calls recompute from the same
    /// anchor pair rather than accumulating.
    pub fn sync_spent_from_anchor(&mut self) {
        let spent = self.spent_seconds();
        if let TimerState::Running { session, .. } = self {
            session.spent_seconds = spent;
        }
    }

    pub fn is_complete(&self) -> bool {
        match self.session() {
            Some(session) => self.spent_seconds() >= session.total_seconds,
            None => false,
        }
    }
}

/// Serializable view of the state machine published to observers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerSnapshot {
    pub phase: TimerPhase,
    pub session: Option<FocusSession>,
    pub spent_seconds: u64,
    pub remaining_seconds: u64,
}

impl TimerSnapshot {
    pub fn idle() -> Self {
        Self {
            phase: TimerPhase::Idle,
            session: None,
            spent_seconds: 0,
            remaining_seconds: 0,
        }
    }

    pub(crate) fn of(state: &TimerState) -> Self {
        Self {
            phase: state.phase(),
            session: state.session().cloned(),
            spent_seconds: state.spent_seconds(),
            remaining_seconds: state.remaining_seconds(),
        }
    }
}
