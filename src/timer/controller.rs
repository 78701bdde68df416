use std::{sync::Arc, time::Duration};

use anyhow::{bail, Result};
use chrono::Utc;
use log::{error, info, warn};
use tokio::{
    sync::{watch, Mutex},
    task::JoinHandle,
    time::{self, Instant},
};
use tokio_util::sync::CancellationToken;

use crate::{
    db::Database,
    models::{FocusSession, SessionSpec},
};

use super::snapshot::{SessionRecord, SnapshotStore, SyncStatus};
use super::state::{TimerPhase, TimerSnapshot, TimerState};

/// Cadence of the background ticker.
const TICK_INTERVAL: Duration = Duration::from_secs(1);
/// Local crash-recovery checkpoint, in ticks.
const LOCAL_CHECKPOINT_EVERY_TICKS: u32 = 2;
/// Upper bound on the remote sync interval, in seconds.
const MAX_SYNC_INTERVAL_SECS: u64 = 300;
/// Fraction of the session length between remote syncs.
const SYNC_INTERVAL_RATIO: f64 = 0.2;

/// Remote sync cadence derived from the session length, floored at one
/// second so even very short sessions sync before completing.
fn sync_interval_secs(total_seconds: u64) -> u32 {
    ((total_seconds as f64 * SYNC_INTERVAL_RATIO) as u64)
        .min(MAX_SYNC_INTERVAL_SECS)
        .max(1) as u32
}

type CompletionHook = Arc<dyn Fn(&FocusSession) + Send + Sync>;

struct TickerHandle {
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

enum TickOutcome {
    Progress(FocusSession),
    Completed(FocusSession),
}

enum Transition {
    ToPaused(FocusSession),
    ToRunning(FocusSession),
}

/// Owner of the single active session.
///
/// Clonable handle; all clones share one state machine. The controller owns
/// at most one ticker task at a time, created when a session starts running
/// and cancelled deterministically when it stops, so no tick ever fires
/// against a session that is no longer current.
#[derive(Clone)]
pub struct TimerController {
    state: Arc<Mutex<TimerState>>,
    db: Database,
    store: Arc<SnapshotStore>,
    ticker: Arc<Mutex<Option<TickerHandle>>>,
    tick_interval: Duration,
    snapshot_tx: Arc<watch::Sender<TimerSnapshot>>,
    on_complete: Option<CompletionHook>,
}

impl TimerController {
    pub fn new(db: Database, store: SnapshotStore) -> Self {
        let (snapshot_tx, _) = watch::channel(TimerSnapshot::idle());
        Self {
            state: Arc::new(Mutex::new(TimerState::Idle)),
            db,
            store: Arc::new(store),
            ticker: Arc::new(Mutex::new(None)),
            tick_interval: TICK_INTERVAL,
            snapshot_tx: Arc::new(snapshot_tx),
            on_complete: None,
        }
    }

    /// Install the side effect fired when a session completes (sound,
    /// notification). Invoked exactly once per completed session.
    pub fn with_completion_hook(
        mut self,
        hook: impl Fn(&FocusSession) + Send + Sync + 'static,
    ) -> Self {
        self.on_complete = Some(Arc::new(hook));
        self
    }

    /// Read-only stream of timer snapshots, updated on every transition and
    /// tick.
    pub fn subscribe(&self) -> watch::Receiver<TimerSnapshot> {
        self.snapshot_tx.subscribe()
    }

    pub async fn snapshot(&self) -> TimerSnapshot {
        let guard = self.state.lock().await;
        TimerSnapshot::of(&guard)
    }

    /// Launch a new session, optionally starting it out paused.
    ///
    /// A session that is still current is drained first: its progress is
    /// flushed best-effort and the failure only logged, never allowed to
    /// block the new session.
    pub async fn start(&self, spec: SessionSpec, paused: bool) -> Result<TimerSnapshot> {
        if spec.total_seconds == 0 {
            bail!("total_seconds must be greater than zero");
        }

        let drained = {
            let mut guard = self.state.lock().await;
            guard.sync_spent_from_anchor();
            let old = guard.session().cloned();
            *guard = TimerState::Idle;
            old
        };
        self.cancel_ticker().await;

        if let Some(old) = drained {
            info!("Draining session {} before starting a new one", old.id);
            if let Err(err) = self
                .db
                .update_session_progress(&old.id, old.spent_seconds, old.paused_amount, Utc::now())
                .await
            {
                error!("Failed to flush drained session {}: {err}", old.id);
            }
        }

        let session = FocusSession::new(spec, Utc::now());
        self.db.insert_session(&session).await?;

        {
            let mut guard = self.state.lock().await;
            *guard = if paused {
                TimerState::Paused {
                    session: session.clone(),
                }
            } else {
                TimerState::Running {
                    session: session.clone(),
                    anchor: Instant::now(),
                    start_spent_seconds: session.spent_seconds,
                }
            };
        }

        self.write_record(session, paused, SyncStatus::Synced);
        if !paused {
            self.spawn_ticker().await;
        }

        Ok(self.publish().await)
    }

    /// `Running -> Paused` freezes the clock and flushes progress;
    /// `Paused -> Running` re-anchors so wall-clock drift never accumulates
    /// across pause cycles.
    pub async fn toggle(&self) -> Result<TimerSnapshot> {
        let transition = {
            let mut guard = self.state.lock().await;
            guard.sync_spent_from_anchor();
            match std::mem::take(&mut *guard) {
                TimerState::Idle => bail!("no active session to toggle"),
                TimerState::Running { mut session, .. } => {
                    session.paused_amount += 1;
                    *guard = TimerState::Paused {
                        session: session.clone(),
                    };
                    Transition::ToPaused(session)
                }
                TimerState::Paused { session } => {
                    *guard = TimerState::Running {
                        session: session.clone(),
                        anchor: Instant::now(),
                        start_spent_seconds: session.spent_seconds,
                    };
                    Transition::ToRunning(session)
                }
            }
        };

        match transition {
            Transition::ToPaused(session) => {
                self.cancel_ticker().await;
                // A pause is a natural checkpoint for the backing store.
                match self
                    .db
                    .update_session_progress(
                        &session.id,
                        session.spent_seconds,
                        session.paused_amount,
                        Utc::now(),
                    )
                    .await
                {
                    Ok(()) => self.write_record(session, true, SyncStatus::Synced),
                    Err(err) => {
                        warn!("Failed to sync paused session {}: {err}", session.id);
                        self.write_record(session, true, SyncStatus::Failed);
                    }
                }
            }
            Transition::ToRunning(session) => {
                self.write_record(session, false, SyncStatus::Synced);
                self.spawn_ticker().await;
            }
        }

        Ok(self.publish().await)
    }

    /// Stop whatever session is current and return it. With `persist`, a
    /// session stopped while running gets a final authoritative flush; if
    /// that flush fails the session stays in the local record marked
    /// `Failed` for replay on the next load.
    pub async fn stop(&self, persist: bool) -> Result<Option<FocusSession>> {
        let previous = {
            let mut guard = self.state.lock().await;
            guard.sync_spent_from_anchor();
            let phase = guard.phase();
            let session = guard.session().cloned();
            *guard = TimerState::Idle;
            session.map(|session| (phase, session))
        };
        self.cancel_ticker().await;

        let Some((phase, session)) = previous else {
            return Ok(None);
        };

        if let Err(err) = self.store.clear() {
            warn!("Failed to clear session snapshot: {err}");
        }

        if phase == TimerPhase::Running && persist {
            if let Err(err) = self
                .db
                .update_session_progress(
                    &session.id,
                    session.spent_seconds,
                    session.paused_amount,
                    Utc::now(),
                )
                .await
            {
                error!(
                    "Final flush for session {} failed; keeping a local record for replay: {err}",
                    session.id
                );
                self.write_record(session.clone(), true, SyncStatus::Failed);
            }
        }

        self.publish().await;
        Ok(Some(session))
    }

    /// Replay the durable record left by a previous process, if any.
    ///
    /// An unsynced record is flushed to the store first; a live session
    /// rehydrates as `Paused` (a monotonic anchor cannot survive a
    /// restart), a completed one just clears the record.
    pub async fn recover(&self) -> Result<TimerSnapshot> {
        {
            let guard = self.state.lock().await;
            if guard.phase() != TimerPhase::Idle {
                return Ok(TimerSnapshot::of(&guard));
            }
        }

        let Some(record) = self.store.read() else {
            return Ok(self.snapshot().await);
        };

        info!("Recovering session {} from local snapshot", record.session.id);

        let replayed = if record.sync == SyncStatus::Synced {
            true
        } else {
            match self.db.save_session(&record.session).await {
                Ok(()) => true,
                Err(err) => {
                    warn!(
                        "Replaying recovered session {} failed; keeping local record: {err}",
                        record.session.id
                    );
                    false
                }
            }
        };

        if record.session.completed {
            if replayed {
                if let Err(err) = self.store.clear() {
                    warn!("Failed to clear replayed snapshot: {err}");
                }
            }
            return Ok(self.publish().await);
        }

        {
            let mut guard = self.state.lock().await;
            *guard = TimerState::Paused {
                session: record.session.clone(),
            };
        }
        let status = if replayed {
            SyncStatus::Synced
        } else {
            SyncStatus::Failed
        };
        self.write_record(record.session, true, status);

        Ok(self.publish().await)
    }

    fn write_record(&self, session: FocusSession, paused: bool, sync: SyncStatus) {
        let record = SessionRecord::new(session, paused, sync);
        if let Err(err) = self.store.write(&record) {
            warn!("Failed to write session snapshot: {err}");
        }
    }

    async fn publish(&self) -> TimerSnapshot {
        let snapshot = {
            let guard = self.state.lock().await;
            TimerSnapshot::of(&guard)
        };
        let _ = self.snapshot_tx.send(snapshot.clone());
        snapshot
    }

    async fn spawn_ticker(&self) {
        let sync_every_ticks = {
            let guard = self.state.lock().await;
            match guard.session() {
                Some(session) => sync_interval_secs(session.total_seconds),
                None => return,
            }
        };

        let mut ticker_guard = self.ticker.lock().await;
        if let Some(handle) = ticker_guard.take() {
            handle.cancel.cancel();
            handle.task.abort();
        }

        let cancel = CancellationToken::new();
        let token = cancel.clone();
        let state = self.state.clone();
        let db = self.db.clone();
        let store = self.store.clone();
        let snapshot_tx = self.snapshot_tx.clone();
        let on_complete = self.on_complete.clone();
        let tick_interval = self.tick_interval;

        let task = tokio::spawn(async move {
            let mut interval = time::interval(tick_interval);
            let mut ticks: u32 = 0;
            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = interval.tick() => {}
                }

                let outcome = {
                    let mut guard = state.lock().await;
                    guard.sync_spent_from_anchor();
                    match &mut *guard {
                        TimerState::Running { session, .. } => {
                            if session.spent_seconds >= session.total_seconds {
                                session.spent_seconds = session.total_seconds;
                                session.completed = true;
                                let finished = session.clone();
                                *guard = TimerState::Idle;
                                TickOutcome::Completed(finished)
                            } else {
                                TickOutcome::Progress(session.clone())
                            }
                        }
                        _ => break,
                    }
                };

                match outcome {
                    TickOutcome::Completed(session) => {
                        info!("Session {} completed", session.id);
                        if let Some(hook) = on_complete.as_ref() {
                            hook(&session);
                        }
                        match db
                            .mark_session_completed(&session.id, session.spent_seconds, Utc::now())
                            .await
                        {
                            Ok(()) => {
                                if let Err(err) = store.clear() {
                                    warn!("Failed to clear session snapshot: {err}");
                                }
                            }
                            Err(err) => {
                                error!(
                                    "Failed to persist completed session {}: {err}",
                                    session.id
                                );
                                let record =
                                    SessionRecord::new(session, true, SyncStatus::Failed);
                                if let Err(store_err) = store.write(&record) {
                                    error!("Failed to keep unsynced record: {store_err}");
                                }
                            }
                        }
                        let _ = snapshot_tx.send(TimerSnapshot::idle());
                        break;
                    }
                    TickOutcome::Progress(session) => {
                        ticks = ticks.wrapping_add(1);

                        let _ = snapshot_tx.send(TimerSnapshot {
                            phase: TimerPhase::Running,
                            spent_seconds: session.spent_seconds,
                            remaining_seconds: session.remaining_seconds(),
                            session: Some(session.clone()),
                        });

                        if ticks % LOCAL_CHECKPOINT_EVERY_TICKS == 0 {
                            let record =
                                SessionRecord::new(session.clone(), false, SyncStatus::Pending);
                            if let Err(err) = store.write(&record) {
                                warn!("Failed to write session snapshot: {err}");
                            }
                        }

                        if ticks % sync_every_ticks == 0 {
                            // Fire and forget; a failure just waits for the
                            // next periodic attempt.
                            let db = db.clone();
                            let store = store.clone();
                            tokio::spawn(async move {
                                match db
                                    .update_session_progress(
                                        &session.id,
                                        session.spent_seconds,
                                        session.paused_amount,
                                        Utc::now(),
                                    )
                                    .await
                                {
                                    Ok(()) => {
                                        let record = SessionRecord::new(
                                            session,
                                            false,
                                            SyncStatus::Synced,
                                        );
                                        if let Err(err) = store.write(&record) {
                                            warn!("Failed to write session snapshot: {err}");
                                        }
                                    }
                                    Err(err) => {
                                        warn!("Periodic session sync failed: {err}");
                                        let record = SessionRecord::new(
                                            session,
                                            false,
                                            SyncStatus::Failed,
                                        );
                                        if let Err(store_err) = store.write(&record) {
                                            warn!(
                                                "Failed to write session snapshot: {store_err}"
                                            );
                                        }
                                    }
                                }
                            });
                        }
                    }
                }
            }
        });

        *ticker_guard = Some(TickerHandle { cancel, task });
    }

    async fn cancel_ticker(&self) {
        if let Some(handle) = self.ticker.lock().await.take() {
            handle.cancel.cancel();
            handle.task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sync_interval_tracks_session_length() {
        assert_eq!(sync_interval_secs(60), 12);
        assert_eq!(sync_interval_secs(1500), 300);
        assert_eq!(sync_interval_secs(7200), 300);
        // Floored so short sessions still sync
        assert_eq!(sync_interval_secs(3), 1);
    }
}
