//! SQLite-backed session store.
//!
//! The connection lives on a dedicated worker thread; callers submit
//! closures over an mpsc channel and await the reply on a oneshot. This
//! keeps rusqlite off the async executor while giving every component a
//! cheap clonable handle.

use std::{
    convert::TryFrom,
    path::{Path, PathBuf},
    sync::{mpsc, Arc, Mutex},
    thread::{self, JoinHandle},
};

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};
use log::{error, info};
use rusqlite::{params, Connection, Row};
use tokio::sync::oneshot;

mod migrations;

use crate::models::FocusSession;
use migrations::run_migrations;

type DbTask = Box<dyn FnOnce(&mut Connection) + Send + 'static>;

enum DbCommand {
    Execute(DbTask),
    Shutdown,
}

struct DatabaseInner {
    sender: mpsc::Sender<DbCommand>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl Drop for DatabaseInner {
    fn drop(&mut self) {
        let mut guard = match self.worker.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        if let Some(handle) = guard.take() {
            if let Err(err) = self.sender.send(DbCommand::Shutdown) {
                error!("Failed to send shutdown to DB thread: {err}");
            }
            if let Err(join_err) = handle.join() {
                error!("Failed to join DB thread: {join_err:?}");
            }
        }
    }
}

fn to_i64(value: u64) -> Result<i64> {
    i64::try_from(value).map_err(|_| anyhow!("value {value} exceeds SQLite INTEGER range"))
}

fn to_u64(value: i64) -> Result<u64> {
    u64::try_from(value).map_err(|_| anyhow!("value {value} is negative"))
}

fn to_u32(value: i64) -> Result<u32> {
    u32::try_from(value).map_err(|_| anyhow!("value {value} is out of u32 range"))
}

fn parse_datetime(value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|err| anyhow!("invalid datetime '{value}': {err}"))
}

fn read_session(row: &Row<'_>) -> Result<FocusSession> {
    Ok(FocusSession {
        id: row.get::<_, String>(0)?,
        activity_name: row.get::<_, Option<String>>(1)?,
        color_tag: row.get::<_, Option<String>>(2)?,
        total_seconds: to_u64(row.get::<_, i64>(3)?)?,
        spent_seconds: to_u64(row.get::<_, i64>(4)?)?,
        paused_amount: to_u32(row.get::<_, i64>(5)?)?,
        completed: row.get::<_, i64>(6)? != 0,
        created_at: parse_datetime(&row.get::<_, String>(7)?)?,
        updated_at: parse_datetime(&row.get::<_, String>(8)?)?,
    })
}

const SESSION_COLUMNS: &str =
    "id, activity_name, color_tag, total_seconds, spent_seconds, paused_amount, completed, created_at, updated_at";

#[derive(Clone)]
pub struct Database {
    inner: Arc<DatabaseInner>,
    db_path: Arc<PathBuf>,
}

impl Database {
    pub fn new(db_path: PathBuf) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("failed to create database directory {}", parent.display())
            })?;
        }

        let (command_tx, command_rx) = mpsc::channel::<DbCommand>();
        let (ready_tx, ready_rx) = mpsc::channel();
        let path_for_thread = db_path.clone();

        let worker = thread::Builder::new()
            .name("tempo-db".into())
            .spawn(move || {
                let mut conn = match Connection::open(&path_for_thread) {
                    Ok(connection) => connection,
                    Err(err) => {
                        let _ = ready_tx.send(
                            Err(anyhow::Error::new(err).context("failed to open SQLite database")),
                        );
                        return;
                    }
                };

                if let Err(err) = conn.pragma_update(None, "journal_mode", "WAL") {
                    error!("Failed to enable WAL mode: {err}");
                }

                let init_result =
                    run_migrations(&mut conn).context("failed to run database migrations");
                if ready_tx.send(init_result).is_err() {
                    error!("DB initialization receiver dropped before ready signal");
                    return;
                }

                while let Ok(command) = command_rx.recv() {
                    match command {
                        DbCommand::Execute(task) => {
                            task(&mut conn);
                        }
                        DbCommand::Shutdown => break,
                    }
                }

                info!("Database thread shutting down");
            })
            .with_context(|| "failed to spawn database worker thread")?;

        ready_rx
            .recv()
            .context("database worker exited before signaling readiness")??;

        info!("Database initialized at {}", db_path.as_path().display());

        Ok(Self {
            inner: Arc::new(DatabaseInner {
                sender: command_tx,
                worker: Mutex::new(Some(worker)),
            }),
            db_path: Arc::new(db_path),
        })
    }

    pub fn path(&self) -> &Path {
        self.db_path.as_path()
    }

    pub async fn execute<F, T>(&self, task: F) -> Result<T>
    where
        F: FnOnce(&mut Connection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let sender = self.inner.sender.clone();
        let (reply_tx, reply_rx) = oneshot::channel();

        let command = DbCommand::Execute(Box::new(move |conn| {
            let result = task(conn);
            if reply_tx.send(result).is_err() {
                error!("DB caller dropped before receiving result");
            }
        }));

        sender
            .send(command)
            .map_err(|err| anyhow!("failed to send command to DB thread: {err}"))?;

        reply_rx
            .await
            .map_err(|_| anyhow!("database thread terminated unexpectedly"))?
    }

    pub async fn insert_session(&self, session: &FocusSession) -> Result<()> {
        let record = session.clone();
        self.execute(move |conn| {
            conn.execute(
                "INSERT INTO sessions (id, activity_name, color_tag, total_seconds, spent_seconds, paused_amount, completed, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                params![
                    record.id,
                    record.activity_name,
                    record.color_tag,
                    to_i64(record.total_seconds)?,
                    to_i64(record.spent_seconds)?,
                    record.paused_amount as i64,
                    record.completed as i64,
                    record.created_at.to_rfc3339(),
                    record.updated_at.to_rfc3339(),
                ],
            )
            .with_context(|| "failed to insert session")?;
            Ok(())
        })
        .await
    }

    /// Idempotent write of a full session row, used when replaying a
    /// recovered snapshot whose row may or may not exist.
    pub async fn save_session(&self, session: &FocusSession) -> Result<()> {
        let record = session.clone();
        self.execute(move |conn| {
            conn.execute(
                "INSERT INTO sessions (id, activity_name, color_tag, total_seconds, spent_seconds, paused_amount, completed, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
                 ON CONFLICT(id) DO UPDATE SET
                     spent_seconds = excluded.spent_seconds,
                     paused_amount = excluded.paused_amount,
                     completed = excluded.completed,
                     updated_at = excluded.updated_at",
                params![
                    record.id,
                    record.activity_name,
                    record.color_tag,
                    to_i64(record.total_seconds)?,
                    to_i64(record.spent_seconds)?,
                    record.paused_amount as i64,
                    record.completed as i64,
                    record.created_at.to_rfc3339(),
                    record.updated_at.to_rfc3339(),
                ],
            )
            .with_context(|| "failed to save session")?;
            Ok(())
        })
        .await
    }

    pub async fn update_session_progress(
        &self,
        session_id: &str,
        spent_seconds: u64,
        paused_amount: u32,
        updated_at: DateTime<Utc>,
    ) -> Result<()> {
        let session_id = session_id.to_string();
        self.execute(move |conn| {
            conn.execute(
                "UPDATE sessions
                 SET spent_seconds = ?1,
                     paused_amount = ?2,
                     updated_at = ?3
                 WHERE id = ?4",
                params![
                    to_i64(spent_seconds)?,
                    paused_amount as i64,
                    updated_at.to_rfc3339(),
                    session_id,
                ],
            )
            .with_context(|| "failed to update session progress")?;
            Ok(())
        })
        .await
    }

    pub async fn mark_session_completed(
        &self,
        session_id: &str,
        spent_seconds: u64,
        updated_at: DateTime<Utc>,
    ) -> Result<()> {
        let session_id = session_id.to_string();
        self.execute(move |conn| {
            conn.execute(
                "UPDATE sessions
                 SET completed = 1,
                     spent_seconds = ?1,
                     updated_at = ?2
                 WHERE id = ?3",
                params![to_i64(spent_seconds)?, updated_at.to_rfc3339(), session_id],
            )
            .with_context(|| "failed to mark session completed")?;
            Ok(())
        })
        .await
    }

    pub async fn get_session(&self, session_id: &str) -> Result<Option<FocusSession>> {
        let session_id = session_id.to_string();
        self.execute(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {SESSION_COLUMNS} FROM sessions WHERE id = ?1"
            ))?;
            let mut rows = stmt.query(params![session_id])?;
            match rows.next()? {
                Some(row) => Ok(Some(read_session(row)?)),
                None => Ok(None),
            }
        })
        .await
    }

    /// Sessions whose creation instant falls in `[from, to)`, oldest first.
    pub async fn get_sessions_in_range(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<FocusSession>> {
        self.execute(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {SESSION_COLUMNS} FROM sessions
                 WHERE created_at >= ?1 AND created_at < ?2
                 ORDER BY created_at ASC"
            ))?;
            let mut rows = stmt.query(params![from.to_rfc3339(), to.to_rfc3339()])?;
            let mut sessions = Vec::new();
            while let Some(row) = rows.next()? {
                sessions.push(read_session(row)?);
            }
            Ok(sessions)
        })
        .await
    }

    pub async fn list_recent_sessions(&self, limit: u32) -> Result<Vec<FocusSession>> {
        self.execute(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {SESSION_COLUMNS} FROM sessions
                 ORDER BY created_at DESC
                 LIMIT ?1"
            ))?;
            let mut rows = stmt.query(params![limit as i64])?;
            let mut sessions = Vec::new();
            while let Some(row) = rows.next()? {
                sessions.push(read_session(row)?);
            }
            Ok(sessions)
        })
        .await
    }
}
