use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Parameters for launching a new focus session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSpec {
    pub activity_name: Option<String>,
    pub color_tag: Option<String>,
    pub total_seconds: u64,
}

impl SessionSpec {
    pub fn untagged(total_seconds: u64) -> Self {
        Self {
            activity_name: None,
            color_tag: None,
            total_seconds,
        }
    }
}

/// A persisted focus session. At most one session is current at a time;
/// while current it is mutated only through the timer state machine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FocusSession {
    pub id: String,
    pub activity_name: Option<String>,
    pub color_tag: Option<String>,
    pub total_seconds: u64,
    pub spent_seconds: u64,
    pub paused_amount: u32,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FocusSession {
    pub fn new(spec: SessionSpec, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            activity_name: spec.activity_name,
            color_tag: spec.color_tag,
            total_seconds: spec.total_seconds,
            spent_seconds: 0,
            paused_amount: 0,
            completed: false,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn remaining_seconds(&self) -> u64 {
        self.total_seconds.saturating_sub(self.spent_seconds)
    }
}
