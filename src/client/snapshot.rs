//! Durable Snapshot Store
//!
//! Persists the unread aggregate `{total, by_buddy, updated_at}` where
//! every tab of the same user can see it. Adoption is last-writer-wins
//! by snapshot timestamp, enforced inside the store, so two tabs racing
//! to write cannot regress the count no matter which write lands last.
//!
//! The SQLite implementation is the durable store shared across tabs;
//! the in-memory implementation backs tests and single-process embeds.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use crate::shared::UnreadSnapshot;

/// Errors from the durable snapshot layer
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("snapshot database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("snapshot serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("stored snapshot has invalid timestamp: {0}")]
    InvalidTimestamp(i64),

    #[error("snapshot store io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shared store for unread snapshots, visible to all of a user's tabs
///
/// `persist` applies last-writer-wins by `computed_at`: it returns
/// `true` when the incoming snapshot was adopted and `false` when an
/// equal-or-newer snapshot was already present. Callers never compare
/// timestamps themselves.
pub trait SnapshotStore {
    /// Load the current snapshot for a user, if any
    fn load(
        &self,
        user_id: Uuid,
    ) -> impl std::future::Future<Output = Result<Option<UnreadSnapshot>, SnapshotError>> + Send;

    /// Write a snapshot unless a newer one is already stored
    fn persist(
        &self,
        user_id: Uuid,
        snapshot: &UnreadSnapshot,
    ) -> impl std::future::Future<Output = Result<bool, SnapshotError>> + Send;
}

/// SQLite-backed snapshot store
///
/// One row per user. The upsert's `WHERE` clause carries the
/// last-writer-wins comparison so the check and the write are a single
/// atomic statement even with several tabs on the same database file.
#[derive(Debug, Clone)]
pub struct SqliteSnapshotStore {
    pool: SqlitePool,
}

impl SqliteSnapshotStore {
    /// Open or create the store at the given path
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, SnapshotError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let database_url = format!("sqlite:{}?mode=rwc", path.to_string_lossy());
        let pool = SqlitePool::connect(&database_url).await?;

        // WAL keeps concurrent tabs from serializing on the writer.
        sqlx::query("PRAGMA journal_mode=WAL").execute(&pool).await?;
        sqlx::query("PRAGMA synchronous=NORMAL")
            .execute(&pool)
            .await?;
        sqlx::query("PRAGMA busy_timeout=5000")
            .execute(&pool)
            .await?;

        let store = Self { pool };
        store.init_schema().await?;
        Ok(store)
    }

    /// Open the store at the platform data directory
    pub async fn open_default() -> Result<Self, SnapshotError> {
        let mut path = dirs::data_dir().unwrap_or_else(std::env::temp_dir);
        path.push("socialite");
        path.push("snapshots.db");
        Self::open(path).await
    }

    /// Open a private in-memory store
    pub async fn in_memory() -> Result<Self, SnapshotError> {
        let pool = SqlitePool::connect("sqlite::memory:").await?;
        let store = Self { pool };
        store.init_schema().await?;
        Ok(store)
    }

    async fn init_schema(&self) -> Result<(), SnapshotError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS unread_snapshots (
                user_id TEXT PRIMARY KEY,
                total INTEGER NOT NULL,
                by_buddy TEXT NOT NULL,
                updated_at INTEGER NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

impl SnapshotStore for SqliteSnapshotStore {
    async fn load(&self, user_id: Uuid) -> Result<Option<UnreadSnapshot>, SnapshotError> {
        let row = sqlx::query(
            "SELECT total, by_buddy, updated_at FROM unread_snapshots WHERE user_id = ?",
        )
        .bind(user_id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let total: i64 = row.get("total");
        let by_buddy_json: String = row.get("by_buddy");
        let updated_at_micros: i64 = row.get("updated_at");

        let by_buddy: HashMap<Uuid, i64> = serde_json::from_str(&by_buddy_json)?;
        let computed_at: DateTime<Utc> = DateTime::from_timestamp_micros(updated_at_micros)
            .ok_or(SnapshotError::InvalidTimestamp(updated_at_micros))?;

        Ok(Some(UnreadSnapshot {
            total,
            by_buddy,
            computed_at,
        }))
    }

    async fn persist(
        &self,
        user_id: Uuid,
        snapshot: &UnreadSnapshot,
    ) -> Result<bool, SnapshotError> {
        let by_buddy_json = serde_json::to_string(&snapshot.by_buddy)?;

        let result = sqlx::query(
            r#"
            INSERT INTO unread_snapshots (user_id, total, by_buddy, updated_at)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(user_id) DO UPDATE SET
                total = excluded.total,
                by_buddy = excluded.by_buddy,
                updated_at = excluded.updated_at
            WHERE excluded.updated_at > unread_snapshots.updated_at
            "#,
        )
        .bind(user_id.to_string())
        .bind(snapshot.total)
        .bind(by_buddy_json)
        .bind(snapshot.computed_at.timestamp_micros())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

/// In-memory snapshot store with the same last-writer-wins contract
#[derive(Debug, Clone, Default)]
pub struct MemorySnapshotStore {
    snapshots: Arc<Mutex<HashMap<Uuid, UnreadSnapshot>>>,
}

impl MemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnapshotStore for MemorySnapshotStore {
    async fn load(&self, user_id: Uuid) -> Result<Option<UnreadSnapshot>, SnapshotError> {
        let snapshots = self
            .snapshots
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        Ok(snapshots.get(&user_id).cloned())
    }

    async fn persist(
        &self,
        user_id: Uuid,
        snapshot: &UnreadSnapshot,
    ) -> Result<bool, SnapshotError> {
        let mut snapshots = self
            .snapshots
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        match snapshots.get(&user_id) {
            Some(existing) if !existing.is_superseded_by(snapshot) => Ok(false),
            _ => {
                snapshots.insert(user_id, snapshot.clone());
                Ok(true)
            }
        }
    }
}
