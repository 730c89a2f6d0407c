//! Database operations for notifications
//!
//! Notification rows carry a (trigger_kind, trigger_id) uniqueness key
//! so each triggering entity creates at most one notification no
//! matter how many times the write path retries.

use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::shared::social::{Notification, NotificationTrigger};

fn row_to_notification(row: &sqlx::postgres::PgRow) -> Result<Notification, sqlx::Error> {
    let kind: String = row.get("trigger_kind");
    let trigger_id: Uuid = row.get("trigger_id");
    let actor_id: Uuid = row.get("actor_id");
    let post_id: Option<Uuid> = row.get("post_id");

    let trigger = match kind.as_str() {
        "like" => NotificationTrigger::Like {
            like_id: trigger_id,
            post_id: post_id.ok_or_else(|| sqlx::Error::ColumnNotFound("post_id".into()))?,
            actor_id,
        },
        "comment" => NotificationTrigger::Comment {
            comment_id: trigger_id,
            post_id: post_id.ok_or_else(|| sqlx::Error::ColumnNotFound("post_id".into()))?,
            actor_id,
        },
        "buddy_request" => NotificationTrigger::BuddyRequest {
            request_id: trigger_id,
            actor_id,
        },
        other => {
            return Err(sqlx::Error::Decode(
                format!("unknown trigger kind: {}", other).into(),
            ))
        }
    };

    Ok(Notification {
        id: row.get("id"),
        owner_id: row.get("owner_id"),
        action: trigger.action(),
        trigger,
        read: row.get("read"),
        created_at: row.get("created_at"),
    })
}

/// Insert a notification, at most once per trigger entity
///
/// Returns `None` when a notification for this trigger already exists;
/// the conflict is not an error.
pub async fn create_notification(
    pool: &PgPool,
    notification: &Notification,
) -> Result<Option<Notification>, sqlx::Error> {
    let post_id = match &notification.trigger {
        NotificationTrigger::Like { post_id, .. } => Some(*post_id),
        NotificationTrigger::Comment { post_id, .. } => Some(*post_id),
        NotificationTrigger::BuddyRequest { .. } => None,
    };

    let row = sqlx::query(
        r#"
        INSERT INTO notifications
            (id, owner_id, trigger_kind, trigger_id, actor_id, post_id, read, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, FALSE, $7)
        ON CONFLICT (trigger_kind, trigger_id) DO NOTHING
        RETURNING id, owner_id, trigger_kind, trigger_id, actor_id, post_id, read, created_at
        "#,
    )
    .bind(notification.id)
    .bind(notification.owner_id)
    .bind(notification.trigger.kind_str())
    .bind(notification.trigger.trigger_id())
    .bind(notification.trigger.actor_id())
    .bind(post_id)
    .bind(notification.created_at)
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(row_to_notification).transpose()
}

/// List a user's notifications, newest first
pub async fn list_for_owner(
    pool: &PgPool,
    owner_id: Uuid,
    limit: i64,
) -> Result<Vec<Notification>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT id, owner_id, trigger_kind, trigger_id, actor_id, post_id, read, created_at
        FROM notifications
        WHERE owner_id = $1
        ORDER BY created_at DESC
        LIMIT $2
        "#,
    )
    .bind(owner_id)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    rows.iter().map(row_to_notification).collect()
}

/// Mark notifications read, scoped to the owner
///
/// With an empty id list, marks all of the owner's notifications.
/// Rows not owned by `owner_id` never match, so a caller cannot flip
/// another user's notifications by guessing ids.
pub async fn mark_read(
    pool: &PgPool,
    owner_id: Uuid,
    notification_ids: &[Uuid],
) -> Result<u64, sqlx::Error> {
    let result = if notification_ids.is_empty() {
        sqlx::query(
            r#"
            UPDATE notifications
            SET read = TRUE
            WHERE owner_id = $1 AND read = FALSE
            "#,
        )
        .bind(owner_id)
        .execute(pool)
        .await?
    } else {
        sqlx::query(
            r#"
            UPDATE notifications
            SET read = TRUE
            WHERE owner_id = $1 AND read = FALSE AND id = ANY($2)
            "#,
        )
        .bind(owner_id)
        .bind(notification_ids)
        .execute(pool)
        .await?
    };

    Ok(result.rows_affected())
}
