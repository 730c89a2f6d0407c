//! Database operations for messaging
//!
//! Store-level operations for direct messages: insert, transcript
//! reads, the buddy-relationship check, and the atomic bulk mark-read.

use chrono::Utc;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::shared::social::Message;

fn row_to_message(row: &sqlx::postgres::PgRow) -> Message {
    Message {
        id: row.get("id"),
        sender_id: row.get("sender_id"),
        receiver_id: row.get("receiver_id"),
        content: row.get("content"),
        read: row.get("read"),
        created_at: row.get("created_at"),
    }
}

/// Check whether two principals hold a mutual accepted buddy edge
pub async fn are_buddies(pool: &PgPool, a: Uuid, b: Uuid) -> Result<bool, sqlx::Error> {
    let row = sqlx::query(
        r#"
        SELECT EXISTS (
            SELECT 1 FROM buddy_requests
            WHERE status = 'accepted'
              AND ((from_user_id = $1 AND to_user_id = $2)
                OR (from_user_id = $2 AND to_user_id = $1))
        ) AS buddies
        "#,
    )
    .bind(a)
    .bind(b)
    .fetch_one(pool)
    .await?;

    Ok(row.get("buddies"))
}

/// Insert a new unread message
///
/// The buddy check happens in the handler before this call; the store
/// only persists.
pub async fn create_message(
    pool: &PgPool,
    sender_id: Uuid,
    receiver_id: Uuid,
    content: &str,
) -> Result<Message, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    sqlx::query(
        r#"
        INSERT INTO messages (id, sender_id, receiver_id, content, read, created_at)
        VALUES ($1, $2, $3, $4, FALSE, $5)
        "#,
    )
    .bind(id)
    .bind(sender_id)
    .bind(receiver_id)
    .bind(content)
    .bind(now)
    .execute(pool)
    .await?;

    Ok(Message {
        id,
        sender_id,
        receiver_id,
        content: content.to_string(),
        read: false,
        created_at: now,
    })
}

/// Get the transcript between `user_id` and `buddy_id`, newest first
pub async fn get_transcript(
    pool: &PgPool,
    user_id: Uuid,
    buddy_id: Uuid,
    limit: i64,
    offset: i64,
) -> Result<Vec<Message>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT id, sender_id, receiver_id, content, read, created_at
        FROM messages
        WHERE (sender_id = $1 AND receiver_id = $2)
           OR (sender_id = $2 AND receiver_id = $1)
        ORDER BY created_at DESC
        LIMIT $3 OFFSET $4
        "#,
    )
    .bind(user_id)
    .bind(buddy_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(row_to_message).collect())
}

/// Atomically flip every unread message from `sender_id` to
/// `receiver_id` to read, returning the affected rows
///
/// Single UPDATE..RETURNING, so either all qualifying rows flip or
/// none do, and the returned set is exactly what changed. Calling it
/// again immediately returns an empty set.
pub async fn bulk_mark_read(
    pool: &PgPool,
    receiver_id: Uuid,
    sender_id: Uuid,
) -> Result<Vec<Message>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        UPDATE messages
        SET read = TRUE
        WHERE receiver_id = $1 AND sender_id = $2 AND read = FALSE
        RETURNING id, sender_id, receiver_id, content, read, created_at
        "#,
    )
    .bind(receiver_id)
    .bind(sender_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(row_to_message).collect())
}
