//! Database operations for buddy requests
//!
//! The accepted buddy-request row is the buddy edge: `are_buddies` in
//! the messaging store checks for an accepted row in either direction,
//! so accepting a request is a single status flip.

use chrono::Utc;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::shared::social::{BuddyRequest, BuddyRequestStatus};

fn row_to_request(row: &sqlx::postgres::PgRow) -> BuddyRequest {
    BuddyRequest {
        id: row.get("id"),
        from_user_id: row.get("from_user_id"),
        to_user_id: row.get("to_user_id"),
        status: BuddyRequestStatus::from_str(row.get::<String, _>("status").as_str())
            .unwrap_or(BuddyRequestStatus::Pending),
        created_at: row.get("created_at"),
        responded_at: row.get("responded_at"),
    }
}

/// Create a new pending buddy request
pub async fn create_buddy_request(
    pool: &PgPool,
    from_user_id: Uuid,
    to_user_id: Uuid,
) -> Result<BuddyRequest, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    sqlx::query(
        r#"
        INSERT INTO buddy_requests (id, from_user_id, to_user_id, status, created_at, responded_at)
        VALUES ($1, $2, $3, 'pending', $4, NULL)
        "#,
    )
    .bind(id)
    .bind(from_user_id)
    .bind(to_user_id)
    .bind(now)
    .execute(pool)
    .await?;

    Ok(BuddyRequest {
        id,
        from_user_id,
        to_user_id,
        status: BuddyRequestStatus::Pending,
        created_at: now,
        responded_at: None,
    })
}

/// Get pending buddy requests addressed to a user
pub async fn get_pending_requests(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Vec<BuddyRequest>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT id, from_user_id, to_user_id, status, created_at, responded_at
        FROM buddy_requests
        WHERE to_user_id = $1 AND status = 'pending'
        ORDER BY created_at DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(row_to_request).collect())
}

/// Get a buddy request by ID
pub async fn get_request_by_id(
    pool: &PgPool,
    request_id: Uuid,
) -> Result<Option<BuddyRequest>, sqlx::Error> {
    let row = sqlx::query(
        r#"
        SELECT id, from_user_id, to_user_id, status, created_at, responded_at
        FROM buddy_requests
        WHERE id = $1
        "#,
    )
    .bind(request_id)
    .fetch_optional(pool)
    .await?;

    Ok(row.as_ref().map(row_to_request))
}

/// Find a non-rejected request between two users, in either direction
pub async fn find_between(
    pool: &PgPool,
    a: Uuid,
    b: Uuid,
) -> Result<Option<BuddyRequest>, sqlx::Error> {
    let row = sqlx::query(
        r#"
        SELECT id, from_user_id, to_user_id, status, created_at, responded_at
        FROM buddy_requests
        WHERE status IN ('pending', 'accepted')
          AND ((from_user_id = $1 AND to_user_id = $2)
            OR (from_user_id = $2 AND to_user_id = $1))
        LIMIT 1
        "#,
    )
    .bind(a)
    .bind(b)
    .fetch_optional(pool)
    .await?;

    Ok(row.as_ref().map(row_to_request))
}

/// Record the recipient's response, returning the updated request
///
/// Only flips requests that are still pending; a second response is a
/// no-op returning `None`.
pub async fn respond_to_request(
    pool: &PgPool,
    request_id: Uuid,
    accept: bool,
) -> Result<Option<BuddyRequest>, sqlx::Error> {
    let status = if accept {
        BuddyRequestStatus::Accepted
    } else {
        BuddyRequestStatus::Rejected
    };

    let row = sqlx::query(
        r#"
        UPDATE buddy_requests
        SET status = $2, responded_at = $3
        WHERE id = $1 AND status = 'pending'
        RETURNING id, from_user_id, to_user_id, status, created_at, responded_at
        "#,
    )
    .bind(request_id)
    .bind(status.as_str())
    .bind(Utc::now())
    .fetch_optional(pool)
    .await?;

    Ok(row.as_ref().map(row_to_request))
}
