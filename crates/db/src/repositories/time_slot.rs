use crate::models::DbTimeSlot;
use chrono::{DateTime, Utc};
use eyre::Result;
use sqlx::{Pool, Postgres, QueryBuilder};
use uuid::Uuid;

use tinta_core::models::slot::{ClientDetails, NewSlot, SlotChanges, SlotStatus};

pub async fn insert_slot(pool: &Pool<Postgres>, slot: &NewSlot) -> Result<DbTimeSlot> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!("Inserting slot: id={}, start={}", id, slot.start_time);

    let row = sqlx::query_as::<_, DbTimeSlot>(
        r#"
        INSERT INTO time_slots (id, start_time, duration_hours, price_ars, status, created_at)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, start_time, duration_hours, price_ars, status,
                  client_name, client_email, client_phone, client_instagram, created_at
        "#,
    )
    .bind(id)
    .bind(slot.start_time)
    .bind(slot.duration_hours)
    .bind(slot.price_ars)
    .bind(SlotStatus::Available.as_str())
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

/// Multi-row insert. Callers batch their input to keep the statement's
/// bind count bounded.
pub async fn insert_slots(pool: &Pool<Postgres>, slots: &[NewSlot]) -> Result<u64> {
    if slots.is_empty() {
        return Ok(0);
    }

    tracing::debug!("Inserting batch of {} slots", slots.len());

    let now = Utc::now();
    let mut builder = QueryBuilder::<Postgres>::new(
        "INSERT INTO time_slots (id, start_time, duration_hours, price_ars, status, created_at) ",
    );
    builder.push_values(slots, |mut row, slot| {
        row.push_bind(Uuid::new_v4())
            .push_bind(slot.start_time)
            .push_bind(slot.duration_hours)
            .push_bind(slot.price_ars)
            .push_bind(SlotStatus::Available.as_str())
            .push_bind(now);
    });

    let result = builder.build().execute(pool).await?;
    Ok(result.rows_affected())
}

pub async fn get_slot_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbTimeSlot>> {
    let row = sqlx::query_as::<_, DbTimeSlot>(
        r#"
        SELECT id, start_time, duration_hours, price_ars, status,
               client_name, client_email, client_phone, client_instagram, created_at
        FROM time_slots
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// The claim transition as one conditional update. The WHERE clause is
/// the whole guard against two clients racing on the same row: only the
/// statement that still sees 'available' gets a row back.
pub async fn claim_if_available(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbTimeSlot>> {
    tracing::debug!("Claiming slot if available: id={}", id);

    let row = sqlx::query_as::<_, DbTimeSlot>(
        r#"
        UPDATE time_slots
        SET status = 'pending_payment'
        WHERE id = $1 AND status = 'available'
        RETURNING id, start_time, duration_hours, price_ars, status,
                  client_name, client_email, client_phone, client_instagram, created_at
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

pub async fn list_available_from(
    pool: &Pool<Postgres>,
    from: DateTime<Utc>,
) -> Result<Vec<DbTimeSlot>> {
    let rows = sqlx::query_as::<_, DbTimeSlot>(
        r#"
        SELECT id, start_time, duration_hours, price_ars, status,
               client_name, client_email, client_phone, client_instagram, created_at
        FROM time_slots
        WHERE status = 'available' AND start_time >= $1
        ORDER BY start_time ASC
        "#,
    )
    .bind(from)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

pub async fn list_available_between(
    pool: &Pool<Postgres>,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<Vec<DbTimeSlot>> {
    let rows = sqlx::query_as::<_, DbTimeSlot>(
        r#"
        SELECT id, start_time, duration_hours, price_ars, status,
               client_name, client_email, client_phone, client_instagram, created_at
        FROM time_slots
        WHERE status = 'available' AND start_time >= $1 AND start_time < $2
        ORDER BY start_time ASC
        "#,
    )
    .bind(start)
    .bind(end)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

pub async fn list_all(pool: &Pool<Postgres>) -> Result<Vec<DbTimeSlot>> {
    let rows = sqlx::query_as::<_, DbTimeSlot>(
        r#"
        SELECT id, start_time, duration_hours, price_ars, status,
               client_name, client_email, client_phone, client_instagram, created_at
        FROM time_slots
        ORDER BY start_time ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

pub async fn list_between(
    pool: &Pool<Postgres>,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<Vec<DbTimeSlot>> {
    let rows = sqlx::query_as::<_, DbTimeSlot>(
        r#"
        SELECT id, start_time, duration_hours, price_ars, status,
               client_name, client_email, client_phone, client_instagram, created_at
        FROM time_slots
        WHERE start_time >= $1 AND start_time < $2
        ORDER BY start_time ASC
        "#,
    )
    .bind(start)
    .bind(end)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

pub async fn block_slots(pool: &Pool<Postgres>, ids: &[Uuid]) -> Result<u64> {
    if ids.is_empty() {
        return Ok(0);
    }

    tracing::debug!("Blocking {} overlapping slots", ids.len());

    let result = sqlx::query(
        r#"
        UPDATE time_slots
        SET status = 'blocked'
        WHERE id = ANY($1)
        "#,
    )
    .bind(ids)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}

pub async fn set_status(
    pool: &Pool<Postgres>,
    id: Uuid,
    status: SlotStatus,
    clear_client: bool,
) -> Result<bool> {
    tracing::debug!(
        "Setting slot status: id={}, status={}, clear_client={}",
        id,
        status,
        clear_client
    );

    let result = if clear_client {
        sqlx::query(
            r#"
            UPDATE time_slots
            SET status = $2,
                client_name = NULL,
                client_email = NULL,
                client_phone = NULL,
                client_instagram = NULL
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(status.as_str())
        .execute(pool)
        .await?
    } else {
        sqlx::query(
            r#"
            UPDATE time_slots
            SET status = $2
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(status.as_str())
        .execute(pool)
        .await?
    };

    Ok(result.rows_affected() > 0)
}

/// Attach client details and advance to 'pending' in one statement,
/// gated on the current status still accepting a client.
pub async fn attach_client_details(
    pool: &Pool<Postgres>,
    id: Uuid,
    details: &ClientDetails,
) -> Result<Option<DbTimeSlot>> {
    tracing::debug!("Attaching client details: id={}", id);

    let row = sqlx::query_as::<_, DbTimeSlot>(
        r#"
        UPDATE time_slots
        SET client_name = $2,
            client_email = $3,
            client_phone = $4,
            client_instagram = $5,
            status = 'pending'
        WHERE id = $1 AND status IN ('available', 'pending_payment')
        RETURNING id, start_time, duration_hours, price_ars, status,
                  client_name, client_email, client_phone, client_instagram, created_at
        "#,
    )
    .bind(id)
    .bind(&details.name)
    .bind(&details.email)
    .bind(&details.phone)
    .bind(&details.instagram)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

pub async fn update_slot(pool: &Pool<Postgres>, id: Uuid, changes: &SlotChanges) -> Result<bool> {
    tracing::debug!("Updating slot: id={}", id);

    let result = sqlx::query(
        r#"
        UPDATE time_slots
        SET start_time = COALESCE($2, start_time),
            duration_hours = COALESCE($3, duration_hours),
            price_ars = COALESCE($4, price_ars)
        WHERE id = $1
        "#,
    )
    .bind(id)
    .bind(changes.start_time)
    .bind(changes.duration_hours)
    .bind(changes.price_ars)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn delete_slot(pool: &Pool<Postgres>, id: Uuid) -> Result<bool> {
    tracing::debug!("Deleting slot: id={}", id);

    let result = sqlx::query(
        r#"
        DELETE FROM time_slots
        WHERE id = $1
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn delete_between(
    pool: &Pool<Postgres>,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<u64> {
    tracing::debug!("Deleting slots in [{}, {})", start, end);

    let result = sqlx::query(
        r#"
        DELETE FROM time_slots
        WHERE start_time >= $1 AND start_time < $2
        "#,
    )
    .bind(start)
    .bind(end)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}
