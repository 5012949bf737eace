use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Create time_slots table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS time_slots (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            start_time TIMESTAMP WITH TIME ZONE NOT NULL,
            duration_hours INTEGER NOT NULL,
            price_ars INTEGER NOT NULL,
            status VARCHAR(32) NOT NULL DEFAULT 'available',
            client_name VARCHAR(255) NULL,
            client_email VARCHAR(255) NULL,
            client_phone VARCHAR(64) NULL,
            client_instagram VARCHAR(255) NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT positive_duration CHECK (duration_hours > 0),
            CONSTRAINT positive_price CHECK (price_ars > 0),
            CONSTRAINT known_status CHECK (status IN (
                'available', 'pending_payment', 'pending',
                'confirmed', 'completed', 'blocked'
            ))
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes
    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_time_slots_start_time ON time_slots(start_time);
        CREATE INDEX IF NOT EXISTS idx_time_slots_status ON time_slots(status);
        "#,
    )
    .execute(pool)
    .await?;

    info!("Database schema initialized successfully.");
    Ok(())
}
