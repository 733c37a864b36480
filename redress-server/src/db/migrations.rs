//! Schema bootstrap
//!
//! Idempotent CREATE IF NOT EXISTS statements, run once at startup.
//! There is no migration history table; the schema is small enough to
//! carry in full.

use sqlx::PgPool;

use super::repos::DbError;

/// Create the complaints table and its indexes if missing.
pub async fn run(pool: &PgPool) -> Result<(), DbError> {
    tracing::info!("Running schema bootstrap...");

    create_complaints_table(pool).await?;
    create_indexes(pool).await?;

    tracing::info!("Schema bootstrap complete");
    Ok(())
}

async fn create_complaints_table(pool: &PgPool) -> Result<(), DbError> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS complaints (
            id SERIAL PRIMARY KEY,
            title TEXT NOT NULL,
            description TEXT NOT NULL,
            type TEXT NOT NULL,
            status TEXT NOT NULL DEFAULT 'pending',
            photo TEXT NOT NULL DEFAULT '',
            response TEXT,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    tracing::debug!("complaints table ready");
    Ok(())
}

async fn create_indexes(pool: &PgPool) -> Result<(), DbError> {
    // The list endpoint always orders by created_at DESC.
    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_complaints_created_at
         ON complaints(created_at DESC)",
    )
    .execute(pool)
    .await?;

    tracing::debug!("complaints indexes ready");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    #[ignore = "requires database"]
    async fn bootstrap_is_idempotent() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = crate::db::create_pool(&url).await.expect("pool creation failed");

        run(&pool).await.expect("first run failed");
        run(&pool).await.expect("second run failed");
    }
}
