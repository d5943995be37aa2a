use crate::{conf::settings, pkg::server::state::MIGRATOR, prelude::Result};
use sqlx::postgres::PgPoolOptions;

pub async fn apply() -> Result<()> {
    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(&settings.database_url)
        .await?;

    tracing::debug!("connected to db");
    MIGRATOR.run(&pool).await?;

    println!("Migrations applied successfully");
    Ok(())
}
