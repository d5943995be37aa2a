use std::sync::Arc;

use sqlx::{migrate::Migrator, postgres::PgPoolOptions, PgPool};

use crate::{conf::settings, prelude::Result};

pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

pub fn db_pool() -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(settings.database_pool_max_connections)
        .connect_lazy(&settings.database_url)?;
    Ok(pool)
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub db_pool: Arc<PgPool>,
    pub jwt_secret: Arc<str>,
}

impl AppState {
    pub fn new() -> Result<AppState> {
        Ok(AppState {
            db_pool: Arc::new(db_pool()?),
            jwt_secret: Arc::from(settings.jwt_secret.as_str()),
        })
    }
}
