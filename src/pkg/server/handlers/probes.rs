use axum::extract::State;
use sqlx::query;

use crate::{pkg::server::state::AppState, prelude::Result};

pub async fn livez() -> Result<()> {
    tracing::debug!("service is live");
    Ok(())
}

/// Healthy when the store answers a trivial query.
pub async fn healthz(State(state): State<AppState>) -> Result<()> {
    query("select 1").execute(&*state.db_pool).await?;
    tracing::debug!(
        connections = state.db_pool.size(),
        idle = state.db_pool.num_idle(),
        "store reachable"
    );
    Ok(())
}
