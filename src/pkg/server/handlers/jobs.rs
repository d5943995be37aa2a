use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::WithRejection;
use serde_json::{json, Value};
use validator::Validate;

use crate::{
    pkg::{
        internal::adaptors::jobs::{
            mutators::JobMutator,
            selectors::JobSelector,
            spec::{JobSearch, JobUpdate, NewJob},
        },
        server::{
            middlewares::authn::{Admin, LoggedIn},
            state::AppState,
        },
    },
    prelude::{Error, Result},
};

pub async fn create(
    State(state): State<AppState>,
    Admin(claims): Admin,
    WithRejection(Json(input), _): WithRejection<Json<NewJob>, Error>,
) -> Result<(StatusCode, Json<Value>)> {
    input.check()?;
    let mut conn = state.db_pool.acquire().await?;
    let job = JobMutator::new(&mut *conn).create(&input).await?;
    tracing::info!("{} created job {} for {}", claims.username, job.id, job.company_handle);
    Ok((StatusCode::CREATED, Json(json!({ "job": job }))))
}

pub async fn list(
    State(state): State<AppState>,
    WithRejection(Query(search), _): WithRejection<Query<JobSearch>, Error>,
) -> Result<Json<Value>> {
    search.validate()?;
    let mut conn = state.db_pool.acquire().await?;
    let jobs = JobSelector::new(&mut *conn).find_all(&search).await?;
    Ok(Json(json!({ "jobs": jobs })))
}

pub async fn retrieve(
    State(state): State<AppState>,
    LoggedIn(_): LoggedIn,
    WithRejection(Path(id), _): WithRejection<Path<i32>, Error>,
) -> Result<Json<Value>> {
    let mut conn = state.db_pool.acquire().await?;
    let job = JobSelector::new(&mut *conn).get(id).await?;
    Ok(Json(json!({ "job": job })))
}

pub async fn update(
    State(state): State<AppState>,
    Admin(claims): Admin,
    WithRejection(Path(id), _): WithRejection<Path<i32>, Error>,
    WithRejection(Json(input), _): WithRejection<Json<JobUpdate>, Error>,
) -> Result<Json<Value>> {
    input.check()?;
    let mut conn = state.db_pool.acquire().await?;
    let job = JobMutator::new(&mut *conn).update(id, &input).await?;
    tracing::info!("{} updated job {}", claims.username, id);
    Ok(Json(json!({ "job": job })))
}

pub async fn remove(
    State(state): State<AppState>,
    Admin(claims): Admin,
    WithRejection(Path(id), _): WithRejection<Path<i32>, Error>,
) -> Result<Json<Value>> {
    let mut conn = state.db_pool.acquire().await?;
    JobMutator::new(&mut *conn).remove(id).await?;
    tracing::info!("{} deleted job {}", claims.username, id);
    Ok(Json(json!({ "deleted": id })))
}
