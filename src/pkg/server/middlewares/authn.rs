use std::sync::Arc;

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};

use crate::{
    pkg::server::state::AppState,
    prelude::{Error, Result},
    token::{verify_token, Claims},
};

/// Attaches the bearer token's claims to the request when it verifies.
/// Requests without a valid token pass through anonymously.
pub async fn authenticate(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let bearer = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|v| v.trim().to_string());
    if let Some(token) = bearer {
        match verify_token(&state.jwt_secret, &token) {
            Ok(claims) => {
                request.extensions_mut().insert(Arc::new(claims));
            }
            Err(e) => {
                tracing::warn!("bearer token rejected: {}", e);
            }
        }
    }
    next.run(request).await
}

/// Any authenticated caller.
pub struct LoggedIn(pub Arc<Claims>);

/// An authenticated caller with the admin flag.
pub struct Admin(pub Arc<Claims>);

impl<S: Send + Sync> FromRequestParts<S> for LoggedIn {
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self> {
        parts
            .extensions
            .get::<Arc<Claims>>()
            .cloned()
            .map(LoggedIn)
            .ok_or_else(|| Error::Unauthorized("Unauthorized".into()))
    }
}

impl<S: Send + Sync> FromRequestParts<S> for Admin {
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self> {
        let LoggedIn(claims) = LoggedIn::from_request_parts(parts, state).await?;
        if !claims.is_admin {
            tracing::warn!("{} is not an admin", claims.username);
            return Err(Error::Unauthorized("Unauthorized".into()));
        }
        Ok(Admin(claims))
    }
}
