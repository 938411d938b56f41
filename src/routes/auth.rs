//! Auth routes — password login, session cookie management.

use axum::extract::{FromRef, State};
use axum::http::StatusCode;
use axum::response::Json;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;
use time::Duration;

use super::error::ApiError;
use crate::services::audit_log::NewAuditLog;
use crate::services::session;
use crate::state::AppState;

const COOKIE_NAME: &str = "session_token";

pub(crate) fn env_bool(key: &str) -> Option<bool> {
    std::env::var(key)
        .ok()
        .and_then(|raw| match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Some(true),
            "0" | "false" | "no" | "off" => Some(false),
            _ => None,
        })
}

pub(crate) fn cookie_secure() -> bool {
    env_bool("COOKIE_SECURE").unwrap_or(false)
}

fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build((COOKIE_NAME, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(cookie_secure())
        .build()
}

fn clear_session_cookie() -> Cookie<'static> {
    Cookie::build((COOKIE_NAME, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(cookie_secure())
        .max_age(Duration::ZERO)
        .build()
}

// =============================================================================
// AUTH EXTRACTOR
// =============================================================================

/// Authenticated user extracted from the session cookie.
/// Use as a handler parameter to require a valid session.
pub struct AuthUser {
    pub user: session::SessionUser,
    pub token: String,
}

impl<S> axum::extract::FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        state: &S,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar.get(COOKIE_NAME).map(Cookie::value).unwrap_or_default();
        if token.is_empty() {
            return Err(ApiError::unauthorized("not signed in"));
        }

        let app_state = AppState::from_ref(state);
        let user = session::validate_session(&app_state.pool, token)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "session validation failed");
                ApiError::internal("Failed to validate session")
            })?
            .ok_or_else(|| ApiError::unauthorized("session expired"))?;

        Ok(Self { user, token: token.to_owned() })
    }
}

// =============================================================================
// HANDLERS
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct LoginBody {
    pub email: String,
    pub password: String,
}

async fn record_auth_event(state: &AppState, user: &session::SessionUser, action: &str) {
    let entry = NewAuditLog {
        entity_type: "user".to_owned(),
        entity_id: user.id.to_string(),
        user_id: Some(user.id.to_string()),
        action: action.to_owned(),
        details: serde_json::json!({ "email": user.email }),
    };
    if let Err(e) = state.audit_logs.record(entry).await {
        tracing::warn!(error = %e, action, "audit record failed");
    }
}

/// `POST /api/auth/login` — verify credentials, set session cookie.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<LoginBody>,
) -> Result<(CookieJar, Json<session::SessionUser>), ApiError> {
    let Some(email) = session::normalize_email(&body.email) else {
        return Err(ApiError::bad_request("a valid email is required"));
    };

    let user = session::verify_credentials(&state.pool, &email, &body.password)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "credential check failed");
            ApiError::internal("Failed to sign in")
        })?
        .ok_or_else(|| ApiError::unauthorized("invalid email or password"))?;

    let token = session::create_session(&state.pool, user.id).await.map_err(|e| {
        tracing::error!(error = %e, "session creation failed");
        ApiError::internal("Failed to sign in")
    })?;

    record_auth_event(&state, &user, "user.login").await;

    Ok((jar.add(session_cookie(token)), Json(user)))
}

/// `GET /api/auth/me` — return current user.
pub async fn me(auth: AuthUser) -> Json<session::SessionUser> {
    Json(auth.user)
}

/// `POST /api/auth/logout` — delete session, clear cookie.
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
    auth: AuthUser,
) -> Result<(CookieJar, StatusCode), ApiError> {
    if let Err(e) = session::delete_session(&state.pool, &auth.token).await {
        tracing::error!(error = %e, "session delete failed");
        return Err(ApiError::internal("Failed to sign out"));
    }

    record_auth_event(&state, &auth.user, "user.logout").await;

    Ok((jar.add(clear_session_cookie()), StatusCode::NO_CONTENT))
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
