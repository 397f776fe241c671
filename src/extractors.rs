use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::CookieJar;

use crate::{db::models::AuthUser, names, rejections::AppError, AppState};

/// Guard extractor that resolves the user session cookie against the
/// database and carries the signed-in user's identity into handlers.
pub struct AuthGuard(pub AuthUser);

impl FromRequestParts<AppState> for AuthGuard {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);

        let Some(session_id) = jar
            .get(names::USER_SESSION_COOKIE_NAME)
            .map(|c| c.value().to_string())
        else {
            return Err(AppError::Unauthorized);
        };

        let user = state
            .db
            .get_user_by_session(&session_id)
            .await
            .map_err(|e| {
                tracing::error!("session lookup failed: {e}");
                AppError::Internal("could not verify session")
            })?;

        match user {
            Some(user) => Ok(AuthGuard(user)),
            None => Err(AppError::Unauthorized),
        }
    }
}
