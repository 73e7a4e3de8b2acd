use axum::{
    async_trait,
    extract::FromRequestParts,
    http::request::Parts,
    response::Redirect,
};
use tower_sessions::Session;
use tracing::debug;
use uuid::Uuid;

use crate::auth::repo::User;
use crate::error::AppError;
use crate::state::AppState;

/// Only the user id is stored in the session; the full record is re-read
/// on each request so it never goes stale.
const USER_ID_KEY: &str = "user_id";

pub async fn establish(session: &Session, user: &User) -> Result<(), AppError> {
    // new session id on privilege change
    session.cycle_id().await?;
    session.insert(USER_ID_KEY, user.id).await?;
    Ok(())
}

pub async fn clear(session: &Session) -> Result<(), AppError> {
    session.flush().await?;
    Ok(())
}

/// Identity if the request carries a valid session, `None` otherwise.
/// Any failure while resolving (no session layer, store error, missing
/// user row) degrades to "not authenticated".
pub struct MaybeUser(pub Option<User>);

#[async_trait]
impl FromRequestParts<AppState> for MaybeUser {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Ok(session) = Session::from_request_parts(parts, state).await else {
            return Ok(MaybeUser(None));
        };

        let user_id = match session.get::<Uuid>(USER_ID_KEY).await {
            Ok(Some(id)) => id,
            Ok(None) => return Ok(MaybeUser(None)),
            Err(e) => {
                debug!(error = %e, "session read failed");
                return Ok(MaybeUser(None));
            }
        };

        match User::find_by_id(&state.db, user_id).await {
            Ok(user) => Ok(MaybeUser(user)),
            Err(e) => {
                debug!(error = %e, "identity lookup failed");
                Ok(MaybeUser(None))
            }
        }
    }
}

/// Identity-required extractor; anonymous requests get bounced to /login.
pub struct CurrentUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = Redirect;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match MaybeUser::from_request_parts(parts, state).await {
            Ok(MaybeUser(Some(user))) => Ok(CurrentUser(user)),
            _ => Err(Redirect::to("/login")),
        }
    }
}
