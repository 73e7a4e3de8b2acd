use axum::{
    extract::{Query, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use tower_sessions::Session;
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{LoginForm, OAuthCallback, RegisterForm},
        oauth, session,
        strategy::{self, Credentials},
    },
    error::AppError,
    state::AppState,
    views,
};

const CSRF_STATE_KEY: &str = "oauth_csrf_state";

#[instrument(skip_all)]
pub async fn login_form(
    State(state): State<AppState>,
    session::MaybeUser(user): session::MaybeUser,
) -> Response {
    if user.is_some() {
        return Redirect::to("/").into_response();
    }
    Html(views::login_page(state.config.google.is_some())).into_response()
}

/// POST /login. A failed attempt redirects back to /login without saying
/// why; only success establishes a session.
#[instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(mut form): Form<LoginForm>,
) -> Result<Response, AppError> {
    // usernames are case-sensitive; only surrounding whitespace is dropped
    form.username = form.username.trim().to_string();

    let credentials = Credentials::Local {
        username: form.username.clone(),
        password: form.password,
    };

    match strategy::authenticate(&state.db, credentials).await {
        Ok(user) => {
            session::establish(&session, &user).await?;
            info!(user_id = %user.id, "user logged in");
            Ok(Redirect::to("/").into_response())
        }
        Err(e) => {
            warn!(username = %form.username, error = %e, "login failed");
            Ok(Redirect::to("/login").into_response())
        }
    }
}

#[instrument(skip_all)]
pub async fn register_form(session::MaybeUser(user): session::MaybeUser) -> Response {
    if user.is_some() {
        return Redirect::to("/").into_response();
    }
    Html(views::register_page()).into_response()
}

/// POST /register. A taken username bounces to /login (the account already
/// exists); success logs the new user straight in.
#[instrument(skip_all)]
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Form(mut form): Form<RegisterForm>,
) -> Result<Response, AppError> {
    form.username = form.username.trim().to_string();

    if !strategy::is_valid_email(&form.username) || form.password.len() < 8 {
        warn!(username = %form.username, "rejected registration input");
        return Ok(Redirect::to("/register").into_response());
    }

    match strategy::register(&state.db, &form.username, &form.password).await {
        Ok(user) => {
            session::establish(&session, &user).await?;
            info!(user_id = %user.id, username = %user.username, "user registered");
            Ok(Redirect::to("/").into_response())
        }
        Err(AppError::DuplicateUser) => {
            warn!(username = %form.username, "username already registered");
            Ok(Redirect::to("/login").into_response())
        }
        Err(e) => Err(e),
    }
}

#[instrument(skip_all)]
pub async fn logout(session: Session) -> Result<Redirect, AppError> {
    session::clear(&session).await?;
    Ok(Redirect::to("/"))
}

/// GET /auth/google: stash a CSRF token and send the user to the consent
/// screen.
#[instrument(skip_all)]
pub async fn google_login(
    State(state): State<AppState>,
    session: Session,
) -> Result<Response, AppError> {
    let Some(google) = &state.config.google else {
        return Ok(Redirect::to("/login").into_response());
    };

    let client = oauth::oauth_client(google)?;
    let (auth_url, csrf_token) = oauth::authorize_url(&client);
    session
        .insert(CSRF_STATE_KEY, csrf_token.secret().clone())
        .await?;

    Ok(Redirect::to(auth_url.as_str()).into_response())
}

/// GET /auth/google/callback: verify the CSRF token, exchange the code for
/// the verified email and log the matching (or freshly created) user in.
/// Every failure path lands back on /login.
#[instrument(skip_all)]
pub async fn google_callback(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<OAuthCallback>,
) -> Result<Response, AppError> {
    let Some(google) = &state.config.google else {
        return Ok(Redirect::to("/login").into_response());
    };

    let stored_state: Option<String> = session.remove(CSRF_STATE_KEY).await?;
    match (&stored_state, &params.state) {
        (Some(stored), Some(sent)) if stored == sent => {}
        _ => {
            warn!("oauth callback with missing or mismatched csrf state");
            return Ok(Redirect::to("/login").into_response());
        }
    }

    let Some(code) = params.code else {
        warn!("oauth callback without authorization code");
        return Ok(Redirect::to("/login").into_response());
    };

    let client = oauth::oauth_client(google)?;
    let email = match oauth::exchange_email(&client, code).await {
        Ok(email) => email.trim().to_string(),
        Err(e) => {
            warn!(error = %e, "oauth code exchange failed");
            return Ok(Redirect::to("/login").into_response());
        }
    };

    match strategy::authenticate(&state.db, Credentials::Oauth { email }).await {
        Ok(user) => {
            session::establish(&session, &user).await?;
            info!(user_id = %user.id, "user logged in via google");
            Ok(Redirect::to("/").into_response())
        }
        Err(e) => {
            warn!(error = %e, "oauth identity resolution failed");
            Ok(Redirect::to("/login").into_response())
        }
    }
}
