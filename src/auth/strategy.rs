use lazy_static::lazy_static;
use regex::Regex;
use sqlx::PgPool;
use tracing::warn;

use crate::auth::password::{hash_password, verify_password};
use crate::auth::repo::User;
use crate::error::AppError;

/// Closed set of credential sources. The route decides which variant to
/// build; nothing downstream inspects types at runtime.
#[derive(Debug, Clone)]
pub enum Credentials {
    Local { username: String, password: String },
    Oauth { email: String },
}

pub fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// Resolve credentials to a user.
///
/// Local: `NotFound` for an unknown username, `InvalidCredentials` on a
/// password mismatch. A hash that fails to parse (e.g. the OAuth sentinel)
/// is treated as a mismatch, not an internal error.
/// Oauth: the email was already verified by the provider, so this only
/// finds or creates the account.
pub async fn authenticate(db: &PgPool, credentials: Credentials) -> Result<User, AppError> {
    match credentials {
        Credentials::Local { username, password } => {
            let user = User::find_by_username(db, &username)
                .await?
                .ok_or(AppError::NotFound)?;

            let ok = match verify_password(&password, &user.password_hash) {
                Ok(v) => v,
                Err(e) => {
                    warn!(username = %username, error = %e, "password hash not comparable");
                    false
                }
            };

            if !ok {
                return Err(AppError::InvalidCredentials);
            }
            Ok(user)
        }
        Credentials::Oauth { email } => User::find_or_create_oauth(db, &email).await,
    }
}

/// Register a local account: hash the password and insert the row.
/// `DuplicateUser` when the username is taken.
pub async fn register(db: &PgPool, username: &str, password: &str) -> Result<User, AppError> {
    if let Some(_existing) = User::find_by_username(db, username).await? {
        return Err(AppError::DuplicateUser);
    }

    let hash = hash_password(password).map_err(|e| {
        warn!(error = %e, "hash_password failed");
        AppError::PasswordHash
    })?;

    User::create(db, username, &hash).await
}
