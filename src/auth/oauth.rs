use oauth2::{
    basic::BasicClient, reqwest::async_http_client, AuthUrl, AuthorizationCode, ClientId,
    ClientSecret, CsrfToken, RedirectUrl, Scope, TokenResponse, TokenUrl,
};
use serde::Deserialize;

use crate::config::GoogleConfig;
use crate::error::AppError;

const AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const USERINFO_URL: &str = "https://openidconnect.googleapis.com/v1/userinfo";

pub fn oauth_client(config: &GoogleConfig) -> Result<BasicClient, AppError> {
    let client = BasicClient::new(
        ClientId::new(config.client_id.clone()),
        Some(ClientSecret::new(config.client_secret.clone())),
        AuthUrl::new(AUTH_URL.to_string())
            .map_err(|e| AppError::OAuthExchange(e.to_string()))?,
        Some(
            TokenUrl::new(TOKEN_URL.to_string())
                .map_err(|e| AppError::OAuthExchange(e.to_string()))?,
        ),
    )
    .set_redirect_uri(
        RedirectUrl::new(config.redirect_url.clone())
            .map_err(|e| AppError::OAuthExchange(e.to_string()))?,
    );
    Ok(client)
}

/// Consent-screen URL plus the CSRF token to stash in the session.
pub fn authorize_url(client: &BasicClient) -> (oauth2::url::Url, CsrfToken) {
    client
        .authorize_url(CsrfToken::new_random)
        .add_scope(Scope::new("openid".to_string()))
        .add_scope(Scope::new("email".to_string()))
        .url()
}

#[derive(Debug, Deserialize)]
struct UserInfo {
    email: String,
}

/// Exchange the authorization code and fetch the verified email from the
/// OpenID userinfo endpoint.
pub async fn exchange_email(client: &BasicClient, code: String) -> Result<String, AppError> {
    let token = client
        .exchange_code(AuthorizationCode::new(code))
        .request_async(async_http_client)
        .await
        .map_err(|e| AppError::OAuthExchange(e.to_string()))?;

    let info: UserInfo = reqwest::Client::new()
        .get(USERINFO_URL)
        .bearer_auth(token.access_token().secret())
        .send()
        .await
        .map_err(|e| AppError::OAuthExchange(e.to_string()))?
        .error_for_status()
        .map_err(|e| AppError::OAuthExchange(e.to_string()))?
        .json()
        .await
        .map_err(|e| AppError::OAuthExchange(e.to_string()))?;

    Ok(info.email)
}
