/// Google OAuth client settings. Absent when the deployment is
/// local-auth-only.
#[derive(Debug, Clone)]
pub struct GoogleConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_url: String,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    /// When false the app behaves single-list: every user works in an
    /// auto-created default list and /addlist is not routed.
    pub multi_list: bool,
    pub secure_cookie: bool,
    pub google: Option<GoogleConfig>,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let host = std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port = std::env::var("APP_PORT")
            .ok()
            .and_then(|v| v.parse::<u16>().ok())
            .unwrap_or(8080);
        let multi_list = std::env::var("FEATURE_MULTI_LIST")
            .map(|v| v != "false" && v != "0")
            .unwrap_or(true);
        let secure_cookie = std::env::var("SESSION_SECURE_COOKIE")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);

        let google = match (
            std::env::var("GOOGLE_CLIENT_ID"),
            std::env::var("GOOGLE_CLIENT_SECRET"),
        ) {
            (Ok(client_id), Ok(client_secret)) => Some(GoogleConfig {
                client_id,
                client_secret,
                redirect_url: std::env::var("GOOGLE_REDIRECT_URL")
                    .unwrap_or_else(|_| format!("http://localhost:{port}/auth/google/callback")),
            }),
            _ => None,
        };

        Ok(Self {
            database_url,
            host,
            port,
            multi_list,
            secure_cookie,
            google,
        })
    }
}
