use std::net::SocketAddr;

use axum::Router;
use tower_http::trace::TraceLayer;
use tower_sessions::{MemoryStore, SessionManagerLayer};

use crate::state::AppState;
use crate::{auth, lists, reminders};

pub fn build_app(state: AppState) -> Router {
    // in-memory sessions; a single-process deployment is an accepted
    // constraint of this design
    let session_layer = SessionManagerLayer::new(MemoryStore::default())
        .with_name("todolist.sid")
        .with_secure(state.config.secure_cookie);

    Router::new()
        .merge(auth::router(&state.config))
        .merge(lists::router(&state.config))
        .merge(reminders::router())
        .with_state(state)
        .layer(session_layer)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|req: &axum::http::Request<_>| {
                    let method = req.method().clone();
                    let uri = req.uri().clone();
                    tracing::info_span!("http_request", %method, uri = %uri)
                })
                .on_response(
                    |res: &axum::http::Response<_>,
                     _latency: std::time::Duration,
                     span: &tracing::Span| {
                        let status = res.status();
                        span.record("status", tracing::field::display(status));
                        if status.is_server_error() {
                            tracing::error!(%status, "response");
                        } else {
                            tracing::info!(%status, "response");
                        }
                    },
                ),
        )
}

pub async fn serve(app: Router, host: &str, port: u16) -> anyhow::Result<()> {
    let addr: SocketAddr = format!("{host}:{port}").parse()?;

    tracing::info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn app() -> Router {
        build_app(AppState::fake())
    }

    async fn get(path: &str) -> axum::http::Response<axum::body::Body> {
        app()
            .oneshot(Request::get(path).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn body_text(res: axum::http::Response<axum::body::Body>) -> String {
        let bytes = res.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn anonymous_home_shows_login_prompt() {
        let res = get("/").await;
        assert_eq!(res.status(), StatusCode::OK);
        let body = body_text(res).await;
        assert!(body.contains("/login"));
        assert!(body.contains("/register"));
    }

    #[tokio::test]
    async fn login_and_register_forms_render() {
        let res = get("/login").await;
        assert_eq!(res.status(), StatusCode::OK);
        let body = body_text(res).await;
        assert!(body.contains("action=\"/login\""));

        let res = get("/register").await;
        assert_eq!(res.status(), StatusCode::OK);
        let body = body_text(res).await;
        assert!(body.contains("action=\"/register\""));
    }

    #[tokio::test]
    async fn logout_redirects_home() {
        let res = get("/logout").await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(res.headers()[header::LOCATION], "/");
    }

    #[tokio::test]
    async fn google_routes_absent_when_not_configured() {
        let res = get("/auth/google").await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn mutations_bounce_anonymous_users_to_login() {
        for path in ["/add", "/edit", "/delete"] {
            let res = app()
                .oneshot(
                    Request::post(path)
                        .header(
                            header::CONTENT_TYPE,
                            "application/x-www-form-urlencoded",
                        )
                        .body(Body::from("newItem=Milk&listId=1"))
                        .unwrap(),
                )
                .await
                .unwrap();
            assert_eq!(res.status(), StatusCode::SEE_OTHER);
            assert_eq!(res.headers()[header::LOCATION], "/login");
        }
    }

    #[tokio::test]
    async fn addlist_requires_identity() {
        let res = get("/addlist").await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(res.headers()[header::LOCATION], "/login");
    }

    #[tokio::test]
    async fn unknown_slug_redirects_anonymous_to_login() {
        // the /:slug route requires identity before it even parses the slug
        let res = get("/list-1").await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(res.headers()[header::LOCATION], "/login");
    }
}
