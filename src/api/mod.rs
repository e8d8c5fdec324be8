use std::sync::Arc;

use axum::extract::{FromRequestParts, OptionalFromRequestParts};
use axum::http::request::Parts;
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::Router;

pub mod auth;
pub mod banking;
pub mod pages;

use crate::auth::{session, CredentialStore, SessionKey};
use crate::services::BankingService;
use crate::store::AccountStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<AccountStore>,
    pub banking: Arc<BankingService>,
    pub credentials: Arc<CredentialStore>,
    pub sessions: Arc<SessionKey>,
}

impl AppState {
    pub fn new(
        store: Arc<AccountStore>,
        banking: Arc<BankingService>,
        credentials: Arc<CredentialStore>,
        sessions: Arc<SessionKey>,
    ) -> Self {
        Self {
            store,
            banking,
            credentials,
            sessions,
        }
    }
}

/// The full HTTP surface. Account pages sit behind the `SessionUser`
/// extractor; everything else is public.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(pages::index))
        .route("/home", get(pages::home))
        .route("/corporate", get(pages::corporate))
        .route("/nri", get(pages::nri))
        .route("/contact", get(pages::contact))
        .route("/login", post(auth::login))
        .route("/signup", get(auth::signup_form).post(auth::signup))
        .route("/logout", get(auth::logout))
        .route("/dashboard", get(banking::dashboard))
        .route("/personal-banking", get(banking::personal_banking))
        .route("/transactions", get(banking::transactions))
        .route("/deposit", post(banking::deposit))
        .route("/withdraw", post(banking::withdraw))
        .with_state(state)
}

/// Logged-in user, taken from the signed session cookie. Extraction
/// failing sends the browser back to the login page.
pub struct SessionUser(pub String);

pub struct AuthRedirect;

impl IntoResponse for AuthRedirect {
    fn into_response(self) -> Response {
        Redirect::to("/").into_response()
    }
}

impl FromRequestParts<AppState> for SessionUser {
    type Rejection = AuthRedirect;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = session::extract_session_token(&parts.headers).ok_or(AuthRedirect)?;
        let username = state.sessions.verify(&token).ok_or(AuthRedirect)?;
        Ok(SessionUser(username))
    }
}

// `Option<SessionUser>` for pages that render either way.
impl OptionalFromRequestParts<AppState> for SessionUser {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Option<Self>, Self::Rejection> {
        Ok(session::extract_session_token(&parts.headers)
            .and_then(|token| state.sessions.verify(&token))
            .map(SessionUser))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    use axum::body::Body;
    use axum::http::header::{CONTENT_TYPE, COOKIE, SET_COOKIE};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    static COUNTER: AtomicU32 = AtomicU32::new(0);

    fn test_app() -> Router {
        let n = COUNTER.fetch_add(1, Ordering::SeqCst);
        let path = std::env::temp_dir().join(format!(
            "cloudbankx-api-{}-{}.json",
            std::process::id(),
            n
        ));
        let _ = std::fs::remove_file(&path);

        let store = Arc::new(AccountStore::open_or_create(path).unwrap());
        let banking = Arc::new(BankingService::new(Arc::clone(&store)));
        let credentials = Arc::new(CredentialStore::new());
        let sessions = Arc::new(SessionKey::random());
        router(AppState::new(store, banking, credentials, sessions))
    }

    fn form_post(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn get_with_cookie(uri: &str, cookie: &str) -> Request<Body> {
        Request::builder()
            .uri(uri)
            .header(COOKIE, cookie)
            .body(Body::empty())
            .unwrap()
    }

    async fn signup_and_login(app: &Router, username: &str, password: &str) -> String {
        let body = format!(
            "username={u}&password={p}&confirm_password={p}",
            u = username,
            p = password
        );
        let response = app.clone().oneshot(form_post("/signup", &body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let body = format!("username={}&password={}", username, password);
        let response = app.clone().oneshot(form_post("/login", &body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let set_cookie = response.headers().get(SET_COOKIE).unwrap().to_str().unwrap();
        // "name=value; Path=/; HttpOnly" -> "name=value"
        set_cookie.split(';').next().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_public_pages_render() {
        let app = test_app();
        for uri in ["/", "/home", "/corporate", "/nri", "/contact", "/signup"] {
            let response = app.clone().oneshot(get(uri)).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK, "{} should render", uri);
        }
    }

    #[tokio::test]
    async fn test_account_pages_redirect_without_session() {
        let app = test_app();
        for uri in ["/dashboard", "/personal-banking", "/transactions"] {
            let response = app.clone().oneshot(get(uri)).await.unwrap();
            assert_eq!(response.status(), StatusCode::SEE_OTHER, "{} should redirect", uri);
        }
    }

    #[tokio::test]
    async fn test_signup_login_dashboard_flow() {
        let app = test_app();
        let cookie = signup_and_login(&app, "alice", "s3cret").await;

        let response = app
            .clone()
            .oneshot(get_with_cookie("/dashboard", &cookie))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_signup_password_mismatch_rejected() {
        let app = test_app();
        let response = app
            .clone()
            .oneshot(form_post(
                "/signup",
                "username=alice&password=one&confirm_password=two",
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_signup_duplicate_rejected() {
        let app = test_app();
        signup_and_login(&app, "alice", "s3cret").await;

        let response = app
            .clone()
            .oneshot(form_post(
                "/signup",
                "username=alice&password=other&confirm_password=other",
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_login_with_bad_password_rejected() {
        let app = test_app();
        signup_and_login(&app, "alice", "s3cret").await;

        let response = app
            .clone()
            .oneshot(form_post("/login", "username=alice&password=wrong"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_deposit_and_withdraw_round_trip() {
        let app = test_app();
        let cookie = signup_and_login(&app, "alice", "s3cret").await;

        let mut request = form_post("/deposit", "amount=250.50");
        request.headers_mut().insert(COOKIE, cookie.parse().unwrap());
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let mut request = form_post("/withdraw", "amount=50");
        request.headers_mut().insert(COOKIE, cookie.parse().unwrap());
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let response = app
            .clone()
            .oneshot(get_with_cookie("/personal-banking", &cookie))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_invalid_amount_rejected() {
        let app = test_app();
        let cookie = signup_and_login(&app, "alice", "s3cret").await;

        for amount in ["abc", "-5", "0"] {
            let mut request = form_post("/deposit", &format!("amount={}", amount));
            request.headers_mut().insert(COOKIE, cookie.parse().unwrap());
            let response = app.clone().oneshot(request).await.unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "amount {}", amount);
        }
    }

    #[tokio::test]
    async fn test_overdraw_rejected() {
        let app = test_app();
        let cookie = signup_and_login(&app, "alice", "s3cret").await;

        // Opening balance is 1000.00.
        let mut request = form_post("/withdraw", "amount=1000.01");
        request.headers_mut().insert(COOKIE, cookie.parse().unwrap());
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_logout_clears_session() {
        let app = test_app();
        let response = app.clone().oneshot(get("/logout")).await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let set_cookie = response.headers().get(SET_COOKIE).unwrap().to_str().unwrap();
        assert!(set_cookie.contains("Max-Age=0"));
    }
}
