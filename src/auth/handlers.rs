use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::{instrument, warn};

use crate::{
    auth::{
        dto::{LoginRequest, LoginResponse},
        login::{LoginForm, LoginVerdict},
    },
    state::AppState,
    views::{LoginTemplate, Page},
};

pub fn login_routes() -> Router<AppState> {
    Router::new().route("/login", get(login_page).post(login))
}

pub async fn login_page(State(state): State<AppState>) -> Page<LoginTemplate> {
    Page(LoginTemplate::new(&state.credentials.entries()))
}

/// An unreadable body is treated as an attempt with both fields empty, so the
/// caller always gets a JSON verdict back.
#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> (StatusCode, Json<LoginResponse>) {
    let payload = match payload {
        Ok(Json(p)) => p,
        Err(e) => {
            warn!(error = %e, "unreadable login body");
            LoginRequest::default()
        }
    };

    let mut form = LoginForm::new(&state.credentials);
    form.set_username(payload.username.unwrap_or_default());
    form.set_password(payload.password.unwrap_or_default());
    let verdict = form.submit();

    let status = match verdict {
        LoginVerdict::Success { .. } => StatusCode::OK,
        LoginVerdict::InvalidCredentials => StatusCode::UNAUTHORIZED,
        LoginVerdict::MissingFields => StatusCode::BAD_REQUEST,
    };

    (
        status,
        Json(LoginResponse {
            message: verdict.message(),
            redirect: form.redirect(),
            verdict,
        }),
    )
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use tower::ServiceExt;

    use crate::{app::build_app, state::AppState};

    async fn post_login(body: &str) -> (StatusCode, serde_json::Value) {
        let (state, _store) = AppState::fake();
        let res = build_app(state)
            .oneshot(
                Request::post("/login")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = res.status();
        let body = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn login_success() {
        let (status, json) = post_login(r#"{"username":"admin","password":"123456"}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["outcome"], "success");
        assert_eq!(json["message"], "¡Bienvenido, admin!");
        assert_eq!(json["redirect"], "/");
    }

    #[tokio::test]
    async fn login_invalid_credentials() {
        let (status, json) = post_login(r#"{"username":"noexiste","password":"password"}"#).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(json["outcome"], "invalid_credentials");
        assert_eq!(json["message"], "Credenciales inválidas");
        assert!(json.get("redirect").is_none());
    }

    #[tokio::test]
    async fn login_missing_fields() {
        let (status, json) = post_login(r#"{"username":"admin"}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["outcome"], "missing_fields");
        assert_eq!(json["message"], "Por favor, completa todos los campos");
    }

    #[tokio::test]
    async fn login_null_field_is_missing() {
        let (status, json) = post_login(r#"{"username":null,"password":"123456"}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["outcome"], "missing_fields");
    }

    #[tokio::test]
    async fn login_malformed_body_still_answers_json() {
        let (status, json) = post_login("not json").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["outcome"], "missing_fields");
        assert_eq!(json["message"], "Por favor, completa todos los campos");
    }

    #[tokio::test]
    async fn login_without_content_type_still_answers_json() {
        let (state, _store) = AppState::fake();
        let res = build_app(state)
            .oneshot(
                Request::post("/login")
                    .body(Body::from(r#"{"username":"admin","password":"123456"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["outcome"], "missing_fields");
    }

    #[tokio::test]
    async fn login_page_has_form_and_demo_hint() {
        let (state, _store) = AppState::fake();
        let res = build_app(state)
            .oneshot(Request::get("/login").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let body = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let html = String::from_utf8(body.to_vec()).unwrap();

        for needle in [
            "<title>Login - CopilotMcp Demo</title>",
            "Iniciar Sesión</h1>",
            r#"id="username""#,
            r#"id="password""#,
            r#"id="loginBtn""#,
            r#"id="message""#,
            "admin / 123456",
            "user / password",
            "Volver al inicio",
        ] {
            assert!(html.contains(needle), "missing {needle}");
        }
    }
}
