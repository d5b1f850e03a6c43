use axum::{
    http::header::{HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE, ORIGIN},
    http::{HeaderName, Method, Request, Response},
    routing::get,
    Router,
};
use std::time::Duration;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    normalize_path::NormalizePathLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::Span;

use crate::api::{auth, courses, grades, handlers, session, students, summary, users};
use crate::core::{config::Settings, state::AppState};

pub(crate) fn router(state: AppState) -> Router {
    let cors = build_cors_layer(state.settings());
    let api_v1_prefix = state.settings().api().api_v1_str.clone();
    let api_v1 = Router::new()
        .nest("/auth", auth::router())
        .nest("/session", session::router())
        .nest("/courses", courses::router())
        .nest("/users", users::router())
        .nest("/grades", grades::router())
        .nest("/students", students::router())
        .nest("/me", students::me_router())
        .nest("/admin", summary::admin_router())
        .nest("/lecturer", summary::lecturer_router());

    let request_id_header = HeaderName::from_static("x-request-id");
    let request_id_header_for_span = request_id_header.clone();
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(move |request: &Request<_>| {
            let request_id = request
                .headers()
                .get(&request_id_header_for_span)
                .and_then(|value| value.to_str().ok())
                .unwrap_or("-");
            tracing::info_span!(
                "request",
                method = %request.method(),
                uri = %request.uri(),
                request_id = %request_id
            )
        })
        .on_response(|response: &Response<axum::body::Body>, latency: Duration, _span: &Span| {
            let status_label = response.status().as_u16().to_string();
            metrics::counter!(
                "http_requests_total",
                "status" => status_label.clone()
            )
            .increment(1);
            metrics::histogram!(
                "http_request_duration_seconds",
                "status" => status_label
            )
            .record(latency.as_secs_f64());
        });

    let mut router: Router<AppState> = Router::new()
        .route("/", get(handlers::root))
        .route("/healthz", get(handlers::healthz).head(handlers::healthz))
        .nest(&api_v1_prefix, api_v1)
        .layer(NormalizePathLayer::trim_trailing_slash())
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(trace_layer)
        .layer(cors);

    if state.settings().telemetry().prometheus_enabled {
        router = router.route("/metrics", get(handlers::metrics));
    }

    router.with_state(state)
}

fn build_cors_layer(settings: &Settings) -> CorsLayer {
    let origins = settings
        .cors()
        .origins
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect::<Vec<_>>();

    let base = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            AUTHORIZATION,
            CONTENT_TYPE,
            ACCEPT,
            ORIGIN,
            HeaderName::from_static("x-request-id"),
        ])
        .expose_headers([HeaderName::from_static("x-request-id")])
        .max_age(Duration::from_secs(3600));

    if origins.is_empty() {
        // Wildcard origin cannot be combined with allow_credentials
        base.allow_origin(Any)
    } else {
        base.allow_credentials(true)
            .allow_origin(AllowOrigin::list(origins))
    }
}

#[cfg(test)]
mod tests {
    use axum::http::{header, Method, StatusCode};
    use tower::ServiceExt;

    use super::router;
    use crate::core::{config::Settings, metrics, security};
    use crate::test_support::{self, json_request, read_json};

    #[tokio::test]
    async fn root_returns_project_banner() {
        let (_, app) = test_support::test_app();

        let response = app.oneshot(json_request(Method::GET, "/", None, None)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = read_json(response).await;
        assert_eq!(json["message"], "SIAKAD API");
        assert_eq!(json["api_prefix"], "/api/v1");
    }

    #[tokio::test]
    async fn metrics_disabled_returns_404() {
        let (_, app) = test_support::test_app();

        let response =
            app.oneshot(json_request(Method::GET, "/metrics", None, None)).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn metrics_enabled_returns_200() {
        let settings = {
            let _guard = test_support::env_lock();
            test_support::set_test_env();
            std::env::set_var("PROMETHEUS_ENABLED", "1");
            let settings = Settings::load().expect("settings");
            std::env::set_var("PROMETHEUS_ENABLED", "0");
            settings
        };
        metrics::init(&settings).expect("metrics init");
        let app = router(test_support::lazy_state(settings));

        let response =
            app.oneshot(json_request(Method::GET, "/metrics", None, None)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn anonymous_session_lands_on_sign_in() {
        let (_, app) = test_support::test_app();

        let response =
            app.oneshot(json_request(Method::GET, "/api/v1/session", None, None)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = read_json(response).await;
        assert_eq!(json["signed_in"], false);
        assert_eq!(json["landing"], "sign_in");
        assert_eq!(json["can_sign_out"], false);
    }

    #[tokio::test]
    async fn protected_routes_redirect_anonymous_callers_to_sign_in() {
        let (_, app) = test_support::test_app();

        for (method, uri) in [
            (Method::GET, "/api/v1/courses"),
            (Method::GET, "/api/v1/users"),
            (Method::GET, "/api/v1/grades"),
            (Method::GET, "/api/v1/me/grades"),
            (Method::GET, "/api/v1/admin/summary"),
            (Method::POST, "/api/v1/auth/logout"),
        ] {
            let response =
                app.clone().oneshot(json_request(method, uri, None, None)).await.unwrap();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{uri}");
            assert_eq!(response.headers()[header::WWW_AUTHENTICATE], "Bearer");
            assert_eq!(read_json(response).await["redirect"], "sign_in", "{uri}");
        }
    }

    #[tokio::test]
    async fn garbage_token_is_treated_as_signed_out() {
        let (_, app) = test_support::test_app();

        let response = app
            .oneshot(json_request(Method::GET, "/api/v1/session", Some("not-a-jwt"), None))
            .await
            .unwrap();

        assert_eq!(read_json(response).await["landing"], "sign_in");
    }

    #[tokio::test]
    async fn sign_up_validation_happens_before_storage() {
        let (_, app) = test_support::test_app();

        let response = app
            .oneshot(json_request(
                Method::POST,
                "/api/v1/auth/signup",
                None,
                Some(serde_json::json!({
                    "email": "siti@kampus.ac.id",
                    "password": "123",
                    "full_name": "Siti Aminah",
                    "external_id": "2201001"
                })),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn malformed_body_uses_error_envelope() {
        let (_, app) = test_support::test_app();

        let response = app
            .oneshot(json_request(
                Method::POST,
                "/api/v1/auth/login",
                None,
                Some(serde_json::json!({ "email": "siti@kampus.ac.id" })),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = read_json(response).await;
        assert_eq!(json["status"], 400);
        assert!(json["detail"].as_str().unwrap().contains("password"), "{json}");
    }

    #[tokio::test]
    async fn storage_outage_while_loading_session_is_unavailable() {
        let (state, app) = test_support::test_app();
        let expires_at = time::OffsetDateTime::now_utc() + time::Duration::hours(1);
        let token =
            security::create_access_token("user-1", "session-1", expires_at, state.settings())
                .unwrap();

        let response = app
            .oneshot(json_request(Method::GET, "/api/v1/session", Some(&token), None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let json = read_json(response).await;
        assert!(json["detail"].as_str().unwrap().starts_with("Failed to load session: "), "{json}");
    }
}
