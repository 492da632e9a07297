use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::routing::put;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::change_password::change_password;
use super::handlers::create_account::create_account;
use super::handlers::get_account::get_account;
use super::handlers::get_account::get_current_account;
use super::handlers::login::login;
use super::middleware::authenticate as auth_middleware;
use super::middleware::require_admin;
use crate::domain::account::ports::AccountServicePort;

pub struct AppState<S: AccountServicePort> {
    pub account_service: Arc<S>,
    pub authenticator: Arc<Authenticator>,
}

impl<S: AccountServicePort> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            account_service: Arc::clone(&self.account_service),
            authenticator: Arc::clone(&self.authenticator),
        }
    }
}

pub fn create_router<S: AccountServicePort>(
    account_service: Arc<S>,
    authenticator: Arc<Authenticator>,
) -> Router {
    let state = AppState {
        account_service,
        authenticator,
    };

    let public_routes = Router::new().route("/api/auth/login", post(login::<S>));

    let account_routes = Router::new()
        .route("/api/users/me", get(get_current_account::<S>))
        .route("/api/users/me/password", put(change_password::<S>))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware::<S>,
        ));

    // Layers run outermost-last: the token is checked before the role.
    let admin_routes = Router::new()
        .route("/api/users", post(create_account::<S>))
        .route("/api/users/:account_id", get(get_account::<S>))
        .route_layer(middleware::from_fn(require_admin))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware::<S>,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(account_routes)
        .merge(admin_routes)
        .layer(
            ServiceBuilder::new()
                .layer(trace_layer)
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
