//! Wires the REST API, documentation and middleware into one application.

use std::iter;
use std::time::Duration;

use crate::core::beer::beer_repository::BeerRepository;
use crate::infra::error::PanicHandler;
use crate::infra::middleware::MakeRequestIdSpan;
use crate::infra::openapi::ApiDoc;
use crate::infra::shutdown::shutdown_signal;
use crate::infra::state::AppState;
use axum::Router;
use http::header::AUTHORIZATION;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::sensitive_headers::SetSensitiveRequestHeadersLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Constructs the full axum application.
pub fn app<R>(state: AppState<R>) -> Router
where
    R: BeerRepository + Clone + 'static,
{
    // Outermost first.
    let middleware = ServiceBuilder::new()
        .layer(CatchPanicLayer::custom(PanicHandler))
        .layer(SetSensitiveRequestHeadersLayer::new(iter::once(
            AUTHORIZATION,
        )))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(MakeRequestIdSpan)
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO))
                .on_failure(()),
        )
        .layer(TimeoutLayer::new(Duration::from_secs(10)));

    Router::new()
        .merge(SwaggerUi::new("/api/swagger-ui").url("/api/openapi.json", ApiDoc::openapi()))
        .nest("/api", crate::api::api(state))
        .layer(middleware)
}

/// Starts the axum server and serves until ctrl-c is pressed.
pub async fn run_app<R>(listener: TcpListener, state: AppState<R>) -> std::io::Result<()>
where
    R: BeerRepository + Clone + 'static,
{
    tracing::info!("Starting axum on {:?}", listener.local_addr());
    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("Successfully shut down");
    Ok(())
}
