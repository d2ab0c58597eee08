use std::{net::SocketAddr, sync::Arc};

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use seat_engine::{
    advisor::{GeminiAdvisor, SeatAdvisor},
    find_seats,
    source::CapturedChartSource,
    SearchContext,
};
use shared::{
    error::{ApiError, ErrorCode},
    protocol::{SearchQuery, SearchResult, FIND_SEATS_ROUTE},
};
use tower_http::limit::RequestBodyLimitLayer;
use tracing::{error, info, warn};

mod app_state;
mod config;

use app_state::AppState;
use config::load_settings;

const MAX_REQUEST_BYTES: usize = 64 * 1024;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let settings = load_settings();
    let charts = CapturedChartSource::new(settings.chart_dir.clone());
    info!(chart_dir = %charts.root().display(), "serving captured coach charts");

    let advisor = match settings.gemini_api_key.as_deref() {
        Some(api_key) => {
            let advisor = GeminiAdvisor::new(api_key)
                .with_model(settings.gemini_model.clone())
                .with_endpoint(settings.gemini_endpoint.clone());
            info!(model = %advisor.model(), "itinerary advisor enabled");
            Some(Arc::new(advisor) as Arc<dyn SeatAdvisor>)
        }
        None => {
            error!("GEMINI_API_KEY is not set; itinerary advice is disabled");
            None
        }
    };

    let state = AppState {
        search: SearchContext {
            charts: Arc::new(charts),
            advisor,
        },
    };
    let app = build_router(Arc::new(state));

    let addr: SocketAddr = settings.server_bind.parse()?;
    info!(%addr, "server listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route(FIND_SEATS_ROUTE, post(http_find_seats))
        .layer(RequestBodyLimitLayer::new(MAX_REQUEST_BYTES))
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}

async fn http_find_seats(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SearchQuery>, JsonRejection>,
) -> (StatusCode, Json<SearchResult>) {
    let Json(query) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            warn!(error = %rejection.body_text(), "rejected seat search body");
            return (
                rejection.status(),
                Json(SearchResult::error(rejection.body_text())),
            );
        }
    };

    match find_seats(&state.search, &query).await {
        Ok(result) => (StatusCode::OK, Json(result)),
        Err(err) => {
            let status = status_for(&err);
            if status.is_server_error() {
                error!(error = %err.message, "seat search failed");
            } else {
                info!(error = %err.message, "seat search rejected");
            }
            (status, Json(SearchResult::error(err.message)))
        }
    }
}

fn status_for(err: &ApiError) -> StatusCode {
    match err.code {
        ErrorCode::NoData | ErrorCode::Validation => StatusCode::BAD_REQUEST,
        ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
