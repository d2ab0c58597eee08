use std::sync::Arc;

use shared::{
    domain::ClassPreference,
    error::{ApiError, ErrorCode},
    protocol::{SearchQuery, SearchResult},
};
use tracing::{error, info, warn};

pub mod advisor;
pub mod chart;
pub mod source;

use advisor::SeatAdvisor;
use chart::{vacant_fragments, vacant_rows};
use source::{ChartSource, ChartSourceError};

pub const NO_DATA_MESSAGE: &str = "No data found.";
pub const ADVICE_NEEDS_ROUTE: &str = "Enter Source & Destination for AI Advice.";
pub const ADVICE_FAILED: &str = "AI Analysis Failed. Check server logs.";

#[derive(Clone)]
pub struct SearchContext {
    pub charts: Arc<dyn ChartSource>,
    pub advisor: Option<Arc<dyn SeatAdvisor>>,
}

/// Runs one seat search: load charts, coalesce vacant rows, ask for advice.
pub async fn find_seats(ctx: &SearchContext, query: &SearchQuery) -> Result<SearchResult, ApiError> {
    let class = match ClassPreference::from_form_value(Some(query.class_pref.as_str())) {
        Ok(class) => class,
        Err(err) => {
            warn!(train_no = %query.train_no, %err, "class preference admits no coach");
            return Err(ApiError::new(ErrorCode::NoData, NO_DATA_MESSAGE));
        }
    };
    info!(
        train_no = %query.train_no,
        date = %query.date,
        station = %query.station,
        dest_station = %query.dest_station,
        %class,
        "seat search"
    );

    let charts = ctx
        .charts
        .coach_charts(&query.train_no, class)
        .await
        .map_err(|err| match err {
            ChartSourceError::InvalidTrainNumber(_) => {
                ApiError::new(ErrorCode::Validation, err.to_string())
            }
            ChartSourceError::Io { .. } => ApiError::new(ErrorCode::Internal, err.to_string()),
        })?;
    if charts.is_empty() {
        return Err(ApiError::new(ErrorCode::NoData, NO_DATA_MESSAGE));
    }

    let rows = vacant_rows(&charts);
    let fragments = vacant_fragments(&charts);
    let station = query.station.trim();
    let destination = query.dest_station.trim();

    let advice = if fragments.is_empty() || station.is_empty() || destination.is_empty() {
        ADVICE_NEEDS_ROUTE.to_string()
    } else {
        advise(ctx, &fragments, station, destination).await
    };

    info!(rows = rows.len(), fragments = fragments.len(), "seat search complete");
    Ok(SearchResult::success(rows, advice))
}

async fn advise(ctx: &SearchContext, fragments: &[String], station: &str, destination: &str) -> String {
    let Some(advisor) = ctx.advisor.as_ref() else {
        warn!("no itinerary advisor configured");
        return ADVICE_FAILED.to_string();
    };

    match advisor.advise(fragments, station, destination).await {
        Ok(text) => text,
        Err(error) => {
            error!(%error, "itinerary advisor failed");
            ADVICE_FAILED.to_string()
        }
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
