use async_trait::async_trait;
use reqwest::Client;
use shared::protocol::{SearchQuery, SearchResult, FIND_SEATS_ROUTE};
use tracing::debug;
use url::Url;

use crate::error::TransportError;

#[async_trait]
pub trait SeatSearchTransport: Send + Sync {
    async fn find_seats(&self, query: &SearchQuery) -> Result<SearchResult, TransportError>;
}

/// HTTP transport for the seat search endpoint.
///
/// The HTTP status is not inspected: the service answers failures with a
/// JSON body whose `status` field carries the outcome.
#[derive(Debug, Clone)]
pub struct SearchClient {
    http: Client,
    endpoint: Url,
}

impl SearchClient {
    pub fn new(server_url: &str) -> Result<Self, TransportError> {
        let base = Url::parse(server_url.trim())?;
        let endpoint = base.join(FIND_SEATS_ROUTE)?;
        Ok(Self {
            http: Client::new(),
            endpoint,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl SeatSearchTransport for SearchClient {
    async fn find_seats(&self, query: &SearchQuery) -> Result<SearchResult, TransportError> {
        debug!(endpoint = %self.endpoint, train_no = %query.train_no, "posting seat search");
        let response = self
            .http
            .post(self.endpoint.clone())
            .json(query)
            .send()
            .await
            .map_err(TransportError::Request)?;
        let status = response.status();
        let result = response
            .json::<SearchResult>()
            .await
            .map_err(TransportError::Decode)?;
        debug!(%status, result_status = %result.status, "seat search answered");
        Ok(result)
    }
}

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod tests;
