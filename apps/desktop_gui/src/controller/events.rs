//! Events flowing from the backend worker back to the UI thread.

use client_core::TransportError;
use shared::protocol::SearchResult;

pub enum UiEvent {
    Info(String),
    SearchSettled(Result<SearchResult, TransportError>),
}
