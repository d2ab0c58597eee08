//! Seat search form controller and the view model it drives.
//!
//! A submit runs in two halves around the network call: [`SeatSearchForm::begin_submit`]
//! applies the in-flight state and [`SeatSearchForm::settle`] renders the outcome.
//! Event-loop front ends call them separately; [`SeatSearchForm::submit`] chains
//! both around a [`SeatSearchTransport`].

use std::{
    collections::VecDeque,
    ops::{Deref, DerefMut},
};

use shared::protocol::{SearchQuery, SearchResult, SeatRow};
use tracing::{error, info};

use crate::{
    error::TransportError,
    table::{ResultsTable, ToggleControl},
    transport::SeatSearchTransport,
};

pub const SUBMIT_LABEL: &str = "Finding Vacant Seats";
pub const PROCESSING_LABEL: &str = "Processing...";
pub const NO_VACANCY_TEXT: &str = "No vacant data found.";
pub const CONNECTION_ERROR_ALERT: &str = "Connection Error.";
pub const TABLE_COLUMNS: [&str; 5] = ["Coach", "Seat", "From", "To", "Type"];

/// Raw form input. Values are sent as typed; nothing is validated here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFields {
    pub train_no: String,
    pub date: String,
    pub source_station: String,
    pub dest_station: String,
    pub class_pref: String,
}

impl SearchFields {
    pub fn to_query(&self) -> SearchQuery {
        SearchQuery {
            train_no: self.train_no.clone(),
            date: self.date.clone(),
            station: self.source_station.clone(),
            dest_station: self.dest_station.clone(),
            class_pref: self.class_pref.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitControl {
    pub enabled: bool,
    pub label: String,
}

impl SubmitControl {
    fn idle() -> Self {
        Self {
            enabled: true,
            label: SUBMIT_LABEL.to_string(),
        }
    }

    fn processing() -> Self {
        Self {
            enabled: false,
            label: PROCESSING_LABEL.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableBody {
    Cleared,
    Rows(Vec<SeatRow>),
    /// A single informational row spanning every column.
    NoVacancy,
}

#[derive(Debug, Clone)]
pub struct SearchPage {
    pub submit: SubmitControl,
    pub results_visible: bool,
    pub loading_visible: bool,
    /// Advice panel content; `None` keeps the panel hidden. Rendered as
    /// plain text, never as markup.
    pub ai_advice: Option<String>,
    pub body: TableBody,
    pub toggle: Option<ToggleControl>,
    scroll_to_table: bool,
    alerts: VecDeque<String>,
    results: Option<ResultsTable>,
}

impl Default for SearchPage {
    fn default() -> Self {
        Self {
            submit: SubmitControl::idle(),
            results_visible: false,
            loading_visible: false,
            ai_advice: None,
            body: TableBody::Cleared,
            toggle: None,
            scroll_to_table: false,
            alerts: VecDeque::new(),
            results: None,
        }
    }
}

impl SearchPage {
    pub fn pending_alert(&self) -> Option<&str> {
        self.alerts.front().map(String::as_str)
    }

    pub fn results(&self) -> Option<&ResultsTable> {
        self.results.as_ref()
    }

    fn start_request(&mut self) {
        self.submit = SubmitControl::processing();
        self.results_visible = true;
        self.loading_visible = true;
        self.ai_advice = None;
        self.body = TableBody::Cleared;
        self.toggle = None;
        self.scroll_to_table = false;
        self.results = None;
    }

    fn apply_outcome(&mut self, outcome: Result<SearchResult, TransportError>) {
        self.loading_visible = false;

        let result = match outcome {
            Ok(result) => result,
            Err(error) => {
                error!(%error, "seat search failed");
                self.alerts.push_back(CONNECTION_ERROR_ALERT.to_string());
                return;
            }
        };

        if !result.is_success() {
            let message = result.message.as_deref().unwrap_or("unknown error");
            info!(status = %result.status, %message, "seat search rejected by server");
            self.alerts.push_back(format!("Error: {message}"));
            return;
        }

        if let Some(advice) = result.ai_advice.filter(|advice| !advice.is_empty()) {
            self.ai_advice = Some(advice);
        }

        match result.raw_data {
            Some(rows) if !rows.is_empty() => {
                info!(rows = rows.len(), "rendering seat results");
                self.results = Some(ResultsTable::new(rows));
                self.render_results();
            }
            _ => {
                self.body = TableBody::NoVacancy;
                self.toggle = None;
            }
        }
    }

    /// Replaces the whole table body and toggle from the current window.
    fn render_results(&mut self) {
        let Some(table) = self.results.as_ref() else {
            return;
        };
        self.body = TableBody::Rows(table.visible_rows().to_vec());
        self.toggle = table.toggle_control();
    }

    fn finish_request(&mut self) {
        self.submit = SubmitControl::idle();
        self.loading_visible = false;
    }
}

/// Restores the submit control when dropped, whether the request settled,
/// response handling panicked, or the submit future was dropped mid-flight.
struct SubmitCleanup<'a> {
    page: &'a mut SearchPage,
}

impl<'a> SubmitCleanup<'a> {
    fn new(page: &'a mut SearchPage) -> Self {
        Self { page }
    }
}

impl Deref for SubmitCleanup<'_> {
    type Target = SearchPage;

    fn deref(&self) -> &SearchPage {
        self.page
    }
}

impl DerefMut for SubmitCleanup<'_> {
    fn deref_mut(&mut self) -> &mut SearchPage {
        self.page
    }
}

impl Drop for SubmitCleanup<'_> {
    fn drop(&mut self) {
        self.page.finish_request();
    }
}

#[derive(Debug, Default)]
pub struct SeatSearchForm {
    page: SearchPage,
}

impl SeatSearchForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(&self) -> &SearchPage {
        &self.page
    }

    pub fn is_busy(&self) -> bool {
        !self.page.submit.enabled
    }

    /// Puts the page into its in-flight state and returns the query to send.
    pub fn begin_submit(&mut self, fields: &SearchFields) -> SearchQuery {
        let query = fields.to_query();
        info!(
            train_no = %query.train_no,
            date = %query.date,
            station = %query.station,
            dest_station = %query.dest_station,
            class_pref = %query.class_pref,
            "submitting seat search"
        );
        self.page.start_request();
        query
    }

    /// Renders a settled request and re-enables the submit control.
    pub fn settle(&mut self, outcome: Result<SearchResult, TransportError>) {
        let mut page = SubmitCleanup::new(&mut self.page);
        page.apply_outcome(outcome);
    }

    pub async fn submit<T>(&mut self, transport: &T, fields: &SearchFields)
    where
        T: SeatSearchTransport + ?Sized,
    {
        let query = self.begin_submit(fields);
        let mut page = SubmitCleanup::new(&mut self.page);
        let outcome = transport.find_seats(&query).await;
        page.apply_outcome(outcome);
    }

    /// Handles a click on the "view more/less" control.
    pub fn activate_toggle(&mut self) {
        let Some(table) = self.page.results.as_mut() else {
            return;
        };
        if table.toggle_control().is_none() {
            return;
        }

        let expanded = table.toggle();
        self.page.render_results();
        if !expanded {
            self.page.scroll_to_table = true;
        }
    }

    /// Consumes a pending request to smooth-scroll the table into view.
    pub fn take_scroll_request(&mut self) -> bool {
        std::mem::take(&mut self.page.scroll_to_table)
    }

    /// Dismisses the oldest alert.
    pub fn take_alert(&mut self) -> Option<String> {
        self.page.alerts.pop_front()
    }
}

#[cfg(test)]
#[path = "tests/form_tests.rs"]
mod tests;
