use seat_engine::SearchContext;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) search: SearchContext,
}
