pub mod error;
pub mod form;
pub mod table;
pub mod transport;

pub use error::TransportError;
pub use form::{SearchFields, SearchPage, SeatSearchForm, TableBody};
pub use table::{ResultsTable, ToggleControl, INITIAL_ROW_LIMIT};
pub use transport::{SearchClient, SeatSearchTransport};
