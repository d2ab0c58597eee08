//! Backend commands queued from UI to backend worker.

use shared::protocol::SearchQuery;

pub enum BackendCommand {
    FindSeats { query: SearchQuery },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::FindSeats { .. } => "find_seats",
        }
    }
}
