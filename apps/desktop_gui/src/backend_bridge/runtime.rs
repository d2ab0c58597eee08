//! Runtime bridge between UI command queue and backend event intake.

use std::thread;

use client_core::{SearchClient, SeatSearchTransport, TransportError};
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;

/// Runs the backend worker on its own thread with a tokio runtime. Dropping
/// `cmd_rx` on exit lets the UI detect a dead worker when it next dispatches.
pub fn launch(server_url: String, cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            let client = match SearchClient::new(&server_url) {
                Ok(client) => {
                    let _ = ui_tx.try_send(UiEvent::Info(format!(
                        "Searching via {}",
                        client.endpoint()
                    )));
                    Some(client)
                }
                Err(err) => {
                    tracing::error!(%server_url, "unusable server url: {err}");
                    let _ = ui_tx.try_send(UiEvent::Info(format!("Server URL unusable: {err}")));
                    None
                }
            };

            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    BackendCommand::FindSeats { query } => {
                        let outcome = match client.as_ref() {
                            Some(client) => client.find_seats(&query).await,
                            None => Err(TransportError::Unavailable(format!(
                                "server url '{server_url}' is invalid"
                            ))),
                        };
                        if ui_tx.send(UiEvent::SearchSettled(outcome)).is_err() {
                            break;
                        }
                    }
                }
            }
        });
    });
}
