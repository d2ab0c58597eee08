use std::time::Duration;

use client_core::{
    form::{NO_VACANCY_TEXT, TABLE_COLUMNS},
    SearchFields, SeatSearchForm, TableBody, TransportError,
};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use shared::domain::ClassPreference;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::{events::UiEvent, orchestration::dispatch_backend_command};

pub struct SeatFinderApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    fields: SearchFields,
    class_pref: ClassPreference,
    form: SeatSearchForm,
    status: String,
}

impl SeatFinderApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        default_date: String,
    ) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            fields: SearchFields {
                date: default_date,
                class_pref: ClassPreference::All.code().to_string(),
                ..SearchFields::default()
            },
            class_pref: ClassPreference::All,
            form: SeatSearchForm::new(),
            status: String::new(),
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Info(message) => self.status = message,
                UiEvent::SearchSettled(outcome) => self.form.settle(outcome),
            }
        }
    }

    fn submit(&mut self) {
        if self.form.is_busy() {
            return;
        }
        self.fields.class_pref = self.class_pref.code().to_string();
        let query = self.form.begin_submit(&self.fields);
        if let Err(reason) =
            dispatch_backend_command(&self.cmd_tx, BackendCommand::FindSeats { query })
        {
            self.form.settle(Err(TransportError::Unavailable(reason)));
        }
    }

    fn show_alert(&mut self, ctx: &egui::Context) {
        let Some(message) = self.form.page().pending_alert().map(str::to_string) else {
            return;
        };

        let mut dismissed = false;
        egui::Window::new("Alert")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(message);
                ui.add_space(8.0);
                if ui.button("OK").clicked() {
                    dismissed = true;
                }
            });
        if dismissed {
            self.form.take_alert();
        }
    }

    fn show_form(&mut self, ui: &mut egui::Ui) {
        egui::Grid::new("search_form")
            .num_columns(2)
            .spacing([12.0, 6.0])
            .show(ui, |ui| {
                ui.label("Train Number");
                ui.text_edit_singleline(&mut self.fields.train_no);
                ui.end_row();

                ui.label("Journey Date");
                ui.text_edit_singleline(&mut self.fields.date);
                ui.end_row();

                ui.label("Source Station");
                ui.text_edit_singleline(&mut self.fields.source_station);
                ui.end_row();

                ui.label("Destination Station");
                ui.text_edit_singleline(&mut self.fields.dest_station);
                ui.end_row();

                ui.label("Class");
                egui::ComboBox::from_id_salt("class_pref")
                    .selected_text(self.class_pref.code())
                    .show_ui(ui, |ui| {
                        for class in ClassPreference::VARIANTS {
                            ui.selectable_value(&mut self.class_pref, class, class.code());
                        }
                    });
                ui.end_row();
            });

        ui.add_space(8.0);
        let submit = &self.form.page().submit;
        let clicked = ui
            .add_enabled(submit.enabled, egui::Button::new(submit.label.as_str()))
            .clicked();
        if clicked {
            self.submit();
        }
    }

    fn show_results(&mut self, ui: &mut egui::Ui) {
        if !self.form.page().results_visible {
            return;
        }
        ui.separator();

        if self.form.page().loading_visible {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label("Scanning coaches...");
            });
        }

        if let Some(advice) = &self.form.page().ai_advice {
            ui.group(|ui| {
                ui.label(egui::RichText::new("AI Advice").strong());
                ui.label(advice.as_str());
            });
            ui.add_space(8.0);
        }

        let scroll_requested = self.form.take_scroll_request();
        let header = egui::Grid::new("seat_results")
            .num_columns(TABLE_COLUMNS.len())
            .striped(true)
            .spacing([24.0, 4.0])
            .show(ui, |ui| {
                for column in TABLE_COLUMNS {
                    ui.label(egui::RichText::new(column).strong());
                }
                ui.end_row();

                if let TableBody::Rows(rows) = &self.form.page().body {
                    for row in rows {
                        ui.label(egui::RichText::new(row.coach.as_str()).strong());
                        ui.label(row.seat.as_str());
                        ui.label(row.from.as_str());
                        ui.label(row.to.as_str());
                        ui.label(row.seat_type.as_str());
                        ui.end_row();
                    }
                }
            })
            .response;
        if scroll_requested {
            header.scroll_to_me(Some(egui::Align::TOP));
        }

        if self.form.page().body == TableBody::NoVacancy {
            ui.vertical_centered(|ui| {
                ui.label(NO_VACANCY_TEXT);
            });
        }

        let toggle_label = self.form.page().toggle.as_ref().map(|t| t.label.clone());
        if let Some(label) = toggle_label {
            ui.add_space(6.0);
            if ui.button(label).clicked() {
                self.form.activate_toggle();
            }
        }
    }
}

impl eframe::App for SeatFinderApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.label(self.status.as_str());
        });

        let alert_open = self.form.page().pending_alert().is_some();
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_enabled_ui(!alert_open, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    ui.heading("Vacant Seat Finder");
                    ui.add_space(8.0);
                    self.show_form(ui);
                    self.show_results(ui);
                });
            });
        });
        self.show_alert(ctx);

        if self.form.is_busy() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::bounded;
    use shared::protocol::{SearchResult, SeatRow};

    fn app() -> (SeatFinderApp, Receiver<BackendCommand>, Sender<UiEvent>) {
        let (cmd_tx, cmd_rx) = bounded(4);
        let (ui_tx, ui_rx) = bounded(4);
        (
            SeatFinderApp::new(cmd_tx, ui_rx, "2024-01-01".to_string()),
            cmd_rx,
            ui_tx,
        )
    }

    #[test]
    fn submit_queues_query_with_selected_class() {
        let (mut app, cmd_rx, _ui_tx) = app();
        app.fields.train_no = "12345".to_string();
        app.class_pref = ClassPreference::Sleeper;

        app.submit();
        assert!(app.form.is_busy());
        let Ok(BackendCommand::FindSeats { query }) = cmd_rx.try_recv() else {
            panic!("expected queued search");
        };
        assert_eq!(query.train_no, "12345");
        assert_eq!(query.date, "2024-01-01");
        assert_eq!(query.class_pref, "SL");

        app.submit();
        assert!(cmd_rx.try_recv().is_err(), "busy form must not resubmit");
    }

    #[test]
    fn settled_event_renders_rows_and_reenables_submit() {
        let (mut app, _cmd_rx, ui_tx) = app();
        app.submit();

        let row = SeatRow {
            coach: "S1".to_string(),
            seat: "4".to_string(),
            from: "NDLS".to_string(),
            to: "BCT".to_string(),
            seat_type: "LB".to_string(),
        };
        ui_tx
            .send(UiEvent::SearchSettled(Ok(SearchResult::success(
                vec![row],
                "advice",
            ))))
            .expect("send");
        app.process_ui_events();

        assert!(!app.form.is_busy());
        assert!(matches!(&app.form.page().body, TableBody::Rows(rows) if rows.len() == 1));
    }

    #[test]
    fn dead_worker_settles_with_connection_alert() {
        let (mut app, cmd_rx, _ui_tx) = app();
        drop(cmd_rx);

        app.submit();
        assert!(!app.form.is_busy());
        assert_eq!(
            app.form.page().pending_alert(),
            Some(client_core::form::CONNECTION_ERROR_ALERT)
        );
    }
}
