use std::time::Duration;

use arboard::Clipboard;
use client_core::{FileCandidate, ReviewSession};
use crossbeam_channel::{Receiver, Sender, TryRecvError};
use eframe::egui;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::controller::orchestration::{dispatch_backend_command, submit_analysis};
use crate::controller::reducer::{apply_ui_event, handle_worker_exit, ViewStatus};
use crate::ui::panels::{self, PanelAction};

#[derive(Debug, Clone)]
pub struct StartupConfig {
    pub api_base_url: String,
    pub max_upload_bytes: Option<u64>,
}

pub struct ReviewApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    session: ReviewSession,
    view: ViewStatus,
    startup: StartupConfig,
    worker_gone: bool,
}

impl ReviewApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        startup: StartupConfig,
    ) -> Self {
        let mut app = Self {
            cmd_tx,
            ui_rx,
            session: ReviewSession::with_upload_limit(startup.max_upload_bytes),
            view: ViewStatus::default(),
            startup,
            worker_gone: false,
        };
        app.bootstrap();
        app
    }

    /// Health is probed exactly once, when the app starts.
    fn bootstrap(&mut self) {
        if let Err(err) = dispatch_backend_command(&self.cmd_tx, BackendCommand::ProbeHealth) {
            self.view.banner = Some(err.into());
        }
    }

    fn process_ui_events(&mut self) {
        loop {
            match self.ui_rx.try_recv() {
                Ok(event) => apply_ui_event(&mut self.session, &mut self.view, event),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    if !self.worker_gone {
                        self.worker_gone = true;
                        handle_worker_exit(&mut self.session, &mut self.view);
                    }
                    break;
                }
            }
        }
    }

    fn handle_file_drops(&mut self, ctx: &egui::Context) {
        let (hovering, dropped) = ctx.input(|i| {
            (
                !i.raw.hovered_files.is_empty(),
                i.raw.dropped_files.first().cloned(),
            )
        });

        // Selection is locked while a request runs, same as the disabled picker.
        if self.session.is_in_flight() {
            if dropped.is_some() {
                tracing::debug!("ignoring drop while analysis is in flight");
            }
            if self.session.is_drag_over() {
                self.session.drag_leave();
            }
            return;
        }

        if let Some(file) = dropped {
            let candidate = candidate_from_drop(&file);
            if self.session.drop_file(candidate) {
                self.view.status = "File selected".to_string();
            }
        } else if hovering && !self.session.is_drag_over() {
            self.session.drag_enter();
        } else if !hovering && self.session.is_drag_over() {
            self.session.drag_leave();
        }
    }

    fn pick_file(&mut self) {
        if self.session.is_in_flight() {
            return;
        }
        let Some(path) = rfd::FileDialog::new()
            .add_filter("PDF", &["pdf"])
            .pick_file()
        else {
            return;
        };
        let candidate = match FileCandidate::from_path(&path) {
            Ok(candidate) => Some(candidate),
            Err(err) => {
                tracing::warn!(path = %path.display(), "unable to inspect picked file: {err}");
                None
            }
        };
        if self.session.select_file(candidate) {
            self.view.status = "File selected".to_string();
        }
    }

    fn submit(&mut self) {
        if let Err(rejection) = submit_analysis(&mut self.session, &self.cmd_tx) {
            tracing::debug!(?rejection, "submit rejected");
        }
    }

    fn copy_result(&mut self) {
        let Some(result) = self.session.result() else {
            return;
        };
        let copied = Clipboard::new()
            .and_then(|mut clipboard| clipboard.set_text(result.analysis.clone()));
        self.view.status = match copied {
            Ok(()) => "Copied analysis to clipboard".to_string(),
            Err(err) => format!("Failed to copy analysis: {err}"),
        };
    }

    fn show_review_screen(&mut self, ctx: &egui::Context) {
        let reveal = self.session.take_result_reveal();
        let mut actions = Vec::new();

        egui::TopBottomPanel::bottom("status_footer").show(ctx, |ui| {
            panels::footer(ui, &self.startup.api_base_url, &self.view.status);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    ui.set_max_width(760.0);
                    panels::header(ui, &self.session, self.view.banner.as_ref());
                    ui.add_space(12.0);
                    actions.extend(panels::upload_card(ui, &self.session));
                    panels::progress(ui, &self.session);
                    panels::error_box(ui, &self.session);
                    actions.extend(panels::results(ui, &self.session, reveal));
                });
        });

        for action in actions {
            match action {
                PanelAction::ChooseFile => self.pick_file(),
                PanelAction::Submit => self.submit(),
                PanelAction::CopyResult => self.copy_result(),
            }
        }
    }
}

/// Native drops carry a path; web-style drops carry bytes and a declared type.
fn candidate_from_drop(file: &egui::DroppedFile) -> Option<FileCandidate> {
    if let Some(path) = &file.path {
        return match FileCandidate::from_path(path) {
            Ok(candidate) => Some(candidate),
            Err(err) => {
                tracing::warn!(path = %path.display(), "unable to inspect dropped file: {err}");
                None
            }
        };
    }
    let bytes = file.bytes.clone()?;
    Some(FileCandidate::from_bytes(
        file.name.clone(),
        Some(file.mime.as_str()),
        bytes,
    ))
}

impl eframe::App for ReviewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();
        self.handle_file_drops(ctx);
        self.show_review_screen(ctx);

        if self.session.is_in_flight() {
            ctx.request_repaint_after(Duration::from_millis(16));
        } else {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}
