//! Panels for the review screen. Panels only render and report what the user
//! asked for; the app applies the actions to the session.

use client_core::ReviewSession;
use eframe::egui;
use shared::domain::ADVERTISED_UPLOAD_LIMIT_BYTES;

use crate::controller::events::{err_label, UiError};
use crate::ui::theme;

pub const BACKEND_NOT_CONFIGURED_BANNER: &str =
    "⚠️ Backend not configured - Add GROQ_API_KEY to proceed";
pub const ANALYZING_MESSAGE: &str = "Analyzing your resume... This may take a few seconds.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelAction {
    ChooseFile,
    Submit,
    CopyResult,
}

pub fn header(ui: &mut egui::Ui, session: &ReviewSession, banner: Option<&UiError>) {
    ui.vertical_centered(|ui| {
        ui.heading(egui::RichText::new("📄 ElevateCV").size(28.0).strong());
        ui.label(
            egui::RichText::new("Get instant AI-powered feedback on your resume")
                .color(theme::MUTED_TEXT),
        );
    });
    ui.add_space(6.0);

    match session.health() {
        None => {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label(egui::RichText::new("Checking backend...").color(theme::MUTED_TEXT));
            });
        }
        Some(health) if !health.usable() => {
            notice(ui, theme::WARNING_FILL, theme::WARNING_TEXT, |ui| {
                ui.label(
                    egui::RichText::new(BACKEND_NOT_CONFIGURED_BANNER)
                        .color(theme::WARNING_TEXT)
                        .strong(),
                );
            });
        }
        Some(_) => {}
    }

    if let Some(err) = banner {
        let (fill, text) = banner_colors(err);
        notice(ui, fill, text, |ui| {
            ui.label(
                egui::RichText::new(format!("{}: {}", err_label(err.kind()), err.message()))
                    .color(text),
            );
        });
    }
}

/// Errors that need a restart use the error palette; transient ones warn.
pub fn banner_colors(err: &UiError) -> (egui::Color32, egui::Color32) {
    if err.requires_restart() {
        (theme::ERROR_FILL, theme::ERROR_TEXT)
    } else {
        (theme::WARNING_FILL, theme::WARNING_TEXT)
    }
}

pub fn upload_card(ui: &mut egui::Ui, session: &ReviewSession) -> Option<PanelAction> {
    let mut action = None;
    let drag_over = session.is_drag_over();

    egui::Frame::NONE
        .fill(theme::drop_zone_fill(drag_over))
        .stroke(theme::drop_zone_stroke(drag_over))
        .corner_radius(8.0)
        .inner_margin(egui::Margin::symmetric(16, 14))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.vertical_centered(|ui| {
                let prompt = if drag_over {
                    "Release to select this file"
                } else {
                    "Drop your resume here, or choose a file"
                };
                ui.label(egui::RichText::new(prompt).strong());
                ui.label(egui::RichText::new(upload_guidance(session)).color(theme::MUTED_TEXT));
                ui.add_space(8.0);

                ui.horizontal(|ui| {
                    if ui
                        .add_enabled(!session.is_in_flight(), egui::Button::new("Choose PDF"))
                        .clicked()
                    {
                        action = Some(PanelAction::ChooseFile);
                    }
                    let label = if session.is_in_flight() {
                        "Analyzing..."
                    } else {
                        "Analyze Resume"
                    };
                    let submit = egui::Button::new(egui::RichText::new(label).strong());
                    if ui.add_enabled(session.can_submit(), submit).clicked() {
                        action = Some(PanelAction::Submit);
                    }
                });
            });

            if let Some(file) = session.selected_file() {
                ui.add_space(8.0);
                ui.label(
                    egui::RichText::new(format!("Selected: {} ({})", file.name(), file.size_label()))
                        .color(theme::MUTED_TEXT),
                );
            }
        });

    action
}

pub fn progress(ui: &mut egui::Ui, session: &ReviewSession) {
    if !session.is_in_flight() {
        return;
    }
    ui.add_space(10.0);
    ui.vertical_centered(|ui| {
        ui.spinner();
        ui.label(ANALYZING_MESSAGE);
    });
}

pub fn error_box(ui: &mut egui::Ui, session: &ReviewSession) {
    let Some(message) = session.error() else {
        return;
    };
    ui.add_space(10.0);
    notice(ui, theme::ERROR_FILL, theme::ERROR_TEXT, |ui| {
        ui.horizontal_wrapped(|ui| {
            ui.label(egui::RichText::new("Error:").color(theme::ERROR_TEXT).strong());
            ui.label(egui::RichText::new(message).color(theme::ERROR_TEXT));
        });
    });
}

/// Renders the result, scrolling it into view when `reveal` is set.
pub fn results(ui: &mut egui::Ui, session: &ReviewSession, reveal: bool) -> Option<PanelAction> {
    let result = session.result()?;
    let mut action = None;

    ui.add_space(14.0);
    let heading = ui.heading("Analysis Results");
    if reveal {
        heading.scroll_to_me(Some(egui::Align::TOP));
    }

    egui::Frame::NONE
        .fill(egui::Color32::WHITE)
        .stroke(egui::Stroke::new(1.0, theme::CARD_STROKE))
        .corner_radius(8.0)
        .inner_margin(egui::Margin::symmetric(12, 10))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.add(egui::Label::new(result.analysis.as_str()).wrap());
        });

    ui.add_space(6.0);
    ui.horizontal(|ui| {
        ui.label(egui::RichText::new("Filename:").strong());
        ui.label(result.filename.as_str());
        if let Some(model) = result.model.as_deref() {
            ui.separator();
            ui.label(egui::RichText::new("Model:").strong());
            ui.label(model);
        }
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("📋 Copy").clicked() {
                action = Some(PanelAction::CopyResult);
            }
        });
    });

    action
}

pub fn footer(ui: &mut egui::Ui, api_base_url: &str, status: &str) {
    ui.horizontal(|ui| {
        ui.label(
            egui::RichText::new(format!(
                "{} backend · {}",
                server_environment_label(api_base_url),
                api_base_url
            ))
            .small()
            .color(theme::MUTED_TEXT),
        );
        if !status.is_empty() {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(egui::RichText::new(status).small().color(theme::MUTED_TEXT));
            });
        }
    });
}

fn notice(
    ui: &mut egui::Ui,
    fill: egui::Color32,
    stroke: egui::Color32,
    add: impl FnOnce(&mut egui::Ui),
) {
    egui::Frame::NONE
        .fill(fill)
        .stroke(egui::Stroke::new(1.0, theme::lighten_color(stroke, 0.5)))
        .corner_radius(8.0)
        .inner_margin(egui::Margin::symmetric(10, 8))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            add(ui);
        });
}

pub fn upload_guidance(session: &ReviewSession) -> String {
    let limit = session
        .max_upload_bytes()
        .unwrap_or(ADVERTISED_UPLOAD_LIMIT_BYTES);
    format!("PDF files up to {}", human_readable_bytes(limit))
}

pub fn server_environment_label(server_url: &str) -> &'static str {
    let server = server_url.to_ascii_lowercase();
    if server.contains("127.0.0.1") || server.contains("localhost") {
        "Local"
    } else if server.contains("staging") {
        "Staging"
    } else if server.contains("dev") {
        "Development"
    } else {
        "Production"
    }
}

pub fn human_readable_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes < KB {
        return format!("{bytes} bytes");
    }
    if bytes < MB {
        return format_scaled_unit(bytes, KB, "KB");
    }
    if bytes < GB {
        return format_scaled_unit(bytes, MB, "MB");
    }
    format_scaled_unit(bytes, GB, "GB")
}

fn format_scaled_unit(bytes: u64, unit_size: u64, unit_label: &str) -> String {
    let value = bytes as f64 / unit_size as f64;
    let value_text = format!("{value:.1}");
    let compact_value = value_text.strip_suffix(".0").unwrap_or(&value_text);
    format!("{compact_value}{unit_label}")
}
