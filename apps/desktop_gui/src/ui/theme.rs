use eframe::egui;

pub const ACCENT: egui::Color32 = egui::Color32::from_rgb(37, 99, 235);
pub const ERROR_TEXT: egui::Color32 = egui::Color32::from_rgb(185, 28, 28);
pub const ERROR_FILL: egui::Color32 = egui::Color32::from_rgb(254, 226, 226);
pub const WARNING_TEXT: egui::Color32 = egui::Color32::from_rgb(146, 64, 14);
pub const WARNING_FILL: egui::Color32 = egui::Color32::from_rgb(254, 243, 199);
pub const MUTED_TEXT: egui::Color32 = egui::Color32::from_rgb(107, 114, 128);
pub const CARD_STROKE: egui::Color32 = egui::Color32::from_rgb(209, 213, 219);

pub fn lighten_color(c: egui::Color32, t: f32) -> egui::Color32 {
    let t = t.clamp(0.0, 1.0);
    let mix = |channel: u8| -> u8 {
        let channel = channel as f32;
        (channel + (255.0 - channel) * t).round().clamp(0.0, 255.0) as u8
    };
    egui::Color32::from_rgba_unmultiplied(mix(c.r()), mix(c.g()), mix(c.b()), c.a())
}

/// Fill of the drop zone; highlighted while a file hovers over the window.
pub fn drop_zone_fill(drag_over: bool) -> egui::Color32 {
    if drag_over {
        lighten_color(ACCENT, 0.85)
    } else {
        egui::Color32::from_gray(249)
    }
}

pub fn drop_zone_stroke(drag_over: bool) -> egui::Stroke {
    if drag_over {
        egui::Stroke::new(2.0, ACCENT)
    } else {
        egui::Stroke::new(1.0, CARD_STROKE)
    }
}
