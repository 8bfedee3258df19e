//! Reusable UI components
//!
//! Small widgets and formatters shared by the form, the table and the modals.

use crate::theme;
use chrono::{DateTime, Local, Utc};
use eframe::egui;

/// Local-time rendering of the server timestamp, "N/A" when the row has none
pub fn format_added(created_at: Option<DateTime<Utc>>) -> String {
    created_at
        .map(|t| t.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "N/A".to_string())
}

/// "Books List (3)"
pub fn list_title(count: usize) -> String {
    format!("Books List ({})", count)
}

/// Rounded pill showing the page count
pub fn pages_badge(ui: &mut egui::Ui, pages: i32) -> egui::Response {
    egui::Frame::new()
        .fill(theme::BADGE_BG)
        .corner_radius(theme::RADIUS_LARGE)
        .inner_margin(egui::Margin::symmetric(8, 2))
        .show(ui, |ui| {
            ui.label(
                egui::RichText::new(pages.to_string())
                    .size(theme::FONT_LABEL)
                    .color(theme::BADGE_TEXT),
            )
        })
        .response
}

/// Dim caption above a form input
pub fn field_label(ui: &mut egui::Ui, text: &str) {
    ui.add(
        egui::Label::new(
            egui::RichText::new(text)
                .size(theme::FONT_LABEL)
                .color(theme::TEXT_MUTED),
        )
        .selectable(false),
    );
}
