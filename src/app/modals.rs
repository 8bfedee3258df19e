//! Modal dialogs (delete confirmation, blocking notice)

use super::App;
use crate::theme;
use crate::types::NoticeKind;
use eframe::egui;

impl App {
    pub(crate) fn render_modals(&mut self, ctx: &egui::Context) {
        // A notice blocks everything else, including a pending confirmation.
        if self.catalog.lock().notice.is_some() {
            self.render_notice_modal(ctx);
        } else if self.catalog.lock().pending_delete.is_some() {
            self.render_confirm_modal(ctx);
        }
    }

    fn render_confirm_modal(&mut self, ctx: &egui::Context) {
        let Some(book) = self.catalog.lock().pending_delete.clone() else {
            return;
        };

        let mut confirmed = false;
        let mut dismissed = false;

        let modal = egui::Modal::new(egui::Id::new("confirm_delete_modal"))
            .backdrop_color(egui::Color32::from_black_alpha(160))
            .frame(theme::modal_frame());
        let response = modal.show(ctx, |ui| {
            ui.set_width(theme::MODAL_WIDTH);
            ui.vertical_centered(|ui| {
                ui.label(
                    egui::RichText::new(egui_phosphor::regular::TRASH)
                        .size(32.0)
                        .color(theme::STATUS_ERROR),
                );
                ui.add_space(theme::SPACING_MD);
                ui.label(
                    egui::RichText::new("Are you sure you want to delete this book?")
                        .size(theme::FONT_HEADING)
                        .strong(),
                );
                ui.add_space(theme::SPACING_SM);
                ui.label(
                    egui::RichText::new(format!("{} ({} pages)", book.name, book.pages))
                        .color(theme::TEXT_MUTED),
                );
            });
            ui.add_space(theme::SPACING_XL);

            ui.horizontal(|ui| {
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let delete = theme::button_danger(format!("{}  Delete", egui_phosphor::regular::TRASH));
                    if ui.add(delete).clicked() {
                        confirmed = true;
                    }
                    if ui.add(theme::button("Cancel")).clicked() {
                        dismissed = true;
                    }
                });
            });
        });

        if confirmed {
            self.confirm_delete();
        } else if dismissed || response.should_close() {
            self.catalog.dismiss_remove();
        }
    }

    fn render_notice_modal(&mut self, ctx: &egui::Context) {
        let Some(notice) = self.catalog.lock().notice.clone() else {
            return;
        };

        let (icon, color) = match notice.kind {
            NoticeKind::Success => (egui_phosphor::regular::CHECK_CIRCLE, theme::STATUS_SUCCESS),
            NoticeKind::Error => (egui_phosphor::regular::WARNING_CIRCLE, theme::STATUS_ERROR),
        };

        let mut ok = false;
        let modal = egui::Modal::new(egui::Id::new("notice_modal"))
            .backdrop_color(egui::Color32::from_black_alpha(160))
            .frame(theme::modal_frame());
        let response = modal.show(ctx, |ui| {
            ui.set_width(theme::MODAL_WIDTH);
            ui.vertical_centered(|ui| {
                ui.label(egui::RichText::new(icon).size(32.0).color(color));
                ui.add_space(theme::SPACING_MD);
                ui.add(
                    egui::Label::new(egui::RichText::new(&notice.text).size(theme::FONT_BODY))
                        .wrap(),
                );
                ui.add_space(theme::SPACING_XL);
                let button = if notice.is_error() {
                    theme::button("OK")
                } else {
                    theme::button_accent(format!("{}  OK", egui_phosphor::regular::CHECK))
                };
                if ui.add(button).clicked() {
                    ok = true;
                }
            });
        });

        if ok || response.should_close() {
            self.catalog.dismiss_notice();
        }
    }
}
