//! Add / edit form in the left panel

use super::App;
use crate::constants::APP_NAME;
use crate::theme;
use crate::ui::components::field_label;
use eframe::egui;

#[derive(Default)]
struct FormAction {
    submit: bool,
    cancel: bool,
}

impl App {
    pub(crate) fn render_form_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::left("form_panel")
            .exact_width(theme::FORM_PANEL_WIDTH)
            .resizable(false)
            .show_separator_line(false)
            .frame(theme::form_panel_frame())
            .show(ctx, |ui| {
                ui.add_space(theme::SPACING_MD);
                ui.label(
                    egui::RichText::new(format!("{}  {}", egui_phosphor::regular::BOOKS, APP_NAME))
                        .size(theme::FONT_TITLE)
                        .strong()
                        .color(theme::TEXT_PRIMARY),
                );
                ui.label(
                    egui::RichText::new("Catalog backed by Supabase")
                        .size(theme::FONT_SMALL)
                        .color(theme::TEXT_DIM),
                );
                ui.add_space(theme::SPACING_XL);

                let action = theme::section_frame()
                    .show(ui, |ui| {
                        ui.set_min_width(ui.available_width());
                        self.form_fields(ui)
                    })
                    .inner;

                // The catalog lock is released here; actions may take it again.
                if action.cancel {
                    self.catalog.cancel_edit();
                }
                if action.submit {
                    self.submit_form();
                }
            });
    }

    fn form_fields(&mut self, ui: &mut egui::Ui) -> FormAction {
        let mut action = FormAction::default();
        let mut state = self.catalog.lock();
        let editing = state.is_editing();
        let idle = !state.loading;

        let heading = if editing {
            format!("{}  Edit Book", egui_phosphor::regular::PENCIL_SIMPLE)
        } else {
            format!("{}  Add New Book", egui_phosphor::regular::PLUS)
        };
        ui.label(
            egui::RichText::new(heading)
                .size(theme::FONT_HEADING)
                .strong()
                .color(theme::ACCENT),
        );
        ui.add_space(theme::SPACING_MD);

        field_label(ui, "Book Name:");
        let name = ui.add(
            egui::TextEdit::singleline(&mut state.form.name)
                .hint_text("Enter book name")
                .desired_width(f32::INFINITY),
        );
        if self.focus_name {
            self.focus_name = false;
            name.request_focus();
        }
        ui.add_space(theme::SPACING_SM);

        field_label(ui, "Number of Pages:");
        let pages = ui.add(
            egui::TextEdit::singleline(&mut state.form.pages)
                .hint_text("Enter number of pages")
                .desired_width(f32::INFINITY),
        );
        let enter = ui.input(|i| i.key_pressed(egui::Key::Enter));
        if idle && enter && (name.lost_focus() || pages.lost_focus()) {
            action.submit = true;
        }
        ui.add_space(theme::SPACING_LG);

        ui.horizontal(|ui| {
            let label = if editing {
                format!("{}  Update Book", egui_phosphor::regular::FLOPPY_DISK)
            } else {
                format!("{}  Add Book", egui_phosphor::regular::PLUS)
            };
            if ui.add_enabled(idle, theme::button_accent(label)).clicked() {
                action.submit = true;
            }
            if editing {
                let cancel = theme::button(format!("{}  Cancel Edit", egui_phosphor::regular::X));
                if ui.add(cancel).clicked() {
                    action.cancel = true;
                }
            }
        });

        if state.loading {
            ui.add_space(theme::SPACING_MD);
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label(egui::RichText::new("Working...").color(theme::TEXT_DIM));
            });
        }

        action
    }
}
