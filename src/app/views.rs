//! Book list rendering

use super::App;
use crate::theme;
use crate::types::{Book, BookId};
use crate::ui::components::{format_added, list_title, pages_badge};
use eframe::egui;

enum RowAction {
    Edit(Book),
    Delete(Book),
}

impl App {
    pub(crate) fn render_book_list(&mut self, ui: &mut egui::Ui) {
        let state = self.catalog.snapshot();

        ui.horizontal(|ui| {
            ui.label(
                egui::RichText::new(format!(
                    "{}  {}",
                    egui_phosphor::regular::BOOK_OPEN,
                    list_title(state.books.len())
                ))
                .size(theme::FONT_HEADING)
                .strong(),
            );
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let refresh = theme::button(format!("{}  Refresh", egui_phosphor::regular::ARROW_CLOCKWISE));
                if ui.add_enabled(self.connected && !state.loading, refresh).clicked() {
                    self.load_books();
                }
            });
        });
        ui.add_space(theme::SPACING_MD);

        if state.loading {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label(egui::RichText::new("Loading books...").color(theme::TEXT_MUTED));
            });
            // Keep the last snapshot visible underneath while a call is in flight.
            if state.books.is_empty() {
                return;
            }
            ui.add_space(theme::SPACING_SM);
        } else if state.books.is_empty() {
            ui.add_space(theme::SPACING_XL);
            ui.vertical_centered(|ui| {
                ui.label(
                    egui::RichText::new("No books found. Add your first book!")
                        .size(theme::FONT_BODY)
                        .color(theme::TEXT_DIM),
                );
            });
            return;
        }

        if let Some(action) = Self::book_table(ui, &state.books, state.loading, state.editing.as_ref()) {
            match action {
                RowAction::Edit(book) => {
                    self.catalog.begin_edit(&book);
                    self.focus_name = true;
                }
                RowAction::Delete(book) => self.catalog.request_remove(book),
            }
        }
    }

    fn book_table(
        ui: &mut egui::Ui,
        books: &[Book],
        loading: bool,
        editing: Option<&BookId>,
    ) -> Option<RowAction> {
        use egui_extras::{Column, TableBuilder};

        let mut action = None;

        TableBuilder::new(ui)
            .striped(true)
            .resizable(false)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .column(Column::exact(80.0).clip(true))
            .column(Column::remainder().at_least(160.0).clip(true))
            .column(Column::exact(90.0))
            .column(Column::exact(140.0))
            .column(Column::exact(180.0))
            .header(theme::HEADER_HEIGHT, |mut header| {
                for title in ["ID", "BOOK NAME", "PAGES", "ADDED", "ACTIONS"] {
                    header.col(|ui| {
                        ui.label(
                            egui::RichText::new(title)
                                .size(theme::FONT_LABEL)
                                .strong()
                                .color(theme::TEXT_MUTED),
                        );
                    });
                }
            })
            .body(|body| {
                body.rows(theme::ROW_HEIGHT, books.len(), |mut row| {
                    let book = &books[row.index()];
                    let is_target = editing == Some(&book.id);

                    row.col(|ui| {
                        let id = book.id.to_string();
                        ui.label(egui::RichText::new(&id).color(theme::TEXT_DIM))
                            .on_hover_text(id);
                    });
                    row.col(|ui| {
                        let color = if is_target { theme::ACCENT } else { theme::TEXT_SECONDARY };
                        ui.label(egui::RichText::new(&book.name).color(color).strong());
                    });
                    row.col(|ui| {
                        pages_badge(ui, book.pages);
                    });
                    row.col(|ui| {
                        ui.label(
                            egui::RichText::new(format_added(book.created_at))
                                .size(theme::FONT_LABEL)
                                .color(theme::TEXT_DIM),
                        );
                    });
                    row.col(|ui| {
                        let edit = theme::button(format!("{}  Edit", egui_phosphor::regular::PENCIL_SIMPLE));
                        if ui.add(edit).clicked() {
                            action = Some(RowAction::Edit(book.clone()));
                        }
                        let delete = theme::button_danger(format!("{}  Delete", egui_phosphor::regular::TRASH));
                        if ui.add_enabled(!loading, delete).clicked() {
                            action = Some(RowAction::Delete(book.clone()));
                        }
                    });
                });
            });

        action
    }
}
