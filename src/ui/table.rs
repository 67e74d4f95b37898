use eframe::egui::{self, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::report::DetailTable;

/// Render the filtered doctors as a plain, read-only table.
pub fn detail_table(ui: &mut Ui, table: &DetailTable) {
    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .columns(Column::auto().at_least(80.0), table.headers.len())
        .min_scrolled_height(0.0)
        .max_scroll_height(320.0)
        .header(20.0, |mut header| {
            for name in &table.headers {
                header.col(|ui: &mut Ui| {
                    ui.strong(name);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, table.rows.len(), |mut row| {
                let cells = &table.rows[row.index()];
                for cell in cells {
                    row.col(|ui: &mut Ui| {
                        ui.label(cell);
                    });
                }
            });
        });
}
