use eframe::egui;

use crate::state::AppState;
use crate::ui::{pages, panels};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct CollectiveApp {
    pub state: AppState,
}

impl CollectiveApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for CollectiveApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: page navigation ----
        egui::TopBottomPanel::top("nav_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Central panel: selected page ----
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    pages::show_page(ui, &mut self.state);
                });
        });
    }
}
