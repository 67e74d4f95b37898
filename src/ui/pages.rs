use eframe::egui::{self, Color32, RichText, Ui};

use crate::state::{AppState, Page};
use crate::ui::{panels, plot, table};

const WELCOME: &str = "Welcome to Transmen Collective! We are a group dedicated to addressing \
transmasculine issues. Our mission is to create a supportive and inclusive community while \
raising awareness and advocating for transmasculine individuals.";

const CONTACTS: [(&str, &str, &str); 3] = [
    (
        "✉",
        "transmencollective@gmail.com",
        "mailto:transmencollective@gmail.com",
    ),
    (
        "📷",
        "transmencollective",
        "https://www.instagram.com/transmencollective/",
    ),
    (
        "▶",
        "transmencollective2059",
        "https://www.youtube.com/@transmencollective2059",
    ),
];

/// Render whichever page is selected in the navigation bar.
pub fn show_page(ui: &mut Ui, state: &mut AppState) {
    match state.page {
        Page::Home => home(ui),
        Page::Projects => projects(ui),
        Page::DoctorDetails => doctor_details(ui, state),
        Page::ContactUs => contact_us(ui),
    }
}

fn home(ui: &mut Ui) {
    ui.heading(RichText::new("Transmen Collective").size(28.0));
    ui.add_space(8.0);
    ui.label(WELCOME);
}

fn projects(ui: &mut Ui) {
    ui.heading(RichText::new(Page::Projects.title()).size(28.0));
    ui.add_space(8.0);
    ui.label("This is the Projects page content.");
}

fn contact_us(ui: &mut Ui) {
    ui.heading(RichText::new(Page::ContactUs.title()).size(28.0));
    ui.add_space(8.0);
    ui.label("You can contact us through the following channels:");
    for (icon, text, url) in CONTACTS {
        ui.horizontal(|ui: &mut Ui| {
            ui.label(icon);
            ui.hyperlink_to(text, url);
        });
    }
}

// ---------------------------------------------------------------------------
// Doctor Details – filters, rating chart, detail table
// ---------------------------------------------------------------------------

fn doctor_details(ui: &mut Ui, state: &mut AppState) {
    ui.heading(RichText::new(Page::DoctorDetails.title()).size(28.0));
    ui.label("Explore information about different doctors and treatments.");
    ui.add_space(8.0);

    if state.data.is_none() {
        let msg = state
            .status_message
            .as_deref()
            .unwrap_or("Doctor data is not available.");
        ui.label(RichText::new(msg).color(Color32::RED));
        return;
    }

    if let Some(summary) = state.source_summary() {
        ui.label(RichText::new(summary).small().weak());
    }
    panels::filter_row(ui, state);
    ui.add_space(8.0);

    if let Some(chart) = state.rating_chart() {
        plot::rating_chart(ui, &chart, &state.color_map, state.config.chart_height);
    }

    ui.add_space(12.0);
    ui.label(RichText::new("Detailed Doctor Information").strong().size(18.0));
    let shown = state.visible_indices.len();
    egui::CollapsingHeader::new(format!("Data Preview ({shown})"))
        .id_salt("data_preview")
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            if let Some(detail) = state.detail_table() {
                if detail.is_empty() {
                    ui.label("No doctors match the selected filters.");
                } else {
                    ui.label(format!("{} doctor(s)", detail.len()));
                }
                table::detail_table(ui, &detail);
            }
        });
}
