use std::collections::BTreeSet;

use eframe::egui::{self, RichText, Ui};

use crate::state::{AppState, Page};

// ---------------------------------------------------------------------------
// Top bar – horizontal page navigation
// ---------------------------------------------------------------------------

pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.strong("Transmen Collective");
        ui.separator();
        for page in Page::ALL {
            if ui
                .selectable_label(state.page == page, page.title())
                .clicked()
            {
                state.page = page;
            }
        }
    });
}

// ---------------------------------------------------------------------------
// Filter row – City and Specialization multi-selects side by side
// ---------------------------------------------------------------------------

/// Render both multi-selects; toggles refilter the state immediately.
pub fn filter_row(ui: &mut Ui, state: &mut AppState) {
    let Some(doctors) = state.doctors() else {
        return;
    };
    // Clone what we need so we can mutate state inside the widgets.
    let cities = doctors.cities.clone();
    let specializations = doctors.specializations.clone();

    ui.columns(2, |cols: &mut [Ui]| {
        cols[0].label("Select City");
        let picked = multi_select(&mut cols[0], "city_filter", &cities, &state.selection.cities);
        if let Some(city) = picked {
            state.toggle_city(&city);
        }

        cols[1].label("Select Treatment");
        let picked = multi_select(
            &mut cols[1],
            "specialization_filter",
            &specializations,
            &state.selection.specializations,
        );
        if let Some(spec) = picked {
            state.toggle_specialization(&spec);
        }
    });

    if !state.selection.is_empty() && ui.small_button("Clear filters").clicked() {
        state.clear_filters();
    }
}

/// A combo box with one checkbox per choice.  Returns the value the user
/// toggled this frame, if any.
fn multi_select(
    ui: &mut Ui,
    id: &str,
    choices: &BTreeSet<String>,
    selected: &BTreeSet<String>,
) -> Option<String> {
    let summary = match selected.len() {
        0 => "Choose an option".to_string(),
        1 => selected.iter().next().cloned().unwrap_or_default(),
        n => format!("{n} selected"),
    };

    let mut toggled = None;
    egui::ComboBox::from_id_salt(id)
        .selected_text(summary)
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            for choice in choices {
                let mut checked = selected.contains(choice);
                if ui.checkbox(&mut checked, choice.as_str()).changed() {
                    toggled = Some(choice.clone());
                }
            }
        });

    // Selected values as small chips under the box.
    if !selected.is_empty() {
        ui.horizontal_wrapped(|ui: &mut Ui| {
            for value in selected {
                ui.label(RichText::new(value).small().strong());
            }
        });
    }
    toggled
}
