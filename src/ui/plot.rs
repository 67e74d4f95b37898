use eframe::egui::{Color32, RichText, Ui};
use egui_plot::{Bar, BarChart, Legend, Plot, PlotBounds, PlotResponse};

use crate::color::ColorMap;
use crate::data::report::RatingChart;

// ---------------------------------------------------------------------------
// Rating bar chart (Doctor Details page)
// ---------------------------------------------------------------------------

/// Render one bar per doctor, coloured and grouped by specialization.
pub fn rating_chart(ui: &mut Ui, chart: &RatingChart, color_map: &ColorMap, height: f32) {
    ui.label(RichText::new("Doctor Ratings by Specialization").heading());

    rating_plot(ui, chart, color_map, height);

    if chart.is_empty() {
        ui.label(RichText::new("No rated doctors match the selected filters.").color(Color32::GRAY));
    }
    if chart.unrated > 0 {
        ui.label(
            RichText::new(format!(
                "{} doctor(s) have no rating yet and are listed in the table only.",
                chart.unrated
            ))
            .italics()
            .color(Color32::GRAY),
        );
    }
}

/// The plot itself.  Bounds are pinned every frame: x to the bar slots,
/// y to `chart.y_range` whatever the ratings are.
fn rating_plot(
    ui: &mut Ui,
    chart: &RatingChart,
    color_map: &ColorMap,
    height: f32,
) -> PlotResponse<()> {
    let labels = chart.labels.clone();
    let [y_min, y_max] = chart.y_range;
    let last_slot = chart.bar_count().max(1) as f64 - 0.5;
    let bounds = PlotBounds::from_min_max([-0.5, y_min], [last_slot, y_max]);

    Plot::new("rating_chart")
        .height(height)
        .legend(Legend::default())
        .x_axis_label("Doctor Name")
        .y_axis_label("Average Rating")
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .allow_double_click_reset(false)
        .x_axis_formatter(move |mark, _range| {
            // Only whole slots carry a doctor name.
            let slot = mark.value.round();
            if (mark.value - slot).abs() > 1e-6 || slot < 0.0 {
                return String::new();
            }
            labels.get(slot as usize).cloned().unwrap_or_default()
        })
        .show(ui, |plot_ui| {
            plot_ui.set_plot_bounds(bounds);
            for group in &chart.groups {
                let bars: Vec<Bar> = group
                    .bars
                    .iter()
                    .map(|b| {
                        Bar::new(b.position as f64, b.rating)
                            .name(&b.doctor)
                            .width(0.8)
                    })
                    .collect();
                plot_ui.bar_chart(
                    BarChart::new(bars)
                        .name(&group.specialization)
                        .color(color_map.color_for(&group.specialization)),
                );
            }
        })
}
