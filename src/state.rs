use std::sync::Arc;

use crate::color::ColorMap;
use crate::config::DashboardConfig;
use crate::data::filter::{filtered_indices, FilterSelection};
use crate::data::model::{DashboardData, DoctorTable};
use crate::data::report::{DetailTable, RatingChart};

// ---------------------------------------------------------------------------
// Navigation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Home,
    Projects,
    DoctorDetails,
    ContactUs,
}

impl Page {
    pub const ALL: [Page; 4] = [
        Page::Home,
        Page::Projects,
        Page::DoctorDetails,
        Page::ContactUs,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::Projects => "Projects",
            Page::DoctorDetails => "Doctor Details",
            Page::ContactUs => "Contact Us",
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub page: Page,

    /// Loaded once before the UI starts; `None` if loading failed.
    pub data: Option<Arc<DashboardData>>,

    /// Current City / Specialization choices.
    pub selection: FilterSelection,

    /// Indices of doctors passing the current selection (cached).
    pub visible_indices: Vec<usize>,

    /// Specialization colours, built from the full table.
    pub color_map: ColorMap,

    /// Load error shown on the Doctor Details page.
    pub status_message: Option<String>,

    pub config: DashboardConfig,
}

impl AppState {
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            page: Page::default(),
            data: None,
            selection: FilterSelection::default(),
            visible_indices: Vec::new(),
            color_map: ColorMap::default(),
            status_message: None,
            config,
        }
    }

    /// Ingest the loaded data: everything visible, colours assigned.
    pub fn set_data(&mut self, data: Arc<DashboardData>) {
        self.selection = FilterSelection::default();
        self.visible_indices = (0..data.doctors.len()).collect();
        self.color_map = ColorMap::new(&data.doctors.specializations);
        self.data = Some(data);
        self.status_message = None;
    }

    pub fn set_load_error(&mut self, message: String) {
        self.data = None;
        self.visible_indices.clear();
        self.status_message = Some(message);
    }

    pub fn doctors(&self) -> Option<&DoctorTable> {
        self.data.as_deref().map(|d| &d.doctors)
    }

    /// One-line description of the loaded file and its sheets.
    pub fn source_summary(&self) -> Option<String> {
        let data = self.data.as_deref()?;
        Some(format!(
            "{} · sheets: {}",
            self.config.data_path.display(),
            data.workbook.sheet_names().join(", ")
        ))
    }

    /// Recompute `visible_indices` after a selection change.
    pub fn refilter(&mut self) {
        if let Some(data) = &self.data {
            self.visible_indices = filtered_indices(&data.doctors, &self.selection);
            log::debug!(
                "Filter {:?} / {:?}: {} of {} doctors",
                self.selection.cities,
                self.selection.specializations,
                self.visible_indices.len(),
                data.doctors.len()
            );
        }
    }

    pub fn toggle_city(&mut self, city: &str) {
        self.selection.toggle_city(city);
        self.refilter();
    }

    pub fn toggle_specialization(&mut self, specialization: &str) {
        self.selection.toggle_specialization(specialization);
        self.refilter();
    }

    pub fn clear_filters(&mut self) {
        self.selection.clear();
        self.refilter();
    }

    pub fn rating_chart(&self) -> Option<RatingChart> {
        self.doctors()
            .map(|t| RatingChart::build(t, &self.visible_indices, self.config.rating_axis))
    }

    pub fn detail_table(&self) -> Option<DetailTable> {
        self.doctors()
            .map(|t| DetailTable::build(t, &self.visible_indices))
    }
}
