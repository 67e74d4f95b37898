use std::collections::BTreeSet;

use super::model::{DoctorRecord, DoctorTable};

// ---------------------------------------------------------------------------
// Filter predicate: which values are selected per column
// ---------------------------------------------------------------------------

/// The user's current City / Specialization choices.
/// An empty set means "no filter" on that column (show all).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    pub cities: BTreeSet<String>,
    pub specializations: BTreeSet<String>,
}

impl FilterSelection {
    pub fn is_empty(&self) -> bool {
        self.cities.is_empty() && self.specializations.is_empty()
    }

    pub fn toggle_city(&mut self, city: &str) {
        toggle(&mut self.cities, city);
    }

    pub fn toggle_specialization(&mut self, specialization: &str) {
        toggle(&mut self.specializations, specialization);
    }

    pub fn clear(&mut self) {
        self.cities.clear();
        self.specializations.clear();
    }

    /// AND across columns, OR within a column.
    pub fn matches(&self, record: &DoctorRecord) -> bool {
        (self.cities.is_empty() || self.cities.contains(&record.city))
            && (self.specializations.is_empty()
                || self.specializations.contains(&record.specialization))
    }
}

fn toggle(set: &mut BTreeSet<String>, value: &str) {
    if !set.remove(value) {
        set.insert(value.to_string());
    }
}

/// Return indices of records that pass the selection, in table order.
pub fn filtered_indices(table: &DoctorTable, selection: &FilterSelection) -> Vec<usize> {
    table
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| selection.matches(rec))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::CellValue;

    fn record(name: &str, spec: &str, city: &str, rating: &str, cost: &str) -> DoctorRecord {
        let rating_text = CellValue::String(rating.to_string());
        DoctorRecord {
            name: name.into(),
            specialization: spec.into(),
            city: city.into(),
            rating: crate::data::loader::extract_rating(&rating_text),
            rating_text,
            cost: CellValue::String(cost.to_string()),
            extra: Vec::new(),
        }
    }

    fn sample() -> DoctorTable {
        DoctorTable::from_records(
            vec![
                record("A", "Derm", "NYC", "4.5 (12)", "$100"),
                record("B", "Cardio", "LA", "3.2 (5)", "$200"),
                record("C", "Derm", "LA", "none yet", "$150"),
                record("D", "Endo", "NYC", "4.9 (40)", "$300"),
                record("E", "Cardio", "NYC", "2.0 (1)", "$90"),
            ],
            Vec::new(),
        )
    }

    fn selection(cities: &[&str], specs: &[&str]) -> FilterSelection {
        FilterSelection {
            cities: cities.iter().map(|s| s.to_string()).collect(),
            specializations: specs.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn city_filter_picks_matching_rows() {
        let table = DoctorTable::from_records(
            vec![
                record("A", "Derm", "NYC", "4.5 (12)", "$100"),
                record("B", "Cardio", "LA", "3.2 (5)", "$200"),
            ],
            Vec::new(),
        );
        let idx = filtered_indices(&table, &selection(&["NYC"], &[]));
        assert_eq!(idx, vec![0]);

        let rec = &table.records[idx[0]];
        assert_eq!(rec.name, "A");
        assert_eq!(rec.specialization, "Derm");
        assert_eq!(rec.city, "NYC");
        assert_eq!(rec.rating, Some(4.5));
        assert_eq!(rec.cost, CellValue::String("$100".into()));
    }

    #[test]
    fn empty_selection_returns_everything_in_order() {
        let table = sample();
        assert_eq!(
            filtered_indices(&table, &FilterSelection::default()),
            vec![0, 1, 2, 3, 4]
        );
    }

    #[test]
    fn columns_combine_with_and_values_with_or() {
        let table = sample();
        let idx = filtered_indices(&table, &selection(&["NYC"], &["Derm", "Cardio"]));
        assert_eq!(idx, vec![0, 4]);

        let idx = filtered_indices(&table, &selection(&["NYC", "LA"], &["Derm"]));
        assert_eq!(idx, vec![0, 2]);
    }

    #[test]
    fn unknown_city_yields_empty_result() {
        let table = sample();
        assert!(filtered_indices(&table, &selection(&["Chicago"], &[])).is_empty());
    }

    #[test]
    fn results_respect_selected_values_and_order() {
        let table = sample();
        let selections = [
            selection(&[], &[]),
            selection(&["LA"], &[]),
            selection(&[], &["Cardio"]),
            selection(&["NYC"], &["Endo"]),
            selection(&["LA", "NYC"], &["Derm", "Endo"]),
            selection(&["Nowhere"], &["Derm"]),
        ];
        for sel in &selections {
            let idx = filtered_indices(&table, sel);
            assert!(idx.windows(2).all(|w| w[0] < w[1]), "order broken for {sel:?}");
            for rec in table.view(&idx) {
                if !sel.cities.is_empty() {
                    assert!(sel.cities.contains(&rec.city));
                }
                if !sel.specializations.is_empty() {
                    assert!(sel.specializations.contains(&rec.specialization));
                }
            }
            // Rows left out must fail the selection.
            let excluded = (0..table.len()).filter(|i| !idx.contains(i));
            for i in excluded {
                assert!(!sel.matches(&table.records[i]));
            }
        }
    }

    #[test]
    fn filtering_is_idempotent() {
        let table = sample();
        let sel = selection(&["NYC"], &["Cardio", "Endo"]);
        let once: Vec<DoctorRecord> = table
            .view(&filtered_indices(&table, &sel))
            .cloned()
            .collect();
        let narrowed = DoctorTable::from_records(once.clone(), Vec::new());
        let twice: Vec<DoctorRecord> = narrowed
            .view(&filtered_indices(&narrowed, &sel))
            .cloned()
            .collect();
        assert_eq!(once, twice);
    }

    #[test]
    fn toggling_adds_then_removes() {
        let mut sel = FilterSelection::default();
        sel.toggle_city("NYC");
        sel.toggle_specialization("Derm");
        assert_eq!(sel, selection(&["NYC"], &["Derm"]));
        sel.toggle_city("NYC");
        assert!(sel.cities.is_empty());
        assert!(!sel.is_empty());
        sel.clear();
        assert!(sel.is_empty());
    }
}
