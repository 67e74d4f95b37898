use super::model::{DoctorRecord, DoctorTable};

// ---------------------------------------------------------------------------
// Rating chart – one bar per rated doctor, grouped by specialization
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct ChartBar {
    /// Slot on the x axis; indexes [`RatingChart::labels`].
    pub position: usize,
    pub doctor: String,
    pub rating: f64,
}

/// All bars of one specialization (one legend entry).
#[derive(Debug, Clone, PartialEq)]
pub struct ChartGroup {
    pub specialization: String,
    pub bars: Vec<ChartBar>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RatingChart {
    /// Groups in the order their specialization first appears.
    pub groups: Vec<ChartGroup>,
    /// Doctor name for every x slot.
    pub labels: Vec<String>,
    /// Fixed vertical axis, independent of the data.
    pub y_range: [f64; 2],
    /// Filtered doctors left off the chart because their rating is absent.
    pub unrated: usize,
}

impl RatingChart {
    pub fn build(table: &DoctorTable, indices: &[usize], y_range: [f64; 2]) -> Self {
        let mut groups: Vec<ChartGroup> = Vec::new();
        let mut labels: Vec<String> = Vec::new();
        let mut unrated = 0;

        for rec in table.view(indices) {
            let Some(rating) = rec.rating else {
                unrated += 1;
                continue;
            };
            let bar = ChartBar {
                position: labels.len(),
                doctor: rec.name.clone(),
                rating,
            };
            labels.push(rec.name.clone());

            match groups
                .iter_mut()
                .find(|g| g.specialization == rec.specialization)
            {
                Some(group) => group.bars.push(bar),
                None => groups.push(ChartGroup {
                    specialization: rec.specialization.clone(),
                    bars: vec![bar],
                }),
            }
        }

        RatingChart {
            groups,
            labels,
            y_range,
            unrated,
        }
    }

    pub fn bar_count(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Detail table – every column of the filtered records, as display text
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct DetailTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl DetailTable {
    pub fn build(table: &DoctorTable, indices: &[usize]) -> Self {
        // The specialization header keeps the sheet's own spelling.
        let headers = [
            "Doctor Name",
            table.specialization_column.as_str(),
            "Rating",
            "City",
            "Cost",
        ]
        .into_iter()
        .map(str::to_string)
        .chain(table.extra_columns.iter().cloned())
        .collect();
        let rows = table.view(indices).map(detail_row).collect();
        DetailTable { headers, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn detail_row(rec: &DoctorRecord) -> Vec<String> {
    // Unparsed ratings still show what the sheet says.
    let rating = match rec.rating {
        Some(r) => r.to_string(),
        None => rec.rating_text.to_string(),
    };
    [
        rec.name.clone(),
        rec.specialization.clone(),
        rating,
        rec.city.clone(),
        rec.cost.to_string(),
    ]
    .into_iter()
    .chain(rec.extra.iter().map(|c| c.to_string()))
    .collect()
}
