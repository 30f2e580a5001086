use crate::record::SalesRecord;

/// One selection across the three filter controls
///
/// Each field either names one exact label or imposes no constraint.
/// `None` and the empty string both mean "no constraint", so the UI's
/// "Todos" option needs no special handling.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Criteria {
    pub month: Option<String>,
    pub warehouse: Option<String>,
    pub client: Option<String>,
}

impl Criteria {
    /// Creates an unconstrained selection
    pub fn new() -> Self {
        Self::default()
    }

    /// Narrows `records` to those matching every present criterion
    ///
    /// Criteria combine with logical AND. The input is never mutated; an
    /// unconstrained selection yields a copy of the whole input.
    pub fn apply(&self, records: &[SalesRecord]) -> Vec<SalesRecord> {
        records
            .iter()
            .filter(|record| self.matches(record))
            .cloned()
            .collect()
    }

    /// Whether one record satisfies every present criterion
    pub fn matches(&self, record: &SalesRecord) -> bool {
        matches_label(&self.month, &record.month)
            && matches_label(&self.warehouse, &record.warehouse)
            && matches_label(&self.client, &record.client)
    }
}

fn matches_label(selection: &Option<String>, label: &str) -> bool {
    match selection.as_deref() {
        None | Some("") => true,
        Some(wanted) => wanted == label,
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn record(month: &str, warehouse: &str, client: &str) -> SalesRecord {
        SalesRecord {
            date: NaiveDate::from_ymd_opt(2024, 10, 1).unwrap(),
            month: month.to_string(),
            client: client.to_string(),
            product: "Tornillos".to_string(),
            warehouse: warehouse.to_string(),
            quantity: 1.0,
            unit_value: 1.0,
            total: 10.0,
        }
    }

    fn records() -> Vec<SalesRecord> {
        vec![
            record("Octubre", "LIMA_01", "ACME"),
            record("Octubre", "LIMA_02", "Globex"),
            record("Noviembre", "LIMA_01", "ACME"),
        ]
    }

    #[test]
    fn unconstrained_selection_copies_the_input() {
        let records = records();
        let filtered = Criteria::new().apply(&records);

        assert_eq!(filtered, records);
    }

    #[test]
    fn empty_string_means_no_constraint() {
        let records = records();
        let criteria = Criteria {
            month: Some(String::new()),
            ..Criteria::default()
        };

        assert_eq!(criteria.apply(&records), records);
    }

    #[test]
    fn present_criteria_combine_with_and() {
        let records = records();
        let criteria = Criteria {
            month: Some("Octubre".to_string()),
            client: Some("ACME".to_string()),
            ..Criteria::default()
        };
        let filtered = criteria.apply(&records);

        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].warehouse, "LIMA_01");
    }

    #[test]
    fn matching_is_exact() {
        let records = records();
        let criteria = Criteria {
            client: Some("acme".to_string()),
            ..Criteria::default()
        };

        assert!(criteria.apply(&records).is_empty());
    }

    #[test]
    fn applying_twice_changes_nothing() {
        let records = records();
        let criteria = Criteria {
            month: Some("Octubre".to_string()),
            ..Criteria::default()
        };

        let once = criteria.apply(&records);
        let twice = criteria.apply(&once);

        assert_eq!(once, twice);
    }

    #[test]
    fn the_input_is_left_untouched() {
        let records = records();
        let before = records.clone();
        let criteria = Criteria {
            warehouse: Some("LIMA_02".to_string()),
            ..Criteria::default()
        };

        let _ = criteria.apply(&records);

        assert_eq!(records, before);
    }
}
