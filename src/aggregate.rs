use std::cmp::Ordering;
use std::collections::HashMap;

use crate::record::SalesRecord;

/// Number of groups kept by the ranked client and product views
pub const TOP_N: usize = 10;

/// One bar of an aggregation view
#[derive(Clone, Debug, PartialEq)]
pub struct Entry {
    pub label: String,
    pub value: f64,
}

/// The unit a view's values are measured in
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Measure {
    /// Summed monetary totals
    Currency,
    /// Summed unit quantities
    Quantity,
}

/// Sales totals per month, ascending by month label
pub fn sales_by_month(records: &[SalesRecord]) -> Vec<Entry> {
    let mut entries = group_sum(records, |record| &record.month, |record| record.total);
    entries.sort_by(|a, b| a.label.cmp(&b.label));
    entries
}

/// Sales totals per warehouse, highest first
pub fn sales_by_warehouse(records: &[SalesRecord]) -> Vec<Entry> {
    let mut entries = group_sum(records, |record| &record.warehouse, |record| record.total);
    sort_descending(&mut entries);
    entries
}

/// The ten clients with the highest sales totals
pub fn top_clients(records: &[SalesRecord]) -> Vec<Entry> {
    let mut entries = group_sum(records, |record| &record.client, |record| record.total);
    sort_descending(&mut entries);
    entries.truncate(TOP_N);
    entries
}

/// The ten products with the highest unit quantities sold
///
/// This view ranks by summed quantity, not by monetary total.
pub fn top_products(records: &[SalesRecord]) -> Vec<Entry> {
    let mut entries = group_sum(records, |record| &record.product, |record| record.quantity);
    sort_descending(&mut entries);
    entries.truncate(TOP_N);
    entries
}

/// Groups records by `key` and sums `measure` per group
///
/// Group keys compare by exact string equality, with no case or accent
/// normalization.
fn group_sum<K, M>(records: &[SalesRecord], key: K, measure: M) -> Vec<Entry>
where
    K: Fn(&SalesRecord) -> &str,
    M: Fn(&SalesRecord) -> f64,
{
    let mut groups: HashMap<&str, f64> = HashMap::new();
    for record in records {
        *groups.entry(key(record)).or_insert(0.0) += measure(record);
    }

    groups
        .into_iter()
        .map(|(label, value)| Entry {
            label: label.to_string(),
            value,
        })
        .collect()
}

// Descending by value; ties break ascending by label.
fn sort_descending(entries: &mut [Entry]) {
    entries.sort_by(|a, b| {
        b.value
            .partial_cmp(&a.value)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.label.cmp(&b.label))
    });
}
