use std::io::Read;

use crate::record::{RawRecord, SalesRecord};

/// Possible errors to occur while loading a dataset
///
/// These are transport-level failures that abort the whole load. Rows
/// that merely fail to parse are dropped and counted instead.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("The CSV source could not be read")]
    Io(#[from] std::io::Error),
    #[error("The CSV source could not be fetched")]
    Http(#[from] reqwest::Error),
}

/// Summary of one completed load
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoadSummary {
    /// Rows seen on the wire, header excluded
    pub total_rows: usize,
    /// Rows that became valid records
    pub kept: usize,
    /// Rows dropped for a bad date, a bad total, or a CSV-level error
    pub skipped: usize,
}

/// Distinct label values used to populate the three filter controls
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterOptions {
    pub months: Vec<String>,
    pub warehouses: Vec<String>,
    pub clients: Vec<String>,
}

/// The in-memory set of valid records for the current session
///
/// A dataset is only constructed once a load has run to completion, so
/// readers see either the previous complete set or the new one, never a
/// partial state. There are no mutators; a reload builds a fresh dataset.
#[derive(Debug, Default)]
pub struct Dataset {
    records: Vec<SalesRecord>,
}

impl Dataset {
    /// Loads a dataset from a local path or an `http(s)://` URL
    ///
    /// The whole body is fetched before any row is parsed.
    pub fn load(source: &str) -> Result<(Self, LoadSummary), LoadError> {
        let body = if source.starts_with("http://") || source.starts_with("https://") {
            reqwest::blocking::get(source)?.error_for_status()?.text()?
        } else {
            std::fs::read_to_string(source)?
        };

        Ok(Self::from_reader(body.as_bytes()))
    }

    /// Parses, validates and publishes a record set from raw CSV
    ///
    /// Rows that fail CSV decoding or record validation are dropped and
    /// counted, never fatal to the load.
    pub fn from_reader<R: Read>(reader: R) -> (Self, LoadSummary) {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut summary = LoadSummary::default();
        let mut records = Vec::new();

        for row in csv_reader.deserialize::<RawRecord>() {
            summary.total_rows += 1;

            let raw = match row {
                Ok(raw) => raw,
                Err(err) => {
                    log::debug!("dropping row {}: {}", summary.total_rows, err);
                    summary.skipped += 1;
                    continue;
                }
            };

            match SalesRecord::try_from(raw) {
                Ok(record) => {
                    records.push(record);
                    summary.kept += 1;
                }
                Err(err) => {
                    log::debug!("dropping row {}: {}", summary.total_rows, err);
                    summary.skipped += 1;
                }
            }
        }

        (Self { records }, summary)
    }

    /// The full record set
    pub fn all(&self) -> &[SalesRecord] {
        &self.records
    }

    /// The number of records in the set
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The distinct labels the three filter controls offer
    ///
    /// Warehouse options are limited to labels shaped like a warehouse
    /// code. Records with other warehouse labels stay in the set, they
    /// just never surface as an option.
    pub fn filter_options(&self) -> FilterOptions {
        FilterOptions {
            months: self.distinct(|record| &record.month, |_| true),
            warehouses: self.distinct(|record| &record.warehouse, is_warehouse_code),
            clients: self.distinct(|record| &record.client, |_| true),
        }
    }

    fn distinct<K, P>(&self, key: K, keep: P) -> Vec<String>
    where
        K: Fn(&SalesRecord) -> &str,
        P: Fn(&str) -> bool,
    {
        let mut labels: Vec<String> = self
            .records
            .iter()
            .map(|record| key(record))
            .filter(|&label| !label.is_empty() && keep(label))
            .map(str::to_string)
            .collect();

        labels.sort();
        labels.dedup();
        labels
    }
}

/// Whether a label is an uppercase alphanumeric/underscore warehouse code
pub fn is_warehouse_code(label: &str) -> bool {
    !label.is_empty()
        && label
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_CSV: &str = "\
Fecha,Mes,Cliente,Producto,Almacen,Cantidad,ValorUnitario,Total
2024-10-01,Octubre,ACME,Tornillos,LIMA_01,10,2.50,S/ 25.00
02/10/2024,Octubre,Globex,Clavos,LIMA_01,5,1.00,5.00
2024-10-03,Octubre,ACME,Martillos,arequipa,1,2.50,2.50
someday,Octubre,Initech,Tuercas,LIMA_02,3,4.00,12.00
2024-10-05,Octubre,Initech,Tuercas,LIMA_02,3,4.00,not a total
2024-10-06,Octubre
";

    fn sample() -> (Dataset, LoadSummary) {
        Dataset::from_reader(SAMPLE_CSV.as_bytes())
    }

    #[test]
    fn load_keeps_valid_rows_and_counts_the_rest() {
        let (dataset, summary) = sample();

        assert_eq!(summary.total_rows, 6);
        assert_eq!(summary.kept, 3);
        assert_eq!(summary.skipped, 3);
        assert_eq!(dataset.len(), 3);
    }

    #[test]
    fn load_normalizes_the_kept_rows() {
        let (dataset, _) = sample();
        let first = &dataset.all()[0];

        assert_eq!(first.client, "ACME");
        assert_eq!(first.total, 25.0);
        assert_eq!(first.quantity, 10.0);
    }

    #[test]
    fn load_of_headers_only_publishes_an_empty_set() {
        let (dataset, summary) =
            Dataset::from_reader("Fecha,Mes,Cliente,Producto,Almacen,Cantidad,ValorUnitario,Total\n".as_bytes());

        assert!(dataset.is_empty());
        assert_eq!(summary, LoadSummary::default());
    }

    #[test]
    fn filter_options_are_sorted_and_distinct() {
        let (dataset, _) = sample();
        let options = dataset.filter_options();

        assert_eq!(options.months, ["Octubre"]);
        assert_eq!(options.clients, ["ACME", "Globex"]);
    }

    #[test]
    fn filter_options_only_offer_code_shaped_warehouses() {
        let (dataset, _) = sample();
        let options = dataset.filter_options();

        // "arequipa" fails the code shape but its record stays in the set
        assert_eq!(options.warehouses, ["LIMA_01"]);
        assert!(dataset.all().iter().any(|record| record.warehouse == "arequipa"));
    }

    #[test]
    fn warehouse_code_shape() {
        assert!(is_warehouse_code("LIMA_01"));
        assert!(is_warehouse_code("A1"));
        assert!(!is_warehouse_code("arequipa"));
        assert!(!is_warehouse_code("LIMA 01"));
        assert!(!is_warehouse_code(""));
    }

    #[test]
    fn published_set_is_stable_across_reads() {
        let (dataset, _) = sample();
        let before: Vec<_> = dataset.all().to_vec();

        let _ = dataset.filter_options();
        let _ = dataset.all();

        assert_eq!(dataset.all(), before.as_slice());
    }
}
