pub use self::{
    aggregate::{
        sales_by_month, sales_by_warehouse, top_clients, top_products, Entry, Measure, TOP_N,
    },
    chart::{format_value, BarChart},
    dataset::{is_warehouse_code, Dataset, FilterOptions, LoadError, LoadSummary},
    filter::Criteria,
    record::{clean_amount, coerce_number, parse_date, RawRecord, RecordError, SalesRecord},
};

mod aggregate;
mod chart;
mod dataset;
mod filter;
mod record;
