use chrono::NaiveDate;

/// Possible reasons a raw CSV row cannot become a [`SalesRecord`]
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("The row date matches none of the supported formats")]
    InvalidDate,
    #[error("The row total is missing or not a finite number")]
    InvalidTotal,
}

/// One CSV row as it arrives on the wire
///
/// Every field is optional so that a short or otherwise malformed row can
/// be rejected individually instead of aborting the whole load.
#[derive(Debug, Default, serde::Deserialize)]
pub struct RawRecord {
    #[serde(rename = "Fecha")]
    pub date: Option<String>,
    #[serde(rename = "Mes")]
    pub month: Option<String>,
    #[serde(rename = "Cliente")]
    pub client: Option<String>,
    #[serde(rename = "Producto")]
    pub product: Option<String>,
    #[serde(rename = "Almacen")]
    pub warehouse: Option<String>,
    #[serde(rename = "Cantidad")]
    pub quantity: Option<String>,
    #[serde(rename = "ValorUnitario")]
    pub unit_value: Option<String>,
    #[serde(rename = "Total")]
    pub total: Option<String>,
}

/// One validated sales transaction line
///
/// Records are created once per load and never modified afterwards; a
/// reload builds a whole new set.
#[derive(Clone, Debug, PartialEq)]
pub struct SalesRecord {
    pub date: NaiveDate,
    pub month: String,
    pub client: String,
    pub product: String,
    pub warehouse: String,
    pub quantity: f64,
    pub unit_value: f64,
    pub total: f64,
}

/// The supported date formats, tried in order
const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%d/%m/%Y"];

/// Parses a date in `YYYY-MM-DD`, falling back to `DD/MM/YYYY`
///
/// The first matching format wins.
pub fn parse_date(field: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(field.trim(), format).ok())
}

/// Normalizes a currency-decorated amount and parses it
///
/// Every character that is not a digit, a decimal point or a minus sign
/// is stripped before parsing, so `"S/ 1,000.00"` becomes `1000.0`.
/// Thousands separators are dropped without further interpretation:
/// `"1,234"` parses as `1234.0`.
pub fn clean_amount(field: &str) -> Option<f64> {
    let cleaned: String = field
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();

    cleaned.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Loosely coerces a numeric field
///
/// An empty field coerces to `0.0` and a non-numeric one to `NaN`;
/// neither makes the record invalid on its own.
pub fn coerce_number(field: &str) -> f64 {
    let field = field.trim();
    match field.is_empty() {
        true => 0.0,
        false => field.parse().unwrap_or(f64::NAN),
    }
}

impl TryFrom<RawRecord> for SalesRecord {
    type Error = RecordError;

    fn try_from(raw: RawRecord) -> Result<Self, Self::Error> {
        let date = raw
            .date
            .as_deref()
            .and_then(parse_date)
            .ok_or(RecordError::InvalidDate)?;
        let total = raw
            .total
            .as_deref()
            .and_then(clean_amount)
            .ok_or(RecordError::InvalidTotal)?;

        Ok(Self {
            date,
            month: trimmed(raw.month),
            client: trimmed(raw.client),
            product: trimmed(raw.product),
            warehouse: trimmed(raw.warehouse),
            quantity: raw.quantity.as_deref().map_or(0.0, coerce_number),
            unit_value: raw.unit_value.as_deref().map_or(0.0, coerce_number),
            total,
        })
    }
}

fn trimmed(field: Option<String>) -> String {
    field.map(|value| value.trim().to_string()).unwrap_or_default()
}
