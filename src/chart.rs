use std::io::{self, Write};

use crate::aggregate::{Entry, Measure};

/// Width of the longest bar, in glyphs
const BAR_WIDTH: usize = 40;

/// A titled horizontal bar chart over one aggregation view
///
/// The renderer only consumes the ordered `label`/`value` pairs an
/// aggregation produced, plus the unit its values are measured in. Bars
/// are scaled against the view's highest value.
pub struct BarChart<'a> {
    title: &'a str,
    measure: Measure,
    entries: &'a [Entry],
}

impl<'a> BarChart<'a> {
    pub fn new(title: &'a str, measure: Measure, entries: &'a [Entry]) -> Self {
        Self {
            title,
            measure,
            entries,
        }
    }

    /// Writes the chart to `out`
    ///
    /// A view without entries renders a placeholder line instead of bars.
    pub fn render<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "{}", self.title)?;
        writeln!(out, "{}", "=".repeat(self.title.chars().count()))?;

        if self.entries.is_empty() {
            writeln!(out, "(sin datos)")?;
            writeln!(out)?;
            return Ok(());
        }

        let label_width = self
            .entries
            .iter()
            .map(|entry| entry.label.chars().count())
            .max()
            .unwrap_or(0);
        let max_value = self
            .entries
            .iter()
            .map(|entry| entry.value)
            .fold(0.0_f64, f64::max);

        for entry in self.entries {
            writeln!(
                out,
                "{label:<label_width$}  {bar:<bar_width$}  {value}",
                label = entry.label,
                bar = bar_glyphs(entry.value, max_value),
                value = format_value(self.measure, entry.value),
                label_width = label_width,
                bar_width = BAR_WIDTH,
            )?;
        }
        writeln!(out)?;

        Ok(())
    }
}

/// Formats a value the way the chart labels it
///
/// Currency keeps two decimals, quantities print as whole numbers.
pub fn format_value(measure: Measure, value: f64) -> String {
    match measure {
        Measure::Currency => format!("{:.2}", value),
        Measure::Quantity => format!("{}", value.round() as i64),
    }
}

fn bar_glyphs(value: f64, max_value: f64) -> String {
    if !(value > 0.0 && max_value > 0.0) {
        return String::new();
    }

    let length = ((value / max_value) * BAR_WIDTH as f64).round() as usize;
    "█".repeat(length.max(1))
}
