use clap::Parser;

use sales_dashboard::{
    sales_by_month, sales_by_warehouse, top_clients, top_products, BarChart, Criteria, Dataset,
    Entry, Measure,
};

/// A cli interface to the sales dashboard pipeline
#[derive(Debug, Parser)]
#[clap(version)]
struct Args {
    /// The path or http(s) URL of the sales CSV file
    source: String,

    /// Keep only records with this month label
    #[clap(long)]
    month: Option<String>,

    /// Keep only records with this warehouse label
    #[clap(long)]
    warehouse: Option<String>,

    /// Keep only records with this client label
    #[clap(long)]
    client: Option<String>,

    /// Print the available filter values and exit
    #[clap(long)]
    list_filters: bool,

    /// Emit the aggregated views as CSV instead of bar charts
    #[clap(long)]
    csv: bool,
}

/// One line of the CSV output mode
#[derive(serde::Serialize)]
struct ViewRow<'a> {
    view: &'a str,
    label: &'a str,
    value: f64,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let (dataset, summary) = Dataset::load(&args.source).map_err(|err| {
        log::error!("load failed, no charts will be drawn: {}", err);
        err
    })?;
    log::info!(
        "loaded {} of {} rows ({} skipped)",
        summary.kept,
        summary.total_rows,
        summary.skipped
    );

    if args.list_filters {
        let options = dataset.filter_options();
        print_options("Meses", &options.months);
        print_options("Almacenes", &options.warehouses);
        print_options("Clientes", &options.clients);
        return Ok(());
    }

    let criteria = Criteria {
        month: args.month,
        warehouse: args.warehouse,
        client: args.client,
    };
    let filtered = criteria.apply(dataset.all());

    let views = [
        ("Ventas por Mes", Measure::Currency, sales_by_month(&filtered)),
        (
            "Ventas por Almacen",
            Measure::Currency,
            sales_by_warehouse(&filtered),
        ),
        ("Top 10 Clientes", Measure::Currency, top_clients(&filtered)),
        (
            "Top 10 Productos (Cantidad)",
            Measure::Quantity,
            top_products(&filtered),
        ),
    ];

    if args.csv {
        write_views_csv(&views)?;
    } else {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        for (title, measure, entries) in &views {
            BarChart::new(title, *measure, entries).render(&mut out)?;
        }
    }

    Ok(())
}

fn print_options(title: &str, values: &[String]) {
    println!("{}: Todos, {}", title, values.join(", "));
}

fn write_views_csv(views: &[(&str, Measure, Vec<Entry>)]) -> anyhow::Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(true)
        .from_writer(std::io::stdout());

    for (title, _, entries) in views {
        for entry in entries {
            writer.serialize(ViewRow {
                view: title,
                label: &entry.label,
                value: entry.value,
            })?;
        }
    }
    writer.flush()?;

    Ok(())
}
