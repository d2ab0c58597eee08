use anyhow::Result;
use chrono::Local;
use clap::Parser;
use client_core::{
    form::{NO_VACANCY_TEXT, TABLE_COLUMNS},
    SearchClient, SearchFields, SearchPage, SeatSearchForm, TableBody,
};
use tracing::info;

#[derive(Parser, Debug)]
#[command(about = "Find vacant seats on a train's reservation chart")]
struct Args {
    #[arg(long, default_value = "http://127.0.0.1:5000")]
    server_url: String,
    #[arg(long)]
    train_no: String,
    /// Journey date; defaults to today.
    #[arg(long)]
    date: Option<String>,
    #[arg(long, default_value = "")]
    from: String,
    #[arg(long, default_value = "")]
    to: String,
    #[arg(long = "class", default_value = "ALL")]
    class_pref: String,
    /// Expand the table past the first page of rows.
    #[arg(long)]
    all: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();
    let args = Args::parse();

    let client = SearchClient::new(&args.server_url)?;
    info!(endpoint = %client.endpoint(), "using seat search endpoint");

    let fields = SearchFields {
        train_no: args.train_no,
        date: args
            .date
            .unwrap_or_else(|| Local::now().date_naive().format("%Y-%m-%d").to_string()),
        source_station: args.from,
        dest_station: args.to,
        class_pref: args.class_pref,
    };

    let mut form = SeatSearchForm::new();
    form.submit(&client, &fields).await;

    let mut failed = false;
    while let Some(alert) = form.take_alert() {
        eprintln!("{alert}");
        failed = true;
    }
    if failed {
        std::process::exit(1);
    }

    if args.all && form.page().toggle.is_some() {
        form.activate_toggle();
    }
    print_page(form.page());
    Ok(())
}

fn print_page(page: &SearchPage) {
    if let Some(advice) = &page.ai_advice {
        println!("{advice}\n");
    }

    match &page.body {
        TableBody::Cleared => {}
        TableBody::NoVacancy => println!("{NO_VACANCY_TEXT}"),
        TableBody::Rows(rows) => {
            let cells: Vec<[&str; 5]> = rows
                .iter()
                .map(|row| {
                    [
                        row.coach.as_str(),
                        row.seat.as_str(),
                        row.from.as_str(),
                        row.to.as_str(),
                        row.seat_type.as_str(),
                    ]
                })
                .collect();
            let mut widths = TABLE_COLUMNS.map(str::len);
            for line in &cells {
                for (width, cell) in widths.iter_mut().zip(line) {
                    *width = (*width).max(cell.len());
                }
            }

            println!("{}", format_line(&TABLE_COLUMNS, &widths));
            for line in &cells {
                println!("{}", format_line(line, &widths));
            }
        }
    }

    let collapsed = page.results().is_some_and(|table| !table.is_expanded());
    if let Some(toggle) = page.toggle.as_ref().filter(|_| collapsed) {
        println!("\n[{}] (pass --all to expand)", toggle.label);
    }
}

fn format_line(cells: &[&str; 5], widths: &[usize; 5]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}
