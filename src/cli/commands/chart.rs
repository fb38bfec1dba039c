use anyhow::Result;
use clap::Args;
use colored::*;

use crate::cli::AppContext;
use crate::series::{ChartSeries, Series};
use crate::store::ChartStore;
use crate::ui::Spinner;

#[derive(Args)]
pub struct ChartCommands {
    /// Device identifier
    #[arg(short, long)]
    pub device: String,
    /// Session identifier
    #[arg(short, long)]
    pub session: String,
    /// Only show the chart with this id
    #[arg(long)]
    pub chart: Option<i64>,
    /// Print the series as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn chart_command(args: ChartCommands, ctx: &AppContext) -> Result<()> {
    ctx.require_login()?;

    let mut store = ChartStore::new(ctx.client.clone());
    {
        let _spinner = Spinner::follow("Loading chart data", store.subscribe());
        store.fetch_chart_data(&args.device, &args.session).await;
    }

    if let Some(err) = store.error() {
        anyhow::bail!("Failed to load chart data: {}", err);
    }
    if let Some(err) = store.config_error() {
        eprintln!("{} Using the default chart layout: {}", "!".bright_yellow(), err);
    }

    let charts: Vec<ChartSeries> = store
        .all_chart_series()
        .into_iter()
        .filter(|chart| args.chart.is_none_or(|id| chart.id == id))
        .collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&charts)?);
        return Ok(());
    }

    println!(
        "{} {} / {}  ({} records)",
        "Session".bright_white().bold(),
        args.device.bright_green(),
        args.session.cyan(),
        store.chart_data().len()
    );

    if charts.is_empty() {
        println!("{}", "No matching charts.".bright_yellow());
        return Ok(());
    }

    for chart in &charts {
        print_chart(chart);
    }

    Ok(())
}

fn print_chart(chart: &ChartSeries) {
    println!();
    println!("  {} {}", format!("#{}", chart.id).dimmed(), chart.title.bright_blue().bold());
    if !chart.y_axis_title.is_empty() {
        println!("    {}: {}", "Axis".dimmed(), chart.y_axis_title);
    }

    for series in &chart.series {
        println!("    {}", describe_series(series));
    }
}

/// One-line summary: point count and the range of the finite values
fn describe_series(series: &Series) -> String {
    let values: Vec<f64> = series
        .data
        .iter()
        .map(|point| point.y)
        .filter(|y| y.is_finite())
        .collect();

    if values.is_empty() {
        return format!("{}: {}", series.name, "no data".dimmed());
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let last = values[values.len() - 1];

    format!(
        "{}: {} points, min {:.2}, max {:.2}, last {:.2}",
        series.name,
        series.data.len(),
        min,
        max,
        last
    )
}
