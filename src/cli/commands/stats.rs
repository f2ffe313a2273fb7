use anyhow::Result;
use serde::Serialize;
use std::path::Path;

use crate::cli::commands::{ print_json, CommandContext };
use crate::cli::ui;
use parcelflow::analysis::due_date::classify;
use parcelflow::analysis::stats::{
    dashboard_stats,
    next_due_date,
    properties_by_lifecycle,
    property_health,
    DashboardStats,
    PropertyHealth,
};
use parcelflow::fixtures::Portfolio;

#[derive(Serialize)]
struct PropertyRow {
    id: String,
    name: String,
    lifecycle: String,
    health: PropertyHealth,
    next_due: Option<String>,
}

#[derive(Serialize)]
struct StatsReport {
    stats: DashboardStats,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    properties: Vec<PropertyRow>,
}

/// Dashboard statistics command
pub fn execute(ctx: &CommandContext, fixture: &Path, list_properties: bool) -> Result<()> {
    let portfolio = Portfolio::load(fixture)?;
    let thresholds = ctx.thresholds();
    let stats = dashboard_stats(&portfolio.properties, ctx.now, thresholds);

    let rows: Vec<PropertyRow> = if list_properties {
        portfolio.properties
            .iter()
            .map(|p| PropertyRow {
                id: p.id.clone(),
                name: p.display_name().to_string(),
                lifecycle: p.lifecycle.to_string(),
                health: property_health(p, ctx.now, thresholds),
                next_due: next_due_date(p).map(|due| classify(due, ctx.now).label),
            })
            .collect()
    } else {
        Vec::new()
    };

    if ctx.json {
        return print_json(&(StatsReport { stats, properties: rows }));
    }

    ui::print_header("Pipeline Dashboard");
    ui::print_result("Properties", &stats.total_properties.to_string());
    ui::print_result("Active phases", &stats.active_phases.to_string());
    ui::print_result("Active processes", &stats.active_process_count.to_string());
    ui::print_result("Needs attention", &stats.needs_attention_count.to_string());
    ui::print_result("On track", &stats.on_track_count.to_string());
    ui::print_result("Overdue", &stats.overdue_count.to_string());
    ui::print_result("Due this week", &stats.due_this_week_count.to_string());
    ui::print_result("Due this month", &stats.due_this_month_count.to_string());

    ui::print_header("By Phase");
    for (phase, properties) in properties_by_lifecycle(&portfolio.properties) {
        ui::print_result(phase.label(), &properties.len().to_string());
    }

    if list_properties {
        ui::print_header("Properties");
        for (property, row) in portfolio.properties.iter().zip(&rows) {
            let due = next_due_date(property)
                .map(|d| ui::due_badge(&classify(d, ctx.now)).to_string())
                .unwrap_or_else(|| "no due date".to_string());
            println!(
                "{:<10} {:<28} {:<13} {:<16} {}",
                row.id,
                row.name,
                row.lifecycle,
                ui::health_badge(row.health),
                due
            );
        }
    }

    Ok(())
}
