use anyhow::Result;
use colored::*;
use serde::Serialize;
use std::path::Path;

use crate::cli::commands::{ print_json, CommandContext };
use crate::cli::ui;
use parcelflow::analysis::due_date::format_date;
use parcelflow::analysis::lifecycle::{ available_transitions, lifecycle_path, PathNode, TransitionRule };
use parcelflow::fixtures::Portfolio;

#[derive(Serialize)]
struct PathReport<'a> {
    property_id: &'a str,
    path: Vec<PathNode>,
    available_transitions: Vec<&'static TransitionRule>,
}

/// Lifecycle path command
pub fn execute(ctx: &CommandContext, fixture: &Path, property_id: &str) -> Result<()> {
    let portfolio = Portfolio::load(fixture)?;
    let property = portfolio.find(property_id)?;

    let report = PathReport {
        property_id: &property.id,
        path: lifecycle_path(property),
        available_transitions: available_transitions(property),
    };

    if ctx.json {
        return print_json(&report);
    }

    ui::print_header(&format!("Lifecycle Path: {}", property.display_name()));
    if report.path.is_empty() {
        ui::print_info(&format!("No lifecycle changes recorded; currently in {}", property.lifecycle.label()));
    }
    for node in &report.path {
        let phase = if node.backward {
            format!("<- {}", node.phase.label()).red().bold().to_string()
        } else {
            format!("-> {}", node.phase.label())
        };
        let reason = node.reason.as_deref().unwrap_or("");
        println!("{:<8} {:<24} {}", format_date(node.entered_at, ctx.now), phase, reason);
    }
    if report.path.iter().any(|node| node.backward) {
        ui::print_info("This property moved backwards at least once");
    }

    ui::print_header("Available Transitions");
    if report.available_transitions.is_empty() {
        ui::print_info("No transition conditions are met");
    }
    for rule in &report.available_transitions {
        let direction = if rule.is_backward() { "back to" } else { "to" };
        ui::print_result(rule.trigger, &format!("{} {}", direction, rule.to.label()));
    }

    Ok(())
}
