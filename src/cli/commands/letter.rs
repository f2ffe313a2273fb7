use anyhow::{ anyhow, Result };
use serde::Serialize;
use std::path::Path;

use crate::cli::commands::{ print_json, CommandContext };
use crate::cli::ui;
use parcelflow::analysis::corrections::{
    group_items_by_discipline,
    is_item_at_risk,
    sort_by_priority,
    summarize_letter,
    LetterSummary,
};
use parcelflow::analysis::due_date::{ classify, format_days_until_due };
use parcelflow::fixtures::Portfolio;
use parcelflow::models::correction::{ CorrectionItem, CorrectionItemStatus };

#[derive(Serialize)]
struct LetterReport<'a> {
    summary: LetterSummary,
    prioritized: Vec<PrioritizedItem<'a>>,
}

#[derive(Serialize)]
struct PrioritizedItem<'a> {
    #[serde(flatten)]
    item: &'a CorrectionItem,
    at_risk: bool,
}

/// Correction letter progress command
pub fn execute(ctx: &CommandContext, fixture: &Path, property_id: &str, round: Option<u32>) -> Result<()> {
    let portfolio = Portfolio::load(fixture)?;
    let property = portfolio.find(property_id)?;
    let thresholds = ctx.thresholds();

    let letter = match round {
        Some(round) => property.correction_letters.iter().find(|l| l.round_number == round),
        None => property.current_letter(),
    };
    let letter = letter.ok_or_else(|| anyhow!("Property {} has no matching correction letter", property_id))?;

    let summary = summarize_letter(letter, ctx.now, thresholds);
    let prioritized = sort_by_priority(&letter.items, ctx.now, thresholds);

    if ctx.json {
        let prioritized = prioritized
            .iter()
            .map(|item| PrioritizedItem { item, at_risk: is_item_at_risk(item, ctx.now, thresholds) })
            .collect();
        return print_json(&(LetterReport { summary, prioritized }));
    }

    ui::print_header(&format!("Correction Letter {} (round {})", letter.id, letter.round_number));
    ui::print_result("Progress", &ui::progress_bar(summary.percent_complete, 20));
    ui::print_result(
        "Items",
        &format!(
            "{} total, {} completed, {} in progress, {} not started",
            summary.total_items,
            summary.items_completed,
            summary.items_in_progress,
            summary.items_not_started
        )
    );
    if let Some(due) = letter.response_due_date {
        ui::print_result("Response due", &format_days_until_due(due, ctx.now));
    }
    ui::print_result("Estimated effort", &format!("{:.1} h", summary.total_effort_hours));
    if summary.at_risk {
        ui::print_warning(&format!("Letter is at risk ({} items at risk)", summary.at_risk_items));
    } else {
        ui::print_success("Letter is on track");
    }

    ui::print_header("Status Breakdown");
    for status in CorrectionItemStatus::ALL {
        ui::print_result(status.as_str(), &summary.breakdown.get(*status).to_string());
    }

    ui::print_header("By Discipline");
    for (discipline, items) in group_items_by_discipline(&letter.items) {
        let done = items.iter().filter(|i| i.is_completed()).count();
        ui::print_result(discipline.as_str(), &format!("{}/{} completed", done, items.len()));
    }

    ui::print_header("Priority Order");
    for item in &prioritized {
        let due = item.due_date
            .map(|d| ui::due_badge(&classify(d, ctx.now)).to_string())
            .unwrap_or_else(|| "no due date".to_string());
        let marker = if is_item_at_risk(item, ctx.now, thresholds) { "!" } else { " " };
        println!(
            "{} {:<6} {:<9} {:<14} {:<21} {}",
            marker,
            item.item_number,
            item.severity,
            item.discipline,
            item.status,
            due
        );
        ui::print_text(&format!("         {}", item.description));
    }

    Ok(())
}
