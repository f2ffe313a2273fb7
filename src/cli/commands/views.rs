use anyhow::{ anyhow, Result };
use serde::Serialize;
use std::path::Path;

use crate::cli::commands::{ print_json, CommandContext };
use crate::cli::ui;
use parcelflow::analysis::views::{ available_views, next_view, previous_view, select_view, ViewMode };
use parcelflow::fixtures::Portfolio;
use parcelflow::models::common::EntitlementStatus;
use parcelflow::models::correction::{ CorrectionLetter, CorrectionLetterStatus };

#[derive(Serialize)]
struct ViewsReport {
    status: EntitlementStatus,
    has_letter: bool,
    available: Vec<ViewMode>,
    current: ViewMode,
    previous: Option<ViewMode>,
    next: Option<ViewMode>,
}

/// View availability command
pub fn execute(
    ctx: &CommandContext,
    status: Option<&str>,
    fixture: Option<&Path>,
    property_id: Option<&str>,
    with_letter: bool,
    current: &str,
    interactive: bool
) -> Result<()> {
    let portfolio = match fixture {
        Some(path) => Some(Portfolio::load(path)?),
        None => None,
    };
    let property = match (&portfolio, property_id) {
        (Some(portfolio), Some(id)) => Some(portfolio.find(id)?),
        (None, Some(_)) => {
            return Err(anyhow!("--property needs --fixture"));
        }
        _ => None,
    };

    let status: EntitlementStatus = match (status, property) {
        (Some(s), _) => s.parse()?,
        (None, Some(p)) => p.entitlement_status
            .ok_or_else(|| anyhow!("Property {} has no entitlement status", p.id))?,
        (None, None) => {
            return Err(anyhow!("Give --status or a --fixture/--property with an entitlement status"));
        }
    };

    // a bare flag stands in for a letter with no items
    let placeholder;
    let letter: Option<&CorrectionLetter> = match property {
        Some(p) => p.current_letter(),
        None if with_letter => {
            placeholder = placeholder_letter(ctx);
            Some(&placeholder)
        }
        None => None,
    };

    let available = available_views(status, letter);
    let requested: ViewMode = current.parse()?;
    let mut current = select_view(ViewMode::Overview, requested, &available);
    if current != requested {
        ui::print_warning(&format!("{} is not available, showing {}", requested, current));
    }
    if interactive && !ctx.json {
        current = select_view(current, ui::select_view(&available)?, &available);
    }

    let report = ViewsReport {
        status,
        has_letter: letter.is_some(),
        available: available.iter().copied().collect(),
        current,
        previous: previous_view(current, &available),
        next: next_view(current, &available),
    };

    if ctx.json {
        return print_json(&report);
    }

    ui::print_header(&format!("Entitlement Views ({})", status));
    ui::print_view_tabs(current, &available);
    println!();
    ui::print_result("Previous", report.previous.map(|v| v.as_str()).unwrap_or("-"));
    ui::print_result("Next", report.next.map(|v| v.as_str()).unwrap_or("-"));
    if !report.has_letter {
        ui::print_info("No correction letter, only the overview is available");
    }

    Ok(())
}

fn placeholder_letter(ctx: &CommandContext) -> CorrectionLetter {
    CorrectionLetter {
        id: "placeholder".to_string(),
        property_id: String::new(),
        round_number: 1,
        letter_date: ctx.now,
        received_date: ctx.now,
        response_due_date: None,
        internal_target_date: None,
        status: CorrectionLetterStatus::Received,
        items: Vec::new(),
    }
}
