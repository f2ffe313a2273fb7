use colored::*;
use console::Term;
use dialoguer::{ theme::ColorfulTheme, Confirm, Select };
use indicatif::{ ProgressBar, ProgressStyle };
use std::time::Duration;
use textwrap::wrap;

use parcelflow::analysis::due_date::{ DueDate, DueStatus };
use parcelflow::analysis::stats::PropertyHealth;
use parcelflow::analysis::views::{ ViewMode, ViewSet };

/// UI theme for consistent appearance
pub fn get_theme() -> ColorfulTheme {
    ColorfulTheme::default()
}

/// Print a section header
pub fn print_header(title: &str) {
    let title = format!(" {} ", title);
    println!("\n{}\n", title.bold().white().on_blue());
}

/// Print text wrapped to the terminal width
pub fn print_text(text: &str) {
    let width = Term::stdout().size().1 as usize;
    for line in text.lines() {
        for wrapped_line in wrap(line, width.saturating_sub(10).max(20)) {
            println!("{}", wrapped_line);
        }
    }
}

/// Print an error message
pub fn print_error(message: &str) {
    eprintln!("{} {}", "ERROR:".red().bold(), message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
    println!("{} {}", "WARNING:".yellow().bold(), message);
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("{} {}", "SUCCESS:".green().bold(), message);
}

/// Print information
pub fn print_info(message: &str) {
    println!("{} {}", "INFO:".blue().bold(), message);
}

/// Print a formatted result
pub fn print_result(label: &str, value: &str) {
    println!("{}: {}", label.bold(), value);
}

/// Colored health badge
pub fn health_badge(health: PropertyHealth) -> ColoredString {
    let label = health.label();
    match health {
        PropertyHealth::Critical => label.red().bold(),
        PropertyHealth::Watch | PropertyHealth::Paused => label.yellow(),
        PropertyHealth::Closed => label.dimmed(),
        PropertyHealth::Healthy => label.green(),
    }
}

/// Colored due-date label
pub fn due_badge(due: &DueDate) -> ColoredString {
    match due.status {
        DueStatus::Overdue => due.label.red().bold(),
        DueStatus::DueToday | DueStatus::DueTomorrow => due.label.yellow().bold(),
        DueStatus::DueSoon => due.label.yellow(),
        DueStatus::OnTrack => due.label.normal(),
    }
}

/// Text progress bar, e.g. `[######----] 60%`
pub fn progress_bar(percent: u32, width: usize) -> String {
    let filled = (percent.min(100) as usize * width) / 100;
    format!("[{}{}] {}%", "#".repeat(filled), "-".repeat(width - filled), percent)
}

/// Print the view tabs, highlighting the current one and dimming locked ones
pub fn print_view_tabs(current: ViewMode, available: &ViewSet) {
    let tabs: Vec<String> = ViewMode::ALL
        .iter()
        .map(|view| {
            let name = view.as_str();
            if *view == current {
                format!("[{}]", name).bold().cyan().to_string()
            } else if available.contains(view) {
                name.to_string()
            } else {
                name.dimmed().to_string()
            }
        })
        .collect();
    println!("{}", tabs.join("  "));
}

/// Interactive selection among the available views
pub fn select_view(available: &ViewSet) -> std::io::Result<ViewMode> {
    let views: Vec<ViewMode> = available.iter().copied().collect();
    let names: Vec<&str> = views
        .iter()
        .map(|v| v.as_str())
        .collect();

    let selection = Select::with_theme(&get_theme())
        .with_prompt("Open view")
        .items(&names)
        .default(0)
        .interact()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;

    Ok(views[selection])
}

/// Confirm an action with the user
pub fn confirm_action(prompt: &str) -> std::io::Result<bool> {
    Confirm::with_theme(&get_theme())
        .with_prompt(prompt)
        .default(true)
        .interact()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
}

/// Display a spinner while waiting for an operation to complete
pub fn spinner_with_message(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    let style = ProgressStyle::default_spinner()
        .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
        .template("{spinner:.green} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    spinner.set_style(style);
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}
