use anyhow::{ anyhow, Result };
use colored::*;

use crate::cli::commands::{ print_json, CommandContext };
use crate::cli::ui;
use crate::cli::ProjectCommands;
use parcelflow::models::workflow::{
    AddCommentRequest,
    CreateProjectRequest,
    DecisionAction,
    MakeDecisionRequest,
    Project,
};
use parcelflow::traits::workflow_client::WorkflowClient;

/// Workflow service command
pub async fn execute<C: WorkflowClient + Sync>(
    ctx: &CommandContext,
    client: &C,
    action: &ProjectCommands
) -> Result<()> {
    match action {
        ProjectCommands::List => {
            let spinner = ui::spinner_with_message("Fetching projects...");
            let projects = client.list_projects().await;
            spinner.finish_and_clear();
            let projects = projects?;

            if ctx.json {
                return print_json(&projects);
            }
            ui::print_header("Projects");
            if projects.is_empty() {
                ui::print_info("No projects yet");
            }
            for project in &projects {
                println!(
                    "{:<12} {:<30} {:<6} {:<10} {} comments",
                    project.id,
                    project.name,
                    project.current_workflow_group.as_deref().unwrap_or("-"),
                    project.status,
                    project.comment_count
                );
            }
        }

        ProjectCommands::Show { id } => {
            let spinner = ui::spinner_with_message("Fetching project...");
            let project = client.get_project(id).await;
            spinner.finish_and_clear();
            let project = project?;

            if ctx.json {
                return print_json(&project);
            }
            print_project(&project);
        }

        ProjectCommands::Create { name, description } => {
            let request = CreateProjectRequest {
                name: name.clone(),
                description: description.clone(),
            };
            let spinner = ui::spinner_with_message("Creating project...");
            let project = client.create_project(&request).await;
            spinner.finish_and_clear();
            let project = project?;

            if ctx.json {
                return print_json(&project);
            }
            ui::print_success(&format!("Created project {} ({})", project.name, project.id));
            print_project(&project);
        }

        ProjectCommands::Comment { id, content, user } => {
            let request = AddCommentRequest {
                content: content.clone(),
                user_name: user.clone().or_else(|| ctx.config.workflow_api.default_user.clone()),
            };
            let comment = client.add_comment(id, &request).await?;

            if ctx.json {
                return print_json(&comment);
            }
            ui::print_success(&format!("Comment {} added on {}", comment.id, comment.workflow_group));
        }

        ProjectCommands::Decide { id, action, target, target_wfi, reason, yes } => {
            let action: DecisionAction = action.parse()?;
            if action.requires_target() && target.is_none() {
                return Err(anyhow!("{} needs --target", action.as_str()));
            }

            let request = MakeDecisionRequest {
                action,
                target_step: target.clone(),
                target_wfi: target_wfi.clone(),
                reason: reason.clone(),
            };

            if !*yes && !ctx.json {
                let prompt = format!("Submit '{}' on project {}?", action.as_str(), id);
                if !ui::confirm_action(&prompt)? {
                    ui::print_info("Decision cancelled");
                    return Ok(());
                }
            }

            let spinner = ui::spinner_with_message("Submitting decision...");
            let response = client.make_decision(id, &request).await;
            spinner.finish_and_clear();
            let response = response?;

            if ctx.json {
                return print_json(&response);
            }
            if response.success {
                ui::print_success(&response.message);
            } else {
                ui::print_warning(&response.message);
            }
            ui::print_result(
                "Step",
                &format!(
                    "{} -> {}",
                    response.previous_step.as_deref().unwrap_or("-"),
                    response.current_step.as_deref().unwrap_or("-")
                )
            );
        }
    }

    Ok(())
}

fn print_project(project: &Project) {
    ui::print_header(&project.name);
    ui::print_result("Id", &project.id);
    ui::print_result("Status", project.status.as_str());
    if let Some(description) = &project.description {
        ui::print_text(description);
    }
    if let Some(step) = &project.current_step {
        let item = project.current_wfi
            .as_ref()
            .map(|wfi| format!(" / {} {}", wfi.id, wfi.name))
            .unwrap_or_default();
        ui::print_result("Current step", &format!("{} {}{}", step.id, step.name, item));
    }

    if let Some(transitions) = &project.available_transitions {
        let names = |steps: &[parcelflow::models::workflow::WorkflowStepInfo]| {
            steps
                .iter()
                .map(|s| s.id.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        };
        if transitions.can_approve {
            let target = transitions.approve_target
                .as_ref()
                .map(|s| s.id.as_str())
                .unwrap_or("complete");
            ui::print_result("Approve", target);
        }
        if transitions.can_send_back {
            ui::print_result("Send back", &names(&transitions.send_back_targets));
        }
        if transitions.can_skip_to {
            ui::print_result("Skip to", &names(&transitions.skip_to_targets));
        }
    }

    if !project.history.is_empty() {
        ui::print_header("History");
        for entry in &project.history {
            println!(
                "{} {} {} -> {} {}",
                entry.created_at.dimmed(),
                entry.action.bold(),
                entry.from_workflow_group.as_deref().unwrap_or("-"),
                entry.to_workflow_group.as_deref().unwrap_or("-"),
                entry.reason.as_deref().unwrap_or("")
            );
        }
    }

    if !project.comments.is_empty() {
        ui::print_header("Comments");
        for comment in &project.comments {
            println!("{} ({}): {}", comment.user_name.bold(), comment.workflow_group, comment.content);
        }
    }
}
