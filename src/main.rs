use anyhow::Result;
use clap::Parser;
use log::{ error, info };

use parcelflow::implementations::config::{ resolve_clock, ParcelflowConfig };
use parcelflow::implementations::http_workflow_client::HttpWorkflowClient;
mod cli;
use cli::{ Commands, ParcelflowCli };
use cli::commands::CommandContext;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env before anything reads the environment
    if let Err(e) = dotenv::dotenv() {
        if !e.not_found() {
            eprintln!("Could not load .env file: {}", e);
        }
    }

    // Parse the command line arguments
    let cli = ParcelflowCli::parse();

    // Setup logging
    setup_logging(&cli.log_level);

    if let Err(e) = run(&cli).await {
        error!("{:#}", e);
        cli::ui::print_error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}

async fn run(cli: &ParcelflowCli) -> Result<()> {
    let config = ParcelflowConfig::load(cli.config.as_deref())?;
    let clock = resolve_clock(cli.now.as_deref())?;
    let ctx = CommandContext {
        config,
        now: clock.now(),
        json: cli.output_format.eq_ignore_ascii_case("json"),
    };
    info!("Reference time: {}", ctx.now.to_rfc3339());

    match &cli.command {
        Commands::Stats { fixture, properties } => {
            cli::commands::stats::execute(&ctx, fixture, *properties)?;
        }

        Commands::Letter { fixture, property, round } => {
            cli::commands::letter::execute(&ctx, fixture, property, *round)?;
        }

        Commands::Views { status, fixture, property, with_letter, current, interactive } => {
            cli::commands::views::execute(
                &ctx,
                status.as_deref(),
                fixture.as_deref(),
                property.as_deref(),
                *with_letter,
                current,
                *interactive
            )?;
        }

        Commands::Path { fixture, property } => {
            cli::commands::path::execute(&ctx, fixture, property)?;
        }

        Commands::Projects { action } => {
            let client = HttpWorkflowClient::new(&ctx.config.workflow_api)?;
            info!("Using workflow service at {}", client.endpoint(""));
            cli::commands::projects::execute(&ctx, &client, action).await?;
        }
    }

    Ok(())
}

fn setup_logging(log_level: &str) {
    // Set up the logger based on the log level
    let level = match log_level.to_lowercase().as_str() {
        "trace" => log::LevelFilter::Trace,
        "debug" => log::LevelFilter::Debug,
        "info" => log::LevelFilter::Info,
        "warn" => log::LevelFilter::Warn,
        "error" => log::LevelFilter::Error,
        _ => log::LevelFilter::Info,
    };

    env_logger::Builder::new().filter_level(level).init();

    info!("Logger initialized with level: {}", log_level);
}
