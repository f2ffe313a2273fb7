use clap::{ Parser, Subcommand };
use std::path::PathBuf;

pub mod commands;
pub mod ui;

#[derive(Parser)]
#[command(
    name = "parcelflow",
    about = "Derived workflow state for a property pipeline",
    version,
    author,
    long_about = None
)]
pub struct ParcelflowCli {
    /// Sets the log level (error, warn, info, debug, trace)
    #[arg(short, long, global = true, default_value = "info")]
    pub log_level: String,

    /// Path to configuration file (YAML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Reference time (RFC 3339 or YYYY-MM-DD); defaults to PARCELFLOW_NOW, then the system clock
    #[arg(long, global = true)]
    pub now: Option<String>,

    /// Output format (text, json)
    #[arg(long, global = true, default_value = "text")]
    pub output_format: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Dashboard counters for a portfolio fixture
    Stats {
        /// Path to portfolio JSON
        #[arg(short, long)]
        fixture: PathBuf,

        /// Also list each property with its health and next deadline
        #[arg(long, default_value = "false")]
        properties: bool,
    },

    /// Progress and risk for a property's current correction letter
    Letter {
        /// Path to portfolio JSON
        #[arg(short, long)]
        fixture: PathBuf,

        /// Property id
        #[arg(short, long)]
        property: String,

        /// Correction round to show instead of the latest
        #[arg(short, long)]
        round: Option<u32>,
    },

    /// Entitlement views available for a status
    Views {
        /// Entitlement status (e.g. corrections-qa); taken from the property when omitted
        #[arg(short, long)]
        status: Option<String>,

        /// Path to portfolio JSON, used to look up the correction letter
        #[arg(short, long)]
        fixture: Option<PathBuf>,

        /// Property id inside the fixture
        #[arg(short, long)]
        property: Option<String>,

        /// Assume a correction letter exists even without a fixture
        #[arg(long, default_value = "false")]
        with_letter: bool,

        /// View to navigate from
        #[arg(long, default_value = "overview")]
        current: String,

        /// Pick a view interactively
        #[arg(short, long, default_value = "false")]
        interactive: bool,
    },

    /// Lifecycle path of a property and the transitions open to it
    Path {
        /// Path to portfolio JSON
        #[arg(short, long)]
        fixture: PathBuf,

        /// Property id
        #[arg(short, long)]
        property: String,
    },

    /// Talk to the workflow service
    Projects {
        #[command(subcommand)]
        action: ProjectCommands,
    },
}

#[derive(Subcommand)]
pub enum ProjectCommands {
    /// List projects
    List,

    /// Show one project
    Show {
        id: String,
    },

    /// Create a project
    Create {
        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        description: Option<String>,
    },

    /// Comment on a project
    Comment {
        id: String,

        #[arg(short, long)]
        content: String,

        #[arg(short, long)]
        user: Option<String>,
    },

    /// Approve, send back, skip to, or complete the current group
    Decide {
        id: String,

        /// approve, send_back, skip_to, complete_wfg
        #[arg(short, long)]
        action: String,

        /// Target workflow group for send_back / skip_to (e.g. WFG1)
        #[arg(short, long)]
        target: Option<String>,

        /// Target workflow item inside the group (e.g. WFI2)
        #[arg(long)]
        target_wfi: Option<String>,

        #[arg(short, long)]
        reason: Option<String>,

        /// Skip the confirmation prompt
        #[arg(short, long, default_value = "false")]
        yes: bool,
    },
}
