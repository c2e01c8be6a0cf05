pub mod commands;
pub mod config;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "vts")]
#[command(about = "VTS admin console - review submissions and manage site content")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in human-readable text format")]
    pub text: bool,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Login, logout and session status")]
    Auth {
        #[command(subcommand)]
        cmd: commands::auth::AuthCommands,
    },

    #[command(about = "Show or change CLI configuration")]
    Config {
        #[command(subcommand)]
        cmd: commands::config::ConfigCommands,
    },

    #[command(about = "Contact form submissions")]
    Contact {
        #[command(subcommand)]
        cmd: commands::contact::ContactCommands,
    },

    #[command(about = "Job applications")]
    Joinus {
        #[command(subcommand)]
        cmd: commands::joinus::JoinUsCommands,
    },

    #[command(about = "Resume review requests")]
    Resume {
        #[command(subcommand)]
        cmd: commands::resume::ResumeCommands,
    },

    #[command(about = "Doubt-solving sessions")]
    Doubt {
        #[command(subcommand)]
        cmd: commands::doubt::DoubtCommands,
    },

    #[command(about = "Mentor profiles")]
    Mentor {
        #[command(subcommand)]
        cmd: commands::mentor::MentorCommands,
    },

    #[command(about = "Blog posts")]
    Blog {
        #[command(subcommand)]
        cmd: commands::blog::BlogCommands,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);

    match cli.command {
        Commands::Auth { cmd } => commands::auth::handle(cmd, output_format).await,
        Commands::Config { cmd } => commands::config::handle(cmd, output_format).await,
        Commands::Contact { cmd } => commands::contact::handle(cmd, output_format).await,
        Commands::Joinus { cmd } => commands::joinus::handle(cmd, output_format).await,
        Commands::Resume { cmd } => commands::resume::handle(cmd, output_format).await,
        Commands::Doubt { cmd } => commands::doubt::handle(cmd, output_format).await,
        Commands::Mentor { cmd } => commands::mentor::handle(cmd, output_format).await,
        Commands::Blog { cmd } => commands::blog::handle(cmd, output_format).await,
    }
}
