use clap::Subcommand;

use super::screen::{self, ListArgs};
use crate::cli::OutputFormat;
use crate::records::{JoinUsScreen, MarkSeen};

const COLUMNS: &[(&str, &str, usize)] = &[
    ("fullName", "NAME", 20),
    ("email", "EMAIL", 28),
    ("position", "POSITION", 18),
    ("status", "STATUS", 6),
];

const DETAIL: &[(&str, &str)] = &[
    ("fullName", "Name"),
    ("email", "Email"),
    ("phone", "Phone"),
    ("position", "Position"),
    ("experience", "Experience"),
    ("resumeUrl", "Resume"),
    ("coverLetter", "Cover letter"),
    ("createdAt", "Applied"),
];

#[derive(Subcommand)]
pub enum JoinUsCommands {
    #[command(about = "List job applications")]
    List(ListArgs),

    #[command(about = "Show one application")]
    Show {
        #[arg(help = "Application ID")]
        id: String,
    },

    #[command(about = "Mark an application as seen")]
    Seen {
        #[arg(help = "Application ID")]
        id: String,
    },

    #[command(about = "Delete an application")]
    Delete {
        #[arg(help = "Application ID")]
        id: String,
        #[arg(long, short, help = "Skip the confirmation prompt")]
        yes: bool,
    },
}

pub async fn handle(cmd: JoinUsCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        JoinUsCommands::List(args) => screen::list::<JoinUsScreen>(args, COLUMNS, output_format).await,
        JoinUsCommands::Show { id } => screen::show::<JoinUsScreen>(&id, DETAIL, output_format).await,
        JoinUsCommands::Seen { id } => screen::apply::<JoinUsScreen>(&id, MarkSeen, output_format).await,
        JoinUsCommands::Delete { id, yes } => screen::remove::<JoinUsScreen>(&id, yes, output_format).await,
    }
}
