use clap::Subcommand;

use super::screen::{self, ListArgs};
use crate::cli::OutputFormat;
use crate::records::{ContactScreen, ContactStatus};

const COLUMNS: &[(&str, &str, usize)] = &[
    ("name", "NAME", 20),
    ("email", "EMAIL", 28),
    ("subject", "SUBJECT", 24),
    ("status", "STATUS", 12),
];

const DETAIL: &[(&str, &str)] = &[
    ("name", "Name"),
    ("email", "Email"),
    ("phone", "Phone"),
    ("subject", "Subject"),
    ("message", "Message"),
    ("createdAt", "Received"),
    ("updatedAt", "Updated"),
];

#[derive(Subcommand)]
pub enum ContactCommands {
    #[command(about = "List contact requests")]
    List(ListArgs),

    #[command(about = "Show one contact request")]
    Show {
        #[arg(help = "Record ID")]
        id: String,
    },

    #[command(about = "Change the status of a contact request")]
    Status {
        #[arg(help = "Record ID")]
        id: String,
        #[arg(help = "Pending, In Progress or Resolved")]
        status: String,
    },
}

pub async fn handle(cmd: ContactCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        ContactCommands::List(args) => screen::list::<ContactScreen>(args, COLUMNS, output_format).await,
        ContactCommands::Show { id } => screen::show::<ContactScreen>(&id, DETAIL, output_format).await,
        ContactCommands::Status { id, status } => {
            let status: ContactStatus = screen::parse_status(&status)?;
            screen::edit::<ContactScreen, _>(
                &id,
                |form| {
                    form.status = status;
                    Ok(())
                },
                output_format,
            )
            .await
        }
    }
}
