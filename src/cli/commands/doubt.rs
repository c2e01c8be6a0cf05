use clap::Subcommand;

use super::screen::{self, ListArgs};
use crate::cli::OutputFormat;
use crate::records::{DoubtSolvingScreen, SessionStatus};

const COLUMNS: &[(&str, &str, usize)] = &[
    ("name", "NAME", 20),
    ("subject", "SUBJECT", 22),
    ("preferredDate", "PREFERRED", 12),
    ("meetingLink", "LINK", 26),
    ("status", "STATUS", 10),
];

const DETAIL: &[(&str, &str)] = &[
    ("name", "Name"),
    ("email", "Email"),
    ("phone", "Phone"),
    ("subject", "Subject"),
    ("doubt", "Doubt"),
    ("preferredDate", "Preferred date"),
    ("meetingLink", "Meeting link"),
    ("createdAt", "Requested"),
];

#[derive(Subcommand)]
pub enum DoubtCommands {
    #[command(about = "List doubt-solving sessions")]
    List(ListArgs),

    #[command(about = "Show one session")]
    Show {
        #[arg(help = "Session ID")]
        id: String,
    },

    #[command(about = "Change session status and meeting link")]
    Update {
        #[arg(help = "Session ID")]
        id: String,
        #[arg(long, help = "Pending, Scheduled, Live or Completed")]
        status: Option<String>,
        #[arg(long, help = "Meeting link (http or https)")]
        link: Option<String>,
        #[arg(long, conflicts_with = "link", help = "Remove the meeting link")]
        clear_link: bool,
    },
}

pub async fn handle(cmd: DoubtCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        DoubtCommands::List(args) => screen::list::<DoubtSolvingScreen>(args, COLUMNS, output_format).await,
        DoubtCommands::Show { id } => screen::show::<DoubtSolvingScreen>(&id, DETAIL, output_format).await,
        DoubtCommands::Update {
            id,
            status,
            link,
            clear_link,
        } => {
            let status = status
                .as_deref()
                .map(screen::parse_status::<SessionStatus>)
                .transpose()?;
            screen::edit::<DoubtSolvingScreen, _>(
                &id,
                |form| {
                    if let Some(status) = status {
                        form.status = status;
                    }
                    if clear_link {
                        form.meeting_link.clear();
                    } else if let Some(link) = link {
                        form.meeting_link = link;
                    }
                    Ok(())
                },
                output_format,
            )
            .await
        }
    }
}
