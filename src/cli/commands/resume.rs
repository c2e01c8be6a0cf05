use clap::Subcommand;

use super::screen::{self, ListArgs};
use crate::cli::OutputFormat;
use crate::records::{ResumeReviewScreen, ReviewStatus};

const COLUMNS: &[(&str, &str, usize)] = &[
    ("name", "NAME", 20),
    ("email", "EMAIL", 26),
    ("targetRole", "TARGET ROLE", 18),
    ("assignedMentor", "MENTOR", 16),
    ("status", "STATUS", 12),
];

const DETAIL: &[(&str, &str)] = &[
    ("name", "Name"),
    ("email", "Email"),
    ("phone", "Phone"),
    ("targetRole", "Target role"),
    ("resumeUrl", "Resume"),
    ("assignedMentor", "Mentor"),
    ("createdAt", "Requested"),
];

#[derive(Subcommand)]
pub enum ResumeCommands {
    #[command(about = "List resume review requests")]
    List(ListArgs),

    #[command(about = "Show one request")]
    Show {
        #[arg(help = "Request ID")]
        id: String,
    },

    #[command(about = "Assign a mentor and/or change status")]
    Assign {
        #[arg(help = "Request ID")]
        id: String,
        #[arg(long, help = "Mentor name")]
        mentor: Option<String>,
        #[arg(long, help = "Pending, In Progress or Completed")]
        status: Option<String>,
    },
}

pub async fn handle(cmd: ResumeCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        ResumeCommands::List(args) => screen::list::<ResumeReviewScreen>(args, COLUMNS, output_format).await,
        ResumeCommands::Show { id } => screen::show::<ResumeReviewScreen>(&id, DETAIL, output_format).await,
        ResumeCommands::Assign { id, mentor, status } => {
            let status = status
                .as_deref()
                .map(screen::parse_status::<ReviewStatus>)
                .transpose()?;
            screen::edit::<ResumeReviewScreen, _>(
                &id,
                |form| {
                    if let Some(mentor) = mentor {
                        form.assigned_mentor = mentor;
                    }
                    if let Some(status) = status {
                        form.status = status;
                    }
                    Ok(())
                },
                output_format,
            )
            .await
        }
    }
}
