use clap::Subcommand;

use super::screen::{self, ListArgs};
use crate::cli::OutputFormat;
use crate::records::{MentorScreen, MentorStatus};

const COLUMNS: &[(&str, &str, usize)] = &[
    ("name", "NAME", 20),
    ("designation", "DESIGNATION", 22),
    ("company", "COMPANY", 16),
    ("expertise", "EXPERTISE", 24),
    ("status", "STATUS", 8),
];

const DETAIL: &[(&str, &str)] = &[
    ("name", "Name"),
    ("designation", "Designation"),
    ("company", "Company"),
    ("expertise", "Expertise"),
    ("createdAt", "Added"),
];

#[derive(Subcommand)]
pub enum MentorCommands {
    #[command(about = "List mentors")]
    List(ListArgs),

    #[command(about = "Show one mentor")]
    Show {
        #[arg(help = "Mentor ID")]
        id: String,
    },

    #[command(about = "Edit a mentor profile")]
    Edit {
        #[arg(help = "Mentor ID")]
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        designation: Option<String>,
        #[arg(long)]
        company: Option<String>,
        #[arg(long, help = "Comma-separated list")]
        expertise: Option<String>,
        #[arg(long, help = "Display order, 1 or more")]
        order: Option<String>,
        #[arg(long, help = "Active or Inactive")]
        status: Option<String>,
    },
}

pub async fn handle(cmd: MentorCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        MentorCommands::List(args) => screen::list::<MentorScreen>(args, COLUMNS, output_format).await,
        MentorCommands::Show { id } => screen::show::<MentorScreen>(&id, DETAIL, output_format).await,
        MentorCommands::Edit {
            id,
            name,
            designation,
            company,
            expertise,
            order,
            status,
        } => {
            let status = status
                .as_deref()
                .map(screen::parse_status::<MentorStatus>)
                .transpose()?;
            screen::edit::<MentorScreen, _>(
                &id,
                |form| {
                    if let Some(v) = name {
                        form.name = v;
                    }
                    if let Some(v) = designation {
                        form.designation = v;
                    }
                    if let Some(v) = company {
                        form.company = v;
                    }
                    if let Some(v) = expertise {
                        form.expertise = v;
                    }
                    if let Some(v) = order {
                        form.order = v;
                    }
                    if let Some(status) = status {
                        form.is_active = status == MentorStatus::Active;
                    }
                    Ok(())
                },
                output_format,
            )
            .await
        }
    }
}
