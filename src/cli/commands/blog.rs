use clap::Subcommand;

use super::screen::{self, ListArgs};
use crate::cli::OutputFormat;
use crate::records::{BlogScreen, PublishPatch};

const COLUMNS: &[(&str, &str, usize)] = &[
    ("title", "TITLE", 36),
    ("author", "AUTHOR", 18),
    ("tags", "TAGS", 20),
    ("status", "STATUS", 10),
];

const DETAIL: &[(&str, &str)] = &[
    ("title", "Title"),
    ("slug", "Slug"),
    ("author", "Author"),
    ("excerpt", "Excerpt"),
    ("tags", "Tags"),
    ("createdAt", "Created"),
    ("updatedAt", "Updated"),
];

#[derive(Subcommand)]
pub enum BlogCommands {
    #[command(about = "List blog posts")]
    List(ListArgs),

    #[command(about = "Show one post")]
    Show {
        #[arg(help = "Post ID")]
        id: String,
    },

    #[command(about = "Publish a post")]
    Publish {
        #[arg(help = "Post ID")]
        id: String,
    },

    #[command(about = "Move a post back to draft")]
    Unpublish {
        #[arg(help = "Post ID")]
        id: String,
    },

    #[command(about = "Delete a post")]
    Delete {
        #[arg(help = "Post ID")]
        id: String,
        #[arg(long, short, help = "Skip the confirmation prompt")]
        yes: bool,
    },
}

pub async fn handle(cmd: BlogCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        BlogCommands::List(args) => screen::list::<BlogScreen>(args, COLUMNS, output_format).await,
        BlogCommands::Show { id } => screen::show::<BlogScreen>(&id, DETAIL, output_format).await,
        BlogCommands::Publish { id } => {
            screen::apply::<BlogScreen>(&id, PublishPatch { is_published: true }, output_format).await
        }
        BlogCommands::Unpublish { id } => {
            screen::apply::<BlogScreen>(&id, PublishPatch { is_published: false }, output_format).await
        }
        BlogCommands::Delete { id, yes } => screen::remove::<BlogScreen>(&id, yes, output_format).await,
    }
}
