use chrono::Utc;
use clap::Subcommand;
use serde_json::json;

use crate::cli::config::*;
use crate::cli::utils::*;
use crate::cli::OutputFormat;
use crate::config::config;

#[derive(Subcommand)]
pub enum ConfigCommands {
    #[command(about = "Show effective configuration")]
    Show,

    #[command(about = "Set the backend URL, or go back to the environment default")]
    SetUrl {
        #[arg(help = "Backend base URL, e.g. https://api.example.com")]
        url: Option<String>,
        #[arg(long, conflicts_with = "url", help = "Forget the saved URL")]
        clear: bool,
    },
}

pub async fn handle(cmd: ConfigCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        ConfigCommands::Show => {
            let settings = load_settings()?;
            let config_dir = get_config_dir()?;
            let app = config();

            match output_format {
                OutputFormat::Json => {
                    println!(
                        "{}",
                        serde_json::to_string_pretty(&json!({
                            "environment": app.environment,
                            "production": crate::is_production!(),
                            "api_url": settings.api_base_url(),
                            "api_url_source": if settings.api_url.is_some() { "settings" } else { "environment" },
                            "console_host": app.api.console_host,
                            "request_logging": app.api.enable_request_logging,
                            "page_size": app.view.page_size,
                            "config_dir": config_dir.display().to_string(),
                        }))?
                    );
                }
                OutputFormat::Text => {
                    println!("Environment: {:?}", app.environment);
                    println!("API URL: {}", settings.api_base_url());
                    if settings.api_url.is_some() {
                        println!("  (saved with 'vts config set-url')");
                    }
                    println!("Console host: {}", app.api.console_host);
                    println!("Request logging: {}", app.api.enable_request_logging);
                    if let Some(size) = app.view.page_size {
                        println!("Page size override: {}", size);
                    }
                    println!("Config directory: {}", config_dir.display());
                }
            }
            Ok(())
        }
        ConfigCommands::SetUrl { url, clear } => {
            let mut settings = load_settings()?;

            let api_url = match (url, clear) {
                (_, true) | (None, false) => None,
                (Some(raw), false) => {
                    let parsed = url::Url::parse(raw.trim())
                        .map_err(|e| anyhow::anyhow!("invalid URL '{}': {}", raw, e))?;
                    if !matches!(parsed.scheme(), "http" | "https") {
                        anyhow::bail!("URL must use http or https");
                    }
                    Some(raw.trim().trim_end_matches('/').to_string())
                }
            };

            settings.api_url = api_url;
            settings.updated_at = Some(Utc::now());
            save_settings(&settings)?;

            output_success(
                &output_format,
                &format!("API URL set to {}", settings.api_base_url()),
                Some(json!({ "api_url": settings.api_base_url() })),
            )
        }
    }
}
