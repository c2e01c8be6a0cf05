use anyhow::Context;
use clap::Subcommand;
use serde_json::json;
use url::Url;

use crate::auth::{login, logout, CredentialValidator, LoginError, LoginRequest};
use crate::cli::config::{credential_store, http_client};
use crate::cli::utils::*;
use crate::cli::OutputFormat;
use crate::session::{consume_entry_token, GuardOutcome, Route, RouteGuard};

#[derive(Subcommand)]
pub enum AuthCommands {
    #[command(about = "Login with an admin account")]
    Login {
        #[arg(help = "Username")]
        username: String,
        #[arg(long, help = "Password (will prompt if not provided)")]
        password: Option<String>,
    },

    #[command(about = "Forget the stored credential")]
    Logout,

    #[command(about = "Show current authentication status")]
    Status,

    #[command(about = "Take a credential from an entry URL carrying ?token=")]
    Bootstrap {
        #[arg(help = "Entry URL")]
        url: String,
    },
}

pub async fn handle(cmd: AuthCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        AuthCommands::Login { username, password } => {
            let password = match password {
                Some(p) => p,
                None => prompt_line("Password: ")?,
            };

            let store = credential_store()?;
            let client = http_client(None)?;

            match login(&client, &store, &LoginRequest::new(username.as_str(), password)).await {
                Ok(claims) => {
                    let who = claims.display_name().unwrap_or(username.as_str()).to_string();
                    output_success(
                        &output_format,
                        &format!("Logged in as {}", who),
                        Some(json!({ "user": who, "role": claims.role })),
                    )
                }
                Err(e) => {
                    let code = match &e {
                        LoginError::MissingFields => "MISSING_FIELDS",
                        LoginError::InvalidCredentials => "INVALID_CREDENTIALS",
                        LoginError::AccessDenied => "ACCESS_DENIED",
                        LoginError::InvalidToken(_) => "INVALID_TOKEN",
                        LoginError::Api(api) => api.error_code(),
                        LoginError::Store(_) => "STORE_ERROR",
                    };
                    if let OutputFormat::Json = output_format {
                        output_error(&output_format, &e.to_string(), Some(code))?;
                    }
                    Err(e.into())
                }
            }
        }
        AuthCommands::Logout => {
            let store = credential_store()?;
            logout(&store).context("failed to clear stored credential")?;
            output_success(&output_format, "Logged out", None)
        }
        AuthCommands::Status => {
            let store = credential_store()?;
            match RouteGuard::new(&store).check(Route::Home) {
                GuardOutcome::Render(claims) => {
                    let claims = claims.unwrap_or_default();
                    match output_format {
                        OutputFormat::Json => {
                            println!(
                                "{}",
                                serde_json::to_string_pretty(&json!({
                                    "authenticated": true,
                                    "user": claims.display_name(),
                                    "role": claims.role,
                                    "expires_at": claims.exp,
                                }))?
                            );
                        }
                        OutputFormat::Text => {
                            println!("Logged in as {}", claims.display_name().unwrap_or("(unnamed)"));
                            println!("Role: {}", claims.role.as_deref().unwrap_or("-"));
                            if let Some(exp) = claims.exp.and_then(|t| chrono::DateTime::<chrono::Utc>::from_timestamp(t, 0)) {
                                println!("Expires: {}", exp.format("%Y-%m-%d %H:%M:%S UTC"));
                            }
                        }
                    }
                    Ok(())
                }
                GuardOutcome::Redirect { reason, .. } => {
                    match output_format {
                        OutputFormat::Json => {
                            println!(
                                "{}",
                                serde_json::to_string_pretty(&json!({
                                    "authenticated": false,
                                    "reason": reason,
                                    "message": reason.message(),
                                }))?
                            );
                        }
                        OutputFormat::Text => println!("Not logged in: {}", reason.message()),
                    }
                    Ok(())
                }
            }
        }
        AuthCommands::Bootstrap { url } => {
            let entry = Url::parse(&url).with_context(|| format!("invalid URL '{}'", url))?;
            let store = credential_store()?;
            let result = consume_entry_token(&entry, &store, &CredentialValidator::new())?;

            let message = if result.stored {
                "Credential stored from entry URL"
            } else {
                "No usable credential on entry URL"
            };
            output_success(
                &output_format,
                message,
                Some(json!({ "stored": result.stored, "url": result.url.as_str() })),
            )?;
            if matches!(output_format, OutputFormat::Text) {
                println!("{}", result.url);
            }
            Ok(())
        }
    }
}
