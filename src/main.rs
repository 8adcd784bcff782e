use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use portfolio::catalog::{self, ProjectCategory};
use portfolio::contact::{ContactForm, ContactPipeline, RelayClient, SubmitOutcome};
use portfolio::config::{Config, DEFAULT_GITHUB_API, DEFAULT_RELAY_ENDPOINT};
use portfolio::svg::{self, Theme};
use portfolio::{FetchPhase, GithubClient, StatsLoader};

#[derive(Parser)]
#[command(name = "portfolio")]
#[command(version, about = "Portfolio site data: GitHub stats card, contact relay, project gallery")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Base URL of the profile endpoint
    #[arg(long, global = true, env = "PORTFOLIO_GITHUB_API", default_value = DEFAULT_GITHUB_API)]
    github_api: String,

    /// Form relay endpoint
    #[arg(long, global = true, env = "PORTFOLIO_RELAY_URL", default_value = DEFAULT_RELAY_ENDPOINT)]
    relay: String,

    /// GitHub token for a higher rate limit
    #[arg(long, global = true, env = "ACCESS_TOKEN", hide_env_values = true)]
    token: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch profile statistics and render the stats card
    Stats {
        username: String,

        /// Directory for dark_mode.svg and light_mode.svg
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },

    /// Validate and send a contact message
    Contact {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        message: String,
    },

    /// List the project gallery
    Projects {
        /// All, React, UI/UX or Open Source
        #[arg(long, default_value = "All")]
        category: ProjectCategory,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("portfolio=info")),
        )
        .init();

    match run(Cli::parse()).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let config = Config::default()
        .with_github_api(cli.github_api)
        .with_relay_endpoint(cli.relay)
        .with_access_token(cli.token);

    match cli.command {
        Commands::Stats { username, out_dir } => stats(config, &username, &out_dir).await,
        Commands::Contact {
            name,
            email,
            message,
        } => contact(config, ContactForm::new(name, email, message)).await,
        Commands::Projects { category } => {
            let all = catalog::projects();
            for project in catalog::filter_projects(&all, category) {
                println!(
                    "{:>2}. {} [{}] {}",
                    project.id,
                    project.title,
                    project.category,
                    project.tech.join(", ")
                );
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn stats(config: Config, username: &str, out_dir: &Path) -> Result<ExitCode> {
    let client = GithubClient::new(config)?;
    let mut loader = StatsLoader::new(client);
    loader.load(username);
    let state = loader.settled().await;

    if state.phase == FetchPhase::Errored {
        info!("rendering zero-valued card; see the error above");
    }

    fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create {}", out_dir.display()))?;
    for theme in [Theme::Dark, Theme::Light] {
        let Some(card) = svg::render_stats_card(&state, theme) else {
            continue;
        };
        let path = out_dir.join(theme.file_name());
        fs::write(&path, card).with_context(|| format!("Failed to write {}", path.display()))?;
    }

    println!(
        "Generated {} and {} successfully.",
        Theme::Dark.file_name(),
        Theme::Light.file_name()
    );
    Ok(ExitCode::SUCCESS)
}

async fn contact(config: Config, form: ContactForm) -> Result<ExitCode> {
    let relay = RelayClient::new(&config)?;
    let mut pipeline = ContactPipeline::new(relay);
    pipeline.set_form(form);

    match pipeline.submit().await {
        SubmitOutcome::Invalid => {
            for (field, message) in pipeline.errors().iter() {
                eprintln!("{field}: {message}");
            }
            Ok(ExitCode::from(2))
        }
        SubmitOutcome::Sent => {
            println!("Message sent successfully! I'll get back to you soon.");
            Ok(ExitCode::SUCCESS)
        }
        SubmitOutcome::Failed => {
            eprintln!("Message could not be sent. Please try again.");
            Ok(ExitCode::FAILURE)
        }
    }
}
