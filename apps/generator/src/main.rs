mod catalog;
mod config;
mod customize;
mod errors;
mod generation;
mod models;
mod render;
mod routes;
mod server;
mod state;
mod template;

use std::process::ExitCode;

use anyhow::bail;
use clap::{CommandFactory, FromArgMatches, Parser};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Settings;
use crate::errors::GeneratorError;
use crate::generation::generate_tailored_resume;
use crate::render::{ChromeRenderer, PageRenderer, RendererSettings};

/// Generate a tailored résumé PDF from a named configuration.
#[derive(Debug, Parser)]
#[command(name = "generate", version)]
struct Cli {
    /// Configuration name (file stem in the configs directory)
    name: Option<String>,

    /// Configuration name, as an alternative to the positional argument
    #[arg(short = 'c', long = "config", value_name = "NAME")]
    config: Option<String>,

    /// List available configurations with details
    #[arg(short, long)]
    list: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("❌ Invalid configuration: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    // Logs go to stderr; stdout is reserved for user-facing output.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_CRATE_NAME"),
                &settings.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let available = catalog::summarize_configs(&settings.configs_dir).await;
    let command = Cli::command().after_help(format!("Available configurations:\n{available}"));
    let cli = match command
        .try_get_matches()
        .and_then(|matches| Cli::from_arg_matches(&matches))
    {
        Ok(cli) => cli,
        Err(e) => {
            let informational = matches!(
                e.kind(),
                clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion
            );
            e.print().ok();
            return if informational {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            };
        }
    };

    let renderer = ChromeRenderer::new(RendererSettings::from_settings(&settings));
    match run(cli, &settings, &renderer).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

/// Dispatches a parsed command line. Every `Err` is a user-facing message and
/// maps to exit code 1.
async fn run(cli: Cli, settings: &Settings, renderer: &dyn PageRenderer) -> anyhow::Result<()> {
    if cli.list {
        println!("{}", catalog::describe_configs(&settings.configs_dir).await);
        return Ok(());
    }

    let Some(name) = cli.config.or(cli.name) else {
        bail!(
            "❌ Please specify a configuration name.\n\
             💡 Use --help to see available options and configurations."
        );
    };

    let config = match catalog::load_config(&settings.configs_dir, &name).await {
        Ok(config) => config,
        Err(e @ GeneratorError::ConfigNotFound { .. }) => {
            let hint = catalog::missing_config_hint(&settings.configs_dir).await;
            bail!("❌ {e}\n{hint}");
        }
        Err(e) => bail!("❌ {e}"),
    };

    println!("🚀 Generating tailored resume using '{name}' configuration...");
    if let Some(title) = &config.job_title {
        println!("📋 Job Title: {title}");
    }
    if let Some(company) = config
        .customizations
        .as_ref()
        .and_then(|c| c.company_name.as_deref())
    {
        println!("🏢 Company: {company}");
    }

    info!("Starting resume generator v{}", env!("CARGO_PKG_VERSION"));
    match generate_tailored_resume(settings, renderer, &config).await {
        Ok(path) => {
            println!("✅ Resume generated successfully!");
            println!("📍 Location: {}", path.display());
            Ok(())
        }
        Err(e) => bail!("❌ Error generating resume: {e}"),
    }
}
