use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use intake_core::SUPPORTED_ISSUERS;
use intake_ingest::{IntakeController, StubExtractor};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

mod candidate;
mod config;
mod home;
mod parse_cmd;
mod render;
mod tui;

#[derive(Parser, Debug)]
#[command(name = "intake", version, about = "Credit card statement intake")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Select a statement file and show the extracted fields
    Parse {
        path: PathBuf,

        /// Declared MIME type (default: guessed from the file extension)
        #[arg(long)]
        mime: Option<String>,

        /// Print the result as JSON instead of the rendered panels
        #[arg(long)]
        json: bool,

        /// Override the extraction delay from config
        #[arg(long)]
        delay_ms: Option<u64>,
    },

    /// List the supported card issuers
    Issuers,

    /// Interactive intake screen
    Tui,

    /// Manage ~/.statement-intake/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write the default config unless one exists
    Init,
    /// Print the effective config
    Show,
    /// Print the config file location
    Path,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // The interactive screen owns the terminal, so it gets no log output.
    if !matches!(cli.command, Command::Tui) {
        init_tracing();
    }

    match cli.command {
        Command::Parse {
            path,
            mime,
            json,
            delay_ms,
        } => {
            let cfg = config::load_config()?;
            let delay = delay_ms
                .map(Duration::from_millis)
                .unwrap_or_else(|| cfg.extraction_delay());
            let opts = parse_cmd::ParseOptions {
                path: &path,
                mime: mime.as_deref(),
                json,
                delay,
            };
            parse_cmd::run_parse(&mut std::io::stdout().lock(), &opts, cfg.intake_settings())
                .await?;
        }

        Command::Issuers => {
            for issuer in SUPPORTED_ISSUERS {
                println!("{issuer}");
            }
        }

        Command::Tui => {
            let cfg = config::load_config()?;
            let controller = IntakeController::new(
                Arc::new(StubExtractor::new(cfg.extraction_delay())),
                cfg.intake_settings(),
            );
            let handle = tokio::runtime::Handle::current();
            tokio::task::block_in_place(|| tui::run_tui(handle, controller))?;
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => {
                let cfg = config::load_config()?;
                print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
            }
            ConfigCommand::Path => println!("{}", config::config_path()?.display()),
        },
    }

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
