/*
[INPUT]:  CLI arguments, YAML configuration file, terminal input
[OUTPUT]: Wallet session driven interactively or by a scripted action list
[POS]:    Binary entry point
[UPDATE]: When changing CLI flags or the startup flow
*/

mod actions;
mod config;
mod interactive;
mod render;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use wepin_session::{ChannelNotifier, Sandbox, ScriptedInput, SessionManager};

use crate::actions::Action;
use crate::config::CliConfig;

#[derive(Parser, Debug)]
#[command(name = "wepin-session-cli", version, about = "Wepin wallet session console")]
struct Cli {
    #[arg(long = "config", value_name = "PATH")]
    config_path: Option<PathBuf>,
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "info")]
    log_level: String,
    #[arg(long = "dry-run")]
    dry_run: bool,
    /// Run these actions in order instead of the interactive menu
    #[arg(long = "action", value_enum, value_name = "ACTION")]
    actions: Vec<Action>,
    /// Message answered to the sign prompt
    #[arg(long)]
    message: Option<String>,
    /// Recipient answered to the send prompt
    #[arg(long)]
    to: Option<String>,
    /// Amount in ETH answered to the send prompt
    #[arg(long)]
    amount: Option<String>,
}

impl Cli {
    /// Canned answers for the dialog behind `action`; a missing flag cancels
    fn scripted_input(&self, action: Action) -> ScriptedInput {
        let answers = match action {
            Action::SignMessage => vec![self.message.clone()],
            Action::SendTransaction => vec![self.to.clone(), self.amount.clone()],
            _ => Vec::new(),
        };
        let input = ScriptedInput::default();
        for answer in answers {
            match answer {
                Some(text) => input.push_answer(text),
                None => input.push_cancel(),
            }
        }
        input
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    init_tracing(&args.log_level)?;

    let config_path = match &args.config_path {
        Some(path) => path.clone(),
        None => CliConfig::default_path()?,
    };
    info!(
        config_path = %config_path.display(),
        dry_run = args.dry_run,
        "starting wepin-session-cli"
    );

    let config = load_config(&config_path)?;
    let sandbox = Sandbox::new(config.session.credentials.clone(), config.sandbox.clone())
        .context("build sandbox services")?;
    info!(
        network = %config.session.network,
        signer = %sandbox.signer_address(),
        "configuration loaded"
    );

    if args.dry_run {
        info!("dry-run requested; configuration validated");
        return Ok(());
    }

    let (notifier, mut notices) = ChannelNotifier::new();
    let manager = SessionManager::new(sandbox.services(), config.session, Arc::new(notifier))
        .context("create session")?;

    // Startup initialization; a failure is reported and the session stays usable.
    if let Ok(status) = manager.initialize().await {
        println!("Initialized, status: {status}");
    }
    interactive::drain_notices(&mut notices);

    if args.actions.is_empty() {
        return interactive::run_interactive(&manager, &mut notices).await;
    }

    for &action in &args.actions {
        let input = args.scripted_input(action);
        let result = actions::execute(&manager, action, &input).await;
        interactive::drain_notices(&mut notices);
        if let Some(line) = actions::summary_line(action, &result) {
            println!("{line}");
        }
    }

    let snapshot = serde_json::to_string_pretty(&manager.snapshot()).context("encode snapshot")?;
    println!("{snapshot}");
    Ok(())
}

fn init_tracing(log_level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(log_level).context("invalid log level")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow!(err))
        .context("initialize tracing subscriber")?;
    Ok(())
}

fn load_config(path: &PathBuf) -> Result<CliConfig> {
    CliConfig::from_file(path).context("load config")
}
