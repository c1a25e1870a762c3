mod commands;
mod config;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
#[command(name = "msg-composer")]
#[command(about = "Compose MsgExecuteContract envelopes for the Commerce and Trust contracts", long_about = None)]
struct Cli {
    /// Address signing the transaction
    #[arg(long, global = true, env = "COMPOSER_SENDER")]
    sender: Option<String>,

    /// Address of the target contract
    #[arg(long, global = true, env = "COMPOSER_CONTRACT")]
    contract: Option<String>,

    /// Config file (defaults to ~/.msg-composer.toml)
    #[arg(long, global = true, env = "COMPOSER_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the execute envelope for one contract action
    Compose {
        /// Contract schema file (schema/<contract>.json)
        #[arg(long)]
        schema: PathBuf,

        /// Action method name, camelCase or snake_case
        #[arg(long)]
        action: String,

        /// Action arguments as a JSON object with camelCase keys
        #[arg(long, default_value = "{}")]
        args: String,

        /// Funds to attach, e.g. 100uatom,5ujuno
        #[arg(long)]
        funds: Option<String>,

        /// Output format: json, yaml or payload
        #[arg(long, default_value = "json")]
        format: String,
    },

    /// List the actions a contract schema declares
    Actions {
        /// Contract schema file (schema/<contract>.json)
        #[arg(long)]
        schema: PathBuf,

        /// Output format: human or json
        #[arg(long, default_value = "human")]
        format: String,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let output = match cli.command {
        Commands::Compose {
            schema,
            action,
            args,
            funds,
            format,
        } => {
            let config = config::resolve(cli.sender, cli.contract, cli.config.as_deref())?;
            commands::compose(&config, &schema, &action, &args, funds.as_deref(), &format)?
        }
        Commands::Actions { schema, format } => commands::actions(&schema, &format)?,
    };

    println!("{}", output);
    Ok(())
}
