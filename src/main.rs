//! nyan-handler command line entry point
//!
//! Runs the `addNumber` handler once against a parameter bag given on the
//! command line or stdin and prints the result envelope to stdout.

use clap::{Parser, Subcommand};
use nyan_handler::config::HandlerConfig;
use nyan_handler::error::HandlerResult;
use nyan_handler::handlers::{AddNumberHandler, Handler};
use nyan_handler::host::LocalHost;
use nyan_handler::observability::init_default_logging;
use nyan_handler::params::ParameterBag;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process;
use tracing::{error, info};

/// Sandboxed numeric addition handler
#[derive(Parser)]
#[command(name = "nyan-handler")]
#[command(about = "Validate addNumber, add 2 and print a JSON result envelope")]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Invoke the handler once
    Run {
        /// Parameter bag as a JSON object; read from stdin when omitted
        #[arg(long, env = "NYAN_ALL_PARAMS")]
        params: Option<String>,

        /// Client address exposed to the handler, overrides the config
        #[arg(long)]
        client_ip: Option<String>,
    },
    /// Print the handler description
    Describe,
    /// Validate configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    init_default_logging();

    let config = match load_configuration(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Run { params, client_ip } => run_handler(&config, params, client_ip),
        Commands::Describe => describe_handler(&config),
        Commands::Config { show } => handle_config_command(&config, show),
    };

    if let Err(e) = result {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

fn load_configuration(config_path: &Option<PathBuf>) -> HandlerResult<HandlerConfig> {
    if let Some(path) = config_path {
        info!("Loading configuration from: {}", path.display());
        return Ok(HandlerConfig::load_from_file(path)?);
    }

    for path_str in ["handler.toml", "config/handler.toml"] {
        let path = PathBuf::from(path_str);
        if path.exists() {
            info!("Loading configuration from: {}", path.display());
            return Ok(HandlerConfig::load_from_file(&path)?);
        }
    }

    info!("No configuration file found, using defaults");
    Ok(HandlerConfig::default())
}

fn run_handler(
    config: &HandlerConfig,
    params: Option<String>,
    client_ip: Option<String>,
) -> HandlerResult<()> {
    let raw = match params {
        Some(raw) => raw,
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };
    let params = ParameterBag::from_json_str(&raw)?;

    let mut host = LocalHost::from_config(&config.host);
    if client_ip.is_some() {
        host = host.with_client_ip(client_ip);
    }

    let handler = AddNumberHandler::from_config(config);
    println!("{}", handler.handle(&params, &host));
    Ok(())
}

fn describe_handler(config: &HandlerConfig) -> HandlerResult<()> {
    let description = AddNumberHandler::from_config(config).describe();
    println!("{}", serde_json::to_string_pretty(&description)?);
    Ok(())
}

fn handle_config_command(config: &HandlerConfig, show: bool) -> HandlerResult<()> {
    if show {
        println!("Current configuration:");
        println!("{}", toml::to_string_pretty(config)?);
    }

    info!("Configuration validation complete");
    Ok(())
}
