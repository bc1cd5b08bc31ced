use std::process::ExitCode;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, error};
use widget_api::logging::{init_logging_with_level, LoggingMode};
use widget_api::{Action, ControllerConfig, ErrorKind, Filter, ParamValue, Response, WidgetController, WidgetError};

/// Widget CLI
///
/// Finds widgets on a running UI-automation server and performs actions on
/// them, polling until the widget is ready or the timeout runs out.
#[derive(Parser, Debug)]
#[command(name = "widget-cli")]
#[command(about = "Find and drive widgets on a UI-automation server")]
#[command(version)]
pub struct Args {
    /// Widget server host
    #[arg(long, env = "WIDGET_HOST", default_value = "localhost")]
    pub host: String,

    /// Widget server port
    #[arg(short, long, env = "WIDGET_PORT", default_value = "9999")]
    pub port: u16,

    /// Polling timeout in seconds
    #[arg(short, long, env = "WIDGET_TIMEOUT", default_value = "5")]
    pub timeout: f64,

    /// Seconds between polling attempts
    #[arg(short, long, env = "WIDGET_INTERVAL", default_value = "0.5")]
    pub interval: f64,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, env = "WIDGET_LOG_LEVEL", default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Find a widget and print its description
    Find {
        /// Filter criterion as key=value (repeatable)
        #[arg(short, long = "filter", value_parser = parse_pair, required = true)]
        filter: Vec<(String, ParamValue)>,
    },
    /// Perform an action on a widget
    Action {
        /// Filter criterion as key=value (repeatable)
        #[arg(short, long = "filter", value_parser = parse_pair, required = true)]
        filter: Vec<(String, ParamValue)>,

        /// Action parameter as key=value (repeatable), e.g. action=press
        #[arg(short, long = "action", value_parser = parse_pair, required = true)]
        action: Vec<(String, ParamValue)>,
    },
}

impl Args {
    /// Validate command line arguments
    pub fn validate(&self) -> Result<()> {
        match self.log_level.to_lowercase().as_str() {
            "error" | "warn" | "info" | "debug" | "trace" => {}
            _ => {
                return Err(anyhow!(
                    "Invalid log level '{}'. Valid levels: error, warn, info, debug, trace",
                    self.log_level
                ));
            }
        }

        self.config().validate().context("Invalid connection settings")?;
        Ok(())
    }

    pub fn config(&self) -> ControllerConfig {
        ControllerConfig {
            host: self.host.clone(),
            port: self.port,
            timeout: self.timeout,
            interval: self.interval,
        }
    }
}

/// Parse `key=value`; the value's type is inferred (bool, integer, float, text)
fn parse_pair(s: &str) -> std::result::Result<(String, ParamValue), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{}'", s))?;

    if key.is_empty() {
        return Err(format!("empty key in '{}'", s));
    }

    let value = value.parse().map_err(|e| format!("{:?}", e))?;
    Ok((key.to_string(), value))
}

/// Verbose levels get source locations, everything else compact output
fn logging_mode(log_level: &str) -> LoggingMode {
    match log_level.to_lowercase().as_str() {
        "debug" | "trace" => LoggingMode::Debug,
        _ => LoggingMode::Development,
    }
}

fn run(args: &Args) -> Result<Response, WidgetError> {
    let controller = WidgetController::from_config(&args.config())
        .map_err(|e| WidgetError::InvalidArgument(e.to_string()))?;

    match &args.command {
        Command::Find { filter } => {
            let filter: Filter = filter.iter().cloned().collect();
            debug!(?filter, "finding widget");
            controller.find_with_defaults(&filter)
        }
        Command::Action { filter, action } => {
            let filter: Filter = filter.iter().cloned().collect();
            let action: Action = action.iter().cloned().collect();
            debug!(?filter, ?action, "sending action");
            controller.send_action_with_defaults(&filter, &action)
        }
    }
}

/// Pretty-print JSON bodies, pass anything else through unchanged
fn render(response: &Response) -> String {
    response
        .json::<serde_json::Value>()
        .ok()
        .and_then(|value| serde_json::to_string_pretty(&value).ok())
        .unwrap_or_else(|| response.body().to_string())
}

fn exit_code(error: &WidgetError) -> u8 {
    match error.kind() {
        ErrorKind::WidgetNotFound => 2,
        ErrorKind::ItemNotFoundInWidget => 3,
        ErrorKind::Generic => 1,
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(e) = args.validate() {
        eprintln!("Error: {:#}", e);
        return ExitCode::from(64);
    }

    if let Err(e) = init_logging_with_level(logging_mode(&args.log_level), &args.log_level.to_lowercase()) {
        eprintln!("Warning: {}", e);
    }

    match run(&args) {
        Ok(response) => {
            println!("{}", render(&response));
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(kind = ?e.kind(), "{}", e);
            eprintln!("Error: {}", e);
            ExitCode::from(exit_code(&e))
        }
    }
}
