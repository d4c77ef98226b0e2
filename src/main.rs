//! unibrowser-sync: mirrors browser bookmarks to a remote collector.
//!
//! `run` keeps the agent alive: the auto-sync alarm plus a newline-delimited
//! JSON message bus on stdin/stdout. The other commands are one-shot.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use serde_json::{json, Map, Value};
use tokio::io::BufReader;
use tokio::signal;
use tracing_subscriber::EnvFilter;

use unibrowser_sync::app::{self, App, ConfigOverrides};
use unibrowser_sync::event_loop;
use unibrowser_sync::platform::host::HostEvent;
use unibrowser_sync::services::settings_store::SettingsStoreTrait;
use unibrowser_sync::types::config::{AgentConfig, HostDialect};
use unibrowser_sync::types::errors::unpack_error;
use unibrowser_sync::types::message::SYNC_BOOKMARKS;
use unibrowser_sync::types::settings::SettingsMap;

#[derive(Parser, Debug)]
#[command(name = "unibrowser-sync", version, about = "Mirror browser bookmarks to a remote collector")]
struct Cli {
    /// Config file (default: <config dir>/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Browser whose profile is read
    #[arg(long, value_enum, global = true)]
    host: Option<HostDialect>,

    /// Browser profile directory
    #[arg(long, global = true)]
    profile: Option<PathBuf>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the agent until stdin closes or Ctrl-C
    Run,
    /// Upload the bookmark tree once
    Sync {
        #[arg(long)]
        browser_name: Option<String>,
        #[arg(long)]
        device_name: Option<String>,
        #[arg(long)]
        profile_name: Option<String>,
    },
    /// Print the flattened bookmark records without uploading
    Flatten,
    /// Inspect or change the persisted settings
    Settings {
        #[command(subcommand)]
        action: SettingsCommand,
    },
}

#[derive(Subcommand, Debug)]
enum SettingsCommand {
    /// Print stored settings, all of them when no key is given
    Get { keys: Vec<String> },
    /// Store VALUE (parsed as JSON, otherwise kept as a string) under KEY
    Set { key: String, value: String },
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.json_logs);

    let overrides = ConfigOverrides {
        host: cli.host,
        profile: cli.profile.clone(),
    };
    let config = app::load_config(cli.config.as_deref(), &overrides).unwrap_or_else(|e| {
        tracing::error!(error = %e, path = ?cli.config, "failed to load config file");
        std::process::exit(1);
    });

    let code = match cli.command {
        Command::Run => run_agent(config).await,
        Command::Sync {
            browser_name,
            device_name,
            profile_name,
        } => sync_once(config, browser_name, device_name, profile_name).await,
        Command::Flatten => flatten(&config),
        Command::Settings { action } => settings(&config, action),
    };
    std::process::exit(code);
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // stdout carries message replies
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn run_agent(config: AgentConfig) -> i32 {
    let (app, events) = match App::new(config) {
        Ok(wired) => wired,
        Err(e) => {
            tracing::error!(error = %unpack_error(e.as_ref()), "failed to start agent");
            return 1;
        }
    };

    let lifecycle = app.initial_lifecycle();
    if app.event_sender().send(HostEvent::Lifecycle(lifecycle)).is_err() {
        return 1;
    }

    println!("{}", json!({"event": "ready", "version": env!("CARGO_PKG_VERSION")}));
    tracing::info!(?lifecycle, "unibrowser-sync running");

    let bus = tokio::spawn(event_loop::serve_messages(
        BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
        app.event_sender(),
    ));
    let shutdown = async move {
        tokio::select! {
            finished = bus => match finished {
                Ok(Ok(())) => tracing::info!("stdin closed"),
                Ok(Err(e)) => tracing::error!(error = %e, "message bus failed"),
                Err(e) => tracing::error!(error = %e, "message bus panicked"),
            },
            _ = signal::ctrl_c() => tracing::info!("ctrl+c signal received, shutting down"),
        }
    };

    event_loop::run(Arc::clone(&app.router), events, shutdown).await;
    app.host.alarms().clear_all();
    tracing::info!("unibrowser-sync stopped");
    0
}

async fn sync_once(
    config: AgentConfig,
    browser_name: Option<String>,
    device_name: Option<String>,
    profile_name: Option<String>,
) -> i32 {
    let (app, _events) = match App::new(config) {
        Ok(wired) => wired,
        Err(e) => {
            tracing::error!(error = %unpack_error(e.as_ref()), "failed to start agent");
            return 1;
        }
    };

    let mut meta = Map::new();
    for (key, value) in [
        ("browser_name", browser_name),
        ("device_name", device_name),
        ("profile_name", profile_name),
    ] {
        if let Some(v) = value {
            meta.insert(key.to_string(), Value::String(v));
        }
    }
    let message = json!({"type": SYNC_BOOKMARKS, "meta": meta});

    match app.router.on_message(&message).await {
        Some(reply) => {
            let ok = reply.ok;
            match serde_json::to_string(&reply) {
                Ok(line) => println!("{}", line),
                Err(e) => tracing::error!(error = %e, "failed to encode reply"),
            }
            if ok {
                0
            } else {
                1
            }
        }
        None => 1,
    }
}

fn flatten(config: &AgentConfig) -> i32 {
    let records = match app::read_records(config) {
        Ok(records) => records,
        Err(e) => {
            tracing::error!(error = %unpack_error(e.as_ref()), "failed to read bookmarks");
            return 1;
        }
    };
    tracing::info!(records = records.len(), "bookmarks flattened");
    match serde_json::to_string_pretty(&records) {
        Ok(out) => {
            println!("{}", out);
            0
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to encode records");
            1
        }
    }
}

fn settings(config: &AgentConfig, action: SettingsCommand) -> i32 {
    let store = app::settings_store(config);
    let result = match action {
        SettingsCommand::Get { keys } => {
            let loaded = if keys.is_empty() {
                store.get_all()
            } else {
                let keys: Vec<&str> = keys.iter().map(String::as_str).collect();
                store.get(&keys)
            };
            loaded.map(|values| println!("{}", Value::Object(values)))
        }
        SettingsCommand::Set { key, value } => {
            let value = serde_json::from_str::<Value>(&value).unwrap_or(Value::String(value));
            let mut values = SettingsMap::new();
            values.insert(key, value);
            store.set(values)
        }
    };

    match result {
        Ok(()) => 0,
        Err(e) => {
            tracing::error!(error = %e, path = %store.path().display(), "settings command failed");
            1
        }
    }
}
