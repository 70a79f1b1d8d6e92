use std::process::ExitCode;

use tokio::sync::mpsc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use timetable_poller::config::PollConfig;
use timetable_poller::digitransit::{ClientConfig, TimetableClient};
use timetable_poller::poller::{Command, Event, Poller};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.json".to_string());
    let config = match PollConfig::from_file(&config_path) {
        Ok(config) => config,
        Err(e) => {
            error!(path = %config_path, error = %e, "could not load configuration");
            return ExitCode::FAILURE;
        }
    };

    let client = match TimetableClient::new(ClientConfig::default()) {
        Ok(client) => client,
        Err(e) => {
            error!(error = %e, "could not build HTTP client");
            return ExitCode::FAILURE;
        }
    };

    let (command_tx, command_rx) = mpsc::channel(4);
    let (event_tx, mut event_rx) = mpsc::channel(16);

    // Stand-in for the display layer: one JSON line per timetable on
    // stdout, logs on stderr.
    tokio::spawn(async move {
        while let Some(event) = event_rx.recv().await {
            let Event::Timetable(timetable) = event;
            match serde_json::to_string(&timetable) {
                Ok(line) => println!("{line}"),
                Err(e) => error!(error = %e, "could not serialize timetable"),
            }
        }
    });

    info!(path = %config_path, stops = config.stops.len(), "starting poller");
    if command_tx.send(Command::Configure(config)).await.is_err() {
        error!("poller stopped before it was configured");
        return ExitCode::FAILURE;
    }

    let poller = Poller::new(client, command_rx, event_tx);
    tokio::select! {
        () = poller.run() => {
            error!("poller stopped unexpectedly");
            ExitCode::FAILURE
        }
        _ = tokio::signal::ctrl_c() => {
            info!("interrupt received, shutting down");
            ExitCode::SUCCESS
        }
    }
}
