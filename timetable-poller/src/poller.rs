//! Poll scheduling.
//!
//! A single task owns all timer state. Each cycle fetches every configured
//! stop concurrently, waits for the whole cycle to settle, and only then
//! arms the next deadline: `retryDelay` when any stop failed, otherwise
//! `updateInterval`. Rescheduling exactly once per cycle keeps two cycles
//! from ever being pending at the same time.

use std::future;
use std::time::Duration;

use futures::future::join_all;
use tokio::sync::mpsc;
use tokio::time::{self, Instant};
use tracing::{debug, error, info};

use crate::config::PollConfig;
use crate::digitransit::StopSource;
use crate::domain::TimetableResult;

/// Control messages accepted by the poller.
#[derive(Debug)]
pub enum Command {
    /// (Re)start polling with this configuration, beginning at its
    /// `initialLoadDelay`. Any armed deadline is discarded first.
    Configure(PollConfig),
}

/// Messages emitted by the poller.
#[derive(Debug, Clone)]
pub enum Event {
    /// A fresh timetable for one stop. Emitted at most once per stop per
    /// cycle; a stop whose fetch failed is simply absent until the next
    /// successful cycle.
    Timetable(TimetableResult),
}

/// Recurring fetch scheduler.
pub struct Poller<S> {
    source: S,
    commands: mpsc::Receiver<Command>,
    events: mpsc::Sender<Event>,
}

impl<S: StopSource> Poller<S> {
    /// Create a poller over the given schedule source and channels.
    pub fn new(source: S, commands: mpsc::Receiver<Command>, events: mpsc::Sender<Event>) -> Self {
        Self {
            source,
            commands,
            events,
        }
    }

    /// Run until every command sender has been dropped.
    ///
    /// Nothing is fetched before the first [`Command::Configure`] arrives.
    pub async fn run(self) {
        let Self {
            source,
            mut commands,
            events,
        } = self;

        let mut config: Option<PollConfig> = None;
        let mut next_fire: Option<Instant> = None;

        loop {
            tokio::select! {
                command = commands.recv() => match command {
                    Some(Command::Configure(new_config)) => {
                        info!(stops = new_config.stops.len(), "configuration received");
                        next_fire = Some(Instant::now() + new_config.initial_load_delay());
                        config = Some(new_config);
                    }
                    None => {
                        debug!("command channel closed, stopping poller");
                        return;
                    }
                },
                () = fire_at(next_fire) => {
                    // The deadline only arms together with a configuration.
                    let Some(config) = config.as_ref() else {
                        next_fire = None;
                        continue;
                    };
                    let delay = run_cycle(&source, config, &events).await;
                    debug!(delay_ms = delay.as_millis() as u64, "next fetch cycle scheduled");
                    next_fire = Some(Instant::now() + delay);
                }
            }
        }
    }
}

/// Fetch every configured stop once and emit the successful timetables.
///
/// Returns the delay to the next cycle, chosen after all stops have
/// settled.
async fn run_cycle<S: StopSource>(
    source: &S,
    config: &PollConfig,
    events: &mpsc::Sender<Event>,
) -> Duration {
    let locale = config.locale();
    let results = join_all(
        config
            .stops
            .iter()
            .map(|stop| source.fetch_stop(&config.api_url, stop, locale)),
    )
    .await;

    let mut any_failed = false;
    for (stop, result) in config.stops.iter().zip(results) {
        match result {
            Ok(timetable) => {
                info!(
                    stop = %stop.id,
                    departures = timetable.busses.len(),
                    "timetable updated"
                );
                if events.send(Event::Timetable(timetable)).await.is_err() {
                    debug!("event channel closed, dropping timetable");
                }
            }
            Err(error) => {
                error!(stop = %stop.id, %error, "fetch failed");
                any_failed = true;
            }
        }
    }

    cycle_delay(any_failed, config)
}

/// Success- or failure-specific delay for the next cycle.
fn cycle_delay(any_failed: bool, config: &PollConfig) -> Duration {
    if any_failed {
        config.retry_delay()
    } else {
        config.update_interval()
    }
}

/// Sleep until `deadline`; pend forever when no deadline is armed.
async fn fire_at(deadline: Option<Instant>) {
    match deadline {
        Some(at) => time::sleep_until(at).await,
        None => future::pending::<()>().await,
    }
}
