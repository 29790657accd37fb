use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::alerts::{derive_alerts, Alert};
use crate::classify::{classify, MetricKind, StatusBand};
use crate::command::{Command, HELP};
use crate::config::Config;
use crate::i18n::Locale;
use crate::render::{render, View};
use crate::simulator::{JitterProfile, Simulator};
use crate::snapshot::{ActionOutcome, SensorSnapshot, FAN_SPEED_STEP};

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    Updated,
    Ignored(&'static str),
    Help,
    Quit,
}

/// Owns everything a running demo needs. All mutation goes through `tick` and `apply`,
/// both called from the one task driving the session.
pub struct Session {
    snapshot: SensorSnapshot,
    simulator: Simulator,
    locale: Locale,
    view: View,
    tick_override: Option<Duration>,
}

impl Session {
    pub fn new(config: &Config) -> Self {
        Self {
            snapshot: SensorSnapshot::default(),
            simulator: Simulator::new(config.profile(), config.seed),
            locale: config.locale,
            view: config.view,
            tick_override: config.tick_ms.map(|_| config.tick_interval()),
        }
    }

    pub fn snapshot(&self) -> &SensorSnapshot {
        &self.snapshot
    }

    pub fn snapshot_mut(&mut self) -> &mut SensorSnapshot {
        &mut self.snapshot
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn ticks(&self) -> u64 {
        self.simulator.ticks()
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_override
            .unwrap_or_else(|| self.simulator.profile().default_period)
    }

    pub fn tick(&mut self) {
        self.simulator.tick(&mut self.snapshot);
    }

    pub fn render(&self) -> String {
        render(self.view, &self.snapshot, self.locale)
    }

    pub fn apply(&mut self, command: Command) -> CommandOutcome {
        let outcome = match command {
            Command::Toggle(control) => {
                let now_on = self.snapshot.toggle(control);
                tracing::info!(control = %control, on = now_on, "control toggled");
                CommandOutcome::Updated
            }
            Command::FanFaster => fan_outcome(self.snapshot.nudge_fan_speed(FAN_SPEED_STEP)),
            Command::FanSlower => fan_outcome(self.snapshot.nudge_fan_speed(-FAN_SPEED_STEP)),
            Command::FanFlip => fan_outcome(self.snapshot.flip_fan_direction()),
            Command::SetLocale(locale) => {
                self.locale = locale;
                CommandOutcome::Updated
            }
            Command::SetView(view) => {
                self.view = view;
                self.simulator.set_profile(JitterProfile::for_view(view));
                CommandOutcome::Updated
            }
            Command::Tick => {
                self.tick();
                CommandOutcome::Updated
            }
            Command::Help => CommandOutcome::Help,
            Command::Quit => CommandOutcome::Quit,
        };
        tracing::debug!(?command, ?outcome, "command applied");
        outcome
    }
}

fn fan_outcome(outcome: ActionOutcome) -> CommandOutcome {
    match outcome {
        ActionOutcome::Applied => CommandOutcome::Updated,
        ActionOutcome::IgnoredAutoMode => {
            CommandOutcome::Ignored("auto ventilation is on; `toggle auto` for manual fan control")
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Bands {
    pub temperature: StatusBand,
    pub humidity: StatusBand,
    pub ethylene: StatusBand,
}

/// One machine-readable frame of a headless run.
#[derive(Debug, Clone, Serialize)]
pub struct Frame {
    pub at: DateTime<Utc>,
    pub tick: u64,
    pub view: View,
    pub snapshot: SensorSnapshot,
    pub bands: Bands,
    pub alerts: Vec<Alert>,
}

impl Frame {
    pub fn capture(session: &Session) -> Self {
        let snapshot = session.snapshot().clone();
        Self {
            at: Utc::now(),
            tick: session.ticks(),
            view: session.view(),
            bands: Bands {
                temperature: classify(snapshot.temperature, MetricKind::Temperature),
                humidity: classify(snapshot.humidity, MetricKind::Humidity),
                ethylene: classify(snapshot.ethylene_level, MetricKind::Ethylene),
            },
            alerts: derive_alerts(&snapshot),
            snapshot,
        }
    }
}

async fn write_frame<W>(
    output: &mut W,
    session: &Session,
    ansi: bool,
    note: Option<&str>,
) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    let mut text = String::new();
    if ansi {
        text.push_str(CLEAR_SCREEN);
    }
    text.push_str(&session.render());
    if let Some(note) = note {
        text.push('\n');
        text.push_str(note);
        text.push('\n');
    }
    text.push_str("\n> ");
    output.write_all(text.as_bytes()).await?;
    output.flush().await?;
    Ok(())
}

fn ticker(period: Duration) -> tokio::time::Interval {
    let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticker
}

/// Drives the session until `quit` or cancellation: the timer regenerates readings, each
/// input line is one user action. Closed input leaves the timer running.
pub async fn run<R, W>(
    session: &mut Session,
    mut input: R,
    output: &mut W,
    ansi: bool,
    cancel: CancellationToken,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut buf = Vec::new();
    let mut input_open = true;
    let mut period = session.tick_interval();
    let mut timer = ticker(period);

    tracing::info!(
        view = %session.view(),
        locale = %session.locale(),
        period_ms = period.as_millis() as u64,
        "session started"
    );
    write_frame(output, session, ansi, None).await?;

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("session cancelled");
                break;
            }
            _ = timer.tick() => {
                session.tick();
                write_frame(output, session, ansi, None).await?;
            }
            // Partial reads stay in `buf` when another branch wins, so the line resumes.
            read = input.read_until(b'\n', &mut buf), if input_open => {
                if read? == 0 {
                    tracing::debug!("input closed; readings keep refreshing");
                    input_open = false;
                    continue;
                }
                // Undecodable bytes become U+FFFD and fail as an unknown command.
                let line = String::from_utf8_lossy(&buf).trim().to_string();
                buf.clear();
                if line.is_empty() {
                    continue;
                }
                match line.parse::<Command>() {
                    Ok(command) => match session.apply(command) {
                        CommandOutcome::Quit => break,
                        CommandOutcome::Help => {
                            write_frame(output, session, ansi, Some(HELP)).await?;
                        }
                        CommandOutcome::Ignored(reason) => {
                            write_frame(output, session, ansi, Some(reason)).await?;
                        }
                        CommandOutcome::Updated => {
                            write_frame(output, session, ansi, None).await?;
                        }
                    },
                    Err(err) => {
                        tracing::debug!(error = %err, input = %line, "rejected command");
                        write_frame(output, session, ansi, Some(&err.to_string())).await?;
                    }
                }

                let wanted = session.tick_interval();
                if wanted != period {
                    period = wanted;
                    timer = ticker(period);
                }
            }
        }
    }

    tracing::info!(ticks = session.ticks(), "session ended");
    Ok(())
}
