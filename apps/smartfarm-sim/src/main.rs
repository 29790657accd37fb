use anyhow::{Context, Result};
use clap::Parser;
use std::future::Future;
use tokio::io::BufReader;
use tokio_util::sync::CancellationToken;

use smartfarm_sim::classify::classify;
use smartfarm_sim::cli::{Cli, Commands, RunArgs, SimulateArgs};
use smartfarm_sim::config::Config;
use smartfarm_sim::control::auto_adjust;
use smartfarm_sim::session::{self, Frame, Session};
use smartfarm_sim::snapshot::Control;

fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,smartfarm_sim=info".into());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.command {
        Commands::Run(args) => {
            let config = run_config(args)?;
            block_on_detached(run(config))
        }
        Commands::Simulate(args) => simulate(args),
        Commands::Classify(args) => {
            println!("{}", classify(args.value, args.kind));
            Ok(())
        }
        Commands::AutoAdjust(args) => {
            let setting = auto_adjust(args.temperature, args.previous);
            println!("{} {}%", setting.direction, setting.speed_percent);
            Ok(())
        }
    }
}

/// Runs `future` on a current-thread runtime, then shuts the runtime down without waiting
/// on blocking work. Tokio reads stdin on a blocking thread that stays parked until the
/// next line arrives, so a plain drop would hang after Ctrl-C.
fn block_on_detached<F>(future: F) -> Result<()>
where
    F: Future<Output = Result<()>>,
{
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let result = runtime.block_on(future);
    runtime.shutdown_background();
    result
}

fn run_config(args: RunArgs) -> Result<Config> {
    let mut config = Config::from_env()?;
    if let Some(view) = args.view {
        config.view = view;
    }
    if let Some(locale) = args.locale {
        config.locale = locale;
    }
    if let Some(tick_ms) = args.tick_ms {
        config.tick_ms = Some(tick_ms);
    }
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if args.no_ansi {
        config.ansi = false;
    }
    Ok(config)
}

async fn run(config: Config) -> Result<()> {
    let cancel = CancellationToken::new();
    let on_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("interrupt received");
            on_signal.cancel();
        }
    });

    let mut session = Session::new(&config);
    let input = BufReader::new(tokio::io::stdin());
    let mut output = tokio::io::stdout();
    session::run(&mut session, input, &mut output, config.ansi, cancel).await
}

fn simulate(args: SimulateArgs) -> Result<()> {
    let mut config = Config::from_env()?;
    if let Some(view) = args.view {
        config.view = view;
    }
    if let Some(locale) = args.locale {
        config.locale = locale;
    }
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }

    let mut session = Session::new(&config);
    if args.manual && session.snapshot().auto_ventilation_on {
        session.snapshot_mut().toggle(Control::AutoVentilation);
    }
    tracing::info!(ticks = args.ticks, view = %session.view(), seed = ?config.seed, "simulating");

    for _ in 0..args.ticks {
        session.tick();
        if args.json {
            let line = serde_json::to_string(&Frame::capture(&session))
                .context("failed to encode frame")?;
            println!("{line}");
        } else {
            println!("--- tick {} ---", session.ticks());
            print!("{}", session.render());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;
    use std::time::{Duration, Instant};

    #[test]
    fn teardown_does_not_wait_for_parked_blocking_reads() {
        let (_hold, parked) = mpsc::channel::<()>();
        let started = Instant::now();

        let result = block_on_detached(async move {
            tokio::task::spawn_blocking(move || {
                let _ = parked.recv_timeout(Duration::from_secs(30));
            });
            tokio::task::yield_now().await;
            Ok::<(), anyhow::Error>(())
        });

        assert!(result.is_ok());
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn teardown_returns_the_session_error() {
        let result = block_on_detached(async { Err::<(), _>(anyhow::anyhow!("session failed")) });
        assert_eq!(result.unwrap_err().to_string(), "session failed");
    }
}
