use clap::{Args, Parser, Subcommand};

use crate::classify::MetricKind;
use crate::control::FanDirection;
use crate::i18n::Locale;
use crate::render::View;

#[derive(Parser)]
#[command(
    name = "smartfarm-sim",
    version,
    about = "Simulated smart-farm monitoring console"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Interactive console: readings refresh on a timer, commands arrive on stdin.
    Run(RunArgs),
    /// Headless run for a fixed number of ticks.
    Simulate(SimulateArgs),
    /// Classify a single reading.
    Classify(ClassifyArgs),
    /// Print the fan setting the auto controller picks for a temperature.
    AutoAdjust(AutoAdjustArgs),
}

#[derive(Args)]
pub struct RunArgs {
    #[arg(long, value_enum)]
    pub view: Option<View>,
    #[arg(long, value_enum)]
    pub locale: Option<Locale>,
    #[arg(long)]
    pub tick_ms: Option<u64>,
    #[arg(long)]
    pub seed: Option<u64>,
    #[arg(long, default_value_t = false)]
    pub no_ansi: bool,
}

#[derive(Args)]
pub struct SimulateArgs {
    #[arg(long, default_value_t = 10)]
    pub ticks: u64,
    #[arg(long)]
    pub seed: Option<u64>,
    #[arg(long, value_enum)]
    pub view: Option<View>,
    #[arg(long, value_enum)]
    pub locale: Option<Locale>,
    /// Turn auto ventilation off before the first tick.
    #[arg(long, default_value_t = false)]
    pub manual: bool,
    /// One JSON frame per line instead of rendered screens.
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Args)]
pub struct ClassifyArgs {
    #[arg(value_enum)]
    pub kind: MetricKind,
    #[arg(allow_negative_numbers = true)]
    pub value: f64,
}

#[derive(Args)]
pub struct AutoAdjustArgs {
    #[arg(allow_negative_numbers = true)]
    pub temperature: f64,
    #[arg(long, value_enum, default_value_t = FanDirection::Clockwise)]
    pub previous: FanDirection,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_run_overrides() {
        let cli = Cli::try_parse_from([
            "smartfarm-sim",
            "run",
            "--view",
            "ventilation",
            "--locale",
            "hi",
            "--no-ansi",
        ])
        .unwrap();
        let Commands::Run(args) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(args.view, Some(View::Ventilation));
        assert_eq!(args.locale, Some(Locale::Hi));
        assert!(args.no_ansi);
        assert_eq!(args.tick_ms, None);
    }

    #[test]
    fn parses_one_shot_commands() {
        let cli = Cli::try_parse_from(["smartfarm-sim", "classify", "ethylene", "3.2"]).unwrap();
        let Commands::Classify(args) = cli.command else {
            panic!("expected classify");
        };
        assert_eq!(args.kind, MetricKind::Ethylene);
        assert_eq!(args.value, 3.2);

        let cli = Cli::try_parse_from([
            "smartfarm-sim",
            "auto-adjust",
            "-3",
            "--previous",
            "anticlockwise",
        ])
        .unwrap();
        let Commands::AutoAdjust(args) = cli.command else {
            panic!("expected auto-adjust");
        };
        assert_eq!(args.temperature, -3.0);
        assert_eq!(args.previous, FanDirection::Anticlockwise);
    }

    #[test]
    fn simulate_defaults() {
        let cli = Cli::try_parse_from(["smartfarm-sim", "simulate", "--json"]).unwrap();
        let Commands::Simulate(args) = cli.command else {
            panic!("expected simulate");
        };
        assert_eq!(args.ticks, 10);
        assert!(args.json);
        assert!(!args.manual);
    }
}
