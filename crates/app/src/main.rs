use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use drill_core::model::MistakePolicy;
use drill_core::{OperatorSet, RandomSource, RngSource};
use services::{Clock, DrillSettings, DrillSettingsDraft};
use tracing_subscriber::EnvFilter;
use ui::{App, UiApp, build_app_context};

#[derive(Debug, PartialEq, Eq)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidOperators { raw: String },
    InvalidPolicy { raw: String },
    InvalidSeed { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidOperators { raw } => write!(f, "invalid --operators value: {raw}"),
            ArgsError::InvalidPolicy { raw } => write!(f, "invalid --policy value: {raw}"),
            ArgsError::InvalidSeed { raw } => write!(f, "invalid --seed value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn parse_operators(raw: &str) -> Result<OperatorSet, ArgsError> {
    match raw.trim() {
        "add-sub" | "add-subtract" => Ok(OperatorSet::AddSubtract),
        "all" | "add-subtract-multiply" => Ok(OperatorSet::AddSubtractMultiply),
        _ => Err(ArgsError::InvalidOperators {
            raw: raw.to_string(),
        }),
    }
}

fn parse_policy(raw: &str) -> Result<MistakePolicy, ArgsError> {
    match raw.trim() {
        "dedupe" | "dedupe-repeats" => Ok(MistakePolicy::DedupeRepeats),
        "append" | "append-always" => Ok(MistakePolicy::AppendAlways),
        _ => Err(ArgsError::InvalidPolicy {
            raw: raw.to_string(),
        }),
    }
}

fn parse_seed(raw: &str) -> Result<u64, ArgsError> {
    raw.trim().parse().map_err(|_| ArgsError::InvalidSeed {
        raw: raw.to_string(),
    })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --operators <add-sub|all>   operators to drill (default: all)");
    eprintln!("  --policy <dedupe|append>    how wrong answers enter the mistake list");
    eprintln!("  --config <path.json>        settings file");
    eprintln!("  --seed <u64>                reproducible problem sequence");
    eprintln!("  -v, --verbose               debug logging");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  DRILL_CONFIG, DRILL_OPERATORS, DRILL_POLICY, DRILL_SEED, RUST_LOG");
}

#[derive(Debug, Default, PartialEq, Eq)]
struct Args {
    config: Option<PathBuf>,
    overrides: DrillSettingsDraft,
    seed: Option<u64>,
    verbose: bool,
    help: bool,
}

impl Args {
    /// Environment first, then flags on top.
    fn parse(
        args: &mut impl Iterator<Item = String>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ArgsError> {
        let mut parsed = Self {
            config: env("DRILL_CONFIG").map(PathBuf::from),
            ..Self::default()
        };
        if let Some(raw) = env("DRILL_OPERATORS") {
            parsed.overrides.operators = Some(parse_operators(&raw)?);
        }
        if let Some(raw) = env("DRILL_POLICY") {
            parsed.overrides.mistake_policy = Some(parse_policy(&raw)?);
        }
        if let Some(raw) = env("DRILL_SEED") {
            parsed.seed = Some(parse_seed(&raw)?);
        }

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--operators" => {
                    let value = require_value(args, "--operators")?;
                    parsed.overrides.operators = Some(parse_operators(&value)?);
                }
                "--policy" => {
                    let value = require_value(args, "--policy")?;
                    parsed.overrides.mistake_policy = Some(parse_policy(&value)?);
                }
                "--config" => {
                    parsed.config = Some(PathBuf::from(require_value(args, "--config")?));
                }
                "--seed" => {
                    let value = require_value(args, "--seed")?;
                    parsed.seed = Some(parse_seed(&value)?);
                }
                "--verbose" | "-v" => parsed.verbose = true,
                "--help" | "-h" => parsed.help = true,
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(parsed)
    }

    /// Defaults, then the config file, then env and flag overrides.
    fn settings(&self) -> Result<DrillSettings, services::SettingsError> {
        let base = match self.config.as_ref() {
            Some(path) => DrillSettingsDraft::from_json_file(path)?,
            None => DrillSettingsDraft::new(),
        };
        base.overlay(self.overrides.clone()).validate()
    }
}

struct DesktopApp {
    settings: DrillSettings,
    seed: Option<u64>,
}

impl UiApp for DesktopApp {
    fn settings(&self) -> DrillSettings {
        self.settings
    }

    fn clock(&self) -> Clock {
        Clock::system()
    }

    fn random_source(&self) -> Box<dyn RandomSource> {
        match self.seed {
            Some(seed) => Box::new(RngSource::seeded(seed)),
            None => Box::new(RngSource::from_entropy()),
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let args = Args::parse(&mut argv, |key| std::env::var(key).ok()).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;
    if args.help {
        print_usage();
        return Ok(());
    }

    init_tracing(args.verbose);
    let settings = args.settings()?;
    tracing::info!(
        config = ?args.config,
        seed = ?args.seed,
        operators = ?settings.operators(),
        "launching drill"
    );

    let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
        settings,
        seed: args.seed,
    });
    let context = build_app_context(&app);

    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Math Drill")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
