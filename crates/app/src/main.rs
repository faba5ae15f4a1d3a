use std::fmt;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use decifra_core::QuizConfig;
use decifra_core::model::{Identity, MainLanguage, UserId};
use services::{AppServices, AppServicesConfig, Clock, RemoteScoreConfig};
use storage::repository::Storage;
use storage::seed::{SeedPlan, seed_sample_data};
use tracing::info;
use tracing_subscriber::EnvFilter;
use ui::{App, UiApp, build_app_context};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidUser { raw: String },
    InvalidLanguage { raw: String },
    InvalidResults { raw: String },
    InvalidDbUrl { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidUser { raw } => write!(f, "invalid --user value: {raw}"),
            ArgsError::InvalidLanguage { raw } => write!(f, "invalid --language value: {raw}"),
            ArgsError::InvalidResults { raw } => write!(f, "invalid --results value: {raw}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
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

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- ui   [--db <sqlite_url>] [--user <uuid>] [--legacy-settle]");
    eprintln!(
        "  cargo run -p app -- seed [--db <sqlite_url>] [--user <uuid>] [--name <name>] [--language <key>] [--results <n>]"
    );
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db sqlite://decifra.sqlite3");
    eprintln!("  no --user: anonymous, results are not saved");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  DECIFRA_DB_URL, DECIFRA_USER_ID, DECIFRA_REMOTE_URL, DECIFRA_REMOTE_KEY, RUST_LOG");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Ui,
    Seed,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "ui" => Some(Self::Ui),
            "seed" => Some(Self::Seed),
            _ => None,
        }
    }
}

struct SeedArgs {
    name: String,
    language: MainLanguage,
    results: u32,
}

impl Default for SeedArgs {
    fn default() -> Self {
        Self {
            name: "Dev".into(),
            language: MainLanguage::default(),
            results: 5,
        }
    }
}

struct Args {
    db_url: String,
    user_id: Option<UserId>,
    legacy_settle: bool,
    seed: SeedArgs,
}

impl Args {
    fn parse(
        cmd: Command,
        args: &mut impl Iterator<Item = String>,
    ) -> Result<Self, ArgsError> {
        let mut db_url = std::env::var("DECIFRA_DB_URL")
            .ok()
            .map_or_else(|| "sqlite://decifra.sqlite3".into(), normalize_sqlite_url);
        let mut user_id = match std::env::var("DECIFRA_USER_ID") {
            Ok(raw) if !raw.trim().is_empty() => Some(
                raw.trim()
                    .parse::<UserId>()
                    .map_err(|_| ArgsError::InvalidUser { raw })?,
            ),
            _ => None,
        };
        let mut legacy_settle = false;
        let mut seed = SeedArgs::default();

        while let Some(arg) = args.next() {
            match (cmd, arg.as_str()) {
                (_, "--db") => {
                    let value = require_value(args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = normalize_sqlite_url(value);
                }
                (_, "--user") => {
                    let value = require_value(args, "--user")?;
                    let parsed = value
                        .parse::<UserId>()
                        .map_err(|_| ArgsError::InvalidUser { raw: value.clone() })?;
                    user_id = Some(parsed);
                }
                (Command::Ui, "--legacy-settle") => legacy_settle = true,
                (Command::Seed, "--name") => seed.name = require_value(args, "--name")?,
                (Command::Seed, "--language") => {
                    let value = require_value(args, "--language")?;
                    seed.language = value
                        .parse()
                        .map_err(|_| ArgsError::InvalidLanguage { raw: value.clone() })?;
                }
                (Command::Seed, "--results") => {
                    let value = require_value(args, "--results")?;
                    seed.results = value
                        .parse()
                        .map_err(|_| ArgsError::InvalidResults { raw: value.clone() })?;
                }
                (_, "--help" | "-h") => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            db_url,
            user_id,
            legacy_settle,
            seed,
        })
    }
}

fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw;
    }

    let trimmed = raw.trim().to_string();
    let path_str = trimmed
        .strip_prefix("sqlite:")
        .unwrap_or(trimmed.as_str())
        .to_string();
    let path = std::path::Path::new(&path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| std::path::PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    // No subcommand launches the UI.
    let cmd = match argv.first().map(String::as_str) {
        None => Command::Ui,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with("--") => Command::Ui,
        Some(first) => Command::from_arg(first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "unknown subcommand")
        })?,
    };

    if !argv.is_empty() && !argv[0].starts_with("--") {
        argv.remove(0);
    }

    let mut iter = argv.into_iter();
    let parsed = Args::parse(cmd, &mut iter).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    init_logging();
    prepare_sqlite_file(&parsed.db_url)?;

    match cmd {
        Command::Ui => {
            let identity = Identity::from(parsed.user_id);
            let quiz = if parsed.legacy_settle {
                QuizConfig::legacy()
            } else {
                QuizConfig::default()
            };
            let config = AppServicesConfig {
                clock: Clock::default(),
                identity,
                quiz,
                remote: RemoteScoreConfig::from_env(),
                ..AppServicesConfig::default()
            };
            let services = AppServices::new_sqlite(&parsed.db_url, config).await?;
            info!(anonymous = identity.is_anonymous(), "launching desktop ui");

            let app: Arc<dyn UiApp> = Arc::new(services);
            let context = build_app_context(&app);

            let desktop_cfg = DesktopConfig::new().with_window(
                WindowBuilder::new()
                    .with_title("Decifra")
                    .with_always_on_top(false),
            );

            LaunchBuilder::desktop()
                .with_cfg(desktop_cfg)
                .with_context(context)
                .launch(App);
            Ok(())
        }
        Command::Seed => {
            let storage = Storage::sqlite(&parsed.db_url).await?;
            let plan = SeedPlan {
                user_id: parsed.user_id,
                display_name: parsed.seed.name,
                main_language: parsed.seed.language,
                results: parsed.seed.results,
                now: Clock::default().now(),
            };
            let report = seed_sample_data(&storage, &plan).await?;
            println!(
                "seeded {} result(s) for user {}",
                report.results, report.user_id
            );
            println!("launch with: cargo run -p app -- ui --user {}", report.user_id);
            Ok(())
        }
    }
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
