// Command line arguments, logging setup, and the context handed through
// the app in place of module-level globals

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use clap::Parser;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use store::UserStore;

/// Credential gate for a downstream application
#[derive(Parser, Debug)]
#[command(name = "credgate")]
#[command(about = "Login window that launches an application on success")]
#[command(version)]
pub struct Args {
    /// Path of the user table file
    #[arg(long, default_value = "users.json")]
    pub store: PathBuf,

    /// Program to launch after a successful login
    #[arg(long, default_value = "./app")]
    pub launch: PathBuf,

    /// Log level when RUST_LOG is not set (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Directory log files are written to
    #[arg(long, default_value = "logs")]
    pub log_dir: PathBuf,
}

/// Everything constructed once at startup and passed down explicitly
#[derive(Clone, Debug)]
pub struct AppContext {
    pub store: UserStore,
    pub downstream: PathBuf,
}

impl AppContext {
    pub fn from_args(args: &Args) -> Self {
        Self {
            store: UserStore::new(&args.store),
            downstream: args.launch.clone(),
        }
    }
}

/// Install the global tracing subscriber
/// Events go to stderr and, when the log directory is writable, to a
/// date-stamped file inside it
pub fn init_logging(args: &Args) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    let stderr_layer = fmt::layer().with_writer(std::io::stderr);

    match open_log_file(&args.log_dir) {
        Ok(file) => {
            let file_layer = fmt::layer().with_ansi(false).with_writer(Mutex::new(file));
            tracing_subscriber::registry()
                .with(stderr_layer)
                .with(file_layer)
                .with(filter)
                .init();
        }
        Err(e) => {
            tracing_subscriber::registry()
                .with(stderr_layer)
                .with(filter)
                .init();
            tracing::warn!(error = %e, "log file unavailable, logging to stderr only");
        }
    }
}

// One log file per day, named after the date
fn open_log_file(dir: &Path) -> std::io::Result<fs::File> {
    fs::create_dir_all(dir)?;
    let name = format!("app_{}.log", chrono::Local::now().format("%Y%m%d"));
    fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join(name))
}
