//! Scribe entrypoint.
use anyhow::{Context, Result};
use clap::Parser;
use core_config::{Config, load_from};
use core_model::TabRegistry;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};
use std::sync::Once;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

mod session;

use session::Session;

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "scribe", version, about = "Scribe multi-tab text editing engine")]
struct Args {
    /// Files to open as tabs at startup (UTF-8 text).
    pub paths: Vec<PathBuf>,
    /// Optional configuration file path (overrides discovery of `scribe.toml`).
    #[arg(long = "config")]
    pub config: Option<PathBuf>,
    /// Read commands from this file instead of stdin.
    #[arg(long = "script")]
    pub script: Option<PathBuf>,
}

fn configure_logging(config: &Config) -> Option<WorkerGuard> {
    let log_path = config.file.log.file.as_path();
    let log_dir = match log_path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let file_name = log_path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "scribe.log".into());
    if log_path.exists() {
        let _ = std::fs::remove_file(log_path);
    }

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.file.log.filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let file_appender = tracing_appender::rolling::never(log_dir, file_name);
    let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
    match tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(nb_writer)
        .try_init()
    {
        Ok(_) => Some(guard),
        // Global tracing subscriber already installed; drop guard so writer shuts down.
        Err(_err) => None,
    }
}

fn install_panic_hook() {
    static HOOK: Once = Once::new();
    HOOK.call_once(|| {
        let default_panic = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            tracing::error!(target: "runtime.panic", ?info, "panic");
            default_panic(info);
        }));
    });
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = load_from(args.config.clone())?;
    let _log_guard = configure_logging(&config);
    install_panic_hook();

    info!(
        target: "runtime",
        config = ?config.source,
        paths = args.paths.len(),
        script = ?args.script,
        "startup"
    );

    let registry = TabRegistry::with_options(config.registry_options());
    let stdout = io::stdout();
    let mut session = Session::new(registry, stdout.lock());
    session.open_startup_paths(&args.paths)?;
    session.write_status()?;

    let summary = match &args.script {
        Some(path) => {
            let file = File::open(path).with_context(|| format!("opening script {}", path.display()))?;
            session.run(BufReader::new(file))?
        }
        None => session.run(io::stdin().lock())?,
    };
    info!(target: "runtime", ?summary, "shutdown");
    Ok(())
}
