use clap::Parser;
use std::sync::Arc;
use taskmgr_cli::commands::{check, cli, init};
use taskmgr_cli::http;
use taskmgr_core::context::AppContext;
use taskmgr_core::error;
use taskmgr_plugins::services::PluginServicesFactory;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

static LOG_GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
    std::sync::OnceLock::new();

#[tokio::main]
async fn main() {
    let exit = match real_main().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{e}");
            exit_code_for_error(&e)
        }
    };

    std::process::exit(exit);
}

async fn real_main() -> Result<i32, error::CliError> {
    let args = cli::Args::parse();
    let cfg = taskmgr_core::config::load_default()
        .map_err(|e| error::CliError::Config(e.to_string()))?;
    init_tracing(&cfg.logging).map_err(error::CliError::Command)?;

    let ctx = AppContext::new(cfg, Some(Arc::new(PluginServicesFactory::default())));
    dispatch(args.command, ctx).await
}

fn exit_code_for_error(e: &error::CliError) -> i32 {
    // 0: success
    // 1: `check` found the command unsafe (returned as a normal exit code)
    // 11: config error
    // 20: server start / IO error
    // 50: internal/uncategorized
    match e {
        error::CliError::Config(_) => 11,
        error::CliError::Server(_) => 20,
        error::CliError::Io(_) => 20,
        error::CliError::Command(_) => 20,
        error::CliError::Anyhow(_) => 50,
    }
}

async fn dispatch(cmd: cli::Commands, ctx: AppContext) -> Result<i32, error::CliError> {
    match cmd {
        cli::Commands::Serve(serve_args) => {
            http::handle_serve(serve_args, &ctx).await?;
            Ok(0)
        }
        cli::Commands::Check(check_args) => Ok(check::handle_check(check_args)),
        cli::Commands::Examples => Ok(check::handle_examples()),
        cli::Commands::Init(init_args) => {
            init::handle_init(init_args)?;
            Ok(0)
        }
    }
}

fn init_tracing(logging: &taskmgr_core::config::LoggingConfig) -> Result<(), String> {
    if !logging.enabled {
        return Ok(());
    }

    let filter = match std::env::var("RUST_LOG") {
        Ok(v) if !v.trim().is_empty() => EnvFilter::from_default_env(),
        _ => EnvFilter::try_new(logging.level.clone()).map_err(|e| e.to_string())?,
    };

    let mut maybe_writer = None;

    if logging.file {
        let dir = match logging
            .directory
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
        {
            Some(d) => std::path::PathBuf::from(d),
            None => std::env::temp_dir().join("taskmgr"),
        };

        std::fs::create_dir_all(&dir).map_err(|e| format!("create log dir failed: {e}"))?;
        let file_name = format!("taskmgr.{}.log", std::process::id());
        let appender = tracing_appender::rolling::never(dir, file_name);
        let (non_blocking, guard) = tracing_appender::non_blocking(appender);
        let _ = LOG_GUARD.set(guard);
        maybe_writer = Some(non_blocking);
    }

    if !logging.console && maybe_writer.is_none() {
        return Err("logging disabled for both console and file".to_string());
    }

    let console_layer = logging.console.then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(atty::is(atty::Stream::Stderr))
    });

    let file_layer = maybe_writer.map(|w| {
        tracing_subscriber::fmt::layer()
            .with_writer(w)
            .with_ansi(false)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .init();

    Ok(())
}
