mod cli;
mod commands;
mod config;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use meraki_api::DashboardClient;

use crate::cli::{Cli, Command, GlobalOpts};
use crate::error::CliError;
use crate::output::Console;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // The guard must stay alive so buffered file logs are flushed on exit.
    let _log_guard = init_tracing(&cli.global);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(global: &GlobalOpts) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let verbosity = if global.debug {
        global.verbose.max(2)
    } else {
        global.verbose
    };
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter = || {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter))
    };

    if global.log {
        if let Err(e) = std::fs::create_dir_all("log") {
            eprintln!("cannot create log directory: {e}");
        }
        let appender = tracing_appender::rolling::never(
            "log",
            format!("meraki_{}.log", chrono::Local::now().format("%Y%m%d-%H%M%S")),
        );
        let (writer, guard) = tracing_appender::non_blocking(appender);

        tracing_subscriber::registry()
            .with(env_filter())
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(writer),
            )
            .init();
        Some(guard)
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter())
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
        None
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        // Completions need no API client.
        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "meraki", &mut std::io::stdout());
            Ok(())
        }

        cmd => {
            let settings = config::load_settings(&cli.global)?;
            let api_key = config::resolve_api_key(&cli.global)?;
            let transport = config::transport(&settings)?;
            let api = DashboardClient::new(&transport, &api_key)?;

            // Ctrl-C cancels the whole batch: in-flight requests are
            // abandoned and no partial report is written.
            let cancel = tokio_util::sync::CancellationToken::new();
            {
                let cancel = cancel.clone();
                tokio::spawn(async move {
                    if tokio::signal::ctrl_c().await.is_ok() {
                        cancel.cancel();
                    }
                });
            }

            let ctx = commands::Context {
                api,
                concurrency: settings.concurrency,
                cancel,
                console: Console::new(output::should_color(&cli.global.color)),
            };

            let started = std::time::Instant::now();
            tracing::debug!(command = ?cmd, "dispatching command");
            let result = commands::dispatch(cmd, &ctx).await;
            tracing::info!("run complete, total runtime {:.2?}", started.elapsed());
            result
        }
    }
}
