mod cli;
mod command;
mod command_result;
mod commands;
mod graphql_files;
mod manifest_operation;
mod output_utils;
mod persisted_query_manifest;


use clap::Parser;
pub(crate) use cli::Cli;
pub(crate) use command::RunnableCommand;
pub(crate) use command_result::CommandResult;
pub(crate) use manifest_operation::ManifestOperation;
pub(crate) use persisted_query_manifest::PersistedQueryManifest;

const DEFAULT_LOG_LEVEL: tracing::Level = tracing::Level::INFO;

#[tokio::main(flavor = "multi_thread", worker_threads = 10)]
async fn main() -> std::process::ExitCode {
    let mut cli = Cli::parse();
    setup_logger(&cli);

    if let Some(command) = cli.cmd.take() {
        let result = command.run(cli).await;
        if let Some(stdout) = result.stdout {
            println!("{stdout}");
        }
        if let Some(stderr) = result.stderr {
            eprintln!("{stderr}")
        }
        result.exit_code
    } else if let Err(err) = cli.run_default().await {
        eprintln!("{err:#}");
        std::process::ExitCode::FAILURE
    } else {
        std::process::ExitCode::SUCCESS
    }
}

/// Resolve the logging level from `-v` or the `LOG_LEVEL` environment
/// variable, along with a warning when `LOG_LEVEL` is not recognized.
fn log_level(cli: &Cli) -> (tracing::Level, Option<String>) {
    if cli.verbose {
        return (tracing::Level::DEBUG, None);
    }
    let Ok(env_val) = std::env::var("LOG_LEVEL") else {
        return (DEFAULT_LOG_LEVEL, None);
    };
    match env_val.trim().to_ascii_uppercase().as_str() {
        "DEBUG" | "VERBOSE" => (tracing::Level::DEBUG, None),
        "INFO" => (tracing::Level::INFO, None),
        "TRACE" => (tracing::Level::TRACE, None),
        "WARN" => (tracing::Level::WARN, None),
        _ => (
            DEFAULT_LOG_LEVEL,
            Some(format!("Ignoring unrecognized `LOG_LEVEL` value `{}`.", env_val.trim())),
        ),
    }
}

fn setup_logger(cli: &Cli) {
    let (level, warning) = log_level(cli);

    // Command output goes to stdout; keep logs out of it.
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(level >= tracing::Level::DEBUG)
        .with_writer(std::io::stderr)
        .init();
    log::trace!("Logging to stderr at `{level}`.");

    if let Some(warning) = warning {
        log::warn!("{warning}");
    }
}
