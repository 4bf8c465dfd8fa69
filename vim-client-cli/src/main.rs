use anyhow::{anyhow, Context};
use clap::Parser;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::prelude::*;
use vim_client_lib::connection::VimConnection;
use vim_client_lib::operations::remove_virtual_switch::RemoveVirtualSwitch;
use vim_client_schemas::cli_models::{Opts, SubCommand};

#[tokio::main(flavor = "multi_thread", worker_threads = 4)]
async fn main() {
    std::process::exit(match run_app().await {
        Ok(_) => 0,
        Err(err) => {
            tracing::error!("{:#}", err);
            1
        }
    });
}

fn log_level(s: &str) -> anyhow::Result<LevelFilter> {
    match s.to_lowercase().as_str() {
        "error" => Ok(LevelFilter::ERROR),
        "warn" => Ok(LevelFilter::WARN),
        "info" => Ok(LevelFilter::INFO),
        "trace" => Ok(LevelFilter::TRACE),
        _ => Err(anyhow!("Unknown Log LevelFilter {}", s)),
    }
}

/// This is the entrypoint for the sample client. The CLI arguments are processed,
/// logging is set up and the requested action is run against the service.
pub async fn run_app() -> Result<(), anyhow::Error> {
    // Invoke cli option parsing
    let opts: Opts = Opts::parse();
    let mut e = None;
    // Determine and set log level
    let level = match &opts.verbosity {
        None => LevelFilter::INFO,
        Some(x) => match log_level(x) {
            Ok(l) => l,
            Err(err) => {
                e = Some(err);
                LevelFilter::INFO
            }
        },
    };
    e.map(|e| tracing::warn!("{}", e));

    let stdout_log = tracing_subscriber::fmt::layer();
    tracing_subscriber::registry()
        .with(stdout_log.with_filter(level))
        .init();

    match parse_command(opts).await {
        Ok(_) => Ok(()),
        Err(err) => {
            err.chain()
                .skip(1)
                .for_each(|cause| tracing::error!("because: {}", cause));
            Err(err)
        }
    }
}

/// This is the entrypoint for all sample actions. Connect once, run the action and
/// log out again regardless of the action's result.
pub async fn parse_command(opts: Opts) -> anyhow::Result<()> {
    let cmd_name = opts.sub_command.name();
    tracing::info!("running {cmd_name} command");

    let connection = VimConnection::connect(&opts.url, &opts.username, &opts.password, opts.insecure)
        .await
        .context("connecting to the management service")?;

    let result = match &opts.sub_command {
        SubCommand::RemoveVirtualSwitch(cmd) => {
            let action = RemoveVirtualSwitch::new(cmd.hostname.clone(), cmd.vswitchid.clone());
            match action
                .run(&connection, &connection, connection.root_folder())
                .await
            {
                Ok(outcome) => {
                    let mut stdout = std::io::stdout();
                    outcome
                        .report(&mut stdout)
                        .context("writing outcome to stdout")
                }
                Err(err) => Err(err),
            }
        }
    };

    connection.disconnect().await;
    result.context("running CLI command")?;
    Ok(())
}
