use clap::Parser;
use forint_o_meter::args::{Args, Command};
use forint_o_meter::{commands, Config, Result};
use std::process::ExitCode;
use tracing::{debug, error, trace, warn};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    let log_level = args.common().log_level();
    init_logger(log_level);
    debug!("Log level set to {}", log_level.to_string().to_lowercase());

    match main_inner(args).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) if e.is_recoverable() => {
            warn!("{e}");
            ExitCode::from(2)
        }
        Err(e) => {
            error!("Exiting with error: {e}");
            ExitCode::FAILURE
        }
    }
}

pub async fn main_inner(args: Args) -> Result<()> {
    trace!("{args:?}");
    let home = args.common().home().path();

    let _: () = match args.command() {
        Command::Init(init_args) => commands::init(home, init_args.data()).await?.print(),

        Command::References => commands::references(Config::load(home).await?)
            .await?
            .print(),

        Command::Compose(compose_args) => {
            let config = Config::load(home).await?;
            let out = commands::compose(config, compose_args.clone()).await?;
            // The rows are the product of this command, so they go to stdout.
            if let Some(rows) = out.structure() {
                println!("{rows}");
            }
            out.print()
        }

        Command::Export(export_args) => {
            let config = Config::load(home).await?;
            commands::export(config, export_args.clone())
                .await?
                .print()
        }
    };
    Ok(())
}

/// Initializes the tracing subscriber.
pub fn init_logger(level: LevelFilter) {
    let filter = match std::env::var("RUST_LOG").ok() {
        // RUST_LOG exists; use it.
        Some(_) => EnvFilter::from_default_env(),
        // RUST_LOG does not exist; use default log level for the library and the binary only.
        None => EnvFilter::new(format!(
            "forint_o_meter={},{}={}",
            level,
            env!("CARGO_CRATE_NAME"),
            level
        )),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
