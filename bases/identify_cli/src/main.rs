// bases/identify_cli/src/main.rs
mod app;
mod args;
mod config;
mod output;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use color_eyre::Result;

use app::App;
use args::CliArgs;
use config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let (known, ignored) = args::retain_known(std::env::args_os());
    let args = CliArgs::parse_from(known);
    let config = match Config::from_args(args) {
        Ok(config) => config,
        Err(e) => CliArgs::command()
            .error(ErrorKind::ValueValidation, e)
            .exit(),
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.default_log_filter().into()),
        )
        .with_writer(std::io::stderr)
        .init();

    for arg in &ignored {
        tracing::warn!("Ignoring unrecognized argument {:?}", arg);
    }

    let app = App::new(config);

    if let Err(error) = app.run().await {
        app.print_error(&error);
        std::process::exit(1);
    }
    Ok(())
}
