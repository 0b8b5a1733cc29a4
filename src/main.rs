#[cfg(not(feature = "std"))]
fn main() {}

#[cfg(feature = "std")]
use artillery_client::{init_logging, terminal, App, Cli, CrosstermTerminal, HttpGameClient};
#[cfg(feature = "std")]
use clap::Parser;

#[cfg(feature = "std")]
#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref())?;
    let config = cli.into_config()?;

    let server = HttpGameClient::new(&config.base_url, config.request_timeout)?;
    log::info!("connecting to {}", config.base_url);

    terminal::install_panic_hook();
    let screen = CrosstermTerminal::acquire(config.palette)?;
    let mut app = App::new(config, server, screen);
    let result = app.run().await;
    // Give the terminal back before anything is printed.
    drop(app);

    if let Err(err) = &result {
        log::error!("{:#}", err);
    }
    result
}
