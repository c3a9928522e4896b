use anyhow::Context;
use bn_server::cli::{self, Cli, Command};
use bn_server::{logging, serve_http, state::AppState, stdio};
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_logger(cli.verbose, cli.log_json);

    let mut config = cli::load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Serve { http, host, port } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            if http {
                config.validate_http().context("invalid configuration")?;
                serve_http(AppState::new(config)).await?;
            } else {
                config.validate().context("invalid configuration")?;
                stdio::serve_stdio(AppState::new(config))
                    .await
                    .context("stdio transport failed")?;
            }
        }
        Command::Detect { file, lang } => {
            println!("{}", cli::run_detect(&file, lang.as_deref(), &config)?);
        }
        Command::Beautify { file, indent, lang } => {
            config.validate().context("invalid configuration")?;
            print!("{}", cli::run_beautify(&file, indent, lang.as_deref(), &config)?);
        }
        Command::Minify { file, lang } => {
            println!("{}", cli::run_minify(&file, lang.as_deref(), &config)?);
        }
    }
    Ok(())
}
