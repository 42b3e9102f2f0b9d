//! `iceshare` - serve, encode and decode ICE record share links.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use iceshare_server::cli::{Cli, Command};
use iceshare_server::{commands, init_logging, server, Config};

fn load_config(path: Option<PathBuf>) -> anyhow::Result<Config> {
    Config::load_from(path).context("loading configuration")
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbosity());
    let config_path = cli.config.clone();

    match cli.command {
        Command::Keygen => println!("{}", commands::keygen()?),
        Command::Serve => {
            let config = load_config(config_path)?;
            server::run(&config).await.context("server error")?;
        }
        Command::Encode {
            input,
            base_url,
            token_only,
        } => {
            let config = load_config(config_path)?;
            let output = commands::run_encode(&config, &input, base_url, token_only)
                .await
                .context("encoding record")?;
            println!("{output}");
        }
        Command::Decode { input } => {
            let config = load_config(config_path)?;
            let output = commands::run_decode(&config, &input)
                .await
                .context("no record could be decoded")?;
            println!("{output}");
        }
    }

    Ok(())
}
