use clap::Parser;
use cli::{Cli, Command};
use settings::Config;

#[macro_use]
extern crate log;

mod cli;
mod clipboard;
mod error;
mod problem;
mod runner;
mod server;
mod settings;

#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("ru=warn")).init();

    // Env config
    let cfg = Config::from_env();
    trace!("Loaded config: {:?}", cfg);

    let cli = Cli::parse();
    match cli.command {
        Command::Parse => server::parse(&cfg).await?,
        Command::Test { copy } => {
            runner::test(&cfg, copy).await?;
        }
        Command::Config => {
            let path = cfg.compile_command_path()?;
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            settings::configure(stdin, &path).await?;
        }
    }

    Ok(())
}
