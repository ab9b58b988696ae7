use anyhow::Result;
use clap::{Parser, Subcommand};

mod app;
mod chat;
mod config;
mod events;
mod i18n;
mod logging;
mod streaming;
mod ui;

use config::Config;
use i18n::Language;

#[derive(Parser)]
#[command(name = "haowise")]
#[command(version)]
#[command(about = "Haowise in your terminal: browse the site and chat with the assistant", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show or set the persisted interface language (zh, en)
    Lang { value: Option<String> },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;
    logging::init(&config.config_home)?;

    match cli.command {
        None => app::run(config).await,
        Some(Commands::Lang { value }) => lang_command(config, value),
    }
}

fn lang_command(mut config: Config, value: Option<String>) -> Result<()> {
    match value {
        None => {
            println!("{}", config.language);
            Ok(())
        }
        Some(value) => {
            let language: Language = value
                .parse()
                .map_err(|message: String| anyhow::anyhow!(message))?;
            config.set_language(language);
            config.save()?;
            println!("Language set to {language}");
            Ok(())
        }
    }
}
