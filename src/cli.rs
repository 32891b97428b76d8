use clap::{Args, CommandFactory, Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;

use crate::config::{AppPaths, ConfigStore};
use crate::http::HttpTransport;
use crate::manager;
use crate::utils::error::{AppError, AppResult};

#[derive(Parser)]
#[command(name = "mame-dl")]
#[command(about = "CLI ROM manager for MAME")]
#[command(version)]
#[command(after_help = "Not affiliated in any way with MAME or mamedev.org.")]
pub struct Cli {
    /// Settings directory (defaults to $MAME_DL_HOME, then ~/.mame-dl)
    #[arg(long, value_name = "DIR", global = true)]
    pub home: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Enable debug logging")]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    pub async fn execute(self) -> AppResult<()> {
        let paths = AppPaths::resolve(self.home.as_deref());
        paths.ensure_exists()?;
        debug!(settings = %paths.settings_dir().display(), "using settings directory");

        let Some(command) = self.command else {
            // Surface the configuration notice before the usage text
            ConfigStore::new(&paths).load()?;
            Cli::command()
                .print_help()
                .map_err(|e| AppError::Io(e.to_string()))?;
            return Ok(());
        };

        command.execute(&paths).await
    }
}

impl Commands {
    pub async fn execute(self, paths: &AppPaths) -> AppResult<()> {
        match self {
            Commands::Add(args) => {
                let transport = HttpTransport::new()?;
                manager::handle_add_command(paths, &transport, &args).await?;
            }
            Commands::Del(args) => {
                manager::handle_del_command(paths, &args)?;
            }
            Commands::Update => {
                let transport = HttpTransport::new()?;
                manager::handle_update_command(paths, &transport).await?;
            }
            Commands::Search(args) => {
                manager::handle_search_command(paths, &args)?;
            }
            Commands::Config(args) => {
                manager::handle_config_command(paths, &args)?;
            }
        }
        Ok(())
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Download ROMs
    Add(AddArgs),

    /// Delete ROMs
    Del(DelArgs),

    /// Scrape ROM URLs from sources and rebuild database
    Update,

    /// Search ROM names (not machine names or metadata)
    Search(SearchArgs),

    /// Configuration options. Valid keys: mamedir
    Config(ConfigArgs),
}

#[derive(Args)]
pub struct AddArgs {
    #[arg(required = true, help = "Machine names")]
    pub machines: Vec<String>,

    #[arg(short = 'F', long, help = "Forcefully redownload existing ROMs")]
    pub force: bool,
}

#[derive(Args)]
pub struct DelArgs {
    #[arg(required = true, help = "Machine names")]
    pub machines: Vec<String>,
}

#[derive(Args)]
pub struct SearchArgs {
    pub query: String,

    #[arg(short, long, help = "Search with regex pattern instead of string")]
    pub regex: bool,
}

#[derive(Args)]
pub struct ConfigArgs {
    pub key: String,
    pub value: String,
}
