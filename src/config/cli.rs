use crate::config::toml_config::AppConfig;
use crate::utils::error::Result;
use clap::Parser;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "shounen-vs.toml";

#[derive(Debug, Clone, Parser)]
#[command(name = "shounen-vs")]
#[command(about = "Vote between two random anime characters")]
pub struct CliArgs {
    /// Path to TOML configuration file (defaults to ./shounen-vs.toml if present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Only draw characters whose role is "Main"
    #[arg(long)]
    pub main_only: bool,

    /// Stop after this many votes
    #[arg(long)]
    pub rounds: Option<u32>,

    /// Seed the random source for a reproducible session
    #[arg(long)]
    pub seed: Option<u64>,

    /// Print the resolved configuration and exit
    #[arg(long)]
    pub dry_run: bool,
}

impl CliArgs {
    /// 載入配置檔並套用命令列覆蓋設定
    pub fn load_config(&self) -> Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => AppConfig::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                AppConfig::from_file(DEFAULT_CONFIG_FILE)?
            }
            None => AppConfig::default(),
        };

        if self.main_only {
            config.selection.main_only = true;
        }
        if let Some(seed) = self.seed {
            config.selection.seed = Some(seed);
        }

        Ok(config)
    }
}
