use crate::adapters::jikan::{JikanOptions, DEFAULT_CHARACTER_LIMIT};
use crate::core::recent_cache::DEFAULT_CACHE_CAPACITY;
use crate::core::selector::DEFAULT_MAX_ATTEMPTS;
use crate::domain::model::{default_catalog, AnimeInfo};
use crate::utils::error::{Result, VsError};
use crate::utils::logger::LogFormat;
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub selection: SelectionConfig,
    pub logging: LoggingConfig,
    pub anime: Vec<AnimeInfo>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub user_agent: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
    pub main_only: bool,
    pub character_limit: usize,
    pub cache_capacity: usize,
    pub max_attempts: u32,
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub format: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            selection: SelectionConfig::default(),
            logging: LoggingConfig::default(),
            anime: default_catalog(),
        }
    }
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            main_only: false,
            character_limit: DEFAULT_CHARACTER_LIMIT,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            seed: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: "compact".to_string(),
        }
    }
}

impl AppConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| VsError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${JIKAN_BASE})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| VsError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        if self.anime.len() < 2 {
            return Err(VsError::InvalidConfigValueError {
                field: "anime".to_string(),
                value: self.anime.len().to_string(),
                reason: "At least two anime are required for a matchup".to_string(),
            });
        }

        let ids: Vec<u32> = self.anime.iter().map(|a| a.id).collect();
        validation::validate_unique_ids("anime.id", &ids)?;

        for anime in &self.anime {
            validation::validate_non_empty_string("anime.name", &anime.name)?;
            validation::validate_url("anime.api_url", &anime.api_url)?;
        }

        validation::validate_positive_number(
            "selection.character_limit",
            self.selection.character_limit,
            1,
        )?;
        validation::validate_positive_number(
            "selection.cache_capacity",
            self.selection.cache_capacity,
            1,
        )?;
        validation::validate_positive_number(
            "selection.max_attempts",
            self.selection.max_attempts as usize,
            1,
        )?;

        if let Some(timeout) = self.api.timeout_seconds {
            validation::validate_positive_number("api.timeout_seconds", timeout as usize, 1)?;
        }

        if self.log_format().is_none() {
            return Err(VsError::InvalidConfigValueError {
                field: "logging.format".to_string(),
                value: self.logging.format.clone(),
                reason: "Unsupported format. Valid formats: compact, json".to_string(),
            });
        }

        Ok(())
    }

    pub fn log_format(&self) -> Option<LogFormat> {
        LogFormat::parse(&self.logging.format)
    }

    pub fn jikan_options(&self) -> JikanOptions {
        JikanOptions {
            main_only: self.selection.main_only,
            character_limit: self.selection.character_limit,
            timeout: self.api.timeout_seconds.map(Duration::from_secs),
            user_agent: self.api.user_agent.clone(),
        }
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
